use super::*;

fn log(researcher: &str, instrument: &str, cost: f64, date: &str) -> ExperimentLog {
    ExperimentLog {
        researcher: researcher.to_string(),
        chemical: "Ethanol".to_string(),
        instrument_used: instrument.to_string(),
        quantity_used_ml: 12.5,
        total_cost: cost,
        date: parse_log_date(date).expect("date"),
    }
}

fn file_url(dir: &tempfile::TempDir, name: &str) -> String {
    let path = dir.path().join(name);
    format!("sqlite://{}", path.to_string_lossy().replace('\\', "/"))
}

#[tokio::test]
async fn stores_and_loads_experiment_logs() {
    let store = LabStore::create("sqlite::memory:").await.expect("db");
    let first = log("Asha", "Centrifuge", 120.0, "2024-03-01");
    let second = log("Bilal", "Spectrometer", 80.25, "2024-03-02");
    store.insert_experiment_log(&first).await.expect("insert");
    store.insert_experiment_log(&second).await.expect("insert");

    let logs = store.load_experiment_logs().await.expect("load");
    assert_eq!(logs, vec![first, second]);
}

#[tokio::test]
async fn health_check_succeeds_for_live_pool() {
    let store = LabStore::create("sqlite::memory:").await.expect("db");
    store.health_check().await.expect("health check");
}

#[tokio::test]
async fn open_refuses_missing_database_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = LabStore::open(&file_url(&dir, "absent.db"))
        .await
        .err()
        .expect("missing file must fail");
    assert!(err.to_string().contains("does not exist"));
    assert!(!dir.path().join("absent.db").exists());
}

#[tokio::test]
async fn snapshot_reads_file_created_by_writer() {
    let dir = tempfile::tempdir().expect("tempdir");
    let url = file_url(&dir, "nested/lab_inventory.db");

    let writer = LabStore::create(&url).await.expect("create");
    writer
        .insert_experiment_log(&log("Asha", "Centrifuge", 10.0, "2024-01-01"))
        .await
        .expect("insert");
    writer.close().await;

    let logs = load_snapshot(&url).await.expect("snapshot");
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].instrument_used, "Centrifuge");
}

#[tokio::test]
async fn load_fails_when_table_is_absent() {
    let dir = tempfile::tempdir().expect("tempdir");
    let url = file_url(&dir, "other.db");
    let options = SqliteConnectOptions::from_str(&url)
        .expect("url")
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .connect_with(options)
        .await
        .expect("pool");
    sqlx::query("CREATE TABLE inventory (item TEXT)")
        .execute(&pool)
        .await
        .expect("create");
    pool.close().await;

    let err = load_snapshot(&url).await.expect_err("no table");
    assert!(err.to_string().contains("experiment_logs"));
}

#[tokio::test]
async fn load_rejects_unparseable_dates() {
    let store = LabStore::create("sqlite::memory:").await.expect("db");
    sqlx::query(
        "INSERT INTO experiment_logs VALUES ('Asha', 'Ethanol', 'Centrifuge', 1.0, 2.0, 'last tuesday')",
    )
    .execute(store.pool())
    .await
    .expect("insert");

    let err = store.load_experiment_logs().await.expect_err("bad date");
    assert!(format!("{err:#}").contains("last tuesday"));
}

#[tokio::test]
async fn load_rejects_text_in_numeric_columns() {
    let store = LabStore::create("sqlite::memory:").await.expect("db");
    sqlx::query(
        "INSERT INTO experiment_logs VALUES ('Asha', 'Ethanol', 'Centrifuge', 'lots', 'n/a', '2024-01-02')",
    )
    .execute(store.pool())
    .await
    .expect("insert");

    let err = store.load_experiment_logs().await.expect_err("text cost");
    let message = format!("{err:#}");
    assert!(message.contains("row 1"), "{message}");
    assert!(message.contains("quantity_used_ml"), "{message}");
}

#[tokio::test]
async fn load_rejects_text_cost_even_with_numeric_quantity() {
    let store = LabStore::create("sqlite::memory:").await.expect("db");
    sqlx::query(
        "INSERT INTO experiment_logs VALUES ('Asha', 'Ethanol', 'Centrifuge', 4.5, 'n/a', '2024-01-02')",
    )
    .execute(store.pool())
    .await
    .expect("insert");

    let err = store.load_experiment_logs().await.expect_err("text cost");
    assert!(format!("{err:#}").contains("total_cost"));
}

#[tokio::test]
async fn loads_experiment_logs_exposed_as_a_view() {
    let dir = tempfile::tempdir().expect("tempdir");
    let url = file_url(&dir, "view.db");
    let options = SqliteConnectOptions::from_str(&url)
        .expect("url")
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .connect_with(options)
        .await
        .expect("pool");
    for statement in [
        "CREATE TABLE raw_logs (researcher TEXT, chemical TEXT, instrument_used TEXT, quantity_used_ml REAL, total_cost REAL, date TEXT)",
        "INSERT INTO raw_logs VALUES ('Asha', 'Ethanol', 'Centrifuge', 2.0, 40.0, '2024-02-01')",
        "CREATE VIEW experiment_logs AS SELECT * FROM raw_logs",
    ] {
        sqlx::query(statement).execute(&pool).await.expect("schema");
    }
    pool.close().await;

    let logs = load_snapshot(&url).await.expect("snapshot");
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].total_cost, 40.0);
}

#[tokio::test]
async fn integer_costs_load_as_floats() {
    let store = LabStore::create("sqlite::memory:").await.expect("db");
    sqlx::query(
        "INSERT INTO experiment_logs VALUES ('Asha', 'Ethanol', 'Centrifuge', 5, 300, '2024-01-02 00:00:00')",
    )
    .execute(store.pool())
    .await
    .expect("insert");

    let logs = store.load_experiment_logs().await.expect("load");
    assert_eq!(logs[0].total_cost, 300.0);
    assert_eq!(logs[0].date, NaiveDate::from_ymd_opt(2024, 1, 2).expect("date"));
}

#[test]
fn parses_plain_and_timestamp_dates() {
    let expected = NaiveDate::from_ymd_opt(2024, 5, 17).expect("date");
    assert_eq!(parse_log_date("2024-05-17").expect("plain"), expected);
    assert_eq!(parse_log_date("2024-05-17 08:30:00").expect("space"), expected);
    assert_eq!(parse_log_date("2024-05-17T08:30:00").expect("iso"), expected);
    assert!(parse_log_date("17/05/2024").is_err());
}

#[test]
fn sqlite_path_ignores_memory_urls() {
    assert!(sqlite_path("sqlite::memory:").is_none());
    assert_eq!(
        sqlite_path("sqlite://./data/lab.db?mode=ro"),
        Some(PathBuf::from("./data/lab.db"))
    );
}
