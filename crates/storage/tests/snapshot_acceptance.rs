use chrono::NaiveDate;
use shared::domain::ExperimentLog;
use storage::{load_snapshot, LabStore};

#[tokio::test]
async fn snapshot_preserves_rows_written_by_the_seeding_path() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("lab_inventory.db");
    let url = format!("sqlite://{}", path.to_string_lossy().replace('\\', "/"));

    let writer = LabStore::create(&url).await.expect("create");
    let day = NaiveDate::from_ymd_opt(2024, 1, 1).expect("date");
    let rows = [
        ("A", "X", "I1", 10.0, 100.0),
        ("B", "Y", "I2", 5.0, 50.0),
        ("A", "X", "I1", 20.0, 200.0),
    ];
    for (researcher, chemical, instrument, quantity, cost) in rows {
        writer
            .insert_experiment_log(&ExperimentLog {
                researcher: researcher.into(),
                chemical: chemical.into(),
                instrument_used: instrument.into(),
                quantity_used_ml: quantity,
                total_cost: cost,
                date: day,
            })
            .await
            .expect("insert");
    }
    writer.close().await;

    let logs = load_snapshot(&url).await.expect("snapshot");
    assert_eq!(logs.len(), 3);
    let total: f64 = logs.iter().map(|log| log.total_cost).sum();
    assert_eq!(total, 350.0);

    // A second snapshot sees the same data; loading never writes.
    let again = load_snapshot(&url).await.expect("snapshot");
    assert_eq!(again, logs);
}
