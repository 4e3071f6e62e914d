use chrono::{Days, NaiveDate};
use shared::domain::ExperimentLog;

const RESEARCHERS: [&str; 4] = ["Dr. Asha Rao", "Dr. Ben Ito", "Dr. Chen Wei", "Dr. Dana Cruz"];
const INSTRUMENTS: [&str; 4] = ["Centrifuge", "Microscope", "PCR Machine", "Spectrophotometer"];
/// Chemical name and price per ml.
const CHEMICALS: [(&str, f64); 5] = [
    ("Acetone", 1.2),
    ("Ethanol", 0.8),
    ("Hydrochloric Acid", 2.5),
    ("Sodium Chloride", 0.3),
    ("Sulfuric Acid", 3.1),
];

/// Deterministic demo dataset: between one and four log entries per day.
pub fn demo_rows(start: NaiveDate, days: u32) -> Vec<ExperimentLog> {
    let mut rows = Vec::new();
    for day in 0..days as usize {
        let Some(date) = start.checked_add_days(Days::new(day as u64)) else {
            break;
        };
        let entries = 1 + (day * 7) % 4;
        for entry in 0..entries {
            let seed = day * 5 + entry * 3;
            let (chemical, price) = CHEMICALS[(seed / 2) % CHEMICALS.len()];
            let quantity_used_ml = 5.0 + ((seed * 37) % 96) as f64 * 0.5;
            rows.push(ExperimentLog {
                researcher: RESEARCHERS[seed % RESEARCHERS.len()].to_string(),
                chemical: chemical.to_string(),
                instrument_used: INSTRUMENTS[(day + entry) % INSTRUMENTS.len()].to_string(),
                quantity_used_ml,
                total_cost: (quantity_used_ml * price * 100.0).round() / 100.0,
                date,
            });
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).expect("date")
    }

    #[test]
    fn demo_rows_are_deterministic() {
        assert_eq!(demo_rows(start(), 10), demo_rows(start(), 10));
    }

    #[test]
    fn every_day_gets_at_least_one_row() {
        let rows = demo_rows(start(), 14);
        let mut days: Vec<NaiveDate> = rows.iter().map(|row| row.date).collect();
        days.dedup();
        assert_eq!(days.len(), 14);
        assert!(rows.iter().all(|row| row.total_cost > 0.0));
    }

    #[test]
    fn zero_days_yields_nothing() {
        assert!(demo_rows(start(), 0).is_empty());
    }
}
