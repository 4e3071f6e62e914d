use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use shared::protocol::SummaryLabels;

use crate::table::FilteredView;

pub const NO_DATA: &str = "N/A";

#[derive(Debug, Clone, PartialEq)]
pub struct Summaries {
    pub total_cost: f64,
    pub distinct_instruments: usize,
    /// Date with the most rows; ties resolve to the earliest date.
    pub busiest_day: Option<NaiveDate>,
}

impl Summaries {
    pub fn compute(view: &FilteredView<'_>) -> Self {
        let total_cost = view.iter().map(|row| row.total_cost).sum();
        let distinct_instruments = view
            .iter()
            .map(|row| row.instrument_used.as_str())
            .collect::<BTreeSet<_>>()
            .len();

        let mut per_day: BTreeMap<NaiveDate, usize> = BTreeMap::new();
        for row in view.iter() {
            *per_day.entry(row.date).or_default() += 1;
        }
        let mut busiest_day: Option<(NaiveDate, usize)> = None;
        for (day, count) in per_day {
            if busiest_day.map_or(true, |(_, best)| count > best) {
                busiest_day = Some((day, count));
            }
        }

        Self {
            total_cost,
            distinct_instruments,
            busiest_day: busiest_day.map(|(day, _)| day),
        }
    }

    pub fn labels(&self, currency_symbol: &str) -> SummaryLabels {
        let busiest = self
            .busiest_day
            .map(|day| day.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| NO_DATA.to_string());
        SummaryLabels {
            total_cost: format!(
                "Total Cost: {}",
                format_currency(self.total_cost, currency_symbol)
            ),
            unique_instruments: format!("Instruments Used: {}", self.distinct_instruments),
            busiest_day: format!("Busiest Day: {busiest}"),
        }
    }
}

/// `1234567.891` -> `₹1,234,567.89`
pub fn format_currency(amount: f64, symbol: &str) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let negative = amount < 0.0 && fixed != "0.00";
    let sign = if negative { "-" } else { "" };
    format!("{sign}{symbol}{grouped}.{cents}")
}
