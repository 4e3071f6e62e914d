use shared::{
    domain::{ExperimentLog, FilterSelection},
    error::SnapshotError,
    protocol::{DashboardFigures, DashboardUpdate, FilterOptions},
};
use tracing::debug;

pub mod charts;
pub mod summary;
pub mod table;

pub use summary::{format_currency, Summaries};
pub use table::{ExperimentTable, FilteredView};

pub const DEFAULT_CURRENCY_SYMBOL: &str = "\u{20b9}";

/// Application context built once at startup. The server shares it behind one `Arc`.
#[derive(Debug, Clone)]
pub struct DashboardContext {
    table: ExperimentTable,
    options: FilterOptions,
    currency_symbol: String,
}

impl DashboardContext {
    pub fn new(table: ExperimentTable, currency_symbol: impl Into<String>) -> Self {
        let options = table.filter_options();
        Self {
            table,
            options,
            currency_symbol: currency_symbol.into(),
        }
    }

    pub fn from_rows(
        rows: Vec<ExperimentLog>,
        currency_symbol: impl Into<String>,
    ) -> Result<Self, SnapshotError> {
        Ok(Self::new(ExperimentTable::new(rows)?, currency_symbol))
    }

    pub fn table(&self) -> &ExperimentTable {
        &self.table
    }

    /// Dropdown options, always derived from the full table.
    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    pub fn currency_symbol(&self) -> &str {
        &self.currency_symbol
    }
}

/// Filters the table and rebuilds every chart and summary for the page.
pub fn recompute(ctx: &DashboardContext, selection: &FilterSelection) -> DashboardUpdate {
    let view = ctx.table.filter(selection);
    debug!(
        matched = view.len(),
        total = ctx.table.len(),
        unfiltered = selection.is_unfiltered(),
        "recomputing dashboard"
    );

    let summaries = Summaries::compute(&view);
    DashboardUpdate {
        row_count: view.len(),
        figures: DashboardFigures {
            chemical_usage_bubble: charts::chemical_usage_bubble(&view),
            cost_distribution_sunburst: charts::cost_distribution_sunburst(&view),
            instrument_usage_polar: charts::instrument_usage_polar(&view),
            daily_cost_line: charts::daily_cost_line(&view),
        },
        summaries: summaries.labels(&ctx.currency_symbol),
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
