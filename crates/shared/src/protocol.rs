use serde::{Deserialize, Serialize};

use crate::{
    domain::{Dimension, FilterSelection},
    figure::Figure,
};

/// Sorted distinct values offered by each filter dropdown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub researchers: Vec<String>,
    pub chemicals: Vec<String>,
    pub instruments: Vec<String>,
}

/// Body of a filter-change request. A missing or `null` list means "no selection".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardRequest {
    #[serde(default)]
    pub researchers: Option<Vec<String>>,
    #[serde(default)]
    pub chemicals: Option<Vec<String>>,
    #[serde(default)]
    pub instruments: Option<Vec<String>>,
}

impl From<DashboardRequest> for FilterSelection {
    fn from(value: DashboardRequest) -> Self {
        FilterSelection::default()
            .with(Dimension::Researcher, value.researchers.unwrap_or_default())
            .with(Dimension::Chemical, value.chemicals.unwrap_or_default())
            .with(Dimension::Instrument, value.instruments.unwrap_or_default())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardFigures {
    pub chemical_usage_bubble: Figure,
    pub cost_distribution_sunburst: Figure,
    pub instrument_usage_polar: Figure,
    pub daily_cost_line: Figure,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryLabels {
    pub total_cost: String,
    pub unique_instruments: String,
    pub busiest_day: String,
}

/// Everything the page redraws after a filter change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardUpdate {
    pub row_count: usize,
    pub figures: DashboardFigures,
    pub summaries: SummaryLabels,
}
