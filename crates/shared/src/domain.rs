use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One row of the `experiment_logs` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentLog {
    pub researcher: String,
    pub chemical: String,
    pub instrument_used: String,
    pub quantity_used_ml: f64,
    pub total_cost: f64,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Researcher,
    Chemical,
    Instrument,
}

impl Dimension {
    pub const ALL: [Dimension; 3] = [
        Dimension::Researcher,
        Dimension::Chemical,
        Dimension::Instrument,
    ];

    pub fn value_of(self, row: &ExperimentLog) -> &str {
        match self {
            Dimension::Researcher => &row.researcher,
            Dimension::Chemical => &row.chemical,
            Dimension::Instrument => &row.instrument_used,
        }
    }
}

/// Selected values per dimension. An empty set leaves that dimension unfiltered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    #[serde(default)]
    pub researchers: BTreeSet<String>,
    #[serde(default)]
    pub chemicals: BTreeSet<String>,
    #[serde(default)]
    pub instruments: BTreeSet<String>,
}

impl FilterSelection {
    pub fn values(&self, dimension: Dimension) -> &BTreeSet<String> {
        match dimension {
            Dimension::Researcher => &self.researchers,
            Dimension::Chemical => &self.chemicals,
            Dimension::Instrument => &self.instruments,
        }
    }

    pub fn with<I, S>(mut self, dimension: Dimension, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let target = match dimension {
            Dimension::Researcher => &mut self.researchers,
            Dimension::Chemical => &mut self.chemicals,
            Dimension::Instrument => &mut self.instruments,
        };
        target.extend(values.into_iter().map(Into::into));
        self
    }

    pub fn is_unfiltered(&self) -> bool {
        Dimension::ALL
            .iter()
            .all(|dimension| self.values(*dimension).is_empty())
    }

    pub fn matches(&self, row: &ExperimentLog) -> bool {
        Dimension::ALL.iter().all(|dimension| {
            let selected = self.values(*dimension);
            selected.is_empty() || selected.contains(dimension.value_of(row))
        })
    }
}
