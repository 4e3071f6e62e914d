use std::collections::BTreeSet;

use shared::{
    domain::{Dimension, ExperimentLog, FilterSelection},
    error::SnapshotError,
    protocol::FilterOptions,
};

/// The loaded snapshot. Immutable once constructed.
#[derive(Debug, Clone, Default)]
pub struct ExperimentTable {
    rows: Vec<ExperimentLog>,
}

impl ExperimentTable {
    pub fn new(rows: Vec<ExperimentLog>) -> Result<Self, SnapshotError> {
        for (index, row) in rows.iter().enumerate() {
            let non_finite = if !row.quantity_used_ml.is_finite() {
                Some("quantity_used_ml")
            } else if !row.total_cost.is_finite() {
                Some("total_cost")
            } else {
                None
            };
            if let Some(column) = non_finite {
                return Err(SnapshotError::NonFinite {
                    row: index + 1,
                    column,
                });
            }
        }
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[ExperimentLog] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sorted distinct values of one column.
    pub fn distinct(&self, dimension: Dimension) -> Vec<String> {
        self.rows
            .iter()
            .map(|row| dimension.value_of(row))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_owned)
            .collect()
    }

    pub fn filter_options(&self) -> FilterOptions {
        FilterOptions {
            researchers: self.distinct(Dimension::Researcher),
            chemicals: self.distinct(Dimension::Chemical),
            instruments: self.distinct(Dimension::Instrument),
        }
    }

    pub fn filter<'a>(&'a self, selection: &FilterSelection) -> FilteredView<'a> {
        FilteredView {
            rows: self
                .rows
                .iter()
                .filter(|row| selection.matches(row))
                .collect(),
        }
    }
}

/// Rows of the table that satisfy a selection, in table order.
#[derive(Debug, Clone, Default)]
pub struct FilteredView<'a> {
    rows: Vec<&'a ExperimentLog>,
}

impl<'a> FilteredView<'a> {
    pub fn rows(&self) -> &[&'a ExperimentLog] {
        &self.rows
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a ExperimentLog> + '_ {
        self.rows.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
