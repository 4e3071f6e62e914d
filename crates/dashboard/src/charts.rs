use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde_json::Value;
use shared::figure::{
    palette_color, Annotation, Axis, Figure, Line, Marker, Mode, PolarTrace, ScatterTrace,
    SunburstTrace, Trace,
};

use crate::table::FilteredView;

pub const BUBBLE_TITLE: &str = "Chemical Cost vs Quantity";
pub const SUNBURST_TITLE: &str = "Cost Breakdown by Instrument, Chemical, and Researcher";
pub const POLAR_TITLE: &str = "Average Cost per Instrument";
pub const DAILY_TITLE: &str = "Daily Total Cost";
pub const EMPTY_NOTICE: &str = "No data for the selected filters";

/// Largest rendered bubble diameter in pixels.
const MAX_BUBBLE_PX: f64 = 20.0;

/// Quantity vs cost, one trace per chemical in order of first appearance.
pub fn chemical_usage_bubble(view: &FilteredView<'_>) -> Figure {
    let mut order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, ScatterTrace> = HashMap::new();

    let max_cost = view
        .iter()
        .map(|row| row.total_cost)
        .fold(0.0_f64, f64::max);
    let sizeref = if max_cost > 0.0 {
        2.0 * max_cost / (MAX_BUBBLE_PX * MAX_BUBBLE_PX)
    } else {
        1.0
    };

    for row in view.iter() {
        let chemical = row.chemical.as_str();
        let trace = groups.entry(chemical).or_insert_with(|| {
            let color = palette_color(order.len());
            order.push(chemical);
            ScatterTrace {
                mode: Mode::Markers,
                name: Some(chemical.to_string()),
                x: Vec::new(),
                y: Vec::new(),
                hovertext: Vec::new(),
                marker: Some(Marker {
                    color: color.to_string(),
                    size: Vec::new(),
                    sizemode: Some("area".into()),
                    sizeref: Some(sizeref),
                    sizemin: None,
                }),
                line: None,
                legendgroup: Some(chemical.to_string()),
                showlegend: true,
            }
        });
        trace.x.push(Value::from(row.quantity_used_ml));
        trace.y.push(row.total_cost);
        trace.hovertext.push(chemical.to_string());
        if let Some(marker) = trace.marker.as_mut() {
            marker.size.push(row.total_cost.max(0.0));
        }
    }

    let mut figure = Figure::new(BUBBLE_TITLE);
    figure.layout.xaxis = Some(Axis::titled("quantity_used_ml"));
    figure.layout.yaxis = Some(Axis::titled("total_cost"));
    for chemical in order {
        if let Some(trace) = groups.remove(chemical) {
            figure.data.push(Trace::Scatter(trace));
        }
    }
    if figure.data.is_empty() {
        figure.data.push(Trace::Scatter(empty_scatter(Mode::Markers)));
    }
    annotate_if_empty(figure)
}

/// Instrument -> chemical -> researcher, weighted by summed cost.
pub fn cost_distribution_sunburst(view: &FilteredView<'_>) -> Figure {
    let mut tree: BTreeMap<&str, BTreeMap<&str, BTreeMap<&str, f64>>> = BTreeMap::new();
    for row in view.iter() {
        *tree
            .entry(row.instrument_used.as_str())
            .or_default()
            .entry(row.chemical.as_str())
            .or_default()
            .entry(row.researcher.as_str())
            .or_default() += row.total_cost;
    }

    let mut trace = SunburstTrace {
        ids: Vec::new(),
        labels: Vec::new(),
        parents: Vec::new(),
        values: Vec::new(),
        branchvalues: "total".into(),
    };
    let mut push = |id: String, label: &str, parent: &str, value: f64| {
        trace.ids.push(id);
        trace.labels.push(label.to_string());
        trace.parents.push(parent.to_string());
        trace.values.push(value);
    };

    for (instrument, chemicals) in &tree {
        let instrument_total: f64 = chemicals.values().flat_map(|r| r.values()).sum();
        push(instrument.to_string(), instrument, "", instrument_total);
        for (chemical, researchers) in chemicals {
            let chemical_id = format!("{instrument}/{chemical}");
            push(
                chemical_id.clone(),
                chemical,
                instrument,
                researchers.values().sum(),
            );
            for (researcher, cost) in researchers {
                push(
                    format!("{chemical_id}/{researcher}"),
                    researcher,
                    &chemical_id,
                    *cost,
                );
            }
        }
    }

    annotate_if_empty(Figure::new(SUNBURST_TITLE).with_trace(Trace::Sunburst(trace)))
}

/// Mean cost per instrument, drawn as a closed radial line.
pub fn instrument_usage_polar(view: &FilteredView<'_>) -> Figure {
    let mut totals: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for row in view.iter() {
        let entry = totals.entry(row.instrument_used.as_str()).or_default();
        entry.0 += row.total_cost;
        entry.1 += 1;
    }

    let mut r: Vec<f64> = Vec::with_capacity(totals.len() + 1);
    let mut theta: Vec<String> = Vec::with_capacity(totals.len() + 1);
    for (instrument, (sum, count)) in &totals {
        r.push(sum / *count as f64);
        theta.push(instrument.to_string());
    }
    if let (Some(first_r), Some(first_theta)) = (r.first().copied(), theta.first().cloned()) {
        r.push(first_r);
        theta.push(first_theta);
    }

    let trace = PolarTrace {
        mode: Mode::Lines,
        r,
        theta,
        line: Line {
            color: palette_color(0).to_string(),
        },
    };
    annotate_if_empty(Figure::new(POLAR_TITLE).with_trace(Trace::Scatterpolar(trace)))
}

/// Summed cost per calendar day, ascending.
pub fn daily_cost_line(view: &FilteredView<'_>) -> Figure {
    let mut per_day: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for row in view.iter() {
        *per_day.entry(row.date).or_default() += row.total_cost;
    }

    let mut trace = empty_scatter(Mode::Lines);
    trace.line = Some(Line {
        color: palette_color(0).to_string(),
    });
    for (day, cost) in per_day {
        trace.x.push(Value::String(day.format("%Y-%m-%d").to_string()));
        trace.y.push(cost);
    }

    let mut figure = Figure::new(DAILY_TITLE).with_trace(Trace::Scatter(trace));
    figure.layout.xaxis = Some(Axis::titled("date"));
    figure.layout.yaxis = Some(Axis::titled("total_cost"));
    annotate_if_empty(figure)
}

fn empty_scatter(mode: Mode) -> ScatterTrace {
    ScatterTrace {
        mode,
        name: None,
        x: Vec::new(),
        y: Vec::new(),
        hovertext: Vec::new(),
        marker: None,
        line: None,
        legendgroup: None,
        showlegend: false,
    }
}

fn annotate_if_empty(mut figure: Figure) -> Figure {
    if figure.is_empty() {
        figure.layout.annotations.push(Annotation::centered(EMPTY_NOTICE));
    }
    figure
}
