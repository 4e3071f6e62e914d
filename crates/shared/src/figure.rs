//! Plotly-compatible figure model. Serializes to the `{data, layout}` shape
//! that `Plotly.react` accepts on the page.

use serde::{Deserialize, Serialize};

/// Qualitative palette used for per-category colors.
pub const PALETTE: [&str; 10] = [
    "#636efa", "#EF553B", "#00cc96", "#ab63fa", "#FFA15A", "#19d3f3", "#FF6692", "#B6E880",
    "#FF97FF", "#FECB52",
];

pub fn palette_color(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

impl Figure {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            data: Vec::new(),
            layout: Layout::dark(title),
        }
    }

    pub fn with_trace(mut self, trace: Trace) -> Self {
        self.data.push(trace);
        self
    }

    /// True when no trace carries a single point.
    pub fn is_empty(&self) -> bool {
        self.data.iter().all(Trace::is_empty)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Scatter(ScatterTrace),
    Sunburst(SunburstTrace),
    Scatterpolar(PolarTrace),
}

impl Trace {
    pub fn is_empty(&self) -> bool {
        match self {
            Trace::Scatter(trace) => trace.x.is_empty(),
            Trace::Sunburst(trace) => trace.ids.is_empty(),
            Trace::Scatterpolar(trace) => trace.r.is_empty(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Markers,
    Lines,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterTrace {
    pub mode: Mode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub x: Vec<serde_json::Value>,
    pub y: Vec<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hovertext: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<Line>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legendgroup: Option<String>,
    #[serde(default)]
    pub showlegend: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub color: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub size: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sizemode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sizeref: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sizemin: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SunburstTrace {
    pub ids: Vec<String>,
    pub labels: Vec<String>,
    pub parents: Vec<String>,
    pub values: Vec<f64>,
    pub branchvalues: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolarTrace {
    pub mode: Mode,
    pub r: Vec<f64>,
    pub theta: Vec<String>,
    pub line: Line,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub title: Title,
    pub paper_bgcolor: String,
    pub plot_bgcolor: String,
    pub font: Font,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,
}

impl Layout {
    pub fn dark(title: impl Into<String>) -> Self {
        Self {
            title: Title { text: title.into() },
            paper_bgcolor: "rgb(17,17,17)".into(),
            plot_bgcolor: "rgb(17,17,17)".into(),
            font: Font {
                color: "#f2f5fa".into(),
            },
            annotations: Vec::new(),
            xaxis: None,
            yaxis: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Title {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Font {
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    pub title: Title,
    pub gridcolor: String,
}

impl Axis {
    pub fn titled(text: impl Into<String>) -> Self {
        Self {
            title: Title { text: text.into() },
            gridcolor: "#283442".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub text: String,
    pub showarrow: bool,
    pub xref: String,
    pub yref: String,
    pub x: f64,
    pub y: f64,
}

impl Annotation {
    pub fn centered(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            showarrow: false,
            xref: "paper".into(),
            yref: "paper".into(),
            x: 0.5,
            y: 0.5,
        }
    }
}
