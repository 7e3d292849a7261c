//! Chart-ready series data handed to the output sinks
//!
//! Pure data only. Every sink, the terminal table, JSON, CSV and the PNG
//! renderer, consumes the same structures, and no figure or axis state is
//! shared between analysis runs.

/// Horizontal anchoring of a bar relative to its x position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarAlign {
    /// The bar's left edge sits at x.
    Edge,
    /// The bar is centered on x.
    Center,
}

/// How a series should be drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SeriesStyle {
    /// Vertical bars of the given width in x units.
    Bars { width: f64, align: BarAlign },
    /// A line through the points with a marker at each point.
    Line,
}

/// One named series of `(x, y)` points.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    /// Legend entry; `None` suppresses the legend.
    pub label: Option<String>,
    pub style: SeriesStyle,
    pub points: Vec<(f64, f64)>,
}

/// A complete chart: axis labels, bounds and one or more series.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub x_label: String,
    pub y_label: String,
    /// Displayed x range.
    pub x_bounds: (f64, f64),
    /// Displayed y range; `None` lets the sink fit the data.
    pub y_bounds: Option<(f64, f64)>,
    /// Preferred distance between x-axis ticks; sinks without tick control
    /// ignore it.
    pub x_tick_step: Option<f64>,
    pub series: Vec<Series>,
}

impl Chart {
    /// Largest y value across all series, for sinks that fit the data.
    pub fn max_y(&self) -> f64 {
        self.series
            .iter()
            .flat_map(|series| series.points.iter())
            .map(|&(_, y)| y)
            .fold(0.0_f64, f64::max)
    }
}
