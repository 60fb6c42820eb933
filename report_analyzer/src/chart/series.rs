//!
//! Data series drawable inside a chart panel.
//!

///
/// A scatter mark with a third dimension encoded as color.
///
#[derive(Debug, Clone)]
pub struct ScatterPoint {
    /// The horizontal coordinate.
    pub x: f64,
    /// The vertical coordinate.
    pub y: f64,
    /// The color-encoded dimension.
    pub hue: f64,
}

///
/// A data series drawable inside a chart panel.
///
#[derive(Debug, Clone)]
pub enum Series {
    /// One bar per category slot; several bar series form grouped bars.
    Bars {
        /// The legend label.
        label: String,
        /// One value per category; `None` leaves the slot empty.
        values: Vec<Option<f64>>,
    },
    /// A polyline; over a categorical axis the x coordinate is the slot index.
    Line {
        /// The legend label.
        label: String,
        /// The `(x, y)` vertices in drawing order.
        points: Vec<(f64, f64)>,
    },
    /// Scatter marks colored by a third dimension.
    Scatter {
        /// The color-dimension label, shown next to the hue legend.
        hue_label: String,
        /// The marks.
        points: Vec<ScatterPoint>,
    },
}

impl Series {
    ///
    /// The finite vertical values of the series, for range computation.
    ///
    pub fn y_values(&self) -> Vec<f64> {
        match self {
            Self::Bars { values, .. } => values
                .iter()
                .filter_map(|value| *value)
                .filter(|value| value.is_finite())
                .collect(),
            Self::Line { points, .. } => points
                .iter()
                .map(|(_, y)| *y)
                .filter(|value| value.is_finite())
                .collect(),
            Self::Scatter { points, .. } => points
                .iter()
                .map(|point| point.y)
                .filter(|value| value.is_finite())
                .collect(),
        }
    }

    ///
    /// The finite horizontal values of the series, for range computation.
    ///
    pub fn x_values(&self) -> Vec<f64> {
        match self {
            Self::Bars { .. } => Vec::new(),
            Self::Line { points, .. } => points
                .iter()
                .map(|(x, _)| *x)
                .filter(|value| value.is_finite())
                .collect(),
            Self::Scatter { points, .. } => points
                .iter()
                .map(|point| point.x)
                .filter(|value| value.is_finite())
                .collect(),
        }
    }
}
