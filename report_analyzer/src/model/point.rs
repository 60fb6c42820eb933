//!
//! A configuration point identifying one benchmark invocation.
//!

use serde::Deserialize;
use serde::Serialize;

///
/// A single coordinate value on a configuration axis.
///
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AxisValue {
    /// An integer coordinate, such as a resolution or an element count.
    Integer(u64),
    /// A categorical coordinate, such as a data distribution name.
    Text(String),
}

impl std::fmt::Display for AxisValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(value) => write!(f, "{value}"),
            Self::Text(value) => write!(f, "{value}"),
        }
    }
}

impl From<u64> for AxisValue {
    fn from(value: u64) -> Self {
        Self::Integer(value)
    }
}

impl From<&str> for AxisValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl AxisValue {
    ///
    /// Returns the numeric coordinate, if the value is an integer.
    ///
    pub fn as_integer(&self) -> Option<u64> {
        match self {
            Self::Integer(value) => Some(*value),
            Self::Text(_) => None,
        }
    }
}

///
/// An ordered set of named axis values identifying one benchmark invocation.
///
/// Immutable once constructed. Uniquely identifies one row in the results
/// table: two points with the same coordinate sequence are the same point.
///
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ConfigPoint {
    /// The ordered `(axis name, value)` coordinates.
    coordinates: Vec<(String, AxisValue)>,
}

impl ConfigPoint {
    ///
    /// A shortcut constructor.
    ///
    pub fn new(coordinates: Vec<(String, AxisValue)>) -> Self {
        Self { coordinates }
    }

    ///
    /// A constructor for a point on a single categorical axis.
    ///
    pub fn labeled(axis: &str, label: &str) -> Self {
        Self::new(vec![(axis.to_owned(), AxisValue::from(label))])
    }

    ///
    /// The ordered coordinates.
    ///
    pub fn coordinates(&self) -> &[(String, AxisValue)] {
        self.coordinates.as_slice()
    }

    ///
    /// The ordered axis names.
    ///
    pub fn axis_names(&self) -> impl Iterator<Item = &str> {
        self.coordinates.iter().map(|(name, _)| name.as_str())
    }

    ///
    /// Returns the value on the named axis, if the point has one.
    ///
    pub fn value(&self, axis: &str) -> Option<&AxisValue> {
        self.coordinates
            .iter()
            .find(|(name, _)| name == axis)
            .map(|(_, value)| value)
    }
}

impl std::fmt::Display for ConfigPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (index, (name, value)) in self.coordinates.iter().enumerate() {
            if index > 0 {
                write!(f, " ")?;
            }
            write!(f, "{name}={value}")?;
        }
        Ok(())
    }
}
