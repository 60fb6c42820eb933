//!
//! The report analyzer library.
//!

pub mod chart;
pub mod metrics;
pub mod model;
pub mod narrative;
pub mod output;

pub use crate::chart::figure::Figure;
pub use crate::chart::figure::Panel;
pub use crate::chart::scale::Scale;
pub use crate::chart::series::ScatterPoint;
pub use crate::chart::series::Series;
pub use crate::metrics::MetricError;
pub use crate::model::point::AxisValue;
pub use crate::model::point::ConfigPoint;
pub use crate::model::record::DerivedRecord;
pub use crate::model::record::RawRecord;
pub use crate::model::table::ResultsTable;
pub use crate::narrative::Narrative;
pub use crate::output::csv::Csv as CsvOutput;
pub use crate::output::format::OutputFormat;
pub use crate::output::json::Json as JsonOutput;
pub use crate::output::Output;
