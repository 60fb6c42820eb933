//!
//! Serializing the results table to JSON.
//!

use crate::model::table::ResultsTable;

///
/// Serialize the results table to JSON, corresponding to the inner data
/// model.
///
pub struct Json {
    /// The JSON string.
    pub content: String,
}

impl From<&ResultsTable> for Json {
    fn from(table: &ResultsTable) -> Json {
        Self {
            content: serde_json::to_string_pretty(table).expect("Always valid"),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::model::point::ConfigPoint;
    use crate::model::record::DerivedRecord;
    use crate::model::record::RawRecord;
    use crate::model::table::ResultsTable;

    use super::Json;

    #[test]
    fn round_trips_through_serde() {
        let mut table = ResultsTable::new(vec!["distribution"], vec!["speedup"]);
        let mut record = DerivedRecord::from_raw(
            ConfigPoint::labeled("distribution", "NORMAL"),
            RawRecord::default(),
        );
        record.set("speedup", 4.0);
        table.push(record).expect("Insertion");

        let json = Json::from(&table);
        let restored: ResultsTable =
            serde_json::from_str(json.content.as_str()).expect("Valid JSON");
        assert_eq!(restored.len(), 1);
        assert_eq!(restored.rows()[0].get("speedup"), Some(4.0));
    }
}
