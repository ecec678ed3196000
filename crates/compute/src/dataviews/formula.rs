use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::analysis::Statistics;
use crate::error::DataviewError;
use crate::features::Feature;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormulaData {
    pub operation: String,
    /// `None` when no feature carries a usable value.
    pub result: Option<f64>,
    pub nulls: usize,
}

fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

pub(super) fn generate(
    features: &[Feature],
    operation: &str,
    column: Option<&str>,
) -> Result<FormulaData, DataviewError> {
    match operation {
        "count" => Ok(FormulaData {
            operation: operation.to_string(),
            result: Some(features.len() as f64),
            nulls: 0,
        }),
        "avg" => {
            let column = column.ok_or_else(|| DataviewError::MissingColumn {
                dataview: "formula".to_string(),
            })?;
            let values: Vec<f64> = features
                .iter()
                .filter_map(|f| f.property(column).and_then(numeric))
                .collect();
            let nulls = features.len() - values.len();
            debug!(column, values = values.len(), nulls, "averaging column");
            Ok(FormulaData {
                operation: operation.to_string(),
                result: Statistics::mean(&values).map(|m| Statistics::round_to(m, 2)),
                nulls,
            })
        }
        other => Err(DataviewError::UnsupportedOperation(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::generate;
    use crate::error::DataviewError;
    use crate::features::Feature;
    use serde_json::{json, Value};

    fn features(values: Vec<Value>) -> Vec<Feature> {
        values
            .into_iter()
            .map(|v| {
                let mut props = serde_json::Map::new();
                props.insert("price".to_string(), v);
                Feature::with_properties(props)
            })
            .collect()
    }

    #[test]
    fn avg_of_numbers() {
        let data = generate(&features(vec![json!(10), json!(20), json!(30)]), "avg", Some("price"))
            .unwrap();
        assert_eq!(data.result, Some(20.0));
        assert_eq!(data.nulls, 0);
    }

    #[test]
    fn avg_reads_numeric_strings_and_counts_nulls() {
        let fs = features(vec![json!("1"), json!(2), json!("n/a"), Value::Null]);
        let data = generate(&fs, "avg", Some("price")).unwrap();
        assert_eq!(data.result, Some(1.5));
        assert_eq!(data.nulls, 2);
    }

    #[test]
    fn avg_rounds_to_two_decimals() {
        let fs = features(vec![json!(1), json!(1), json!(2)]);
        let data = generate(&fs, "avg", Some("price")).unwrap();
        assert_eq!(data.result, Some(1.33));
    }

    #[test]
    fn avg_without_values_has_no_result() {
        let data = generate(&features(vec![Value::Null]), "avg", Some("price")).unwrap();
        assert_eq!(data.result, None);
        assert_eq!(data.nulls, 1);
    }

    #[test]
    fn count_ignores_column() {
        let data = generate(&features(vec![Value::Null, json!(1)]), "count", None).unwrap();
        assert_eq!(data.result, Some(2.0));
    }

    #[test]
    fn other_operations_are_rejected() {
        assert_eq!(
            generate(&[], "median", Some("price")),
            Err(DataviewError::UnsupportedOperation("median".to_string()))
        );
    }
}
