//! Stat generators over GeoJSON features, keyed by dataview type.

mod category;
mod formula;

pub use category::{CategoryData, CategoryEntry, MAX_CATEGORIES};
pub use formula::FormulaData;

use serde::{Deserialize, Serialize};

use crate::error::DataviewError;
use crate::features::Feature;

/// Requested aggregate, as described by the dataview model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataview {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation: Option<String>,
}

impl Dataview {
    pub fn category(column: impl Into<String>) -> Self {
        Self {
            kind: "category".to_string(),
            column: Some(column.into()),
            operation: None,
        }
    }

    pub fn formula(operation: impl Into<String>, column: Option<String>) -> Self {
        Self {
            kind: "formula".to_string(),
            column,
            operation: Some(operation.into()),
        }
    }

    fn required_column(&self) -> Result<&str, DataviewError> {
        self.column
            .as_deref()
            .ok_or_else(|| DataviewError::MissingColumn {
                dataview: self.kind.clone(),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum DataviewResult {
    #[serde(rename = "aggregation")]
    Aggregation(CategoryData),
    #[serde(rename = "formula")]
    Formula(FormulaData),
}

/// Dispatches on `dataview.kind`.
pub fn generate(dataview: &Dataview, features: &[Feature]) -> Result<DataviewResult, DataviewError> {
    match dataview.kind.as_str() {
        "category" => {
            let column = dataview.required_column()?;
            Ok(DataviewResult::Aggregation(category::generate(features, column)))
        }
        "formula" => {
            let operation = dataview
                .operation
                .as_deref()
                .ok_or(DataviewError::MissingOperation)?;
            formula::generate(features, operation, dataview.column.as_deref())
                .map(DataviewResult::Formula)
        }
        other => Err(DataviewError::UnsupportedType(other.to_string())),
    }
}
