#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataviewError {
    UnsupportedType(String),
    UnsupportedOperation(String),
    MissingColumn { dataview: String },
    MissingOperation,
    InvalidFeatures(String),
}

impl std::fmt::Display for DataviewError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataviewError::UnsupportedType(kind) => {
                write!(f, "couldn't generate data for dataview of type: {kind}")
            }
            DataviewError::UnsupportedOperation(op) => {
                write!(f, "couldn't generate data for formula dataview and '{op}' operation")
            }
            DataviewError::MissingColumn { dataview } => {
                write!(f, "{dataview} dataview needs a column")
            }
            DataviewError::MissingOperation => write!(f, "formula dataview needs an operation"),
            DataviewError::InvalidFeatures(msg) => write!(f, "invalid GeoJSON features: {msg}"),
        }
    }
}

impl std::error::Error for DataviewError {}
