#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeocodeError {
    InvalidUrl(String),
    Http(String),
    Status { status: u16, url: String },
    Decode(String),
}

impl std::fmt::Display for GeocodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeocodeError::InvalidUrl(msg) => write!(f, "invalid geocoder url: {msg}"),
            GeocodeError::Http(msg) => write!(f, "geocoder request failed: {msg}"),
            GeocodeError::Status { status, url } => write!(f, "HTTP {status} from {url}"),
            GeocodeError::Decode(msg) => write!(f, "unexpected geocoder response: {msg}"),
        }
    }
}

impl std::error::Error for GeocodeError {}
