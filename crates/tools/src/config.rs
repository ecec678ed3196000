use std::env;
use std::fs;
use std::path::Path;

use foundation::bounds::LatLng;
use map::MapOptions;

pub const MAPBOX_TOKEN_VAR: &str = "MAPBOX_ACCESS_TOKEN";
pub const MIN_ZOOM_VAR: &str = "MAPCTL_MIN_ZOOM";
pub const MAX_ZOOM_VAR: &str = "MAPCTL_MAX_ZOOM";

#[derive(Debug)]
pub enum ToolError {
    Io(String),
    Config(String),
    Argument(String),
    Failed(String),
}

impl std::fmt::Display for ToolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ToolError::Io(msg) => write!(f, "io error: {msg}"),
            ToolError::Config(msg) => write!(f, "invalid config: {msg}"),
            ToolError::Argument(msg) => write!(f, "invalid argument: {msg}"),
            ToolError::Failed(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ToolError {}

pub fn env_var_u8(key: &str, default: u8) -> u8 {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

pub fn env_var_string(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

pub fn read_text(path: &Path) -> Result<String, ToolError> {
    fs::read_to_string(path).map_err(|e| ToolError::Io(format!("{}: {e}", path.display())))
}

/// Map options from `path`, or defaults when no file is given. The zoom
/// range is then overridden by `MAPCTL_MIN_ZOOM` / `MAPCTL_MAX_ZOOM`.
pub fn load_map_options(path: Option<&Path>) -> Result<MapOptions, ToolError> {
    let mut options = match path {
        Some(path) => MapOptions::from_json(&read_text(path)?)
            .map_err(|e| ToolError::Config(format!("{}: {e}", path.display())))?,
        None => MapOptions::default(),
    };
    options.min_zoom = env_var_u8(MIN_ZOOM_VAR, options.min_zoom);
    options.max_zoom = env_var_u8(MAX_ZOOM_VAR, options.max_zoom);
    Ok(options)
}

/// Parses `lat,lon`.
pub fn parse_latlng(text: &str) -> Result<LatLng, ToolError> {
    let bad = || ToolError::Argument(format!("expected lat,lon, got {text:?}"));
    let (lat, lon) = text.split_once(',').ok_or_else(bad)?;
    let lat: f64 = lat.trim().parse().map_err(|_| bad())?;
    let lon: f64 = lon.trim().parse().map_err(|_| bad())?;
    Ok(LatLng::new(lat, lon))
}
