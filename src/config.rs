use serde::{Deserialize, Serialize};

use crate::error::VizResult;
use crate::models::enums::{DateFormat, Theme};

/// Application-level constants
pub const APP_NAME: &str = "Nestcare";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable consulted for the log filter when `RUST_LOG` is unset.
pub const LOG_ENV_VAR: &str = "NESTCARE_LOG";

/// Single-child severity is always scaled against 1–10.
pub const SEVERITY_MAX: f64 = 10.0;

/// Fraction of the data range added on each side of an axis.
pub const AXIS_PADDING_RATIO: f64 = 0.1;

/// Percentile mode never scans data.
pub const PERCENTILE_DOMAIN: (f64, f64) = (0.0, 100.0);

/// Domain used when an axis has nothing visible.
pub const EMPTY_DOMAIN: (f64, f64) = (0.0, 100.0);

/// Legend swatch positions along the gradient.
pub const LEGEND_STOPS: [f64; 5] = [0.0, 0.25, 0.5, 0.75, 1.0];

/// Default `EnvFilter` directive.
pub fn default_log_filter() -> String {
    std::env::var(LOG_ENV_VAR).unwrap_or_else(|_| "info".to_string())
}

/// Display preferences the caller reads from its settings store and hands
/// to colour and formatting calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayPrefs {
    pub theme: Theme,
    pub date_format: DateFormat,
}

impl DisplayPrefs {
    pub fn from_json(json: &str) -> VizResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
