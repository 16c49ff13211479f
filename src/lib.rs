pub mod color; // Colour/scale mapping shared by density views
pub mod config;
pub mod error;
pub mod format;
pub mod growth; // Growth series aggregation
pub mod heatmap; // Calendar illness heatmap
pub mod models;

use tracing_subscriber::EnvFilter;

pub use error::{VizError, VizResult};

/// Installs the fmt subscriber used by host processes.
///
/// `RUST_LOG` wins over the `NESTCARE_LOG` default. Calling this again, or
/// after another subscriber was installed, is a no-op.
pub fn init_tracing() {
    let installed = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .try_init()
        .is_ok();

    if installed {
        tracing::info!("{} metrics core v{}", config::APP_NAME, config::APP_VERSION);
    }
}
