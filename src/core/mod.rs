//! Core infrastructure module for LightGBM tree plotting.
//!
//! # Organization
//!
//! - [`types`]: Shared enumerations (orientation, statistics, operators)
//! - [`constants`]: Colors, graph attributes and defaults
//! - [`error`]: The [`PlotError`] taxonomy
//!
//! ```rust
//! use lightgbm_treeplot::core::{
//!     constants::ROOT_FILL_COLOR,
//!     error::{PlotError, Result},
//!     types::{Orientation, ShowInfo},
//! };
//!
//! let info: ShowInfo = "data_percentage".parse()?;
//! assert_eq!(info.suffix(), "percentage");
//! assert_eq!(Orientation::Vertical.rankdir(), "TB");
//! assert_eq!(ROOT_FILL_COLOR, "#dddddd");
//! # Ok::<(), PlotError>(())
//! ```

pub mod constants;
pub mod error;
pub mod types;

pub use constants::*;
pub use error::{PlotError, Result};
pub use types::*;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Once;

static LOGGING_INIT: Once = Once::new();
static CORE_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Initialize logging through `env_logger`.
///
/// `RUST_LOG` is honored when set; otherwise the filter defaults to `info`.
/// Calling this more than once, or after another logger was installed, is a
/// no-op.
pub fn initialize_logging() {
    LOGGING_INIT.call_once(|| {
        let env = env_logger::Env::default().default_filter_or("info");
        // Another logger may already be installed by the host application.
        let _ = env_logger::Builder::from_env(env).try_init();
    });
}

/// Initialize the core module.
pub fn initialize_core() -> Result<()> {
    initialize_logging();
    if !CORE_INITIALIZED.swap(true, Ordering::SeqCst) {
        log::debug!("lightgbm-treeplot {} initialized", LGBM_TREEPLOT_VERSION);
    }
    Ok(())
}

/// Check if the core module is initialized
pub fn is_core_initialized() -> bool {
    CORE_INITIALIZED.load(Ordering::SeqCst)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_initialization() {
        assert!(initialize_core().is_ok());
        assert!(is_core_initialized());
        // second call is harmless
        assert!(initialize_core().is_ok());
    }
}
