//! Logging setup.
//!
//! Every Folio crate logs through `tracing`; nothing is printed until a
//! subscriber is installed. [`init`] installs a `fmt` subscriber filtered by
//! `RUST_LOG`.
//!
//! # Examples
//!
//! ```rust,no_run
//! // RUST_LOG=folio_forms=debug,folio_submit=debug
//! folio::logging::init();
//! ```

use std::sync::OnceLock;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or unparseable
pub const DEFAULT_FILTER: &str = "info";

static INSTALLED: OnceLock<bool> = OnceLock::new();

/// Install the global subscriber with [`DEFAULT_FILTER`] as fallback
///
/// Returns whether Folio's subscriber is the active one. Calling it again is
/// a no-op returning the first answer; `false` means another subscriber was
/// already installed.
pub fn init() -> bool {
	init_with_default(DEFAULT_FILTER)
}

/// Like [`init`], with a caller-chosen fallback filter
pub fn init_with_default(default: &str) -> bool {
	*INSTALLED.get_or_init(|| {
		let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
		let filter = build_filter(directives.as_deref(), default);
		let installed = tracing_subscriber::fmt()
			.with_env_filter(filter)
			.try_init()
			.is_ok();
		if installed {
			tracing::debug!("Logging initialized");
		}
		installed
	})
}

/// Parse `directives`, falling back to `default`, then to [`DEFAULT_FILTER`]
pub fn build_filter(directives: Option<&str>, default: &str) -> EnvFilter {
	directives
		.and_then(|d| EnvFilter::try_new(d).ok())
		.or_else(|| EnvFilter::try_new(default).ok())
		.unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}
