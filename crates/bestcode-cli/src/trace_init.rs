use std::io;
use std::sync::Once;

use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "bestcode=info,bestcode_cli=info,bestcode_core=info";

/// Install the stderr subscriber. Later calls are no-ops.
pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_writer(io::stderr)
            .with_target(false)
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
            )
            .init();
    });
}
