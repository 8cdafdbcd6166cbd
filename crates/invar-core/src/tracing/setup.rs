//! Subscriber installation for binaries and tests.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::constants::LOG_ENV_VAR;

/// Directives used when `INVAR_LOG` is unset or unparsable.
const DEFAULT_DIRECTIVES: &str = "invar_core=info,invar_engine=info";

static INIT: Once = Once::new();

/// Install the global subscriber once per process.
///
/// `INVAR_LOG` takes `EnvFilter` directives, e.g.
/// `INVAR_LOG=invar_engine::pipeline=debug,invar_engine::ppt=trace`.
/// Stage boundaries log at `info`, per-point work at `debug`.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));
        let layer = fmt::layer().with_target(true).with_line_number(true);

        // A host application may already own the global subscriber.
        let _ = tracing_subscriber::registry().with(layer).with(filter).try_init();
    });
}
