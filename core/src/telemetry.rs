//! Log output for the request/response trail.
//!
//! `ApiClient` emits its trail as `tracing` events under the `petstore_core`
//! target. reqwest and hyper still log through the `log` crate, so those
//! records are bridged into the same subscriber.

use tracing_log::LogTracer;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Trail at `info`, transport internals only when they warn.
pub const DEFAULT_DIRECTIVES: &str = "petstore_core=info,reqwest=warn,hyper=warn,warn";

/// Install a subscriber writing to stdout. `RUST_LOG` overrides
/// `DEFAULT_DIRECTIVES`. Later calls are no-ops.
pub fn init() {
    install(false);
}

/// Same as `init`, but writes through the test harness so the trail shows
/// up with a failing test's captured output.
pub fn init_for_tests() {
    install(true);
}

/// `RUST_LOG` when set and valid, otherwise `DEFAULT_DIRECTIVES`.
pub fn filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES))
}

fn install(test_writer: bool) {
    let _ = LogTracer::init();

    let registry = tracing_subscriber::registry().with(filter());
    let _ = if test_writer {
        registry
            .with(fmt::layer().with_target(false).with_test_writer())
            .try_init()
    } else {
        registry.with(fmt::layer().with_target(false)).try_init()
    };
}
