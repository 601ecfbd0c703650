//! Observability utilities.
//!
//! Every log line a running proxy emits should name the proxy identity,
//! because one host typically runs one proxy per Asterisk node and their
//! output interleaves. [`server_span`] carries the `application` and
//! `asterisk_id` fields; the server enters it around all of its background
//! tasks and every dispatched request, so announcer ticks, event fan-out,
//! and handler logs are attributable without repeating the fields at each
//! call site.

use std::sync::OnceLock;
use tracing::Span;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static TRACING_INIT: OnceLock<()> = OnceLock::new();

/// Default filter when `RUST_LOG` is unset: the proxy at `info`, bus driver
/// internals at `warn`. The NATS and AMQP clients log every reconnect
/// attempt at `info`, which drowns the request path on a flapping broker.
const DEFAULT_FILTER: &str = "info,nats=warn,lapin=warn";

/// Initialize tracing subscriber once for the process.
///
/// Log format defaults to plain text and can be switched to JSON via
/// `ARI_PROXY_LOG_FORMAT=json`. Filter defaults to [`DEFAULT_FILTER`] if
/// `RUST_LOG` is unset.
pub fn init_tracing() {
    TRACING_INIT.get_or_init(|| {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
        let json = std::env::var("ARI_PROXY_LOG_FORMAT")
            .map(|v| v.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        let result = if json {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json())
                .try_init()
        } else {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().compact())
                .try_init()
        };

        if let Err(err) = result {
            eprintln!("tracing init skipped: {err}");
        }
    });
}

/// The identity span of one running proxy. Entered around every server
/// task and dispatched request.
pub fn server_span(application: &str, asterisk_id: &str) -> Span {
    tracing::info_span!("proxy", application, asterisk_id)
}
