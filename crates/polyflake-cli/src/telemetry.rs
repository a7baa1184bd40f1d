//! Log output for the `polyflake` binary.
//!
//! Ids go to stdout and everything else goes to stderr, so the output of
//! `polyflake generate` can be piped without filtering. The verbosity follows
//! `RUST_LOG` and defaults to `info`; `RUST_LOG=polyflake=debug` shows tick
//! waits and registry inserts from the library.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub fn init_telemetry() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_thread_ids(true)
                .with_line_number(true)
                .with_target(false)
                .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339()),
        )
        .try_init()?;

    Ok(())
}
