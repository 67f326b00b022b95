pub mod clock;
pub mod config;
pub mod enrichment;
pub mod error;
pub mod fixtures;
pub mod hospital;
pub mod latency;
pub mod models;
pub mod reports;
pub mod services;
pub mod store;

pub use error::{EntityKind, StoreError};
pub use hospital::Hospital;

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber. `RUST_LOG` wins over the default filter.
pub fn init_tracing() {
    // try_init: a second call (tests, embedding hosts) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .try_init();
}
