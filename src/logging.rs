use tracing::Level;
use tracing_subscriber::{filter, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs a `fmt` subscriber logging the codec engine at `DEBUG` and
/// everything else at `INFO`. Does nothing if a global subscriber is
/// already set.
pub fn init_tracing() {
    let tracing_layer = tracing_subscriber::fmt::layer();
    let filter = filter::Targets::new()
        .with_target("vocab_engine", Level::DEBUG)
        .with_target("activity_vocab", Level::DEBUG)
        .with_default(Level::INFO);

    let _ = tracing_subscriber::registry()
        .with(tracing_layer)
        .with(filter)
        .try_init();
}
