use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "transtrack=debug,info"
    } else {
        "transtrack=info"
    }
}

/// Installs the global subscriber. `RUST_LOG` wins over the verbosity flag; `json`
/// switches from compact console lines to one JSON object per event.
pub fn init_logger(verbose: bool, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let console = (!json).then(|| fmt::layer().with_target(false).compact());
    let structured = json.then(|| fmt::layer().with_target(false).json());

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(structured)
        .init();
}
