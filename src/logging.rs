use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the fmt subscriber; `RUST_LOG` wins over `verbose`
pub fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "complaint_form=debug,complaint_form_common=debug"
    } else {
        "complaint_form=info"
    };

    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .try_init();
}
