use std::io::{self, Stderr};
use tracing_subscriber::fmt::{self, format::DefaultFields, format::Format};
use tracing_subscriber::layer::{Layered, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

fn directive(verbose: bool) -> &'static str {
    if verbose {
        "plist2xlsx=debug,info"
    } else {
        "plist2xlsx=info"
    }
}

/// `RUST_LOG` wins over the built-in directive.
fn env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive(verbose)))
}

// Logs go to stderr so previews printed on stdout stay pipeable.
fn stderr_layer<S>() -> fmt::Layer<S, DefaultFields, Format, fn() -> Stderr> {
    fmt::layer()
        .with_writer(io::stderr as fn() -> Stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
}

fn install<L>(verbose: bool, layer: L)
where
    L: Layer<Layered<EnvFilter, Registry>> + Send + Sync + 'static,
{
    tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(layer)
        .init();
}

pub fn init_cli_logger(verbose: bool) {
    install(verbose, stderr_layer().compact());
}

/// One JSON object per event, for log collectors.
pub fn init_json_logger(verbose: bool) {
    install(verbose, stderr_layer().json());
}
