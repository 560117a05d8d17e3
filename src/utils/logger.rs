use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

pub fn init_cli_logger(verbose: bool) {
    let directive = if verbose {
        "offer_letter_data=debug,info"
    } else {
        "offer_letter_data=info"
    };
    init_logger(directive, false);
}

/// JSON log lines, for hosts that ship logs to a collector.
pub fn init_json_logger(level: Option<&str>) {
    let directive = format!("offer_letter_data={}", level.unwrap_or("info"));
    init_logger(&directive, true);
}

// RUST_LOG wins over `default_directive`. stdout carries the record, so logs go to stderr.
fn init_logger(default_directive: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let base = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);
    let layer = if json {
        base.json().boxed()
    } else {
        base.compact().boxed()
    };

    tracing_subscriber::registry().with(filter).with(layer).init();
}
