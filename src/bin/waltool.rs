use waltool::config::{self, Config};
use waltool::{cli, WaltoolError};

fn init_tracing(verbose: bool) {
    use tracing_subscriber::{
        filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt as _, Registry,
    };

    let default_directive = if verbose { "debug" } else { "info" };

    Registry::default()
        .with(
            fmt::Layer::new()
                .with_ansi(true)
                .with_file(false)
                .with_line_number(false)
                .with_target(true)
                .with_timer(fmt::time::ChronoLocal::rfc_3339())
                .with_writer(std::io::stderr),
        )
        .with(
            EnvFilter::try_from_env(config::env::LOG_DIRECTIVE)
                .or_else(|_| EnvFilter::try_new(default_directive))
                .unwrap(),
        )
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let command = cli::parse();

    // Config is resolved first so that its verbose setting reaches the filter.
    let config = command.load_config().await;
    let verbose = match &config {
        Ok(config) => command.verbose(config),
        Err(_) => command.verbose(&Config::default()),
    };
    init_tracing(verbose);

    let result = match config {
        Ok(config) => command.run(config).await,
        Err(err) => Err(err),
    };
    if let Err(err) = result {
        tracing::error!("{err}");
        if let WaltoolError::Internal(internal) = &err {
            if let Some(backtrace) = internal.backtrace() {
                tracing::debug!("{:?}", backtrace);
            }
        }
        std::process::exit(1);
    }
}
