use autoall::{
    algebra::Handler,
    domain::{DEFAULT_LOG_FILTER, LOG_ENV_VAR},
    service::{AutoAll, Printer},
};
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_env(LOG_ENV_VAR)
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true),
        )
        .init();

    let args = AutoAll::parse();

    let outcome = async {
        let context = args.load().await?;
        args.validate(&context).await?;
        args.run(&context).await
    }
    .await;

    if let Err(e) = outcome {
        Printer.fail::<AutoAll>(&e);
    }
}
