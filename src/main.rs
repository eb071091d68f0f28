use std::process::ExitCode;

use balikobot_checks::cli::{self, Cli};
use balikobot_checks::config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    let args = Cli::parse_args();
    let dotenv = config::load_dotenv(args.env_file.as_deref());

    init_tracing(args.log_json);

    match dotenv {
        Ok(Some(path)) => tracing::debug!(path = %path.display(), "loaded environment file"),
        Ok(None) => {}
        Err(err) => {
            tracing::error!(error = %err, "failed to load environment file");
            return ExitCode::from(2);
        }
    }

    match cli::execute(&args.command).await {
        Ok(code) => code,
        Err(err) => {
            tracing::error!(error = %err, "command failed");
            eprintln!("error: {err}");
            ExitCode::from(2)
        }
    }
}

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "balikobot_checks=info".into());

    // Logs go to stderr so stdout carries only the report.
    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)))
        .with((!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)))
        .init();
}
