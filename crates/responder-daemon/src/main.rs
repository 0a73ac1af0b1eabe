//! Responder daemon.
//!
//! Binds the HTTP API to a data file and serves it until interrupted.

use clap::Parser;
use responder_core::{QuestionRepository, QuestionStore};
use responder_http::SharedState;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "responder-daemon", version, about = "Question and answer HTTP API")]
struct Cli {
    /// Address to bind.
    #[arg(long, env = "RESPONDER_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on.
    #[arg(short, long, env = "RESPONDER_PORT", default_value_t = 3000)]
    port: u16,

    /// JSON file holding all questions. Created when missing.
    #[arg(long, env = "RESPONDER_DATA_FILE", default_value = "questions.json")]
    data_file: PathBuf,

    /// Log filter used when RUST_LOG is not set.
    #[arg(long, env = "RESPONDER_LOG", default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cli.log_level))
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    let store = QuestionStore::new(&cli.data_file);
    store
        .init()
        .map_err(|e| format!("Failed to initialise data file: {}", e))?;
    log::info!("Using data file {}", store.path().display());

    let state = Arc::new(SharedState::new(QuestionRepository::new(store)));

    let addr = format!("{}:{}", cli.host, cli.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| format!("Failed to bind HTTP server to {}: {}", addr, e))?;

    responder_http::serve(listener, state, shutdown_signal())
        .await
        .map_err(|e| format!("HTTP server error: {}", e))?;

    log::info!("Responder stopped");
    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                log::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    log::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_defaults() {
        let cli = Cli::try_parse_from(["responder-daemon"]).unwrap();

        assert_eq!(cli.port, 3000);
        assert_eq!(cli.data_file, PathBuf::from("questions.json"));
        assert_eq!(cli.log_level, "info");
    }

    #[test]
    fn cli_overrides() {
        let cli = Cli::try_parse_from([
            "responder-daemon",
            "--host",
            "127.0.0.1",
            "-p",
            "8080",
            "--data-file",
            "/var/lib/responder/questions.json",
            "--log-level",
            "debug",
        ])
        .unwrap();

        assert_eq!(cli.host, "127.0.0.1");
        assert_eq!(cli.port, 8080);
        assert_eq!(
            cli.data_file,
            PathBuf::from("/var/lib/responder/questions.json")
        );
        assert_eq!(cli.log_level, "debug");
    }

    #[test]
    fn cli_rejects_invalid_port() {
        assert!(Cli::try_parse_from(["responder-daemon", "--port", "99999"]).is_err());
    }
}
