mod client;
mod config;
mod errors;
mod extraction;
mod llm_client;
mod parsing;
mod presentation;
mod routes;
mod state;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::client::session::{UploadFile, UploadSession};
use crate::client::{ClientError, ParseClient, DEFAULT_ENDPOINT};
use crate::config::Config;
use crate::extraction::ExtractionError;
use crate::llm_client::OpenAiClient;
use crate::presentation::notice::Notice;
use crate::presentation::render::{render_profile_text, render_widget_text};
use crate::presentation::view::ProfileView;
use crate::presentation::widget::WidgetState;
use crate::routes::build_router;
use crate::state::AppState;

/// AI Resume Parser - turn a resume PDF into structured candidate data
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default)
    Serve,

    /// Extract a resume PDF locally and parse it through a running server
    Parse {
        /// Path to the resume PDF
        file_path: PathBuf,

        /// Structured-Data Endpoint URL
        #[arg(long, env = "RESUME_PARSER_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
        endpoint: String,

        /// Declared media type; derived from the file extension when omitted
        #[arg(long)]
        content_type: Option<String>,

        /// Print the profile as JSON instead of the formatted view
        #[arg(long)]
        json: bool,

        /// Give up on the endpoint after this many seconds
        #[arg(long, default_value_t = 180)]
        timeout_secs: u64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    run(Cli::parse()).await
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            let config = Config::from_env()?;
            init_tracing(&config.rust_log);
            serve(config).await
        }
        Command::Parse {
            file_path,
            endpoint,
            content_type,
            json,
            timeout_secs,
        } => {
            // Client-only: server settings are neither read nor validated.
            init_tracing("info");
            parse_file(
                &file_path,
                endpoint,
                content_type.as_deref(),
                json,
                Duration::from_secs(timeout_secs),
            )
            .await
        }
    }
}

/// Structured logging to stderr. `RUST_LOG` wins; otherwise `default_level`
/// applies to this crate.
fn init_tracing(default_level: &str) {
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), default_level))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

async fn serve(config: Config) -> Result<()> {
    info!("Starting Resume Parser API v{}", env!("CARGO_PKG_VERSION"));

    let llm = OpenAiClient::new(
        config.openai_api_key.clone(),
        Duration::from_secs(config.openai_timeout_secs),
    )?
    .with_api_url(config.openai_api_url.clone());
    if config.openai_api_key.is_none() {
        tracing::warn!("OPENAI_API_KEY is not set; parse requests will fail until it is configured");
    }
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let state = AppState {
        model: Arc::new(llm),
        config: config.clone(),
    };

    let app = build_router(state);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn parse_file(
    file_path: &std::path::Path,
    endpoint: String,
    content_type: Option<&str>,
    json: bool,
    timeout: Duration,
) -> Result<()> {
    let file = match UploadFile::from_path(file_path, content_type).await {
        Ok(file) => file,
        Err(e) => return Err(report_failure(e)),
    };

    let session = Arc::new(UploadSession::new(ParseClient::new(endpoint, timeout)?));

    let ctrl_c_session = session.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c_session.cancel();
        }
    });

    eprintln!(
        "{}",
        render_widget_text(&WidgetState::Processing {
            file_name: file.name.clone(),
        })
    );

    match session.submit(file).await {
        Ok(profile) => {
            eprintln!("{}", Notice::parsed());
            if json {
                println!("{}", serde_json::to_string_pretty(&profile)?);
            } else {
                print!("{}", render_profile_text(&ProfileView::new(&profile)));
            }
            Ok(())
        }
        Err(e) => Err(report_failure(e)),
    }
}

fn report_failure(err: ClientError) -> anyhow::Error {
    let notice = match &err {
        ClientError::Extraction(ExtractionError::InvalidFileType { .. }) => {
            Notice::invalid_file_type()
        }
        other => Notice::failed(other.user_message()),
    };
    eprintln!("{notice}");
    anyhow::Error::new(err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["resume-parser"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_parse_defaults() {
        let cli = Cli::try_parse_from(["resume-parser", "parse", "cv.pdf"]).unwrap();
        match cli.command {
            Some(Command::Parse {
                file_path,
                content_type,
                json,
                timeout_secs,
                ..
            }) => {
                assert_eq!(file_path, PathBuf::from("cv.pdf"));
                assert_eq!(content_type, None);
                assert!(!json);
                assert_eq!(timeout_secs, 180);
            }
            other => panic!("expected parse command, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_parse_ignores_invalid_server_settings() {
        std::env::set_var("MAX_UPLOAD_BYTES", "twenty megabytes");
        let cli = Cli::try_parse_from(["resume-parser", "parse", "/nonexistent/cv.docx"]).unwrap();

        let err = run(cli).await.unwrap_err();

        // Fails on the file, not on MAX_UPLOAD_BYTES.
        assert!(matches!(
            err.downcast_ref::<ClientError>(),
            Some(ClientError::Extraction(ExtractionError::InvalidFileType { .. }))
        ));
        std::env::remove_var("MAX_UPLOAD_BYTES");
    }
}
