//! Console driver for the hiring intake.
//!
//! Reads one input per line from stdin (see `adapters::console` for the
//! line syntax), prints reply directives as JSON lines, and writes
//! confirmed applications to stdout through the console gateway. Logs go
//! to stderr.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use hiring_intake::adapters::{ConsoleGateway, InMemorySessionStore, LineParser};
use hiring_intake::application::{HandleInputCommand, HandleInputHandler, IntakeSettings};
use hiring_intake::config::{AppConfig, LoggingConfig};
use hiring_intake::domain::foundation::{SessionId, Submitter};
use hiring_intake::domain::questionnaire::{Directive, InboundEvent};

fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.filter));
    let json = logging.json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
    });
    let text = (!logging.json).then(|| {
        tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
    });
    tracing_subscriber::registry()
        .with(filter)
        .with(json)
        .with(text)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config.logging);
    config.validate()?;

    let settings = IntakeSettings::from_config(&config)?;
    let handler = HandleInputHandler::new(
        Arc::new(InMemorySessionStore::new()),
        Arc::new(ConsoleGateway::stdout()),
        settings,
    );

    let session_id = SessionId::new("console")?;
    let submitter = Submitter::new(0, std::env::var("USER").ok());
    let parser = LineParser::new();

    tracing::info!(
        locale = %settings.default_locale,
        review_channel = ?settings.review_channel,
        "Console intake ready, type /start"
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let Some(input) = parser.parse(&line) else {
            continue;
        };
        let event = InboundEvent::new(session_id.clone(), submitter.clone(), input);
        let result = handler.handle(HandleInputCommand { event }).await?;
        for directive in &result.reply.directives {
            match directive {
                Directive::Review { summary } => println!("{}", summary),
                other => println!("{}", serde_json::to_string(other)?),
            }
        }
    }

    Ok(())
}
