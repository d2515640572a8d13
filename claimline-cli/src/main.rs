//! Terminal front end for the intake conversation.
//!
//! Creates a session against the gateway, then relays stdin lines and
//! prints bot replies. A failed turn is reported and the loop continues;
//! the transcript keeps the user's message either way.

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::warn;
use uuid::Uuid;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let env_filter =
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = claimline_core::Config::from_env()?;

    let db = match &config.db_path {
        Some(path) => claimline_db::DbPool::open(path).await?,
        None => claimline_db::DbPool::new().await?,
    };

    let client = claimline_session::SessionClient::new(&config.api_base_url);
    let mut conversation =
        claimline_session::Conversation::start(client, db, Uuid::new_v4()).await?;

    let mut stdout = tokio::io::stdout();
    if let Some(greeting) = conversation.transcript().last() {
        stdout
            .write_all(format!("assistant> {}\n", greeting.text).as_bytes())
            .await?;
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        stdout.write_all(b"you> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input == "/quit" || input == "/exit" {
            break;
        }

        match conversation.send(input).await {
            Ok(reply) => {
                stdout
                    .write_all(format!("assistant> {}\n", reply).as_bytes())
                    .await?;
            }
            Err(e) => {
                warn!("turn dropped: {}", e);
                stdout
                    .write_all(b"assistant> (no reply - the assistant is unavailable right now)\n")
                    .await?;
            }
        }
    }

    stdout.write_all(b"goodbye\n").await?;
    Ok(())
}
