//! StyleBuddy shopping assistant
//!
//! Main application entry point

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use StyleBuddy::{
    config::Settings,
    database::{
        connection::{create_pool, DatabaseConfig},
        run_migrations, DatabaseService,
    },
    services::{ChatService, LlmClient},
    state::{SessionStore, SessionStoreManager},
    utils::logging,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from a local .env if present
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging
    logging::init_logging(&settings.logging)?;

    info!("Starting StyleBuddy shopping assistant...");

    // Initialize database connection
    info!("Connecting to database...");
    let db_config = DatabaseConfig::from_settings(&settings.database);
    let db_pool = create_pool(&db_config).await?;

    // Run database migrations
    run_migrations(&db_pool).await?;

    // Initialize database service
    let database_service = DatabaseService::new(db_pool);

    // Initialize session store with background eviction
    let session_store = Arc::new(SessionStore::new(settings.dialogue.session_ttl_seconds));
    let mut store_manager = SessionStoreManager::new(
        Arc::clone(&session_store),
        Duration::from_secs(settings.dialogue.cleanup_interval_seconds),
    );
    store_manager.start_cleanup();

    // Initialize the language-model client
    let llm = Arc::new(LlmClient::new(settings.openai.clone())?);
    if llm.is_enabled() {
        info!(model = %settings.openai.model, "Language model client ready");
    } else {
        info!("No API key configured, running with deterministic fallbacks only");
    }

    // Initialize the chat service
    info!("Initializing services...");
    let chat_service = ChatService::new(
        Arc::clone(&session_store),
        llm,
        database_service.product_store(),
        database_service.cart_store(),
        database_service.conversation_log(),
        &settings.dialogue,
    );

    info!("StyleBuddy is ready!");

    run_console(chat_service).await?;

    info!("StyleBuddy has been shut down.");

    Ok(())
}

/// Interactive console loop for exercising the dialogue manager
async fn run_console(chat: ChatService) -> Result<(), Box<dyn std::error::Error>> {
    use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

    let user_id = std::env::var("STYLEBUDDY_USER_ID")
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(1_i64);

    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();
    let mut stdout = tokio::io::stdout();

    stdout
        .write_all(b"StyleBuddy console. Type a message, /reset to start over, /quit to exit.\n")
        .await?;

    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let line = match lines.next_line().await? {
            Some(line) => line,
            None => break,
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match line {
            "/quit" | "/exit" => break,
            "/reset" => {
                let result = chat.reset_conversation(user_id).await;
                stdout.write_all(format!("{}\n", result.response).as_bytes()).await?;
            }
            _ => {
                let result = chat.chat(user_id, line).await;
                stdout.write_all(format!("{}\n", result.response).as_bytes()).await?;
            }
        }
    }

    Ok(())
}
