// src/main.rs

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

use patter::api::http_router;
use patter::config::CONFIG;
use patter::db;
use patter::identity::Caller;
use patter::state::AppState;
use patter::training::EntryId;

#[derive(Parser)]
#[command(name = "patter")]
#[command(about = "Trainable pattern-response chat service")]
struct Args {
    /// Database URL (sqlite)
    #[arg(long, env = "DATABASE_URL", global = true)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API server
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
    /// Send one chat message (commands like /train and /learn work here too)
    Say {
        text: String,
        #[arg(long)]
        user: Option<String>,
    },
    /// Add a pattern/response pair
    Train {
        pattern: String,
        response: String,
        #[arg(long)]
        user: Option<String>,
    },
    /// Learn patterns from a web page and print the report
    Learn {
        url: String,
        #[arg(long)]
        user: Option<String>,
    },
    /// Rate a training entry
    Rate {
        id: EntryId,
        #[arg(allow_negative_numbers = true)]
        rating: f64,
        #[arg(long)]
        user: Option<String>,
    },
    /// List training entries, newest first
    Training {
        #[arg(long)]
        user: Option<String>,
    },
    /// Print a user's chat transcript
    History {
        #[arg(long)]
        user: Option<String>,
    },
}

fn cli_caller(user: Option<String>) -> Caller {
    let user = user.unwrap_or_else(|| CONFIG.cli_user.clone());
    Caller::from_raw(Some(user.as_str()))
}

/// Graceful shutdown signal handler for SIGTERM and Ctrl+C
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {}", e);
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
                tracing::error!("failed to install SIGTERM handler: {}", e);
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

    info!("Shutdown signal received, draining connections...");
}

async fn serve(state: Arc<AppState>, host: Option<String>, port: Option<u16>) -> Result<()> {
    let host = host.unwrap_or_else(|| CONFIG.host.clone());
    let port = port.unwrap_or(CONFIG.port);
    let bind_address = format!("{}:{}", host, port);

    let app = http_router(state.clone());
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!("HTTP server listening on http://{}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!(
        "Waiting for {} learning job(s) to finish",
        state.chat.pending_jobs()
    );
    state.chat.drain_jobs().await;
    info!("Shutdown complete");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&CONFIG.log_level));
    fmt().with_env_filter(filter).init();

    let args = Args::parse();

    let database_url = args
        .database_url
        .unwrap_or_else(|| CONFIG.database_url.clone());
    let pool = db::connect(&database_url, CONFIG.sqlite_max_connections).await?;
    let state = Arc::new(AppState::new(pool, &CONFIG));

    match args.command {
        Commands::Serve { host, port } => serve(state, host, port).await?,
        Commands::Say { text, user } => {
            let reply = state.chat.send_message(&cli_caller(user), &text).await?;
            println!("{}", reply.reply);
            // Spawned /learn jobs must finish before the process exits
            state.chat.drain_jobs().await;
        }
        Commands::Train {
            pattern,
            response,
            user,
        } => {
            let id = state
                .chat
                .train(&cli_caller(user), &pattern, &response)
                .await?;
            println!("Stored training entry {}", id);
        }
        Commands::Learn { url, user } => {
            let report = state.chat.learn_now(&cli_caller(user), &url).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Rate { id, rating, user } => {
            state.chat.rate_response(&cli_caller(user), id, rating).await?;
            println!("Rated entry {}", id);
        }
        Commands::Training { user } => {
            for entry in state.chat.list_training(&cli_caller(user)).await? {
                println!(
                    "#{} [{}] uses={} rating={:.2} '{}' -> '{}'",
                    entry.id,
                    entry.source.as_str(),
                    entry.uses,
                    entry.rating,
                    entry.pattern,
                    entry.response
                );
            }
        }
        Commands::History { user } => {
            for message in state.chat.list_messages(&cli_caller(user)).await? {
                println!("{:>9}: {}", message.role.as_str(), message.content);
            }
        }
    }

    Ok(())
}
