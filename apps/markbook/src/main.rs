//! # Markbook - Grade Aggregation Service
//!
//! The main binary for the Markbook grading engine.
//!
//! This application provides:
//! - CLI interface for grading and report calculation over roster files
//! - HTTP REST API server (axum-based) for the same operations
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                apps/markbook (THE BINARY)                │
//! │                                                          │
//! │      ┌─────────────┐          ┌─────────────┐            │
//! │      │   CLI       │          │   HTTP API  │            │
//! │      │  (clap)     │          │   (axum)    │            │
//! │      └──────┬──────┘          └──────┬──────┘            │
//! │             │                        │                   │
//! │             └───────────┬────────────┘                   │
//! │                         ▼                                │
//! │                 ┌───────────────┐                        │
//! │                 │ markbook-core │                        │
//! │                 │  (THE LOGIC)  │                        │
//! │                 └───────────────┘                        │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Start the HTTP server
//! markbook serve --host 0.0.0.0 --port 8080
//!
//! # CLI operations
//! markbook scale
//! markbook grade 72.5
//! markbook report -f roster.json --term "Term 3" --exam-type "End of Term"
//! markbook check -f roster.json
//! ```

use clap::Parser;
use markbook::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    // Initialize tracing. MARKBOOK_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("MARKBOOK_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "markbook=info,tower_http=debug".into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }

    // Parse CLI arguments
    let cli = cli::Cli::parse();

    // Display startup banner
    if !cli.quiet {
        print_banner();
    }

    // Execute command
    if let Err(e) = cli::execute(cli).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the Markbook startup banner.
fn print_banner() {
    println!(
        r#"
  ███╗   ███╗ █████╗ ██████╗ ██╗  ██╗██████╗  ██████╗  ██████╗ ██╗  ██╗
  ████╗ ████║██╔══██╗██╔══██╗██║ ██╔╝██╔══██╗██╔═══██╗██╔═══██╗██║ ██╔╝
  ██╔████╔██║███████║██████╔╝█████╔╝ ██████╔╝██║   ██║██║   ██║█████╔╝
  ██║╚██╔╝██║██╔══██║██╔══██╗██╔═██╗ ██╔══██╗██║   ██║██║   ██║██╔═██╗
  ██║ ╚═╝ ██║██║  ██║██║  ██║██║  ██╗██████╔╝╚██████╔╝╚██████╔╝██║  ██╗
  ╚═╝     ╚═╝╚═╝  ╚═╝╚═╝  ╚═╝╚═╝  ╚═╝╚═════╝  ╚═════╝  ╚═════╝ ╚═╝  ╚═╝

  Grade Aggregation Service v{}

  Deterministic • Stateless • No Silent Correction
"#,
        env!("CARGO_PKG_VERSION")
    );
}
