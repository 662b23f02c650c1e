// This is the entry point of the Yanji Hub portal service.
//
// **Architecture Overview:**
// - `core/` = Business logic (moderation rules, feed composition, ports)
// - `infra/` = Implementations of core traits (JSON stores, Gemini client)
// - `http/` = The axum REST surface the browser client talks to
//
// This file's job is to:
// 1. Load configuration
// 2. Initialize stores and services (dependency injection)
// 3. Serve the router

// These attrs point each module declaration at a more descriptive root file
// so we don't end up with three mod.rs files that all look the same.
#[path = "core/core_layer.rs"]
mod core;
#[path = "http/http_layer.rs"]
mod http;
#[path = "infra/infra_layer.rs"]
mod infra;

use std::net::SocketAddr;
use std::sync::Arc;

use crate::core::board::BoardService;
use crate::core::moderation::WordFilter;
use crate::core::translation::Translator;
use crate::http::AppState;
use crate::infra::blacklist::JsonBlacklistStore;
use crate::infra::board::JsonPostStore;
use crate::infra::translation::{GeminiTranslator, MirrorTranslator, DEFAULT_GEMINI_MODEL};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging so we can see what's happening
    tracing_subscriber::fmt::init();

    // Load environment variables from .env file (if it exists)
    dotenv::dotenv().ok();

    // The admin token is the whole admin identity (there are no accounts),
    // so refuse to start without one.
    let admin_token = std::env::var("ADMIN_TOKEN").expect(
        "Missing ADMIN_TOKEN environment variable! Create a .env file with an admin token.",
    );

    // Keep the collection files in a dedicated folder so the repo root stays
    // tidy.
    let data_dir = std::env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string());
    std::fs::create_dir_all(&data_dir)?;

    // ========================================================================
    // DEPENDENCY INJECTION
    // ========================================================================
    // This is the "composition root" where we wire everything together.

    let post_store = JsonPostStore::new(format!("{}/posts.json", data_dir));
    let blacklist_store = JsonBlacklistStore::new(format!("{}/blacklist.json", data_dir));

    // Deployments can swap the built-in banned-term list wholesale.
    let word_filter = match std::env::var("BANNED_WORDS") {
        Ok(list) => WordFilter::new(list.split(',')),
        Err(_) => WordFilter::default(),
    };

    // Without an API key the portal still runs; submissions just mirror the
    // source language instead of being translated.
    let translator: Box<dyn Translator> = match std::env::var("GEMINI_API_KEY") {
        Ok(api_key) => {
            let model = std::env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string());
            tracing::info!(model = %model, "Bilingual generation via Gemini");
            Box::new(GeminiTranslator::new(api_key, model))
        }
        Err(_) => {
            tracing::warn!(
                "GEMINI_API_KEY not set - submissions will mirror the source language"
            );
            Box::new(MirrorTranslator)
        }
    };

    let board = BoardService::new(
        Box::new(post_store),
        Box::new(blacklist_store),
        translator,
        word_filter,
    );

    let state = Arc::new(AppState { board, admin_token });

    // ========================================================================
    // SERVE
    // ========================================================================

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(4000);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Yanji Hub listening on http://{}", addr);

    axum::serve(listener, http::router(state)).await?;
    Ok(())
}
