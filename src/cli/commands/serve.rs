//! HTTP API server for web chat front ends.
//!
//! Exposes the chat session over REST so a browser UI can drive the
//! research assistant and download the most recent rendered PDF.

use crate::agent::ChatSession;
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::tools::ToolContext;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};

/// Shared application state.
///
/// The chat session is serialized behind a mutex: one conversation per
/// server, matching the single-operator usage pattern. This also
/// serializes renders, so artifact filenames cannot race.
struct AppState {
    session: Mutex<ChatSession>,
}

/// Run the HTTP API server.
pub async fn run_serve(host: &str, port: u16, settings: Settings) -> anyhow::Result<()> {
    if let Err(e) = preflight::check(Operation::Chat, &settings) {
        Output::error(&format!("{}", e));
        Output::info("Run 'forsk doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let tools = ToolContext::new(&settings)?;
    let session = match &settings.chat.system_prompt {
        Some(prompt) => ChatSession::with_system_prompt(
            tools,
            &settings.chat.model,
            settings.chat.max_tool_iterations,
            prompt,
        ),
        None => ChatSession::new(tools, &settings.chat.model, settings.chat.max_tool_iterations),
    };

    let state = Arc::new(AppState {
        session: Mutex::new(session),
    });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(health))
        .route("/chat", post(chat))
        .route("/reset", post(reset))
        .route("/artifact", get(artifact))
        .layer(cors)
        .with_state(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    Output::header("Forsk API Server");
    println!();
    Output::success(&format!("Listening on http://{}", addr));
    println!();
    println!("Endpoints:");
    Output::kv("Health", "GET  /health");
    Output::kv("Chat", "POST /chat");
    Output::kv("Reset", "POST /reset");
    Output::kv("Artifact", "GET  /artifact");
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    axum::serve(listener, app).await?;

    Ok(())
}

// === Request/Response Types ===

#[derive(Deserialize)]
struct ChatRequest {
    message: String,
}

#[derive(Serialize)]
struct ChatResponse {
    reply: String,
    tool_calls: Vec<ToolCallInfo>,
    artifact_available: bool,
}

#[derive(Serialize)]
struct ToolCallInfo {
    name: String,
    arguments: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

// === Handlers ===

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn chat(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ChatRequest>,
) -> impl IntoResponse {
    let mut session = state.session.lock().await;

    match session.send_message(&req.message).await {
        Ok(turn) => Json(ChatResponse {
            reply: turn.reply,
            tool_calls: turn
                .tool_calls
                .into_iter()
                .map(|r| ToolCallInfo {
                    name: r.name,
                    arguments: r.arguments,
                })
                .collect(),
            artifact_available: session.tools().last_artifact().is_some(),
        })
        .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
            .into_response(),
    }
}

async fn reset(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.session.lock().await.clear_history();
    Json(serde_json::json!({ "status": "cleared" }))
}

/// Download the most recently rendered PDF.
async fn artifact(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let path = {
        let session = state.session.lock().await;
        session.tools().last_artifact()
    };

    let Some(path) = path else {
        return (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "No PDF has been rendered in this session.".to_string(),
            }),
        )
            .into_response();
    };

    match tokio::fs::read(&path).await {
        Ok(bytes) => {
            let filename = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| "paper.pdf".to_string());
            (
                [
                    (header::CONTENT_TYPE, "application/pdf".to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{}\"", filename),
                    ),
                ],
                bytes,
            )
                .into_response()
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: format!("Failed to read artifact: {}", e),
            }),
        )
            .into_response(),
    }
}
