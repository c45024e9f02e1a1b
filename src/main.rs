use std::fmt::Display;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::ws::{self, WebSocket};
use axum::extract::{Json, State, WebSocketUpgrade};
use axum::response::{ErrorResponse, IntoResponse, Response};
use axum::routing::{any, post};
use axum::Router;
use banter::message_bus::{Message, MessageBus, UiCommand};
use banter::{store, Banter};
use futures_util::stream::StreamExt as _;
use http::StatusCode;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use tokio::signal;
use tower_http::services::ServeDir;

mod banter;
mod logging;
mod utils;

use utils::{print_err, unwrap_or_def_verbose, ResultExt as _};

struct AppState {
    message_bus: MessageBus,
}

type AppStateArg = State<Arc<AppState>>;

#[derive(Serialize)]
struct EmptyResponse;

impl IntoResponse for EmptyResponse {
    fn into_response(self) -> Response {
        serde_json::to_string(&EmptyResponse)
            .unwrap()
            .into_response()
    }
}

async fn initialize_ui(State(state): AppStateArg) -> impl IntoResponse {
    debug!("initialize_ui");
    state
        .message_bus
        .send(Message::UiCommand(UiCommand::InitializeUi));
    EmptyResponse
}

fn bad_request(msg: impl Display) -> ErrorResponse {
    (StatusCode::BAD_REQUEST, msg.to_string()).into()
}

#[derive(Debug, Deserialize)]
struct SubmitMessage {
    text: String,
}
async fn submit_message(
    State(state): AppStateArg,
    Json(body): Json<SubmitMessage>,
) -> axum::response::Result<()> {
    debug!("submit_message({:?})", body);
    if body.text.trim().is_empty() {
        return Err(bad_request("Empty message"));
    }
    state
        .message_bus
        .send(Message::UiCommand(UiCommand::SubmitMessage(body.text)));
    Ok(())
}

async fn clear_conversation(State(state): AppStateArg) {
    debug!("clear_conversation()");
    state
        .message_bus
        .send(Message::UiCommand(UiCommand::ClearConversation));
}

async fn create_ui_event_stream(ws: WebSocketUpgrade, State(state): AppStateArg) -> Response {
    ws.on_upgrade(move |socket| ui_event_stream(socket, state.message_bus.clone()))
}

fn wrap_result<T: Serialize, E: Display>(
    r: std::result::Result<T, E>,
) -> std::result::Result<ws::Message, axum::Error> {
    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    enum WrappedResult<T> {
        Success(T),
        Error(String),
    }
    let wrapped_result = match r {
        Ok(data) => WrappedResult::Success(data),
        Err(e) => WrappedResult::Error(e.to_string()),
    };
    let json_text = serde_json::to_string_pretty(&wrapped_result)
        .unwrap_or_else(|e| format!("{{ \"error\": \"JSON serialization failed: {e}\" }}"));
    Ok(ws::Message::text(json_text))
}

async fn ui_event_stream(socket: WebSocket, message_bus: MessageBus) {
    debug!("ui_event_stream");
    let stream = message_bus.subscribe().ui_update_stream().map(wrap_result);
    let _ = stream.forward(socket).await.inspect_err(print_err);
}

async fn terminate_on_signal() -> Result<()> {
    let interrupt_signal: Pin<Box<dyn Future<Output = _>>> = Box::pin(async {
        signal::unix::signal(signal::unix::SignalKind::interrupt())
            .context("Failed to register terminate signal handlers!")?
            .recv()
            .await;
        Ok(())
    });
    let terminate_signal = Box::pin(async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .context("Failed to register terminate signal handlers!")?
            .recv()
            .await;
        Ok(())
    });
    futures_util::future::select_all([interrupt_signal, terminate_signal])
        .await
        .0
}

#[tokio::main]
async fn main() {
    logging::init();
    let config = unwrap_or_def_verbose(store::load_config());
    let personality = unwrap_or_def_verbose(store::load_personality());
    let message_bus = MessageBus::new();
    let banter = Banter::new(config.clone(), personality);
    let banter_task = tokio::spawn(banter.dispatch_ui_commands(message_bus.clone()));

    let shared_state = Arc::new(AppState {
        message_bus: message_bus.clone(),
    });
    let app = Router::new()
        .nest(
            "/api/v1",
            Router::new()
                .route("/ui_stream", any(create_ui_event_stream))
                .route("/initialize_ui", post(initialize_ui))
                .route("/submit_message", post(submit_message))
                .route("/clear_conversation", post(clear_conversation))
                .with_state(shared_state),
        )
        .fallback_service(ServeDir::new(&config.static_serving_dir));
    let listener = tokio::net::TcpListener::bind(&config.serving_addr)
        .await
        .expect("tcp listener");
    tokio::spawn(async move {
        axum::serve(listener, app)
            .await
            .context("Server terminated")
            .print_err()
    });

    info!("Running");
    let _ = terminate_on_signal().await.inspect_err(print_err);
    info!("Terminating.");
    message_bus.send(Message::UiCommand(UiCommand::CloseApplication));

    debug!("Waiting for workers to stop...");
    let _ = banter_task.await.inspect_err(print_err);
    debug!("All workers stopped.")
}
