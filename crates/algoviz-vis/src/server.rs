//! Axum web server with WebSocket streaming for visualization.

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Path, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tower_http::cors::CorsLayer;

use algoviz_model::{AlgorithmFamily, Coord, SpeedLevel};

use crate::error::{Error, Result};
use crate::preferences::Preferences;
use crate::render::RenderFrame;
use crate::sink::FrameSink;
use crate::workbench::{AlgorithmCatalog, Command, DomainStatus, Overview, Workbench};

/// Shared application state.
pub struct AppState {
    workbench: Workbench,
    frames: FrameSink,
}

/// Visualization server.
pub struct VisServer {
    state: Arc<AppState>,
}

impl VisServer {
    /// Create a server whose scenes publish frames to WebSocket clients.
    pub fn new(prefs: &Preferences) -> Result<Self> {
        let frames = FrameSink::new();
        let workbench = Workbench::new(prefs, Box::new(frames.clone()), Box::new(frames.clone()))?;
        Ok(Self {
            state: Arc::new(AppState { workbench, frames }),
        })
    }

    pub fn workbench(&self) -> &Workbench {
        &self.state.workbench
    }

    /// Build the router for the server.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/api/status", get(status_handler))
            .route("/api/algorithms", get(algorithms_handler))
            .route("/api/{domain}/playback", get(playback_status_handler))
            .route("/api/{domain}/speed", post(speed_handler))
            .route("/api/{domain}/algorithm", post(algorithm_handler))
            .route("/api/{domain}/size", post(size_handler))
            .route("/api/pathfinding/wall", post(wall_handler))
            .route("/api/pathfinding/start", post(start_handler))
            .route("/api/pathfinding/end", post(end_handler))
            .route("/api/pathfinding/markers", post(markers_handler))
            .route("/api/{domain}/{command}", post(command_handler))
            // WebSocket for real-time updates
            .route("/ws", get(ws_handler))
            .layer(CorsLayer::permissive())
            .with_state(self.state.clone())
    }

    /// Run the server on the given port.
    pub async fn serve(self, port: u16) -> std::result::Result<(), std::io::Error> {
        let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Visualization server running on http://localhost:{}", port);
        let result = axum::serve(listener, self.router()).await;
        self.state.workbench.shutdown().await;
        result
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Error::Busy => StatusCode::CONFLICT,
            Error::Model(_) | Error::Preferences(_) => StatusCode::BAD_REQUEST,
            Error::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        tracing::warn!(status = %status, error = %self, "request failed");
        (status, Json(ErrorResponse { error: self.to_string() })).into_response()
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

/// Map a path segment to a domain. Only the two exact names are accepted.
fn domain(name: &str) -> std::result::Result<AlgorithmFamily, StatusCode> {
    match name {
        "sorting" => Ok(AlgorithmFamily::Sorting),
        "pathfinding" => Ok(AlgorithmFamily::Pathfinding),
        _ => Err(StatusCode::NOT_FOUND),
    }
}

async fn status_handler(State(state): State<Arc<AppState>>) -> Json<Overview> {
    Json(state.workbench.overview().await)
}

async fn algorithms_handler() -> Json<AlgorithmCatalog> {
    Json(AlgorithmCatalog::new())
}

async fn playback_status_handler(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> std::result::Result<Json<DomainStatus>, StatusCode> {
    let family = domain(&name)?;
    Ok(Json(state.workbench.status(family).await))
}

async fn command_handler(
    State(state): State<Arc<AppState>>,
    Path((name, command)): Path<(String, String)>,
) -> Response {
    let Ok(family) = domain(&name) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    let Ok(command) = command.parse::<Command>() else {
        return StatusCode::NOT_FOUND.into_response();
    };
    match state.workbench.command(family, command).await {
        Ok(()) => Json(state.workbench.status(family).await).into_response(),
        Err(e) => e.into_response(),
    }
}

#[derive(Deserialize)]
struct SpeedRequest {
    level: u8,
}

async fn speed_handler(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    Json(req): Json<SpeedRequest>,
) -> std::result::Result<Json<DomainStatus>, StatusCode> {
    let family = domain(&name)?;
    state
        .workbench
        .set_speed(family, SpeedLevel::new(req.level))
        .await;
    Ok(Json(state.workbench.status(family).await))
}

#[derive(Deserialize)]
struct AlgorithmRequest {
    name: String,
}

async fn algorithm_handler(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    Json(req): Json<AlgorithmRequest>,
) -> Response {
    let Ok(family) = domain(&name) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    match state.workbench.set_algorithm(family, &req.name).await {
        Ok(()) => Json(state.workbench.overview().await).into_response(),
        Err(e) => e.into_response(),
    }
}

#[derive(Deserialize)]
struct SizeRequest {
    size: usize,
}

async fn size_handler(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    Json(req): Json<SizeRequest>,
) -> Response {
    let result = match domain(&name) {
        Ok(AlgorithmFamily::Sorting) => state.workbench.resize_sequence(req.size).await,
        Ok(AlgorithmFamily::Pathfinding) => state.workbench.resize_grid(req.size).await,
        Err(status) => return status.into_response(),
    };
    match result {
        Ok(()) => Json(state.workbench.overview().await).into_response(),
        Err(e) => e.into_response(),
    }
}

#[derive(Deserialize)]
struct CellRequest {
    x: usize,
    y: usize,
}

impl CellRequest {
    fn coord(&self) -> Coord {
        Coord::new(self.x, self.y)
    }
}

#[derive(Serialize)]
struct WallResponse {
    wall: bool,
}

async fn wall_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CellRequest>,
) -> Result<Json<WallResponse>> {
    let wall = state.workbench.toggle_wall(req.coord()).await?;
    Ok(Json(WallResponse { wall }))
}

async fn start_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CellRequest>,
) -> Result<Json<Overview>> {
    state.workbench.set_start(req.coord()).await?;
    Ok(Json(state.workbench.overview().await))
}

async fn end_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CellRequest>,
) -> Result<Json<Overview>> {
    state.workbench.set_end(req.coord()).await?;
    Ok(Json(state.workbench.overview().await))
}

async fn markers_handler(State(state): State<Arc<AppState>>) -> Result<Json<Overview>> {
    state.workbench.shuffle_markers().await?;
    Ok(Json(state.workbench.overview().await))
}

async fn ws_handler(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_ws(socket, state))
}

async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
    let mut frames = state.frames.subscribe();

    // Send initial state
    let overview = WsResponse::Overview(state.workbench.overview().await);
    if send(&mut socket, &overview).await.is_err() {
        return;
    }
    state.workbench.redraw(state.workbench.active()).await;

    loop {
        tokio::select! {
            incoming = socket.recv() => match incoming {
                Some(Ok(Message::Text(text))) => {
                    let response = match serde_json::from_str::<WsCommand>(text.as_str()) {
                        Ok(cmd) => handle_ws_command(&state, cmd).await,
                        Err(e) => WsResponse::Error { message: e.to_string() },
                    };
                    if send(&mut socket, &response).await.is_err() {
                        break;
                    }
                }
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                Some(Ok(_)) => {}
            },
            frame = frames.recv() => match frame {
                Ok(frame) => {
                    if send(&mut socket, &WsResponse::Frame(frame)).await.is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "websocket client lagging, frames dropped");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
        }
    }
    tracing::debug!("websocket client disconnected");
}

async fn send(socket: &mut WebSocket, response: &WsResponse) -> std::result::Result<(), axum::Error> {
    match serde_json::to_string(response) {
        Ok(json) => socket.send(Message::Text(json.into())).await,
        Err(e) => {
            tracing::warn!("Failed to encode websocket message: {}", e);
            Ok(())
        }
    }
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum WsCommand {
    GetOverview,
    GetStatus { domain: AlgorithmFamily },
    Command { domain: AlgorithmFamily, command: Command },
    Speed { domain: AlgorithmFamily, level: u8 },
    Algorithm { domain: AlgorithmFamily, name: String },
    Redraw { domain: AlgorithmFamily },
}

#[derive(Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
enum WsResponse {
    Overview(Overview),
    Status(DomainStatus),
    Frame(RenderFrame),
    Error { message: String },
}

async fn handle_ws_command(state: &Arc<AppState>, cmd: WsCommand) -> WsResponse {
    let bench = &state.workbench;
    let result = match cmd {
        WsCommand::GetOverview => return WsResponse::Overview(bench.overview().await),
        WsCommand::GetStatus { domain } => return WsResponse::Status(bench.status(domain).await),
        WsCommand::Command { domain, command } => {
            bench.command(domain, command).await.map(|()| domain)
        }
        WsCommand::Speed { domain, level } => {
            bench.set_speed(domain, SpeedLevel::new(level)).await;
            Ok(domain)
        }
        WsCommand::Algorithm { domain, name } => {
            bench.set_algorithm(domain, &name).await.map(|()| domain)
        }
        WsCommand::Redraw { domain } => {
            bench.redraw(domain).await;
            Ok(domain)
        }
    };
    match result {
        Ok(domain) => WsResponse::Status(bench.status(domain).await),
        Err(e) => WsResponse::Error {
            message: e.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prefs() -> Preferences {
        Preferences::default().with_seed(5).with_grid_size(5)
    }

    #[test]
    fn server_creation() {
        let _server = VisServer::new(&prefs()).unwrap();
    }

    #[test]
    fn router_builds() {
        let server = VisServer::new(&prefs()).unwrap();
        let _router = server.router();
    }

    #[test]
    fn overview_reflects_preferences() {
        let server = VisServer::new(&prefs()).unwrap();
        let overview = tokio_test::block_on(server.workbench().overview());
        assert_eq!(overview.algorithm_type, AlgorithmFamily::Sorting);
        assert_eq!(overview.sorting.array_size, 50);
        assert_eq!(overview.pathfinding.grid_size, 5);
    }

    #[test]
    fn domain_names_are_exact() {
        assert_eq!(domain("sorting"), Ok(AlgorithmFamily::Sorting));
        assert_eq!(domain("pathfinding"), Ok(AlgorithmFamily::Pathfinding));
        assert_eq!(domain("Sorting"), Err(StatusCode::NOT_FOUND));
    }

    #[test]
    fn errors_map_to_status_codes() {
        assert_eq!(Error::Busy.into_response().status(), StatusCode::CONFLICT);
        let bounds = Error::Model(algoviz_model::Error::OutOfBounds {
            x: 9,
            y: 0,
            width: 3,
            height: 3,
        });
        assert_eq!(bounds.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn ws_commands_parse() {
        let cmd: WsCommand = serde_json::from_str(
            r#"{"type": "command", "domain": "pathfinding", "command": "step"}"#,
        )
        .unwrap();
        assert!(matches!(
            cmd,
            WsCommand::Command {
                domain: AlgorithmFamily::Pathfinding,
                command: Command::Step
            }
        ));
        let cmd: WsCommand = serde_json::from_str(r#"{"type": "get_overview"}"#).unwrap();
        assert!(matches!(cmd, WsCommand::GetOverview));
    }

    #[tokio::test]
    async fn ws_command_reports_busy_as_error() {
        let server = VisServer::new(&prefs().with_speed(SpeedLevel::VERY_SLOW)).unwrap();
        let state = server.state.clone();
        state
            .workbench
            .command(AlgorithmFamily::Pathfinding, Command::Play)
            .await
            .unwrap();

        let response = handle_ws_command(
            &state,
            WsCommand::Algorithm {
                domain: AlgorithmFamily::Pathfinding,
                name: "bfs".to_owned(),
            },
        )
        .await;
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["type"], "error");
        assert!(json["data"]["message"].as_str().unwrap().contains("stop it first"));
        state.workbench.shutdown().await;
    }
}
