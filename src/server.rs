//! HTTP API for hosting many independent games.

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tracing::{info, instrument, warn};

use crate::games::ladder::{GameCommand, GameView, LadderError};
use crate::session::{SessionError, SessionId, SessionManager};

/// Request body for creating a game.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateGameRequest {
    /// Session id to use; generated when absent.
    #[serde(default)]
    pub session_id: Option<SessionId>,
}

/// Response for a newly created game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGameResponse {
    /// Id of the new session.
    pub session_id: SessionId,
    /// Initial view.
    pub view: GameView,
}

/// JSON error body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Machine-readable kind, e.g. `"no_skips_left"`.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

/// A [`SessionError`] rendered as an HTTP response.
#[derive(Debug)]
pub struct ApiError(SessionError);

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            SessionError::NotFound(_) => StatusCode::NOT_FOUND,
            SessionError::AlreadyExists(_) => StatusCode::CONFLICT,
            SessionError::Full(_) => StatusCode::SERVICE_UNAVAILABLE,
            SessionError::Game(LadderError::InsufficientQuestions { .. }) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            SessionError::Game(_) => StatusCode::CONFLICT,
        };
        let body = ErrorBody {
            error: self.0.kind().to_string(),
            message: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Builds the API router over `sessions`.
pub fn router(sessions: SessionManager) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/games", get(list_games).post(create_game))
        .route("/games/{id}", get(get_game).delete(delete_game))
        .route("/games/{id}/commands", post(run_command))
        .route("/games/{id}/restart", post(restart_game))
        .with_state(sessions)
        .layer(ServiceBuilder::new().map_request(log_request))
}

/// Serves the API on `host:port` until Ctrl+C.
#[instrument(skip(sessions))]
pub async fn serve(sessions: SessionManager, host: &str, port: u16) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind((host, port)).await?;
    info!("Server ready at http://{}:{}/", host, port);

    axum::serve(listener, router(sessions))
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "Failed to listen for Ctrl+C");
            }
            info!("Shutting down");
        })
        .await?;
    Ok(())
}

fn log_request(req: Request<Body>) -> Request<Body> {
    info!(method = %req.method(), uri = %req.uri(), "Incoming HTTP request");
    req
}

async fn health() -> &'static str {
    "ok"
}

async fn list_games(State(sessions): State<SessionManager>) -> Json<Vec<SessionId>> {
    Json(sessions.list_sessions().await)
}

#[instrument(skip(sessions))]
async fn create_game(
    State(sessions): State<SessionManager>,
    Json(req): Json<CreateGameRequest>,
) -> Result<(StatusCode, Json<CreateGameResponse>), ApiError> {
    let (session_id, view) = sessions.create_session(req.session_id).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreateGameResponse { session_id, view }),
    ))
}

async fn get_game(
    State(sessions): State<SessionManager>,
    Path(id): Path<SessionId>,
) -> Result<Json<GameView>, ApiError> {
    Ok(Json(sessions.view(&id).await?))
}

#[instrument(skip(sessions))]
async fn run_command(
    State(sessions): State<SessionManager>,
    Path(id): Path<SessionId>,
    Json(command): Json<GameCommand>,
) -> Result<Json<GameView>, ApiError> {
    Ok(Json(sessions.execute(&id, command).await?))
}

async fn restart_game(
    State(sessions): State<SessionManager>,
    Path(id): Path<SessionId>,
) -> Result<Json<GameView>, ApiError> {
    Ok(Json(sessions.restart(&id).await?))
}

async fn delete_game(
    State(sessions): State<SessionManager>,
    Path(id): Path<SessionId>,
) -> Result<StatusCode, ApiError> {
    sessions.remove(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
