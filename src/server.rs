//! HTTP resolver service.
//!
//! Exposes any [`Resolver`] over the `/api/move` contract so the terminal
//! client (or anything else speaking the wire format) can play against it.

use crate::resolver::{MoveRequest, MoveResponse, RefereeResolver, Resolver};
use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, instrument, warn};

/// Error document returned for every failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// What went wrong.
    pub error: String,
}

/// A failed request with its status.
#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                error: self.message,
            }),
        )
            .into_response()
    }
}

/// Builds the router around `resolver`.
pub fn router(resolver: Arc<dyn Resolver>) -> Router {
    Router::new()
        .route("/api/move", post(resolve_move))
        .route("/health", get(health))
        .with_state(resolver)
}

/// Router backed by the local referee.
pub fn referee_router() -> Router {
    router(Arc::new(RefereeResolver::new()))
}

/// Binds `host:port` and serves the referee until the process stops.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
#[instrument]
pub async fn serve(host: String, port: u16) -> std::io::Result<()> {
    let listener = TcpListener::bind((host.as_str(), port)).await?;
    info!(addr = %listener.local_addr()?, "Resolver service listening");
    serve_on(listener).await
}

/// Serves the referee on an already bound listener.
pub async fn serve_on(listener: TcpListener) -> std::io::Result<()> {
    axum::serve(listener, referee_router()).await
}

#[instrument(skip_all)]
async fn resolve_move(
    State(resolver): State<Arc<dyn Resolver>>,
    payload: Result<Json<MoveRequest>, JsonRejection>,
) -> Result<Json<MoveResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        warn!(error = %rejection.body_text(), "Rejected move request");
        ApiError {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    })?;

    let response = resolver.resolve(&request).await.map_err(|e| {
        warn!(error = %e, "Resolver failed");
        ApiError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: e.to_string(),
        }
    })?;

    info!(
        mode = ?request.mode,
        game_over = response.game_over,
        winner = ?response.winner,
        "Move resolved"
    );
    Ok(Json(response))
}

async fn health() -> &'static str {
    "ok"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::{ResolveError, ResolveErrorKind};
    use axum::body::Body;
    use axum::http::{Request, header};
    use tower::ServiceExt;

    async fn post_json(app: Router, body: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(
                Request::post("/api/move")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_bot_move_over_http() {
        let (status, json) = post_json(
            referee_router(),
            r#"{"board":["X","","","","","","","",""],"mode":"ai","level":"hard"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["gameOver"], false);
        assert_eq!(json["board"][1], "O");
    }

    #[tokio::test]
    async fn test_two_player_win_detected() {
        let (status, json) = post_json(
            referee_router(),
            r#"{"board":["X","X","X","O","O","","","",""],"mode":"human","level":"easy"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["gameOver"], true);
        assert_eq!(json["winner"], "X");
    }

    #[tokio::test]
    async fn test_malformed_request_is_client_error() {
        let (status, json) = post_json(
            referee_router(),
            r#"{"board":["X"],"mode":"ai","level":"hard"}"#,
        )
        .await;

        assert!(status.is_client_error());
        assert!(json["error"].is_string());
    }

    struct Broken;

    #[async_trait::async_trait]
    impl Resolver for Broken {
        async fn resolve(&self, _request: &MoveRequest) -> Result<MoveResponse, ResolveError> {
            Err(ResolveError::new(ResolveErrorKind::Transport("engine down".into())))
        }
    }

    #[tokio::test]
    async fn test_resolver_failure_is_500() {
        let (status, json) = post_json(
            router(Arc::new(Broken)),
            r#"{"board":["","","","","","","","",""],"mode":"human","level":"hard"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(json["error"].as_str().unwrap().contains("engine down"));
    }

    #[tokio::test]
    async fn test_health() {
        let response = referee_router()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
