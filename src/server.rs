//! HTTP surface of the bin store.
//!
//! Three routes map one-to-one onto [`BinStore`] operations. Store errors
//! become `4xx` responses with a `{"detail": ...}` body; filesystem faults are
//! logged and answered with a `500`.

use std::future::Future;
use std::io;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Json, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::error::{StoreError, StoreResult};
use crate::protocol::{
    CreateParams, CreateResponse, ErrorBody, NameParams, UpdateBody, CREATE_PATH, RETRIEVE_PATH,
    UPDATE_PATH,
};
use crate::store::BinStore;

const INTERNAL_ERROR_DETAIL: &str = "Internal Server Error";

/// Build the router serving `store`.
pub fn router(store: BinStore) -> Router {
    Router::new()
        .route(CREATE_PATH, post(create))
        .route(RETRIEVE_PATH, get(retrieve))
        .route(UPDATE_PATH, put(update))
        .fallback(not_found)
        .with_state(store)
        .layer(TraceLayer::new_for_http())
}

/// Open the configured store, bind the listen address and serve until Ctrl-C.
pub async fn run(config: ServerConfig) -> Result<(), ServerError> {
    let store = BinStore::open(config.store)?;
    let listener = TcpListener::bind(config.listen_addr).await?;

    serve(listener, store, shutdown_signal()).await
}

/// Serve `store` on an already-bound listener until `shutdown` resolves.
pub async fn serve<F>(
    listener: TcpListener,
    store: BinStore,
    shutdown: F,
) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    tracing::info!(%addr, root = %store.root().display(), "bin server listening");

    axum::serve(listener, router(store))
        .with_graceful_shutdown(shutdown)
        .await?;

    tracing::info!("bin server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        return;
    }
    tracing::info!("shutting down");
}

async fn create(
    State(store): State<BinStore>,
    params: Result<Query<CreateParams>, QueryRejection>,
) -> Result<Json<CreateResponse>, ApiError> {
    let Query(params) = params?;

    let bin_name = blocking(move || store.create(&params.name, params.uuid)).await?;
    tracing::info!(bin = %bin_name, "bin created");

    Ok(Json(CreateResponse { bin_name }))
}

async fn retrieve(
    State(store): State<BinStore>,
    params: Result<Query<NameParams>, QueryRejection>,
) -> Result<String, ApiError> {
    let Query(params) = params?;

    blocking(move || store.retrieve(&params.name)).await
}

async fn update(
    State(store): State<BinStore>,
    params: Result<Query<NameParams>, QueryRejection>,
    body: Result<Json<UpdateBody>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Query(params) = params?;
    let Json(body) = body?;

    let name = params.name.clone();
    blocking(move || store.update(&params.name, &body.content)).await?;
    tracing::info!(bin = %name, "bin updated");

    Ok(StatusCode::OK)
}

async fn not_found() -> ApiError {
    ApiError::Rejected {
        status: StatusCode::NOT_FOUND,
        detail: "Not Found".to_string(),
    }
}

/// Run a store operation off the async executor.
async fn blocking<T, F>(op: F) -> Result<T, ApiError>
where
    F: FnOnce() -> StoreResult<T> + Send + 'static,
    T: Send + 'static,
{
    match tokio::task::spawn_blocking(op).await {
        Ok(result) => result.map_err(ApiError::from),
        Err(e) => {
            tracing::error!(error = %e, "store task failed");
            Err(ApiError::Internal)
        }
    }
}

/// Errors returned by the HTTP handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The request could not be extracted (bad query string, bad body).
    #[error("{detail}")]
    Rejected { status: StatusCode, detail: String },

    #[error("Internal Server Error")]
    Internal,
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Rejected {
            status: StatusCode::BAD_REQUEST,
            detail: rejection.body_text(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Rejected {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::Store(StoreError::Io(e)) => {
                tracing::error!(error = %e, "filesystem error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_ERROR_DETAIL.to_string(),
                )
            }
            ApiError::Store(e @ StoreError::BinNotFound(_)) => {
                (StatusCode::NOT_FOUND, e.to_string())
            }
            ApiError::Store(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            ApiError::Rejected { status, detail } => (status, detail),
            ApiError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                INTERNAL_ERROR_DETAIL.to_string(),
            ),
        };

        (status, Json(ErrorBody { detail })).into_response()
    }
}

/// Errors that stop the server from starting or serving.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("failed to open bin store: {0}")]
    Store(#[from] StoreError),

    #[error("an error occurred running the HTTP server: {0}")]
    Serve(#[from] io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: ApiError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_store_error_status_codes() {
        assert_eq!(
            status_of(StoreError::NameUnspecified.into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(StoreError::BinAlreadyExists("a".to_string()).into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(StoreError::InvalidName("a/b".to_string()).into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(StoreError::BinNotFound("a".to_string()).into()),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(StoreError::Io(io::Error::other("disk full")).into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
