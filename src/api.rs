use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use log::{debug, error, info};
use serde::{Deserialize, Serialize};

use crate::clients::{
    entities::{ExtendedAlbum, ExtendedArtist, Track, TrackWithContributors},
    errors::{Error, Result},
};
use crate::proxy::{CatalogProxy, DEFAULT_TOP_TRACKS_LIMIT};

/// Failure returned by a route handler
#[derive(Debug)]
pub enum ApiError {
    /// Path or query parameters could not be extracted.
    BadRequest(String),
    /// The proxied operation failed.
    Proxy(Error),
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError::Proxy(err)
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    status_code: u16,
    message: String,
    error: &'static str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Proxy(Error::NotFound(msg)) => (StatusCode::NOT_FOUND, msg),
            ApiError::Proxy(err @ (Error::UpstreamError(_) | Error::ConfigurationError(_))) => {
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
        };
        let body = ErrorBody {
            status_code: status.as_u16(),
            message,
            error: status.canonical_reason().unwrap_or("Unknown"),
        };
        (status, Json(body)).into_response()
    }
}

#[derive(Deserialize, Debug)]
struct SearchParams {
    q: String,
}

type ProxyState = State<Arc<CatalogProxy>>;

async fn search(
    State(proxy): ProxyState,
    params: std::result::Result<Query<SearchParams>, QueryRejection>,
) -> std::result::Result<Json<Vec<Track>>, ApiError> {
    let Query(params) = params?;
    debug!("Search request: {}", params.q);
    Ok(Json(proxy.search_tracks(&params.q).await?))
}

async fn artist(
    State(proxy): ProxyState,
    id: std::result::Result<Path<u64>, PathRejection>,
) -> std::result::Result<Json<ExtendedArtist>, ApiError> {
    let Path(id) = id?;
    Ok(Json(proxy.get_artist(id).await?))
}

async fn artist_top_tracks(
    State(proxy): ProxyState,
    id: std::result::Result<Path<u64>, PathRejection>,
) -> std::result::Result<Json<Vec<TrackWithContributors>>, ApiError> {
    let Path(id) = id?;
    Ok(Json(
        proxy
            .get_artist_top_tracks(id, DEFAULT_TOP_TRACKS_LIMIT)
            .await?,
    ))
}

async fn artist_albums(
    State(proxy): ProxyState,
    id: std::result::Result<Path<u64>, PathRejection>,
) -> std::result::Result<Json<Vec<ExtendedAlbum>>, ApiError> {
    let Path(id) = id?;
    Ok(Json(proxy.get_artist_albums(id).await?))
}

/// Routes served under `/deezer`
pub fn router(proxy: Arc<CatalogProxy>) -> Router {
    Router::new()
        .route("/deezer/search", get(search))
        .route("/deezer/artist/{id}", get(artist))
        .route("/deezer/artist/{id}/top-tracks", get(artist_top_tracks))
        .route("/deezer/artist/{id}/albums", get(artist_albums))
        .with_state(proxy)
}

/// Serve the routes on `bind_address` until Ctrl-C.
pub async fn serve(proxy: Arc<CatalogProxy>, bind_address: SocketAddr) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(bind_address).await?;
    info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, router(proxy))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {e}");
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use httpmock::prelude::*;
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::clients::{DeezerClient, deezer::tests::track_json};

    fn app(base_url: &str) -> Router {
        let deezer = DeezerClient::try_new(base_url, Duration::from_secs(5)).unwrap();
        router(Arc::new(CatalogProxy::new(deezer)))
    }

    async fn call(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn search_returns_track_array() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/search").query_param("q", "one more time");
                then.status(200)
                    .json_body(json!({ "data": [track_json(3_135_553)], "total": 1 }));
            })
            .await;

        let (status, body) = call(
            app(&server.base_url()),
            "/deezer/search?q=one%20more%20time",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["id"], json!(3_135_553));
        assert!(body[0].get("isrc").is_none());
    }

    #[tokio::test]
    async fn empty_search_is_404() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/search");
                then.status(200).json_body(json!({ "data": [], "total": 0 }));
            })
            .await;

        let (status, body) = call(app(&server.base_url()), "/deezer/search?q=nothing").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body,
            json!({ "statusCode": 404, "message": "No Results Found", "error": "Not Found" })
        );
    }

    #[tokio::test]
    async fn upstream_failure_is_500() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/artist/27");
                then.status(502);
            })
            .await;

        let (status, body) = call(app(&server.base_url()), "/deezer/artist/27").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["statusCode"], json!(500));
        assert_eq!(body["error"], json!("Internal Server Error"));
    }

    #[tokio::test]
    async fn non_integer_id_is_400_without_upstream_call() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET);
                then.status(200).json_body(json!({}));
            })
            .await;

        for uri in [
            "/deezer/artist/abc",
            "/deezer/artist/abc/top-tracks",
            "/deezer/artist/-1/albums",
        ] {
            let (status, body) = call(app(&server.base_url()), uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(body["statusCode"], json!(400));
        }
        mock.assert_hits_async(0).await;
    }

    #[tokio::test]
    async fn missing_query_is_400() {
        let (status, _) = call(app("http://127.0.0.1:1"), "/deezer/search").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn top_tracks_always_request_fixed_limit() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/artist/27/top")
                    .query_param("limit", "5");
                then.status(200)
                    .json_body(json!({ "data": [track_json(1), track_json(2)] }));
            })
            .await;

        for uri in [
            "/deezer/artist/27/top-tracks",
            "/deezer/artist/27/top-tracks?limit=100000",
            "/deezer/artist/27/top-tracks?limit=0",
        ] {
            let (status, body) = call(app(&server.base_url()), uri).await;
            assert_eq!(status, StatusCode::OK, "{uri}");
            assert_eq!(body.as_array().map(Vec::len), Some(2));
            assert_eq!(body[0]["contributors"], json!([]));
        }
        mock.assert_hits_async(3).await;
    }
}
