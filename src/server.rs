use crate::config::Config;
use crate::error::error_reply;
use crate::repository::{MockSnapshotRepository, SnapshotRepository};
use crate::{mcp, privacy, vehicle_api};
use log::{error, info};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::convert::Infallible;
use std::sync::Arc;
use warp::http::{Method, StatusCode};
use warp::reply::Response;
use warp::{Filter, Rejection, Reply};

/// Shared by every handler; cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn SnapshotRepository>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        AppState {
            repo: Arc::new(MockSnapshotRepository::new(config.deterministic)),
            config: Arc::new(config),
        }
    }
}

pub fn with_state(
    state: AppState,
) -> impl Filter<Extract = (AppState,), Error = Infallible> + Clone {
    warp::any().map(move || state.clone())
}

/// JSON request body. No `Content-Length` is required, so chunked uploads
/// are accepted.
pub fn json_body<T>() -> impl Filter<Extract = (T,), Error = Rejection> + Clone
where
    T: DeserializeOwned + Send,
{
    warp::body::json()
}

/// The full route table with CORS, access logging and JSON error bodies.
///
/// Paths are matched before methods so an unknown path is a 404 rather
/// than a 405 from some other route. Only rejected CORS preflights escape
/// as rejections.
pub fn routes(
    state: AppState,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let root = warp::path::end()
        .and(warp::get())
        .map(|| warp::reply::json(&"CarTrace MCP is running").into_response());
    let openapi = warp::path!("openapi.json")
        .and(warp::get())
        .map(|| warp::reply::json(&openapi_document()).into_response());

    let cors = warp::cors()
        .allow_any_origin()
        .allow_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(vec![
            "accept",
            "authorization",
            "content-type",
            "origin",
            "x-requested-with",
        ]);

    root.or(openapi)
        .unify()
        .or(vehicle_api::routes(state.clone()))
        .unify()
        .or(mcp::routes(state))
        .unify()
        .or(privacy::routes())
        .unify()
        .recover(handle_rejection)
        .with(cors)
        .with(warp::log("cartrace"))
}

async fn handle_rejection(err: Rejection) -> Result<Response, Infallible> {
    let (status, message) = if err.is_not_found() {
        (StatusCode::NOT_FOUND, "Not found")
    } else if err.find::<warp::filters::body::BodyDeserializeError>().is_some() {
        (StatusCode::BAD_REQUEST, "Invalid JSON body")
    } else if err.find::<warp::reject::UnsupportedMediaType>().is_some() {
        (StatusCode::UNSUPPORTED_MEDIA_TYPE, "Unsupported media type")
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
    } else {
        error!("Unhandled rejection: {:?}", err);
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    };
    Ok(error_reply(status, message))
}

pub fn openapi_document() -> Value {
    let error = json!({
        "type": "object",
        "properties": { "error": { "type": "string" } }
    });
    json!({
        "openapi": "3.0.1",
        "info": { "title": "CarTrace MCP", "version": env!("CARGO_PKG_VERSION") },
        "paths": {
            "/api/vehicle/snapshot": {
                "post": {
                    "summary": "Vehicle snapshot by license plate",
                    "requestBody": {
                        "required": true,
                        "content": { "application/json": { "schema": {
                            "type": "object",
                            "properties": { "plate": { "type": "string" } }
                        } } }
                    },
                    "responses": {
                        "200": { "description": "Vehicle snapshot" },
                        "400": { "description": "Missing plate",
                                 "content": { "application/json": { "schema": error.clone() } } },
                        "404": { "description": "Vehicle not found",
                                 "content": { "application/json": { "schema": error.clone() } } }
                    }
                }
            },
            "/api/mcp": {
                "get": {
                    "summary": "List callable tools",
                    "responses": { "200": { "description": "Tool manifest" } }
                },
                "post": {
                    "summary": "Call a tool",
                    "requestBody": {
                        "required": true,
                        "content": { "application/json": { "schema": {
                            "type": "object",
                            "properties": {
                                "tool": { "type": "string" },
                                "arguments": { "type": "object" }
                            }
                        } } }
                    },
                    "responses": {
                        "200": { "description": "Tool result" },
                        "400": { "description": "Invalid call",
                                 "content": { "application/json": { "schema": error } } }
                    }
                }
            },
            "/privacy": {
                "get": {
                    "summary": "Privacy policy",
                    "responses": { "200": { "description": "HTML document" } }
                }
            }
        }
    })
}

pub async fn run(config: Config) {
    let addr = config.bind;
    let state = AppState::new(config);
    let (bound, server) =
        warp::serve(routes(state)).bind_with_graceful_shutdown(addr, async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("Unable to listen for shutdown signal: {}", e);
            }
            info!("Shutdown signal received");
        });
    info!("Listening on http://{}", bound);
    server.await;
}
