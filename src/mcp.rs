//! Tool-calling surface for language-model agents.
//!
//! `GET /api/mcp` lists the single tool, `POST /api/mcp` calls it. Unlike the
//! direct API, an unknown plate is a successful call whose payload carries a
//! warning instead of vehicle data.

use crate::error::ApiError;
use crate::seed::{mask_plate, normalize_plate};
use crate::server::{json_body, with_state, AppState};
use crate::types::{CurrentUser, ServiceEvent, VehicleInfo};
use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::convert::Infallible;
use warp::reply::Response;
use warp::{Filter, Rejection, Reply};

pub const SNAPSHOT_TOOL: &str = "get_vehicle_snapshot_by_plate";
pub const MIN_PLATE_LEN: usize = 5;
pub const PLATE_NOT_FOUND_WARNING: &str = "Plate not found.";

#[derive(Debug, Default, Deserialize)]
pub struct McpCallRequest {
    #[serde(default)]
    pub tool: Option<String>,
    #[serde(default)]
    pub arguments: Option<Map<String, Value>>,
}

#[derive(Serialize)]
struct ToolResult<T: Serialize> {
    content: Vec<ToolContent<T>>,
}

#[derive(Serialize)]
struct ToolContent<T: Serialize> {
    #[serde(rename = "type")]
    kind: &'static str,
    json: T,
}

impl<T: Serialize> ToolResult<T> {
    fn json(json: T) -> Self {
        ToolResult {
            content: vec![ToolContent { kind: "json", json }],
        }
    }
}

#[derive(Serialize)]
struct PlateNotFound {
    data_as_of: DateTime<Utc>,
    vehicle: VehicleInfo,
    service_events: Vec<ServiceEvent>,
    current_users: Vec<CurrentUser>,
    warnings: Vec<&'static str>,
}

pub fn tool_manifest() -> Value {
    json!({
        "tools": [
            {
                "name": SNAPSHOT_TOOL,
                "description": "Given a license plate, returns generic vehicle info, service events (type/km/where/when) and current corporate users.",
                "input_schema": {
                    "type": "object",
                    "properties": {
                        "plate": {
                            "type": "string",
                            "description": "Vehicle license plate (e.g., AB123CD)"
                        }
                    },
                    "required": ["plate"]
                }
            }
        ]
    })
}

pub fn routes(
    state: AppState,
) -> impl Filter<Extract = (Response,), Error = Rejection> + Clone {
    let list = warp::path!("api" / "mcp")
        .and(warp::get())
        .map(|| warp::reply::json(&tool_manifest()).into_response());
    let call = warp::path!("api" / "mcp")
        .and(warp::post())
        .and(json_body::<McpCallRequest>())
        .and(with_state(state))
        .and_then(call_tool);
    list.or(call).unify()
}

async fn call_tool(req: McpCallRequest, state: AppState) -> Result<Response, Infallible> {
    let plate = match validate_call(&req) {
        Ok(p) => p,
        Err(e) => {
            debug!("Rejecting tool call: {}", e);
            return Ok(e.into_response());
        }
    };

    let reply = match state.repo.get_by_plate(&plate) {
        Some(snapshot) => {
            info!("Tool call resolved plate {}", snapshot.vehicle.plate_masked);
            warp::reply::json(&ToolResult::json(snapshot))
        }
        None => {
            info!("Tool call for unknown plate {}", mask_plate(&normalize_plate(&plate)));
            warp::reply::json(&ToolResult::json(PlateNotFound {
                data_as_of: Utc::now(),
                vehicle: VehicleInfo {
                    plate_masked: mask_plate(&normalize_plate(&plate)),
                    ..VehicleInfo::default()
                },
                service_events: Vec::new(),
                current_users: Vec::new(),
                warnings: vec![PLATE_NOT_FOUND_WARNING],
            }))
        }
    };
    Ok(reply.into_response())
}

/// Checks tool name and arguments; returns the trimmed plate.
fn validate_call(req: &McpCallRequest) -> Result<String, ApiError> {
    let tool = match req.tool.as_deref() {
        Some(t) if !t.trim().is_empty() => t,
        _ => return Err(ApiError::validation("Invalid MCP request")),
    };
    if tool != SNAPSHOT_TOOL {
        return Err(ApiError::validation("Unknown tool"));
    }
    let value = req
        .arguments
        .as_ref()
        .and_then(|args| args.get("plate"))
        .ok_or_else(|| ApiError::validation("Missing argument: plate"))?;
    let plate = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    };
    if plate.chars().count() < MIN_PLATE_LEN {
        return Err(ApiError::validation("Invalid plate"));
    }
    Ok(plate)
}
