use crate::error::ApiError;
use crate::seed::normalize_plate;
use crate::server::{json_body, with_state, AppState};
use crate::types::Snapshot;
use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::time::{Duration, Instant};
use uuid::Uuid;
use warp::reply::Response;
use warp::{Filter, Rejection, Reply};

#[derive(Debug, Default, Deserialize)]
pub struct PlateRequest {
    #[serde(default, alias = "Plate")]
    pub plate: Option<String>,
}

/// Snapshot plus request metadata, flattened into one object.
#[derive(Debug, Serialize)]
struct DecoratedSnapshot {
    #[serde(flatten)]
    snapshot: Snapshot,
    request_id: String,
    server_time: DateTime<Utc>,
    latency_ms: u64,
}

/// `POST /api/vehicle/snapshot`
pub fn routes(
    state: AppState,
) -> impl Filter<Extract = (Response,), Error = Rejection> + Clone {
    warp::path!("api" / "vehicle" / "snapshot")
        .and(warp::post())
        .and(json_body::<PlateRequest>())
        .and(with_state(state))
        .and_then(get_snapshot)
}

async fn get_snapshot(req: PlateRequest, state: AppState) -> Result<Response, Infallible> {
    let started = Instant::now();
    let plate = match req.plate.as_deref().map(normalize_plate) {
        Some(p) if !p.is_empty() => p,
        _ => {
            debug!("Rejecting snapshot request without plate");
            return Ok(ApiError::validation("Missing plate").into_response());
        }
    };

    let snapshot = match state.repo.get_by_plate(&plate) {
        Some(s) => s,
        None => {
            info!("No vehicle for plate {}", plate);
            return Ok(ApiError::NotFound.into_response());
        }
    };
    info!(
        "Snapshot for {}: {} events, {} users",
        snapshot.vehicle.plate_masked,
        snapshot.service_events.len(),
        snapshot.current_users.len()
    );

    if !state.config.decorate_responses {
        return Ok(warp::reply::json(&snapshot).into_response());
    }

    let delay = simulated_delay(
        state.config.latency_per_event_ms,
        snapshot.service_events.len(),
    );
    if delay > Duration::from_millis(0) {
        tokio::time::sleep(delay).await;
    }
    let decorated = DecoratedSnapshot {
        snapshot,
        request_id: Uuid::new_v4().to_string(),
        server_time: Utc::now(),
        latency_ms: started.elapsed().as_millis() as u64,
    };
    Ok(warp::reply::json(&decorated).into_response())
}

fn simulated_delay(per_event_ms: u64, events: usize) -> Duration {
    Duration::from_millis(per_event_ms.saturating_mul(events as u64))
}
