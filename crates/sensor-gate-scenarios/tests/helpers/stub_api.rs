// crates/sensor-gate-scenarios/tests/helpers/stub_api.rs
// ============================================================================
// Module: Sensor API Stub
// Description: In-process axum implementation of the sensor-data contract.
// Purpose: Exercise the scenarios end to end against the reference fixture.
// Dependencies: axum, sensor-gate-core, serde, time, tokio
// ============================================================================

//! ## Overview
//! The stub seeds every sensor type with readings at a five-minute cadence
//! starting `2024-01-01 00:00:00`, which reproduces the reference fixture:
//! 2016 readings per type over seven days, nine of them inside the
//! `[00:00:00, 00:40:00]` range the date-range scenario queries.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::net::TcpListener as StdTcpListener;
use std::sync::Arc;
use std::sync::Mutex;
use std::thread;

use axum::Json;
use axum::Router;
use axum::extract::Path;
use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::routing::get;
use serde::Deserialize;
use serde_json::Value;
use serde_json::json;
use tokio::runtime::Builder;
use tokio::sync::oneshot;

use sensor_gate_core::StoredReading;
use sensor_gate_core::reading::TIMESTAMP_LAYOUT;
use sensor_gate_core::reading::now_timestamp;

// ============================================================================
// SECTION: Store
// ============================================================================

/// Sensor types the stub serves, with their units.
const STUB_SENSORS: &[(&str, &str)] = &[("temperature", "C"), ("humidity", "%"), ("light", "lx")];

/// In-memory record store partitioned by sensor type.
struct StubStore {
    /// Records per sensor type, keyed by identifier.
    tables: BTreeMap<String, BTreeMap<i64, StoredReading>>,
    /// Next identifier to assign.
    next_id: i64,
}

/// Shared handler state.
#[derive(Clone)]
struct StubState {
    /// Store behind a mutex; handlers never hold it across awaits.
    store: Arc<Mutex<StubStore>>,
}

/// Seeds the reference fixture: `per_type` readings per sensor type at a
/// five-minute cadence from `2024-01-01 00:00:00`.
fn seeded_store(per_type: usize) -> Result<StubStore, Box<dyn std::error::Error>> {
    let start = time::macros::datetime!(2024-01-01 00:00:00);
    let mut tables = BTreeMap::new();
    let mut next_id = 1_i64;
    for (sensor, unit) in STUB_SENSORS {
        let mut table = BTreeMap::new();
        for index in 0..per_type {
            let moment = start + time::Duration::minutes(i64::try_from(index)? * 5);
            let timestamp = moment.format(&TIMESTAMP_LAYOUT)?;
            // Values cycle out of phase with timestamps so order-by=value
            // differs from insertion order.
            let value = (((index % 100) * 37) % 100) as f64 / 2.0;
            table.insert(
                next_id,
                StoredReading {
                    id: next_id,
                    value,
                    unit: (*unit).to_string(),
                    timestamp: Some(timestamp),
                },
            );
            next_id += 1;
        }
        tables.insert((*sensor).to_string(), table);
    }
    Ok(StubStore {
        tables,
        next_id,
    })
}

// ============================================================================
// SECTION: Handlers
// ============================================================================

/// Query parameters accepted by the list endpoint.
#[derive(Debug, Deserialize)]
struct ListParams {
    /// Ordering field: `value` or `timestamp`.
    #[serde(rename = "order-by")]
    order_by: Option<String>,
    /// Inclusive lower timestamp bound.
    #[serde(rename = "start-date")]
    start_date: Option<String>,
    /// Inclusive upper timestamp bound.
    #[serde(rename = "end-date")]
    end_date: Option<String>,
}

/// `GET /api/{sensor}/count`.
async fn count(State(state): State<StubState>, Path(sensor): Path<String>) -> Response {
    let Ok(store) = state.store.lock() else {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    };
    store.tables.get(&sensor).map_or_else(
        || StatusCode::NOT_FOUND.into_response(),
        |table| Json(json!(table.len())).into_response(),
    )
}

/// `GET /api/{sensor}` with optional ordering and date-range filters.
async fn list(
    State(state): State<StubState>,
    Path(sensor): Path<String>,
    Query(params): Query<ListParams>,
) -> Response {
    let Ok(store) = state.store.lock() else {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    };
    let Some(table) = store.tables.get(&sensor) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    let mut rows: Vec<StoredReading> = table.values().cloned().collect();
    if let (Some(start), Some(end)) = (&params.start_date, &params.end_date) {
        rows.retain(|row| {
            row.timestamp
                .as_deref()
                .is_some_and(|ts| ts >= start.as_str() && ts <= end.as_str())
        });
    }
    match params.order_by.as_deref() {
        Some("value") => rows.sort_by(|lhs, rhs| lhs.value.total_cmp(&rhs.value)),
        Some("timestamp") => rows.sort_by(|lhs, rhs| lhs.timestamp.cmp(&rhs.timestamp)),
        _ => {}
    }
    Json(rows).into_response()
}

/// `POST /api/{sensor}`.
async fn create(
    State(state): State<StubState>,
    Path(sensor): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let Ok(mut store) = state.store.lock() else {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    };
    if !store.tables.contains_key(&sensor) {
        return StatusCode::NOT_FOUND.into_response();
    }
    let Some(value) = body.get("value").and_then(Value::as_f64) else {
        return StatusCode::BAD_REQUEST.into_response();
    };
    let unit = body.get("unit").and_then(Value::as_str).unwrap_or_default().to_string();
    let timestamp = match body.get("timestamp").and_then(Value::as_str) {
        Some(explicit) => explicit.to_string(),
        None => match now_timestamp() {
            Ok(assigned) => assigned,
            Err(_) => return StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        },
    };
    let id = store.next_id;
    store.next_id += 1;
    let record = StoredReading {
        id,
        value,
        unit,
        timestamp: Some(timestamp),
    };
    let Some(table) = store.tables.get_mut(&sensor) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    table.insert(id, record.clone());
    Json(record).into_response()
}

/// `GET /api/{sensor}/{id}`.
async fn fetch(State(state): State<StubState>, Path((sensor, id)): Path<(String, i64)>) -> Response {
    let Ok(store) = state.store.lock() else {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    };
    store.tables.get(&sensor).and_then(|table| table.get(&id)).map_or_else(
        || StatusCode::NOT_FOUND.into_response(),
        |record| Json(record.clone()).into_response(),
    )
}

/// `PUT /api/{sensor}/{id}`: merges the provided fields into the record.
async fn update(
    State(state): State<StubState>,
    Path((sensor, id)): Path<(String, i64)>,
    Json(body): Json<Value>,
) -> Response {
    let Ok(mut store) = state.store.lock() else {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    };
    let Some(record) = store.tables.get_mut(&sensor).and_then(|table| table.get_mut(&id)) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    if let Some(value) = body.get("value").and_then(Value::as_f64) {
        record.value = value;
    }
    if let Some(unit) = body.get("unit").and_then(Value::as_str) {
        record.unit = unit.to_string();
    }
    if let Some(timestamp) = body.get("timestamp").and_then(Value::as_str) {
        record.timestamp = Some(timestamp.to_string());
    }
    Json(record.clone()).into_response()
}

/// `DELETE /api/{sensor}/{id}`.
async fn remove(
    State(state): State<StubState>,
    Path((sensor, id)): Path<(String, i64)>,
) -> Response {
    let Ok(mut store) = state.store.lock() else {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    };
    store.tables.get_mut(&sensor).and_then(|table| table.remove(&id)).map_or_else(
        || StatusCode::NOT_FOUND.into_response(),
        |_| Json(Value::Null).into_response(),
    )
}

// ============================================================================
// SECTION: Lifecycle
// ============================================================================

/// Handle for the spawned stub server; shuts down on drop.
pub struct StubApiHandle {
    /// Base URL of the listening stub.
    base_url: String,
    /// Graceful shutdown trigger.
    shutdown: Option<oneshot::Sender<()>>,
    /// Server thread join handle.
    join: Option<thread::JoinHandle<()>>,
}

impl StubApiHandle {
    /// Returns the stub's base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Drop for StubApiHandle {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(join) = self.join.take() {
            let _ = join.join();
        }
    }
}

/// Spawns the stub on a loopback port with `per_type` seeded readings per
/// sensor type.
pub fn spawn_stub_api(per_type: usize) -> Result<StubApiHandle, Box<dyn std::error::Error>> {
    let listener = StdTcpListener::bind("127.0.0.1:0")?;
    listener.set_nonblocking(true)?;
    let addr = listener.local_addr()?;
    let state = StubState {
        store: Arc::new(Mutex::new(seeded_store(per_type)?)),
    };
    let app = Router::new()
        .route("/api/:sensor/count", get(count))
        .route("/api/:sensor", get(list).post(create))
        .route("/api/:sensor/:id", get(fetch).put(update).delete(remove))
        .with_state(state);
    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let join = thread::spawn(move || {
        let Ok(runtime) = Builder::new_current_thread().enable_all().build() else {
            return;
        };
        runtime.block_on(async move {
            let Ok(listener) = tokio::net::TcpListener::from_std(listener) else {
                return;
            };
            let server = axum::serve(listener, app).with_graceful_shutdown(async move {
                let _ = shutdown_rx.await;
            });
            let _ = server.await;
        });
    });
    Ok(StubApiHandle {
        base_url: format!("http://{addr}"),
        shutdown: Some(shutdown_tx),
        join: Some(join),
    })
}
