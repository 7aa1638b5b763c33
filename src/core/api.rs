//! HTTP + WebSocket API for the dashboard consumer
//!
//! Endpoints:
//! - GET /health - Health check
//! - POST /cycle - Submit one cycle of signals
//! - GET /state - Latest cycle output
//! - GET /seal - Public attestation triple
//! - POST /verify - Verify a (public_key, signature, message) triple
//! - GET /trajectory?t=&c1=&v1=&c2=&v2= - Scalar projection
//! - WS /ws - Live cycle outputs

use axum::{
    extract::{
        ws::{Message, WebSocket},
        Query, State, WebSocketUpgrade,
    },
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use futures_util::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};
use tracing::{info, warn};

use crate::core::{seal, Monitor};
use crate::types::{
    AttestationSeal, CycleOutput, KeyRetention, ModeCoefficients, MonitorConfig, MonitorError,
    MonitorResult, TrajectoryPoint,
};

/// Capacity of the live-update channel
const UPDATE_CHANNEL_CAPACITY: usize = 100;

/// App state
pub struct AppState {
    pub monitor: RwLock<Monitor>,
    /// Sealed once at startup; the signing key is discarded
    pub seal: AttestationSeal,
    pub update_tx: broadcast::Sender<CycleOutput>,
}

/// Submit-cycle request
#[derive(Debug, Deserialize)]
pub struct CycleRequest {
    /// Omit to continue after the last cycle
    pub cycle: Option<u64>,
    pub g: f64,
    pub c: f64,
    pub m: f64,
}

/// Verify request; signature as hex, public key as hex or PEM
#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    pub public_key: String,
    pub signature: String,
    /// Message text; defaults to the configured attestation message
    pub message: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VerifyResponse {
    pub valid: bool,
    pub reason: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SealResponse {
    #[serde(flatten)]
    pub seal: AttestationSeal,
    pub public_key_pem: String,
    pub fingerprint: String,
}

#[derive(Debug, Deserialize)]
pub struct TrajectoryQuery {
    pub t: f64,
    pub c1: Option<f64>,
    pub v1: Option<f64>,
    pub c2: Option<f64>,
    pub v2: Option<f64>,
}

/// Health response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub cycles: u64,
    pub seal_fingerprint: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for MonitorError {
    fn into_response(self) -> Response {
        let status = match &self {
            MonitorError::InvalidSignal { .. }
            | MonitorError::MalformedLine(_)
            | MonitorError::NonFiniteProjection { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            MonitorError::TamperedOrForged => StatusCode::UNAUTHORIZED,
            MonitorError::Config(_) | MonitorError::MalformedKey(_) => StatusCode::BAD_REQUEST,
            MonitorError::DivergenceDetected { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Create the API router. Fails on invalid configuration.
pub fn create_router(config: MonitorConfig) -> MonitorResult<Router> {
    let monitor = Monitor::new(config)?;
    let message = monitor.config().seal.message.clone();
    let attestation = seal::initialize(message, KeyRetention::Discard).into_attestation();
    let (update_tx, _) = broadcast::channel(UPDATE_CHANNEL_CAPACITY);

    let state = Arc::new(AppState {
        monitor: RwLock::new(monitor),
        seal: attestation,
        update_tx,
    });

    Ok(Router::new()
        .route("/health", get(health))
        .route("/cycle", post(submit_cycle))
        .route("/state", get(latest_state))
        .route("/seal", get(get_seal))
        .route("/verify", post(verify_triple))
        .route("/trajectory", get(trajectory))
        .route("/ws", get(websocket_handler))
        .with_state(state))
}

/// Health check endpoint
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let monitor = state.monitor.read().await;
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
        cycles: monitor.cycle_count(),
        seal_fingerprint: state.seal.fingerprint(),
    })
}

async fn submit_cycle(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CycleRequest>,
) -> Result<Json<CycleOutput>, MonitorError> {
    let signals = [req.g, req.c, req.m];
    let mut monitor = state.monitor.write().await;
    let output = match req.cycle {
        Some(cycle) => monitor.step(cycle, signals)?,
        None => monitor.next(signals)?,
    };
    drop(monitor);

    // No subscribers is not an error
    let _ = state.update_tx.send(output.clone());
    Ok(Json(output))
}

async fn latest_state(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CycleOutput>, StatusCode> {
    let monitor = state.monitor.read().await;
    monitor
        .last_output()
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn get_seal(State(state): State<Arc<AppState>>) -> Result<Json<SealResponse>, MonitorError> {
    Ok(Json(SealResponse {
        public_key_pem: state.seal.public_key_pem()?,
        fingerprint: state.seal.fingerprint(),
        seal: state.seal.clone(),
    }))
}

async fn verify_triple(
    State(state): State<Arc<AppState>>,
    Json(req): Json<VerifyRequest>,
) -> Result<Json<VerifyResponse>, (StatusCode, Json<ErrorResponse>)> {
    let bad_request = |error: String| (StatusCode::BAD_REQUEST, Json(ErrorResponse { error }));
    let public_key = seal::decode_public_key(&req.public_key).map_err(|e| bad_request(e.to_string()))?;
    let signature = hex::decode(&req.signature)
        .map_err(|e| bad_request(format!("signature: invalid hex: {e}")))?;
    let message = match req.message {
        Some(text) => text.into_bytes(),
        None => state.monitor.read().await.config().seal.message.clone().into_bytes(),
    };

    let response = match seal::verify(&public_key, &signature, &message) {
        Ok(()) => VerifyResponse {
            valid: true,
            reason: None,
        },
        Err(err) => VerifyResponse {
            valid: false,
            reason: Some(err.to_string()),
        },
    };
    Ok(Json(response))
}

async fn trajectory(
    State(state): State<Arc<AppState>>,
    Query(q): Query<TrajectoryQuery>,
) -> Result<Json<TrajectoryPoint>, MonitorError> {
    let unit = ModeCoefficients::unit();
    let coefficients = ModeCoefficients::new(
        q.c1.unwrap_or(unit.c1),
        q.v1.unwrap_or(unit.v1),
        q.c2.unwrap_or(unit.c2),
        q.v2.unwrap_or(unit.v2),
    );
    let monitor = state.monitor.read().await;
    Ok(Json(monitor.project(q.t, coefficients)?))
}

/// WebSocket handler for live updates
async fn websocket_handler(
    State(state): State<Arc<AppState>>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    let rx = state.update_tx.subscribe();
    ws.on_upgrade(move |socket| handle_websocket(socket, rx))
}

/// Forward cycle outputs until either side closes
async fn handle_websocket(socket: WebSocket, mut rx: broadcast::Receiver<CycleOutput>) {
    let (mut sender, mut receiver) = socket.split();

    let mut send_task = tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(output) => {
                    let Ok(json) = serde_json::to_string(&output) else {
                        continue;
                    };
                    if sender.send(Message::Text(json)).await.is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "websocket subscriber lagged");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            if matches!(msg, Message::Close(_)) {
                break;
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }
}

/// Run the API server
pub async fn run_server(
    addr: &str,
    config: MonitorConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let router = create_router(config)?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "ridgeline API listening");
    info!("  GET  /health      - Health check");
    info!("  POST /cycle       - Submit signals");
    info!("  GET  /state       - Latest output");
    info!("  GET  /seal        - Attestation seal");
    info!("  POST /verify      - Verify a seal");
    info!("  GET  /trajectory  - Projection");
    info!("  WS   /ws          - Live updates");
    axum::serve(listener, router).await?;
    Ok(())
}
