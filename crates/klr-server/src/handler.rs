use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use bytes::Bytes;
use serde::Serialize;
use serde_json::{json, Value};

use klr_locator::BINARY_FIELD;
use klr_rpc::{BinaryCodec, BinaryMessage, Status, StatusCode as RpcStatusCode};
use klr_store::{LedgerSelector, LedgerSource};

use crate::state::AppState;

pub const BINARY_CONTENT_TYPE: &str = "application/octet-stream";

#[derive(Clone, Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub protocol_version: u32,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".into(),
            version: env!("CARGO_PKG_VERSION").into(),
            protocol_version: klr_rpc::PROTOCOL_VERSION,
        }
    }
}

/// Health check handler.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::default())
}

/// Info handler. Reports the current ledger, if any.
pub async fn info_handler(State(state): State<AppState>) -> Json<Value> {
    let current = current_ledger(state.source.as_ref());
    Json(json!({
        "name": "klr-server",
        "version": env!("CARGO_PKG_VERSION"),
        "protocol_version": klr_rpc::PROTOCOL_VERSION,
        "current_ledger": current,
    }))
}

fn current_ledger(source: &dyn LedgerSource) -> Value {
    match source.select(&LedgerSelector::Current) {
        Ok(view) => {
            let info = view.info();
            json!({
                "ledger_index": info.seq,
                "ledger_hash": info.hash.to_hex(),
                "validated": info.validated,
            })
        }
        Err(_) => Value::Null,
    }
}

/// JSON protocol. Always HTTP 200; errors are reported in the body,
/// including bodies that are not JSON at all.
pub async fn ledger_entry_handler(State(state): State<AppState>, body: Bytes) -> Json<Value> {
    let mut params = match serde_json::from_slice::<Value>(&body) {
        Ok(Value::Object(params)) => params,
        Ok(_) => return Json(invalid_params("paramsNotObject")),
        Err(e) => {
            tracing::debug!(error = %e, "rejecting unparseable JSON request");
            return Json(invalid_params("jsonInvalid"));
        }
    };
    if state.default_binary && !params.contains_key(BINARY_FIELD) {
        params.insert(BINARY_FIELD.into(), Value::Bool(true));
    }
    Json(klr_rpc::ledger_entry(
        &params,
        state.source.as_ref(),
        state.deriver.as_ref(),
    ))
}

fn invalid_params(message: &str) -> Value {
    json!({
        "error": "invalidParams",
        "error_message": message,
    })
}

/// Binary protocol. The body is one framed request; the response body is
/// one framed response or status.
pub async fn ledger_entry_binary_handler(State(state): State<AppState>, body: Bytes) -> Response {
    let request = match BinaryCodec::decode(&body).and_then(|(msg, _)| msg.into_request()) {
        Ok(request) => request,
        Err(e) => {
            tracing::debug!(error = %e, "rejecting undecodable binary request");
            return framed(BinaryMessage::Status(Status::invalid_argument(e.to_string())));
        }
    };

    framed(klr_rpc::ledger_entry_binary(&request, state.source.as_ref()).into())
}

fn framed(msg: BinaryMessage) -> Response {
    let status = match &msg {
        BinaryMessage::Status(s) => match s.code {
            RpcStatusCode::InvalidArgument => StatusCode::BAD_REQUEST,
            RpcStatusCode::NotFound => StatusCode::NOT_FOUND,
        },
        _ => StatusCode::OK,
    };

    match BinaryCodec::encode(&msg) {
        Ok(bytes) => (status, [(header::CONTENT_TYPE, BINARY_CONTENT_TYPE)], bytes).into_response(),
        Err(e) => {
            tracing::warn!(error = %e, message = msg.type_name(), "failed to encode binary response");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}
