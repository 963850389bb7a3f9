// Responsible for all communication with the documentation backend.

use crate::domain::model::InterfaceRecord;
use crate::domain::port::{GatewayError, InterfaceGateway, SavedInterface};
use crate::infra::config::AppConfig;
use async_trait::async_trait;
use reqwest::header::COOKIE;
use serde_json::Value as JsonValue;
use std::time::Duration;
use tracing::{debug, warn};

pub const CREATE_PATH: &str = "/interface/create";
pub const UPDATE_PATH: &str = "/interface/update";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP gateway to the backend's interface endpoints.
#[derive(Debug, Clone)]
pub struct RapClient {
    base_url: String,
    http: reqwest::Client,
    session_cookie: Option<String>,
}

impl RapClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
            session_cookie: None,
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, GatewayError> {
        Self::new(config.serve.clone())
    }

    /// Sends `{cookie_name}={token}` with every request.
    pub fn with_session(mut self, cookie_name: &str, token: &str) -> Self {
        self.session_cookie = Some(format!("{}={}", cookie_name, token));
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Checks that the backend answers at all. Returns the HTTP status of `GET /`.
    pub async fn ping(&self) -> Result<u16, GatewayError> {
        let mut req = self.http.get(format!("{}/", self.base_url));
        if let Some(cookie) = &self.session_cookie {
            req = req.header(COOKIE, cookie);
        }
        let resp = req
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        Ok(resp.status().as_u16())
    }

    async fn post_record(
        &self,
        path: &str,
        record: &InterfaceRecord,
    ) -> Result<SavedInterface, GatewayError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, id = record.id, "posting interface");

        let mut req = self.http.post(&url).json(record);
        if let Some(cookie) = &self.session_cookie {
            req = req.header(COOKIE, cookie);
        }
        let resp = req
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "backend returned an error status");
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let json: JsonValue =
            serde_json::from_str(&body).map_err(|e| GatewayError::Decode(e.to_string()))?;
        decode_saved(json)
    }
}

/// Decodes `{ "data": { "itf": {...} } }` or `{ "data": {...} }`.
///
/// A body with `isOk: false` is a rejection carrying `errMsg`. A missing or
/// null `data` is a success without an id. The echoed record is kept only
/// when it decodes cleanly.
pub fn decode_saved(json: JsonValue) -> Result<SavedInterface, GatewayError> {
    if json.get("isOk").and_then(|v| v.as_bool()) == Some(false) {
        let msg = json
            .get("errMsg")
            .and_then(|v| v.as_str())
            .unwrap_or("unknown error")
            .to_string();
        return Err(GatewayError::Rejected(msg));
    }

    let data = match json.get("data") {
        None | Some(JsonValue::Null) => return Ok(SavedInterface::default()),
        Some(data) => data,
    };
    let record = match data.get("itf") {
        Some(itf) if itf.is_object() => itf,
        _ => data,
    };
    if !record.is_object() {
        return Err(GatewayError::Decode(format!(
            "expected an interface object, got {}",
            record
        )));
    }

    // Only the id is load-bearing; a record the backend echoes with nulls
    // must not turn a completed save into an error.
    let id = record
        .get("id")
        .and_then(JsonValue::as_u64)
        .filter(|id| *id != 0);
    let echoed = match serde_json::from_value::<InterfaceRecord>(record.clone()) {
        Ok(echoed) => Some(echoed),
        Err(e) => {
            debug!(error = %e, "ignoring echoed interface record");
            None
        }
    };
    Ok(SavedInterface { id, record: echoed })
}

#[async_trait]
impl InterfaceGateway for RapClient {
    async fn create(&self, record: &InterfaceRecord) -> Result<SavedInterface, GatewayError> {
        self.post_record(CREATE_PATH, record).await
    }

    async fn update(&self, record: &InterfaceRecord) -> Result<SavedInterface, GatewayError> {
        self.post_record(UPDATE_PATH, record).await
    }
}
