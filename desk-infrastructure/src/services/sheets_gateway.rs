use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::debug;

use desk_domain::{EntityKind, FlatRecord, Gateway, GatewayError, RuntimeConfig, SyncOperation};

/// Mirrors records to a spreadsheet web app that accepts
/// `{"sheet": .., "action": .., "data": {..}}` posts.
pub struct SheetsGateway {
    url: Option<String>,
    client: Client,
}

impl SheetsGateway {
    pub fn new(url: Option<String>, request_timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(request_timeout).build()?;
        Ok(Self { url, client })
    }

    pub fn from_config(config: &RuntimeConfig) -> anyhow::Result<Self> {
        Self::new(
            config.gateway_url.clone(),
            Duration::from_secs(config.request_timeout_seconds.max(1)),
        )
    }
}

pub fn sheet_name(entity_kind: EntityKind) -> &'static str {
    match entity_kind {
        EntityKind::Ticket => "Tickets",
        EntityKind::CheckIn => "CheckIns",
        EntityKind::WalkIn => "WalkIns",
    }
}

#[async_trait]
impl Gateway for SheetsGateway {
    fn is_configured(&self) -> bool {
        self.url.is_some()
    }

    async fn send(
        &self,
        entity_kind: EntityKind,
        operation: SyncOperation,
        record: &FlatRecord,
    ) -> Result<(), GatewayError> {
        let Some(url) = self.url.as_deref() else {
            return Err(GatewayError::NotConfigured);
        };
        let sheet = sheet_name(entity_kind);
        let body = json!({
            "sheet": sheet,
            "action": operation.as_str(),
            "data": record,
        });

        let response = self
            .client
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|err| GatewayError::Transport(err.to_string()))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|err| GatewayError::Transport(err.to_string()))?;
        if !status.is_success() {
            return Err(GatewayError::Rejected(format!("HTTP {}", status)));
        }
        check_reply(&text)?;
        debug!("sent {} to {}", operation, sheet);
        Ok(())
    }
}

/// A JSON reply with `"success": false` is a rejection; any other 2xx body
/// counts as accepted.
fn check_reply(text: &str) -> Result<(), GatewayError> {
    let Ok(Value::Object(reply)) = serde_json::from_str::<Value>(text) else {
        return Ok(());
    };
    if reply.get("success").and_then(Value::as_bool) == Some(false) {
        let reason = reply
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or("remote reported failure");
        return Err(GatewayError::Rejected(reason.to_string()));
    }
    Ok(())
}
