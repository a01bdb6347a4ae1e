use axum::http::HeaderMap;

use desk_domain::RuntimeConfig;

pub const VOLUNTEER_HEADER: &str = "X-Volunteer-Name";

pub fn authorize(config: &RuntimeConfig, headers: &HeaderMap) -> bool {
    if let Some(api_token) = &config.api_token {
        return extract_bearer(headers)
            .map(|v| v == *api_token)
            .unwrap_or(false);
    }
    true
}

/// Display name of the signed-in volunteer; empty when the header is absent.
pub fn volunteer_name(headers: &HeaderMap) -> String {
    headers
        .get(VOLUNTEER_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.trim().to_string())
        .unwrap_or_default()
}

fn extract_bearer(headers: &HeaderMap) -> Option<String> {
    let value = headers.get("Authorization")?.to_str().ok()?.trim();
    let token = value.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        return None;
    }
    Some(token.to_string())
}
