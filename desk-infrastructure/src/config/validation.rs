use anyhow::{anyhow, Result};

pub fn validate_bind_addr(value: &str) -> Result<()> {
    value
        .parse::<std::net::SocketAddr>()
        .map(|_| ())
        .map_err(|err| anyhow!("invalid bind_addr: {}", err))
}

pub fn validate_gateway_url(value: &str) -> Result<()> {
    let url = reqwest::Url::parse(value).map_err(|err| anyhow!("invalid gateway_url: {}", err))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(anyhow!("gateway_url must use http or https"));
    }
    Ok(())
}

/// A SHA-256 digest rendered as 64 hex characters.
pub fn validate_pin_hash(value: &str) -> Result<()> {
    if value.len() != 64 || !value.chars().all(|ch| ch.is_ascii_hexdigit()) {
        return Err(anyhow!("volunteer_pin_hash must be a 64-character hex SHA-256 digest"));
    }
    Ok(())
}
