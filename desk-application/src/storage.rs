// JSON collections persisted through the key/value port

use anyhow::Context;
use serde::de::DeserializeOwned;
use serde::Serialize;

use desk_domain::KeyValueStore;

pub const TICKETS_KEY: &str = "tickets";
pub const CHECK_INS_KEY: &str = "check_ins";
pub const WALK_INS_KEY: &str = "walk_ins";
pub const OUTBOX_KEY: &str = "outbox";
pub const DEAD_LETTERS_KEY: &str = "dead_letters";

pub fn load_collection<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> anyhow::Result<Vec<T>> {
    match store.load(key)? {
        Some(raw) if !raw.trim().is_empty() => serde_json::from_str(&raw)
            .with_context(|| format!("stored collection '{}' is not valid JSON", key)),
        _ => Ok(Vec::new()),
    }
}

pub fn save_collection<T: Serialize>(
    store: &dyn KeyValueStore,
    key: &str,
    items: &[T],
) -> anyhow::Result<()> {
    let content = serde_json::to_string(items)?;
    store
        .save(key, &content)
        .with_context(|| format!("failed to persist collection '{}'", key))
}
