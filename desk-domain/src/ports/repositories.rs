/// Durable document store keyed by collection name.
///
/// Every `save` fully replaces the stored document and must be atomic with
/// respect to concurrent `load`s: a reader sees either the old or the new
/// document, never a partial write. Calls are synchronous; local writes are
/// not allowed to suspend.
pub trait KeyValueStore: Send + Sync {
    fn load(&self, key: &str) -> anyhow::Result<Option<String>>;
    fn save(&self, key: &str, value: &str) -> anyhow::Result<()>;
}
