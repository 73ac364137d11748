use crate::error::Result;

/// Abstract interface for local key-value storage.
///
/// Values are opaque strings. A `set` replaces the previous value in a single
/// step: readers see either the old value or the new one, never a mix.
#[allow(async_fn_in_trait)]
pub trait KeyValueStore {
    /// Read the value for `key`. Returns `Ok(None)` when the key was never set.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write `value` under `key`, overwriting any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value).await
    }
}
