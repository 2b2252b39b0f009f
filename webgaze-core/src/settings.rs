//! Settings store boundary
//!
//! The monitored child's email lives in a host-provided key-value settings
//! store (in the browser this is the extension's synced storage, written by
//! the popup). The monitor reads it exactly once per document attachment,
//! before any detection logic activates.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::config::MonitorConfig;
use crate::error::Result;

/// Settings key holding the monitored child's email address.
pub const CHILD_EMAIL_KEY: &str = "child_email";

/// Asynchronous key-value settings store.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Look up a settings value by key.
    ///
    /// Returns `Ok(None)` for an unknown key; errors are reserved for a
    /// store that cannot be read at all.
    async fn get(&self, key: &str) -> Result<Option<String>>;
}

/// In-memory settings store.
#[derive(Debug, Default, Clone)]
pub struct MemorySettings {
    values: HashMap<String, String>,
}

impl MemorySettings {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a value under a key, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }
}

#[async_trait]
impl SettingsStore for MemorySettings {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }
}

/// The `[monitor]` config section doubles as a file-backed settings store.
#[async_trait]
impl SettingsStore for MonitorConfig {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        match key {
            CHILD_EMAIL_KEY => Ok(self.child_email.clone()),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_settings_roundtrip() {
        let mut settings = MemorySettings::new();
        settings.set(CHILD_EMAIL_KEY, "kid@example.com");

        let value = settings.get(CHILD_EMAIL_KEY).await.unwrap();
        assert_eq!(value.as_deref(), Some("kid@example.com"));
    }

    #[tokio::test]
    async fn test_memory_settings_unknown_key() {
        let settings = MemorySettings::new();
        assert!(settings.get("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_monitor_config_as_settings_store() {
        let section = MonitorConfig {
            child_email: Some("kid@example.com".to_string()),
        };
        let value = section.get(CHILD_EMAIL_KEY).await.unwrap();
        assert_eq!(value.as_deref(), Some("kid@example.com"));
        assert!(section.get("other").await.unwrap().is_none());
    }
}
