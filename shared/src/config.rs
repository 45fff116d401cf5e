//! Backend address configuration
//!
//! The console targets a single backend whose `host:port` is user-editable
//! and persisted client side. Persistence goes through [`KeyValueStore`] so
//! the same logic backs browser `localStorage`, the CLI's config directory
//! and the in-memory store used by tests.

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;

use crate::error::{StoreError, ValidationError};

/// Storage key holding the address as JSON text
pub const BACKEND_CONFIG_KEY: &str = "backend_config";

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5555;

/// Host and port of the backend this console talks to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendAddress {
    pub host: String,
    pub port: u16,
}

impl Default for BackendAddress {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl BackendAddress {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// `http://{host}:{port}`
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    fn is_usable(&self) -> bool {
        !self.host.is_empty() && self.port != 0
    }
}

impl fmt::Display for BackendAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Minimal string key/value persistence
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove_item(&self, key: &str) -> Result<(), StoreError>;
}

/// Process-local store, used when no persistent medium is available
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

/// Reads and writes the persisted [`BackendAddress`]
#[derive(Debug, Clone)]
pub struct AddressStore<S> {
    storage: S,
}

impl<S: KeyValueStore> AddressStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Persisted address, or the default when absent or unreadable.
    ///
    /// A corrupt value is never an error: unparseable JSON, a port outside
    /// 1..=65535 and an empty host all read as the default.
    pub fn read(&self) -> BackendAddress {
        let raw = match self.storage.get_item(BACKEND_CONFIG_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return BackendAddress::default(),
            Err(e) => {
                tracing::warn!("Backend address unavailable, using default: {}", e);
                return BackendAddress::default();
            }
        };

        match serde_json::from_str::<BackendAddress>(&raw) {
            Ok(address) if address.is_usable() => address,
            Ok(address) => {
                tracing::warn!("Ignoring unusable stored backend address {}", address);
                BackendAddress::default()
            }
            Err(e) => {
                tracing::warn!("Ignoring malformed stored backend address: {}", e);
                BackendAddress::default()
            }
        }
    }

    /// Persist verbatim; validation belongs to [`AddressForm`]
    pub fn write(&self, address: &BackendAddress) -> Result<(), StoreError> {
        let json = serde_json::to_string(address).map_err(|e| StoreError::Write(e.to_string()))?;
        self.storage.set_item(BACKEND_CONFIG_KEY, &json)
    }

    /// Forget the persisted value so later reads return the default
    pub fn reset(&self) -> Result<(), StoreError> {
        self.storage.remove_item(BACKEND_CONFIG_KEY)
    }

    /// Base URL of the currently persisted address
    pub fn resolve_base_url(&self) -> String {
        self.read().base_url()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

/// Editable text form behind the settings screen
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AddressForm {
    pub host: String,
    pub port: String,
}

impl From<&BackendAddress> for AddressForm {
    fn from(address: &BackendAddress) -> Self {
        Self {
            host: address.host.clone(),
            port: address.port.to_string(),
        }
    }
}

impl AddressForm {
    pub fn validate(&self) -> Result<BackendAddress, ValidationError> {
        let host = self.host.trim();
        if host.is_empty() {
            return Err(ValidationError::Required("Host"));
        }

        let port = self
            .port
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|p| (1..=65535).contains(p))
            .ok_or(ValidationError::InvalidPort)?;

        Ok(BackendAddress::new(host, port as u16))
    }

    /// URL preview shown while typing, before validation
    pub fn preview_url(&self) -> String {
        format!("http://{}:{}", self.host.trim(), self.port.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(raw: Option<&str>) -> AddressStore<MemoryStore> {
        let storage = MemoryStore::new();
        if let Some(raw) = raw {
            storage.set_item(BACKEND_CONFIG_KEY, raw).unwrap();
        }
        AddressStore::new(storage)
    }

    #[test]
    fn test_read_defaults_when_absent() {
        let store = store_with(None);
        assert_eq!(store.read(), BackendAddress::new("127.0.0.1", 5555));
        assert_eq!(store.resolve_base_url(), "http://127.0.0.1:5555");
    }

    #[test]
    fn test_read_defaults_on_invalid_json() {
        for raw in ["not json", "{\"host\":", "[]", "{\"host\":\"a\",\"port\":70000}", "{\"host\":\"\",\"port\":80}"] {
            assert_eq!(store_with(Some(raw)).read(), BackendAddress::default(), "raw: {}", raw);
        }
    }

    #[test]
    fn test_write_then_read() {
        let store = store_with(None);
        let address = BackendAddress::new("10.0.0.2", 8080);
        store.write(&address).unwrap();

        assert_eq!(store.read(), address);
        assert_eq!(store.resolve_base_url(), "http://10.0.0.2:8080");
    }

    #[test]
    fn test_reset_is_idempotent() {
        let store = store_with(Some("{\"host\":\"example.com\",\"port\":9000}"));

        for _ in 0..3 {
            store.reset().unwrap();
            assert_eq!(store.read(), BackendAddress::new("127.0.0.1", 5555));
        }
    }

    #[test]
    fn test_form_validation() {
        let form = AddressForm {
            host: " localhost ".to_string(),
            port: "8080".to_string(),
        };
        assert_eq!(form.validate(), Ok(BackendAddress::new("localhost", 8080)));

        let empty_host = AddressForm {
            host: "  ".to_string(),
            port: "8080".to_string(),
        };
        assert_eq!(empty_host.validate(), Err(ValidationError::Required("Host")));

        for port in ["0", "65536", "-1", "abc", ""] {
            let form = AddressForm {
                host: "localhost".to_string(),
                port: port.to_string(),
            };
            assert_eq!(form.validate(), Err(ValidationError::InvalidPort), "port: {}", port);
        }
    }
}
