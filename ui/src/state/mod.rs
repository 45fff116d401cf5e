//! Global State Management
//!
//! The console keeps almost no global state: every screen owns its list,
//! form and selection. What is global is the backend address and the
//! client built from it, both resolved once at startup.

mod storage;

pub use storage::BrowserStorage;

use aichat_shared::{AddressStore, BackendAddress};

use crate::client::{self, ApiClient};

/// Global application state
#[derive(Clone)]
pub struct AppState {
    /// Address the client was built with
    pub address: BackendAddress,

    /// Client shared by all screens
    pub client: ApiClient,

    /// Persisted address, edited from Settings
    pub store: AddressStore<BrowserStorage>,
}

impl AppState {
    /// Read the persisted address and build the client for it
    pub fn new() -> Self {
        let store = AddressStore::new(BrowserStorage);
        let address = store.read();
        tracing::info!("Using backend {}", address.base_url());

        Self {
            client: client::connect(&address),
            address,
            store,
        }
    }

    /// Whether the saved address differs from the one in use
    pub fn reload_pending(&self) -> bool {
        self.store.read() != self.address
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
