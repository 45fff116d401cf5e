//! Browser tests; run with `wasm-pack test --headless --chrome ui`

use aichat_console_ui::state::BrowserStorage;
use aichat_shared::{AddressStore, BackendAddress, KeyValueStore, BACKEND_CONFIG_KEY};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn test_address_survives_in_local_storage() {
    let store = AddressStore::new(BrowserStorage);
    store.reset().unwrap();
    assert_eq!(store.read(), BackendAddress::default());

    let address = BackendAddress::new("10.0.0.2", 8080);
    store.write(&address).unwrap();

    // A fresh handle sees the same record
    let reopened = AddressStore::new(BrowserStorage);
    assert_eq!(reopened.read(), address);
    assert_eq!(reopened.resolve_base_url(), "http://10.0.0.2:8080");

    store.reset().unwrap();
}

#[wasm_bindgen_test]
fn test_garbage_in_local_storage_reads_as_default() {
    BrowserStorage
        .set_item(BACKEND_CONFIG_KEY, "{not json")
        .unwrap();

    let store = AddressStore::new(BrowserStorage);
    assert_eq!(store.read(), BackendAddress::default());

    store.reset().unwrap();
}
