use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
stemplay_web::export_arcade!(
    stemplay_web::LocalStorageStore,
    stemplay_web::LocalStorageStore::open(),
    "stem-arcade"
);

// Native builds (tests, tooling) keep the user in memory.
#[cfg(not(target_arch = "wasm32"))]
stemplay_web::export_arcade!(
    stemplay_engine::MemoryStore,
    stemplay_engine::MemoryStore::new(),
    "stem-arcade"
);
