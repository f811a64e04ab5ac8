pub mod runner;
#[cfg(target_arch = "wasm32")]
pub mod storage;

pub use runner::{ArcadeRunner, RunnerError};
pub use stemplay_engine;
#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorageStore;

/// Seed for mock account ids. Not meant to be unpredictable.
pub fn entropy_seed() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        let now = js_sys::Date::now() as u64;
        let noise = (js_sys::Math::random() * u32::MAX as f64) as u64;
        now ^ (noise << 20)
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0x9e37_79b9)
    }
}

/// Generate all `#[wasm_bindgen]` exports for an arcade.
///
/// Generates:
/// - `thread_local!` storage for the ArcadeRunner
/// - `with_runner()` helper function
/// - All wasm-bindgen exports (arcade_init, arcade_tick, actions, accounts, view data)
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
/// use stemplay_web::LocalStorageStore;
///
/// stemplay_web::export_arcade!(LocalStorageStore, LocalStorageStore::open(), "my-arcade");
/// ```
///
/// # Arguments
///
/// - `$store_type`: a type implementing `stemplay_engine::SessionStore`
/// - `$make_store`: expression building the store at init
/// - `$arcade_name`: a string literal used in the initialization log message
///
/// Fallible exports return `false` and leave the message for `arcade_last_error`.
#[macro_export]
macro_rules! export_arcade {
    ($store_type:ty, $make_store:expr, $arcade_name:literal) => {
        use std::cell::RefCell;
        use $crate::stemplay_engine::PlayerAction;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::ArcadeRunner<$store_type>>> = RefCell::new(None);
        }

        fn with_runner<R>(f: impl FnOnce(&mut $crate::ArcadeRunner<$store_type>) -> R) -> R {
            RUNNER.with(|cell| {
                let mut borrow = cell.borrow_mut();
                let runner = borrow.as_mut().expect("Arcade not initialized. Call arcade_init() first.");
                f(runner)
            })
        }

        fn report(result: Result<(), $crate::RunnerError>) -> bool {
            match result {
                Ok(()) => true,
                Err(err) => {
                    with_runner(|r| r.set_last_error(&err));
                    false
                }
            }
        }

        /// Initialize with the built-in catalog, or with `catalog_json` when non-empty.
        #[wasm_bindgen]
        pub fn arcade_init(catalog_json: &str) -> bool {
            #[cfg(target_arch = "wasm32")]
            {
                console_error_panic_hook::set_once();
                let _ = console_log::init_with_level(log::Level::Info);
            }

            let catalog = if catalog_json.trim().is_empty() {
                $crate::stemplay_engine::Catalog::builtin()
            } else {
                $crate::stemplay_engine::Catalog::from_json(catalog_json)
            };
            let catalog = match catalog {
                Ok(catalog) => catalog,
                Err(err) => {
                    log::error!("{}: catalog failed to load: {}", $arcade_name, err);
                    return false;
                }
            };
            let games = catalog.len();
            let runner = $crate::ArcadeRunner::new(catalog, $make_store, $crate::entropy_seed());

            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });
            log::info!("{}: initialized with {} games", $arcade_name, games);
            true
        }

        #[wasm_bindgen]
        pub fn arcade_tick(dt: f32) {
            with_runner(|r| r.tick(dt));
        }

        #[wasm_bindgen]
        pub fn arcade_open(game_id: &str) -> bool {
            let result = with_runner(|r| r.open(game_id));
            report(result)
        }

        #[wasm_bindgen]
        pub fn arcade_abandon() {
            with_runner(|r| r.abandon());
        }

        // ---- Actions ----

        #[wasm_bindgen]
        pub fn arcade_select_answer(choice: u32) {
            with_runner(|r| r.push_action(PlayerAction::SelectAnswer { choice: choice as usize }));
        }

        #[wasm_bindgen]
        pub fn arcade_advance() {
            with_runner(|r| r.push_action(PlayerAction::Advance));
        }

        #[wasm_bindgen]
        pub fn arcade_toggle_hint() {
            with_runner(|r| r.push_action(PlayerAction::ToggleHint));
        }

        #[wasm_bindgen]
        pub fn arcade_toggle_cell(row: u32, col: u32) {
            with_runner(|r| {
                r.push_action(PlayerAction::ToggleCell {
                    row: row as usize,
                    col: col as usize,
                })
            });
        }

        #[wasm_bindgen]
        pub fn arcade_check_selection() {
            with_runner(|r| r.push_action(PlayerAction::CheckSelection));
        }

        #[wasm_bindgen]
        pub fn arcade_clear_selection() {
            with_runner(|r| r.push_action(PlayerAction::ClearSelection));
        }

        #[wasm_bindgen]
        pub fn arcade_click_tile(index: u32) {
            with_runner(|r| r.push_action(PlayerAction::ClickTile { index: index as usize }));
        }

        #[wasm_bindgen]
        pub fn arcade_shuffle() {
            with_runner(|r| r.push_action(PlayerAction::Shuffle));
        }

        #[wasm_bindgen]
        pub fn arcade_complete_step() {
            with_runner(|r| r.push_action(PlayerAction::CompleteStep));
        }

        // ---- Accounts ----

        #[wasm_bindgen]
        pub fn arcade_login(email: &str, password: &str, role: &str) -> bool {
            let result = with_runner(|r| r.login(email, password, role));
            report(result)
        }

        /// `grade` of 0 means "not given".
        #[wasm_bindgen]
        pub fn arcade_register(name: &str, email: &str, password: &str, role: &str, grade: u8) -> bool {
            let grade = (grade > 0).then_some(grade);
            let result = with_runner(|r| r.register(name, email, password, role, grade));
            report(result)
        }

        #[wasm_bindgen]
        pub fn arcade_logout() -> bool {
            let result = with_runner(|r| r.logout());
            report(result)
        }

        #[wasm_bindgen]
        pub fn arcade_set_language(language: &str) -> bool {
            let result = with_runner(|r| r.set_language(language));
            report(result)
        }

        // ---- Assistant ----

        /// Returns the bot reply, or an empty string for blank input.
        #[wasm_bindgen]
        pub fn arcade_ask(text: &str) -> String {
            with_runner(|r| r.ask(text)).unwrap_or_default()
        }

        // ---- View data (JSON) ----

        #[wasm_bindgen]
        pub fn arcade_snapshot_json() -> String {
            with_runner(|r| r.snapshot_json())
        }

        #[wasm_bindgen]
        pub fn arcade_result_json() -> String {
            with_runner(|r| r.result_json())
        }

        #[wasm_bindgen]
        pub fn arcade_catalog_json() -> String {
            with_runner(|r| r.catalog_json())
        }

        #[wasm_bindgen]
        pub fn arcade_user_json() -> String {
            with_runner(|r| r.user_json())
        }

        #[wasm_bindgen]
        pub fn arcade_chat_json() -> String {
            with_runner(|r| r.chat_json())
        }

        #[wasm_bindgen]
        pub fn arcade_roster_json() -> String {
            with_runner(|r| r.roster_json())
        }

        #[wasm_bindgen]
        pub fn arcade_overview_json() -> String {
            with_runner(|r| r.overview_json())
        }

        #[wasm_bindgen]
        pub fn arcade_last_error() -> String {
            with_runner(|r| r.take_last_error()).unwrap_or_default()
        }

        // ---- Event buffer accessors ----

        #[wasm_bindgen]
        pub fn get_session_events_ptr() -> *const f32 {
            with_runner(|r| r.events_ptr())
        }

        #[wasm_bindgen]
        pub fn get_session_events_len() -> u32 {
            with_runner(|r| r.events_len())
        }

        #[wasm_bindgen]
        pub fn get_max_events() -> u32 {
            with_runner(|r| r.max_events())
        }
    };
}
