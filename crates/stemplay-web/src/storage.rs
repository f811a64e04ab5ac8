use stemplay_engine::{SessionStore, StoreError, User};
use wasm_bindgen::JsValue;

/// `localStorage` key holding the signed-in user.
pub const USER_KEY: &str = "nextgen_user";

/// Persists the user in the browser's `localStorage`.
///
/// When storage is unavailable (private mode, sandboxed iframe) the store
/// keeps the user in memory only.
pub struct LocalStorageStore {
    storage: Option<web_sys::Storage>,
    user: Option<User>,
}

impl LocalStorageStore {
    pub fn open() -> Self {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        let Some(storage) = storage else {
            log::warn!("localStorage unavailable, user will not persist");
            return Self { storage: None, user: None };
        };
        let user = match storage.get_item(USER_KEY) {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(user) => Some(user),
                Err(err) => {
                    log::warn!("discarding unreadable {}: {}", USER_KEY, err);
                    None
                }
            },
            Ok(None) => None,
            Err(err) => {
                log::warn!("failed to read {}: {:?}", USER_KEY, err);
                None
            }
        };
        Self {
            storage: Some(storage),
            user,
        }
    }
}

fn backend(err: JsValue) -> StoreError {
    StoreError::Backend(format!("{:?}", err))
}

impl SessionStore for LocalStorageStore {
    fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    fn set_user(&mut self, user: User) -> Result<(), StoreError> {
        if let Some(storage) = &self.storage {
            storage.set_item(USER_KEY, &serde_json::to_string(&user)?).map_err(backend)?;
        }
        self.user = Some(user);
        Ok(())
    }

    fn clear_user(&mut self) -> Result<(), StoreError> {
        if let Some(storage) = &self.storage {
            storage.remove_item(USER_KEY).map_err(backend)?;
        }
        self.user = None;
        Ok(())
    }
}
