use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use tracing::warn;

/// Storage keys for the saved login. The names match what the service's web
/// frontend keeps in local storage.
pub const STORAGE_KEY: &str = "votacao_user_name";
pub const ADMIN_KEY: &str = "votacao_is_admin";

/// Key-value session storage with browser-local-storage semantics: reads
/// and writes never fail from the caller's point of view.
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
}

/// Session store persisted as a small JSON object on disk, so the login
/// survives restarts.
pub struct FileSessionStore {
    path: PathBuf,
    values: HashMap<String, String>,
}

impl FileSessionStore {
    /// Opens the store at `path`. A missing or unreadable file starts a
    /// fresh session rather than failing.
    pub fn open(path: &str) -> Self {
        let path = PathBuf::from(path);
        let values = match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(values) => values,
                Err(e) => {
                    warn!("session file {} is not valid JSON, starting empty: {e}", path.display());
                    HashMap::new()
                }
            },
            Err(_) => HashMap::new(),
        };
        FileSessionStore { path, values }
    }

    fn persist(&self) {
        match serde_json::to_string_pretty(&self.values) {
            Ok(content) => {
                if let Err(e) = fs::write(&self.path, content) {
                    warn!("could not write session file {}: {e}", self.path.display());
                }
            }
            Err(e) => warn!("could not encode session values: {e}"),
        }
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
        self.persist();
    }

    fn remove(&mut self, key: &str) {
        self.values.remove(key);
        self.persist();
    }
}

/// In-memory store, the test double for anything that takes a
/// `SessionStore`.
#[cfg(test)]
#[derive(Default)]
pub struct MemorySessionStore {
    values: HashMap<String, String>,
}

#[cfg(test)]
impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }
}

pub fn set_current_user(store: &mut dyn SessionStore, name: &str) {
    store.set(STORAGE_KEY, name);
}

pub fn current_user(store: &dyn SessionStore) -> Option<String> {
    store.get(STORAGE_KEY)
}

pub fn clear_current_user(store: &mut dyn SessionStore) {
    store.remove(STORAGE_KEY);
}

/// The admin flag is stored as the strings "1"/"0", the same encoding the
/// web frontend uses.
pub fn set_admin_flag(store: &mut dyn SessionStore, is_admin: bool) {
    store.set(ADMIN_KEY, if is_admin { "1" } else { "0" });
}

/// Anything other than a stored "1" counts as not-admin.
pub fn admin_flag(store: &dyn SessionStore) -> bool {
    store.get(ADMIN_KEY).as_deref() == Some("1")
}

pub fn clear_admin_flag(store: &mut dyn SessionStore) {
    store.remove(ADMIN_KEY);
}

/// Returns the stored user name; `None` means the caller must bail out to
/// the login screen.
pub fn require_auth(store: &dyn SessionStore) -> Option<String> {
    current_user(store).filter(|name| !name.is_empty())
}

/// Drops the whole stored session. The caller navigates back to login.
pub fn logout(store: &mut dyn SessionStore) {
    clear_current_user(store);
    clear_admin_flag(store);
}
