use serde_json::{Value, json};
use std::collections::HashMap;

use crate::logging;
use crate::store::Store;

pub const READ_PARTS_KEY: &str = "readParts";
pub const COLLAPSE_STATE_KEY: &str = "collapseState";
pub const LAST_PAGE_KEY: &str = "lastPage";

/// Persistent navigation state: which pages have been read, which sidebar
/// groups are expanded, and the last visited page.
///
/// All three pieces load leniently — a missing, unreadable, or wrongly
/// shaped stored value becomes its empty default. Writes are best-effort:
/// a failed write is logged and the in-memory state stays authoritative
/// for the rest of the page view.
pub struct NavState {
    store: Box<dyn Store>,
    read: Vec<String>,
    collapse: HashMap<String, bool>,
    last_page: Option<String>,
}

impl NavState {
    pub fn load(store: Box<dyn Store>) -> Self {
        let read = match store.get(READ_PARTS_KEY) {
            Ok(Some(Value::Array(items))) => items
                .into_iter()
                .filter_map(|v| v.as_str().map(|s| s.to_string()))
                .collect(),
            Ok(_) => Vec::new(),
            Err(err) => {
                logging::warn(format!("could not load read state: {}", err));
                Vec::new()
            }
        };

        let collapse = match store.get(COLLAPSE_STATE_KEY) {
            Ok(Some(Value::Object(map))) => map
                .into_iter()
                .filter_map(|(k, v)| v.as_bool().map(|b| (k, b)))
                .collect(),
            Ok(_) => HashMap::new(),
            Err(err) => {
                logging::warn(format!("could not load collapse state: {}", err));
                HashMap::new()
            }
        };

        let last_page = match store.get(LAST_PAGE_KEY) {
            Ok(Some(Value::String(id))) if !id.is_empty() => Some(id),
            Ok(_) => None,
            Err(err) => {
                logging::warn(format!("could not load last page: {}", err));
                None
            }
        };

        Self {
            store,
            read,
            collapse,
            last_page,
        }
    }

    pub fn is_read(&self, id: &str) -> bool {
        self.read.iter().any(|r| r == id)
    }

    /// Idempotent insert. Ids are never removed again.
    pub fn mark_read(&mut self, id: &str) {
        if !self.is_read(id) {
            self.read.push(id.to_string());
        }
        let value = json!(self.read);
        self.persist(READ_PARTS_KEY, value);
    }

    /// Resolve the expanded flag for a group key, falling back to the
    /// caller's context-specific default when nothing is stored.
    pub fn is_expanded(&self, key: &str, default: bool) -> bool {
        self.collapse.get(key).copied().unwrap_or(default)
    }

    pub fn set_expanded(&mut self, key: &str, expanded: bool) {
        self.collapse.insert(key.to_string(), expanded);
        let value = json!(self.collapse);
        self.persist(COLLAPSE_STATE_KEY, value);
    }

    pub fn toggle_expanded(&mut self, key: &str, default: bool) {
        let current = self.is_expanded(key, default);
        self.set_expanded(key, !current);
    }

    pub fn record_last_page(&mut self, id: &str) {
        self.last_page = Some(id.to_string());
        self.persist(LAST_PAGE_KEY, json!(id));
    }

    pub fn last_page(&self) -> Option<&str> {
        self.last_page.as_deref()
    }

    fn persist(&mut self, key: &str, value: Value) {
        if let Err(err) = self.store.set(key, &value) {
            // Losing the most recent write on storage failure is accepted;
            // navigation must keep working regardless.
            logging::warn(format!("state write for '{}' failed: {}", key, err));
        }
    }
}
