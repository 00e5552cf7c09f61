//! Session-scoped preview URLs.
//!
//! Browser object URLs leak unless explicitly revoked, so previews here
//! are owned resources: the registry records which previews are live,
//! and a [`PreviewUrl`] revokes itself when dropped (attachment removed,
//! batch discarded, or the whole set torn down).

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use uuid::Uuid;

/// Tracks the preview URLs currently alive for one attachment set.
#[derive(Debug, Clone, Default)]
pub struct PreviewRegistry {
    live: Arc<Mutex<HashSet<Uuid>>>,
}

impl PreviewRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a new preview URL, registered as live.
    pub fn create(&self) -> PreviewUrl {
        let id = Uuid::new_v4();
        self.lock().insert(id);
        PreviewUrl {
            id,
            url: format!("preview://{id}"),
            registry: self.clone(),
        }
    }

    /// Number of previews not yet revoked.
    pub fn live_count(&self) -> usize {
        self.lock().len()
    }

    /// Whether the given preview URL is still live.
    pub fn is_live(&self, url: &str) -> bool {
        let Some(id) = url
            .strip_prefix("preview://")
            .and_then(|raw| Uuid::parse_str(raw).ok())
        else {
            return false;
        };
        self.lock().contains(&id)
    }

    fn revoke(&self, id: Uuid) {
        self.lock().remove(&id);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashSet<Uuid>> {
        // A poisoned set of live preview ids is still usable.
        self.live.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A live preview URL. Revoked on drop.
#[derive(Debug)]
pub struct PreviewUrl {
    id: Uuid,
    url: String,
    registry: PreviewRegistry,
}

impl PreviewUrl {
    /// The URL string, valid while this handle is alive.
    pub fn as_str(&self) -> &str {
        &self.url
    }
}

impl Drop for PreviewUrl {
    fn drop(&mut self) {
        self.registry.revoke(self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_previews_revoked_on_drop() {
        let registry = PreviewRegistry::new();
        let first = registry.create();
        let second = registry.create();
        assert_eq!(registry.live_count(), 2);
        assert!(registry.is_live(first.as_str()));

        let url = first.as_str().to_owned();
        drop(first);
        assert_eq!(registry.live_count(), 1);
        assert!(!registry.is_live(&url));
        assert!(registry.is_live(second.as_str()));
    }

    #[test]
    fn test_is_live_rejects_foreign_urls() {
        let registry = PreviewRegistry::new();
        assert!(!registry.is_live("https://cdn.example/a.png"));
        assert!(!registry.is_live("preview://not-a-uuid"));
    }
}
