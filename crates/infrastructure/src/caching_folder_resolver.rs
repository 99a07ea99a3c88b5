use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use mailshift_application::WellKnownFolderResolver;
use mailshift_core::{AppResult, identity_key};
use mailshift_domain::WellKnownFolder;
use tokio::sync::RwLock;
use tracing::debug;

/// Run-scoped cache in front of another folder resolver.
///
/// Successful lookups are kept per `(mailbox, folder)` for the lifetime of
/// the cache; failures are not cached.
pub struct CachingWellKnownFolderResolver {
    inner: Arc<dyn WellKnownFolderResolver>,
    entries: RwLock<HashMap<(String, WellKnownFolder), String>>,
}

impl CachingWellKnownFolderResolver {
    /// Wraps a resolver with an empty cache.
    #[must_use]
    pub fn new(inner: Arc<dyn WellKnownFolderResolver>) -> Self {
        Self {
            inner,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Returns how many lookups are cached.
    pub async fn cached_entries(&self) -> usize {
        self.entries.read().await.len()
    }
}

#[async_trait]
impl WellKnownFolderResolver for CachingWellKnownFolderResolver {
    async fn resolve_folder_name(
        &self,
        mailbox: &str,
        folder: WellKnownFolder,
    ) -> AppResult<String> {
        let key = (identity_key(mailbox), folder);

        if let Some(name) = self.entries.read().await.get(&key) {
            debug!(mailbox, scope = folder.scope(), "folder name cache hit");
            return Ok(name.clone());
        }

        let name = self.inner.resolve_folder_name(mailbox, folder).await?;
        self.entries.write().await.insert(key, name.clone());

        Ok(name)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use mailshift_application::WellKnownFolderResolver;
    use mailshift_core::{AppError, AppResult};
    use mailshift_domain::WellKnownFolder;

    use super::CachingWellKnownFolderResolver;

    #[derive(Default)]
    struct CountingResolver {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl WellKnownFolderResolver for CountingResolver {
        async fn resolve_folder_name(
            &self,
            _mailbox: &str,
            folder: WellKnownFolder,
        ) -> AppResult<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(AppError::External("service unavailable".to_owned()));
            }
            Ok(format!("{}-localized", folder.scope()))
        }
    }

    #[tokio::test]
    async fn repeated_lookup_hits_inner_resolver_once() {
        let inner = Arc::new(CountingResolver::default());
        let cache = CachingWellKnownFolderResolver::new(inner.clone());

        let first = cache
            .resolve_folder_name("shared@x.com", WellKnownFolder::Inbox)
            .await;
        let second = cache
            .resolve_folder_name("Shared@X.com", WellKnownFolder::Inbox)
            .await;
        let other = cache
            .resolve_folder_name("shared@x.com", WellKnownFolder::Calendar)
            .await;

        assert_eq!(first.unwrap_or_default(), "Inbox-localized");
        assert_eq!(second.unwrap_or_default(), "Inbox-localized");
        assert_eq!(other.unwrap_or_default(), "Calendar-localized");
        assert_eq!(inner.calls.load(Ordering::SeqCst), 2);
        assert_eq!(cache.cached_entries().await, 2);
    }

    #[tokio::test]
    async fn failures_are_retried_on_next_lookup() {
        let inner = Arc::new(CountingResolver {
            calls: AtomicUsize::new(0),
            fail: true,
        });
        let cache = CachingWellKnownFolderResolver::new(inner.clone());

        for _ in 0..2 {
            let result = cache
                .resolve_folder_name("shared@x.com", WellKnownFolder::Tasks)
                .await;
            assert!(result.is_err());
        }

        assert_eq!(inner.calls.load(Ordering::SeqCst), 2);
        assert_eq!(cache.cached_entries().await, 0);
    }
}
