use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use mailshift_application::WellKnownFolderResolver;
use mailshift_core::{AppError, AppResult, identity_key};
use mailshift_domain::WellKnownFolder;

/// Offline folder resolver backed by a name table.
///
/// Mailboxes without an entry use the unlocalized folder names. The JSON
/// table maps mailbox addresses to scope keywords and stored names:
///
/// ```json
/// { "shared@example.com": { "Inbox": "Posteingang", "SentItems": "Gesendete Elemente" } }
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticWellKnownFolderResolver {
    names: HashMap<String, HashMap<WellKnownFolder, String>>,
}

impl StaticWellKnownFolderResolver {
    /// Creates a resolver that always answers with unlocalized names.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a stored name for one mailbox folder.
    #[must_use]
    pub fn with_name(mut self, mailbox: &str, folder: WellKnownFolder, name: &str) -> Self {
        self.names
            .entry(identity_key(mailbox))
            .or_default()
            .insert(folder, name.to_owned());
        self
    }

    /// Loads a name table from a JSON file.
    pub fn from_json_file(path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|error| {
            AppError::Internal(format!(
                "failed to read folder name table '{}': {error}",
                path.display()
            ))
        })?;

        Self::from_json_str(contents.as_str())
    }

    /// Parses a name table from JSON text.
    pub fn from_json_str(contents: &str) -> AppResult<Self> {
        let table: HashMap<String, HashMap<String, String>> = serde_json::from_str(contents)
            .map_err(|error| {
                AppError::Validation(format!("invalid folder name table: {error}"))
            })?;

        let mut resolver = Self::new();
        for (mailbox, folders) in table {
            for (scope, name) in folders {
                let folder = WellKnownFolder::from_scope(scope.as_str()).ok_or_else(|| {
                    AppError::Validation(format!(
                        "unknown folder scope '{scope}' for mailbox '{mailbox}'"
                    ))
                })?;
                resolver = resolver.with_name(mailbox.as_str(), folder, name.as_str());
            }
        }

        Ok(resolver)
    }
}

#[async_trait]
impl WellKnownFolderResolver for StaticWellKnownFolderResolver {
    async fn resolve_folder_name(
        &self,
        mailbox: &str,
        folder: WellKnownFolder,
    ) -> AppResult<String> {
        Ok(self
            .names
            .get(&identity_key(mailbox))
            .and_then(|folders| folders.get(&folder))
            .cloned()
            .unwrap_or_else(|| folder.default_name().to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use mailshift_application::WellKnownFolderResolver;
    use mailshift_domain::WellKnownFolder;

    use super::StaticWellKnownFolderResolver;

    #[tokio::test]
    async fn unknown_mailbox_gets_default_names() {
        let resolver = StaticWellKnownFolderResolver::new();

        let name = resolver
            .resolve_folder_name("shared@x.com", WellKnownFolder::SentItems)
            .await;
        assert_eq!(name.unwrap_or_default(), "Sent Items");
    }

    #[tokio::test]
    async fn json_table_overrides_names_case_insensitively() {
        let resolver = StaticWellKnownFolderResolver::from_json_str(
            r#"{ "Shared@X.com": { "Inbox": "Posteingang", "calendar": "Kalender" } }"#,
        )
        .unwrap_or_default();

        let inbox = resolver
            .resolve_folder_name("shared@x.com", WellKnownFolder::Inbox)
            .await;
        let calendar = resolver
            .resolve_folder_name("SHARED@x.com", WellKnownFolder::Calendar)
            .await;
        let tasks = resolver
            .resolve_folder_name("shared@x.com", WellKnownFolder::Tasks)
            .await;

        assert_eq!(inbox.unwrap_or_default(), "Posteingang");
        assert_eq!(calendar.unwrap_or_default(), "Kalender");
        assert_eq!(tasks.unwrap_or_default(), "Tasks");
    }

    #[test]
    fn unknown_scope_is_rejected() {
        let result = StaticWellKnownFolderResolver::from_json_str(
            r#"{ "shared@x.com": { "Junk": "Spam" } }"#,
        );
        assert!(result.is_err());
    }
}
