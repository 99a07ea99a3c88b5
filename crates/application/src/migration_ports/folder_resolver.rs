use async_trait::async_trait;
use mailshift_core::AppResult;
use mailshift_domain::WellKnownFolder;

/// Port for looking up the stored (possibly localized) name of a special
/// folder in a mailbox.
#[async_trait]
pub trait WellKnownFolderResolver: Send + Sync {
    /// Returns the stored folder name, for example `Posteingang` for the
    /// inbox of a German mailbox.
    async fn resolve_folder_name(
        &self,
        mailbox: &str,
        folder: WellKnownFolder,
    ) -> AppResult<String>;
}
