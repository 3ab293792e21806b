//! The detected-media download panel's state and fetch logic.
//!
//! Each detected resource moves through `Pending → Downloading → Completed`.
//! A failed fetch reverts the entry to `Pending` so the user can retry, and
//! the failure is surfaced as a dismissible notice rather than an error
//! state. Completed ids are remembered for the session so a re-detected
//! resource keeps showing as downloaded.

use std::collections::HashSet;
use std::path::PathBuf;

use droidweb_nav::VideoResource;

/// Per-resource download state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadState {
    Pending,
    Downloading,
    Completed,
}

/// A detected resource plus its download state.
#[derive(Debug, Clone)]
pub struct DownloadEntry {
    pub resource: VideoResource,
    pub state: DownloadState,
}

/// Download failures. Never fatal; the UI turns them into notices.
#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Tracks the panel's entries and where fetched bytes land.
#[derive(Debug)]
pub struct DownloadManager {
    entries: Vec<DownloadEntry>,
    completed: HashSet<String>,
    download_dir: Option<PathBuf>,
}

impl DownloadManager {
    pub fn new() -> Self {
        let download_dir = dirs::download_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join("Downloads")));
        Self {
            entries: Vec::new(),
            completed: HashSet::new(),
            download_dir,
        }
    }

    /// Replace the entry list with the media detected on the current page.
    ///
    /// Ids already downloaded this session come back as `Completed`.
    pub fn sync(&mut self, resources: &[VideoResource]) {
        self.entries = resources
            .iter()
            .cloned()
            .map(|resource| {
                let state = if self.completed.contains(&resource.id) {
                    DownloadState::Completed
                } else {
                    DownloadState::Pending
                };
                DownloadEntry { resource, state }
            })
            .collect();
    }

    pub fn entries(&self) -> &[DownloadEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn download_dir(&self) -> Option<PathBuf> {
        self.download_dir.clone()
    }

    /// Mark an entry as downloading and hand back its resource for the
    /// fetch. Entries already downloading or completed are left alone.
    pub fn begin(&mut self, id: &str) -> Option<VideoResource> {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.resource.id == id && e.state == DownloadState::Pending)?;
        entry.state = DownloadState::Downloading;
        Some(entry.resource.clone())
    }

    /// Completion: the entry stays completed for the rest of the session.
    pub fn finish(&mut self, id: &str) {
        self.completed.insert(id.to_string());
        if let Some(entry) = self.entries.iter_mut().find(|e| e.resource.id == id) {
            entry.state = DownloadState::Completed;
        }
    }

    /// Failure: revert to pending so retry remains possible.
    pub fn fail(&mut self, id: &str) {
        if let Some(entry) = self
            .entries
            .iter_mut()
            .find(|e| e.resource.id == id && e.state == DownloadState::Downloading)
        {
            entry.state = DownloadState::Pending;
        }
    }
}

impl Default for DownloadManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Fetch a resource's bytes and save them into `dir`.
pub async fn fetch(resource: VideoResource, dir: PathBuf) -> Result<PathBuf, DownloadError> {
    log::info!("downloading {} from {}", resource.title, resource.url);

    let response = reqwest::get(&resource.url).await?.error_for_status()?;
    let bytes = response.bytes().await?;

    tokio::fs::create_dir_all(&dir).await?;
    let path = dir.join(file_name_for(&resource));
    tokio::fs::write(&path, &bytes).await?;

    log::info!("saved {} ({} bytes)", path.display(), bytes.len());
    Ok(path)
}

/// Filename derived from the resource title, with the extension taken from
/// the MIME subtype.
fn file_name_for(resource: &VideoResource) -> String {
    let stem: String = resource
        .title
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '\0' => '-',
            other => other,
        })
        .collect();
    let stem = stem.trim();
    let stem = if stem.is_empty() { "video" } else { stem };

    let extension = resource
        .mime_type
        .split('/')
        .nth(1)
        .filter(|ext| !ext.is_empty())
        .unwrap_or("mp4");

    format!("{}.{}", stem, extension)
}

#[cfg(test)]
mod tests {
    use super::*;
    use droidweb_nav::detect_media;

    fn demo_resources() -> Vec<VideoResource> {
        detect_media("https://example.com/?demo=true")
    }

    #[test]
    fn test_sync_starts_entries_pending() {
        let mut manager = DownloadManager::new();
        manager.sync(&demo_resources());
        assert_eq!(manager.len(), 1);
        assert_eq!(manager.entries()[0].state, DownloadState::Pending);
    }

    #[test]
    fn test_begin_marks_downloading_once() {
        let mut manager = DownloadManager::new();
        manager.sync(&demo_resources());

        assert!(manager.begin("demo-vid-1").is_some());
        assert_eq!(manager.entries()[0].state, DownloadState::Downloading);
        // Already in flight; a second begin is refused.
        assert!(manager.begin("demo-vid-1").is_none());
    }

    #[test]
    fn test_failure_reverts_to_pending_for_retry() {
        let mut manager = DownloadManager::new();
        manager.sync(&demo_resources());

        manager.begin("demo-vid-1");
        manager.fail("demo-vid-1");
        assert_eq!(manager.entries()[0].state, DownloadState::Pending);
        assert!(manager.begin("demo-vid-1").is_some());
    }

    #[test]
    fn test_completed_ids_survive_resync() {
        let mut manager = DownloadManager::new();
        manager.sync(&demo_resources());

        manager.begin("demo-vid-1");
        manager.finish("demo-vid-1");
        assert_eq!(manager.entries()[0].state, DownloadState::Completed);

        // A new navigation re-detects the same resource.
        manager.sync(&demo_resources());
        assert_eq!(manager.entries()[0].state, DownloadState::Completed);
    }

    #[test]
    fn test_file_name_uses_title_and_mime() {
        let resource = &demo_resources()[0];
        assert_eq!(file_name_for(resource), "Flower Blooming (Demo).mp4");
    }
}
