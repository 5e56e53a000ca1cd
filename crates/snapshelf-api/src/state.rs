//! Application state shared by every handler.

use snapshelf_core::{Config, UploadValidator};
use snapshelf_storage::ObjectStore;
use std::sync::Arc;

/// Immutable after startup; handlers receive it as `State<Arc<AppState>>`.
pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn ObjectStore>,
    pub validator: UploadValidator,
}

impl AppState {
    pub fn new(config: Config, store: Arc<dyn ObjectStore>) -> Self {
        let validator = UploadValidator::new(config.max_file_size_bytes);
        Self {
            config,
            store,
            validator,
        }
    }

    /// Body limit for upload requests: the file limit plus multipart framing.
    pub fn max_request_bytes(&self) -> usize {
        usize::try_from(self.validator.max_bytes())
            .unwrap_or(usize::MAX)
            .saturating_add(crate::constants::MULTIPART_OVERHEAD_BYTES)
    }
}
