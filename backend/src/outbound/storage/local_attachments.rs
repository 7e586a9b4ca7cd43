//! Capability-scoped local attachment storage.
//!
//! Files land in a single uploads directory opened once at startup; the
//! handle cannot reach outside it. Stored names are random UUIDs keeping the
//! original extension, so client-supplied names never touch the filesystem.

use std::path::Path;

use cap_std::{ambient_authority, fs::Dir};
use tracing::info;
use uuid::Uuid;

use crate::domain::ports::{AttachmentStore, AttachmentStoreError};

/// Attachment store writing into a capability-scoped directory.
pub struct LocalAttachmentStore {
    dir: Dir,
    public_prefix: String,
}

impl LocalAttachmentStore {
    /// Open (creating if needed) the uploads directory.
    ///
    /// `public_prefix` is the path segment recorded on idea rows, e.g.
    /// `uploads`.
    pub fn open(
        path: impl AsRef<Path>,
        public_prefix: impl Into<String>,
    ) -> std::io::Result<Self> {
        let path = path.as_ref();
        Dir::create_ambient_dir_all(path, ambient_authority())?;
        let dir = Dir::open_ambient_dir(path, ambient_authority())?;
        Ok(Self {
            dir,
            public_prefix: public_prefix.into(),
        })
    }

    fn storage_name(original_name: &str) -> String {
        let extension = Path::new(original_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| format!(".{ext}"))
            .unwrap_or_default();
        format!("{}{extension}", Uuid::new_v4())
    }
}

impl AttachmentStore for LocalAttachmentStore {
    fn save(&self, original_name: &str, bytes: &[u8]) -> Result<String, AttachmentStoreError> {
        let name = Self::storage_name(original_name);
        self.dir
            .write(&name, bytes)
            .map_err(|err| AttachmentStoreError::write(err.to_string()))?;
        info!(file = %name, size = bytes.len(), "attachment stored");
        Ok(format!("{}/{name}", self.public_prefix))
    }
}
