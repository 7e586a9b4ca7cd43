//! Port abstraction for idea attachment storage.

use super::define_port_error;

define_port_error! {
    /// Failures raised by attachment storage adapters.
    pub enum AttachmentStoreError {
        /// The file could not be written.
        Write { message: String } => "attachment write failed: {message}",
    }
}

/// Driven port writing uploaded attachment bytes to local storage.
///
/// The write has no transactional linkage to the idea row; a crash between
/// the two leaves an orphaned file, which is an accepted edge case.
pub trait AttachmentStore: Send + Sync {
    /// Store the bytes under a random name that keeps the original
    /// extension; returns the relative path recorded on the idea.
    fn save(&self, original_name: &str, bytes: &[u8]) -> Result<String, AttachmentStoreError>;
}
