//! Progress reporting for layer downloads.
//!
//! Decouples the fetcher from any rendering backend. The CLI renders an
//! `indicatif` spinner; the server and tests use [`NullProgress`].

use std::sync::Arc;

/// Receives status updates while a layer is downloaded and decoded.
///
/// Implementations must be `Send + Sync` so a source can be shared behind
/// an `Arc` across request handlers.
pub trait ProgressCallback: Send + Sync {
    /// A download has started.
    fn started(&self, msg: String);

    /// The current step changed (e.g. from downloading to decoding).
    fn set_message(&self, msg: String);

    /// The download finished successfully.
    fn finished(&self, msg: String);

    /// The download failed.
    fn failed(&self, msg: String);
}

/// Ignores every update.
pub struct NullProgress;

impl ProgressCallback for NullProgress {
    fn started(&self, _msg: String) {}
    fn set_message(&self, _msg: String) {}
    fn finished(&self, _msg: String) {}
    fn failed(&self, _msg: String) {}
}

/// Returns a shared [`NullProgress`] instance.
#[must_use]
pub fn null_progress() -> Arc<dyn ProgressCallback> {
    Arc::new(NullProgress)
}
