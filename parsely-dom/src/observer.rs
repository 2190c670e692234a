//! Hooks for watching a decode as it happens.

use std::sync::Arc;

use parsely_core::{DecodeError, Path, Value};

use crate::Document;

/// Receives progress events from the decode engine.
///
/// Every method has an empty default, so implementors only override what
/// they care about. Observers are shared behind an `Arc` and must be
/// `Send + Sync`.
pub trait DecodeObserver: Send + Sync {
    /// The tree builder finished; decoding is about to start.
    fn document_built(&self, document: &Document) {
        let _ = document;
    }

    /// The engine is about to decode the field at `path`.
    fn enter_field(&self, path: &Path) {
        let _ = path;
    }

    /// A scalar field was coerced.
    fn scalar_decoded(&self, path: &Path, value: &Value) {
        let _ = (path, value);
    }

    /// A sequence field was decoded with `len` elements.
    fn sequence_decoded(&self, path: &Path, len: usize) {
        let _ = (path, len);
    }

    /// An optional field was absent and decoded to `Null`.
    fn field_absent(&self, path: &Path) {
        let _ = path;
    }

    /// Decoding failed; no further events follow.
    fn failed(&self, error: &DecodeError) {
        let _ = error;
    }
}

impl<T: DecodeObserver + ?Sized> DecodeObserver for Arc<T> {
    fn document_built(&self, document: &Document) {
        (**self).document_built(document)
    }

    fn enter_field(&self, path: &Path) {
        (**self).enter_field(path)
    }

    fn scalar_decoded(&self, path: &Path, value: &Value) {
        (**self).scalar_decoded(path, value)
    }

    fn sequence_decoded(&self, path: &Path, len: usize) {
        (**self).sequence_decoded(path, len)
    }

    fn field_absent(&self, path: &Path) {
        (**self).field_absent(path)
    }

    fn failed(&self, error: &DecodeError) {
        (**self).failed(error)
    }
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl DecodeObserver for NoopObserver {}

/// Observer that reports each event through `tracing` at debug level.
#[cfg(feature = "tracing")]
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

#[cfg(feature = "tracing")]
impl DecodeObserver for TracingObserver {
    fn document_built(&self, document: &Document) {
        tracing::debug!(root = document.root_tag(), empty = document.is_empty(), "document built");
    }

    fn enter_field(&self, path: &Path) {
        tracing::trace!(%path, "enter field");
    }

    fn scalar_decoded(&self, path: &Path, value: &Value) {
        tracing::debug!(%path, kind = value.kind_name(), ?value, "scalar");
    }

    fn sequence_decoded(&self, path: &Path, len: usize) {
        tracing::debug!(%path, len, "sequence");
    }

    fn field_absent(&self, path: &Path) {
        tracing::debug!(%path, "optional field absent");
    }

    fn failed(&self, error: &DecodeError) {
        tracing::debug!(path = %error.path(), kind = %error.kind(), %error, "decode failed");
    }
}
