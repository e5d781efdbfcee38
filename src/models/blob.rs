//! Blob payloads and the metadata the store returns for them.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A named payload to upload: bytes plus the content type sent with them.
///
/// The demo only ever builds two payload shapes, a short text literal for
/// the round-trip operation and a large repeated-byte block for the
/// multipart operation, so the constructors cover exactly those.
#[derive(Clone, Debug)]
pub struct Blob {
    /// Blob name (a single path segment within its container).
    pub name: String,

    /// The payload bytes.
    pub payload: Bytes,

    /// Content type (MIME type) recorded with the upload.
    pub content_type: String,
}

impl Blob {
    /// Blob over a text literal.
    pub fn text(
        name: impl Into<String>,
        body: impl Into<String>,
        content_type: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            payload: Bytes::from(body.into().into_bytes()),
            content_type: content_type.into(),
        }
    }

    /// Blob of `len` copies of `byte`, used to synthesize multipart input
    /// above the backend's minimum part size.
    pub fn repeated(
        name: impl Into<String>,
        byte: u8,
        len: usize,
        content_type: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            payload: Bytes::from(vec![byte; len]),
            content_type: content_type.into(),
        }
    }

    /// Content length in bytes.
    pub fn size_bytes(&self) -> u64 {
        self.payload.len() as u64
    }
}

/// What the store reported back for a completed upload.
#[derive(Serialize, Clone, Debug)]
pub struct PutReceipt {
    /// Integrity tag (etag) computed by the backend, when it returns one.
    pub etag: Option<String>,

    /// Backend version identifier, when versioning applies.
    pub version: Option<String>,

    /// Bytes uploaded.
    pub size: u64,
}

/// A blob read back from the store: payload plus the metadata kept for it.
#[derive(Clone, Debug)]
pub struct RetrievedBlob {
    /// The payload bytes.
    pub payload: Bytes,

    /// Size reported by the backend.
    pub size: u64,

    /// Integrity tag, when the backend keeps one.
    pub etag: Option<String>,

    /// Last-modified timestamp reported by the backend.
    pub last_modified: DateTime<Utc>,

    /// Present when the backend stores put attributes (GCS, in-memory);
    /// the local filesystem store does not.
    pub content_type: Option<String>,
}

impl RetrievedBlob {
    /// Payload decoded as UTF-8 text, replacement characters for anything
    /// that is not.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.payload).into_owned()
    }
}
