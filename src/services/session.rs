//! The session layer wraps one `object_store` client for the configured
//! store URL and exposes the handful of operations the demo needs.
//!
//! Containers are modelled as path prefixes. Creating one writes a
//! zero-byte marker object so the container is observable even while
//! empty; deleting one removes everything under the prefix, marker
//! included.

use std::sync::Arc;

use futures::StreamExt;
use object_store::gcp::GoogleCloudStorageBuilder;
use object_store::path::Path;
use object_store::{
    Attribute, Attributes, ObjectStore, ObjectStoreScheme, PutPayload, WriteMultipart, parse_url,
};
use tracing::{debug, info};
use url::Url;

use crate::config::DemoConfig;
use crate::errors::{StoreError, StoreResult};
use crate::models::blob::{Blob, PutReceipt, RetrievedBlob};
use crate::models::container::ContainerName;

/// Zero-byte object that materializes an otherwise empty container.
const CONTAINER_MARKER: &str = ".container";

/// An open session against one blob store.
///
/// Opening a session is purely local work; the backend authenticates
/// lazily on the first request. Dropping the session releases the
/// client, and every exit path of the program reaches that drop
/// exactly once.
pub struct StoreSession {
    store: Arc<dyn ObjectStore>,
    base: Path,
    account: String,
    supports_attributes: bool,
}

impl StoreSession {
    /// Open a session for `config.store_url`.
    ///
    /// `gs://` URLs get the service account key injected into the GCS
    /// builder. Every other scheme is resolved through
    /// [`object_store::parse_url`] and ignores the key material, which
    /// keeps the demo runnable against `memory:///` and `file://`
    /// stores without real credentials.
    pub fn open(
        config: &DemoConfig,
        account: &str,
        service_account_key: &str,
    ) -> StoreResult<Self> {
        let url = Url::parse(&config.store_url).map_err(|source| StoreError::InvalidUrl {
            url: config.store_url.clone(),
            source,
        })?;
        let (scheme, base) = ObjectStoreScheme::parse(&url).map_err(object_store::Error::from)?;

        // The local filesystem backend rejects put attributes, so the
        // content type is only recorded where the backend can keep it.
        let supports_attributes = !matches!(scheme, ObjectStoreScheme::Local);

        let store: Arc<dyn ObjectStore> = match scheme {
            ObjectStoreScheme::GoogleCloudStorage => {
                let gcs = GoogleCloudStorageBuilder::new()
                    .with_url(config.store_url.clone())
                    .with_service_account_key(service_account_key)
                    .build()?;
                Arc::new(gcs)
            }
            _ => {
                let (store, _) = parse_url(&url)?;
                Arc::from(store)
            }
        };

        info!(store = %store, account, "opened blob store session");
        Ok(Self {
            store,
            base,
            account: account.to_string(),
            supports_attributes,
        })
    }

    fn container_path(&self, container: &ContainerName) -> Path {
        self.base.child(container.as_str())
    }

    fn blob_path(&self, container: &ContainerName, name: &str) -> Path {
        self.container_path(container).child(name)
    }

    fn put_attributes(&self, content_type: &str) -> Attributes {
        let mut attributes = Attributes::new();
        if self.supports_attributes {
            attributes.insert(Attribute::ContentType, content_type.to_string().into());
        }
        attributes
    }

    /// Create `container` by writing its marker object.
    ///
    /// Doubles as a write-access check against the backend.
    pub async fn create_container(&self, container: &ContainerName) -> StoreResult<()> {
        let marker = self.container_path(container).child(CONTAINER_MARKER);
        self.store.put(&marker, PutPayload::default()).await?;
        debug!(container = %container, "container created");
        Ok(())
    }

    /// Delete every object under `container`, the marker included.
    ///
    /// Returns the number of objects removed. An absent container is
    /// not an error; it simply removes nothing.
    pub async fn delete_container(&self, container: &ContainerName) -> StoreResult<usize> {
        let prefix = self.container_path(container);
        let mut listing = self.store.list(Some(&prefix));
        let mut locations = Vec::new();
        while let Some(meta) = listing.next().await {
            locations.push(meta?.location);
        }
        for location in &locations {
            self.store.delete(location).await?;
        }
        debug!(container = %container, removed = locations.len(), "container deleted");
        Ok(locations.len())
    }

    /// Upload `blob` into `container` in a single request.
    pub async fn put_blob(&self, container: &ContainerName, blob: Blob) -> StoreResult<PutReceipt> {
        let path = self.blob_path(container, &blob.name);
        let size = blob.size_bytes();
        let attributes = self.put_attributes(&blob.content_type);
        let result = self
            .store
            .put_opts(&path, PutPayload::from(blob.payload), attributes.into())
            .await?;
        debug!(path = %path, size, etag = ?result.e_tag, "blob stored");
        Ok(PutReceipt {
            etag: result.e_tag,
            version: result.version,
            size,
        })
    }

    /// Upload `blob` as a multipart transfer with parts of `part_size`
    /// bytes, keeping at most one part in flight.
    pub async fn put_blob_multipart(
        &self,
        container: &ContainerName,
        blob: Blob,
        part_size: usize,
    ) -> StoreResult<PutReceipt> {
        let path = self.blob_path(container, &blob.name);
        let size = blob.size_bytes();
        let attributes = self.put_attributes(&blob.content_type);
        let upload = self.store.put_multipart_opts(&path, attributes.into()).await?;
        let mut writer = WriteMultipart::new_with_chunk_size(upload, part_size);
        for chunk in blob.payload.chunks(part_size) {
            writer.wait_for_capacity(1).await?;
            writer.write(chunk);
        }
        let result = writer.finish().await?;
        debug!(
            path = %path,
            size,
            parts = size.div_ceil(part_size as u64),
            "multipart blob stored"
        );
        Ok(PutReceipt {
            etag: result.e_tag,
            version: result.version,
            size,
        })
    }

    /// Retrieve a blob by name, payload and metadata together.
    pub async fn get_blob(
        &self,
        container: &ContainerName,
        name: &str,
    ) -> StoreResult<RetrievedBlob> {
        let path = self.blob_path(container, name);
        let result = self.store.get(&path).await?;
        let meta = result.meta.clone();
        let content_type = result
            .attributes
            .get(&Attribute::ContentType)
            .map(|value| (**value).to_owned());
        let payload = result.bytes().await?;
        Ok(RetrievedBlob {
            payload,
            size: meta.size,
            etag: meta.e_tag,
            last_modified: meta.last_modified,
            content_type,
        })
    }
}

impl Drop for StoreSession {
    fn drop(&mut self) {
        debug!(account = %self.account, "blob store session closed");
    }
}
