//! One handler per menu operation.
//! Prints progress to stdout and delegates storage concerns to
//! [`StoreSession`]; each handler hands back the container it worked in
//! so callers can inspect what was left behind.

use tracing::{debug, warn};

use crate::{
    config::DemoConfig,
    errors::StoreResult,
    models::{
        blob::Blob,
        container::{ContainerName, unique_name},
    },
    services::session::StoreSession,
};

/// Byte value the synthetic multipart payload repeats.
pub const MULTIPART_FILL_BYTE: u8 = b'a';

/// Menu option 1: create a container, then delete it again.
pub async fn create_delete_container(
    session: &StoreSession,
    config: &DemoConfig,
) -> StoreResult<ContainerName> {
    let container = ContainerName::generate(&config.container_prefix);
    println!("Creating container {container}");
    session.create_container(&container).await?;

    println!("Deleting the container");
    session.delete_container(&container).await?;
    println!("Deleted!");
    Ok(container)
}

/// Menu option 2: write a small text blob, read it back, print what the
/// store reported.
///
/// The container is deleted whether or not the blob work succeeds; a
/// failed operation outranks a failed cleanup.
pub async fn round_trip_blob(
    session: &StoreSession,
    config: &DemoConfig,
) -> StoreResult<ContainerName> {
    let container = ContainerName::generate(&config.container_prefix);
    println!("Creating container {container}");
    session.create_container(&container).await?;

    let outcome = put_and_retrieve(session, config, &container).await;
    cleanup_container(session, &container, outcome).await?;
    Ok(container)
}

async fn put_and_retrieve(
    session: &StoreSession,
    config: &DemoConfig,
    container: &ContainerName,
) -> StoreResult<()> {
    let blob_name = unique_name(&config.blob_prefix);
    let blob = Blob::text(&blob_name, config.payload.clone(), &config.content_type);

    let receipt = session.put_blob(container, blob).await?;
    println!("Object etag is: {}", receipt.etag.unwrap_or_default());

    let retrieved = session.get_blob(container, &blob_name).await?;
    debug!(
        size = retrieved.size,
        content_type = ?retrieved.content_type,
        last_modified = %retrieved.last_modified,
        "blob retrieved"
    );
    println!("The retrieved payload is: {}", retrieved.text());
    Ok(())
}

/// Menu option 3: upload a repeated-byte payload in parts.
///
/// Artifacts are cleaned up like the round trip unless the user asked
/// to keep them for inspection.
pub async fn multipart_upload(
    session: &StoreSession,
    config: &DemoConfig,
) -> StoreResult<ContainerName> {
    let container = ContainerName::generate(&config.container_prefix);
    println!("Creating container {container}");
    session.create_container(&container).await?;

    let outcome = upload_in_parts(session, config, &container).await;

    if config.keep_multipart_artifacts {
        outcome?;
        println!("Leaving container {container} and its blob in place");
        return Ok(container);
    }
    cleanup_container(session, &container, outcome).await?;
    Ok(container)
}

async fn upload_in_parts(
    session: &StoreSession,
    config: &DemoConfig,
    container: &ContainerName,
) -> StoreResult<()> {
    let blob_name = unique_name(&config.blob_prefix);
    let blob = Blob::repeated(
        &blob_name,
        MULTIPART_FILL_BYTE,
        config.multipart_target_size,
        &config.content_type,
    );

    println!(
        "Uploading {} bytes in parts of {} bytes",
        blob.size_bytes(),
        config.multipart_part_size
    );
    let receipt = session
        .put_blob_multipart(container, blob, config.multipart_part_size)
        .await?;
    println!(
        "Multipart upload complete, etag is: {}",
        receipt.etag.unwrap_or_default()
    );
    Ok(())
}

/// Menu options 4 and 5: provider-specific calls are not wired up.
pub fn provider_api() {
    println!("Not implemented yet");
}

/// Delete `container` regardless of how the preceding work went, then
/// report whichever error matters more.
async fn cleanup_container(
    session: &StoreSession,
    container: &ContainerName,
    outcome: StoreResult<()>,
) -> StoreResult<()> {
    println!("Deleting the blob and the container");
    let cleanup = session.delete_container(container).await;
    match outcome {
        Ok(()) => {
            cleanup?;
            println!("Deleted!");
            Ok(())
        }
        Err(err) => {
            if let Err(cleanup_err) = cleanup {
                warn!(container = %container, error = %cleanup_err, "container cleanup failed");
            }
            Err(err)
        }
    }
}
