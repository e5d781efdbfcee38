use anyhow::{Context, Result, ensure};
use clap::Parser;
use std::{env, path::PathBuf};

/// Default multipart payload size: 33 MiB, comfortably above the 32 MiB
/// minimum part size documented for the GCS provider.
const DEFAULT_MULTIPART_TARGET_SIZE: usize = 33 * 1024 * 1024;

/// Default chunk size handed to the multipart writer.
const DEFAULT_MULTIPART_PART_SIZE: usize = 8 * 1024 * 1024;

/// Centralized demo configuration.
/// Combines environment variables and CLI arguments.
#[derive(Debug, Clone)]
pub struct DemoConfig {
    pub store_url: String,
    pub container_prefix: String,
    pub blob_prefix: String,
    pub payload: String,
    pub content_type: String,
    pub multipart_target_size: usize,
    pub multipart_part_size: usize,
    pub keep_multipart_artifacts: bool,
}

/// Credentials taken from the two positional arguments.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub account: String,
    pub key_file: PathBuf,
}

/// Command-line + environment configuration.
#[derive(Parser, Debug)]
#[command(author, version, about = "Interactive object-storage demo client")]
pub struct Args {
    /// Account identifier (for GCS, the service account email address)
    pub account: String,

    /// Path to the service account private key file
    pub key_file: PathBuf,

    /// Store URL: gs://bucket, file:///dir or memory:/// (overrides BLOBSTORE_DEMO_STORE_URL)
    #[arg(long)]
    pub store_url: Option<String>,

    /// Prefix for generated container names (overrides BLOBSTORE_DEMO_CONTAINER_PREFIX)
    #[arg(long)]
    pub container_prefix: Option<String>,

    /// Prefix for generated blob names (overrides BLOBSTORE_DEMO_BLOB_PREFIX)
    #[arg(long)]
    pub blob_prefix: Option<String>,

    /// Payload literal for the round-trip operation (overrides BLOBSTORE_DEMO_PAYLOAD)
    #[arg(long)]
    pub payload: Option<String>,

    /// Content type sent with uploads (overrides BLOBSTORE_DEMO_CONTENT_TYPE)
    #[arg(long)]
    pub content_type: Option<String>,

    /// Multipart payload size in bytes (overrides BLOBSTORE_DEMO_MULTIPART_TARGET_SIZE)
    #[arg(long)]
    pub multipart_target_size: Option<usize>,

    /// Multipart part size in bytes (overrides BLOBSTORE_DEMO_MULTIPART_PART_SIZE)
    #[arg(long)]
    pub multipart_part_size: Option<usize>,

    /// Leave the multipart container and blob in place instead of cleaning up
    #[arg(long)]
    pub keep_multipart_artifacts: bool,
}

impl DemoConfig {
    /// Parse environment variables + CLI args into the demo configuration
    /// and the credentials from the positional arguments.
    pub fn from_env_and_args() -> Result<(Self, Credentials)> {
        // Parse CLI once
        let args = Args::parse();

        // --- Environment fallback ---
        let env_store_url =
            env::var("BLOBSTORE_DEMO_STORE_URL").unwrap_or_else(|_| "memory:///".into());
        let env_container_prefix = env::var("BLOBSTORE_DEMO_CONTAINER_PREFIX")
            .unwrap_or_else(|_| "demo-container".into());
        let env_blob_prefix =
            env::var("BLOBSTORE_DEMO_BLOB_PREFIX").unwrap_or_else(|_| "demo-blob".into());
        let env_payload = env::var("BLOBSTORE_DEMO_PAYLOAD").unwrap_or_else(|_| "data".into());
        let env_content_type =
            env::var("BLOBSTORE_DEMO_CONTENT_TYPE").unwrap_or_else(|_| "text/plain".into());
        let env_target_size = match env::var("BLOBSTORE_DEMO_MULTIPART_TARGET_SIZE") {
            Ok(value) => value.parse::<usize>().with_context(|| {
                format!(
                    "parsing BLOBSTORE_DEMO_MULTIPART_TARGET_SIZE value `{}`",
                    value
                )
            })?,
            Err(env::VarError::NotPresent) => DEFAULT_MULTIPART_TARGET_SIZE,
            Err(err) => return Err(err).context("reading BLOBSTORE_DEMO_MULTIPART_TARGET_SIZE"),
        };
        let env_part_size = match env::var("BLOBSTORE_DEMO_MULTIPART_PART_SIZE") {
            Ok(value) => value.parse::<usize>().with_context(|| {
                format!(
                    "parsing BLOBSTORE_DEMO_MULTIPART_PART_SIZE value `{}`",
                    value
                )
            })?,
            Err(env::VarError::NotPresent) => DEFAULT_MULTIPART_PART_SIZE,
            Err(err) => return Err(err).context("reading BLOBSTORE_DEMO_MULTIPART_PART_SIZE"),
        };
        let env_keep_artifacts = match env::var("BLOBSTORE_DEMO_KEEP_MULTIPART_ARTIFACTS") {
            Ok(value) => value.parse::<bool>().with_context(|| {
                format!(
                    "parsing BLOBSTORE_DEMO_KEEP_MULTIPART_ARTIFACTS value `{}`",
                    value
                )
            })?,
            Err(env::VarError::NotPresent) => false,
            Err(err) => return Err(err).context("reading BLOBSTORE_DEMO_KEEP_MULTIPART_ARTIFACTS"),
        };

        // --- Merge ---
        let cfg = Self {
            store_url: args.store_url.unwrap_or(env_store_url),
            container_prefix: args.container_prefix.unwrap_or(env_container_prefix),
            blob_prefix: args.blob_prefix.unwrap_or(env_blob_prefix),
            payload: args.payload.unwrap_or(env_payload),
            content_type: args.content_type.unwrap_or(env_content_type),
            multipart_target_size: args.multipart_target_size.unwrap_or(env_target_size),
            multipart_part_size: args.multipart_part_size.unwrap_or(env_part_size),
            keep_multipart_artifacts: args.keep_multipart_artifacts || env_keep_artifacts,
        };
        ensure!(
            cfg.multipart_target_size > 0,
            "multipart payload size must be non-zero"
        );
        ensure!(
            cfg.multipart_part_size > 0,
            "multipart part size must be non-zero"
        );

        let credentials = Credentials {
            account: args.account,
            key_file: args.key_file,
        };

        Ok((cfg, credentials))
    }
}
