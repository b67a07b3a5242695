//! Configuration for table storage and the local HTTP harness.
//!
//! Everything here is constructed explicitly and handed to the loader or the
//! server; nothing is read from the environment after start-up.

use std::env;
use std::net::{SocketAddr, ToSocketAddrs};
use std::path::PathBuf;
use std::sync::Arc;

use object_store::ObjectStore;
use object_store::aws::AmazonS3Builder;
use object_store::local::LocalFileSystem;
use object_store::memory::InMemory;

use crate::error::{ExpectedError, Result};

/// Default key prefix prepended to every table object
pub const DEFAULT_PREFIX: &str = "tsv/";

/// Where the per-study TSV objects live
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageLocation {
    /// An S3 bucket; credentials and region come from the standard AWS variables
    S3 { bucket: String },
    /// A local directory acting as the bucket root
    Local(PathBuf),
    /// A process-local in-memory store
    Memory,
}

/// Configuration for the table storage backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    /// Backing location of the objects
    pub location: StorageLocation,
    /// Prefix prepended to `<study>-<kind>.tsv`
    pub prefix: String,
}

impl StorageConfig {
    /// Create a configuration for an S3 bucket
    #[must_use]
    pub fn s3(bucket: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            location: StorageLocation::S3 {
                bucket: bucket.into(),
            },
            prefix: prefix.into(),
        }
    }

    /// Create a configuration for a local directory
    #[must_use]
    pub fn local(dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            location: StorageLocation::Local(dir.into()),
            prefix: prefix.into(),
        }
    }

    /// Build the configuration from `DATA_DIR` / `DATA_BUCKET` and `DATA_PREFIX`
    ///
    /// `DATA_DIR` wins when both location variables are set.
    pub fn from_env() -> Result<Self> {
        let prefix = env::var("DATA_PREFIX").unwrap_or_else(|_| DEFAULT_PREFIX.to_string());

        if let Some(dir) = non_empty_var("DATA_DIR") {
            return Ok(Self::local(dir, prefix));
        }
        if let Some(bucket) = non_empty_var("DATA_BUCKET") {
            return Ok(Self::s3(bucket, prefix));
        }

        Err(ExpectedError::config(
            "neither DATA_DIR nor DATA_BUCKET is set",
        ))
    }

    /// Build the object store described by this configuration
    pub fn build_store(&self) -> Result<Arc<dyn ObjectStore>> {
        let store: Arc<dyn ObjectStore> = match &self.location {
            StorageLocation::S3 { bucket } => Arc::new(
                AmazonS3Builder::from_env()
                    .with_bucket_name(bucket)
                    .build()?,
            ),
            StorageLocation::Local(dir) => Arc::new(LocalFileSystem::new_with_prefix(dir)?),
            StorageLocation::Memory => Arc::new(InMemory::new()),
        };
        Ok(store)
    }
}

/// Configuration for the local HTTP harness
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl ServerConfig {
    /// Build the configuration from `HOST` and `PORT`, falling back to defaults
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let host = non_empty_var("HOST").unwrap_or(defaults.host);
        let port = match non_empty_var("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|e| ExpectedError::config(format!("invalid PORT '{raw}': {e}")))?,
            None => defaults.port,
        };
        Ok(Self { host, port })
    }

    /// Host part suitable for name resolution; brackets around IPv6 literals are dropped
    #[must_use]
    pub fn bind_host(&self) -> &str {
        self.host.trim_start_matches('[').trim_end_matches(']')
    }

    /// First socket address the configured host resolves to
    ///
    /// Accepts hostnames as well as IPv4 and IPv6 literals.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        (self.bind_host(), self.port)
            .to_socket_addrs()
            .map_err(|e| ExpectedError::config(format!("invalid bind address '{}': {e}", self.host)))?
            .next()
            .ok_or_else(|| ExpectedError::config(format!("host '{}' resolved to no address", self.host)))
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}
