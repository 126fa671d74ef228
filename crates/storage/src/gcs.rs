//! Google Cloud Storage backend over the S3-compatible XML API.
//!
//! GCS accepts SigV4-signed requests at `storage.googleapis.com` when
//! authenticated with HMAC keys, so the AWS S3 SDK handles uploads, deletes
//! and URL signing without a GCS-specific client.
//!
//! GCS rejects the CRC32 checksum headers and trailers the SDK sends by
//! default, so checksums are only computed where an operation requires them.

use std::time::Duration;

use async_trait::async_trait;
use aws_credential_types::Credentials;
use aws_sdk_s3::config::{
    BehaviorVersion, Region, RequestChecksumCalculation, ResponseChecksumValidation,
};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;

use crate::error::StorageError;
use crate::ObjectStore;

/// Signing region GCS expects for interoperability requests.
const GCS_SIGNING_REGION: &str = "auto";

/// Bucket-scoped GCS client.
pub struct GcsInteropStore {
    client: aws_sdk_s3::Client,
    bucket: String,
}

impl GcsInteropStore {
    /// Build a client for `bucket` at `endpoint` using an HMAC key pair.
    pub fn new(endpoint: &str, access_key: &str, secret: &str, bucket: &str) -> Self {
        let credentials = Credentials::new(access_key, secret, None, None, "gcs-hmac");
        let config = aws_sdk_s3::config::Builder::new()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(GCS_SIGNING_REGION))
            .endpoint_url(endpoint)
            .credentials_provider(credentials)
            .force_path_style(true)
            .request_checksum_calculation(RequestChecksumCalculation::WhenRequired)
            .response_checksum_validation(ResponseChecksumValidation::WhenRequired)
            .build();

        Self {
            client: aws_sdk_s3::Client::from_conf(config),
            bucket: bucket.to_string(),
        }
    }
}

fn backend_error<E>(op: &str, err: E) -> StorageError
where
    E: std::error::Error,
{
    StorageError::Backend(format!("{op} failed: {}", DisplayErrorContext(&err)))
}

#[async_trait]
impl ObjectStore for GcsInteropStore {
    async fn put(
        &self,
        name: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StorageError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(name)
            .content_type(content_type)
            .body(ByteStream::from(bytes))
            .send()
            .await
            .map_err(|e| backend_error("put_object", e))?;
        Ok(())
    }

    async fn delete(&self, name: &str) -> Result<(), StorageError> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(name)
            .send()
            .await
            .map_err(|e| backend_error("delete_object", e))?;
        Ok(())
    }

    async fn presign_get(&self, name: &str, expires_in: Duration) -> Result<String, StorageError> {
        let presigning = PresigningConfig::expires_in(expires_in)
            .map_err(|e| StorageError::InvalidConfig(format!("Invalid signed URL TTL: {e}")))?;
        let request = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(name)
            .presigned(presigning)
            .await
            .map_err(|e| backend_error("presign get_object", e))?;
        Ok(request.uri().to_string())
    }
}
