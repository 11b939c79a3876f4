use awslite_core::{Client, Context, Credential, Error, Result};
use bytes::Bytes;
use http::{HeaderMap, Method};
use serde::de::DeserializeOwned;

use crate::types::{ListBucketsResponse, ListObjectsResponse};

const USER_AGENT: &str = "awslite-s3";

/// Client for a subset of the Amazon S3 REST API.
///
/// Object and listing operations use virtual-hosted addressing
/// (`bucket.<endpoint-host>`); bucket creation addresses the bucket as a path
/// segment.
#[derive(Debug, Clone)]
pub struct S3Client {
    client: Client,
}

impl S3Client {
    /// Create a new client for the given endpoint and region.
    pub fn new(ctx: Context, endpoint: &str, region: &str, credential: Credential) -> Result<Self> {
        Ok(Self {
            client: Client::new(ctx, endpoint, region, "s3", credential, USER_AGENT)?,
        })
    }

    /// Create a bucket.
    pub async fn create_bucket(&self, name: &str) -> Result<()> {
        self.client
            .send(Method::PUT, "", name, HeaderMap::new(), Bytes::new())
            .await?;
        Ok(())
    }

    /// List the buckets owned by the caller.
    pub async fn list_buckets(&self) -> Result<ListBucketsResponse> {
        let resp = self
            .client
            .send(Method::GET, "", "", HeaderMap::new(), Bytes::new())
            .await?;
        decode_xml(resp.body())
    }

    /// List the objects in a bucket.
    pub async fn list_objects(&self, bucket: &str) -> Result<ListObjectsResponse> {
        let resp = self
            .client
            .send(Method::GET, bucket, "", HeaderMap::new(), Bytes::new())
            .await?;
        decode_xml(resp.body())
    }

    /// Upload an object.
    pub async fn put_object(&self, bucket: &str, key: &str, data: Bytes) -> Result<()> {
        self.client
            .send(Method::PUT, bucket, key, HeaderMap::new(), data)
            .await?;
        Ok(())
    }

    /// Fetch an object's content.
    pub async fn get_object(&self, bucket: &str, key: &str) -> Result<Bytes> {
        let resp = self
            .client
            .send(Method::GET, bucket, key, HeaderMap::new(), Bytes::new())
            .await?;
        Ok(resp.into_body())
    }

    /// Delete an object.
    pub async fn delete_object(&self, bucket: &str, key: &str) -> Result<()> {
        self.client
            .send(Method::DELETE, bucket, key, HeaderMap::new(), Bytes::new())
            .await?;
        Ok(())
    }
}

fn decode_xml<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    let text = String::from_utf8_lossy(body);
    quick_xml::de::from_str(&text)
        .map_err(|e| Error::unexpected("failed to parse response body").with_source(e))
}
