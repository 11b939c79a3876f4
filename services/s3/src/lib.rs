//! Thin Amazon S3 client over the awslite signing core.
//!
//! Operations assemble a method, bucket and key, delegate signing and
//! dispatch to [`awslite_core::Client`], and decode the XML response bodies.

mod client;
pub use client::S3Client;

mod types;
pub use types::{
    BucketInfo, Buckets, CommonPrefix, ListBucketsResponse, ListObjectsResponse, ObjectInfo, Owner,
};
