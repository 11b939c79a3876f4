use anyhow::Result;
use awslite_core::{Context, Credential};
use awslite_http_send_reqwest::ReqwestHttpSend;
use awslite_s3::S3Client;
use bytes::Bytes;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let endpoint = std::env::var("AWSLITE_S3_ENDPOINT")
        .unwrap_or_else(|_| "https://s3.us-east-1.amazonaws.com".to_string());
    let region = std::env::var("AWSLITE_REGION").unwrap_or_else(|_| "us-east-1".to_string());

    let mut credential = Credential::new(
        &std::env::var("AWS_ACCESS_KEY_ID")?,
        &std::env::var("AWS_SECRET_ACCESS_KEY")?,
    );
    if let Ok(token) = std::env::var("AWS_SESSION_TOKEN") {
        credential = credential.with_session_token(&token);
    }

    let ctx = Context::new().with_http_send(ReqwestHttpSend::default());
    let client = S3Client::new(ctx, &endpoint, &region, credential)?;

    println!("Buckets:");
    let resp = client.list_buckets().await?;
    for bucket in &resp.buckets.bucket {
        println!("  {}\t{}", bucket.creation_date, bucket.name);
    }

    if let Some(bucket) = std::env::args().nth(1) {
        println!("Uploading demo object to {bucket}...");
        client
            .put_object(&bucket, "awslite-demo", Bytes::from_static(b"Hello, S3!"))
            .await?;
        let body = client.get_object(&bucket, "awslite-demo").await?;
        println!("Read back: {}", String::from_utf8_lossy(&body));
        client.delete_object(&bucket, "awslite-demo").await?;
    }

    Ok(())
}
