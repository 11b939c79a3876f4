use awslite_core::{Client, Context, Credential, Error, Result};
use bytes::Bytes;
use http::{header, HeaderMap, HeaderValue, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::types::*;

const USER_AGENT: &str = "awslite-sqs";
const CONTENT_TYPE_AMZ_JSON: &str = "application/x-amz-json-1.0";

/// Client for a subset of the Amazon SQS API.
#[derive(Debug, Clone)]
pub struct SqsClient {
    client: Client,
}

impl SqsClient {
    /// Create a new client for the given endpoint and region.
    pub fn new(ctx: Context, endpoint: &str, region: &str, credential: Credential) -> Result<Self> {
        Ok(Self {
            client: Client::new(ctx, endpoint, region, "sqs", credential, USER_AGENT)?,
        })
    }

    /// Create a queue.
    pub async fn create_queue(&self, params: CreateQueueParams) -> Result<CreateQueueResponse> {
        let body = self.call("AmazonSQS.CreateQueue", &params).await?;
        decode_json(&body)
    }

    /// Send a message to a queue.
    pub async fn send_message(&self, params: SendMessageParams) -> Result<SendMessageResponse> {
        let body = self.call("AmazonSQS.SendMessage", &params).await?;
        decode_json(&body)
    }

    /// Receive messages from a queue.
    pub async fn receive_message(
        &self,
        params: ReceiveMessageParams,
    ) -> Result<ReceiveMessageResponse> {
        let body = self.call("AmazonSQS.ReceiveMessage", &params).await?;
        decode_json(&body)
    }

    /// Delete a received message. There is no response body for this action.
    pub async fn delete_message(&self, params: DeleteMessageParams) -> Result<()> {
        self.call("AmazonSQS.DeleteMessage", &params).await?;
        Ok(())
    }

    /// Post a JSON-encoded action to the service endpoint.
    async fn call(&self, target: &str, params: &impl Serialize) -> Result<Bytes> {
        let body = serde_json::to_vec(params)
            .map_err(|e| Error::unexpected("failed to encode request parameters").with_source(e))?;

        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(CONTENT_TYPE_AMZ_JSON),
        );
        headers.insert(header::CONNECTION, HeaderValue::from_static("Keep-Alive"));
        headers.insert("x-amz-target", target.parse()?);

        let resp = self
            .client
            .send(Method::POST, "", "", headers, Bytes::from(body))
            .await?;
        Ok(resp.into_body())
    }
}

fn decode_json<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    serde_json::from_slice(body)
        .map_err(|e| Error::unexpected("failed to decode response body").with_source(e))
}
