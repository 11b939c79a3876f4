//! Thin Amazon SQS client over the awslite signing core.
//!
//! SQS speaks the `x-amz-json-1.0` protocol: every operation is a `POST` to
//! the bare service endpoint with the action in `x-amz-target` and the queue
//! addressed by URL inside the JSON body, so no virtual-host addressing is
//! involved.

mod client;
pub use client::SqsClient;

mod types;
pub use types::{
    CreateQueueParams, CreateQueueResponse, DeleteMessageParams, Message, MessageAttribute,
    MessageSystemAttribute, ReceiveMessageParams, ReceiveMessageResponse, SendMessageParams,
    SendMessageResponse,
};
