use anyhow::Result;
use awslite_core::{Context, Credential};
use awslite_http_send_reqwest::ReqwestHttpSend;
use awslite_sqs::{DeleteMessageParams, ReceiveMessageParams, SendMessageParams, SqsClient};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let endpoint = std::env::var("AWSLITE_SQS_ENDPOINT")
        .unwrap_or_else(|_| "https://sqs.us-east-1.amazonaws.com".to_string());
    let region = std::env::var("AWSLITE_REGION").unwrap_or_else(|_| "us-east-1".to_string());
    let queue_url = std::env::var("AWSLITE_SQS_QUEUE_URL")?;

    let mut credential = Credential::new(
        &std::env::var("AWS_ACCESS_KEY_ID")?,
        &std::env::var("AWS_SECRET_ACCESS_KEY")?,
    );
    if let Ok(token) = std::env::var("AWS_SESSION_TOKEN") {
        credential = credential.with_session_token(&token);
    }

    let ctx = Context::new().with_http_send(ReqwestHttpSend::default());
    let client = SqsClient::new(ctx, &endpoint, &region, credential)?;

    let sent = client
        .send_message(SendMessageParams {
            message_body: "Hello, SQS!".to_string(),
            queue_url: queue_url.clone(),
            ..Default::default()
        })
        .await?;
    println!("Sent message {}", sent.message_id);

    let received = client
        .receive_message(ReceiveMessageParams {
            queue_url: queue_url.clone(),
            max_number_of_messages: Some(1),
            ..Default::default()
        })
        .await?;
    for message in &received.messages {
        println!("Received: {}", message.body);
        client
            .delete_message(DeleteMessageParams {
                queue_url: queue_url.clone(),
                receipt_handle: message.receipt_handle.clone(),
            })
            .await?;
        println!("Deleted {}", message.message_id);
    }

    Ok(())
}
