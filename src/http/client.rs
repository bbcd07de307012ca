use reqwest::header::{CONTENT_TYPE, HeaderValue};
use tracing::{debug, error, warn};

use super::response::{DeliveryResult, WebhookResponse};

/// POSTs an already-serialized message to the webhook once.
///
/// Every transport problem (bad URL, bad token, refused connection) is logged
/// and returned as [`DeliveryResult::Failed`]. Whatever status the webhook
/// answers with counts as delivered.
pub async fn send(url: &str, message: &str, token: &str) -> DeliveryResult {
    send_with(&reqwest::Client::new(), url, message, token).await
}

/// Same as [`send`], on a caller-provided client.
pub async fn send_with(client: &reqwest::Client, url: &str, message: &str, token: &str) -> DeliveryResult {
    match post_message(client, url, message, token).await {
        Ok(response) => {
            debug!(status = response.status, "webhook accepted message");
            DeliveryResult::Delivered(response)
        }
        Err(err) => {
            error!(error = %err, "error sending message to webhook");
            DeliveryResult::Failed { error: err }
        }
    }
}

async fn post_message(
    client: &reqwest::Client,
    url: &str,
    message: &str,
    token: &str,
) -> Result<WebhookResponse, String> {
    let url = reqwest::Url::parse(url).map_err(|e| format!("Invalid webhook URL: {e}"))?;
    let auth = HeaderValue::from_str(&format!("Bearer {token}"))
        .map_err(|e| format!("Invalid token header value: {e}"))?;

    let response = client
        .post(url)
        .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
        .header(reqwest::header::AUTHORIZATION, auth)
        .body(message.to_string())
        .send()
        .await
        .map_err(|e| format!("Request failed: {e}"))?;

    // The webhook has answered; an unreadable body does not undo delivery.
    let status = response.status().as_u16();
    let body = match response.bytes().await {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(e) => {
            warn!(status, error = %e, "failed to read webhook response body");
            String::new()
        }
    };

    Ok(WebhookResponse { status, body })
}
