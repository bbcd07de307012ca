#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookResponse {
    pub status: u16,
    pub body: String,
}

/// Outcome of one delivery attempt. Failures are values, never panics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryResult {
    /// The webhook answered. Non-2xx statuses are reported here too.
    Delivered(WebhookResponse),
    Failed { error: String },
}

impl DeliveryResult {
    pub fn is_success(&self) -> bool {
        matches!(self, DeliveryResult::Delivered(_))
    }

    pub fn response(&self) -> Option<&WebhookResponse> {
        match self {
            DeliveryResult::Delivered(response) => Some(response),
            DeliveryResult::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            DeliveryResult::Delivered(_) => None,
            DeliveryResult::Failed { error } => Some(error),
        }
    }
}
