pub mod client;
pub mod response;

pub use client::{send, send_with};
pub use response::{DeliveryResult, WebhookResponse};
