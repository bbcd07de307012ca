//! Chat notifications for API collection runs.
//!
//! A run report is aggregated ([`report::aggregate`]), turned into a
//! block-layout message ([`message::build`]) and POSTed to a webhook
//! ([`http::send`]).

pub mod cli;
pub mod config;
pub mod duration;
pub mod error;
pub mod http;
pub mod message;
pub mod report;

pub use error::{Error, Result};
pub use http::{DeliveryResult, WebhookResponse};
pub use message::{Layout, MessageOptions, MessagePayload};
pub use report::RunReport;

/// Build the message for a whole report.
pub fn build_report_message(report: &RunReport, options: &MessageOptions) -> MessagePayload {
    let run = &report.run;
    message::build(&run.stats, &run.timings, &run.failures, &run.executions, options)
}
