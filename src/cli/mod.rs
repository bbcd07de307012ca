//! # CLI Support
//!
//! Command-line interface for posting a collection run report to a chat
//! webhook from CI/CD pipelines.

use std::path::PathBuf;

use clap::Parser;

use crate::config::{DEFAULT_CONFIG_FILE, NotifierConfig};

#[derive(Debug, Clone, Parser)]
#[command(name = "getman-report")]
#[command(about = "Post a collection run report to a chat webhook", version)]
pub struct Cli {
    /// Path to the JSON run report
    pub report: PathBuf,

    /// Path to the notifier config file
    #[arg(long, short = 'c', default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Webhook URL the message is POSTed to
    #[arg(long)]
    pub webhook_url: Option<String>,

    /// Bearer token for the webhook
    #[arg(long, env = "GETMAN_REPORT_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Destination channel
    #[arg(long)]
    pub channel: Option<String>,

    /// Environment name shown in the message header
    #[arg(long, short = 'e')]
    pub environment: Option<String>,

    /// Collection name shown in the message header
    #[arg(long)]
    pub collection: Option<String>,

    /// Link behind the detailed report button
    #[arg(long)]
    pub reporting_url: Option<String>,

    /// Cut error messages longer than this many characters
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub max_message_length: Option<u64>,

    /// List every failed test in failure messages
    #[arg(long)]
    pub error_details: bool,

    /// Print the payload instead of sending it
    #[arg(long)]
    pub dry_run: bool,

    /// Exit with status 1 when the webhook cannot be reached
    #[arg(long)]
    pub fail_on_delivery_error: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,
}

impl Cli {
    /// Flags expressed as a config layer to merge over the file.
    pub fn overrides(&self) -> NotifierConfig {
        NotifierConfig {
            webhook_url: self.webhook_url.clone(),
            token: self.token.clone(),
            channel: self.channel.clone(),
            environment: self.environment.clone(),
            collection: self.collection.clone(),
            reporting_url: self.reporting_url.clone(),
            max_message_length: self.max_message_length.map(|len| len as usize),
            footer: None,
            error_details: self.error_details.then_some(true),
        }
    }
}
