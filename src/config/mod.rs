//! # Notifier Configuration
//!
//! Settings come from an optional TOML file and are overridden by command-line
//! flags. Collection and environment names fall back to the ones recorded in
//! the run report.

use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::message::{DEFAULT_FOOTER, DEFAULT_MAX_MESSAGE_LENGTH, MessageOptions};
use crate::report::RunReport;

pub const DEFAULT_CONFIG_FILE: &str = "getman-report.toml";
const UNKNOWN_NAME: &str = "Unknown";

/// Raw settings. Every field is optional so file and flags can be layered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NotifierConfig {
    /// Webhook endpoint the message is POSTed to.
    pub webhook_url: Option<String>,
    /// Bearer token sent in the `Authorization` header.
    pub token: Option<String>,
    pub channel: Option<String>,
    pub environment: Option<String>,
    pub collection: Option<String>,
    /// Link behind the report button. Embedded verbatim.
    pub reporting_url: Option<String>,
    /// Error messages longer than this many characters are cut.
    pub max_message_length: Option<usize>,
    pub footer: Option<String>,
    /// Append one field pair per failed test to failure messages.
    pub error_details: Option<bool>,
}

/// Settings after layering. Delivery settings are only checked by [`ResolvedConfig::delivery`].
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub webhook_url: Option<String>,
    pub token: Option<String>,
    pub message: MessageOptions,
}

impl ResolvedConfig {
    /// Webhook URL and token, required once the message is actually sent.
    pub fn delivery(&self) -> Result<(&str, &str)> {
        let webhook_url = required(self.webhook_url.as_deref(), "webhook_url")?;
        let token = required(self.token.as_deref(), "token")?;
        Ok((webhook_url, token))
    }
}

impl NotifierConfig {
    /// Load settings from `path`. A missing file yields empty settings.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path).map_err(|source| Error::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| Error::ParseConfig {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Layer `overrides` on top of `self`; set fields in `overrides` win.
    pub fn merge(self, overrides: NotifierConfig) -> Self {
        Self {
            webhook_url: overrides.webhook_url.or(self.webhook_url),
            token: overrides.token.or(self.token),
            channel: overrides.channel.or(self.channel),
            environment: overrides.environment.or(self.environment),
            collection: overrides.collection.or(self.collection),
            reporting_url: overrides.reporting_url.or(self.reporting_url),
            max_message_length: overrides.max_message_length.or(self.max_message_length),
            footer: overrides.footer.or(self.footer),
            error_details: overrides.error_details.or(self.error_details),
        }
    }

    pub fn resolve(self, report: &RunReport) -> Result<ResolvedConfig> {
        let channel = required(self.channel.as_deref(), "channel")?.to_string();

        let max_message_length = self.max_message_length.unwrap_or(DEFAULT_MAX_MESSAGE_LENGTH);
        if max_message_length == 0 {
            return Err(Error::InvalidSetting {
                name: "max_message_length",
                reason: "must be greater than zero".to_string(),
            });
        }

        let collection_name = self
            .collection
            .or_else(|| report.collection_name().map(str::to_string))
            .unwrap_or_else(|| UNKNOWN_NAME.to_string());
        let environment = self
            .environment
            .or_else(|| report.environment_name().map(str::to_string))
            .unwrap_or_else(|| UNKNOWN_NAME.to_string());

        Ok(ResolvedConfig {
            webhook_url: self.webhook_url,
            token: self.token,
            message: MessageOptions {
                max_message_length,
                collection_name,
                environment,
                channel,
                reporting_url: self.reporting_url.unwrap_or_default(),
                footer: self.footer.unwrap_or_else(|| DEFAULT_FOOTER.to_string()),
                error_details: self.error_details.unwrap_or(false),
            },
        })
    }
}

fn required<'a>(value: Option<&'a str>, name: &'static str) -> Result<&'a str> {
    value
        .filter(|value| !value.trim().is_empty())
        .ok_or(Error::MissingSetting(name))
}
