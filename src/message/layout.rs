use std::fmt::{self, Display};

use crate::report::aggregate::GroupedFailure;

use super::MessageOptions;
use super::blocks::{AttachmentField, Block, Text};
use super::sanitize::fail_errors;

/// Numbers shown in the summary section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryFields {
    pub total: i64,
    pub passed: i64,
    pub failed: i64,
    pub skipped: i64,
    pub duration: String,
}

/// Message templates. The variant is chosen from the raw failure count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Passed,
    Failed,
    /// Failed layout plus one numbered field pair per failed test.
    FailedWithErrors,
}

impl Layout {
    pub fn select(failure_count: usize, error_details: bool) -> Self {
        match (failure_count, error_details) {
            (0, _) => Layout::Passed,
            (_, false) => Layout::Failed,
            (_, true) => Layout::FailedWithErrors,
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Layout::Passed => "#29a745",
            Layout::Failed | Layout::FailedWithErrors => "#f25b44",
        }
    }

    fn banner(self) -> &'static str {
        match self {
            Layout::Passed => "Tests passed :large_green_circle:",
            Layout::Failed | Layout::FailedWithErrors => "Tests failed :red_circle:",
        }
    }

    fn bullet(self) -> &'static str {
        match self {
            Layout::Passed => "•",
            Layout::Failed | Layout::FailedWithErrors => ">",
        }
    }

    pub(crate) fn blocks(self, summary: &SummaryFields, options: &MessageOptions) -> Vec<Block> {
        vec![
            Block::header(self.banner()),
            Block::context(Text::markdown(format!(
                "Env: *{}* | Collection: *{}* | Duration: *{}*",
                options.environment, options.collection_name, summary.duration
            ))),
            Block::Divider,
            Block::section(self.summary_text(summary)),
            Block::Divider,
            Block::link_button("Detailed report link:", "Open report", &options.reporting_url),
            Block::context(Text::plain(&options.footer)),
        ]
    }

    pub(crate) fn fields(self, groups: &[GroupedFailure], max_message_length: usize) -> Vec<AttachmentField> {
        match self {
            Layout::FailedWithErrors => fail_errors(groups, max_message_length),
            Layout::Passed | Layout::Failed => Vec::new(),
        }
    }

    fn summary_text(self, summary: &SummaryFields) -> String {
        let bullet = self.bullet();
        let mut text = format!(
            "*TESTS SUMMARY:*\n{bullet} Total Requests: *{}*\n{bullet} Passed: *{}*\n{bullet} Failed: *{}*\n{bullet} Skipped: *{}*",
            summary.total, summary.passed, summary.failed, summary.skipped
        );
        if self == Layout::FailedWithErrors {
            text.push_str(&format!("\n{bullet} Duration: *{}*", summary.duration));
        }
        text
    }
}

impl Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Layout::Passed => "passed",
            Layout::Failed => "failed",
            Layout::FailedWithErrors => "failed-with-errors",
        };
        write!(f, "{label}")
    }
}
