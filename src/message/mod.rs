//! # Message Building
//!
//! Turns a run's statistics, timings, failures and executions into the chat
//! payload. Building is total: missing data falls back to placeholders and
//! inconsistent counts are shown as-is.

pub mod blocks;
pub mod layout;
pub mod sanitize;

use crate::duration::pretty_ms;
use crate::report::aggregate::{count_skipped, group_failures};
use crate::report::{ExecutionRecord, FailureRecord, RunStats, RunTimings};

pub use blocks::{Attachment, AttachmentField, Block, MessagePayload, Text};
pub use layout::{Layout, SummaryFields};
pub use sanitize::{clean_error_message, fail_errors};

pub const DEFAULT_MAX_MESSAGE_LENGTH: usize = 100;
pub const DEFAULT_FOOTER: &str = ":test_tube: getman-report";

/// Everything about a message that does not come from the run itself.
#[derive(Debug, Clone)]
pub struct MessageOptions {
    pub max_message_length: usize,
    pub collection_name: String,
    pub environment: String,
    pub channel: String,
    pub reporting_url: String,
    pub footer: String,
    pub error_details: bool,
}

impl Default for MessageOptions {
    fn default() -> Self {
        Self {
            max_message_length: DEFAULT_MAX_MESSAGE_LENGTH,
            collection_name: String::new(),
            environment: String::new(),
            channel: String::new(),
            reporting_url: String::new(),
            footer: DEFAULT_FOOTER.to_string(),
            error_details: false,
        }
    }
}

/// Layout [`build`] uses for these failures and options.
pub fn layout_for(failures: &[FailureRecord], options: &MessageOptions) -> Layout {
    Layout::select(failures.len(), options.error_details)
}

pub fn build(
    stats: &RunStats,
    timings: &RunTimings,
    failures: &[FailureRecord],
    executions: &[ExecutionRecord],
    options: &MessageOptions,
) -> MessagePayload {
    let groups = group_failures(failures);
    let skipped = count_skipped(executions) as i64;
    let failed = groups.len() as i64;
    let total = i64::try_from(stats.requests.total).unwrap_or(i64::MAX);

    let summary = SummaryFields {
        total,
        passed: total - failed - skipped,
        failed,
        skipped,
        duration: pretty_ms(timings.elapsed_ms()),
    };

    let layout = layout_for(failures, options);

    MessagePayload {
        channel: options.channel.clone(),
        attachments: vec![Attachment {
            color: layout.color().to_string(),
            blocks: layout.blocks(&summary, options),
            fields: layout.fields(&groups, options.max_message_length),
        }],
    }
}

/// Minified JSON body, ready to POST.
pub fn to_wire(payload: &MessagePayload) -> serde_json::Result<String> {
    serde_json::to_string(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{AssertionRecord, FailureSource, RequestStats};

    fn stats(total: u64) -> RunStats {
        RunStats {
            requests: RequestStats { total },
        }
    }

    fn timings() -> RunTimings {
        RunTimings {
            started: 1_000,
            completed: 2_500,
        }
    }

    fn failure(source: &str) -> FailureRecord {
        FailureRecord {
            source: Some(FailureSource {
                name: Some(source.to_string()),
            }),
            error: None,
        }
    }

    fn skipped_execution() -> ExecutionRecord {
        ExecutionRecord {
            assertions: vec![AssertionRecord {
                assertion: None,
                skipped: true,
            }],
        }
    }

    fn options() -> MessageOptions {
        MessageOptions {
            collection_name: "Orders API".into(),
            environment: "staging".into(),
            channel: "#qa".into(),
            reporting_url: "https://reports.example.com/run/42".into(),
            ..MessageOptions::default()
        }
    }

    fn summary_text(payload: &MessagePayload) -> String {
        match &payload.attachments[0].blocks[3] {
            Block::Section { text, .. } => text.as_str().to_string(),
            other => panic!("expected summary section, got {other:?}"),
        }
    }

    #[test]
    fn passed_layout_without_failures() {
        let payload = build(&stats(3), &timings(), &[], &[skipped_execution()], &options());

        assert_eq!(payload.channel, "#qa");
        assert_eq!(payload.attachments[0].color, Layout::Passed.color());
        assert_eq!(
            payload.attachments[0].blocks[0],
            Block::header("Tests passed :large_green_circle:")
        );
        assert!(summary_text(&payload).contains("Skipped: *1*"));
    }

    #[test]
    fn any_failure_selects_failed_layout() {
        let payload = build(&stats(3), &timings(), &[FailureRecord::default()], &[], &options());

        assert_eq!(payload.attachments[0].color, Layout::Failed.color());
        assert_eq!(payload.attachments[0].blocks[0], Block::header("Tests failed :red_circle:"));
        assert!(payload.attachments[0].fields.is_empty());
    }

    #[test]
    fn layout_for_matches_built_payload() {
        let detailed = MessageOptions {
            error_details: true,
            ..options()
        };
        let failures = vec![failure("A")];

        assert_eq!(layout_for(&[], &detailed), Layout::Passed);
        assert_eq!(layout_for(&failures, &options()), Layout::Failed);
        assert_eq!(layout_for(&failures, &detailed), Layout::FailedWithErrors);

        let payload = build(&stats(1), &timings(), &failures, &[], &detailed);
        assert_eq!(payload.attachments[0].fields.len(), 2);
    }

    #[test]
    fn passed_count_subtracts_groups_and_skips() {
        let failures = vec![failure("A"), failure("A"), failure("B")];
        let payload = build(&stats(10), &timings(), &failures, &[skipped_execution()], &options());
        let text = summary_text(&payload);

        assert!(text.contains("Total Requests: *10*"));
        assert!(text.contains("Passed: *7*"));
        assert!(text.contains("Failed: *2*"));
        assert!(text.contains("Skipped: *1*"));
    }

    #[test]
    fn passed_count_may_go_negative() {
        let failures = vec![failure("A"), failure("B"), failure("C")];
        let payload = build(&stats(2), &timings(), &failures, &[], &options());

        assert!(summary_text(&payload).contains("Passed: *-1*"));
    }

    #[test]
    fn context_and_link_carry_run_metadata() {
        let payload = build(&stats(1), &timings(), &[], &[], &options());
        let blocks = &payload.attachments[0].blocks;

        assert_eq!(blocks.len(), 7);
        assert_eq!(
            blocks[1],
            Block::context(Text::markdown(
                "Env: *staging* | Collection: *Orders API* | Duration: *1.5s*"
            ))
        );
        assert_eq!(blocks[2], Block::Divider);
        assert_eq!(blocks[4], Block::Divider);
        assert_eq!(
            blocks[5],
            Block::link_button(
                "Detailed report link:",
                "Open report",
                "https://reports.example.com/run/42"
            )
        );
        assert_eq!(blocks[6], Block::context(Text::plain(DEFAULT_FOOTER)));
    }

    #[test]
    fn error_details_use_the_given_limit() {
        let record = FailureRecord {
            source: Some(FailureSource {
                name: Some("Create".into()),
            }),
            error: Some(crate::report::FailureError {
                name: None,
                test: Some("status".into()),
                message: Some("expected 500 to equal 201".into()),
            }),
        };
        let opts = MessageOptions {
            max_message_length: 8,
            error_details: true,
            ..options()
        };
        let payload = build(&stats(1), &timings(), &[record], &[], &opts);
        let fields = &payload.attachments[0].fields;

        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].value, "*`1. Create - status`*");
        assert_eq!(fields[1].value, "• Expected...");
    }

    #[test]
    fn wire_format_is_minified_json() {
        let payload = build(&stats(1), &timings(), &[], &[], &options());
        let wire = to_wire(&payload).unwrap();

        assert!(!wire.contains('\n'));
        let value: serde_json::Value = serde_json::from_str(&wire).unwrap();
        assert_eq!(value["channel"], "#qa");
        assert_eq!(value["attachments"][0]["blocks"][0]["type"], "header");
        assert_eq!(
            value["attachments"][0]["blocks"][5]["accessory"]["url"],
            "https://reports.example.com/run/42"
        );
    }
}
