use serde::Serialize;

use super::{ExecutionRecord, FailureRecord};

pub const DEFAULT_SOURCE_NAME: &str = "No Name";
pub const DEFAULT_TEST_NAME: &str = "No test name";
pub const DEFAULT_TEST_LABEL: &str = "connection error";
pub const DEFAULT_ERROR_MESSAGE: &str = "No Error Message";

/// Failures of one request, in report order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupedFailure {
    pub name: String,
    pub tests: Vec<FailedTest>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedTest {
    pub name: String,
    pub test: String,
    pub message: String,
}

impl FailedTest {
    fn from_record(record: &FailureRecord) -> Self {
        Self {
            name: or_default(record.error_name(), DEFAULT_TEST_NAME),
            test: or_default(record.error_test(), DEFAULT_TEST_LABEL),
            message: or_default(record.error_message(), DEFAULT_ERROR_MESSAGE),
        }
    }
}

/// Groups failures by runs of the same source name.
///
/// Only adjacent records are merged: `[A, B, A]` yields three groups. The raw
/// source name is compared against the previous group's name, so records
/// without a source name never merge into a `"No Name"` group.
pub fn group_failures(failures: &[FailureRecord]) -> Vec<GroupedFailure> {
    let mut groups: Vec<GroupedFailure> = Vec::new();

    for failure in failures {
        let test = FailedTest::from_record(failure);
        match groups.last_mut() {
            Some(last) if failure.source_name() == Some(last.name.as_str()) => {
                last.tests.push(test);
            }
            _ => groups.push(GroupedFailure {
                name: or_default(failure.source_name(), DEFAULT_SOURCE_NAME),
                tests: vec![test],
            }),
        }
    }

    groups
}

/// Number of executions whose first assertion was skipped.
pub fn count_skipped(executions: &[ExecutionRecord]) -> usize {
    executions
        .iter()
        .filter(|execution| {
            execution
                .assertions
                .first()
                .is_some_and(|assertion| assertion.skipped)
        })
        .count()
}

fn or_default(value: Option<&str>, default: &str) -> String {
    match value {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => default.to_string(),
    }
}
