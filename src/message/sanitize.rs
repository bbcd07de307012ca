use crate::report::aggregate::GroupedFailure;

use super::blocks::AttachmentField;

const ELLIPSIS: &str = "...";

/// Makes an assertion message fit a chat field.
///
/// Quotes are stripped, the first lowercase `expected` becomes `Expected -`,
/// and anything beyond `max_len` characters is cut and marked with `...`.
pub fn clean_error_message(message: &str, max_len: usize) -> String {
    let filtered: String = message.chars().filter(|c| !matches!(c, '"' | '\'')).collect();
    let filtered = filtered.replacen("expected", "Expected -", 1);

    let cut = filtered.char_indices().nth(max_len).map(|(index, _)| index);
    match cut {
        Some(cut) => format!("{}{ELLIPSIS}", &filtered[..cut]),
        None => filtered,
    }
}

/// Two attachment fields per failed test: a numbered title and the cleaned message.
pub fn fail_errors(groups: &[GroupedFailure], max_len: usize) -> Vec<AttachmentField> {
    groups
        .iter()
        .flat_map(|group| group.tests.iter().map(move |test| (group.name.as_str(), test)))
        .enumerate()
        .flat_map(|(index, (request, test))| {
            [
                AttachmentField {
                    value: format!("*`{}. {} - {}`*", index + 1, request, test.test),
                    short: false,
                },
                AttachmentField {
                    value: format!("• {}", clean_error_message(&test.message, max_len)),
                    short: false,
                },
            ]
        })
        .collect()
}
