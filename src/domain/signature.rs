// Canonical schedule signatures and change classification
use crate::domain::interval::{format_clock, OutageInterval};

/// Signature of a day with no outages.
pub const CLEAR: &str = "CLEAR";

const SEPARATOR: &str = "|";

/// Canonical byte-stable encoding of an interval sequence. Equality of two
/// signatures is the sole change-detection test, so the rendering must stay
/// deterministic: fixed separator, zero-padded 24-hour clock, no locale
/// involvement.
pub fn signature(intervals: &[OutageInterval]) -> String {
    if intervals.is_empty() {
        return CLEAR.to_string();
    }
    intervals
        .iter()
        .map(|interval| {
            format!(
                "{}-{}",
                format_clock(interval.start),
                format_clock(interval.end)
            )
        })
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

/// How a freshly extracted signature relates to the last known one for the
/// same date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Unchanged,
    New,
    Changed,
}

/// Pure classification; recording the new signature is the caller's job and
/// happens only after the downstream notification succeeded.
pub fn classify(previous: Option<&str>, current: &str) -> ChangeKind {
    match previous {
        None => ChangeKind::New,
        Some(known) if known == current => ChangeKind::Unchanged,
        Some(_) => ChangeKind::Changed,
    }
}
