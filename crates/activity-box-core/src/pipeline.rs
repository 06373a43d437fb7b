use serde::Deserialize;

use crate::event::ActivityEvent;
use crate::serializer::{FormatError, serialize_event};

/// Marker appended to clipped lines.
pub const ELLIPSIS: &str = "...";

/// Default cap on the number of summary lines.
pub const DEFAULT_MAX_LINES: usize = 15;

/// Default cap on the length of each summary line, in UTF-16 code units.
pub const DEFAULT_MAX_LENGTH: usize = 95;

/// Output bounds for the published summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SummaryLimits {
    pub max_lines: usize,
    /// Line length in UTF-16 code units, ellipsis included.
    pub max_length: usize,
}

impl Default for SummaryLimits {
    fn default() -> Self {
        Self {
            max_lines: DEFAULT_MAX_LINES,
            max_length: DEFAULT_MAX_LENGTH,
        }
    }
}

/// Keep only events with a registered serializer, in feed order.
pub fn filter_recognized<'a>(
    events: impl IntoIterator<Item = &'a ActivityEvent>,
) -> impl Iterator<Item = &'a ActivityEvent> {
    events.into_iter().filter(|e| e.kind().is_some())
}

/// Keep at most `max_lines` items from the front.
pub fn limit<I: Iterator>(items: I, max_lines: usize) -> std::iter::Take<I> {
    items.take(max_lines)
}

/// Length of a line in UTF-16 code units, the unit `max_length` is measured in.
pub fn text_length(line: &str) -> usize {
    line.encode_utf16().count()
}

/// Clip a line to `max_length` UTF-16 units, ending clipped lines with `...`.
///
/// The cut falls on a char boundary, so a surrogate pair is never split and
/// the clipped line may come out one unit short. Limits below the ellipsis
/// length yield a shortened ellipsis.
pub fn truncate(line: String, max_length: usize) -> String {
    if text_length(&line) <= max_length {
        return line;
    }
    if max_length <= ELLIPSIS.len() {
        return ELLIPSIS[..max_length].to_string();
    }

    let budget = max_length - ELLIPSIS.len();
    let mut units = 0;
    let mut end = 0;
    for (idx, ch) in line.char_indices() {
        units += ch.len_utf16();
        if units > budget {
            break;
        }
        end = idx + ch.len_utf8();
    }

    let mut out = String::with_capacity(end + ELLIPSIS.len());
    out.push_str(&line[..end]);
    out.push_str(ELLIPSIS);
    out
}

/// Join lines with `\n`. No trailing newline; zero lines give "".
pub fn join_lines(lines: &[String]) -> String {
    lines.join("\n")
}

/// Run the whole filter, limit, serialize, truncate, join chain.
pub fn build_summary(
    events: &[ActivityEvent],
    limits: SummaryLimits,
) -> Result<String, FormatError> {
    let mut lines = Vec::with_capacity(limits.max_lines.min(events.len()));
    for event in limit(filter_recognized(events), limits.max_lines) {
        if let Some(line) = serialize_event(event)? {
            lines.push(truncate(line, limits.max_length));
        }
    }
    tracing::debug!(
        fetched = events.len(),
        lines = lines.len(),
        "Built activity summary"
    );
    Ok(join_lines(&lines))
}
