//! Split a model response into its enhanced-prompt and pitfalls sections.
//!
//! The model is instructed to label its two sections with
//! [`ENHANCED_PROMPT_MARKER`] and [`PITFALLS_MARKER`]. [`split`] locates the
//! first occurrence of each marker and extracts the trimmed text around
//! them. Missing markers are an expected outcome, not an error:
//!
//! | enhanced marker | pitfalls marker          | outcome                   |
//! |-----------------|--------------------------|---------------------------|
//! | found           | found after it           | [`SplitOutcome::Both`]    |
//! | found           | missing or before it     | [`SplitOutcome::EnhancedOnly`] |
//! | missing         | found                    | [`SplitOutcome::PitfallsOnly`] |
//! | missing         | missing                  | [`SplitOutcome::Unparsed`] |

use serde::Serialize;

/// Label preceding the rewritten prompt in the model response.
pub const ENHANCED_PROMPT_MARKER: &str = "**Enhanced Prompt:**";

/// Label preceding the pitfalls list in the model response.
pub const PITFALLS_MARKER: &str = "**Potential Pitfalls & Suggestions:**";

/// Prefix put in front of the raw response when no marker was found.
pub const UNPARSED_PREFIX: &str = "Could not parse AI response. Raw response:\n";

/// Pitfalls value when no marker was found.
pub const UNPARSED_PITFALLS: &str = "N/A";

/// Which sections could be recovered from the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitOutcome {
    Both,
    EnhancedOnly,
    PitfallsOnly,
    /// Neither marker was present; the raw text is carried verbatim.
    Unparsed,
}

/// The two sections extracted from a model response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SplitResult {
    pub enhanced_prompt: String,
    pub pitfalls: String,
    pub outcome: SplitOutcome,
}

impl SplitResult {
    fn new(enhanced_prompt: &str, pitfalls: &str, outcome: SplitOutcome) -> Self {
        Self {
            enhanced_prompt: enhanced_prompt.trim().to_string(),
            pitfalls: pitfalls.trim().to_string(),
            outcome,
        }
    }
}

/// Split a raw model response. Total: never fails, for any input.
///
/// ```
/// use promptcraft::{SplitOutcome, split};
///
/// let r = split("prefix **Enhanced Prompt:** AAA\n\n**Potential Pitfalls & Suggestions:** BBB");
/// assert_eq!(r.enhanced_prompt, "AAA");
/// assert_eq!(r.pitfalls, "BBB");
/// assert_eq!(r.outcome, SplitOutcome::Both);
/// ```
pub fn split(raw: &str) -> SplitResult {
    let enhanced_end = raw
        .find(ENHANCED_PROMPT_MARKER)
        .map(|start| start + ENHANCED_PROMPT_MARKER.len());
    let pitfalls_start = raw.find(PITFALLS_MARKER);

    // A pitfalls marker before the end of the enhanced marker is malformed
    // output; ignore it rather than guess which section is which.
    let pitfalls_start = match (enhanced_end, pitfalls_start) {
        (Some(a_end), Some(b)) if b < a_end => None,
        (_, b) => b,
    };

    match (enhanced_end, pitfalls_start) {
        (Some(a_end), Some(b)) => SplitResult::new(
            slice(raw, a_end, b),
            tail(raw, b + PITFALLS_MARKER.len()),
            SplitOutcome::Both,
        ),
        (Some(a_end), None) => SplitResult::new(tail(raw, a_end), "", SplitOutcome::EnhancedOnly),
        (None, Some(b)) => SplitResult::new(
            "",
            tail(raw, b + PITFALLS_MARKER.len()),
            SplitOutcome::PitfallsOnly,
        ),
        (None, None) => SplitResult {
            enhanced_prompt: format!("{UNPARSED_PREFIX}{raw}"),
            pitfalls: UNPARSED_PITFALLS.to_string(),
            outcome: SplitOutcome::Unparsed,
        },
    }
}

// Offsets come from `find` on ASCII markers, so they always sit on char
// boundaries; `get` keeps the indexing panic-free regardless.
fn slice(raw: &str, start: usize, end: usize) -> &str {
    raw.get(start..end).unwrap_or_default()
}

fn tail(raw: &str, start: usize) -> &str {
    raw.get(start..).unwrap_or_default()
}
