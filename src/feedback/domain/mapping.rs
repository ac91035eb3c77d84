//! Keyword mapping from feedback text to behaviour targets.

use serde::{Deserialize, Serialize};

use super::BehaviorTarget;

/// One keyword group and the instruction it yields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingEntry {
    /// Lower-case keywords; any one of them matches.
    pub keywords: Vec<String>,
    /// Behaviour the instruction is for.
    pub target: BehaviorTarget,
    /// Instruction given when the entry matches.
    pub instruction: String,
}

impl MappingEntry {
    fn matches(&self, lowered: &str) -> bool {
        self.keywords
            .iter()
            .any(|keyword| lowered.contains(&keyword.to_lowercase()))
    }
}

/// A feedback item mapped to a target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedFeedback {
    /// Behaviour the feedback applies to.
    pub target: BehaviorTarget,
    /// The feedback text.
    pub pattern: String,
    /// Instruction for the target.
    pub instruction: String,
}

/// Ordered keyword mapping; the first matching entry wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackMapping {
    /// Entries in priority order.
    pub entries: Vec<MappingEntry>,
}

impl FeedbackMapping {
    /// Creates a mapping from ordered entries.
    #[must_use]
    pub const fn new(entries: Vec<MappingEntry>) -> Self {
        Self { entries }
    }

    /// Returns the first entry matching `text`, ignoring case.
    #[must_use]
    pub fn match_text(&self, text: &str) -> Option<&MappingEntry> {
        let lowered = text.to_lowercase();
        self.entries.iter().find(|entry| entry.matches(&lowered))
    }

    /// Maps `text` to at most one extracted item. Blank text yields nothing.
    #[must_use]
    pub fn extract(&self, text: &str) -> Option<ExtractedFeedback> {
        let pattern = text.trim();
        if pattern.is_empty() {
            return None;
        }
        self.match_text(pattern).map(|entry| ExtractedFeedback {
            target: entry.target.clone(),
            pattern: pattern.to_owned(),
            instruction: entry.instruction.clone(),
        })
    }
}

fn entry(keywords: &[&str], target: &'static str, instruction: &str) -> MappingEntry {
    MappingEntry {
        keywords: keywords.iter().map(|keyword| (*keyword).to_owned()).collect(),
        target: BehaviorTarget::builtin(target),
        instruction: instruction.to_owned(),
    }
}

impl Default for FeedbackMapping {
    fn default() -> Self {
        Self::new(vec![
            entry(
                &["requirement", "unclear", "ambiguous", "acceptance criteria"],
                "planner",
                "Confirm requirements and acceptance criteria before decomposing work.",
            ),
            entry(
                &["too big", "scope", "estimate", "overrun", "deadline"],
                "planner",
                "Split work into increments small enough to finish within the period.",
            ),
            entry(
                &["test", "regression", "bug", "broken"],
                "executor",
                "Run the full test suite before handing work to review.",
            ),
            entry(
                &["rework", "redo", "rewrite"],
                "executor",
                "Check the task against its acceptance criteria before marking it done.",
            ),
            entry(
                &["review", "checkpoint", "feedback"],
                "reviewer",
                "Report every blocking issue in a single review pass.",
            ),
        ])
    }
}
