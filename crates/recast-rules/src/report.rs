//! Structured reporting for rewrite passes

use std::fmt;

use serde::Serialize;

/// Terminal state of one rule against one node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Applied,
    Skipped,
    Failed,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Outcome::Applied => "applied",
            Outcome::Skipped => "skipped",
            Outcome::Failed => "failed",
        })
    }
}

/// One rule's outcome at one node.
#[derive(Debug, Clone, Serialize)]
pub struct ReportEntry {
    /// Rule name as registered.
    pub rule: String,
    /// Tree address of the node, e.g. `root.0.2`.
    pub path: String,
    /// Node summary, e.g. `Property(uuid) @ 12..40`.
    pub node: String,
    pub outcome: Outcome,
    /// Failure message; present only for `Failed` entries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Ordered record of every rule decision made during one rewrite pass:
/// one entry per rule per visited node, in visit order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RewriteReport {
    entries: Vec<ReportEntry>,
}

impl RewriteReport {
    pub fn new() -> Self {
        RewriteReport::default()
    }

    pub(crate) fn push(&mut self, entry: ReportEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn count(&self, outcome: Outcome) -> usize {
        self.entries.iter().filter(|entry| entry.outcome == outcome).count()
    }

    pub fn applied(&self) -> usize {
        self.count(Outcome::Applied)
    }

    pub fn skipped(&self) -> usize {
        self.count(Outcome::Skipped)
    }

    pub fn failed(&self) -> usize {
        self.count(Outcome::Failed)
    }

    /// The failed entries, in visit order.
    pub fn failures(&self) -> impl Iterator<Item = &ReportEntry> {
        self.entries.iter().filter(|entry| entry.outcome == Outcome::Failed)
    }

    /// Whether every application that was attempted failed. Individual
    /// failures are warnings; this is the signal that the pass achieved
    /// nothing and the caller should keep the original tree.
    pub fn all_failed(&self) -> bool {
        self.failed() > 0 && self.applied() == 0
    }
}

impl fmt::Display for RewriteReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            write!(f, "{:>7}  {}  {}  {}", entry.outcome, entry.rule, entry.path, entry.node)?;
            if let Some(reason) = &entry.reason {
                write!(f, ": {reason}")?;
            }
            writeln!(f)?;
        }
        writeln!(
            f,
            "{} applied, {} skipped, {} failed",
            self.applied(),
            self.skipped(),
            self.failed()
        )
    }
}
