use crate::commit_details::Commit;
use serde::{Deserialize, Serialize};
#[cfg(feature = "specta")]
use specta::Type;

/// How the new commit should be folded into the target during autosquash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "specta", derive(Type))]
#[serde(rename_all = "lowercase")]
pub enum SquashKind {
  /// Fold in silently, keeping the target's message
  Fixup,
  /// Fold in and combine the messages
  Squash,
}

impl SquashKind {
  fn marker(self) -> &'static str {
    match self {
      SquashKind::Fixup => "fixup!",
      SquashKind::Squash => "squash!",
    }
  }
}

/// Subject for the new commit, in the form `git rebase --autosquash`
/// matches against the target commit's subject.
pub fn autosquash_subject(kind: SquashKind, target: &Commit) -> String {
  format!("{} {}", kind.marker(), target.subject)
}
