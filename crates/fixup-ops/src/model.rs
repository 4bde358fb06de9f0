use serde::{Deserialize, Serialize};
#[cfg(feature = "specta")]
use specta::Type;
use std::fmt;
use std::path::PathBuf;

/// Kind of an uncommitted modification, derived from git status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "specta", derive(Type))]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
  Added,
  Modified,
  Deleted,
  Renamed,
  Copied,
}

/// An uncommitted modification to a single file.
///
/// Paths are absolute so that ownership stays resolvable after snapshots
/// from several repositories are merged into one change set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "specta", derive(Type))]
#[serde(rename_all = "camelCase")]
pub struct PendingChange {
  pub path: PathBuf,
  pub kind: ChangeKind,
  pub staged: bool,
  pub unstaged: bool,
}

/// Where a rebase should start so that the target commit is part of the
/// rewritten range. Computed fresh per invocation, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "specta", derive(Type))]
#[serde(rename_all = "camelCase")]
pub enum RebaseUpstream {
  /// A plain commit reference (hash).
  Commit(String),
  /// A branch or other symbolic ref.
  Branch(String),
}

impl RebaseUpstream {
  /// Revision string handed to `git rebase`.
  pub fn as_rev(&self) -> &str {
    match self {
      RebaseUpstream::Commit(rev) | RebaseUpstream::Branch(rev) => rev,
    }
  }
}

/// Why a repository must not start a new rebase right now.
/// The message is opaque to this layer; localization happens at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "specta", derive(Type))]
pub enum ProhibitionReason {
  RebaseInProgress,
  MergeInProgress,
  CherryPickInProgress,
  RevertInProgress,
  UnresolvedConflicts,
  DetachedHead,
}

impl ProhibitionReason {
  pub fn message(&self) -> &'static str {
    match self {
      ProhibitionReason::RebaseInProgress => "a rebase is already in progress",
      ProhibitionReason::MergeInProgress => "a merge is in progress",
      ProhibitionReason::CherryPickInProgress => "a cherry-pick is in progress",
      ProhibitionReason::RevertInProgress => "a revert is in progress",
      ProhibitionReason::UnresolvedConflicts => "there are unresolved conflicts",
      ProhibitionReason::DetachedHead => "HEAD is detached",
    }
  }
}

impl fmt::Display for ProhibitionReason {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.message())
  }
}

/// One way to finalize a set of pending changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "specta", derive(Type))]
#[serde(rename_all = "camelCase")]
pub enum CommitExecutor {
  /// Plain commit, handled entirely by the backend.
  NativeCommit,
  /// Commit, then rebase onto the held upstream so the new commit can be
  /// squashed into place.
  CommitThenRebase { upstream: RebaseUpstream },
}

impl CommitExecutor {
  pub fn action_text(&self) -> &'static str {
    match self {
      CommitExecutor::NativeCommit => "Commit",
      CommitExecutor::CommitThenRebase { .. } => "Commit and Rebase",
    }
  }

  /// Whether the executor tolerates committing a strict subset of the
  /// originally selected changes. Staging decides the final set.
  pub fn supports_partial_commit(&self) -> bool {
    match self {
      CommitExecutor::NativeCommit | CommitExecutor::CommitThenRebase { .. } => true,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_upstream_as_rev() {
    assert_eq!(RebaseUpstream::Commit("a3d81b4".to_string()).as_rev(), "a3d81b4");
    assert_eq!(RebaseUpstream::Branch("feature/auth".to_string()).as_rev(), "feature/auth");
  }

  #[test]
  fn test_executor_action_text() {
    assert_eq!(CommitExecutor::NativeCommit.action_text(), "Commit");
    let with_rebase = CommitExecutor::CommitThenRebase {
      upstream: RebaseUpstream::Commit("a3d81b4".to_string()),
    };
    assert_eq!(with_rebase.action_text(), "Commit and Rebase");
  }

  #[test]
  fn test_every_executor_supports_partial_commit() {
    let with_rebase = CommitExecutor::CommitThenRebase {
      upstream: RebaseUpstream::Branch("feature/auth".to_string()),
    };
    assert!(CommitExecutor::NativeCommit.supports_partial_commit());
    assert!(with_rebase.supports_partial_commit());
  }

  #[test]
  fn test_prohibition_reason_display_matches_message() {
    assert_eq!(ProhibitionReason::RebaseInProgress.to_string(), "a rebase is already in progress");
    assert_eq!(ProhibitionReason::DetachedHead.to_string(), ProhibitionReason::DetachedHead.message());
  }
}
