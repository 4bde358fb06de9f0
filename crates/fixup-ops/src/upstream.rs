use crate::commit_details::Commit;
use crate::model::RebaseUpstream;
use std::fmt;
use tracing::instrument;

/// Failure to derive a rebase upstream for a commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionError {
  /// The commit has no parent, so there is no ancestor to rebase onto
  RootCommit { commit_id: String },
}

impl fmt::Display for ResolutionError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ResolutionError::RootCommit { commit_id } => {
        write!(f, "commit {commit_id} is a root commit and has no upstream to rebase onto")
      }
    }
  }
}

impl std::error::Error for ResolutionError {}

/// Derive the upstream an interactive rebase must start from so that
/// `commit` is part of the rewritten range: its immediate parent. The
/// parent is the closest ancestor, so no unrelated history gets rewritten.
#[instrument(skip(commit), fields(commit = %commit.id))]
pub fn resolve_upstream(commit: &Commit) -> Result<RebaseUpstream, ResolutionError> {
  match &commit.parent_id {
    Some(parent) => Ok(RebaseUpstream::Commit(parent.clone())),
    None => Err(ResolutionError::RootCommit { commit_id: commit.id.clone() }),
  }
}
