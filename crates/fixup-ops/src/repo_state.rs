use crate::model::ProhibitionReason;
use crate::registry::Repository;
use anyhow::Result;
use git_executor::git_command_executor::GitCommandExecutor;
use std::path::Path;
use tracing::{debug, instrument};

/// Check whether the repository is in a plain state that allows starting a
/// new rebase.
///
/// `None` means eligible; `Some` carries the reason a rebase must not start
/// right now. Always a live read: callers re-check at the point of use, the
/// result is never cached. A hard git failure propagates as an error and is
/// distinct from a prohibition.
#[instrument(skip(git_executor, repo), fields(repo = %repo.root))]
pub fn check_rebase_eligibility(git_executor: &GitCommandExecutor, repo: &Repository) -> Result<Option<ProhibitionReason>> {
  let git_dir = git_executor.execute(&["rev-parse", "--absolute-git-dir"], &repo.root)?;
  let git_dir = Path::new(git_dir.trim());

  // Operation markers first so the reason names the operation rather than
  // the conflicts it left in the index
  let reason = if git_dir.join("rebase-merge").exists() || git_dir.join("rebase-apply").exists() {
    Some(ProhibitionReason::RebaseInProgress)
  } else if git_dir.join("MERGE_HEAD").exists() {
    Some(ProhibitionReason::MergeInProgress)
  } else if git_dir.join("CHERRY_PICK_HEAD").exists() {
    Some(ProhibitionReason::CherryPickInProgress)
  } else if git_dir.join("REVERT_HEAD").exists() {
    Some(ProhibitionReason::RevertInProgress)
  } else if has_unmerged_entries(git_executor, repo)? {
    Some(ProhibitionReason::UnresolvedConflicts)
  } else if is_detached_head(git_executor, repo)? {
    Some(ProhibitionReason::DetachedHead)
  } else {
    None
  };

  if let Some(reason) = reason {
    debug!(%reason, "repository is not eligible for a new rebase");
  }
  Ok(reason)
}

fn has_unmerged_entries(git_executor: &GitCommandExecutor, repo: &Repository) -> Result<bool> {
  let unmerged = git_executor.execute_lines(&["diff", "--name-only", "--diff-filter=U"], &repo.root)?;
  Ok(!unmerged.is_empty())
}

fn is_detached_head(git_executor: &GitCommandExecutor, repo: &Repository) -> Result<bool> {
  let (_, exit_code) = git_executor.execute_with_status(&["symbolic-ref", "-q", "HEAD"], &repo.root)?;
  Ok(exit_code != 0)
}
