use crate::commit_details::Commit;
use crate::model::CommitExecutor;
use crate::registry::Repository;
use crate::repo_state::check_rebase_eligibility;
use crate::upstream::resolve_upstream;
use anyhow::Result;
use git_executor::git_command_executor::GitCommandExecutor;
use tracing::{debug, instrument};

/// Assemble the ways the pending changes may be committed: the native
/// commit always comes first; commit-then-rebase is appended only when the
/// repository state allows a new rebase and the target commit has an
/// upstream to rebase onto.
///
/// Eligibility is checked fresh on every call. A prohibition or a root
/// commit merely shrinks the list; neither is an error for the action.
#[instrument(skip_all, fields(repo = %repo.root, target = %target_commit.id))]
pub fn build_executors(git_executor: &GitCommandExecutor, repo: &Repository, target_commit: &Commit) -> Result<Vec<CommitExecutor>> {
  let mut executors = vec![CommitExecutor::NativeCommit];

  match check_rebase_eligibility(git_executor, repo)? {
    Some(reason) => {
      debug!(%reason, "omitting commit-and-rebase executor");
    }
    None => match resolve_upstream(target_commit) {
      Ok(upstream) => executors.push(CommitExecutor::CommitThenRebase { upstream }),
      Err(error) => {
        debug!(%error, "omitting commit-and-rebase executor");
      }
    },
  }

  Ok(executors)
}
