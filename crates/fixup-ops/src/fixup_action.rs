use crate::commit_details::Commit;
use crate::commit_rebase::CommitAndRebase;
use crate::executors::build_executors;
use crate::message::{SquashKind, autosquash_subject};
use crate::model::{CommitExecutor, PendingChange};
use crate::partition::partition_changes;
use crate::registry::{Repository, RepositoryRegistry};
use anyhow::Result;
use git_executor::git_command_executor::GitCommandExecutor;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Reason shown when the action is disabled because no change is pending
/// anywhere.
pub const NOTHING_TO_COMMIT: &str = "No pending changes to commit";

/// Enabled/disabled state surfaced to the UI layer, recomputed on every
/// visibility query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionPresentation {
  pub enabled: bool,
  pub reason: Option<&'static str>,
}

/// Pre-check over the global pending-change snapshot.
///
/// This only looks at the global set; the per-repository narrowing happens
/// in `perform`, which re-checks, since a non-empty global set can still
/// come up empty once partitioned.
pub fn update_presentation(global_changes: &[PendingChange]) -> ActionPresentation {
  if global_changes.is_empty() {
    ActionPresentation {
      enabled: false,
      reason: Some(NOTHING_TO_COMMIT),
    }
  } else {
    ActionPresentation { enabled: true, reason: None }
  }
}

/// Receives the prepared commit session, or the nothing-to-commit signal.
pub trait CommitPresenter {
  fn show_commit_ui(&mut self, repo: &Arc<Repository>, changes: Vec<PendingChange>, executors: Vec<CommitExecutor>, commit_message: String);
  fn notify_nothing_to_commit(&mut self);
}

/// Outcome of invoking the action.
#[derive(Debug)]
pub enum ActionOutcome {
  /// No pending change belongs to the target repository; the presenter was
  /// notified instead of being shown a commit session.
  NothingToCommit,
  /// The commit session was handed to the presenter. When the
  /// commit-then-rebase alternative was offered, the prepared state machine
  /// is returned so the caller can drive it once the commit finishes.
  Presented { commit_and_rebase: Option<CommitAndRebase> },
}

/// Folds pending working-copy changes into an existing historical commit:
/// commit the changes with an autosquash subject, then optionally rebase so
/// the new commit lands next to its target.
pub struct FixupAction {
  kind: SquashKind,
}

impl FixupAction {
  pub fn new(kind: SquashKind) -> Self {
    Self { kind }
  }

  #[instrument(skip_all, fields(repo = %repo.root, target = %target_commit.id, kind = ?self.kind))]
  pub fn perform(
    &self,
    git_executor: &GitCommandExecutor,
    registry: &RepositoryRegistry,
    snapshot: &[PendingChange],
    repo: &Arc<Repository>,
    target_commit: &Commit,
    presenter: &mut dyn CommitPresenter,
  ) -> Result<ActionOutcome> {
    let changes = partition_changes(registry, snapshot, repo);
    if changes.is_empty() {
      debug!("no pending changes belong to the target repository");
      presenter.notify_nothing_to_commit();
      return Ok(ActionOutcome::NothingToCommit);
    }

    let executors = build_executors(git_executor, repo, target_commit)?;
    let commit_and_rebase = executors.iter().find_map(|executor| match executor {
      CommitExecutor::CommitThenRebase { upstream } => Some(CommitAndRebase::new(repo.clone(), upstream.clone())),
      CommitExecutor::NativeCommit => None,
    });

    let commit_message = autosquash_subject(self.kind, target_commit);
    presenter.show_commit_ui(repo, changes, executors, commit_message);

    Ok(ActionOutcome::Presented { commit_and_rebase })
  }
}
