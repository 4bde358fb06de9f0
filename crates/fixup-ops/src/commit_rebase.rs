use crate::model::RebaseUpstream;
use crate::registry::Repository;
use anyhow::{Result, anyhow};
use git_executor::git_command_executor::GitCommandExecutor;
use serde::Serialize;
#[cfg(feature = "specta")]
use specta::Type;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Phase of the deferred commit-then-rebase sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "specta", derive(Type))]
pub enum ExecutorPhase {
  Idle,
  CommitSubmitted,
  RebasePending,
  RebaseCompleted,
  Failed,
}

/// Executes the interactive rebase once the commit session has finished.
/// Conflict and failure reporting stays with the implementation; this
/// crate neither retries nor wraps its errors.
pub trait RebaseRunner {
  fn rebase(&self, repo: &Repository, upstream: &RebaseUpstream) -> Result<()>;
}

/// Production runner: `git rebase --interactive --autosquash` with the
/// sequence editor suppressed, so the todo list is applied as generated.
/// With the new commit carrying a fixup!/squash! subject, autosquash moves
/// it into place below the target commit.
pub struct AutosquashRebaseRunner<'a> {
  git_executor: &'a GitCommandExecutor,
}

impl<'a> AutosquashRebaseRunner<'a> {
  pub fn new(git_executor: &'a GitCommandExecutor) -> Self {
    Self { git_executor }
  }
}

impl RebaseRunner for AutosquashRebaseRunner<'_> {
  #[instrument(skip_all, fields(repo = %repo.root, upstream = %upstream.as_rev()))]
  fn rebase(&self, repo: &Repository, upstream: &RebaseUpstream) -> Result<()> {
    // GIT_EDITOR also suppressed: a squash! commit opens the message editor
    let env_vars = [("GIT_SEQUENCE_EDITOR", "true"), ("GIT_EDITOR", "true")];
    self
      .git_executor
      .execute_with_env(&["rebase", "--interactive", "--autosquash", upstream.as_rev()], &repo.root, &env_vars)?;
    Ok(())
  }
}

/// Deferred commit-then-rebase unit of work.
///
/// Constructed only after a fresh eligibility check (see `build_executors`).
/// Holds nothing but read-only references across the two phases; the single
/// suspension point is between the commit session finishing and
/// `on_commit_finished` being called. A cancelled session simply never
/// advances the phase.
#[derive(Debug)]
pub struct CommitAndRebase {
  repo: Arc<Repository>,
  upstream: RebaseUpstream,
  phase: ExecutorPhase,
}

impl CommitAndRebase {
  pub fn new(repo: Arc<Repository>, upstream: RebaseUpstream) -> Self {
    Self {
      repo,
      upstream,
      phase: ExecutorPhase::Idle,
    }
  }

  pub fn phase(&self) -> ExecutorPhase {
    self.phase
  }

  pub fn repository(&self) -> &Arc<Repository> {
    &self.repo
  }

  pub fn upstream(&self) -> &RebaseUpstream {
    &self.upstream
  }

  /// The committed set may be a strict subset of the originally selected
  /// changes; staging decides.
  pub fn supports_partial_commit(&self) -> bool {
    true
  }

  /// The commit session has been handed to the presentation collaborator.
  pub fn submit_commit(&mut self) -> Result<()> {
    match self.phase {
      ExecutorPhase::Idle => {
        self.phase = ExecutorPhase::CommitSubmitted;
        Ok(())
      }
      phase => Err(anyhow!("commit can only be submitted from Idle, current phase is {phase:?}")),
    }
  }

  /// Completion notification from the commit session. A failed commit ends
  /// the sequence; the failure itself is reported by the presentation
  /// collaborator, this machine only records the terminal phase.
  pub fn on_commit_finished(&mut self, success: bool) -> Result<ExecutorPhase> {
    match (self.phase, success) {
      (ExecutorPhase::CommitSubmitted, true) => {
        self.phase = ExecutorPhase::RebasePending;
      }
      (ExecutorPhase::CommitSubmitted, false) => {
        debug!("commit session failed, sequence ends");
        self.phase = ExecutorPhase::Failed;
      }
      (phase, _) => {
        return Err(anyhow!("commit completion is only expected in CommitSubmitted, current phase is {phase:?}"));
      }
    }
    Ok(self.phase)
  }

  /// Second phase: rebase onto the held upstream. A failed or conflicted
  /// rebase ends in `Failed` and hands the runner's error back untouched;
  /// nothing is retried here.
  #[instrument(skip_all, fields(repo = %self.repo.root, upstream = %self.upstream.as_rev()))]
  pub fn run_rebase(&mut self, runner: &dyn RebaseRunner) -> Result<()> {
    if self.phase != ExecutorPhase::RebasePending {
      return Err(anyhow!("rebase can only run in RebasePending, current phase is {:?}", self.phase));
    }

    match runner.rebase(&self.repo, &self.upstream) {
      Ok(()) => {
        debug!("autosquash rebase completed");
        self.phase = ExecutorPhase::RebaseCompleted;
        Ok(())
      }
      Err(error) => {
        self.phase = ExecutorPhase::Failed;
        Err(error)
      }
    }
  }
}
