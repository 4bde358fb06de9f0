use super::commit_details::get_commit_details;
use super::commit_rebase::{AutosquashRebaseRunner, CommitAndRebase, ExecutorPhase, RebaseRunner};
use super::message::{SquashKind, autosquash_subject};
use super::model::{ProhibitionReason, RebaseUpstream};
use super::registry::{Repository, RepositoryRegistry};
use super::repo_state::check_rebase_eligibility;
use super::upstream::resolve_upstream;
use anyhow::{Result, anyhow};
use pretty_assertions::assert_eq;
use std::cell::Cell;
use std::sync::Arc;
use test_log::test;
use test_utils::git_test_utils::TestRepo;

struct StubRunner {
  calls: Cell<u32>,
  fail: bool,
}

impl StubRunner {
  fn succeeding() -> Self {
    Self { calls: Cell::new(0), fail: false }
  }

  fn conflicting() -> Self {
    Self { calls: Cell::new(0), fail: true }
  }
}

impl RebaseRunner for StubRunner {
  fn rebase(&self, _repo: &Repository, _upstream: &RebaseUpstream) -> Result<()> {
    self.calls.set(self.calls.get() + 1);
    if self.fail { Err(anyhow!("rebase stopped on a conflict")) } else { Ok(()) }
  }
}

fn machine() -> CommitAndRebase {
  let mut registry = RepositoryRegistry::new();
  let repo = registry.register("/work/alpha");
  CommitAndRebase::new(repo, RebaseUpstream::Commit("a3d81b4".to_string()))
}

#[test]
fn test_full_sequence_reaches_rebase_completed() {
  let runner = StubRunner::succeeding();
  let mut executor = machine();
  assert_eq!(executor.phase(), ExecutorPhase::Idle);

  executor.submit_commit().unwrap();
  assert_eq!(executor.phase(), ExecutorPhase::CommitSubmitted);

  executor.on_commit_finished(true).unwrap();
  assert_eq!(executor.phase(), ExecutorPhase::RebasePending);

  executor.run_rebase(&runner).unwrap();
  assert_eq!(executor.phase(), ExecutorPhase::RebaseCompleted);
  assert_eq!(runner.calls.get(), 1);
}

#[test]
fn test_commit_failure_ends_in_failed() {
  let runner = StubRunner::succeeding();
  let mut executor = machine();

  executor.submit_commit().unwrap();
  executor.on_commit_finished(false).unwrap();
  assert_eq!(executor.phase(), ExecutorPhase::Failed);

  // The rebase phase is never entered after a failed commit
  assert!(executor.run_rebase(&runner).is_err());
  assert_eq!(runner.calls.get(), 0);
}

#[test]
fn test_rebase_conflict_ends_in_failed_and_is_not_retried() {
  let runner = StubRunner::conflicting();
  let mut executor = machine();

  executor.submit_commit().unwrap();
  executor.on_commit_finished(true).unwrap();

  let error = executor.run_rebase(&runner).unwrap_err();
  assert!(error.to_string().contains("conflict"));
  assert_eq!(executor.phase(), ExecutorPhase::Failed);

  // A second attempt is rejected without reaching the runner again
  assert!(executor.run_rebase(&runner).is_err());
  assert_eq!(runner.calls.get(), 1);
}

#[test]
fn test_rebase_cannot_start_before_commit_completes() {
  let runner = StubRunner::succeeding();
  let mut executor = machine();

  assert!(executor.run_rebase(&runner).is_err());
  assert_eq!(executor.phase(), ExecutorPhase::Idle);

  executor.submit_commit().unwrap();
  assert!(executor.run_rebase(&runner).is_err());
  assert_eq!(executor.phase(), ExecutorPhase::CommitSubmitted);
  assert_eq!(runner.calls.get(), 0);
}

#[test]
fn test_commit_cannot_be_submitted_twice() {
  let mut executor = machine();
  executor.submit_commit().unwrap();
  assert!(executor.submit_commit().is_err());
}

#[test]
fn test_commit_completion_is_rejected_outside_commit_submitted() {
  let mut executor = machine();
  assert!(executor.on_commit_finished(true).is_err());
  assert_eq!(executor.phase(), ExecutorPhase::Idle);
}

#[test]
fn test_supports_partial_commit() {
  assert!(machine().supports_partial_commit());
}

fn register(repo: &TestRepo) -> Arc<Repository> {
  let mut registry = RepositoryRegistry::new();
  registry.register(repo.path_str())
}

#[test]
fn test_autosquash_folds_pending_change_into_target() -> Result<()> {
  let repo = TestRepo::new();
  repo.create_commit("Initial commit", "README.md", "hello\n");
  let target_hash = repo.create_commit("Add config loader", "config.toml", "a = 1\n");
  repo.create_commit("Add api module", "api.txt", "x\n");

  // The late fix that belongs into the target commit
  repo.write_file("config.toml", "a = 2\n");

  let handle = register(&repo);
  let target = get_commit_details(repo.git(), repo.path_str(), &target_hash)?;
  let upstream = resolve_upstream(&target)?;

  // The commit session commits the pending change under a fixup! subject
  repo.commit_all(&autosquash_subject(SquashKind::Fixup, &target));

  let mut executor = CommitAndRebase::new(handle, upstream);
  executor.submit_commit()?;
  executor.on_commit_finished(true)?;
  executor.run_rebase(&AutosquashRebaseRunner::new(repo.git()))?;

  assert_eq!(executor.phase(), ExecutorPhase::RebaseCompleted);
  assert_eq!(repo.commit_count(), 3);
  assert_eq!(repo.file_content("config.toml"), "a = 2\n");
  assert_eq!(repo.subjects(3), vec!["Add api module", "Add config loader", "Initial commit"]);
  Ok(())
}

#[test]
fn test_real_rebase_conflict_leaves_machine_failed() -> Result<()> {
  let repo = TestRepo::new();
  repo.create_commit("Initial commit", "README.md", "hello\n");
  let target_hash = repo.create_commit("Add config loader", "config.toml", "a = 1\n");
  // A later commit rewrites the same line, so folding the fix below it conflicts
  repo.create_commit("Bump config", "config.toml", "a = 10\n");

  repo.write_file("config.toml", "a = 2\n");

  let handle = register(&repo);
  let target = get_commit_details(repo.git(), repo.path_str(), &target_hash)?;
  let upstream = resolve_upstream(&target)?;

  repo.commit_all(&autosquash_subject(SquashKind::Fixup, &target));

  let mut executor = CommitAndRebase::new(handle.clone(), upstream);
  executor.submit_commit()?;
  executor.on_commit_finished(true)?;

  assert!(executor.run_rebase(&AutosquashRebaseRunner::new(repo.git())).is_err());
  assert_eq!(executor.phase(), ExecutorPhase::Failed);

  // The repository is now mid-rebase, which the state query reports
  assert_eq!(
    check_rebase_eligibility(repo.git(), &handle).unwrap(),
    Some(ProhibitionReason::RebaseInProgress)
  );
  Ok(())
}
