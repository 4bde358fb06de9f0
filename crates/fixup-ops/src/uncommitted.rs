use crate::model::{ChangeKind, PendingChange};
use crate::registry::{Repository, RepositoryRegistry};
use anyhow::Result;
use git_executor::git_command_executor::GitCommandExecutor;
use tracing::instrument;

/// Parse `git status --porcelain -z` output into pending changes.
///
/// Paths are made absolute against the repository root so that snapshots
/// from several repositories can be merged into one change set.
pub fn parse_status_output(status_output: &str, repo: &Repository) -> Vec<PendingChange> {
  // Work on raw bytes; entries are NUL-terminated so unusual filenames survive
  let bytes = status_output.as_bytes();
  let approx_entries = bytes.iter().filter(|&&b| b == 0).count();
  let mut changes = Vec::with_capacity(approx_entries);

  let mut entries = bytes.split(|&b| b == 0);
  while let Some(entry) = entries.next() {
    if entry.len() < 3 {
      continue;
    }

    // First two bytes are the staged/unstaged status codes, then a space, then the path
    let staged_code = entry[0] as char;
    let unstaged_code = entry[1] as char;

    let path_start = if entry.len() > 3 && entry[2] == b' ' { 3 } else { 2 };
    if entry.len() <= path_start {
      continue;
    }

    let relative_path = String::from_utf8_lossy(&entry[path_start..]).into_owned();

    let kind = match (staged_code, unstaged_code) {
      ('A', _) | ('?', '?') => ChangeKind::Added,
      ('M', _) | (_, 'M') => ChangeKind::Modified,
      ('D', _) | (_, 'D') => ChangeKind::Deleted,
      ('R', _) => ChangeKind::Renamed,
      ('C', _) => ChangeKind::Copied,
      _ => ChangeKind::Modified,
    };

    if matches!(kind, ChangeKind::Renamed | ChangeKind::Copied) {
      // porcelain -z emits the original path as a separate NUL-terminated record
      entries.next();
    }

    changes.push(PendingChange {
      path: repo.root_path().join(relative_path),
      kind,
      staged: staged_code != ' ' && staged_code != '?',
      unstaged: unstaged_code != ' ',
    });
  }

  changes
}

/// Snapshot the uncommitted changes of one repository.
#[instrument(skip(git_executor, repo), fields(repo = %repo.root))]
pub fn pending_changes(git_executor: &GitCommandExecutor, repo: &Repository) -> Result<Vec<PendingChange>> {
  // execute_raw preserves exact git status formatting (including leading spaces)
  let status_output = git_executor.execute_raw(&["status", "--porcelain", "-z"], &repo.root)?;
  Ok(parse_status_output(&status_output, repo))
}

/// Snapshot across every registered repository: the global default change
/// set the action's enablement pre-check looks at.
#[instrument(skip_all)]
pub fn default_change_set(git_executor: &GitCommandExecutor, registry: &RepositoryRegistry) -> Result<Vec<PendingChange>> {
  let mut all_changes = Vec::new();
  for repo in registry.repositories() {
    all_changes.extend(pending_changes(git_executor, repo)?);
  }
  Ok(all_changes)
}
