use anyhow::{Result, anyhow};
use git_executor::git_command_executor::GitCommandExecutor;
use serde::{Deserialize, Serialize};
#[cfg(feature = "specta")]
use specta::Type;
use tracing::instrument;

/// Details of a single historical commit as reported by the git CLI.
/// Immutable input to this crate; created by the history engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "specta", derive(Type))]
#[serde(rename_all = "camelCase")]
pub struct Commit {
  pub id: String,
  /// First line of the commit message
  pub subject: String,
  /// Full commit message (including subject)
  pub message: String,
  pub author_name: String,
  pub author_timestamp: u32,
  pub committer_timestamp: u32,
  /// First parent; `None` for a root commit
  pub parent_id: Option<String>,
}

// Delimiter-based format so fields survive arbitrary message content
const COMMIT_FORMAT: &str = "%H%x1f%B%x1f%an%x1f%at%x1f%ct%x1f%P";

/// Load the details of `rev` from the repository at `repo_path`.
#[instrument(skip(git_executor))]
pub fn get_commit_details(git_executor: &GitCommandExecutor, repo_path: &str, rev: &str) -> Result<Commit> {
  let format_arg = format!("--format={COMMIT_FORMAT}");
  let record = git_executor.execute(&["--no-pager", "show", "--no-patch", &format_arg, rev], repo_path)?;
  parse_commit_record(&record)
}

/// Parse a single delimiter-separated commit record
pub fn parse_commit_record(record: &str) -> Result<Commit> {
  let mut fields = record.split('\x1f');

  let id_field = fields.next().ok_or_else(|| anyhow!("Missing commit ID field"))?;
  let message_field = fields.next().ok_or_else(|| anyhow!("Missing message field"))?;
  let author_name_field = fields.next().ok_or_else(|| anyhow!("Missing author name field"))?;
  let author_timestamp_field = fields.next().ok_or_else(|| anyhow!("Missing author timestamp field"))?;
  let committer_timestamp_field = fields.next().ok_or_else(|| anyhow!("Missing committer timestamp field"))?;
  let parents_field = fields.next().ok_or_else(|| anyhow!("Missing parents field"))?;

  let subject = message_field.lines().next().unwrap_or("").to_string();
  let message = message_field.trim().to_string();

  let author_timestamp = author_timestamp_field
    .parse::<u32>()
    .map_err(|e| anyhow!("Failed to parse author timestamp '{}': {}", author_timestamp_field, e))?;
  let committer_timestamp = committer_timestamp_field
    .parse::<u32>()
    .map_err(|e| anyhow!("Failed to parse committer timestamp '{}': {}", committer_timestamp_field, e))?;

  // First parent only; merge commits list further parents after a space
  let parent_id = parents_field.split_whitespace().next().map(|p| p.to_string());

  Ok(Commit {
    id: id_field.trim().to_string(),
    subject,
    message,
    author_name: author_name_field.to_string(),
    author_timestamp,
    committer_timestamp,
    parent_id,
  })
}
