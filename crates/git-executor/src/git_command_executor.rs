use crate::git_info::GitInfo;
use anyhow::{Result, anyhow};
use std::process::{Command, Output};
use std::sync::{Arc, OnceLock};
use tracing::instrument;

/// Runs git commands against a repository working directory.
/// The git binary is discovered lazily on first use and shared by clones.
#[derive(Clone, Debug, Default)]
pub struct GitCommandExecutor {
  info: Arc<OnceLock<GitInfo>>,
}

impl GitCommandExecutor {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  pub fn get_info(&self) -> Result<GitInfo> {
    if let Some(info) = self.info.get() {
      return Ok(info.clone());
    }

    let info = GitInfo::discover().map_err(|e| anyhow!(e))?;
    tracing::info!(git_version = %info.version, git_path = %info.path, "discovered git info");
    Ok(self.info.get_or_init(|| info).clone())
  }

  fn run(&self, args: &[&str], repository_path: &str, env_vars: &[(&str, &str)]) -> Result<Output> {
    if repository_path.is_empty() {
      return Err(anyhow!("repository path cannot be blank"));
    }
    let git_info = self.get_info()?;

    let mut cmd = Command::new(&git_info.path);
    cmd.args(args).current_dir(repository_path);
    for (key, value) in env_vars {
      cmd.env(key, value);
    }

    cmd.output().map_err(|e| anyhow!("Failed to execute git command: {e}"))
  }

  fn failure(output: &Output, args: &[&str]) -> anyhow::Error {
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    tracing::Span::current().record("success", false);
    tracing::error!(stderr = %stderr, "git command failed");
    anyhow!("git command failed: git {}\nError: {stderr}", args.join(" "))
  }

  fn success(output: &Output) -> String {
    tracing::Span::current().record("success", true);
    String::from_utf8_lossy(&output.stdout).trim().to_string()
  }

  /// Execute a git command and return trimmed stdout
  #[instrument(
    skip(self),
    fields(
      git_command = args.join(" "),
      repository_path = repository_path,
      success = tracing::field::Empty,
    )
  )]
  pub fn execute(&self, args: &[&str], repository_path: &str) -> Result<String> {
    let output = self.run(args, repository_path, &[])?;
    if output.status.success() {
      Ok(Self::success(&output))
    } else {
      Err(Self::failure(&output, args))
    }
  }

  /// Execute a git command and return raw untrimmed output
  /// Useful for commands where exact formatting matters (e.g. `git status --porcelain -z`)
  #[instrument(
    skip(self),
    fields(
      git_command = args.join(" "),
      repository_path = repository_path,
      success = tracing::field::Empty,
    )
  )]
  pub fn execute_raw(&self, args: &[&str], repository_path: &str) -> Result<String> {
    let output = self.run(args, repository_path, &[])?;
    if output.status.success() {
      tracing::Span::current().record("success", true);
      Ok(String::from_utf8_lossy(&output.stdout).to_string())
    } else {
      Err(Self::failure(&output, args))
    }
  }

  /// Execute a git command and return stdout split into non-empty trimmed lines
  #[instrument(
    skip(self),
    fields(
      git_command = args.join(" "),
      repository_path = repository_path,
      success = tracing::field::Empty,
    )
  )]
  pub fn execute_lines(&self, args: &[&str], repository_path: &str) -> Result<Vec<String>> {
    let output = self.run(args, repository_path, &[])?;
    if output.status.success() {
      tracing::Span::current().record("success", true);
      Ok(Self::parse_lines(&output.stdout))
    } else {
      Err(Self::failure(&output, args))
    }
  }

  /// Execute a git command and return output together with the exit code,
  /// without treating a non-zero exit as an error. For probe commands that
  /// legitimately fail (e.g. `git symbolic-ref -q HEAD` on a detached HEAD).
  #[instrument(
    skip(self),
    fields(
      git_command = args.join(" "),
      repository_path = repository_path,
      success = tracing::field::Empty,
    )
  )]
  pub fn execute_with_status(&self, args: &[&str], repository_path: &str) -> Result<(String, i32)> {
    let output = self.run(args, repository_path, &[])?;
    let exit_code = output.status.code().unwrap_or(-1);

    if output.status.success() {
      Ok((Self::success(&output), exit_code))
    } else {
      let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
      tracing::Span::current().record("success", false);
      tracing::debug!(stderr = %stderr, exit_code = exit_code, "git command failed with status");
      Ok((stderr, exit_code))
    }
  }

  /// Execute a git command with extra environment variables
  #[instrument(
    skip(self, env_vars),
    fields(
      git_command = args.join(" "),
      repository_path = repository_path,
      success = tracing::field::Empty,
    )
  )]
  pub fn execute_with_env(&self, args: &[&str], repository_path: &str, env_vars: &[(&str, &str)]) -> Result<String> {
    let output = self.run(args, repository_path, env_vars)?;
    if output.status.success() {
      Ok(Self::success(&output))
    } else {
      Err(Self::failure(&output, args))
    }
  }

  /// Parse output into non-empty trimmed lines
  pub fn parse_lines(output: &[u8]) -> Vec<String> {
    output
      .split(|&b| b == b'\n')
      .filter_map(|line| {
        let line_str = String::from_utf8_lossy(line);
        let trimmed = line_str.trim();
        if !trimmed.is_empty() { Some(trimmed.to_string()) } else { None }
      })
      .collect()
  }
}
