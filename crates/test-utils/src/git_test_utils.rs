use git_executor::git_command_executor::GitCommandExecutor;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

// Constants for test Git user configuration
const TEST_USER_NAME: &str = "Test User";
const TEST_USER_EMAIL: &str = "test@example.com";

/// Git test repository wrapper with helper methods
pub struct TestRepo {
  dir: TempDir,
  git_executor: GitCommandExecutor,
}

impl Default for TestRepo {
  fn default() -> Self {
    Self::new()
  }
}

impl TestRepo {
  /// Creates a new test repository on a `main` branch
  pub fn new() -> Self {
    let dir = tempfile::tempdir().unwrap();
    let git_executor = GitCommandExecutor::new();
    let repo_path = dir.path().to_str().unwrap();

    git_executor
      .execute(&["init", "-b", "main"], repo_path)
      .unwrap_or_else(|e| panic!("Git init failed: {}", e));
    git_executor.execute(&["config", "user.name", TEST_USER_NAME], repo_path).unwrap();
    git_executor.execute(&["config", "user.email", TEST_USER_EMAIL], repo_path).unwrap();

    Self { dir, git_executor }
  }

  /// Get the repository path
  pub fn path(&self) -> &Path {
    self.dir.path()
  }

  /// Get the repository path as a string
  pub fn path_str(&self) -> &str {
    self.dir.path().to_str().unwrap()
  }

  /// Get the executor driving this repository
  pub fn git(&self) -> &GitCommandExecutor {
    &self.git_executor
  }

  /// Write a file without staging it
  pub fn write_file(&self, filename: &str, content: &str) {
    let file_path = self.path().join(filename);
    if let Some(parent) = file_path.parent() {
      fs::create_dir_all(parent).unwrap();
    }
    fs::write(&file_path, content).unwrap();
  }

  /// Stage a file
  pub fn stage_file(&self, filename: &str) {
    self
      .git_executor
      .execute(&["add", filename], self.path_str())
      .unwrap_or_else(|e| panic!("Git add failed: {}", e));
  }

  /// Creates a commit with a file
  pub fn create_commit(&self, message: &str, filename: &str, content: &str) -> String {
    self.create_commit_with_files(message, &[(filename, content)])
  }

  /// Creates a commit with multiple files
  pub fn create_commit_with_files(&self, message: &str, files: &[(&str, &str)]) -> String {
    for (filename, content) in files {
      self.write_file(filename, content);
      self.stage_file(filename);
    }

    self
      .git_executor
      .execute(&["commit", "-m", message], self.path_str())
      .unwrap_or_else(|e| panic!("Git commit failed: {}", e));

    self.head()
  }

  /// Commit all tracked modifications in one commit
  pub fn commit_all(&self, message: &str) -> String {
    self
      .git_executor
      .execute(&["commit", "-a", "-m", message], self.path_str())
      .unwrap_or_else(|e| panic!("Git commit failed: {}", e));

    self.head()
  }

  /// Get the current HEAD commit hash
  pub fn head(&self) -> String {
    self.git_executor.execute(&["rev-parse", "HEAD"], self.path_str()).unwrap().trim().to_string()
  }

  /// Number of commits reachable from HEAD
  pub fn commit_count(&self) -> usize {
    let output = self.git_executor.execute(&["rev-list", "--count", "HEAD"], self.path_str()).unwrap();
    output.trim().parse().unwrap_or(0)
  }

  /// Current content of a working-tree file
  pub fn file_content(&self, filename: &str) -> String {
    fs::read_to_string(self.path().join(filename)).unwrap()
  }

  /// Subjects of the last N commits, newest first
  pub fn subjects(&self, count: usize) -> Vec<String> {
    let count_arg = format!("-{count}");
    self
      .git_executor
      .execute_lines(&["log", &count_arg, "--pretty=format:%s"], self.path_str())
      .unwrap_or_default()
  }

  /// Checkout a branch or commit
  pub fn checkout(&self, ref_name: &str) -> Result<(), String> {
    self
      .git_executor
      .execute(&["checkout", ref_name], self.path_str())
      .map(|_| ())
      .map_err(|e| e.to_string())
  }

  /// Create and checkout a new branch
  pub fn checkout_new_branch(&self, branch_name: &str) -> Result<(), String> {
    self
      .git_executor
      .execute(&["checkout", "-b", branch_name], self.path_str())
      .map(|_| ())
      .map_err(|e| e.to_string())
  }

  /// Detach HEAD from the current branch
  pub fn detach_head(&self) {
    self
      .git_executor
      .execute(&["checkout", "--detach"], self.path_str())
      .unwrap_or_else(|e| panic!("Git checkout --detach failed: {}", e));
  }

  /// Start a merge that is expected to conflict, leaving the repository
  /// mid-merge with MERGE_HEAD and unresolved index entries
  pub fn begin_conflicting_merge(&self, branch: &str) {
    let (output, exit_code) = self.git_executor.execute_with_status(&["merge", branch], self.path_str()).unwrap();
    assert_ne!(exit_code, 0, "merge of {branch} unexpectedly succeeded: {output}");
  }

  /// Start a rebase that is expected to conflict, leaving the repository
  /// mid-rebase
  pub fn begin_conflicting_rebase(&self, onto: &str) {
    let (output, exit_code) = self.git_executor.execute_with_status(&["rebase", onto], self.path_str()).unwrap();
    assert_ne!(exit_code, 0, "rebase onto {onto} unexpectedly succeeded: {output}");
  }

  /// Start a cherry-pick that is expected to conflict, leaving
  /// CHERRY_PICK_HEAD behind
  pub fn begin_conflicting_cherry_pick(&self, commit: &str) {
    let (output, exit_code) = self.git_executor.execute_with_status(&["cherry-pick", commit], self.path_str()).unwrap();
    assert_ne!(exit_code, 0, "cherry-pick of {commit} unexpectedly succeeded: {output}");
  }

  /// Start a revert that is expected to conflict, leaving REVERT_HEAD
  /// behind
  pub fn begin_conflicting_revert(&self, commit: &str) {
    let (output, exit_code) = self.git_executor.execute_with_status(&["revert", "--no-edit", commit], self.path_str()).unwrap();
    assert_ne!(exit_code, 0, "revert of {commit} unexpectedly succeeded: {output}");
  }

  /// Abort an in-progress merge
  pub fn abort_merge(&self) {
    self
      .git_executor
      .execute(&["merge", "--abort"], self.path_str())
      .unwrap_or_else(|e| panic!("Git merge --abort failed: {}", e));
  }
}
