use serde::Serialize;
#[cfg(feature = "specta")]
use specta::Type;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Identity of a registered repository. Assigned by the registry; two
/// registrations are never the same repository, even for an equal root path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[cfg_attr(feature = "specta", derive(Type))]
pub struct RepoId(u32);

/// A working copy known to the registry. Only the git backend is modeled.
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "specta", derive(Type))]
#[serde(rename_all = "camelCase")]
pub struct Repository {
  pub id: RepoId,
  pub root: String,
}

impl Repository {
  pub fn root_path(&self) -> &Path {
    Path::new(&self.root)
  }
}

/// Hands out repository handles and resolves which repository owns a file.
#[derive(Debug, Default)]
pub struct RepositoryRegistry {
  repositories: Vec<Arc<Repository>>,
  next_id: u32,
}

impl RepositoryRegistry {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Register a working copy rooted at `root` and return its handle.
  pub fn register(&mut self, root: impl Into<String>) -> Arc<Repository> {
    let repository = Arc::new(Repository {
      id: RepoId(self.next_id),
      root: root.into(),
    });
    self.next_id += 1;
    debug!(root = %repository.root, id = ?repository.id, "registered repository");
    self.repositories.push(repository.clone());
    repository
  }

  /// Resolve which registered repository owns `path`: the deepest root that
  /// is an ancestor of the path.
  pub fn owner_of(&self, path: &Path) -> Option<Arc<Repository>> {
    self
      .repositories
      .iter()
      .filter(|repository| path.starts_with(repository.root_path()))
      .max_by_key(|repository| repository.root_path().components().count())
      .cloned()
  }

  pub fn repositories(&self) -> impl Iterator<Item = &Arc<Repository>> {
    self.repositories.iter()
  }
}
