use super::model::{ChangeKind, PendingChange};
use super::partition::partition_changes;
use super::registry::RepositoryRegistry;
use pretty_assertions::assert_eq;
use std::path::PathBuf;
use test_log::test;

fn change(path: &str) -> PendingChange {
  PendingChange {
    path: PathBuf::from(path),
    kind: ChangeKind::Modified,
    staged: false,
    unstaged: true,
  }
}

#[test]
fn test_keeps_only_changes_owned_by_target() {
  let mut registry = RepositoryRegistry::new();
  let repo_a = registry.register("/work/alpha");
  let _repo_b = registry.register("/work/beta");

  let changes = vec![change("/work/alpha/src/lib.rs"), change("/work/beta/src/lib.rs")];
  let partitioned = partition_changes(&registry, &changes, &repo_a);

  assert_eq!(partitioned, vec![change("/work/alpha/src/lib.rs")]);
}

#[test]
fn test_every_owned_change_is_retained() {
  let mut registry = RepositoryRegistry::new();
  let repo = registry.register("/work/alpha");

  let changes = vec![
    change("/work/alpha/src/lib.rs"),
    change("/work/alpha/Cargo.toml"),
    change("/work/alpha/src/deep/nested/module.rs"),
  ];
  let partitioned = partition_changes(&registry, &changes, &repo);

  assert_eq!(partitioned, changes);
}

#[test]
fn test_unowned_changes_are_dropped() {
  let mut registry = RepositoryRegistry::new();
  let repo = registry.register("/work/alpha");

  let changes = vec![change("/elsewhere/notes.txt")];
  assert_eq!(partition_changes(&registry, &changes, &repo), vec![]);
}

#[test]
fn test_empty_snapshot_partitions_to_empty() {
  let mut registry = RepositoryRegistry::new();
  let repo = registry.register("/work/alpha");

  assert_eq!(partition_changes(&registry, &[], &repo), vec![]);
}

#[test]
fn test_nested_repository_wins_over_enclosing_one() {
  let mut registry = RepositoryRegistry::new();
  let outer = registry.register("/work/alpha");
  let nested = registry.register("/work/alpha/vendor/lib");

  let changes = vec![change("/work/alpha/vendor/lib/src/lib.rs"), change("/work/alpha/src/main.rs")];

  assert_eq!(partition_changes(&registry, &changes, &outer), vec![change("/work/alpha/src/main.rs")]);
  assert_eq!(partition_changes(&registry, &changes, &nested), vec![change("/work/alpha/vendor/lib/src/lib.rs")]);
}

#[test]
fn test_ownership_is_identity_not_path_equality() {
  let mut registry = RepositoryRegistry::new();
  let first = registry.register("/work/alpha");
  let second = registry.register("/work/alpha");

  let changes = vec![change("/work/alpha/src/lib.rs")];

  // The registry resolves the path to exactly one of the two handles; only
  // that handle sees the change even though both roots are equal paths.
  let owned_by_first = partition_changes(&registry, &changes, &first);
  let owned_by_second = partition_changes(&registry, &changes, &second);
  assert_eq!(owned_by_first.len() + owned_by_second.len(), 1);
}
