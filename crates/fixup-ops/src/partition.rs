use crate::model::PendingChange;
use crate::registry::{Repository, RepositoryRegistry};
use tracing::{debug, instrument};

/// Narrow a snapshot of pending changes to the repository that owns the
/// selected commit.
///
/// Ownership is resolved through the registry and compared by repository
/// identity, not by path equality. An empty result is a valid outcome: the
/// global set can be non-empty while every change belongs elsewhere.
#[instrument(skip_all, fields(target = %target.root, total = changes.len()))]
pub fn partition_changes(registry: &RepositoryRegistry, changes: &[PendingChange], target: &Repository) -> Vec<PendingChange> {
  let retained: Vec<PendingChange> = changes
    .iter()
    .filter(|change| registry.owner_of(&change.path).is_some_and(|owner| owner.id == target.id))
    .cloned()
    .collect();

  debug!(retained = retained.len(), "partitioned pending changes");
  retained
}
