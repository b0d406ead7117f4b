//! Authorisation predicates for artifact operations.
//!
//! Every mutating operation checks the matching predicate before touching
//! state; a failed check surfaces as `Forbidden`, never as a silent no-op.

use crate::domain::identity::Identity;
use crate::domain::project::Project;

/// Only the owner may change an artifact's document.
pub fn can_mutate_content(project: &Project, actor: &Identity) -> bool {
    matches!(actor, Identity::Builder(id) if id == project.creator_id())
}

/// The owner or the curator may change name and emoji.
pub fn can_mutate_metadata(project: &Project, actor: &Identity) -> bool {
    can_mutate_content(project, actor) || actor.is_curator()
}

/// The owner or the curator may delete an artifact.
pub fn can_delete(project: &Project, actor: &Identity) -> bool {
    can_mutate_metadata(project, actor)
}

/// Only the curator may toggle the featured flag.
pub fn can_curate(actor: &Identity) -> bool {
    actor.is_curator()
}

/// Any builder may like; the curator has no user row to own a like.
pub fn can_like(actor: &Identity) -> bool {
    !actor.is_curator()
}
