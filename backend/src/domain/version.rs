//! Immutable snapshots of an artifact's previous documents.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::project::Project;

/// Marker appended to displayed prompts of snapshots taken just before a
/// restore.
pub const PRE_RESTORE_MARKER: &str = " (before restore)";

fn displayed_prompt(prompt: &str, pre_restore: bool) -> String {
    if pre_restore {
        format!("{prompt}{PRE_RESTORE_MARKER}")
    } else {
        prompt.to_owned()
    }
}

/// Raw column values rehydrated from the version store.
#[derive(Debug, Clone)]
pub struct VersionRecord {
    pub id: Uuid,
    pub project_id: Uuid,
    pub html_content: String,
    pub prompt: String,
    pub pre_restore: bool,
    pub created_at: DateTime<Utc>,
}

/// A point-in-time snapshot of an artifact's document.
///
/// ## Invariants
/// - Never mutated after creation.
/// - Always captures the state *before* a content overwrite; the first
///   write to an empty artifact produces no version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    id: Uuid,
    project_id: Uuid,
    html_content: String,
    prompt: String,
    pre_restore: bool,
    created_at: DateTime<Utc>,
}

impl Version {
    /// Snapshot the current document of `project`.
    ///
    /// `pre_restore` tags snapshots taken because a restore is about to
    /// overwrite the document.
    pub fn snapshot_of(
        project: &Project,
        pre_restore: bool,
        id: Uuid,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            project_id: *project.id(),
            html_content: project.html_content().to_owned(),
            prompt: project.prompt().to_owned(),
            pre_restore,
            created_at,
        }
    }

    /// Rehydrate a version from stored column values.
    pub fn from_record(record: VersionRecord) -> Self {
        Self {
            id: record.id,
            project_id: record.project_id,
            html_content: record.html_content,
            prompt: record.prompt,
            pre_restore: record.pre_restore,
            created_at: record.created_at,
        }
    }

    pub fn id(&self) -> &Uuid {
        &self.id
    }

    pub fn project_id(&self) -> &Uuid {
        &self.project_id
    }

    pub fn html_content(&self) -> &str {
        &self.html_content
    }

    /// Prompt exactly as stored.
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn pre_restore(&self) -> bool {
        self.pre_restore
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Prompt decorated with the pre-restore marker when applicable.
    pub fn displayed_prompt(&self) -> String {
        displayed_prompt(&self.prompt, self.pre_restore)
    }
}

/// Cheap history row: everything except the document itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionSummary {
    pub id: Uuid,
    pub prompt: String,
    pub pre_restore: bool,
    pub created_at: DateTime<Utc>,
}

impl VersionSummary {
    /// Prompt decorated with the pre-restore marker when applicable.
    pub fn displayed_prompt(&self) -> String {
        displayed_prompt(&self.prompt, self.pre_restore)
    }
}
