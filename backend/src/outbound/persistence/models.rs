//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{likes, plays, projects, users, versions};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for minting builder accounts.
///
/// Timestamps come from the domain clock rather than a column default so
/// responses echo exactly what was stored.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub username: &'a str,
    pub created_at: DateTime<Utc>,
}

/// Row struct for reading a full artifact.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = projects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ProjectRow {
    pub id: Uuid,
    pub name: String,
    pub emoji: String,
    pub html_content: String,
    pub prompt: String,
    pub play_count: i32,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub creator_id: Uuid,
}

/// Insertable struct for creating artifacts.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = projects)]
pub(crate) struct NewProjectRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub emoji: &'a str,
    pub html_content: &'a str,
    pub prompt: &'a str,
    pub play_count: i32,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub creator_id: Uuid,
}

/// Changeset for partial artifact updates.
///
/// `None` fields are skipped by Diesel, leaving the stored value untouched.
/// `updated_at` is not optional; every write bumps it.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = projects)]
pub(crate) struct ProjectChangesRow<'a> {
    pub name: Option<&'a str>,
    pub emoji: Option<&'a str>,
    pub html_content: Option<&'a str>,
    pub prompt: Option<&'a str>,
    pub featured: Option<bool>,
    pub updated_at: DateTime<Utc>,
}

/// Subset row for the owner dashboard, skipping the document column.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = projects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ProjectSummaryRow {
    pub id: Uuid,
    pub name: String,
    pub emoji: String,
    pub prompt: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Subset row for public profile cards, skipping the document column.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = projects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ProjectCardRow {
    pub id: Uuid,
    pub name: String,
    pub emoji: String,
    pub prompt: String,
    pub play_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub creator_id: Uuid,
}

/// Row struct for reading a full snapshot.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = versions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct VersionRow {
    pub id: Uuid,
    pub project_id: Uuid,
    pub html_content: String,
    pub prompt: String,
    pub pre_restore: bool,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for writing snapshots.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = versions)]
pub(crate) struct NewVersionRow<'a> {
    pub id: Uuid,
    pub project_id: Uuid,
    pub html_content: &'a str,
    pub prompt: &'a str,
    pub pre_restore: bool,
    pub created_at: DateTime<Utc>,
}

/// Subset row for history listings, skipping the document column.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = versions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct VersionSummaryRow {
    pub id: Uuid,
    pub prompt: String,
    pub pre_restore: bool,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for like edges.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = likes)]
pub(crate) struct NewLikeRow {
    pub user_id: Uuid,
    pub project_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for play events.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = plays)]
pub(crate) struct NewPlayRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub project_id: Uuid,
    pub played_at: DateTime<Utc>,
}

/// Joined row feeding the artifact leaderboard aggregation.
///
/// Maps the projects-to-users join; column order must match the select in
/// the engagement repository.
#[derive(Debug, Clone, Queryable)]
pub(crate) struct RankedProjectRow {
    pub id: Uuid,
    pub name: String,
    pub emoji: String,
    pub play_count: i32,
    pub created_at: DateTime<Utc>,
    pub creator_id: Uuid,
    pub creator_username: String,
    pub creator_since: DateTime<Utc>,
}
