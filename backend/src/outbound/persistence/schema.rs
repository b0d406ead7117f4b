//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are used
//! by Diesel for compile-time query validation and type-safe SQL generation.
//!
//! # Maintenance
//!
//! When migrations change the schema, this file should be regenerated or
//! manually updated to reflect those changes. The `diesel print-schema`
//! command can generate these definitions from a live database.

diesel::table! {
    /// Builder accounts.
    ///
    /// One row per builder, keyed by the UUID handed out at first resolve.
    /// Usernames are minted server-side and unique across the table.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Generated display handle (unique).
        username -> Text,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Buildable artifacts.
    ///
    /// `html_content` holds the full self-contained document; it is empty
    /// until the first generation writes one.
    projects (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Display name shown on cards and headers.
        name -> Text,
        /// Emoji badge shown next to the name.
        emoji -> Text,
        /// Current document, empty for freshly created artifacts.
        html_content -> Text,
        /// Instruction behind the current document.
        prompt -> Text,
        /// Counted plays, bumped atomically with each play event.
        play_count -> Int4,
        /// Curator-controlled highlight flag.
        featured -> Bool,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Bumped on every write to the row.
        updated_at -> Timestamptz,
        /// Owning builder; rows cascade away with the account.
        creator_id -> Uuid,
    }
}

diesel::table! {
    /// Immutable document snapshots.
    ///
    /// A row is written before every overwrite of a populated document and
    /// never touched afterwards.
    versions (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Artifact the snapshot belongs to; cascades on delete.
        project_id -> Uuid,
        /// Document exactly as it stood before the overwrite.
        html_content -> Text,
        /// Instruction behind the snapshotted document.
        prompt -> Text,
        /// Set when the snapshot was taken because a restore overwrote it.
        pre_restore -> Bool,
        /// When the snapshot was taken.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Like edges between builders and artifacts.
    ///
    /// The composite primary key keeps the relation at most one row per
    /// (builder, artifact) pair.
    likes (user_id, project_id) {
        /// Builder who pressed like; cascades with the account.
        user_id -> Uuid,
        /// Artifact that was liked; cascades with the artifact.
        project_id -> Uuid,
        /// When the like was recorded.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Play events backing the per-builder cooldown check.
    ///
    /// Only counted plays are recorded; attempts inside the cooldown window
    /// leave no row.
    plays (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Builder who played; cascades with the account.
        user_id -> Uuid,
        /// Artifact that was played; cascades with the artifact.
        project_id -> Uuid,
        /// When the play was recorded.
        played_at -> Timestamptz,
    }
}

diesel::joinable!(projects -> users (creator_id));
diesel::joinable!(versions -> projects (project_id));
diesel::joinable!(likes -> projects (project_id));
diesel::joinable!(likes -> users (user_id));
diesel::joinable!(plays -> projects (project_id));
diesel::joinable!(plays -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(users, projects, versions, likes, plays);
