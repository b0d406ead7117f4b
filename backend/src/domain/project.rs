//! Project artifacts: the self-contained HTML documents builders create.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::identity::UserId;

/// Name given to artifacts created without an explicit name.
pub const DEFAULT_PROJECT_NAME: &str = "Untitled Creation";

/// Emoji assigned to new artifacts until the owner picks one.
pub const DEFAULT_EMOJI: &str = "🎮";

/// Maximum allowed length for an artifact name.
pub const PROJECT_NAME_MAX: usize = 120;

/// Maximum allowed length for an artifact emoji, in characters.
///
/// Multi-codepoint emoji (ZWJ sequences) stay well under this.
pub const EMOJI_MAX: usize = 8;

/// Validation errors returned by project value constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectValidationError {
    EmptyName,
    NameTooLong { max: usize },
    EmptyEmoji,
    EmojiTooLong { max: usize },
}

impl fmt::Display for ProjectValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "project name must not be empty"),
            Self::NameTooLong { max } => {
                write!(f, "project name must be at most {max} characters")
            }
            Self::EmptyEmoji => write!(f, "project emoji must not be empty"),
            Self::EmojiTooLong { max } => {
                write!(f, "project emoji must be at most {max} characters")
            }
        }
    }
}

impl std::error::Error for ProjectValidationError {}

/// Display name for an artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProjectName(String);

impl ProjectName {
    /// Validate and construct a [`ProjectName`] from owned input.
    pub fn new(name: impl Into<String>) -> Result<Self, ProjectValidationError> {
        Self::from_owned(name.into())
    }

    fn from_owned(name: String) -> Result<Self, ProjectValidationError> {
        if name.trim().is_empty() {
            return Err(ProjectValidationError::EmptyName);
        }
        if name.chars().count() > PROJECT_NAME_MAX {
            return Err(ProjectValidationError::NameTooLong {
                max: PROJECT_NAME_MAX,
            });
        }

        Ok(Self(name))
    }
}

impl Default for ProjectName {
    fn default() -> Self {
        Self(DEFAULT_PROJECT_NAME.to_owned())
    }
}

impl AsRef<str> for ProjectName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<ProjectName> for String {
    fn from(value: ProjectName) -> Self {
        value.0
    }
}

impl TryFrom<String> for ProjectName {
    type Error = ProjectValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Emoji badge shown next to an artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Emoji(String);

impl Emoji {
    /// Validate and construct an [`Emoji`] from owned input.
    pub fn new(emoji: impl Into<String>) -> Result<Self, ProjectValidationError> {
        Self::from_owned(emoji.into())
    }

    fn from_owned(emoji: String) -> Result<Self, ProjectValidationError> {
        if emoji.trim().is_empty() {
            return Err(ProjectValidationError::EmptyEmoji);
        }
        if emoji.chars().count() > EMOJI_MAX {
            return Err(ProjectValidationError::EmojiTooLong { max: EMOJI_MAX });
        }

        Ok(Self(emoji))
    }
}

impl Default for Emoji {
    fn default() -> Self {
        Self(DEFAULT_EMOJI.to_owned())
    }
}

impl AsRef<str> for Emoji {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Emoji {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Emoji> for String {
    fn from(value: Emoji) -> Self {
        value.0
    }
}

impl TryFrom<String> for Emoji {
    type Error = ProjectValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Whether an artifact has ever received generated content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentState {
    /// No document yet; the next content write is the first and must not
    /// snapshot.
    Empty,
    /// A document exists; content writes snapshot it first.
    Populated,
}

/// Inputs for creating a fresh artifact.
#[derive(Debug, Clone)]
pub struct ProjectSeed {
    pub id: Uuid,
    pub name: ProjectName,
    pub emoji: Emoji,
    pub creator_id: UserId,
    pub created_at: DateTime<Utc>,
}

/// Raw column values rehydrated from the artifact store.
#[derive(Debug, Clone)]
pub struct ProjectRecord {
    pub id: Uuid,
    pub name: ProjectName,
    pub emoji: Emoji,
    pub html_content: String,
    pub prompt: String,
    pub play_count: i32,
    pub featured: bool,
    pub creator_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A buildable artifact owned by exactly one builder.
///
/// ## Invariants
/// - `creator_id` never changes after creation.
/// - `updated_at >= created_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    id: Uuid,
    name: ProjectName,
    emoji: Emoji,
    html_content: String,
    prompt: String,
    play_count: i32,
    featured: bool,
    creator_id: UserId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Project {
    /// Create a brand-new artifact with empty content.
    pub fn create(seed: ProjectSeed) -> Self {
        Self {
            id: seed.id,
            name: seed.name,
            emoji: seed.emoji,
            html_content: String::new(),
            prompt: String::new(),
            play_count: 0,
            featured: false,
            creator_id: seed.creator_id,
            created_at: seed.created_at,
            updated_at: seed.created_at,
        }
    }

    /// Rehydrate an artifact from stored column values.
    pub fn from_record(record: ProjectRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            emoji: record.emoji,
            html_content: record.html_content,
            prompt: record.prompt,
            play_count: record.play_count,
            featured: record.featured,
            creator_id: record.creator_id,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }

    pub fn id(&self) -> &Uuid {
        &self.id
    }

    pub fn name(&self) -> &ProjectName {
        &self.name
    }

    pub fn emoji(&self) -> &Emoji {
        &self.emoji
    }

    pub fn html_content(&self) -> &str {
        &self.html_content
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn play_count(&self) -> i32 {
        self.play_count
    }

    pub fn featured(&self) -> bool {
        self.featured
    }

    pub fn creator_id(&self) -> &UserId {
        &self.creator_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Whether the artifact has been populated with a document yet.
    pub fn content_state(&self) -> ContentState {
        if self.html_content.is_empty() {
            ContentState::Empty
        } else {
            ContentState::Populated
        }
    }
}

/// A partial update to an artifact.
///
/// `None` fields are left untouched. Content mutations are recognised by
/// `html_content` alone; `prompt` rides along with whichever document it
/// described.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectChanges {
    pub name: Option<ProjectName>,
    pub emoji: Option<Emoji>,
    pub html_content: Option<String>,
    pub prompt: Option<String>,
    pub featured: Option<bool>,
}

impl ProjectChanges {
    /// True when no field would change.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.emoji.is_none()
            && self.html_content.is_none()
            && self.prompt.is_none()
            && self.featured.is_none()
    }

    /// True when the update would overwrite the document.
    pub fn touches_content(&self) -> bool {
        self.html_content.is_some()
    }

    /// True when any non-content field would change.
    pub fn touches_metadata(&self) -> bool {
        self.name.is_some() || self.emoji.is_some() || self.featured.is_some()
    }

    /// Strip the content fields, keeping only what moderators may change.
    pub fn metadata_only(self) -> Self {
        Self {
            name: self.name,
            emoji: self.emoji,
            html_content: None,
            prompt: None,
            featured: self.featured,
        }
    }
}
