//! Acting identities: builders and the reserved curator.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reserved identity token that resolves to [`Identity::Curator`].
///
/// The curator has no backing user row; the token is matched verbatim at
/// the HTTP edge before UUID parsing is attempted.
pub const CURATOR_TOKEN: &str = "iamthemostpowerfuluser";

/// Validation errors returned when parsing acting identities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityValidationError {
    EmptyId,
    InvalidId,
}

impl fmt::Display for IdentityValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "user id must not be empty"),
            Self::InvalidId => {
                write!(f, "user id must be a valid UUID or the reserved token")
            }
        }
    }
}

impl std::error::Error for IdentityValidationError {}

/// Stable builder identifier stored as a UUID.
///
/// Keeps the caller's original spelling for display; equality and hashing
/// use the parsed UUID so mixed-case forms of the same id compare equal.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(Uuid, String);

impl UserId {
    /// Validate and construct a [`UserId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, IdentityValidationError> {
        Self::from_owned(id.as_ref().to_owned())
    }

    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        let uuid = Uuid::new_v4();
        Self(uuid, uuid.to_string())
    }

    /// Wrap an already-parsed UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid, uuid.to_string())
    }

    fn from_owned(id: String) -> Result<Self, IdentityValidationError> {
        if id.is_empty() {
            return Err(IdentityValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(IdentityValidationError::InvalidId);
        }

        let parsed = Uuid::parse_str(&id).map_err(|_| IdentityValidationError::InvalidId)?;
        Ok(Self(parsed, id))
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl PartialEq for UserId {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl std::hash::Hash for UserId {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.1.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        let UserId(_, raw) = value;
        raw
    }
}

impl TryFrom<String> for UserId {
    type Error = IdentityValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Who is performing an operation.
///
/// Builders are ordinary users backed by a row in the user store. The
/// curator is a privileged identity with no row: it may moderate any
/// artifact's metadata and featured flag but owns nothing and cannot
/// like or create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    Builder(UserId),
    Curator,
}

impl Identity {
    /// Parse a raw identity string from the HTTP edge.
    ///
    /// The reserved token wins over UUID parsing; everything else must be
    /// a well-formed UUID.
    pub fn parse(raw: &str) -> Result<Self, IdentityValidationError> {
        if raw == CURATOR_TOKEN {
            return Ok(Self::Curator);
        }
        UserId::new(raw).map(Self::Builder)
    }

    /// True when this identity is the reserved curator.
    pub fn is_curator(&self) -> bool {
        matches!(self, Self::Curator)
    }

    /// The backing builder id, if any.
    pub fn builder_id(&self) -> Option<&UserId> {
        match self {
            Self::Builder(id) => Some(id),
            Self::Curator => None,
        }
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Builder(id) => fmt::Display::fmt(id, f),
            Self::Curator => f.write_str(CURATOR_TOKEN),
        }
    }
}
