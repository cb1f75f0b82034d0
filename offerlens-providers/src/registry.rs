//! Source registry.
//!
//! The registry is the central lookup for the available catalog backends
//! and the static facts about them that don't require credentials.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use offerlens_core::CoreError;

// ============================================================================
// Source Kind
// ============================================================================

/// Identifier for a catalog backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// The OAuth2-authorized Creators API.
    Creators,
    /// The SigV4-signed PA-API.
    Paapi,
}

impl SourceKind {
    /// Stable identifier string.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Creators => "creators",
            Self::Paapi => "paapi",
        }
    }

    /// All known kinds, in preference order.
    pub fn all() -> &'static [SourceKind] {
        &[Self::Creators, Self::Paapi]
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SourceKind {
    type Err = CoreError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        SourceKind::all()
            .iter()
            .copied()
            .find(|kind| kind.as_str() == name)
            .ok_or_else(|| CoreError::Validation(format!("Unknown source: {name}")))
    }
}

// ============================================================================
// Source Registry
// ============================================================================

/// Static facts about one catalog backend.
#[derive(Debug, Clone, Copy)]
pub struct SourceDescriptor {
    /// Backend identifier.
    pub kind: SourceKind,
    /// Human-readable name.
    pub display_name: &'static str,
    /// One-line description for listings.
    pub summary: &'static str,
}

/// All registered backends, in preference order.
static DESCRIPTORS: [SourceDescriptor; 2] = [
    SourceDescriptor {
        kind: SourceKind::Creators,
        display_name: "Amazon Creators API",
        summary: "OAuth2 bearer tokens, camelCase schema, regional token endpoints",
    },
    SourceDescriptor {
        kind: SourceKind::Paapi,
        display_name: "Amazon PA-API",
        summary: "SigV4 request signing, PascalCase schema, 16 marketplaces",
    },
];

/// Registry of the available catalog backends.
pub struct SourceRegistry;

impl SourceRegistry {
    /// Returns all descriptors.
    pub fn all() -> &'static [SourceDescriptor] {
        &DESCRIPTORS
    }

    /// Gets a descriptor by kind.
    pub fn get(kind: SourceKind) -> &'static SourceDescriptor {
        match kind {
            SourceKind::Creators => &DESCRIPTORS[0],
            SourceKind::Paapi => &DESCRIPTORS[1],
        }
    }

    /// Looks up a descriptor by identifier string.
    pub fn find(name: &str) -> Result<&'static SourceDescriptor, CoreError> {
        let kind = SourceKind::from_str(name)?;
        Ok(Self::get(kind))
    }
}

// ============================================================================
// Tests
// ============================================================================
