use serde::{Deserialize, Serialize};

use super::ContainerName;

/// Substring that marks a container as publicly readable unless configured otherwise
pub const DEFAULT_PUBLIC_MARKER: &str = "public";

/// Anonymous read access granted to a newly created container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AccessPolicy {
    /// Blobs readable through their direct URL
    Public,
    /// Blobs only reachable through this API
    #[default]
    Private,
}

impl AccessPolicy {
    /// Classify a container by naming convention.
    ///
    /// The policy is never stored; it is re-derived from the name on every
    /// request, so renaming the marker changes how new containers are created
    /// but not existing ones.
    pub fn for_container(name: &ContainerName, public_marker: &str) -> Self {
        if !public_marker.is_empty() && name.as_str().contains(public_marker) {
            AccessPolicy::Public
        } else {
            AccessPolicy::Private
        }
    }

    pub fn is_public(self) -> bool {
        self == AccessPolicy::Public
    }
}

impl std::fmt::Display for AccessPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccessPolicy::Public => write!(f, "public"),
            AccessPolicy::Private => write!(f, "private"),
        }
    }
}
