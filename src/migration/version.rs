// Layer 1: Standard library imports
use std::fmt;

// Layer 2: Third-party crate imports
use serde::{Deserialize, Serialize};

/// A three-component actor implementation version, used to decide whether a running actor
/// can be reactivated on a silo running a different build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VersionTriple {
    /// Major component; a bump signals a breaking state-shape change.
    pub major: u32,
    /// Minor component.
    pub minor: u32,
    /// Patch component.
    pub patch: u32,
}

impl VersionTriple {
    /// Construct a version from its three components.
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self { major, minor, patch }
    }
}

impl fmt::Display for VersionTriple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// How strictly two actor implementation versions must agree for a migration target to be
/// considered a valid reactivation host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum VersionCompatibilityMode {
    /// Source and target must be the exact same version.
    Strict,
    /// Major and minor must match; only the patch component may differ.
    Patch,
    /// Major must match; minor and patch may differ freely.
    ///
    /// This is the spec's chosen default (§9(a)): "same major version, any minor/patch",
    /// not "same major *and* minor" as the name might otherwise suggest.
    #[default]
    Minor,
    /// Any version is accepted; the caller asserts the actor state is forward/backward
    /// compatible across major versions itself.
    Major,
}

impl VersionCompatibilityMode {
    /// Whether `target` is an acceptable reactivation host given `source`'s version, under
    /// this compatibility mode.
    pub fn is_compatible(&self, source: VersionTriple, target: VersionTriple) -> bool {
        match self {
            Self::Strict => source == target,
            Self::Patch => source.major == target.major && source.minor == target.minor,
            Self::Minor => source.major == target.major,
            Self::Major => true,
        }
    }
}
