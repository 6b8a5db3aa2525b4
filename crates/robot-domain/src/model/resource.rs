//! Resource - Extractable materials
//!
//! ResourceKind is a Value Object. Each kind is gated behind a minimum
//! mining level.

/// The resources a robot can mine and carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceKind {
    Coal,
    Iron,
    Gem,
    Gold,
    Platin,
}

impl ResourceKind {
    pub fn name(&self) -> &'static str {
        match self {
            ResourceKind::Coal => "COAL",
            ResourceKind::Iron => "IRON",
            ResourceKind::Gem => "GEM",
            ResourceKind::Gold => "GOLD",
            ResourceKind::Platin => "PLATIN",
        }
    }

    /// Minimum mining level needed to extract this resource
    pub fn required_mining_level(&self) -> u8 {
        match self {
            ResourceKind::Coal => 0,
            ResourceKind::Iron => 1,
            ResourceKind::Gem => 2,
            ResourceKind::Gold => 3,
            ResourceKind::Platin => 4,
        }
    }

    pub fn all() -> &'static [ResourceKind] {
        &[
            ResourceKind::Coal,
            ResourceKind::Iron,
            ResourceKind::Gem,
            ResourceKind::Gold,
            ResourceKind::Platin,
        ]
    }
}

impl core::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl core::str::FromStr for ResourceKind {
    type Err = ParseResourceKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResourceKind::all()
            .iter()
            .copied()
            .find(|r| r.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseResourceKindError {
                input: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseResourceKindError {
    pub input: String,
}

impl core::fmt::Display for ParseResourceKindError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Unknown resource kind: {}", self.input)
    }
}

impl std::error::Error for ParseResourceKindError {}
