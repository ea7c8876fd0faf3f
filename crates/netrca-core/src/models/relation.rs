//! Relationship labels carried by graph edges.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relation {
    /// X directly causes Y.
    Causes,
    /// X is caused by Y (reverse phrasing in source documents).
    CausedBy,
    /// X needs Y to operate.
    DependsOn,
    /// X breaks a requirement stated by Y.
    Violates,
    /// X's impact is reduced by Y.
    MitigatedBy,
    /// X fires when Y happens.
    TriggeredBy,
    /// X affects Y without a stated mechanism.
    Influences,
}

impl Relation {
    pub const COUNT: usize = 7;

    pub const ALL: [Relation; 7] = [
        Self::Causes,
        Self::CausedBy,
        Self::DependsOn,
        Self::Violates,
        Self::MitigatedBy,
        Self::TriggeredBy,
        Self::Influences,
    ];

    /// Parse from the snake case name. ASCII case is ignored, so `CAUSES` parses too.
    pub fn from_str_name(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(s))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Causes => "causes",
            Self::CausedBy => "caused_by",
            Self::DependsOn => "depends_on",
            Self::Violates => "violates",
            Self::MitigatedBy => "mitigated_by",
            Self::TriggeredBy => "triggered_by",
            Self::Influences => "influences",
        }
    }

    /// Whether the label asserts a direct causal mechanism.
    pub fn is_causal(&self) -> bool {
        matches!(self, Self::Causes | Self::CausedBy | Self::TriggeredBy)
    }
}

impl std::fmt::Display for Relation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
