//! Chunk audit output: role assignments and the policy comparison.

use serde::{Deserialize, Serialize};

use super::policy::{PolicyKind, PolicyPair};

/// Causal role of a context chunk relative to the pivot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkRole {
    Pivot,
    Predecessor,
    Noise,
    /// Fallback bucket when no rule matches.
    Context,
}

impl ChunkRole {
    pub const ALL: [ChunkRole; 4] = [
        ChunkRole::Pivot,
        ChunkRole::Predecessor,
        ChunkRole::Noise,
        ChunkRole::Context,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pivot => "pivot",
            Self::Predecessor => "predecessor",
            Self::Noise => "noise",
            Self::Context => "context",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedChunk {
    pub id: String,
    pub role: ChunkRole,
}

/// Chunk counts per role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleCounts {
    pub pivot: usize,
    pub predecessor: usize,
    pub noise: usize,
    pub context: usize,
}

impl RoleCounts {
    pub fn from_chunks(chunks: &[ClassifiedChunk]) -> Self {
        let mut counts = Self::default();
        for chunk in chunks {
            counts.increment(chunk.role);
        }
        counts
    }

    pub fn increment(&mut self, role: ChunkRole) {
        match role {
            ChunkRole::Pivot => self.pivot += 1,
            ChunkRole::Predecessor => self.predecessor += 1,
            ChunkRole::Noise => self.noise += 1,
            ChunkRole::Context => self.context += 1,
        }
    }

    pub fn get(&self, role: ChunkRole) -> usize {
        match role {
            ChunkRole::Pivot => self.pivot,
            ChunkRole::Predecessor => self.predecessor,
            ChunkRole::Noise => self.noise,
            ChunkRole::Context => self.context,
        }
    }

    pub fn total(&self) -> usize {
        self.pivot + self.predecessor + self.noise + self.context
    }
}

/// Token accounting for one policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenDelta {
    pub before: u64,
    pub after: u64,
}

impl TokenDelta {
    /// `after - before`; negative when the policy shrank the context.
    pub fn delta(&self) -> i128 {
        i128::from(self.after) - i128::from(self.before)
    }
}

/// Qualitative reading of what a policy kept and lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonPhrase {
    /// Kept noise while dropping predecessors: the ungoverned mirage signature.
    KeptNoiseLostPredecessors,
    /// Kept predecessors while dropping noise: the guarded signature.
    KeptPredecessorsDroppedNoise,
    Neutral,
}

impl ComparisonPhrase {
    pub fn text(&self, policy: PolicyKind) -> &'static str {
        match (self, policy) {
            (Self::KeptNoiseLostPredecessors, _) => "kept noise, lost predecessors",
            (Self::KeptPredecessorsDroppedNoise, _) => "kept predecessors, dropped noise",
            (Self::Neutral, PolicyKind::Recency) => "kept the most recent window",
            (Self::Neutral, PolicyKind::L2Guarded) => "kept the protected chain",
        }
    }
}

/// Classified audit of one policy's certificate entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyAudit {
    pub policy: PolicyKind,
    pub kept: Vec<ClassifiedChunk>,
    pub dropped: Vec<ClassifiedChunk>,
    pub kept_counts: RoleCounts,
    pub dropped_counts: RoleCounts,
    pub tokens: Option<TokenDelta>,
    pub contract_satisfied: Option<bool>,
    pub phrase: ComparisonPhrase,
}

impl PolicyAudit {
    pub fn phrase_text(&self) -> &'static str {
        self.phrase.text(self.policy)
    }
}

/// Token figures for the comparison, all-or-nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TokenSummary {
    Available {
        recency: TokenDelta,
        l2_guarded: TokenDelta,
    },
    /// At least one policy lacks before/after figures.
    Unavailable,
}

impl TokenSummary {
    pub fn describe(&self) -> String {
        match self {
            Self::Available {
                recency,
                l2_guarded,
            } => format!(
                "recency {} \u{2192} {} tokens ({:+}); l2_guarded {} \u{2192} {} tokens ({:+})",
                recency.before,
                recency.after,
                recency.delta(),
                l2_guarded.before,
                l2_guarded.after,
                l2_guarded.delta(),
            ),
            Self::Unavailable => "token accounting unavailable".to_string(),
        }
    }
}

/// Side-by-side audit of both policies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonSummary {
    pub pivot_id: String,
    /// Merged protected-id set used for classification, sorted.
    pub protected_ids: Vec<String>,
    pub policies: PolicyPair<PolicyAudit>,
    pub tokens: TokenSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_counts_tally_each_role() {
        let chunks: Vec<ClassifiedChunk> = [
            ChunkRole::Noise,
            ChunkRole::Noise,
            ChunkRole::Pivot,
            ChunkRole::Context,
        ]
        .into_iter()
        .enumerate()
        .map(|(i, role)| ClassifiedChunk {
            id: format!("c{i}"),
            role,
        })
        .collect();
        let counts = RoleCounts::from_chunks(&chunks);
        assert_eq!(counts.get(ChunkRole::Noise), 2);
        assert_eq!(counts.get(ChunkRole::Predecessor), 0);
        assert_eq!(counts.total(), 4);
    }

    #[test]
    fn token_summary_describes_both_policies_or_nothing() {
        let available = TokenSummary::Available {
            recency: TokenDelta {
                before: 1200,
                after: 400,
            },
            l2_guarded: TokenDelta {
                before: 1200,
                after: 420,
            },
        };
        assert_eq!(
            available.describe(),
            "recency 1200 \u{2192} 400 tokens (-800); l2_guarded 1200 \u{2192} 420 tokens (-780)"
        );
        assert_eq!(
            TokenSummary::Unavailable.describe(),
            "token accounting unavailable"
        );
    }

    #[test]
    fn delta_holds_counts_beyond_i64() {
        let grown = TokenDelta {
            before: 0,
            after: u64::MAX,
        };
        assert_eq!(grown.delta(), i128::from(u64::MAX));
        let shrunk = TokenDelta {
            before: u64::MAX,
            after: 1,
        };
        assert_eq!(shrunk.delta(), 1 - i128::from(u64::MAX));
    }
}
