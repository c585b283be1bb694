use serde::{Deserialize, Serialize};

/// The two retention policies compared by the evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    /// Naive recency window with no safety contract.
    Recency,
    /// Contract-enforcing policy that protects the pivot's predecessors.
    L2Guarded,
}

impl PolicyKind {
    pub const ALL: [PolicyKind; 2] = [PolicyKind::Recency, PolicyKind::L2Guarded];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Recency => "recency",
            Self::L2Guarded => "l2_guarded",
        }
    }

    /// Whether the policy claims a predecessor-retention contract.
    pub fn enforces_contract(&self) -> bool {
        matches!(self, Self::L2Guarded)
    }

    /// Inverse of [`PolicyKind::as_str`].
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "recency" => Some(Self::Recency),
            "l2_guarded" => Some(Self::L2Guarded),
            _ => None,
        }
    }
}

impl std::fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One value per policy, serialized as `{ "recency": .., "l2_guarded": .. }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyPair<T> {
    pub recency: T,
    pub l2_guarded: T,
}

impl<T> PolicyPair<T> {
    pub fn new(recency: T, l2_guarded: T) -> Self {
        Self {
            recency,
            l2_guarded,
        }
    }

    pub fn get(&self, policy: PolicyKind) -> &T {
        match policy {
            PolicyKind::Recency => &self.recency,
            PolicyKind::L2Guarded => &self.l2_guarded,
        }
    }

    /// Pairs each value with its policy, recency first.
    pub fn iter(&self) -> impl Iterator<Item = (PolicyKind, &T)> {
        [
            (PolicyKind::Recency, &self.recency),
            (PolicyKind::L2Guarded, &self.l2_guarded),
        ]
        .into_iter()
    }

    pub fn map<U, F>(self, mut f: F) -> PolicyPair<U>
    where
        F: FnMut(PolicyKind, T) -> U,
    {
        PolicyPair {
            recency: f(PolicyKind::Recency, self.recency),
            l2_guarded: f(PolicyKind::L2Guarded, self.l2_guarded),
        }
    }

    /// Like [`PolicyPair::map`] for fallible conversions; recency is converted first.
    pub fn try_map<U, E, F>(self, mut f: F) -> Result<PolicyPair<U>, E>
    where
        F: FnMut(PolicyKind, T) -> Result<U, E>,
    {
        Ok(PolicyPair {
            recency: f(PolicyKind::Recency, self.recency)?,
            l2_guarded: f(PolicyKind::L2Guarded, self.l2_guarded)?,
        })
    }
}
