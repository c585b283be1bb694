//! Side-by-side comparison of what each policy kept and dropped.

use std::collections::HashSet;

use miragekit_core::models::{
    Certificate, ComparisonPhrase, ComparisonSummary, PolicyAudit, PolicyCertificate, PolicyKind,
    PolicyPair, RoleCounts, TokenDelta, TokenSummary,
};

use crate::classifier::ChunkClassifier;

/// Pick the qualitative phrase for one policy.
///
/// The mirage signature is tested first: a policy that both kept noise and
/// dropped predecessors reads as "kept noise, lost predecessors" even if it
/// also kept some predecessors.
pub fn select_phrase(kept: &RoleCounts, dropped: &RoleCounts) -> ComparisonPhrase {
    if kept.noise >= 1 && dropped.predecessor >= 1 {
        ComparisonPhrase::KeptNoiseLostPredecessors
    } else if kept.predecessor >= 1 && dropped.noise >= 1 {
        ComparisonPhrase::KeptPredecessorsDroppedNoise
    } else {
        ComparisonPhrase::Neutral
    }
}

fn token_delta(entry: &PolicyCertificate) -> Option<TokenDelta> {
    match (entry.audit.tokens_before, entry.audit.tokens_after) {
        (Some(before), Some(after)) => Some(TokenDelta { before, after }),
        _ => None,
    }
}

fn audit_policy(
    policy: PolicyKind,
    entry: &PolicyCertificate,
    classifier: &ChunkClassifier,
    pivot_id: &str,
    protected: &HashSet<String>,
) -> PolicyAudit {
    let kept = classifier.classify_all(&entry.kept_ids, pivot_id, protected);
    let dropped = classifier.classify_all(&entry.audit.dropped_ids, pivot_id, protected);
    let kept_counts = RoleCounts::from_chunks(&kept);
    let dropped_counts = RoleCounts::from_chunks(&dropped);
    PolicyAudit {
        policy,
        phrase: select_phrase(&kept_counts, &dropped_counts),
        tokens: token_delta(entry),
        contract_satisfied: entry.audit.contract_satisfied,
        kept,
        dropped,
        kept_counts,
        dropped_counts,
    }
}

/// Classify every kept and dropped id of both policies and summarize.
///
/// Token figures are reported only when both policies carry both counts.
pub fn summarize(certificate: &Certificate, classifier: &ChunkClassifier) -> ComparisonSummary {
    let pivot_id = certificate.full_context.pivot_id.as_str();
    let protected_ids = certificate.merged_protected_ids();
    let protected: HashSet<String> = protected_ids.iter().cloned().collect();

    let policies = PolicyPair::new(&certificate.policies.recency, &certificate.policies.l2_guarded)
        .map(|policy, entry| audit_policy(policy, entry, classifier, pivot_id, &protected));

    let tokens = match (policies.recency.tokens, policies.l2_guarded.tokens) {
        (Some(recency), Some(l2_guarded)) => TokenSummary::Available {
            recency,
            l2_guarded,
        },
        _ => TokenSummary::Unavailable,
    };

    tracing::debug!(
        pivot_id,
        protected = protected_ids.len(),
        recency_phrase = policies.recency.phrase_text(),
        l2_guarded_phrase = policies.l2_guarded.phrase_text(),
        "summarized certificate"
    );

    ComparisonSummary {
        pivot_id: pivot_id.to_string(),
        protected_ids,
        policies,
        tokens,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(pivot: usize, predecessor: usize, noise: usize, context: usize) -> RoleCounts {
        RoleCounts {
            pivot,
            predecessor,
            noise,
            context,
        }
    }

    #[test]
    fn mirage_signature_wins_over_guarded_signature() {
        // Kept noise and predecessors, dropped predecessors and noise.
        let phrase = select_phrase(&counts(0, 1, 1, 0), &counts(0, 1, 1, 0));
        assert_eq!(phrase, ComparisonPhrase::KeptNoiseLostPredecessors);
    }

    #[test]
    fn guarded_signature() {
        let phrase = select_phrase(&counts(1, 2, 0, 0), &counts(0, 0, 3, 1));
        assert_eq!(phrase, ComparisonPhrase::KeptPredecessorsDroppedNoise);
    }

    #[test]
    fn neutral_when_nothing_matches() {
        assert_eq!(
            select_phrase(&counts(1, 0, 0, 2), &counts(0, 0, 0, 1)),
            ComparisonPhrase::Neutral
        );
        assert_eq!(
            select_phrase(&RoleCounts::default(), &RoleCounts::default()),
            ComparisonPhrase::Neutral
        );
    }
}
