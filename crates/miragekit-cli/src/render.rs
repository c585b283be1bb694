//! Plain-text renderings shared by the text sink and the one-shot commands.

use std::fmt::Write;

use miragekit_core::models::{
    percent, ComparisonSummary, Evaluation, PolicyAudit, PolicyEvaluation, RoleCounts,
    WitnessView,
};
use miragekit_session::IntegrityReport;

pub const MIRAGE_WARNING: &str =
    "\u{26a0} MIRAGE: recency still answers confidently but has lost the pivot";

fn policy_block(out: &mut String, policy: &PolicyEvaluation) {
    let _ = writeln!(
        out,
        "{:<11} health {:<9} {}{}",
        policy.policy.as_str(),
        policy.health.as_str(),
        policy.contract.label(),
        if policy.contradiction {
            "  [contradiction]"
        } else {
            ""
        }
    );
    for row in &policy.rows {
        let band = row.band.map(|b| b.as_str()).unwrap_or("");
        let _ = writeln!(out, "  {:<22}{:>5}  {}", row.label, row.display, band);
    }
}

pub fn evaluation(evaluation: &Evaluation) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Retention {}  ({})",
        percent(evaluation.retention),
        evaluation.explainer.message()
    );
    for (_, policy) in evaluation.policies.iter() {
        policy_block(&mut out, policy);
    }
    out
}

/// One line per retention value, for sweeps.
pub fn sweep_row(evaluation: &Evaluation) -> String {
    let cells: Vec<String> = evaluation
        .policies
        .iter()
        .map(|(kind, p)| {
            format!(
                "{kind} pivot {:>4} raw {:>4} {:<8}",
                percent(p.derived.metrics.pivot_preservation_rate),
                percent(p.derived.raw_validity),
                p.health.as_str()
            )
        })
        .collect();
    format!(
        "{:>4}  {}{}",
        percent(evaluation.retention),
        cells.join(" | "),
        if evaluation.session_mirage {
            "  MIRAGE"
        } else {
            ""
        }
    )
}

fn counts_line(counts: &RoleCounts) -> String {
    format!(
        "pivot {} \u{00b7} predecessor {} \u{00b7} noise {} \u{00b7} context {}",
        counts.pivot, counts.predecessor, counts.noise, counts.context
    )
}

fn audit_block(out: &mut String, audit: &PolicyAudit) {
    let _ = writeln!(out, "{}: {}", audit.policy, audit.phrase_text());
    let _ = writeln!(out, "  kept    {}", counts_line(&audit.kept_counts));
    let _ = writeln!(out, "  dropped {}", counts_line(&audit.dropped_counts));
    if let Some(satisfied) = audit.contract_satisfied {
        let _ = writeln!(
            out,
            "  contract satisfied: {}",
            if satisfied { "yes" } else { "no" }
        );
    }
}

pub fn comparison(summary: &ComparisonSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Pivot {} \u{00b7} protected: {}",
        summary.pivot_id,
        if summary.protected_ids.is_empty() {
            "none".to_string()
        } else {
            summary.protected_ids.join(", ")
        }
    );
    for (_, audit) in summary.policies.iter() {
        audit_block(&mut out, audit);
    }
    let _ = writeln!(out, "Tokens: {}", summary.tokens.describe());
    out
}

pub fn witness(view: &WitnessView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Claim: {}", view.claim);
    let _ = writeln!(
        out,
        "Final W: {}",
        view.final_weight.as_deref().unwrap_or("n/a")
    );
    let _ = writeln!(out, "Semantic regret: {}", view.semantic_regret);
    for note in &view.notes {
        let _ = writeln!(out, "  - {note}");
    }
    out
}

pub fn integrity(report: &IntegrityReport) -> String {
    let mut out = String::new();
    let checks: Vec<&str> = report.checks_run.iter().map(|c| c.as_str()).collect();
    let _ = writeln!(
        out,
        "Integrity checks ({}) at {}",
        checks.join(", "),
        report.generated_at.to_rfc3339()
    );
    if report.is_clean() {
        let _ = writeln!(out, "OK: no findings");
    }
    for finding in &report.findings {
        let _ = writeln!(out, "FAIL [{}] {}", finding.check.as_str(), finding.message);
    }
    out
}

#[cfg(test)]
mod tests {
    use miragekit_core::config::MiragekitConfig;
    use miragekit_session::{
        parse_benchmark, parse_certificate, LoadedDocuments, MirageSession, SinkDispatcher,
    };

    use super::*;

    fn session() -> MirageSession {
        let suite = parse_benchmark(&test_fixtures::load_fixture_str("benchmark.json")).unwrap();
        let (certificate, certificate_raw) =
            parse_certificate(&test_fixtures::load_fixture_str("certificate.json")).unwrap();
        let docs = LoadedDocuments {
            suite,
            certificate,
            certificate_raw,
        };
        MirageSession::new(docs, MiragekitConfig::default(), SinkDispatcher::new()).unwrap()
    }

    #[test]
    fn evaluation_text_lists_rows_in_order() {
        let text = evaluation(&session().evaluate_quiet(0.2).unwrap());
        assert!(text.starts_with("Retention 20%  (Mirage active."));
        let raw = text.find("Raw Validity").unwrap();
        let pivot = text.find("Pivot Preserved").unwrap();
        assert!(raw < pivot);
        assert!(text.contains("Contract n/a"));
        assert!(text.contains("[contradiction]"));
        assert!(text.contains("\u{2726} Contract Satisfied \u{00b7} d_pre = 2"));
    }

    #[test]
    fn sweep_row_flags_mirage() {
        let session = session();
        assert!(sweep_row(&session.evaluate_quiet(0.2).unwrap()).ends_with("MIRAGE"));
        assert!(!sweep_row(&session.evaluate_quiet(1.0).unwrap()).contains("MIRAGE"));
    }

    #[test]
    fn comparison_text_includes_phrases_and_tokens() {
        let text = comparison(session().comparison());
        assert!(text.contains("recency: kept noise, lost predecessors"));
        assert!(text.contains("l2_guarded: kept predecessors, dropped noise"));
        assert!(text.contains("Tokens: recency 2400 \u{2192} 800 tokens (-1600)"));
    }

    #[test]
    fn witness_text_shows_formatted_numbers() {
        let text = witness(&session().witness_view());
        assert!(text.contains("Final W: 4.5"));
        assert!(text.contains("Semantic regret: 0.417"));
    }
}
