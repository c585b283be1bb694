//! Audit certificate: which chunk ids each policy kept and dropped.
//!
//! The `*Document` types mirror the JSON with every field optional so that a
//! missing required field surfaces as a named [`IntegrityError`] instead of a
//! generic parse failure.

use serde::{Deserialize, Serialize};

use super::policy::{PolicyKind, PolicyPair};
use crate::errors::IntegrityError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CertificateDocument {
    #[serde(default)]
    pub full_context: Option<FullContextDocument>,
    #[serde(default)]
    pub policies: Option<PolicyPair<Option<PolicyCertificateDocument>>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FullContextDocument {
    #[serde(default)]
    pub pivot_id: Option<String>,
    #[serde(default)]
    pub protected_ids: Option<Vec<String>>,
    #[serde(rename = "W", default)]
    pub w: Option<Vec<f64>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolicyCertificateDocument {
    #[serde(default)]
    pub kept_ids: Option<Vec<String>>,
    #[serde(default)]
    pub audit: Option<AuditRecordDocument>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuditRecordDocument {
    #[serde(default)]
    pub dropped_ids: Option<Vec<String>>,
    #[serde(default)]
    pub protected_ids: Option<Vec<String>>,
    #[serde(default)]
    pub tokens_before: Option<u64>,
    #[serde(default)]
    pub tokens_after: Option<u64>,
    #[serde(default)]
    pub contract_satisfied: Option<bool>,
}

/// Validated certificate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Certificate {
    pub full_context: FullContext,
    pub policies: PolicyPair<PolicyCertificate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FullContext {
    /// The chunk a correct answer must stay grounded in.
    pub pivot_id: String,
    /// Globally protected chunk ids; may be absent in the document.
    pub protected_ids: Vec<String>,
    /// Weight sequence; only its final value is ever displayed.
    #[serde(rename = "W")]
    pub w: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyCertificate {
    pub kept_ids: Vec<String>,
    pub audit: AuditRecord,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub dropped_ids: Vec<String>,
    pub protected_ids: Vec<String>,
    /// Token accounting is optional; summaries report it as unavailable when absent.
    pub tokens_before: Option<u64>,
    pub tokens_after: Option<u64>,
    pub contract_satisfied: Option<bool>,
}

fn missing(field: impl Into<String>) -> IntegrityError {
    IntegrityError::MissingCertificateField {
        field: field.into(),
    }
}

impl TryFrom<CertificateDocument> for Certificate {
    type Error = IntegrityError;

    fn try_from(doc: CertificateDocument) -> Result<Self, Self::Error> {
        let full = doc.full_context.ok_or_else(|| missing("full_context"))?;
        let pivot_id = full
            .pivot_id
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| missing("full_context.pivot_id"))?;
        let full_context = FullContext {
            pivot_id,
            protected_ids: full.protected_ids.unwrap_or_default(),
            w: full.w.unwrap_or_default(),
        };

        let policies = doc
            .policies
            .ok_or_else(|| missing("policies"))?
            .try_map(PolicyCertificate::from_document)?;

        Ok(Self {
            full_context,
            policies,
        })
    }
}

impl PolicyCertificate {
    fn from_document(
        policy: PolicyKind,
        doc: Option<PolicyCertificateDocument>,
    ) -> Result<Self, IntegrityError> {
        let field = |name: &str| format!("policies.{policy}.{name}");
        let doc = doc.ok_or_else(|| missing(format!("policies.{policy}")))?;
        let kept_ids = doc.kept_ids.ok_or_else(|| missing(field("kept_ids")))?;
        let audit = doc.audit.ok_or_else(|| missing(field("audit")))?;
        let dropped_ids = audit
            .dropped_ids
            .ok_or_else(|| missing(field("audit.dropped_ids")))?;

        Ok(Self {
            kept_ids,
            audit: AuditRecord {
                dropped_ids,
                protected_ids: audit.protected_ids.unwrap_or_default(),
                tokens_before: audit.tokens_before,
                tokens_after: audit.tokens_after,
                contract_satisfied: audit.contract_satisfied,
            },
        })
    }
}

impl Certificate {
    /// Union of the global protected list and the guarded policy's audited list,
    /// sorted and de-duplicated. The two lists may be reported at different
    /// granularity, so neither alone is authoritative.
    pub fn merged_protected_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .full_context
            .protected_ids
            .iter()
            .chain(self.policies.l2_guarded.audit.protected_ids.iter())
            .cloned()
            .collect();
        ids.sort();
        ids.dedup();
        ids
    }
}
