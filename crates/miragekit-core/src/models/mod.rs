pub mod audit;
pub mod benchmark;
pub mod certificate;
pub mod evaluation;
pub mod level;
pub mod metric_vector;
pub mod policy;
pub mod policy_table;
pub mod witness;

pub use audit::{
    ChunkRole, ClassifiedChunk, ComparisonPhrase, ComparisonSummary, PolicyAudit, RoleCounts,
    TokenDelta, TokenSummary,
};
pub use benchmark::{BenchmarkDocument, BenchmarkSuite};
pub use certificate::{
    AuditRecord, AuditRecordDocument, Certificate, CertificateDocument, FullContext,
    FullContextDocument, PolicyCertificate, PolicyCertificateDocument,
};
pub use evaluation::{
    percent, ContractBadge, ContractState, DerivedMetrics, Evaluation, Explainer, HealthState,
    MetricKey, MetricRow, PolicyEvaluation, SeverityBand,
};
pub use level::{level_key, RetentionLevels};
pub use metric_vector::MetricVector;
pub use policy::{PolicyKind, PolicyPair};
pub use policy_table::PolicyTable;
pub use witness::{Witness, WitnessView};
