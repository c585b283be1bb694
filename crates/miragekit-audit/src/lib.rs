//! # miragekit-audit
//!
//! Reads an audit certificate and explains what each retention policy kept
//! and dropped.
//!
//! - **Classifier**: assigns every chunk id a causal role (pivot, predecessor,
//!   noise, context) with a fixed rule precedence.
//! - **Summarizer**: per-policy role counts, token delta, and the qualitative
//!   comparison phrase.

pub mod classifier;
pub mod summarizer;

pub use classifier::{classify, ChunkClassifier, NamingConvention};
pub use summarizer::{select_phrase, summarize};
