//! Assessment engine: secure test delivery and submission grading.
//!
//! # Purpose
//! Owns the test lifecycle seen by students: a redacted delivery projection
//! that can never serialize answer keys, and a pure scoring function for
//! submissions. The attempts-counter side effect lives in the store; the
//! submit handler sequences scoring and the increment.
pub mod redact;
pub mod scoring;

pub use redact::{RedactedQuestion, RedactedTest};
pub use scoring::{score, AnswerDetail, ScoreReport, SubmittedAnswer};
