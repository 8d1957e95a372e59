//! Authentication and authorization modules.
//!
//! # Purpose
//! Groups bearer-token verification, principal resolution, the access policy
//! evaluator, and the content scope filter.
pub mod policy;
pub mod principal;
pub mod scope;
pub mod token;
