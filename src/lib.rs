//! Studymate API service library crate.
//!
//! # Purpose
//! Exposes the HTTP API surface, auth and policy helpers, the assessment
//! engine, configuration, and storage implementations for use by the binary
//! and tests.
//!
//! # Notes
//! Module boundaries mirror the request pipeline: principal resolution and
//! policy live in `auth`, row-level scoping in `auth::scope`, test delivery
//! and grading in `assessment`, and persistence behind the `store` trait.
pub mod api;
pub mod app;
pub mod assessment;
pub mod auth;
pub mod config;
pub mod model;
pub mod observability;
pub mod store;
