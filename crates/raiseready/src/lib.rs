//! Core library for the fundraising-readiness platform: company onboarding
//! state, the investability scoring engine, and the change-trigger plumbing
//! that reacts to data-room and verification mutations.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
