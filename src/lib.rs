//! Club Membership - membership state engine for clubs
//!
//! Governs how members join, are approved or rejected, change role, are
//! removed, and leave. Every transition is authorized against the actor's
//! live role and persisted as a single conditional update.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;

pub use application::MembershipEngine;
pub use domain::membership::MembershipError;
