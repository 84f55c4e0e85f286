//! Brunel Core
//!
//! Core types and algorithms for the Brunel CI progress client.
//!
//! This crate contains:
//! - Domain types: wire-faithful models of the server API (Job, JobProgress, ...)
//! - Merge engine: folds delta-fetched progress snapshots into an accumulated view
//! - Termination policy: decides when a polling session is complete
//!
//! Everything here is pure and I/O-free; HTTP and scheduling live in
//! `brunel-client` and `brunel-watch`.

pub mod domain;
pub mod merge;
pub mod policy;
