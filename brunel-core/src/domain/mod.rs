//! Core domain types
//!
//! Wire-faithful models of the Brunel server API. Field names follow the
//! server's JSON contract: PascalCase keys, integer state enums, and array
//! fields that may arrive as `null`.

pub mod event;
pub mod job;
pub mod log;
pub mod progress;
pub mod state;

mod de;
