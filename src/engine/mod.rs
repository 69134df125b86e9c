//! Server lifecycle management.
//!
//! This module provides:
//! - Executable resolution (`locate`)
//! - One-time template provisioning (`template`)
//! - Per-instance working directories (`instance`)
//! - Process launch and signalling (`launch`, `process`)
//! - Bounded readiness polling (`readiness`)
//! - The caller-facing handle (`lifecycle`)

pub mod instance;
pub mod launch;
pub mod lifecycle;
pub mod locate;
pub mod process;
pub mod readiness;
pub mod template;

pub use lifecycle::Postgres;
