//! Background Tasks Module
//!
//! # Tasks
//! - TTL Cleanup: Sweeps expired entries out of the in-process store

mod cleanup;

pub use cleanup::spawn_cleanup_task;
