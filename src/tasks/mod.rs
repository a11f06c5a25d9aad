//! Background Tasks Module
//!
//! - TTL Cleanup: Removes expired list pages at configured intervals

mod cleanup;

pub use cleanup::spawn_cleanup_task;
