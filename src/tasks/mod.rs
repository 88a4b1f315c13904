//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Page sweep: Removes expired page cache entries at configured intervals

mod sweep;

pub use sweep::spawn_page_sweep_task;
