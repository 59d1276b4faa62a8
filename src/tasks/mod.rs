//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Age Sweep: Removes cache entries not accessed within the configured
//!   maximum age

mod sweep;

pub use sweep::spawn_sweep_task;
