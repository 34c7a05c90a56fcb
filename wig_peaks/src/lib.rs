//! Hysteresis peak detection over the segments of a wiggle track

#[macro_use]
extern crate log;
#[macro_use]
extern crate anyhow;

pub mod peak;
pub mod segment;
