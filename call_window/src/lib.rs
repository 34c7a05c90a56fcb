//! Windowed summaries of per-base modification calls

#[macro_use]
extern crate log;
#[macro_use]
extern crate anyhow;

pub mod calls;
pub mod output;
pub mod plot;
pub mod window;
