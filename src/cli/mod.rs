//! Command-line interface module.

mod args;
pub mod feed;
pub mod inspect;
pub mod serve;

pub use args::{Cli, Commands, OutputArgs};
