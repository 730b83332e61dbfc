pub mod args;
pub mod types;

pub use args::{Cli, Commands};
