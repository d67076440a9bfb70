mod args;

pub use args::{Cli, Commands, RunArgs};
