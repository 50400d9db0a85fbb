mod root;
mod run;
mod state_args;
mod view;

pub use root::Cli;
