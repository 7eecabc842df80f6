pub mod clone;
pub mod command;
pub mod diff;
pub mod history;
pub mod location;
pub mod pages;
pub mod repository;

pub use clone::{CloneLifecycle, RunContext};
pub use command::{CommandOutput, CommandRunner, CommandSpec, ProcessRunner};
pub use location::RepoLocation;
pub use repository::WikiRepository;
