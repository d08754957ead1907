//! CLI commands

pub mod host;
pub mod vm;

pub use host::HostCommand;
pub use vm::VmCommand;
