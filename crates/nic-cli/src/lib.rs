//! DVS NIC CLI
//!
//! Command-line front end for moving a virtual machine's network adapter
//! onto another distributed portgroup, either for one VM or for every VM
//! on a host.

pub mod cli;
pub mod commands;
pub mod output;
