//! DVS NIC reassignment core
//!
//! Finds virtual machines, hosts and portgroups by display name, builds the
//! device edit that moves a network adapter onto a distributed portgroup and
//! drives the reconfiguration through a [`ManagementClient`].

pub mod client;
pub mod error;
pub mod lookup;
pub mod portgroup;
pub mod reassign;
pub mod run;

#[cfg(test)]
mod testing;

pub use client::ManagementClient;
pub use error::{ClientError, NicError};
pub use lookup::{find_first, lookup, Lookup};
pub use portgroup::resolve_portgroup;
pub use reassign::{
    adapter_label, build_edit_spec, find_adapter, reassign_adapter, BindingGuard,
    ReassignOptions, ReassignOutcome,
};
pub use run::{
    move_host_adapters, move_vm_adapter, HostRunReport, MoveRequest, RunOptions, VmOutcome,
    VmReport, VmRunReport,
};

/// Result type for NIC reassignment operations
pub type Result<T> = std::result::Result<T, NicError>;
