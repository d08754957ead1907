//! Management endpoint seam

use async_trait::async_trait;
use vim_types::{
    InventoryObject, ManagedObjectReference, ObjectKind, PortgroupBinding, TaskInfo,
    VirtualDevice, VirtualMachineConfigSpec,
};

use crate::error::ClientError;

/// Operations the reassignment logic needs from the management endpoint.
///
/// Session lifetime belongs to the implementation: a value of this trait is
/// always an authenticated session.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ManagementClient: Send + Sync {
    /// Snapshot of every object of the given kinds under the root folder,
    /// in the order the endpoint reports them
    async fn container_view(
        &self,
        kinds: &[ObjectKind],
    ) -> Result<Vec<InventoryObject>, ClientError>;

    /// Virtual machines registered on a host
    async fn host_vms(
        &self,
        host: &ManagedObjectReference,
    ) -> Result<Vec<InventoryObject>, ClientError>;

    /// Hardware devices of a virtual machine
    async fn vm_devices(
        &self,
        vm: &ManagedObjectReference,
    ) -> Result<Vec<VirtualDevice>, ClientError>;

    /// Key and owning-switch UUID of a distributed portgroup
    async fn portgroup_binding(
        &self,
        portgroup: &ManagedObjectReference,
    ) -> Result<PortgroupBinding, ClientError>;

    /// Submit a reconfiguration, returning the task handle
    async fn reconfigure_vm(
        &self,
        vm: &ManagedObjectReference,
        spec: &VirtualMachineConfigSpec,
    ) -> Result<ManagedObjectReference, ClientError>;

    /// Block until the task reaches a terminal state
    async fn wait_for_task(&self, task: &ManagedObjectReference)
        -> Result<TaskInfo, ClientError>;
}
