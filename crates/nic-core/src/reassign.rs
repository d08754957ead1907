//! Network adapter reassignment

use serde::Serialize;
use vim_types::{
    Description, DeviceBacking, DistributedVirtualSwitchPortConnection, ManagedObjectReference,
    PortgroupBinding, TaskState, VirtualDevice, VirtualDeviceConfigSpec, VirtualMachineConfigSpec,
};

use crate::client::ManagementClient;
use crate::error::NicError;
use crate::Result;

/// Label prefix the endpoint gives ethernet adapters
pub const ADAPTER_LABEL_PREFIX: &str = "Network adapter ";

/// Device label of the adapter with the given 1-based index
pub fn adapter_label(index: u32) -> String {
    format!("{}{}", ADAPTER_LABEL_PREFIX, index)
}

/// Ethernet card labelled for `index`
pub fn find_adapter(devices: &[VirtualDevice], index: u32) -> Result<&VirtualDevice> {
    let label = adapter_label(index);
    devices
        .iter()
        .find(|dev| dev.is_ethernet_card() && dev.label() == Some(label.as_str()))
        .ok_or(NicError::AdapterNotFound { label })
}

/// Build the single-device edit that reconnects `device` to `target`.
///
/// Device key, MAC address and all untyped fields are kept. The port key and
/// connection cookie are dropped since they belong to the old port.
pub fn build_edit_spec(
    device: &VirtualDevice,
    target: &PortgroupBinding,
) -> VirtualMachineConfigSpec {
    let mut edited = device.clone();

    let summary = format!("DVSwitch: {}", target.switch_uuid);
    match edited.device_info.as_mut() {
        Some(info) => info.summary = summary,
        None => edited.device_info = Some(Description::new(String::new(), summary)),
    }

    let port = DistributedVirtualSwitchPortConnection::to_portgroup(
        target.switch_uuid.clone(),
        target.portgroup_key.clone(),
    );
    match edited.backing.as_mut() {
        Some(backing) if backing.is_distributed_port() => backing.port = Some(port),
        _ => edited.backing = Some(DeviceBacking::distributed_port(port)),
    }

    VirtualMachineConfigSpec::with_device_change(vec![VirtualDeviceConfigSpec::edit(edited)])
}

/// Whether to skip adapters already bound to the target portgroup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingGuard {
    /// Submit the edit regardless of the current binding
    Always,
    /// Report "already on" instead of submitting a no-op edit
    SkipIfBound,
}

#[derive(Debug, Clone, Copy)]
pub struct ReassignOptions {
    pub guard: BindingGuard,
    pub dry_run: bool,
}

impl ReassignOptions {
    pub fn new(guard: BindingGuard) -> Self {
        Self {
            guard,
            dry_run: false,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ReassignOutcome {
    Reconfigured {
        label: String,
        task: String,
    },
    AlreadyOn {
        label: String,
        portgroup_key: String,
    },
    /// Dry run: the edit that would have been submitted
    Planned {
        label: String,
        spec: VirtualMachineConfigSpec,
    },
}

/// Move adapter `index` of `vm` onto `target` and wait for the task
pub async fn reassign_adapter<C>(
    client: &C,
    vm: &ManagedObjectReference,
    index: u32,
    target: &PortgroupBinding,
    options: ReassignOptions,
) -> Result<ReassignOutcome>
where
    C: ManagementClient + ?Sized,
{
    let devices = client.vm_devices(vm).await?;
    let adapter = find_adapter(&devices, index)?;
    let label = adapter_label(index);

    if options.guard == BindingGuard::SkipIfBound
        && adapter.portgroup_key() == Some(target.portgroup_key.as_str())
    {
        log::info!("{} of {} already on {}, skipping", label, vm, target.portgroup_key);
        return Ok(ReassignOutcome::AlreadyOn {
            label,
            portgroup_key: target.portgroup_key.clone(),
        });
    }

    let spec = build_edit_spec(adapter, target);
    if options.dry_run {
        log::info!("Dry run: not reconfiguring {} of {}", label, vm);
        return Ok(ReassignOutcome::Planned { label, spec });
    }

    let task = client.reconfigure_vm(vm, &spec).await?;
    log::info!("Reconfiguring {} of {} via {}", label, vm, task);

    let info = client.wait_for_task(&task).await?;
    match info.state {
        TaskState::Success => Ok(ReassignOutcome::Reconfigured {
            label,
            task: task.value,
        }),
        _ => Err(NicError::TaskFailed {
            task: task.value,
            message: info
                .error
                .map(|fault| fault.message())
                .unwrap_or_else(|| format!("task ended in state {:?}", info.state)),
        }),
    }
}
