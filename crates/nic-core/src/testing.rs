//! In-memory management endpoint for tests

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Map};
use vim_types::{
    Description, DeviceBacking, DistributedVirtualSwitchPortConnection, InventoryObject,
    LocalizedMethodFault, ManagedObjectReference, ObjectKind, PortgroupBinding, TaskInfo,
    TaskState, VirtualDevice, VirtualMachineConfigSpec,
};

use crate::client::ManagementClient;
use crate::error::ClientError;
use crate::reassign::adapter_label;

/// vmxnet3 adapter `index` attached to a distributed port
pub fn ethernet_card(
    key: i32,
    index: u32,
    switch_uuid: &str,
    portgroup_key: &str,
) -> VirtualDevice {
    let mut port =
        DistributedVirtualSwitchPortConnection::to_portgroup(switch_uuid, portgroup_key);
    port.port_key = Some("17".to_string());
    port.connection_cookie = Some(991234);

    let mut extra = Map::new();
    extra.insert("controllerKey".to_string(), json!(100));
    extra.insert("unitNumber".to_string(), json!(6 + index));
    extra.insert("addressType".to_string(), json!("assigned"));

    VirtualDevice {
        type_name: "VirtualVmxnet3".to_string(),
        key,
        device_info: Some(Description::new(
            adapter_label(index),
            format!("DVSwitch: {}", switch_uuid),
        )),
        backing: Some(DeviceBacking::distributed_port(port)),
        mac_address: Some(format!("00:50:56:00:00:{:02x}", index)),
        extra,
    }
}

/// e1000e adapter `index` on a standard switch network
pub fn standard_ethernet_card(key: i32, index: u32, network: &str) -> VirtualDevice {
    let mut backing_extra = Map::new();
    backing_extra.insert("deviceName".to_string(), json!(network));

    VirtualDevice {
        type_name: "VirtualE1000e".to_string(),
        key,
        device_info: Some(Description::new(adapter_label(index), network)),
        backing: Some(DeviceBacking {
            type_name: "VirtualEthernetCardNetworkBackingInfo".to_string(),
            port: None,
            extra: backing_extra,
        }),
        mac_address: Some(format!("00:50:56:00:01:{:02x}", index)),
        extra: Map::new(),
    }
}

#[derive(Default)]
struct State {
    objects: Vec<InventoryObject>,
    devices: HashMap<String, Vec<VirtualDevice>>,
    host_vms: HashMap<String, Vec<String>>,
    bindings: HashMap<String, PortgroupBinding>,
    submitted: Vec<(ManagedObjectReference, VirtualMachineConfigSpec)>,
    task_failure: Option<String>,
}

/// Inventory that applies submitted edits to its own device lists, so a
/// second run observes the first run's effect
#[derive(Default)]
pub struct SimulatedInventory {
    state: Mutex<State>,
}

impl SimulatedInventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_vm(&self, value: &str, name: &str, devices: Vec<VirtualDevice>) {
        let mut state = self.state.lock().unwrap();
        state.objects.push(InventoryObject::new(
            ManagedObjectReference::new(ObjectKind::VirtualMachine, value),
            name,
        ));
        state.devices.insert(value.to_string(), devices);
    }

    pub fn add_host(&self, value: &str, name: &str, vms: &[&str]) {
        let mut state = self.state.lock().unwrap();
        state.objects.push(InventoryObject::new(
            ManagedObjectReference::new(ObjectKind::HostSystem, value),
            name,
        ));
        state
            .host_vms
            .insert(value.to_string(), vms.iter().map(|vm| vm.to_string()).collect());
    }

    pub fn add_portgroup(&self, value: &str, name: &str, key: &str, switch_uuid: &str) {
        let mut state = self.state.lock().unwrap();
        state.objects.push(InventoryObject::new(
            ManagedObjectReference::new(ObjectKind::DistributedVirtualPortgroup, value),
            name,
        ));
        state.bindings.insert(
            value.to_string(),
            PortgroupBinding {
                portgroup_key: key.to_string(),
                switch_uuid: switch_uuid.to_string(),
            },
        );
    }

    /// Make every later task end in error with `message`
    pub fn fail_tasks(&self, message: &str) {
        self.state.lock().unwrap().task_failure = Some(message.to_string());
    }

    pub fn submitted(&self) -> Vec<(ManagedObjectReference, VirtualMachineConfigSpec)> {
        self.state.lock().unwrap().submitted.clone()
    }

    fn name_of(state: &State, moref: &ManagedObjectReference) -> Option<String> {
        state
            .objects
            .iter()
            .find(|obj| &obj.moref == moref)
            .map(|obj| obj.name.clone())
    }
}

fn not_found(moref: &ManagedObjectReference) -> ClientError {
    ClientError::Api {
        status: 404,
        message: format!("{} does not exist", moref),
    }
}

#[async_trait]
impl ManagementClient for SimulatedInventory {
    async fn container_view(
        &self,
        kinds: &[ObjectKind],
    ) -> Result<Vec<InventoryObject>, ClientError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .objects
            .iter()
            .filter(|obj| kinds.iter().any(|kind| obj.moref.is(*kind)))
            .cloned()
            .collect())
    }

    async fn host_vms(
        &self,
        host: &ManagedObjectReference,
    ) -> Result<Vec<InventoryObject>, ClientError> {
        let state = self.state.lock().unwrap();
        let vms = state.host_vms.get(&host.value).ok_or_else(|| not_found(host))?;
        Ok(vms
            .iter()
            .map(|value| {
                let moref = ManagedObjectReference::new(ObjectKind::VirtualMachine, value.as_str());
                let name = Self::name_of(&state, &moref).unwrap_or_default();
                InventoryObject::new(moref, name)
            })
            .collect())
    }

    async fn vm_devices(
        &self,
        vm: &ManagedObjectReference,
    ) -> Result<Vec<VirtualDevice>, ClientError> {
        let state = self.state.lock().unwrap();
        state.devices.get(&vm.value).cloned().ok_or_else(|| not_found(vm))
    }

    async fn portgroup_binding(
        &self,
        portgroup: &ManagedObjectReference,
    ) -> Result<PortgroupBinding, ClientError> {
        let state = self.state.lock().unwrap();
        state
            .bindings
            .get(&portgroup.value)
            .cloned()
            .ok_or_else(|| not_found(portgroup))
    }

    async fn reconfigure_vm(
        &self,
        vm: &ManagedObjectReference,
        spec: &VirtualMachineConfigSpec,
    ) -> Result<ManagedObjectReference, ClientError> {
        let mut state = self.state.lock().unwrap();
        state.submitted.push((vm.clone(), spec.clone()));
        let task = ManagedObjectReference::new(
            ObjectKind::Task,
            format!("task-{}", state.submitted.len()),
        );

        if state.task_failure.is_none() {
            let devices = state.devices.get_mut(&vm.value).ok_or_else(|| not_found(vm))?;
            for change in &spec.device_change {
                if let Some(slot) = devices.iter_mut().find(|dev| dev.key == change.device.key) {
                    *slot = change.device.clone();
                }
            }
        }
        Ok(task)
    }

    async fn wait_for_task(&self, task: &ManagedObjectReference) -> Result<TaskInfo, ClientError> {
        let state = self.state.lock().unwrap();
        let (task_state, error) = match &state.task_failure {
            Some(message) => (
                TaskState::Error,
                Some(LocalizedMethodFault {
                    fault: json!({"_typeName": "InvalidDeviceSpec"}),
                    localized_message: Some(message.clone()),
                }),
            ),
            None => (TaskState::Success, None),
        };
        Ok(TaskInfo {
            key: task.value.clone(),
            task: task.clone(),
            state: task_state,
            description_id: Some("VirtualMachine.reconfigure".to_string()),
            entity_name: None,
            progress: Some(100),
            error,
        })
    }
}
