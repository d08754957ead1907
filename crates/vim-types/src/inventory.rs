use serde::{Deserialize, Serialize};

use crate::device::VirtualDevice;
use crate::moref::ManagedObjectReference;

/// One row of a container-view snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryObject {
    pub moref: ManagedObjectReference,
    pub name: String,
}

impl InventoryObject {
    pub fn new(moref: ManagedObjectReference, name: impl Into<String>) -> Self {
        Self {
            moref,
            name: name.into(),
        }
    }
}

/// Addressable reconnection target: a portgroup key on its owning switch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortgroupBinding {
    pub portgroup_key: String,
    pub switch_uuid: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualMachineConfigInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub hardware: VirtualHardware,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VirtualHardware {
    #[serde(default)]
    pub device: Vec<VirtualDevice>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DvPortgroupConfigInfo {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub distributed_virtual_switch: Option<ManagedObjectReference>,
}
