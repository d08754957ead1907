use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::device::VirtualDevice;
use crate::error::VimTypeError;

fn device_spec_type() -> String {
    "VirtualDeviceConfigSpec".to_string()
}

fn config_spec_type() -> String {
    "VirtualMachineConfigSpec".to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeviceConfigOperation {
    Add,
    Remove,
    Edit,
}

impl FromStr for DeviceConfigOperation {
    type Err = VimTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "add" => Ok(DeviceConfigOperation::Add),
            "remove" => Ok(DeviceConfigOperation::Remove),
            "edit" => Ok(DeviceConfigOperation::Edit),
            other => Err(VimTypeError::UnknownOperation(other.to_string())),
        }
    }
}

impl fmt::Display for DeviceConfigOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self {
            DeviceConfigOperation::Add => "add",
            DeviceConfigOperation::Remove => "remove",
            DeviceConfigOperation::Edit => "edit",
        };
        f.write_str(op)
    }
}

/// Change to a single device
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VirtualDeviceConfigSpec {
    #[serde(rename = "_typeName", default = "device_spec_type")]
    pub type_name: String,
    pub operation: DeviceConfigOperation,
    pub device: VirtualDevice,
}

impl VirtualDeviceConfigSpec {
    pub fn edit(device: VirtualDevice) -> Self {
        Self {
            type_name: device_spec_type(),
            operation: DeviceConfigOperation::Edit,
            device,
        }
    }
}

/// Reconfiguration request for a virtual machine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualMachineConfigSpec {
    #[serde(rename = "_typeName", default = "config_spec_type")]
    pub type_name: String,
    #[serde(default)]
    pub device_change: Vec<VirtualDeviceConfigSpec>,
}

impl VirtualMachineConfigSpec {
    pub fn with_device_change(device_change: Vec<VirtualDeviceConfigSpec>) -> Self {
        Self {
            type_name: config_spec_type(),
            device_change,
        }
    }
}
