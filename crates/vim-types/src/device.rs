use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Backing type of an adapter attached to a distributed switch port
pub const DVS_PORT_BACKING: &str = "VirtualEthernetCardDistributedVirtualPortBackingInfo";

/// Device type names that are virtual ethernet cards
pub const ETHERNET_CARD_TYPES: &[&str] = &[
    "VirtualEthernetCard",
    "VirtualE1000",
    "VirtualE1000e",
    "VirtualPCNet32",
    "VirtualVmxnet",
    "VirtualVmxnet2",
    "VirtualVmxnet3",
    "VirtualVmxnet3Vrdma",
    "VirtualSriovEthernetCard",
];

fn description_type() -> String {
    "Description".to_string()
}

fn port_connection_type() -> String {
    "DistributedVirtualSwitchPortConnection".to_string()
}

/// A hardware device of a virtual machine.
///
/// Only the attributes touched by a NIC reassignment are typed; all other
/// wire fields (controller key, unit number, connectable state, ...) are
/// kept in `extra` and written back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualDevice {
    #[serde(rename = "_typeName")]
    pub type_name: String,
    pub key: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_info: Option<Description>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backing: Option<DeviceBacking>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mac_address: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl VirtualDevice {
    pub fn is_ethernet_card(&self) -> bool {
        ETHERNET_CARD_TYPES.contains(&self.type_name.as_str())
    }

    pub fn label(&self) -> Option<&str> {
        self.device_info.as_ref().map(|info| info.label.as_str())
    }

    /// Distributed port connection of the current backing, if any
    pub fn port_connection(&self) -> Option<&DistributedVirtualSwitchPortConnection> {
        self.backing.as_ref().and_then(|backing| backing.port.as_ref())
    }

    /// Portgroup key the adapter is currently bound to
    pub fn portgroup_key(&self) -> Option<&str> {
        self.port_connection()
            .and_then(|port| port.portgroup_key.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Description {
    #[serde(rename = "_typeName", default = "description_type")]
    pub type_name: String,
    pub label: String,
    #[serde(default)]
    pub summary: String,
}

impl Description {
    pub fn new(label: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            type_name: description_type(),
            label: label.into(),
            summary: summary.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceBacking {
    #[serde(rename = "_typeName")]
    pub type_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<DistributedVirtualSwitchPortConnection>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DeviceBacking {
    pub fn distributed_port(port: DistributedVirtualSwitchPortConnection) -> Self {
        Self {
            type_name: DVS_PORT_BACKING.to_string(),
            port: Some(port),
            extra: Map::new(),
        }
    }

    pub fn is_distributed_port(&self) -> bool {
        self.type_name == DVS_PORT_BACKING
    }
}

/// Connection of an adapter to a distributed switch.
///
/// A `None` optional is omitted on the wire, which is how `portKey` and
/// `connectionCookie` get cleared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributedVirtualSwitchPortConnection {
    #[serde(rename = "_typeName", default = "port_connection_type")]
    pub type_name: String,
    pub switch_uuid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portgroup_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_cookie: Option<i32>,
}

impl DistributedVirtualSwitchPortConnection {
    pub fn to_portgroup(switch_uuid: impl Into<String>, portgroup_key: impl Into<String>) -> Self {
        Self {
            type_name: port_connection_type(),
            switch_uuid: switch_uuid.into(),
            portgroup_key: Some(portgroup_key.into()),
            port_key: None,
            connection_cookie: None,
        }
    }
}
