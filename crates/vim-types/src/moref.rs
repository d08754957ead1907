use std::fmt;
use std::str::FromStr;

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::VimTypeError;

/// Inventory and service object kinds the tools address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    VirtualMachine,
    HostSystem,
    DistributedVirtualPortgroup,
    VmwareDistributedVirtualSwitch,
    Folder,
    ContainerView,
    Task,
    SessionManager,
    ViewManager,
    ServiceInstance,
}

impl ObjectKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectKind::VirtualMachine => "VirtualMachine",
            ObjectKind::HostSystem => "HostSystem",
            ObjectKind::DistributedVirtualPortgroup => "DistributedVirtualPortgroup",
            ObjectKind::VmwareDistributedVirtualSwitch => "VmwareDistributedVirtualSwitch",
            ObjectKind::Folder => "Folder",
            ObjectKind::ContainerView => "ContainerView",
            ObjectKind::Task => "Task",
            ObjectKind::SessionManager => "SessionManager",
            ObjectKind::ViewManager => "ViewManager",
            ObjectKind::ServiceInstance => "ServiceInstance",
        }
    }
}

impl FromStr for ObjectKind {
    type Err = VimTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "VirtualMachine" => Ok(ObjectKind::VirtualMachine),
            "HostSystem" => Ok(ObjectKind::HostSystem),
            "DistributedVirtualPortgroup" => Ok(ObjectKind::DistributedVirtualPortgroup),
            "VmwareDistributedVirtualSwitch" => Ok(ObjectKind::VmwareDistributedVirtualSwitch),
            "Folder" => Ok(ObjectKind::Folder),
            "ContainerView" => Ok(ObjectKind::ContainerView),
            "Task" => Ok(ObjectKind::Task),
            "SessionManager" => Ok(ObjectKind::SessionManager),
            "ViewManager" => Ok(ObjectKind::ViewManager),
            "ServiceInstance" => Ok(ObjectKind::ServiceInstance),
            other => Err(VimTypeError::UnknownKind(other.to_string())),
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Handle of a remote managed object.
///
/// `kind` stays a plain string: the endpoint may hand back subtypes
/// (e.g. a switch typed `DistributedVirtualSwitch`) that the tools never
/// need to distinguish.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct ManagedObjectReference {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
}

impl ManagedObjectReference {
    pub fn new(kind: ObjectKind, value: impl Into<String>) -> Self {
        Self {
            kind: kind.as_str().to_string(),
            value: value.into(),
        }
    }

    pub fn is(&self, kind: ObjectKind) -> bool {
        self.kind == kind.as_str()
    }
}

impl Serialize for ManagedObjectReference {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("ManagedObjectReference", 3)?;
        state.serialize_field("_typeName", "ManagedObjectReference")?;
        state.serialize_field("type", &self.kind)?;
        state.serialize_field("value", &self.value)?;
        state.end()
    }
}

impl fmt::Display for ManagedObjectReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_kind() {
        let kind: ObjectKind = "HostSystem".parse().unwrap();
        assert_eq!(kind, ObjectKind::HostSystem);
        assert_eq!(kind.to_string(), "HostSystem");
        assert!("Datastore".parse::<ObjectKind>().is_err());
    }

    #[test]
    fn moref_carries_type_name_on_the_wire() {
        let moref = ManagedObjectReference::new(ObjectKind::VirtualMachine, "vm-42");
        let value = serde_json::to_value(&moref).unwrap();
        assert_eq!(
            value,
            json!({"_typeName": "ManagedObjectReference", "type": "VirtualMachine", "value": "vm-42"})
        );

        let back: ManagedObjectReference = serde_json::from_value(value).unwrap();
        assert_eq!(back, moref);
        assert!(back.is(ObjectKind::VirtualMachine));
        assert_eq!(back.to_string(), "VirtualMachine:vm-42");
    }
}
