//! Virtualization management object model
//!
//! Typed subset of the management API's objects: only the attributes the
//! NIC reassignment tools read or write are modelled explicitly. Everything
//! else on a device is carried along verbatim so edits round-trip.

pub mod device;
pub mod error;
pub mod inventory;
pub mod moref;
pub mod service;
pub mod spec;
pub mod task;

pub use device::{
    Description, DeviceBacking, DistributedVirtualSwitchPortConnection, VirtualDevice,
    DVS_PORT_BACKING, ETHERNET_CARD_TYPES,
};
pub use error::{VimTypeError, VimTypeResult};
pub use inventory::{
    DvPortgroupConfigInfo, InventoryObject, PortgroupBinding, VirtualMachineConfigInfo,
};
pub use moref::{ManagedObjectReference, ObjectKind};
pub use service::{AboutInfo, ServiceContent, UserSession};
pub use spec::{DeviceConfigOperation, VirtualDeviceConfigSpec, VirtualMachineConfigSpec};
pub use task::{LocalizedMethodFault, TaskInfo, TaskState};
