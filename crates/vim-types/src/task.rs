use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::moref::ManagedObjectReference;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskState {
    Queued,
    Running,
    Success,
    Error,
}

impl TaskState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskState::Success | TaskState::Error)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedMethodFault {
    #[serde(default)]
    pub fault: Value,
    #[serde(default)]
    pub localized_message: Option<String>,
}

impl LocalizedMethodFault {
    /// Best human-readable description of the fault
    pub fn message(&self) -> String {
        if let Some(message) = self.localized_message.as_deref().filter(|m| !m.is_empty()) {
            return message.to_string();
        }
        self.fault
            .get("_typeName")
            .and_then(Value::as_str)
            .unwrap_or("unknown fault")
            .to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskInfo {
    pub key: String,
    pub task: ManagedObjectReference,
    pub state: TaskState,
    #[serde(default)]
    pub description_id: Option<String>,
    #[serde(default)]
    pub entity_name: Option<String>,
    #[serde(default)]
    pub progress: Option<i32>,
    #[serde(default)]
    pub error: Option<LocalizedMethodFault>,
}
