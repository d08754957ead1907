//! Session-bound client for the management JSON API

use std::time::Duration;

use async_trait::async_trait;
use dvs_nic_core::{ClientError, ManagementClient};
use reqwest::header::HeaderMap;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use vim_types::{
    DvPortgroupConfigInfo, InventoryObject, ManagedObjectReference, ObjectKind,
    PortgroupBinding, ServiceContent, TaskInfo, UserSession, VirtualDevice,
    VirtualMachineConfigInfo, VirtualMachineConfigSpec,
};

use crate::config::VimConfig;
use crate::error::VimApiError;

/// Header carrying the session after login
pub const SESSION_HEADER: &str = "vmware-api-session-id";

/// Pull a readable message out of a fault body
pub(crate) fn fault_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;

    if let Some(message) = value.get("message").and_then(Value::as_str) {
        return Some(message.to_string());
    }
    let from_fault_message = value
        .get("faultMessage")
        .and_then(Value::as_array)
        .and_then(|messages| messages.first())
        .and_then(|message| message.get("message"))
        .and_then(Value::as_str);
    if let Some(message) = from_fault_message {
        return Some(message.to_string());
    }
    value
        .get("_typeName")
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// `<Type>/<id>` path of a managed object
fn object_path(moref: &ManagedObjectReference) -> String {
    format!("{}/{}", moref.kind, urlencoding::encode(&moref.value))
}

/// HTTP plumbing shared by login and the authenticated calls
struct Transport {
    http: Client,
    base_url: String,
    session_id: Option<String>,
}

impl Transport {
    fn new(config: &VimConfig) -> Result<Self, VimApiError> {
        let http = Client::builder()
            .timeout(config.request_timeout())
            .danger_accept_invalid_certs(config.insecure)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url(),
            session_id: None,
        })
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<(HeaderMap, String), VimApiError> {
        let url = format!("{}/{}", self.base_url, path);
        log::debug!("{} {}", method, url);

        let mut req_builder = self.http.request(method, &url);
        if let Some(ref session_id) = self.session_id {
            req_builder = req_builder.header(SESSION_HEADER, session_id);
        }
        if let Some(body) = body {
            req_builder = req_builder.json(body);
        }

        let response = req_builder.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let text = response.text().await?;

        if status.is_client_error() || status.is_server_error() {
            let message = fault_message(&text).unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string()
            });
            return Err(VimApiError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        log::debug!("Response: status={}, body_size={}", status, text.len());
        Ok((headers, text))
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<T, VimApiError> {
        let (_, text) = self.send(method, path, body).await?;
        decode(path, &text)
    }
}

fn decode<T: DeserializeOwned>(path: &str, text: &str) -> Result<T, VimApiError> {
    let result = if text.trim().is_empty() {
        serde_json::from_value(Value::Null)
    } else {
        serde_json::from_str(text)
    };
    result.map_err(|e| VimApiError::ParseError(format!("{}: {}", path, e)))
}

/// Authenticated session against one management endpoint
pub struct VimClient {
    transport: Transport,
    content: ServiceContent,
    poll_interval: Duration,
    task_timeout: Option<Duration>,
}

impl VimClient {
    /// Read the service content and log in
    pub async fn connect(config: &VimConfig) -> Result<Self, VimApiError> {
        let password = config
            .password
            .clone()
            .ok_or_else(|| VimApiError::MissingPassword {
                user: config.user.clone(),
            })?;

        let mut transport = Transport::new(config)?;
        let content: ServiceContent = transport
            .call(Method::GET, "ServiceInstance/ServiceInstance/content", None)
            .await?;

        if let Some(ref about) = content.about {
            log::info!("Connected to {} (API {})", about.full_name, about.api_version);
        }

        let login_path = format!("{}/Login", object_path(&content.session_manager));
        let credentials = json!({"userName": &config.user, "password": &password});
        let (headers, text) = match transport
            .send(Method::POST, &login_path, Some(&credentials))
            .await
        {
            Ok(response) => response,
            Err(VimApiError::ApiError { message, .. }) => {
                return Err(VimApiError::Authentication(message))
            }
            Err(err) => return Err(err),
        };

        let session_id = headers
            .get(SESSION_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| {
                VimApiError::Authentication(format!("login response carried no {}", SESSION_HEADER))
            })?;
        transport.session_id = Some(session_id.to_string());

        let session: UserSession = decode(&login_path, &text)?;
        log::info!("Logged in as {}", session.user_name);

        Ok(Self {
            transport,
            content,
            poll_interval: config.task_poll_interval(),
            task_timeout: config.task_timeout(),
        })
    }

    /// End the session. Safe to call more than once.
    pub async fn logout(&mut self) -> Result<(), VimApiError> {
        if self.transport.session_id.is_none() {
            return Ok(());
        }
        let path = format!("{}/Logout", object_path(&self.content.session_manager));
        self.transport.call::<()>(Method::POST, &path, None).await?;
        self.transport.session_id = None;
        log::debug!("Logged out");
        Ok(())
    }

    pub fn service_content(&self) -> &ServiceContent {
        &self.content
    }

    async fn property<T: DeserializeOwned>(
        &self,
        moref: &ManagedObjectReference,
        property: &str,
    ) -> Result<T, VimApiError> {
        let path = format!("{}/{}", object_path(moref), property);
        self.transport.call(Method::GET, &path, None).await
    }

    async fn invoke<T: DeserializeOwned>(
        &self,
        moref: &ManagedObjectReference,
        method: &str,
        body: Option<&Value>,
    ) -> Result<T, VimApiError> {
        let path = format!("{}/{}", object_path(moref), method);
        self.transport.call(Method::POST, &path, body).await
    }

    async fn with_names(
        &self,
        morefs: Vec<ManagedObjectReference>,
    ) -> Result<Vec<InventoryObject>, VimApiError> {
        let mut objects = Vec::with_capacity(morefs.len());
        for moref in morefs {
            let name: String = self.property(&moref, "name").await?;
            objects.push(InventoryObject::new(moref, name));
        }
        Ok(objects)
    }

    async fn read_view(
        &self,
        view: &ManagedObjectReference,
    ) -> Result<Vec<InventoryObject>, VimApiError> {
        let morefs: Vec<ManagedObjectReference> = self.property(view, "view").await?;
        self.with_names(morefs).await
    }

    async fn poll_task(&self, task: &ManagedObjectReference) -> Result<TaskInfo, VimApiError> {
        loop {
            let info: TaskInfo = self.property(task, "info").await?;
            if info.state.is_terminal() {
                log::info!("Task {} finished: {:?}", task.value, info.state);
                return Ok(info);
            }
            log::debug!(
                "Task {} {:?} ({}%)",
                task.value,
                info.state,
                info.progress.unwrap_or(0)
            );
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}

#[async_trait]
impl ManagementClient for VimClient {
    async fn container_view(
        &self,
        kinds: &[ObjectKind],
    ) -> Result<Vec<InventoryObject>, ClientError> {
        let types: Vec<&str> = kinds.iter().map(ObjectKind::as_str).collect();
        let request = json!({
            "container": &self.content.root_folder,
            "type": types,
            "recursive": true,
        });
        let view: ManagedObjectReference = self
            .invoke(&self.content.view_manager, "CreateContainerView", Some(&request))
            .await?;

        let objects = self.read_view(&view).await;
        if let Err(err) = self.invoke::<()>(&view, "DestroyView", None).await {
            log::warn!("Failed to destroy container view {}: {}", view, err);
        }
        Ok(objects?)
    }

    async fn host_vms(
        &self,
        host: &ManagedObjectReference,
    ) -> Result<Vec<InventoryObject>, ClientError> {
        let morefs: Vec<ManagedObjectReference> = self.property(host, "vm").await?;
        Ok(self.with_names(morefs).await?)
    }

    async fn vm_devices(
        &self,
        vm: &ManagedObjectReference,
    ) -> Result<Vec<VirtualDevice>, ClientError> {
        // config is unset for inaccessible VMs
        let config: Option<VirtualMachineConfigInfo> = self.property(vm, "config").await?;
        Ok(config.map(|config| config.hardware.device).unwrap_or_default())
    }

    async fn portgroup_binding(
        &self,
        portgroup: &ManagedObjectReference,
    ) -> Result<PortgroupBinding, ClientError> {
        let portgroup_key: String = self.property(portgroup, "key").await?;
        let config: DvPortgroupConfigInfo = self.property(portgroup, "config").await?;
        let switch = config.distributed_virtual_switch.ok_or_else(|| {
            ClientError::Decode(format!("portgroup {} has no distributed switch", portgroup))
        })?;
        let switch_uuid: String = self.property(&switch, "uuid").await?;

        Ok(PortgroupBinding {
            portgroup_key,
            switch_uuid,
        })
    }

    async fn reconfigure_vm(
        &self,
        vm: &ManagedObjectReference,
        spec: &VirtualMachineConfigSpec,
    ) -> Result<ManagedObjectReference, ClientError> {
        let body = json!({ "spec": spec });
        let task: ManagedObjectReference = self.invoke(vm, "ReconfigVM_Task", Some(&body)).await?;
        Ok(task)
    }

    async fn wait_for_task(&self, task: &ManagedObjectReference) -> Result<TaskInfo, ClientError> {
        let info = match self.task_timeout {
            Some(limit) => tokio::time::timeout(limit, self.poll_task(task))
                .await
                .map_err(|_| VimApiError::Timeout(format!("task {}", task.value)))??,
            None => self.poll_task(task).await?,
        };
        Ok(info)
    }
}
