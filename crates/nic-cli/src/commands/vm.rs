//! Single-VM command

use anyhow::Result;
use dvs_nic_core::{move_vm_adapter, ManagementClient, MoveRequest, RunOptions, VmRunReport};

use crate::output::{render_vm_report, to_json, OutputFormat};

/// Moves one adapter of one virtual machine
pub struct VmCommand<'a, C: ?Sized> {
    client: &'a C,
    format: OutputFormat,
}

impl<'a, C> VmCommand<'a, C>
where
    C: ManagementClient + ?Sized,
{
    pub fn new(client: &'a C, format: OutputFormat) -> Self {
        Self { client, format }
    }

    /// Execute vm command
    pub async fn execute(&self, request: &MoveRequest, options: RunOptions) -> Result<VmRunReport> {
        if self.format == OutputFormat::Text {
            println!("Searching for VM {}", request.target);
        }

        let report = move_vm_adapter(self.client, request, options).await?;

        match self.format {
            OutputFormat::Text => {
                for line in render_vm_report(&report) {
                    println!("{}", line);
                }
            }
            OutputFormat::Json => println!("{}", to_json(&report)?),
        }
        Ok(report)
    }
}
