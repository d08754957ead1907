//! Whole-host command

use anyhow::Result;
use dvs_nic_core::{move_host_adapters, HostRunReport, ManagementClient, MoveRequest, RunOptions};

use crate::output::{render_host_summary, render_vm_lines, to_json, OutputFormat};

/// Moves the same adapter of every virtual machine on a host
pub struct HostCommand<'a, C: ?Sized> {
    client: &'a C,
    format: OutputFormat,
}

impl<'a, C> HostCommand<'a, C>
where
    C: ManagementClient + ?Sized,
{
    pub fn new(client: &'a C, format: OutputFormat) -> Self {
        Self { client, format }
    }

    /// Execute host command. In text mode each VM is printed as it
    /// finishes, so an aborted run still shows the VMs already changed.
    /// Per-VM failures collected under `continue_on_error` are reported and
    /// turned into an error afterwards.
    pub async fn execute(
        &self,
        request: &MoveRequest,
        options: RunOptions,
    ) -> Result<HostRunReport> {
        if self.format == OutputFormat::Text {
            println!("Searching for vSphere Host {}", request.target);
        }

        let text = self.format == OutputFormat::Text;
        let report = move_host_adapters(self.client, request, options, |vm_report| {
            if text {
                for line in render_vm_lines(vm_report, request.adapter, &request.portgroup) {
                    println!("{}", line);
                }
            }
        })
        .await?;

        match self.format {
            OutputFormat::Text => {
                for line in render_host_summary(&report) {
                    println!("{}", line);
                }
            }
            OutputFormat::Json => println!("{}", to_json(&report)?),
        }

        if report.failed() > 0 {
            anyhow::bail!(
                "{} VM(s) on host '{}' could not be reconfigured",
                report.failed(),
                request.target
            );
        }
        Ok(report)
    }
}
