//! Report rendering

use clap::ValueEnum;
use dvs_nic_core::{HostRunReport, ReassignOutcome, VmOutcome, VmReport, VmRunReport};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Pretty JSON document for a run report
pub fn to_json<T: Serialize>(report: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

fn already_on(label: &str, portgroup_key: &str) -> String {
    format!("Virtual {} is already on {}", label, portgroup_key)
}

fn planned(spec: &impl Serialize) -> Vec<String> {
    match serde_json::to_string_pretty(spec) {
        Ok(json) => json.lines().map(str::to_string).collect(),
        Err(err) => vec![format!("(spec not printable: {})", err)],
    }
}

pub fn render_vm_report(report: &VmRunReport) -> Vec<String> {
    match report {
        VmRunReport::VmNotFound { .. } => vec!["VM not found".to_string()],
        VmRunReport::Moved {
            vm,
            adapter,
            portgroup,
            outcome,
        } => match outcome {
            ReassignOutcome::Reconfigured { .. } => vec![format!(
                "VM NIC {} successfully portgroup changed to {}",
                adapter, portgroup
            )],
            ReassignOutcome::AlreadyOn {
                label,
                portgroup_key,
            } => vec![already_on(label, portgroup_key)],
            ReassignOutcome::Planned { label, spec } => {
                let mut lines = vec![format!(
                    "Dry run: {} of {} would be moved to {} with:",
                    label, vm, portgroup
                )];
                lines.extend(planned(spec));
                lines
            }
        },
    }
}

/// Lines for one VM of a host run, printed as soon as that VM is done
pub fn render_vm_lines(report: &VmReport, adapter: u32, portgroup: &str) -> Vec<String> {
    let vm = &report.vm;
    let mut lines = vec![format!("Virtual Machine {}", vm)];
    match &report.outcome {
        VmOutcome::Done(ReassignOutcome::Reconfigured { .. }) => lines.push(format!(
            "{} VM NIC {} successfully portgroup changed to {}",
            vm, adapter, portgroup
        )),
        VmOutcome::Done(ReassignOutcome::AlreadyOn {
            label,
            portgroup_key,
        }) => lines.push(already_on(label, portgroup_key)),
        VmOutcome::Done(ReassignOutcome::Planned { label, spec }) => {
            lines.push(format!(
                "Dry run: {} of {} would be moved to {} with:",
                label, vm, portgroup
            ));
            lines.extend(planned(spec));
        }
        VmOutcome::Failed { error } => lines.push(format!("{} failed: {}", vm, error)),
    }
    lines
}

/// Closing lines of a host run once every VM has been reported
pub fn render_host_summary(report: &HostRunReport) -> Vec<String> {
    match report {
        HostRunReport::HostNotFound { .. } => vec!["Host not found".to_string()],
        HostRunReport::Processed { vms, .. } if report.failed() > 0 => {
            vec![format!("{} of {} VMs failed", report.failed(), vms.len())]
        }
        HostRunReport::Processed { .. } => Vec::new(),
    }
}
