//! By-VM and by-host reassignment runs

use serde::Serialize;
use vim_types::ObjectKind;

use crate::client::ManagementClient;
use crate::lookup::find_first_object;
use crate::portgroup::resolve_portgroup;
use crate::reassign::{reassign_adapter, BindingGuard, ReassignOptions, ReassignOutcome};
use crate::Result;

/// What to move where. `target` is a VM name or a host name depending on
/// the run.
#[derive(Debug, Clone)]
pub struct MoveRequest {
    pub target: String,
    pub adapter: u32,
    pub portgroup: String,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    pub dry_run: bool,
    /// Host runs only: record per-VM failures and keep going
    pub continue_on_error: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum VmRunReport {
    VmNotFound {
        vm: String,
    },
    Moved {
        vm: String,
        adapter: u32,
        portgroup: String,
        outcome: ReassignOutcome,
    },
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum VmOutcome {
    Done(ReassignOutcome),
    Failed { error: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct VmReport {
    pub vm: String,
    pub outcome: VmOutcome,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum HostRunReport {
    HostNotFound {
        host: String,
    },
    Processed {
        host: String,
        adapter: u32,
        portgroup: String,
        vms: Vec<VmReport>,
    },
}

impl HostRunReport {
    /// Number of VMs whose adapter was reconfigured
    pub fn reconfigured(&self) -> usize {
        self.count(|outcome| {
            matches!(
                outcome,
                VmOutcome::Done(ReassignOutcome::Reconfigured { .. })
            )
        })
    }

    pub fn failed(&self) -> usize {
        self.count(|outcome| matches!(outcome, VmOutcome::Failed { .. }))
    }

    fn count<F: Fn(&VmOutcome) -> bool>(&self, pred: F) -> usize {
        match self {
            HostRunReport::HostNotFound { .. } => 0,
            HostRunReport::Processed { vms, .. } => {
                vms.iter().filter(|report| pred(&report.outcome)).count()
            }
        }
    }
}

/// Move one adapter of the VM named `request.target`.
///
/// The portgroup is resolved before the VM miss is reported, so a bad
/// portgroup name is an error even when the VM does not exist.
pub async fn move_vm_adapter<C>(
    client: &C,
    request: &MoveRequest,
    options: RunOptions,
) -> Result<VmRunReport>
where
    C: ManagementClient + ?Sized,
{
    let vm = find_first_object(client, ObjectKind::VirtualMachine, &request.target).await?;
    let target = resolve_portgroup(client, &request.portgroup).await?;

    let Some(vm) = vm else {
        log::info!("VM '{}' not found", request.target);
        return Ok(VmRunReport::VmNotFound {
            vm: request.target.clone(),
        });
    };

    let reassign = ReassignOptions {
        guard: BindingGuard::Always,
        dry_run: options.dry_run,
    };
    let outcome = reassign_adapter(client, &vm.moref, request.adapter, &target, reassign).await?;

    Ok(VmRunReport::Moved {
        vm: vm.name,
        adapter: request.adapter,
        portgroup: request.portgroup.clone(),
        outcome,
    })
}

/// Move the same adapter of every VM on the host named `request.target`,
/// one VM at a time in host order. Adapters already on the portgroup are
/// left alone.
///
/// `on_vm` sees each VM's report as soon as that VM is done, so VMs handled
/// before an aborting failure are still visible to the caller.
pub async fn move_host_adapters<C, F>(
    client: &C,
    request: &MoveRequest,
    options: RunOptions,
    mut on_vm: F,
) -> Result<HostRunReport>
where
    C: ManagementClient + ?Sized,
    F: FnMut(&VmReport),
{
    let host = find_first_object(client, ObjectKind::HostSystem, &request.target).await?;
    let target = resolve_portgroup(client, &request.portgroup).await?;

    let Some(host) = host else {
        log::info!("Host '{}' not found", request.target);
        return Ok(HostRunReport::HostNotFound {
            host: request.target.clone(),
        });
    };

    let reassign = ReassignOptions {
        guard: BindingGuard::SkipIfBound,
        dry_run: options.dry_run,
    };

    let vms = client.host_vms(&host.moref).await?;
    log::info!("Host '{}' has {} VMs", host.name, vms.len());

    let mut reports = Vec::with_capacity(vms.len());
    for vm in vms {
        let outcome =
            match reassign_adapter(client, &vm.moref, request.adapter, &target, reassign).await {
                Ok(outcome) => VmOutcome::Done(outcome),
                Err(err) if options.continue_on_error => {
                    log::warn!("VM '{}': {}", vm.name, err);
                    VmOutcome::Failed {
                        error: err.to_string(),
                    }
                }
                Err(err) => return Err(err),
            };
        let report = VmReport {
            vm: vm.name,
            outcome,
        };
        on_vm(&report);
        reports.push(report);
    }

    Ok(HostRunReport::Processed {
        host: host.name,
        adapter: request.adapter,
        portgroup: request.portgroup.clone(),
        vms: reports,
    })
}
