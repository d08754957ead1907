//! Portgroup resolution

use vim_types::{ObjectKind, PortgroupBinding};

use crate::client::ManagementClient;
use crate::lookup::find_object;
use crate::Result;

/// Resolve a portgroup name to its key and owning-switch UUID.
///
/// The name must identify exactly one distributed portgroup.
pub async fn resolve_portgroup<C>(client: &C, name: &str) -> Result<PortgroupBinding>
where
    C: ManagementClient + ?Sized,
{
    let kind = ObjectKind::DistributedVirtualPortgroup;
    let portgroup = find_object(client, kind, name)
        .await?
        .into_unique(kind, name)?;

    let binding = client.portgroup_binding(&portgroup.moref).await?;
    log::debug!(
        "Portgroup '{}' resolved to key {} on switch {}",
        name,
        binding.portgroup_key,
        binding.switch_uuid
    );
    Ok(binding)
}
