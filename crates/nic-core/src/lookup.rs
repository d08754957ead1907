//! Name-based object lookup over a container view

use vim_types::{InventoryObject, ObjectKind};

use crate::client::ManagementClient;
use crate::error::NicError;
use crate::Result;

/// Outcome of matching a display name against an inventory snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
    Found(T),
    NotFound,
    /// Every match, in inventory order
    Ambiguous(Vec<T>),
}

impl<T> Lookup<T> {
    /// First match in inventory order, ignoring any ambiguity
    pub fn first(self) -> Option<T> {
        match self {
            Lookup::Found(obj) => Some(obj),
            Lookup::NotFound => None,
            Lookup::Ambiguous(matches) => matches.into_iter().next(),
        }
    }

    /// Exactly one match, or an error describing why not
    pub fn into_unique(self, kind: ObjectKind, name: &str) -> Result<T> {
        match self {
            Lookup::Found(obj) => Ok(obj),
            Lookup::NotFound => Err(NicError::NotFound {
                kind,
                name: name.to_string(),
            }),
            Lookup::Ambiguous(matches) => Err(NicError::Ambiguous {
                kind,
                name: name.to_string(),
                count: matches.len(),
            }),
        }
    }

    pub fn map<U, F: FnMut(T) -> U>(self, mut f: F) -> Lookup<U> {
        match self {
            Lookup::Found(obj) => Lookup::Found(f(obj)),
            Lookup::NotFound => Lookup::NotFound,
            Lookup::Ambiguous(matches) => Lookup::Ambiguous(matches.into_iter().map(f).collect()),
        }
    }
}

/// Match `name` exactly against every object. The whole snapshot is scanned
/// so duplicates are always reported.
pub fn lookup<'a>(objects: &'a [InventoryObject], name: &str) -> Lookup<&'a InventoryObject> {
    let mut matches: Vec<&InventoryObject> =
        objects.iter().filter(|obj| obj.name == name).collect();

    match matches.len() {
        0 => Lookup::NotFound,
        1 => Lookup::Found(matches.remove(0)),
        _ => Lookup::Ambiguous(matches),
    }
}

/// First exact match in inventory order
pub fn find_first<'a>(objects: &'a [InventoryObject], name: &str) -> Option<&'a InventoryObject> {
    lookup(objects, name).first()
}

/// Fetch a container view of `kind` and match `name` against it
pub async fn find_object<C>(
    client: &C,
    kind: ObjectKind,
    name: &str,
) -> Result<Lookup<InventoryObject>>
where
    C: ManagementClient + ?Sized,
{
    let objects = client.container_view(&[kind]).await?;
    log::debug!("Scanning {} {} objects for '{}'", objects.len(), kind, name);
    Ok(lookup(&objects, name).map(Clone::clone))
}

/// First-match lookup used for the target VM or host. A miss is not an
/// error here; callers report it.
pub async fn find_first_object<C>(
    client: &C,
    kind: ObjectKind,
    name: &str,
) -> Result<Option<InventoryObject>>
where
    C: ManagementClient + ?Sized,
{
    let found = find_object(client, kind, name).await?;
    if let Lookup::Ambiguous(ref matches) = found {
        log::warn!(
            "{} matches for {} '{}', using the first ({})",
            matches.len(),
            kind,
            name,
            matches[0].moref
        );
    }
    Ok(found.first())
}
