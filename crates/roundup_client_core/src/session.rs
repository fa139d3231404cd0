//! Live allocation sets, one per open allocation screen.
//! All reads and writes go through the registry lock, so each set has a single writer.

use crate::error::AllocationError;
use crate::ids::AllocationSetId;
use crate::models::AllocationSet;
use crate::rust_log;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

static SETS: Lazy<Mutex<HashMap<AllocationSetId, AllocationSet>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

fn sets() -> MutexGuard<'static, HashMap<AllocationSetId, AllocationSet>> {
    // A panic while holding the lock cannot leave a set half-written: commits are whole-vector.
    SETS.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub fn insert(set: AllocationSet) -> AllocationSetId {
    let id = AllocationSetId::new();
    rust_log!(
        "[roundup_rs] allocation set opened id={} mode={} buckets={} total={}",
        id,
        set.mode(),
        set.len(),
        set.total()
    );
    sets().insert(id.clone(), set);
    id
}

fn parse_id(set_id: &str) -> Result<AllocationSetId, AllocationError> {
    AllocationSetId::parse(set_id).map_err(|_| AllocationError::UnknownAllocationSet(set_id.to_string()))
}

/// Run `f` against the set while holding the registry lock.
pub fn with_set<T, F>(set_id: &str, f: F) -> Result<T, AllocationError>
where
    F: FnOnce(&mut AllocationSet) -> Result<T, AllocationError>,
{
    let id = parse_id(set_id)?;
    let mut guard = sets();
    let set = guard
        .get_mut(&id)
        .ok_or_else(|| AllocationError::UnknownAllocationSet(set_id.to_string()))?;
    f(set)
}

pub fn remove(set_id: &str) -> bool {
    let Ok(id) = parse_id(set_id) else {
        return false;
    };
    let removed = sets().remove(&id).is_some();
    if removed {
        rust_log!("[roundup_rs] allocation set closed id={}", id);
    }
    removed
}
