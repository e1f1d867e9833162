use crate::roster::FetchedRoster;
use crate::types::{RosterSnapshot, StaffRecord};

use serde::{Deserialize, Serialize};

/// A staff member bound to the roster they were resolved from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedIdentity {
    pub staff: StaffRecord,
    pub roster: FetchedRoster,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no staff member named '{input}' on the roster")]
pub struct NotFound {
    pub input: String,
}

fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Case-insensitive exact match on full name. First match in roster order
/// wins; blank input never matches.
pub fn resolve<'a>(snapshot: &'a RosterSnapshot, name: &str) -> Result<&'a StaffRecord, NotFound> {
    let wanted = normalize(name);
    let not_found = || NotFound {
        input: name.to_string(),
    };
    if wanted.is_empty() {
        return Err(not_found());
    }
    snapshot
        .staff
        .iter()
        .find(|staff| normalize(&staff.full_name) == wanted)
        .ok_or_else(not_found)
}

/// Staff whose name contains `partial` (case-insensitive), in roster order.
pub fn suggest<'a>(snapshot: &'a RosterSnapshot, partial: &str, limit: usize) -> Vec<&'a StaffRecord> {
    let wanted = normalize(partial);
    if wanted.is_empty() {
        return Vec::new();
    }
    snapshot
        .staff
        .iter()
        .filter(|staff| normalize(&staff.full_name).contains(&wanted))
        .take(limit)
        .collect()
}
