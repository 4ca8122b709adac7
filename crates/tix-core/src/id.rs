//! ID allocation for tix tickets
//!
//! IDs are sequential: TICKET-<NNN>, zero-padded to at least 3 digits. The
//! last-assigned number is persisted in a .ticket_counter sidecar file; if
//! the counter is missing or unreadable, the allocator rescans existing
//! ticket filenames for the maximum suffix. Not safe under concurrent
//! invocation - two callers can read the same counter value.

use std::fs;
use std::path::Path;

use crate::Result;

/// Ticket ID and filename prefix.
pub const ID_PREFIX: &str = "TICKET-";

/// Sidecar file holding the last-assigned numeric ID as decimal text.
pub const COUNTER_FILE: &str = ".ticket_counter";

/// Format a numeric ID as TICKET-<NNN>, padding grows naturally past 999.
pub fn format_id(num: u64) -> String {
    format!("{}{:03}", ID_PREFIX, num)
}

/// Extract the numeric suffix from a ticket filename (TICKET-<NNN>.md).
pub fn ticket_number(file_name: &str) -> Option<u64> {
    file_name
        .strip_suffix(".md")?
        .strip_prefix(ID_PREFIX)?
        .parse()
        .ok()
}

/// Check whether a filename looks like a ticket file.
///
/// Listing is prefix/suffix based; only the counter rescan requires a
/// numeric suffix.
pub fn is_ticket_file(file_name: &str) -> bool {
    file_name.starts_with(ID_PREFIX) && file_name.ends_with(".md")
}

/// Allocate the next ticket ID and persist the advanced counter.
pub fn next_id(dir: &Path) -> Result<String> {
    let counter_path = dir.join(COUNTER_FILE);
    let current = read_counter(&counter_path).unwrap_or_else(|| scan_max(dir));

    let next = current + 1;
    fs::write(&counter_path, next.to_string())?;
    Ok(format_id(next))
}

/// Read the counter file. None if missing, unreadable, or non-numeric.
fn read_counter(path: &Path) -> Option<u64> {
    let text = fs::read_to_string(path).ok()?;
    match text.trim().parse() {
        Ok(num) => Some(num),
        Err(_) => {
            tracing::warn!("counter file {} is not numeric, rescanning", path.display());
            None
        }
    }
}

/// Maximum numeric suffix among existing ticket files, zero if none.
fn scan_max(dir: &Path) -> u64 {
    let Ok(entries) = fs::read_dir(dir) else {
        return 0;
    };
    entries
        .flatten()
        .filter_map(|entry| ticket_number(&entry.file_name().to_string_lossy()))
        .max()
        .unwrap_or(0)
}
