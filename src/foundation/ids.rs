use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static DEF_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Generate an id for an engine-owned `<defs>` entry (filter, gradient).
///
/// Ids combine a millisecond timestamp with a process-wide counter so that definitions created by
/// successive re-renders of the same element, or by different elements sharing a host document,
/// never collide.
pub(crate) fn def_id(prefix: &str) -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let n = DEF_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("sfx-{prefix}-{millis:x}-{n}")
}
