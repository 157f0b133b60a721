//! The capability token handed to the owner of a read-only object.
use std::sync::atomic::{AtomicU64, Ordering};

// Zero is never issued.
static NEXT_KEY: AtomicU64 = AtomicU64::new(1);

/// Authorizes writes to exactly one read-only object.
///
/// A key cannot be cloned, copied, or built outside this crate, so the only
/// way to obtain one is to construct the object it unlocks.
#[derive(Debug, PartialEq, Eq)]
pub struct MasterKey {
    id: u64,
}

impl MasterKey {
    pub(crate) fn mint() -> Self {
        let id = NEXT_KEY.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(key_id = id, "minted master key");
        Self { id }
    }

    #[inline(always)]
    pub(crate) fn id(&self) -> u64 { self.id }
}
