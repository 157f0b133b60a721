//! The read-only flag and the check every write passes through.
use super::key::MasterKey;
use crate::error::{DomError, DomResult};

/// State paired with a read-only flag and the identity of the key that may
/// bypass it.
#[derive(Debug)]
pub struct Guarded<T> {
    state: T,
    // `Some(id)` while read-only; `id` is the only key that opens it.
    lock: Option<u64>,
    type_name: &'static str,
}

impl<T> Guarded<T> {
    /// Wraps `state`. A key is issued only when `read_only` is set; an open
    /// object has nothing to unlock.
    pub fn new(state: T, type_name: &'static str, read_only: bool) -> (Self, Option<MasterKey>) {
        if read_only {
            let (guarded, key) = Self::locked(state, type_name);
            (guarded, Some(key))
        } else {
            (Self::open(state, type_name), None)
        }
    }

    /// Wraps `state` as a read-only object and returns its key.
    pub fn locked(state: T, type_name: &'static str) -> (Self, MasterKey) {
        let key = MasterKey::mint();
        let guarded = Self { state, lock: Some(key.id()), type_name };
        (guarded, key)
    }

    /// Wraps `state` as an open object.
    pub fn open(state: T, type_name: &'static str) -> Self {
        Self { state, lock: None, type_name }
    }

    #[inline(always)]
    pub fn read(&self) -> &T { &self.state }

    pub fn is_read_only(&self) -> bool { self.lock.is_some() }

    pub fn type_name(&self) -> &'static str { self.type_name }

    /// True when `key` would be accepted by [`Guarded::mutate`].
    pub fn opens_with(&self, key: Option<&MasterKey>) -> bool {
        match (self.lock, key) {
            (None, _) => true,
            (Some(id), Some(key)) => key.id() == id,
            (Some(_), None) => false,
        }
    }

    /// Checks write access without touching the state.
    pub fn check(&self, key: Option<&MasterKey>) -> DomResult<()> {
        if self.opens_with(key) {
            Ok(())
        } else {
            tracing::debug!(type_name = self.type_name, "write denied on read-only object");
            Err(DomError::Immutability { type_name: self.type_name })
        }
    }

    /// Applies `op` to the state once access is granted.
    ///
    /// `op` must finish all of its validation before its first write so that
    /// an `Err` leaves the state untouched.
    pub fn mutate<R>(
        &mut self,
        key: Option<&MasterKey>,
        op: impl FnOnce(&mut T) -> DomResult<R>,
    ) -> DomResult<R> {
        self.check(key)?;
        op(&mut self.state)
    }
}
