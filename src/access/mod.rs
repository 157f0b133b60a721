//! Capability-gated mutability.
//!
//! A guarded object is created either open (anyone holding `&mut` may write)
//! or read-only, in which case construction also mints a [`MasterKey`]. Only
//! the holder of that key can write through the read-only flag. Reads never
//! need a key.
pub mod guard;
pub mod key;

pub use guard::Guarded;
pub use key::MasterKey;
