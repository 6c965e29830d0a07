//! Session state for the jwt-lens page.
//!
//! Wraps the pure codec in the stateful shell the presentation layer talks
//! to: one raw token string, three editable field texts with per-part parse
//! state, a pluggable storage boundary for the last-entered token, and an
//! explicit last-submitted-wins slot for deferred recomputation.

mod pending;
mod session;
mod storage;

pub use pending::PendingEdit;
pub use session::{Edit, PartState, Session, Snapshot, SAMPLE_TOKEN};
pub use storage::{MemoryStorage, Storage, StorageError, STORAGE_KEY};
