pub mod evolution;
pub mod store;
pub mod write;

pub use evolution::reconcile;
pub use store::SnapshotStore;
pub use write::write_atomic;
