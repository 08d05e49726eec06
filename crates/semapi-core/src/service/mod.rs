// Core services for lock coordination

pub mod lock;

// Re-export commonly used types
pub use lock::LockManager;
