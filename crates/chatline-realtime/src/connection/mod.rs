//! Connection handles and lifecycle hooks.

pub mod handle;
pub mod lifecycle;

pub use handle::ConnectionHandle;
pub use lifecycle::ConnectionLifecycle;
