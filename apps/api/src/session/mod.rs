// Per-user session state and the process-wide store that owns it.

pub mod handlers;
pub mod state;
pub mod store;
