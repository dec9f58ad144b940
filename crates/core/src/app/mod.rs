pub mod context;
pub mod scheduler;
pub mod state;
