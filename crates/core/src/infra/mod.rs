pub mod config;
pub mod http_source;
pub mod logging;
pub mod random;
pub mod sources;
pub mod system_clock;
pub mod time;
