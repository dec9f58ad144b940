//! Round scheduler and voting engine.
//!
//! Every minute the scheduler fans out to a set of unreliable digit sources,
//! freezes whatever came back into a snapshot, and a few seconds later turns
//! that snapshot into a published outcome (a digit or a BIG/SMALL label).
pub mod app;
pub mod domain;
pub mod infra;
pub mod ports;
