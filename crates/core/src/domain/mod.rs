pub mod decision;
pub mod digit;
pub mod model;
pub mod round;
pub mod snapshot;
