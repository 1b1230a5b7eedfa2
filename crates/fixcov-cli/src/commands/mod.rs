pub mod coverage;
pub mod diff;
