pub mod job;
pub mod step;
