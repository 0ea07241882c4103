pub mod events;
pub mod execution;
pub mod records;
