pub mod error;
pub mod listener;
pub mod observer;
pub mod run_id;
pub mod sink;
pub mod source;
pub mod transform;
