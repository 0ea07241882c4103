pub mod executor;
pub mod job;
pub mod step;

#[cfg(test)]
mod tests;
