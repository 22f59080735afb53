pub mod agent;
pub mod generator;
pub mod runtime;
pub mod schedule;

#[cfg(test)]
mod tests;
