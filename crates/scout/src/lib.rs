pub mod agent;
pub mod errors;
pub mod models;
pub mod providers;
pub mod tools;

pub use agent::{Agent, RunOutcome, RunResult};
