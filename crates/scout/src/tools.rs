pub mod registry;
pub mod research;

pub use registry::{ToolName, ToolRegistry};
