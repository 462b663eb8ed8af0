//! These models represent the objects passed around by the agent
//!
//! There are two related formats we need to interact with:
//! - openai messages/tools, sent from the agent to the LLM
//! - tool calls, sent from the agent to the tool registry
//!
//! We always immediately convert the wire format into the internal structs using
//! the helpers in `providers::utils`, so the internal models are not an exact match
//! for the openai format.
pub mod message;
pub mod role;
pub mod tool;
