use indoc::indoc;
use tracing::{debug, info, warn};

use crate::errors::ProviderError;
use crate::models::message::{Message, ToolRequest};
use crate::providers::base::Provider;
use crate::tools::ToolRegistry;

/// Model calls allowed per run before giving up
pub const DEFAULT_MAX_STEPS: usize = 8;

/// Returned by [`Agent::run`] when the step ceiling is reached
pub const EXHAUSTED_MESSAGE: &str = "Agent stopped (too many steps).";

pub const SYSTEM_PROMPT: &str = indoc! {"
    You are a professional research assistant agent.
    You can search knowledge, summarize findings, generate reports, and send reports via email.
    Use tools when necessary. Follow logical steps."};

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The model answered without requesting tools
    Final(String),
    /// The step ceiling was reached first
    Exhausted,
}

#[derive(Debug, Clone)]
pub struct RunResult {
    pub outcome: RunOutcome,
    /// Every message of the run, starting with the system and user messages
    pub transcript: Vec<Message>,
    /// Completed tool rounds
    pub steps: usize,
}

impl RunResult {
    /// The final answer, or the fixed exhaustion message
    pub fn into_text(self) -> String {
        match self.outcome {
            RunOutcome::Final(text) => text,
            RunOutcome::Exhausted => EXHAUSTED_MESSAGE.to_string(),
        }
    }
}

/// Agent drives a model through tool calls until it produces an answer
pub struct Agent {
    provider: Box<dyn Provider>,
    registry: ToolRegistry,
    system_prompt: String,
    max_steps: usize,
}

impl Agent {
    /// Create a new Agent with the specified provider
    pub fn new(provider: Box<dyn Provider>) -> Self {
        Self {
            provider,
            registry: ToolRegistry::new(),
            system_prompt: SYSTEM_PROMPT.to_string(),
            max_steps: DEFAULT_MAX_STEPS,
        }
    }

    /// Use a different set of tools than the default registry
    pub fn with_registry(mut self, registry: ToolRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_system_prompt<S: Into<String>>(mut self, system_prompt: S) -> Self {
        self.system_prompt = system_prompt.into();
        self
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Run one tool request. Failures become error results for the model to read.
    fn dispatch_tool_call(&self, request: &ToolRequest) -> Message {
        let call = &request.tool_call;
        let result = self.registry.invoke(&call.name, &call.arguments);
        match &result {
            Ok(_) => debug!(id = %request.id, tool = %call.name, "tool call succeeded"),
            Err(e) => warn!(id = %request.id, tool = %call.name, error = %e, "tool call failed"),
        }
        Message::tool().with_tool_response(request.id.as_str(), call.name.as_str(), result)
    }

    /// Run the loop for a single prompt and hand back the whole exchange
    pub async fn reply(&self, user_prompt: &str) -> Result<RunResult, ProviderError> {
        let mut messages = vec![
            Message::system().with_text(self.system_prompt.as_str()),
            Message::user().with_text(user_prompt),
        ];
        let tools = self.registry.describe_all();
        let mut steps = 0;

        info!(max_steps = self.max_steps, "starting run");

        while steps < self.max_steps {
            let (response, usage) = self.provider.complete(&messages, tools).await?;
            debug!(
                step = steps,
                input_tokens = ?usage.input_tokens,
                output_tokens = ?usage.output_tokens,
                "model responded"
            );

            let requests = response.tool_requests();
            if requests.is_empty() {
                let answer = response.text();
                messages.push(response);
                info!(steps, "run finished with a final answer");
                return Ok(RunResult {
                    outcome: RunOutcome::Final(answer),
                    transcript: messages,
                    steps,
                });
            }

            // Strictly in emission order, one result message per request
            let results: Vec<Message> = requests
                .iter()
                .map(|request| self.dispatch_tool_call(request))
                .collect();

            messages.push(response);
            messages.extend(results);
            steps += 1;
        }

        warn!(steps, "step ceiling reached without a final answer");
        Ok(RunResult {
            outcome: RunOutcome::Exhausted,
            transcript: messages,
            steps,
        })
    }

    /// Answer a prompt, or return [`EXHAUSTED_MESSAGE`] when the model never settles
    pub async fn run(&self, user_prompt: &str) -> Result<String, ProviderError> {
        Ok(self.reply(user_prompt).await?.into_text())
    }
}
