//! Multi-turn chat session with tool calling support.

use super::runner::ToolCallRecord;
use super::DEFAULT_SYSTEM_PROMPT;
use crate::error::{ForskError, Result};
use crate::openai::create_client;
use crate::tools::{parse_tool_call, tool_definitions, ToolContext};
use async_openai::types::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestToolMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
};
use tracing::{debug, info};

/// A chat turn: the assistant's reply plus the tool calls it made.
#[derive(Debug)]
pub struct ChatTurn {
    pub reply: String,
    pub tool_calls: Vec<ToolCallRecord>,
}

/// Interactive chat session with conversation history.
///
/// Shared by the CLI chat command and the HTTP server; it does no
/// terminal output of its own.
pub struct ChatSession {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
    tools: ToolContext,
    messages: Vec<ChatCompletionRequestMessage>,
    max_tool_iterations: usize,
}

impl ChatSession {
    /// Create a new chat session.
    pub fn new(tools: ToolContext, model: &str, max_tool_iterations: usize) -> Self {
        Self::with_system_prompt(tools, model, max_tool_iterations, DEFAULT_SYSTEM_PROMPT)
    }

    /// Create a session with a custom system prompt.
    pub fn with_system_prompt(
        tools: ToolContext,
        model: &str,
        max_tool_iterations: usize,
        system_prompt: &str,
    ) -> Self {
        let system_message = ChatCompletionRequestSystemMessageArgs::default()
            .content(system_prompt)
            .build()
            .expect("Failed to build system message");

        Self {
            client: create_client(),
            model: model.to_string(),
            tools,
            messages: vec![system_message.into()],
            max_tool_iterations,
        }
    }

    /// Access the tool context (e.g. for the last rendered artifact).
    pub fn tools(&self) -> &ToolContext {
        &self.tools
    }

    /// Clear conversation history (keeps system prompt).
    pub fn clear_history(&mut self) {
        self.messages.truncate(1);
    }

    /// Send a message and get a reply, handling tool calls.
    pub async fn send_message(&mut self, user_input: &str) -> Result<ChatTurn> {
        let user_message = ChatCompletionRequestUserMessageArgs::default()
            .content(user_input)
            .build()
            .map_err(|e| ForskError::Agent(e.to_string()))?;
        self.messages.push(user_message.into());

        let mut iterations = 0;
        let mut tool_calls_made = Vec::new();

        loop {
            iterations += 1;
            if iterations > self.max_tool_iterations {
                return Err(ForskError::Agent("Too many tool iterations".to_string()));
            }

            debug!("Chat iteration {}, {} messages", iterations, self.messages.len());

            let request = CreateChatCompletionRequestArgs::default()
                .model(&self.model)
                .messages(self.messages.clone())
                .tools(tool_definitions())
                .build()
                .map_err(|e| ForskError::Agent(e.to_string()))?;

            let response = self
                .client
                .chat()
                .create(request)
                .await
                .map_err(|e| ForskError::OpenAI(format!("Chat API error: {}", e)))?;

            let choice = response
                .choices
                .first()
                .ok_or_else(|| ForskError::Agent("No response from model".to_string()))?;

            if let Some(ref tool_calls) = choice.message.tool_calls {
                if !tool_calls.is_empty() {
                    let assistant_msg = ChatCompletionRequestAssistantMessageArgs::default()
                        .tool_calls(tool_calls.clone())
                        .build()
                        .map_err(|e| ForskError::Agent(e.to_string()))?;
                    self.messages.push(assistant_msg.into());

                    for tool_call in tool_calls {
                        let name = &tool_call.function.name;
                        let arguments = &tool_call.function.arguments;

                        info!("Chat calling tool: {} with args: {}", name, arguments);

                        let result = match parse_tool_call(name, arguments) {
                            Ok(tool) => match self.tools.execute(&tool).await {
                                Ok(output) => output,
                                Err(e) => format!("Tool error: {}", e),
                            },
                            Err(e) => format!("Failed to parse tool call: {}", e),
                        };

                        let tool_msg = ChatCompletionRequestToolMessageArgs::default()
                            .tool_call_id(&tool_call.id)
                            .content(result.clone())
                            .build()
                            .map_err(|e| ForskError::Agent(e.to_string()))?;
                        self.messages.push(tool_msg.into());

                        tool_calls_made.push(ToolCallRecord {
                            name: name.clone(),
                            arguments: arguments.clone(),
                            result,
                        });
                    }
                    continue;
                }
            }

            // Final reply: no tool calls (absent or empty).
            let reply = choice.message.content.clone().unwrap_or_default();
            self.add_assistant_message(&reply)?;

            // Trim history if too long (keep system + last N exchanges)
            self.trim_history(30);

            return Ok(ChatTurn {
                reply,
                tool_calls: tool_calls_made,
            });
        }
    }

    /// Add an assistant text message to history.
    fn add_assistant_message(&mut self, content: &str) -> Result<()> {
        let msg = ChatCompletionRequestAssistantMessageArgs::default()
            .content(content)
            .build()
            .map_err(|e| ForskError::Agent(e.to_string()))?;
        self.messages.push(msg.into());
        Ok(())
    }

    /// Trim conversation history to keep it manageable.
    fn trim_history(&mut self, max_messages: usize) {
        if self.messages.len() > max_messages {
            // Keep system message (index 0) and last N-1 messages
            let start = self.messages.len() - (max_messages - 1);
            let mut trimmed = vec![self.messages[0].clone()];
            trimmed.extend(self.messages[start..].iter().cloned());
            self.messages = trimmed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;

    fn session() -> ChatSession {
        let tools = ToolContext::new(&Settings::default()).unwrap();
        ChatSession::new(tools, "gpt-4o", 10)
    }

    fn push_user_messages(session: &mut ChatSession, count: usize) {
        for i in 0..count {
            let msg = ChatCompletionRequestUserMessageArgs::default()
                .content(format!("message {}", i))
                .build()
                .unwrap();
            session.messages.push(msg.into());
        }
    }

    #[test]
    fn test_trim_history_keeps_system_and_caps_length() {
        let mut session = session();
        push_user_messages(&mut session, 60);

        session.trim_history(30);

        assert_eq!(session.messages.len(), 30);
        assert!(matches!(
            session.messages[0],
            ChatCompletionRequestMessage::System(_)
        ));
    }

    #[test]
    fn test_trim_history_leaves_short_history_alone() {
        let mut session = session();
        push_user_messages(&mut session, 5);

        session.trim_history(30);

        assert_eq!(session.messages.len(), 6);
    }

    #[test]
    fn test_clear_history_keeps_system_prompt() {
        let mut session = session();
        push_user_messages(&mut session, 5);

        session.clear_history();

        assert_eq!(session.messages.len(), 1);
        assert!(matches!(
            session.messages[0],
            ChatCompletionRequestMessage::System(_)
        ));
    }
}
