//! Chat message types.
//!
//! Roles: System (usually first in the list), User, Assistant, and Tool (a plan
//! result reported back to the model). Used by `ChatHistory` and `LlmClient`.

use serde::{Deserialize, Serialize};

/// A single message in the conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Message {
    /// System prompt; typically placed first in the message list.
    System(String),
    /// User input.
    User(String),
    /// Model reply.
    Assistant(String),
    /// Output of a tool run on the model's behalf (e.g. an executed atom plan).
    Tool {
        content: String,
        tool_call_id: String,
    },
}

/// Message role as it appears in provider payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
    Tool,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::Tool => "tool",
        }
    }
}

/// `{role, content}` pair, the shape chat-completion prompts are built from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptTurn {
    pub role: Role,
    pub content: String,
}

impl Message {
    /// Creates a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::System(content.into())
    }

    /// Creates a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::User(content.into())
    }

    /// Creates an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::Assistant(content.into())
    }

    /// Creates a tool message answering `tool_call_id`.
    pub fn tool(content: impl Into<String>, tool_call_id: impl Into<String>) -> Self {
        Self::Tool {
            content: content.into(),
            tool_call_id: tool_call_id.into(),
        }
    }

    pub fn role(&self) -> Role {
        match self {
            Self::System(_) => Role::System,
            Self::User(_) => Role::User,
            Self::Assistant(_) => Role::Assistant,
            Self::Tool { .. } => Role::Tool,
        }
    }

    pub fn content(&self) -> &str {
        match self {
            Self::System(c) | Self::User(c) | Self::Assistant(c) => c,
            Self::Tool { content, .. } => content,
        }
    }

    pub fn is_system(&self) -> bool {
        matches!(self, Self::System(_))
    }

    pub fn to_prompt_turn(&self) -> PromptTurn {
        PromptTurn {
            role: self.role(),
            content: self.content().to_string(),
        }
    }
}

/// Merges adjacent messages of the same role into one, joined by a newline.
///
/// Tool messages are never merged; each answers its own call.
pub fn merge_consecutive(messages: &[Message]) -> Vec<Message> {
    let mut out: Vec<Message> = Vec::with_capacity(messages.len());
    for msg in messages {
        let merged = match (out.last_mut(), msg) {
            (Some(Message::System(prev)), Message::System(next))
            | (Some(Message::User(prev)), Message::User(next))
            | (Some(Message::Assistant(prev)), Message::Assistant(next)) => {
                prev.push('\n');
                prev.push_str(next);
                true
            }
            _ => false,
        };
        if !merged {
            out.push(msg.clone());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Scenario**: constructors produce the correct variant and role.
    #[test]
    fn constructors_and_roles() {
        assert_eq!(Message::system("s").role(), Role::System);
        assert_eq!(Message::user("u").role(), Role::User);
        assert_eq!(Message::assistant("a").role(), Role::Assistant);
        let tool = Message::tool("56.00", "call_1");
        assert_eq!(tool.role(), Role::Tool);
        assert_eq!(tool.content(), "56.00");
    }

    /// **Scenario**: prompt turns serialize with lowercase roles.
    #[test]
    fn prompt_turn_serializes_lowercase_role() {
        let turn = Message::tool("56.00", "call_1").to_prompt_turn();
        let json = serde_json::to_value(&turn).unwrap();
        assert_eq!(json, serde_json::json!({"role": "tool", "content": "56.00"}));
    }

    /// **Scenario**: each variant round-trips through serde.
    #[test]
    fn serialize_deserialize_roundtrip() {
        for msg in [
            Message::system("sys"),
            Message::user("usr"),
            Message::assistant("ast"),
            Message::tool("out", "id-1"),
        ] {
            let json = serde_json::to_string(&msg).expect("serialize");
            let back: Message = serde_json::from_str(&json).expect("deserialize");
            assert_eq!(msg, back);
        }
    }

    /// **Scenario**: same-role neighbours merge; tool messages stay separate.
    #[test]
    fn merge_consecutive_same_role() {
        let merged = merge_consecutive(&[
            Message::user("a"),
            Message::user("b"),
            Message::assistant("c"),
            Message::tool("1", "x"),
            Message::tool("2", "y"),
        ]);
        assert_eq!(
            merged,
            vec![
                Message::user("a\nb"),
                Message::assistant("c"),
                Message::tool("1", "x"),
                Message::tool("2", "y"),
            ]
        );
    }
}
