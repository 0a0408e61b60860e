//! Conversation state threading
//!
//! The gateway never stores history itself: the caller supplies the prior
//! turns on every call and receives the extended sequence back. Turns are
//! never removed, reordered, or summarized here; unbounded growth is the
//! caller's responsibility.

use crate::backend::Content;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

impl Role {
    fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Model => "model",
        }
    }
}

/// One role-tagged utterance in a threaded dialogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub text: String,
}

/// Build the full backend context: prior turns plus the new user prompt.
pub fn to_contents(history: &[ConversationTurn], prompt: &str) -> Vec<Content> {
    history
        .iter()
        .map(|turn| Content::turn(turn.role.as_str(), turn.text.clone()))
        .chain(std::iter::once(Content::turn("user", prompt.to_string())))
        .collect()
}

/// Append the `{user, model}` turn pair to the caller's history, in order.
pub fn extend(
    history: Vec<ConversationTurn>,
    prompt: &str,
    reply: &str,
) -> Vec<ConversationTurn> {
    let mut updated = history;
    updated.push(ConversationTurn {
        role: Role::User,
        text: prompt.to_string(),
    });
    updated.push(ConversationTurn {
        role: Role::Model,
        text: reply.to_string(),
    });
    updated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::Part;

    fn turn(role: Role, text: &str) -> ConversationTurn {
        ConversationTurn {
            role,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_to_contents_threads_history_then_prompt() {
        let history = vec![turn(Role::User, "hi"), turn(Role::Model, "hello")];
        let contents = to_contents(&history, "how are you?");

        assert_eq!(contents.len(), 3);
        assert_eq!(contents[0].role.as_deref(), Some("user"));
        assert_eq!(contents[1].role.as_deref(), Some("model"));
        assert_eq!(contents[2].role.as_deref(), Some("user"));
        match &contents[2].parts[0] {
            Part::Text { text } => assert_eq!(text, "how are you?"),
            _ => panic!("expected text part"),
        }
    }

    #[test]
    fn test_extend_appends_user_then_model() {
        let history = vec![turn(Role::User, "hi"), turn(Role::Model, "hello")];
        let updated = extend(history.clone(), "what now?", "this now");

        assert_eq!(updated.len(), history.len() + 2);
        assert_eq!(updated[..2], history[..]);
        assert_eq!(updated[2], turn(Role::User, "what now?"));
        assert_eq!(updated[3], turn(Role::Model, "this now"));
    }

    #[test]
    fn test_extend_from_empty_history() {
        let updated = extend(Vec::new(), "first", "reply");
        assert_eq!(updated.len(), 2);
        assert_eq!(updated[0].role, Role::User);
        assert_eq!(updated[1].role, Role::Model);
    }

    #[test]
    fn test_turn_serialization_uses_lowercase_roles() {
        let json = serde_json::to_string(&turn(Role::Model, "ok")).unwrap();
        assert!(json.contains("\"role\":\"model\""));

        let parsed: ConversationTurn =
            serde_json::from_str("{\"role\":\"user\",\"text\":\"hi\"}").unwrap();
        assert_eq!(parsed.role, Role::User);
    }
}
