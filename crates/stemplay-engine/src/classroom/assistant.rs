//! Scripted study assistant. Replies are picked by keyword; nothing is inferred.

use serde::Serialize;

const GREETING: &str = "Hello! I'm your AI learning assistant. I'm here to help you with your studies. What would you like to learn about today?";

const SCIENCE_REPLY: &str = "Great! Science is fascinating. Are you interested in a specific topic like physics, chemistry, or biology? I can help explain concepts, suggest practice problems, or recommend interactive games to reinforce your learning.";
const MATH_REPLY: &str = "Mathematics is the foundation of many subjects! Whether you're working on algebra, geometry, or calculus, I can help break down complex problems into simpler steps. Would you like me to explain a specific concept or help with homework?";
const HELP_REPLY: &str = "Don't worry, everyone gets stuck sometimes! That's how we learn. Tell me what specific topic or problem you're working on, and I'll guide you through it step by step. Remember, making mistakes is part of the learning process!";
const GAME_REPLY: &str = "I love that you want to learn through games! Gaming makes learning more engaging and fun. Check out the quiz games, puzzles, and simulations available in each subject. Which subject interests you most right now?";
const FALLBACK_REPLY: &str = "That's an interesting question! I'm here to support your learning journey. Feel free to ask me about any subject - Science, Technology, Engineering, or Mathematics. I can also help with study strategies, explain difficult concepts, or suggest practice activities.";

/// First matching keyword group wins.
const RULES: [(&[&str], &str); 4] = [
    (&["science", "physics", "chemistry"], SCIENCE_REPLY),
    (&["math", "algebra", "geometry"], MATH_REPLY),
    (&["help", "stuck"], HELP_REPLY),
    (&["game", "play"], GAME_REPLY),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Message {
    pub id: u32,
    pub text: String,
    pub sender: Sender,
}

/// Pick the canned reply for a message.
pub fn reply_for(text: &str) -> &'static str {
    let lower = text.to_lowercase();
    RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(_, reply)| *reply)
        .unwrap_or(FALLBACK_REPLY)
}

pub struct Assistant {
    messages: Vec<Message>,
    next_id: u32,
}

impl Assistant {
    pub fn new() -> Self {
        let mut assistant = Self {
            messages: Vec::new(),
            next_id: 1,
        };
        assistant.push(GREETING.to_string(), Sender::Bot);
        assistant
    }

    fn push(&mut self, text: String, sender: Sender) {
        self.messages.push(Message {
            id: self.next_id,
            text,
            sender,
        });
        self.next_id += 1;
    }

    /// Post a user message and get the bot's reply. Blank input is ignored.
    pub fn send(&mut self, text: &str) -> Option<&Message> {
        if text.trim().is_empty() {
            return None;
        }
        self.push(text.to_string(), Sender::User);
        self.push(reply_for(text).to_string(), Sender::Bot);
        self.messages.last()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }
}

impl Default for Assistant {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_greeting() {
        let a = Assistant::new();
        assert_eq!(a.messages().len(), 1);
        assert_eq!(a.messages()[0].sender, Sender::Bot);
    }

    #[test]
    fn keywords_pick_replies() {
        assert_eq!(reply_for("Can you help me with PHYSICS?"), SCIENCE_REPLY);
        assert_eq!(reply_for("algebra homework"), MATH_REPLY);
        assert_eq!(reply_for("I'm stuck"), HELP_REPLY);
        assert_eq!(reply_for("let's play"), GAME_REPLY);
        assert_eq!(reply_for("what is a noun"), FALLBACK_REPLY);
    }

    #[test]
    fn blank_input_is_ignored() {
        let mut a = Assistant::new();
        assert!(a.send("   ").is_none());
        assert_eq!(a.messages().len(), 1);
    }

    #[test]
    fn send_appends_user_then_bot() {
        let mut a = Assistant::new();
        let reply = a.send("math please").unwrap();
        assert_eq!(reply.sender, Sender::Bot);
        assert_eq!(reply.id, 3);
        assert_eq!(a.messages()[1].sender, Sender::User);
    }
}
