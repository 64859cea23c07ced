use std::fmt;

/// Instruction carried by the system turn that opens every transcript.
pub const SYSTEM_PROMPT: &str = "You are a helpful assistant.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    System,
    User,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        })
    }
}

/// One message in the transcript. Fields are private so a turn cannot change after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    role: Role,
    content: String,
}

impl Turn {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Append-only chat transcript. The first turn is always the system turn.
#[derive(Debug, Clone)]
pub struct Session {
    turns: Vec<Turn>,
}

impl Session {
    pub fn initialize() -> Self {
        Self {
            turns: vec![Turn::new(Role::System, SYSTEM_PROMPT)],
        }
    }

    pub fn append_user(&mut self, text: impl Into<String>) {
        self.turns.push(Turn::new(Role::User, text));
    }

    pub fn append_assistant(&mut self, text: impl Into<String>) {
        self.turns.push(Turn::new(Role::Assistant, text));
    }

    pub fn reset(&mut self) {
        *self = Self::initialize();
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Turns shown to the user (everything after the system turn).
    pub fn visible(&self) -> &[Turn] {
        &self.turns[1..]
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.turns.len()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::initialize()
    }
}
