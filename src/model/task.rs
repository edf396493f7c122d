/// Task priority level. Ordered `None < Low < Medium < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Priority {
    #[default]
    None,
    Low,
    Medium,
    High,
}

impl Priority {
    /// The marker written before the task text on disk (`""`, `!`, `!!`, `!!!`)
    pub fn marker(self) -> &'static str {
        match self {
            Priority::None => "",
            Priority::Low => "!",
            Priority::Medium => "!!",
            Priority::High => "!!!",
        }
    }

    /// Glyph shown next to the checkbox in the task list
    pub fn glyph(self) -> &'static str {
        match self {
            Priority::None => "",
            Priority::Low => "\u{1F4CE}",
            Priority::Medium => "\u{1F4CC}",
            Priority::High => "\u{1F6A8}",
        }
    }

    /// Next priority in the cycle. High wraps to None.
    pub fn cycle(self) -> Priority {
        match self {
            Priority::None => Priority::Low,
            Priority::Low => Priority::Medium,
            Priority::Medium => Priority::High,
            Priority::High => Priority::None,
        }
    }

    /// Parse a bare marker (`!`, `!!`, `!!!`)
    pub fn from_marker(marker: &str) -> Option<Priority> {
        match marker {
            "" => Some(Priority::None),
            "!" => Some(Priority::Low),
            "!!" => Some(Priority::Medium),
            "!!!" => Some(Priority::High),
            _ => None,
        }
    }
}

/// A single to-do entry. Tasks carry no identity; their position in the
/// store is the only handle used to address them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub text: String,
    pub done: bool,
    pub priority: Priority,
}

impl Task {
    /// A pending task with no priority
    pub fn new(text: impl Into<String>) -> Self {
        Task {
            text: text.into(),
            done: false,
            priority: Priority::None,
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_done(mut self, done: bool) -> Self {
        self.done = done;
        self
    }

    /// The character used inside the checkbox `[ ]`
    pub fn checkbox_char(&self) -> char {
        if self.done { 'x' } else { ' ' }
    }
}
