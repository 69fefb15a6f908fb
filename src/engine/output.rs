#[derive(Debug, Clone, PartialEq)]
pub enum OutputBlock {
    Title(String),
    Text(String),
    /// Combat and vitals readouts (health bars, enemy HP).
    Status(String),
    /// Something that happened as a result of the turn.
    Event(String),
    Exits(String),
}

impl OutputBlock {
    pub fn as_str(&self) -> &str {
        match self {
            OutputBlock::Title(s)
            | OutputBlock::Text(s)
            | OutputBlock::Status(s)
            | OutputBlock::Event(s)
            | OutputBlock::Exits(s) => s,
        }
    }
}

#[derive(Default, Debug)]
pub struct Output {
    pub blocks: Vec<OutputBlock>,
}

impl Output {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, s: String, wrap: fn(String) -> OutputBlock) {
        if !s.trim().is_empty() {
            self.blocks.push(wrap(s));
        }
    }

    pub fn title(&mut self, s: impl Into<String>) {
        self.push(s.into(), OutputBlock::Title);
    }

    pub fn say(&mut self, s: impl Into<String>) {
        self.push(s.into(), OutputBlock::Text);
    }

    pub fn status(&mut self, s: impl Into<String>) {
        self.push(s.into(), OutputBlock::Status);
    }

    pub fn event(&mut self, s: impl Into<String>) {
        self.push(s.into(), OutputBlock::Event);
    }

    pub fn exits(&mut self, s: impl Into<String>) {
        self.push(s.into(), OutputBlock::Exits);
    }

    /// All blocks joined with newlines.
    pub fn text(&self) -> String {
        self.blocks
            .iter()
            .map(OutputBlock::as_str)
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.blocks.iter().any(|b| b.as_str().contains(needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_lines_are_dropped() {
        let mut out = Output::new();
        out.say("  ");
        out.title("== Hall ==");
        out.status("");
        out.event("The rat dies.");
        assert_eq!(out.blocks.len(), 2);
        assert_eq!(out.text(), "== Hall ==\nThe rat dies.");
        assert!(out.contains("rat"));
    }
}
