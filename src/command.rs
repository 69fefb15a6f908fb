//! Turning a line of player input into a verb and its argument.

use crate::engine::CombatAction;

/// A parsed player command. Arguments are `None` when the verb came alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Empty,
    Look,
    Help,
    Quit,
    Inventory,
    Save,
    Load,
    Health,
    Attack,
    Run,
    Go(Option<String>),
    Get(Option<String>),
    Drop(Option<String>),
    TalkTo(Option<String>),
    Use(Option<String>),
    Unknown(String),
}

impl Command {
    /// The combat verb this command stands for, if any.
    pub fn into_combat_action(self) -> Option<CombatAction> {
        match self {
            Command::Attack => Some(CombatAction::Attack),
            Command::Run => Some(CombatAction::Run),
            Command::Use(item) => Some(CombatAction::Use(item)),
            _ => None,
        }
    }
}

/// Normalize (trim, lower-case) and split into verb + remaining text.
///
/// Single-word verbs ignore anything after them, so `look around` is `look`.
pub fn parse_command(input: &str) -> Command {
    let line = input.trim().to_lowercase();
    let words: Vec<&str> = line.split_whitespace().collect();

    let Some((&verb, rest)) = words.split_first() else {
        return Command::Empty;
    };

    match verb {
        "look" => Command::Look,
        "help" => Command::Help,
        "quit" => Command::Quit,
        "inventory" | "inv" => Command::Inventory,
        "save" => Command::Save,
        "load" => Command::Load,
        "health" => Command::Health,
        "attack" => Command::Attack,
        "run" => Command::Run,
        "go" => Command::Go(argument(rest)),
        "get" => Command::Get(argument(rest)),
        "drop" => Command::Drop(argument(rest)),
        "use" => Command::Use(argument(rest)),
        "talk" => {
            let rest = match rest.split_first() {
                Some((&"to", tail)) => tail,
                _ => rest,
            };
            Command::TalkTo(argument(rest))
        }
        other => Command::Unknown(other.to_string()),
    }
}

fn argument(words: &[&str]) -> Option<String> {
    if words.is_empty() {
        None
    } else {
        Some(words.join(" "))
    }
}
