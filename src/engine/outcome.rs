use crate::player::PlayerState;
use crate::world::{self, LoseCondition, WinCondition};

const DEATH_TEXT: &str =
    "Your vision tunnels... and the castle swallows the last of your strength. You lose.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Won(String),
    Lost(String),
}

impl Outcome {
    pub fn text(&self) -> &str {
        match self {
            Outcome::Won(t) | Outcome::Lost(t) => t,
        }
    }
}

/// Check for the end of the game. First match wins: death, the win
/// condition, then the lose condition.
pub fn evaluate(world: &world::World, state: &PlayerState) -> Option<Outcome> {
    if state.is_dead() {
        return Some(Outcome::Lost(DEATH_TEXT.to_string()));
    }

    if let Some(win) = &world.win_condition {
        let (met, text) = match win {
            WinCondition::HasItem { item, text } => (state.has_item(item), text),
            WinCondition::ReachRoom { room, text } => (state.current_room == *room, text),
            WinCondition::ReachRoomWithItem { room, item, text } => {
                (state.current_room == *room && state.has_item(item), text)
            }
        };
        if met {
            return Some(Outcome::Won(
                text.clone().unwrap_or_else(|| "You win!".to_string()),
            ));
        }
    }

    match &world.lose_condition {
        Some(LoseCondition::MaxMoves { moves, text }) if state.moves >= *moves => Some(
            Outcome::Lost(text.clone().unwrap_or_else(|| "You lose!".to_string())),
        ),
        _ => None,
    }
}
