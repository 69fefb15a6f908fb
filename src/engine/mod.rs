mod access;
mod combat;
pub mod dice;
mod items;
mod npcs;
mod outcome;
mod output;
mod render;

pub use access::{MoveCheck, can_move, handle_go};

pub use combat::{
    COMBAT_HELP, CombatAction, attack_range, combat_turn, escape_chance, maybe_start_combat,
};

pub use dice::{Dice, RngDice, ScriptedDice};

pub use items::{handle_drop, handle_get, use_item};

pub use npcs::handle_talk_to_npc;
pub use outcome::{Outcome, evaluate};
pub use output::{Output, OutputBlock};
pub use render::{make_bar, render_health, render_help, render_inventory, render_room};
