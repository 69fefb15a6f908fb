use log::debug;

use crate::engine::combat::maybe_start_combat;
use crate::engine::output::Output;
use crate::engine::render::render_room;
use crate::player::PlayerState;
use crate::world;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveCheck {
    Allowed { destination: String },
    Denied { reason: String },
}

fn denied(reason: impl Into<String>) -> MoveCheck {
    MoveCheck::Denied {
        reason: reason.into(),
    }
}

/// Decide whether the player may leave the current room through `direction`.
///
/// Pure: never touches state.
pub fn can_move(world: &world::World, state: &PlayerState, direction: &str) -> MoveCheck {
    if state.in_combat() {
        return denied("You can't flee to another room mid-fight. (Try: run)");
    }

    let current = &state.current_room;
    let Some(room) = world.rooms.get(current) else {
        return denied("You can't go that way.");
    };

    let Some(destination) = room.exits.get(direction) else {
        return denied("You can't go that way.");
    };

    if let Some(dark) = &room.darkness {
        if !state.is_lit(current) && dark.blocks(direction) {
            return denied(dark.block_text.clone());
        }
    }

    if state.is_unlocked(current, direction) {
        return MoveCheck::Allowed {
            destination: destination.clone(),
        };
    }

    if let Some(lock) = world.lock_on(current, direction) {
        if let Some(required) = &lock.requires_item {
            let satisfied = world
                .equivalents_of(required)
                .into_iter()
                .any(|item| state.has_item(item));
            if !satisfied {
                return denied(
                    lock.fail_text
                        .clone()
                        .unwrap_or_else(|| "That way is locked.".to_string()),
                );
            }
        }
    }

    MoveCheck::Allowed {
        destination: destination.clone(),
    }
}

/// `go <direction>`: move, describe the new room, and start any fight waiting there.
pub fn handle_go(
    out: &mut Output,
    world: &world::World,
    state: &mut PlayerState,
    direction: &str,
) -> bool {
    match can_move(world, state, direction) {
        MoveCheck::Denied { reason } => {
            out.say(reason);
            false
        }
        MoveCheck::Allowed { destination } => {
            if !world.rooms.contains_key(&destination) {
                out.say(format!(
                    "You try to go {}, but something feels wrong (room not found).",
                    direction
                ));
                return false;
            }
            debug!("moving {} from '{}' to '{}'", direction, state.current_room, destination);
            state.current_room = destination;
            state.spend_move();
            render_room(out, world, state);
            maybe_start_combat(out, world, state);
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::ActiveEnemy;
    use crate::world::{fixtures, Lock};

    fn allowed(dest: &str) -> MoveCheck {
        MoveCheck::Allowed {
            destination: dest.to_string(),
        }
    }

    #[test]
    fn missing_exit_is_denied_without_side_effects() {
        let world = fixtures::world();
        let mut state = PlayerState::new("Hall");
        let before = state.clone();

        let mut out = Output::new();
        assert!(!handle_go(&mut out, &world, &mut state, "west"));
        assert!(out.contains("can't go that way"));
        assert_eq!(state, before);
    }

    #[test]
    fn lock_needs_item() {
        let world = fixtures::world();
        let mut state = PlayerState::new("Hall");
        assert_eq!(
            can_move(&world, &state, "north"),
            MoveCheck::Denied {
                reason: "The door is locked.".to_string()
            }
        );

        state.inventory.push("iron_key".to_string());
        assert_eq!(can_move(&world, &state, "north"), allowed("Throne"));
    }

    #[test]
    fn equivalent_item_opens_lock() {
        let mut world = fixtures::world();
        world.locks[0].requires_item = Some("lantern".to_string());
        let mut state = PlayerState::new("Hall");
        state.inventory.push("torch".to_string());
        assert_eq!(can_move(&world, &state, "north"), allowed("Throne"));
    }

    #[test]
    fn lock_without_required_item_never_blocks() {
        let mut world = fixtures::world();
        world.locks = vec![Lock {
            from: "Hall".to_string(),
            direction: "north".to_string(),
            requires_item: None,
            fail_text: None,
        }];
        let state = PlayerState::new("Hall");
        assert_eq!(can_move(&world, &state, "north"), allowed("Throne"));
    }

    #[test]
    fn unlocked_exit_ignores_lock_without_key() {
        let world = fixtures::world();
        let mut state = PlayerState::new("Hall");
        state.unlock("Hall", "north");
        assert_eq!(can_move(&world, &state, "north"), allowed("Throne"));
    }

    #[test]
    fn darkness_blocks_listed_exits_until_lit() {
        let world = fixtures::world();
        let mut state = PlayerState::new("Dungeon");
        assert_eq!(
            can_move(&world, &state, "east"),
            MoveCheck::Denied {
                reason: "Too dark to find the tunnel.".to_string()
            }
        );
        assert_eq!(can_move(&world, &state, "west"), allowed("Hall"));

        state.lit_rooms.insert("Dungeon".to_string());
        assert_eq!(can_move(&world, &state, "east"), allowed("Tunnel"));
    }

    #[test]
    fn combat_refuses_movement() {
        let world = fixtures::world();
        let mut state = PlayerState::new("Hall");
        state.active_enemy = Some(ActiveEnemy::from_def(&fixtures::enemy("Rat", 5, (1, 2), 1)));
        let before = state.clone();

        let mut out = Output::new();
        assert!(!handle_go(&mut out, &world, &mut state, "east"));
        assert!(out.contains("mid-fight"));
        assert_eq!(state, before);
    }

    #[test]
    fn successful_move_counts_and_describes() {
        let world = fixtures::world();
        let mut state = PlayerState::new("Hall");
        let mut out = Output::new();
        assert!(handle_go(&mut out, &world, &mut state, "east"));
        assert_eq!(state.current_room, "Dungeon");
        assert_eq!(state.moves, 1);
        assert!(out.contains("== Dungeon =="));
    }
}
