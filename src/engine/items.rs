use log::debug;

use crate::engine::output::Output;
use crate::engine::render::{render_health, render_room};
use crate::player::PlayerState;
use crate::world::{self, ItemEffect};

pub fn handle_get(out: &mut Output, world: &mut world::World, state: &mut PlayerState, item: &str) {
    if state.in_combat() {
        out.say("Now isn't the time to rummage around. (Try: attack / use <item> / run)");
        return;
    }

    let Some(room) = world.rooms.get_mut(&state.current_room) else {
        out.say("That item isn't here.");
        return;
    };

    let Some(pos) = room.items.iter().position(|i| i == item) else {
        out.say("That item isn't here.");
        return;
    };

    let taken = room.items.remove(pos);
    out.say(format!("You picked up: {}", taken));
    state.inventory.push(taken);
    state.spend_move();
}

pub fn handle_drop(out: &mut Output, world: &mut world::World, state: &mut PlayerState, item: &str) {
    if state.in_combat() {
        out.say("Dropping things mid-fight is a bold choice. Finish this first.");
        return;
    }

    let Some(room) = world.rooms.get_mut(&state.current_room) else {
        out.say("There's nowhere to put that.");
        return;
    };

    if !state.remove_item(item) {
        out.say("You don't have that item.");
        return;
    }

    room.items.push(item.to_string());
    state.spend_move();
    out.say(format!("You dropped: {}", item));
}

/// Apply the effect of an inventory item. Always costs exactly one move.
pub fn use_item(out: &mut Output, world: &world::World, state: &mut PlayerState, item: &str) {
    state.spend_move();

    if !state.has_item(item) {
        out.say("You don't have that item to use.");
        return;
    }

    let Some(usable) = world.usable_items.get(item) else {
        out.say("Nothing happens.");
        return;
    };

    let text = usable.text.as_deref();
    debug!("using '{}' with effect {:?}", item, usable.effect);

    match &usable.effect {
        ItemEffect::HealHealth { amount } => {
            out.event(text.unwrap_or("You feel better."));
            let gained = state.heal(*amount);
            out.say(format!("You recover {}% health.", gained));
            out.say(format!("You now have {}% health.", state.health()));
            render_health(out, state);
        }
        ItemEffect::LightRoom { rooms } => {
            if !rooms.is_empty() && !rooms.contains(&state.current_room) {
                out.say("You wave the light around, but it doesn't change much here.");
                return;
            }
            state.lit_rooms.insert(state.current_room.clone());
            out.event(text.unwrap_or("Light floods the room."));
            render_room(out, world, state);
        }
        ItemEffect::UnlockExit { from, direction } => {
            if *from == state.current_room {
                state.unlock(from.clone(), direction.clone());
                out.event(text.unwrap_or("You hear a lock click open."));
            } else {
                out.say("That doesn't seem to fit anything here.");
            }
        }
        ItemEffect::ApplyShield { amount } => {
            state.shield = *amount;
            out.event(text.unwrap_or("A protective warmth surrounds you."));
        }
        ItemEffect::Inert => out.say("Nothing happens."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{UsableItem, fixtures};

    fn with_item(world: &mut world::World, name: &str, effect: ItemEffect) {
        world.usable_items.insert(
            name.to_string(),
            UsableItem {
                effect,
                text: None,
            },
        );
    }

    #[test]
    fn get_and_drop_move_items_between_room_and_inventory() {
        let mut world = fixtures::world();
        world
            .rooms
            .get_mut("Hall")
            .unwrap()
            .items
            .extend(["rope".to_string(), "torch".to_string()]);
        let mut state = PlayerState::new("Hall");
        let mut out = Output::new();

        handle_get(&mut out, &mut world, &mut state, "torch");
        assert_eq!(state.inventory, vec!["torch".to_string()]);
        assert_eq!(world.rooms["Hall"].items, vec!["rope".to_string()]);
        assert_eq!(state.moves, 1);

        handle_get(&mut out, &mut world, &mut state, "sword");
        assert!(out.contains("isn't here"));
        assert_eq!(state.moves, 1);

        handle_drop(&mut out, &mut world, &mut state, "torch");
        assert!(state.inventory.is_empty());
        assert_eq!(
            world.rooms["Hall"].items,
            vec!["rope".to_string(), "torch".to_string()]
        );
        assert_eq!(state.moves, 2);

        handle_drop(&mut out, &mut world, &mut state, "torch");
        assert!(out.contains("don't have that item"));
        assert_eq!(state.moves, 2);
    }

    #[test]
    fn heal_reports_delta_and_clamps() {
        let mut world = fixtures::world();
        with_item(&mut world, "ration", ItemEffect::HealHealth { amount: 25 });
        let mut state = PlayerState::new("Hall");
        state.inventory.push("ration".to_string());
        state.set_health(85);

        let mut out = Output::new();
        use_item(&mut out, &world, &mut state, "ration");

        assert_eq!(state.health(), 100);
        assert!(out.contains("You recover 15% health."));
        assert!(out.contains("You now have 100% health."));
        assert_eq!(state.moves, 1);
        // items are not consumed
        assert!(state.has_item("ration"));
    }

    #[test]
    fn light_fizzles_outside_allow_list() {
        let mut world = fixtures::world();
        with_item(
            &mut world,
            "torch",
            ItemEffect::LightRoom {
                rooms: vec!["Dungeon".to_string()],
            },
        );
        let mut state = PlayerState::new("Hall");
        state.inventory.push("torch".to_string());

        let mut out = Output::new();
        use_item(&mut out, &world, &mut state, "torch");
        assert!(state.lit_rooms.is_empty());
        assert!(out.contains("doesn't change much"));
        assert_eq!(state.moves, 1);

        state.current_room = "Dungeon".to_string();
        let mut out = Output::new();
        use_item(&mut out, &world, &mut state, "torch");
        assert!(state.is_lit("Dungeon"));
        assert!(out.contains("== Dungeon =="));
        assert_eq!(state.moves, 2);
    }

    #[test]
    fn light_with_empty_allow_list_works_anywhere() {
        let mut world = fixtures::world();
        with_item(&mut world, "lamp", ItemEffect::LightRoom { rooms: vec![] });
        let mut state = PlayerState::new("Throne");
        state.inventory.push("lamp".to_string());

        let mut out = Output::new();
        use_item(&mut out, &world, &mut state, "lamp");
        assert!(state.is_lit("Throne"));
    }

    #[test]
    fn unlock_only_fits_in_its_room() {
        let mut world = fixtures::world();
        with_item(
            &mut world,
            "iron_key",
            ItemEffect::UnlockExit {
                from: "Hall".to_string(),
                direction: "north".to_string(),
            },
        );
        let mut state = PlayerState::new("Dungeon");
        state.inventory.push("iron_key".to_string());

        let mut out = Output::new();
        use_item(&mut out, &world, &mut state, "iron_key");
        assert!(out.contains("doesn't seem to fit"));
        assert!(state.unlocked_exits.is_empty());

        state.current_room = "Hall".to_string();
        use_item(&mut out, &world, &mut state, "iron_key");
        assert!(state.is_unlocked("Hall", "north"));
        assert_eq!(state.moves, 2);
    }

    #[test]
    fn shield_overwrites() {
        let mut world = fixtures::world();
        with_item(&mut world, "ward", ItemEffect::ApplyShield { amount: 12 });
        let mut state = PlayerState::new("Hall");
        state.inventory.push("ward".to_string());
        state.shield = 30;

        let mut out = Output::new();
        use_item(&mut out, &world, &mut state, "ward");
        assert_eq!(state.shield, 12);
    }

    #[test]
    fn soft_failures_still_cost_a_move() {
        let mut world = fixtures::world();
        with_item(&mut world, "pebble", ItemEffect::Inert);
        let mut state = PlayerState::new("Hall");
        state.inventory = vec!["pebble".to_string(), "feather".to_string()];

        let mut out = Output::new();
        use_item(&mut out, &world, &mut state, "crown");
        assert!(out.contains("don't have that item"));
        use_item(&mut out, &world, &mut state, "feather");
        use_item(&mut out, &world, &mut state, "pebble");

        assert_eq!(state.moves, 3);
        assert_eq!(
            out.blocks
                .iter()
                .filter(|b| b.as_str() == "Nothing happens.")
                .count(),
            2
        );
    }
}
