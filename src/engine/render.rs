use crate::engine::output::Output;
use crate::player::PlayerState;
use crate::world;

const BAR_WIDTH: usize = 20;

pub fn render_room(out: &mut Output, world: &world::World, state: &PlayerState) {
    let Some(room) = world.rooms.get(&state.current_room) else {
        out.say(format!(
            "You are somewhere unknown ('{}').",
            state.current_room
        ));
        return;
    };

    out.title(format!("== {} ==", room.name));

    if let Some(dark) = &room.darkness {
        if !state.is_lit(&room.name) {
            out.say(dark.text.clone());
            if let Some(hint) = &dark.hint {
                out.say(hint.clone());
            }
            out.say("You see: shapes you can't quite make out.");
            out.exits("Exits: ...somewhere.");
            return;
        }
    }

    out.say(room.description.clone());

    if room.items.is_empty() {
        out.say("You see: nothing interesting.");
    } else {
        out.say(format!("You see: {}", room.items.join(", ")));
    }

    for npc in &room.npcs {
        out.say(format!("{} is here.", npc.name));
    }

    if room.exits.is_empty() {
        out.exits("Exits: none.");
    } else {
        let dirs = room
            .exits
            .keys()
            .map(String::as_str)
            .collect::<Vec<&str>>()
            .join(", ");
        out.exits(format!("Exits: {}", dirs));
    }
}

pub fn make_bar(percent: u32) -> String {
    let percent = percent.min(100) as usize;
    let filled = (BAR_WIDTH * percent + 50) / 100;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

pub fn render_health(out: &mut Output, state: &PlayerState) {
    let hp = state.health();
    out.status(format!("Health: {} {}%", make_bar(hp), hp));
}

pub fn render_help(out: &mut Output, world: &world::World) {
    out.say("Available commands:");
    for cmd in &world.commands_help {
        out.say(format!(" - {}", cmd));
    }
    out.say("Extra notes:");
    out.say(" - health shows your health bar (out of 100%).");
    out.say(" - Some rooms are dark: use a light source to reveal paths.");
    out.say(" - Combat starts automatically in a few rooms.");
}

pub fn render_inventory(out: &mut Output, state: &PlayerState) {
    if state.inventory.is_empty() {
        out.say("Inventory: (empty)");
    } else {
        out.say(format!("Inventory: {}", state.inventory.join(", ")));
    }
}
