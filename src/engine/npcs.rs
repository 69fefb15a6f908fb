use crate::engine::output::Output;
use crate::player::PlayerState;
use crate::world;

/// `talk to <npc>`; names match case-insensitively.
pub fn handle_talk_to_npc(
    out: &mut Output,
    world: &world::World,
    state: &mut PlayerState,
    npc_name: &str,
) {
    if state.in_combat() {
        out.say("Your enemy isn't interested in conversation.");
        return;
    }

    let wanted = npc_name.trim().to_lowercase();
    let npc = world
        .rooms
        .get(&state.current_room)
        .and_then(|room| room.npcs.iter().find(|n| n.name.trim().to_lowercase() == wanted));

    match npc {
        Some(npc) => {
            out.say(npc.dialogue.clone());
            state.spend_move();
        }
        None => out.say("There's no one by that name here."),
    }
}
