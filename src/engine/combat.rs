//! Automatic encounters and the attack / use / run turn loop.

use log::debug;

use crate::engine::dice::Dice;
use crate::engine::items::use_item;
use crate::engine::output::Output;
use crate::engine::render::{render_health, render_room};
use crate::player::{ActiveEnemy, PlayerState};
use crate::world;

const PLAYER_DAMAGE: (u32, u32) = (8, 14);
const XP_PER_BONUS_POINT: u32 = 25;
const MAX_XP_BONUS: u32 = 6;

const ESCAPE_CHANCE: f64 = 0.55;
const BOSS_ESCAPE_CHANCE: f64 = 0.30;

// Tried in order when running away.
const RETREAT_DIRECTIONS: [&str; 2] = ["south", "west"];

pub const COMBAT_HELP: &str = "In combat you can: attack | use <item> | run";

/// A verb accepted while fighting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CombatAction {
    Attack,
    Use(Option<String>),
    Run,
}

/// Start a fight if the current room holds an enemy that is still alive.
///
/// Returns true when a new encounter began. Costs no move.
pub fn maybe_start_combat(out: &mut Output, world: &world::World, state: &mut PlayerState) -> bool {
    if state.in_combat() {
        return false;
    }

    let Some(enemy_name) = world.room_enemies.get(&state.current_room) else {
        return false;
    };
    if state.defeated_enemies.contains(enemy_name) {
        return false;
    }
    let Some(def) = world.enemies.get(enemy_name) else {
        return false;
    };

    let enemy = ActiveEnemy::from_def(def);
    debug!("combat starts with '{}' in '{}'", enemy.name, state.current_room);

    out.event(
        def.intro_text
            .clone()
            .unwrap_or_else(|| format!("A {} attacks!", enemy.name)),
    );
    out.status(enemy.status());
    state.active_enemy = Some(enemy);
    render_health(out, state);
    out.say("Combat commands: attack | use <item> | run");
    true
}

/// Player damage range after the XP bonus.
pub fn attack_range(xp: u32) -> (u32, u32) {
    let bonus = (xp / XP_PER_BONUS_POINT).min(MAX_XP_BONUS);
    (PLAYER_DAMAGE.0 + bonus, PLAYER_DAMAGE.1 + bonus)
}

pub fn escape_chance(world: &world::World, enemy: &ActiveEnemy) -> f64 {
    if world.is_boss(&enemy.name) {
        BOSS_ESCAPE_CHANCE
    } else {
        ESCAPE_CHANCE
    }
}

/// Resolve one combat turn. Only valid while `state.in_combat()`.
pub fn combat_turn(
    out: &mut Output,
    world: &world::World,
    state: &mut PlayerState,
    dice: &mut dyn Dice,
    action: CombatAction,
) {
    if !state.in_combat() {
        return;
    }

    match action {
        CombatAction::Attack => attack(out, world, state, dice),
        CombatAction::Use(None) => out.say("Use what? (Example: use ration)"),
        CombatAction::Use(Some(item)) => {
            use_item(out, world, state, &item);
            enemy_retaliates(out, state, dice, "attacks!");
        }
        CombatAction::Run => run(out, world, state, dice),
    }
}

fn attack(out: &mut Output, world: &world::World, state: &mut PlayerState, dice: &mut dyn Dice) {
    let (lo, hi) = attack_range(state.xp);
    let roll = dice.roll(lo, hi);

    let Some(enemy) = state.active_enemy.as_mut() else {
        return;
    };
    let before = enemy.hp;
    enemy.hp = enemy.hp.saturating_sub(roll);
    let lost = before - enemy.hp;
    out.say(format!("You strike for {} damage.", lost));
    out.say(format!("{} loses {} HP.", enemy.name, lost));
    out.status(enemy.status());

    if enemy.hp > 0 {
        enemy_retaliates(out, state, dice, "attacks!");
        return;
    }

    // Defeated: no retaliation this turn.
    let Some(enemy) = state.active_enemy.take() else {
        return;
    };
    let defeat_text = world
        .enemies
        .get(&enemy.name)
        .and_then(|d| d.defeat_text.clone())
        .unwrap_or_else(|| format!("{} is defeated!", enemy.name));
    out.event(defeat_text);

    state.xp = state.xp.saturating_add(enemy.xp_reward);
    out.say(format!(
        "You gain {} XP. Total XP: {}",
        enemy.xp_reward, state.xp
    ));
    debug!("'{}' defeated; xp now {}", enemy.name, state.xp);
    state.defeated_enemies.insert(enemy.name);
}

fn run(out: &mut Output, world: &world::World, state: &mut PlayerState, dice: &mut dyn Dice) {
    let chance = match &state.active_enemy {
        Some(enemy) => escape_chance(world, enemy),
        None => return,
    };

    if dice.chance() >= chance {
        out.say("You try to run, but your enemy blocks the way!");
        enemy_retaliates(out, state, dice, "punishes your hesitation!");
        return;
    }

    out.event("You break away and retreat!");
    state.active_enemy = None;
    state.spend_move();

    let retreat = world.rooms.get(&state.current_room).and_then(|room| {
        RETREAT_DIRECTIONS
            .iter()
            .find_map(|dir| room.exits.get(*dir))
            .filter(|dest| world.rooms.contains_key(*dest))
            .cloned()
    });

    let moved = match retreat {
        Some(dest) => {
            debug!("escaped from '{}' to '{}'", state.current_room, dest);
            state.current_room = dest;
            true
        }
        None => false,
    };

    render_room(out, world, state);
    if moved {
        maybe_start_combat(out, world, state);
    }
}

/// The active enemy hits back, if there still is one.
fn enemy_retaliates(out: &mut Output, state: &mut PlayerState, dice: &mut dyn Dice, verb: &str) {
    let Some(enemy) = &state.active_enemy else {
        return;
    };
    let damage = dice.roll(enemy.attack_min, enemy.attack_max);
    out.event(format!("{} {}", enemy.name, verb));

    let report = state.take_damage(damage);
    if report.blocked > 0 {
        out.say(format!(
            "Your ward absorbs {} damage, then fades.",
            report.blocked
        ));
    }
    out.say(format!("You take {}% damage.", report.taken));
    out.say(format!("You now have {}% health.", state.health()));
    render_health(out, state);
}
