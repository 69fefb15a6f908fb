pub mod command;
pub mod config;
pub mod engine;
pub mod error;
pub mod player;
pub mod save;
pub mod world;

use log::{debug, warn};

use command::{Command, parse_command};
use config::EngineConfig;
use engine::{
    COMBAT_HELP, Dice, Outcome, Output, combat_turn, evaluate, handle_drop,
    handle_get, handle_go, handle_talk_to_npc, maybe_start_combat, render_health, render_help,
    render_inventory, render_room, use_item,
};
use player::PlayerState;
use save::SaveRecord;
use world::World;

pub use world::{load_world_from_file, load_world_from_json_str, load_world_from_str};

/// What the front end should do after a step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Turn {
    Continue,
    Quit,
    Over(Outcome),
}

/// One play session: the world, the player, and the dice.
pub struct GameState {
    pub world: World,
    pub player: PlayerState,
    pub config: EngineConfig,
    dice: Box<dyn Dice>,
    outcome: Option<Outcome>,
}

impl GameState {
    pub fn new(world: World, config: EngineConfig) -> Self {
        let player = PlayerState::new(world.start_room.clone());
        let dice = config.dice();
        GameState {
            world,
            player,
            config,
            dice,
            outcome: None,
        }
    }

    /// Replace the dice, e.g. with `ScriptedDice` in tests.
    pub fn with_dice(mut self, dice: impl Dice + 'static) -> Self {
        self.dice = Box::new(dice);
        self
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    /// Opening text: title, intro, first room, health and help.
    /// A fight waiting in the start room begins immediately.
    pub fn initialize(&mut self) -> Output {
        let mut out = Output::new();
        out.title(format!("=== {} ===", self.world.title));
        out.say(self.world.intro_text.clone());
        render_room(&mut out, &self.world, &self.player);
        render_health(&mut out, &self.player);
        render_help(&mut out, &self.world);
        maybe_start_combat(&mut out, &self.world, &mut self.player);
        self.check_outcome(&mut out);
        out
    }

    /// Process a single player input.
    pub fn step(&mut self, input: &str) -> (Output, Turn) {
        let mut out = Output::new();

        if let Some(outcome) = &self.outcome {
            out.say("The game is over.");
            return (out, Turn::Over(outcome.clone()));
        }

        let command = parse_command(input);
        if command == Command::Empty {
            out.say("Please type a command. (Try: help)");
            return (out, Turn::Continue);
        }

        if self.player.in_combat() {
            self.step_combat(&mut out, command);
        } else {
            if command == Command::Quit {
                out.say("Farewell, adventurer.");
                return (out, Turn::Quit);
            }
            self.step_exploring(&mut out, command);
            maybe_start_combat(&mut out, &self.world, &mut self.player);
        }

        let turn = match self.check_outcome(&mut out) {
            Some(outcome) => Turn::Over(outcome),
            None => Turn::Continue,
        };
        (out, turn)
    }

    fn step_combat(&mut self, out: &mut Output, command: Command) {
        let Some(action) = command.into_combat_action() else {
            out.say(COMBAT_HELP);
            return;
        };
        combat_turn(
            out,
            &self.world,
            &mut self.player,
            self.dice.as_mut(),
            action,
        );
    }

    fn step_exploring(&mut self, out: &mut Output, command: Command) {
        match command {
            Command::Save => return self.save(out),
            Command::Load => return self.load(out),
            _ => {}
        }

        let world = &mut self.world;
        let state = &mut self.player;

        match command {
            Command::Look => render_room(out, world, state),
            Command::Help => render_help(out, world),
            Command::Inventory => render_inventory(out, state),
            Command::Health => render_health(out, state),
            Command::Go(None) => out.say("Go where? (Example: go north)"),
            Command::Go(Some(direction)) => {
                handle_go(out, world, state, &direction);
            }
            Command::Get(None) => out.say("Get what? (Example: get torch)"),
            Command::Get(Some(item)) => handle_get(out, world, state, &item),
            Command::Drop(None) => out.say("Drop what? (Example: drop torch)"),
            Command::Drop(Some(item)) => handle_drop(out, world, state, &item),
            Command::TalkTo(None) => out.say("Talk to whom? (Example: talk to guard)"),
            Command::TalkTo(Some(npc)) => handle_talk_to_npc(out, world, state, &npc),
            Command::Use(None) => out.say("Use what? (Example: use ration)"),
            Command::Use(Some(item)) => use_item(out, world, state, &item),
            Command::Attack | Command::Run => out.say("There's nothing here to fight."),
            Command::Unknown(_) => out.say("I don't understand that command. (Try: help)"),
            Command::Empty | Command::Quit | Command::Save | Command::Load => {}
        }
    }

    fn save(&self, out: &mut Output) {
        let path = &self.config.save_path;
        match SaveRecord::capture(&self.world, &self.player).write_to(path) {
            Ok(()) => {
                debug!("saved game to {}", path.display());
                out.say("Game saved.");
            }
            Err(e) => {
                warn!("save failed: {e}");
                out.say(format!("Could not save the game: {e}"));
            }
        }
    }

    fn load(&mut self, out: &mut Output) {
        let path = &self.config.save_path;
        let record = match SaveRecord::read_from(path) {
            Ok(record) => record,
            Err(e) if e.is_not_found() => {
                out.say("No save file found.");
                return;
            }
            Err(e) => {
                warn!("load failed: {e}");
                out.say(format!("Could not load the save file: {e}"));
                return;
            }
        };

        self.player = record.restore(&mut self.world);
        debug!("loaded game from {}", path.display());
        out.say("Game loaded.");
        render_room(out, &self.world, &self.player);
        maybe_start_combat(out, &self.world, &mut self.player);
    }

    fn check_outcome(&mut self, out: &mut Output) -> Option<Outcome> {
        let outcome = evaluate(&self.world, &self.player)?;
        debug!("session over: {:?}", outcome);
        out.event(outcome.text().to_string());
        self.outcome = Some(outcome.clone());
        Some(outcome)
    }
}
