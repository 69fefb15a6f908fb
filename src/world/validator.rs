use super::model::{ItemEffect, LoseCondition, WinCondition, World};

#[derive(Debug, Clone)]
pub struct ValidationError {
    pub message: String,
}

impl ValidationError {
    fn new(msg: impl Into<String>) -> Self {
        ValidationError {
            message: msg.into(),
        }
    }
}

/// Cross-reference checks that the loader does not enforce.
///
/// These are reported, not fatal: a world with a dangling exit is still playable
/// up to the point where the player walks into it.
pub fn validate_world(world: &World) -> Vec<ValidationError> {
    let mut errors: Vec<ValidationError> = Vec::new();

    if world.rooms.is_empty() {
        errors.push(ValidationError::new("world has no rooms"));
    }

    if !world.rooms.contains_key(&world.start_room) {
        errors.push(ValidationError::new(format!(
            "start_room '{}' not found among rooms",
            world.start_room
        )));
    }

    for (room_name, room) in &world.rooms {
        for (direction, target) in &room.exits {
            if !world.rooms.contains_key(target) {
                errors.push(ValidationError::new(format!(
                    "room '{}' exit '{}' targets missing room '{}'",
                    room_name, direction, target
                )));
            }
        }

        if let Some(dark) = &room.darkness {
            for blocked in &dark.blocked_exits {
                if !room.exits.contains_key(blocked) {
                    errors.push(ValidationError::new(format!(
                        "room '{}' darkness blocks '{}', which is not an exit",
                        room_name, blocked
                    )));
                }
            }
        }
    }

    for lock in &world.locks {
        match world.rooms.get(&lock.from) {
            None => errors.push(ValidationError::new(format!(
                "lock on '{}' {} references missing room",
                lock.from, lock.direction
            ))),
            Some(room) if !room.exits.contains_key(&lock.direction) => {
                errors.push(ValidationError::new(format!(
                    "lock on '{}' {} guards an exit that does not exist",
                    lock.from, lock.direction
                )))
            }
            Some(_) => {}
        }
    }

    for (room_name, enemy_name) in &world.room_enemies {
        if !world.rooms.contains_key(room_name) {
            errors.push(ValidationError::new(format!(
                "room_enemies binds '{}' to missing room '{}'",
                enemy_name, room_name
            )));
        }
        if !world.enemies.contains_key(enemy_name) {
            errors.push(ValidationError::new(format!(
                "room '{}' binds undefined enemy '{}'",
                room_name, enemy_name
            )));
        }
    }

    for (item_name, usable) in &world.usable_items {
        if let ItemEffect::UnlockExit { from, .. } = &usable.effect {
            if !world.rooms.contains_key(from) {
                errors.push(ValidationError::new(format!(
                    "usable item '{}' unlocks an exit of missing room '{}'",
                    item_name, from
                )));
            }
        }
        if let ItemEffect::LightRoom { rooms } = &usable.effect {
            for r in rooms {
                if !world.rooms.contains_key(r) {
                    errors.push(ValidationError::new(format!(
                        "usable item '{}' lights missing room '{}'",
                        item_name, r
                    )));
                }
            }
        }
    }

    let win_room = match &world.win_condition {
        Some(WinCondition::ReachRoom { room, .. })
        | Some(WinCondition::ReachRoomWithItem { room, .. }) => Some(room),
        _ => None,
    };
    if let Some(room) = win_room {
        if !world.rooms.contains_key(room) {
            errors.push(ValidationError::new(format!(
                "win_condition targets missing room '{}'",
                room
            )));
        }
    }

    if let Some(LoseCondition::MaxMoves { moves: 0, .. }) = &world.lose_condition {
        errors.push(ValidationError::new(
            "lose_condition max_moves is 0; the game is lost before the first turn",
        ));
    }

    errors
}
