/// Game-logic functions.
///
/// `tick` is the only entry point the game loop needs: it takes the current
/// `World`, one frame of input and an RNG handle and returns a brand-new
/// `World` plus the signals raised during the frame.  The helpers below it
/// operate on a `&mut World` owned by `tick` and are public so tests can
/// drive individual stages.

use rand::Rng;

use crate::config::{
    DEATH_FLASH_TIME, FIELD_HEIGHT, FIELD_WIDTH, FRUIT_POINTS, HARPOON_FRAMES, PATROL_SPEED,
    PLAYER_SPEED, PLAYER_START, RESPAWN_DELAY, START_LIVES, TILE_SIZE,
};
use crate::entities::{
    Enemy, EnemyKind, EnemyMode, FrameInput, GameEvent, GameState, Harpoon, Player, World,
};
use crate::geometry::{harpoon_rect, to_tile, Vec2};
use crate::tunnels::{Orientation, Tunnel, TunnelId};

// ── Constructors & resets ────────────────────────────────────────────────────

/// Build the start-up world: title screen, full lives, a level ready to go.
pub fn init_world(high_score: u32, rng: &mut impl Rng) -> World {
    let mut world = World::new(high_score);
    reset_all(&mut world, rng);
    world
}

/// Throw away the current level and generate a new one.  Score and lives
/// are kept; every `TunnelId` held by the old enemies is dropped with them.
pub fn reset_level(world: &mut World, rng: &mut impl Rng) {
    world.dug.clear();
    reset_player(&mut world.player);
    world.enemies.clear();

    world.tunnels.generate_layout(rng);
    world.tunnels.mark_dug(&mut world.dug);
    world.tunnels.reset_activation();

    populate_enemies(world, rng);
    world.fruit.collected = false;

    log::debug!(
        "level reset: {} tunnels, {} enemies",
        world.tunnels.len(),
        world.enemies.len()
    );
}

/// Start over from the title screen with full lives and no score.
pub fn reset_all(world: &mut World, rng: &mut impl Rng) {
    world.player.lives = START_LIVES;
    world.player.score = 0;
    world.player.alive = true;
    reset_level(world, rng);
    world.state = GameState::Splash;
}

fn reset_player(player: &mut Player) {
    player.pos = Vec2::new(PLAYER_START.0, PLAYER_START.1);
    player.alive = true;
    player.harpoon = Harpoon::default();
    player.death_flash = 0;
}

/// Each tunnel gets a monster on a coin flip; tunnels still empty afterwards
/// get a dragon on a second flip.
fn populate_enemies(world: &mut World, rng: &mut impl Rng) {
    let homes: Vec<(TunnelId, Vec2)> = world
        .tunnels
        .iter()
        .map(|(id, tunnel)| (id, tunnel.middle_tile().origin()))
        .collect();

    for &(id, pos) in &homes {
        if rng.gen_bool(0.5) {
            world.enemies.push(Enemy::new(EnemyKind::Monster, pos, id));
        }
    }
    for &(id, pos) in &homes {
        let occupied = world.enemies.iter().any(|e| e.home == id);
        if !occupied && rng.gen_bool(0.5) {
            world.enemies.push(Enemy::new(EnemyKind::Dragon, pos, id));
        }
    }
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the game by one frame.  All randomness comes through `rng` so
/// callers control determinism (tests use a seeded RNG).
pub fn tick(
    state: &World,
    input: &FrameInput,
    rng: &mut impl Rng,
) -> (World, Vec<GameEvent>) {
    let mut world = state.clone();
    world.frame += 1;
    let mut events = Vec::new();

    let current = world.state;
    match current {
        GameState::Splash => {
            if input.confirm {
                world.state = GameState::Playing { respawn_countdown: 0 };
                reset_level(&mut world, rng);
            }
        }
        GameState::Playing { respawn_countdown } => {
            world.player.death_flash = world.player.death_flash.saturating_sub(1);
            if respawn_countdown > 0 {
                burn_harpoon(&mut world.player.harpoon);
                let remaining = respawn_countdown - 1;
                world.state = GameState::Playing {
                    respawn_countdown: remaining,
                };
                if remaining == 0 {
                    world.player.alive = true;
                    reset_level(&mut world, rng);
                    events.push(GameEvent::Respawned);
                }
            } else {
                events = step(&mut world, input);
            }
        }
        GameState::GameOver | GameState::Win => {
            if input.confirm || input.restart {
                reset_all(&mut world, rng);
            }
        }
    }

    (world, events)
}

/// One frame of live play, in a fixed order: player, activation, enemies,
/// contact, harpoon, fruit, death, win.
pub fn step(world: &mut World, input: &FrameInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    move_player(&mut world.player, input);
    world.dug.dig(to_tile(world.player.pos));

    activate_tunnels(world, &mut events);
    advance_enemies(world);

    resolve_enemy_contact(world);
    resolve_harpoon(world, &mut events);
    resolve_fruit(world, &mut events);
    resolve_death(world, &mut events);
    resolve_outcome(world, &mut events);

    events
}

// ── Player ───────────────────────────────────────────────────────────────────

/// Apply held directions (both axes in the same frame, unnormalized), clamp
/// to the field and arm the harpoon on fire.  The last direction applied,
/// in right/left/up/down order, becomes the aim.
pub fn move_player(player: &mut Player, input: &FrameInput) {
    let aims = [
        (input.right, Vec2::new(1.0, 0.0)),
        (input.left, Vec2::new(-1.0, 0.0)),
        (input.up, Vec2::new(0.0, -1.0)),
        (input.down, Vec2::new(0.0, 1.0)),
    ];
    for (held, dir) in aims {
        if held {
            player.pos.x += dir.x * PLAYER_SPEED;
            player.pos.y += dir.y * PLAYER_SPEED;
            player.harpoon.direction = dir;
        }
    }

    let size = TILE_SIZE as f32;
    player.pos.x = player.pos.x.clamp(0.0, FIELD_WIDTH - size);
    player.pos.y = player.pos.y.clamp(0.0, FIELD_HEIGHT - size);

    if input.fire {
        player.harpoon.active = true;
        player.harpoon.remaining = HARPOON_FRAMES;
    }
}

// ── Tunnel activation ────────────────────────────────────────────────────────

/// Wake the dormant tunnel under the player, if any, and release every
/// enemy living in it at once.
pub fn activate_tunnels(world: &mut World, events: &mut Vec<GameEvent>) {
    let tile = to_tile(world.player.pos);
    let Some(id) = world.tunnels.tunnel_at(tile) else {
        return;
    };
    let Some(tunnel) = world.tunnels.get_mut(id) else {
        return;
    };
    if tunnel.activated {
        return;
    }
    tunnel.activated = true;

    let mut released = 0;
    for enemy in world.enemies.iter_mut().filter(|e| e.home == id) {
        enemy.mode = EnemyMode::Chasing;
        released += 1;
    }
    log::info!("tunnel {} activated, {} enemies released", id.0, released);
    events.push(GameEvent::TunnelActivated {
        tunnel: id,
        released,
    });
}

// ── Enemy locomotion ─────────────────────────────────────────────────────────

fn advance_enemies(world: &mut World) {
    let target = world.player.pos;
    for enemy in world.enemies.iter_mut().filter(|e| e.alive) {
        match enemy.mode {
            EnemyMode::Patrolling => {
                if let Some(tunnel) = world.tunnels.get(enemy.home) {
                    patrol(enemy, tunnel);
                }
            }
            EnemyMode::Chasing => chase(enemy, target),
        }
    }
}

/// Walk along the home tunnel's axis, turning round on the end tiles.
pub fn patrol(enemy: &mut Enemy, tunnel: &Tunnel) {
    let delta = PATROL_SPEED * enemy.patrol_dir as f32;
    let along = match tunnel.orientation {
        Orientation::Horizontal => {
            enemy.pos.x += delta;
            to_tile(enemy.pos).x
        }
        Orientation::Vertical => {
            enemy.pos.y += delta;
            to_tile(enemy.pos).y
        }
    };

    let (first, last) = tunnel.span();
    if along <= first {
        enemy.patrol_dir = 1;
    } else if along >= last {
        enemy.patrol_dir = -1;
    }
}

/// Step towards `target` on each axis independently, so a diagonal approach
/// covers more ground per frame than a straight one.
pub fn chase(enemy: &mut Enemy, target: Vec2) {
    let speed = enemy.kind.chase_speed();

    if target.x > enemy.pos.x {
        enemy.pos.x += speed;
    } else if target.x < enemy.pos.x {
        enemy.pos.x -= speed;
    }

    if target.y > enemy.pos.y {
        enemy.pos.y += speed;
    } else if target.y < enemy.pos.y {
        enemy.pos.y -= speed;
    }
}

// ── Collision & combat ───────────────────────────────────────────────────────

fn resolve_enemy_contact(world: &mut World) {
    let bounds = world.player.bounds();
    if world
        .enemies
        .iter()
        .any(|e| e.alive && e.bounds().overlaps(&bounds))
    {
        world.player.alive = false;
    }
}

/// Kill and score every live enemy under the harpoon beam, then burn one
/// frame of the beam's duration.
pub fn resolve_harpoon(world: &mut World, events: &mut Vec<GameEvent>) {
    let harpoon = &world.player.harpoon;
    if !harpoon.active || harpoon.remaining == 0 {
        return;
    }

    let beam = harpoon_rect(world.player.pos, harpoon.direction);
    for enemy in world.enemies.iter_mut() {
        if enemy.alive && enemy.bounds().overlaps(&beam) {
            enemy.alive = false;
            let points = enemy.kind.points();
            world.player.score += points;
            events.push(GameEvent::EnemyKilled {
                kind: enemy.kind,
                points,
            });
        }
    }

    burn_harpoon(&mut world.player.harpoon);
}

/// The beam is out for a fixed number of frames, frozen field or not.
fn burn_harpoon(harpoon: &mut Harpoon) {
    if !harpoon.active {
        return;
    }
    harpoon.remaining = harpoon.remaining.saturating_sub(1);
    if harpoon.remaining == 0 {
        harpoon.active = false;
    }
}

fn resolve_fruit(world: &mut World, events: &mut Vec<GameEvent>) {
    if world.fruit.collected || !world.fruit.bounds().overlaps(&world.player.bounds()) {
        return;
    }
    world.fruit.collected = true;
    world.player.score += FRUIT_POINTS;
    events.push(GameEvent::FruitCollected {
        points: FRUIT_POINTS,
    });
}

// ── Outcomes ─────────────────────────────────────────────────────────────────

fn resolve_death(world: &mut World, events: &mut Vec<GameEvent>) {
    if world.player.alive {
        return;
    }

    let player = &mut world.player;
    player.lives = player.lives.saturating_sub(1);
    player.death_flash = DEATH_FLASH_TIME;
    events.push(GameEvent::LifeLost {
        lives_left: player.lives,
    });
    log::info!("player hit, {} lives left", player.lives);

    if player.lives > 0 {
        world.state = GameState::Playing {
            respawn_countdown: RESPAWN_DELAY,
        };
    }
}

/// A cleared field wins even on the frame the last life is lost.
fn resolve_outcome(world: &mut World, events: &mut Vec<GameEvent>) {
    if world.enemies_alive() == 0 {
        finish(world, GameState::Win, events);
    } else if !world.player.alive && world.player.lives == 0 {
        finish(world, GameState::GameOver, events);
    }
}

/// Enter a terminal state, raising the high score if it was beaten.
fn finish(world: &mut World, outcome: GameState, events: &mut Vec<GameEvent>) {
    let score = world.player.score;
    if score > world.high_score {
        world.high_score = score;
        events.push(GameEvent::NewHighScore(score));
    }

    world.state = outcome;
    match outcome {
        GameState::Win => events.push(GameEvent::Won { score }),
        _ => events.push(GameEvent::GameOver { score }),
    }
    log::info!("game ended ({:?}) with score {}", outcome, score);
}
