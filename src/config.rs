//! Game tunables.  Distances are in field units (one tile = `TILE_SIZE`
//! units) and durations are in frames at 60 FPS.

// ── Grid ──────────────────────────────────────────────────────────────────────

pub const TILE_SIZE: i32 = 32;
pub const GRID_WIDTH: i32 = 25;
pub const GRID_HEIGHT: i32 = 18;

pub const FIELD_WIDTH: f32 = (GRID_WIDTH * TILE_SIZE) as f32;
pub const FIELD_HEIGHT: f32 = (GRID_HEIGHT * TILE_SIZE) as f32;

// ── Player ────────────────────────────────────────────────────────────────────

pub const START_LIVES: u32 = 3;
pub const PLAYER_SPEED: f32 = 2.0;
pub const PLAYER_START: (f32, f32) = (100.0, 100.0);

/// 3 seconds.
pub const RESPAWN_DELAY: u32 = 180;
/// Half a second of red flashing after a hit.
pub const DEATH_FLASH_TIME: u32 = 30;

pub const HARPOON_FRAMES: u32 = 15;
pub const HARPOON_REACH: f32 = 50.0;
pub const HARPOON_THICKNESS: f32 = 4.0;

// ── Enemies ───────────────────────────────────────────────────────────────────

pub const PATROL_SPEED: f32 = 0.5;
pub const MONSTER_CHASE_SPEED: f32 = 1.2;
pub const DRAGON_CHASE_SPEED: f32 = 1.5;

// ── Scoring ───────────────────────────────────────────────────────────────────

pub const MONSTER_POINTS: u32 = 100;
pub const DRAGON_POINTS: u32 = 200;
pub const FRUIT_POINTS: u32 = 500;

// ── Tunnel layout ─────────────────────────────────────────────────────────────

/// Random placements tried per orientation before giving up.
pub const TUNNEL_ATTEMPTS: u32 = 50;
pub const HORIZONTAL_TARGET: usize = 4;
pub const TOTAL_TARGET: usize = 8;
pub const TUNNEL_MIN_LEN: i32 = 4;
pub const TUNNEL_MAX_LEN: i32 = 8;

/// Top-left corner of the fruit: centred on the field.
pub const FRUIT_POS: (f32, f32) = (
    FIELD_WIDTH / 2.0 - (TILE_SIZE / 2) as f32,
    FIELD_HEIGHT / 2.0 - (TILE_SIZE / 2) as f32,
);
