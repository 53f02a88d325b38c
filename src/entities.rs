/// Game entities and the world they live in. Plain data; the rules are in `compute`.

use crate::config::{
    DRAGON_CHASE_SPEED, DRAGON_POINTS, FRUIT_POS, MONSTER_CHASE_SPEED, MONSTER_POINTS,
    PLAYER_START, START_LIVES,
};
use crate::geometry::{Rect, Vec2};
use crate::tunnels::{DigMask, TunnelId, TunnelNetwork};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyKind {
    Monster,
    Dragon,
}

impl EnemyKind {
    /// Score awarded when harpooned.
    pub fn points(self) -> u32 {
        match self {
            EnemyKind::Monster => MONSTER_POINTS,
            EnemyKind::Dragon => DRAGON_POINTS,
        }
    }

    pub fn chase_speed(self) -> f32 {
        match self {
            EnemyKind::Monster => MONSTER_CHASE_SPEED,
            EnemyKind::Dragon => DRAGON_CHASE_SPEED,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyMode {
    /// Oscillating inside the home tunnel.
    Patrolling,
    /// Released by tunnel activation; never returns to patrolling.
    Chasing,
}

/// Top-level game flow.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameState {
    Splash,
    /// `respawn_countdown > 0` means the player was just hit and the field
    /// is frozen until it reaches zero.
    Playing { respawn_countdown: u32 },
    GameOver,
    Win,
}

/// Intents sampled from the keyboard once per frame.  Directions are
/// level-triggered (held); the rest are edge-triggered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub fire: bool,
    pub confirm: bool,
    pub restart: bool,
}

/// Signals emitted by a frame for the UI and the score store.
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    TunnelActivated { tunnel: TunnelId, released: usize },
    EnemyKilled { kind: EnemyKind, points: u32 },
    FruitCollected { points: u32 },
    LifeLost { lives_left: u32 },
    Respawned,
    GameOver { score: u32 },
    Won { score: u32 },
    /// A game ended with a score above the previous best.
    NewHighScore(u32),
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Harpoon {
    pub active: bool,
    /// Unit vector along one axis; remembers the last direction moved.
    pub direction: Vec2,
    /// Frames the beam stays out.
    pub remaining: u32,
}

impl Default for Harpoon {
    fn default() -> Self {
        Self {
            active: false,
            direction: Vec2::new(1.0, 0.0),
            remaining: 0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    /// Top-left corner of the player's square.
    pub pos: Vec2,
    pub alive: bool,
    pub lives: u32,
    pub score: u32,
    pub harpoon: Harpoon,
    pub death_flash: u32,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            alive: true,
            lives: START_LIVES,
            score: 0,
            harpoon: Harpoon::default(),
            death_flash: 0,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::tile_square(self.pos)
    }
}

// ── Enemies & fruit ───────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub pos: Vec2,
    pub kind: EnemyKind,
    pub alive: bool,
    pub mode: EnemyMode,
    pub home: TunnelId,
    /// +1 walks towards the tunnel's far end, -1 back towards its origin.
    pub patrol_dir: i32,
}

impl Enemy {
    pub fn new(kind: EnemyKind, pos: Vec2, home: TunnelId) -> Self {
        Self {
            pos,
            kind,
            alive: true,
            mode: EnemyMode::Patrolling,
            home,
            patrol_dir: 1,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::tile_square(self.pos)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Fruit {
    pub pos: Vec2,
    pub collected: bool,
}

impl Fruit {
    pub fn bounds(&self) -> Rect {
        Rect::tile_square(self.pos)
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state.  Cloneable so the per-frame update can return a
/// new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct World {
    pub dug: DigMask,
    pub tunnels: TunnelNetwork,
    pub player: Player,
    /// Monsters and dragons of the current level; their `home` handles
    /// index into `tunnels`.
    pub enemies: Vec<Enemy>,
    pub fruit: Fruit,
    pub high_score: u32,
    pub state: GameState,
    pub frame: u64,
}

impl World {
    /// A world on the title screen with an empty level; `compute::init_world`
    /// fills the level in.
    pub fn new(high_score: u32) -> Self {
        Self {
            dug: DigMask::new(),
            tunnels: TunnelNetwork::new(),
            player: Player::new(Vec2::new(PLAYER_START.0, PLAYER_START.1)),
            enemies: Vec::new(),
            fruit: Fruit {
                pos: Vec2::new(FRUIT_POS.0, FRUIT_POS.1),
                collected: false,
            },
            high_score,
            state: GameState::Splash,
            frame: 0,
        }
    }

    pub fn is_respawning(&self) -> bool {
        matches!(self.state, GameState::Playing { respawn_countdown } if respawn_countdown > 0)
    }

    pub fn enemies_alive(&self) -> usize {
        self.enemies.iter().filter(|e| e.alive).count()
    }
}
