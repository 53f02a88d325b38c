/// Rendering layer: all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// world.  No game logic is performed; this module only translates state
/// into terminal commands.  Every tile is two terminal columns wide so the
/// field keeps a roughly square aspect.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use tunnel_digger::config::{GRID_HEIGHT, GRID_WIDTH, TILE_SIZE};
use tunnel_digger::entities::{Enemy, EnemyKind, EnemyMode, GameState, World};
use tunnel_digger::geometry::{to_tile, Tile, Vec2};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_DIRT: Color = Color::DarkYellow;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_HIGH: Color = Color::Grey;
const C_HUD_LIVES: Color = Color::Blue;
const C_PLAYER: Color = Color::Blue;
const C_PLAYER_HIT: Color = Color::Red;
const C_HARPOON: Color = Color::White;
const C_MONSTER: Color = Color::Red;
const C_MONSTER_CHASING: Color = Color::DarkRed;
const C_DRAGON: Color = Color::Green;
const C_DRAGON_CHASING: Color = Color::DarkGreen;
const C_FRUIT: Color = Color::Green;
const C_HINT: Color = Color::DarkGrey;

/// Field origin on screen: one HUD row and the top border above it, the
/// left border before it.
const FIELD_ROW: u16 = 2;
const FIELD_COL: u16 = 1;

const CONTROLS: &str = "Arrows: Move & dig   SPACE: Harpoon   Q: Quit";

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, world: &World) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    match world.state {
        GameState::Splash => draw_splash(out, world)?,
        GameState::Playing { respawn_countdown } => {
            draw_border(out)?;
            draw_field(out, world)?;
            draw_hud(out, world)?;
            if world.is_respawning() {
                draw_respawn_banner(out, respawn_countdown)?;
            }
            draw_controls_hint(out)?;
        }
        GameState::GameOver => draw_outcome(out, world, "GAME  OVER", Color::Red)?,
        GameState::Win => draw_outcome(out, world, "YOU  WIN!", Color::Green)?,
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, screen_height() - 1))?;
    out.flush()?;
    Ok(())
}

fn screen_width() -> u16 {
    GRID_WIDTH as u16 * 2 + 2
}

fn screen_height() -> u16 {
    FIELD_ROW + GRID_HEIGHT as u16 + 2
}

/// Screen cell of a tile, if it lies on the field.
fn cell(tile: Tile) -> Option<(u16, u16)> {
    let inside = (0..GRID_WIDTH).contains(&tile.x) && (0..GRID_HEIGHT).contains(&tile.y);
    inside.then(|| {
        (
            FIELD_COL + tile.x as u16 * 2,
            FIELD_ROW + tile.y as u16,
        )
    })
}

/// The tile a square at `pos` mostly covers.
fn nearest_tile(pos: Vec2) -> Tile {
    let half = (TILE_SIZE / 2) as f32;
    to_tile(Vec2::new(pos.x + half, pos.y + half))
}

fn put<W: Write>(out: &mut W, tile: Tile, glyph: &str, color: Color) -> std::io::Result<()> {
    if let Some((col, row)) = cell(tile) {
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(glyph))?;
    }
    Ok(())
}

fn centred<W: Write>(out: &mut W, row: u16, text: &str, color: Color) -> std::io::Result<()> {
    let col = (screen_width() / 2).saturating_sub(text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W) -> std::io::Result<()> {
    let inner = GRID_WIDTH as usize * 2;
    let bottom = FIELD_ROW + GRID_HEIGHT as u16;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, FIELD_ROW - 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(inner))))?;

    out.queue(cursor::MoveTo(0, bottom))?;
    out.queue(Print(format!("└{}┘", "─".repeat(inner))))?;

    for row in FIELD_ROW..bottom {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(screen_width() - 1, row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── Field ─────────────────────────────────────────────────────────────────────

fn draw_field<W: Write>(out: &mut W, world: &World) -> std::io::Result<()> {
    for y in 0..GRID_HEIGHT {
        for x in 0..GRID_WIDTH {
            let tile = Tile::new(x, y);
            if !world.dug.is_dug(tile) {
                put(out, tile, "░░", C_DIRT)?;
            }
        }
    }

    if !world.fruit.collected {
        put(out, nearest_tile(world.fruit.pos), "()", C_FRUIT)?;
    }
    for enemy in world.enemies.iter().filter(|e| e.alive) {
        draw_enemy(out, enemy)?;
    }
    draw_player(out, world)?;

    Ok(())
}

fn draw_enemy<W: Write>(out: &mut W, enemy: &Enemy) -> std::io::Result<()> {
    let chasing = enemy.mode == EnemyMode::Chasing;
    let (glyph, color) = match enemy.kind {
        EnemyKind::Monster if chasing => ("ÒÓ", C_MONSTER_CHASING),
        EnemyKind::Monster => ("òó", C_MONSTER),
        EnemyKind::Dragon if chasing => ("◢◣", C_DRAGON_CHASING),
        EnemyKind::Dragon => ("◿◺", C_DRAGON),
    };
    put(out, nearest_tile(enemy.pos), glyph, color)
}

fn draw_player<W: Write>(out: &mut W, world: &World) -> std::io::Result<()> {
    let player = &world.player;
    let tile = nearest_tile(player.pos);
    // Blink while the hit flash runs.
    let color = if player.death_flash > 0 && world.frame % 8 < 4 {
        C_PLAYER_HIT
    } else {
        C_PLAYER
    };
    put(out, tile, "██", color)?;

    // The beam reaches about a tile and a half from the player's centre.
    let harpoon = &player.harpoon;
    if harpoon.active {
        let (dx, dy) = (harpoon.direction.x as i32, harpoon.direction.y as i32);
        let glyph = if dx != 0 { "══" } else { "║ " };
        for reach in 1..=2 {
            let beam = Tile::new(tile.x + dx * reach, tile.y + dy * reach);
            put(out, beam, glyph, C_HARPOON)?;
        }
    }
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, world: &World) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score:{:>6}", world.player.score)))?;
    out.queue(style::SetForegroundColor(C_HUD_HIGH))?;
    out.queue(Print(format!("  High:{:>6}", world.high_score)))?;

    let lives = format!("Lives:{}", "♥".repeat(world.player.lives as usize));
    let col = screen_width().saturating_sub(lives.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(col, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(&lives))?;

    Ok(())
}

fn draw_respawn_banner<W: Write>(out: &mut W, countdown: u32) -> std::io::Result<()> {
    let secs = countdown / 60 + 1;
    let msg = format!(" Respawning in {}... ", secs);
    centred(out, FIELD_ROW + GRID_HEIGHT as u16 / 2, &msg, Color::Yellow)
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, screen_height() - 1))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(CONTROLS))?;
    Ok(())
}

// ── Full-screen pages ─────────────────────────────────────────────────────────

fn draw_splash<W: Write>(out: &mut W, world: &World) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_HIGH))?;
    out.queue(Print(format!("High Score: {}", world.high_score)))?;

    let lines: &[(&str, Color)] = &[
        ("DIG  DUG  (Tunnel Edition)", Color::White),
        ("", Color::White),
        ("Arrow keys: Move & dig", Color::Grey),
        ("Space: Harpoon (kills red & green)", Color::Grey),
        ("Enter tunnels to release monsters!", Color::Grey),
        ("", Color::White),
        ("Press ENTER to Start", Color::Yellow),
    ];
    let start = 4;
    for (i, (text, color)) in lines.iter().enumerate() {
        centred(out, start + i as u16, text, *color)?;
    }
    Ok(())
}

/// Game-over and win pages share one layout.
fn draw_outcome<W: Write>(
    out: &mut W,
    world: &World,
    title: &str,
    color: Color,
) -> std::io::Result<()> {
    let score = world.player.score;
    let new_best = score > 0 && score >= world.high_score;
    let best_line = if new_best {
        format!("★ NEW BEST: {:>6} ★", world.high_score)
    } else {
        format!("High Score:  {:>6}", world.high_score)
    };

    let row = screen_height() / 2 - 3;
    centred(out, row, "╔════════════════════╗", color)?;
    centred(out, row + 1, &format!("║{:^20}║", title), color)?;
    centred(out, row + 2, "╚════════════════════╝", color)?;
    centred(out, row + 3, &format!("Final Score: {:>6}", score), Color::White)?;
    centred(
        out,
        row + 4,
        &best_line,
        if new_best { Color::Yellow } else { Color::DarkGrey },
    )?;
    centred(out, row + 6, "ENTER / R - Restart   Q - Quit", Color::White)?;
    Ok(())
}
