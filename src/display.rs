/// Rendering layer: all terminal output for a running session lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// session. No game logic is performed; this module only translates state
/// into terminal commands.
use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};
use slay_the_dragon::entities::{Cell, Direction, Entity, Phase, Session};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_BOSS: Color = Color::Red;
const C_HUD_STATS: Color = Color::Grey;
const C_PLAYER: Color = Color::Blue;
const C_PLAYER_INVINCIBLE: Color = Color::Cyan;
const C_BOSS: Color = Color::DarkYellow;
const C_FIREBALL: Color = Color::Red;
const C_EMBER: Color = Color::Magenta;
const C_POWERUP: Color = Color::Green;
const C_HINT: Color = Color::DarkGrey;

/// Row of the top border; the HUD sits above it.
const BOARD_TOP: u16 = 1;
/// Every board cell is two terminal columns wide so the board looks square.
const CELL_WIDTH: u16 = 2;

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, state: &Session) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, state)?;
    draw_hud(out, state)?;

    for entity in state.entities() {
        draw_entity(out, &entity)?;
    }

    draw_controls_hint(out, state)?;

    if state.phase.is_game_over() {
        draw_game_over(out, state)?;
    }

    // Park cursor below the board and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, bottom_row(state) + 2))?;
    out.flush()?;
    Ok(())
}

fn board_width(state: &Session) -> u16 {
    state.grid.size as u16 * CELL_WIDTH
}

fn bottom_row(state: &Session) -> u16 {
    BOARD_TOP + state.grid.size as u16 + 1
}

fn screen_pos(cell: Cell) -> (u16, u16) {
    (
        1 + cell.x as u16 * CELL_WIDTH,
        BOARD_TOP + 1 + cell.y as u16,
    )
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, state: &Session) -> std::io::Result<()> {
    let w = board_width(state) as usize;
    let bottom = bottom_row(state);

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, BOARD_TOP))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w))))?;

    out.queue(cursor::MoveTo(0, bottom))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w))))?;

    for row in BOARD_TOP + 1..bottom {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(w as u16 + 1, row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &Session) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score: {:>6}", state.score)))?;

    out.queue(style::SetForegroundColor(C_HUD_BOSS))?;
    out.queue(Print(format!("  Dragon HP: {:>2}", state.boss.hp)))?;

    out.queue(style::SetForegroundColor(C_HUD_STATS))?;
    out.queue(Print(format!(
        "  Moves: {}  Power-ups: {}",
        state.moves_made, state.powerups_collected
    )))?;

    if state.player.is_invincible() {
        out.queue(style::SetForegroundColor(C_PLAYER_INVINCIBLE))?;
        out.queue(Print("  INVINCIBLE"))?;
    }

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_entity<W: Write>(out: &mut W, entity: &Entity) -> std::io::Result<()> {
    let (col, row) = screen_pos(entity.cell());
    out.queue(cursor::MoveTo(col, row))?;
    match entity {
        Entity::Player(player) => {
            let color = if player.is_invincible() {
                C_PLAYER_INVINCIBLE
            } else {
                C_PLAYER
            };
            out.queue(style::SetForegroundColor(color))?;
            out.queue(Print("██"))?;
        }
        Entity::Boss(boss) => {
            out.queue(style::SetForegroundColor(C_BOSS))?;
            out.queue(Print(format!("{:>2}", boss.hp)))?;
        }
        Entity::LinearProjectile(fireball) => {
            let glyph = match fireball.direction {
                Direction::Up => "↑ ",
                Direction::Down => "↓ ",
                Direction::Left => "← ",
                Direction::Right => "→ ",
            };
            out.queue(style::SetForegroundColor(C_FIREBALL))?;
            out.queue(Print(glyph))?;
        }
        Entity::TransientProjectile(_) => {
            out.queue(style::SetForegroundColor(C_EMBER))?;
            out.queue(Print("**"))?;
        }
        Entity::PowerUp(_) => {
            out.queue(style::SetForegroundColor(C_POWERUP))?;
            out.queue(Print("<>"))?;
        }
    }
    Ok(())
}

// ── Controls hint (below the board) ───────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, state: &Session) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, bottom_row(state) + 1))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("Arrows / WASD : Move   Q : Quit"))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(out: &mut W, state: &Session) -> std::io::Result<()> {
    let (banner, color) = match state.phase {
        Phase::GameOverWin => ("║     YOU  WIN     ║", Color::Green),
        _ => ("║    GAME  OVER    ║", Color::Red),
    };
    let score_line = format!("Final Score: {}", state.score);
    let lines: &[(&str, Color)] = &[
        ("╔══════════════════╗", color),
        (banner, color),
        ("╚══════════════════╝", color),
        (&score_line, Color::Yellow),
        ("R - Play Again  Q - Quit", Color::White),
    ];

    let cx = 1 + board_width(state) / 2;
    let start_row = (BOARD_TOP + 1 + state.grid.size as u16 / 2)
        .saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    Ok(())
}
