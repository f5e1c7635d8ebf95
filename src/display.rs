/// Rendering layer — all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// game state.  No game logic is performed; this module only translates
/// state into terminal commands, scaling the logical play field onto
/// whatever grid the terminal currently has.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use typing_shooter::entities::{Enemy, EntireGameStateInfo, GameStatus, Laser};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_TARGET: Color = Color::Cyan;
const C_PLAYER: Color = Color::White;
const C_COCKPIT: Color = Color::Green;
const C_ENEMY: Color = Color::Green;
const C_ENEMY_LOCKED: Color = Color::Yellow;
const C_WORD_TYPED: Color = Color::Red;
const C_WORD_REMAINING: Color = Color::White;
const C_LASER: Color = Color::Cyan;
const C_HINT: Color = Color::DarkGrey;

/// Terminal grid the frame is drawn onto.
#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
}

impl Viewport {
    /// First and last rows inside the border.
    fn top(&self) -> u16 {
        2
    }

    fn bottom(&self) -> u16 {
        self.rows.saturating_sub(3)
    }

    /// Map a logical point to a cell, or `None` if it is outside the border.
    fn cell(&self, state: &EntireGameStateInfo, x: f32, y: f32) -> Option<(u16, u16)> {
        let inner_w = self.cols.saturating_sub(2) as f32;
        let inner_h = (self.bottom() + 1).saturating_sub(self.top()) as f32;
        let cx = (x / state.rules.width * inner_w).floor();
        let cy = (y / state.rules.height * inner_h).floor();
        if cx < 0.0 || cy < 0.0 || cx >= inner_w || cy >= inner_h {
            return None;
        }
        Some((1 + cx as u16, self.top() + cy as u16))
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    state: &EntireGameStateInfo,
    view: Viewport,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, view)?;
    draw_hud(out, state, view)?;

    for enemy in &state.enemies {
        draw_enemy(out, state, enemy, view)?;
    }
    for laser in &state.lasers {
        draw_laser(out, state, laser, view)?;
    }

    draw_player(out, state, view)?;
    draw_controls_hint(out, view)?;

    match state.status {
        GameStatus::Paused => draw_pause_menu(out, view)?,
        GameStatus::GameOver => draw_game_over(out, state, view)?,
        GameStatus::Playing | GameStatus::Terminated => {}
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, view: Viewport) -> std::io::Result<()> {
    let w = view.cols as usize;
    let h = view.rows;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(view.cols.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(
    out: &mut W,
    state: &EntireGameStateInfo,
    view: Viewport,
) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score: {:>6}", state.score)))?;

    if let Some(enemy) = state.locked_enemy() {
        let text = format!("Target: {}", enemy.word);
        let rx = view.cols.saturating_sub(text.chars().count() as u16 + 1);
        out.queue(cursor::MoveTo(rx, 0))?;
        out.queue(style::SetForegroundColor(C_HUD_TARGET))?;
        out.queue(Print(text))?;
    }

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_player<W: Write>(
    out: &mut W,
    state: &EntireGameStateInfo,
    view: Viewport,
) -> std::io::Result<()> {
    // Sprite (2 rows, 3 cols):
    //   ●       ← row y      (cockpit)
    //  /▲\      ← row y+1
    let Some((col, row)) = view.cell(state, state.player.x, state.player.y) else {
        return Ok(());
    };

    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(C_COCKPIT))?;
    out.queue(Print("●"))?;

    if row < view.bottom() {
        out.queue(cursor::MoveTo(col.saturating_sub(1).max(1), row + 1))?;
        out.queue(style::SetForegroundColor(C_PLAYER))?;
        out.queue(Print("/▲\\"))?;
    }

    Ok(())
}

fn draw_enemy<W: Write>(
    out: &mut W,
    state: &EntireGameStateInfo,
    enemy: &Enemy,
    view: Viewport,
) -> std::io::Result<()> {
    let Some((col, row)) = view.cell(state, enemy.x, enemy.y) else {
        return Ok(());
    };
    let locked = state.locked == Some(enemy.id);

    out.queue(cursor::MoveTo(col.saturating_sub(1).max(1), row))?;
    out.queue(style::SetForegroundColor(if locked { C_ENEMY_LOCKED } else { C_ENEMY }))?;
    out.queue(Print("<▼>"))?;

    // Two-tone label on the row below, centred on the sprite
    if row >= view.bottom() {
        return Ok(());
    }
    let len = enemy.word_len() as u16;
    let max_start = view.cols.saturating_sub(1 + len).max(1);
    let start = col.saturating_sub(len / 2).clamp(1, max_start);

    out.queue(cursor::MoveTo(start, row + 1))?;
    out.queue(style::SetForegroundColor(C_WORD_TYPED))?;
    out.queue(Print(enemy.typed_part()))?;
    out.queue(style::SetForegroundColor(C_WORD_REMAINING))?;
    out.queue(Print(enemy.remaining_part()))?;

    Ok(())
}

fn draw_laser<W: Write>(
    out: &mut W,
    state: &EntireGameStateInfo,
    laser: &Laser,
    view: Viewport,
) -> std::io::Result<()> {
    if let Some((col, row)) = view.cell(state, laser.x, laser.y) {
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(C_LASER))?;
        out.queue(Print("•"))?;
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, view: Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("Type the words   ← → : Move   ESC : Pause"))?;
    Ok(())
}

// ── Overlays ──────────────────────────────────────────────────────────────────

fn draw_centered<W: Write>(
    out: &mut W,
    view: Viewport,
    lines: &[(&str, Color)],
) -> std::io::Result<()> {
    let cx = view.cols / 2;
    let start_row = (view.rows / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    Ok(())
}

fn draw_pause_menu<W: Write>(out: &mut W, view: Viewport) -> std::io::Result<()> {
    draw_centered(
        out,
        view,
        &[
            ("╔══════════════════╗", Color::Cyan),
            ("║      PAUSED      ║", Color::Cyan),
            ("╚══════════════════╝", Color::Cyan),
            ("Resume (R)", Color::White),
            ("Restart (Enter)", Color::White),
            ("Quit (Q)", Color::White),
        ],
    )
}

fn draw_game_over<W: Write>(
    out: &mut W,
    state: &EntireGameStateInfo,
    view: Viewport,
) -> std::io::Result<()> {
    let score_line = format!("Final Score: {}", state.score);
    draw_centered(
        out,
        view,
        &[
            ("╔══════════════════╗", Color::Red),
            ("║    GAME  OVER    ║", Color::Red),
            ("╚══════════════════╝", Color::Red),
            (score_line.as_str(), Color::Yellow),
            ("Enter - Restart   Q - Quit", Color::White),
        ],
    )
}
