/// Rendering layer.  All terminal I/O lives here.
///
/// A state snapshot is first composed into a `Frame` (a character grid),
/// then only the cells that differ from the previously drawn frame are
/// written.  No game logic is performed here.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use river_crossing::entities::{GameState, Obstacle, ObstacleKind, Phase, Status};
use river_crossing::level::GOAL_COUNT;
use river_crossing::vector::{row_of, Vector, CANVAS_SIZE, ROW_COUNT};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_EMPTY: Color = Color::Black;
const C_RIVER: Color = Color::DarkBlue;
const C_GROUND: Color = Color::DarkYellow;
const C_GOAL: Color = Color::DarkGreen;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_LIVES: Color = Color::Red;
const C_HUD_LEVEL: Color = Color::Cyan;
const C_ACTOR: Color = Color::Green;
const C_MARKER: Color = Color::White;
const C_GROUND_BLOCK: Color = Color::Red;
const C_RIVER_BLOCK: Color = Color::Grey;
const C_CROC_CLEAR: Color = Color::Green;
const C_CROC_DANGER: Color = Color::Magenta;
const C_FLY: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Canvas units per terminal column.
const UNITS_PER_COL: f64 = 10.0;
/// Terminal lines per game row.
const LINES_PER_ROW: u16 = 2;
/// Lines above the play field (HUD).
const TOP: u16 = 1;

pub const COLS: u16 = (CANVAS_SIZE / UNITS_PER_COL) as u16;
pub const LINES: u16 = TOP + ROW_COUNT as u16 * LINES_PER_ROW + 1;

// ── Frame ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
}

const BLANK: Cell = Cell {
    ch: ' ',
    fg: Color::White,
    bg: C_EMPTY,
};

/// What is currently on screen.  Handed back to `render` on the next call
/// so only the changes get written.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub width: u16,
    pub height: u16,
    cells: Vec<Cell>,
}

impl Frame {
    fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![BLANK; width as usize * height as usize],
        }
    }

    pub fn cell(&self, col: u16, line: u16) -> Cell {
        self.cells[line as usize * self.width as usize + col as usize]
    }

    fn set(&mut self, col: i64, line: u16, ch: char, fg: Color) {
        if line >= self.height {
            return;
        }
        let col = col.rem_euclid(self.width as i64) as usize;
        let cell = &mut self.cells[line as usize * self.width as usize + col];
        cell.ch = ch;
        cell.fg = fg;
    }

    fn fill_bg(&mut self, line: u16, bg: Color) {
        if line >= self.height {
            return;
        }
        let start = line as usize * self.width as usize;
        for cell in &mut self.cells[start..start + self.width as usize] {
            cell.bg = bg;
        }
    }

    fn text(&mut self, col: u16, line: u16, s: &str, fg: Color) {
        for (i, ch) in s.chars().enumerate() {
            let c = col as usize + i;
            if c >= self.width as usize {
                break;
            }
            self.set(c as i64, line, ch, fg);
        }
    }

    fn centered(&mut self, line: u16, s: &str, fg: Color) {
        let col = (self.width / 2).saturating_sub(s.chars().count() as u16 / 2);
        self.text(col, line, s, fg);
    }
}

fn col_of(x: f64) -> i64 {
    (x / UNITS_PER_COL).floor() as i64
}

/// First terminal line of the row containing `y`.
fn line_of(y: f64) -> u16 {
    TOP + row_of(y).clamp(0, ROW_COUNT - 1) as u16 * LINES_PER_ROW
}

// ── Composition ──────────────────────────────────────────────────────────────

/// Lay out one snapshot as a character grid.
pub fn compose(state: &GameState) -> Frame {
    let mut frame = Frame::new(COLS, LINES);

    draw_hud(&mut frame, state);

    for strip in &state.background {
        let bg = if strip.kind.is_river() { C_RIVER } else { C_GROUND };
        let line = line_of(strip.center().y);
        for l in line..line + LINES_PER_ROW {
            frame.fill_bg(l, bg);
        }
    }

    for obstacle in &state.obstacles {
        draw_obstacle(&mut frame, obstacle);
    }
    for marker in &state.goal_markers {
        draw_glyph(&mut frame, marker.position, '♦', C_MARKER);
    }
    if let Some(fly) = &state.bonus_entity {
        if fly.status != Status::Hidden {
            draw_glyph(&mut frame, fly.center(), '*', C_FLY);
        }
    }
    draw_glyph(&mut frame, state.actor.position, '@', C_ACTOR);

    match state.phase() {
        Phase::GameOverTerminal => draw_banner(&mut frame, "G A M E   O V E R", C_HUD_LIVES),
        Phase::LevelClearPending => draw_banner(&mut frame, "L E V E L   C L E A R", C_HUD_SCORE),
        _ => {}
    }

    frame.text(
        1,
        LINES - 1,
        "W A S D / arrows : Move   R : Reset   Q : Quit",
        C_HINT,
    );
    frame
}

fn draw_hud(frame: &mut Frame, state: &GameState) {
    frame.text(
        1,
        0,
        &format!("Score:{:>6}  Hi:{:>6}", state.score, state.high_score),
        C_HUD_SCORE,
    );
    frame.centered(
        0,
        &format!("[ LEVEL {} ]  {}/{}", state.level, state.goals_reached, GOAL_COUNT),
        C_HUD_LEVEL,
    );
    let lives = format!("Lives:{}", "♥".repeat(state.lives.max(0) as usize));
    let col = COLS.saturating_sub(lives.chars().count() as u16 + 1);
    frame.text(col, 0, &lives, C_HUD_LIVES);
}

fn draw_obstacle(frame: &mut Frame, obstacle: &Obstacle) {
    let line = line_of(obstacle.center().y);
    let (ch, fg) = match (obstacle.kind, obstacle.status) {
        (ObstacleKind::Goal, _) => {
            for l in line..line + LINES_PER_ROW {
                frame.fill_bg(l, C_GOAL);
            }
            // tile edge
            frame.set(col_of(obstacle.position.x), line, '│', C_HINT);
            frame.set(col_of(obstacle.position.x), line + 1, '│', C_HINT);
            return;
        }
        (ObstacleKind::GroundBlock, _) => ('█', C_GROUND_BLOCK),
        (ObstacleKind::RiverBlock, _) => ('═', C_RIVER_BLOCK),
        (ObstacleKind::Crocodile, Status::Clear) => ('w', C_CROC_CLEAR),
        (ObstacleKind::Crocodile, _) => ('W', C_CROC_DANGER),
        _ => return,
    };

    let first = col_of(obstacle.position.x);
    let span = (obstacle.width / UNITS_PER_COL).round().max(1.0) as i64;
    for col in first..first + span {
        frame.set(col, line, ch, fg);
        frame.set(col, line + 1, ch, fg);
    }
}

fn draw_glyph(frame: &mut Frame, center: Vector, ch: char, fg: Color) {
    let line = line_of(center.y);
    frame.set(col_of(center.x), line, ch, fg);
    frame.set(col_of(center.x), line + 1, ch, fg);
}

fn draw_banner(frame: &mut Frame, msg: &str, fg: Color) {
    let mid = LINES / 2;
    let bar = "═".repeat(msg.chars().count() + 4);
    frame.centered(mid - 1, &bar, fg);
    frame.centered(mid, &format!("  {}  ", msg), fg);
    frame.centered(mid + 1, &bar, fg);
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Draw `state`, writing only the cells that changed since `previous`.
/// Returns the frame now on screen.
pub fn render<W: Write>(
    out: &mut W,
    previous: Option<&Frame>,
    state: &GameState,
) -> std::io::Result<Frame> {
    let frame = compose(state);

    let previous = previous.filter(|p| p.width == frame.width && p.height == frame.height);
    if previous.is_none() {
        out.queue(terminal::Clear(terminal::ClearType::All))?;
    }

    for line in 0..frame.height {
        for col in 0..frame.width {
            let cell = frame.cell(col, line);
            if previous.is_some_and(|p| p.cell(col, line) == cell) {
                continue;
            }
            out.queue(cursor::MoveTo(col, line))?;
            out.queue(style::SetForegroundColor(cell.fg))?;
            out.queue(style::SetBackgroundColor(cell.bg))?;
            out.queue(Print(cell.ch))?;
        }
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, frame.height))?;
    out.flush()?;
    Ok(frame)
}
