/// Presentation layer: double-buffered, diff-based terminal renderer.
///
/// How it works:
///   1. Build the next frame into `front` buffer (array of Cell)
///   2. Compare each cell with `back` buffer (previous frame)
///   3. Only emit terminal commands for cells that changed
///   4. All commands are batched with `queue!`, flushed once at the end
///   5. Swap front/back
///
/// The renderer only ever reads a `Snapshot`; it never touches game state.

use std::io::{self, BufWriter, Write};

use crossterm::{
    cursor::{self, MoveTo},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};

use crate::domain::grid::GRID_SIZE;
use crate::domain::tile::{BlockType, Resource};
use crate::sim::progression::{PHASE1_STONE, PHASE1_WOOD, PHASE2_DIAMOND};
use crate::sim::world::{GameStatus, Phase, Snapshot};

// ── Cell: the unit of the back-buffer ──

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
struct Cell {
    ch: char,
    fg: Color,
    bg: Color,
}

impl Cell {
    /// Explicit dark background for every cell outside the map, so the
    /// terminal's own default never shows through.
    const BASE_BG: Color = Color::Rgb { r: 22, g: 22, b: 35 };

    const BLANK: Cell = Cell { ch: ' ', fg: Color::White, bg: Cell::BASE_BG };

    /// Sentinel cell used to invalidate the back buffer.
    const INVALID: Cell = Cell { ch: '?', fg: Color::Magenta, bg: Color::Magenta };

    fn new(ch: char, fg: Color, bg: Color) -> Self {
        Cell { ch, fg, bg }
    }
}

// ── FrameBuffer: a 2D grid of Cells ──

#[derive(Clone)]
struct FrameBuffer {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    fn new(w: usize, h: usize) -> Self {
        FrameBuffer { width: w, height: h, cells: vec![Cell::BLANK; w * h] }
    }

    fn resize(&mut self, w: usize, h: usize) {
        if self.width != w || self.height != h {
            self.width = w;
            self.height = h;
            self.cells = vec![Cell::BLANK; w * h];
        }
    }

    fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
    }

    fn set(&mut self, x: usize, y: usize, cell: Cell) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = cell;
        }
    }

    fn get(&self, x: usize, y: usize) -> Cell {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x]
        } else {
            Cell::BLANK
        }
    }

    /// Write a string at (x, y). Each char occupies 1 column.
    fn put_str(&mut self, x: usize, y: usize, s: &str, fg: Color, bg: Color) {
        for (i, ch) in s.chars().enumerate() {
            if x + i >= self.width { break; }
            self.set(x + i, y, Cell::new(ch, fg, bg));
        }
    }

    /// Framed box with the given lines, centered on the map area.
    fn put_box(&mut self, lines: &[&str], fg: Color, bg: Color) {
        let inner = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) + 4;
        let h = lines.len() + 4;
        let left = self.width.saturating_sub(inner + 2) / 2;
        let top = (MAP_ROW + GRID_SIZE / 2).saturating_sub(h / 2);

        for dy in 0..h {
            let y = top + dy;
            let edge = dy == 0 || dy + 1 == h;
            for dx in 0..inner + 2 {
                let ch = match (edge, dx == 0 || dx == inner + 1) {
                    (true, true) => '+',
                    (true, false) => '-',
                    (false, true) => '|',
                    (false, false) => ' ',
                };
                self.set(left + dx, y, Cell::new(ch, fg, bg));
            }
        }
        for (i, line) in lines.iter().enumerate() {
            let len = line.chars().count();
            let x = left + 1 + (inner - len) / 2;
            self.put_str(x, top + 2 + i, line, fg, bg);
        }
    }
}

// ── Layout ──

/// Each grid cell is 2 terminal columns wide.
const CELL_W: usize = 2;

const HUD_ROW: usize = 0;
const INV_ROW: usize = 1;
const MAP_ROW: usize = 3;
const MAP_COL: usize = 2;
const MSG_ROW: usize = MAP_ROW + GRID_SIZE + 1;
const HELP_ROW: usize = MSG_ROW + 1;

const HELP: &str = "WASD/Arrows move   Space mine   R play again (after win)   Esc quit";

/// Glyph pair + colors for one block.
fn block_style(kind: BlockType) -> ([char; 2], Color, Color) {
    match kind {
        BlockType::Grass => (['"', '"'], Color::Rgb { r: 170, g: 230, b: 120 }, Color::Rgb { r: 40, g: 150, b: 50 }),
        BlockType::Dirt => (['.', '.'], Color::Rgb { r: 90, g: 55, b: 20 }, Color::Rgb { r: 140, g: 85, b: 35 }),
        BlockType::Stone => ([':', ':'], Color::Rgb { r: 70, g: 70, b: 75 }, Color::Rgb { r: 120, g: 120, b: 125 }),
        BlockType::Wood => (['|', '|'], Color::Rgb { r: 90, g: 50, b: 10 }, Color::Rgb { r: 180, g: 120, b: 50 }),
        BlockType::Diamond => (['<', '>'], Color::Rgb { r: 230, g: 255, b: 255 }, Color::Rgb { r: 30, g: 170, b: 210 }),
        BlockType::Lava => (['~', '~'], Color::Rgb { r: 255, g: 220, b: 60 }, Color::Rgb { r: 220, g: 70, b: 10 }),
        BlockType::Empty => ([' ', ' '], Color::White, Color::Rgb { r: 110, g: 180, b: 230 }),
    }
}

pub struct Renderer {
    writer: BufWriter<io::Stdout>,
    front: FrameBuffer,
    back: FrameBuffer,
    term_w: usize,
    term_h: usize,
}

impl Renderer {
    pub fn new() -> Self {
        Renderer {
            writer: BufWriter::with_capacity(16384, io::stdout()),
            front: FrameBuffer::new(0, 0),
            back: FrameBuffer::new(0, 0),
            term_w: 0,
            term_h: 0,
        }
    }

    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.writer,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            SetBackgroundColor(Cell::BASE_BG),
            Clear(ClearType::All)
        )?;

        let (tw, th) = terminal::size().unwrap_or((80, 24));
        self.resize(tw as usize, th as usize);
        Ok(())
    }

    pub fn cleanup(&mut self) -> io::Result<()> {
        execute!(
            self.writer,
            ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()
    }

    fn resize(&mut self, w: usize, h: usize) {
        self.term_w = w;
        self.term_h = h;
        self.front.resize(w, h);
        self.back.resize(w, h);
        // Force full repaint: back ≠ front for every cell.
        self.back.cells.fill(Cell::INVALID);
    }

    /// Draw the latest snapshot plus a one-line status message.
    pub fn render(&mut self, snap: &Snapshot, message: &str) -> io::Result<()> {
        let (tw, th) = terminal::size().unwrap_or((80, 24));
        if tw as usize != self.term_w || th as usize != self.term_h {
            self.resize(tw as usize, th as usize);
            queue!(self.writer, SetBackgroundColor(Cell::BASE_BG), Clear(ClearType::All))?;
        }

        self.compose(snap, message);
        self.flush_diff()?;
        std::mem::swap(&mut self.front, &mut self.back);
        Ok(())
    }

    /// Draw a modal box over the last frame.
    /// The next `render` repaints whatever the box covered.
    pub fn show_dialog(&mut self, message: &str, hint: &str) -> io::Result<()> {
        self.front = self.back.clone();
        self.front.put_box(&[message, "", hint], Color::Black, Color::Rgb { r: 250, g: 250, b: 250 });
        self.flush_diff()?;
        std::mem::swap(&mut self.front, &mut self.back);
        Ok(())
    }

    // ── Diff flush: only write changed cells ──

    fn flush_diff(&mut self) -> io::Result<()> {
        let mut last_fg = Color::White;
        let mut last_bg = Cell::BASE_BG;
        let mut cursor_at: Option<(usize, usize)> = None;

        queue!(self.writer,
            SetForegroundColor(Color::White),
            SetBackgroundColor(Cell::BASE_BG),
        )?;

        for y in 0..self.front.height {
            for x in 0..self.front.width {
                let cell = self.front.get(x, y);
                if cell == self.back.get(x, y) {
                    continue;
                }

                if cursor_at != Some((x, y)) {
                    queue!(self.writer, MoveTo(x as u16, y as u16))?;
                }
                if cell.fg != last_fg {
                    queue!(self.writer, SetForegroundColor(cell.fg))?;
                    last_fg = cell.fg;
                }
                if cell.bg != last_bg {
                    queue!(self.writer, SetBackgroundColor(cell.bg))?;
                    last_bg = cell.bg;
                }
                queue!(self.writer, Print(cell.ch))?;
                cursor_at = Some((x + 1, y));
            }
        }

        self.writer.flush()
    }

    // ── Compose: build front buffer content ──

    fn compose(&mut self, snap: &Snapshot, message: &str) {
        self.front.clear();
        self.compose_hud(snap);
        self.compose_map(snap);

        self.front.put_str(MAP_COL, MSG_ROW, message, Color::Yellow, Cell::BASE_BG);
        self.front.put_str(MAP_COL, HELP_ROW, HELP, Color::DarkGrey, Cell::BASE_BG);

        if snap.status == GameStatus::Won {
            self.front.put_box(
                &[
                    "Congratulations!",
                    "You completed both phases of MiniCraft!",
                    "",
                    "[R] Play again     [Esc] Quit",
                ],
                Color::White,
                Color::Rgb { r: 230, g: 140, b: 20 },
            );
        }
    }

    fn compose_hud(&mut self, snap: &Snapshot) {
        let title = format!(" MiniCraft   Phase {} - {} ", snap.phase.number(), snap.phase.goal_text());
        self.front.put_str(MAP_COL, HUD_ROW, &title, Color::White, Cell::BASE_BG);

        let inv = &snap.inventory;
        let (wood, stone, diamond) = (
            inv.count(Resource::Wood),
            inv.count(Resource::Stone),
            inv.count(Resource::Diamond),
        );
        let line = match snap.phase {
            Phase::Phase1 => format!(
                " Wood: {}/{}   Stone: {}/{}   Diamond: {} ",
                wood, PHASE1_WOOD, stone, PHASE1_STONE, diamond,
            ),
            Phase::Phase2 => format!(
                " Wood: {}   Stone: {}   Diamond: {}/{} ",
                wood, stone, diamond, PHASE2_DIAMOND,
            ),
        };
        self.front.put_str(MAP_COL, INV_ROW, &line, Color::Rgb { r: 200, g: 200, b: 210 }, Cell::BASE_BG);
    }

    fn compose_map(&mut self, snap: &Snapshot) {
        let border = Color::Rgb { r: 80, g: 80, b: 100 };
        let right = MAP_COL + GRID_SIZE * CELL_W + 1;
        for row in 0..GRID_SIZE + 2 {
            let y = MAP_ROW - 1 + row;
            let edge = row == 0 || row == GRID_SIZE + 1;
            if edge {
                for x in MAP_COL - 1..=right {
                    let ch = if x == MAP_COL - 1 || x == right { '+' } else { '-' };
                    self.front.set(x, y, Cell::new(ch, border, Cell::BASE_BG));
                }
            } else {
                self.front.set(MAP_COL - 1, y, Cell::new('|', border, Cell::BASE_BG));
                self.front.set(right, y, Cell::new('|', border, Cell::BASE_BG));
            }
        }

        for (gy, row) in snap.grid.rows().enumerate() {
            for (gx, block) in row.iter().enumerate() {
                let (glyph, fg, bg) = if snap.player.pos() == (gx, gy) {
                    (['(', ')'], Color::White, Color::Rgb { r: 40, g: 80, b: 200 })
                } else {
                    block_style(block.kind)
                };
                let col = MAP_COL + gx * CELL_W;
                for (i, ch) in glyph.into_iter().enumerate() {
                    self.front.set(col + i, MAP_ROW + gy, Cell::new(ch, fg, bg));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::grid::Grid;
    use crate::sim::world::GameState;

    fn renderer() -> Renderer {
        let mut r = Renderer::new();
        r.front.resize(80, 24);
        r.back.resize(80, 24);
        r
    }

    fn row_text(buf: &FrameBuffer, y: usize) -> String {
        (0..buf.width).map(|x| buf.get(x, y).ch).collect()
    }

    #[test]
    fn hud_shows_phase_goal_and_progress() {
        let mut r = renderer();
        let mut state = GameState::new(Phase::Phase1, Grid::from_rows(&[]));
        state.inventory.wood = 2;
        r.compose(&state.snapshot(), "hello");
        assert!(row_text(&r.front, HUD_ROW).contains("Phase 1 - Collect 5 wood and 3 stone"));
        assert!(row_text(&r.front, INV_ROW).contains("Wood: 2/5"));
        assert!(row_text(&r.front, MSG_ROW).contains("hello"));
    }

    #[test]
    fn player_and_blocks_land_in_their_cells() {
        let mut r = renderer();
        let state = GameState::new(Phase::Phase2, Grid::from_rows(&["*~"]));
        r.compose(&state.snapshot(), "");
        // player at (5, 1)
        let px = MAP_COL + 5 * CELL_W;
        assert_eq!(r.front.get(px, MAP_ROW + 1).ch, '(');
        assert_eq!(r.front.get(px + 1, MAP_ROW + 1).ch, ')');
        assert_eq!(r.front.get(MAP_COL, MAP_ROW).ch, '<');
        assert_eq!(r.front.get(MAP_COL + CELL_W, MAP_ROW).ch, '~');
    }

    #[test]
    fn win_banner_only_when_won() {
        let mut r = renderer();
        let mut state = GameState::new(Phase::Phase2, Grid::from_rows(&[]));
        r.compose(&state.snapshot(), "");
        let screen: String = (0..24).map(|y| row_text(&r.front, y)).collect();
        assert!(!screen.contains("Congratulations"));

        state.status = GameStatus::Won;
        r.compose(&state.snapshot(), "");
        let screen: String = (0..24).map(|y| row_text(&r.front, y)).collect();
        assert!(screen.contains("Congratulations!"));
        assert!(screen.contains("[R] Play again"));
    }
}
