/// Presentation layer: double-buffered, diff-based terminal renderer.
///
/// Each frame is composed into the `front` buffer, compared cell by cell
/// against the `back` buffer (previous frame), and only the changed cells
/// are emitted as terminal commands, batched with `queue!` and flushed
/// once. Full-screen redraws (and their flicker) only happen on resize or
/// phase change.
///
/// The renderer reads `&WorldState` and never mutates game state, so
/// composing the same state twice yields identical frames.

use std::io::{self, BufWriter, Write};

use crossterm::{
    cursor::{self, MoveTo},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};

use crate::domain::grid::{GRID_HEIGHT, GRID_WIDTH};
use crate::sim::world::{Phase, WorldState};

// ── Cell: the unit of the back-buffer ──

#[derive(Clone, Copy, PartialEq, Eq)]
struct Cell {
    ch: char,
    fg: Color,
    bg: Color,
}

impl Cell {
    /// Explicit dark background for every "empty" terminal cell, so the
    /// inter-row gap pixels match the cell color on VTE terminals.
    const BASE_BG: Color = Color::Rgb { r: 14, g: 18, b: 14 };

    const BLANK: Cell = Cell { ch: ' ', fg: Color::White, bg: Cell::BASE_BG };

    /// Sentinel used to invalidate the back buffer: differs from any real
    /// cell, forcing a full repaint on the next diff.
    const INVALID: Cell = Cell { ch: '?', fg: Color::Magenta, bg: Color::Magenta };

    fn new(ch: char, fg: Color, bg: Color) -> Self {
        Cell { ch, fg, bg }
    }
}

// ── FrameBuffer: a 2D grid of Cells ──

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

    fn put_str(&mut self, x: usize, y: usize, s: &str, fg: Color, bg: Color) {
        let mut cx = x;
        for ch in s.chars() {
            if cx >= self.width { break; }
            self.set(cx, y, Cell::new(ch, fg, bg));
            cx += 1;
        }
    }

    fn fill_row(&mut self, y: usize, fg: Color, bg: Color) {
        for x in 0..self.width {
            self.set(x, y, Cell::new(' ', fg, bg));
        }
    }
}

// ── Renderer ──

/// Each game cell occupies 2 terminal columns so cells look square.
const CELL_W: usize = 2;

/// Vertical layout: HUD, then the bordered grid, then the help bar.
const HUD_ROW: usize = 0;
const GRID_ROW: usize = 2;

/// Columns needed: grid plus one border column on each side.
const MIN_COLS: usize = GRID_WIDTH as usize * CELL_W + 2;
/// Rows needed: HUD + border + grid + border + help.
const MIN_ROWS: usize = GRID_ROW + GRID_HEIGHT as usize + 3;

const HUD_BG: Color = Color::Rgb { r: 20, g: 40, b: 20 };
const BORDER_FG: Color = Color::Rgb { r: 90, g: 110, b: 90 };
const FOOD_FG: Color = Color::Rgb { r: 230, g: 70, b: 70 };

pub struct Renderer {
    writer: BufWriter<io::Stdout>,
    front: FrameBuffer,
    back: FrameBuffer,
    term_w: usize,
    term_h: usize,
    last_phase: Option<Phase>,
}

impl Renderer {
    pub fn new() -> Self {
        Renderer {
            writer: BufWriter::with_capacity(16384, io::stdout()),
            front: FrameBuffer::new(0, 0),
            back: FrameBuffer::new(0, 0),
            term_w: 0,
            term_h: 0,
            last_phase: None,
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
        self.term_w = tw as usize;
        self.term_h = th as usize;
        self.front.resize(self.term_w, self.term_h);
        self.back.resize(self.term_w, self.term_h);
        // Force full repaint on the first frame.
        self.back.cells.fill(Cell::INVALID);

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

    pub fn render(&mut self, world: &WorldState) -> io::Result<()> {
        // Detect terminal resize
        let (tw, th) = terminal::size().unwrap_or((80, 24));
        if tw as usize != self.term_w || th as usize != self.term_h {
            self.term_w = tw as usize;
            self.term_h = th as usize;
            self.front.resize(self.term_w, self.term_h);
            self.back.resize(self.term_w, self.term_h);
            self.back.cells.fill(Cell::INVALID);
            queue!(self.writer, SetBackgroundColor(Cell::BASE_BG), Clear(ClearType::All))?;
        }

        // Phase change → clear for a clean transition
        if self.last_phase != Some(world.phase) {
            self.back.cells.fill(Cell::INVALID);
            queue!(self.writer, SetBackgroundColor(Cell::BASE_BG), Clear(ClearType::All))?;
            self.last_phase = Some(world.phase);
        }

        self.front.clear();

        if self.term_w < MIN_COLS || self.term_h < MIN_ROWS {
            self.compose_too_small();
        } else {
            match world.phase {
                Phase::Title => self.compose_title(world),
                Phase::Playing => self.compose_game(world),
                Phase::GameOver => {
                    // Final frame stays visible under the modal.
                    self.compose_game(world);
                    self.compose_game_over(world);
                }
            }
        }

        self.flush_diff()?;
        std::mem::swap(&mut self.front, &mut self.back);

        Ok(())
    }

    // ── Diff flush: only write changed cells ──

    fn flush_diff(&mut self) -> io::Result<()> {
        let mut last_fg = Color::White;
        let mut last_bg = Cell::BASE_BG;
        let mut need_move = true;
        let mut last_x: usize = 0;
        let mut last_y: usize = 0;

        queue!(
            self.writer,
            SetForegroundColor(Color::White),
            SetBackgroundColor(Cell::BASE_BG),
        )?;

        for y in 0..self.front.height {
            for x in 0..self.front.width {
                let cell = self.front.get(x, y);
                if cell == self.back.get(x, y) {
                    need_move = true;
                    continue;
                }

                if need_move || x != last_x + 1 || y != last_y {
                    queue!(self.writer, MoveTo(x as u16, y as u16))?;
                    need_move = false;
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

                last_x = x;
                last_y = y;
            }
        }

        self.writer.flush()
    }

    // ── Compose: build front buffer content ──

    /// Left column where the grid's border begins (grid centered).
    fn grid_origin(&self) -> usize {
        (self.term_w - MIN_COLS) / 2
    }

    fn compose_game(&mut self, w: &WorldState) {
        let ox = self.grid_origin();

        // ── HUD row ──
        let hud = format!(" PLAYER {:<16}  SCORE {:<6}", w.player_name, w.score);
        self.front.fill_row(HUD_ROW, Color::White, HUD_BG);
        self.front.put_str(ox, HUD_ROW, &hud, Color::White, HUD_BG);

        // ── Border ──
        let grid_cols = GRID_WIDTH as usize * CELL_W;
        let top = GRID_ROW - 1;
        let bottom = GRID_ROW + GRID_HEIGHT as usize;
        let horiz: String = "─".repeat(grid_cols);
        self.front.put_str(ox, top, "┌", BORDER_FG, Cell::BASE_BG);
        self.front.put_str(ox + 1, top, &horiz, BORDER_FG, Cell::BASE_BG);
        self.front.put_str(ox + 1 + grid_cols, top, "┐", BORDER_FG, Cell::BASE_BG);
        self.front.put_str(ox, bottom, "└", BORDER_FG, Cell::BASE_BG);
        self.front.put_str(ox + 1, bottom, &horiz, BORDER_FG, Cell::BASE_BG);
        self.front.put_str(ox + 1 + grid_cols, bottom, "┘", BORDER_FG, Cell::BASE_BG);
        for gy in 0..GRID_HEIGHT as usize {
            self.front.put_str(ox, GRID_ROW + gy, "│", BORDER_FG, Cell::BASE_BG);
            self.front.put_str(ox + 1 + grid_cols, GRID_ROW + gy, "│", BORDER_FG, Cell::BASE_BG);
        }

        // ── Food ──
        if let Some(food) = w.food {
            self.put_game_cell(ox, food.x, food.y, FOOD_FG);
        }

        // ── Snake, head-to-tail gradient ──
        let len = w.snake.len();
        for (idx, cell) in w.snake.cells().enumerate() {
            self.put_game_cell(ox, cell.x, cell.y, segment_color(idx, len));
        }

        // ── Help bar ──
        let help = " Move: Arrows / WASD    ESC: Title    Ctrl-C: Quit";
        self.front.put_str(ox, bottom + 1, help, Color::DarkGrey, Cell::BASE_BG);
    }

    /// Paint game cell (gx, gy) as a colored block, 2 terminal columns wide.
    fn put_game_cell(&mut self, ox: usize, gx: i32, gy: i32, fg: Color) {
        let col = ox + 1 + gx as usize * CELL_W;
        let row = GRID_ROW + gy as usize;
        self.front.set(col, row, Cell::new('█', fg, Cell::BASE_BG));
        self.front.set(col + 1, row, Cell::new('█', fg, Cell::BASE_BG));
    }

    // ── Static screens ──

    fn compose_title(&mut self, w: &WorldState) {
        let title = [
            r" __      __                  _____             _        ",
            r" \ \    / /___ ___ _ _ __   / ____| _ _   __ _ | |__ ___ ",
            r"  \ \/\/ // -_)/ _ \ '_/ _\ \___ \ | ' \ / _` || / // -_)",
            r"   \_/\_/ \___|\___/_| |_|  |____/ |_||_|\__,_||_\_\\___|",
        ];
        let ox = self.grid_origin() + 8;

        for (i, line) in title.iter().enumerate() {
            self.front.put_str(ox, 2 + i, line, Color::Rgb { r: 80, g: 220, b: 80 }, Cell::BASE_BG);
        }

        let subtitle = "a snake on a wraparound grid";
        self.front.put_str(ox + 14, 7, subtitle, Color::Rgb { r: 180, g: 180, b: 120 }, Cell::BASE_BG);

        // ── Name field ──
        let base = 10;
        self.front.put_str(ox + 4, base, "Player name:", Color::White, Cell::BASE_BG);
        let field = format!(" {:<16} ", format!("{}▏", w.name_input));
        self.front.put_str(ox + 17, base, &field, Color::White, Color::Rgb { r: 35, g: 45, b: 35 });
        let hint = "(blank = Player)";
        self.front.put_str(ox + 36, base, hint, Color::DarkGrey, Cell::BASE_BG);

        // ── Menu ──
        let hi = Color::Rgb { r: 80, g: 255, b: 80 };
        self.front.put_str(ox + 4, base + 3, "ENTER   Start", hi, Cell::BASE_BG);
        self.front.put_str(ox + 4, base + 4, "ESC     Quit", Color::White, Cell::BASE_BG);

        // ── Controls reference ──
        let help = [
            "Controls",
            "  Arrows / WASD   steer the snake",
            "  Eat food to grow; the edges wrap around.",
            "  Running into yourself ends the game.",
        ];
        for (i, line) in help.iter().enumerate() {
            let color = if i == 0 { Color::Rgb { r: 200, g: 200, b: 120 } } else { Color::White };
            self.front.put_str(ox + 4, base + 6 + i, line, color, Cell::BASE_BG);
        }
    }

    fn compose_game_over(&mut self, w: &WorldState) {
        let dim = Color::Rgb { r: 35, g: 35, b: 35 };
        let box_w = 40_usize;
        let box_h = 7_usize;
        let box_x = (self.term_w.saturating_sub(box_w)) / 2;
        let box_y = GRID_ROW + (GRID_HEIGHT as usize).saturating_sub(box_h) / 2;

        for y in box_y..box_y + box_h {
            for x in box_x..box_x + box_w {
                self.front.set(x, y, Cell::new(' ', Color::White, dim));
            }
        }

        let red = Color::Rgb { r: 255, g: 70, b: 70 };
        self.front.put_str(box_x + 9, box_y + 1, "╔═ GAME  OVER ═╗", red, dim);

        let nx = box_x + (box_w.saturating_sub(w.player_name.chars().count())) / 2;
        self.front.put_str(nx, box_y + 3, &w.player_name, Color::White, dim);

        let score_line = format!("Final score: {}", w.score);
        let sx = box_x + (box_w.saturating_sub(score_line.len())) / 2;
        self.front.put_str(sx, box_y + 4, &score_line, Color::Rgb { r: 255, g: 220, b: 80 }, dim);

        self.front.put_str(box_x + 7, box_y + 6, "ENTER / ESC: Back to Title", Color::Rgb { r: 80, g: 255, b: 80 }, dim);
    }

    fn compose_too_small(&mut self) {
        let msg = format!("Terminal too small: need {}x{}", MIN_COLS, MIN_ROWS);
        let y = self.term_h / 2;
        let x = self.term_w.saturating_sub(msg.len()) / 2;
        self.front.put_str(x, y, &msg, Color::Rgb { r: 255, g: 200, b: 50 }, Cell::BASE_BG);
    }
}

/// Lightness interpolated from a dark head to a light tail,
/// proportional to segment index over total length.
fn segment_color(idx: usize, len: usize) -> Color {
    let t = idx as f32 / len.max(1) as f32;
    let lerp = |a: f32, b: f32| (a + (b - a) * t) as u8;
    Color::Rgb {
        r: lerp(12.0, 130.0),
        g: lerp(130.0, 240.0),
        b: lerp(35.0, 150.0),
    }
}
