//! Crossterm front-end: input mapping and board drawing.

use std::io::{self, Stdout, Write};
use std::time::Duration;

use crossterm::{
    cursor, execute,
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind, MouseButton, MouseEventKind},
    queue,
    style::{Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};

use wayviz_core::Point;

use crate::colors;
use crate::model::{Msg, VizModel};

// Screen layout: title, notice line, then the board; 2 columns per cell so
// cells come out roughly square.
const BOARD_X: u16 = 1;
const BOARD_Y: u16 = 2;
const CELL_W: u16 = 2;

/// Largest board for which per-cell search info is still shown (so the
/// costs stay readable).
const SEARCH_INFO_MAX_SIZE: i32 = 12;

/// Terminal session. Restores the terminal on drop.
pub struct Term {
    out: Stdout,
    restored: bool,
}

impl Term {
    /// Enter raw mode, the alternate screen, and mouse capture.
    pub fn new() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut out = io::stdout();
        execute!(
            out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            EnableMouseCapture
        )?;
        Ok(Self {
            out,
            restored: false,
        })
    }

    /// Undo `new`. Idempotent.
    pub fn restore(&mut self) {
        if self.restored {
            return;
        }
        self.restored = true;
        let _ = execute!(
            self.out,
            DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }

    /// Wait up to `timeout` for one input message.
    ///
    /// Returns `None` on timeout and for events this app has no use for.
    pub fn poll(&mut self, timeout: Duration) -> io::Result<Option<Msg>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        let msg = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => Some(Msg::Key(key.code)),
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Down(MouseButton::Left) => cell_at(mouse.column, mouse.row),
                _ => None,
            },
            _ => None,
        };
        Ok(msg)
    }

    /// Draw the whole screen from the model.
    pub fn draw(&mut self, model: &VizModel) -> io::Result<()> {
        let viz = model.viz();
        let graph = viz.graph();
        let selection = viz.selection();
        let size = graph.size();

        queue!(self.out, terminal::Clear(ClearType::All), ResetColor)?;

        // Title.
        queue!(
            self.out,
            cursor::MoveTo(BOARD_X, 0),
            SetForegroundColor(colors::FG),
            Print("wayviz"),
            SetForegroundColor(colors::FG_DIM),
            Print(if viz.is_walking() { "  [walking]" } else { "" }),
        )?;

        // Notice line; a new notice always displaces the previous one.
        if let Some(notice) = viz.notice() {
            queue!(
                self.out,
                cursor::MoveTo(BOARD_X, 1),
                SetForegroundColor(colors::FG_NOTICE),
                Print(notice.to_string()),
            )?;
        }

        // Board.
        for y in 0..size {
            queue!(
                self.out,
                cursor::MoveTo(BOARD_X, BOARD_Y + y as u16),
                ResetColor
            )?;
            for x in 0..size {
                let p = Point::new(x, y);
                let Some(cell) = graph.at(p) else { continue };
                let bg = colors::cell_bg(
                    cell,
                    selection.start() == Some(p),
                    selection.end() == Some(p),
                );
                queue!(self.out, SetBackgroundColor(bg), Print("  "))?;
            }
            queue!(self.out, ResetColor)?;
        }

        self.draw_panel(model)?;

        // Selection status under the board.
        let status_y = BOARD_Y + size as u16 + 1;
        let status = match (selection.start(), selection.end()) {
            (None, _) => "click a road cell to set the start".to_string(),
            (Some(s), None) => format!("start {s} - click another road cell to walk"),
            (Some(s), Some(e)) => format!("start {s}  end {e}"),
        };
        queue!(
            self.out,
            cursor::MoveTo(BOARD_X, status_y),
            SetForegroundColor(colors::FG_DIM),
            Print(status),
            ResetColor
        )?;

        self.out.flush()
    }

    /// Option panel to the right of the board: pending config, key hints,
    /// and (when enabled) the current frame's neighbour costs.
    fn draw_panel(&mut self, model: &VizModel) -> io::Result<()> {
        let viz = model.viz();
        let pending = model.pending();
        let panel_x = BOARD_X + viz.graph().size() as u16 * CELL_W + 3;
        let mut y = BOARD_Y;

        let line = |out: &mut Stdout, y: u16, text: String| -> io::Result<()> {
            queue!(
                out,
                cursor::MoveTo(panel_x, y),
                SetForegroundColor(colors::FG_DIM),
                Print(text)
            )
        };

        line(&mut self.out, y, format!("size  {0}x{0}  (+/-)", pending.grid_size))?;
        y += 1;
        line(
            &mut self.out,
            y,
            format!("walls {:.0}%  ([/])", pending.wall_frequency * 100.0),
        )?;
        y += 1;
        line(&mut self.out, y, format!("diagonal {}  (d)", on_off(pending.diagonal)))?;
        y += 1;
        line(&mut self.out, y, format!("closest  {}  (c)", on_off(pending.closest)))?;
        y += 1;
        line(
            &mut self.out,
            y,
            format!("info     {}  (i)", on_off(pending.show_search_info)),
        )?;
        y += 1;
        line(&mut self.out, y, format!("trace    {}  (t)", on_off(pending.show_trace)))?;
        y += 1;
        line(&mut self.out, y, format!("rate     {}  (1-5)", pending.rate))?;
        y += 2;
        line(&mut self.out, y, "g generate   q quit".to_string())?;

        // Per-frame search info, kept to small boards.
        let config = viz.config();
        if config.show_search_info && config.grid_size <= SEARCH_INFO_MAX_SIZE {
            if let Some(frame) = viz.current_frame() {
                y += 2;
                line(&mut self.out, y, format!("expanding {}", frame.current))?;
                for n in frame.neighbors.iter().take(8) {
                    y += 1;
                    line(
                        &mut self.out,
                        y,
                        format!("{}  f={:.1} g={:.1} h={:.1}", n.pos, n.f, n.g, n.h),
                    )?;
                }
            }
        }
        Ok(())
    }
}

impl Drop for Term {
    fn drop(&mut self) {
        self.restore();
    }
}

fn on_off(v: bool) -> &'static str {
    if v { "on " } else { "off" }
}

/// Map a screen position to a board coordinate. Clicks left or above the
/// board are dropped here; clicks past the far edge resolve to off-board
/// coordinates the core already ignores.
fn cell_at(column: u16, row: u16) -> Option<Msg> {
    if column < BOARD_X || row < BOARD_Y {
        return None;
    }
    let x = i32::from((column - BOARD_X) / CELL_W);
    let y = i32::from(row - BOARD_Y);
    Some(Msg::Click(Point::new(x, y)))
}
