//! ANSI truecolor terminal sink.
//!
//! Each terminal row shows two grid rows: the upper half block takes the top
//! pixel as foreground and the bottom pixel as background.

use std::io::{self, Stdout, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};
use lifelight_automaton::{PixelSink, Rgba, RgbaSurface};

const UPPER_HALF: char = '\u{2580}';

/// Draws frames to a terminal. The cursor is hidden while the sink lives.
pub struct TerminalSink<W: Write> {
  out: W,
  frame: RgbaSurface,
}

impl TerminalSink<Stdout> {
  pub fn stdout(width: usize, height: usize) -> io::Result<Self> {
    Self::new(io::stdout(), width, height)
  }
}

impl<W: Write> TerminalSink<W> {
  /// Takes over `out`: hides the cursor and clears the screen.
  pub fn new(mut out: W, width: usize, height: usize) -> io::Result<Self> {
    queue!(out, Hide, Clear(ClearType::All))?;
    out.flush()?;
    Ok(Self {
      out,
      frame: RgbaSurface::new(width, height),
    })
  }

  pub fn frame(&self) -> &RgbaSurface {
    &self.frame
  }
}

fn color(c: Rgba) -> Color {
  Color::Rgb {
    r: c.r,
    g: c.g,
    b: c.b,
  }
}

impl<W: Write> PixelSink for TerminalSink<W> {
  type Error = io::Error;

  fn set(&mut self, x: usize, y: usize, color: Rgba) {
    self.frame.set(x, y, color);
  }

  fn render(&mut self) -> io::Result<()> {
    let (width, height) = (self.frame.width(), self.frame.height());
    queue!(self.out, MoveTo(0, 0))?;

    for y in (0..height).step_by(2) {
      for x in 0..width {
        let top = self.frame[(x, y)];
        let bottom = if y + 1 < height {
          self.frame[(x, y + 1)]
        } else {
          Rgba::BLACK
        };
        queue!(
          self.out,
          SetForegroundColor(color(top)),
          SetBackgroundColor(color(bottom)),
          Print(UPPER_HALF)
        )?;
      }
      queue!(self.out, ResetColor, Print("\r\n"))?;
    }

    self.out.flush()
  }
}

impl<W: Write> Drop for TerminalSink<W> {
  fn drop(&mut self) {
    // Nothing useful to do with a failure here.
    let _ = queue!(self.out, ResetColor, Show);
    let _ = self.out.flush();
  }
}

#[cfg(test)]
mod tests {
  use std::cell::RefCell;
  use std::rc::Rc;

  use super::*;

  /// Writer whose bytes stay readable after the sink is dropped.
  #[derive(Clone, Default)]
  struct Shared(Rc<RefCell<Vec<u8>>>);

  impl Write for Shared {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
      self.0.borrow_mut().extend_from_slice(buf);
      Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
      Ok(())
    }
  }

  impl Shared {
    fn text(&self) -> String {
      String::from_utf8(self.0.borrow().clone()).unwrap()
    }
  }

  struct Broken;

  impl Write for Broken {
    fn write(&mut self, _: &[u8]) -> io::Result<usize> {
      Err(io::Error::other("unplugged"))
    }

    fn flush(&mut self) -> io::Result<()> {
      Ok(())
    }
  }

  #[test]
  fn hides_then_restores_cursor() {
    let buf = Shared::default();
    {
      let _sink = TerminalSink::new(buf.clone(), 2, 2).unwrap();
      assert!(buf.text().contains("\x1b[?25l"));
      assert!(!buf.text().contains("\x1b[?25h"));
    }
    assert!(buf.text().ends_with("\x1b[?25h"));
  }

  #[test]
  fn draws_two_rows_per_line() {
    let buf = Shared::default();
    let mut sink = TerminalSink::new(buf.clone(), 3, 3).unwrap();
    sink.set(0, 0, Rgba::rgb(255, 0, 0));
    sink.set(0, 1, Rgba::rgb(0, 0, 255));
    sink.render().unwrap();

    let text = buf.text();
    assert_eq!(text.matches(UPPER_HALF).count(), 6);
    assert_eq!(text.matches("\r\n").count(), 2);
    assert!(text.contains("\x1b[38;2;255;0;0m\x1b[48;2;0;0;255m"));
  }

  #[test]
  fn ignores_out_of_range_pixels() {
    let mut sink = TerminalSink::new(Shared::default(), 2, 2).unwrap();
    sink.set(5, 5, Rgba::WHITE);
    assert!(sink.frame().as_slice().iter().all(|&c| c == Rgba::default()));
  }

  #[test]
  fn write_errors_propagate() {
    assert!(TerminalSink::new(Broken, 2, 2).is_err());
  }
}
