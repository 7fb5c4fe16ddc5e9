use std::io::{self, Write};
use std::time::Instant;

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::queue;
use crossterm::style::{Attribute, Color, Print, SetAttribute, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};

use crate::app::Model;
use crate::editor::Line;

use super::{EMPTY_LINE_MARKER, status, style};

/// Compose one full frame as a single escape-sequence payload.
///
/// # Errors
///
/// Only fails if writing into the buffer fails, which an in-memory buffer
/// never does.
pub fn render(model: &Model, now: Instant) -> io::Result<Vec<u8>> {
    let mut out = Vec::new();
    queue!(out, Hide, MoveTo(0, 0))?;

    draw_rows(model, &mut out)?;
    draw_status_bar(model, &mut out)?;
    draw_message_bar(model, now, &mut out)?;

    let vp = &model.viewport;
    let x = model.cursor_display_col().saturating_sub(vp.left_col());
    let y = model.cursor.row.saturating_sub(vp.top_row());
    queue!(out, MoveTo(to_u16(x), to_u16(y)), Show)?;
    Ok(out)
}

fn draw_rows(model: &Model, out: &mut Vec<u8>) -> io::Result<()> {
    let vp = &model.viewport;
    let doc = &model.document;
    for y in 0..vp.rows() {
        match doc.line(vp.top_row() + y) {
            Some(line) => draw_line(line, vp.left_col(), vp.cols(), out)?,
            None if doc.is_blank() && y == vp.rows() / 3 => draw_welcome(vp.cols(), out)?,
            None => out.write_all(EMPTY_LINE_MARKER.as_bytes())?,
        }
        queue!(out, Clear(ClearType::UntilNewLine))?;
        out.write_all(b"\r\n")?;
    }
    Ok(())
}

/// Draw the visible slice of one line, switching color only when the
/// category changes.
fn draw_line(line: &Line, left_col: usize, cols: usize, out: &mut Vec<u8>) -> io::Result<()> {
    let display = line.display();
    let start = left_col.min(display.len());
    let end = left_col.saturating_add(cols).min(display.len());
    let mut current: Option<Color> = None;

    for (&byte, &category) in display[start..end].iter().zip(&line.highlight()[start..end]) {
        if byte.is_ascii_control() {
            let symbol = if byte <= 26 { b'@' + byte } else { b'?' };
            queue!(out, SetAttribute(Attribute::Reverse))?;
            out.write_all(&[symbol])?;
            queue!(out, SetAttribute(Attribute::Reset))?;
            if let Some(color) = current {
                queue!(out, SetForegroundColor(color))?;
            }
            continue;
        }
        let color = style::color_for(category);
        if color != current {
            queue!(out, SetForegroundColor(color.unwrap_or(Color::Reset)))?;
            current = color;
        }
        out.write_all(&[byte])?;
    }
    queue!(out, SetForegroundColor(Color::Reset))?;
    Ok(())
}

fn draw_welcome(cols: usize, out: &mut Vec<u8>) -> io::Result<()> {
    let banner = format!("ctek: Version {}", env!("CARGO_PKG_VERSION"));
    let shown = banner.len().min(cols);
    let mut margin = (cols - shown) / 2;
    if margin > 0 {
        out.write_all(EMPTY_LINE_MARKER.as_bytes())?;
        margin -= 1;
    }
    out.extend(std::iter::repeat_n(b' ', margin));
    out.write_all(&banner.as_bytes()[..shown])
}

fn draw_status_bar(model: &Model, out: &mut Vec<u8>) -> io::Result<()> {
    let text = status::status_text(model, model.viewport.cols());
    queue!(
        out,
        SetAttribute(Attribute::Reverse),
        Print(text),
        SetAttribute(Attribute::Reset)
    )?;
    out.write_all(b"\r\n")
}

fn draw_message_bar(model: &Model, now: Instant, out: &mut Vec<u8>) -> io::Result<()> {
    let text = status::message_text(model, now, model.viewport.cols());
    queue!(out, Clear(ClearType::UntilNewLine), Print(text))
}

fn to_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}
