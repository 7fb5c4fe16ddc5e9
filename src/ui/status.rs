use std::time::Instant;

use crate::app::Model;

/// Text of the status bar, exactly `cols` characters wide.
pub fn status_text(model: &Model, cols: usize) -> String {
    let doc = &model.document;
    let modified = if doc.is_dirty() { " (modified)" } else { "" };
    let left = format!(
        "{} lines from {}{modified}",
        doc.line_count(),
        model.display_name()
    );
    let right = format!("{} | {}", model.cursor.row + 1, doc.line_count());
    compose_status(&left, &right, cols)
}

/// Lay out `left` and `right` on one line of `cols` characters.
///
/// The left text wins: it is cut to fit first, then the right text is cut
/// to whatever space remains and pushed flush against the right edge.
pub fn compose_status(left: &str, right: &str, cols: usize) -> String {
    let left: String = left.chars().take(cols).collect();
    let left_len = left.chars().count();
    let room = cols - left_len;
    let right: String = right.chars().take(room).collect();
    let gap = room - right.chars().count();

    let mut line = String::with_capacity(cols);
    line.push_str(&left);
    line.extend(std::iter::repeat_n(' ', gap));
    line.push_str(&right);
    line
}

/// Text of the message line: the open prompt, else the live status message.
pub fn message_text(model: &Model, now: Instant, cols: usize) -> String {
    let text = match &model.prompt {
        Some(prompt) => prompt.text(),
        None => model.active_message(now).unwrap_or_default().to_string(),
    };
    text.chars().take(cols).collect()
}
