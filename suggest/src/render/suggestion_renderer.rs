// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Draws a suggestion after the cursor without moving it, and erases it again.
//!
//! The suggestion may wrap over several rows. If the cursor is close to the bottom of
//! the screen the terminal scrolls while the suggestion is written, so the row the
//! cursor has to go back to is adjusted by the number of rows that scrolled off.

use std::io;

use super::{CursorPos, RenderState, TerminalOps};
use crate::{SgrColor, StringLength};

/// Drawn in front of a suggestion that replaces the typed word rather than completing
/// it.
pub const REPLACEMENT_MARKER: &str = "> ";

/// Blank columns between the typed word and [`REPLACEMENT_MARKER`].
pub const REPLACEMENT_GAP: u16 = 2;

#[derive(Debug, Clone, Copy)]
pub struct RenderRequest<'a> {
    pub text: &'a str,
    pub color: &'a SgrColor,
    /// Draw the gap and [`REPLACEMENT_MARKER`] in this color before the text.
    pub marker: Option<&'a SgrColor>,
    /// The color the user's input should continue in.
    pub restore_color: Option<&'a SgrColor>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    Printed,
    /// Nothing was drawn: the suggestion doesn't fit, or the terminal couldn't be
    /// queried.
    Rejected,
}

/// Rows a suggestion of `width` columns spans when it starts at column `col`.
///
/// ```
/// use r3bl_suggest::rows_needed;
/// assert_eq!(rows_needed(15, 7, 80), 1);
/// assert_eq!(rows_needed(75, 10, 80), 2);
/// assert_eq!(rows_needed(70, 10, 80), 1);
/// ```
#[must_use]
pub fn rows_needed(col: usize, width: usize, cols: usize) -> usize {
    if cols == 0 {
        return 0;
    }
    (col + width).div_ceil(cols)
}

/// Erase any suggestion on screen, then draw `request` after the cursor and put the
/// cursor back where it was.
pub fn render_suggestion(
    term: &mut dyn TerminalOps,
    state: &mut RenderState,
    request: RenderRequest<'_>,
) -> RenderOutcome {
    clear_suggestion(term, state);
    match try_render(term, state, request) {
        Ok(outcome) => outcome,
        Err(error) => {
            // % is Display, ? is Debug.
            tracing::debug!(message = "Could not draw suggestion", error = ?error);
            RenderOutcome::Rejected
        }
    }
}

fn try_render(
    term: &mut dyn TerminalOps,
    state: &mut RenderState,
    request: RenderRequest<'_>,
) -> io::Result<RenderOutcome> {
    let size = term.size()?;
    let origin = term.cursor_position()?;

    let cols = usize::from(size.cols);
    let rows = usize::from(size.rows);
    let col = usize::from(origin.col);
    let row = usize::from(origin.row);

    let marker_width = if request.marker.is_some() {
        usize::from(REPLACEMENT_GAP) + StringLength::Unicode.calculate(REPLACEMENT_MARKER)
    } else {
        0
    };
    let width = marker_width + StringLength::Unicode.calculate(request.text);

    let rows_needed = rows_needed(col, width, cols);
    let available = (cols * rows).saturating_sub(col);
    if width == 0 || rows_needed == 0 || rows_needed > rows || width > available {
        tracing::debug!(
            message = "Suggestion does not fit",
            width = width,
            rows_needed = rows_needed,
            size = ?size
        );
        return Ok(RenderOutcome::Rejected);
    }

    // Rows past the bottom of the screen scroll the origin up.
    let last_row = row + rows_needed - 1;
    let scrolled = last_row.saturating_sub(rows - 1);
    let restore = CursorPos {
        col: origin.col,
        row: u16::try_from(row.saturating_sub(scrolled)).unwrap_or(origin.row),
    };

    *state = RenderState {
        printed: true,
        buffer: request.text.to_string(),
        rows_used: u16::try_from(rows_needed).unwrap_or(size.rows),
        origin: restore,
        color: request.color.clone(),
    };

    term.clear_to_end_of_screen()?;
    if let Some(marker_color) = request.marker {
        if col + usize::from(REPLACEMENT_GAP) < cols {
            term.move_right(REPLACEMENT_GAP)?;
        } else {
            // Moving right never wraps, blanks do.
            term.write_styled(&" ".repeat(usize::from(REPLACEMENT_GAP)), &SgrColor::default())?;
        }
        term.write_styled(REPLACEMENT_MARKER, marker_color)?;
    }
    term.write_styled(request.text, request.color)?;
    term.reset_style(request.restore_color)?;
    term.move_to(restore)?;
    term.flush()?;

    Ok(RenderOutcome::Printed)
}

/// Erase the suggestion on screen, if any. The cursor does not move.
pub fn clear_suggestion(term: &mut dyn TerminalOps, state: &mut RenderState) {
    if !state.printed {
        return;
    }
    let RenderState {
        rows_used, origin, ..
    } = std::mem::take(state);

    if let Err(error) = try_clear(term, rows_used, origin) {
        tracing::debug!(message = "Could not clear suggestion", error = ?error);
    }
}

fn try_clear(term: &mut dyn TerminalOps, rows_used: u16, origin: CursorPos) -> io::Result<()> {
    term.clear_to_end_of_line()?;
    if rows_used > 1 {
        // The user may have typed since the suggestion was drawn, so the cursor is not
        // necessarily at the origin anymore.
        let restore = term.cursor_position().unwrap_or(origin);
        for _ in 1..rows_used {
            term.move_to_next_line()?;
            term.clear_to_end_of_line()?;
        }
        term.move_to(restore)?;
    }
    term.flush()
}
