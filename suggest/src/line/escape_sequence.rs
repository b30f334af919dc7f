// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Input arrives one char at a time, so an arrow key shows up as three separate
//! keystrokes (`ESC`, `[`, `D`). The tracker accumulates them so the engine can tell
//! that the user is moving through the line and leave a printed suggestion alone.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscapeFeed {
    /// Plain input, not part of an escape sequence.
    NotEscape,
    /// In the middle of a sequence, wait for more.
    Pending,
    /// A cursor movement sequence (arrows, home, end, and `ESC [ n ~` keys) just
    /// completed.
    CursorMovement,
    /// `ESC` followed by something that doesn't start a CSI or SS3 sequence (eg: an
    /// Alt chord). The char should be handled as regular input.
    Aborted,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum EscapeStage {
    #[default]
    Idle,
    SawEscape,
    /// Saw `ESC [` or `ESC O`, and possibly some numeric parameters.
    SawIntroducer,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EscapeSequenceTracker {
    stage: EscapeStage,
}

pub const ESCAPE: char = '\x1b';

impl EscapeSequenceTracker {
    pub fn feed(&mut self, ch: char) -> EscapeFeed {
        match (self.stage, ch) {
            (EscapeStage::Idle, ESCAPE) => {
                self.stage = EscapeStage::SawEscape;
                EscapeFeed::Pending
            }
            (EscapeStage::Idle, _) => EscapeFeed::NotEscape,
            (EscapeStage::SawEscape, '[' | 'O') => {
                self.stage = EscapeStage::SawIntroducer;
                EscapeFeed::Pending
            }
            (EscapeStage::SawEscape, _) => {
                self.stage = EscapeStage::Idle;
                EscapeFeed::Aborted
            }
            (EscapeStage::SawIntroducer, '0'..='9' | ';') => EscapeFeed::Pending,
            (EscapeStage::SawIntroducer, 'A' | 'B' | 'C' | 'D' | 'H' | 'F' | '~') => {
                self.stage = EscapeStage::Idle;
                EscapeFeed::CursorMovement
            }
            // Some other special key (eg: shift tab). Swallow it.
            (EscapeStage::SawIntroducer, _) => {
                self.stage = EscapeStage::Idle;
                EscapeFeed::Pending
            }
        }
    }

    pub fn reset(&mut self) { self.stage = EscapeStage::Idle; }

    #[must_use]
    pub fn is_idle(&self) -> bool { self.stage == EscapeStage::Idle }
}
