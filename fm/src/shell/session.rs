// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{fmt::Debug,
          io::{self, Write},
          path::Path,
          process::Command};

use crossterm::{event::{self, Event, KeyCode, KeyEvent},
                terminal};
use r3bl_suggest::{EngineIo, EngineOutcome, KEY_ENTER, SuggestionEngine, SuggestionTables,
                   TerminalOps};

use crate::{CommandOutcome, FmError, LineEditor, LineEditorEvent, ShellState,
            format_listing, run_command_line};

/// Whether the read loop goes on after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// Runs the command lines that are not handled by `fm` itself.
pub trait CommandRunner: Debug {
    /// # Errors
    ///
    /// If the command could not be started.
    fn run(&mut self, command: &str, cwd: &Path) -> Result<(), FmError>;
}

/// Hands the line to `sh -c`, with the terminal out of raw mode while it runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShRunner;

impl CommandRunner for ShRunner {
    fn run(&mut self, command: &str, cwd: &Path) -> Result<(), FmError> {
        let to_error = |source: io::Error| FmError::Command {
            command: command.to_string(),
            source,
        };
        terminal::disable_raw_mode().map_err(to_error)?;
        let status = Command::new("sh")
            .arg("-c")
            .arg(command)
            .current_dir(cwd)
            .status();
        terminal::enable_raw_mode().map_err(to_error)?;
        let status = status.map_err(to_error)?;

        // % is Display, ? is Debug.
        tracing::debug!(message = "External command done", command = %command, status = ?status);
        Ok(())
    }
}

/// One interactive `fm` session: the shell state, the line editor, and the suggestion
/// engine drawing on the same terminal.
#[derive(Debug)]
pub struct Session<W: Write + Debug, T: TerminalOps, R: CommandRunner> {
    pub state: ShellState,
    pub engine: SuggestionEngine,
    pub editor: LineEditor<W>,
    pub term: T,
    pub runner: R,
    /// Rebuilt after every command line, the state can't change while typing.
    tables: SuggestionTables,
}

impl<W: Write + Debug, T: TerminalOps, R: CommandRunner> Session<W, T, R> {
    pub fn new(state: ShellState, editor: LineEditor<W>, term: T, runner: R) -> Self {
        let engine = SuggestionEngine::new(state.config.suggestions.clone());
        let tables = state.build_tables();
        Self {
            state,
            engine,
            editor,
            term,
            runner,
            tables,
        }
    }

    /// Show the listing and the first prompt.
    ///
    /// # Errors
    ///
    /// If the terminal can't be written to.
    pub fn start(&mut self) -> io::Result<()> {
        self.editor.print(&format_listing(&self.state.listing))?;
        self.editor.start_line()
    }

    /// Read events until the user quits. Raw mode is on for the whole loop.
    ///
    /// # Errors
    ///
    /// If raw mode can't be toggled, or the terminal can't be read or written.
    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        let result = self.run_loop();
        terminal::disable_raw_mode()?;
        result
    }

    fn run_loop(&mut self) -> io::Result<()> {
        self.start()?;
        loop {
            let event = event::read()?;
            if self.handle_event(&event)? == Control::Quit {
                break;
            }
        }
        Ok(())
    }

    /// Apply one terminal event to the line, then let the engine update the
    /// suggestion.
    ///
    /// # Errors
    ///
    /// If the terminal can't be written to.
    pub fn handle_event(&mut self, event: &Event) -> io::Result<Control> {
        // The editor redraws the line from its start. The suggestion goes first, so
        // the engine knows it is gone.
        if !is_cursor_key(event) {
            self.engine.clear(&mut self.term);
        }

        match self.editor.handle_event(event)? {
            LineEditorEvent::Edited(key) => {
                self.feed(key);
            }
            LineEditorEvent::AcceptRequested => {
                if let Some(acceptance) = self.engine.accept_suggestion(&mut self.term) {
                    self.editor.apply_acceptance(&acceptance)?;
                }
            }
            LineEditorEvent::Line(line) => {
                self.feed(KEY_ENTER);
                return self.run_line(&line);
            }
            LineEditorEvent::Interrupted => {
                self.feed(KEY_ENTER);
                self.editor.start_line()?;
            }
            LineEditorEvent::Eof => return Ok(Control::Quit),
            LineEditorEvent::CursorMoved | LineEditorEvent::Ignored => {}
        }
        Ok(Control::Continue)
    }

    fn feed(&mut self, key: char) {
        let line = self.editor.snapshot();
        let mut io = EngineIo::new(&mut self.term, &mut self.editor);
        let outcome = self.engine.on_input(key, &line, &self.tables, &mut io);
        if outcome == EngineOutcome::Rejected {
            tracing::debug!(message = "Suggestion did not fit on screen", line = %line.text);
        }
    }

    fn run_line(&mut self, line: &str) -> io::Result<Control> {
        self.state.history.update(line);

        match run_command_line(line, &mut self.state) {
            Ok(CommandOutcome::Quit) => return Ok(Control::Quit),
            Ok(CommandOutcome::Done(message)) => {
                if let Some(message) = message {
                    self.editor.print(&format!("{message}\n"))?;
                }
            }
            Ok(CommandOutcome::ChangedDir) => {
                self.editor.print(&format_listing(&self.state.listing))?;
            }
            Ok(CommandOutcome::External(command)) => {
                if let Err(error) = self.runner.run(&command, &self.state.cwd) {
                    self.editor.print(&format!("fm: {error}\n"))?;
                }
                self.state.refresh_listing();
            }
            Err(error) => {
                self.editor.print(&format!("fm: {error}\n"))?;
            }
        }

        self.tables = self.state.build_tables();
        self.editor.start_line()?;
        Ok(Control::Continue)
    }
}

fn is_cursor_key(event: &Event) -> bool {
    matches!(
        event,
        Event::Key(KeyEvent {
            code: KeyCode::Left | KeyCode::Right | KeyCode::Home | KeyCode::End,
            ..
        })
    )
}
