// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The per keystroke driver. The line editor calls [`SuggestionEngine::on_input`] after
//! it has applied each key to its buffer. The engine reads the buffer, decides what
//! (if anything) to suggest, and draws or clears the suggestion and the warning prompt.

use crate::{CommandSource, EscapeFeed, EscapeSequenceTracker, LineBuffer, LineState,
            MatchMode, MatchRequest, MatchResult, ParamSource, PromptHost, PromptState,
            RenderOutcome, RenderRequest, RenderState, SgrColor, StrategyOrder, Suggestion,
            SuggestionConfig, SuggestionDisplay, SuggestionSource, SuggestionTables,
            SuggestionType, SyntaxHighlighter, TerminalOps, VariableSource, Word,
            clear_suggestion, render_suggestion, resolve_path, unescape_word};

pub const KEY_TAB: char = '\t';
pub const KEY_ENTER: char = '\r';
pub const KEY_NEWLINE: char = '\n';
pub const KEY_BACKSPACE: char = '\x7f';
pub const KEY_CTRL_H: char = '\x08';

/// The host's side of the terminal, borrowed for one keystroke.
#[derive(Debug)]
pub struct EngineIo<'a> {
    pub term: &'a mut dyn TerminalOps,
    pub prompt_host: &'a mut dyn PromptHost,
    pub highlighter: Option<&'a mut dyn SyntaxHighlighter>,
}

impl<'a> EngineIo<'a> {
    pub fn new(term: &'a mut dyn TerminalOps, prompt_host: &'a mut dyn PromptHost) -> Self {
        Self {
            term,
            prompt_host,
            highlighter: None,
        }
    }

    #[must_use]
    pub fn with_highlighter(mut self, highlighter: &'a mut dyn SyntaxHighlighter) -> Self {
        self.highlighter = Some(highlighter);
        self
    }
}

/// What one keystroke did to the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineOutcome {
    /// Suggestions are turned off.
    Disabled,
    /// Nothing was touched (tab, cursor movement keys, partial escape sequences).
    Unchanged,
    /// Any suggestion on screen was erased and there was nothing to look up.
    Cleared,
    Suggested(SuggestionType),
    /// The word is complete as typed. Nothing is drawn.
    FullMatch(SuggestionType),
    NoMatch,
    /// A suggestion was found but could not be drawn.
    Rejected,
}

/// The text to put in the line when the user accepts the suggestion on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Acceptance {
    /// Byte offset in the line. Everything from here to the end is replaced.
    pub replace_from: usize,
    pub text: String,
}

impl Acceptance {
    /// `line` with the suggestion applied.
    ///
    /// ```
    /// use r3bl_suggest::Acceptance;
    /// let it = Acceptance { replace_from: 4, text: "alpha.txt".into() };
    /// assert_eq!(it.apply_to("cat al"), "cat alpha.txt");
    /// ```
    #[must_use]
    pub fn apply_to(&self, line: &str) -> String {
        let mut replace_from = self.replace_from.min(line.len());
        while !line.is_char_boundary(replace_from) {
            replace_from -= 1;
        }
        format!("{}{}", &line[..replace_from], self.text)
    }
}

#[derive(Debug)]
pub struct SuggestionEngine {
    config: SuggestionConfig,
    sources: Vec<Box<dyn SuggestionSource>>,
    render_state: RenderState,
    prompt_state: PromptState,
    escape_tracker: EscapeSequenceTracker,
    /// The suggestion on screen, kept so it can be accepted.
    current: Option<Suggestion>,
}

impl SuggestionEngine {
    /// An invalid strategy string falls back to [`StrategyOrder::default`].
    #[must_use]
    pub fn new(config: SuggestionConfig) -> Self {
        let strategy_order = config.try_strategy_order().unwrap_or_else(|error| {
            // % is Display, ? is Debug.
            tracing::warn!(
                message = "Invalid suggestion strategy, using the default",
                error = %error
            );
            StrategyOrder::default()
        });
        Self {
            sources: strategy_order.build_sources(),
            config,
            render_state: RenderState::default(),
            prompt_state: PromptState::default(),
            escape_tracker: EscapeSequenceTracker::default(),
            current: None,
        }
    }

    #[must_use]
    pub fn config(&self) -> &SuggestionConfig { &self.config }

    #[must_use]
    pub fn render_state(&self) -> &RenderState { &self.render_state }

    #[must_use]
    pub fn prompt_state(&self) -> &PromptState { &self.prompt_state }

    /// The suggestion currently on screen.
    #[must_use]
    pub fn current_suggestion(&self) -> Option<&Suggestion> {
        self.current.as_ref().filter(|_| self.render_state.printed)
    }

    /// Handle one keystroke. `key` has already been applied to `line`.
    pub fn on_input(
        &mut self,
        key: char,
        line: &dyn LineBuffer,
        tables: &SuggestionTables,
        io: &mut EngineIo<'_>,
    ) -> EngineOutcome {
        if !self.config.enabled {
            return EngineOutcome::Disabled;
        }

        match self.escape_tracker.feed(key) {
            EscapeFeed::Pending => return EngineOutcome::Unchanged,
            // Moving through the line leaves the suggestion alone.
            EscapeFeed::CursorMovement => return EngineOutcome::Unchanged,
            EscapeFeed::NotEscape | EscapeFeed::Aborted => {}
        }

        let line = LineState::capture(line);

        match key {
            KEY_ENTER | KEY_NEWLINE => {
                self.clear(io.term);
                self.resolve_warning(&line.text, io);
                self.reset_session();
                EngineOutcome::Cleared
            }
            KEY_TAB => EngineOutcome::Unchanged,
            KEY_BACKSPACE | KEY_CTRL_H => {
                self.clear(io.term);
                if line.is_empty() {
                    self.resolve_warning(&line.text, io);
                }
                EngineOutcome::Cleared
            }
            _ => self.process_line(&line, tables, io),
        }
    }

    /// Erase the suggestion on screen, if any. The host should call this before it
    /// writes anything else to the terminal.
    pub fn clear(&mut self, term: &mut dyn TerminalOps) {
        clear_suggestion(term, &mut self.render_state);
        self.current = None;
    }

    /// Erase the suggestion on screen and return what it stands for, so the host can
    /// insert it.
    pub fn accept_suggestion(&mut self, term: &mut dyn TerminalOps) -> Option<Acceptance> {
        if !self.render_state.printed {
            return None;
        }
        let suggestion = self.current.take()?;
        clear_suggestion(term, &mut self.render_state);
        tracing::debug!(message = "Suggestion accepted", text = %suggestion.text);
        Some(Acceptance {
            replace_from: suggestion.replace_from,
            text: suggestion.text,
        })
    }

    /// Forget everything about the line that was just submitted. Call it after the
    /// screen has been cleared or the line was submitted.
    pub fn reset_session(&mut self) {
        self.render_state = RenderState::default();
        self.prompt_state = PromptState::default();
        self.escape_tracker.reset();
        self.current = None;
    }

    fn resolve_warning(&mut self, line: &str, io: &mut EngineIo<'_>) {
        self.prompt_state
            .resolve(line, io.prompt_host, io.highlighter.as_deref_mut());
    }

    fn process_line(
        &mut self,
        line: &LineState,
        tables: &SuggestionTables,
        io: &mut EngineIo<'_>,
    ) -> EngineOutcome {
        if line.is_empty() {
            self.clear(io.term);
            self.resolve_warning(&line.text, io);
            return EngineOutcome::Cleared;
        }

        let segmentation = &line.segmentation;

        // The user went back to fix the command name. Check it, but draw nothing in
        // the middle of the line.
        if line.cursor_in_first_word() {
            self.clear(io.term);
            if let Some(first_word) = segmentation.first_word() {
                if is_unsuggestable(&line.text, first_word) {
                    return EngineOutcome::Cleared;
                }
                let request = MatchRequest {
                    line: &line.text,
                    word: first_word,
                    words_before: &[],
                    tables,
                    config: &self.config,
                };
                check_command(
                    &request,
                    MatchMode::Check,
                    &mut self.prompt_state,
                    &mut self.render_state,
                    io,
                );
            }
            return EngineOutcome::Cleared;
        }

        // The command name is settled once a second word is started.
        if segmentation.word_count >= 2 {
            self.resolve_warning(&line.text, io);
        }

        let Some(word) = segmentation.current_word() else {
            self.clear(io.term);
            return EngineOutcome::Cleared;
        };
        if is_unsuggestable(&line.text, word) {
            self.clear(io.term);
            return EngineOutcome::Cleared;
        }

        let result = {
            let request = MatchRequest {
                line: &line.text,
                word,
                words_before: segmentation.words_before(word),
                tables,
                config: &self.config,
            };
            let mode = MatchMode::for_word(word);
            let result = find_match(&self.sources, &request, mode);
            if word.is_first_word {
                if result.is_match() {
                    self.prompt_state
                        .resolve(&line.text, io.prompt_host, io.highlighter.as_deref_mut());
                    result
                } else {
                    check_command(
                        &request,
                        mode,
                        &mut self.prompt_state,
                        &mut self.render_state,
                        io,
                    )
                }
            } else {
                result
            }
        };

        self.apply(result, io)
    }

    /// The color the user's input continues in after the engine wrote to the terminal.
    fn input_color(&self, io: &EngineIo<'_>) -> Option<SgrColor> {
        if self.prompt_state.is_warning() {
            Some(self.config.colors.warning_input.clone())
        } else {
            io.highlighter.as_deref().and_then(|it| it.current_color())
        }
    }

    fn apply(&mut self, result: MatchResult, io: &mut EngineIo<'_>) -> EngineOutcome {
        match result {
            MatchResult::Partial(suggestion) => {
                let restore_color = self.input_color(io);
                let marker = (suggestion.display == SuggestionDisplay::Replacement)
                    .then_some(&self.config.colors.pointer);

                let outcome = render_suggestion(
                    io.term,
                    &mut self.render_state,
                    RenderRequest {
                        text: suggestion.render_text(),
                        color: &suggestion.color,
                        marker,
                        restore_color: restore_color.as_ref(),
                    },
                );

                match outcome {
                    RenderOutcome::Printed => {
                        let suggestion_type = suggestion.suggestion_type;
                        self.current = Some(suggestion);
                        EngineOutcome::Suggested(suggestion_type)
                    }
                    RenderOutcome::Rejected => {
                        self.current = None;
                        EngineOutcome::Rejected
                    }
                }
            }
            MatchResult::Full(suggestion_type) => {
                self.clear(io.term);
                EngineOutcome::FullMatch(suggestion_type)
            }
            MatchResult::NoMatch => {
                self.clear(io.term);
                // Whatever is typed next shows up in the warning color.
                if self.prompt_state.is_warning() {
                    let color = self.input_color(io);
                    if let Err(error) = io
                        .term
                        .reset_style(color.as_ref())
                        .and_then(|()| io.term.flush())
                    {
                        // % is Display, ? is Debug.
                        tracing::debug!(message = "Could not set input color", error = ?error);
                    }
                }
                EngineOutcome::NoMatch
            }
        }
    }
}

/// Internal command arguments first, then every source in strategy order, then
/// variable names. The first match wins.
fn find_match(
    sources: &[Box<dyn SuggestionSource>],
    request: &MatchRequest<'_>,
    mode: MatchMode,
) -> MatchResult {
    if let Some(result) = ParamSource.try_match(request, mode) {
        return result;
    }

    for source in sources {
        let result = source.try_match(request, mode);
        if result.is_match() {
            tracing::debug!(
                message = "Suggestion source matched",
                source = %source.code(),
                result = ?result.suggestion_type()
            );
            return result;
        }
    }

    if request.word.text.starts_with('$') {
        return VariableSource.try_match(request, mode);
    }

    MatchResult::NoMatch
}

/// Is the first word a command? Raises or resolves the warning prompt accordingly.
fn check_command(
    request: &MatchRequest<'_>,
    mode: MatchMode,
    prompt_state: &mut PromptState,
    render_state: &mut RenderState,
    io: &mut EngineIo<'_>,
) -> MatchResult {
    let typed = unescape_word(&request.word.text);

    let result = if is_existing_path(&typed, request.tables) {
        MatchResult::Full(SuggestionType::Command)
    } else {
        CommandSource.try_match(request, mode)
    };

    if result.is_match() {
        prompt_state.resolve(request.line, io.prompt_host, io.highlighter.as_deref_mut());
    } else if !is_search_pattern(&typed) {
        clear_suggestion(io.term, render_state);
        prompt_state.raise_warning(&request.word.text, request.config, io.prompt_host);
    }

    result
}

/// Words that can't be completed: redirections, negations, grouping, assignments, and
/// lines starting with a separator.
fn is_unsuggestable(line: &str, word: &Word) -> bool {
    word.text.starts_with(['<', '>', '!', '{', '[', '('])
        || word.text.contains('=')
        || line.starts_with([' ', ';', '|', '&'])
}

/// A path typed as the command runs (or opens) that path.
fn is_existing_path(typed: &str, tables: &SuggestionTables) -> bool {
    let looks_like_path = typed.starts_with('/')
        || typed.starts_with("./")
        || typed.starts_with("../")
        || typed.starts_with("~/");
    looks_like_path && resolve_path(typed, tables).exists()
}

/// `/pattern` searches the listing, it is not a path until it has a second `/`.
fn is_search_pattern(typed: &str) -> bool {
    typed
        .strip_prefix('/')
        .is_some_and(|rest| !rest.is_empty() && !rest.contains('/'))
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;
    use crate::{CursorPos, PromptMode, assert_eq2,
                test_fixtures::{HighlighterMock, PromptHostMock, TermOp, TerminalMock,
                                TestLine, sample_tables}};

    /// Simulates a line editor: echoes each char, then calls the engine.
    #[derive(Debug)]
    struct Harness {
        engine: SuggestionEngine,
        term: TerminalMock,
        prompt_host: PromptHostMock,
        tables: SuggestionTables,
        line: String,
    }

    impl Harness {
        fn new(config: SuggestionConfig) -> Self {
            let mut term = TerminalMock::new(80, 24);
            term.echo("$ ");
            Self {
                engine: SuggestionEngine::new(config),
                term,
                prompt_host: PromptHostMock::new("$ "),
                tables: sample_tables(),
                line: String::new(),
            }
        }

        fn type_str(&mut self, text: &str) -> EngineOutcome {
            let mut outcome = EngineOutcome::Unchanged;
            for ch in text.chars() {
                self.line.push(ch);
                self.term.echo(&ch.to_string());
                outcome = self.key(ch);
            }
            outcome
        }

        fn key(&mut self, ch: char) -> EngineOutcome {
            let line = TestLine::at_end(&self.line);
            let mut io = EngineIo::new(&mut self.term, &mut self.prompt_host);
            self.engine.on_input(ch, &line, &self.tables, &mut io)
        }

        fn backspace(&mut self) -> EngineOutcome {
            self.line.pop();
            self.term.backspace();
            self.key(KEY_BACKSPACE)
        }
    }

    #[test]
    fn test_disabled_engine_never_touches_terminal() {
        let mut harness = Harness::new(SuggestionConfig {
            enabled: false,
            ..Default::default()
        });
        harness.term.clear_ops();
        assert_eq2!(harness.type_str("gi"), EngineOutcome::Disabled);
        assert!(harness.term.ops().is_empty());
    }

    #[test]
    fn test_command_suggestion_and_accept() {
        let mut harness = Harness::new(SuggestionConfig::default());
        assert_eq2!(harness.type_str("gi"), EngineOutcome::Suggested(SuggestionType::Command));
        assert_eq2!(harness.term.row_text(0), "$ git");
        assert_eq2!(harness.term.cursor(), CursorPos::new(4, 0));

        let acceptance = harness.engine.accept_suggestion(&mut harness.term).unwrap();
        assert_eq2!(acceptance.apply_to(&harness.line), "git");
        assert!(!harness.engine.render_state().printed);
        assert_eq2!(harness.term.row_text(0), "$ gi");
    }

    #[test]
    fn test_tab_and_cursor_keys_leave_suggestion_alone() {
        let mut harness = Harness::new(SuggestionConfig::default());
        harness.type_str("gi");
        harness.term.clear_ops();

        assert_eq2!(harness.key(KEY_TAB), EngineOutcome::Unchanged);
        for ch in ['\x1b', '[', 'D'] {
            assert_eq2!(harness.key(ch), EngineOutcome::Unchanged);
        }
        assert!(harness.term.ops().is_empty());
        assert!(harness.engine.render_state().printed);
    }

    #[test]
    fn test_unknown_command_raises_warning_and_backspace_resolves() {
        let mut harness = Harness::new(SuggestionConfig::default());
        assert_eq2!(harness.type_str("xq"), EngineOutcome::NoMatch);
        assert_eq2!(harness.engine.prompt_state().mode(), PromptMode::Warning);
        assert_eq2!(
            harness.prompt_host.prompt(),
            SuggestionConfig::default().decorated_warning_prompt()
        );

        harness.backspace();
        assert_eq2!(harness.engine.prompt_state().mode(), PromptMode::Warning);
        harness.backspace();
        assert_eq2!(harness.engine.prompt_state().mode(), PromptMode::Normal);
        assert_eq2!(harness.prompt_host.prompt(), "$ ");
    }

    #[test]
    fn test_second_word_resolves_warning() {
        let mut harness = Harness::new(SuggestionConfig::default());
        harness.type_str("xq ");
        assert_eq2!(harness.engine.prompt_state().mode(), PromptMode::Warning);
        harness.type_str("a");
        assert_eq2!(harness.engine.prompt_state().mode(), PromptMode::Normal);
    }

    #[test]
    fn test_fixing_command_name_in_place() {
        let mut harness = Harness::new(SuggestionConfig::default());
        harness.type_str("gti status");

        // Cursor moved back into the first word, which is still wrong.
        let line = TestLine::new("gti status", 2);
        let mut io = EngineIo::new(&mut harness.term, &mut harness.prompt_host);
        let outcome = harness.engine.on_input('t', &line, &harness.tables, &mut io);
        assert_eq2!(outcome, EngineOutcome::Cleared);
        assert_eq2!(harness.engine.prompt_state().mode(), PromptMode::Warning);

        let line = TestLine::new("git status", 2);
        let mut io = EngineIo::new(&mut harness.term, &mut harness.prompt_host);
        harness.engine.on_input('i', &line, &harness.tables, &mut io);
        assert_eq2!(harness.engine.prompt_state().mode(), PromptMode::Normal);
    }

    #[test]
    fn test_assignment_in_first_word_is_not_flagged() {
        let mut harness = Harness::new(SuggestionConfig::default());
        harness.type_str("FOO=1 ls");

        // Cursor moved back into `FOO=1`.
        let line = TestLine::new("FOO=1 ls", 3);
        let mut io = EngineIo::new(&mut harness.term, &mut harness.prompt_host);
        let outcome = harness.engine.on_input('O', &line, &harness.tables, &mut io);
        assert_eq2!(outcome, EngineOutcome::Cleared);
        assert_eq2!(harness.engine.prompt_state().mode(), PromptMode::Normal);
        assert_eq2!(harness.prompt_host.prompt, "$ ");
    }

    #[test]
    fn test_search_pattern_and_exempt_words_are_not_flagged() {
        let mut harness = Harness::new(SuggestionConfig::default());
        harness.type_str("/foo");
        assert_eq2!(harness.engine.prompt_state().mode(), PromptMode::Normal);

        let mut harness = Harness::new(SuggestionConfig::default());
        harness.type_str("#note");
        assert_eq2!(harness.engine.prompt_state().mode(), PromptMode::Normal);
    }

    #[test]
    fn test_unsuggestable_words_clear() {
        let mut harness = Harness::new(SuggestionConfig::default());
        assert_eq2!(harness.type_str("ls >al"), EngineOutcome::Cleared);
        let mut harness = Harness::new(SuggestionConfig::default());
        assert_eq2!(harness.type_str("FOO=al"), EngineOutcome::Cleared);
    }

    #[test]
    fn test_enter_resets_session() {
        let mut harness = Harness::new(SuggestionConfig::default());
        harness.type_str("xq");
        assert!(harness.engine.prompt_state().is_warning());
        assert_eq2!(harness.key(KEY_ENTER), EngineOutcome::Cleared);
        assert!(!harness.engine.prompt_state().is_warning());
        assert_eq2!(harness.prompt_host.prompt(), "$ ");
        assert!(!harness.engine.render_state().printed);
    }

    #[test]
    fn test_warning_switches_input_color() {
        let mut harness = Harness::new(SuggestionConfig::default());
        harness.type_str("xq");
        assert!(harness.engine.prompt_state().is_warning());
        let warning_input = SuggestionConfig::default().colors.warning_input;
        assert!(
            harness
                .term
                .ops()
                .contains(&TermOp::ResetStyle(Some(warning_input)))
        );
    }

    #[test]
    fn test_highlighter_color_is_restored() {
        let mut harness = Harness::new(SuggestionConfig::default());
        let mut highlighter = HighlighterMock {
            color: Some(SgrColor::new("01;37")),
            ..Default::default()
        };
        harness.line = "gi".into();
        let line = TestLine::at_end("gi");
        let mut io = EngineIo::new(&mut harness.term, &mut harness.prompt_host)
            .with_highlighter(&mut highlighter);
        harness.engine.on_input('i', &line, &harness.tables, &mut io);
        assert!(
            harness
                .term
                .ops()
                .contains(&TermOp::ResetStyle(Some(SgrColor::new("01;37"))))
        );
    }

    #[test]
    fn test_invalid_strategy_falls_back_to_default() {
        let engine = SuggestionEngine::new(SuggestionConfig {
            strategy: "zz".into(),
            ..Default::default()
        });
        let codes: Vec<char> = engine.sources.iter().map(|it| it.code()).collect();
        assert_eq2!(codes, crate::DEFAULT_STRATEGY.chars().collect::<Vec<_>>());
    }

    #[test_case("/foo", true)]
    #[test_case("/usr/bin", false)]
    #[test_case("/", false)]
    #[test_case("foo", false)]
    fn test_is_search_pattern(typed: &str, expected: bool) {
        assert_eq2!(is_search_pattern(typed), expected);
    }
}
