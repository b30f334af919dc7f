// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! End to end keystroke scenarios, driven against the simulated terminal.

use r3bl_suggest::{CursorPos, ElnSource, EngineIo, EngineOutcome, FilenameSource,
                   KEY_BACKSPACE, MatchMode, MatchRequest, MatchResult, PromptMode,
                   RenderRequest, RenderState, SgrColor, StrategyOrder, SuggestionConfig,
                   SuggestionEngine, SuggestionSource, SuggestionTables, SuggestionType,
                   assert_eq2, clear_suggestion, render_suggestion, segment,
                   test_fixtures::{PromptHostMock, TermOp, TerminalMock, TestLine,
                                   sample_tables}};

const PROMPT: &str = "$ ";

#[derive(Debug)]
struct Shell {
    engine: SuggestionEngine,
    term: TerminalMock,
    prompt_host: PromptHostMock,
    tables: SuggestionTables,
    line: String,
}

impl Shell {
    fn new() -> Self { Self::with_tables(sample_tables()) }

    fn with_tables(tables: SuggestionTables) -> Self {
        let mut term = TerminalMock::new(80, 24);
        term.echo(PROMPT);
        Self {
            engine: SuggestionEngine::new(SuggestionConfig::default()),
            term,
            prompt_host: PromptHostMock::new(PROMPT),
            tables,
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

    /// What the user sees on the prompt row.
    fn prompt_row(&self) -> String { self.term.row_text(0) }
}

fn match_word(
    source: &dyn SuggestionSource,
    tables: &SuggestionTables,
    config: &SuggestionConfig,
    line: &str,
) -> MatchResult {
    let segmentation = segment(line, line.len());
    let word = segmentation.current_word().unwrap();
    let request = MatchRequest {
        line,
        word,
        words_before: segmentation.words_before(word),
        tables,
        config,
    };
    source.try_match(&request, MatchMode::for_word(word))
}

#[test]
fn test_filename_prefix_draws_rest_of_name() {
    let mut shell = Shell::new();
    assert_eq2!(
        shell.type_str("cat al"),
        EngineOutcome::Suggested(SuggestionType::File)
    );
    let suggestion = shell.engine.current_suggestion().unwrap();
    assert_eq2!(suggestion.render_text(), "pha.txt");
    assert_eq2!(suggestion.typed_len, 2);
    assert_eq2!(shell.prompt_row(), "$ cat alpha.txt");
    // The cursor stays right after what was typed.
    assert_eq2!(shell.term.cursor(), CursorPos::new(8, 0));
}

#[test]
fn test_complete_filename_is_full_match_and_clears() {
    let mut shell = Shell::new();
    shell.type_str("cat alpha.tx");
    assert!(shell.engine.render_state().printed);

    shell.term.clear_ops();
    assert_eq2!(
        shell.type_str("t"),
        EngineOutcome::FullMatch(SuggestionType::File)
    );
    assert!(!shell.engine.render_state().printed);
    assert_eq2!(shell.term.written_text(), "");
    assert_eq2!(shell.prompt_row(), "$ cat alpha.txt");
}

#[test]
fn test_command_name_then_missing_command_warns() {
    let mut shell = Shell::new();
    assert_eq2!(
        shell.type_str("gi"),
        EngineOutcome::Suggested(SuggestionType::Command)
    );
    let external = SuggestionConfig::default().colors.external_command;
    assert!(shell.term.ops().contains(&TermOp::Write {
        text: "t".into(),
        color: external,
    }));

    let mut tables = sample_tables();
    tables.path_commands.retain(|it| it != "git");
    let mut shell = Shell::with_tables(tables);
    assert_eq2!(shell.type_str("gi"), EngineOutcome::NoMatch);
    assert_eq2!(shell.engine.prompt_state().mode(), PromptMode::Warning);
    assert_eq2!(
        shell.prompt_host.prompt,
        SuggestionConfig::default().decorated_warning_prompt()
    );
}

#[test]
fn test_eln_draws_entry_name_after_digits() {
    let mut shell = Shell::new();
    assert_eq2!(
        shell.type_str("cd 2"),
        EngineOutcome::Suggested(SuggestionType::Dir)
    );
    assert_eq2!(
        shell.engine.current_suggestion().unwrap().render_text(),
        "eta/"
    );
    assert_eq2!(shell.prompt_row(), "$ cd 2eta/");
}

#[test]
fn test_wrapped_suggestion_clears_extra_rows() {
    let mut term = TerminalMock::new(20, 10);
    term.echo(&"x".repeat(15));
    let mut state = RenderState::default();
    let text = "s".repeat(30);
    let color = SgrColor::new("02;37");

    render_suggestion(&mut term, &mut state, RenderRequest {
        text: &text,
        color: &color,
        marker: None,
        restore_color: None,
    });
    assert_eq2!(state.rows_used, 3);
    assert_eq2!(term.row_text(2), "s".repeat(5));

    term.clear_ops();
    clear_suggestion(&mut term, &mut state);
    let extra_rows_cleared = term
        .ops()
        .iter()
        .filter(|op| **op == TermOp::MoveToNextLine)
        .count();
    assert_eq2!(extra_rows_cleared, 2);
    assert_eq2!(term.cursor(), CursorPos::new(15, 0));
    assert_eq2!(term.row_text(0), "x".repeat(15));
    assert_eq2!(term.row_text(1), "");
    assert_eq2!(term.row_text(2), "");
}

#[test]
fn test_backspace_clears_without_looking_up() {
    let mut shell = Shell::new();
    shell.type_str("cat al");
    assert!(shell.engine.render_state().printed);

    shell.term.clear_ops();
    assert_eq2!(shell.backspace(), EngineOutcome::Cleared);
    assert!(shell.engine.current_suggestion().is_none());
    assert_eq2!(shell.term.written_text(), "");
    assert_eq2!(shell.prompt_row(), "$ cat a");
}

#[test]
fn test_sources_are_idempotent() {
    let tables = sample_tables();
    let config = SuggestionConfig::default();
    let lines = ["cat al", "cat alpha.txt ", "cd 2", "cd b", "be", "ll", "ls -", "cd /non"];
    for source in StrategyOrder::default().build_sources() {
        for line in lines {
            let first = match_word(source.as_ref(), &tables, &config, line);
            let second = match_word(source.as_ref(), &tables, &config, line);
            assert_eq2!(first, second);
        }
    }
}

#[test]
fn test_render_then_clear_restores_screen() {
    let wrapping = "w".repeat(33);
    let texts = ["pha.txt", "日本語のファイル", wrapping.as_str()];
    let color = SgrColor::new("02;37");
    for row in 0..3_u16 {
        for col in [0_u16, 5, 19] {
            for text in texts {
                let mut term = TerminalMock::new(20, 6);
                term.echo(&"\n".repeat(usize::from(row)));
                term.echo(&"p".repeat(usize::from(col)));
                let before_screen = term.screen();
                let before_cursor = term.cursor();

                let mut state = RenderState::default();
                render_suggestion(&mut term, &mut state, RenderRequest {
                    text,
                    color: &color,
                    marker: None,
                    restore_color: None,
                });
                assert!(state.printed, "{text} at {col},{row}");
                assert_eq2!(term.cursor(), before_cursor);

                clear_suggestion(&mut term, &mut state);
                assert_eq2!(term.screen(), before_screen);
                assert_eq2!(term.cursor(), before_cursor);
            }
        }
    }
}

#[test]
fn test_at_most_one_suggestion_on_screen() {
    let mut shell = Shell::new();
    for ch in "cat alpha.txt beta".chars() {
        shell.type_str(&ch.to_string());
        let drawn = shell
            .engine
            .current_suggestion()
            .map(|it| it.render_text().to_string())
            .unwrap_or_default();
        assert_eq2!(shell.prompt_row(), format!("{PROMPT}{}{drawn}", shell.line));
    }
}

#[test]
fn test_full_match_never_draws() {
    let tables = sample_tables();
    let config = SuggestionConfig::default();
    for line in ["cat alpha.txt", "cd beta/", "ls", "cd 1"] {
        let full = [
            match_word(&FilenameSource, &tables, &config, line),
            match_word(&ElnSource, &tables, &config, line),
        ]
        .into_iter()
        .any(|it| matches!(it, MatchResult::Full(_)));
        if !full {
            continue;
        }

        let mut shell = Shell::new();
        let (head, last) = line.split_at(line.len() - 1);
        shell.type_str(head);
        shell.term.clear_ops();
        let outcome = shell.type_str(last);
        assert!(matches!(outcome, EngineOutcome::FullMatch(_)), "{line}: {outcome:?}");
        assert_eq2!(shell.term.written_text(), "");
        assert!(!shell.engine.render_state().printed);
    }
}
