// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{env, path::PathBuf};

use clap::Parser;
use crossterm::terminal;
use miette::IntoDiagnostic;
use r3bl_fm::{CLIArg, FmConfig, History, LineEditor, Session, ShRunner, ShellState,
              get_config_file_path, scan_path_commands, try_get_config_folder_path};
use r3bl_suggest::{CommonError, CommonErrorType, CommonResult, CrosstermTerminal, throws,
                   try_initialize_logging_global};

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

const PROMPT: &str = "fm> ";

fn main() -> CommonResult<()> {
    throws!({
        let cli_arg = CLIArg::parse();

        let enable_logging = cli_arg.global_options.enable_logging;
        enable_logging.then(|| {
            try_initialize_logging_global(tracing_core::LevelFilter::DEBUG).ok();
            // % is Display, ? is Debug.
            tracing::debug!(message = "Start logging...", cli_arg = ?cli_arg);
        });

        let mut config = match try_get_config_folder_path() {
            Some(config_folder) => FmConfig::try_load(&get_config_file_path(&config_folder))?,
            None => FmConfig::default(),
        };
        cli_arg.suggestion_options.apply_to(&mut config.suggestions);

        let start_dir = match &cli_arg.start_dir {
            Some(start_dir) => PathBuf::from(start_dir),
            None => env::current_dir().into_diagnostic()?,
        };
        if !start_dir.is_dir() {
            return CommonError::new_error_result(
                CommonErrorType::InvalidArguments,
                &format!("{}: no such directory", start_dir.display()),
            );
        }
        let start_dir = std::path::absolute(start_dir).into_diagnostic()?;

        let mut state = ShellState {
            history: History::new(config.history_size_max),
            path_commands: scan_path_commands(&env::var("PATH").unwrap_or_default()),
            environment: env::vars().collect(),
            config,
            ..ShellState::default()
        };
        state.change_dir(start_dir).into_diagnostic()?;

        let term_size = terminal::size().into_diagnostic()?;
        let editor = LineEditor::new(PROMPT, term_size, std::io::stdout());
        let term = CrosstermTerminal::new(std::io::stdout());
        let mut session = Session::new(state, editor, term, ShRunner);
        session.run().into_diagnostic()?;

        enable_logging.then(|| {
            tracing::debug!(message = "Stop logging...");
        });
    })
}
