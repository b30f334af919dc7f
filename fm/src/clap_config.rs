// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use clap::{Args, Parser};
use r3bl_suggest::SuggestionConfig;

/// More info: <https://docs.rs/clap/latest/clap/_derive/_tutorial/chapter_2/index.html>
#[derive(Debug, Parser)]
#[command(bin_name = "fm")]
#[command(about = "📂 Browse directories with inline autosuggestions 💡")]
#[command(version)]
#[command(next_line_help = true)]
#[command(arg_required_else_help(false))]
/// More info: <https://docs.rs/clap/latest/clap/struct.Command.html#method.help_template>
#[command(
    help_template = "{about}\nVersion: {bin} {version} 💻\n\nProvide a directory to start in, or no arguments to start in the current one.\nUSAGE 📓:\n  fm [\x1b[32mdirectory\x1b[0m] [\x1b[34moptions\x1b[0m]\n\n[options]\n{options}"
)]
pub struct CLIArg {
    #[arg(name = "directory")]
    pub start_dir: Option<String>,

    #[command(flatten)]
    pub suggestion_options: SuggestionOption,

    #[command(flatten)]
    pub global_options: GlobalOption,
}

/// Overrides for the suggestion settings in the config file.
#[derive(Debug, Args)]
pub struct SuggestionOption {
    #[arg(long, help = "Turn inline suggestions off.")]
    pub no_suggestions: bool,

    #[arg(long, help = "Match names with case sensitivity.")]
    pub case_sensitive: bool,

    #[arg(
        long,
        value_name = "BOOL",
        help = "Change into a directory by typing just its name."
    )]
    pub autocd: Option<bool>,

    #[arg(long, value_name = "BOOL", help = "Open a file by typing just its name.")]
    pub auto_open: Option<bool>,

    #[arg(
        long,
        value_name = "CODES",
        help = "Order in which suggestion sources are consulted, eg: `ehfjbac`. Letters: a(liases) b(ookmarks) c(ompletions) e(ln) f(ilenames) h(istory) j(ump), `-` skips a slot."
    )]
    pub strategy: Option<String>,
}

#[derive(Debug, Args)]
pub struct GlobalOption {
    #[arg(
        global = true,
        long,
        short = 'l',
        help = "Log app output to a file named `log.txt` for debugging."
    )]
    pub enable_logging: bool,
}

impl SuggestionOption {
    /// Command line flags win over the config file.
    pub fn apply_to(&self, config: &mut SuggestionConfig) {
        if self.no_suggestions {
            config.enabled = false;
        }
        if self.case_sensitive {
            config.case_sensitive = true;
        }
        if let Some(autocd) = self.autocd {
            config.autocd = autocd;
        }
        if let Some(auto_open) = self.auto_open {
            config.auto_open = auto_open;
        }
        if let Some(strategy) = &self.strategy {
            config.strategy.clone_from(strategy);
        }
    }
}
