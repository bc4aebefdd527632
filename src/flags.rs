use clap::Parser;

pub const DEFAULT_PROMPT: &str = "msh> ";

/// Command-line options for msh.
#[derive(Debug, Clone, Parser)]
#[command(name = "msh", version, about = "A minimal interactive shell", long_about = None)]
pub struct Flags {
    /// Prompt printed before every command
    #[arg(short, long, default_value = DEFAULT_PROMPT)]
    pub prompt: String,

    /// Suppress non-essential messages
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable debug output
    #[arg(short, long)]
    pub debug: bool,

    /// Disable colours in interactive mode
    #[arg(long)]
    pub no_color: bool,
}

impl Default for Flags {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_string(),
            quiet: false,
            debug: false,
            no_color: false,
        }
    }
}
