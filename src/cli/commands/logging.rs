use clap::{ArgAction, Args};
use tracing::Level;

#[derive(Args, Debug, Clone, Default)]
pub struct LoggingArgs {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Log filter directives, e.g. "truvalue=debug,tower_http=info"
    #[arg(long, env = "TRUVALUE_LOG", global = true)]
    pub log_filter: Option<String>,
}

impl LoggingArgs {
    /// Level used when no filter directive matches.
    pub fn get_effective_level(&self) -> Level {
        match self.verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }
}
