use std::ffi::OsString;
use std::path::PathBuf;

pub use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct ClapArgs {
    /// Profile section to read from the profile file. Default is 'default'.
    #[clap(short = 'p', long, default_value = "default", help = "profile name")]
    profile: String,

    /// Base URL of the name availability API. Overrides the profile.
    #[clap(long, help = "availability API base URL")]
    api_url: Option<String>,

    /// Use the built-in mock API even when an API URL is configured
    #[clap(long, help = "use the offline mock API")]
    offline: bool,

    /// Ignore availability results for names that are no longer in the field
    #[clap(long, help = "drop stale availability results")]
    discard_stale: bool,

    /// Write logs to this file instead of stderr
    #[clap(long, help = "log file path")]
    log_file: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct CommandLineArgs {
    profile: String,
    api_url: Option<String>,
    offline: bool,
    discard_stale: bool,
    log_file: Option<PathBuf>,
}

impl From<ClapArgs> for CommandLineArgs {
    fn from(args: ClapArgs) -> Self {
        Self {
            profile: args.profile,
            api_url: args.api_url,
            offline: args.offline,
            discard_stale: args.discard_stale,
            log_file: args.log_file,
        }
    }
}

impl CommandLineArgs {
    pub fn parse() -> Self {
        ClapArgs::parse().into()
    }

    pub fn parse_from<I, T>(itr: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        ClapArgs::parse_from(itr).into()
    }

    pub fn profile(&self) -> &str {
        &self.profile
    }

    pub fn api_url(&self) -> Option<&str> {
        self.api_url.as_deref()
    }

    pub fn offline(&self) -> bool {
        self.offline
    }

    pub fn discard_stale(&self) -> bool {
        self.discard_stale
    }

    pub fn log_file(&self) -> Option<&PathBuf> {
        self.log_file.as_ref()
    }
}
