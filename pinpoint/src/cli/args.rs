//! CLI argument definitions

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "pinpoint",
    about = "Check which files a pinpoint filter configuration would profile",
    after_help = "\
EXAMPLES:
    pinpoint --base-path /home/u/myapp /home/u/myapp/worker.py
    pinpoint --include myapp/ --base-path /home/u/myapp /usr/lib/python3.11/threading.py
    pinpoint --include myapp/ --base-path /home/u/myapp --json src/*.py"
)]
pub struct Args {
    /// Path fragment to include (repeatable; plain substring match)
    #[arg(short, long = "include", value_name = "FRAGMENT")]
    pub include: Vec<String>,

    /// Base path; files resolving under it are in scope even if unlisted
    #[arg(short, long, value_name = "PATH")]
    pub base_path: String,

    /// Record the profile-all flag in the configuration (diagnostic only)
    #[arg(long)]
    pub profile_all: bool,

    /// Print the filter configuration before the verdicts
    #[arg(long)]
    pub describe: bool,

    /// Emit verdicts as JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Candidate file paths to test against the filter
    #[arg(value_name = "FILES", required_unless_present = "describe")]
    pub files: Vec<String>,
}
