use anyhow::Result;
use clap::{ArgAction, Args, CommandFactory, Parser, Subcommand, ValueEnum};
use git_meta::commands::report::{self, ReportOptions};
use git_meta::commands::update;
use git_meta::git::GitCli;
use git_meta::{Error, get_base_dir};
use std::io::IsTerminal;
use std::process::ExitCode;
use termcolor::{ColorChoice, StandardStream};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "git-meta")]
#[command(about = "Report on every git repository under a directory and fast-forward their main branches")]
#[command(version, disable_version_flag = true)]
#[command(after_help = "Examples:
  git-meta report ~/repositories
  git-meta report ~/repositories --print-all --no-fetch
  git-meta report -qq
  git-meta update ~/repositories

ROOT_DIR defaults to $GIT_PATH. Set GIT_META_LOG=debug for diagnostics.")]
struct Cli {
    /// Print version
    #[arg(short = 'v', long, action = ArgAction::Version)]
    version: Option<bool>,

    /// When to color output
    #[arg(long, value_enum, default_value_t = ColorMode::Auto, global = true)]
    color: ColorMode,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fast-forward repositories on main/master that are behind their remote
    Update {
        /// Root directory to search for repositories (defaults to $GIT_PATH)
        #[arg(value_name = "ROOT_DIR")]
        root_dir: Option<String>,

        #[command(flatten)]
        fetch: FetchArgs,
    },

    /// Print the status of every repository and the ones that need reviewing
    Report {
        /// Root directory to search for repositories (defaults to $GIT_PATH)
        #[arg(value_name = "ROOT_DIR")]
        root_dir: Option<String>,

        #[command(flatten)]
        fetch: FetchArgs,

        /// Also show repositories that are clean and up to date
        #[arg(long, overrides_with = "no_print_all")]
        print_all: bool,

        /// Only show repositories that need attention (default)
        #[arg(long, overrides_with = "print_all")]
        no_print_all: bool,

        /// Show the status label instead of the full git output
        #[arg(short, long, action = ArgAction::Count)]
        quiet: u8,
    },
}

#[derive(Args)]
struct FetchArgs {
    /// Fetch from origin before checking status (default)
    #[arg(long, overrides_with = "no_fetch")]
    fetch: bool,

    /// Use the remote-tracking refs already on disk
    #[arg(long, overrides_with = "fetch")]
    no_fetch: bool,
}

impl FetchArgs {
    fn enabled(&self) -> bool {
        self.fetch || !self.no_fetch
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ColorMode {
    Auto,
    Always,
    Never,
}

impl ColorMode {
    fn choice(self) -> ColorChoice {
        match self {
            ColorMode::Always => ColorChoice::Always,
            ColorMode::Never => ColorChoice::Never,
            ColorMode::Auto if std::io::stdout().is_terminal() => ColorChoice::Auto,
            ColorMode::Auto => ColorChoice::Never,
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("GIT_META_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let git = GitCli;
    let mut stdout = StandardStream::stdout(cli.color.choice());

    match command {
        Commands::Update { root_dir, fetch } => {
            let root = get_base_dir(root_dir)?;
            update::execute(&git, &root, fetch.enabled(), &mut stdout)?;
        }
        Commands::Report {
            root_dir,
            fetch,
            print_all,
            no_print_all,
            quiet,
        } => {
            let root = get_base_dir(root_dir)?;
            let options = ReportOptions {
                fetch: fetch.enabled(),
                print_all: print_all && !no_print_all,
                quiet,
            };
            report::execute(&git, &root, &options, &mut stdout)?;
        }
    }

    Ok(())
}

fn exit_code(err: &anyhow::Error) -> ExitCode {
    match err.downcast_ref::<Error>() {
        Some(Error::InvalidRoot { .. } | Error::MissingRoot) => ExitCode::from(2),
        _ => ExitCode::FAILURE,
    }
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            exit_code(&e)
        }
    }
}
