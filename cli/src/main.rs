use clap::builder::FalseyValueParser;
use clap::{ArgAction, Parser};
use specset_core::DiscoveryOptions;
use specset_resolve::output::{OutputFormat, format_suite};
use specset_resolve::{Resolver, ResolverConfig};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Output formats accepted by `--format`.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliOutputFormat {
    Plain,
    Json,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(fmt: CliOutputFormat) -> Self {
        match fmt {
            CliOutputFormat::Plain => Self::Plain,
            CliOutputFormat::Json => Self::Json,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "specset", version)]
#[command(about = "Resolve spec files, file:line references and directories into a run plan")]
struct Cli {
    /// Spec files, `file:line` references, or directories to search recursively.
    #[arg(required = true, value_name = "ARG")]
    args: Vec<String>,
    /// Only pick up files ending in this suffix inside directories (e.g. _spec.js).
    #[arg(long, env = "SPECSET_SUFFIX")]
    suffix: Option<String>,
    /// Follow symbolic links while searching directories.
    #[arg(
        long,
        env = "SPECSET_FOLLOW_LINKS",
        action = ArgAction::SetTrue,
        value_parser = FalseyValueParser::new()
    )]
    follow_links: bool,
    /// Skip files and directories whose name starts with a dot.
    #[arg(
        long,
        env = "SPECSET_SKIP_HIDDEN",
        action = ArgAction::SetTrue,
        value_parser = FalseyValueParser::new()
    )]
    skip_hidden: bool,
    /// Resolve arguments in parallel with this many workers.
    #[arg(long, env = "SPECSET_JOBS")]
    jobs: Option<usize>,
    /// Output format for the resolved run plan.
    #[arg(long, default_value = "plain")]
    format: CliOutputFormat,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG wins if set.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), String> {
    let config = ResolverConfig {
        discovery: DiscoveryOptions {
            suffix: cli.suffix,
            follow_links: cli.follow_links,
            include_hidden: !cli.skip_hidden,
        },
        jobs: cli.jobs,
    };
    debug!(?config, "resolver configuration");

    let resolver = Resolver::new(config);
    let suite = if resolver.config().jobs.is_some() {
        resolver.resolve_parallel(&cli.args)
    } else {
        resolver.resolve(&cli.args)
    }
    .map_err(|err| err.to_string())?;

    let rendered = format_suite(&suite, cli.format.into())?;
    print!("{rendered}");
    Ok(())
}
