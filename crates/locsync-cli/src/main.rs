use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing::{debug, error, info};
use tracing_appender::rolling;
use tracing_subscriber::Layer;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod context;

#[derive(Parser)]
#[command(name = "locsync", version, about = "Keep CSV translation tables in sync with the primary language")]
struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Only log warnings and errors to the console
    #[arg(long, global = true)]
    quiet: bool,

    /// Config file read before locsync.toml in the working directory
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Reconcile every translation table against the primary language table
    Update {
        /// Directories searched for tables (defaults to the configured ones)
        #[arg(short, long)]
        root: Vec<PathBuf>,
        /// Directory holding the primary table
        #[arg(long)]
        primary_dir: Option<PathBuf>,
        /// Primary language code
        #[arg(long)]
        lang: Option<String>,
        #[arg(long, default_value_t = false)]
        dry_run: bool,
        #[arg(long, default_value_t = false)]
        no_backup: bool,
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// Count entries by status in every translation table
    Stats {
        #[arg(short, long)]
        root: Vec<PathBuf>,
        #[arg(long, default_value = "text", value_parser = ["text", "json", "csv"])]
        format: String,
        /// Write the report to a file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Lint one table: duplicate keys, long keys, empty translations
    Check {
        #[arg(short, long)]
        file: PathBuf,
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// Start a table for a new language from the primary table
    NewLang {
        #[arg(long)]
        code: String,
        #[arg(long)]
        primary_dir: Option<PathBuf>,
    },

    /// Dump JSON schemas of the machine-readable outputs
    Schema {
        #[arg(long, default_value = "./docs/schemas")]
        out_dir: PathBuf,
    },
}

trait Runnable {
    fn run(self, ctx: &context::Context) -> Result<()>;
}

impl Runnable for Commands {
    fn run(self, ctx: &context::Context) -> Result<()> {
        let cmd_name = format!("{:?}", self);
        info!("▶ Starting command: {}", cmd_name);

        let result = match self {
            Commands::Update {
                root,
                primary_dir,
                lang,
                dry_run,
                no_backup,
                format,
            } => {
                debug!(event = "update_args", root = ?root, primary_dir = ?primary_dir, lang = ?lang, dry_run, no_backup, format = %format);
                commands::update::run_update(ctx, root, primary_dir, lang, dry_run, no_backup, &format)
            }
            Commands::Stats { root, format, out } => {
                debug!(event = "stats_args", root = ?root, format = %format, out = ?out);
                commands::stats::run_stats(ctx, root, &format, out)
            }
            Commands::Check { file, format } => {
                debug!(event = "check_args", file = ?file, format = %format);
                commands::check::run_check(ctx, &file, &format)
            }
            Commands::NewLang { code, primary_dir } => {
                debug!(event = "new_lang_args", code = %code, primary_dir = ?primary_dir);
                commands::new_lang::run_new_lang(ctx, &code, primary_dir)
            }
            Commands::Schema { out_dir } => commands::schema::run_schema(out_dir),
        };

        match &result {
            Ok(_) => info!("✔ Finished command: {}", cmd_name),
            Err(e) => error!("✖ Command {} failed: {:?}", cmd_name, e),
        }

        result
    }
}

fn init_tracing(quiet: bool) -> tracing_appender::non_blocking::WorkerGuard {
    let file_appender = rolling::daily("logs", "locsync.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let default_level = if quiet { "warn" } else { "info" };
    let console_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        );

    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_writer(file_writer)
        .with_filter(EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
    guard
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    let _guard = init_tracing(cli.quiet);

    let use_color = !cli.no_color
        && std::io::stdout().is_terminal()
        && std::env::var_os("NO_COLOR").is_none();

    let ctx = context::Context::load(cli.config.as_deref(), use_color)?;
    cli.cmd.run(&ctx)
}
