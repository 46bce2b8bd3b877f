use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use fpga_report::{list_variables, OutputStyle, Report, SummarizerConfig};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Prints board, resource usage and loop information from an FPGA compiler
/// report without opening the HTML viewer.
#[derive(Parser)]
#[command(author, version, about = "FPGA report summarizer")]
struct Cli {
    /// Report directory, the one containing `resources/`.
    report_dir: PathBuf,
    /// TOML file overriding the report layout and rendering options.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, value_enum)]
    style: Option<StyleArg>,
    /// Deepest loop level to print (2 prints loops and inner loops).
    #[arg(long)]
    max_loop_depth: Option<usize>,
    /// List the `var <name>=` assignments in each source file and exit.
    #[arg(long, default_value_t = false)]
    list_variables: bool,
    /// Print the effective configuration as TOML and exit.
    #[arg(long, default_value_t = false)]
    print_config: bool,
    /// Raise log verbosity (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
enum StyleArg {
    Plain,
    Table,
}

impl From<StyleArg> for OutputStyle {
    fn from(style: StyleArg) -> Self {
        match style {
            StyleArg::Plain => OutputStyle::Plain,
            StyleArg::Table => OutputStyle::Table,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = effective_config(&cli)?;
    if cli.print_config {
        print!("{}", config.to_toml().context("serialize config")?);
        return Ok(());
    }
    if cli.list_variables {
        return print_variables(&cli.report_dir, &config);
    }

    let report = Report::load_with_layout(&cli.report_dir, &config.layout)
        .with_context(|| format!("read report {}", cli.report_dir.display()))?;
    let backend = config.backend();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    report
        .write_to(&mut out, backend.as_ref())
        .context("render report")?;
    out.flush()?;
    Ok(())
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn effective_config(cli: &Cli) -> Result<SummarizerConfig> {
    let mut config = match &cli.config {
        Some(path) => SummarizerConfig::load(path)
            .with_context(|| format!("load config {}", path.display()))?,
        None => SummarizerConfig::default(),
    };
    if let Some(style) = cli.style {
        config.render.style = style.into();
    }
    if let Some(depth) = cli.max_loop_depth {
        config.render.max_loop_depth = depth;
    }
    debug!(?config, "effective configuration");
    Ok(config)
}

fn print_variables(report_dir: &Path, config: &SummarizerConfig) -> Result<()> {
    let files = [
        config.layout.report_data_path(report_dir),
        config.layout.product_data_path(report_dir),
    ];
    for path in files {
        let variables =
            list_variables(&path).with_context(|| format!("scan {}", path.display()))?;
        println!("{}:", path.display());
        for variable in variables {
            println!(
                "  line {}: {} ({} bytes)",
                variable.line + 1,
                variable.identifier,
                variable.literal_len
            );
        }
    }
    Ok(())
}
