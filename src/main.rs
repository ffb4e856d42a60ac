use clap::{Parser, Subcommand};
use sitevue::convert::{self, ConversionMode};
use sitevue::framework::vue;
use sitevue::markup::PatternRewriter;
use sitevue::{config, output, scan};
use std::path::{Path, PathBuf};
use std::process::Command as Process;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser, Debug)]
#[command(name = "sitevue")]
#[command(about = "Convert a static HTML/CSS/JS site into a Vue 3 + Vite project")]
#[command(long_about = "\
Convert a static HTML/CSS/JS site into a Vue 3 + Vite project

Every HTML file becomes a page component and a route. Navigation and footer
blocks are promoted to shared components, internal links become
<router-link>, and onclick handlers that call functions from the page's
script become @click bindings.

Site structure:

  site/
  ├── sitevue.toml       # Optional config (not part of the project)
  ├── index.html         # Page → src/pages/index.vue, route /
  ├── index.js           # Script of index.html (same name)
  ├── about.html         # Page → src/pages/about.vue, route /about
  ├── style.css          # Linked stylesheet, or site-wide when unlinked
  └── img/
      └── logo.svg       # Static file → public/img/logo.svg

--framework react copies the site with class attributes renamed to
className. Any other framework copies every file unchanged.

Run 'sitevue gen-config' to generate a documented sitevue.toml.")]
#[command(version)]
struct Cli {
    /// Static site directory
    #[arg(long, default_value = "site", global = true)]
    source: PathBuf,

    /// Output directory for the generated project
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Log more (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert the site into a framework project
    Convert {
        /// Target framework: vue, or react (copy with class → className);
        /// anything else copies files unchanged
        #[arg(long, default_value = "vue")]
        framework: String,

        /// Run `npm install` in the output directory afterwards
        #[arg(long)]
        install: bool,
    },
    /// List the pages and files of the site without writing anything
    Scan,
    /// Validate config and site without converting
    Check,
    /// Print a stock sitevue.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    debug!(?cli, "parsed arguments");

    match cli.command {
        Command::Convert { framework, install } => {
            let config = config::load_config(&cli.source)?;
            init_thread_pool(&config.processing);

            println!(
                "==> Converting {} → {} ({})",
                cli.source.display(),
                cli.output.display(),
                framework
            );
            let report = convert::convert_with_config(&cli.source, &cli.output, &framework, &config)?;
            output::print_convert_output(&report);

            if install && matches!(report.mode, ConversionMode::Framework(_)) {
                println!("==> Installing dependencies");
                install_dependencies(&cli.output)?;
            }
            println!("==> Done: {}", cli.output.display());
        }
        Command::Scan => {
            let (files, pages) = inventory(&cli.source)?;
            output::print_scan_output(&files, &pages);
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            config::load_config(&cli.source)?;
            let (files, pages) = inventory(&cli.source)?;
            output::print_scan_output(&files, &pages);
            println!("==> Site is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Log to stderr so command output on stdout stays clean.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores. Users can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}

fn inventory(
    source: &Path,
) -> Result<(Vec<sitevue::types::ClassifiedFile>, scan::PageSet), Box<dyn std::error::Error>> {
    let files = scan::walk(source)?;
    let pages = scan::collect_pages(&files, &PatternRewriter::new(vue::SYNTAX))?;
    Ok((files, pages))
}

fn install_dependencies(project: &Path) -> Result<(), Box<dyn std::error::Error>> {
    info!(project = %project.display(), "running npm install");
    let status = Process::new("npm")
        .arg("install")
        .current_dir(project)
        .status()?;
    if !status.success() {
        return Err(format!("npm install failed ({status})").into());
    }
    Ok(())
}
