use clap::{Parser, Subcommand};
use gallery_lqip::config::{self, CONFIG_FILENAME, LqipConfig};
use gallery_lqip::imaging::RustBackend;
use gallery_lqip::output;
use gallery_lqip::pipeline::{self, RunConfig};
use gallery_lqip::remote::HttpSource;
use std::path::PathBuf;

fn version_string() -> &'static str {
    if env!("LQIP_RELEASE_BUILD") == "true" {
        return env!("CARGO_PKG_VERSION");
    }
    match env!("LQIP_GIT_HASH") {
        "" => "dev@unknown",
        // Leaked once at startup
        hash => Box::leak(format!("dev@{hash}").into_boxed_str()),
    }
}

#[derive(Parser)]
#[command(name = "gallery-lqip")]
#[command(about = "Generate low-quality image placeholders for a gallery data file")]
#[command(long_about = "\
Generate low-quality image placeholders for a gallery data file

Reads the site's content document, fetches every referenced image from the
image host, shrinks each one into a tiny blurred JPEG, and writes it back as
an inline `lqip` data URI next to every reference.

Images are referenced from:
  gallery          items[].fileName
  galleryWithTags  items[].fileName, tags[].items[].fileName
  info             imageId

Images that fail to download or decode are reported and skipped; the rest of
the file is still updated. Re-running regenerates every placeholder.

Run 'gallery-lqip gen-config' to generate a documented lqip.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Config file (default: ./lqip.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Content document to read and overwrite
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Image host prefix; each identifier is appended as-is
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Images fetched concurrently per batch
    #[arg(long, global = true)]
    batch_size: Option<usize>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate placeholders and write them into the data file
    Run,
    /// List the images the data file references, without fetching anything
    Check,
    /// Print a stock lqip.toml with all options documented
    GenConfig,
}

/// Load the config file, then apply CLI overrides and re-validate.
fn resolve_config(cli: &Cli) -> Result<LqipConfig, config::ConfigError> {
    let mut config = match &cli.config {
        Some(path) => config::load_config(path, true)?,
        None => config::load_config(&PathBuf::from(CONFIG_FILENAME), false)?,
    };
    if let Some(data) = &cli.data {
        config.data_path = data.clone();
    }
    if let Some(base_url) = &cli.base_url {
        config.remote.base_url = base_url.clone();
    }
    if let Some(batch_size) = cli.batch_size {
        config.processing.batch_size = batch_size;
    }
    config.validate()?;
    Ok(config)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Run => {
            let config = resolve_config(&cli)?;
            let source = HttpSource::new(config.remote.base_url.clone(), config.timeout())?;
            let backend = RustBackend::new();

            let (tx, rx) = std::sync::mpsc::channel();
            let printer = std::thread::spawn(move || {
                for event in rx {
                    for line in output::format_process_event(&event) {
                        println!("{}", line);
                    }
                }
            });
            let result = pipeline::run(
                &RunConfig::from_config(&config),
                &source,
                &backend,
                Some(tx),
            );
            printer.join().map_err(|_| "output thread panicked")?;

            output::print_run_summary(&result?);
        }
        Command::Check => {
            let config = resolve_config(&cli)?;
            println!("==> Checking {}", config.data_path.display());
            let ids = pipeline::check(&config.data_path)?;
            output::print_check_output(&ids);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
