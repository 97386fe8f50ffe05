use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use head_normalizer::NormalizerConfig;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "head-injector")]
#[command(about = "Normalize SEO <head> metadata across pre-rendered HTML files")]
struct Cli {
    /// Directory of pre-rendered HTML files (overrides the config file)
    #[arg(long, env = "HEAD_INJECTOR_ROOT")]
    root: Option<PathBuf>,

    /// Absolute site URL used for canonical and Open Graph URLs
    #[arg(long, env = "HEAD_INJECTOR_BASE_URL")]
    base_url: Option<String>,

    /// Extension of documents to process
    #[arg(long, env = "HEAD_INJECTOR_EXTENSION")]
    extension: Option<String>,

    /// TOML config file; missing file means built-in defaults
    #[arg(long, short, env = "HEAD_INJECTOR_CONFIG", default_value = "head-injector.toml")]
    config: PathBuf,

    /// Worker threads (1 = sequential)
    #[arg(long, short, env = "HEAD_INJECTOR_JOBS")]
    jobs: Option<usize>,

    /// Report what would change without writing any file
    #[arg(long)]
    dry_run: bool,

    /// Print the run report as JSON instead of a summary line
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn into_config(self) -> Result<(NormalizerConfig, bool), Box<dyn Error>> {
        let mut config = NormalizerConfig::load_or_default(&self.config)?;
        if let Some(root) = self.root {
            config.root_directory = root;
        }
        if let Some(base_url) = self.base_url {
            config.site_base_url = base_url;
        }
        if let Some(extension) = self.extension {
            config.html_extension = extension;
        }
        if let Some(jobs) = self.jobs {
            config.jobs = jobs;
        }
        config.dry_run |= self.dry_run;
        Ok((config, self.json))
    }
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let (config, json) = cli.into_config()?;
    let report = head_normalizer::run(&config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{report}");
    }
    Ok(())
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("head injection did not complete: {e}");
            let mut source = e.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {cause}");
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}
