use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use zoomed_image::render::SvgBackend;
use zoomed_image::{config, output, process};

#[derive(Parser)]
#[command(name = "zoomed-image")]
#[command(about = "Draw magnified callouts of image regions as SVG figures")]
#[command(long_about = "\
Draw magnified callouts of image regions as SVG figures

Each config file holds a list of jobs. A job matches images with glob
patterns and, for every image, places enlarged copies of chosen regions in a
band beside it, outlining each region and its enlargement in the same color.

  [
    {
      \"pathSettings\":      { \"paths\": [\"shots/*.png\"], \"outputFolder\": \"zoomed\" },
      \"subregionSettings\": { \"placements\": [\"East\"], \"mainSizes\": [0.4], ... },
      \"drawingSettings\":   { \"fitImages\": [\"Horizontal\"], \"paddings\": [0.02] }
    }
  ]

Lists shorter than the number of images (or subregions) repeat cyclically.
Relative paths are resolved against the working directory.

Run 'zoomed-image --gen-config' to print a complete example.")]
#[command(version)]
struct Cli {
    /// Job config files, processed in order
    #[arg(default_value = "config.json")]
    configs: Vec<PathBuf>,

    /// Maximum number of images rendered in parallel (default: all cores)
    #[arg(long)]
    jobs: Option<usize>,

    /// Continue with the next job when one fails
    #[arg(long)]
    keep_going: bool,

    /// Print an example config file and exit
    #[arg(long)]
    gen_config: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.gen_config {
        print!("{}", config::stock_config_json());
        return Ok(());
    }

    init_tracing();
    init_thread_pool(cli.jobs);

    let base = std::env::current_dir()?;
    let backend = SvgBackend::new();

    let (tx, rx) = std::sync::mpsc::channel();
    let printer = std::thread::spawn(move || {
        for event in rx {
            for line in output::format_process_event(&event) {
                println!("{}", line);
            }
        }
    });
    let result = process::process_configs(&backend, &cli.configs, &base, cli.keep_going, Some(tx));
    printer
        .join()
        .map_err(|_| "progress printer thread panicked")?;

    let summary = match result {
        Ok(summary) => summary,
        Err(e) => {
            tracing::error!("{e}");
            return Err(e.into());
        }
    };
    output::print_run_summary(&summary);

    if !summary.is_success() {
        std::process::exit(1);
    }
    Ok(())
}

/// Log to stderr; `RUST_LOG` overrides the default `info` level.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Initialize the rayon thread pool.
///
/// `--jobs` can lower the worker count below the core count, never raise it.
fn init_thread_pool(requested: Option<usize>) {
    let threads = process::effective_threads(requested);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
