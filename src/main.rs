use std::io::Read;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use flowtui::RenderOptions;

#[derive(Parser)]
#[command(
    name = "flowtui",
    version,
    about = "Render Mermaid flowcharts as Unicode or ASCII art in the terminal"
)]
struct Cli {
    /// Input file (reads from stdin if not provided)
    file: Option<std::path::PathBuf>,

    /// Use ASCII characters only
    #[arg(long, short = 'a')]
    ascii: bool,

    /// Maximum output width in columns (advisory)
    #[arg(long, short = 'w')]
    width: Option<usize>,

    /// Log layout diagnostics to stderr
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let input = match cli.file {
        Some(path) => std::fs::read_to_string(&path).unwrap_or_else(|e| {
            eprintln!("ERROR: failed to read {}: {e}", path.display());
            std::process::exit(1);
        }),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf).unwrap_or_else(|e| {
                eprintln!("ERROR: failed to read stdin: {e}");
                std::process::exit(1);
            });
            buf
        }
    };

    let options = RenderOptions {
        ascii: cli.ascii,
        max_width: cli.width,
    };
    let output = flowtui::render_to_tui(&input, &options);
    println!("{output}");
    if output.starts_with(flowtui::ERROR_PREFIX) {
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "flowtui=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
