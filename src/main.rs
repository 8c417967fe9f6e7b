//! sankey-svg CLI entry point.

use std::fs;
use std::io::{self, Read, Write};
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use sankey_svg::{Alignment, EdgeColor, RenderConfig, render_flows};

/// Sankey flow table (sankey-beta CSV) to SVG diagram output.
#[derive(Parser, Debug)]
#[command(
    name = "sankey-svg",
    version = env!("SANKEY_SVG_VERSION"),
    about = "Sankey flow table (sankey-beta CSV) to SVG diagram output"
)]
struct Cli {
    /// Input file (reads from stdin if not provided)
    input: Option<String>,

    /// Write output to this file instead of stdout
    #[arg(short = 'o', long = "output")]
    output: Option<String>,

    /// Canvas width in pixels
    #[arg(long = "width", default_value = "960")]
    width: f64,

    /// Canvas height in pixels
    #[arg(long = "height", default_value = "600")]
    height: f64,

    /// Node alignment (left, right, center, justify)
    #[arg(short = 'a', long = "align", default_value = "justify")]
    align: Alignment,

    /// Link coloring (none, path, input, output)
    #[arg(short = 'e', long = "edge-color", default_value = "path")]
    edge_color: EdgeColor,

    /// Units appended to values in node tooltips
    #[arg(short = 'u', long = "units")]
    units: Option<String>,

    /// Node box width in pixels
    #[arg(long = "node-width", default_value = "15")]
    node_width: f64,

    /// Vertical gap between nodes in a column
    #[arg(long = "node-padding", default_value = "10")]
    node_padding: f64,

    /// Layout relaxation passes
    #[arg(long = "iterations", default_value = "6")]
    iterations: usize,

    /// Log pipeline stages to stderr (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn render_config(&self) -> RenderConfig {
        RenderConfig {
            width: self.width,
            height: self.height,
            align: self.align,
            edge_color: self.edge_color,
            node_width: self.node_width,
            node_padding: self.node_padding,
            iterations: self.iterations,
            units: self.units.clone(),
        }
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("sankey_svg={default_level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Read input from file or stdin
    let text = if let Some(ref path) = cli.input {
        match fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("error: cannot read '{}': {}", path, e);
                process::exit(1);
            }
        }
    } else {
        let mut buf = String::new();
        if let Err(e) = io::stdin().read_to_string(&mut buf) {
            eprintln!("error: cannot read stdin: {}", e);
            process::exit(1);
        }
        buf
    };

    let rendered = match render_flows(&text, &cli.render_config()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    };

    // Write output to file or stdout
    if let Some(ref path) = cli.output {
        if let Err(e) = fs::write(path, rendered) {
            eprintln!("error: cannot write '{}': {}", path, e);
            process::exit(1);
        }
    } else {
        print!("{}", rendered);
        if let Err(e) = io::stdout().flush() {
            eprintln!("error: cannot flush stdout: {}", e);
            process::exit(1);
        }
    }
}
