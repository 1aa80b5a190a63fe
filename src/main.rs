use std::{io::{self, BufWriter, Write},
          path::PathBuf};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use cmaputil::{diverging, plot, DivergingParams, RGBColor};

#[derive(Parser, Debug)]
#[command(about = "Plot and create color palettes", version)]
struct Args {
    /// Log debugging information (overrides RUST_LOG).
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Plots a palette's components (reads new-line separated colors
    /// from stdin).
    #[command(alias = "p")]
    Plot {
        /// Simulate color blindness.
        #[arg(long, short)]
        dalton: bool,
        /// Show NTSC brightness.
        #[arg(long)]
        ntsc: bool,
        /// Image file to write.
        #[arg(long, short, default_value = "palette.png")]
        output: PathBuf,
        #[arg(long, default_value_t = 800)]
        width: u32,
        #[arg(long, default_value_t = 600)]
        height: u32,
    },
    /// Creates a diverging palette.
    #[command(alias = "cd", allow_negative_numbers = true)]
    CreateDiverging {
        /// Number of colors.
        n_colors: usize,
        /// Hue below middle point.
        h_min: f64,
        /// Hue above middle point.
        h_max: f64,
        /// Saturation below middle point.
        s_min: f64,
        /// Saturation above middle point.
        s_max: f64,
        /// Lightness at minimum.
        l_min: f64,
        /// Lightness at middle point.
        l_mid: f64,
        /// Lightness at maximum (default: same as l_min).
        l_max: Option<f64>,
    },
}

fn init_logging(verbose: bool) {
    let filter = if verbose { EnvFilter::new("debug") }
                 else { EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| EnvFilter::new("warn")) };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Write the colors of the palette `p`, one hex color per line.
fn write_palette(out: &mut impl Write, p: &DivergingParams) -> io::Result<()> {
    for c in diverging(p) {
        writeln!(out, "{}", c.to_hex())?;
    }
    out.flush()
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);
    debug!(?args, "arguments");
    match args.cmd {
        Cmd::Plot { dalton, ntsc, output, width, height } => {
            let read = plot::read_colors(io::stdin().lock())
                .context("cannot read colors from stdin")?;
            for bad in &read.bad_lines {
                println!("Bad line {}: {}", bad.line, bad.error);
            }
            let opts = plot::PlotOptions { dalton, ntsc, width, height };
            plot::save(&output, &read.colors, &opts)
                .with_context(|| format!("plotting to {}", output.display()))?;
        }
        Cmd::CreateDiverging { n_colors, h_min, h_max, s_min, s_max,
                               l_min, l_mid, l_max } => {
            let p = DivergingParams { n_colors, h_min, h_max, s_min, s_max,
                                      l_min, l_mid, l_max };
            p.validate().context("invalid diverging palette")?;
            write_palette(&mut BufWriter::new(io::stdout().lock()), &p)
                .context("cannot write the palette")?;
        }
    }
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases() {
        let a = Args::try_parse_from(["cmaputil", "p", "-d", "--ntsc"]).unwrap();
        assert!(matches!(a.cmd, Cmd::Plot { dalton: true, ntsc: true, .. }));
        let a = Args::try_parse_from(
            ["cmaputil", "cd", "4", "0", "0.6", "1", "1", "0.2", "0.8"]).unwrap();
        assert!(matches!(a.cmd, Cmd::CreateDiverging { n_colors: 4,
                                                       l_max: None, .. }));
    }

    #[test]
    fn negative_l_max() {
        let a = Args::try_parse_from(
            ["cmaputil", "create-diverging", "5", "0", "0.6", "1", "1",
             "0.2", "0.8", "-1"]).unwrap();
        match a.cmd {
            Cmd::CreateDiverging { l_max, .. } => assert_eq!(l_max, Some(-1.)),
            cmd => panic!("unexpected {cmd:?}"),
        }
    }

    #[test]
    fn palette_output() {
        let a = Args::try_parse_from(
            ["cmaputil", "cd", "4", "0", "0.6", "1", "1", "0.2", "0.8"]).unwrap();
        let Cmd::CreateDiverging { n_colors, h_min, h_max, s_min, s_max,
                                   l_min, l_mid, l_max } = a.cmd
        else { panic!("not create-diverging") };
        let p = DivergingParams { n_colors, h_min, h_max, s_min, s_max,
                                  l_min, l_mid, l_max };
        let mut out = Vec::new();
        write_palette(&mut out, &p).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(),
                   "660000\nff9999\n99c1ff\n002866\n");
    }

    #[test]
    fn plot_defaults() {
        let a = Args::try_parse_from(["cmaputil", "plot"]).unwrap();
        match a.cmd {
            Cmd::Plot { output, width, height, .. } => {
                assert_eq!(output, PathBuf::from("palette.png"));
                assert_eq!((width, height), (800, 600));
            }
            cmd => panic!("unexpected {cmd:?}"),
        }
    }
}
