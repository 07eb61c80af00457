use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use log::info;
use sha2::{Digest, Sha256};

use colorcanvas::{render_bytes, CanvasConfig, CanvasHost, FormatFactory, OutputFormat, Viewport};

#[derive(Parser)]
#[command(name = "colorcanvas", version, about = "Render the seeded card mosaic")]
struct Cli {
    /// JSON config file; flags given on the command line override it
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct Target {
    #[arg(long)]
    width: Option<u32>,
    #[arg(long)]
    height: Option<u32>,
    /// png, svg or json
    #[arg(long)]
    format: Option<OutputFormat>,
}

#[derive(Subcommand)]
enum Command {
    /// Render one pass to a file
    Render {
        #[command(flatten)]
        target: Target,
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Mount a canvas and replay a sequence of resizes, one file per size
    Resize {
        /// png, svg or json
        #[arg(long)]
        format: Option<OutputFormat>,
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
        /// Sizes as WIDTHxHEIGHT, first one is the mount size
        #[arg(required = true)]
        sizes: Vec<Viewport>,
    },
    /// Print the SHA-256 of one pass's output
    Digest {
        #[command(flatten)]
        target: Target,
    },
}

fn resolve(base: &CanvasConfig, target: &Target) -> anyhow::Result<CanvasConfig> {
    let mut cfg = base.clone();
    if let Some(w) = target.width {
        cfg.viewport.width = w;
    }
    if let Some(h) = target.height {
        cfg.viewport.height = h;
    }
    if let Some(f) = target.format {
        cfg.format = f;
    }
    cfg.validate()?;
    Ok(cfg)
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let base = match &cli.config {
        Some(path) => CanvasConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => CanvasConfig::default(),
    };

    match cli.command {
        Command::Render { target, output } => {
            let cfg = resolve(&base, &target)?;
            let bytes = render_bytes(cfg.format, cfg.viewport)?;
            fs::write(&output, &bytes)
                .with_context(|| format!("writing {}", output.display()))?;
            info!("wrote {} ({} bytes, {} {})", output.display(), bytes.len(), cfg.viewport, cfg.format);
        }
        Command::Resize { format, out_dir, sizes } => {
            let format = format.unwrap_or(base.format);
            fs::create_dir_all(&out_dir)
                .with_context(|| format!("creating {}", out_dir.display()))?;
            let mut host = CanvasHost::new(FormatFactory::new(format));
            for (i, size) in sizes.iter().enumerate() {
                CanvasConfig { viewport: *size, format }.validate()?;
                if i == 0 {
                    host.mount(*size)?;
                } else {
                    host.resize(size.width, size.height)?;
                }
                let Some(bytes) = host.take_output() else {
                    bail!("no output for {}", size);
                };
                let path = out_dir.join(format!("canvas-{}.{}", size, format.extension()));
                fs::write(&path, &bytes).with_context(|| format!("writing {}", path.display()))?;
                info!("wrote {}", path.display());
            }
            host.unmount();
        }
        Command::Digest { target } => {
            let cfg = resolve(&base, &target)?;
            let bytes = render_bytes(cfg.format, cfg.viewport)?;
            println!("{}", hex::encode(Sha256::digest(&bytes)));
        }
    }
    Ok(())
}
