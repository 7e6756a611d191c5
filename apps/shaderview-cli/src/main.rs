use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use shaderview_assets::{FsAssetSource, ShaderCache, load_shader_sources};
use shaderview_render::DebugTextCompositor;
use shaderview_viewer::{FrameOutcome, ViewerConfig, bootstrap};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "shaderview-cli", about = "Headless tool for shaderview assets and the frame loop")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Directory shader paths are resolved against
    #[arg(long, default_value = ".", global = true)]
    assets: PathBuf,

    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print tool version and crate info
    Info,
    /// Load both shader sources and report them
    Check,
    /// Drive the frame loop against a text compositor
    Simulate {
        /// Number of frames to render
        #[arg(short, long, default_value = "3")]
        frames: u64,
        /// Viewport width in logical pixels
        #[arg(long, default_value = "800")]
        width: u32,
        /// Viewport height in logical pixels
        #[arg(long, default_value = "600")]
        height: u32,
        /// Resize to WIDTHxHEIGHT halfway through the run
        #[arg(long, value_parser = parse_extent)]
        resize: Option<(u32, u32)>,
    },
}

fn parse_extent(s: &str) -> Result<(u32, u32)> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .with_context(|| format!("expected WIDTHxHEIGHT, got {s:?}"))?;
    let w: u32 = w.trim().parse().context("invalid width")?;
    let h: u32 = h.trim().parse().context("invalid height")?;
    if w == 0 || h == 0 {
        bail!("extent must be non-zero, got {w}x{h}");
    }
    Ok((w, h))
}

fn load_config(path: Option<&PathBuf>) -> Result<ViewerConfig> {
    Ok(match path {
        Some(p) => ViewerConfig::from_file(p)?,
        None => ViewerConfig::default(),
    })
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("shaderview-cli starting");

    let config = load_config(cli.config.as_ref())?;
    let source = FsAssetSource::new(&cli.assets);
    let mut cache = ShaderCache::new();

    match cli.command {
        Commands::Info => {
            println!("shaderview-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("render: {}", shaderview_render::crate_info());
            println!("vertex shader: {}", config.shaders.vertex.display());
            println!("fragment shader: {}", config.shaders.fragment.display());
        }
        Commands::Check => {
            let sources = pollster::block_on(load_shader_sources(&source, &mut cache, &config.shaders))
                .context("shader check failed")?;
            println!(
                "vertex   {} ({} bytes, {} lines)",
                config.shaders.vertex.display(),
                sources.vertex.len(),
                sources.vertex.lines().count()
            );
            println!(
                "fragment {} ({} bytes, {} lines)",
                config.shaders.fragment.display(),
                sources.fragment.len(),
                sources.fragment.lines().count()
            );
            println!("cached: {}", cache.keys().collect::<Vec<_>>().join(", "));
        }
        Commands::Simulate {
            frames,
            width,
            height,
            resize,
        } => {
            let viewport = config.viewport(width, height, 1.0);
            let mut viewer = pollster::block_on(bootstrap(&source, &mut cache, viewport, config))
                .context("viewer not started")?;
            let mut compositor = DebugTextCompositor::new();

            for i in 0..frames {
                if let Some((w, h)) = resize.filter(|_| i == frames / 2) {
                    viewer.on_resize(w, h, &mut compositor);
                }
                match viewer.render_frame(&mut compositor) {
                    Ok(FrameOutcome::Continue) => {}
                    Ok(FrameOutcome::Stopped) => break,
                    Err(never) => match never {},
                }
            }
            viewer.stop();

            for line in compositor.lines() {
                println!("{line}");
            }
            println!(
                "submitted {} frames, final aspect {:.4}",
                compositor.frames_submitted(),
                viewer.uniforms().aspect_ratio
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_extents() {
        assert_eq!(parse_extent("1024x768").unwrap(), (1024, 768));
        assert_eq!(parse_extent("640X480").unwrap(), (640, 480));
        assert!(parse_extent("1024").is_err());
        assert!(parse_extent("0x768").is_err());
        assert!(parse_extent("axb").is_err());
    }

    #[test]
    fn simulate_args() {
        let cli = Cli::parse_from([
            "shaderview-cli",
            "simulate",
            "--frames",
            "10",
            "--resize",
            "1024x768",
            "--assets",
            "demo",
        ]);
        assert_eq!(cli.assets, PathBuf::from("demo"));
        match cli.command {
            Commands::Simulate { frames, resize, width, .. } => {
                assert_eq!(frames, 10);
                assert_eq!(resize, Some((1024, 768)));
                assert_eq!(width, 800);
            }
            _ => panic!("expected simulate"),
        }
    }
}
