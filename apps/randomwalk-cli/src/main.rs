use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;
use randomwalk_render::{DebugTextRenderer, RenderView, Renderer};
use randomwalk_walk::{DirectionSampler, WalkConfig, WalkScene};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "randomwalk-cli", about = "Generate and inspect random walks headlessly")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Generate walks and print a summary
    Generate {
        /// Number of independent walks
        #[arg(short, long, default_value = "5")]
        trajectories: usize,
        /// Points per walk, origin included
        #[arg(short = 'n', long, default_value = "65536")]
        steps: usize,
        /// Distance between consecutive points
        #[arg(long, default_value = "0.1")]
        velocity: f32,
        /// Seed for reproducible output (OS entropy when omitted)
        #[arg(short, long)]
        seed: Option<u64>,
        /// Sample step directions uniformly over the sphere
        #[arg(long)]
        uniform: bool,
        /// Frames of progressive reveal to simulate before printing
        #[arg(short, long, default_value = "0")]
        frames: usize,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("randomwalk-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", randomwalk_common::crate_info());
            println!("walk: {}", randomwalk_walk::crate_info());
            println!("input: {}", randomwalk_input::crate_info());
            println!("render: {}", randomwalk_render::crate_info());
            println!("defaults: {:?}", WalkConfig::default());
        }
        Commands::Generate {
            trajectories,
            steps,
            velocity,
            seed,
            uniform,
            frames,
        } => {
            let config = WalkConfig {
                trajectory_count: trajectories,
                steps,
                velocity,
                sampler: if uniform {
                    DirectionSampler::UniformSphere
                } else {
                    DirectionSampler::Legacy
                },
            };
            config.validate()?;

            tracing::debug!(?config, ?seed, frames, "generating walks");
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_os_rng(),
            };
            let mut scene = WalkScene::generate(&mut rng, &config);
            // Frames past the longest walk reveal nothing more.
            for _ in 0..frames.min(scene.max_len()) {
                scene.advance_reveal();
            }

            print!(
                "{}",
                DebugTextRenderer::new().render(&scene, &RenderView::default())
            );
        }
    }

    Ok(())
}
