use clap::Parser;
use glam::Vec2;
use std::path::PathBuf;
use terrastream::preview::AsciiPreview;
use terrastream::world::{CellTally, ObserverSource};
use terrastream::{TerrainConfig, World};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// RON config file (defaults to ./terrain.ron plus TERRASTREAM_* env vars)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the world seed (0 picks a random one)
    #[arg(long)]
    seed: Option<i32>,

    /// Override the view distance in chunks
    #[arg(long)]
    view_distance: Option<i32>,

    /// Number of simulated frames
    #[arg(long, default_value_t = 600)]
    steps: u32,

    /// Observer speed in world units per second
    #[arg(long, default_value_t = 40.0)]
    speed: f32,

    /// Observer heading in degrees (0 = east, 90 = north)
    #[arg(long, default_value_t = 30.0)]
    heading: f32,

    /// Print a text map around the observer when done
    #[arg(long)]
    map: bool,

    /// Print the effective configuration as RON and exit
    #[arg(long)]
    print_config: bool,
}

/// Observer moving in a straight line at constant speed
struct Walker {
    position: Vec2,
    velocity: Vec2,
}

impl Walker {
    fn advance(&mut self, dt: f32) {
        self.position += self.velocity * dt;
    }
}

impl ObserverSource for Walker {
    fn position(&self) -> Option<Vec2> {
        Some(self.position)
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => TerrainConfig::load_from(path)?,
        None => TerrainConfig::load()?,
    };
    if let Some(seed) = args.seed {
        config.noise.seed = seed;
    }
    if let Some(view_distance) = args.view_distance {
        config.streaming.view_distance = view_distance;
    }

    if args.print_config {
        println!("{}", config.to_ron()?);
        return Ok(());
    }

    let heading = args.heading.to_radians();
    let walker = Walker {
        position: Vec2::ZERO,
        velocity: Vec2::new(heading.cos(), heading.sin()) * args.speed,
    };

    log::info!("Starting terrastream");
    let mut world = World::new(config, walker, CellTally::default())?;

    const FIXED_TIMESTEP: f32 = 1.0 / 60.0;
    let mut generated = 0;
    let mut evicted = 0;

    for _ in 0..args.steps {
        if let Some(report) = world.update() {
            generated += report.generated;
            evicted += report.evicted;
        }
        world.observer_mut().advance(FIXED_TIMESTEP);
    }

    let tally = world.sink();
    log::info!(
        "Done: seed {}, {} chunks generated, {} evicted, {} loaded, {} ground / {} water cells materialized",
        world.seed(),
        generated,
        evicted,
        world.streaming().store().len(),
        tally.ground,
        tally.water
    );

    if args.map {
        let preview = AsciiPreview::new(96, 40, 2);
        print!(
            "{}",
            preview.render(world.streaming(), world.observer().position)
        );
    }

    Ok(())
}
