mod cli;
mod config;
mod output;
mod scenes;

use anyhow::Result;
use clap::Parser;
use cli::Args;
use config::Job;
use log::LevelFilter;
use lumen_renderer::Camera;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn init_logger(level: LevelFilter) {
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.log_level.into());

    let job = Job::from_args(&args)?;

    let mut scene_rng = match job.render.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let scene = job.preset.build(&mut scene_rng);
    log::info!("Scene {:?} with {} objects", job.preset, scene.world.len());

    let camera = Camera::from_settings(job.camera_settings(scene.camera, &args));

    let image = if job.single_threaded {
        lumen_renderer::render(&camera, &scene.world, &job.render)
    } else {
        lumen_renderer::render_parallel(&camera, &scene.world, &job.render)?
    };

    output::save(&image, &args.output)
}
