//! Row-parallel render scheduling.
//!
//! The image rows are split into one contiguous block per worker thread. Each
//! worker receives an exclusive `&mut` slice of the framebuffer covering its
//! rows, so writes need no synchronization: disjointness is enforced by
//! `split_at_mut` rather than by locks.

use crate::integrator::PathTracer;
use crate::renderer::{render_rows, Framebuffer, RenderConfig};
use crate::{Camera, Color, Hittable};
use std::ops::Range;
use std::time::Instant;
use thiserror::Error;

/// Thread count used when hardware parallelism can't be detected.
pub const FALLBACK_THREADS: usize = 4;

/// Errors that can occur while scheduling a render.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("failed to build render thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type RenderResult<T> = Result<T, RenderError>;

/// Number of worker threads for a render.
pub fn thread_count(config: &RenderConfig) -> usize {
    match config.threads {
        Some(n) if n > 0 => n,
        _ => std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(FALLBACK_THREADS),
    }
}

/// Split `height` rows into `threads` contiguous blocks.
///
/// Every block but the last holds `height / threads` rows; the last absorbs
/// the remainder. The thread count is clamped to `[1, height]` so no block is
/// empty unless the image itself is.
pub fn partition_rows(height: u32, threads: usize) -> Vec<Range<u32>> {
    let threads = (threads as u32).clamp(1, height.max(1));
    let rows_per_block = height / threads;

    let mut blocks = Vec::with_capacity(threads as usize);
    let mut start = 0;
    for t in 0..threads {
        let end = if t == threads - 1 {
            height
        } else {
            start + rows_per_block
        };
        blocks.push(start..end);
        start = end;
    }
    blocks
}

/// Render the scene with one worker thread per row block.
///
/// Blocks until every worker has finished. Each worker owns its random
/// number generator, derived from `config.seed` and the worker index.
pub fn render_parallel(
    camera: &Camera,
    world: &dyn Hittable,
    config: &RenderConfig,
) -> RenderResult<Framebuffer> {
    let width = camera.image_width();
    let height = camera.image_height();
    let blocks = partition_rows(height, thread_count(config));
    let tracer = PathTracer::new(world, camera.background()).with_ray_epsilon(config.ray_epsilon);

    log::info!(
        "Rendering {}x{} @ {} spp on {} threads",
        width,
        height,
        camera.effective_samples(),
        blocks.len()
    );

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(blocks.len())
        .thread_name(|index| format!("lumen-worker-{index}"))
        .build()?;

    let mut image = Framebuffer::new(width, height);
    let start = Instant::now();

    let tracer = &tracer;
    let mut rest: &mut [Color] = &mut image.pixels;

    pool.scope(move |scope| {
        for (index, rows) in blocks.into_iter().enumerate() {
            let len = rows.len() * width as usize;
            let (block, tail) = std::mem::take(&mut rest).split_at_mut(len);
            rest = tail;

            scope.spawn(move |_| {
                let mut rng = config.worker_rng(index);
                let worker_start = Instant::now();
                render_rows(camera, tracer, rows.start, block, &mut rng);
                log::debug!(
                    "Worker {} finished rows {:?} in {:?}",
                    index,
                    rows,
                    worker_start.elapsed()
                );
            });
        }
    });

    log::info!("Render finished in {:?}", start.elapsed());
    Ok(image)
}
