//! Thread-parallel driver for [`super::p3color`].
//!
//! Frames live on [`Ctx`]'s own LIFO stack, guarded by a single [`Mutex`]:
//! a worker locks the context, pops the next frame, and runs it to
//! completion (any child frames a step spawns land back on the same stack)
//! before releasing the lock. This preserves the sequential driver's
//! invariant that a frame is never observed half-colored by another frame —
//! the parallelism is in which idle worker picks up the next queued frame,
//! not in interleaving steps of two frames at once. `active` counts frames
//! that exist but haven't finished, so a worker only treats an empty stack
//! as "done" once every other worker also sees nothing left to claim.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use super::p3color::Ctx;
use crate::graph::Graph;

struct Pool<'g> {
    ctx: Mutex<Ctx<'g>>,
    active: AtomicUsize,
}

fn worker(pool: &Pool) {
    loop {
        let mut ctx = pool.ctx.lock().unwrap();
        let mut frame = match ctx.frames_mut().pop() {
            Some(f) => f,
            None => {
                drop(ctx);
                if pool.active.load(Ordering::Acquire) == 0 {
                    return;
                }
                std::thread::yield_now();
                continue;
            }
        };

        let before = ctx.frames_mut().len();
        while !ctx.step(&mut frame) {}
        let spawned = ctx.frames_mut().len() - before;
        drop(ctx);

        if spawned > 0 {
            pool.active.fetch_add(spawned, Ordering::AcqRel);
        }
        pool.active.fetch_sub(1, Ordering::AcqRel);
    }
}

/// Properly 3-path-color `graph` using `threads` worker threads.
pub fn color_parallel(graph: &Graph, p: &[u32], q: &[u32], threads: usize) -> Vec<u8> {
    let ctx = Ctx::init(graph, p, q);

    let pool = Pool {
        ctx: Mutex::new(ctx),
        active: AtomicUsize::new(1),
    };

    std::thread::scope(|scope| {
        for _ in 0..threads.max(1) {
            scope.spawn(|| worker(&pool));
        }
    });

    let ctx = pool.ctx.into_inner().unwrap();
    let mut coloring = vec![0u8; graph.n() as usize];
    for v in 0..graph.n() {
        let mark = ctx.mark(v);
        debug_assert!(mark > 0 && mark <= 3);
        coloring[v as usize] = mark as u8;
    }
    coloring
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::graph::path_color;
    use crate::graph::plane::gen;

    #[test]
    fn matches_serial_result_structure() {
        use rand::SeedableRng;
        use rand_chacha::ChaCha8Rng;

        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let g = gen::triangulation(200, &mut rng, [0.5, 1.0]);
        let coloring = color_parallel(&g, &[0], &[1], 4);
        assert!(path_color::verify(&g, &coloring));
    }

    #[test]
    fn valid_for_a_range_of_thread_counts() {
        use rand::SeedableRng;
        use rand_chacha::ChaCha8Rng;

        let mut rng = ChaCha8Rng::seed_from_u64(17);
        let g = gen::triangulation(120, &mut rng, [0.5, 1.0]);
        for threads in [1usize, 2, 8, 64] {
            let coloring = color_parallel(&g, &[0], &[1], threads);
            assert!(path_color::verify(&g, &coloring), "threads={threads}");
        }
    }
}
