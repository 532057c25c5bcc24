//! Thread-parallel driver for [`super::p3choose`], structured the same way
//! as [`super::p3color_parallel`]: frames live on [`Ctx`]'s own LIFO stack,
//! guarded by a single [`Mutex`]. A worker locks the context, pops the next
//! frame, and runs it to completion before releasing the lock, so no other
//! worker ever observes a [`super::p3choose::ColorList`] mid-narrowing —
//! the sequential driver's per-frame-to-completion order is what makes the
//! algorithm correct, and holding the lock across a whole frame preserves
//! that order across threads. `active` counts frames that exist but haven't
//! finished, so a worker only treats an empty stack as "done" once every
//! other worker also sees nothing left to claim.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use super::p3choose::{ColorList, Ctx};
use crate::graph::GraphAug;

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

/// List-color `graph` using `threads` worker threads.
pub fn choose_parallel(
    graph: &GraphAug,
    color_lists: &[ColorList],
    outer_face: &[u32],
    threads: usize,
) -> Vec<u8> {
    let ctx = Ctx::init(graph, color_lists, outer_face);

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
        coloring[v as usize] = ctx.color(v);
    }
    coloring
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::graph::build;
    use crate::graph::path_color;
    use crate::graph::plane::gen;

    #[test]
    fn matches_serial_result_structure() {
        use rand::SeedableRng;
        use rand_chacha::ChaCha8Rng;

        let mut rng = ChaCha8Rng::seed_from_u64(13);
        let plain = gen::triangulation(150, &mut rng, [0.5, 1.0]);
        let g = build::augment(&plain);
        let lists: Vec<ColorList> = (0..150).map(|_| ColorList::from_slice(&[1, 2, 3])).collect();
        let coloring = choose_parallel(&g, &lists, &[0, 2, 1], 4);
        assert!(path_color::verify(&plain, &coloring));
    }

    #[test]
    fn valid_for_a_range_of_thread_counts() {
        use rand::SeedableRng;
        use rand_chacha::ChaCha8Rng;

        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let plain = gen::triangulation(100, &mut rng, [0.5, 1.0]);
        let g = build::augment(&plain);
        let lists: Vec<ColorList> = (0..100).map(|_| ColorList::from_slice(&[1, 2, 3])).collect();
        for threads in [1usize, 2, 8, 64] {
            let coloring = choose_parallel(&g, &lists, &[0, 2, 1], threads);
            assert!(path_color::verify(&plain, &coloring), "threads={threads}");
        }
    }
}
