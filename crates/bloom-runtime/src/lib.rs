//! Worker pool that decorates regions in parallel over one shared engine.
#![forbid(unsafe_code)]

use std::sync::{Arc, Mutex, MutexGuard};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Instant;

use bloom_chunk::RegionBuf;
use bloom_world::{DecorationEngine, DecorationStats, WorldContext};
use crossbeam_channel::{Receiver, Sender, unbounded};
use hashbrown::HashMap;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("failed to start decoration workers: {0}")]
    Pool(#[from] ThreadPoolBuildError),
}

#[derive(Clone, Debug)]
pub struct DecorateJob {
    pub job_id: u64,
    pub buf: RegionBuf,
    pub ctx: WorldContext,
}

#[derive(Clone, Debug)]
pub struct DecorateOut {
    pub job_id: u64,
    pub buf: RegionBuf,
    pub stats: DecorationStats,
    pub t_decorate_ms: u32,
}

fn process_job(job: DecorateJob, engine: &DecorationEngine, tx: &Sender<DecorateOut>) {
    let DecorateJob {
        job_id,
        mut buf,
        ctx,
    } = job;
    let t0 = Instant::now();
    let stats = engine.decorate(&mut buf, &ctx);
    let t_decorate_ms = t0.elapsed().as_millis().min(u128::from(u32::MAX)) as u32;
    log::info!(
        target: "perf",
        "ms decorate={} job={} origin=({}, {}, {}) columns={} placements={}",
        t_decorate_ms,
        job_id,
        buf.origin.x,
        buf.origin.y,
        buf.origin.z,
        stats.columns,
        stats.placements()
    );
    let _ = tx.send(DecorateOut {
        job_id,
        buf,
        stats,
        t_decorate_ms,
    });
}

pub struct Runtime {
    job_tx: Sender<DecorateJob>,
    res_rx: Receiver<DecorateOut>,
    // Results set aside by `decorate_all` for jobs it did not submit.
    parked: Mutex<Vec<DecorateOut>>,
    _pool: Arc<ThreadPool>,
    queued: Arc<AtomicUsize>,
    inflight: Arc<AtomicUsize>,
    pub workers: usize,
}

impl Runtime {
    /// Starts one worker per available core.
    pub fn new(engine: Arc<DecorationEngine>) -> Result<Self, RuntimeError> {
        let workers = thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(8);
        Self::with_workers(engine, workers)
    }

    pub fn with_workers(
        engine: Arc<DecorationEngine>,
        workers: usize,
    ) -> Result<Self, RuntimeError> {
        let workers = workers.max(1);
        let (job_tx, job_rx) = unbounded::<DecorateJob>();
        let (res_tx, res_rx) = unbounded::<DecorateOut>();
        let queued = Arc::new(AtomicUsize::new(0));
        let inflight = Arc::new(AtomicUsize::new(0));

        let pool = Arc::new(
            ThreadPoolBuilder::new()
                .num_threads(workers)
                .thread_name(|i| format!("bloom-decorate-{i}"))
                .build()?,
        );
        for _ in 0..workers {
            let rx = job_rx.clone();
            let tx = res_tx.clone();
            let engine = engine.clone();
            let queued = queued.clone();
            let inflight = inflight.clone();
            pool.spawn(move || {
                while let Ok(job) = rx.recv() {
                    queued.fetch_sub(1, Ordering::Relaxed);
                    inflight.fetch_add(1, Ordering::Relaxed);
                    process_job(job, engine.as_ref(), &tx);
                    inflight.fetch_sub(1, Ordering::Relaxed);
                }
            });
        }
        log::debug!("decoration runtime started with {workers} workers");

        Ok(Self {
            job_tx,
            res_rx,
            parked: Mutex::new(Vec::new()),
            _pool: pool,
            queued,
            inflight,
            workers,
        })
    }

    pub fn submit(&self, job: DecorateJob) {
        self.queued.fetch_add(1, Ordering::Relaxed);
        if self.job_tx.send(job).is_err() {
            self.queued.fetch_sub(1, Ordering::Relaxed);
        }
    }

    fn parked(&self) -> MutexGuard<'_, Vec<DecorateOut>> {
        self.parked.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Finished regions available right now, without blocking.
    pub fn drain_results(&self) -> Vec<DecorateOut> {
        let mut out = std::mem::take(&mut *self.parked());
        out.extend(self.res_rx.try_iter());
        out
    }

    /// Blocks until the next region finishes.
    pub fn recv_result(&self) -> Option<DecorateOut> {
        let parked = self.parked().pop();
        if parked.is_some() {
            return parked;
        }
        self.res_rx.recv().ok()
    }

    /// (queued, in flight)
    pub fn queue_counts(&self) -> (usize, usize) {
        (
            self.queued.load(Ordering::Relaxed),
            self.inflight.load(Ordering::Relaxed),
        )
    }

    /// Submits every job and waits for all of them, keyed by job id.
    ///
    /// Results of jobs submitted earlier through [`Runtime::submit`] that
    /// finish meanwhile are kept for `drain_results`/`recv_result`. Job ids
    /// must not collide with jobs still outstanding; repeated ids in `jobs`
    /// keep the last result.
    pub fn decorate_all(&self, jobs: Vec<DecorateJob>) -> HashMap<u64, DecorateOut> {
        let mut pending: HashMap<u64, usize> = HashMap::with_capacity(jobs.len());
        let mut remaining = jobs.len();
        for job in jobs {
            *pending.entry(job.job_id).or_default() += 1;
            self.submit(job);
        }
        let mut out = HashMap::with_capacity(pending.len());
        while remaining > 0 {
            let Ok(done) = self.res_rx.recv() else {
                break;
            };
            match pending.get_mut(&done.job_id) {
                Some(left) if *left > 0 => {
                    *left -= 1;
                    remaining -= 1;
                    out.insert(done.job_id, done);
                }
                _ => self.parked().push(done),
            }
        }
        out
    }
}

/// Decorates a batch of regions on the global rayon pool and sums their stats.
pub fn decorate_regions_par(
    engine: &DecorationEngine,
    regions: &mut [RegionBuf],
    ctx: &WorldContext,
) -> DecorationStats {
    regions
        .par_iter_mut()
        .map(|buf| engine.decorate(buf, ctx))
        .reduce(DecorationStats::default, |mut acc, s| {
            acc += s;
            acc
        })
}
