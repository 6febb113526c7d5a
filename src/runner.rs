//! Races the three cover algorithms against a watchdog.
//!
//! Each query gets four scoped threads: one per solver plus a watchdog. The
//! solvers share the graph immutably and one [`CancelToken`]. The watchdog
//! waits for whichever comes first, the "all solvers finished" signal or the
//! deadline; on the deadline it cancels the token and every solver still
//! running bails out at its next checkpoint. [`run`] returns only after all
//! four threads have been joined.
//!
//! A solver that gets past its last checkpoint before the deadline keeps its
//! result and reports `Completed`, even when the watchdog fired meanwhile.

use crossbeam::{
    channel::{self, Receiver, Sender},
    select,
};
use log::debug;
use std::{
    fmt,
    sync::atomic::{AtomicUsize, Ordering},
    thread,
    time::Duration,
};

use crate::{approx, cancel::CancelToken, cputime::CpuStopwatch, exact, Cover, Graph};

pub const SOLVER_COUNT: usize = 3;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    CnfSat,
    ApproxOne,
    ApproxTwo,
}

impl Algorithm {
    /// Canonical slot order of a [`RunOutcome`].
    pub const ALL: [Algorithm; SOLVER_COUNT] =
        [Algorithm::CnfSat, Algorithm::ApproxOne, Algorithm::ApproxTwo];

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::CnfSat => "CNF-SAT-VC",
            Algorithm::ApproxOne => "APPROX-VC-1",
            Algorithm::ApproxTwo => "APPROX-VC-2",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Anything that can compute a cover while honouring cancellation.
///
/// `None` means the solver noticed `cancel` and gave up.
pub trait CoverSolver: Sync {
    fn solve(&self, graph: &Graph, cancel: &CancelToken) -> Option<Cover>;
}

impl CoverSolver for Algorithm {
    fn solve(&self, graph: &Graph, cancel: &CancelToken) -> Option<Cover> {
        match self {
            Algorithm::CnfSat => exact::exact_cover(graph, cancel),
            Algorithm::ApproxOne => approx::max_degree_cover(graph, cancel),
            Algorithm::ApproxTwo => approx::edge_sweep_cover(graph, cancel),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoverResult {
    /// `elapsed` is CPU time of the solver thread, not wall time.
    Completed { cover: Cover, elapsed: Duration },
    TimedOut,
}

impl CoverResult {
    pub fn cover(&self) -> Option<&Cover> {
        match self {
            CoverResult::Completed { cover, .. } => Some(cover),
            CoverResult::TimedOut => None,
        }
    }

    pub fn elapsed(&self) -> Option<Duration> {
        match self {
            CoverResult::Completed { elapsed, .. } => Some(*elapsed),
            CoverResult::TimedOut => None,
        }
    }

    pub fn is_timed_out(&self) -> bool {
        matches!(self, CoverResult::TimedOut)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchdogOutcome {
    /// Every solver finished first; the watchdog stood down.
    AllDone,
    /// The deadline passed and the watchdog cancelled outstanding solvers.
    FiredTimeout,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    results: [CoverResult; SOLVER_COUNT],
    watchdog: WatchdogOutcome,
}

impl RunOutcome {
    pub fn results(&self) -> &[CoverResult; SOLVER_COUNT] {
        &self.results
    }

    pub fn get(&self, algorithm: Algorithm) -> &CoverResult {
        &self.results[algorithm.index()]
    }

    pub fn watchdog(&self) -> WatchdogOutcome {
        self.watchdog
    }

    pub fn iter(&self) -> impl Iterator<Item = (Algorithm, &CoverResult)> {
        Algorithm::ALL.into_iter().zip(self.results.iter())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunnerConfig {
    /// Wall-clock budget shared by all three solvers.
    pub timeout: Duration,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

pub fn run(graph: &Graph, config: &RunnerConfig) -> RunOutcome {
    run_with(
        graph,
        config,
        [&Algorithm::CnfSat, &Algorithm::ApproxOne, &Algorithm::ApproxTwo],
    )
}

/// Like [`run`], with the solver for each slot supplied by the caller.
pub fn run_with(
    graph: &Graph,
    config: &RunnerConfig,
    solvers: [&dyn CoverSolver; SOLVER_COUNT],
) -> RunOutcome {
    let cancel = CancelToken::new();
    let finished = AtomicUsize::new(0);
    let (done_tx, done_rx) = channel::bounded::<()>(1);

    let (results, watchdog) = thread::scope(|scope| {
        let watchdog = scope.spawn(|| watch(&done_rx, config.timeout, &cancel));
        let (cancel, finished, done_tx) = (&cancel, &finished, &done_tx);
        let tasks = Algorithm::ALL.map(|algorithm| {
            let solver = solvers[algorithm.index()];
            scope.spawn(move || {
                let _finished = Finished { count: finished, done: done_tx };
                solve_task(algorithm, solver, graph, cancel)
            })
        });
        let results = tasks.map(|task| {
            task.join()
                .unwrap_or_else(|e| std::panic::resume_unwind(e))
        });
        let watchdog = watchdog
            .join()
            .unwrap_or_else(|e| std::panic::resume_unwind(e));
        (results, watchdog)
    });
    debug!("run finished, watchdog {watchdog:?}");
    RunOutcome { results, watchdog }
}

fn watch(done: &Receiver<()>, timeout: Duration, cancel: &CancelToken) -> WatchdogOutcome {
    select! {
        recv(done) -> _ => WatchdogOutcome::AllDone,
        recv(channel::after(timeout)) -> _ => {
            debug!("watchdog fired after {timeout:?}, cancelling outstanding solvers");
            cancel.cancel();
            WatchdogOutcome::FiredTimeout
        }
    }
}

fn solve_task(
    algorithm: Algorithm,
    solver: &dyn CoverSolver,
    graph: &Graph,
    cancel: &CancelToken,
) -> CoverResult {
    debug!("{algorithm} started");
    let clock = CpuStopwatch::start();
    let cover = solver.solve(graph, cancel);
    let elapsed = clock.elapsed();
    match cover {
        Some(cover) => {
            debug_assert!(graph.validate_cover(&cover));
            debug!("{algorithm} finished with {} vertices in {elapsed:?}", cover.len());
            CoverResult::Completed { cover, elapsed }
        }
        None => {
            debug!("{algorithm} cancelled after {elapsed:?}");
            CoverResult::TimedOut
        }
    }
}

/// Counts a solver as finished when dropped, panicking or not, and tells
/// the watchdog once the last one is in.
struct Finished<'a> {
    count: &'a AtomicUsize,
    done: &'a Sender<()>,
}

impl Drop for Finished<'_> {
    fn drop(&mut self) {
        if self.count.fetch_add(1, Ordering::AcqRel) + 1 == SOLVER_COUNT {
            let _ = self.done.try_send(());
        }
    }
}
