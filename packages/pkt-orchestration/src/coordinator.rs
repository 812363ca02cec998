//! BuildCoordinator
//!
//! Static, order-based partitioning of edge types over a fixed rayon pool.
//! Task `i` goes to worker `i % workers`; each worker processes its bucket
//! sequentially. Fragments and error logs are merged on the calling thread
//! after every worker has returned, in worker index order.

use rayon::prelude::*;
use tracing::{debug, info};

use pkt_core::features::edge_construction::{
    EdgeStatistics, EdgeTask, EdgeTypeWorker, ErrorLog, WorkerContext, WorkerOutput,
};
use pkt_core::KnowledgeGraph;

use crate::error::{OrchestratorError, Result};

/// Merged result of one coordinated run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoordinatorOutput {
    pub graph: KnowledgeGraph,
    pub error_log: ErrorLog,
    /// Per edge type, sorted by edge type
    pub stats: Vec<EdgeStatistics>,
}

#[derive(Debug, Clone, Copy)]
pub struct BuildCoordinator {
    workers: usize,
}

impl BuildCoordinator {
    pub fn new(workers: usize) -> Result<Self> {
        if workers == 0 {
            return Err(pkt_core::ConfigError::InvalidWorkerCount(workers).into());
        }
        Ok(Self { workers })
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Assign tasks round-robin. Workers with no tasks get no bucket.
    pub fn partition(&self, tasks: Vec<EdgeTask>) -> Vec<(usize, Vec<EdgeTask>)> {
        let mut buckets: Vec<Vec<EdgeTask>> = (0..self.workers).map(|_| Vec::new()).collect();
        for (index, task) in tasks.into_iter().enumerate() {
            buckets[index % self.workers].push(task);
        }
        buckets
            .into_iter()
            .enumerate()
            .filter(|(_, bucket)| !bucket.is_empty())
            .collect()
    }

    /// Build every task and union the fragments into `base`.
    ///
    /// Any worker error fails the run; nothing is merged in that case.
    pub fn run(
        &self,
        base: KnowledgeGraph,
        tasks: Vec<EdgeTask>,
        ctx: WorkerContext<'_>,
    ) -> Result<CoordinatorOutput> {
        let task_count = tasks.len();
        let buckets = self.partition(tasks);
        info!(
            "Constructing {} edge types on {} workers ({} active)",
            task_count,
            self.workers,
            buckets.len()
        );

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .thread_name(|i| format!("pkt-worker-{}", i))
            .build()
            .map_err(OrchestratorError::pool)?;

        let results: Vec<(usize, pkt_core::Result<WorkerOutput>)> = pool.install(|| {
            buckets
                .into_par_iter()
                .map(|(worker, bucket)| {
                    debug!("Worker {}: {} edge types", worker, bucket.len());
                    (worker, EdgeTypeWorker::run(ctx, &bucket))
                })
                .collect()
        });
        drop(pool);

        let mut outputs = Vec::with_capacity(results.len());
        for (worker, result) in results {
            match result {
                Ok(output) => outputs.push(output),
                Err(source) => return Err(OrchestratorError::WorkerFailed { worker, source }),
            }
        }

        let mut merged = CoordinatorOutput {
            graph: base,
            ..Default::default()
        };
        let base_len = merged.graph.len();
        for output in outputs {
            merged.graph.union(output.fragment);
            merged.error_log.merge(output.error_log);
            merged.stats.extend(output.stats);
        }
        merged.stats.sort_by(|a, b| a.edge_type.cmp(&b.edge_type));

        info!(
            "Merged graph: {} triples ({} constructed), {} edge types with unresolved ids",
            merged.graph.len(),
            merged.graph.len() - base_len,
            merged.error_log.len()
        );
        Ok(merged)
    }
}
