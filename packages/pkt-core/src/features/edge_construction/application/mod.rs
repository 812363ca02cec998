//! Edge construction application layer

mod worker;

pub use worker::{EdgeTask, EdgeTypeWorker, WorkerContext, WorkerOutput};
