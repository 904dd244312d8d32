//! stagepipe: run a chain of pure stage functions as a concurrent producer/consumer graph.
//!
//! The calling thread is the entry stage. Every further stage runs once on its own thread,
//! receives one value over a bounded channel, transforms it and sends the result on. Payloads
//! are built from the algebraic [`value`] types (sequences, unit, sums, products), so any
//! nesting of them travels through a stage channel as one owned value.

pub mod engine;
pub mod pipeline;
pub mod types;
pub mod utils;
pub mod value;

/// Re-export types for API
pub use types::*;

pub use pipeline::{Pipeline, PipelineError, ResourceLedger};
pub use value::{Algebraic, Label, List, Prod, Shape, Sum, Unit, ValueError};

/// Result alias used by public stagepipe API
pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// Run `input` through a single stage `f` on its own thread and return the result.
///
/// ```ignore
/// let doubled = stagepipe::run(|x: i32| x * 2, 21)?;
/// assert_eq!(doubled, 42);
/// ```
pub fn run<I, O, F>(f: F, input: I) -> Result<O>
where
    I: Send + 'static,
    O: Send + 'static,
    F: Fn(I) -> O + Send + Sync + 'static,
{
    Pipeline::<I, I>::new().stage("stage", f).run(input)
}
