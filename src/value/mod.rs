//! Algebraic value encoding: sequences, unit, sums and products that nest freely.
//!
//! Every concrete instantiation has a statically known inline size (sequences contribute a
//! size-tagged header; their elements live out of line and move with the value). Payloads built
//! from these types cross a stage channel as one owned block, no per-type marshalling needed.

pub mod error;
pub mod label;
pub mod list;
pub mod prod;
pub mod shape;
pub mod sum;

pub use error::ValueError;
pub use label::Label;
pub use list::List;
pub use prod::Prod;
pub use shape::{Algebraic, Shape};
pub use sum::{Sum, Unit};
