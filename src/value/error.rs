//! Errors raised by the algebraic value accessors.

use thiserror::Error;

use super::Label;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// Checked read of the inactive arm of a sum.
    #[error("read the {expected} arm of a sum whose active arm is {actual}")]
    WrongArm { expected: Label, actual: Label },

    /// Sequence storage could not be materialized. Never truncated.
    #[error("cannot allocate sequence storage for {requested} elements")]
    Allocation { requested: usize },
}
