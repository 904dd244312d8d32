//! Example instantiation (integer sorting) and the CLI around it.

pub mod arg_parser;
pub mod handlers;
pub mod sort;

pub use arg_parser::Cli;
pub use handlers::handle_run;
pub use sort::{
    Checked, Halves, checked_sort, checked_sort_pipeline, halve, merge, merge_sort_pipeline,
    run_sort, sort, sort_halves, sort_pipeline,
};
