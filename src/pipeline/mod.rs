//! Pipeline runtime: channels, one-shot stage threads, orchestration and teardown.

pub mod channel;
pub mod context;
pub mod crew;
pub mod error_handler;
pub mod ledger;
pub mod orchestrator;
pub mod stage;

pub use channel::{Channel, ChannelRecord, ChannelSet};
pub use context::{PipelineTuning, StageContext};
pub use crew::Crew;
pub use error_handler::PipelineError;
pub use ledger::{LedgerSnapshot, ResourceLedger};
pub use orchestrator::{Pipeline, Wiring, run_pipeline};
pub use stage::Stage;
