use anyhow::{Context, Result};
use crossbeam_channel::Receiver;
use log::debug;
use std::sync::Arc;

use super::channel::{Channel, ChannelSet};
use super::context::{PipelineTuning, StageContext};
use super::crew::Crew;
use super::error_handler::PipelineError;
use super::ledger::ResourceLedger;
use super::stage::Stage;
use crate::PipelineOpts;

/// Per-invocation resources a stage needs while it is being wired in.
pub struct Wiring<'a> {
    pub crew: &'a mut Crew,
    pub channels: &'a mut ChannelSet,
    pub tuning: &'a PipelineTuning,
    pub ledger: &'a Arc<ResourceLedger>,
}

/// Wires the chain for one invocation: takes the receiver feeding the first stage and returns
/// the receiver the caller reads the final result from.
type Wire<I, O> =
    Arc<dyn Fn(Receiver<I>, &mut Wiring<'_>) -> Result<Receiver<O>, PipelineError> + Send + Sync>;

/// Linear chain of stages `I -> ... -> O`.
///
/// The calling thread is the entry stage: it sends the input and blocks on the final receive.
/// Every stage added with [`Pipeline::stage`] gets its own thread per invocation, fed by a
/// channel created right before it is spawned. `k` stages use `k + 1` channels and `k` threads.
///
/// ```ignore
/// let pipeline = Pipeline::new().stage("sort", sort);
/// assert_eq!(pipeline.run(vec![3, 1, 2].into())?.into_vec(), vec![1, 2, 3]);
/// ```
pub struct Pipeline<I, O> {
    names: Vec<String>,
    wire: Wire<I, O>,
    tuning: PipelineTuning,
}

impl<I, O> Clone for Pipeline<I, O> {
    fn clone(&self) -> Self {
        Self {
            names: self.names.clone(),
            wire: Arc::clone(&self.wire),
            tuning: self.tuning.clone(),
        }
    }
}

impl<T: Send + 'static> Pipeline<T, T> {
    /// Entry stage only. Running it sends the input through a single channel back to the caller.
    pub fn new() -> Self {
        Self {
            names: Vec::new(),
            wire: Arc::new(
                |rx: Receiver<T>, _: &mut Wiring<'_>| -> Result<Receiver<T>, PipelineError> {
                    Ok(rx)
                },
            ),
            tuning: PipelineTuning::default(),
        }
    }
}

impl<T: Send + 'static> Default for Pipeline<T, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: Send + 'static, O: Send + 'static> Pipeline<I, O> {
    /// Append a stage running `f` on its own thread.
    pub fn stage<P, F>(self, name: impl Into<String>, f: F) -> Pipeline<I, P>
    where
        P: Send + 'static,
        F: Fn(O) -> P + Send + Sync + 'static,
    {
        let stage = Stage::new(name, f);
        let index = self.names.len() + 1;
        let mut names = self.names;
        names.push(stage.name().to_string());
        let prev = self.wire;

        let wire: Wire<I, P> = Arc::new(
            move |rx: Receiver<I>, wiring: &mut Wiring<'_>| -> Result<Receiver<P>, PipelineError> {
                let upstream = prev(rx, &mut *wiring)?;
                spawn_stage(&stage, index, upstream, wiring)
            },
        );

        Pipeline {
            names,
            wire,
            tuning: self.tuning,
        }
    }

    /// Apply `opts` to every later invocation. Fails on an unusable channel capacity.
    pub fn with_opts(mut self, opts: &PipelineOpts) -> Result<Self, PipelineError> {
        self.tuning = PipelineTuning::from_opts(opts)?;
        Ok(self)
    }

    pub fn tuning(&self) -> &PipelineTuning {
        &self.tuning
    }

    pub fn stage_names(&self) -> &[String] {
        &self.names
    }

    /// Number of spawned stages (the entry stage is not counted).
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Execute every stage exactly once on `input` and return the final value. Blocks until the
    /// whole chain has finished; all threads are joined and all channels disposed on return.
    pub fn run(&self, input: I) -> Result<O> {
        let ledger = Arc::new(ResourceLedger::new());
        self.run_tracked(input, &ledger)
    }

    /// [`Pipeline::run`] with caller-supplied accounting, so leaks can be checked afterwards.
    pub fn run_tracked(&self, input: I, ledger: &Arc<ResourceLedger>) -> Result<O> {
        let tuning = &self.tuning;
        // Declaration order is teardown order in reverse: endpoints drop first, then the crew
        // joins, then the channel records are disposed.
        let mut channels = ChannelSet::default();
        let mut crew = Crew::new(ledger, tuning);

        // 1 + 2: channels and stage threads.
        let (entry_tx, entry_rx, record) = Channel::<I>::create(tuning.channel_cap, ledger)
            .context("create entry channel")?
            .split();
        channels.push(record);
        let exit_rx = {
            let mut wiring = Wiring {
                crew: &mut crew,
                channels: &mut channels,
                tuning,
                ledger,
            };
            (self.wire)(entry_rx, &mut wiring)
                .with_context(|| format!("wire pipeline [{}]", self.names.join(" -> ")))?
        };
        debug!(
            "pipeline wired: {} stage thread(s), {} channel(s)",
            crew.len(),
            channels.len()
        );

        // 3: entry stage hands the input to the chain.
        entry_tx
            .send(input)
            .map_err(|_| PipelineError::Disconnected {
                stage: self.first_stage().to_string(),
            })?;
        drop(entry_tx);

        // 4: blocking receive of the final result.
        let received = exit_rx.recv();
        drop(exit_rx);

        // 5: join before anything is disposed. A panicked stage outranks the disconnect it caused.
        crew.join_all()?;
        let output = received.map_err(|_| PipelineError::Disconnected {
            stage: self.last_stage().to_string(),
        })?;

        // 6: dispose.
        channels.dispose_all()?;
        debug!("pipeline finished: {:?}", ledger.snapshot());

        // 7
        Ok(output)
    }

    fn first_stage(&self) -> &str {
        self.names.first().map(String::as_str).unwrap_or("entry")
    }

    fn last_stage(&self) -> &str {
        self.names.last().map(String::as_str).unwrap_or("entry")
    }
}

/// Create the output channel of `stage` and spawn it reading from `upstream`.
fn spawn_stage<I, O>(
    stage: &Stage<I, O>,
    index: usize,
    upstream: Receiver<I>,
    wiring: &mut Wiring<'_>,
) -> Result<Receiver<O>, PipelineError>
where
    I: Send + 'static,
    O: Send + 'static,
{
    let (tx, downstream, record) =
        Channel::<O>::create(wiring.tuning.channel_cap, wiring.ledger)?.split();
    wiring.channels.push(record);
    let ctx = StageContext {
        stage: stage.name().to_string(),
        index,
        input: upstream,
        output: tx,
    };
    let body = stage.clone();
    wiring.crew.spawn(stage.name(), move || body.run(ctx))?;
    Ok(downstream)
}

/// Run `input` through `pipeline` with `opts` applied.
pub fn run_pipeline<I, O>(pipeline: &Pipeline<I, O>, input: I, opts: &PipelineOpts) -> Result<O>
where
    I: Send + 'static,
    O: Send + 'static,
{
    let tuned = pipeline.clone().with_opts(opts)?;
    tuned.run(input)
}
