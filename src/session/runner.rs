use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::task::{JoinError, JoinHandle};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::inference::{InferenceError, InferenceProvider, InferenceResult, RealClassification};
use crate::report::Reporter;
use crate::session::command::HELP_TEXT;
use crate::session::{OperatorCommand, Session};

#[derive(Debug, Clone)]
pub struct RunnerOptions {
    pub tick_interval: Duration,
    pub sample_path: PathBuf,
}

impl RunnerOptions {
    fn fps(&self) -> f64 {
        1.0 / self.tick_interval.as_secs_f64().max(1e-3)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    Quit,
    InputClosed,
}

enum Flow {
    Continue,
    Exit(ExitReason),
}

type ClassifyTask = JoinHandle<InferenceResult<RealClassification>>;

/// Drives a session from operator commands read line by line from `input`.
///
/// Ticks fire on a fixed interval while the session is running. A real-sample
/// classification runs as a separate task whose handle this loop polls, so it
/// never stalls the ticks; its result is applied here, and this loop is the
/// only writer of the session history. A task that panics is reported as a
/// failure. On exit any in-flight classification is awaited and applied
/// before returning.
pub async fn run_session<R, I, W>(
    session: &mut Session<R>,
    provider: Arc<InferenceProvider>,
    options: &RunnerOptions,
    input: I,
    reporter: &mut Reporter<W>,
) -> std::io::Result<ExitReason>
where
    R: Rng,
    I: AsyncBufRead + Unpin,
    W: Write,
{
    drive(session, provider, options, input, reporter, spawn_classification).await
}

fn spawn_classification(provider: Arc<InferenceProvider>, sample_path: PathBuf) -> ClassifyTask {
    tokio::spawn(async move { provider.classify_sample(&sample_path).await })
}

async fn drive<R, I, W, S>(
    session: &mut Session<R>,
    provider: Arc<InferenceProvider>,
    options: &RunnerOptions,
    input: I,
    reporter: &mut Reporter<W>,
    spawn: S,
) -> std::io::Result<ExitReason>
where
    R: Rng,
    I: AsyncBufRead + Unpin,
    W: Write,
    S: Fn(Arc<InferenceProvider>, PathBuf) -> ClassifyTask,
{
    let loader = Arc::clone(&provider);
    tokio::spawn(async move {
        let _ = loader.load().await;
    });

    let mut pending: Option<ClassifyTask> = None;
    let mut lines = input.lines();
    let mut ticker = tokio::time::interval(options.tick_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let reason = loop {
        let flow = tokio::select! {
            _ = ticker.tick(), if session.is_running() => {
                if let Some(outcome) = session.tick() {
                    reporter.tick(&outcome)?;
                }
                Flow::Continue
            }
            joined = join_pending(&mut pending), if pending.is_some() => {
                pending = None;
                apply_real_result(session, reporter, flatten_join(joined))?;
                Flow::Continue
            }
            line = lines.next_line() => {
                match line? {
                    Some(line) => {
                        let was_running = session.is_running();
                        let flow = handle_line(
                            &line,
                            session,
                            &provider,
                            options,
                            &spawn,
                            &mut pending,
                            reporter,
                        )?;
                        if !was_running && session.is_running() {
                            ticker.reset();
                        }
                        flow
                    }
                    None => Flow::Exit(ExitReason::InputClosed),
                }
            }
        };
        reporter.flush()?;
        if let Flow::Exit(reason) = flow {
            break reason;
        }
    };

    if let Some(task) = pending.take() {
        apply_real_result(session, reporter, flatten_join(task.await))?;
    }
    reporter.flush()?;
    Ok(reason)
}

async fn join_pending(
    pending: &mut Option<ClassifyTask>,
) -> Result<InferenceResult<RealClassification>, JoinError> {
    match pending {
        Some(task) => task.await,
        None => std::future::pending().await,
    }
}

fn flatten_join(
    joined: Result<InferenceResult<RealClassification>, JoinError>,
) -> InferenceResult<RealClassification> {
    joined.unwrap_or_else(|err| Err(InferenceError::TaskFailed(err.to_string())))
}

fn handle_line<R, W, S>(
    line: &str,
    session: &mut Session<R>,
    provider: &Arc<InferenceProvider>,
    options: &RunnerOptions,
    spawn: &S,
    pending: &mut Option<ClassifyTask>,
    reporter: &mut Reporter<W>,
) -> std::io::Result<Flow>
where
    R: Rng,
    W: Write,
    S: Fn(Arc<InferenceProvider>, PathBuf) -> ClassifyTask,
{
    if line.trim().is_empty() {
        return Ok(Flow::Continue);
    }
    let cmd = match line.parse::<OperatorCommand>() {
        Ok(cmd) => cmd,
        Err(err) => {
            reporter.notice(&err.to_string())?;
            return Ok(Flow::Continue);
        }
    };
    debug!("operator command: {:?}", cmd);

    match cmd {
        OperatorCommand::Start => {
            session.start();
        }
        OperatorCommand::Stop => {
            session.stop();
        }
        OperatorCommand::Toggle => {
            session.toggle();
        }
        OperatorCommand::Force(label) => {
            session.toggle_forced(label);
        }
        OperatorCommand::ClearForce => {
            session.set_forced(None);
        }
        OperatorCommand::Classify => {
            if pending.is_some() {
                reporter.notice("a classification is already running")?;
            } else if let Err(err) = provider.handle() {
                reporter.notice(&failure_notice(&err))?;
            } else {
                *pending = Some(spawn(Arc::clone(provider), options.sample_path.clone()));
            }
        }
        OperatorCommand::Status => {
            reporter.status(&session.status(provider.is_loaded(), options.fps()))?;
        }
        OperatorCommand::History => {
            reporter.history(session.history())?;
        }
        OperatorCommand::Help => {
            reporter.raw(HELP_TEXT)?;
        }
        OperatorCommand::Quit => return Ok(Flow::Exit(ExitReason::Quit)),
    }
    Ok(Flow::Continue)
}

fn apply_real_result<R: Rng, W: Write>(
    session: &mut Session<R>,
    reporter: &mut Reporter<W>,
    result: InferenceResult<RealClassification>,
) -> std::io::Result<()> {
    match result {
        Ok(real) => {
            info!(
                "real sample classified as {} ({:.2}%)",
                real.prediction.activity.key(),
                real.prediction.confidence * 100.0
            );
            let outcome = session.apply_real(&real);
            reporter.real_result(&real, &outcome)
        }
        Err(err) => {
            warn!("inference failed: {err}");
            reporter.notice(&failure_notice(&err))
        }
    }
}

pub fn failure_notice(err: &InferenceError) -> String {
    match err {
        InferenceError::NotLoaded => {
            "inference refused: model is not loaded yet; wait for it to finish loading".to_string()
        }
        InferenceError::ModelLoad(_) => {
            format!("inference refused: {err}; check the model graph file")
        }
        _ => format!("inference failed: {err}; check the model and sample files"),
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/session/runner.rs"]
mod tests;
