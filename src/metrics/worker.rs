//! Background W' computation.
//!
//! Keeps the convolution off interactive threads. Only the most recently
//! submitted ride matters: submitting another cancels the one in flight,
//! and superseded rides never produce an outcome.

use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use crossbeam::channel::{unbounded, Receiver, Sender};
use uuid::Uuid;

use super::analytics::error::AnalyticsError;
use super::wprime::{CancelToken, WPrimeAnalysis, WPrimeModel};
use super::zones::ZoneProvider;
use crate::recording::Ride;

/// Zone provider shared with the worker thread.
pub type SharedZones = Arc<dyn ZoneProvider + Send + Sync>;

/// A finished computation.
#[derive(Debug, Clone)]
pub struct BalanceOutcome {
    /// Ride the analysis belongs to
    pub ride_id: Uuid,
    /// The analysis
    pub analysis: Arc<WPrimeAnalysis>,
}

struct Job {
    ride: Arc<Ride>,
    cancel: CancelToken,
}

/// Runs W' computations on a dedicated thread.
pub struct BalanceWorker {
    jobs: Option<Sender<Job>>,
    outcomes: Receiver<BalanceOutcome>,
    current: Mutex<Option<CancelToken>>,
    handle: Option<JoinHandle<()>>,
}

impl BalanceWorker {
    /// Spawn the worker thread.
    pub fn spawn(model: WPrimeModel, zones: Option<SharedZones>) -> std::io::Result<Self> {
        let (job_tx, job_rx) = unbounded::<Job>();
        let (outcome_tx, outcome_rx) = unbounded();

        let handle = std::thread::Builder::new()
            .name("wprime-worker".to_string())
            .spawn(move || run(model, zones, job_rx, outcome_tx))?;

        Ok(Self {
            jobs: Some(job_tx),
            outcomes: outcome_rx,
            current: Mutex::new(None),
            handle: Some(handle),
        })
    }

    /// Queue a ride, cancelling whatever was submitted before it.
    pub fn submit(&self, ride: Arc<Ride>) {
        let cancel = CancelToken::new();
        {
            let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
            if let Some(previous) = current.replace(cancel.clone()) {
                previous.cancel();
            }
        }

        if let Some(jobs) = &self.jobs {
            if jobs.send(Job { ride, cancel }).is_err() {
                tracing::warn!("W' worker has stopped, ride not queued");
            }
        }
    }

    /// Cancel the in-flight ride, if any.
    pub fn cancel(&self) {
        let current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(token) = current.as_ref() {
            token.cancel();
        }
    }

    /// Receiver for finished computations.
    pub fn outcomes(&self) -> &Receiver<BalanceOutcome> {
        &self.outcomes
    }
}

impl Drop for BalanceWorker {
    fn drop(&mut self) {
        self.cancel();
        // Closing the job channel ends the worker loop
        self.jobs.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::error!("W' worker thread panicked");
            }
        }
    }
}

fn run(
    model: WPrimeModel,
    zones: Option<SharedZones>,
    jobs: Receiver<Job>,
    outcomes: Sender<BalanceOutcome>,
) {
    tracing::debug!("W' worker started");

    for job in jobs {
        if job.cancel.is_cancelled() {
            continue;
        }

        let zones = zones.as_deref().map(|z| z as &dyn ZoneProvider);
        match model.compute_cancellable(&job.ride, zones, &job.cancel) {
            Ok(analysis) if !job.cancel.is_cancelled() => {
                let outcome = BalanceOutcome {
                    ride_id: job.ride.id,
                    analysis: Arc::new(analysis),
                };
                if outcomes.send(outcome).is_err() {
                    break;
                }
            }
            Ok(_) | Err(AnalyticsError::Cancelled) => {
                tracing::debug!("W' computation for ride {} superseded", job.ride.id);
            }
            Err(e) => {
                tracing::warn!("W' computation for ride {} failed: {}", job.ride.id, e);
            }
        }
    }

    tracing::debug!("W' worker stopped");
}
