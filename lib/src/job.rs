//! Background recompute with supersede-on-submit semantics
//!
//! The interactive shell submits one [`ConversionRequest`] per parameter
//! change. Only the newest submission may ever be delivered: submitting
//! cancels the job in flight, and results from older generations are dropped
//! when polled.

use crate::cancel::CancellationToken;
use crate::error::{GlyphtoneError, Result};
use crate::processor::{AsciiConversion, ConversionRequest, convert};
use flume::{Receiver, Sender};
use std::thread;
use std::time::{Duration, Instant};

/// Delivery for the newest submitted request
#[derive(Debug)]
pub enum JobEvent {
    Finished {
        generation: u64,
        conversion: AsciiConversion,
        elapsed: Duration,
    },
    Failed {
        generation: u64,
        error: GlyphtoneError,
    },
}

struct JobMessage {
    generation: u64,
    result: Result<AsciiConversion>,
    elapsed: Duration,
}

/// Runs at most one logically current conversion at a time
pub struct Recomputer {
    generation: u64,
    current: Option<CancellationToken>,
    tx: Sender<JobMessage>,
    rx: Receiver<JobMessage>,
}

impl Default for Recomputer {
    fn default() -> Self {
        Self::new()
    }
}

impl Recomputer {
    pub fn new() -> Self {
        let (tx, rx) = flume::unbounded();
        Self {
            generation: 0,
            current: None,
            tx,
            rx,
        }
    }

    /// Generation of the most recent submission
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// True while the newest submission has not been delivered
    pub fn is_busy(&self) -> bool {
        self.current.is_some()
    }

    /// Start converting `request`, cancelling whatever was running
    ///
    /// Returns the generation the eventual [`JobEvent`] will carry.
    pub fn submit(&mut self, request: ConversionRequest) -> Result<u64> {
        self.cancel();
        self.generation += 1;
        let generation = self.generation;
        let token = CancellationToken::new();
        let worker_token = token.clone();
        let tx = self.tx.clone();

        thread::Builder::new()
            .name(format!("recompute-{generation}"))
            .spawn(move || {
                let start = Instant::now();
                let result = convert(&request, &worker_token);
                let cancelled = result.as_ref().is_err_and(GlyphtoneError::is_cancelled);
                if worker_token.is_cancelled() || cancelled {
                    log::info!("Recompute {generation} superseded, dropping its result");
                    return;
                }
                let message = JobMessage {
                    generation,
                    result,
                    elapsed: start.elapsed(),
                };
                if tx.send(message).is_err() {
                    log::debug!("Recompute {generation} finished after its receiver went away");
                }
            })?;

        // Only a running worker makes the recomputer busy
        self.current = Some(token);
        log::debug!("Submitted recompute {generation}");
        Ok(generation)
    }

    /// Stop the job in flight, if any; it will never be delivered
    pub fn cancel(&mut self) {
        if let Some(token) = self.current.take() {
            log::info!("Cancelling recompute {}", self.generation);
            token.cancel();
        }
    }

    /// Newest pending delivery, without blocking
    pub fn poll(&mut self) -> Option<JobEvent> {
        let mut latest = None;
        while let Ok(message) = self.rx.try_recv() {
            if let Some(message) = self.accept(message) {
                latest = Some(message);
            }
        }
        latest.map(|message| self.deliver(message))
    }

    /// Block until the newest submission is delivered or `timeout` passes
    pub fn wait(&mut self, timeout: Duration) -> Option<JobEvent> {
        if !self.is_busy() {
            return self.poll();
        }
        let deadline = Instant::now() + timeout;
        loop {
            match self.rx.recv_deadline(deadline) {
                Ok(message) => {
                    if let Some(message) = self.accept(message) {
                        return Some(self.deliver(message));
                    }
                }
                // The recomputer holds a sender, so only the deadline can end the wait
                Err(_) => return None,
            }
        }
    }

    fn accept(&self, message: JobMessage) -> Option<JobMessage> {
        if message.generation == self.generation && self.current.is_some() {
            Some(message)
        } else {
            log::debug!(
                "Dropping stale result of recompute {} (current {})",
                message.generation,
                self.generation
            );
            None
        }
    }

    fn deliver(&mut self, message: JobMessage) -> JobEvent {
        self.current = None;
        match message.result {
            Ok(conversion) => JobEvent::Finished {
                generation: message.generation,
                conversion,
                elapsed: message.elapsed,
            },
            Err(error) => JobEvent::Failed {
                generation: message.generation,
                error,
            },
        }
    }
}

impl Drop for Recomputer {
    fn drop(&mut self) {
        self.cancel();
    }
}
