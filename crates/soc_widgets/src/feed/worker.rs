use core::time::Duration;
use std::thread::{self, JoinHandle};

use chrono::NaiveTime;
use crossbeam::channel::{bounded, unbounded, Receiver, RecvTimeoutError, Sender};
use log::{debug, error};

use super::EventSource;
use crate::clock::local_now;

struct Worker<S> {
    stop: Sender<()>,
    handle: JoinHandle<S>,
}

/// Owned background task feeding synthetic events to one widget.
///
/// A feed starts detached: the source sits idle and nothing is produced until [`Feed::attach`]
/// spawns the worker. [`Feed::detach`] (or dropping the feed) stops the worker and takes the
/// source back, so a feed can be paused and resumed without losing generator state.
pub struct Feed<S: EventSource> {
    label: &'static str,
    period: Duration,
    tx: Sender<S::Event>,
    rx: Receiver<S::Event>,
    source: Option<S>,
    worker: Option<Worker<S>>,
    repaint: Option<egui::Context>,
}

impl<S: EventSource + 'static> Feed<S> {
    pub fn new(label: &'static str, source: S, period: Duration) -> Self {
        let (tx, rx) = unbounded();
        Self {
            label,
            period,
            tx,
            rx,
            source: Some(source),
            worker: None,
            repaint: None,
        }
    }

    /// Ask egui for a repaint whenever the worker delivers an event. Takes effect on the next
    /// attach.
    pub fn set_repaint(&mut self, ctx: egui::Context) {
        self.repaint = Some(ctx);
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Changes the cadence. Takes effect on the next attach.
    pub fn set_period(&mut self, period: Duration) {
        self.period = period;
    }

    pub fn is_attached(&self) -> bool {
        self.worker.is_some()
    }

    /// Spawns the worker. No-op when already attached or when the source was lost to a
    /// panicked worker.
    pub fn attach(&mut self) {
        if self.worker.is_some() {
            return;
        }
        let Some(source) = self.source.take() else {
            return;
        };

        let (stop, stop_rx) = bounded::<()>(1);
        let tx = self.tx.clone();
        let period = self.period;
        let repaint = self.repaint.clone();
        let handle = thread::spawn(move || run(source, period, &tx, &stop_rx, repaint.as_ref()));

        debug!("{} feed attached, every {:?}", self.label, self.period);
        self.worker = Some(Worker { stop, handle });
    }

    /// Stops the worker and waits for it to hand the source back.
    pub fn detach(&mut self) {
        let Some(Worker { stop, handle }) = self.worker.take() else {
            return;
        };
        drop(stop);
        match handle.join() {
            Ok(source) => {
                self.source = Some(source);
                debug!("{} feed detached", self.label);
            }
            Err(_) => error!("{} feed worker panicked; feed stays stopped", self.label),
        }
    }

    /// Events delivered since the last drain, in production order.
    pub fn drain(&self) -> impl Iterator<Item = S::Event> + '_ {
        self.rx.try_iter()
    }

    /// Sender into the same queue the worker uses. Events pushed here are drained like
    /// generated ones.
    pub fn injector(&self) -> Sender<S::Event> {
        self.tx.clone()
    }

    /// Produces one event synchronously from the idle source. `None` while attached.
    pub fn generate_now(&mut self, at: NaiveTime) -> Option<S::Event> {
        self.source.as_mut().map(|s| s.next_event(at))
    }

    /// The idle source, for seeding before the first attach.
    pub fn source_mut(&mut self) -> Option<&mut S> {
        self.source.as_mut()
    }
}

impl<S: EventSource> Drop for Feed<S> {
    fn drop(&mut self) {
        if let Some(Worker { stop, handle }) = self.worker.take() {
            drop(stop);
            let _ = handle.join();
        }
    }
}

fn run<S: EventSource>(
    mut source: S,
    period: Duration,
    tx: &Sender<S::Event>,
    stop: &Receiver<()>,
    repaint: Option<&egui::Context>,
) -> S {
    loop {
        match stop.recv_timeout(period) {
            Err(RecvTimeoutError::Timeout) => {}
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
        }
        if tx.send(source.next_event(local_now())).is_err() {
            break;
        }
        if let Some(ctx) = repaint {
            ctx.request_repaint();
        }
    }
    source
}
