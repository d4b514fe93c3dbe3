//! Frame-scheduled grow-in animation.
//!
//! The driver owns a progress value in `0.0..=1.0` and advances it by a fixed
//! step each time the host reports that a scheduled frame has elapsed. It has
//! two states:
//!
//! - **Idle**: no pending frame.
//! - **Running**: exactly one frame is pending with the scheduler.
//!
//! [`AnimationDriver::start`] always cancels the pending frame of the
//! previous run before scheduling its own, so an instance never has two
//! ticking loops. A cancelled run never reaches its target again.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::{AnimationError, TickError};

/// Progress added per tick.
pub const TICK_STEP: f32 = 0.03;

/// Ticks needed to go from 0 to 1.
pub const MAX_TICKS: u32 = 34;

/// Handle to a frame callback pending with a [`FrameScheduler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

impl FrameHandle {
    /// Wrap a scheduler-specific identifier.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw identifier.
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Source of display-refresh-aligned callbacks.
pub trait FrameScheduler {
    /// Ask for one callback on the next frame.
    fn request_frame(&mut self) -> FrameHandle;

    /// Withdraw a pending callback. Unknown handles are ignored.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Single-slot scheduler pumped by the host.
///
/// The host calls [`FrameQueue::take_due`] once per display frame and hands
/// the result to [`AnimationDriver::frame_elapsed`].
#[derive(Debug, Clone, Default)]
pub struct FrameQueue {
    next_id: u64,
    pending: Option<FrameHandle>,
}

impl FrameQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a frame is waiting to be delivered.
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Take the pending frame, if any.
    pub fn take_due(&mut self) -> Option<FrameHandle> {
        self.pending.take()
    }
}

impl FrameScheduler for FrameQueue {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.pending = Some(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
        }
    }
}

/// Ties ticks to display frames the host was asked for.
///
/// A paint that answers an earlier [`FramePacer::request`] may tick. Any other
/// paint, such as a re-render caused by unrelated state, only redraws.
#[derive(Debug, Default)]
pub struct FramePacer {
    requested: AtomicBool,
}

impl FramePacer {
    /// Create a pacer with no outstanding request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that the host was asked for another frame.
    pub fn request(&self) {
        self.requested.store(true, Ordering::Release);
    }

    /// Consume the outstanding request; `true` when this paint may tick.
    pub fn begin_frame(&self) -> bool {
        self.requested.swap(false, Ordering::AcqRel)
    }
}

/// Receiver of progress values.
pub trait TickTarget {
    /// Handle one tick.
    fn on_tick(&mut self, progress: f32) -> Result<(), TickError>;
}

impl<F> TickTarget for F
where
    F: FnMut(f32) -> Result<(), TickError>,
{
    fn on_tick(&mut self, progress: f32) -> Result<(), TickError> {
        self(progress)
    }
}

/// Identifies one run; returned by [`AnimationDriver::start`] and used to
/// cancel exactly that run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CancelHandle {
    run: u64,
}

/// Snapshot of the driver's run state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationState {
    /// Current progress.
    pub progress: f32,
    /// Pending frame, used only for cancellation.
    pub frame: Option<FrameHandle>,
}

/// What a delivered frame did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// The run advanced and another frame is pending.
    Advanced(f32),
    /// The run reached 1 and went idle.
    Finished,
    /// The frame belonged to no live run.
    Stale,
}

#[derive(Debug, Clone, Copy)]
struct Run {
    id: u64,
    step: u32,
    state: AnimationState,
}

/// Drives a [`TickTarget`] from 0 to 1 in [`TICK_STEP`] increments.
#[derive(Debug)]
pub struct AnimationDriver<S: FrameScheduler, T> {
    scheduler: S,
    run: Option<Run>,
    target: Option<T>,
    runs_started: u64,
}

impl<S: FrameScheduler, T: TickTarget> AnimationDriver<S, T> {
    /// Create an idle driver.
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            run: None,
            target: None,
            runs_started: 0,
        }
    }

    /// Access the scheduler.
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Access the scheduler mutably, e.g. to pump a [`FrameQueue`].
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Target of the current or most recent run.
    pub fn target(&self) -> Option<&T> {
        self.target.as_ref()
    }

    /// Whether a run is in progress.
    pub fn is_running(&self) -> bool {
        self.run.is_some()
    }

    /// Current run state; `None` while idle.
    pub fn state(&self) -> Option<AnimationState> {
        self.run.map(|run| run.state)
    }

    /// Current progress; `None` while idle.
    pub fn progress(&self) -> Option<f32> {
        self.run.map(|run| run.state.progress)
    }

    /// Begin a new run at progress 0.
    ///
    /// Any run in progress is cancelled first and its target dropped.
    pub fn start(&mut self, target: T) -> CancelHandle {
        self.stop();
        self.runs_started += 1;
        let frame = self.scheduler.request_frame();
        let id = self.runs_started;
        self.run = Some(Run {
            id,
            step: 0,
            state: AnimationState {
                progress: 0.0,
                frame: Some(frame),
            },
        });
        self.target = Some(target);
        tracing::debug!(run = id, "animation started");
        CancelHandle { run: id }
    }

    /// Cancel the run identified by `handle`.
    ///
    /// Calling this for a finished, replaced or already cancelled run does
    /// nothing.
    pub fn cancel(&mut self, handle: CancelHandle) {
        if self.run.is_some_and(|run| run.id == handle.run) {
            self.stop();
        }
    }

    /// Cancel whatever run is in progress.
    pub fn stop(&mut self) {
        let Some(run) = self.run.take() else {
            return;
        };
        if let Some(frame) = run.state.frame {
            self.scheduler.cancel_frame(frame);
        }
        tracing::debug!(run = run.id, progress = run.state.progress, "animation cancelled");
    }

    /// Stop and forget the last target.
    pub fn reset(&mut self) {
        self.stop();
        self.target = None;
    }

    /// Deliver a scheduled frame.
    ///
    /// Advances progress, invokes the target, then schedules the next frame
    /// unless progress reached 1. A failing target is reported but does not
    /// stop the run.
    pub fn frame_elapsed(&mut self, handle: FrameHandle) -> Result<TickOutcome, AnimationError> {
        let Some(mut run) = self.run else {
            tracing::trace!(frame = handle.get(), "frame delivered while idle");
            return Ok(TickOutcome::Stale);
        };
        if run.state.frame != Some(handle) {
            tracing::trace!(frame = handle.get(), "stale frame ignored");
            return Ok(TickOutcome::Stale);
        }

        run.step += 1;
        let progress = (run.step as f32 * TICK_STEP).min(1.0);
        run.state.progress = progress;

        let result = match self.target.as_mut() {
            Some(target) => target.on_tick(progress),
            None => Ok(()),
        };

        let outcome = if progress < 1.0 {
            run.state.frame = Some(self.scheduler.request_frame());
            self.run = Some(run);
            TickOutcome::Advanced(progress)
        } else {
            self.run = None;
            tracing::debug!(run = run.id, ticks = run.step, "animation finished");
            TickOutcome::Finished
        };

        match result {
            Ok(()) => Ok(outcome),
            Err(source) => {
                tracing::warn!(run = run.id, progress, error = %source, "tick target failed");
                Err(AnimationError::Tick { progress, source })
            }
        }
    }
}

impl<S: FrameScheduler, T> Drop for AnimationDriver<S, T> {
    fn drop(&mut self) {
        if let Some(frame) = self.run.take().and_then(|run| run.state.frame) {
            self.scheduler.cancel_frame(frame);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    type Recorder = Box<dyn FnMut(f32) -> Result<(), TickError>>;

    fn recorder() -> (Rc<RefCell<Vec<f32>>>, Recorder) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let target: Recorder = Box::new(move |progress| {
            sink.borrow_mut().push(progress);
            Ok(())
        });
        (seen, target)
    }

    fn pump(driver: &mut AnimationDriver<FrameQueue, Recorder>) -> usize {
        let mut ticks = 0;
        while let Some(frame) = driver.scheduler_mut().take_due() {
            driver.frame_elapsed(frame).expect("tick succeeds");
            ticks += 1;
        }
        ticks
    }

    #[test]
    fn full_run_reaches_one_in_max_ticks() {
        let (seen, target) = recorder();
        let mut driver = AnimationDriver::new(FrameQueue::new());
        driver.start(target);
        assert_eq!(driver.progress(), Some(0.0));
        assert_eq!(pump(&mut driver), MAX_TICKS as usize);
        let seen = seen.borrow();
        assert_eq!(seen.len(), MAX_TICKS as usize);
        assert!((seen[0] - 0.03).abs() < 1e-6);
        assert_eq!(*seen.last().expect("ticks"), 1.0);
        assert!(seen.windows(2).all(|pair| pair[1] > pair[0]));
        assert!(!driver.is_running());
        assert!(!driver.scheduler().has_pending());
    }

    #[test]
    fn cancel_stops_ticks_and_is_idempotent() {
        let (seen, target) = recorder();
        let mut driver = AnimationDriver::new(FrameQueue::new());
        let handle = driver.start(target);
        for _ in 0..3 {
            let frame = driver.scheduler_mut().take_due().expect("pending frame");
            driver.frame_elapsed(frame).expect("tick succeeds");
        }
        driver.cancel(handle);
        driver.cancel(handle);
        assert!(!driver.is_running());
        assert!(!driver.scheduler().has_pending());
        assert_eq!(seen.borrow().len(), 3);
    }

    #[test]
    fn stale_frame_after_cancel_is_ignored() {
        let (seen, target) = recorder();
        let mut driver = AnimationDriver::new(FrameQueue::new());
        let handle = driver.start(target);
        let frame = driver.state().and_then(|state| state.frame).expect("pending");
        driver.cancel(handle);
        assert_eq!(driver.frame_elapsed(frame).ok(), Some(TickOutcome::Stale));
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn restart_resets_progress_and_old_handle_is_inert() {
        let (first_seen, first) = recorder();
        let (second_seen, second) = recorder();
        let mut driver = AnimationDriver::new(FrameQueue::new());
        let old = driver.start(first);
        for _ in 0..10 {
            let frame = driver.scheduler_mut().take_due().expect("pending frame");
            driver.frame_elapsed(frame).expect("tick succeeds");
        }
        driver.start(second);
        assert_eq!(driver.progress(), Some(0.0));
        driver.cancel(old);
        assert!(driver.is_running());
        let frame = driver.scheduler_mut().take_due().expect("pending frame");
        driver.frame_elapsed(frame).expect("tick succeeds");
        assert_eq!(first_seen.borrow().len(), 10);
        assert!((second_seen.borrow()[0] - 0.03).abs() < 1e-6);
    }

    #[test]
    fn failing_target_reports_and_keeps_running() {
        let mut calls = 0;
        let target = move |progress: f32| -> Result<(), TickError> {
            calls += 1;
            if calls == 2 {
                Err(format!("paint failed at {progress}").into())
            } else {
                Ok(())
            }
        };
        let mut driver = AnimationDriver::new(FrameQueue::new());
        driver.start(target);
        let frame = driver.scheduler_mut().take_due().expect("pending frame");
        assert!(driver.frame_elapsed(frame).is_ok());
        let frame = driver.scheduler_mut().take_due().expect("pending frame");
        let err = driver.frame_elapsed(frame).expect_err("second tick fails");
        assert!(matches!(err, AnimationError::Tick { .. }));
        assert!(driver.is_running());
        assert!(driver.scheduler().has_pending());
    }

    #[test]
    fn drop_cancels_pending_frame() {
        #[derive(Default)]
        struct Log {
            cancelled: Vec<FrameHandle>,
            next: u64,
        }
        struct Shared(Rc<RefCell<Log>>);
        impl FrameScheduler for Shared {
            fn request_frame(&mut self) -> FrameHandle {
                let mut log = self.0.borrow_mut();
                log.next += 1;
                FrameHandle::new(log.next)
            }
            fn cancel_frame(&mut self, handle: FrameHandle) {
                self.0.borrow_mut().cancelled.push(handle);
            }
        }

        let log = Rc::new(RefCell::new(Log::default()));
        let (_, target) = recorder();
        let mut driver = AnimationDriver::new(Shared(Rc::clone(&log)));
        driver.start(target);
        drop(driver);
        assert_eq!(log.borrow().cancelled, vec![FrameHandle::new(1)]);
    }

    #[test]
    fn pacer_grants_one_tick_per_request() {
        let pacer = FramePacer::new();
        assert!(!pacer.begin_frame());
        pacer.request();
        pacer.request();
        assert!(pacer.begin_frame());
        assert!(!pacer.begin_frame());
    }
}
