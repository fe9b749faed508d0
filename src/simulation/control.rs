//! Halt, single-step and terminate signals shared with the host.

use alloc::sync::Arc;

use tracing::debug;

use crate::sync::{Condvar, Mutex};

#[derive(Debug, Default)]
struct Signals {
    halted: bool,
    terminated: bool,
    suspended: bool,
    step: bool,
}

/// Control state shared between the driver and its handles.
pub(crate) struct Control {
    signals: Mutex<Signals>,
    wake: Condvar,
}

impl Control {
    pub(crate) fn new(halted: bool) -> Arc<Self> {
        Arc::new(Self {
            signals: Mutex::new(Signals {
                halted,
                ..Signals::default()
            }),
            wake: Condvar::new(),
        })
    }

    pub(crate) fn is_terminated(&self) -> bool {
        self.signals.lock().terminated
    }

    /// Suspends the next turn if the run is halted.
    ///
    /// The suspension is registered before this returns, so a step request
    /// sent in reaction to it is never lost.
    pub(crate) fn suspend(&self) -> Option<Suspension<'_>> {
        let mut signals = self.signals.lock();
        if !signals.halted || signals.terminated {
            return None;
        }
        signals.suspended = true;
        signals.step = false;
        Some(Suspension { control: self })
    }
}

/// How a suspended turn was released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The halt was lifted.
    Resume,
    /// Exactly one turn may run; the halt stays engaged.
    Step,
    /// The run was terminated.
    Cancel,
}

/// A turn parked at the halt gate until the host resolves it.
#[must_use = "a suspension does nothing unless waited on"]
pub struct Suspension<'a> {
    control: &'a Control,
}

impl Suspension<'_> {
    /// Blocks until the host resumes, steps, or terminates the run.
    pub fn wait(self) -> Resolution {
        let mut signals = self.control.signals.lock();
        let resolution = loop {
            if signals.terminated {
                break Resolution::Cancel;
            }
            if signals.step {
                signals.step = false;
                break Resolution::Step;
            }
            if !signals.halted {
                break Resolution::Resume;
            }
            signals = self.control.wake.wait(signals);
        };
        drop(signals);
        resolution
    }
}

impl Drop for Suspension<'_> {
    fn drop(&mut self) {
        self.control.signals.lock().suspended = false;
    }
}

/// A cloneable remote for a running simulation.
///
/// ```
/// use aceyrs::simulation::{Simulation, SimulationConfig};
/// use aceyrs::PlayerConfig;
///
/// let config = SimulationConfig::new(vec![PlayerConfig::new("p1", 10_000)]);
/// let simulation = Simulation::new(config).unwrap();
/// let handle = simulation.handle();
/// handle.halt(true);
/// assert!(handle.is_halted());
/// handle.terminate();
/// assert!(handle.is_terminated());
/// ```
#[derive(Clone)]
pub struct SimulationHandle {
    control: Arc<Control>,
}

impl SimulationHandle {
    pub(crate) const fn new(control: Arc<Control>) -> Self {
        Self { control }
    }

    /// Engages or releases the halt before each turn.
    pub fn halt(&self, halted: bool) {
        debug!(halted, "halt toggled");
        self.control.signals.lock().halted = halted;
        self.control.wake.notify_all();
    }

    /// Lets exactly one turn run while halted.
    ///
    /// Ignored unless the driver is currently suspended.
    pub fn advance_one_turn(&self) {
        let mut signals = self.control.signals.lock();
        if signals.suspended {
            signals.step = true;
            drop(signals);
            self.control.wake.notify_all();
        }
    }

    /// Stops the run, discarding the game in progress.
    pub fn terminate(&self) {
        debug!("termination requested");
        self.control.signals.lock().terminated = true;
        self.control.wake.notify_all();
    }

    /// Returns whether the halt is engaged.
    #[must_use]
    pub fn is_halted(&self) -> bool {
        self.control.signals.lock().halted
    }

    /// Returns whether the driver is parked waiting for a resume or step.
    #[must_use]
    pub fn is_waiting(&self) -> bool {
        self.control.signals.lock().suspended
    }

    /// Returns whether termination was requested.
    #[must_use]
    pub fn is_terminated(&self) -> bool {
        self.control.is_terminated()
    }
}
