//! The countdown state machine.
//!
//! A [`Controller`] owns a target instant and the slots bound at activation.
//! Every tick it reads its [`Clock`], decomposes the remaining time into the
//! bound units and writes the result through a [`UnitSink`]. Once the target
//! is reached it cancels its schedule, writes zeros and marks itself finished.
//!
//! The controller knows nothing about rendering or timers; both are traits
//! (see [`crate::slot`] and [`crate::scheduler`]), so it can be driven by the
//! bubbletea widget in [`crate::countdown`] or directly by any host loop.
//!
//! # Example
//!
//! ```rust
//! use bubbletea_countdown::config::CountdownConfig;
//! use bubbletea_countdown::controller::{Controller, State};
//! use bubbletea_countdown::instant::{parse_instant, ManualClock};
//! use bubbletea_countdown::scheduler::ManualScheduler;
//! use bubbletea_countdown::slot::{SlotBoard, SlotId};
//! use bubbletea_countdown::unit::Unit;
//! use std::time::Duration;
//!
//! let clock = ManualClock::new(parse_instant("2030-01-01T00:00:00Z").unwrap());
//! let config = CountdownConfig::new("2030-01-01T00:00:03Z").with_slot(Unit::Seconds);
//!
//! let mut countdown = Controller::new(
//!     "countdown-timer",
//!     clock.clone(),
//!     ManualScheduler::new(),
//!     SlotBoard::new(),
//! );
//! countdown.activate(&config)?;
//! assert_eq!(countdown.sink().text(SlotId::from(Unit::Seconds)), Some("3"));
//!
//! let (handle, _) = countdown.scheduler().armed().unwrap();
//! for _ in 0..3 {
//!     clock.advance(Duration::from_secs(1));
//!     countdown.tick(handle);
//! }
//! assert_eq!(countdown.state(), State::Finished);
//! assert_eq!(countdown.sink().text(SlotId::from(Unit::Seconds)), Some("0"));
//! # Ok::<(), bubbletea_countdown::CountdownError>(())
//! ```

use crate::error::{CountdownError, Result};
use crate::instant::{parse_instant, Clock};
use crate::interval::{decompose, TimeRemaining};
use crate::scheduler::{Scheduler, TickHandle, DEFAULT_PERIOD};
use crate::slot::{discover_slots, unit_set, ActivationSource, Slot, UnitSink};
use crate::unit::UnitSet;
use chrono::{DateTime, Utc};
use std::time::Duration;
use tracing::{debug, trace, warn};


/// Lifecycle state of a [`Controller`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Never activated, or deactivated before the target was reached.
    Uninitialized,
    /// Counting down.
    Running,
    /// The target was reached. Terminal until a new target is set.
    Finished,
}

/// Drives one countdown.
///
/// `C` supplies the time, `S` arms periodic ticks and `K` receives output.
/// At most one tick schedule is armed at any time.
#[derive(Debug)]
pub struct Controller<C, S, K> {
    tag: String,
    clock: C,
    scheduler: S,
    sink: K,
    period: Duration,
    target: Option<DateTime<Utc>>,
    slots: Vec<Slot>,
    units: UnitSet,
    state: State,
    active: bool,
    ticker: Option<TickHandle>,
    remaining: Option<TimeRemaining>,
}

impl<C: Clock, S: Scheduler, K: UnitSink> Controller<C, S, K> {
    /// Creates an idle controller.
    ///
    /// `tag` names the countdown in errors and logs, e.g. `countdown-timer`.
    pub fn new(tag: impl Into<String>, clock: C, scheduler: S, sink: K) -> Self {
        Self {
            tag: tag.into(),
            clock,
            scheduler,
            sink,
            period: DEFAULT_PERIOD,
            target: None,
            slots: Vec::new(),
            units: UnitSet::empty(),
            state: State::Uninitialized,
            active: false,
            ticker: None,
            remaining: None,
        }
    }

    /// Sets the tick period used by the next schedule. Defaults to one second.
    pub fn with_period(mut self, period: Duration) -> Self {
        self.set_period(period);
        self
    }

    /// Changes the tick period. An already armed schedule keeps its period
    /// until the next activation.
    pub fn set_period(&mut self, period: Duration) {
        self.period = period;
    }

    /// Activates the countdown.
    ///
    /// Resolves the target from `source`, binds a slot for every unit the
    /// source has one for, renders immediately and arms the tick schedule
    /// unless the target has already passed.
    ///
    /// Activating an already active countdown rebinds its slots but never
    /// arms a second schedule.
    ///
    /// # Errors
    ///
    /// [`CountdownError::Configuration`] if the target is missing or
    /// unparseable. Nothing is scheduled in that case.
    pub fn activate<A: ActivationSource + ?Sized>(&mut self, source: &A) -> Result<()> {
        let target = self.resolve(source.until())?;
        self.active = true;
        self.set_target(target);

        self.slots = discover_slots(source);
        self.units = unit_set(&self.slots);

        debug!(
            tag = %self.tag,
            target = %target,
            units = self.units.len(),
            "countdown activated"
        );

        self.update();
        self.start_ticking();
        Ok(())
    }

    /// Replaces the target instant.
    ///
    /// A new target clears the finished marker. If the countdown is active it
    /// re-renders right away and resumes ticking when needed. Otherwise the
    /// target is only stored and the state stays [`State::Uninitialized`];
    /// the next [`Controller::activate`] reads the target from its source
    /// again.
    ///
    /// # Errors
    ///
    /// [`CountdownError::Configuration`] if `raw` does not parse. The current
    /// target and state are left untouched.
    pub fn retarget(&mut self, raw: &str) -> Result<()> {
        let target = self.resolve(Some(raw))?;
        self.set_target(target);
        debug!(tag = %self.tag, target = %target, "countdown retargeted");

        if self.active {
            self.update();
            self.start_ticking();
        }
        Ok(())
    }

    /// Stops ticking. No further writes happen until the next activation.
    ///
    /// Calling this on an inactive controller does nothing.
    pub fn deactivate(&mut self) {
        if !self.active {
            return;
        }
        self.stop_ticking();
        self.active = false;
        if self.state == State::Running {
            self.state = State::Uninitialized;
        }
        debug!(tag = %self.tag, "countdown deactivated");
    }

    /// Handles one scheduled tick.
    ///
    /// Ticks carrying anything other than the current handle are dropped;
    /// returns whether the tick was acted on.
    pub fn tick(&mut self, handle: TickHandle) -> bool {
        if !self.active || self.ticker != Some(handle) {
            trace!(tag = %self.tag, ?handle, "ignoring stale countdown tick");
            return false;
        }
        self.update();
        true
    }

    /// Current lifecycle state.
    pub fn state(&self) -> State {
        self.state
    }

    /// Whether the target has been reached.
    pub fn is_finished(&self) -> bool {
        self.state == State::Finished
    }

    /// Whether the countdown is between activation and deactivation.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// The resolved target instant.
    pub fn target(&self) -> Option<DateTime<Utc>> {
        self.target
    }

    /// Units bound at the last activation.
    pub fn units(&self) -> UnitSet {
        self.units
    }

    /// Slots bound at the last activation, largest unit first.
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// The values written by the most recent update.
    pub fn remaining(&self) -> Option<&TimeRemaining> {
        self.remaining.as_ref()
    }

    /// Tick period.
    pub fn period(&self) -> Duration {
        self.period
    }

    /// The handle of the armed tick schedule.
    pub fn ticker(&self) -> Option<TickHandle> {
        self.ticker
    }

    /// Tag used in errors and logs.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// The output sink.
    pub fn sink(&self) -> &K {
        &self.sink
    }

    /// Mutable access to the output sink.
    pub fn sink_mut(&mut self) -> &mut K {
        &mut self.sink
    }

    /// The scheduler.
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// The clock.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    fn resolve(&self, raw: Option<&str>) -> Result<DateTime<Utc>> {
        raw.and_then(parse_instant).ok_or_else(|| {
            warn!(tag = %self.tag, raw = ?raw, "countdown target is missing or invalid");
            CountdownError::configuration(&self.tag, raw)
        })
    }

    fn set_target(&mut self, target: DateTime<Utc>) {
        let retargeted = self.target != Some(target);
        self.target = Some(target);
        if !retargeted && self.state != State::Uninitialized {
            return;
        }
        if self.state == State::Finished {
            self.sink.set_countdown_finished(false);
        }
        // Only activation starts the countdown.
        self.state = if self.active {
            State::Running
        } else {
            State::Uninitialized
        };
    }

    fn update(&mut self) {
        let Some(target) = self.target else {
            return;
        };

        let now = self.clock.now();
        let remaining = if now >= target {
            self.finish();
            TimeRemaining::zero(self.units)
        } else {
            decompose((target - now).num_milliseconds(), self.units)
        };

        self.write_units(&remaining);
        self.remaining = Some(remaining);
    }

    /// Writes values and the left-to-right finished markers.
    fn write_units(&mut self, remaining: &TimeRemaining) {
        let mut finished = true;
        for slot in &mut self.slots {
            let value = remaining.get(slot.unit()).unwrap_or(0);
            slot.write_value(&mut self.sink, value);

            finished = finished && value == 0;
            slot.write_finished(&mut self.sink, finished);
        }
    }

    fn finish(&mut self) {
        self.stop_ticking();
        if self.state != State::Finished {
            self.state = State::Finished;
            self.sink.set_countdown_finished(true);
            debug!(tag = %self.tag, "countdown finished");
        }
    }

    fn start_ticking(&mut self) {
        if self.active && self.state == State::Running && self.ticker.is_none() {
            self.ticker = Some(self.scheduler.schedule_every(self.period));
        }
    }

    fn stop_ticking(&mut self) {
        if let Some(handle) = self.ticker.take() {
            self.scheduler.cancel(handle);
        }
    }
}
