//! Countdown component for Bubble Tea applications.
//!
//! Counts down to a fixed instant and renders the time left into whichever
//! units you give it slots for. Units you leave out are folded into the
//! largest unit you keep, so a countdown with only `minutes` and `seconds`
//! shows `3064:05` with 2d 3h 4m 5s to go rather than dropping the days.
//!
//! # Basic Usage
//!
//! ```rust
//! use bubbletea_countdown::config::CountdownConfig;
//! use bubbletea_countdown::countdown::new;
//! use bubbletea_countdown::unit::Unit;
//!
//! let config = CountdownConfig::new("2030-01-01T00:00:00Z")
//!     .with_slot(Unit::Days)
//!     .with_padded_slot(Unit::Hours, 2)
//!     .with_padded_slot(Unit::Minutes, 2)
//!     .with_padded_slot(Unit::Seconds, 2);
//!
//! let mut countdown = new(config);
//! let _cmd = countdown.activate().expect("valid target");
//! assert!(countdown.running());
//! ```
//!
//! # bubbletea-rs Integration
//!
//! ```rust
//! use bubbletea_rs::{Cmd, Model as BubbleTeaModel, Msg};
//! use bubbletea_countdown::config::CountdownConfig;
//! use bubbletea_countdown::countdown::{new, FinishedMsg, Model};
//! use bubbletea_countdown::unit::Unit;
//!
//! struct App {
//!     countdown: Model,
//!     done: bool,
//! }
//!
//! impl BubbleTeaModel for App {
//!     fn init() -> (Self, Option<Cmd>) {
//!         let config = CountdownConfig::new("2030-01-01T00:00:00Z")
//!             .with_slot(Unit::Hours)
//!             .with_padded_slot(Unit::Minutes, 2)
//!             .with_padded_slot(Unit::Seconds, 2);
//!         let mut countdown = new(config);
//!         let cmd = countdown.activate().ok().flatten();
//!         (Self { countdown, done: false }, cmd)
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         if let Some(finished) = msg.downcast_ref::<FinishedMsg>() {
//!             if finished.id == self.countdown.id() {
//!                 self.done = true;
//!             }
//!         }
//!         self.countdown.update(msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         format!("Launch in {}", self.countdown.view())
//!     }
//! }
//! ```

use crate::config::CountdownConfig;
use crate::controller::{Controller, State};
use crate::error::Result;
use crate::instant::{Clock, SystemClock};
use crate::scheduler::{Scheduler, TickHandle};
use crate::slot::SlotBoard;
use crate::unit::Unit;
use bubbletea_rs::{tick as bubbletea_tick, Cmd, Model as BubbleTeaModel, Msg};
use chrono::{Duration as ChronoDuration, Utc};
use lipgloss_extras::prelude::*;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

/// Tag used when a countdown is created without a [`crate::define::Definition`].
pub const DEFAULT_TAG: &str = "countdown-timer";

// Internal ID management for countdown instances
static LAST_ID: AtomicI64 = AtomicI64::new(0);

fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

/// Message sent on every countdown tick.
///
/// Carries the countdown's id and the tag of the schedule it was issued
/// under. Ticks from a cancelled schedule are dropped by `update`.
#[derive(Debug, Clone)]
pub struct TickMsg {
    /// The countdown that scheduled this tick.
    pub id: i64,
    tag: u64,
}

/// Message sent once when a countdown reaches its target.
#[derive(Debug, Clone)]
pub struct FinishedMsg {
    /// The countdown that finished.
    pub id: i64,
}

/// Turns controller schedules into bubbletea tick commands.
///
/// Each schedule gets a fresh tag. Only the armed tag is re-issued after a
/// tick, so cancelling simply means not re-issuing.
#[derive(Debug, Default)]
pub struct TagScheduler {
    tag: u64,
    armed: Option<(TickHandle, Duration)>,
}

impl Scheduler for TagScheduler {
    fn schedule_every(&mut self, period: Duration) -> TickHandle {
        self.tag += 1;
        let handle = TickHandle(self.tag);
        self.armed = Some((handle, period));
        handle
    }

    fn cancel(&mut self, handle: TickHandle) {
        if matches!(self.armed, Some((armed, _)) if armed == handle) {
            self.armed = None;
        }
    }
}

/// Options applied by [`new_with_options`].
pub enum CountdownOption {
    /// Tick period.
    WithInterval(Duration),
    /// Text placed between slots in `view`.
    WithSeparator(String),
    /// Style for slots that are still counting.
    WithStyle(Box<Style>),
    /// Style for slots marked finished.
    WithFinishedStyle(Box<Style>),
}

impl CountdownOption {
    fn apply<C: Clock>(&self, m: &mut Model<C>) {
        match self {
            CountdownOption::WithInterval(interval) => m.controller.set_period(*interval),
            CountdownOption::WithSeparator(separator) => m.separator = separator.clone(),
            CountdownOption::WithStyle(style) => m.style = style.as_ref().clone(),
            CountdownOption::WithFinishedStyle(style) => {
                m.finished_style = style.as_ref().clone()
            }
        }
    }
}

/// Sets the tick period.
pub fn with_interval(interval: Duration) -> CountdownOption {
    CountdownOption::WithInterval(interval)
}

/// Sets the text between slots.
pub fn with_separator(separator: impl Into<String>) -> CountdownOption {
    CountdownOption::WithSeparator(separator.into())
}

/// Sets the style of counting slots.
pub fn with_style(style: Style) -> CountdownOption {
    CountdownOption::WithStyle(Box::new(style))
}

/// Sets the style of finished slots.
pub fn with_finished_style(style: Style) -> CountdownOption {
    CountdownOption::WithFinishedStyle(Box::new(style))
}

/// Countdown component.
///
/// Owns a [`Controller`] whose scheduler is backed by bubbletea tick
/// commands and whose output goes to a [`SlotBoard`] that `view` renders.
#[derive(Debug)]
pub struct Model<C = SystemClock> {
    /// Style for slots that are still counting.
    pub style: Style,
    /// Style for slots marked finished.
    pub finished_style: Style,
    /// Text placed between slots.
    pub separator: String,
    config: CountdownConfig,
    controller: Controller<C, TagScheduler, SlotBoard>,
    id: i64,
}

/// Creates a countdown on the system clock.
pub fn new(config: CountdownConfig) -> Model {
    Model::with_clock(DEFAULT_TAG, config, SystemClock)
}

/// Creates a countdown on the system clock and applies `opts`.
pub fn new_with_options(config: CountdownConfig, opts: &[CountdownOption]) -> Model {
    let mut m = new(config);
    for opt in opts {
        opt.apply(&mut m);
    }
    m
}

impl<C: Clock> Model<C> {
    /// Creates a countdown named `tag` that reads time from `clock`.
    pub fn with_clock(tag: impl Into<String>, config: CountdownConfig, clock: C) -> Self {
        Self {
            style: Style::new(),
            finished_style: Style::new(),
            separator: ":".to_string(),
            config,
            controller: Controller::new(tag, clock, TagScheduler::default(), SlotBoard::new()),
            id: next_id(),
        }
    }

    /// Applies `opts` in order.
    pub fn with_options(mut self, opts: &[CountdownOption]) -> Self {
        for opt in opts {
            opt.apply(&mut self);
        }
        self
    }

    /// Unique identifier of this countdown.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// The configuration the countdown activates from.
    pub fn config(&self) -> &CountdownConfig {
        &self.config
    }

    /// The underlying state machine.
    pub fn controller(&self) -> &Controller<C, TagScheduler, SlotBoard> {
        &self.controller
    }

    /// Whether the countdown is activated and still counting.
    pub fn running(&self) -> bool {
        self.controller.is_active() && self.controller.state() == State::Running
    }

    /// Whether the target has been reached.
    pub fn finished(&self) -> bool {
        self.controller.is_finished()
    }

    /// Text currently shown for `unit`, if it has a slot.
    pub fn unit_text(&self, unit: Unit) -> Option<&str> {
        self.controller.sink().text(unit.into())
    }

    /// Whether the slot for `unit` is marked finished.
    pub fn unit_finished(&self, unit: Unit) -> bool {
        self.controller.sink().slot_finished(unit.into())
    }

    /// Activates the countdown from its configuration.
    ///
    /// Renders right away and returns the command that drives the next tick,
    /// or a [`FinishedMsg`] command if the target has already passed.
    ///
    /// # Errors
    ///
    /// [`crate::CountdownError::Configuration`] if `until` is missing or
    /// invalid.
    pub fn activate(&mut self) -> Result<Option<Cmd>> {
        let was_finished = self.finished();
        let in_flight = self.controller.ticker();
        self.controller.activate(&self.config)?;
        Ok(self.follow_up(was_finished, in_flight))
    }

    /// Stops the countdown. Pending ticks are ignored afterwards.
    pub fn deactivate(&mut self) {
        self.controller.deactivate();
    }

    /// Points the countdown at a new target.
    ///
    /// # Errors
    ///
    /// [`crate::CountdownError::Configuration`] if `until` does not parse;
    /// the configuration is left unchanged.
    pub fn set_until(&mut self, until: impl Into<String>) -> Result<Option<Cmd>> {
        let until = until.into();
        let was_finished = self.finished();
        let in_flight = self.controller.ticker();
        self.controller.retarget(&until)?;
        self.config.until = Some(until);
        Ok(self.follow_up(was_finished, in_flight))
    }

    /// Handles tick messages addressed to this countdown.
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(tick_msg) = msg.downcast_ref::<TickMsg>() {
            if tick_msg.id != self.id {
                return None;
            }

            let was_finished = self.finished();
            if !self.controller.tick(TickHandle(tick_msg.tag)) {
                return None;
            }
            return self.follow_up(was_finished, None);
        }

        None
    }

    /// Renders every slot, largest unit first, joined by the separator.
    pub fn view(&self) -> String {
        let board = self.controller.sink();
        self.controller
            .slots()
            .iter()
            .filter_map(|slot| board.get(slot.id()))
            .map(|display| {
                if display.finished {
                    self.finished_style.render(&display.text)
                } else {
                    self.style.render(&display.text)
                }
            })
            .collect::<Vec<_>>()
            .join(&self.separator)
    }

    /// The command to issue after the controller ran: keep ticking, announce
    /// completion, or nothing.
    ///
    /// `in_flight` is the schedule that already has a tick command pending.
    /// It is never issued a second one, so each schedule drives exactly one
    /// chain of ticks.
    fn follow_up(&self, was_finished: bool, in_flight: Option<TickHandle>) -> Option<Cmd> {
        if let Some((handle, period)) = self.controller.scheduler().armed {
            if self.controller.ticker() == Some(handle) && in_flight != Some(handle) {
                return Some(self.tick(handle, period));
            }
        }
        if self.finished() && !was_finished {
            return Some(self.finished_cmd());
        }
        None
    }

    fn tick(&self, handle: TickHandle, period: Duration) -> Cmd {
        let id = self.id;
        let tag = handle.0;
        bubbletea_tick(period, move |_| Box::new(TickMsg { id, tag }) as Msg)
    }

    fn finished_cmd(&self) -> Cmd {
        let id = self.id;
        bubbletea_tick(Duration::from_nanos(1), move |_| {
            Box::new(FinishedMsg { id }) as Msg
        })
    }
}

/// One minute from now, shown as minutes and zero-padded seconds.
impl Default for Model {
    fn default() -> Self {
        let until = (Utc::now() + ChronoDuration::seconds(60)).to_rfc3339();
        new(CountdownConfig::new(until)
            .with_slot(Unit::Minutes)
            .with_padded_slot(Unit::Seconds, 2))
    }
}

impl BubbleTeaModel for Model {
    fn init() -> (Self, Option<Cmd>) {
        let mut model = Self::default();
        let cmd = model.activate().ok().flatten();
        (model, cmd)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        self.update(msg)
    }

    fn view(&self) -> String {
        self.view()
    }
}
