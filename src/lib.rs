#![warn(missing_docs)]
#![doc(html_root_url = "https://docs.rs/bubbletea-countdown/")]

//! # bubbletea-countdown
//!
//! A countdown-to-instant component for terminal applications built with
//! [bubbletea-rs](https://github.com/joshka/bubbletea-rs).
//!
//! ## Overview
//!
//! Give the countdown a target instant and a set of unit slots (any of years,
//! months, weeks, days, hours, minutes and seconds). Every second it works out
//! how much time is left, splits it across the slots you asked for and writes
//! the numbers out, zero-padded where you want. Units without a slot are not
//! lost: their time is carried into the largest unit that has one.
//!
//! Months are 30 days and years are 365 days. The countdown is a display, not
//! a calendar.
//!
//! ## Layers
//!
//! - [`interval`]: the pure decomposition of a duration into units.
//! - [`controller`]: the running/finished state machine. It talks to the
//!   outside world only through traits: a [`instant::Clock`], a
//!   [`scheduler::Scheduler`] and a [`slot::UnitSink`].
//! - [`countdown`]: the bubbletea component, with `update()` and `view()`
//!   like every other widget.
//! - [`define`]: registering the component under a name prefix.
//!
//! ## Quick Start
//!
//! ```rust
//! use bubbletea_countdown::prelude::*;
//!
//! let config = CountdownConfig::new("2030-01-01T00:00:00Z")
//!     .with_slot(Unit::Days)
//!     .with_padded_slot(Unit::Hours, 2)
//!     .with_padded_slot(Unit::Minutes, 2)
//!     .with_padded_slot(Unit::Seconds, 2);
//!
//! let mut countdown = countdown_new(config);
//! let tick = countdown.activate()?;
//! assert!(tick.is_some());
//! println!("{}", countdown.view());
//! # Ok::<(), CountdownError>(())
//! ```
//!
//! ## Finished markers
//!
//! Besides the countdown-wide finished state, each slot carries its own
//! marker. A slot is finished when it reads zero and every larger slot is
//! finished too, so an exhausted `days` slot can be shown differently from
//! an `hours` slot that is still counting.

pub mod config;
pub mod controller;
pub mod countdown;
pub mod define;
mod error;
pub mod instant;
pub mod interval;
pub mod scheduler;
pub mod slot;
pub mod unit;

pub use config::{CountdownConfig, SlotConfig};
pub use controller::{Controller, State};
pub use countdown::{
    new as countdown_new, new_with_options as countdown_new_with_options, with_finished_style,
    with_interval, with_separator, with_style, CountdownOption, FinishedMsg as CountdownFinishedMsg,
    Model as Countdown, TickMsg as CountdownTickMsg,
};
pub use define::{define, Definition};
pub use error::{CountdownError, Result};
pub use instant::{parse_instant, Clock, ManualClock, SystemClock};
pub use interval::{decompose, decompose_between, TimeRemaining};
pub use scheduler::{ManualScheduler, Scheduler, TickHandle};
pub use slot::{ActivationSource, SlotBoard, SlotId, SlotSpec, UnitSink};
pub use unit::{Unit, UnitSet};

/// Prelude module for convenient imports.
///
/// ```rust
/// use bubbletea_countdown::prelude::*;
///
/// let units: UnitSet = [Unit::Minutes, Unit::Seconds].into_iter().collect();
/// let remaining = decompose(90_000, units);
/// assert_eq!(remaining.get(Unit::Minutes), Some(1));
/// assert_eq!(remaining.get(Unit::Seconds), Some(30));
/// ```
pub mod prelude {
    pub use crate::config::{CountdownConfig, SlotConfig};
    pub use crate::controller::{Controller, State};
    pub use crate::countdown::{
        new as countdown_new, new_with_options as countdown_new_with_options,
        with_finished_style, with_interval, with_separator, with_style, CountdownOption,
        FinishedMsg as CountdownFinishedMsg, Model as Countdown, TickMsg as CountdownTickMsg,
    };
    pub use crate::define::{define, Definition};
    pub use crate::error::CountdownError;
    pub use crate::instant::{parse_instant, Clock, ManualClock, SystemClock};
    pub use crate::interval::{decompose, decompose_between, TimeRemaining};
    pub use crate::scheduler::{ManualScheduler, Scheduler, TickHandle};
    pub use crate::slot::{ActivationSource, SlotBoard, SlotId, SlotSpec, UnitSink};
    pub use crate::unit::{Unit, UnitSet};
}
