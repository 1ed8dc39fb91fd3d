//! Registering the countdown under a caller-chosen prefix.
//!
//! A host that addresses widgets by name registers the countdown once per
//! prefix at startup. With the default prefix the widget is called
//! `countdown-timer` and its slots `countdown-days`, `countdown-seconds`, and
//! so on.
//!
//! ```rust
//! use bubbletea_countdown::define::define;
//! use bubbletea_countdown::unit::Unit;
//!
//! let launch = define("launch").unwrap();
//! assert_eq!(launch.tag_name(), "launch-timer");
//! assert_eq!(launch.slot_name(Unit::Hours), "launch-hours");
//! assert_eq!(launch.unit_for("launch-minutes"), Some(Unit::Minutes));
//!
//! // A prefix can only be registered once per process.
//! assert!(define("launch").is_err());
//! ```

use crate::config::CountdownConfig;
use crate::countdown::Model;
use crate::error::{CountdownError, Result};
use crate::instant::Clock;
use crate::unit::Unit;
use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::sync::Mutex;
use tracing::debug;

/// Prefix used by [`define_default`].
pub const DEFAULT_PREFIX: &str = "countdown";

const TAG_SUFFIX: &str = "-timer";

static DEFINED: Lazy<Mutex<HashSet<String>>> = Lazy::new(|| Mutex::new(HashSet::new()));

/// A registered countdown name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    prefix: String,
}

impl Definition {
    /// The prefix this definition was registered with.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Widget name, `<prefix>-timer`.
    pub fn tag_name(&self) -> String {
        format!("{}{}", self.prefix, TAG_SUFFIX)
    }

    /// Slot name for `unit`, `<prefix>-<unit>`.
    pub fn slot_name(&self, unit: Unit) -> String {
        format!("{}-{}", self.prefix, unit.name())
    }

    /// The unit a slot name refers to, if it belongs to this definition.
    pub fn unit_for(&self, slot_name: &str) -> Option<Unit> {
        slot_name
            .strip_prefix(self.prefix.as_str())?
            .strip_prefix('-')?
            .parse()
            .ok()
    }

    /// Builds a countdown on the system clock named after this definition.
    pub fn build(&self, config: CountdownConfig) -> Model {
        Model::with_clock(self.tag_name(), config, crate::instant::SystemClock)
    }

    /// Builds a countdown named after this definition on a custom clock.
    pub fn build_with_clock<C: Clock>(&self, config: CountdownConfig, clock: C) -> Model<C> {
        Model::with_clock(self.tag_name(), config, clock)
    }
}

/// Registers a countdown under `prefix`.
///
/// # Errors
///
/// [`CountdownError::AlreadyDefined`] if the prefix was registered before.
pub fn define(prefix: &str) -> Result<Definition> {
    let definition = Definition {
        prefix: prefix.to_string(),
    };
    let tag = definition.tag_name();

    let mut defined = DEFINED.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    if !defined.insert(tag.clone()) {
        return Err(CountdownError::AlreadyDefined { tag });
    }

    debug!(%tag, "countdown defined");
    Ok(definition)
}

/// Registers a countdown under [`DEFAULT_PREFIX`].
pub fn define_default() -> Result<Definition> {
    define(DEFAULT_PREFIX)
}

/// Whether a widget named `tag` has been registered.
pub fn is_defined(tag: &str) -> bool {
    DEFINED
        .lock()
        .map(|defined| defined.contains(tag))
        .unwrap_or_else(|poisoned| poisoned.into_inner().contains(tag))
}
