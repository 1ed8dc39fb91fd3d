//! Display slots: where countdown values are written.
//!
//! A countdown never renders anything itself. At activation it asks an
//! [`ActivationSource`] which units have a display target, binds those once,
//! and from then on pushes text and finished markers into a [`UnitSink`] by
//! [`SlotId`].
//!
//! [`SlotBoard`] is an in-memory sink that keeps the last written state of
//! every slot. The bubbletea widget renders from one, and it is handy in
//! tests.

use crate::unit::{Unit, UnitSet};
use std::collections::HashMap;

/// Stable identifier of a display target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId(pub u32);

impl From<Unit> for SlotId {
    fn from(unit: Unit) -> Self {
        SlotId(unit.index() as u32)
    }
}

/// What an [`ActivationSource`] reports for a unit that has a display target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotSpec {
    /// Where values for the unit are written.
    pub id: SlotId,
    /// Minimum number of digits; shorter values are left-padded with zeros.
    ///
    /// Negative widths are treated as zero.
    pub pad_zeros: Option<i64>,
}

impl SlotSpec {
    /// A slot with no padding.
    pub fn new(id: impl Into<SlotId>) -> Self {
        Self {
            id: id.into(),
            pad_zeros: None,
        }
    }

    /// Sets the zero-pad width.
    pub fn with_pad_zeros(mut self, width: i64) -> Self {
        self.pad_zeros = Some(width);
        self
    }
}

/// Supplies the raw target and the slot layout when a countdown activates.
pub trait ActivationSource {
    /// Raw target instant, parsed with [`crate::instant::parse_instant`].
    fn until(&self) -> Option<&str>;

    /// The display target bound to `unit`, if any.
    fn slot(&self, unit: Unit) -> Option<SlotSpec>;
}

/// Receives countdown output.
pub trait UnitSink {
    /// Replaces the text shown in `slot`.
    fn set_text(&mut self, slot: SlotId, text: &str);

    /// Toggles the finished marker of `slot`.
    fn set_finished(&mut self, slot: SlotId, finished: bool);

    /// Toggles the finished marker of the countdown as a whole.
    fn set_countdown_finished(&mut self, _finished: bool) {}
}

impl<T: UnitSink + ?Sized> UnitSink for &mut T {
    fn set_text(&mut self, slot: SlotId, text: &str) {
        (**self).set_text(slot, text)
    }

    fn set_finished(&mut self, slot: SlotId, finished: bool) {
        (**self).set_finished(slot, finished)
    }

    fn set_countdown_finished(&mut self, finished: bool) {
        (**self).set_countdown_finished(finished)
    }
}

/// A unit bound to a display target for the duration of one activation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    unit: Unit,
    id: SlotId,
    pad_zeros: usize,
    text: Option<String>,
    finished: Option<bool>,
}

impl Slot {
    fn bind(unit: Unit, spec: SlotSpec) -> Self {
        let pad_zeros = spec
            .pad_zeros
            .map_or(0, |width| usize::try_from(width).unwrap_or(0));
        Self {
            unit,
            id: spec.id,
            pad_zeros,
            text: None,
            finished: None,
        }
    }

    /// The unit this slot displays.
    pub fn unit(&self) -> Unit {
        self.unit
    }

    /// The display target.
    pub fn id(&self) -> SlotId {
        self.id
    }

    /// Normalised zero-pad width.
    pub fn pad_zeros(&self) -> usize {
        self.pad_zeros
    }

    /// The text last written to this slot.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Whether the slot is currently marked finished.
    pub fn finished(&self) -> bool {
        self.finished.unwrap_or(false)
    }

    /// Formats `value` with this slot's padding.
    pub fn format(&self, value: u64) -> String {
        format!("{:0>width$}", value, width = self.pad_zeros)
    }

    /// Writes `value` through `sink` unless the slot already shows it.
    ///
    /// Returns `true` if the sink was written to.
    pub(crate) fn write_value<K: UnitSink>(&mut self, sink: &mut K, value: u64) -> bool {
        let text = self.format(value);
        if self.text.as_deref() == Some(text.as_str()) {
            return false;
        }
        sink.set_text(self.id, &text);
        self.text = Some(text);
        true
    }

    pub(crate) fn write_finished<K: UnitSink>(&mut self, sink: &mut K, finished: bool) {
        if self.finished != Some(finished) {
            sink.set_finished(self.id, finished);
            self.finished = Some(finished);
        }
    }
}

/// Binds every unit the source has a slot for, largest unit first.
pub fn discover_slots<A: ActivationSource + ?Sized>(source: &A) -> Vec<Slot> {
    Unit::ALL
        .into_iter()
        .filter_map(|unit| source.slot(unit).map(|spec| Slot::bind(unit, spec)))
        .collect()
}

/// The units covered by `slots`.
pub fn unit_set(slots: &[Slot]) -> UnitSet {
    slots.iter().map(Slot::unit).collect()
}

/// Last written state of one slot on a [`SlotBoard`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotDisplay {
    /// Current text.
    pub text: String,
    /// Current finished marker.
    pub finished: bool,
}

/// In-memory [`UnitSink`].
///
/// Keeps the current text and finished marker for every slot it has been
/// written to, plus write counters.
///
/// ```rust
/// use bubbletea_countdown::slot::{SlotBoard, SlotId, UnitSink};
///
/// let mut board = SlotBoard::default();
/// board.set_text(SlotId(6), "05");
/// assert_eq!(board.text(SlotId(6)), Some("05"));
/// assert_eq!(board.text_writes(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SlotBoard {
    slots: HashMap<SlotId, SlotDisplay>,
    finished: bool,
    text_writes: usize,
}

impl SlotBoard {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// The display state of `slot`.
    pub fn get(&self, slot: SlotId) -> Option<&SlotDisplay> {
        self.slots.get(&slot)
    }

    /// Text currently shown in `slot`.
    pub fn text(&self, slot: SlotId) -> Option<&str> {
        self.get(slot).map(|display| display.text.as_str())
    }

    /// Whether `slot` is marked finished.
    pub fn slot_finished(&self, slot: SlotId) -> bool {
        self.get(slot).is_some_and(|display| display.finished)
    }

    /// Whether the countdown as a whole is marked finished.
    pub fn finished(&self) -> bool {
        self.finished
    }

    /// Number of text writes received so far.
    pub fn text_writes(&self) -> usize {
        self.text_writes
    }

    /// Forgets every slot and resets counters.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

impl UnitSink for SlotBoard {
    fn set_text(&mut self, slot: SlotId, text: &str) {
        self.text_writes += 1;
        self.slots.entry(slot).or_default().text = text.to_string();
    }

    fn set_finished(&mut self, slot: SlotId, finished: bool) {
        self.slots.entry(slot).or_default().finished = finished;
    }

    fn set_countdown_finished(&mut self, finished: bool) {
        self.finished = finished;
    }
}
