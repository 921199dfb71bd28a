use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::storage::Storage;

/// A single countdown, saved as one entry of the persisted collection.
///
/// `end_time` is an absolute instant in milliseconds since the epoch, not a
/// duration; durations only exist while computing it at add/edit time. On
/// the wire the field is spelled `endTime`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timer {
    pub id: Uuid,
    pub label: String,
    pub end_time: i64,
}

/// The timer collection and its persisted slot.
///
/// The collection keeps insertion order. Every successful mutation rewrites
/// the whole collection to the slot, synchronously; a rejected edit writes
/// nothing.
pub struct TimerStore {
    storage: Box<dyn Storage>,
    timers: Vec<Timer>,
}

impl TimerStore {
    /// Load the collection from the slot. A missing, unreadable or corrupt
    /// slot is an empty collection, never an error.
    pub fn load(storage: Box<dyn Storage>) -> TimerStore {
        let timers = match storage.get() {
            Ok(Some(blob)) => serde_json::from_str(&blob).unwrap_or_else(|_| Vec::new()),
            _ => Vec::new(),
        };
        TimerStore { storage, timers }
    }

    pub fn timers(&self) -> &[Timer] {
        &self.timers
    }

    /// Append a timer ending `duration_ms` after `now_ms`, with a fresh
    /// random id, and persist. The duration was validated at the input
    /// boundary; the label is free text, empty included.
    pub fn add(&mut self, label: &str, duration_ms: i64, now_ms: i64) -> Result<()> {
        self.timers.push(Timer {
            id: Uuid::new_v4(),
            label: label.to_string(),
            end_time: now_ms + duration_ms,
        });
        self.save()?;
        Ok(())
    }

    /// Replace label and duration of the timer with `id` and persist. The
    /// countdown restarts from `now_ms`, not from the old end time.
    ///
    /// Silently refuses the whole edit when the label is empty, the
    /// duration is missing, or nothing has the id; the collection and the
    /// slot stay untouched. Returns whether the edit was applied.
    pub fn update(
        &mut self,
        id: Uuid,
        label: &str,
        duration_ms: Option<i64>,
        now_ms: i64,
    ) -> Result<bool> {
        let duration_ms = match duration_ms {
            Some(ms) if !label.is_empty() => ms,
            _ => return Ok(false),
        };

        match self.timers.iter_mut().find(|t| t.id == id) {
            Some(timer) => {
                timer.label = label.to_string();
                timer.end_time = now_ms + duration_ms;
            }
            None => return Ok(false),
        }

        self.save()?;
        Ok(true)
    }

    /// Remove the timer with `id` if present. Removing an id that is not
    /// there is not an error; the slot is rewritten either way. Returns
    /// whether something was removed.
    pub fn remove(&mut self, id: Uuid) -> Result<bool> {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        let removed = self.timers.len() < before;
        self.save()?;
        return Ok(removed);
    }

    fn save(&self) -> Result<()> {
        let blob = serde_json::to_string(&self.timers)
            .context("Failed to serialize the timer collection.")?;
        self.storage
            .set(&blob)
            .context("Failed to write the timer collection.")?;
        Ok(())
    }
}
