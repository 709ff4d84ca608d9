//! Append-only history of committed moves.
use std::time::Duration;

use bevy::prelude::*;

use crate::utils::face::Move;

#[derive(Clone, Debug, PartialEq)]
pub struct MoveRecord {
    pub mv: Move,
    pub notation: String,
    /// Elapsed application time at commit.
    pub timestamp: Duration,
}

/// Full in-memory history. Display code reads a window of the most recent entries.
#[derive(Resource, Default, Debug)]
pub struct MoveHistory {
    records: Vec<MoveRecord>,
}

impl MoveHistory {
    pub fn record(&mut self, mv: Move, notation: impl Into<String>, timestamp: Duration) {
        self.records.push(MoveRecord {
            mv,
            notation: notation.into(),
            timestamp,
        });
    }

    /// The last `n` records, oldest first.
    pub fn recent(&self, n: usize) -> &[MoveRecord] {
        let start = self.records.len().saturating_sub(n);
        &self.records[start..]
    }

    pub fn all(&self) -> &[MoveRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Notation of the last `n` moves joined by spaces.
    pub fn recent_notation(&self, n: usize) -> String {
        self.recent(n)
            .iter()
            .map(|record| record.notation.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// One `<timestamp>  <notation>` line per record in the last `n`, oldest first.
    pub fn recent_lines(&self, n: usize) -> String {
        self.recent(n)
            .iter()
            .map(MoveRecord::line)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl MoveRecord {
    /// Seconds since startup with millisecond precision, then the notation.
    pub fn line(&self) -> String {
        format!("{:>8.3}s  {}", self.timestamp.as_secs_f64(), self.notation)
    }
}
