//! Working state of a placement run.
//!
//! [`PlacementState`] tracks, per person, the months already on leave and how
//! many leaves they hold; [`CategoryLoad`] tracks how many people of one
//! category are on leave in each month and decides whether a candidate span
//! keeps that load even. Spans are inclusive month indices into the horizon.

use std::collections::HashMap;
use std::ops::RangeInclusive;

use rand::Rng;

use crate::models::{Assignment, Horizon};

/// An inclusive run of horizon month indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    pub fn overlaps(&self, other: &Span) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    pub fn indices(&self) -> RangeInclusive<usize> {
        self.start..=self.end
    }

    /// The part of an assignment falling inside `horizon`, if any.
    pub fn clipped(assignment: &Assignment, horizon: &Horizon) -> Option<Span> {
        horizon
            .index_range(assignment.start, assignment.end)
            .map(|range| Span::new(*range.start(), *range.end()))
    }
}

#[derive(Debug, Clone, Default)]
struct PersonLedger {
    spans: Vec<Span>,
    total: u32,
    by_category: HashMap<String, u32>,
}

impl PersonLedger {
    fn held(&self, category: &str) -> u32 {
        self.by_category.get(category).copied().unwrap_or(0)
    }
}

/// Per-person occupancy and leave counts.
#[derive(Debug, Clone)]
pub(crate) struct PlacementState {
    people: Vec<PersonLedger>,
}

impl PlacementState {
    pub fn new(roster_len: usize) -> Self {
        Self {
            people: vec![PersonLedger::default(); roster_len],
        }
    }

    /// Records a leave the person already holds. Leaves outside the horizon
    /// still count toward the caps but block no months.
    pub fn preload(&mut self, person: usize, category: &str, span: Option<Span>) {
        let ledger = &mut self.people[person];
        if let Some(span) = span {
            ledger.spans.push(span);
        }
        ledger.total += 1;
        *ledger.by_category.entry(category.to_string()).or_insert(0) += 1;
    }

    /// Further occurrences of `category` the person may still take.
    pub fn remaining(&self, person: usize, category: &str, max_per_person: u32, max_total: u32) -> u32 {
        let ledger = &self.people[person];
        let category_room = max_per_person.saturating_sub(ledger.held(category));
        let total_room = max_total.saturating_sub(ledger.total);
        category_room.min(total_room)
    }

    pub fn can_take(&self, person: usize, category: &str, max_per_person: u32, max_total: u32) -> bool {
        self.remaining(person, category, max_per_person, max_total) > 0
    }

    /// Returns true if none of the person's leaves touch `span`.
    pub fn is_free(&self, person: usize, span: Span) -> bool {
        self.people[person].spans.iter().all(|s| !s.overlaps(&span))
    }

    pub fn commit(&mut self, person: usize, category: &str, span: Span) {
        self.preload(person, category, Some(span));
    }
}

/// Month-by-month count of people on leave for one category.
#[derive(Debug, Clone)]
pub(crate) struct CategoryLoad {
    load: Vec<u32>,
    occupied: u64,
}

impl CategoryLoad {
    pub fn new(months: usize) -> Self {
        Self {
            load: vec![0; months],
            occupied: 0,
        }
    }

    /// How far the busiest month of `span` would sit above the running
    /// mean once the span is added, in people. Never negative.
    pub fn divergence(&self, span: Span) -> f64 {
        let months = self.load.len() as f64;
        let mean = (self.occupied + span.len() as u64) as f64 / months;
        let peak = span
            .indices()
            .map(|m| self.load[m] + 1)
            .max()
            .unwrap_or(0) as f64;
        (peak - mean - 1.0).max(0.0)
    }

    /// Accepts `span` with probability `exp(-strength × divergence)`.
    pub fn accepts<R: Rng>(&self, span: Span, strength: f64, rng: &mut R) -> bool {
        if strength <= 0.0 {
            return true;
        }
        let divergence = self.divergence(span);
        if divergence <= 0.0 {
            return true;
        }
        rng.random::<f64>() < (-strength * divergence).exp()
    }

    pub fn record(&mut self, span: Span) {
        for m in span.indices() {
            self.load[m] += 1;
        }
        self.occupied += span.len() as u64;
    }

    pub fn loads(&self) -> &[u32] {
        &self.load
    }
}
