//! Q-table and V-table produced by the planner.

use std::collections::BTreeMap;

use super::types::{ActionKind, QKey};
use crate::topology::CityId;

/// Expected discounted value per `(from, to, kind)`.
///
/// A Move entry exists for every ordered pair of distinct cities; a Pickup
/// entry only where the planned vehicle can carry the task.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QTable {
    entries: BTreeMap<QKey, f64>,
}

impl QTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: QKey, value: f64) {
        self.entries.insert(key, value);
    }

    pub fn get(&self, from: CityId, to: CityId, kind: ActionKind) -> Option<f64> {
        self.entries.get(&QKey::new(from, to, kind)).copied()
    }

    /// True if at least one action is recorded for the decision state.
    pub fn contains_state(&self, from: CityId, to: CityId) -> bool {
        ActionKind::all()
            .iter()
            .any(|&kind| self.entries.contains_key(&QKey::new(from, to, kind)))
    }

    /// Entries whose decision state starts at `from`, in key order.
    pub fn entries_from(&self, from: CityId) -> impl Iterator<Item = (&QKey, &f64)> {
        let lo = QKey::new(from, CityId::new(0), ActionKind::Move);
        self.entries
            .range(lo..)
            .take_while(move |(key, _)| key.from == from)
    }

    /// Best value over every entry leaving `from`.
    pub fn best_value(&self, from: CityId) -> Option<f64> {
        self.entries_from(from).map(|(_, v)| *v).reduce(f64::max)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&QKey, &f64)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Per-city value estimate, indexed by [`CityId`].
#[derive(Debug, Clone, PartialEq)]
pub struct ValueTable {
    values: Vec<f64>,
}

impl ValueTable {
    /// All cities start at zero.
    pub fn zeros(n: usize) -> Self {
        Self {
            values: vec![0.0; n],
        }
    }

    pub fn get(&self, city: CityId) -> Option<f64> {
        self.values.get(city.index()).copied()
    }

    pub(crate) fn set(&mut self, city: CityId, value: f64) {
        self.values[city.index()] = value;
    }

    pub fn iter(&self) -> impl Iterator<Item = (CityId, f64)> + '_ {
        self.values
            .iter()
            .enumerate()
            .map(|(i, v)| (CityId::new(i), *v))
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Largest absolute per-city difference to `other`.
    pub fn max_abs_diff(&self, other: &ValueTable) -> f64 {
        self.values
            .iter()
            .zip(&other.values)
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max)
    }

    /// Cities sorted by decreasing value, ties by id.
    pub fn ranking(&self) -> Vec<CityId> {
        let mut ids: Vec<CityId> = (0..self.values.len()).map(CityId::new).collect();
        ids.sort_by(|a, b| {
            self.values[b.index()]
                .total_cmp(&self.values[a.index()])
                .then(a.cmp(b))
        });
        ids
    }
}
