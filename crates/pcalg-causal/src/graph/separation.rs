//! Registry of the conditioning sets that justified each edge removal.

use pcalg_core::{ConditioningSet, VarIndex};
use rustc_hash::FxHashMap;
use serde::ser::{Serialize, SerializeStruct, Serializer};

/// One separation set per removed edge, keyed by the unordered pair.
///
/// The first set recorded for a pair wins; later inserts for the same pair are
/// ignored. Pairs that were never removed have no entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeparationSets {
    sets: FxHashMap<(VarIndex, VarIndex), ConditioningSet>,
}

fn key(i: VarIndex, j: VarIndex) -> (VarIndex, VarIndex) {
    if i < j {
        (i, j)
    } else {
        (j, i)
    }
}

impl SeparationSets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `set` for `{i, j}`. Returns `false` if the pair already had one.
    pub fn insert(&mut self, i: VarIndex, j: VarIndex, set: ConditioningSet) -> bool {
        match self.sets.entry(key(i, j)) {
            std::collections::hash_map::Entry::Occupied(_) => false,
            std::collections::hash_map::Entry::Vacant(slot) => {
                slot.insert(set);
                true
            }
        }
    }

    pub fn get(&self, i: VarIndex, j: VarIndex) -> Option<&ConditioningSet> {
        self.sets.get(&key(i, j))
    }

    pub fn contains(&self, i: VarIndex, j: VarIndex) -> bool {
        self.sets.contains_key(&key(i, j))
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Entries ordered by pair.
    pub fn entries(&self) -> Vec<((VarIndex, VarIndex), &ConditioningSet)> {
        let mut entries: Vec<_> = self.sets.iter().map(|(&pair, set)| (pair, set)).collect();
        entries.sort_unstable_by_key(|(pair, _)| *pair);
        entries
    }
}

struct Entry<'a> {
    pair: (VarIndex, VarIndex),
    set: &'a ConditioningSet,
}

impl Serialize for Entry<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("SeparationEntry", 3)?;
        state.serialize_field("i", &self.pair.0)?;
        state.serialize_field("j", &self.pair.1)?;
        state.serialize_field("set", self.set.as_slice())?;
        state.end()
    }
}

impl Serialize for SeparationSets {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(
            self.entries()
                .into_iter()
                .map(|(pair, set)| Entry { pair, set }),
        )
    }
}
