//! Category-balanced allocation.

use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;
use tracing::warn;

use super::{Allocation, Allocator};
use crate::core::{Category, Registrant, RegistrantId, RosterConfig, Side, SideMap};
use crate::locks::LockQuery;

/// Splits every category evenly between the squads.
///
/// ## Algorithm
///
/// 1. Only the first `batch_size` candidates are considered; the rest is
///    overflow.
/// 2. Locked candidates in the batch are set aside.
/// 3. Eligible candidates are grouped by category, keeping first-seen
///    category order and queue order inside each group.
/// 4. For a group of `n`: the first `n / 2` go to A, the next `n / 2` to B,
///    and an odd leftover goes to the smaller squad (A on ties).
/// 5. Each squad is cut to `squad_capacity`; cut players are dropped.
/// 6. Residual queue = locked batch members then overflow, minus placed ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CategoryBalanced {
    pub batch_size: usize,
    pub squad_capacity: usize,
}

impl Default for CategoryBalanced {
    fn default() -> Self {
        Self::from_config(&RosterConfig::default())
    }
}

impl CategoryBalanced {
    #[must_use]
    pub fn from_config(config: &RosterConfig) -> Self {
        Self {
            batch_size: config.batch_size,
            squad_capacity: config.squad_capacity,
        }
    }
}

type Group<'a> = SmallVec<[&'a Registrant; 10]>;

impl Allocator for CategoryBalanced {
    fn allocate(&self, candidates: &[Registrant], locks: &dyn LockQuery) -> Allocation {
        let split = candidates.len().min(self.batch_size);
        let (batch, overflow) = candidates.split_at(split);

        let mut locked: Vec<&Registrant> = Vec::new();
        let mut seen: FxHashSet<&RegistrantId> = FxHashSet::default();

        // Category groups in first-seen order.
        let mut groups: Vec<(&Category, Group<'_>)> = Vec::new();
        let mut group_index: FxHashMap<&Category, usize> = FxHashMap::default();

        for candidate in batch {
            if locks.is_locked(&candidate.id) {
                locked.push(candidate);
                continue;
            }
            if !seen.insert(&candidate.id) {
                continue;
            }
            let slot = *group_index.entry(&candidate.category).or_insert_with(|| {
                groups.push((&candidate.category, Group::new()));
                groups.len() - 1
            });
            groups[slot].1.push(candidate);
        }

        let mut squads: SideMap<Vec<&Registrant>> = SideMap::default();
        for (_, group) in &groups {
            let half = group.len() / 2;
            squads[Side::A].extend_from_slice(&group[..half]);
            squads[Side::B].extend_from_slice(&group[half..half * 2]);

            if group.len() % 2 == 1 {
                let side = if squads[Side::A].len() <= squads[Side::B].len() {
                    Side::A
                } else {
                    Side::B
                };
                squads[side].push(group[group.len() - 1]);
            }
        }

        let mut dropped = Vec::new();
        for side in Side::BOTH {
            let squad = &mut squads[side];
            if squad.len() > self.squad_capacity {
                dropped.extend(squad.drain(self.squad_capacity..).cloned());
            }
        }
        if !dropped.is_empty() {
            warn!(
                dropped = dropped.len(),
                capacity = self.squad_capacity,
                "allocation exceeded squad capacity; cut players were not requeued"
            );
        }

        let placed: FxHashSet<&RegistrantId> = Side::BOTH
            .into_iter()
            .flat_map(|side| squads[side].iter().map(|r| &r.id))
            .collect();

        let residual = locked
            .into_iter()
            .chain(overflow.iter())
            .filter(|r| !placed.contains(&r.id))
            .cloned()
            .collect();

        Allocation {
            squads: squads.map(|_, members| members.into_iter().cloned().collect()),
            residual,
            dropped,
        }
    }
}
