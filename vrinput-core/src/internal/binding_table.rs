use strum::EnumCount;
use vrinput_types::{action_set::Slot, input_source::InputSource};

use crate::catalog::ActionSetId;

const SLOTS_PER_SET: usize = InputSource::COUNT * 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveBinding {
    pub action_set: ActionSetId,
    pub source: InputSource,
    pub slot: Slot,
    pub priority: i32,
}

/**
 * Every possible (set, source, slot) activation laid out in one flat vec
 *
 * The key space is fixed once the catalog is built so no hashing is needed, a binding lives at
 * `(set * sources + source) * slots + slot`
 */
#[derive(Debug, Clone)]
pub struct BindingTable {
    storage: Vec<Option<ActiveBinding>>,
    len: usize,
}

impl BindingTable {
    pub fn new(action_set_count: usize) -> Self {
        Self {
            storage: vec![None; action_set_count * SLOTS_PER_SET],
            len: 0,
        }
    }

    fn position(action_set: ActionSetId, source: InputSource, slot: Slot) -> usize {
        action_set.index() * SLOTS_PER_SET + source.index() * 2 + slot.index()
    }

    pub fn get(
        &self,
        action_set: ActionSetId,
        source: InputSource,
        slot: Slot,
    ) -> Option<&ActiveBinding> {
        self.storage[Self::position(action_set, source, slot)].as_ref()
    }

    /// Returns the binding that previously occupied the slot
    pub fn insert(
        &mut self,
        action_set: ActionSetId,
        source: InputSource,
        slot: Slot,
        priority: i32,
    ) -> Option<ActiveBinding> {
        let entry = &mut self.storage[Self::position(action_set, source, slot)];
        let previous = entry.replace(ActiveBinding {
            action_set,
            source,
            slot,
            priority,
        });
        if previous.is_none() {
            self.len += 1;
        }
        previous
    }

    pub fn remove(
        &mut self,
        action_set: ActionSetId,
        source: InputSource,
        slot: Slot,
    ) -> Option<ActiveBinding> {
        let removed = self.storage[Self::position(action_set, source, slot)].take();
        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }

    /// Removes everything, handing each removed binding to `on_removed`
    pub fn clear<F: FnMut(ActiveBinding)>(&mut self, mut on_removed: F) {
        if self.len == 0 {
            return;
        }
        for entry in self.storage.iter_mut() {
            if let Some(binding) = entry.take() {
                on_removed(binding);
            }
        }
        self.len = 0;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.storage.iter(),
        }
    }
}

pub struct Iter<'a> {
    inner: core::slice::Iter<'a, Option<ActiveBinding>>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a ActiveBinding;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.inner.next()? {
                return Some(entry);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use vrinput_types::{action_set::ActionSetUsage, ActionSetHandle, InputSourceHandle};

    use super::*;
    use crate::catalog::{Catalog, InputSources};

    fn ids() -> Vec<ActionSetId> {
        let mut builder = Catalog::builder(
            InputSources::from_handles(InputSourceHandle(1), InputSourceHandle(2)).unwrap(),
        );
        builder
            .add("/actions/a", ActionSetUsage::LeftRight, ActionSetHandle(1))
            .unwrap();
        builder
            .add("/actions/b", ActionSetUsage::LeftRight, ActionSetHandle(2))
            .unwrap();
        builder.build().ids().collect()
    }

    #[test]
    fn slots_are_independent() {
        let ids = ids();
        let mut table = BindingTable::new(ids.len());

        assert!(table.insert(ids[1], InputSource::LeftHand, Slot::Primary, 3).is_none());
        assert!(table.insert(ids[1], InputSource::LeftHand, Slot::Secondary, 4).is_none());
        assert_eq!(table.len(), 2);

        let previous = table.insert(ids[1], InputSource::LeftHand, Slot::Primary, 9).unwrap();
        assert_eq!(previous.priority, 3);
        assert_eq!(table.len(), 2);
        assert!(table.get(ids[1], InputSource::RightHand, Slot::Primary).is_none());
        assert!(table.get(ids[0], InputSource::LeftHand, Slot::Primary).is_none());

        assert!(table.remove(ids[1], InputSource::LeftHand, Slot::Secondary).is_some());
        assert!(table.remove(ids[1], InputSource::LeftHand, Slot::Secondary).is_none());
        assert_eq!(table.len(), 1);
        assert_eq!(
            table.get(ids[1], InputSource::LeftHand, Slot::Primary).map(|b| b.priority),
            Some(9)
        );
    }

    #[test]
    fn iterates_in_table_order_and_clears() {
        let ids = ids();
        let mut table = BindingTable::new(ids.len());
        table.insert(ids[1], InputSource::Any, Slot::Primary, 0);
        table.insert(ids[0], InputSource::RightHand, Slot::Secondary, 1);
        table.insert(ids[0], InputSource::Any, Slot::Primary, 2);

        let order = table
            .iter()
            .map(|binding| (binding.action_set, binding.source, binding.slot))
            .collect::<Vec<_>>();
        assert_eq!(
            order,
            [
                (ids[0], InputSource::Any, Slot::Primary),
                (ids[0], InputSource::RightHand, Slot::Secondary),
                (ids[1], InputSource::Any, Slot::Primary),
            ]
        );

        let mut removed = 0;
        table.clear(|_| removed += 1);
        assert_eq!(removed, 3);
        assert!(table.is_empty());
        assert_eq!(table.iter().count(), 0);
    }
}
