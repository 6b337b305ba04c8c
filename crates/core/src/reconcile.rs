// Copyright (C) 2026 Staffdesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// The three disjoint operation sets produced by [`reconcile`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeSet<T> {
    /// Records to insert: desired records with no key, or whose key is not
    /// yet persisted.
    pub to_create: Vec<T>,
    /// Records to rewrite: desired records whose key is already persisted.
    /// Emitted as-is, without field-level diffing.
    pub to_update: Vec<T>,
    /// Records to delete: previously persisted records no longer named by
    /// the desired collection.
    pub to_remove: Vec<T>,
}

impl<T> ChangeSet<T> {
    /// Returns true when applying this change set would issue no calls.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.to_create.is_empty() && self.to_update.is_empty() && self.to_remove.is_empty()
    }
}

/// Partitions a desired collection against the previously persisted one.
///
/// `key` extracts the record's identity. `None` marks a record that has
/// never been persisted; such records are unconditionally creations.
/// History records key on their storage-assigned id; skill assignments,
/// which carry no surrogate key, key on the skill id itself.
///
/// Partitioning rules:
/// - `to_create`: desired records whose key is `None` or absent from
///   `previous`.
/// - `to_update`: desired records whose key appears in `previous`. No
///   field-level diff is attempted; an update is emitted even when nothing
///   changed.
/// - `to_remove`: previous records whose key is absent from `desired`.
///
/// The partitions are disjoint, output ordering matches input ordering, and
/// the result is a pure function of the two collections.
pub fn reconcile<T, K, F>(desired: Vec<T>, previous: Vec<T>, key: F) -> ChangeSet<T>
where
    K: PartialEq,
    F: Fn(&T) -> Option<K>,
{
    let previous_keys: Vec<K> = previous.iter().filter_map(&key).collect();
    let desired_keys: Vec<K> = desired.iter().filter_map(&key).collect();

    let mut to_create: Vec<T> = Vec::new();
    let mut to_update: Vec<T> = Vec::new();
    for record in desired {
        match key(&record) {
            Some(k) if previous_keys.contains(&k) => to_update.push(record),
            _ => to_create.push(record),
        }
    }

    let to_remove: Vec<T> = previous
        .into_iter()
        .filter(|record| {
            key(record).is_none_or(|k| !desired_keys.contains(&k))
        })
        .collect();

    ChangeSet {
        to_create,
        to_update,
        to_remove,
    }
}
