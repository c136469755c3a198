// Copyright 2026 the Region List Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Merging of several tracks into one timeline.
//!
//! Given the tracks of a [`RegionListManager`](crate::RegionListManager), this module
//! sweeps across the domain and yields one event at every offset where at least one
//! track changes value, carrying the values of all tracks at that point.

use core::iter::FusedIterator;

use smallvec::SmallVec;

use crate::RegionList;

/// The combined state of every track, starting at a given offset.
///
/// Values hold until the offset of the next event (or the end of the domain).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MergedEvent<'a, K, V> {
    offset: usize,
    values: SmallVec<[(&'a K, &'a V); 8]>,
}

impl<'a, K, V> MergedEvent<'a, K, V> {
    /// The offset at which these values take effect.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the value of the track registered under `key`.
    pub fn get(&self, key: &K) -> Option<&'a V>
    where
        K: PartialEq,
    {
        self.values
            .iter()
            .find_map(|&(k, v)| (k == key).then_some(v))
    }

    /// Iterate over `(key, value)` pairs, in track registration order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&'a K, &'a V)> + '_ {
        self.values.iter().copied()
    }

    /// Returns the number of tracks reported.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if no tracks are reported.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Iterator over the [`MergedEvent`]s of a [`RegionListManager`](crate::RegionListManager).
///
/// Created by [`RegionListManager::merged_events`](crate::RegionListManager::merged_events).
///
/// Offsets strictly increase from one event to the next. When several tracks
/// change at the same offset, the changes are reported together in a single
/// event.
///
/// # Examples
///
/// ```
/// use region_list::{Region, RegionListManager};
///
/// let mut rlm = RegionListManager::new(9).unwrap();
/// rlm.create_region_list("style", 'a');
/// rlm.create_region_list("link", 'd');
/// rlm.insert_region(&"style", Region::new(3, 8, 'b')).unwrap();
/// rlm.insert_region(&"link", Region::new(3, 4, 'e')).unwrap();
///
/// let mut events = rlm.merged_events();
/// let first = events.next().unwrap();
/// assert_eq!(first.offset(), 0);
/// assert_eq!(first.get(&"style"), Some(&'a'));
///
/// let second = events.next().unwrap();
/// assert_eq!(second.offset(), 3);
/// assert_eq!(second.get(&"style"), Some(&'b'));
/// assert_eq!(second.get(&"link"), Some(&'e'));
///
/// let third = events.next().unwrap();
/// assert_eq!(third.offset(), 5);
/// assert_eq!(third.get(&"style"), Some(&'b'));
/// assert_eq!(third.get(&"link"), Some(&'d'));
///
/// assert!(events.next().is_none());
/// ```
///
/// # Implementation notes
///
/// Each step scans every track for its next region start, which costs
/// `O(tracks)` per event. Attribute tracks are usually few enough for this to
/// beat a heap.
#[derive(Clone, Debug)]
pub struct MergedEvents<'a, K, V> {
    tracks: &'a [(K, RegionList<V>)],
    /// Index of the next unvisited region of each track.
    cursors: SmallVec<[usize; 8]>,
    /// Value of each track as of the last event.
    active: SmallVec<[Option<&'a V>; 8]>,
}

impl<'a, K, V> MergedEvents<'a, K, V> {
    pub(crate) fn new(tracks: &'a [(K, RegionList<V>)]) -> Self {
        Self {
            tracks,
            cursors: SmallVec::from_elem(0, tracks.len()),
            active: SmallVec::from_elem(None, tracks.len()),
        }
    }

    fn remaining(&self) -> impl Iterator<Item = usize> + '_ {
        self.tracks
            .iter()
            .zip(&self.cursors)
            .map(|((_, list), &cursor)| list.region_count() - cursor)
    }
}

impl<'a, K, V> Iterator for MergedEvents<'a, K, V> {
    type Item = MergedEvent<'a, K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        let tracks = self.tracks;
        let offset = tracks
            .iter()
            .zip(&self.cursors)
            .filter_map(|((_, list), &cursor)| list.regions().get(cursor))
            .map(|r| r.start())
            .min()?;

        for (i, (_, list)) in tracks.iter().enumerate() {
            if let Some(region) = list.regions().get(self.cursors[i]) {
                if region.start() == offset {
                    self.active[i] = Some(region.value());
                    self.cursors[i] += 1;
                }
            }
        }

        let values = tracks
            .iter()
            .zip(&self.active)
            .filter_map(|((key, _), value)| value.map(|v| (key, v)))
            .collect();
        Some(MergedEvent { offset, values })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        // Every event consumes at least one region and at most one per track.
        let lower = self.remaining().max().unwrap_or(0);
        let upper = self.remaining().sum();
        (lower, Some(upper))
    }
}

impl<K, V> FusedIterator for MergedEvents<'_, K, V> {}

#[cfg(test)]
mod tests {
    use crate::{Region, RegionList, RegionListManager};
    use alloc::vec::Vec;

    type Row = (usize, Option<&'static str>, Option<&'static str>);

    fn rows(rlm: &RegionListManager<u8, &'static str>) -> Vec<Row> {
        rlm.merged_events()
            .map(|e| (e.offset(), e.get(&0).copied(), e.get(&1).copied()))
            .collect()
    }

    fn manager(
        len: usize,
        track0: &[(usize, usize, &'static str)],
        track1: &[(usize, usize, &'static str)],
    ) -> RegionListManager<u8, &'static str> {
        let mut rlm = RegionListManager::new(len).unwrap();
        for (key, track) in [(0, track0), (1, track1)] {
            let list =
                RegionList::from_regions(len, track.iter().map(|&(s, e, v)| Region::new(s, e, v)))
                    .unwrap();
            rlm.add_region_list(key, list).unwrap();
        }
        rlm
    }

    #[test]
    fn merges_two_tracks() {
        // 0: aaabbbccc
        // 1: ddeeeeeff
        let rlm = manager(
            9,
            &[(0, 2, "a"), (3, 5, "b"), (6, 8, "c")],
            &[(0, 1, "d"), (2, 6, "e"), (7, 8, "f")],
        );
        assert_eq!(
            rows(&rlm),
            [
                (0, Some("a"), Some("d")),
                (2, Some("a"), Some("e")),
                (3, Some("b"), Some("e")),
                (6, Some("c"), Some("e")),
                (7, Some("c"), Some("f")),
            ]
        );
    }

    #[test]
    fn simultaneous_changes_share_an_event() {
        // 0: aabb
        // 1: ccdd
        let rlm = manager(4, &[(0, 1, "a"), (2, 3, "b")], &[(0, 1, "c"), (2, 3, "d")]);
        assert_eq!(
            rows(&rlm),
            [(0, Some("a"), Some("c")), (2, Some("b"), Some("d"))]
        );
    }

    #[test]
    fn restarts_from_the_beginning() {
        let rlm = manager(4, &[(0, 1, "a"), (2, 3, "b")], &[(0, 3, "c")]);
        assert_eq!(rows(&rlm), rows(&rlm));
        assert_eq!(rlm.merged_events().count(), 2);
    }

    #[test]
    fn every_event_reports_every_track() {
        let rlm = manager(6, &[(0, 5, "a")], &[(0, 0, "x"), (1, 4, "y"), (5, 5, "z")]);
        for event in rlm.merged_events() {
            assert_eq!(event.len(), 2);
            let keys: Vec<_> = event.iter().map(|(k, _)| *k).collect();
            assert_eq!(keys, [0, 1]);
        }
    }

    #[test]
    fn no_tracks_yields_nothing() {
        let rlm = RegionListManager::<u8, &str>::new(3).unwrap();
        let mut events = rlm.merged_events();
        assert_eq!(events.size_hint(), (0, Some(0)));
        assert!(events.next().is_none());
    }

    #[test]
    fn size_hint_bounds_remaining_events() {
        let rlm = manager(
            9,
            &[(0, 2, "a"), (3, 5, "b"), (6, 8, "c")],
            &[(0, 1, "d"), (2, 6, "e"), (7, 8, "f")],
        );
        let mut events = rlm.merged_events();
        assert_eq!(events.size_hint(), (3, Some(6)));
        events.next();
        assert_eq!(events.size_hint(), (2, Some(4)));
        assert_eq!(events.by_ref().count(), 4);
        assert_eq!(events.size_hint(), (0, Some(0)));
        assert!(events.next().is_none());
    }
}
