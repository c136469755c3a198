// Copyright 2026 the Region List Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;
use core::hash::Hash;

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::region_list::ResizePlan;
use crate::{Error, MergedEvents, Region, RegionList};

/// A keyed set of [`RegionList`]s sharing one domain.
///
/// Each list ("track") records one attribute of the text, for example the
/// foreground color or a link target. All tracks always have the manager's
/// length: they are resized together, and lists of a different length can't be
/// attached.
///
/// After painting, [`merged_events`](Self::merged_events) replays every track
/// at once as a single timeline of value changes.
///
/// ## Example
///
/// ```
/// use region_list::{Region, RegionListManager};
///
/// #[derive(Clone, Debug, PartialEq, Eq, Hash)]
/// enum Track {
///     Fg,
///     Url,
/// }
///
/// let mut rlm = RegionListManager::new(10).unwrap();
/// rlm.create_region_list(Track::Fg, "white");
/// rlm.create_region_list(Track::Url, "");
/// rlm.insert_region(&Track::Fg, Region::new(4, 7, "blue")).unwrap();
/// rlm.insert_region(&Track::Url, Region::new(4, 7, "https://example.com")).unwrap();
///
/// let offsets: Vec<_> = rlm.merged_events().map(|e| e.offset()).collect();
/// assert_eq!(offsets, [0, 4, 8]);
/// ```
#[derive(Clone, Debug)]
pub struct RegionListManager<K, V> {
    len: usize,
    /// Tracks in registration order.
    tracks: Vec<(K, RegionList<V>)>,
    /// Key to index into `tracks`.
    index: HashMap<K, usize>,
}

#[expect(
    clippy::len_without_is_empty,
    reason = "A manager always covers at least one offset."
)]
impl<K: Eq + Hash + Clone, V> RegionListManager<K, V> {
    /// Create a manager with no tracks over the domain `0..len`.
    ///
    /// Fails with [`ErrorKind::InvalidRange`](crate::ErrorKind::InvalidRange) if
    /// `len` is 0.
    pub fn new(len: usize) -> Result<Self, Error> {
        if len == 0 {
            return Err(Error::invalid_offset(0, 0));
        }
        Ok(Self {
            len,
            tracks: Vec::new(),
            index: HashMap::new(),
        })
    }

    /// Returns the length of the domain shared by all tracks.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns the number of registered tracks.
    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    /// Iterate over the track keys in registration order.
    pub fn keys(&self) -> impl ExactSizeIterator<Item = &K> {
        self.tracks.iter().map(|(key, _)| key)
    }

    /// Returns `true` if a track is registered under `key`.
    pub fn contains_key(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Borrow the track registered under `key`.
    pub fn region_list(&self, key: &K) -> Option<&RegionList<V>> {
        let &slot = self.index.get(key)?;
        Some(&self.tracks[slot].1)
    }

    /// Returns the value of the track `key` at `offset`.
    pub fn value_at(&self, key: &K, offset: usize) -> Option<&V> {
        self.region_list(key)?.value_at(offset)
    }

    /// Register a new track holding `default_value` everywhere.
    ///
    /// An existing track under the same key is replaced and returned.
    pub fn create_region_list(&mut self, key: K, default_value: V) -> Option<RegionList<V>> {
        let list = RegionList::new_unchecked(self.len, default_value);
        self.attach(key, list)
    }

    /// Register an existing list as a track.
    ///
    /// An existing track under the same key is replaced and returned.
    ///
    /// Fails with [`ErrorKind::LengthMismatch`](crate::ErrorKind::LengthMismatch)
    /// if the list's length differs from the manager's.
    pub fn add_region_list(
        &mut self,
        key: K,
        list: RegionList<V>,
    ) -> Result<Option<RegionList<V>>, Error> {
        if list.len() != self.len {
            log::debug!(
                "rejected region list of len {} for manager of len {}",
                list.len(),
                self.len
            );
            return Err(Error::length_mismatch(self.len, list.len()));
        }
        Ok(self.attach(key, list))
    }

    /// Grow or shrink every track by `amount` at `offset`.
    ///
    /// This is all-or-nothing: every track is checked before any is changed,
    /// so on error all tracks are left as they were. See
    /// [`RegionList::resize_at`] for the per-track semantics.
    ///
    /// Returns the new length.
    pub fn resize_at(&mut self, offset: usize, amount: isize) -> Result<usize, Error> {
        let len = self.len;
        if offset > len {
            log::debug!("rejected resize at {offset} for len {len}");
            return Err(Error::invalid_offset(offset, len));
        }
        if amount == 0 {
            return Ok(len);
        }
        if amount < 0 && amount.unsigned_abs() >= len {
            log::debug!("rejected shrink by {amount} for len {len}");
            return Err(Error::shrink_too_large(offset, amount, len - 1, len));
        }

        let plans = self
            .tracks
            .iter()
            .map(|(_, list)| list.plan_resize(offset, amount))
            .collect::<Result<SmallVec<[Option<ResizePlan>; 8]>, Error>>()
            .inspect_err(|e| log::debug!("rejected resize by {amount} at {offset}: {e}"))?;
        for ((_, list), plan) in self.tracks.iter_mut().zip(plans) {
            if let Some(plan) = plan {
                list.apply_resize(plan);
            }
        }
        self.len = len.saturating_add_signed(amount);
        debug_assert!(
            self.tracks.iter().all(|(_, list)| list.len() == self.len),
            "tracks out of step with manager"
        );
        Ok(self.len)
    }

    /// Replay all tracks together as an ordered sequence of [`MergedEvent`]s.
    ///
    /// Each event reports the value of every track from its offset until the
    /// next event's offset. The first event is always at offset 0, unless the
    /// manager has no tracks, in which case nothing is yielded.
    ///
    /// The iterator borrows the manager, so tracks can't change during a
    /// traversal. Calling this again starts a fresh traversal.
    ///
    /// [`MergedEvent`]: crate::MergedEvent
    pub fn merged_events(&self) -> MergedEvents<'_, K, V> {
        MergedEvents::new(&self.tracks)
    }

    fn slot(&self, key: &K) -> Result<usize, Error> {
        self.index
            .get(key)
            .copied()
            .ok_or_else(|| Error::unknown_track(self.len))
    }

    fn attach(&mut self, key: K, list: RegionList<V>) -> Option<RegionList<V>> {
        debug_assert_eq!(list.len(), self.len, "attached list has the wrong length");
        if let Some(&slot) = self.index.get(&key) {
            return Some(core::mem::replace(&mut self.tracks[slot].1, list));
        }
        self.index.insert(key.clone(), self.tracks.len());
        self.tracks.push((key, list));
        None
    }
}

impl<K: Eq + Hash + Clone, V: Clone + PartialEq> RegionListManager<K, V> {
    /// Paint `region` onto the track registered under `key`.
    ///
    /// Fails with [`ErrorKind::UnknownTrack`](crate::ErrorKind::UnknownTrack) if no
    /// such track exists, or with any error of [`RegionList::insert_region`].
    pub fn insert_region(&mut self, key: &K, region: Region<V>) -> Result<(), Error> {
        let slot = self.slot(key).inspect_err(|_| {
            log::debug!("insert into unknown track");
        })?;
        self.tracks[slot].1.insert_region(region)
    }
}

#[cfg(test)]
mod tests {
    use crate::{ErrorKind, Region, RegionList, RegionListManager};
    use alloc::vec::Vec;

    /// track 0: aaabbbccc
    /// track 1: ddeeeeeff
    fn two_tracks() -> RegionListManager<u8, &'static str> {
        let mut rlm = RegionListManager::new(9).unwrap();
        rlm.create_region_list(0, "a");
        rlm.insert_region(&0, Region::new(3, 5, "b")).unwrap();
        rlm.insert_region(&0, Region::new(6, 8, "c")).unwrap();
        rlm.create_region_list(1, "d");
        rlm.insert_region(&1, Region::new(2, 6, "e")).unwrap();
        rlm.insert_region(&1, Region::new(7, 8, "f")).unwrap();
        rlm
    }

    fn runs(list: &RegionList<&'static str>) -> Vec<(usize, usize, &'static str)> {
        list.regions()
            .iter()
            .map(|r| (r.start(), r.end(), *r.value()))
            .collect()
    }

    #[test]
    fn insert_per_track() {
        let rlm = two_tracks();
        assert_eq!(
            runs(rlm.region_list(&0).unwrap()),
            [(0, 2, "a"), (3, 5, "b"), (6, 8, "c")]
        );
        assert_eq!(
            runs(rlm.region_list(&1).unwrap()),
            [(0, 1, "d"), (2, 6, "e"), (7, 8, "f")]
        );
        assert_eq!(rlm.value_at(&1, 4), Some(&"e"));
        assert_eq!(rlm.keys().copied().collect::<Vec<_>>(), [0, 1]);
    }

    #[test]
    fn unknown_track() {
        let mut rlm = two_tracks();
        let err = rlm.insert_region(&7, Region::new(0, 0, "x")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownTrack);
        assert!(!rlm.contains_key(&7));
        assert!(rlm.region_list(&7).is_none());
    }

    #[test]
    fn add_checks_length() {
        let mut rlm = RegionListManager::<&str, char>::new(4).unwrap();
        let err = rlm
            .add_region_list("bg", RegionList::new(5, 'x').unwrap())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::LengthMismatch);
        assert_eq!(err.found_len(), Some(5));
        assert_eq!(rlm.track_count(), 0);

        let list = RegionList::from_regions(4, [Region::new(0, 1, 'x'), Region::new(2, 3, 'y')])
            .unwrap();
        assert_eq!(rlm.add_region_list("bg", list.clone()), Ok(None));
        assert_eq!(rlm.region_list(&"bg"), Some(&list));
    }

    #[test]
    fn create_replaces_existing_track() {
        let mut rlm = two_tracks();
        let old = rlm.create_region_list(0, "z").unwrap();
        assert_eq!(old.region_count(), 3);
        assert_eq!(rlm.track_count(), 2);
        assert_eq!(runs(rlm.region_list(&0).unwrap()), [(0, 8, "z")]);
    }

    #[test]
    fn resize_applies_to_all_tracks() {
        let mut rlm = two_tracks();
        assert_eq!(rlm.resize_at(4, 2), Ok(11));
        assert_eq!(rlm.len(), 11);
        assert_eq!(
            runs(rlm.region_list(&0).unwrap()),
            [(0, 2, "a"), (3, 7, "b"), (8, 10, "c")]
        );
        assert_eq!(
            runs(rlm.region_list(&1).unwrap()),
            [(0, 1, "d"), (2, 8, "e"), (9, 10, "f")]
        );
    }

    #[test]
    fn failed_resize_changes_nothing() {
        let mut rlm = two_tracks();
        let before: Vec<_> = rlm.keys().map(|k| rlm.region_list(k).cloned()).collect();

        // Track 0 could shrink its 3-wide region by 2, but track 1's region at
        // offset 7 is only 2 wide.
        let err = rlm.resize_at(7, -2).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ShrinkTooLarge);
        assert_eq!(rlm.len(), 9);
        let after: Vec<_> = rlm.keys().map(|k| rlm.region_list(k).cloned()).collect();
        assert_eq!(before, after);

        let err = rlm.resize_at(10, 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidRange);
        let err = rlm.resize_at(0, -9).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ShrinkTooLarge);
    }

    #[test]
    fn resize_by_zero_returns_len() {
        let mut rlm = two_tracks();
        assert_eq!(rlm.resize_at(3, 0), Ok(9));
    }

    #[test]
    fn empty_domain_is_rejected() {
        let err = RegionListManager::<u8, u8>::new(0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidRange);
    }
}
