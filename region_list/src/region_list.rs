// Copyright 2026 the Region List Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;
use core::fmt::{Debug, Display};
use core::iter;

use crate::region::Overlap;
use crate::{Error, Region};

/// A run-length encoding of a single value across the domain `0..len`.
///
/// The regions of a `RegionList` are always sorted, never overlap, cover every
/// offset of the domain exactly once, and no two neighbouring regions hold equal
/// values. Each offset therefore has exactly one value, and every run of equal
/// values is stored as a single region.
///
/// Regions can't be removed directly. Painting a span with
/// [`insert_region`](Self::insert_region) splits, trims, absorbs or coalesces
/// whatever it overlaps; painting with the default value is how a span is
/// "cleared". [`resize_at`](Self::resize_at) grows or shrinks the domain to
/// follow edits of the underlying text.
///
/// Several lists over the same text are normally driven together through a
/// [`RegionListManager`](crate::RegionListManager).
///
/// ## Example
///
/// ```
/// use region_list::{Region, RegionList};
///
/// let mut fg = RegionList::new(6, "default").unwrap();
/// fg.insert_region(Region::new(2, 3, "red")).unwrap();
///
/// assert_eq!(fg.value_at(1), Some(&"default"));
/// assert_eq!(fg.value_at(2), Some(&"red"));
/// assert_eq!(fg.region_count(), 3);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegionList<V> {
    len: usize,
    regions: Vec<Region<V>>,
}

/// A validated resize of one list, ready to be applied.
#[derive(Copy, Clone, Debug)]
pub(crate) struct ResizePlan {
    /// Index of the region that absorbs the edit.
    index: usize,
    amount: isize,
    new_len: usize,
}

#[expect(
    clippy::len_without_is_empty,
    reason = "A region list always covers at least one offset."
)]
impl<V> RegionList<V> {
    /// Create a list with a single region spanning the whole domain.
    ///
    /// Fails with [`ErrorKind::InvalidRange`](crate::ErrorKind::InvalidRange) if
    /// `len` is 0.
    pub fn new(len: usize, default_value: V) -> Result<Self, Error> {
        if len == 0 {
            return Err(Error::invalid_offset(0, 0));
        }
        Ok(Self::new_unchecked(len, default_value))
    }

    /// Create a list over a domain already known to be non-empty.
    pub(crate) fn new_unchecked(len: usize, default_value: V) -> Self {
        debug_assert!(len > 0, "region list over an empty domain");
        Self {
            len,
            regions: alloc::vec![Region::new(0, len.saturating_sub(1), default_value)],
        }
    }

    /// Returns the length of the domain.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Borrow the regions, in ascending offset order.
    pub fn regions(&self) -> &[Region<V>] {
        &self.regions
    }

    /// Returns the number of regions currently stored.
    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    /// Returns the region covering `offset`, or `None` past the end of the domain.
    pub fn region_at(&self, offset: usize) -> Option<&Region<V>> {
        if offset >= self.len {
            return None;
        }
        let index = self.regions.partition_point(|r| r.end < offset);
        self.regions.get(index)
    }

    /// Returns the value active at `offset`, or `None` past the end of the domain.
    pub fn value_at(&self, offset: usize) -> Option<&V> {
        self.region_at(offset).map(Region::value)
    }

    /// Grow or shrink the domain by `amount` at `offset`.
    ///
    /// This models an edit to the underlying text: a positive `amount` is an
    /// insertion, a negative one a deletion. Only the region containing `offset`
    /// changes length, every later region is shifted by `amount`. An `offset`
    /// equal to [`len`](Self::len) targets the last region.
    ///
    /// Returns the new length. An `amount` of 0 leaves the list untouched.
    ///
    /// Fails with [`ErrorKind::InvalidRange`](crate::ErrorKind::InvalidRange) if
    /// `offset > len`, and with
    /// [`ErrorKind::ShrinkTooLarge`](crate::ErrorKind::ShrinkTooLarge) if the
    /// deletion would empty the affected region. A failed resize leaves the list
    /// unchanged.
    pub fn resize_at(&mut self, offset: usize, amount: isize) -> Result<usize, Error> {
        let plan = self.plan_resize(offset, amount).inspect_err(|e| {
            log::debug!("rejected resize by {amount} at {offset}: {e}");
        })?;
        if let Some(plan) = plan {
            self.apply_resize(plan);
        }
        Ok(self.len)
    }

    /// Check a resize without applying it.
    ///
    /// Returns `None` when there is nothing to do.
    pub(crate) fn plan_resize(
        &self,
        offset: usize,
        amount: isize,
    ) -> Result<Option<ResizePlan>, Error> {
        let len = self.len;
        if offset > len {
            return Err(Error::invalid_offset(offset, len));
        }
        if amount == 0 {
            return Ok(None);
        }
        let index = self
            .regions
            .partition_point(|r| r.end < offset)
            .min(self.regions.len() - 1);
        let region_len = self.regions[index].span_len();
        if amount < 0 && amount.unsigned_abs() >= region_len {
            return Err(Error::shrink_too_large(offset, amount, region_len - 1, len));
        }
        let Some(new_len) = len.checked_add_signed(amount) else {
            return Err(Error::invalid_offset(offset, len));
        };
        Ok(Some(ResizePlan {
            index,
            amount,
            new_len,
        }))
    }

    /// Apply a resize previously validated by [`Self::plan_resize`].
    pub(crate) fn apply_resize(&mut self, plan: ResizePlan) {
        let ResizePlan {
            index,
            amount,
            new_len,
        } = plan;
        let target = &mut self.regions[index];
        target.end = target.end.saturating_add_signed(amount);
        for r in &mut self.regions[index + 1..] {
            r.start = r.start.saturating_add_signed(amount);
            r.end = r.end.saturating_add_signed(amount);
        }
        log::trace!(
            "resized by {amount} in region {index}, len {} -> {new_len}",
            self.len
        );
        self.len = new_len;
    }
}

impl<V: PartialEq> RegionList<V> {
    /// Create a list from an explicit sequence of regions.
    ///
    /// The regions must start at 0, follow each other without gaps or overlaps,
    /// and end at `len - 1`. Neighbouring regions with equal values are merged.
    ///
    /// Fails with [`ErrorKind::InvalidRange`](crate::ErrorKind::InvalidRange),
    /// reporting the first region that breaks coverage.
    ///
    /// ```
    /// use region_list::{Region, RegionList};
    ///
    /// let rl = RegionList::from_regions(
    ///     4,
    ///     [Region::new(0, 1, 'a'), Region::new(2, 2, 'a'), Region::new(3, 3, 'b')],
    /// )
    /// .unwrap();
    /// assert_eq!(rl.regions(), &[Region::new(0, 2, 'a'), Region::new(3, 3, 'b')]);
    /// ```
    pub fn from_regions(
        len: usize,
        regions: impl IntoIterator<Item = Region<V>>,
    ) -> Result<Self, Error> {
        let mut out: Vec<Region<V>> = Vec::new();
        let mut next = 0;
        for r in regions {
            if r.start != next || r.end < r.start || r.end >= len {
                return Err(Error::invalid_range(r.start, r.end, len));
            }
            next = r.end + 1;
            match out.last_mut() {
                Some(last) if last.value == r.value => last.end = r.end,
                _ => out.push(r),
            }
        }
        if len == 0 || next != len {
            return Err(Error::invalid_range(next, len.saturating_sub(1), len));
        }
        Ok(Self { len, regions: out })
    }

    /// Returns `true` if the list covers its domain exactly with maximal runs.
    pub(crate) fn is_well_formed(&self) -> bool {
        let mut next = 0;
        for r in &self.regions {
            if r.start != next || r.end < r.start {
                return false;
            }
            next = r.end + 1;
        }
        let coalesced = self.regions.windows(2).all(|w| w[0].value != w[1].value);
        coalesced && self.len > 0 && next == self.len
    }
}

impl<V: Clone + PartialEq> RegionList<V> {
    /// Paint `region.value` over every offset in `region.start()..=region.end()`.
    ///
    /// Offsets outside the region keep their values. Overlapped regions are
    /// trimmed, split or absorbed, and the new span is merged with any
    /// neighbour that already holds the same value, so the list stays a true
    /// run-length encoding.
    ///
    /// Fails with [`ErrorKind::InvalidRange`](crate::ErrorKind::InvalidRange) if
    /// `end < start` or `end >= len`. A failed insert leaves the list unchanged.
    pub fn insert_region(&mut self, region: Region<V>) -> Result<(), Error> {
        let len = self.len;
        if region.end < region.start || region.end >= len {
            log::debug!("rejected region {}..={} for len {len}", region.start, region.end);
            return Err(Error::invalid_range(region.start, region.end, len));
        }

        let mut new = region;
        let lo = self.regions.partition_point(|r| r.end < new.start);
        let mut hi = lo;
        // Remainders of regions cut by the new span.
        let mut head = None;
        let mut tail = None;
        while let Some(cur) = self.regions.get(hi) {
            if cur.start > new.end {
                break;
            }
            let overlap = Overlap::classify(cur, &new);
            debug_assert!(
                overlap.is_some(),
                "region {}..={} does not overlap {}..={}",
                cur.start,
                cur.end,
                new.start,
                new.end
            );
            match overlap {
                Some(Overlap::Internal) => {
                    if cur.value == new.value {
                        return Ok(());
                    }
                    head = Some(Region::new(cur.start, new.start - 1, cur.value.clone()));
                    tail = Some(Region::new(new.end + 1, cur.end, cur.value.clone()));
                }
                Some(Overlap::SpanEnd) => {
                    if cur.value == new.value {
                        new.start = cur.start;
                    } else {
                        head = Some(Region::new(cur.start, new.start - 1, cur.value.clone()));
                    }
                }
                Some(Overlap::External) => {}
                Some(Overlap::SpanStart) => {
                    if cur.value == new.value {
                        new.end = cur.end;
                    } else {
                        tail = Some(Region::new(new.end + 1, cur.end, cur.value.clone()));
                    }
                }
                None => {
                    log::warn!(
                        "unclassifiable region {}..={} while inserting {}..={}",
                        cur.start,
                        cur.end,
                        new.start,
                        new.end
                    );
                    return Err(Error::unhandled_overlap(new.start, new.end, len));
                }
            }
            hi += 1;
        }

        // Coalesce with untouched neighbours that already hold the new value.
        let mut lo = lo;
        if head.is_none() && lo > 0 && self.regions[lo - 1].value == new.value {
            lo -= 1;
            new.start = self.regions[lo].start;
        }
        if tail.is_none() && hi < self.regions.len() && self.regions[hi].value == new.value {
            new.end = self.regions[hi].end;
            hi += 1;
        }

        log::trace!(
            "painting {}..={} replaces regions {lo}..{hi}",
            new.start,
            new.end
        );
        self.regions
            .splice(lo..hi, head.into_iter().chain(iter::once(new)).chain(tail));
        debug_assert!(self.is_well_formed(), "insert broke list invariants");
        Ok(())
    }
}

impl<V: Debug> Display for RegionList<V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "RegionList {{")?;
        writeln!(f, "  len: {}", self.len)?;
        for r in &self.regions {
            writeln!(f, "  {r},")?;
        }
        f.write_str("}")
    }
}
