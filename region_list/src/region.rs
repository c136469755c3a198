// Copyright 2026 the Region List Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt::{Debug, Display};
use core::ops::RangeInclusive;

/// A single value-tagged span of offsets.
///
/// Both `start` and `end` are inclusive, so a region always covers at least one
/// offset and `start == end` is a valid single-offset region.
///
/// A `Region` is only checked against a domain when it is handed to a
/// [`RegionList`](crate::RegionList); constructing one never fails.
///
/// ## Example
///
/// ```
/// use region_list::Region;
///
/// let r = Region::new(2, 3, "italic");
/// assert_eq!(r.span_len(), 2);
/// assert!(r.contains(3));
/// assert!(!r.contains(4));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Region<V> {
    pub(crate) start: usize,
    pub(crate) end: usize,
    pub(crate) value: V,
}

impl<V> Region<V> {
    /// Creates a region covering `start..=end`.
    #[inline]
    pub const fn new(start: usize, end: usize, value: V) -> Self {
        Self { start, end, value }
    }

    /// The first offset covered.
    #[must_use]
    #[inline]
    pub const fn start(&self) -> usize {
        self.start
    }

    /// The last offset covered (inclusive).
    #[must_use]
    #[inline]
    pub const fn end(&self) -> usize {
        self.end
    }

    /// The value painted over this region.
    #[must_use]
    #[inline]
    pub const fn value(&self) -> &V {
        &self.value
    }

    /// Consumes the region, returning its value.
    #[inline]
    pub fn into_value(self) -> V {
        self.value
    }

    /// The number of offsets covered.
    ///
    /// Returns 0 for a malformed region with `end < start`.
    #[must_use]
    #[inline]
    pub const fn span_len(&self) -> usize {
        if self.end < self.start {
            0
        } else {
            self.end - self.start + 1
        }
    }

    /// Returns `true` if `offset` falls inside this region.
    #[must_use]
    #[inline]
    pub const fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset <= self.end
    }

    /// Returns the covered offsets as a `RangeInclusive<usize>`.
    #[must_use]
    #[inline]
    pub const fn as_range(&self) -> RangeInclusive<usize> {
        self.start..=self.end
    }
}

impl<V> From<(RangeInclusive<usize>, V)> for Region<V> {
    #[inline]
    fn from((range, value): (RangeInclusive<usize>, V)) -> Self {
        Self::new(*range.start(), *range.end(), value)
    }
}

impl<V: Debug> Display for Region<V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}..={} {:?}", self.start, self.end, self.value)
    }
}

/// How an existing region relates to a region being inserted.
///
/// Only meaningful for regions that share at least one offset.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Overlap {
    /// The existing region extends past the new one on both sides.
    ///
    /// ```text
    /// cur: aaaa
    /// new:  ii
    /// ```
    Internal,

    /// The existing region starts before the new one and ends inside it.
    ///
    /// ```text
    /// cur: aaa
    /// new:  iii
    /// ```
    SpanEnd,

    /// The existing region lies entirely inside the new one.
    ///
    /// ```text
    /// cur: aabbcc
    /// new:   ii
    /// ```
    External,

    /// The existing region starts inside the new one and extends past its end.
    ///
    /// ```text
    /// cur:  bbb
    /// new: iii
    /// ```
    SpanStart,
}

impl Overlap {
    /// Classifies `cur` against `new`, or `None` if they share no offset.
    pub(crate) fn classify<V>(cur: &Region<V>, new: &Region<V>) -> Option<Self> {
        if cur.end < new.start || cur.start > new.end {
            return None;
        }
        Some(match (cur.start < new.start, cur.end > new.end) {
            (true, true) => Self::Internal,
            (true, false) => Self::SpanEnd,
            (false, false) => Self::External,
            (false, true) => Self::SpanStart,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{Overlap, Region};
    use alloc::string::ToString;

    #[test]
    fn single_offset_region_is_not_empty() {
        let r = Region::new(4, 4, 'x');
        assert_eq!(r.span_len(), 1);
        assert!(r.contains(4));
        assert_eq!(r.as_range(), 4..=4);
    }

    #[test]
    fn from_inclusive_range() {
        let r: Region<_> = (1..=5, "u").into();
        assert_eq!(r.start(), 1);
        assert_eq!(r.end(), 5);
        assert_eq!(r.value(), &"u");
        assert_eq!(r.to_string(), "1..=5 \"u\"");
    }

    #[test]
    fn classifies_all_overlaps() {
        let new = Region::new(2, 5, ());
        assert_eq!(
            Overlap::classify(&Region::new(0, 7, ()), &new),
            Some(Overlap::Internal)
        );
        assert_eq!(
            Overlap::classify(&Region::new(0, 3, ()), &new),
            Some(Overlap::SpanEnd)
        );
        assert_eq!(
            Overlap::classify(&Region::new(0, 5, ()), &new),
            Some(Overlap::SpanEnd)
        );
        assert_eq!(
            Overlap::classify(&Region::new(2, 5, ()), &new),
            Some(Overlap::External)
        );
        assert_eq!(
            Overlap::classify(&Region::new(3, 4, ()), &new),
            Some(Overlap::External)
        );
        assert_eq!(
            Overlap::classify(&Region::new(2, 6, ()), &new),
            Some(Overlap::SpanStart)
        );
        assert_eq!(
            Overlap::classify(&Region::new(5, 9, ()), &new),
            Some(Overlap::SpanStart)
        );
        assert_eq!(Overlap::classify(&Region::new(0, 1, ()), &new), None);
        assert_eq!(Overlap::classify(&Region::new(6, 9, ()), &new), None);
    }
}
