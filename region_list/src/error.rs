// Copyright 2026 the Region List Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Rich error type for region list operations.
///
/// Carries a non-exhaustive [`ErrorKind`] plus contextual information about the
/// attempted span or offset and the domain length at the time of failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    /// The non-exhaustive category describing this error.
    kind: ErrorKind,

    /// The first offset of the caller-provided span, or the offset of a resize.
    start: usize,

    /// The last offset (inclusive) of the caller-provided span, or the offset of a resize.
    end: usize,

    /// The domain length at the time of failure.
    len: usize,

    /// Extra detail for rejected shrinks.
    shrink: Option<ShrinkInfo>,

    /// The length of a list that was rejected for not matching its manager.
    found_len: Option<usize>,
}

#[expect(
    clippy::len_without_is_empty,
    reason = "`Error::len` reports domain length context; an `is_empty` method would be misleading and unused."
)]
impl Error {
    /// The machine-readable category for this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The first offset of the span or the resize offset provided by the caller.
    pub fn start(&self) -> usize {
        self.start
    }

    /// The last offset (inclusive) of the span provided by the caller.
    ///
    /// For resize errors this is the same as [`Error::start`].
    pub fn end(&self) -> usize {
        self.end
    }

    /// The domain length at the time of the error.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Details about a rejected shrink, if available.
    pub fn shrink(&self) -> Option<ShrinkInfo> {
        self.shrink
    }

    /// The length of the list that did not match its manager, for
    /// [`ErrorKind::LengthMismatch`].
    pub fn found_len(&self) -> Option<usize> {
        self.found_len
    }

    fn new(kind: ErrorKind, start: usize, end: usize, len: usize) -> Self {
        Self {
            kind,
            start,
            end,
            len,
            shrink: None,
            found_len: None,
        }
    }

    pub(crate) fn invalid_range(start: usize, end: usize, len: usize) -> Self {
        Self::new(ErrorKind::InvalidRange, start, end, len)
    }

    pub(crate) fn invalid_offset(offset: usize, len: usize) -> Self {
        Self::new(ErrorKind::InvalidRange, offset, offset, len)
    }

    pub(crate) fn shrink_too_large(
        offset: usize,
        amount: isize,
        available: usize,
        len: usize,
    ) -> Self {
        Self {
            shrink: Some(ShrinkInfo { amount, available }),
            ..Self::new(ErrorKind::ShrinkTooLarge, offset, offset, len)
        }
    }

    pub(crate) fn length_mismatch(expected: usize, found: usize) -> Self {
        Self {
            found_len: Some(found),
            ..Self::new(ErrorKind::LengthMismatch, 0, 0, expected)
        }
    }

    pub(crate) fn unknown_track(len: usize) -> Self {
        Self::new(ErrorKind::UnknownTrack, 0, 0, len)
    }

    pub(crate) fn unhandled_overlap(start: usize, end: usize, len: usize) -> Self {
        Self::new(ErrorKind::UnhandledOverlap, start, end, len)
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.kind {
            ErrorKind::InvalidRange => {
                if self.start == self.end {
                    write!(f, "offset {} out of bounds for len {}", self.start, self.len)
                } else {
                    write!(
                        f,
                        "invalid range {}..={} for len {}",
                        self.start, self.end, self.len
                    )
                }
            }
            ErrorKind::ShrinkTooLarge => match self.shrink {
                Some(s) => write!(
                    f,
                    "cannot shrink by {} at offset {}: only {} available (len {})",
                    s.amount.unsigned_abs(),
                    self.start,
                    s.available,
                    self.len
                ),
                None => write!(f, "shrink at offset {} is too large", self.start),
            },
            ErrorKind::LengthMismatch => write!(
                f,
                "region list has len {} which does not match the manager len {}",
                self.found_len.unwrap_or_default(),
                self.len
            ),
            ErrorKind::UnknownTrack => f.write_str("no region list registered for key"),
            ErrorKind::UnhandledOverlap => write!(
                f,
                "unhandled overlap while inserting {}..={} into list of len {}",
                self.start, self.end, self.len
            ),
        }
    }
}

impl core::error::Error for Error {}

/// The non-exhaustive category of an error.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A span had `end < start`, reached past the domain, or a resize offset was
    /// past the end of the domain.
    ///
    /// Also reported when constructing a list or manager over an empty domain, or
    /// from regions that do not exactly cover it.
    InvalidRange,

    /// A negative resize would remove more than the affected region or the
    /// whole domain holds.
    ShrinkTooLarge,

    /// A region list attached to a manager has a different length than the manager.
    LengthMismatch,

    /// No region list is registered under the requested key.
    UnknownTrack,

    /// An existing region could not be classified against a new region.
    ///
    /// This indicates a broken list invariant and never occurs for lists that
    /// were only mutated through this crate.
    UnhandledOverlap,
}

/// Details about a rejected shrink.
///
/// Returned by [`Error::shrink`] when the error kind is [`ErrorKind::ShrinkTooLarge`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ShrinkInfo {
    /// The requested (negative) resize amount.
    pub amount: isize,

    /// The largest shrink that would have been accepted.
    pub available: usize,
}
