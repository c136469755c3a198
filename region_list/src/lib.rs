// Copyright 2026 the Region List Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Region List tracks attributes of a text buffer as run-length encoded regions.
//!
//! A [`RegionList`] stores one attribute (a foreground color, a link target,
//! ...) across every offset of a text, as the smallest possible sequence of
//! [`Region`]s. Painting a span with [`RegionList::insert_region`] keeps the
//! encoding exact: regions never overlap, always cover the whole text, and
//! neighbours never hold equal values. [`RegionList::resize_at`] follows edits
//! of the underlying text.
//!
//! A [`RegionListManager`] keeps several such tracks in step over the same text
//! and replays them together through [`RegionListManager::merged_events`]: one
//! [`MergedEvent`] per offset where any track changes, carrying the values of
//! all tracks. This is the shape a renderer wants when emitting formatting
//! boundaries into an output stream.
//!
//! Values are opaque; the only operation required of them is equality.
//!
//! ```
//! use region_list::{Region, RegionListManager};
//!
//! let mut rlm = RegionListManager::new(11).unwrap();
//! rlm.create_region_list("fg", "default");
//! rlm.create_region_list("bold", "no");
//! rlm.insert_region(&"fg", Region::new(0, 4, "red")).unwrap();
//! rlm.insert_region(&"bold", Region::new(6, 10, "yes")).unwrap();
//!
//! let events: Vec<_> = rlm
//!     .merged_events()
//!     .map(|e| (e.offset(), *e.get(&"fg").unwrap(), *e.get(&"bold").unwrap()))
//!     .collect();
//! assert_eq!(
//!     events,
//!     [(0, "red", "no"), (5, "default", "no"), (6, "default", "yes")]
//! );
//! ```
//!
//! ## Features
//!
//! - `std` (enabled by default): Enables `std` support in the `log` facade. The crate
//!   itself only requires `alloc`.
// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

extern crate alloc;

mod error;
mod manager;
mod merged_events;
mod region;
mod region_list;

pub use crate::error::{Error, ErrorKind, ShrinkInfo};
pub use crate::manager::RegionListManager;
pub use crate::merged_events::{MergedEvent, MergedEvents};
pub use crate::region::Region;
pub use crate::region_list::RegionList;
