//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use super::buffer::CodeBuffer;

#[inline]
pub(super) fn ensure_untouched(before: usize, code: &CodeBuffer, channel: usize) {
    assert_eq!(
        code.offset(),
        before,
        "broken channel contract: channel #{channel} consumed input but reported no match",
    );
}
