//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use std::rc::Rc;

use super::parse_tree::ParseNode;

/// Children lie inside `[start, end]`, in order, without overlapping.
#[inline]
pub(super) fn assert_children_within(start: usize, end: usize, children: &[Rc<ParseNode>]) {
    let mut cursor = start;
    for child in children {
        assert!(
            child.start() >= cursor && child.end() <= end && child.start() <= child.end(),
            "broken parse tree invariant: child {}..{} escapes parent {start}..{end} after {cursor}",
            child.start(),
            child.end(),
        );
        cursor = child.end();
    }
}
