//! Classification of the ranges of a three-way merge and automatic
//! resolution of ranges changed on both sides.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{
    ComparisonContext, by_char, comparison_util::is_equals, merge, policy::ComparisonPolicy,
};
use crate::{
    errors::DiffError,
    fragments::MergeLineFragment,
    line_offsets::LineOffsets,
    utils::{side::ThreeSide, string_builder::StringBuilder},
};

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextDiffType {
    Inserted,
    Deleted,
    Modified,
    Conflict,
}

/// What happened to a range of a three-way merge and on which sides.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MergeConflictType {
    pub kind: TextDiffType,
    pub left_change: bool,
    pub right_change: bool,
    /// Only meaningful for conflicts: the two changes do not overlap on the
    /// char level and can be applied together.
    pub can_be_resolved: bool,
}

impl MergeConflictType {
    #[must_use]
    pub fn new(kind: TextDiffType, left_change: bool, right_change: bool) -> Self {
        Self {
            kind,
            left_change,
            right_change,
            can_be_resolved: false,
        }
    }

    #[must_use]
    pub fn conflict(can_be_resolved: bool) -> Self {
        Self {
            can_be_resolved,
            ..Self::new(TextDiffType::Conflict, true, true)
        }
    }

    /// True if the side differs from the base. The base itself is always
    /// considered changed.
    #[must_use]
    pub fn is_change(&self, side: ThreeSide) -> bool {
        side.select(self.left_change, true, self.right_change)
    }
}

/// Classify a range from the emptiness of its sides and the equality of
/// their contents. `true_equals` tells whether two sides are exactly equal
/// and is only consulted when both sides are equal to the base under the
/// active policy. `can_resolve` is only consulted for conflicts.
///
/// # Errors
///
/// Whatever `can_resolve` fails with.
pub fn get_merge_type<E>(
    is_empty: impl Fn(ThreeSide) -> bool,
    equals: impl Fn(ThreeSide, ThreeSide) -> bool,
    true_equals: impl Fn(ThreeSide, ThreeSide) -> bool,
    can_resolve: impl FnOnce() -> Result<bool, E>,
) -> Result<MergeConflictType, E> {
    let left_empty = is_empty(ThreeSide::Left);
    let base_empty = is_empty(ThreeSide::Base);
    let right_empty = is_empty(ThreeSide::Right);
    debug_assert!(
        !(left_empty && base_empty && right_empty),
        "A merge range cannot be empty on every side"
    );

    if base_empty {
        if left_empty {
            return Ok(MergeConflictType::new(TextDiffType::Inserted, false, true));
        }
        if right_empty {
            return Ok(MergeConflictType::new(TextDiffType::Inserted, true, false));
        }
        if equals(ThreeSide::Left, ThreeSide::Right) {
            return Ok(MergeConflictType::new(TextDiffType::Inserted, true, true));
        }
        return Ok(MergeConflictType::conflict(false));
    }

    if left_empty && right_empty {
        return Ok(MergeConflictType::new(TextDiffType::Deleted, true, true));
    }

    let unchanged_left = equals(ThreeSide::Base, ThreeSide::Left);
    let unchanged_right = equals(ThreeSide::Base, ThreeSide::Right);

    if unchanged_left && unchanged_right {
        // the sides only differ in what the policy ignores
        let true_unchanged_left = true_equals(ThreeSide::Base, ThreeSide::Left);
        let true_unchanged_right = true_equals(ThreeSide::Base, ThreeSide::Right);
        debug_assert!(!(true_unchanged_left && true_unchanged_right));

        return Ok(MergeConflictType::new(
            TextDiffType::Modified,
            !true_unchanged_left,
            !true_unchanged_right,
        ));
    }

    if unchanged_left {
        let kind = if right_empty { TextDiffType::Deleted } else { TextDiffType::Modified };
        return Ok(MergeConflictType::new(kind, false, true));
    }
    if unchanged_right {
        let kind = if left_empty { TextDiffType::Deleted } else { TextDiffType::Modified };
        return Ok(MergeConflictType::new(kind, true, false));
    }

    if equals(ThreeSide::Left, ThreeSide::Right) {
        return Ok(MergeConflictType::new(TextDiffType::Modified, true, true));
    }

    let can_be_resolved = !left_empty && !right_empty && can_resolve()?;
    Ok(MergeConflictType::conflict(can_be_resolved))
}

/// Classify a range of a three-way line comparison. `texts` and `offsets`
/// are given in left, base, right order.
///
/// Conflicts are only checked for resolvability under the default policy.
///
/// # Errors
///
/// `DiffError::Cancelled` if the request got cancelled while checking
/// whether a conflict can be resolved.
pub fn get_line_merge_type(
    fragment: &MergeLineFragment,
    texts: [&[char]; 3],
    offsets: [&LineOffsets; 3],
    policy: ComparisonPolicy,
    ctx: ComparisonContext<'_>,
) -> Result<MergeConflictType, DiffError> {
    let text = |side: ThreeSide| side.select(texts[0], texts[1], texts[2]);
    let line_offsets = |side: ThreeSide| side.select(offsets[0], offsets[1], offsets[2]);
    let content = |side: ThreeSide| {
        lines_content(
            text(side),
            line_offsets(side),
            fragment.start_line(side),
            fragment.end_line(side),
        )
    };
    let line = |side: ThreeSide, index: usize| {
        let offsets = line_offsets(side);
        let line = fragment.start_line(side) + index;
        &text(side)[offsets.line_start(line)..offsets.line_end(line)]
    };
    let lines_equal = |side1: ThreeSide, side2: ThreeSide, policy: ComparisonPolicy| {
        let count = fragment.end_line(side1) - fragment.start_line(side1);
        count == fragment.end_line(side2) - fragment.start_line(side2)
            && (0..count).all(|index| is_equals(line(side1, index), line(side2, index), policy))
    };

    get_merge_type(
        |side| fragment.start_line(side) == fragment.end_line(side),
        |side1, side2| lines_equal(side1, side2, policy),
        |side1, side2| lines_equal(side1, side2, ComparisonPolicy::Default),
        || {
            if policy != ComparisonPolicy::Default {
                return Ok(false);
            }
            let resolved = try_resolve_conflict(
                content(ThreeSide::Left),
                content(ThreeSide::Base),
                content(ThreeSide::Right),
                ctx,
            );
            match resolved {
                Ok(resolved) => Ok(resolved.is_some()),
                Err(error) if error.is_too_big() => Ok(false),
                Err(error) => Err(error),
            }
        },
    )
}

fn lines_content<'a>(
    text: &'a [char],
    offsets: &LineOffsets,
    start: usize,
    end: usize,
) -> &'a [char] {
    if start == end {
        &[]
    } else {
        &text[offsets.line_start(start)..offsets.line_end(end - 1)]
    }
}

/// Apply the changes of both sides to the base if they do not overlap on the
/// char level, or overlap with identical changes.
///
/// # Errors
///
/// `DiffError::Cancelled` or `DiffError::TooBig`.
pub fn try_resolve_conflict(
    left: &[char],
    base: &[char],
    right: &[char],
    ctx: ComparisonContext<'_>,
) -> Result<Option<String>, DiffError> {
    let changes1 = by_char::compare(base, left, ctx)?;
    let changes2 = by_char::compare(base, right, ctx)?;
    let ranges = merge::build_fair(&changes1, &changes2, ctx)?;

    let mut builder = StringBuilder::new(base);
    for range in ranges {
        let left_part = &left[range.start1..range.end1];
        let base_part = &base[range.start2..range.end2];
        let right_part = &right[range.start3..range.end3];

        let resolved = if left_part == base_part {
            right_part
        } else if right_part == base_part || left_part == right_part {
            left_part
        } else {
            return Ok(None);
        };

        builder.retain(range.start2 - builder.position());
        builder.delete(base_part.len());
        builder.insert(resolved);
    }

    Ok(Some(builder.finish()))
}
