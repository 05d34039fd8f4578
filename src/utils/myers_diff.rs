//! Myers' diff algorithm, based on
//! <https://github.com/mitsuhiko/similar/blob/7e15c44de11a1cd61e1149189929e189ef977fd8/src/algorithms/myers.rs>
//!
//! * time: `O((N+M)D)`
//! * space `O(N+M)`
//!
//! See [the original article by Eugene W. Myers](http://www.xmailserver.org/diff2.pdf)
//! describing it.
//!
//! Elements are interned into dense ids first and the ones that occur on only
//! one side are removed before the search, since they can never be matched.
//! The search gives up with [`DiffError::TooBig`] once the edit distance of a
//! subproblem exceeds [`ComparisonConfig::edit_distance_threshold`].

use std::{
    collections::HashMap,
    hash::Hash,
    ops::{Index, IndexMut, Range},
};

use log::trace;

use crate::{
    cancellation::CancellationChecker,
    comparison::trim::{expand_backward, expand_forward},
    config::ComparisonConfig,
    diff_iterable::{ChangeBuilder, FairDiffIterable},
    errors::DiffError,
};

/// Compute a minimal alignment of `data1` and `data2`.
///
/// # Errors
///
/// `DiffError::Cancelled` if the checker fires, `DiffError::TooBig` if the
/// inputs are too different to be aligned within the configured budget.
pub fn diff<T>(
    data1: &[T],
    data2: &[T],
    config: &ComparisonConfig,
    cancellation: &dyn CancellationChecker,
) -> Result<FairDiffIterable, DiffError>
where
    T: Eq + Hash,
{
    cancellation.check_cancelled()?;

    let reduced = Reduced::new(data1, data2);
    let threshold = config.edit_distance_threshold(data1.len(), data2.len());
    trace!(
        "Aligning {} with {} elements ({} and {} after reduction)",
        data1.len(),
        data2.len(),
        reduced.ids1.len(),
        reduced.ids2.len()
    );

    let max_d = (reduced.ids1.len() + reduced.ids2.len()).div_ceil(2) + 1;
    let mut search = Search {
        old: &reduced.ids1,
        new: &reduced.ids2,
        vf: V::new(max_d),
        vb: V::new(max_d),
        threshold,
        cancellation,
        matches: Vec::new(),
    };
    search
        .conquer(0..reduced.ids1.len(), 0..reduced.ids2.len())
        .map_err(|error| match error {
            DiffError::TooBig { threshold, .. } => DiffError::TooBig {
                length1: data1.len(),
                length2: data2.len(),
                threshold,
            },
            DiffError::Cancelled => DiffError::Cancelled,
        })?;

    let mut builder = ChangeBuilder::new(data1.len(), data2.len());
    for (index1, index2) in search.matches {
        builder.mark_equal(reduced.origins1[index1], reduced.origins2[index2]);
    }

    Ok(FairDiffIterable::fair(builder.finish()))
}

/// Both sequences as interned ids, without the elements that only occur on
/// one side. `origins` maps a reduced index back to the original index.
struct Reduced {
    ids1: Vec<u32>,
    ids2: Vec<u32>,
    origins1: Vec<usize>,
    origins2: Vec<usize>,
}

impl Reduced {
    fn new<T>(data1: &[T], data2: &[T]) -> Self
    where
        T: Eq + Hash,
    {
        let mut ids: HashMap<&T, u32> = HashMap::new();
        let mut intern = |element| {
            let next = u32::try_from(ids.len()).unwrap_or(u32::MAX);
            *ids.entry(element).or_insert(next)
        };
        let all1: Vec<u32> = data1.iter().map(&mut intern).collect();
        let all2: Vec<u32> = data2.iter().map(&mut intern).collect();

        let mut present1 = vec![false; ids.len()];
        let mut present2 = vec![false; ids.len()];
        all1.iter().for_each(|id| present1[*id as usize] = true);
        all2.iter().for_each(|id| present2[*id as usize] = true);

        let keep = |ids: &[u32], present: &[bool]| -> (Vec<u32>, Vec<usize>) {
            ids.iter()
                .enumerate()
                .filter(|(_, id)| present[**id as usize])
                .map(|(index, id)| (*id, index))
                .unzip()
        };
        let (ids1, origins1) = keep(&all1, &present2);
        let (ids2, origins2) = keep(&all2, &present1);

        Self {
            ids1,
            ids2,
            origins1,
            origins2,
        }
    }
}

// A D-path is a path which starts at (0,0) that has exactly D non-diagonal
// edges. All D-paths consist of a (D - 1)-path followed by a non-diagonal edge
// and then a possibly empty sequence of diagonal edges called a snake.

/// `V` contains the endpoints of the furthest reaching `D-paths`. For each
/// recorded endpoint `(x,y)` in diagonal `k`, we only need to retain `x`
/// because `y` can be computed from `x - k`. `k` can be negative, so `V` is
/// offset by the maximum value `|k|` can take on.
#[derive(Debug)]
struct V {
    offset: isize,
    v: Vec<usize>,
}

impl V {
    fn new(max_d: usize) -> Self {
        Self {
            offset: to_isize(max_d),
            v: vec![0; 2 * max_d + 2],
        }
    }
}

impl Index<isize> for V {
    type Output = usize;

    fn index(&self, index: isize) -> &Self::Output { &self.v[to_usize(index + self.offset)] }
}

impl IndexMut<isize> for V {
    fn index_mut(&mut self, index: isize) -> &mut Self::Output {
        &mut self.v[to_usize(index + self.offset)]
    }
}

fn to_isize(value: usize) -> isize { isize::try_from(value).unwrap_or(isize::MAX) }

fn to_usize(value: isize) -> usize { usize::try_from(value).unwrap_or(0) }

struct Search<'a> {
    old: &'a [u32],
    new: &'a [u32],
    vf: V,
    vb: V,
    threshold: usize,
    cancellation: &'a dyn CancellationChecker,
    /// Matched index pairs in increasing order.
    matches: Vec<(usize, usize)>,
}

impl Search<'_> {
    fn conquer(
        &mut self,
        mut old_range: Range<usize>,
        mut new_range: Range<usize>,
    ) -> Result<(), DiffError> {
        let prefix = expand_forward(
            self.old,
            self.new,
            old_range.start,
            new_range.start,
            old_range.end,
            new_range.end,
        );
        self.mark_equal(old_range.start, new_range.start, prefix);
        old_range.start += prefix;
        new_range.start += prefix;

        let suffix = expand_backward(
            self.old,
            self.new,
            old_range.start,
            new_range.start,
            old_range.end,
            new_range.end,
        );
        old_range.end -= suffix;
        new_range.end -= suffix;

        if !old_range.is_empty() && !new_range.is_empty() {
            if let Some((x_start, y_start)) =
                self.find_middle_snake(old_range.clone(), new_range.clone())?
            {
                self.conquer(old_range.start..x_start, new_range.start..y_start)?;
                self.conquer(x_start..old_range.end, y_start..new_range.end)?;
            }
        }

        self.mark_equal(old_range.end, new_range.end, suffix);

        Ok(())
    }

    fn mark_equal(&mut self, start1: usize, start2: usize, count: usize) {
        self.matches
            .extend((0..count).map(|i| (start1 + i, start2 + i)));
    }

    /// The divide part of a divide-and-conquer strategy. A D-path has D+1
    /// snakes some of which may be empty. The divide step requires finding
    /// the ceil(D/2) + 1 or middle snake of an optimal D-path. The idea for
    /// doing so is to simultaneously run the basic algorithm in both the
    /// forward and reverse directions until furthest reaching forward and
    /// reverse paths starting at opposing corners 'overlap'.
    fn find_middle_snake(
        &mut self,
        old_range: Range<usize>,
        new_range: Range<usize>,
    ) -> Result<Option<(usize, usize)>, DiffError> {
        let n = old_range.len();
        let m = new_range.len();

        // By Lemma 1 in the paper, the optimal edit script length is odd or
        // even as `delta` is odd or even.
        let delta = to_isize(n) - to_isize(m);
        let odd = delta & 1 == 1;

        // The initial point at (0, -1)
        self.vf[1] = 0;
        // The initial point at (N, M+1)
        self.vb[1] = 0;

        let d_max = to_isize((n + m).div_ceil(2) + 1);
        for d in 0..d_max {
            if to_usize(d) > self.threshold {
                return Err(DiffError::TooBig {
                    length1: self.old.len(),
                    length2: self.new.len(),
                    threshold: self.threshold,
                });
            }
            self.cancellation.check_cancelled()?;

            // Forward path
            for k in (-d..=d).rev().step_by(2) {
                let mut x = if k == -d || (k != d && self.vf[k - 1] < self.vf[k + 1]) {
                    self.vf[k + 1]
                } else {
                    self.vf[k - 1] + 1
                };
                let y = to_usize(to_isize(x) - k);

                // The coordinate of the start of a snake
                let (x0, y0) = (x, y);
                if x < n && y < m {
                    x += expand_forward(
                        self.old,
                        self.new,
                        old_range.start + x,
                        new_range.start + y,
                        old_range.end,
                        new_range.end,
                    );
                }

                self.vf[k] = x;

                // Only check for connections from the forward search when
                // N - M is odd and when there is a reciprocal k line coming
                // from the other direction.
                if odd
                    && (k - delta).abs() <= (d - 1)
                    && self.vf[k] + self.vb[-(k - delta)] >= n
                {
                    return Ok(Some((x0 + old_range.start, y0 + new_range.start)));
                }
            }

            // Backward path
            for k in (-d..=d).rev().step_by(2) {
                let mut x = if k == -d || (k != d && self.vb[k - 1] < self.vb[k + 1]) {
                    self.vb[k + 1]
                } else {
                    self.vb[k - 1] + 1
                };
                let mut y = to_usize(to_isize(x) - k);

                if x < n && y < m {
                    let advance = expand_backward(
                        self.old,
                        self.new,
                        old_range.start,
                        new_range.start,
                        old_range.start + n - x,
                        new_range.start + m - y,
                    );
                    x += advance;
                    y += advance;
                }

                self.vb[k] = x;

                if !odd && (k - delta).abs() <= d && self.vb[k] + self.vf[-(k - delta)] >= n {
                    return Ok(Some((n - x + old_range.start, m - y + new_range.start)));
                }
            }
        }

        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{cancellation::NeverCancelled, diff_iterable::Range as DiffRange};

    fn changes(data1: &str, data2: &str) -> Vec<DiffRange> {
        let data1: Vec<char> = data1.chars().collect();
        let data2: Vec<char> = data2.chars().collect();

        let result = diff(&data1, &data2, &ComparisonConfig::default(), &NeverCancelled).unwrap();
        assert!(result.is_fair_for(&data1, &data2));

        result.changes().collect()
    }

    #[test]
    fn test_empty_diff() {
        assert_eq!(changes("", ""), vec![]);
    }

    #[test]
    fn test_identical_content() {
        assert_eq!(changes("abc", "abc"), vec![]);
    }

    #[test]
    fn test_insert_only() {
        assert_eq!(changes("", "ab"), vec![DiffRange::new(0, 0, 0, 2)]);
    }

    #[test]
    fn test_delete_only() {
        assert_eq!(changes("ab", ""), vec![DiffRange::new(0, 2, 0, 0)]);
    }

    #[test]
    fn test_prefix_and_suffix() {
        assert_eq!(changes("abcd", "axd"), vec![DiffRange::new(1, 3, 1, 2)]);
    }

    #[test]
    fn test_complex_diff() {
        assert_eq!(
            changes("abcd", "axcy"),
            vec![DiffRange::new(1, 2, 1, 2), DiffRange::new(3, 4, 3, 4)]
        );
    }

    #[test]
    fn test_minimal_edit_count() {
        let result = changes("abcabba", "cbabac");
        let edits: usize = result.iter().map(|ch| ch.len1() + ch.len2()).sum();

        assert_eq!(edits, 5);
    }

    #[test]
    fn test_unique_elements_are_never_matched() {
        assert_eq!(
            changes("xay", "paq"),
            vec![DiffRange::new(0, 1, 0, 1), DiffRange::new(2, 3, 2, 3)]
        );
    }

    #[test]
    fn test_too_big() {
        let data1: Vec<char> = "a".repeat(1000).chars().chain("b".repeat(1000).chars()).collect();
        let data2: Vec<char> = "b".repeat(1000).chars().chain("a".repeat(1000).chars()).collect();
        let config = ComparisonConfig {
            delta_threshold_size: 0,
            ..ComparisonConfig::default()
        };

        assert_eq!(
            diff(&data1, &data2, &config, &NeverCancelled),
            Err(DiffError::TooBig {
                length1: 2000,
                length2: 2000,
                threshold: 632
            })
        );
    }

    #[test]
    fn test_cancelled() {
        let data = ['a'];

        assert_eq!(
            diff(&data, &data, &ComparisonConfig::default(), &|| true),
            Err(DiffError::Cancelled)
        );
    }
}
