#![forbid(unsafe_code)]

//! Shortest edit script over token sequences (Myers' O(ND) algorithm).
//!
//! Small problems run the greedy forward search: it keeps the furthest x
//! for every diagonal at every edit distance, then walks those frontiers
//! backwards to recover the script. That trace is O(D^2) in the edit
//! distance D, so once it would outgrow [`TRACE_BUDGET`] entries the
//! problem is instead split at middle snakes found by searching from both
//! corners at once, which needs O(N + M) space. Splits are driven by an
//! explicit work stack.
//!
//! Inside each changed region all deletions come before all insertions.

use crate::change::ChangeKind;
use std::iter::repeat_n;
use std::ops::Range;

/// Most frontier entries the greedy search may keep (8 MiB of `usize`).
pub(crate) const TRACE_BUDGET: usize = 1 << 20;

/// Frontier value for a diagonal that cannot be reached inside the grid.
const UNREACHED: usize = usize::MAX;

/// x for diagonals `-d..=d` step 2 at one edit distance d.
type Frontier = Vec<usize>;

/// Align `old` against `new`, returning one [`ChangeKind`] per step.
///
/// Keep steps consume one token from each side, Delete from `old` only,
/// Insert from `new` only.
pub(crate) fn align<T, F>(old: &[T], new: &[T], eq: F) -> Vec<ChangeKind>
where
    F: Fn(&T, &T) -> bool,
{
    align_within(old, new, &eq, TRACE_BUDGET)
}

/// [`align`] with an explicit cap on the greedy trace size.
pub(crate) fn align_within<T, F>(old: &[T], new: &[T], eq: &F, budget: usize) -> Vec<ChangeKind>
where
    F: Fn(&T, &T) -> bool,
{
    #[cfg(feature = "tracing")]
    let _span = tracing::debug_span!(
        "myers_align",
        old_tokens = old.len(),
        new_tokens = new.len()
    )
    .entered();

    let script = greedy(old, new, eq, budget).unwrap_or_else(|| {
        #[cfg(feature = "tracing")]
        tracing::debug!(budget, "edit trace over budget, splitting at middle snakes");
        bisect(old, new, eq, budget)
    });

    #[cfg(feature = "tracing")]
    tracing::trace!(
        edit_distance = script.iter().filter(|step| **step != ChangeKind::Keep).count(),
        "alignment complete"
    );
    script
}

fn common_prefix_len<T, F>(a: &[T], b: &[T], eq: &F) -> usize
where
    F: Fn(&T, &T) -> bool,
{
    a.iter().zip(b).take_while(|(x, y)| eq(x, y)).count()
}

fn common_suffix_len<T, F>(a: &[T], b: &[T], eq: &F) -> usize
where
    F: Fn(&T, &T) -> bool,
{
    a.iter()
        .rev()
        .zip(b.iter().rev())
        .take_while(|(x, y)| eq(x, y))
        .count()
}

#[inline]
fn diagonal(i: usize, d: usize) -> isize {
    2 * i as isize - d as isize
}

/// Frontier value on diagonal `k` of the row for distance `d`, if reached.
fn at(row: &[usize], k: isize, d: usize) -> Option<usize> {
    let d = d as isize;
    if k < -d || k > d || (k + d) % 2 != 0 {
        return None;
    }
    Some(row[((k + d) / 2) as usize]).filter(|&x| x != UNREACHED)
}

/// Which move reaches diagonal `k` at distance `d`, with the x it starts from.
enum Step {
    /// Down from diagonal `k + 1`.
    Insert(usize),
    /// Right from diagonal `k - 1`.
    Delete(usize),
}

impl Step {
    /// x after the move.
    fn x(&self) -> usize {
        match *self {
            Self::Insert(x) => x,
            Self::Delete(x) => x + 1,
        }
    }
}

/// The move reaching furthest along diagonal `k`. Ties go to the deletion.
fn choose(prev: &[usize], k: isize, d: usize, n: usize, m: usize) -> Option<Step> {
    // Moving down from k + 1 keeps x and needs room for y + 1.
    let insert = at(prev, k + 1, d - 1).filter(|&x| x as isize - k <= m as isize);
    // Moving right from k - 1 needs room for x + 1.
    let delete = at(prev, k - 1, d - 1).filter(|&x| x < n);

    match (insert, delete) {
        (Some(xi), Some(xd)) if xd < xi => Some(Step::Insert(xi)),
        (_, Some(xd)) => Some(Step::Delete(xd)),
        (Some(xi), None) => Some(Step::Insert(xi)),
        (None, None) => None,
    }
}

/// Frontier at distance `d` from the one at `d - 1`, following each move
/// with `snake`.
fn advance(
    prev: &[usize],
    d: usize,
    n: usize,
    m: usize,
    snake: impl Fn(usize, usize) -> usize,
) -> Frontier {
    (0..=d)
        .map(|i| {
            let k = diagonal(i, d);
            match choose(prev, k, d, n, m) {
                Some(step) => {
                    let x = step.x();
                    snake(x, (x as isize - k) as usize)
                }
                None => UNREACHED,
            }
        })
        .collect()
}

/// Forward search keeping every frontier. `None` once the trace would hold
/// more than `budget` entries.
fn greedy<T, F>(old: &[T], new: &[T], eq: &F, budget: usize) -> Option<Vec<ChangeKind>>
where
    F: Fn(&T, &T) -> bool,
{
    let (n, m) = (old.len(), new.len());
    let snake = |x: usize, y: usize| x + common_prefix_len(&old[x..], &new[y..], eq);
    let end_k = n as isize - m as isize;

    let mut stored = 1;
    if stored > budget {
        return None;
    }
    let mut trace: Vec<Frontier> = vec![vec![snake(0, 0)]];
    let mut d = 0;
    while at(&trace[d], end_k, d) != Some(n) {
        d += 1;
        stored += d + 1;
        if stored > budget {
            return None;
        }
        let row = advance(&trace[d - 1], d, n, m, &snake);
        trace.push(row);
    }
    Some(backtrack(&trace, end_k, n, m))
}

fn backtrack(trace: &[Frontier], end_k: isize, n: usize, m: usize) -> Vec<ChangeKind> {
    let mut script = Vec::with_capacity(n.max(m));
    let mut k = end_k;
    let mut x = n;

    for d in (1..trace.len()).rev() {
        let step = match choose(&trace[d - 1], k, d, n, m) {
            Some(step) => step,
            // Every diagonal on the path was reached, so a move exists.
            None => break,
        };
        script.extend(repeat_n(ChangeKind::Keep, x - step.x()));
        match step {
            Step::Insert(start) => {
                script.push(ChangeKind::Insert);
                x = start;
                k += 1;
            }
            Step::Delete(start) => {
                script.push(ChangeKind::Delete);
                x = start;
                k -= 1;
            }
        }
    }
    script.extend(repeat_n(ChangeKind::Keep, x));
    script.reverse();
    script
}

/// A point on a shortest path through the box, found by running the
/// search from both corners until the frontiers meet on a diagonal.
///
/// Both inputs must be non-empty and share no prefix or suffix. The point
/// is the end of the forward snake when the size difference is odd, the
/// end of the backward snake otherwise.
fn middle_snake<T, F>(old: &[T], new: &[T], eq: &F) -> Option<(usize, usize)>
where
    F: Fn(&T, &T) -> bool,
{
    let (n, m) = (old.len(), new.len());
    let delta = n as isize - m as isize;
    let odd = delta % 2 != 0;
    // Backward coordinates count from the bottom-right corner.
    let forward = |x: usize, y: usize| x + common_prefix_len(&old[x..], &new[y..], eq);
    let backward = |x: usize, y: usize| x + common_suffix_len(&old[..n - x], &new[..m - y], eq);

    let mut fwd: Frontier = vec![forward(0, 0)];
    let mut bwd: Frontier = vec![backward(0, 0)];
    for d in 1..=(n + m).div_ceil(2) {
        fwd = advance(&fwd, d, n, m, &forward);
        if odd {
            for (i, &x) in fwd.iter().enumerate() {
                let k = diagonal(i, d);
                if x == UNREACHED {
                    continue;
                }
                if at(&bwd, delta - k, d - 1).is_some_and(|xb| x + xb >= n) {
                    return Some((x, (x as isize - k) as usize));
                }
            }
        }

        bwd = advance(&bwd, d, n, m, &backward);
        if !odd {
            for (i, &xb) in bwd.iter().enumerate() {
                let kb = diagonal(i, d);
                if xb == UNREACHED {
                    continue;
                }
                if at(&fwd, delta - kb, d).is_some_and(|x| x + xb >= n) {
                    let yb = (xb as isize - kb) as usize;
                    return Some((n - xb, m - yb));
                }
            }
        }
    }
    None
}

enum Work {
    Solve(Range<usize>, Range<usize>),
    Keep(usize),
}

/// Linear-space alignment: split each box at a middle snake until the
/// pieces are small enough for [`greedy`].
fn bisect<T, F>(old: &[T], new: &[T], eq: &F, budget: usize) -> Vec<ChangeKind>
where
    F: Fn(&T, &T) -> bool,
{
    let mut script = Vec::with_capacity(old.len() + new.len());
    let mut work = vec![Work::Solve(0..old.len(), 0..new.len())];

    while let Some(item) = work.pop() {
        let (mut a, mut b) = match item {
            Work::Keep(count) => {
                script.extend(repeat_n(ChangeKind::Keep, count));
                continue;
            }
            Work::Solve(a, b) => (a, b),
        };

        let prefix = common_prefix_len(&old[a.clone()], &new[b.clone()], eq);
        script.extend(repeat_n(ChangeKind::Keep, prefix));
        a.start += prefix;
        b.start += prefix;
        let suffix = common_suffix_len(&old[a.clone()], &new[b.clone()], eq);
        a.end -= suffix;
        b.end -= suffix;
        if suffix > 0 {
            work.push(Work::Keep(suffix));
        }

        let (old_part, new_part) = (&old[a.clone()], &new[b.clone()]);
        if old_part.is_empty() || new_part.is_empty() {
            script.extend(repeat_n(ChangeKind::Delete, old_part.len()));
            script.extend(repeat_n(ChangeKind::Insert, new_part.len()));
            continue;
        }

        let size = old_part.len() + new_part.len();
        if (size + 1).saturating_mul(size + 2) / 2 <= budget {
            if let Some(part) = greedy(old_part, new_part, eq, budget) {
                script.extend(part);
                continue;
            }
        }

        match middle_snake(old_part, new_part, eq) {
            // The split must leave work on both sides.
            Some((x, y)) if (x, y) != (0, 0) && (x, y) != (old_part.len(), new_part.len()) => {
                work.push(Work::Solve(a.start + x..a.end, b.start + y..b.end));
                work.push(Work::Solve(a.start..a.start + x, b.start..b.start + y));
            }
            _ => {
                script.extend(repeat_n(ChangeKind::Delete, old_part.len()));
                script.extend(repeat_n(ChangeKind::Insert, new_part.len()));
            }
        }
    }

    group_edits(&mut script);
    script
}

/// Reorder each run of edits so its deletions come first.
fn group_edits(script: &mut [ChangeKind]) {
    for run in script.split_mut(|step| *step == ChangeKind::Keep) {
        run.sort_unstable_by_key(|step| *step != ChangeKind::Delete);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ChangeKind::{Delete as D, Insert as I, Keep as K};

    fn chars(text: &str) -> Vec<char> {
        text.chars().collect()
    }

    fn align_chars(old: &str, new: &str) -> Vec<ChangeKind> {
        align(&chars(old), &chars(new), |a, b| a == b)
    }

    fn bisect_chars(old: &str, new: &str) -> Vec<ChangeKind> {
        align_within(&chars(old), &chars(new), &|a: &char, b: &char| a == b, 0)
    }

    fn apply(old: &[char], new: &[char], script: &[ChangeKind]) -> (String, String) {
        let (mut i, mut j) = (0, 0);
        let (mut from_old, mut from_new) = (String::new(), String::new());
        for step in script {
            match step {
                K => {
                    assert_eq!(old[i], new[j]);
                    from_old.push(old[i]);
                    from_new.push(new[j]);
                    i += 1;
                    j += 1;
                }
                D => {
                    from_old.push(old[i]);
                    i += 1;
                }
                I => {
                    from_new.push(new[j]);
                    j += 1;
                }
            }
        }
        (from_old, from_new)
    }

    #[test]
    fn empty_inputs() {
        assert!(align_chars("", "").is_empty());
        assert_eq!(align_chars("ab", ""), vec![D, D]);
        assert_eq!(align_chars("", "ab"), vec![I, I]);
        assert!(bisect_chars("", "").is_empty());
        assert_eq!(bisect_chars("ab", ""), vec![D, D]);
    }

    #[test]
    fn identical_inputs_keep_everything() {
        assert_eq!(align_chars("abc", "abc"), vec![K, K, K]);
        assert_eq!(bisect_chars("abc", "abc"), vec![K, K, K]);
    }

    #[test]
    fn substitution_deletes_before_inserting() {
        assert_eq!(align_chars("abc", "axc"), vec![K, D, I, K]);
        assert_eq!(align_chars("ab", "cd"), vec![D, D, I, I]);
        assert_eq!(bisect_chars("abc", "axc"), vec![K, D, I, K]);
        assert_eq!(bisect_chars("ab", "cd"), vec![D, D, I, I]);
    }

    #[test]
    fn classic_example_is_minimal() {
        for script in [
            align_chars("ABCABBA", "CBABAC"),
            bisect_chars("ABCABBA", "CBABAC"),
        ] {
            let edits = script.iter().filter(|s| **s != K).count();
            assert_eq!(edits, 5);
            let (old, new) = apply(&chars("ABCABBA"), &chars("CBABAC"), &script);
            assert_eq!(old, "ABCABBA");
            assert_eq!(new, "CBABAC");
        }
    }

    #[test]
    fn custom_equality() {
        let old = ["Foo", "bar"];
        let new = ["foo", "BAR"];
        let script = align(&old, &new, |a, b| a.eq_ignore_ascii_case(b));
        assert_eq!(script, vec![K, K]);
    }

    #[test]
    fn greedy_gives_up_over_budget() {
        let eq = |a: &char, b: &char| a == b;
        assert!(greedy(&chars("ab"), &chars("cd"), &eq, 0).is_none());
        assert!(greedy(&chars("ab"), &chars("cd"), &eq, 5).is_none());
        assert!(greedy(&chars("ab"), &chars("ab"), &eq, 1).is_some());
    }

    #[test]
    fn middle_snake_splits_inside_the_box() {
        let eq = |a: &char, b: &char| a == b;
        let (old, new) = (chars("xaby"), chars("zabw"));
        let (x, y) = middle_snake(&old, &new, &eq).unwrap();
        assert!((x, y) != (0, 0) && (x, y) != (old.len(), new.len()));
    }

    #[test]
    fn large_unrelated_inputs_stay_linear() {
        let old: Vec<u32> = (0..3000).collect();
        let new: Vec<u32> = (3000..6000).collect();
        let script = align(&old, &new, |a, b| a == b);
        assert_eq!(script.len(), 6000);
        assert!(script[..3000].iter().all(|s| *s == D));
        assert!(script[3000..].iter().all(|s| *s == I));
    }

    #[test]
    fn large_inputs_with_shared_runs() {
        let old: Vec<u32> = (0..4000).collect();
        let new: Vec<u32> = (0..4000).map(|i| if i % 3 == 0 { i + 10_000 } else { i }).collect();
        let script = align(&old, &new, |a, b| a == b);
        let keeps = script.iter().filter(|s| **s == K).count();
        assert_eq!(keeps, 4000 - 1334);
    }
}
