//! Example stage operations over integer lists, and the pipelines built from them.
//!
//! `sort_pipeline` is the minimal case: the caller sends a list, one stage thread sorts it and
//! sends it back. `merge_sort_pipeline` spreads the work over three stages and moves nested
//! sums and products through the channels.

use anyhow::Result;

use crate::pipeline::Pipeline;
use crate::value::{List, Prod, Sum, Unit};

/// Result of [`halve`]: nothing, a single element, or two halves.
pub type Halves<T> = Sum<Sum<Unit, T>, Prod<List<T>, List<T>>>;

/// Sum with a failure arm: `Left(Unit)` when the stage refused its input.
pub type Checked<T> = Sum<Unit, T>;

/// Non-decreasing permutation of `list`.
pub fn sort<T: Ord>(list: List<T>) -> List<T> {
    let mut v = list.into_vec();
    v.sort();
    v.into()
}

/// Split `list` in two, keeping the empty and singleton cases apart.
pub fn halve<T>(list: List<T>) -> Halves<T> {
    match list.size() {
        0 => Sum::left(Sum::left(Unit)),
        1 => {
            let mut items = list.into_iter();
            match items.next() {
                Some(x) => Sum::left(Sum::right(x)),
                None => Sum::left(Sum::left(Unit)),
            }
        }
        n => {
            let (front, back) = list.split_at(n / 2);
            Sum::right(Prod::new(front, back))
        }
    }
}

/// Sort both halves; the trivial arms pass through untouched.
pub fn sort_halves<T: Ord>(halves: Halves<T>) -> Halves<T> {
    halves.map_right(|p| p.map_fst(sort).map_snd(sort))
}

/// Fold [`Halves`] back into one list, merging two sorted halves.
pub fn merge<T: Ord>(halves: Halves<T>) -> List<T> {
    halves.fold(
        |small| small.fold(|Unit| List::new(), |x| List::from(vec![x])),
        |p| merge_sorted(p.fst, p.snd),
    )
}

fn merge_sorted<T: Ord>(a: List<T>, b: List<T>) -> List<T> {
    let mut out = Vec::with_capacity(a.size() + b.size());
    let mut a = a.into_iter().peekable();
    let mut b = b.into_iter().peekable();
    loop {
        let take_a = match (a.peek(), b.peek()) {
            (Some(x), Some(y)) => x <= y,
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (None, None) => break,
        };
        let next = if take_a { a.next() } else { b.next() };
        out.extend(next);
    }
    out.into()
}

/// Sort, refusing lists longer than `max_len` through the failure arm.
pub fn checked_sort<T: Ord>(list: List<T>, max_len: usize) -> Checked<List<T>> {
    if list.size() > max_len {
        Sum::left(Unit)
    } else {
        Sum::right(sort(list))
    }
}

/// Caller → sort stage → caller.
pub fn sort_pipeline() -> Pipeline<List<i32>, List<i32>> {
    Pipeline::new().stage("sort", sort::<i32>)
}

/// Caller → halve → sort_halves → merge → caller.
pub fn merge_sort_pipeline() -> Pipeline<List<i32>, List<i32>> {
    Pipeline::new()
        .stage("halve", halve::<i32>)
        .stage("sort_halves", sort_halves::<i32>)
        .stage("merge", merge::<i32>)
}

/// Caller → checked sort → caller. Oversized input comes back as `Left(Unit)`.
pub fn checked_sort_pipeline(max_len: usize) -> Pipeline<List<i32>, Checked<List<i32>>> {
    Pipeline::new().stage("checked_sort", move |list| checked_sort(list, max_len))
}

/// Sort `list` on a stage thread and return it.
pub fn run_sort(list: List<i32>) -> Result<List<i32>> {
    sort_pipeline().run(list)
}
