//! Fusing of narrow sibling bars into collapsed runs.
//!
//! The renderer draws whatever [`level_runs`] yields, and hit-testing refuses
//! any bar for which [`is_collapsed`] holds, so the two always agree on what
//! is individually clickable.

use crate::codec::BarLayout;
use crate::search::is_match;
use std::marker::PhantomData;

/// A bar this narrow (px) is drawn as part of a collapsed run
pub fn is_collapsed(ticks: u64, px_per_tick: f64, threshold: f64) -> bool {
    ticks as f64 * px_per_tick <= threshold
}

/// Inputs that decide whether neighbouring bars fuse
#[derive(Debug, Clone, Copy)]
pub struct CollapseRule<'a> {
    pub names: &'a [String],
    /// Active search query; `None` or empty disables highlighting
    pub query: Option<&'a str>,
    pub px_per_tick: f64,
    pub threshold: f64,
}

impl<'a> CollapseRule<'a> {
    pub fn new(names: &'a [String], query: Option<&'a str>, px_per_tick: f64, threshold: f64) -> Self {
        Self {
            names,
            query: query.filter(|q| !q.is_empty()),
            px_per_tick,
            threshold,
        }
    }

    pub fn is_collapsed(&self, ticks: u64) -> bool {
        is_collapsed(ticks, self.px_per_tick, self.threshold)
    }

    /// Whether the node at `j` takes part in the search highlight
    pub fn is_highlighted<L: BarLayout>(&self, level: &[u64], j: usize) -> bool {
        match self.query {
            Some(q) => self
                .names
                .get(L::name(level, j))
                .is_some_and(|name| is_match(q, name)),
            None => false,
        }
    }

    /// Whether the node at `next` may join a run ending at `run_end`.
    ///
    /// It must start exactly where the run ends, be collapsed on its own and
    /// share the run's highlight membership.
    pub fn can_merge<L: BarLayout>(&self, level: &[u64], next: usize, run_end: u64, run_highlighted: bool) -> bool {
        next + L::STRIDE <= level.len()
            && L::offset(level, next) == run_end
            && self.is_collapsed(L::total(level, next))
            && self.is_highlighted::<L>(level, next) == run_highlighted
    }
}

/// One drawn unit: a single bar, or several fused collapsed bars
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarRun {
    /// Flat index of the first node
    pub start: usize,
    /// Flat index one past the last node
    pub end: usize,
    pub offset: u64,
    pub ticks: u64,
    pub collapsed: bool,
    pub highlighted: bool,
}

/// Iterator over the runs of one level
pub struct LevelRuns<'a, L: BarLayout> {
    level: &'a [u64],
    rule: CollapseRule<'a>,
    j: usize,
    _layout: PhantomData<L>,
}

pub fn level_runs<'a, L: BarLayout>(level: &'a [u64], rule: CollapseRule<'a>) -> LevelRuns<'a, L> {
    LevelRuns {
        level,
        rule,
        j: 0,
        _layout: PhantomData,
    }
}

impl<'a, L: BarLayout> Iterator for LevelRuns<'a, L> {
    type Item = BarRun;

    fn next(&mut self) -> Option<BarRun> {
        if self.j + L::STRIDE > self.level.len() {
            return None;
        }

        let start = self.j;
        let offset = L::offset(self.level, start);
        let mut ticks = L::total(self.level, start);
        let highlighted = self.rule.is_highlighted::<L>(self.level, start);
        let collapsed = self.rule.is_collapsed(ticks);

        let mut end = start + L::STRIDE;
        if collapsed {
            while self
                .rule
                .can_merge::<L>(self.level, end, offset + ticks, highlighted)
            {
                ticks += L::total(self.level, end);
                end += L::STRIDE;
            }
        }

        self.j = end;
        Some(BarRun {
            start,
            end,
            offset,
            ticks,
            collapsed,
            highlighted,
        })
    }
}
