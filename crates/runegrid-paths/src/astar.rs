//! Single-goal A* search.
//!
//! The heuristic is [`distance_between`], the same blended metric used for
//! game distances. Steps follow the same rules as the Dijkstra map: diagonal
//! steps cost 1.4 times the entered cell and may not cut past an
//! obstruction, and only passable cells are expanded.
//!
//! [`search`] and [`search_with`] have no bounds of its own. Cost functions
//! must make cells outside the caller's map impassable (cost grids do this
//! already), or the work must be capped, either with [`search_within`] or
//! with [`PathConfig::max_expansions`]. A goal that cannot be entered is
//! rejected before any expansion.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use runegrid_core::{Bounds, Dir, Point, distance_between};

use crate::config::PathConfig;
use crate::cost::{self, CostFn, DIAGONAL_STEP, MovementCost, Step};

const NIL: usize = usize::MAX;

struct Node {
    pos: Point,
    parent: usize,
    g: f64,
    h: f64,
    closed: bool,
}

/// Open-set entry. Ordered so the max-heap pops the lowest `f` first,
/// then the lowest `h`, then the oldest entry.
#[derive(Clone, Copy)]
struct NodeRef {
    idx: usize,
    g: f64,
    f: f64,
    h: f64,
    seq: u64,
}

impl PartialEq for NodeRef {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for NodeRef {}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.h.total_cmp(&self.h))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Shortest path from `start` to `goal`, both included.
///
/// Returns `[start]` when the two coincide and an empty path when the goal
/// cannot be reached.
pub fn search<C: CostFn + ?Sized>(
    start: Point,
    goal: Point,
    cost: &C,
    diagonals: bool,
) -> Vec<Point> {
    search_with(
        start,
        goal,
        cost,
        &PathConfig::default().with_diagonals(diagonals),
    )
}

/// Like [`search`], with full configuration.
pub fn search_with<C: CostFn + ?Sized>(
    start: Point,
    goal: Point,
    cost: &C,
    config: &PathConfig,
) -> Vec<Point> {
    if start == goal {
        return vec![start];
    }
    if !cost.cost(goal).is_passable() {
        log::trace!("astar: goal {goal} cannot be entered");
        return Vec::new();
    }

    let h = distance_between(start, goal);
    let mut nodes = vec![Node {
        pos: start,
        parent: NIL,
        g: 0.0,
        h,
        closed: false,
    }];
    let mut index = HashMap::from([(start, 0usize)]);
    let mut open = BinaryHeap::from([NodeRef {
        idx: 0,
        g: 0.0,
        f: h,
        h,
        seq: 0,
    }]);
    let mut seq = 0u64;
    let mut expansions = 0usize;

    while let Some(current) = open.pop() {
        let ci = current.idx;
        // Stale entries.
        if nodes[ci].closed || current.g > nodes[ci].g {
            continue;
        }
        let p = nodes[ci].pos;
        if p == goal {
            log::trace!("astar: {start} -> {goal} found after {expansions} expansions");
            return reconstruct(&nodes, ci);
        }
        nodes[ci].closed = true;
        expansions += 1;
        if config.max_expansions.is_some_and(|m| expansions > m) {
            log::debug!("astar: {start} -> {goal} gave up after {expansions} expansions");
            return Vec::new();
        }

        let g = nodes[ci].g;
        for &dir in Dir::moves(config.diagonals) {
            let Step::Enter(step) = cost::step(cost, p, dir) else {
                continue;
            };
            let q = p.step(dir);
            let ng = g + step;
            if !config.within_distance(ng) {
                continue;
            }
            let ni = match index.get(&q) {
                Some(&ni) => {
                    let n = &mut nodes[ni];
                    if n.closed || ng >= n.g {
                        continue;
                    }
                    n.g = ng;
                    n.parent = ci;
                    ni
                }
                None => {
                    let ni = nodes.len();
                    nodes.push(Node {
                        pos: q,
                        parent: ci,
                        g: ng,
                        h: distance_between(q, goal),
                        closed: false,
                    });
                    index.insert(q, ni);
                    ni
                }
            };
            seq += 1;
            let h = nodes[ni].h;
            open.push(NodeRef {
                idx: ni,
                g: ng,
                f: ng + h,
                h,
                seq,
            });
        }
    }

    log::trace!("astar: {goal} unreachable from {start} ({expansions} expansions)");
    Vec::new()
}

/// Like [`search_with`], treating every cell outside `bounds` as an
/// obstruction.
pub fn search_within<C: CostFn + ?Sized>(
    start: Point,
    goal: Point,
    cost: &C,
    bounds: Bounds,
    config: &PathConfig,
) -> Vec<Point> {
    let bounded = |p: Point| {
        if bounds.contains(p) {
            cost.cost(p)
        } else {
            MovementCost::Obstruction
        }
    };
    search_with(start, goal, &bounded, config)
}

fn reconstruct(nodes: &[Node], mut i: usize) -> Vec<Point> {
    let mut path = Vec::new();
    while i != NIL {
        path.push(nodes[i].pos);
        i = nodes[i].parent;
    }
    path.reverse();
    path
}

/// Total cost of walking `path`: the cost of each entered cell, times 1.4
/// for diagonal steps. The first cell is free.
pub fn path_cost<C: CostFn + ?Sized>(path: &[Point], cost: &C) -> f64 {
    path.windows(2)
        .map(|w| {
            let c = cost.cost(w[1]).raw();
            if w[0].x != w[1].x && w[0].y != w[1].y {
                c * DIAGONAL_STEP
            } else {
                c
            }
        })
        .sum()
}
