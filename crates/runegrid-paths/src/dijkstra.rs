//! Weighted multi-source distance fields ("Dijkstra maps").
//!
//! A [`DijkstraMap`] stores, for each cell, the cheapest accumulated cost
//! to the nearest goal. Goals are seeded with [`set_goal`], then
//! [`calculate`] drains a frontier kept as an index-linked list sorted by
//! distance. Costs of [`MovementCost::Blocked`] or
//! [`MovementCost::Obstruction`] clamp the neighbour's distance to that
//! sentinel instead of accumulating.
//!
//! [`set_goal`]: DijkstraMap::set_goal
//! [`calculate`]: DijkstraMap::calculate
//! [`MovementCost::Blocked`]: crate::MovementCost::Blocked
//! [`MovementCost::Obstruction`]: crate::MovementCost::Obstruction

use std::collections::VecDeque;

use runegrid_core::{Dir, GridError, NumGrid, Point, distance_between};

use crate::config::PathConfig;
use crate::cost::{self, BLOCKED, CostFn, Distance, NOT_DONE, OBSTRUCTION, Step};

const NIL: usize = usize::MAX;

#[derive(Debug, Clone, Copy)]
struct Cell {
    distance: f64,
    prev: usize,
    next: usize,
}

impl Cell {
    const EMPTY: Self = Self {
        distance: NOT_DONE,
        prev: NIL,
        next: NIL,
    };
}

/// A distance field over a `width` × `height` rectangle at the origin.
///
/// The last record of `cells` is the frontier's head sentinel.
#[derive(Debug, Clone)]
pub struct DijkstraMap {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
}

impl Default for DijkstraMap {
    fn default() -> Self {
        Self::new()
    }
}

impl DijkstraMap {
    /// An empty 0×0 map. Call [`reset`](Self::reset) to size it.
    pub fn new() -> Self {
        Self {
            width: 0,
            height: 0,
            cells: vec![Cell::EMPTY],
        }
    }

    /// Resize to `width` × `height` and [`clear`](Self::clear). Storage is
    /// reused when it is already large enough.
    pub fn reset(&mut self, width: i32, height: i32) {
        self.width = width.max(0);
        self.height = height.max(0);
        let n = (self.width * self.height) as usize;
        self.cells.resize(n + 1, Cell::EMPTY);
        self.clear();
    }

    /// Mark every cell unreached and empty the frontier.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::EMPTY);
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn has_xy(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && p.x < self.width && p.y < self.height
    }

    // -----------------------------------------------------------------------
    // Indexing
    // -----------------------------------------------------------------------

    #[inline]
    fn index(&self, p: Point) -> Option<usize> {
        self.has_xy(p).then(|| (p.y * self.width + p.x) as usize)
    }

    fn index_of(&self, p: Point) -> usize {
        match self.index(p) {
            Some(i) => i,
            None => panic!("{}", GridError::OutOfBounds(p)),
        }
    }

    #[inline]
    fn point(&self, i: usize) -> Point {
        let i = i as i32;
        Point::new(i % self.width, i / self.width)
    }

    #[inline]
    fn head(&self) -> usize {
        self.cells.len() - 1
    }

    // -----------------------------------------------------------------------
    // Frontier
    // -----------------------------------------------------------------------

    fn unlink(&mut self, i: usize) {
        let Cell { prev, next, .. } = self.cells[i];
        if prev == NIL {
            return;
        }
        self.cells[prev].next = next;
        if next != NIL {
            self.cells[next].prev = prev;
        }
        self.cells[i].prev = NIL;
        self.cells[i].next = NIL;
    }

    fn link_after(&mut self, at: usize, i: usize) {
        let next = self.cells[at].next;
        self.cells[i].prev = at;
        self.cells[i].next = next;
        self.cells[at].next = i;
        if next != NIL {
            self.cells[next].prev = i;
        }
    }

    /// Move `i` to its sorted position, ahead of entries at equal distance.
    fn insert(&mut self, i: usize) {
        self.unlink(i);
        let d = self.cells[i].distance;
        let mut at = self.head();
        loop {
            let next = self.cells[at].next;
            if next == NIL || self.cells[next].distance >= d {
                break;
            }
            at = next;
        }
        self.link_after(at, i);
    }

    fn pop_front(&mut self) -> Option<usize> {
        let first = self.cells[self.head()].next;
        if first == NIL {
            return None;
        }
        self.unlink(first);
        Some(first)
    }

    // -----------------------------------------------------------------------
    // Seeding
    // -----------------------------------------------------------------------

    /// Make `p` a goal at distance `base_cost` and queue it.
    ///
    /// # Panics
    ///
    /// If `p` lies outside the map.
    pub fn set_goal(&mut self, p: Point, base_cost: f64) {
        let i = self.index_of(p);
        self.cells[i].distance = base_cost;
        self.insert(i);
    }

    /// Overwrite the raw distance at `p` without queueing it. A cell that
    /// is already queued keeps its place in sorted order.
    ///
    /// # Panics
    ///
    /// If `p` lies outside the map.
    pub fn set_distance(&mut self, p: Point, distance: f64) {
        let i = self.index_of(p);
        self.cells[i].distance = distance;
        if self.cells[i].prev != NIL {
            self.insert(i);
        }
    }

    // -----------------------------------------------------------------------
    // Calculation
    // -----------------------------------------------------------------------

    /// Drain the frontier, relaxing neighbours under `cost`.
    pub fn calculate<C: CostFn + ?Sized>(&mut self, cost: &C, diagonals: bool) {
        self.calculate_with(cost, &PathConfig::default().with_diagonals(diagonals));
    }

    /// Like [`calculate`](Self::calculate), with full configuration.
    pub fn calculate_with<C: CostFn + ?Sized>(&mut self, cost: &C, config: &PathConfig) {
        let mut settled = 0usize;
        while let Some(i) = self.pop_front() {
            settled += 1;
            let p = self.point(i);
            let d = self.cells[i].distance;
            for &dir in Dir::moves(config.diagonals) {
                let Some(j) = self.index(p.step(dir)) else {
                    continue;
                };
                match cost::step(cost, p, dir) {
                    Step::Skip => {}
                    Step::Clamp(sentinel) => {
                        let cell = &mut self.cells[j];
                        cell.distance = cell.distance.min(sentinel);
                    }
                    Step::Enter(c) => {
                        let nd = d + c;
                        if nd < self.cells[j].distance && config.within_distance(nd) {
                            self.cells[j].distance = nd;
                            self.insert(j);
                        }
                    }
                }
            }
        }
        log::debug!(
            "dijkstra: settled {settled} cells on {}x{} map",
            self.width,
            self.height
        );
    }

    /// Queue every cell with a distance below [`BLOCKED`] again and
    /// recalculate, keeping existing distances.
    pub fn rescan<C: CostFn + ?Sized>(&mut self, cost: &C, diagonals: bool) {
        self.rescan_with(cost, &PathConfig::default().with_diagonals(diagonals));
    }

    pub fn rescan_with<C: CostFn + ?Sized>(&mut self, cost: &C, config: &PathConfig) {
        let head = self.head();
        let mut queue: Vec<usize> = (0..head)
            .filter(|&i| self.cells[i].distance < BLOCKED)
            .collect();
        queue.sort_by(|&a, &b| self.cells[a].distance.total_cmp(&self.cells[b].distance));
        for i in 0..head {
            self.cells[i].prev = NIL;
            self.cells[i].next = NIL;
        }
        self.cells[head].next = NIL;
        let mut at = head;
        for i in queue {
            self.link_after(at, i);
            at = i;
        }
        self.calculate_with(cost, config);
    }

    /// Raise distances around `p` to steer paths away from it.
    ///
    /// Cells within blended distance `radius` of `p`, reachable without
    /// crossing impassable cells, get `penalty * (radius - d) / radius`
    /// added to their finite distance.
    ///
    /// # Panics
    ///
    /// If `p` lies outside the map.
    pub fn add_obstacle<C: CostFn + ?Sized>(
        &mut self,
        p: Point,
        cost: &C,
        radius: i32,
        penalty: f64,
    ) {
        let start = self.index_of(p);
        if radius <= 0 {
            return;
        }
        let radius = f64::from(radius);
        let mut seen = NumGrid::alloc(self.width, self.height, 0);
        let mut queue = VecDeque::from([start]);
        seen.set(p, 1);
        let mut touched = 0usize;
        while let Some(i) = queue.pop_front() {
            let q = self.point(i);
            let d = distance_between(p, q);
            let cell = &mut self.cells[i];
            if cell.distance < BLOCKED {
                cell.distance += penalty * (radius - d) / radius;
                touched += 1;
            }
            for n in q.neighbors_8() {
                let Some(j) = self.index(n) else {
                    continue;
                };
                if seen.at(n) != Some(0)
                    || !cost.cost(n).is_passable()
                    || distance_between(p, n) > radius
                {
                    continue;
                }
                seen.set(n, 1);
                queue.push_back(j);
            }
        }
        NumGrid::free(seen);
        log::trace!("dijkstra: obstacle at {p} raised {touched} cells");
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// # Panics
    ///
    /// If `p` lies outside the map.
    pub fn get_distance(&self, p: Point) -> Distance {
        Distance::from_raw(self.raw_distance(p))
    }

    /// # Panics
    ///
    /// If `p` lies outside the map.
    pub fn raw_distance(&self, p: Point) -> f64 {
        self.cells[self.index_of(p)].distance
    }

    /// Direction of steepest strict descent from `p`, or `None` at a local
    /// minimum.
    ///
    /// Neighbours at or above [`BLOCKED`] are never chosen, nor are
    /// diagonal moves past an obstructed corner. Neighbours `is_blocked`
    /// reports as occupied are skipped unless they are at distance 0.
    ///
    /// # Panics
    ///
    /// If `p` lies outside the map.
    pub fn next_dir(
        &self,
        p: Point,
        is_blocked: impl Fn(Point) -> bool,
        diagonals: bool,
    ) -> Option<Dir> {
        let here = self.raw_distance(p);
        let mut best = None;
        let mut best_drop = 0.0;
        for &dir in Dir::moves(diagonals) {
            let q = p.step(dir);
            let Some(j) = self.index(q) else {
                continue;
            };
            let there = self.cells[j].distance;
            if there >= BLOCKED
                || (dir.is_diagonal() && self.cuts_obstructed_corner(p, dir))
                || (there != 0.0 && is_blocked(q))
            {
                continue;
            }
            let drop = here - there;
            if drop > best_drop {
                best_drop = drop;
                best = Some(dir);
            }
        }
        best
    }

    fn cuts_obstructed_corner(&self, p: Point, dir: Dir) -> bool {
        let obstructed = |q: Point| {
            self.index(q)
                .is_some_and(|i| (OBSTRUCTION..NOT_DONE).contains(&self.cells[i].distance))
        };
        dir.corners()
            .is_some_and(|(h, v)| obstructed(p.step(h)) || obstructed(p.step(v)))
    }

    /// Walk downhill from `start`, calling `f` on each cell including the
    /// first. A start at or above [`BLOCKED`] first snaps to
    /// [`closest_target`](Self::closest_target); nothing is visited if
    /// there is none.
    ///
    /// # Panics
    ///
    /// If `start` lies outside the map.
    pub fn for_path(
        &self,
        start: Point,
        is_blocked: impl Fn(Point) -> bool,
        diagonals: bool,
        mut f: impl FnMut(Point),
    ) {
        let mut cur = start;
        if self.raw_distance(start) >= BLOCKED {
            match self.closest_target(start) {
                Some(q) => cur = q,
                None => return,
            }
        }
        f(cur);
        while let Some(dir) = self.next_dir(cur, &is_blocked, diagonals) {
            cur = cur.step(dir);
            f(cur);
        }
    }

    /// Collect the cells of [`for_path`](Self::for_path).
    pub fn get_path(
        &self,
        start: Point,
        is_blocked: impl Fn(Point) -> bool,
        diagonals: bool,
    ) -> Vec<Point> {
        let mut path = Vec::new();
        self.for_path(start, is_blocked, diagonals, |p| path.push(p));
        path
    }

    /// The first cell with a finite distance on the smallest Chebyshev ring
    /// around `p` that has one.
    pub fn closest_target(&self, p: Point) -> Option<Point> {
        let finite = |q: Point| match self.index(q) {
            Some(i) => self.cells[i].distance < BLOCKED,
            None => false,
        };
        if finite(p) {
            return Some(p);
        }
        for r in 1..=self.width.max(self.height) {
            for dy in -r..=r {
                let step = if dy == -r || dy == r { 1 } else { 2 * r };
                let mut dx = -r;
                while dx <= r {
                    let q = p.shift(dx, dy);
                    if finite(q) {
                        return Some(q);
                    }
                    dx += step;
                }
            }
        }
        None
    }

    /// Call `f` on every cell in row-major order.
    pub fn for_each(&self, mut f: impl FnMut(Point, Distance)) {
        for (i, cell) in self.cells[..self.head()].iter().enumerate() {
            f(self.point(i), Distance::from_raw(cell.distance));
        }
    }

    /// Text rendering for debugging: finite distances in base 36 (`+` when
    /// larger), `#` for blocked or obstructed cells, a space when unreached.
    pub fn dump(&self) -> String {
        let mut out = String::with_capacity(self.cells.len() + self.height as usize);
        for (i, cell) in self.cells[..self.head()].iter().enumerate() {
            if i > 0 && i % self.width as usize == 0 {
                out.push('\n');
            }
            out.push(match Distance::from_raw(cell.distance) {
                Distance::Finite(d) => char::from_digit(d as u32, 36).unwrap_or('+'),
                Distance::Blocked | Distance::Obstructed => '#',
                Distance::Unreached => ' ',
            });
        }
        out
    }
}
