/// Tuning for a Dijkstra calculation or an A* search.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathConfig {
    /// Whether diagonal steps are allowed.
    pub diagonals: bool,
    /// Relaxations that would exceed this accumulated cost are dropped.
    pub max_distance: Option<f64>,
    /// A* gives up with an empty path after expanding this many nodes.
    /// Ignored by the Dijkstra map.
    pub max_expansions: Option<usize>,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            diagonals: true,
            max_distance: None,
            max_expansions: None,
        }
    }
}

impl PathConfig {
    pub fn with_diagonals(mut self, diagonals: bool) -> Self {
        self.diagonals = diagonals;
        self
    }

    pub fn with_max_distance(mut self, max_distance: f64) -> Self {
        self.max_distance = Some(max_distance);
        self
    }

    pub fn with_max_expansions(mut self, max_expansions: usize) -> Self {
        self.max_expansions = Some(max_expansions);
        self
    }

    #[inline]
    pub(crate) fn within_distance(&self, d: f64) -> bool {
        self.max_distance.is_none_or(|m| d <= m)
    }
}
