use log::{debug, trace, warn};

use crate::error::FlowError;
use crate::network::{Capacity, CapacityMatrix};
use crate::state::Trace;

/// Checks that `capacity` is square, that both endpoints are nodes of
/// it, and that no arc has a negative capacity
fn validate(
    capacity: &CapacityMatrix,
    source: usize,
    sink: usize,
) -> Result<(), FlowError> {
    let nodes = capacity.len();

    if let Some((row, len)) = capacity
        .iter()
        .map(|row| row.len())
        .enumerate()
        .find(|&(_, len)| len != nodes)
    {
        return Err(FlowError::NotSquare {
            row,
            len,
            expected: nodes,
        });
    }

    for &index in &[source, sink] {
        if index >= nodes {
            return Err(FlowError::InvalidIndex { index, nodes });
        }
    }

    for (from, row) in capacity.iter().enumerate() {
        if let Some((to, &cap)) =
            row.iter().enumerate().find(|&(_, &cap)| cap < 0)
        {
            return Err(FlowError::NegativeCapacity {
                from,
                to,
                capacity: cap,
            });
        }
    }

    Ok(())
}

/// Breadth-first search over the arcs of positive residual capacity,
/// starting at `source`. Nodes are scanned in index order. Stops as
/// soon as `target` is discovered, otherwise explores everything
/// reachable. Returns whether `target` was reached.
fn search(
    state: &mut Trace,
    capacity: &CapacityMatrix,
    source: usize,
    target: Option<usize>,
) -> bool {
    state.reset(source);

    'bfs: while let Some(u) = state.next_node() {
        for (v, &cap) in capacity[u].iter().enumerate() {
            if cap > 0 && !state.is_visited(v) {
                state.visit(v, u);
                if Some(v) == target {
                    break 'bfs;
                }
            }
        }
    }

    target.map_or(false, |t| state.is_visited(t))
}

/// Max-flow solver using the algorithm of Edmonds and Karp, i.e.
/// repeated augmentation along shortest paths of the residual network.
#[derive(Debug, Default, Clone)]
pub struct EdmondsKarp {
    limit: Option<usize>,
    augmentations: usize,
    state: Trace,
}

impl EdmondsKarp {
    pub fn new() -> Self {
        Self::default()
    }

    /// A solver that fails with [`FlowError::AugmentationLimit`] rather
    /// than use more than `max` augmenting paths
    pub fn with_limit(max: usize) -> Self {
        EdmondsKarp {
            limit: Some(max),
            ..Self::default()
        }
    }

    /// Number of augmenting paths used by the latest call to `solve`
    pub fn augmentations(&self) -> usize {
        self.augmentations
    }

    /// Computes the value of a maximum flow from `source` to `sink`.
    ///
    /// `capacity` is turned into the residual network of that flow in
    /// place: every augmentation lowers the capacity of the arcs on
    /// its path and raises the capacity of their reverse arcs by the
    /// same amount. Clone the matrix first if the original capacities
    /// are needed afterwards.
    ///
    /// If `source == sink` there is nothing to route, the matrix is
    /// left untouched and the flow is 0.
    pub fn solve(
        &mut self,
        capacity: &mut CapacityMatrix,
        source: usize,
        sink: usize,
    ) -> Result<Capacity, FlowError> {
        validate(capacity, source, sink)?;
        self.augmentations = 0;

        if source == sink {
            debug!("source and sink are both node {}, no flow", source);
            return Ok(0);
        }

        self.state = Trace::initialize(capacity.len());
        let mut flow: Capacity = 0;

        while search(&mut self.state, capacity, source, Some(sink)) {
            if let Some(limit) = self.limit {
                if self.augmentations >= limit {
                    warn!("augmenting path limit of {} reached", limit);
                    return Err(FlowError::AugmentationLimit(limit));
                }
            }

            let bottleneck = self
                .state
                .path_iter(source, sink)
                .map(|(u, v)| capacity[u][v])
                .fold(Capacity::MAX, Capacity::min);
            debug_assert!(bottleneck > 0);

            // reverse arcs must be able to take the bottleneck before
            // anything is changed
            if self
                .state
                .path_iter(source, sink)
                .any(|(u, v)| capacity[v][u].checked_add(bottleneck).is_none())
            {
                return Err(FlowError::CapacityOverflow);
            }
            flow = flow
                .checked_add(bottleneck)
                .ok_or(FlowError::CapacityOverflow)?;

            for (u, v) in self.state.path_iter(source, sink) {
                capacity[u][v] -= bottleneck;
                capacity[v][u] += bottleneck;
            }

            self.augmentations += 1;
            trace!(
                "augmenting path {} carries {}, flow is now {}",
                self.augmentations,
                bottleneck,
                flow
            );
        }

        debug!(
            "max flow {} -> {} is {} after {} augmenting paths",
            source, sink, flow, self.augmentations
        );

        Ok(flow)
    }
}

/// Computes the value of a maximum flow from `source` to `sink`,
/// leaving `capacity` in its residual state.
///
/// See [`EdmondsKarp::solve`].
pub fn max_flow(
    capacity: &mut CapacityMatrix,
    source: usize,
    sink: usize,
) -> Result<Capacity, FlowError> {
    EdmondsKarp::new().solve(capacity, source, sink)
}

/// Returns the nodes reachable from `source` in a residual network,
/// in ascending order. After a maximum flow has been computed these
/// form the source side of a minimum cut.
pub fn min_cut(
    residual: &CapacityMatrix,
    source: usize,
) -> Result<Vec<usize>, FlowError> {
    validate(residual, source, source)?;

    let mut state = Trace::initialize(residual.len());
    search(&mut state, residual, source, None);

    Ok(state.visited().collect())
}

/// The flow carried by each arc of the `original` network, given the
/// `residual` network left behind by the solver. Only arcs carrying a
/// positive flow are returned, as `(from, to, flow)`.
pub fn arc_flows(
    original: &CapacityMatrix,
    residual: &CapacityMatrix,
) -> Vec<(usize, usize, Capacity)> {
    let mut flows = Vec::new();

    for (u, (orig_row, res_row)) in original.iter().zip(residual).enumerate() {
        for (v, (&cap, &res)) in orig_row.iter().zip(res_row).enumerate() {
            if cap > 0 && cap > res {
                flows.push((u, v, cap - res));
            }
        }
    }

    flows
}
