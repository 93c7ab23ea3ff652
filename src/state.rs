use std::collections::VecDeque;

/// Breadth-first search state for a single pass over the residual
/// network: each node's predecessor on the search tree, plus the
/// queue of discovered nodes that still have to be scanned.
#[derive(Default, Debug, Clone)]
pub struct Trace {
    pub parent: Vec<Option<usize>>,
    queue: VecDeque<usize>,
}

impl Trace {
    pub fn initialize(num_nodes: usize) -> Trace {
        Trace {
            parent: vec![None; num_nodes],
            queue: VecDeque::with_capacity(num_nodes),
        }
    }

    /// Forgets the previous pass and seeds the queue with `root`,
    /// which is its own parent
    pub fn reset(&mut self, root: usize) {
        self.parent.iter_mut().for_each(|p| *p = None);
        self.queue.clear();

        self.parent[root] = Some(root);
        self.queue.push_back(root);
    }

    pub fn is_visited(&self, node: usize) -> bool {
        self.parent[node].is_some()
    }

    pub fn visit(&mut self, node: usize, parent: usize) {
        self.parent[node] = Some(parent);
        self.queue.push_back(node);
    }

    pub fn next_node(&mut self) -> Option<usize> {
        self.queue.pop_front()
    }

    pub fn visited(&self) -> impl Iterator<Item = usize> + '_ {
        self.parent
            .iter()
            .enumerate()
            .filter_map(|(ix, p)| p.map(|_| ix))
    }

    pub fn path_iter(&self, root: usize, end: usize) -> PathIter<'_> {
        PathIter::new(self, root, end)
    }
}

// Iterator over the arcs of the search tree path from the root to a
// node, walking the parent links backwards from that node
pub struct PathIter<'a> {
    root: usize,
    current: usize,
    parent: &'a [Option<usize>],
}

impl<'a> PathIter<'a> {
    fn new(trace: &'a Trace, root: usize, end: usize) -> PathIter<'a> {
        PathIter {
            root,
            current: end,
            parent: &trace.parent,
        }
    }
}

impl<'a> Iterator for PathIter<'a> {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<(usize, usize)> {
        if self.current == self.root {
            None
        } else {
            let v = self.current;
            let u = self.parent[v]?;
            self.current = u;
            Some((u, v))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_walks_back_to_root() {
        let mut trace = Trace::initialize(4);
        trace.reset(0);
        trace.visit(2, 0);
        trace.visit(1, 2);
        trace.visit(3, 1);

        let path: Vec<_> = trace.path_iter(0, 3).collect();
        assert_eq!(path, vec![(1, 3), (2, 1), (0, 2)]);

        assert_eq!(trace.next_node(), Some(0));
        assert_eq!(trace.next_node(), Some(2));
    }

    #[test]
    fn unreached_node_has_empty_path() {
        let mut trace = Trace::initialize(3);
        trace.reset(0);
        trace.visit(1, 0);

        assert!(!trace.is_visited(2));
        assert_eq!(trace.path_iter(0, 2).count(), 0);
        assert_eq!(trace.visited().collect::<Vec<_>>(), vec![0, 1]);

        trace.reset(1);
        assert_eq!(trace.visited().collect::<Vec<_>>(), vec![1]);
    }
}
