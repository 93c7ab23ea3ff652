use std::io::prelude::*;

use bstr::io::BufReadExt;
use bstr::ByteSlice;
use fxhash::FxHashMap;

use crate::error::ArcError;

pub type Capacity = i64;
pub type CapacityMatrix = Vec<Vec<Capacity>>;

/// Nodes are labelled with single letters, so a network has at most
/// as many nodes as there are letters in the alphabet
pub const MAX_NODES: usize = 26;

/// A single directed arc definition, `from -> to` with `capacity`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arc {
    pub from: usize,
    pub to: usize,
    pub capacity: Capacity,
}

/// A dense capacity matrix representation of a flow network,
/// including the labels used to refer to its nodes.
///
/// By convention the first node is the source and the last node is
/// the sink.
#[derive(Debug, Clone)]
pub struct Network {
    pub capacity: CapacityMatrix,
    pub labels: Vec<String>,
    name_map: FxHashMap<String, usize>,
}

impl Network {
    /// Constructs a network of `num_nodes` nodes without any arcs,
    /// labelled `A`, `B`, `C`, ...
    pub fn new(num_nodes: usize) -> Result<Network, ArcError> {
        if num_nodes == 0 || num_nodes > MAX_NODES {
            return Err(ArcError::NodeCount(num_nodes));
        }

        let labels: Vec<String> = (0..num_nodes)
            .map(|ix| char::from(b'A' + ix as u8).to_string())
            .collect();

        let name_map = labels
            .iter()
            .enumerate()
            .map(|(ix, label)| (label.clone(), ix))
            .collect();

        Ok(Network {
            capacity: vec![vec![0; num_nodes]; num_nodes],
            labels,
            name_map,
        })
    }

    /// Constructs a network from `(from, to, capacity)` triples of
    /// node indices. Later triples for the same pair replace earlier
    /// ones.
    pub fn from_arcs<I>(num_nodes: usize, arcs: I) -> Result<Network, ArcError>
    where
        I: IntoIterator<Item = (usize, usize, Capacity)>,
    {
        let mut network = Network::new(num_nodes)?;

        for (from, to, capacity) in arcs {
            for &ix in &[from, to] {
                if ix >= num_nodes {
                    return Err(ArcError::UnknownNode(ix.to_string()));
                }
            }
            if capacity < 0 {
                return Err(ArcError::NegativeCapacity(capacity));
            }
            network.set_arc(Arc { from, to, capacity });
        }

        Ok(network)
    }

    /// Reads a network from a line-based text stream. The first
    /// non-blank line holds the node count, every following line one
    /// arc in the form `<origin> <destination> <capacity>`, until a
    /// line reading `end` or the end of the stream. Blank lines and
    /// lines starting with `#` are ignored.
    pub fn from_reader<T: BufRead>(reader: &mut T) -> Result<Network, ArcError> {
        let mut network: Option<Network> = None;

        for (ix, line) in reader.byte_lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with(b"#") {
                continue;
            }

            let at_line = |err: ArcError| ArcError::Line {
                line: ix + 1,
                source: Box::new(err),
            };

            match network.as_mut() {
                None => {
                    let num_nodes = parse_node_count(line).map_err(at_line)?;
                    network = Some(Network::new(num_nodes).map_err(at_line)?);
                }
                Some(network) => {
                    if is_terminator(line) {
                        break;
                    }
                    let arc = network.parse_arc(line).map_err(at_line)?;
                    network.set_arc(arc);
                }
            }
        }

        network.ok_or(ArcError::Eof)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn source(&self) -> usize {
        0
    }

    pub fn sink(&self) -> usize {
        self.len() - 1
    }

    pub fn label(&self, ix: usize) -> &str {
        &self.labels[ix]
    }

    /// Case-insensitive lookup of a node label
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.name_map.get(&label.to_ascii_uppercase()).copied()
    }

    /// Parses an arc definition of the form
    /// `<origin> <destination> <capacity>`
    pub fn parse_arc(&self, line: &[u8]) -> Result<Arc, ArcError> {
        let fields: Vec<&[u8]> = line.fields().collect();
        if fields.len() != 3 {
            return Err(ArcError::Format);
        }

        let from = self.lookup(fields[0])?;
        let to = self.lookup(fields[1])?;

        let token = fields[2].to_str_lossy();
        let capacity: Capacity = token
            .parse()
            .map_err(|_| ArcError::Capacity(token.to_string()))?;
        if capacity < 0 {
            return Err(ArcError::NegativeCapacity(capacity));
        }

        Ok(Arc { from, to, capacity })
    }

    /// Stores an arc, overwriting any capacity previously given for
    /// the same pair of nodes
    pub fn set_arc(&mut self, arc: Arc) {
        self.capacity[arc.from][arc.to] = arc.capacity;
    }

    fn lookup(&self, label: &[u8]) -> Result<usize, ArcError> {
        let label = label.to_str_lossy();
        self.index_of(&label)
            .ok_or_else(|| ArcError::UnknownNode(label.to_uppercase()))
    }
}

pub fn parse_node_count(line: &[u8]) -> Result<usize, ArcError> {
    let token = line.trim().to_str_lossy();
    token
        .parse()
        .map_err(|_| ArcError::NodeCountToken(token.to_string()))
}

/// Whether the line is the `end` sentinel closing a list of arcs
pub fn is_terminator(line: &[u8]) -> bool {
    line.trim().eq_ignore_ascii_case(b"end")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_follow_the_alphabet() {
        let network = Network::new(4).unwrap();
        assert_eq!(network.labels, vec!["A", "B", "C", "D"]);
        assert_eq!(network.source(), 0);
        assert_eq!(network.sink(), 3);
        assert_eq!(network.index_of("c"), Some(2));
        assert_eq!(network.index_of("E"), None);
    }

    #[test]
    fn node_count_bounds() {
        assert!(matches!(Network::new(0), Err(ArcError::NodeCount(0))));
        assert!(matches!(Network::new(27), Err(ArcError::NodeCount(27))));
        assert_eq!(Network::new(26).unwrap().label(25), "Z");
    }

    #[test]
    fn parse_arc_lines() {
        let network = Network::new(3).unwrap();

        let arc = network.parse_arc(b"  a C 15 ").unwrap();
        assert_eq!(
            arc,
            Arc {
                from: 0,
                to: 2,
                capacity: 15
            }
        );

        assert!(matches!(network.parse_arc(b"A B"), Err(ArcError::Format)));
        assert!(matches!(
            network.parse_arc(b"A B 1 2"),
            Err(ArcError::Format)
        ));
        assert!(matches!(
            network.parse_arc(b"A q 1"),
            Err(ArcError::UnknownNode(ref l)) if l == "Q"
        ));
        assert!(matches!(
            network.parse_arc(b"A B x"),
            Err(ArcError::Capacity(ref t)) if t == "x"
        ));
        assert!(matches!(
            network.parse_arc(b"A B -4"),
            Err(ArcError::NegativeCapacity(-4))
        ));
    }

    #[test]
    fn last_write_wins() {
        let network =
            Network::from_arcs(2, vec![(0, 1, 7), (0, 1, 3)]).unwrap();
        assert_eq!(network.capacity[0][1], 3);
    }

    #[test]
    fn from_arcs_rejects_unknown_nodes() {
        assert!(matches!(
            Network::from_arcs(2, vec![(0, 2, 1)]),
            Err(ArcError::UnknownNode(_))
        ));
    }

    #[test]
    fn read_batch_input() {
        let input = b"# diamond\n4\nA B 3\nA C 2\n\nB D 2\nC D 3\nEND\nA D 99\n";
        let network = Network::from_reader(&mut &input[..]).unwrap();

        assert_eq!(network.len(), 4);
        assert_eq!(network.capacity[0][1], 3);
        assert_eq!(network.capacity[2][3], 3);
        assert_eq!(network.capacity[0][3], 0);
    }

    #[test]
    fn read_batch_input_reports_line() {
        let input = b"3\nA B 1\nA B\n";
        let err = Network::from_reader(&mut &input[..]).unwrap_err();
        match err {
            ArcError::Line { line, source } => {
                assert_eq!(line, 3);
                assert!(matches!(*source, ArcError::Format));
            }
            other => panic!("unexpected error {:?}", other),
        }

        let err = Network::from_reader(&mut &b"\n\n"[..]).unwrap_err();
        assert!(matches!(err, ArcError::Eof));
    }
}
