use std::io::prelude::*;

use bstr::ByteSlice;
use log::info;

use crate::algorithm::{arc_flows, min_cut, EdmondsKarp};
use crate::error::{ArcError, Error};
use crate::network::{
    is_terminator, parse_node_count, Capacity, Network, MAX_NODES,
};

/// What to compute once the network is known
#[derive(Debug, Default, Clone)]
pub struct Options {
    pub max_augmentations: Option<usize>,
    pub show_cut: bool,
}

impl Options {
    fn solver(&self) -> EdmondsKarp {
        match self.max_augmentations {
            Some(max) => EdmondsKarp::with_limit(max),
            None => EdmondsKarp::new(),
        }
    }
}

/// Interactive construction of a network: prompts for the number of
/// nodes and then for arcs, re-prompting on any invalid line.
pub struct Session<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Session { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn banner(&mut self) -> Result<(), Error> {
        let rule = "=".repeat(60);
        writeln!(self.output, "{}", rule)?;
        writeln!(self.output, "  Maximum flow calculator (Edmonds-Karp)")?;
        writeln!(self.output, "{}", rule)?;
        writeln!(
            self.output,
            "Computes the largest flow that can be routed from the first \
             node to the last one without exceeding any arc capacity.\n"
        )?;
        Ok(())
    }

    /// Prints `prompt` and reads the next line, trimmed. `None` at the
    /// end of the input.
    fn prompt(&mut self, prompt: &str) -> Result<Option<Vec<u8>>, Error> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = Vec::new();
        if self.input.read_until(b'\n', &mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_vec()))
    }

    pub fn prompt_node_count(&mut self) -> Result<usize, Error> {
        loop {
            let prompt = format!("Number of nodes (max. {}): ", MAX_NODES);
            let line = self.prompt(&prompt)?.ok_or(ArcError::Eof)?;

            match parse_node_count(&line).and_then(|n| {
                if (1..=MAX_NODES).contains(&n) {
                    Ok(n)
                } else {
                    Err(ArcError::NodeCount(n))
                }
            }) {
                Ok(n) => return Ok(n),
                Err(err) => writeln!(self.output, "{}", err)?,
            }
        }
    }

    /// Reads arcs into `network` until `end` or the end of the input,
    /// returning how many were stored
    pub fn prompt_arcs(
        &mut self,
        network: &mut Network,
    ) -> Result<usize, Error> {
        writeln!(self.output, "Enter each arc with its capacity.")?;
        writeln!(self.output, "Format: <origin> <destination> <capacity>")?;
        writeln!(self.output, "Type 'end' to finish.\n")?;

        let mut stored = 0;
        while let Some(line) = self.prompt("Arc: ")? {
            if is_terminator(&line) {
                break;
            }

            match network.parse_arc(&line) {
                Ok(arc) => {
                    network.set_arc(arc);
                    stored += 1;
                    writeln!(
                        self.output,
                        "Stored arc {} -> {} with capacity {}",
                        network.label(arc.from),
                        network.label(arc.to),
                        arc.capacity
                    )?;
                }
                Err(ArcError::UnknownNode(label)) => writeln!(
                    self.output,
                    "Node {} does not exist. Valid nodes: {}",
                    label,
                    network.labels.join(", ")
                )?,
                Err(err) => writeln!(self.output, "{}", err)?,
            }
        }

        Ok(stored)
    }

    pub fn read_network(&mut self) -> Result<Network, Error> {
        let num_nodes = self.prompt_node_count()?;
        let mut network = Network::new(num_nodes)?;

        writeln!(
            self.output,
            "\nAvailable nodes: {}\n",
            network.labels.join(", ")
        )?;

        let stored = self.prompt_arcs(&mut network)?;
        info!("read {} arcs for {} nodes", stored, num_nodes);

        Ok(network)
    }
}

/// Computes the maximum flow from the first to the last node of
/// `network` and writes it to `out`. The network itself keeps its
/// original capacities.
pub fn report<W: Write>(
    out: &mut W,
    network: &Network,
    options: &Options,
) -> Result<Capacity, Error> {
    let (source, sink) = (network.source(), network.sink());

    let mut residual = network.capacity.clone();
    let mut solver = options.solver();
    let flow = solver.solve(&mut residual, source, sink)?;
    info!(
        "found flow {} using {} augmenting paths",
        flow,
        solver.augmentations()
    );

    writeln!(
        out,
        "Maximum flow from {} to {}: {}",
        network.label(source),
        network.label(sink),
        flow
    )?;

    if options.show_cut {
        for (u, v, f) in arc_flows(&network.capacity, &residual) {
            writeln!(
                out,
                "  {} -> {}: {}/{}",
                network.label(u),
                network.label(v),
                f,
                network.capacity[u][v]
            )?;
        }

        let cut: Vec<&str> = min_cut(&residual, source)?
            .into_iter()
            .map(|ix| network.label(ix))
            .collect();
        writeln!(out, "Minimum cut source side: {}", cut.join(", "))?;
    }

    Ok(flow)
}
