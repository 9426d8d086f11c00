//! Graph Section Writer

use crate::SECTION_END;
use crate::error::ProtocolError;
use std::fmt::Display;
use std::io::Write;

/// One node of the node section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeLine<L> {
    /// Dense node index
    pub index: u32,
    /// Optional node label
    pub label: Option<L>,
}

/// One edge of the edge section; edge ids are assigned in write order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeLine<L> {
    /// Source node index
    pub source: u32,
    /// Target node index
    pub target: u32,
    /// Optional edge label
    pub label: Option<L>,
}

/// Write the node section, closed by `end`.
///
/// Nodes without a label are written as the index followed by a single space.
pub fn write_nodes<W, L, I>(writer: &mut W, nodes: I) -> Result<(), ProtocolError>
where
    W: Write,
    L: Display,
    I: IntoIterator<Item = NodeLine<L>>,
{
    for node in nodes {
        match node.label {
            Some(label) => writeln!(writer, "{} {}", node.index, label)?,
            None => writeln!(writer, "{} ", node.index)?,
        }
    }
    writeln!(writer, "{}", SECTION_END)?;
    Ok(())
}

/// Write the edge section, closed by `end`
pub fn write_edges<W, L, I>(writer: &mut W, edges: I) -> Result<(), ProtocolError>
where
    W: Write,
    L: Display,
    I: IntoIterator<Item = EdgeLine<L>>,
{
    for (id, edge) in edges.into_iter().enumerate() {
        write!(writer, "{} {} {} ", id, edge.source, edge.target)?;
        match edge.label {
            Some(label) => writeln!(writer, "{}", label)?,
            None => writeln!(writer)?,
        }
    }
    writeln!(writer, "{}", SECTION_END)?;
    Ok(())
}

/// Write both sections and flush
pub fn write_graph<W, N, E, NI, EI>(
    writer: &mut W,
    nodes: NI,
    edges: EI,
) -> Result<(), ProtocolError>
where
    W: Write,
    N: Display,
    E: Display,
    NI: IntoIterator<Item = NodeLine<N>>,
    EI: IntoIterator<Item = EdgeLine<E>>,
{
    write_nodes(writer, nodes)?;
    write_edges(writer, edges)?;
    writer.flush()?;
    Ok(())
}
