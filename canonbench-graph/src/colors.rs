//! Color Encoding
//!
//! Engines receive a partition as one flat signed array. Node `i` is written as
//! `i + 1` so the sign bit is free to mark class boundaries.

use crate::error::GraphError;
use crate::transform::NumberedGraph;
use crate::vertex::{Marker, Vertex};
use fxhash::FxHashMap;
use std::hash::Hash;

/// Convention for marking class boundaries in a signed color array
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorEncoding {
    /// Last member of each class is negated (nauty, traces)
    EndMarked,
    /// Members sorted ascending, first member of each class is negated (nishe)
    StartMarked,
}

/// Serialize color classes into a signed, 1-based array.
///
/// The output has one entry per node index across all classes. Empty classes
/// contribute nothing. Every member must lie below the total member count.
pub fn encode_colors(
    classes: &[Vec<u32>],
    encoding: ColorEncoding,
) -> Result<Vec<i32>, GraphError> {
    let nodes: usize = classes.iter().map(Vec::len).sum();
    if nodes >= i32::MAX as usize {
        return Err(GraphError::TooManyNodes { nodes });
    }
    // nodes < i32::MAX, so every in-range member fits after the shift
    let shifted = |index: u32| -> Result<i32, GraphError> {
        if (index as usize) < nodes {
            Ok(index as i32 + 1)
        } else {
            Err(GraphError::IndexOutOfRange { index, nodes })
        }
    };

    let mut colors = Vec::with_capacity(nodes);
    for class in classes {
        match encoding {
            ColorEncoding::EndMarked => {
                if let Some((last, rest)) = class.split_last() {
                    for &i in rest {
                        colors.push(shifted(i)?);
                    }
                    colors.push(-shifted(*last)?);
                }
            }
            ColorEncoding::StartMarked => {
                let mut sorted = class.clone();
                sorted.sort_unstable();
                if let Some((first, rest)) = sorted.split_first() {
                    colors.push(-shifted(*first)?);
                    for &i in rest {
                        colors.push(shifted(i)?);
                    }
                }
            }
        }
    }

    Ok(colors)
}

/// One color id per node index: original nodes get `0`, each distinct marker
/// gets `1, 2, ...` in order of first appearance.
pub fn encode_color_ids<V, L: Eq + Hash>(graph: &NumberedGraph<Vertex<V, L>, L>) -> Vec<u32> {
    let mut cache: FxHashMap<&Marker<L>, u32> = FxHashMap::default();
    let mut colors = vec![0u32; graph.node_count()];

    for node in graph.graph().nodes() {
        let numbered = node.data();
        if let Some(marker) = numbered.data.marker() {
            let next = cache.len() as u32 + 1;
            colors[numbered.index as usize] = *cache.entry(marker).or_insert(next);
        }
    }

    colors
}
