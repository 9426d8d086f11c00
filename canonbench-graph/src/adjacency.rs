//! Bidirectional Adjacency
//!
//! Some engines only accept undirected graphs, represented as symmetric
//! adjacency where each edge is listed in both endpoint rows.

/// Turn a directed adjacency list into a symmetric one in place.
///
/// Each row keeps its outgoing entries in order, followed by the sources of
/// its incoming edges. Rows are grown once to `out-degree + in-degree`, so
/// every edge ends up listed exactly twice. The appended segment is not sorted.
pub fn make_bidirectional(adjacency: &mut [Vec<u32>]) {
    let mut in_degree = vec![0usize; adjacency.len()];
    for row in adjacency.iter() {
        for &target in row {
            in_degree[target as usize] += 1;
        }
    }

    let out_degree: Vec<usize> = adjacency.iter().map(Vec::len).collect();
    for (row, &incoming) in adjacency.iter_mut().zip(&in_degree) {
        row.reserve_exact(incoming);
    }

    // Only the original outgoing prefix of each row is walked
    for source in 0..adjacency.len() {
        for i in 0..out_degree[source] {
            let target = adjacency[source][i] as usize;
            adjacency[target].push(source as u32);
        }
    }
}
