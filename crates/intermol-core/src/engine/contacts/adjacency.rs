use super::ContactStore;
use crate::core::models::ids::{ContactIndex, FeatureIndex};

/// Compressed adjacency from each feature to the contacts touching it.
///
/// `offsets` has one entry per feature plus a trailing total; the slice
/// `offsets[f]..offsets[f + 1]` of `neighbors` and `edges` holds the partner
/// features and contact indices of feature `f`, in ascending contact order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdjacencyList {
    offsets: Vec<usize>,
    neighbors: Vec<FeatureIndex>,
    edges: Vec<ContactIndex>,
}

impl AdjacencyList {
    pub fn new(store: &ContactStore, node_count: usize) -> Self {
        let mut counts = vec![0usize; node_count];
        for c in store.iter() {
            counts[c.index1] += 1;
            counts[c.index2] += 1;
        }

        let mut offsets = Vec::with_capacity(node_count + 1);
        let mut total = 0;
        offsets.push(0);
        for &count in &counts {
            total += count;
            offsets.push(total);
        }

        let mut neighbors = vec![0; total];
        let mut edges = vec![0; total];
        let mut fill = offsets[..node_count].to_vec();
        for (i, c) in store.iter().enumerate() {
            for (node, other) in [(c.index1, c.index2), (c.index2, c.index1)] {
                neighbors[fill[node]] = other;
                edges[fill[node]] = i;
                fill[node] += 1;
            }
        }

        Self {
            offsets,
            neighbors,
            edges,
        }
    }

    pub fn node_count(&self) -> usize {
        self.offsets.len().saturating_sub(1)
    }

    fn range(&self, node: FeatureIndex) -> std::ops::Range<usize> {
        match (self.offsets.get(node), self.offsets.get(node + 1)) {
            (Some(&start), Some(&end)) => start..end,
            _ => 0..0,
        }
    }

    /// Partner features of `node`, empty for an unknown node.
    pub fn neighbors(&self, node: FeatureIndex) -> &[FeatureIndex] {
        &self.neighbors[self.range(node)]
    }

    /// Contacts touching `node`, ascending.
    pub fn edges(&self, node: FeatureIndex) -> &[ContactIndex] {
        &self.edges[self.range(node)]
    }

    pub fn degree(&self, node: FeatureIndex) -> usize {
        self.range(node).len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::contacts::ContactType;

    #[test]
    fn lists_partners_and_edges_per_node() {
        let mut store = ContactStore::new();
        store.add_contact(0, 2, ContactType::HydrogenBond);
        store.add_contact(2, 1, ContactType::IonicInteraction);
        store.add_contact(0, 1, ContactType::Hydrophobic);

        let adjacency = AdjacencyList::new(&store, 4);
        assert_eq!(adjacency.node_count(), 4);
        assert_eq!(adjacency.neighbors(0), &[2, 1]);
        assert_eq!(adjacency.edges(0), &[0, 2]);
        assert_eq!(adjacency.neighbors(2), &[0, 1]);
        assert_eq!(adjacency.edges(1), &[1, 2]);
        assert_eq!(adjacency.degree(3), 0);
        assert!(adjacency.edges(3).is_empty());
        assert!(adjacency.edges(99).is_empty());
    }
}
