use std::fmt;

use petgraph::graph::NodeIndex;

/// Stable key of a city within one [`Topology`](super::Topology).
///
/// Ids are dense: a topology with `n` cities uses ids `0..n`, in insertion
/// order. Ordering on ids is what "lowest-indexed" means throughout the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CityId(usize);

impl CityId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }

    pub(crate) fn node(&self) -> NodeIndex {
        NodeIndex::new(self.0)
    }
}

impl From<NodeIndex> for CityId {
    fn from(node: NodeIndex) -> Self {
        Self(node.index())
    }
}

impl fmt::Display for CityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A node of the topology.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct City {
    pub id: CityId,
    pub name: String,
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn city_id_roundtrips_node_index() {
        let id = CityId::new(3);
        assert_eq!(CityId::from(id.node()), id);
    }

    #[test]
    fn city_ids_order_by_index() {
        assert!(CityId::new(1) < CityId::new(2));
    }

    #[test]
    fn city_display() {
        let city = City {
            id: CityId::new(0),
            name: "Lausanne".into(),
        };
        assert_eq!(city.to_string(), "Lausanne (#0)");
    }
}
