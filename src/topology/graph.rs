use std::collections::HashMap;
use std::fmt::Display;

use petgraph::algo::{connected_components, dijkstra};
use petgraph::graph::UnGraph;
use petgraph::visit::EdgeRef;

use super::city::{City, CityId};
use super::error::TopologyError;

/// Immutable road network of cities.
///
/// # Invariants
///
/// - The graph is connected, so every pair of cities has a finite distance
/// - Distances are shortest-path route lengths, symmetric and non-negative
/// - Neighbor lists are sorted by [`CityId`] and free of duplicates
///
/// Built through [`TopologyBuilder`]; once built nothing can change.
#[derive(Debug, Clone)]
pub struct Topology {
    graph: UnGraph<City, f64>,
    /// All-pairs shortest path lengths, indexed `[from][to]`.
    distances: Vec<Vec<f64>>,
    neighbors: Vec<Vec<CityId>>,
    by_name: HashMap<String, CityId>,
}

impl Topology {
    pub fn builder() -> TopologyBuilder {
        TopologyBuilder::new()
    }

    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn contains(&self, id: CityId) -> bool {
        id.index() < self.graph.node_count()
    }

    /// Returns all cities in id order.
    pub fn cities(&self) -> impl Iterator<Item = &City> {
        self.graph.node_weights()
    }

    pub fn city_ids(&self) -> impl Iterator<Item = CityId> + '_ {
        self.graph.node_indices().map(CityId::from)
    }

    pub fn city(&self, id: CityId) -> Option<&City> {
        self.graph.node_weight(id.node())
    }

    pub fn city_by_name(&self, name: &str) -> Option<CityId> {
        self.by_name.get(name).copied()
    }

    /// Cities directly connected to `id` by a route, lowest id first.
    pub fn neighbors(&self, id: CityId) -> Option<&[CityId]> {
        self.neighbors.get(id.index()).map(|n| n.as_slice())
    }

    /// Shortest route length between two cities, adjacent or not.
    pub fn distance(&self, from: CityId, to: CityId) -> Option<f64> {
        self.distances
            .get(from.index())
            .and_then(|row| row.get(to.index()))
            .copied()
    }

    pub fn route_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Returns reference to the underlying graph.
    pub fn graph(&self) -> &UnGraph<City, f64> {
        &self.graph
    }
}

impl Display for Topology {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Topology {{")?;
        writeln!(f, "  Cities: {}", self.graph.node_count())?;
        writeln!(f, "  Routes: {}", self.graph.edge_count())?;
        for city in self.cities() {
            let names: Vec<&str> = self.neighbors[city.id.index()]
                .iter()
                .filter_map(|n| self.city(*n))
                .map(|c| c.name.as_str())
                .collect();
            writeln!(f, "    {} -> [{}]", city, names.join(", "))?;
        }
        write!(f, "}}")
    }
}

/// Incrementally assembles a [`Topology`].
#[derive(Debug, Default)]
pub struct TopologyBuilder {
    graph: UnGraph<City, f64>,
    by_name: HashMap<String, CityId>,
}

impl TopologyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a city and returns its id.
    ///
    /// # Errors
    ///
    /// `DuplicateCity` if the name is already taken.
    pub fn add_city(&mut self, name: impl Into<String>) -> Result<CityId, TopologyError> {
        let name = name.into();
        if self.by_name.contains_key(&name) {
            return Err(TopologyError::DuplicateCity(name));
        }
        let id = CityId::new(self.graph.node_count());
        let node = self.graph.add_node(City {
            id,
            name: name.clone(),
        });
        debug_assert_eq!(node.index(), id.index());
        self.by_name.insert(name, id);
        Ok(id)
    }

    /// Adds (or replaces) the two-way route between `from` and `to`.
    ///
    /// # Errors
    ///
    /// - `UnknownCity` if either end was not added
    /// - `SelfLoop` if `from == to`
    /// - `InvalidLength` if `length` is negative, NaN or infinite
    pub fn add_route(&mut self, from: CityId, to: CityId, length: f64) -> Result<(), TopologyError> {
        for id in [from, to] {
            if id.index() >= self.graph.node_count() {
                return Err(TopologyError::UnknownCity(id));
            }
        }
        if from == to {
            return Err(TopologyError::SelfLoop(from));
        }
        if !length.is_finite() || length < 0.0 {
            return Err(TopologyError::InvalidLength { from, to, length });
        }
        self.graph.update_edge(from.node(), to.node(), length);
        Ok(())
    }

    /// Freezes the network and precomputes neighbors and distances.
    ///
    /// # Errors
    ///
    /// `Empty` without cities, `Disconnected` if some city cannot be reached.
    pub fn build(self) -> Result<Topology, TopologyError> {
        let graph = self.graph;
        if graph.node_count() == 0 {
            return Err(TopologyError::Empty);
        }
        let components = connected_components(&graph);
        if components > 1 {
            return Err(TopologyError::Disconnected { components });
        }

        let n = graph.node_count();
        let mut distances = vec![vec![0.0_f64; n]; n];
        let mut neighbors = Vec::with_capacity(n);
        for node in graph.node_indices() {
            let reached = dijkstra(&graph, node, None, |e| *e.weight());
            for (target, length) in reached {
                distances[node.index()][target.index()] = length;
            }

            let mut adjacent: Vec<CityId> = graph.neighbors(node).map(CityId::from).collect();
            adjacent.sort();
            adjacent.dedup();
            neighbors.push(adjacent);
        }

        Ok(Topology {
            graph,
            distances,
            neighbors,
            by_name: self.by_name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A-B-C in a line, lengths 2 and 3.
    fn line() -> (Topology, [CityId; 3]) {
        let mut b = Topology::builder();
        let a = b.add_city("A").unwrap();
        let bb = b.add_city("B").unwrap();
        let c = b.add_city("C").unwrap();
        b.add_route(a, bb, 2.0).unwrap();
        b.add_route(bb, c, 3.0).unwrap();
        (b.build().unwrap(), [a, bb, c])
    }

    #[test]
    fn distance_covers_non_adjacent_cities() {
        let (topo, [a, _, c]) = line();
        assert_eq!(topo.distance(a, c), Some(5.0));
        assert_eq!(topo.distance(c, a), Some(5.0));
        assert_eq!(topo.distance(a, a), Some(0.0));
    }

    #[test]
    fn neighbors_are_sorted() {
        let (topo, [a, b, c]) = line();
        assert_eq!(topo.neighbors(b), Some(&[a, c][..]));
        assert_eq!(topo.neighbors(a), Some(&[b][..]));
    }

    #[test]
    fn lookup_by_name() {
        let (topo, [_, b, _]) = line();
        assert_eq!(topo.city_by_name("B"), Some(b));
        assert_eq!(topo.city_by_name("Z"), None);
        assert_eq!(topo.city(b).map(|c| c.name.as_str()), Some("B"));
    }

    #[test]
    fn unknown_city_has_no_distance() {
        let (topo, [a, _, _]) = line();
        assert!(!topo.contains(CityId::new(9)));
        assert_eq!(topo.distance(a, CityId::new(9)), None);
        assert_eq!(topo.neighbors(CityId::new(9)), None);
    }

    #[test]
    fn shortest_path_wins_over_direct_route() {
        let mut b = Topology::builder();
        let x = b.add_city("X").unwrap();
        let y = b.add_city("Y").unwrap();
        let z = b.add_city("Z").unwrap();
        b.add_route(x, z, 10.0).unwrap();
        b.add_route(x, y, 1.0).unwrap();
        b.add_route(y, z, 1.0).unwrap();
        let topo = b.build().unwrap();
        assert_eq!(topo.distance(x, z), Some(2.0));
    }

    #[test]
    fn duplicate_city_rejected() {
        let mut b = Topology::builder();
        b.add_city("A").unwrap();
        assert_eq!(
            b.add_city("A"),
            Err(TopologyError::DuplicateCity("A".into()))
        );
    }

    #[test]
    fn invalid_routes_rejected() {
        let mut b = Topology::builder();
        let a = b.add_city("A").unwrap();
        let c = b.add_city("C").unwrap();
        assert_eq!(b.add_route(a, a, 1.0), Err(TopologyError::SelfLoop(a)));
        assert!(matches!(
            b.add_route(a, c, -1.0),
            Err(TopologyError::InvalidLength { .. })
        ));
        assert!(matches!(
            b.add_route(a, c, f64::NAN),
            Err(TopologyError::InvalidLength { .. })
        ));
        assert_eq!(
            b.add_route(a, CityId::new(5), 1.0),
            Err(TopologyError::UnknownCity(CityId::new(5)))
        );
    }

    #[test]
    fn disconnected_graph_rejected() {
        let mut b = Topology::builder();
        b.add_city("A").unwrap();
        b.add_city("B").unwrap();
        assert_eq!(
            b.build().unwrap_err(),
            TopologyError::Disconnected { components: 2 }
        );
    }

    #[test]
    fn empty_topology_rejected() {
        assert_eq!(
            TopologyBuilder::new().build().unwrap_err(),
            TopologyError::Empty
        );
    }

    #[test]
    fn display_lists_cities() {
        let (topo, _) = line();
        let s = topo.to_string();
        assert!(s.contains("Cities: 3"));
        assert!(s.contains("B (#1) -> [A, C]"));
    }
}
