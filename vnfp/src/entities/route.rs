use itertools::Itertools;
use std::fmt::{Display, Formatter};
use std::iter;

/// Entities which carry the ordered `(from, to)` node pair they route traffic between.
pub trait Routed {
    fn from_node(&self) -> usize;
    fn to_node(&self) -> usize;
}

/// Routing decision between an ordered pair of network nodes.
/// Traffic travels from `from` over the intermediate `hops` to `to`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub from: usize,
    pub to: usize,
    pub hops: Vec<usize>,
}

impl Route {
    pub fn new(from: usize, to: usize, hops: Vec<usize>) -> Self {
        Self { from, to, hops }
    }

    /// A route over a single link, without intermediate nodes
    pub fn direct(from: usize, to: usize) -> Self {
        Self::new(from, to, vec![])
    }

    /// Builds a route from a full node path, endpoints included.
    /// Returns `None` for an empty path.
    ///
    /// Self-loop links are not represented: `[a, a]` normalizes to the same route as `[a]`,
    /// whose [`path`](Route::path) is `[a]`.
    pub fn from_path(path: &[usize]) -> Option<Self> {
        match path {
            [] => None,
            [node] => Some(Self::direct(*node, *node)),
            [from, hops @ .., to] => Some(Self::new(*from, *to, hops.to_vec())),
        }
    }

    /// All nodes visited, endpoints included. A route from a node to itself visits that node once.
    pub fn path(&self) -> Vec<usize> {
        if self.from == self.to && self.hops.is_empty() {
            return vec![self.from];
        }
        iter::once(self.from)
            .chain(self.hops.iter().copied())
            .chain(iter::once(self.to))
            .collect()
    }

    /// Number of links traversed
    pub fn n_links(&self) -> usize {
        self.path().len() - 1
    }
}

impl Routed for Route {
    fn from_node(&self) -> usize {
        self.from
    }

    fn to_node(&self) -> usize {
        self.to
    }
}

impl Display for Route {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.path().iter().join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::Route;

    #[test]
    fn path_includes_endpoints() {
        let route = Route::new(3, 1, vec![0, 4]);
        assert_eq!(route.path(), vec![3, 0, 4, 1]);
        assert_eq!(route.n_links(), 3);
        assert_eq!(route.to_string(), "[3,0,4,1]");
        assert_eq!(Route::from_path(&[3, 0, 4, 1]), Some(route));
    }

    #[test]
    fn self_route_visits_once() {
        let route = Route::direct(2, 2);
        assert_eq!(route.path(), vec![2]);
        assert_eq!(route.n_links(), 0);
        assert_eq!(route.to_string(), "[2]");
        assert_eq!(Route::from_path(&[2]), Some(route.clone()));
        assert_eq!(Route::from_path(&[]), None);

        let repeated = Route::from_path(&[2, 2]).unwrap();
        assert_eq!(repeated, route);
        assert_eq!(repeated.path(), vec![2]);
        assert_eq!(repeated.n_links(), 0);

        let round_trip = Route::from_path(&[2, 5, 2]).unwrap();
        assert_eq!(round_trip.path(), vec![2, 5, 2]);
        assert_eq!(round_trip.n_links(), 2);
    }
}
