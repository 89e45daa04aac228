use crate::entities::{Placement, Route, Routed};
use crate::util::KeyedMatrix;
use itertools::Itertools;
use std::fmt::{Display, Formatter};

/// A *possible* solution: a placement of components on servers combined with the routes
/// between pairs of network nodes, at most one route per ordered `(from, to)` pair.
#[derive(Debug, Clone)]
pub struct Solution<P = Placement, R = Route> {
    placement: P,
    routes: KeyedMatrix<usize, usize, R>,
}

impl<P, R: Routed> Solution<P, R> {
    /// Creates a solution, indexing every route by its `(from, to)` pair.
    /// A later route for the same pair replaces an earlier one.
    pub fn new(placement: P, routes: impl IntoIterator<Item = R>) -> Self {
        let routes = routes
            .into_iter()
            .map(|r| (r.from_node(), r.to_node(), r))
            .collect();
        Self { placement, routes }
    }
}

impl<P, R> Solution<P, R> {
    pub fn from_matrix(placement: P, routes: KeyedMatrix<usize, usize, R>) -> Self {
        Self { placement, routes }
    }

    pub fn placement(&self) -> &P {
        &self.placement
    }

    pub fn routes(&self) -> &KeyedMatrix<usize, usize, R> {
        &self.routes
    }

    pub fn route(&self, from: usize, to: usize) -> Option<&R> {
        self.routes.get(&from, &to)
    }
}

impl<P: Display, R: Display> Display for Solution<P, R> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let groups = self
            .routes
            .keys()
            .map(|from| self.routes.values_for(from).join(",\n"))
            .join(",\n");
        write!(f, "{}\nroutes={{\n{groups}\n}};", self.placement)
    }
}

#[cfg(test)]
mod tests {
    use super::Solution;
    use crate::entities::{Placement, Route};

    fn placement() -> Placement {
        [(0, 1), (1, 1), (2, 0)].into_iter().collect()
    }

    #[test]
    fn renders_routes_grouped_by_origin() {
        let routes = vec![
            Route::new(2, 0, vec![1]),
            Route::direct(0, 1),
            Route::direct(2, 1),
        ];
        let solution = Solution::new(placement(), routes);
        let expected = "placement={\n(0,1),\n(1,1),\n(2,0)\n};\n\
                        routes={\n[2,1,0],\n[2,1],\n[0,1]\n};";
        assert_eq!(solution.to_string(), expected);
    }

    #[test]
    fn later_route_for_same_pair_wins() {
        let solution = Solution::new(
            placement(),
            vec![Route::direct(0, 3), Route::new(0, 3, vec![2])],
        );
        assert_eq!(solution.routes().len(), 1);
        assert_eq!(solution.route(0, 3), Some(&Route::new(0, 3, vec![2])));
    }

    #[test]
    fn empty_routing_table() {
        let solution: Solution = Solution::new(Placement::new(0), vec![]);
        assert_eq!(solution.to_string(), "placement={\n\n};\nroutes={\n\n};");
    }
}
