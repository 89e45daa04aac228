use itertools::Itertools;
use std::fmt::{Display, Formatter};

/// Assignment of VNF components to servers, indexed by component id.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Placement {
    servers: Vec<Option<usize>>,
}

impl Placement {
    /// Creates a placement for `n_components` components, none of them assigned
    pub fn new(n_components: usize) -> Self {
        Self {
            servers: vec![None; n_components],
        }
    }

    /// Assigns `component` to `server`, returning the server it was previously assigned to.
    /// The placement grows to hold `component` if needed.
    ///
    /// # Panics
    /// If no slot can be allocated for `component`, which includes `component == usize::MAX`.
    pub fn assign(&mut self, component: usize, server: usize) -> Option<usize> {
        if component >= self.servers.len() {
            let len = component
                .checked_add(1)
                .unwrap_or_else(|| panic!("no slot can be allocated for component {component}"));
            self.servers.resize(len, None);
        }
        self.servers[component].replace(server)
    }

    /// Removes the assignment of `component`, returning the server it was assigned to.
    pub fn unassign(&mut self, component: usize) -> Option<usize> {
        self.servers.get_mut(component)?.take()
    }

    pub fn server_of(&self, component: usize) -> Option<usize> {
        self.servers.get(component).copied().flatten()
    }

    /// All `(component, server)` pairs, in ascending component order
    pub fn assignments(&self) -> impl Iterator<Item = (usize, usize)> {
        self.servers
            .iter()
            .enumerate()
            .filter_map(|(c, s)| s.map(|s| (c, s)))
    }

    /// Components assigned to `server`
    pub fn components_on(&self, server: usize) -> impl Iterator<Item = usize> {
        self.assignments()
            .filter(move |(_, s)| *s == server)
            .map(|(c, _)| c)
    }

    pub fn n_components(&self) -> usize {
        self.servers.len()
    }

    pub fn n_assigned(&self) -> usize {
        self.assignments().count()
    }

    /// True if every component is assigned to a server
    pub fn is_complete(&self) -> bool {
        self.servers.iter().all(Option::is_some)
    }
}

impl FromIterator<(usize, usize)> for Placement {
    fn from_iter<T: IntoIterator<Item = (usize, usize)>>(iter: T) -> Self {
        let mut placement = Placement::default();
        for (component, server) in iter {
            placement.assign(component, server);
        }
        placement
    }
}

impl Display for Placement {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let pairs = self
            .assignments()
            .map(|(c, s)| format!("({c},{s})"))
            .join(",\n");
        write!(f, "placement={{\n{pairs}\n}};")
    }
}
