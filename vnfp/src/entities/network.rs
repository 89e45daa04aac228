use slotmap::{SlotMap, new_key_type};
use thiserror::Error;

new_key_type! {
    /// Unique key for each [`Link`] registered in a [`Network`]
    pub struct LinkKey;
}

/// Vertex of the physical network
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    pub id: usize,
    /// Power drawn by the node when active
    pub power: f64,
}

/// Undirected edge of the physical network
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub node1: usize,
    pub node2: usize,
    pub bandwidth: f64,
    /// Power drawn by the link when active
    pub power: f64,
    pub delay: f64,
}

impl Link {
    /// True if the link connects `a` and `b`, in either direction
    pub fn connects(&self, a: usize, b: usize) -> bool {
        (self.node1 == a && self.node2 == b) || (self.node1 == b && self.node2 == a)
    }

    /// The endpoint opposite to `node`, if `node` is an endpoint of this link
    pub fn other_end(&self, node: usize) -> Option<usize> {
        match node {
            n if n == self.node1 => Some(self.node2),
            n if n == self.node2 => Some(self.node1),
            _ => None,
        }
    }
}

/// Resource-bounded compute unit attached to a single node
#[derive(Debug, Clone, PartialEq)]
pub struct Server {
    pub id: usize,
    /// Power drawn when idle
    pub min_power: f64,
    /// Power drawn at full load
    pub max_power: f64,
    /// The node the server is attached to
    pub node: usize,
    /// Available amount of every resource kind
    pub resources: Vec<f64>,
}

/// Reason a [`NetworkGraph`] refuses a registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Refusal {
    #[error("all {capacity} slots are taken")]
    CapacityExhausted { capacity: usize },
    #[error("node {0} is already registered")]
    DuplicateNode(usize),
    #[error("node {0} is not registered")]
    UnknownNode(usize),
    #[error("server {0} is already connected")]
    DuplicateServer(usize),
}

/// Accumulating graph structure which nodes, links and servers are registered into.
/// Every registration either succeeds or reports why it was refused; refusals leave the graph unchanged.
pub trait NetworkGraph: Sized {
    /// Creates an empty graph with room for `n_nodes` nodes and `n_servers` servers
    fn with_capacity(n_nodes: usize, n_servers: usize) -> Self;

    fn add_node(&mut self, node: Node) -> Result<(), Refusal>;

    fn add_link(&mut self, link: Link) -> Result<(), Refusal>;

    fn connect_server(&mut self, server: Server) -> Result<(), Refusal>;
}

/// Physical network: nodes and servers are stored in fixed slots indexed by their id,
/// links are stored in a [`SlotMap`].
#[derive(Debug, Clone)]
pub struct Network {
    nodes: Vec<Option<Node>>,
    links: SlotMap<LinkKey, Link>,
    servers: Vec<Option<Server>>,
}

impl Network {
    pub fn node(&self, id: usize) -> Option<&Node> {
        self.nodes.get(id)?.as_ref()
    }

    /// All registered nodes, in ascending id order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().flatten()
    }

    pub fn n_nodes(&self) -> usize {
        self.nodes().count()
    }

    /// All registered links, in registration order
    pub fn links(&self) -> impl Iterator<Item = (LinkKey, &Link)> {
        self.links.iter()
    }

    pub fn link(&self, key: LinkKey) -> Option<&Link> {
        self.links.get(key)
    }

    pub fn n_links(&self) -> usize {
        self.links.len()
    }

    /// The first registered link between `a` and `b`, in either direction
    pub fn link_between(&self, a: usize, b: usize) -> Option<&Link> {
        self.links.values().find(|l| l.connects(a, b))
    }

    /// Links that have `node` as one of their endpoints
    pub fn incident_links(&self, node: usize) -> impl Iterator<Item = (LinkKey, &Link)> {
        self.links
            .iter()
            .filter(move |(_, l)| l.other_end(node).is_some())
    }

    /// Nodes reachable from `node` over a single link
    pub fn neighbours(&self, node: usize) -> impl Iterator<Item = usize> {
        self.incident_links(node)
            .filter_map(move |(_, l)| l.other_end(node))
    }

    pub fn server(&self, id: usize) -> Option<&Server> {
        self.servers.get(id)?.as_ref()
    }

    /// All connected servers, in ascending id order
    pub fn servers(&self) -> impl Iterator<Item = &Server> {
        self.servers.iter().flatten()
    }

    pub fn n_servers(&self) -> usize {
        self.servers().count()
    }

    /// Servers attached to `node`
    pub fn servers_at(&self, node: usize) -> impl Iterator<Item = &Server> {
        self.servers().filter(move |s| s.node == node)
    }

    pub fn node_capacity(&self) -> usize {
        self.nodes.len()
    }

    pub fn server_capacity(&self) -> usize {
        self.servers.len()
    }
}

impl NetworkGraph for Network {
    fn with_capacity(n_nodes: usize, n_servers: usize) -> Self {
        Network {
            nodes: vec![None; n_nodes],
            links: SlotMap::with_key(),
            servers: vec![None; n_servers],
        }
    }

    fn add_node(&mut self, node: Node) -> Result<(), Refusal> {
        let capacity = self.nodes.len();
        match self.nodes.get_mut(node.id) {
            None => Err(Refusal::CapacityExhausted { capacity }),
            Some(Some(_)) => Err(Refusal::DuplicateNode(node.id)),
            Some(slot) => {
                *slot = Some(node);
                Ok(())
            }
        }
    }

    fn add_link(&mut self, link: Link) -> Result<(), Refusal> {
        for n in [link.node1, link.node2] {
            if self.node(n).is_none() {
                return Err(Refusal::UnknownNode(n));
            }
        }
        self.links.insert(link);
        Ok(())
    }

    fn connect_server(&mut self, server: Server) -> Result<(), Refusal> {
        if self.node(server.node).is_none() {
            return Err(Refusal::UnknownNode(server.node));
        }
        let capacity = self.servers.len();
        match self.servers.get_mut(server.id) {
            None => Err(Refusal::CapacityExhausted { capacity }),
            Some(Some(_)) => Err(Refusal::DuplicateServer(server.id)),
            Some(slot) => {
                *slot = Some(server);
                Ok(())
            }
        }
    }
}
