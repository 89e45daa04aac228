use crate::entities::Refusal;
use thiserror::Error;

/// Fatal error raised while assembling a [`Network`](crate::entities::Network) from an
/// [`Instance`](crate::entities::Instance).
/// Every message carries the `[Network:Conf]` tag.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NetworkConfigError {
    #[error("[Network:Conf] Power consumption can't be negative (node {node}: {power})")]
    NegativeNodePower { node: usize, power: f64 },

    #[error("[Network:Conf] Can't add any more nodes (node {node}: {reason})")]
    NodeRejected { node: usize, reason: Refusal },

    #[error("[Network:Conf] {field} can't be negative (edge {edge}: {value})")]
    NegativeLinkValue {
        edge: usize,
        field: LinkField,
        value: f64,
    },

    #[error("[Network:Conf] Invalid node indexes for link: edge {edge} connects {node1} and {node2}")]
    InvalidLinkEndpoints { edge: usize, node1: i64, node2: i64 },

    #[error(
        "[Network:Conf] Invalid node indexes for link: edge {edge} connects {node1} and {node2} ({reason})"
    )]
    LinkRejected {
        edge: usize,
        node1: usize,
        node2: usize,
        reason: Refusal,
    },

    #[error(
        "[Network:Conf] Power consumption can't be negative (server {server}: min {min_power}, max {max_power})"
    )]
    NegativeServerPower {
        server: usize,
        min_power: f64,
        max_power: f64,
    },

    #[error("[Network:Conf] Resource need can't be negative (server {server}, resource {resource}: {amount})")]
    NegativeResource {
        server: usize,
        resource: usize,
        amount: f64,
    },

    #[error("[Network:Conf] Server {server} is not attached to any node")]
    UnplacedServer { server: usize },

    #[error(
        "[Network:Conf] Server {server} draws more power idle than at full load (min {min_power}, max {max_power})"
    )]
    InvertedPowerBounds {
        server: usize,
        min_power: f64,
        max_power: f64,
    },

    #[error("[Network:Conf] Server configured badly (server {server} on node {node}: {reason})")]
    ServerRejected {
        server: usize,
        node: usize,
        reason: Refusal,
    },

    #[error("[Network:Conf] Table {table} has no entry at {index}")]
    MalformedInstance { table: &'static str, index: usize },
}

/// Numeric attribute of a link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkField {
    Bandwidth,
    Power,
    Delay,
}

impl std::fmt::Display for LinkField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            LinkField::Bandwidth => "Bandwidth",
            LinkField::Power => "Power consumption",
            LinkField::Delay => "Delay",
        };
        f.write_str(name)
    }
}
