use crate::entities::{
    Component, Demand, Link, LinkField, Network, NetworkConfigError, NetworkGraph, Node, Server,
    ServiceChain,
};
use crate::io::NumericReader;
use crate::util::assertions::{array_has_len, matrix_has_shape};
use crate::util::{AssemblyConfig, UnplacedServerPolicy, assertions};
use anyhow::{Context, Result, ensure};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

/// Static (unmodifiable) representation of a VNF placement problem instance:
/// the counts and raw numeric tables exactly as they were read.
///
/// Shapes are checked by [`Instance::is_valid`], values are only checked when they are used
/// by [`Instance::assemble_network`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instance {
    n_servers: i64,
    n_components: i64,
    n_resources: i64,
    n_nodes: i64,
    n_chains: i64,
    /// `max_power[server]`
    max_power: Vec<f64>,
    /// `min_power[server]`, power drawn by an idle server
    min_power: Vec<f64>,
    /// `requirements[resource][component]`
    requirements: Vec<Vec<f64>>,
    /// `resource_availability[resource][server]`
    resource_availability: Vec<Vec<f64>>,
    /// `server_placement[server][node]`, one-hot row per server
    server_placement: Vec<Vec<f64>>,
    /// `service_chain_membership[chain][component]`
    service_chain_membership: Vec<Vec<f64>>,
    /// `node_power[node]`
    node_power: Vec<f64>,
    /// Rows of `[node1, node2, bandwidth, power, delay]`, node ids are 1-based
    edges: Vec<Vec<f64>>,
    /// Rows of `[component1, component2, bandwidth]`, component ids are 1-based
    vnf_demands: Vec<Vec<f64>>,
    /// `maximal_latency[chain]`
    maximal_latency: Vec<f64>,
}

impl Instance {
    /// Reads all tables from `reader`, in their fixed order.
    /// The reader is consumed and dropped on every exit path.
    pub fn read(mut reader: impl NumericReader) -> Result<Instance> {
        let mut count = |name: &str| -> Result<i64> {
            let value = reader
                .scalar()
                .with_context(|| format!("could not read {name}"))?;
            Ok(value as i64)
        };
        let n_servers = count("number of servers")?;
        let n_components = count("number of components")?;
        let n_resources = count("number of resources")?;
        let n_nodes = count("number of nodes")?;
        let n_chains = count("number of service chains")?;

        let instance = Instance {
            n_servers,
            n_components,
            n_resources,
            n_nodes,
            n_chains,
            max_power: reader.array().context("could not read max power")?,
            min_power: reader.array().context("could not read min power")?,
            requirements: reader.matrix().context("could not read requirements")?,
            resource_availability: reader
                .matrix()
                .context("could not read resource availability")?,
            server_placement: reader.matrix().context("could not read server placement")?,
            service_chain_membership: reader
                .matrix()
                .context("could not read service chains")?,
            node_power: reader.array().context("could not read node power")?,
            edges: reader.matrix().context("could not read edges")?,
            vnf_demands: reader.matrix().context("could not read vnf demands")?,
            maximal_latency: reader.array().context("could not read maximal latency")?,
        };

        debug!(
            "[READ] instance with {} servers, {} components, {} resources, {} nodes, {} chains, {} edges, {} demands",
            instance.n_servers,
            instance.n_components,
            instance.n_resources,
            instance.n_nodes,
            instance.n_chains,
            instance.edges.len(),
            instance.vnf_demands.len()
        );

        Ok(instance)
    }

    /// True if all counts are positive and every table has the shape its counts imply.
    /// Does not check the values inside the tables.
    pub fn is_valid(&self) -> bool {
        let (s, v, r, n, c) = (
            self.n_servers,
            self.n_components,
            self.n_resources,
            self.n_nodes,
            self.n_chains,
        );

        if s <= 0 || v <= 0 || r <= 0 || c <= 0 {
            return false;
        }

        array_has_len(&self.max_power, s)
            && array_has_len(&self.min_power, s)
            && array_has_len(&self.node_power, n)
            && array_has_len(&self.maximal_latency, c)
            && matrix_has_shape(&self.requirements, Some(r), v)
            && matrix_has_shape(&self.resource_availability, Some(r), s)
            && matrix_has_shape(&self.server_placement, Some(s), n)
            && matrix_has_shape(&self.service_chain_membership, Some(c), v)
            && matrix_has_shape(&self.edges, None, 5)
            && matrix_has_shape(&self.vnf_demands, None, 3)
    }

    /// Assembles the network with the default (lenient) [`AssemblyConfig`].
    pub fn assemble_network(&self) -> Result<Network, NetworkConfigError> {
        self.assemble_network_with(&AssemblyConfig::default())
    }

    pub fn assemble_network_with(
        &self,
        config: &AssemblyConfig,
    ) -> Result<Network, NetworkConfigError> {
        let network: Network = self.assemble_into(config)?;
        debug_assert!(assertions::network_matches_instance(&network, self));
        Ok(network)
    }

    /// Registers all nodes, links and servers of the instance into a fresh graph.
    ///
    /// Fails on the first value that is out of range or refused by the graph;
    /// no partially assembled graph is ever returned.
    /// Servers whose placement row marks no node are handled according to `config`.
    pub fn assemble_into<G: NetworkGraph>(
        &self,
        config: &AssemblyConfig,
    ) -> Result<G, NetworkConfigError> {
        let n_nodes = as_capacity(self.n_nodes, "n_nodes", self.node_power.len())?;
        let server_rows = [
            self.min_power.len(),
            self.max_power.len(),
            self.server_placement.len(),
        ];
        let n_servers = as_capacity(
            self.n_servers,
            "n_servers",
            server_rows.into_iter().min().unwrap_or(0),
        )?;
        let mut graph = G::with_capacity(n_nodes, n_servers);

        for (id, &power) in self.node_power.iter().enumerate() {
            if power < 0.0 {
                return Err(NetworkConfigError::NegativeNodePower { node: id, power });
            }
            graph
                .add_node(Node { id, power })
                .map_err(|reason| NetworkConfigError::NodeRejected { node: id, reason })?;
        }

        for (edge, row) in self.edges.iter().enumerate() {
            let &[n1, n2, bandwidth, power, delay] = row.as_slice() else {
                return Err(NetworkConfigError::MalformedInstance {
                    table: "edges",
                    index: edge,
                });
            };
            // 1-based to 0-based
            let (node1, node2) = ((n1 as i64).saturating_sub(1), (n2 as i64).saturating_sub(1));

            for (field, value) in [
                (LinkField::Bandwidth, bandwidth),
                (LinkField::Power, power),
                (LinkField::Delay, delay),
            ] {
                if value < 0.0 {
                    return Err(NetworkConfigError::NegativeLinkValue { edge, field, value });
                }
            }

            let (Ok(node1), Ok(node2)) = (usize::try_from(node1), usize::try_from(node2)) else {
                return Err(NetworkConfigError::InvalidLinkEndpoints { edge, node1, node2 });
            };

            let link = Link {
                node1,
                node2,
                bandwidth,
                power,
                delay,
            };
            graph
                .add_link(link)
                .map_err(|reason| NetworkConfigError::LinkRejected {
                    edge,
                    node1,
                    node2,
                    reason,
                })?;
        }

        let mut n_skipped = 0;
        for id in 0..n_servers {
            let (min_power, max_power) = match (self.min_power.get(id), self.max_power.get(id)) {
                (Some(&min), Some(&max)) => (min, max),
                _ => {
                    return Err(NetworkConfigError::MalformedInstance {
                        table: "min_power/max_power",
                        index: id,
                    });
                }
            };
            if min_power < 0.0 || max_power < 0.0 {
                return Err(NetworkConfigError::NegativeServerPower {
                    server: id,
                    min_power,
                    max_power,
                });
            }

            let resources = self.server_resources(id)?;

            let placement_row =
                self.server_placement
                    .get(id)
                    .ok_or(NetworkConfigError::MalformedInstance {
                        table: "server_placement",
                        index: id,
                    })?;

            let Some(node) = attached_node(placement_row) else {
                match config.unplaced_servers {
                    UnplacedServerPolicy::Skip => {
                        warn!("[ASSEMBLY] server {id} is not attached to any node, leaving it out");
                        n_skipped += 1;
                        continue;
                    }
                    UnplacedServerPolicy::Reject => {
                        return Err(NetworkConfigError::UnplacedServer { server: id });
                    }
                }
            };

            if config.check_power_bounds && min_power > max_power {
                return Err(NetworkConfigError::InvertedPowerBounds {
                    server: id,
                    min_power,
                    max_power,
                });
            }

            let server = Server {
                id,
                min_power,
                max_power,
                node,
                resources,
            };
            graph
                .connect_server(server)
                .map_err(|reason| NetworkConfigError::ServerRejected {
                    server: id,
                    node,
                    reason,
                })?;
        }

        info!(
            "[ASSEMBLY] network assembled: {} nodes, {} links, {} servers ({} left out)",
            self.node_power.len(),
            self.edges.len(),
            n_servers - n_skipped,
            n_skipped
        );

        Ok(graph)
    }

    /// Column `server` of the resource availability table
    fn server_resources(&self, server: usize) -> Result<Vec<f64>, NetworkConfigError> {
        self.resource_availability
            .iter()
            .enumerate()
            .map(|(resource, row)| match row.get(server) {
                None => Err(NetworkConfigError::MalformedInstance {
                    table: "resource_availability",
                    index: resource,
                }),
                Some(&amount) if amount < 0.0 => Err(NetworkConfigError::NegativeResource {
                    server,
                    resource,
                    amount,
                }),
                Some(&amount) => Ok(amount),
            })
            .collect()
    }

    /// All components with their resource requirements, in ascending id order.
    pub fn components(&self) -> Result<Vec<Component>> {
        ensure!(self.is_valid(), "components requested from a malformed instance");
        let components = (0..self.n_components as usize)
            .map(|id| Component {
                id,
                requirements: self.requirements.iter().map(|row| row[id]).collect(),
            })
            .collect();
        Ok(components)
    }

    /// The service chains, each containing its member components in ascending id order.
    pub fn service_chains(&self) -> Result<Vec<ServiceChain>> {
        let components = self.components()?;
        let chains = self
            .service_chain_membership
            .iter()
            .zip(&self.maximal_latency)
            .map(|(membership, &latency)| {
                let mut chain = ServiceChain::new(latency);
                membership
                    .iter()
                    .zip(&components)
                    .filter(|(m, _)| **m as i64 == 1)
                    .for_each(|(_, c)| chain.add_component(c.clone()));
                chain
            })
            .collect();
        Ok(chains)
    }

    /// The bandwidth demands between components, with 0-based component ids.
    pub fn demands(&self) -> Result<Vec<Demand>> {
        ensure!(self.is_valid(), "demands requested from a malformed instance");
        self.vnf_demands
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let from = (row[0] as i64).saturating_sub(1);
                let to = (row[1] as i64).saturating_sub(1);
                let bandwidth = row[2];
                ensure!(
                    (0..self.n_components).contains(&from) && (0..self.n_components).contains(&to),
                    "demand {i} refers to unknown components {} and {}",
                    row[0],
                    row[1]
                );
                ensure!(bandwidth >= 0.0, "demand {i} has negative bandwidth {bandwidth}");
                Ok(Demand {
                    from: from as usize,
                    to: to as usize,
                    bandwidth,
                })
            })
            .collect()
    }

    pub fn n_servers(&self) -> i64 {
        self.n_servers
    }

    pub fn n_components(&self) -> i64 {
        self.n_components
    }

    pub fn n_resources(&self) -> i64 {
        self.n_resources
    }

    pub fn n_nodes(&self) -> i64 {
        self.n_nodes
    }

    pub fn n_chains(&self) -> i64 {
        self.n_chains
    }

    pub fn max_power(&self) -> &[f64] {
        &self.max_power
    }

    pub fn min_power(&self) -> &[f64] {
        &self.min_power
    }

    pub fn requirements(&self) -> &[Vec<f64>] {
        &self.requirements
    }

    pub fn resource_availability(&self) -> &[Vec<f64>] {
        &self.resource_availability
    }

    pub fn server_placement(&self) -> &[Vec<f64>] {
        &self.server_placement
    }

    pub fn service_chain_membership(&self) -> &[Vec<f64>] {
        &self.service_chain_membership
    }

    pub fn node_power(&self) -> &[f64] {
        &self.node_power
    }

    pub fn edges(&self) -> &[Vec<f64>] {
        &self.edges
    }

    pub fn vnf_demands(&self) -> &[Vec<f64>] {
        &self.vnf_demands
    }

    pub fn maximal_latency(&self) -> &[f64] {
        &self.maximal_latency
    }
}

/// `count` as a graph capacity, provided it is not negative and at most `rows` entries back it.
/// Otherwise `index` points at the first missing entry.
fn as_capacity(count: i64, table: &'static str, rows: usize) -> Result<usize, NetworkConfigError> {
    match usize::try_from(count) {
        Ok(count) if count <= rows => Ok(count),
        Ok(_) => Err(NetworkConfigError::MalformedInstance { table, index: rows }),
        Err(_) => Err(NetworkConfigError::MalformedInstance { table, index: 0 }),
    }
}

/// The node a server is attached to: the first column of its placement row holding a 1.
/// `None` if the row marks no node.
fn attached_node(placement_row: &[f64]) -> Option<usize> {
    placement_row.iter().position(|&v| v as i64 == 1)
}

#[cfg(test)]
mod tests {
    use super::{Instance, attached_node};
    use crate::entities::{LinkField, NetworkConfigError, Refusal};
    use crate::util::{AssemblyConfig, UnplacedServerPolicy};

    /// 2 servers, 1 component, 1 resource, 2 nodes, 1 chain
    fn two_node_instance() -> Instance {
        Instance {
            n_servers: 2,
            n_components: 1,
            n_resources: 1,
            n_nodes: 2,
            n_chains: 1,
            max_power: vec![10.0, 10.0],
            min_power: vec![0.0, 0.0],
            requirements: vec![vec![2.0]],
            resource_availability: vec![vec![5.0, 5.0]],
            server_placement: vec![vec![1.0, 0.0], vec![0.0, 1.0]],
            service_chain_membership: vec![vec![1.0]],
            node_power: vec![0.0, 0.0],
            edges: vec![vec![1.0, 2.0, 10.0, 0.0, 1.0]],
            vnf_demands: vec![],
            maximal_latency: vec![4.0],
        }
    }

    #[test]
    fn non_positive_counts_are_invalid() {
        assert!(two_node_instance().is_valid());

        let mutations: [fn(&mut Instance); 4] = [
            |i| i.n_servers = 0,
            |i| i.n_components = -1,
            |i| i.n_resources = 0,
            |i| i.n_chains = 0,
        ];
        for mutate in mutations {
            let mut instance = two_node_instance();
            mutate(&mut instance);
            assert!(!instance.is_valid());
        }
    }

    #[test]
    fn wrong_shapes_are_invalid() {
        let mutations: [fn(&mut Instance); 10] = [
            |i| i.max_power.push(1.0),
            |i| i.min_power.clear(),
            |i| {
                i.node_power.pop();
            },
            |i| i.maximal_latency.push(2.0),
            |i| i.requirements[0].push(1.0),
            |i| i.resource_availability.push(vec![1.0, 1.0]),
            |i| {
                i.server_placement[1].pop();
            },
            |i| i.service_chain_membership.clear(),
            |i| i.edges.push(vec![1.0, 2.0, 3.0, 4.0]),
            |i| i.vnf_demands.push(vec![1.0, 1.0, 1.0, 1.0]),
        ];
        for mutate in mutations {
            let mut instance = two_node_instance();
            mutate(&mut instance);
            assert!(!instance.is_valid());
        }
    }

    #[test]
    fn negative_node_count_is_invalid() {
        let mut instance = two_node_instance();
        instance.n_nodes = -2;
        assert!(!instance.is_valid());
        assert!(matches!(
            instance.assemble_network(),
            Err(NetworkConfigError::MalformedInstance { .. })
        ));
    }

    #[test]
    fn oversized_counts_are_malformed() {
        let mut instance = two_node_instance();
        instance.n_servers = 1e300 as i64;
        assert!(!instance.is_valid());
        assert_eq!(
            instance.assemble_network().unwrap_err(),
            NetworkConfigError::MalformedInstance {
                table: "n_servers",
                index: 2
            }
        );

        let mut instance = two_node_instance();
        instance.n_nodes = 3;
        assert_eq!(
            instance.assemble_network().unwrap_err(),
            NetworkConfigError::MalformedInstance {
                table: "n_nodes",
                index: 2
            }
        );
    }

    #[test]
    fn surplus_node_is_rejected_by_graph() {
        let mut instance = two_node_instance();
        instance.node_power.push(1.0);
        assert_eq!(
            instance.assemble_network().unwrap_err(),
            NetworkConfigError::NodeRejected {
                node: 2,
                reason: Refusal::CapacityExhausted { capacity: 2 }
            }
        );
    }

    #[test]
    fn server_at_unregistered_node_is_rejected_by_graph() {
        let mut instance = two_node_instance();
        instance.server_placement[1] = vec![0.0, 0.0, 1.0];
        assert_eq!(
            instance.assemble_network().unwrap_err(),
            NetworkConfigError::ServerRejected {
                server: 1,
                node: 2,
                reason: Refusal::UnknownNode(2)
            }
        );
    }

    #[test]
    fn assembles_two_node_scenario() {
        let network = two_node_instance().assemble_network().unwrap();
        assert_eq!(network.n_nodes(), 2);
        assert_eq!(network.n_links(), 1);
        assert!(network.link_between(0, 1).is_some());
        assert_eq!(network.n_servers(), 2);
        assert_eq!(network.server(0).unwrap().node, 0);
        assert_eq!(network.server(1).unwrap().node, 1);
        assert_eq!(network.server(1).unwrap().resources, vec![5.0]);
    }

    #[test]
    fn negative_link_values_name_the_field() {
        for (column, field) in [
            (2, LinkField::Bandwidth),
            (3, LinkField::Power),
            (4, LinkField::Delay),
        ] {
            let mut instance = two_node_instance();
            instance.edges[0][column] = -1.0;
            assert_eq!(
                instance.assemble_network().unwrap_err(),
                NetworkConfigError::NegativeLinkValue {
                    edge: 0,
                    field,
                    value: -1.0
                }
            );
        }
    }

    #[test]
    fn zero_based_endpoint_is_invalid() {
        let mut instance = two_node_instance();
        instance.edges[0][0] = 0.0;
        assert_eq!(
            instance.assemble_network().unwrap_err(),
            NetworkConfigError::InvalidLinkEndpoints {
                edge: 0,
                node1: -1,
                node2: 1
            }
        );
    }

    #[test]
    fn unknown_endpoint_is_refused_by_graph() {
        let mut instance = two_node_instance();
        instance.edges[0][1] = 3.0;
        assert_eq!(
            instance.assemble_network().unwrap_err(),
            NetworkConfigError::LinkRejected {
                edge: 0,
                node1: 0,
                node2: 2,
                reason: Refusal::UnknownNode(2)
            }
        );
    }

    #[test]
    fn strict_config_rejects_what_lenient_skips() {
        let mut instance = two_node_instance();
        instance.server_placement[0] = vec![0.0, 0.0];
        instance.min_power[1] = 20.0;

        let network = instance.assemble_network().unwrap();
        assert_eq!(network.n_servers(), 1);

        let reject_unplaced = AssemblyConfig {
            unplaced_servers: UnplacedServerPolicy::Reject,
            ..AssemblyConfig::default()
        };
        assert_eq!(
            instance.assemble_network_with(&reject_unplaced).unwrap_err(),
            NetworkConfigError::UnplacedServer { server: 0 }
        );

        assert_eq!(
            instance
                .assemble_network_with(&AssemblyConfig::strict())
                .unwrap_err(),
            NetworkConfigError::UnplacedServer { server: 0 }
        );

        instance.server_placement[0] = vec![1.0, 0.0];
        assert_eq!(
            instance
                .assemble_network_with(&AssemblyConfig::strict())
                .unwrap_err(),
            NetworkConfigError::InvertedPowerBounds {
                server: 1,
                min_power: 20.0,
                max_power: 10.0
            }
        );
    }

    #[test]
    fn attached_node_is_first_one() {
        assert_eq!(attached_node(&[0.0, 1.0, 1.0]), Some(1));
        assert_eq!(attached_node(&[0.0, 0.0, 0.0]), None);
        assert_eq!(attached_node(&[2.0, 0.5, 1.9]), Some(2));
        assert_eq!(attached_node(&[]), None);
    }

    #[test]
    fn derived_views() {
        let mut instance = two_node_instance();
        instance.n_components = 3;
        instance.requirements = vec![vec![1.0, 2.0, 3.0]];
        instance.service_chain_membership = vec![vec![1.0, 0.0, 1.0]];
        instance.vnf_demands = vec![vec![1.0, 3.0, 4.5]];

        let chains = instance.service_chains().unwrap();
        assert_eq!(chains.len(), 1);
        assert_eq!(chains[0].latency(), 4.0);
        assert_eq!(
            chains[0].iter().map(|c| c.id).collect::<Vec<_>>(),
            vec![0, 2]
        );
        assert_eq!(chains[0].components()[1].requirements, vec![3.0]);

        let demands = instance.demands().unwrap();
        assert_eq!((demands[0].from, demands[0].to), (0, 2));
        assert_eq!(demands[0].bandwidth, 4.5);

        instance.vnf_demands = vec![vec![1.0, 4.0, 4.5]];
        assert!(instance.demands().is_err());
    }
}
