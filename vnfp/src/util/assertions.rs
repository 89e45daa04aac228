use crate::entities::{Instance, Network};
//Various checks to verify correctness of the state of the system
//Also used in debug_assert!() blocks

/// True if `array` holds exactly `len` values. A negative `len` never matches.
pub fn array_has_len(array: &[f64], len: i64) -> bool {
    usize::try_from(len).is_ok_and(|len| array.len() == len)
}

/// True if every row of `matrix` holds exactly `cols` values and, if `rows` is defined,
/// `matrix` holds exactly `rows` rows. Negative dimensions never match.
pub fn matrix_has_shape(matrix: &[Vec<f64>], rows: Option<i64>, cols: i64) -> bool {
    if let Some(rows) = rows {
        if !usize::try_from(rows).is_ok_and(|rows| matrix.len() == rows) {
            return false;
        }
    }
    matrix.iter().all(|row| array_has_len(row, cols))
}

/// Verifies that a network contains exactly what was derived from the instance:
/// every node, every edge, and every server with its resources and the node its placement row marks.
pub fn network_matches_instance(network: &Network, instance: &Instance) -> bool {
    let nodes_match = network.n_nodes() == instance.node_power().len()
        && network
            .nodes()
            .all(|n| identical(instance.node_power()[n.id], n.power));

    let links_match = network.n_links() == instance.edges().len()
        && network.links().zip(instance.edges()).all(|((_, l), e)| {
            l.node1 as f64 == e[0].trunc() - 1.0
                && l.node2 as f64 == e[1].trunc() - 1.0
                && [l.bandwidth, l.power, l.delay]
                    .iter()
                    .zip(&e[2..5])
                    .all(|(a, b)| identical(*a, *b))
        });

    let servers_match = network.servers().all(|s| {
        let placement_row = &instance.server_placement()[s.id];
        placement_row[s.node].trunc() == 1.0
            && placement_row[..s.node].iter().all(|v| v.trunc() != 1.0)
            && s.resources.len() == instance.resource_availability().len()
            && s.resources
                .iter()
                .zip(instance.resource_availability())
                .all(|(r, row)| identical(*r, row[s.id]))
    });

    nodes_match && links_match && servers_match
}

/// Bitwise equality, values are copied from the instance without arithmetic
fn identical(a: f64, b: f64) -> bool {
    a.to_bits() == b.to_bits()
}
