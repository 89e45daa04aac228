/// Bandwidth demanded between two VNF components (0-based component ids)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Demand {
    pub from: usize,
    pub to: usize,
    pub bandwidth: f64,
}
