/// A virtual network function instance with its resource demand
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    pub id: usize,
    /// Demanded amount of every resource kind
    pub requirements: Vec<f64>,
}

/// Ordered sequence of [`Component`]s with a maximum end-to-end latency budget.
/// Components can only be appended.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceChain {
    components: Vec<Component>,
    latency: f64,
}

impl ServiceChain {
    pub fn new(latency: f64) -> Self {
        Self {
            components: vec![],
            latency,
        }
    }

    /// Appends a component to the back of the chain
    pub fn add_component(&mut self, component: Component) {
        self.components.push(component);
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Maximum permitted latency of the chain
    pub fn latency(&self) -> f64 {
        self.latency
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Components in chain order, front to back
    pub fn iter(&self) -> std::slice::Iter<'_, Component> {
        self.components.iter()
    }
}

impl<'a> IntoIterator for &'a ServiceChain {
    type Item = &'a Component;
    type IntoIter = std::slice::Iter<'a, Component>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
