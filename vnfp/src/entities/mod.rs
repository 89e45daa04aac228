mod demand;
mod error;
mod instance;
mod network;
mod placement;
mod route;
mod service_chain;
mod solution;

#[doc(inline)]
pub use instance::Instance;

#[doc(inline)]
pub use error::NetworkConfigError;

#[doc(inline)]
pub use error::LinkField;

#[doc(inline)]
pub use network::Network;

#[doc(inline)]
pub use network::NetworkGraph;

#[doc(inline)]
pub use network::Refusal;

#[doc(inline)]
pub use network::{Link, LinkKey, Node, Server};

#[doc(inline)]
pub use service_chain::{Component, ServiceChain};

#[doc(inline)]
pub use demand::Demand;

#[doc(inline)]
pub use placement::Placement;

#[doc(inline)]
pub use route::{Route, Routed};

#[doc(inline)]
pub use solution::Solution;
