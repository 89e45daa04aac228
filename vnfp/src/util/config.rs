use serde::{Deserialize, Serialize};

/// Configuration of the network assembly.
/// The default configuration is lenient: it only rejects what the assembly cannot represent.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct AssemblyConfig {
    /// What to do with a server whose placement row does not mark any node
    #[serde(default)]
    pub unplaced_servers: UnplacedServerPolicy,
    /// Reject servers whose minimum power exceeds their maximum power
    #[serde(default)]
    pub check_power_bounds: bool,
}

impl AssemblyConfig {
    /// Rejects unplaced servers and inverted power bounds.
    pub fn strict() -> Self {
        Self {
            unplaced_servers: UnplacedServerPolicy::Reject,
            check_power_bounds: true,
        }
    }
}

/// Policy for servers that are not attached to any node.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum UnplacedServerPolicy {
    /// Leave the server out of the network
    #[default]
    Skip,
    /// Abort the assembly with an error
    Reject,
}
