//! Fixed enumeration of networking entity types a node may represent.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityType {
    /// Physical-layer event (link failure, optic degradation).
    PhysicalEvent,
    /// A concrete interface (GigabitEthernet1/1).
    Interface,
    /// Operational state of an interface (down, err-disabled).
    InterfaceState,
    /// A protocol (BGP, OSPF, LACP).
    Protocol,
    /// Discrete protocol event (session reset, adjacency loss).
    ProtocolEvent,
    /// Protocol behavior under a condition (PMTUD failure).
    ProtocolBehavior,
    /// Chassis, line card, optic, power supply.
    HardwareComponent,
    /// Vendor error/log code (%BGP-3-NOTIFICATION).
    ErrorCode,
    /// Configuration change event.
    ConfigEvent,
    /// Misconfiguration (MTU mismatch on trunk).
    ConfigError,
    /// A monitored metric.
    Metric,
    /// A sampled metric observation (high TCP retransmissions).
    SampledMetric,
    IpAddress,
    MacAddress,
    Asn,
}

impl EntityType {
    pub const COUNT: usize = 15;

    pub const ALL: [EntityType; 15] = [
        Self::PhysicalEvent,
        Self::Interface,
        Self::InterfaceState,
        Self::Protocol,
        Self::ProtocolEvent,
        Self::ProtocolBehavior,
        Self::HardwareComponent,
        Self::ErrorCode,
        Self::ConfigEvent,
        Self::ConfigError,
        Self::Metric,
        Self::SampledMetric,
        Self::IpAddress,
        Self::MacAddress,
        Self::Asn,
    ];

    /// Parse from the upper snake case name. ASCII case is ignored.
    pub fn from_str_name(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PhysicalEvent => "PHYSICAL_EVENT",
            Self::Interface => "INTERFACE",
            Self::InterfaceState => "INTERFACE_STATE",
            Self::Protocol => "PROTOCOL",
            Self::ProtocolEvent => "PROTOCOL_EVENT",
            Self::ProtocolBehavior => "PROTOCOL_BEHAVIOR",
            Self::HardwareComponent => "HARDWARE_COMPONENT",
            Self::ErrorCode => "ERROR_CODE",
            Self::ConfigEvent => "CONFIG_EVENT",
            Self::ConfigError => "CONFIG_ERROR",
            Self::Metric => "METRIC",
            Self::SampledMetric => "SAMPLED_METRIC",
            Self::IpAddress => "IP_ADDRESS",
            Self::MacAddress => "MAC_ADDRESS",
            Self::Asn => "ASN",
        }
    }
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
