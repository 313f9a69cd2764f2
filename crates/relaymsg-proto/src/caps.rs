//! IRCv3 capability definitions relevant to relayed messages.

/// Definition of a known IRCv3 capability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilityDef {
    /// Capability name (e.g., "draft/relaymsg")
    pub name: &'static str,
    /// Minimum CAP version that supports this capability (301 or 302)
    pub version: u32,
    /// Default value for capabilities that take parameters
    pub value: Option<&'static str>,
    /// Human-readable description
    pub description: &'static str,
}

impl CapabilityDef {
    /// Render the token shown in `CAP LS`.
    ///
    /// Capability values are a CAP 302 feature; older clients only see the name.
    pub fn ls_token(&self, cap_version: u32) -> String {
        match self.value {
            Some(value) if cap_version >= 302 => format!("{}={}", self.name, value),
            _ => self.name.to_string(),
        }
    }
}

/// The relay-message capability. The value is the nick separator clients must
/// use when relaying.
pub const RELAYMSG_CAP: CapabilityDef = CapabilityDef {
    name: "draft/relaymsg",
    version: 301,
    value: Some("/"),
    description: "Relay messages on behalf of external identities",
};

/// Capabilities that gate which tags a client receives on relayed messages.
pub const CAPABILITIES: &[CapabilityDef] = &[
    CapabilityDef {
        name: "message-tags",
        version: 301,
        value: None,
        description: "Receive IRCv3 message tags",
    },
    CapabilityDef {
        name: "server-time",
        version: 301,
        value: None,
        description: "Add time tag to messages (ISO 8601)",
    },
    RELAYMSG_CAP,
];

/// Look up a capability definition by name.
pub fn get_capability(name: &str) -> Option<&'static CapabilityDef> {
    CAPABILITIES.iter().find(|c| c.name == name)
}
