use crate::IdFormat;

/// Environment variable consulted by [`RegistryConfig::from_env`].
pub const NODE_ID_ENV: &str = "POLYFLAKE_NODE_ID";

/// Settings for a [`Registry`](crate::Registry).
///
/// Uniqueness across a fleet depends on every live process using a distinct
/// default node id. When none is configured, the registry draws a random one,
/// which is fine for a handful of processes but offers no guarantee.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Node id served by [`Registry::default_instance`](crate::Registry::default_instance).
    pub default_node_id: Option<u64>,
}

impl RegistryConfig {
    pub const fn with_default_node_id(node_id: u64) -> Self {
        Self {
            default_node_id: Some(node_id),
        }
    }

    /// Reads [`NODE_ID_ENV`] from the process environment.
    ///
    /// Unset, unparsable or out-of-range values leave the default node id
    /// unset.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`Self::from_env`] but reads variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let default_node_id = lookup(NODE_ID_ENV).and_then(|raw| {
            let parsed = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|node_id| *node_id <= IdFormat::MAX_NODE_ID);
            if parsed.is_none() {
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    value = raw.as_str(),
                    max = IdFormat::MAX_NODE_ID,
                    "ignoring invalid {NODE_ID_ENV}"
                );
            }
            parsed
        });

        Self { default_node_id }
    }
}
