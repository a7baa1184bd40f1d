use std::{
    collections::HashMap,
    sync::{Arc, OnceLock},
};

use parking_lot::RwLock;
use rand::Rng;

use crate::{
    IdFormat, IdGenerator, RegistryConfig, Result, TickClock, TimeSource, WallClock,
    generator::lock::validate_node_id,
};

/// Hands out one shared [`IdGenerator`] per node id.
///
/// Generators are created on first request and live as long as the registry.
/// Lookups of an existing node id only take a read lock; the write lock is
/// taken once per node id, and two threads racing to create the same node id
/// both receive the same `Arc`. The default instance is cached after its
/// first lookup, so [`IdGenerator::get_instance`] takes no lock at all.
///
/// The process-wide registry behind [`IdGenerator::get_instance`] is
/// [`Registry::global`]. Independent registries (for tests, or for a virtual
/// clock) are ordinary values.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use polyflake::Registry;
///
/// let registry = Registry::new();
/// let a = registry.instance(3).unwrap();
/// let b = registry.instance(3).unwrap();
/// assert!(Arc::ptr_eq(&a, &b));
/// ```
#[derive(Debug)]
pub struct Registry<T = WallClock>
where
    T: TimeSource,
{
    time: T,
    default_node_id: u64,
    default_instance: OnceLock<Arc<IdGenerator<T>>>,
    generators: RwLock<HashMap<u64, Arc<IdGenerator<T>>>>,
}

impl Registry<WallClock> {
    /// Creates a wall-clock registry with a random default node id.
    pub fn new() -> Self {
        Self::with_clock(WallClock)
    }

    /// The process-wide registry.
    ///
    /// Initialized on first use from [`RegistryConfig::from_env`] and never
    /// torn down.
    pub fn global() -> &'static Self {
        static GLOBAL: OnceLock<Registry> = OnceLock::new();
        GLOBAL.get_or_init(|| {
            let config = RegistryConfig::from_env();
            Self::with_config(WallClock, config).unwrap_or_else(|_| Self::new())
        })
    }
}

impl Default for Registry<WallClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Registry<T>
where
    T: TimeSource + Clone,
{
    /// Creates a registry whose generators read `time`, with a random default
    /// node id.
    pub fn with_clock(time: T) -> Self {
        Self::from_parts(time, random_node_id())
    }

    /// Creates a registry from explicit settings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidNodeId`](crate::Error::InvalidNodeId) if the configured default node id
    /// exceeds [`IdFormat::MAX_NODE_ID`].
    pub fn with_config(time: T, config: RegistryConfig) -> Result<Self> {
        let default_node_id = match config.default_node_id {
            Some(node_id) => validate_node_id(node_id)?,
            None => random_node_id(),
        };
        Ok(Self::from_parts(time, default_node_id))
    }

    fn from_parts(time: T, default_node_id: u64) -> Self {
        Self {
            time,
            default_node_id,
            default_instance: OnceLock::new(),
            generators: RwLock::new(HashMap::new()),
        }
    }

    /// The node id served by [`Self::default_instance`]. Fixed for the life of
    /// the registry.
    pub const fn default_node_id(&self) -> u64 {
        self.default_node_id
    }

    /// The shared generator for the default node id.
    pub fn default_instance(&self) -> Arc<IdGenerator<T>> {
        let generator = self
            .default_instance
            .get_or_init(|| self.get_or_insert(self.default_node_id));
        Arc::clone(generator)
    }

    /// The shared generator for `node_id`, created on first use.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidNodeId`](crate::Error::InvalidNodeId) if `node_id` exceeds
    /// [`IdFormat::MAX_NODE_ID`]; nothing is created in that case.
    pub fn instance(&self, node_id: u64) -> Result<Arc<IdGenerator<T>>> {
        validate_node_id(node_id).map(|node_id| self.get_or_insert(node_id))
    }

    /// Number of generators created so far.
    pub fn len(&self) -> usize {
        self.generators.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.generators.read().is_empty()
    }

    fn get_or_insert(&self, node_id: u64) -> Arc<IdGenerator<T>> {
        if let Some(generator) = self.generators.read().get(&node_id) {
            return Arc::clone(generator);
        }

        let mut generators = self.generators.write();
        let generator = generators.entry(node_id).or_insert_with(|| {
            #[cfg(feature = "tracing")]
            tracing::debug!(node_id, "creating id generator");
            Arc::new(IdGenerator::new_unchecked(node_id, self.time.clone()))
        });
        Arc::clone(generator)
    }
}

impl IdGenerator<WallClock> {
    /// The shared generator for this process's default node id.
    ///
    /// Every call, from any thread, returns the same instance.
    pub fn get_instance() -> Arc<Self> {
        Registry::global().default_instance()
    }

    /// The shared generator for `node_id`.
    ///
    /// Every call with the same `node_id`, from any thread, returns the same
    /// instance.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidNodeId`](crate::Error::InvalidNodeId) if `node_id` exceeds
    /// [`IdFormat::MAX_NODE_ID`].
    pub fn get_instance_for(node_id: u64) -> Result<Arc<Self>> {
        Registry::global().instance(node_id)
    }

    /// Blocks until the wall clock passes the millisecond `millis`.
    pub fn wait_till_next_millisec(millis: u64) -> u64 {
        TickClock::new(WallClock).wait_till_next_millisec(millis)
    }

    /// Blocks until the wall clock passes the second `secs`.
    pub fn wait_till_next_second(secs: u64) -> u64 {
        TickClock::new(WallClock).wait_till_next_second(secs)
    }

    /// Blocks until the wall clock's tick of `tick_size` milliseconds passes
    /// `tick`.
    pub fn wait_till_next_tick(tick: u64, tick_size: u64) -> u64 {
        TickClock::new(WallClock).wait_till_next_tick(tick, tick_size)
    }
}

fn random_node_id() -> u64 {
    rand::rng().random_range(0..=IdFormat::MAX_NODE_ID)
}
