use core::fmt;

use crate::time::CUSTOM_EPOCH;

const CUSTOM_EPOCH_MILLIS: u64 = CUSTOM_EPOCH.as_millis() as u64;

/// A declarative bit layout for one id width.
///
/// Every layout packs three fields from the most significant used bit down:
///
/// ```text
///  +--------------+-----------------+-------------+-----------------+
///  | reserved (r) | timestamp (t)   | node id (n) | sequence (s)    |
///  +--------------+-----------------+-------------+-----------------+
///  |<----- MSB ------------ total_bits ------------ LSB ----------->|
/// ```
///
/// The timestamp field holds `tick - epoch_tick`, where a tick is the wall
/// clock in milliseconds divided by the format's resolution. Keeping the
/// timestamp in the high bits makes raw ids sort by creation time.
///
/// Only the five built-in layouts exist; each generator keeps one sequence
/// state per layout.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct IdFormat {
    name: &'static str,
    slot: usize,
    total_bits: u32,
    timestamp_bits: u32,
    node_bits: u32,
    sequence_bits: u32,
    epoch_millis: u64,
    tick_millis: u64,
}

impl IdFormat {
    /// A 32-bit id stored in a `u32`.
    ///
    /// - 26 bits timestamp (10 s ticks since [`CUSTOM_EPOCH`], about 21 years)
    /// - 2 bits node id
    /// - 4 bits sequence (16 ids per node every 10 s)
    ///
    /// ```text
    ///  Bit Index:  31             6 5            4 3             0
    ///              +----------------+--------------+---------------+
    ///  Field:      | timestamp (26) | node id (2)  | sequence (4)  |
    ///              +----------------+--------------+---------------+
    /// ```
    pub const TINY: Self = Self::new("tiny", 0, 32, 26, 2, 4, CUSTOM_EPOCH_MILLIS, 10_000);

    /// A 40-bit id stored in a `u64`.
    ///
    /// - 29 bits timestamp (1 s ticks since [`CUSTOM_EPOCH`], about 17 years)
    /// - 3 bits node id
    /// - 8 bits sequence
    pub const MINI: Self = Self::new("mini", 1, 40, 29, 3, 8, CUSTOM_EPOCH_MILLIS, 1_000);

    /// A 48-bit id stored in a `u64`.
    ///
    /// - 32 bits timestamp (1 s ticks since [`CUSTOM_EPOCH`], about 136 years)
    /// - 5 bits node id
    /// - 11 bits sequence
    pub const ID48: Self = Self::new("id48", 2, 48, 32, 5, 11, CUSTOM_EPOCH_MILLIS, 1_000);

    /// A 64-bit id stored in a `u64`, with the top bit reserved so the value
    /// also fits a signed 64-bit column.
    ///
    /// - 1 bit reserved
    /// - 41 bits timestamp (ms since [`CUSTOM_EPOCH`], about 69 years)
    /// - 10 bits node id
    /// - 12 bits sequence
    ///
    /// ```text
    ///  Bit Index:  63           63 62            22 21             12 11             0
    ///              +--------------+----------------+-----------------+---------------+
    ///  Field:      | reserved (1) | timestamp (41) | node id (10)    | sequence (12) |
    ///              +--------------+----------------+-----------------+---------------+
    /// ```
    pub const ID64: Self = Self::new("id64", 3, 64, 41, 10, 12, CUSTOM_EPOCH_MILLIS, 1);

    /// A 128-bit id stored in a `u128`.
    ///
    /// - 64 bits timestamp (ms since the Unix epoch)
    /// - 48 bits node id (wide enough for a MAC address)
    /// - 16 bits sequence
    pub const ID128: Self = Self::new("id128", 4, 128, 64, 48, 16, 0, 1);

    /// Every built-in layout, narrowest first.
    pub const ALL: [Self; 5] = [Self::TINY, Self::MINI, Self::ID48, Self::ID64, Self::ID128];

    /// The largest node id any layout can carry. Narrower layouts keep only
    /// the low bits of the node id.
    pub const MAX_NODE_ID: u64 = Self::ID128.max_node_id();

    #[allow(clippy::too_many_arguments)]
    const fn new(
        name: &'static str,
        slot: usize,
        total_bits: u32,
        timestamp_bits: u32,
        node_bits: u32,
        sequence_bits: u32,
        epoch_millis: u64,
        tick_millis: u64,
    ) -> Self {
        assert!(total_bits <= 128);
        assert!(timestamp_bits <= 64 && node_bits <= 64 && sequence_bits <= 32);
        assert!(timestamp_bits + node_bits + sequence_bits <= total_bits);
        assert!(tick_millis > 0);
        assert!(epoch_millis % tick_millis == 0);
        Self {
            name,
            slot,
            total_bits,
            timestamp_bits,
            node_bits,
            sequence_bits,
            epoch_millis,
            tick_millis,
        }
    }

    /// Resolves a layout by name: `tiny`, `mini`, `48`/`id48`, `64`/`id64`,
    /// `128`/`id128` (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        let name = name.strip_prefix("id").unwrap_or(name.as_str());
        match name {
            "tiny" => Some(Self::TINY),
            "mini" => Some(Self::MINI),
            "48" => Some(Self::ID48),
            "64" => Some(Self::ID64),
            "128" => Some(Self::ID128),
            _ => None,
        }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub(crate) const fn slot(&self) -> usize {
        self.slot
    }

    /// Width of the container, reserved bits included.
    pub const fn total_bits(&self) -> u32 {
        self.total_bits
    }

    pub const fn timestamp_bits(&self) -> u32 {
        self.timestamp_bits
    }

    pub const fn node_bits(&self) -> u32 {
        self.node_bits
    }

    pub const fn sequence_bits(&self) -> u32 {
        self.sequence_bits
    }

    /// Number of bits carrying data; anything above is reserved and zero.
    pub const fn used_bits(&self) -> u32 {
        self.timestamp_bits + self.node_bits + self.sequence_bits
    }

    /// The epoch in milliseconds since the Unix epoch.
    pub const fn epoch_millis(&self) -> u64 {
        self.epoch_millis
    }

    /// Length of one tick in milliseconds.
    pub const fn tick_millis(&self) -> u64 {
        self.tick_millis
    }

    /// The epoch expressed in ticks.
    pub const fn epoch_tick(&self) -> u64 {
        self.epoch_millis / self.tick_millis
    }

    pub const fn timestamp_shift(&self) -> u32 {
        self.node_bits + self.sequence_bits
    }

    pub const fn node_shift(&self) -> u32 {
        self.sequence_bits
    }

    pub const fn max_timestamp(&self) -> u64 {
        mask(self.timestamp_bits)
    }

    pub const fn max_node_id(&self) -> u64 {
        mask(self.node_bits)
    }

    pub const fn max_sequence(&self) -> u64 {
        mask(self.sequence_bits)
    }

    /// Ids one node can issue per tick before it has to wait for the next.
    pub const fn ids_per_tick(&self) -> u64 {
        self.max_sequence() + 1
    }

    /// Number of characters in the hex encoding.
    pub const fn hex_len(&self) -> usize {
        self.total_bits.div_ceil(4) as usize
    }

    /// Number of characters in the Crockford base32 encoding.
    pub const fn ascii_len(&self) -> usize {
        self.total_bits.div_ceil(5) as usize
    }

    /// Returns true if `raw` has no bits set above [`Self::used_bits`].
    pub const fn fits(&self, raw: u128) -> bool {
        self.used_bits() >= 128 || raw >> self.used_bits() == 0
    }

    /// Packs the three fields. Each field is masked to its width, so node ids
    /// wider than the layout alias onto their low bits.
    pub const fn pack(&self, timestamp: u64, node_id: u64, sequence: u64) -> u128 {
        let timestamp = ((timestamp & self.max_timestamp()) as u128) << self.timestamp_shift();
        let node_id = ((node_id & self.max_node_id()) as u128) << self.node_shift();
        let sequence = (sequence & self.max_sequence()) as u128;
        timestamp | node_id | sequence
    }

    /// Extracts the timestamp field (ticks since the epoch).
    pub const fn timestamp(&self, raw: u128) -> u64 {
        ((raw >> self.timestamp_shift()) as u64) & self.max_timestamp()
    }

    pub const fn node_id(&self, raw: u128) -> u64 {
        ((raw >> self.node_shift()) as u64) & self.max_node_id()
    }

    pub const fn sequence(&self, raw: u128) -> u64 {
        (raw as u64) & self.max_sequence()
    }
}

impl fmt::Display for IdFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl fmt::Debug for IdFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdFormat")
            .field("name", &self.name)
            .field("total_bits", &self.total_bits)
            .field("timestamp_bits", &self.timestamp_bits)
            .field("node_bits", &self.node_bits)
            .field("sequence_bits", &self.sequence_bits)
            .field("epoch_millis", &self.epoch_millis)
            .field("tick_millis", &self.tick_millis)
            .finish()
    }
}

const fn mask(bits: u32) -> u64 {
    if bits >= 64 {
        u64::MAX
    } else {
        (1 << bits) - 1
    }
}
