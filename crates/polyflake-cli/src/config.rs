use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use polyflake::{
    IdFormat,
    codec::{decode_ascii, decode_hex, encode_ascii, encode_hex},
};

/// Command-line interface for the `polyflake` binary.
///
/// Every option that makes sense to pin per host can also be set through the
/// environment (or a `.env` file in the working directory).
#[derive(Parser, Debug, Clone)]
#[command(
    name = "polyflake",
    version,
    about = "Generate and inspect time-ordered, node-scoped ids"
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum CliCommand {
    /// Print freshly generated ids, one per line.
    Generate(GenerateArgs),
    /// Print the timestamp, node and sequence embedded in existing ids.
    Inspect(InspectArgs),
}

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Id width: `tiny`, `mini`, `48`, `64` or `128`.
    ///
    /// Environment variable: `POLYFLAKE_FORMAT`
    #[arg(long, env = "POLYFLAKE_FORMAT", default_value_t = String::from("64"))]
    pub format: String,

    /// Output encoding.
    ///
    /// Environment variable: `POLYFLAKE_ENCODING`
    #[arg(long, env = "POLYFLAKE_ENCODING", value_enum, default_value_t = Encoding::Raw)]
    pub encoding: Encoding,

    /// Number of ids to print.
    #[arg(short = 'n', long, default_value_t = 1)]
    pub count: usize,

    /// Node id to generate for. Defaults to the process-wide node id, which is
    /// random unless `POLYFLAKE_NODE_ID` is set.
    ///
    /// Environment variable: `POLYFLAKE_NODE_ID`
    #[arg(long, env = "POLYFLAKE_NODE_ID")]
    pub node_id: Option<u64>,
}

#[derive(Args, Debug, Clone)]
pub struct InspectArgs {
    /// Id width the inputs were generated with.
    ///
    /// Environment variable: `POLYFLAKE_FORMAT`
    #[arg(long, env = "POLYFLAKE_FORMAT")]
    pub format: String,

    /// Encoding of the inputs.
    ///
    /// Environment variable: `POLYFLAKE_ENCODING`
    #[arg(long, env = "POLYFLAKE_ENCODING", value_enum, default_value_t = Encoding::Raw)]
    pub encoding: Encoding,

    /// Ids to inspect.
    #[arg(required = true, num_args = 1..)]
    pub ids: Vec<String>,
}

/// How an id is written to or read from text.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// Decimal integer.
    Raw,
    /// Fixed-width lowercase hex.
    Hex,
    /// Fixed-width Crockford base32.
    Ascii,
}

impl Encoding {
    pub fn encode(self, format: &IdFormat, raw: u128) -> String {
        match self {
            Self::Raw => raw.to_string(),
            Self::Hex => encode_hex(format, raw),
            Self::Ascii => encode_ascii(format, raw),
        }
    }

    pub fn decode(self, format: &IdFormat, id: &str) -> anyhow::Result<u128> {
        let raw = match self {
            Self::Raw => {
                // `u128::from_str` would also accept a leading `+`.
                if !id.bytes().all(|byte| byte.is_ascii_digit()) {
                    bail!("`{id}` is not a decimal id");
                }
                let raw = id
                    .parse::<u128>()
                    .with_context(|| format!("`{id}` is not a decimal id"))?;
                if !format.fits(raw) {
                    bail!("`{id}` is wider than a {format} id");
                }
                raw
            }
            Self::Hex => decode_hex(format, id)?,
            Self::Ascii => decode_ascii(format, id)?,
        };
        Ok(raw)
    }
}

#[derive(Debug, Clone)]
pub enum CliConfig {
    Generate(GenerateConfig),
    Inspect(InspectConfig),
}

#[derive(Debug, Clone)]
pub struct GenerateConfig {
    pub format: IdFormat,
    pub encoding: Encoding,
    pub count: usize,
    pub node_id: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct InspectConfig {
    pub format: IdFormat,
    pub encoding: Encoding,
    pub ids: Vec<String>,
}

impl TryFrom<CliArgs> for CliConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        match args.command {
            CliCommand::Generate(args) => GenerateConfig::try_from(args).map(Self::Generate),
            CliCommand::Inspect(args) => InspectConfig::try_from(args).map(Self::Inspect),
        }
    }
}

impl TryFrom<GenerateArgs> for GenerateConfig {
    type Error = anyhow::Error;

    fn try_from(args: GenerateArgs) -> Result<Self, Self::Error> {
        if args.count == 0 {
            bail!("--count must be greater than 0");
        }

        if let Some(node_id) = args.node_id.filter(|id| *id > IdFormat::MAX_NODE_ID) {
            bail!(
                "node id ({}) exceeds the node id space (max = {})",
                node_id,
                IdFormat::MAX_NODE_ID
            );
        }

        Ok(Self {
            format: parse_format(&args.format)?,
            encoding: args.encoding,
            count: args.count,
            node_id: args.node_id,
        })
    }
}

impl TryFrom<InspectArgs> for InspectConfig {
    type Error = anyhow::Error;

    fn try_from(args: InspectArgs) -> Result<Self, Self::Error> {
        Ok(Self {
            format: parse_format(&args.format)?,
            encoding: args.encoding,
            ids: args.ids,
        })
    }
}

fn parse_format(name: &str) -> anyhow::Result<IdFormat> {
    IdFormat::from_name(name).with_context(|| {
        format!("unknown id format `{name}` (expected one of: tiny, mini, 48, 64, 128)")
    })
}
