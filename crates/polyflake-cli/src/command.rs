use std::io::Write;

use anyhow::Context;
use chrono::{DateTime, SecondsFormat, Utc};
use polyflake::{IdGenerator, codec::decompose};

use crate::config::{GenerateConfig, InspectConfig};

/// Writes `config.count` fresh ids to `out`, one per line.
#[tracing::instrument(level = "debug", skip_all, fields(format = config.format.name(), count = config.count))]
pub fn generate(config: &GenerateConfig, out: &mut impl Write) -> anyhow::Result<()> {
    let generator = match config.node_id {
        Some(node_id) => IdGenerator::get_instance_for(node_id)?,
        None => IdGenerator::get_instance(),
    };
    tracing::debug!(node_id = generator.node_id(), "using generator");

    for _ in 0..config.count {
        let raw = generator.generate(&config.format)?;
        writeln!(out, "{}", config.encoding.encode(&config.format, raw))?;
    }

    Ok(())
}

/// Writes one tab-separated line per input id: the id, its timestamp in
/// milliseconds and RFC 3339, its node field and its sequence.
///
/// Stops at the first id that fails to decode.
#[tracing::instrument(level = "debug", skip_all, fields(format = config.format.name(), ids = config.ids.len()))]
pub fn inspect(config: &InspectConfig, out: &mut impl Write) -> anyhow::Result<()> {
    for id in &config.ids {
        let raw = config
            .encoding
            .decode(&config.format, id)
            .with_context(|| format!("cannot decode `{id}` as a {} id", config.format))?;
        let parts = decompose(&config.format, raw);

        writeln!(
            out,
            "{id}\t{}\t{}\tnode={}\tsequence={}",
            parts.timestamp_millis,
            rfc3339(parts.timestamp_millis),
            parts.node_id,
            parts.sequence
        )?;
    }

    Ok(())
}

fn rfc3339(millis: u64) -> String {
    i64::try_from(millis)
        .ok()
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .map_or_else(
            || String::from("out-of-range"),
            |at| at.to_rfc3339_opts(SecondsFormat::Millis, true),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Encoding;
    use polyflake::IdFormat;

    fn lines(out: Vec<u8>) -> Vec<String> {
        String::from_utf8(out)
            .unwrap()
            .lines()
            .map(str::to_owned)
            .collect()
    }

    #[test]
    fn generates_requested_count() {
        let config = GenerateConfig {
            format: IdFormat::ID64,
            encoding: Encoding::Hex,
            count: 5,
            node_id: Some(11),
        };
        let mut out = Vec::new();
        generate(&config, &mut out).unwrap();

        let ids = lines(out);
        assert_eq!(ids.len(), 5);
        assert!(ids.iter().all(|id| id.len() == IdFormat::ID64.hex_len()));
        assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn inspects_generated_ids() {
        let format = IdFormat::ID64;
        let generator = IdGenerator::get_instance_for(7).unwrap();
        let id = Encoding::Ascii.encode(&format, generator.generate(&format).unwrap());

        let config = InspectConfig {
            format,
            encoding: Encoding::Ascii,
            ids: vec![id.clone()],
        };
        let mut out = Vec::new();
        inspect(&config, &mut out).unwrap();

        let line = lines(out).remove(0);
        let fields: Vec<&str> = line.split('\t').collect();
        assert_eq!(fields[0], id);
        assert!(fields[2].ends_with('Z'));
        assert_eq!(fields[3], "node=7");
    }

    #[test]
    fn inspect_reports_bad_input() {
        let config = InspectConfig {
            format: IdFormat::TINY,
            encoding: Encoding::Hex,
            ids: vec![String::from("xyz")],
        };
        let err = inspect(&config, &mut Vec::new()).unwrap_err();
        assert!(err.to_string().contains("xyz"));
    }

    #[test]
    fn formats_rfc3339() {
        assert_eq!(rfc3339(1_735_689_600_000), "2025-01-01T00:00:00.000Z");
        assert_eq!(rfc3339(u64::MAX), "out-of-range");
    }
}
