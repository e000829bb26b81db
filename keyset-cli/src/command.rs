use anyhow::Context;
use keyset_cursor::{cursor, CursorEncoding, RawCursor, SortRegistry, SortSpec};

use std::collections::BTreeMap;

/// Decodes a token into pretty JSON, optionally checking its kind.
pub fn inspect(token: &str, kind: Option<&str>) -> anyhow::Result<String> {
    let raw = cursor::inspect(token.trim()).context("Couldn't decode cursor")?;
    if let Some(kind) = kind {
        if raw.name != kind {
            anyhow::bail!(
                "Invalid cursor type: got '{}' where it should have been '{kind}'",
                raw.name
            );
        }
    }
    tracing::debug!(name = %raw.name, keys = raw.value.len(), "inspected cursor");
    Ok(serde_json::to_string_pretty(&raw)?)
}

/// Encodes a cursor given in its JSON form.
pub fn encode(json: &str, encoding: CursorEncoding) -> anyhow::Result<String> {
    let raw: RawCursor = serde_json::from_str(json).context("Couldn't parse cursor json")?;
    if raw.value.is_empty() {
        anyhow::bail!("Cursor '{}' carries no sort position", raw.name);
    }
    Ok(raw.encode(encoding))
}

pub fn order_by(
    registries: &BTreeMap<String, SortRegistry>,
    kind: Option<&str>,
) -> anyhow::Result<String> {
    if let Some(kind) = kind {
        if !registries.contains_key(kind) {
            anyhow::bail!("No order-by options configured for '{kind}'");
        }
    }
    let lines: Vec<_> = registries
        .iter()
        .filter(|(name, _)| kind.is_none_or(|kind| kind == name.as_str()))
        .flat_map(|(name, registry)| {
            registry
                .iter()
                .map(move |(order_by, spec)| format!("{name}.{order_by}: {}", describe(spec)))
        })
        .collect();
    Ok(lines.join("\n"))
}

fn describe(spec: &SortSpec) -> String {
    spec.iter()
        .map(|key| {
            let dir = if key.direction.is_ascending() {
                "asc"
            } else {
                "desc"
            };
            format!("{} {dir}", key.key)
        })
        .collect::<Vec<_>>()
        .join(", ")
}
