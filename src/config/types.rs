//! Core configuration types and loading.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;
use toml::Spanned;

use super::block::{ConfigBlock, ConfigEntry, render_scalar};
use super::relaymsg::BLOCK_NAME;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server information.
    pub server: ServerConfig,
    /// The `[relaymsg]` table, values kept with their byte spans.
    #[serde(default)]
    pub relaymsg: Option<BTreeMap<String, Spanned<toml::Value>>>,
    /// Where this configuration was read from.
    #[serde(skip)]
    source: ConfigSource,
}

#[derive(Debug, Clone, Default)]
struct ConfigSource {
    file: String,
    /// Text the tables were parsed from, with repeated block lines blanked.
    text: String,
    /// `[relaymsg]` lines that repeat an earlier key.
    repeated: Vec<ConfigEntry>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content, &path.display().to_string())
    }

    /// Parse configuration text; `file` names it in diagnostics.
    ///
    /// TOML forbids repeating a key, but a repeated directive inside
    /// `[relaymsg]` is something the test phase reports itself. Such lines
    /// are lifted out and kept as extra block entries.
    pub fn parse(content: &str, file: &str) -> Result<Self, ConfigError> {
        let mut text = content.to_string();
        let mut repeated = Vec::new();
        let mut config: Config = loop {
            match toml::from_str(&text) {
                Ok(config) => break config,
                Err(err) => match take_repeated_entry(&mut text, &err, file) {
                    Some(entry) => repeated.push(entry),
                    None => return Err(err.into()),
                },
            }
        };
        config.source = ConfigSource {
            file: file.to_string(),
            text,
            repeated,
        };
        Ok(config)
    }

    /// Name of the file this configuration came from.
    pub fn file(&self) -> &str {
        &self.source.file
    }

    /// The `relaymsg` block in file order, if the file has one.
    pub fn relaymsg_block(&self) -> Option<ConfigBlock> {
        self.relaymsg.as_ref().map(|table| {
            let mut block =
                ConfigBlock::from_toml_table(BLOCK_NAME, table, &self.source.file, &self.source.text);
            block.entries.extend(self.source.repeated.iter().cloned());
            block.entries.sort_by_key(|e| e.line);
            block
        })
    }
}

/// If `err` is a repeated key in the `relaymsg` table, blank the repeating
/// line in `text` and return it as an entry.
fn take_repeated_entry(text: &mut String, err: &toml::de::Error, file: &str) -> Option<ConfigEntry> {
    const MARKER: &str = "duplicate key `";
    let message = err.message();
    let rest = &message[message.find(MARKER)? + MARKER.len()..];
    let (key, table) = rest.split_once('`')?;
    if !table.starts_with(&format!(" in table `{BLOCK_NAME}`")) {
        return None;
    }

    let mut in_block = false;
    let mut seen = false;
    let mut offset = 0;
    let mut found = None;
    for (index, line) in text.split_inclusive('\n').enumerate() {
        let trimmed = line.trim();
        if let Some(header) = trimmed.strip_prefix('[') {
            in_block = header.split(']').next().map(str::trim) == Some(BLOCK_NAME);
        } else if in_block && line_key(trimmed) == Some(key) {
            if seen {
                let end = offset + line.trim_end_matches(['\r', '\n']).len();
                found = Some((index + 1, offset..end));
                break;
            }
            seen = true;
        }
        offset += line.len();
    }

    let (line, range) = found?;
    let parsed: BTreeMap<String, toml::Value> = toml::from_str(&text[range.clone()]).ok()?;
    let entry = ConfigEntry {
        name: key.to_string(),
        value: parsed.get(key).and_then(render_scalar),
        file: file.to_string(),
        line,
    };
    text.replace_range(range, "");
    Some(entry)
}

/// The bare or quoted key of a `key = value` line.
fn line_key(line: &str) -> Option<&str> {
    let (key, _) = line.split_once('=')?;
    Some(key.trim().trim_matches('"'))
}

/// Server identity configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Server name (e.g., "irc.example.net").
    pub name: String,
    /// Server ID for TS6 (3 characters).
    pub sid: String,
    /// Network name.
    #[serde(default)]
    pub network: String,
}
