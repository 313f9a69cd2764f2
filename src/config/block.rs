//! Ordered configuration blocks.
//!
//! A [`ConfigBlock`] is the generic shape consumed by the test and run
//! phases: a named list of entries in file order, each remembering the file
//! and line it came from. Blocks can be built from a TOML table or by hand.

use std::collections::BTreeMap;
use toml::Spanned;

/// One `name = value` line of a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigEntry {
    pub name: String,
    /// `None` when the entry has no scalar value.
    pub value: Option<String>,
    pub file: String,
    pub line: usize,
}

/// A named configuration block.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConfigBlock {
    pub name: String,
    pub file: String,
    pub entries: Vec<ConfigEntry>,
}

impl ConfigBlock {
    pub fn new(name: impl Into<String>, file: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            file: file.into(),
            entries: Vec::new(),
        }
    }

    /// Append an entry on the given line.
    #[must_use]
    pub fn with_entry(mut self, name: &str, value: Option<&str>, line: usize) -> Self {
        self.entries.push(ConfigEntry {
            name: name.to_string(),
            value: value.map(str::to_string),
            file: self.file.clone(),
            line,
        });
        self
    }

    /// Build a block from a deserialized TOML table.
    ///
    /// Entries are ordered by their position in `source`, which must be the
    /// text the table was parsed from.
    pub fn from_toml_table(
        name: &str,
        table: &BTreeMap<String, Spanned<toml::Value>>,
        file: &str,
        source: &str,
    ) -> Self {
        let mut spanned: Vec<_> = table.iter().collect();
        spanned.sort_by_key(|(_, v)| v.span().start);

        let entries = spanned
            .into_iter()
            .map(|(key, value)| ConfigEntry {
                name: key.clone(),
                value: render_scalar(value.get_ref()),
                file: file.to_string(),
                line: line_of(source, value.span().start),
            })
            .collect();

        Self {
            name: name.to_string(),
            file: file.to_string(),
            entries,
        }
    }
}

/// Scalars become their textual form; arrays and tables carry no value.
pub(super) fn render_scalar(value: &toml::Value) -> Option<String> {
    match value {
        toml::Value::String(s) => Some(s.clone()),
        toml::Value::Boolean(b) => Some(b.to_string()),
        toml::Value::Integer(i) => Some(i.to_string()),
        toml::Value::Float(f) => Some(f.to_string()),
        toml::Value::Datetime(d) => Some(d.to_string()),
        toml::Value::Array(_) | toml::Value::Table(_) => None,
    }
}

/// 1-based line number of a byte offset.
fn line_of(source: &str, offset: usize) -> usize {
    source
        .get(..offset)
        .map_or(0, |before| before.matches('\n').count())
        + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(text: &str) -> BTreeMap<String, Spanned<toml::Value>> {
        toml::from_str(text).unwrap()
    }

    #[test]
    fn entries_follow_file_order_not_key_order() {
        let text = "zeta = \"1\"\nalpha = \"2\"\n";
        let block = ConfigBlock::from_toml_table("relaymsg", &table(text), "f.toml", text);
        let names: Vec<_> = block.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["zeta", "alpha"]);
        assert_eq!(block.entries[1].line, 2);
    }

    #[test]
    fn scalar_rendering() {
        let text = "a = true\nb = 0\nc = \"x\"\nd = [1, 2]\ne = { f = 1 }\n";
        let block = ConfigBlock::from_toml_table("relaymsg", &table(text), "f.toml", text);
        let values: Vec<_> = block.entries.iter().map(|e| e.value.as_deref()).collect();
        assert_eq!(values, vec![Some("true"), Some("0"), Some("x"), None, None]);
    }

    #[test]
    fn line_of_offsets() {
        assert_eq!(line_of("abc", 0), 1);
        assert_eq!(line_of("a\nb\nc", 4), 3);
        assert_eq!(line_of("a\n", 99), 1);
    }

    #[test]
    fn builder_stamps_file() {
        let block = ConfigBlock::new("relaymsg", "hand.conf").with_entry("hostmask", Some("a@b"), 3);
        assert_eq!(block.entries[0].file, "hand.conf");
        assert_eq!(block.entries[0].line, 3);
    }
}
