//! The `relaymsg` configuration block.
//!
//! ```toml
//! [relaymsg]
//! hostmask = "relay@bridge.example"
//! require-separator = "yes"
//! ```
//!
//! The separator policy has two legacy spellings with opposite sense, each
//! accepted with a hyphen or an underscore. Both resolve into
//! [`RelayPolicy::require_separator`] through [`SEPARATOR_OPTIONS`].

use super::block::ConfigBlock;
use super::validation::TestReport;
use crate::policy::RelayPolicy;

pub const BLOCK_NAME: &str = "relaymsg";

/// How a yes/no option maps onto its target field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    /// `yes` sets the field to true.
    Direct,
    /// `yes` sets the field to false.
    Inverted,
}

/// Every spelling of the separator option, with its polarity against
/// `require_separator`.
pub const SEPARATOR_OPTIONS: &[(&str, Polarity)] = &[
    ("allow-clean-nicks", Polarity::Inverted),
    ("allow_clean_nicks", Polarity::Inverted),
    ("require-separator", Polarity::Direct),
    ("require_separator", Polarity::Direct),
];

fn separator_option(name: &str) -> Option<Polarity> {
    SEPARATOR_OPTIONS
        .iter()
        .find(|(option, _)| *option == name)
        .map(|(_, polarity)| *polarity)
}

/// Parse a yes/no value. `yes`, `true` and `1` are truthy, `no`, `false`
/// and `0` falsy, compared case-insensitively.
pub fn parse_yes_no(value: &str) -> Option<bool> {
    if ["yes", "true", "1"]
        .iter()
        .any(|t| value.eq_ignore_ascii_case(t))
    {
        Some(true)
    } else if ["no", "false", "0"]
        .iter()
        .any(|f| value.eq_ignore_ascii_case(f))
    {
        Some(false)
    } else {
        None
    }
}

/// Test phase: check every entry without touching any state.
pub fn test_block(block: &ConfigBlock) -> TestReport {
    let mut report = TestReport::default();
    let mut seen_hostmask = false;

    for entry in &block.entries {
        let (file, line) = (entry.file.as_str(), entry.line);

        if separator_option(&entry.name).is_some() {
            match entry.value.as_deref() {
                None | Some("") => report.error(
                    file,
                    line,
                    format!("{BLOCK_NAME}::{} requires yes or no", entry.name),
                ),
                Some(value) if parse_yes_no(value).is_none() => report.error(
                    file,
                    line,
                    format!("{BLOCK_NAME}::{} must be yes or no", entry.name),
                ),
                Some(_) => {}
            }
            continue;
        }

        let Some(value) = entry.value.as_deref() else {
            report.error(file, line, format!("blank {BLOCK_NAME} value"));
            continue;
        };

        if entry.name == "hostmask" {
            if seen_hostmask {
                report.error(
                    file,
                    line,
                    format!("duplicate {BLOCK_NAME}::hostmask directive"),
                );
                continue;
            }
            seen_hostmask = true;
            if value.is_empty() || value == "@" {
                report.error(
                    file,
                    line,
                    format!("{BLOCK_NAME}::hostmask must be non-empty and be in nick@hostmask format"),
                );
            }
            if !value.contains('@') {
                report.error(
                    file,
                    line,
                    format!("{BLOCK_NAME}::hostmask must be in nick@hostmask format"),
                );
            }
            continue;
        }

        report.warn(file, line, format!("unknown item {BLOCK_NAME}::{}", entry.name));
    }

    report
}

/// Run phase: apply a block that passed [`test_block`].
///
/// Later entries win. Options that are absent leave the policy untouched.
pub fn run_block(block: &ConfigBlock, policy: &mut RelayPolicy) {
    for entry in &block.entries {
        if entry.name == "hostmask" {
            if let Some(value) = &entry.value {
                policy.display_hostmask = value.clone();
            }
            continue;
        }
        if let Some(polarity) = separator_option(&entry.name) {
            let yes = entry
                .value
                .as_deref()
                .and_then(parse_yes_no)
                .unwrap_or(false);
            policy.require_separator = match polarity {
                Polarity::Direct => yes,
                Polarity::Inverted => !yes,
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Severity;

    fn block() -> ConfigBlock {
        ConfigBlock::new(BLOCK_NAME, "ircd.conf")
    }

    fn messages(report: &TestReport) -> Vec<String> {
        report.diagnostics.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn clean_block_passes() {
        let report = test_block(
            &block()
                .with_entry("hostmask", Some("relay@bridge.test"), 2)
                .with_entry("allow-clean-nicks", Some("YES"), 3),
        );
        assert!(report.diagnostics.is_empty());
    }

    #[test]
    fn separator_value_errors() {
        let report = test_block(
            &block()
                .with_entry("require_separator", None, 4)
                .with_entry("allow_clean_nicks", Some(""), 5)
                .with_entry("require-separator", Some("maybe"), 6),
        );
        assert_eq!(
            messages(&report),
            vec![
                "ircd.conf:4: relaymsg::require_separator requires yes or no",
                "ircd.conf:5: relaymsg::allow_clean_nicks requires yes or no",
                "ircd.conf:6: relaymsg::require-separator must be yes or no",
            ]
        );
    }

    #[test]
    fn blank_value_error() {
        let report = test_block(&block().with_entry("hostmask", None, 9));
        assert_eq!(messages(&report), vec!["ircd.conf:9: blank relaymsg value"]);
    }

    #[test]
    fn unknown_item_is_only_a_warning() {
        let report = test_block(&block().with_entry("colour", Some("blue"), 7));
        assert!(report.is_ok());
        assert_eq!(report.diagnostics[0].severity, Severity::Warning);
        assert_eq!(
            report.diagnostics[0].message,
            "unknown item relaymsg::colour"
        );
    }

    #[test]
    fn hostmask_shape_errors_can_both_fire() {
        let empty = test_block(&block().with_entry("hostmask", Some(""), 1));
        assert_eq!(empty.error_count(), 2);

        let at_only = test_block(&block().with_entry("hostmask", Some("@"), 1));
        assert_eq!(
            messages(&at_only),
            vec!["ircd.conf:1: relaymsg::hostmask must be non-empty and be in nick@hostmask format"]
        );

        let no_at = test_block(&block().with_entry("hostmask", Some("localhost"), 1));
        assert_eq!(
            messages(&no_at),
            vec!["ircd.conf:1: relaymsg::hostmask must be in nick@hostmask format"]
        );
    }

    #[test]
    fn duplicate_hostmask_reported_once_and_not_rechecked() {
        let report = test_block(
            &block()
                .with_entry("hostmask", Some("a@b"), 1)
                .with_entry("hostmask", Some("no-at-sign"), 2),
        );
        assert_eq!(
            messages(&report),
            vec!["ircd.conf:2: duplicate relaymsg::hostmask directive"]
        );
    }

    #[test]
    fn run_applies_polarity_table() {
        let mut policy = RelayPolicy::default();
        run_block(&block().with_entry("allow-clean-nicks", Some("yes"), 1), &mut policy);
        assert!(!policy.require_separator);
        run_block(&block().with_entry("require_separator", Some("1"), 1), &mut policy);
        assert!(policy.require_separator);
        run_block(&block().with_entry("allow_clean_nicks", Some("false"), 1), &mut policy);
        assert!(policy.require_separator);
        run_block(&block().with_entry("require-separator", Some("No"), 1), &mut policy);
        assert!(!policy.require_separator);
    }

    #[test]
    fn run_later_entries_win_and_absent_options_stay() {
        let mut policy = RelayPolicy {
            display_hostmask: "old@host".into(),
            require_separator: false,
        };
        run_block(
            &block()
                .with_entry("require-separator", Some("yes"), 1)
                .with_entry("allow-clean-nicks", Some("yes"), 2),
            &mut policy,
        );
        assert!(!policy.require_separator);
        assert_eq!(policy.display_hostmask, "old@host");
    }

    #[test]
    fn parse_yes_no_spellings() {
        for yes in ["yes", "YES", "True", "1"] {
            assert_eq!(parse_yes_no(yes), Some(true), "{yes}");
        }
        for no in ["no", "No", "FALSE", "0"] {
            assert_eq!(parse_yes_no(no), Some(false), "{no}");
        }
        for bad in ["", "2", "on", "y"] {
            assert_eq!(parse_yes_no(bad), None, "{bad}");
        }
    }
}
