//! Configuration validation.
//!
//! Validates configuration at startup to catch common errors early, and
//! carries the per-entry diagnostics produced by block test phases.

use super::Config;
use std::fmt;
use thiserror::Error;

/// Validation errors for configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("server.name is required")]
    MissingServerName,
    #[error("server.sid must be exactly 3 characters, got {0}")]
    InvalidSid(usize),
    #[error("server.sid must match pattern [0-9][A-Z0-9][A-Z0-9], got '{0}'")]
    InvalidSidFormat(String),
}

/// Validate the server section, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.name.is_empty() {
        errors.push(ValidationError::MissingServerName);
    }

    // SID validation (TS6 format)
    let sid = &config.server.sid;
    if sid.len() != 3 {
        errors.push(ValidationError::InvalidSid(sid.len()));
    } else {
        let chars: Vec<char> = sid.chars().collect();
        let valid = chars[0].is_ascii_digit()
            && (chars[1].is_ascii_uppercase() || chars[1].is_ascii_digit())
            && (chars[2].is_ascii_uppercase() || chars[2].is_ascii_digit());
        if !valid {
            errors.push(ValidationError::InvalidSidFormat(sid.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// How serious a diagnostic is. Only errors block the run phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

/// One problem found while testing a block, with its source position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub file: String,
    pub line: usize,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.file, self.line, self.message)
    }
}

/// Outcome of a configuration test phase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestReport {
    pub diagnostics: Vec<Diagnostic>,
}

impl TestReport {
    pub(crate) fn error(&mut self, file: &str, line: usize, message: String) {
        self.push(Severity::Error, file, line, message);
    }

    pub(crate) fn warn(&mut self, file: &str, line: usize, message: String) {
        self.push(Severity::Warning, file, line, message);
    }

    fn push(&mut self, severity: Severity, file: &str, line: usize, message: String) {
        self.diagnostics.push(Diagnostic {
            severity,
            file: file.to_string(),
            line,
            message,
        });
    }

    /// Number of errors; the run phase only proceeds when this is zero.
    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
    }

    pub fn is_ok(&self) -> bool {
        self.error_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(text: &str) -> Config {
        Config::parse(text, "test.toml").unwrap()
    }

    #[test]
    fn test_valid_config_passes() {
        let config = config("[server]\nname = \"irc.test\"\nsid = \"00T\"\n");
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_empty_server_name_fails() {
        let config = config("[server]\nname = \"\"\nsid = \"00T\"\n");
        let errors = validate(&config).unwrap_err();
        assert!(errors.iter().any(|e| matches!(e, ValidationError::MissingServerName)));
    }

    #[test]
    fn test_invalid_sid_fails() {
        let errors = validate(&config("[server]\nname = \"a\"\nsid = \"0T\"\n")).unwrap_err();
        assert!(errors.iter().any(|e| matches!(e, ValidationError::InvalidSid(2))));

        let errors = validate(&config("[server]\nname = \"a\"\nsid = \"ABC\"\n")).unwrap_err();
        assert!(errors.iter().any(|e| matches!(e, ValidationError::InvalidSidFormat(_))));
    }

    #[test]
    fn diagnostic_display_has_position() {
        let mut report = TestReport::default();
        report.error("ircd.toml", 12, "blank relaymsg value".into());
        report.warn("ircd.toml", 13, "unknown item relaymsg::colour".into());
        assert_eq!(report.error_count(), 1);
        assert_eq!(report.warnings().count(), 1);
        assert_eq!(
            report.diagnostics[0].to_string(),
            "ircd.toml:12: blank relaymsg value"
        );
        assert!(!report.is_ok());
    }
}
