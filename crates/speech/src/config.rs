//! Narration command settings read from the environment.

/// Narration settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechConfig {
    pub program: String,
    pub args: Vec<String>,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            program: "espeak".to_string(),
            args: Vec::new(),
        }
    }
}

impl SpeechConfig {
    pub fn from_env() -> Self {
        Self::from_var(std::env::var("MICROGAMES_SPEECH_CMD").ok().as_deref())
    }

    /// Settings for an optional command line; unset or blank means the default.
    pub fn from_var(value: Option<&str>) -> Self {
        value.and_then(Self::parse_command).unwrap_or_default()
    }

    /// Split a command line on whitespace. Empty input yields `None`.
    pub fn parse_command(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self {
            program,
            args: parts.collect(),
        })
    }

    pub fn is_disabled() -> bool {
        std::env::var("MICROGAMES_SPEECH_DISABLED")
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_command_splits_program_and_args() {
        let cfg = SpeechConfig::parse_command("  say -v Alex ").unwrap();
        assert_eq!(cfg.program, "say");
        assert_eq!(cfg.args, vec!["-v".to_string(), "Alex".to_string()]);
    }

    #[test]
    fn blank_command_is_rejected() {
        assert_eq!(SpeechConfig::parse_command("   "), None);
    }

    #[test]
    fn unset_or_blank_command_falls_back_to_espeak() {
        assert_eq!(SpeechConfig::from_var(None).program, "espeak");
        assert_eq!(SpeechConfig::from_var(Some("")), SpeechConfig::default());
        assert_eq!(SpeechConfig::from_var(Some("say")).program, "say");
    }
}
