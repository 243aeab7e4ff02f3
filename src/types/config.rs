use crate::error::CompassError;
use serde::Deserialize;

pub const DEFAULT_MIN_CONTEXT_LEN: usize = 10;
pub const DEFAULT_MIN_OPTIONS: usize = 2;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompassConfig {
    pub history: Option<HistoryConfig>,
    pub validation: Option<ValidationConfig>,
    pub advice: Option<AdviceConfig>,
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HistoryConfig {
    pub path: Option<String>,
    pub max_entries: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ValidationConfig {
    pub min_context_len: Option<usize>,
    pub min_options: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdviceConfig {
    /// Program and arguments; the request envelope is written to its stdin.
    #[serde(default)]
    pub command: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub format: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationLimits {
    pub min_context_len: usize,
    pub min_options: usize,
}

impl Default for ValidationLimits {
    fn default() -> Self {
        Self {
            min_context_len: DEFAULT_MIN_CONTEXT_LEN,
            min_options: DEFAULT_MIN_OPTIONS,
        }
    }
}

impl CompassConfig {
    pub fn validation_limits(&self) -> ValidationLimits {
        let defaults = ValidationLimits::default();
        match &self.validation {
            Some(validation) => ValidationLimits {
                min_context_len: validation
                    .min_context_len
                    .unwrap_or(defaults.min_context_len),
                min_options: validation.min_options.unwrap_or(defaults.min_options),
            },
            None => defaults,
        }
    }

    /// Cap on stored decisions; `None` keeps every record.
    pub fn max_history_entries(&self) -> Option<usize> {
        self.history.as_ref().and_then(|history| history.max_entries)
    }

    pub fn history_path(&self) -> Option<&str> {
        self.history
            .as_ref()
            .and_then(|history| history.path.as_deref())
    }

    pub fn advice_command(&self) -> Option<&[String]> {
        self.advice
            .as_ref()
            .map(|advice| advice.command.as_slice())
            .filter(|command| !command.is_empty())
    }

    pub fn output_format(&self) -> Option<&str> {
        self.output.as_ref().and_then(|output| output.format.as_deref())
    }

    pub fn validate(&self) -> Result<(), CompassError> {
        if let Some(history) = &self.history {
            if history.max_entries == Some(0) {
                return Err(CompassError::ConfigParse(
                    "history.max_entries must be greater than 0".to_string(),
                ));
            }
            if history
                .path
                .as_deref()
                .is_some_and(|path| path.trim().is_empty())
            {
                return Err(CompassError::ConfigParse(
                    "history.path cannot be empty".to_string(),
                ));
            }
        }

        if let Some(min_options) = self
            .validation
            .as_ref()
            .and_then(|validation| validation.min_options)
        {
            if min_options < DEFAULT_MIN_OPTIONS {
                return Err(CompassError::ConfigParse(format!(
                    "validation.min_options must be at least {DEFAULT_MIN_OPTIONS} (found {min_options})"
                )));
            }
        }

        if let Some(advice) = &self.advice {
            match advice.command.first() {
                None => {
                    return Err(CompassError::ConfigParse(
                        "advice.command cannot be empty".to_string(),
                    ))
                }
                Some(program) if program.trim().is_empty() => {
                    return Err(CompassError::ConfigParse(
                        "advice.command program name cannot be blank".to_string(),
                    ))
                }
                Some(_) => {}
            }
        }

        if let Some(format) = self.output_format() {
            if !matches!(format, "md" | "json") {
                return Err(CompassError::ConfigParse(format!(
                    "unsupported output.format: {format}"
                )));
            }
        }

        Ok(())
    }
}
