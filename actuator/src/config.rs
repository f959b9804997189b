use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::tile_renderer::DEFAULT_SUPER_TILE_THRESHOLD;

pub const DEFAULT_CLICK_THRESHOLD: u32 = 5;
pub const DEFAULT_WRONG_ANSWER_DISMISS_DELAY: Duration = Duration::from_millis(1500);
pub const DEFAULT_REPROMPT_DELAY: Duration = Duration::from_millis(500);
pub const DEFAULT_MERGE_MESSAGE_LIFETIME: Duration = Duration::from_millis(1600);

/// Durations are stored as whole milliseconds.
mod serde_duration {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(value.as_millis().min(u64::MAX as u128) as u64)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnswerOption {
    pub label: String,
    pub correct: bool,
}

impl AnswerOption {
    pub fn new(label: impl Into<String>, correct: bool) -> Self {
        Self {
            label: label.into(),
            correct,
        }
    }
}

/// The static forced question. Needs at least one correct and one wrong option.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuestionConfig {
    pub prompt: String,
    pub options: Vec<AnswerOption>,
    pub hint: String,
}

impl Default for QuestionConfig {
    fn default() -> Self {
        Self {
            prompt: "喷火鱼弱不弱？".to_string(),
            options: vec![
                AnswerOption::new("A：是的", true),
                AnswerOption::new("B：不是", false),
            ],
            hint: "回答错误！请重新选择。".to_string(),
        }
    }
}

impl QuestionConfig {
    pub fn is_answerable(&self) -> bool {
        self.options.iter().any(|o| o.correct) && self.options.iter().any(|o| !o.correct)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageConfig {
    pub won: String,
    pub lost: String,
}

impl Default for MessageConfig {
    fn default() -> Self {
        Self {
            won: "You win!".to_string(),
            lost: "Game over!".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ActuatorConfig {
    /// The forced question opens once the click count exceeds this.
    pub click_threshold: u32,
    /// Tiles strictly above this value get the `tile-super` marker.
    pub super_tile_threshold: u32,
    #[serde(with = "serde_duration")]
    pub wrong_answer_dismiss_delay: Duration,
    #[serde(with = "serde_duration")]
    pub reprompt_delay: Duration,
    #[serde(with = "serde_duration")]
    pub merge_message_lifetime: Duration,
    pub question: QuestionConfig,
    pub messages: MessageConfig,
}

impl Default for ActuatorConfig {
    fn default() -> Self {
        Self {
            click_threshold: DEFAULT_CLICK_THRESHOLD,
            super_tile_threshold: DEFAULT_SUPER_TILE_THRESHOLD,
            wrong_answer_dismiss_delay: DEFAULT_WRONG_ANSWER_DISMISS_DELAY,
            reprompt_delay: DEFAULT_REPROMPT_DELAY,
            merge_message_lifetime: DEFAULT_MERGE_MESSAGE_LIFETIME,
            question: QuestionConfig::default(),
            messages: MessageConfig::default(),
        }
    }
}

impl ActuatorConfig {
    pub fn sanitized(mut self) -> Self {
        self.click_threshold = self.click_threshold.max(1);
        if !self.question.is_answerable() {
            tracing::warn!("forced question needs a correct and a wrong option; using default");
            self.question = QuestionConfig::default();
        }
        self
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        Ok(config.sanitized())
    }
}

/// Locates and reads the optional config file. The actuator itself never touches the filesystem.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_env() -> Self {
        if let Some(explicit) = std::env::var_os("ACTUATOR_CONFIG_PATH") {
            return Self::new(explicit);
        }

        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| {
                std::env::var_os("HOME").map(|home| {
                    let mut p = PathBuf::from(home);
                    p.push(".config");
                    p
                })
            })
            .unwrap_or_else(|| PathBuf::from("."));

        let mut path = base;
        path.push("tile-actuator");
        path.push("config.json");
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing or unreadable files fall back to defaults.
    pub fn load(&self) -> ActuatorConfig {
        let Ok(text) = fs::read_to_string(&self.path) else {
            return ActuatorConfig::default();
        };
        ActuatorConfig::from_json_str(&text).unwrap_or_else(|err| {
            tracing::warn!(path = %self.path.display(), %err, "ignoring unparsable config");
            ActuatorConfig::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_constants() {
        let config = ActuatorConfig::default();
        assert_eq!(config.click_threshold, 5);
        assert_eq!(config.super_tile_threshold, 2048);
        assert_eq!(config.wrong_answer_dismiss_delay, Duration::from_millis(1500));
        assert_eq!(config.reprompt_delay, Duration::from_millis(500));
        assert!(config.question.is_answerable());
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config = ActuatorConfig::from_json_str(r#"{"click_threshold":3,"reprompt_delay":250}"#)
            .expect("config should parse");
        assert_eq!(config.click_threshold, 3);
        assert_eq!(config.reprompt_delay, Duration::from_millis(250));
        assert_eq!(config.wrong_answer_dismiss_delay, Duration::from_millis(1500));
        assert_eq!(config.messages, MessageConfig::default());
    }

    #[test]
    fn sanitized_repairs_degenerate_values() {
        let config = ActuatorConfig {
            click_threshold: 0,
            question: QuestionConfig {
                prompt: "?".into(),
                options: vec![AnswerOption::new("only right", true)],
                hint: String::new(),
            },
            ..ActuatorConfig::default()
        }
        .sanitized();

        assert_eq!(config.click_threshold, 1);
        assert_eq!(config.question, QuestionConfig::default());
    }

    #[test]
    fn invalid_json_is_reported() {
        assert!(ActuatorConfig::from_json_str("{not json").is_err());
    }

    #[test]
    fn store_load_falls_back_when_file_missing() {
        let store = ConfigStore::new("/nonexistent/tile-actuator/config.json");
        assert_eq!(store.load(), ActuatorConfig::default());
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = ActuatorConfig::default();
        let json = serde_json::to_string(&config).expect("serialize config");
        assert!(json.contains("\"wrong_answer_dismiss_delay\":1500"));
        let restored = ActuatorConfig::from_json_str(&json).expect("deserialize config");
        assert_eq!(restored, config);
    }
}
