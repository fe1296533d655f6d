//! Configuration service for reading config files and generating templates.

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use super::schema::Schema;
use super::{ConfigLoader, ConfigSnapshot};
use crate::domain::parser::ConfigSource;
use crate::domain::LoadError;

/// Configuration service.
pub struct ConfigService;

impl ConfigService {
    /// Get the default configuration file path.
    /// Always uses ~/.config/tars-ai/config.ini for cross-platform consistency.
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("tars-ai")
            .join("config.ini")
    }

    /// Read, parse and resolve a configuration file.
    ///
    /// If `path` is `None`, uses the default path. A missing file is an error;
    /// use [`ConfigService::generate_at`] to create one.
    pub fn load(path: Option<&Path>, schema: &Schema) -> Result<ConfigSnapshot, LoadError> {
        let path = path.map(PathBuf::from).unwrap_or_else(Self::default_path);

        let content = fs::read_to_string(&path).map_err(|source| LoadError::Io {
            path: path.clone(),
            source,
        })?;

        let snapshot = Self::load_str(&content, schema)?;
        info!(
            path = %path.display(),
            fields = snapshot.len(),
            warnings = snapshot.warnings().len(),
            "configuration loaded"
        );
        Ok(snapshot)
    }

    /// Parse and resolve configuration text.
    pub fn load_str(content: &str, schema: &Schema) -> Result<ConfigSnapshot, LoadError> {
        let source = ConfigSource::parse(content).map_err(LoadError::Syntax)?;
        ConfigLoader::load(&source, schema)
    }

    /// Generate default configuration file at the default path.
    pub fn generate_default(force: bool) -> Result<PathBuf> {
        let path = Self::default_path();
        Self::generate_at(&path, force)?;
        Ok(path)
    }

    /// Generate default configuration file at the specified path.
    ///
    /// Refuses to replace an existing file unless `force` is set.
    pub fn generate_at(path: &Path, force: bool) -> Result<()> {
        if path.exists() && !force {
            bail!(
                "Config file already exists: {} (use --force to overwrite)",
                path.display()
            );
        }

        // Create parent directories if needed
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        fs::write(path, Self::default_config_content())
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Default configuration content with comments.
    pub fn default_config_content() -> &'static str {
        r#"# TARS-AI configuration file
#
# Booleans accept true/false, yes/no, on/off or 1/0.
# Comments start with '#' or ';', on their own line or after a value.

[STT]
wake_word = hey tars
# Transcribe on a server instead of with the local Vosk model
use_server = false
server_url = http://127.0.0.1:5678
vosk_model = vosk-model-small-en-us-0.15
use_indicators = false

[CHAR]
character_card_path = character/TARS.json
user_name = User

[LLM]
# One of: openai, ooba, tabby
llm_backend = openai
base_url = https://api.openai.com
api_key =
openai_model = gpt-4o-mini
contextsize = 8000
max_tokens = 200
temperature = 0.7    # 0.0 - 2.0
top_p = 1.0

[VISION]
server_hosted = false
base_url = http://127.0.0.1:5678

[TTS]
# One of: azure, local, alltalk, piper, xttsv2
ttsoption = piper
ttsurl = http://127.0.0.1:8020
toggle_charvoice = true
tts_voice = TARS2
voice_only = false
# Required when ttsoption = azure
azure_api_key =
azure_region = eastus

[SERVO]
i2c_bus = 1
i2c_address = 64    # 0x40
pwm_frequency = 50
up_height = 220
neutral_height = 300
down_height = 350
movement_speed = 0.8

[DISCORD]
enabled = false
# Required when enabled = true
token =
channel_id = 0
"#
    }
}
