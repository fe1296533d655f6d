//! Fields of the TARS-AI assistant configuration.

use super::schema::{ConfigField, Requirement, Schema};
use super::validation::Validator;
use crate::domain::SchemaError;

/// Language model backends the chat client knows how to talk to.
pub const LLM_BACKENDS: &[&str] = &["openai", "ooba", "tabby"];

/// Speech synthesis engines.
pub const TTS_OPTIONS: &[&str] = &["azure", "local", "alltalk", "piper", "xttsv2"];

/// PCA9685 pulse width counts are 12-bit.
const PWM_MAX: i64 = 4095;

/// Build the assistant schema.
pub fn tars_schema() -> Result<Schema, SchemaError> {
    let pulse = Validator::IntRange { min: 0, max: PWM_MAX };

    let fields = vec![
        // Speech to text
        ConfigField::string("STT", "wake_word")
            .default_value("hey tars")
            .validate(Validator::NonEmpty)
            .describe("Phrase that wakes the assistant"),
        ConfigField::boolean("STT", "use_server")
            .default_value(false)
            .describe("Send audio to a transcription server instead of local Vosk"),
        ConfigField::string("STT", "server_url")
            .default_value("http://127.0.0.1:5678")
            .validate(Validator::Url)
            .describe("Transcription server base URL"),
        ConfigField::string("STT", "vosk_model")
            .default_value("vosk-model-small-en-us-0.15")
            .validate(Validator::NonEmpty)
            .describe("Local Vosk model directory name"),
        ConfigField::boolean("STT", "use_indicators")
            .default_value(false)
            .describe("Play listening indicator sounds"),
        // Character
        ConfigField::string("CHAR", "character_card_path")
            .validate(Validator::NonEmpty)
            .describe("Path to the character card JSON"),
        ConfigField::string("CHAR", "user_name")
            .default_value("User")
            .validate(Validator::NonEmpty)
            .describe("Name substituted for {{user}} in the greeting"),
        // Language model
        ConfigField::enumeration("LLM", "llm_backend", LLM_BACKENDS).describe("Chat completion backend"),
        ConfigField::string("LLM", "base_url")
            .validate(Validator::Url)
            .describe("Backend API base URL"),
        ConfigField::string("LLM", "api_key")
            .default_value("")
            .secret()
            .describe("Backend API key"),
        ConfigField::string("LLM", "openai_model")
            .default_value("gpt-4o-mini")
            .validate(Validator::NonEmpty)
            .describe("Model name for the openai backend"),
        ConfigField::integer("LLM", "contextsize")
            .default_value(8000)
            .validate(Validator::IntRange { min: 256, max: 1_048_576 })
            .describe("Context window in tokens"),
        ConfigField::integer("LLM", "max_tokens")
            .default_value(200)
            .validate(Validator::IntRange { min: 1, max: 32_768 })
            .describe("Maximum tokens per reply"),
        ConfigField::float("LLM", "temperature")
            .default_value(0.7)
            .validate(Validator::FloatRange { min: 0.0, max: 2.0 })
            .describe("Sampling temperature"),
        ConfigField::float("LLM", "top_p")
            .default_value(1.0)
            .validate(Validator::FloatRange { min: 0.0, max: 1.0 })
            .describe("Nucleus sampling cutoff"),
        // Vision
        ConfigField::boolean("VISION", "server_hosted")
            .default_value(false)
            .describe("Caption images on a server instead of locally"),
        ConfigField::string("VISION", "base_url")
            .default_value("http://127.0.0.1:5678")
            .validate(Validator::Url)
            .describe("Captioning server base URL"),
        // Text to speech
        ConfigField::enumeration("TTS", "ttsoption", TTS_OPTIONS).describe("Speech synthesis engine"),
        ConfigField::string("TTS", "ttsurl")
            .default_value("http://127.0.0.1:8020")
            .validate(Validator::Url)
            .describe("Synthesis server URL (alltalk, xttsv2)"),
        ConfigField::boolean("TTS", "toggle_charvoice")
            .default_value(true)
            .describe("Use the character voice"),
        ConfigField::string("TTS", "tts_voice")
            .default_value("TARS2")
            .validate(Validator::NonEmpty)
            .describe("Voice or speaker name"),
        ConfigField::boolean("TTS", "voice_only")
            .default_value(false)
            .describe("Speak replies without printing them"),
        ConfigField::string("TTS", "azure_api_key")
            .default_value("")
            .secret()
            .describe("Azure Speech subscription key"),
        ConfigField::string("TTS", "azure_region")
            .default_value("eastus")
            .validate(Validator::NonEmpty)
            .describe("Azure Speech region"),
        // Servo controller
        ConfigField::integer("SERVO", "i2c_bus")
            .default_value(1)
            .validate(Validator::IntRange { min: 0, max: 16 })
            .describe("I2C bus number of the PWM controller"),
        ConfigField::integer("SERVO", "i2c_address")
            .default_value(0x40)
            .validate(Validator::IntRange { min: 0x03, max: 0x77 })
            .describe("7-bit I2C address of the PWM controller"),
        ConfigField::integer("SERVO", "pwm_frequency")
            .default_value(50)
            .validate(Validator::IntRange { min: 24, max: 1526 })
            .describe("PWM frequency in Hz"),
        ConfigField::integer("SERVO", "up_height")
            .default_value(220)
            .validate(pulse.clone())
            .describe("Torso lift pulse, raised"),
        ConfigField::integer("SERVO", "neutral_height")
            .default_value(300)
            .validate(pulse.clone())
            .describe("Torso lift pulse, neutral"),
        ConfigField::integer("SERVO", "down_height")
            .default_value(350)
            .validate(pulse)
            .describe("Torso lift pulse, lowered"),
        ConfigField::float("SERVO", "movement_speed")
            .default_value(0.8)
            .validate(Validator::FloatRange { min: 0.0, max: 1.0 })
            .describe("Fraction of full servo speed"),
        // Chat bridge
        ConfigField::boolean("DISCORD", "enabled")
            .default_value(false)
            .describe("Run the Discord bridge"),
        ConfigField::string("DISCORD", "token")
            .default_value("")
            .secret()
            .describe("Discord bot token"),
        ConfigField::integer("DISCORD", "channel_id")
            .default_value(0)
            .validate(Validator::IntRange { min: 0, max: i64::MAX })
            .describe("Channel that receives the greeting"),
    ];

    let requirements = vec![
        Requirement::new(("TTS", "ttsoption"), "azure", ("TTS", "azure_api_key")),
        Requirement::new(("DISCORD", "enabled"), true, ("DISCORD", "token")),
    ];

    Schema::new(fields, requirements)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use crate::domain::parser::ConfigSource;

    #[test]
    fn test_schema_is_consistent() {
        let schema = tars_schema().unwrap();
        assert!(schema.contains("STT", "use_server"));
        assert!(schema.contains("DISCORD", "token"));
        assert!(schema.field("DISCORD", "token").unwrap().is_secret());
        assert!(schema.field("LLM", "api_key").unwrap().is_secret());

        let required: Vec<_> = schema
            .fields()
            .iter()
            .filter(|f| f.is_required())
            .map(|f| f.id().to_string())
            .collect();
        assert_eq!(
            required,
            [
                "[CHAR] character_card_path",
                "[LLM] llm_backend",
                "[LLM] base_url",
                "[TTS] ttsoption",
            ]
        );
    }

    #[test]
    fn test_azure_needs_key() {
        let text = "\
[CHAR]
character_card_path = character/TARS.json
[LLM]
llm_backend = tabby
base_url = http://127.0.0.1:5000
[TTS]
ttsoption = azure
";
        let schema = tars_schema().unwrap();
        let err = ConfigLoader::load(&ConfigSource::parse(text).unwrap(), &schema).unwrap_err();
        assert_eq!(
            err.to_string(),
            "found 1 configuration error:\n  - [TTS] azure_api_key: must be set when [TTS] ttsoption = azure"
        );

        let with_key = text.replace("ttsoption = azure", "ttsoption = azure\nazure_api_key = k");
        let snap = ConfigLoader::load(&ConfigSource::parse(&with_key).unwrap(), &schema).unwrap();
        assert_eq!(snap.get_str("TTS", "ttsoption"), Some("azure"));
        assert_eq!(snap.get_int("SERVO", "i2c_address"), Some(0x40));
    }
}
