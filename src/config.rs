use std::path::Path;

use tracing::warn;

use crate::error::ConfigError;
use crate::game::notation::LABEL_COUNT;
use crate::game::{Game, Representation};

/// Game setup, loadable from TOML.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Pieces in a row needed to win.
    pub run: usize,
    pub width: usize,
    pub height: usize,
    pub representation: Representation,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            run: 4,
            width: 7,
            height: 6,
            representation: Representation::Dense,
        }
    }
}

impl GameConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: GameConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    ///
    /// Only checks what the front ends need; the engine rejects unplayable
    /// boards itself when the game is built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width > LABEL_COUNT {
            return Err(ConfigError::Validation(format!(
                "width must be <= {LABEL_COUNT} so every column has a label"
            )));
        }
        Ok(())
    }

    /// Build a fresh game from this configuration.
    pub fn new_game(&self) -> Result<Game, ConfigError> {
        self.validate()?;
        Ok(Game::new(
            self.run,
            self.width,
            self.height,
            self.representation,
        )?)
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&GameConfig::default()).expect("default config serializes")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GameError;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = GameConfig::default();
        config.validate().expect("default config should be valid");
        let game = config.new_game().unwrap();
        assert_eq!(game.run(), 4);
        assert_eq!(game.width(), 7);
        assert_eq!(game.height(), 6);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml_str = r#"
run = 3
representation = "packed"
"#;
        let config: GameConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.run, 3);
        assert_eq!(config.representation, Representation::Packed);
        // Other fields should be defaults
        assert_eq!(config.width, 7);
        assert_eq!(config.height, 6);
    }

    #[test]
    fn test_empty_toml_uses_all_defaults() {
        let config: GameConfig = toml::from_str("").unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn test_unknown_representation_rejected() {
        assert!(toml::from_str::<GameConfig>("representation = \"sparse\"").is_err());
    }

    #[test]
    fn test_validation_rejects_unlabelled_width() {
        let mut config = GameConfig::default();
        config.width = 62;
        assert!(config.validate().is_ok());
        config.width = 63;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_new_game_reports_engine_errors() {
        let config = GameConfig {
            run: 9,
            width: 3,
            height: 3,
            representation: Representation::Dense,
        };
        assert!(matches!(
            config.new_game(),
            Err(ConfigError::Game(GameError::ImpracticalRun { .. }))
        ));

        let config = GameConfig {
            height: 0,
            ..GameConfig::default()
        };
        assert!(matches!(
            config.new_game(),
            Err(ConfigError::Game(GameError::ZeroDimension { .. }))
        ));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = GameConfig::load_or_default(Path::new("nonexistent_config.toml")).unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test_config.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(
            f,
            r#"
width = 10
height = 8
"#
        )
        .unwrap();

        let config = GameConfig::load(&path).unwrap();
        assert_eq!(config.width, 10);
        assert_eq!(config.height, 8);
        // Others are defaults
        assert_eq!(config.run, 4);
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "width = 100\n").unwrap();
        assert!(matches!(
            GameConfig::load(&path),
            Err(ConfigError::Validation(_))
        ));

        std::fs::write(&path, "width = \"wide\"\n").unwrap();
        assert!(matches!(GameConfig::load(&path), Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn test_default_toml_roundtrips() {
        let toml_str = GameConfig::default_toml();
        let config: GameConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config, GameConfig::default());
    }
}
