//! User preferences.
//!
//! Built-in defaults live in `default.yaml`. A user file, if any, is layered on
//! top of them so that it only needs to contain the values it changes.

#[macro_use]
extern crate lazy_static;

use std::path::Path;

use serde::{Deserialize, Serialize};

mod animation;
mod interaction;

pub use animation::*;
pub use interaction::*;

const PREFS_FILE_FORMAT: config::FileFormat = config::FileFormat::Yaml;
const DEFAULT_PREFS_STR: &str = include_str!("default.yaml");

lazy_static! {
    /// Built-in default preferences.
    pub static ref DEFAULT_PREFS: Preferences =
        serde_norway::from_str(DEFAULT_PREFS_STR).expect("error loading default preferences");
}

/// All user preferences.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct Preferences {
    /// Animation timing.
    pub animation: AnimationPreferences,
    /// Mouse and touch input.
    pub interaction: InteractionPreferences,
    /// Shuffle generation.
    pub shuffle: ShufflePreferences,
}
impl Preferences {
    /// Loads preferences, layering the user file (if any) over the defaults.
    ///
    /// Errors are logged and the defaults are returned instead.
    pub fn load(user_file: Option<&Path>) -> Self {
        lazy_static::initialize(&DEFAULT_PREFS);

        Self::try_load(user_file).unwrap_or_else(|e| {
            log::warn!("Error loading preferences: {e}");
            DEFAULT_PREFS.clone()
        })
    }
    /// Loads preferences, layering the user file (if any) over the defaults.
    pub fn try_load(user_file: Option<&Path>) -> eyre::Result<Self> {
        let mut config = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_PREFS_STR, PREFS_FILE_FORMAT));
        if let Some(path) = user_file {
            log::debug!("Loading user preferences from {}", path.display());
            config = config.add_source(config::File::from(path).format(PREFS_FILE_FORMAT));
        }
        let prefs: Self = config.build()?.try_deserialize()?;
        prefs.validate()?;
        Ok(prefs)
    }

    /// Saves preferences to a YAML file.
    pub fn save(&self, path: &Path) -> eyre::Result<()> {
        if let Some(p) = path.parent() {
            std::fs::create_dir_all(p)?;
        }
        serde_norway::to_writer(std::fs::File::create(path)?, self)?;
        Ok(())
    }

    /// Returns an error if any value is out of range.
    fn validate(&self) -> eyre::Result<()> {
        let durations = [
            ("animation.twist_duration", self.animation.twist_duration),
            (
                "animation.shuffle_twist_duration",
                self.animation.shuffle_twist_duration,
            ),
            (
                "animation.celebration_duration",
                self.animation.celebration_duration,
            ),
            (
                "animation.message_linger_duration",
                self.animation.message_linger_duration,
            ),
            ("interaction.drag_threshold", self.interaction.drag_threshold),
        ];
        for (name, value) in durations {
            if !value.is_finite() || value < 0.0 {
                eyre::bail!("{name} must be a nonnegative number, not {value}");
            }
        }
        let alignment = self.interaction.min_drag_alignment;
        if !(0.0..=1.0).contains(&alignment) {
            eyre::bail!("interaction.min_drag_alignment must be between 0 and 1, not {alignment}");
        }
        Ok(())
    }
}

/// Shuffle preferences.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ShufflePreferences {
    /// Number of random moves in a shuffle.
    pub length: u32,
    /// Whether to shuffle the puzzle as soon as it is created.
    pub on_start: bool,
}
impl Default for ShufflePreferences {
    fn default() -> Self {
        Self {
            length: 20,
            on_start: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_yaml_matches_default_impl() {
        assert_eq!(*DEFAULT_PREFS, Preferences::default());
        assert_eq!(Preferences::load(None), Preferences::default());
    }

    #[test]
    fn test_user_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "animation:\n  twist_duration: 0.5\nshuffle:\n  on_start: false").unwrap();

        let prefs = Preferences::try_load(Some(file.path())).unwrap();
        assert_eq!(prefs.animation.twist_duration, 0.5);
        assert!(!prefs.shuffle.on_start);
        // Untouched values come from the defaults.
        assert_eq!(prefs.animation.shuffle_twist_duration, 0.1);
        assert_eq!(prefs.shuffle.length, 20);
        assert_eq!(prefs.interaction, InteractionPreferences::default());
    }

    #[test]
    fn test_invalid_file_falls_back_to_defaults() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "interaction:\n  min_drag_alignment: 3.0").unwrap();

        assert!(Preferences::try_load(Some(file.path())).is_err());
        assert_eq!(Preferences::load(Some(file.path())), Preferences::default());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs").join("neoncube.yaml");

        let mut prefs = Preferences::default();
        prefs.interaction.initial_mode = PuzzleMode::Fixed;
        prefs.animation.twist_interpolation = InterpolateFn::Cosine;
        prefs.save(&path).unwrap();

        assert_eq!(Preferences::try_load(Some(&path)).unwrap(), prefs);
    }
}
