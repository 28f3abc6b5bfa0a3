use std::path::Path;

use anyhow::Context;
use marbles_core::{GameConfig, Seed};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::Args;

/// Frontend settings, read from an optional TOML file and overridden by flags.
///
/// ```toml
/// seed = "0000beef"
/// step_delay_ms = 40
/// animate = true
///
/// [game]
/// side = 12
/// colors = 5
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub game: GameConfig,
    /// Fixed seed for the first deal, random when unset
    pub seed: Option<Seed>,
    /// Pause after every settling swap
    pub step_delay_ms: u64,
    /// Reprint the board after every settling swap
    pub animate: bool,
    /// Print reported snapshots as JSON lines
    pub json: bool,
}

/// A fresh seed from the operating system's random source.
pub fn random_seed() -> Seed {
    Seed::new(SmallRng::from_os_rng().random())
}

impl Settings {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Could not read config file {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn parse(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_args(args: &Args) -> anyhow::Result<Self> {
        let mut settings = match &args.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        settings.apply(args)?;
        settings.game = GameConfig::new(settings.game.side, settings.game.colors);
        log::debug!("settings: {settings:?}");
        Ok(settings)
    }

    fn apply(&mut self, args: &Args) -> anyhow::Result<()> {
        if let Some(side) = args.side {
            self.game.side = side;
        }
        if let Some(colors) = args.colors {
            self.game.colors = colors;
        }
        if let Some(seed) = &args.seed {
            self.seed = Some(seed.parse::<Seed>().with_context(|| format!("Invalid seed {seed:?}"))?);
        }
        if let Some(delay) = args.step_delay_ms {
            self.step_delay_ms = delay;
        }
        self.animate |= args.animate;
        self.json |= args.json;
        Ok(())
    }
}
