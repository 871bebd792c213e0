use crate::model::GameModel;

/// Construction-time options for a [`VideoCore`](crate::video::VideoCore),
/// mirroring the `EmulatorOptions`/`EmulatorOptionsBuilder` pair the rest of
/// this lineage uses for its own top-level configuration.
#[derive(Debug, Clone)]
pub struct VideoCoreConfig {
    pub model: GameModel,
    /// Renderer calls are skipped whenever frameskip counts down below zero,
    /// then reset; `0` draws every frame.
    pub frameskip: u8,
}

impl Default for VideoCoreConfig {
    fn default() -> Self {
        VideoCoreConfig {
            model: GameModel::Dmg,
            frameskip: 0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct VideoCoreConfigBuilder {
    model: GameModel,
    frameskip: u8,
}

impl VideoCoreConfigBuilder {
    pub fn new() -> Self {
        let defaults = VideoCoreConfig::default();
        VideoCoreConfigBuilder {
            model: defaults.model,
            frameskip: defaults.frameskip,
        }
    }

    pub fn model(mut self, model: GameModel) -> Self {
        self.model = model;
        self
    }

    pub fn frameskip(mut self, frameskip: u8) -> Self {
        self.frameskip = frameskip;
        self
    }

    pub fn build(self) -> VideoCoreConfig {
        VideoCoreConfig {
            model: self.model,
            frameskip: self.frameskip,
        }
    }
}

impl Default for VideoCoreConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl From<VideoCoreConfig> for VideoCoreConfigBuilder {
    fn from(from: VideoCoreConfig) -> Self {
        VideoCoreConfigBuilder {
            model: from.model,
            frameskip: from.frameskip,
        }
    }
}
