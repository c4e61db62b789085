//! Configuration for the command layer.

/// Configuration for a [`Bot`](crate::Bot).
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Character that starts every command.
    pub prefix: char,
    /// RNG seed for reproducible dice; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            prefix: '.',
            seed: None,
        }
    }
}

impl BotConfig {
    /// Set the command prefix.
    pub fn with_prefix(mut self, prefix: char) -> Self {
        self.prefix = prefix;
        self
    }

    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
