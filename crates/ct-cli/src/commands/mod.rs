pub mod repl;
pub mod roll;

use ct_bot::BotConfig;

/// Build a bot configuration from command-line flags.
fn bot_config(seed: Option<u64>, prefix: char) -> BotConfig {
    let config = BotConfig::default().with_prefix(prefix);
    match seed {
        Some(seed) => config.with_seed(seed),
        None => config,
    }
}
