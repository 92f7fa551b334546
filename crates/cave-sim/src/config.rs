/// Tunable constants for a game session.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// RNG seed.
    pub seed: u64,
    /// Turns from the last treasure being found until the closing warning.
    pub clock1: i32,
    /// Turns from the closing warning until the cave closes.
    pub clock2: i32,
    /// What the second clock drops to when the player panics.
    pub panic_clock: i32,
    /// Lamp life in turns.
    pub lamp_limit: i32,
    /// Lamp life for players who asked for instructions.
    pub novice_lamp_limit: i32,
    /// Every how many visits a location gets its long description.
    pub abbreviate_every: u32,
    /// Percent chance of falling into a pit when moving between dark places.
    pub dark_fall_chance: u32,
    /// Ask the instructions question at start-up.
    pub ask_instructions: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            clock1: 30,
            clock2: 50,
            panic_clock: 15,
            lamp_limit: 330,
            novice_lamp_limit: 1000,
            abbreviate_every: 5,
            dark_fall_chance: 35,
            ask_instructions: true,
        }
    }
}

impl GameConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set both endgame clocks.
    pub fn with_clocks(mut self, clock1: i32, clock2: i32) -> Self {
        self.clock1 = clock1;
        self.clock2 = clock2;
        self
    }

    /// Set the lamp life for ordinary players.
    pub fn with_lamp_limit(mut self, turns: i32) -> Self {
        self.lamp_limit = turns;
        self
    }

    /// Set the pit-fall chance in the dark.
    pub fn with_dark_fall_chance(mut self, percent: u32) -> Self {
        self.dark_fall_chance = percent;
        self
    }

    /// Whether to ask the instructions question at start-up.
    pub fn with_instructions(mut self, ask: bool) -> Self {
        self.ask_instructions = ask;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_default_values() {
        let config = GameConfig::default();
        assert_eq!(config.seed, 42);
        assert_eq!(config.clock1, 30);
        assert_eq!(config.clock2, 50);
        assert_eq!(config.panic_clock, 15);
        assert_eq!(config.lamp_limit, 330);
        assert_eq!(config.abbreviate_every, 5);
        assert!(config.ask_instructions);
    }

    #[test]
    fn config_builder_chain() {
        let config = GameConfig::default()
            .with_seed(123)
            .with_clocks(3, 4)
            .with_lamp_limit(40)
            .with_dark_fall_chance(0)
            .with_instructions(false);
        assert_eq!(config.seed, 123);
        assert_eq!((config.clock1, config.clock2), (3, 4));
        assert_eq!(config.lamp_limit, 40);
        assert_eq!(config.dark_fall_chance, 0);
        assert!(!config.ask_instructions);
    }
}
