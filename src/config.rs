/// # Config
/// Settings fixed for the lifetime of a `Chip8`.
///
/// ## Timers
/// `timer_divider` controls how the cycle driver advances the delay and sound timers:
/// - `1` decrements them once per cycle (the default)
/// - `N > 1` decrements them once every `N` cycles
/// - `0` leaves them alone; the host is expected to call `Chip8::tick_timers` at 60Hz
///
/// ## Randomness
/// `seed` fixes the random generator used by `RND`. Without one it is seeded from the OS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub seed: Option<u64>,
    pub timer_divider: u32,
}

impl Config {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_timer_divider(mut self, divider: u32) -> Self {
        self.timer_divider = divider;
        self
    }

    /// Whether the host, rather than the cycle driver, owns timer ticks.
    pub fn host_driven_timers(&self) -> bool {
        self.timer_divider == 0
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            seed: None,
            timer_divider: 1,
        }
    }
}
