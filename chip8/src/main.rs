//! # vip8
//! Runs a CHIP-8 ROM in an SDL2 window.
//!
//! ```text
//! vip8 roms/PONG --ips 700 --scale 10
//! ```
//!
//! Hold Space to run without throttling and press Escape to quit. Set `RUST_LOG=vip8=trace` to
//! log every executed instruction.

use std::path::PathBuf;

use clap::Parser;

use vip8::constants::CLOCK_SPEED;
use vip8::Config;

mod display;
mod keymap;
mod run;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[arg(help = "Path to the ROM file to run")]
    rom: PathBuf,

    #[arg(short, long, default_value_t = CLOCK_SPEED, help = "Instructions per second")]
    ips: u32,

    #[arg(short, long, default_value_t = display::SCALE, help = "Window pixels per CHIP-8 pixel")]
    scale: u32,

    #[arg(long, help = "Seed for the random number generator")]
    seed: Option<u64>,

    #[arg(
        long,
        default_value_t = 1,
        help = "Decrement the timers once every N instructions"
    )]
    timer_divider: u32,

    #[arg(
        long,
        conflicts_with = "timer_divider",
        help = "Decrement the timers at 60Hz of wall clock time instead"
    )]
    realtime_timers: bool,
}

impl Args {
    fn config(&self) -> Config {
        let config = Config {
            seed: self.seed,
            ..Config::default()
        };
        if self.realtime_timers {
            config.with_timer_divider(0)
        } else {
            config.with_timer_divider(self.timer_divider)
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    run::run(&args.rom, args.config(), args.ips, args.scale)
}
