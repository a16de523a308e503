use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{Context, Error};
use log::{debug, info};
use sdl2::event::Event;
use sdl2::keyboard::Keycode;

use vip8::constants::TIMER_FREQUENCY;
use vip8::{Chip8, Config};

use crate::display::Display;
use crate::keymap::keymap;

pub fn run(rom: &Path, config: Config, ips: u32, scale: u32) -> anyhow::Result<()> {
    let mut chip8 = Chip8::with_config(config);
    chip8
        .load_rom_file(rom)
        .with_context(|| format!("unable to load {}", rom.display()))?;

    // Get SDL2 context
    let sdl = sdl2::init().map_err(Error::msg)?;
    let mut display = Display::new(&sdl, scale)?;
    let mut events = sdl.event_pump().map_err(Error::msg)?;

    // Instructions run in batches, one batch per 60Hz frame
    let frame_time = Duration::from_secs(1) / TIMER_FREQUENCY;
    let cycles_per_frame = (ips / TIMER_FREQUENCY).max(1);
    info!(
        "running at {} instructions per second ({} per frame)",
        ips, cycles_per_frame
    );

    // Whether or not the clock speed should be respected
    let mut fast_forward = false;
    let mut sounding = false;

    'event: loop {
        let frame_start = Instant::now();

        // Handle input
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => break 'event,
                Event::KeyDown {
                    keycode: Some(key), ..
                } => match (key, keymap(key)) {
                    (_, Some(kc)) => chip8.key_press(kc),
                    (Keycode::Space, _) => fast_forward = true,
                    _ => continue,
                },
                Event::KeyUp {
                    keycode: Some(key), ..
                } => match (key, keymap(key)) {
                    (_, Some(kc)) => chip8.key_release(kc),
                    (Keycode::Space, _) => fast_forward = false,
                    _ => continue,
                },
                _ => continue,
            };
        }

        // Update state
        for _ in 0..cycles_per_frame {
            chip8.cycle()?;
        }
        if chip8.config().host_driven_timers() {
            chip8.tick_timers();
        }

        // No audio output; only report when the tone would start and stop
        if chip8.sound_active() != sounding {
            sounding = chip8.sound_active();
            debug!("tone {}", if sounding { "on" } else { "off" });
        }

        // If the frame changed, render it
        if let Some(frame) = chip8.take_frame() {
            display.render(&frame)?;
        }

        // Handle timing
        let elapsed = frame_start.elapsed();
        if !fast_forward && frame_time > elapsed {
            std::thread::sleep(frame_time - elapsed);
        }
    }

    Ok(())
}
