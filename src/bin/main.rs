mod audio;
mod config;
mod input;

use chip8_vm::{read_rom, Emulator, FRAME_BUFFER_PIXEL_HEIGHT, FRAME_BUFFER_PIXEL_WIDTH};
use log::{error, info, warn};
use minifb::{Key, KeyRepeat, Scale, Window, WindowOptions};
use simple_logger::SimpleLogger;

use std::process;
use std::thread;
use std::time::{Duration, Instant};

use audio::Beeper;
use config::Config;
use input::MiniFBInput;

const MICROS_BETWEEN_TIMER_TICKS: u128 = 1_000_000 / 60;
const MICROS_BETWEEN_DISPLAY_REFRESH: u128 = 1_000_000 / 60;

const PIXEL_OFF_COLOR: u32 = 0x00_2C_50_66;
const PIXEL_ON_COLOR: u32 = 0x00_68_BB_ED;

fn create_window(scale: Scale) -> Result<Window, Box<dyn std::error::Error>> {
    let mut opts = WindowOptions::default();

    opts.scale = scale;
    let window = Window::new(
        "CHIP-8",
        FRAME_BUFFER_PIXEL_WIDTH,
        FRAME_BUFFER_PIXEL_HEIGHT,
        opts,
    )?;

    Ok(window)
}

fn create_beeper(config: &Config) -> Beeper {
    if config.mute {
        return Beeper::silent();
    }

    Beeper::new(config.tone).unwrap_or_else(|err| {
        warn!("Running without sound: {}", err);
        Beeper::silent()
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_args();
    SimpleLogger::new().with_level(config.log_level).init()?;

    let rom = match read_rom(&config.rom) {
        Ok(rom) => rom,
        Err(err) => {
            error!("{}", err);
            eprintln!("{}", err);
            process::exit(1);
        }
    };

    let micros_between_cycles = (1_000_000 / config.cycles_per_second as u128).max(1);
    let mut last_instant = Instant::now();
    let mut last_timer_tick = Instant::now();
    let mut last_redraw = Instant::now();

    let mut window = create_window(config.scale)?;
    let mut input = MiniFBInput::new();
    let beeper = create_beeper(&config);
    let mut emulator = Emulator::new(rom)?;
    info!(
        "Running {} at {} instructions per second",
        config.rom.display(),
        config.cycles_per_second
    );

    while window.is_open() && !window.is_key_down(Key::Escape) {
        if window.is_key_pressed(Key::F1, KeyRepeat::No) && !emulator.is_initial_state() {
            emulator = emulator.reset()?;
            beeper.set_active(false);
            last_instant = Instant::now();
            last_timer_tick = Instant::now();
            last_redraw = Instant::now();
            continue;
        }

        if last_timer_tick.elapsed().as_micros() >= MICROS_BETWEEN_TIMER_TICKS {
            last_timer_tick = Instant::now();
            emulator.tick_timers();
        }

        let delta = last_instant.elapsed();
        if delta.as_micros() >= micros_between_cycles {
            // Catch up on every cycle owed since the last pass, input is only
            // sampled per frame anyway.
            let owed = delta.as_micros() / micros_between_cycles;
            for _ in 0..owed {
                emulator.step(&input);
            }
            last_instant = Instant::now();
        }
        beeper.set_active(emulator.tone_active());

        if last_redraw.elapsed().as_micros() >= MICROS_BETWEEN_DISPLAY_REFRESH {
            last_redraw = Instant::now();

            if emulator.framebuffer().is_dirty() {
                let buffer = emulator
                    .framebuffer()
                    .rgba_framebuffer()
                    .into_iter()
                    .map(|value| {
                        if value == 0x0 {
                            PIXEL_OFF_COLOR
                        } else {
                            PIXEL_ON_COLOR
                        }
                    })
                    .collect::<Vec<u32>>();

                window.update_with_buffer(&buffer)?;
                emulator.clear_dirty();
            } else {
                window.update();
            }

            input.update_key_state(&window);
        }

        let elapsed = last_instant.elapsed().as_micros();
        if elapsed < micros_between_cycles {
            thread::sleep(Duration::from_micros((micros_between_cycles - elapsed) as u64));
        }
    }

    Ok(())
}
