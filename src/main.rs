//! Weft - continuously morphing wavetable texture synthesizer

use anyhow::Result;
use clap::Parser;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use weft::config;
use weft::engine::{player, Engine, Player, Recorder};
use weft::synth::BankId;

mod cli;

use cli::{Cli, Commands};

fn other_bank(bank: BankId) -> BankId {
    match bank {
        BankId::A => BankId::B,
        BankId::B => BankId::A,
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Play { config: config_path } => {
            println!("Loading configuration from {:?}...", config_path);
            let cfg = config::load_config(&config_path)?;

            println!("Starting Weft...");
            println!("  Sample rate: {} Hz", cfg.audio.sample_rate);
            println!("  Frequency: {} Hz", cfg.texture.frequency);
            println!(
                "  Harmonics: A={} B={}",
                cfg.texture.harmonics_a, cfg.texture.harmonics_b
            );
            println!("  Morph rate: {} Hz", cfg.texture.lfo_frequency);

            let engine = Arc::new(Mutex::new(Engine::new(cfg.clone())));
            let mut audio_player = Player::new();
            audio_player.start(engine.clone(), cfg.audio.device.as_deref())?;

            let running = Arc::new(AtomicBool::new(true));
            let handler_flag = running.clone();
            ctrlc::set_handler(move || {
                handler_flag.store(false, Ordering::SeqCst);
            })?;

            println!("\nPlaying. Press Ctrl-C to stop.");

            let tick = Duration::from_millis(100);
            let mut next_bank = BankId::A;
            let mut since_reroll = 0.0;
            let mut since_trigger = 0.0;

            while running.load(Ordering::SeqCst) {
                std::thread::sleep(tick);
                since_reroll += 0.1;
                since_trigger += 0.1;

                if let Some(interval) = cfg.regenerate.interval {
                    if since_reroll >= interval {
                        since_reroll = 0.0;
                        if let Ok(mut eng) = engine.lock() {
                            eng.reroll(next_bank);
                        }
                        println!("  Re-rolled bank {:?}", next_bank);
                        next_bank = other_bank(next_bank);
                    }
                }

                // Percussive mode needs a pulse; retrigger once a second
                if cfg.texture.drum && since_trigger >= 1.0 {
                    since_trigger = 0.0;
                    if let Ok(mut eng) = engine.lock() {
                        eng.trigger();
                    }
                }
            }

            audio_player.stop();
            println!("\nStopped.");
        }

        Commands::Record {
            config: config_path,
            output,
            duration,
        } => {
            println!("Loading configuration from {:?}...", config_path);
            let cfg = config::load_config(&config_path)?;

            println!("Recording {} seconds to {:?}...", duration, output);

            let mut engine = Engine::new(cfg.clone());

            let sample_rate = cfg.audio.sample_rate;
            let total_frames = (sample_rate as u64 * duration) as usize;
            let reroll_frames = cfg
                .regenerate
                .interval
                .map(|seconds| (seconds * sample_rate as f64) as usize);
            let mut next_bank = BankId::A;

            let mut recorder = Recorder::new(&output, sample_rate)?;

            for i in 0..total_frames {
                if let Some(frames) = reroll_frames {
                    if i > 0 && i % frames == 0 {
                        engine.reroll(next_bank);
                        next_bank = other_bank(next_bank);
                    }
                }

                // Once-a-second pulse keeps drum mode audible offline
                if cfg.texture.drum && i % sample_rate as usize == 0 {
                    engine.trigger();
                }

                let sample = engine.process() as f32;
                recorder.write_frame(sample)?;

                // Progress update every second
                if i % (sample_rate as usize) == 0 {
                    print!(
                        "\r  Progress: {}s / {}s",
                        i / sample_rate as usize,
                        duration
                    );
                    use std::io::Write;
                    std::io::stdout().flush()?;
                }
            }

            recorder.finalize()?;
            println!("\nRecorded to {:?}", output);
        }

        Commands::Devices => {
            println!("Available output devices:\n");

            if let Some(name) = player::default_device_name() {
                println!("Default output: {}", name);
                println!();
            }

            let devices = player::list_output_devices();
            if devices.is_empty() {
                println!("  (none found)");
            }
            for (name, config) in devices {
                println!(
                    "  - {} ({} Hz, {} ch)",
                    name, config.sample_rate.0, config.channels
                );
            }
        }

        Commands::Check { config: config_path } => {
            println!("Checking configuration at {:?}...", config_path);

            match config::load_config(&config_path) {
                Ok(cfg) => {
                    println!("Configuration is valid!");
                    println!("  Sample rate: {} Hz", cfg.audio.sample_rate);
                    println!("  Buffer size: {}", cfg.audio.buffer_size);
                    println!("  Frequency: {} Hz", cfg.texture.frequency);
                    println!("  Gain: {:.0}%", cfg.texture.gain * 100.0);
                    println!(
                        "  Inharmonic gain: {:.0}%",
                        cfg.texture.inharmonic_gain * 100.0
                    );
                    println!(
                        "  Harmonics: A={} B={}",
                        cfg.texture.harmonics_a, cfg.texture.harmonics_b
                    );
                    println!("  Morph rate: {} Hz", cfg.texture.lfo_frequency);
                    match cfg.texture.seed {
                        Some(seed) => println!("  Seed: {}", seed),
                        None => println!("  Seed: default"),
                    }
                    println!("  Drum mode: {}", cfg.texture.drum);
                    println!("  Sync mode: {}", cfg.texture.sync);
                    match cfg.regenerate.interval {
                        Some(interval) => println!("  Re-roll interval: {}s", interval),
                        None => println!("  Re-roll: disabled"),
                    }
                }
                Err(e) => {
                    println!("Configuration is invalid: {}", e);
                    std::process::exit(1);
                }
            }
        }

        Commands::Init => {
            let example_config = include_str!("../weft.example.yaml");

            let path = "weft.yaml";
            if std::path::Path::new(path).exists() {
                println!("weft.yaml already exists. Not overwriting.");
            } else {
                std::fs::write(path, example_config)?;
                println!("Created weft.yaml with example configuration.");
            }
        }
    }

    Ok(())
}
