//! postoffice-runner: headless driver for the post office simulation.
//!
//! Usage:
//!   postoffice-runner --seed 12345
//!   postoffice-runner --open 8:30 --close 17:00 --spawn-prob 0.35
//!   postoffice-runner --interactive
//!   postoffice-runner --json > events.jsonl
//!
//! The engine itself never prints; everything visible here comes from
//! the sink attached for the run (narrative console output by default,
//! one JSON object per event with --json, the `log` facade with
//! --log-events) plus the end-of-run summary.

use anyhow::{Context, Result};
use postoffice_core::{
    clock,
    config::SimConfig,
    engine::{RunState, SimEngine},
    event::{RunStats, SimEvent},
    sink::{EventSink, LogSink},
};
use std::env;
use std::io::{self, BufRead, Write};

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    let mut config = SimConfig::default();
    if let Some(open) = str_arg(&args, "--open") {
        config.open = clock::parse_time(open).with_context(|| format!("--open {open}"))?;
    }
    if let Some(close) = str_arg(&args, "--close") {
        config.close = clock::parse_time(close).with_context(|| format!("--close {close}"))?;
    }
    config.spawn_probability = parse_arg(&args, "--spawn-prob", config.spawn_probability);
    config.minutes_per_task = parse_arg(&args, "--task-minutes", config.minutes_per_task);
    config.robbery_probability = parse_arg(&args, "--robbery-prob", config.robbery_probability);
    config.robbery_success_rate = parse_arg(&args, "--success-rate", config.robbery_success_rate);
    config.kill_probability = parse_arg(&args, "--kill-prob", config.kill_probability);
    config.spawn_boost = parse_arg(&args, "--boost", config.spawn_boost);
    config.spawn_drop = parse_arg(&args, "--drop", config.spawn_drop);
    config.adjustment_coefficient = parse_arg(&args, "--decay", config.adjustment_coefficient);
    if let Some(threshold) = str_arg(&args, "--reset-threshold") {
        config.adjustment_reset_threshold =
            Some(threshold.parse().with_context(|| format!("--reset-threshold {threshold}"))?);
    }

    let seed = parse_arg(&args, "--seed", 42u64);
    let interactive = args.iter().any(|a| a == "--interactive");
    let json = args.iter().any(|a| a == "--json");
    let log_events = args.iter().any(|a| a == "--log-events");

    if !json {
        println!("postoffice-runner");
        println!("  started:  {}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"));
        println!("  seed:     {seed}");
        println!(
            "  window:   {} to {}",
            clock::display(config.open),
            clock::display(config.close)
        );
        println!();
    }

    let mut engine = SimEngine::seeded(config, seed)?;

    let mut sink: Box<dyn EventSink> = if json {
        Box::new(JsonLineSink)
    } else if log_events {
        Box::new(LogSink)
    } else {
        Box::new(ConsoleSink)
    };

    let stats = if interactive {
        run_interactive(&mut engine, sink.as_mut())?
    } else {
        Some(run_batch(&mut engine, sink.as_mut()))
    };

    if let Some(stats) = stats {
        if !json {
            print_summary(&stats);
        }
    }
    Ok(())
}

/// Step until the run ends.
fn run_batch(engine: &mut SimEngine, sink: &mut dyn EventSink) -> RunStats {
    loop {
        if let RunState::Ended(stats) = engine.advance(sink) {
            return stats;
        }
    }
}

/// One step per input line; the driver owns the pacing. Returns None if
/// the user quits before the run ends.
fn run_interactive(engine: &mut SimEngine, sink: &mut dyn EventSink) -> Result<Option<RunStats>> {
    let stdin = io::stdin();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    println!("(enter = step, q = quit)");
    loop {
        print!("> ");
        io::stdout().flush()?;

        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 || buffer.trim() == "q" {
            return Ok(None);
        }

        match engine.advance(sink) {
            RunState::Ended(stats) => return Ok(Some(stats)),
            RunState::Continuing => {
                println!(
                    "  [it is {}, {} in line]",
                    clock::display(engine.current_time()),
                    engine.queue_len()
                );
            }
        }
    }
}

fn print_summary(stats: &RunStats) {
    println!();
    println!("=== RUN SUMMARY ===");
    println!("  customers:  {}", stats.customer_count);
    println!("  total wait: {} minutes", stats.total_wait_minutes);
    match stats.mean_wait_minutes {
        Some(mean) => println!("  mean wait:  {mean:.1} minutes"),
        None => println!("  mean wait:  n/a"),
    }
}

/// Narrative console output, one line per event.
struct ConsoleSink;

impl EventSink for ConsoleSink {
    fn emit(&mut self, event: &SimEvent) {
        match event {
            SimEvent::FacilityOpened { time } => {
                println!("{} The post office opens", clock::display(*time));
            }
            SimEvent::FacilityClosed { time } => {
                println!("{} The post office closes", clock::display(*time));
            }
            SimEvent::ServedImmediately { time, customer } => {
                println!(
                    "{} Customer {customer} enters the post office and is served immediately.",
                    clock::display(*time)
                );
            }
            SimEvent::Queued { time, customer, position } => {
                println!(
                    "{} Customer {customer} enters the post office and stands in line as no. {position}",
                    clock::display(*time)
                );
            }
            SimEvent::Departed { time, customer } => {
                println!("{} Customer {customer} leaves", clock::display(*time));
            }
            SimEvent::HandedOff { time, departed, now_serving } => {
                println!(
                    "{} Customer {departed} leaves and customer {now_serving} is served",
                    clock::display(*time)
                );
            }
            SimEvent::RobberyStarted { time } => {
                println!("{} A robber has entered the post office!", clock::display(*time));
            }
            SimEvent::QueueDispersed { casualties, .. } => {
                println!("The queue has dispersed and {casualties} customers have been killed!");
            }
            SimEvent::RobberyResolved { succeeded, .. } => {
                if *succeeded {
                    println!("The clerk tries to fight off the robbers, but fails.");
                } else {
                    println!("The clerk tries to fight off the robbers, and succeeds!");
                }
            }
            // The driver prints the summary from the returned stats.
            SimEvent::RunEnded { .. } => {}
        }
    }
}

/// One JSON object per event on stdout.
struct JsonLineSink;

impl EventSink for JsonLineSink {
    fn emit(&mut self, event: &SimEvent) {
        match serde_json::to_string(event) {
            Ok(line) => println!("{line}"),
            Err(err) => log::error!("cannot serialize event: {err}"),
        }
    }
}

fn str_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
