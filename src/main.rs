/* 3rd party libraries */
use anyhow::{bail, Context};
use clap::Parser;
use crossbeam_channel as cbc;
use log::{debug, info, warn, LevelFilter};
use std::io::BufRead;
use std::path::PathBuf;
use std::thread::Builder;
use std::time::Duration;

/* Custom libraries */
use elevator_sim::config::{self, Config};
use elevator_sim::unwrap_or_exit;
use elevator_sim::{CallOutcome, Dispatcher, Error};

#[derive(Debug, Parser)]
#[clap(name = "elevator-sim", about = "Simulates a bank of elevator cars")]
struct Args {
    /// Configuration file, defaults are used if it does not exist
    #[clap(long, default_value = "config.toml")]
    config: PathBuf,

    #[clap(long)]
    cars: Option<usize>,

    #[clap(long)]
    floors: Option<i32>,

    /// Floors to call at start-up, comma separated
    #[clap(long, use_value_delimiter = true)]
    calls: Vec<i32>,

    /// Milliseconds between status prints
    #[clap(long, default_value_t = 1000)]
    status_interval: u64,

    /// Print status as JSON lines
    #[clap(long)]
    json: bool,

    #[clap(long)]
    log_level: Option<LevelFilter>,
}

/* Main */
fn main() {
    let args = Args::parse();

    let mut logger =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if let Some(level) = args.log_level {
        logger.filter_level(level);
    }
    logger.init();

    unwrap_or_exit!(run(args));
}

fn run(args: Args) -> anyhow::Result<()> {
    if args.status_interval == 0 {
        bail!("--status-interval must be greater than 0");
    }

    let config = build_config(&args)?;
    let dispatcher =
        Dispatcher::from_config(&config).context("Failed to start the elevator bank")?;

    for &floor in &args.calls {
        submit_call(&dispatcher, floor);
    }

    // Floor calls from stdin, one per line
    let (call_tx, call_rx) = cbc::unbounded::<i32>();
    Builder::new()
        .name("stdin_reader".into())
        .spawn(move || read_calls(call_tx))
        .context("Failed to start stdin reader")?;

    let mut call_rx = call_rx;
    let mut input_closed = false;
    let ticker = cbc::tick(Duration::from_millis(args.status_interval));

    loop {
        cbc::select! {
            recv(call_rx) -> call => {
                match call {
                    Ok(floor) => submit_call(&dispatcher, floor),
                    Err(_) => {
                        info!("Input closed, waiting for the cars to settle");
                        call_rx = cbc::never();
                        input_closed = true;
                    }
                }
            }
            recv(ticker) -> _ => {
                print_status(&dispatcher, args.json)?;
                if input_closed && dispatcher.is_settled() {
                    break;
                }
            }
        }
    }

    dispatcher.shutdown();
    Ok(())
}

fn build_config(args: &Args) -> anyhow::Result<Config> {
    let mut config = if args.config.exists() {
        config::load_config(&args.config)
            .with_context(|| format!("Failed to read {}", args.config.display()))?
    } else {
        warn!("{} not found, using defaults", args.config.display());
        Config::default()
    };

    if let Some(cars) = args.cars {
        config.dispatcher.n_cars = cars;
    }
    if let Some(floors) = args.floors {
        config.dispatcher.n_floors = floors;
    }
    config.validate()?;

    Ok(config)
}

fn read_calls(call_tx: cbc::Sender<i32>) {
    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!("Failed to read input: {}", e);
                break;
            }
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match line.parse::<i32>() {
            Ok(floor) => {
                if call_tx.send(floor).is_err() {
                    break;
                }
            }
            Err(_) => warn!("Ignoring '{}', expected a floor number", line),
        }
    }
}

fn submit_call(dispatcher: &Dispatcher, floor: i32) {
    match dispatcher.call_elevator(floor) {
        Ok(CallOutcome::Assigned(car)) => debug!("Call {} -> car {}", floor, car),
        Ok(CallOutcome::AlreadyServed(car)) => debug!("Call {}: car {} is already there", floor, car),
        Ok(CallOutcome::AlreadyQueued(car)) => debug!("Call {}: already queued on car {}", floor, car),
        Err(e @ Error::InvalidFloor { .. }) => warn!("Call rejected: {}", e),
        Err(e) => log::error!("Call {} failed: {}", floor, e),
    }
}

fn print_status(dispatcher: &Dispatcher, json: bool) -> anyhow::Result<()> {
    let cars = dispatcher.snapshot();
    if json {
        println!("{}", serde_json::to_string(&cars)?);
    } else {
        for (id, car) in cars.iter().enumerate() {
            println!("car {}: {}", id, car);
        }
    }
    Ok(())
}
