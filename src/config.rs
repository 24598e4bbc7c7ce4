/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::error::{Error, Result};

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub dispatcher: DispatcherConfig,
    pub car: CarConfig,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct DispatcherConfig {
    pub n_cars: usize,
    pub n_floors: i32,
    pub enforce_floor_bounds: bool,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        DispatcherConfig {
            n_cars: 1,
            n_floors: 5,
            enforce_floor_bounds: true,
        }
    }
}

/// Car timing, all in milliseconds.
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct CarConfig {
    pub step_ms: u64,
    pub dwell_ms: u64,
    pub poll_ms: u64,
}

impl Default for CarConfig {
    fn default() -> Self {
        CarConfig {
            step_ms: 1000,
            dwell_ms: 3000,
            poll_ms: 200,
        }
    }
}

impl CarConfig {
    pub fn step(&self) -> Duration {
        Duration::from_millis(self.step_ms)
    }

    pub fn dwell(&self) -> Duration {
        Duration::from_millis(self.dwell_ms)
    }

    pub fn poll(&self) -> Duration {
        Duration::from_millis(self.poll_ms)
    }
}

/***************************************/
/*             Public API              */
/***************************************/
impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.dispatcher.n_cars == 0 {
            return Err(Error::InvalidConfig("n_cars must be at least 1".into()));
        }
        if self.dispatcher.n_floors < 1 {
            return Err(Error::InvalidConfig("n_floors must be at least 1".into()));
        }
        // An idle car re-checks its queue every poll; zero would spin.
        if self.car.poll_ms == 0 {
            return Err(Error::InvalidConfig("poll_ms must be greater than 0".into()));
        }
        Ok(())
    }
}

pub fn parse_config(config_str: &str) -> Result<Config> {
    let config: Config = toml::from_str(config_str)?;
    config.validate()?;
    Ok(config)
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let config_str = fs::read_to_string(path)?;
    parse_config(&config_str)
}

/***************************************/
/*             Unit tests              */
/***************************************/
