/***************************************/
/*        3rd party libraries          */
/***************************************/
use log::{debug, info};

/***************************************/
/*           Local modules             */
/***************************************/
use crate::config::{CarConfig, Config, DispatcherConfig};
use crate::dispatcher::assigner::{self, CallOutcome};
use crate::elevator::{Car, CarFsm};
use crate::error::{Error, Result};
use crate::shared::{CarSnapshot, Status};

/**
 * # Dispatcher
 * Owns the bank of cars and routes floor calls to them.
 *
 * The dispatcher never moves a car. It reads every car's position, status and queue to decide
 * where a call goes, and appends the floor to the chosen car's queue. All car locks are held,
 * in index order, for the whole decision so a car cannot pop its queue halfway through it.
 *
 * # Fields
 * - `cars`:                    Cars in tie-break order.
 * - `n_floors`:                Top floor of the building.
 * - `enforce_floor_bounds`:    Reject calls outside `1..=n_floors`.
 */
pub struct Dispatcher {
    cars: Vec<Car>,
    n_floors: i32,
    enforce_floor_bounds: bool,
}

impl Dispatcher {
    pub fn new(config: &DispatcherConfig, car_config: &CarConfig) -> Result<Dispatcher> {
        let fsms = (0..config.n_cars).map(|_| CarFsm::new(car_config)).collect();
        Dispatcher::with_cars(config, car_config, fsms)
    }

    pub fn from_config(config: &Config) -> Result<Dispatcher> {
        Dispatcher::new(&config.dispatcher, &config.car)
    }

    /// Starts a dispatcher over cars that may already have state.
    pub(crate) fn with_cars(
        config: &DispatcherConfig,
        car_config: &CarConfig,
        fsms: Vec<CarFsm>,
    ) -> Result<Dispatcher> {
        Config {
            dispatcher: DispatcherConfig {
                n_cars: fsms.len(),
                ..config.clone()
            },
            car: car_config.clone(),
        }
        .validate()?;

        let cars = fsms
            .into_iter()
            .enumerate()
            .map(|(id, fsm)| Car::spawn(id, fsm))
            .collect::<Result<Vec<Car>>>()?;

        info!(
            "dispatcher started with {} cars over {} floors",
            cars.len(),
            config.n_floors
        );

        Ok(Dispatcher {
            cars,
            n_floors: config.n_floors,
            enforce_floor_bounds: config.enforce_floor_bounds,
        })
    }

    pub fn n_cars(&self) -> usize {
        self.cars.len()
    }

    pub fn n_floors(&self) -> i32 {
        self.n_floors
    }

    pub fn call_elevator(&self, floor: i32) -> Result<CallOutcome> {
        if self.enforce_floor_bounds && !(1..=self.n_floors).contains(&floor) {
            return Err(Error::InvalidFloor {
                floor,
                n_floors: self.n_floors,
            });
        }

        let mut fsms: Vec<_> = self.cars.iter().map(Car::lock).collect();
        let snapshots: Vec<CarSnapshot> = fsms.iter().map(|fsm| fsm.snapshot()).collect();

        let outcome = assigner::assign(&snapshots, floor).ok_or(Error::NoCars)?;

        match outcome {
            CallOutcome::Assigned(index) => {
                fsms[index].add_call(floor);
                info!("floor {} assigned to car {}", floor, self.cars[index].id());
            }
            CallOutcome::AlreadyServed(index) => {
                debug!("floor {} ignored, car {} is standing there", floor, index);
            }
            CallOutcome::AlreadyQueued(index) => {
                debug!("floor {} ignored, already queued on car {}", floor, index);
            }
        }

        Ok(outcome)
    }

    pub fn snapshot(&self) -> Vec<CarSnapshot> {
        self.cars.iter().map(|car| car.lock().snapshot()).collect()
    }

    /// True when every car is idle with nothing queued.
    pub fn is_settled(&self) -> bool {
        self.snapshot()
            .iter()
            .all(|car| car.status == Status::Idle && car.queue.is_empty())
    }

    pub fn shutdown(mut self) {
        self.stop_cars();
    }

    fn stop_cars(&mut self) {
        for car in self.cars.iter_mut() {
            car.stop();
        }
    }
}

impl Drop for Dispatcher {
    fn drop(&mut self) {
        self.stop_cars();
    }
}
