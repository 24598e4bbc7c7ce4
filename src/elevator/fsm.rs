use crate::config::CarConfig;
use crate::shared::{CarSnapshot, Status};
use log::{trace, warn};
use std::collections::VecDeque;
use std::time::Duration;

/**
 * State machine of a single car.
 *
 * The `CarFsm` holds the car's position, its FIFO call queue and the state it is in. It never
 * sleeps itself: `pending_delay` tells the driver how long the current suspension lasts, and
 * `resume` performs whatever transition follows once that time has passed. The car thread
 * drives it with real time, tests drive it with a virtual clock.
 *
 * # Fields
 * - `position`:    Current floor, starts at 1.
 * - `state`:       Idle, moving toward a destination, or dwelling at one.
 * - `queue`:       Pending destinations, served front first.
 * - `timer`:       Which suspension is currently in flight.
 * - `step`:        Time to travel one floor.
 * - `dwell`:       Time held at a floor after arrival.
 * - `poll`:        Period between queue checks.
 */

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarState {
    Idle,
    MovingTo(i32),
    Waiting(i32),
}

impl CarState {
    pub fn status(&self) -> Status {
        match self {
            CarState::Idle => Status::Idle,
            CarState::MovingTo(_) => Status::Moving,
            CarState::Waiting(_) => Status::Waiting,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Timer {
    Poll,
    Step,
    Dwell,
}

#[derive(Debug, Clone)]
pub struct CarFsm {
    position: i32,
    state: CarState,
    queue: VecDeque<i32>,
    timer: Timer,
    step: Duration,
    dwell: Duration,
    poll: Duration,
}

impl CarFsm {
    pub fn new(config: &CarConfig) -> CarFsm {
        CarFsm {
            position: 1,
            state: CarState::Idle,
            queue: VecDeque::new(),
            timer: Timer::Poll,
            step: config.step(),
            dwell: config.dwell(),
            poll: config.poll(),
        }
    }

    pub fn position(&self) -> i32 {
        self.position
    }

    pub fn state(&self) -> CarState {
        self.state
    }

    pub fn status(&self) -> Status {
        self.state.status()
    }

    pub fn queue(&self) -> impl Iterator<Item = &i32> {
        self.queue.iter()
    }

    pub fn load(&self) -> usize {
        self.queue.len()
    }

    pub fn snapshot(&self) -> CarSnapshot {
        CarSnapshot::new(self.position, self.status(), self.queue.iter().copied().collect())
    }

    pub fn is_in_work(&self, floor: i32) -> bool {
        self.queue.contains(&floor)
    }

    pub fn add_call(&mut self, floor: i32) {
        self.queue.push_back(floor);
    }

    pub fn pending_delay(&self) -> Duration {
        match self.timer {
            Timer::Poll => self.poll,
            Timer::Step => self.step,
            Timer::Dwell => self.dwell,
        }
    }

    pub fn resume(&mut self) {
        match self.timer {
            Timer::Poll => self.handle_poll(),
            Timer::Step => self.handle_step(),
            Timer::Dwell => self.handle_dwell_done(),
        }
    }

    fn handle_poll(&mut self) {
        match self.queue.front().copied() {
            None => {
                self.state = CarState::Idle;
                self.timer = Timer::Poll;
            }
            Some(destination) => {
                trace!("floor {}: heading for {}", self.position, destination);
                self.state = CarState::MovingTo(destination);
                self.timer = Timer::Step;
                // Destination may already be the current floor
                self.check_arrival(destination);
            }
        }
    }

    fn handle_step(&mut self) {
        let destination = match self.state {
            CarState::MovingTo(destination) => destination,
            // Only a moving car arms the step timer
            state => {
                debug_assert!(false, "step timer fired in state {:?}", state);
                warn!("step timer fired in state {:?}, back to polling", state);
                self.timer = Timer::Poll;
                return;
            }
        };

        if destination > self.position {
            self.position += 1;
        } else {
            self.position -= 1;
        }
        trace!("stepped to floor {}", self.position);
        self.check_arrival(destination);
    }

    fn check_arrival(&mut self, destination: i32) {
        if self.position == destination {
            trace!("arrived at floor {}", destination);
            self.state = CarState::Waiting(destination);
            self.timer = Timer::Dwell;
        }
    }

    fn handle_dwell_done(&mut self) {
        let served = self.queue.pop_front();
        trace!("floor {}: done serving {:?}", self.position, served);
        // Status stays WAITING until the next poll decides
        self.timer = Timer::Poll;
    }
}
