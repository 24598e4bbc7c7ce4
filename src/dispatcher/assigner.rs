/***************************************/
/*        3rd party libraries          */
/***************************************/
use log::debug;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::{CarSnapshot, Status};

/***************************************/
/*       Public data structures        */
/***************************************/
/// What a floor call led to. The index is the car's position in the bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallOutcome {
    /// A car is already standing at the floor.
    AlreadyServed(usize),
    /// The floor is already in some car's queue.
    AlreadyQueued(usize),
    Assigned(usize),
}

/***************************************/
/*             Public API              */
/***************************************/
/**
 * Decides what to do with a call for `floor`, given the current state of every car.
 *
 * Returns `None` only when `cars` is empty.
 */
pub fn assign(cars: &[CarSnapshot], floor: i32) -> Option<CallOutcome> {
    if let Some(index) = cars
        .iter()
        .position(|car| car.status != Status::Moving && car.position == floor)
    {
        return Some(CallOutcome::AlreadyServed(index));
    }

    if let Some(index) = cars.iter().position(|car| car.is_in_work(floor)) {
        return Some(CallOutcome::AlreadyQueued(index));
    }

    select_car(cars, floor).map(CallOutcome::Assigned)
}

/// Closest idle car if there is one, otherwise the least loaded car.
pub fn select_car(cars: &[CarSnapshot], floor: i32) -> Option<usize> {
    closest_idle_car(cars, floor).or_else(|| least_loaded_car(cars))
}

// Earliest index wins ties: only a strictly closer car replaces the best so far
pub fn closest_idle_car(cars: &[CarSnapshot], floor: i32) -> Option<usize> {
    let mut best: Option<(usize, u32)> = None;

    for (index, car) in cars.iter().enumerate() {
        if car.status != Status::Idle {
            continue;
        }
        let distance = car.position.abs_diff(floor);
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((index, distance)),
        }
    }

    best.map(|(index, _)| index)
}

// Earliest index wins ties, same as above
pub fn least_loaded_car(cars: &[CarSnapshot]) -> Option<usize> {
    let mut best: Option<(usize, usize)> = None;

    for (index, car) in cars.iter().enumerate() {
        let load = car.load();
        match best {
            Some((_, best_load)) if load >= best_load => {}
            _ => best = Some((index, load)),
        }
    }

    if let Some((index, load)) = best {
        debug!(
            "minimally loaded: car {} with {} calls, loads {:?}",
            index,
            load,
            cars.iter().map(CarSnapshot::load).collect::<Vec<_>>()
        );
    }

    best.map(|(index, _)| index)
}
