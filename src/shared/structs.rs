/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Deserialize;
use serde::Serialize;
use std::fmt;

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    #[serde(rename = "IDLE")]
    Idle,
    #[serde(rename = "MOVING")]
    Moving,
    #[serde(rename = "WAITING")]
    Waiting,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Status::Idle => "IDLE",
            Status::Moving => "MOVING",
            Status::Waiting => "WAITING",
        };
        f.pad(label)
    }
}

/**
 * Read-only view of one car, as seen by the dispatcher and by anything
 * rendering the bank.
 *
 * # Fields
 * - `position`:    Floor the car is currently at.
 * - `status`:      Idle, moving toward the front of the queue, or dwelling.
 * - `queue`:       Pending destinations, front first.
 */
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CarSnapshot {
    pub position: i32,
    pub status: Status,
    pub queue: Vec<i32>,
}

impl CarSnapshot {
    pub fn new(position: i32, status: Status, queue: Vec<i32>) -> CarSnapshot {
        CarSnapshot {
            position,
            status,
            queue,
        }
    }

    pub fn is_in_work(&self, floor: i32) -> bool {
        self.queue.contains(&floor)
    }

    pub fn load(&self) -> usize {
        self.queue.len()
    }
}

impl fmt::Display for CarSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "floor {} {:<7} {:?}", self.position, self.status, self.queue)
    }
}

/***************************************/
/*             Unit tests              */
/***************************************/
