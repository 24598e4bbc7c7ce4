use crate::elevator::fsm::CarFsm;
use crate::error::{Error, Result};
use crossbeam_channel as cbc;
use log::{debug, info};
use parking_lot::{Mutex, MutexGuard};
use std::sync::Arc;
use std::thread::{Builder, JoinHandle};

/**
 * # Car
 * Handle to one running car.
 *
 * The car's `CarFsm` is shared between the car thread, which advances it on its own timed
 * schedule, and the dispatcher, which reads it and enqueues calls. Each car has its own lock;
 * nobody ever holds two cars' locks from a car thread.
 *
 * # Fields
 * - `id`:              Index of the car in the bank.
 * - `fsm`:             Shared state machine.
 * - `terminate_tx`:    Stops the car thread at its next suspension point.
 * - `thread`:          Join handle of the car thread.
 */
pub struct Car {
    id: usize,
    fsm: Arc<Mutex<CarFsm>>,
    terminate_tx: cbc::Sender<()>,
    thread: Option<JoinHandle<()>>,
}

impl Car {
    pub fn spawn(id: usize, fsm: CarFsm) -> Result<Car> {
        let fsm = Arc::new(Mutex::new(fsm));
        let (terminate_tx, terminate_rx) = cbc::bounded::<()>(1);

        let driver = CarDriver {
            id,
            fsm: fsm.clone(),
            terminate_rx,
        };

        let thread = Builder::new()
            .name(format!("car_{}", id))
            .spawn(move || driver.run())
            .map_err(Error::Spawn)?;

        info!("car {} started", id);

        Ok(Car {
            id,
            fsm,
            terminate_tx,
            thread: Some(thread),
        })
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn lock(&self) -> MutexGuard<'_, CarFsm> {
        self.fsm.lock()
    }

    pub fn is_running(&self) -> bool {
        self.thread.as_ref().map_or(false, |t| !t.is_finished())
    }

    pub fn stop(&mut self) {
        if let Some(thread) = self.thread.take() {
            // Full or disconnected both mean the thread is already on its way out
            let _ = self.terminate_tx.try_send(());
            if thread.join().is_err() {
                log::error!("car {} thread panicked", self.id);
            }
            info!("car {} stopped", self.id);
        }
    }
}

impl Drop for Car {
    fn drop(&mut self) {
        self.stop();
    }
}

struct CarDriver {
    id: usize,
    fsm: Arc<Mutex<CarFsm>>,
    terminate_rx: cbc::Receiver<()>,
}

impl CarDriver {
    fn run(self) {
        loop {
            let delay = self.fsm.lock().pending_delay();

            cbc::select! {
                recv(self.terminate_rx) -> _ => {
                    debug!("car {} terminating", self.id);
                    return;
                }
                default(delay) => {
                    self.fsm.lock().resume();
                }
            }
        }
    }
}
