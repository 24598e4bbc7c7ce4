/*
 * Unit tests for the car state machine
 *
 * The unit tests follows the Arrange, Act, Assert pattern. Time is simulated: each
 * `advance` jumps the virtual clock by the pending delay and resumes the FSM, so the
 * timings are checked exactly without sleeping.
 *
 * Tests:
 * - test_fsm_init
 * - test_fsm_idle_ticks
 * - test_fsm_movement_timing
 * - test_fsm_moving_down
 * - test_fsm_destination_is_current_floor
 * - test_fsm_fifo_no_interruption
 * - test_fsm_is_in_work
 * - test_fsm_add_call_keeps_duplicates
 * - test_fsm_snapshot
 */

/***************************************/
/*             Unit tests              */
/***************************************/
#[cfg(test)]
mod fsm_tests {
    use crate::config::CarConfig;
    use crate::elevator::fsm::{CarFsm, CarState};
    use crate::shared::Status::{Idle, Moving, Waiting};
    use std::time::Duration;

    struct VirtualClock {
        now: Duration,
        fsm: CarFsm,
    }

    impl VirtualClock {
        fn new() -> VirtualClock {
            VirtualClock {
                now: Duration::ZERO,
                fsm: CarFsm::new(&CarConfig::default()),
            }
        }

        fn advance(&mut self) -> u64 {
            self.now += self.fsm.pending_delay();
            self.fsm.resume();
            self.now.as_millis() as u64
        }

        fn run_until_idle(&mut self) {
            for _ in 0..1000 {
                self.advance();
                if self.fsm.status() == Idle {
                    return;
                }
            }
            panic!("car never became idle");
        }
    }

    #[test]
    fn test_fsm_init() {
        // Arrange
        let fsm = CarFsm::new(&CarConfig::default());

        // Assert
        assert_eq!(fsm.position(), 1);
        assert_eq!(fsm.state(), CarState::Idle);
        assert_eq!(fsm.status(), Idle);
        assert_eq!(fsm.load(), 0);
        assert_eq!(fsm.pending_delay(), Duration::from_millis(200));
    }

    #[test]
    fn test_fsm_idle_ticks() {
        // Arrange
        let mut clock = VirtualClock::new();

        // Act & Assert
        for tick in 1..=5 {
            assert_eq!(clock.advance(), tick * 200);
            assert_eq!(clock.fsm.status(), Idle);
            assert_eq!(clock.fsm.position(), 1);
        }
    }

    #[test]
    fn test_fsm_movement_timing() {
        // Purpose: a car at floor 1 sent to floor 4 passes 2, 3, 4 one second apart,
        // waits exactly the dwell time at 4 and then pops the destination

        // Arrange
        let mut clock = VirtualClock::new();
        clock.fsm.add_call(4);

        // Act & Assert
        assert_eq!(clock.advance(), 200);
        assert_eq!(clock.fsm.state(), CarState::MovingTo(4));
        assert_eq!(clock.fsm.position(), 1);

        assert_eq!(clock.advance(), 1200);
        assert_eq!(clock.fsm.position(), 2);
        assert_eq!(clock.fsm.status(), Moving);

        assert_eq!(clock.advance(), 2200);
        assert_eq!(clock.fsm.position(), 3);
        assert_eq!(clock.fsm.status(), Moving);

        assert_eq!(clock.advance(), 3200);
        assert_eq!(clock.fsm.position(), 4);
        assert_eq!(clock.fsm.state(), CarState::Waiting(4));
        assert_eq!(clock.fsm.queue().copied().collect::<Vec<_>>(), vec![4]);
        assert_eq!(clock.fsm.pending_delay(), Duration::from_millis(3000));

        assert_eq!(clock.advance(), 6200);
        assert_eq!(clock.fsm.load(), 0);
        assert_eq!(clock.fsm.status(), Waiting);

        assert_eq!(clock.advance(), 6400);
        assert_eq!(clock.fsm.status(), Idle);
        assert_eq!(clock.fsm.position(), 4);
    }

    #[test]
    fn test_fsm_moving_down() {
        // Arrange
        let mut clock = VirtualClock::new();
        clock.fsm.add_call(4);
        clock.run_until_idle();

        // Act
        clock.fsm.add_call(2);
        clock.advance();
        assert_eq!(clock.fsm.state(), CarState::MovingTo(2));
        clock.advance();

        // Assert
        assert_eq!(clock.fsm.position(), 3);
        clock.advance();
        assert_eq!(clock.fsm.position(), 2);
        assert_eq!(clock.fsm.state(), CarState::Waiting(2));
    }

    #[test]
    fn test_fsm_destination_is_current_floor() {
        // Arrange
        let mut clock = VirtualClock::new();
        clock.fsm.add_call(1);

        // Act
        clock.advance();

        // Assert
        assert_eq!(clock.fsm.position(), 1);
        assert_eq!(clock.fsm.state(), CarState::Waiting(1));
        assert_eq!(clock.fsm.pending_delay(), Duration::from_millis(3000));
    }

    #[test]
    fn test_fsm_fifo_no_interruption() {
        // Purpose: a call for a floor on the way does not stop the car, it is served after
        // the current destination

        // Arrange
        let mut clock = VirtualClock::new();
        clock.fsm.add_call(5);
        clock.advance();
        clock.advance();
        assert_eq!(clock.fsm.position(), 2);

        // Act
        clock.fsm.add_call(3);

        // Assert
        clock.advance();
        assert_eq!(clock.fsm.position(), 3);
        assert_eq!(clock.fsm.state(), CarState::MovingTo(5));

        clock.advance();
        clock.advance();
        assert_eq!(clock.fsm.position(), 5);
        assert_eq!(clock.fsm.state(), CarState::Waiting(5));

        clock.advance();
        assert_eq!(clock.fsm.queue().copied().collect::<Vec<_>>(), vec![3]);

        clock.advance();
        assert_eq!(clock.fsm.state(), CarState::MovingTo(3));
        clock.advance();
        clock.advance();
        assert_eq!(clock.fsm.position(), 3);
        assert_eq!(clock.fsm.state(), CarState::Waiting(3));

        clock.run_until_idle();
        assert_eq!(clock.fsm.load(), 0);
    }

    #[test]
    fn test_fsm_is_in_work() {
        // Arrange
        let mut fsm = CarFsm::new(&CarConfig::default());

        // Act
        fsm.add_call(3);
        fsm.add_call(5);

        // Assert
        assert!(fsm.is_in_work(3));
        assert!(fsm.is_in_work(5));
        assert!(!fsm.is_in_work(4));
        assert!(!fsm.is_in_work(1));
    }

    #[test]
    fn test_fsm_add_call_keeps_duplicates() {
        // Arrange
        let mut fsm = CarFsm::new(&CarConfig::default());

        // Act
        fsm.add_call(2);
        fsm.add_call(2);

        // Assert
        assert_eq!(fsm.queue().copied().collect::<Vec<_>>(), vec![2, 2]);
        assert_eq!(fsm.load(), 2);
    }

    #[test]
    fn test_fsm_snapshot() {
        // Arrange
        let mut clock = VirtualClock::new();
        clock.fsm.add_call(3);
        clock.fsm.add_call(2);

        // Act
        clock.advance();
        clock.advance();
        let snapshot = clock.fsm.snapshot();

        // Assert
        assert_eq!(snapshot.position, 2);
        assert_eq!(snapshot.status, Moving);
        assert_eq!(snapshot.queue, vec![3, 2]);
    }
}
