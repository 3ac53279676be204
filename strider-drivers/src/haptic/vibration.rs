//! GPIO vibration motor
//!
//! Drives a coin vibration motor through a GPIO pin (directly or via a
//! MOSFET/driver transistor).

use embedded_hal::digital::OutputPin;
use embedded_hal_async::delay::DelayNs;

/// Vibration motor output
///
/// The pin can be configured as active-high (default) or active-low.
pub struct VibrationMotor<P> {
    pin: P,
    /// If true, motor ON = pin LOW
    inverted: bool,
    /// Current logical state (true = motor running)
    on: bool,
}

impl<P: OutputPin> VibrationMotor<P> {
    /// Create a new motor output, initially stopped
    ///
    /// # Arguments
    /// - `pin`: The GPIO pin to control
    /// - `inverted`: If true, the motor runs when the pin is LOW
    pub fn new(pin: P, inverted: bool) -> Result<Self, P::Error> {
        let mut motor = Self {
            pin,
            inverted,
            on: false,
        };
        motor.set_on(false)?;
        Ok(motor)
    }

    /// Create a motor output with active-high drive
    pub fn new_active_high(pin: P) -> Result<Self, P::Error> {
        Self::new(pin, false)
    }

    /// Create a motor output with active-low drive
    pub fn new_active_low(pin: P) -> Result<Self, P::Error> {
        Self::new(pin, true)
    }

    /// Start vibrating
    pub fn start(&mut self) -> Result<(), P::Error> {
        self.set_on(true)
    }

    /// Stop vibrating
    pub fn stop(&mut self) -> Result<(), P::Error> {
        self.set_on(false)
    }

    /// Whether the motor is running
    pub fn is_on(&self) -> bool {
        self.on
    }

    /// Run the motor for `duration_ms`, then stop it
    ///
    /// A failed stop is retried once; if the retry also fails the error is
    /// returned and the motor is still running.
    pub async fn pulse<D: DelayNs>(
        &mut self,
        delay: &mut D,
        duration_ms: u32,
    ) -> Result<(), P::Error> {
        self.start()?;
        delay.delay_ms(duration_ms).await;
        self.stop().or_else(|_| self.stop())
    }

    fn set_on(&mut self, on: bool) -> Result<(), P::Error> {
        if on != self.inverted {
            // Normal: on=true, inverted=false → high
            // Inverted: on=true, inverted=true → low
            self.pin.set_high()?;
        } else {
            self.pin.set_low()?;
        }
        self.on = on;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embassy_futures::block_on;
    use embedded_hal::digital::{Error, ErrorKind, ErrorType};

    /// Mock GPIO pin for testing
    #[derive(Default)]
    struct MockPin {
        high: bool,
        history: Vec<bool>,
    }

    impl ErrorType for MockPin {
        type Error = Infallible;
    }

    impl OutputPin for MockPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.high = false;
            self.history.push(false);
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.high = true;
            self.history.push(true);
            Ok(())
        }
    }

    /// Delay that records requested durations
    #[derive(Default)]
    struct MockDelay {
        waited_ns: u64,
    }

    impl DelayNs for MockDelay {
        async fn delay_ns(&mut self, ns: u32) {
            self.waited_ns += u64::from(ns);
        }
    }

    #[test]
    fn test_active_high_motor() {
        let mut motor = VibrationMotor::new_active_high(MockPin::default()).unwrap();

        // Initially off
        assert!(!motor.is_on());
        assert!(!motor.pin.high);

        motor.start().unwrap();
        assert!(motor.is_on());
        assert!(motor.pin.high);

        motor.stop().unwrap();
        assert!(!motor.is_on());
        assert!(!motor.pin.high);
    }

    #[test]
    fn test_active_low_motor() {
        let mut motor = VibrationMotor::new_active_low(MockPin::default()).unwrap();

        // Initially off (pin is high for active-low)
        assert!(!motor.is_on());
        assert!(motor.pin.high);

        motor.start().unwrap();
        assert!(motor.is_on());
        assert!(!motor.pin.high);
    }

    #[test]
    fn test_pulse_waits_then_stops() {
        let mut motor = VibrationMotor::new_active_high(MockPin::default()).unwrap();
        let mut delay = MockDelay::default();

        block_on(motor.pulse(&mut delay, 100)).unwrap();

        assert!(!motor.is_on());
        assert_eq!(motor.pin.history, vec![false, true, false]);
        assert_eq!(delay.waited_ns, 100_000_000);
    }

    #[derive(Debug, PartialEq)]
    struct PinFault;

    impl Error for PinFault {
        fn kind(&self) -> ErrorKind {
            ErrorKind::Other
        }
    }

    /// Pin whose next `failing_lows` calls to `set_low` fail
    #[derive(Default)]
    struct FlakyPin {
        high: bool,
        failing_lows: u8,
        low_attempts: u8,
    }

    impl ErrorType for FlakyPin {
        type Error = PinFault;
    }

    impl OutputPin for FlakyPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.low_attempts += 1;
            if self.failing_lows > 0 {
                self.failing_lows -= 1;
                return Err(PinFault);
            }
            self.high = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.high = true;
            Ok(())
        }
    }

    #[test]
    fn test_pulse_retries_failed_stop() {
        let mut motor = VibrationMotor::new_active_high(FlakyPin::default()).unwrap();
        motor.pin.failing_lows = 1;
        motor.pin.low_attempts = 0;

        block_on(motor.pulse(&mut MockDelay::default(), 50)).unwrap();

        assert!(!motor.is_on());
        assert!(!motor.pin.high);
        assert_eq!(motor.pin.low_attempts, 2);
    }

    #[test]
    fn test_pulse_reports_stuck_motor() {
        let mut motor = VibrationMotor::new_active_high(FlakyPin::default()).unwrap();
        motor.pin.failing_lows = 2;
        motor.pin.low_attempts = 0;

        let result = block_on(motor.pulse(&mut MockDelay::default(), 50));

        assert_eq!(result, Err(PinFault));
        assert!(motor.is_on());
        assert!(motor.pin.high);
        assert_eq!(motor.pin.low_attempts, 2);
    }
}
