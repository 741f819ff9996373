use std::{thread::sleep, time::Duration};

use crate::error::Result;

/// Logic level of a pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
	Low,
	High,
}

impl From<bool> for Level {
	fn from(high: bool) -> Self {
		if high { Self::High } else { Self::Low }
	}
}

/// Direction and bias of a pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PinMode {
	Output,
	Input,
	InputPullUp,
}

/// Digital GPIO access.
///
/// Pins have to be [set up](GpioControl::setup) before they can be read or written. Implementations
/// own their pin claims: [`cleanup`](GpioControl::cleanup) releases all of them, and should also be
/// done on drop.
pub trait GpioControl {
	/// Claim a pin (if needed) and set its mode.
	fn setup(&mut self, pin: u8, mode: PinMode) -> Result<()>;

	/// Drive an output pin.
	fn write(&mut self, pin: u8, level: Level) -> Result<()>;

	/// Sample a pin.
	fn read(&mut self, pin: u8) -> Result<Level>;

	/// Release every pin claimed so far.
	fn cleanup(&mut self);

	/// Block for some time, for pin timing sequences.
	fn delay(&mut self, duration: Duration) {
		sleep(duration);
	}
}

#[cfg(target_os = "linux")]
pub use rpi::RppalGpio;

#[cfg(target_os = "linux")]
mod rpi {
	use std::collections::HashMap;

	use rppal::gpio::{self, Bias, Gpio, IoPin, Mode};
	use tracing::{debug, instrument, trace};

	use super::{GpioControl, Level, PinMode};
	use crate::error::{Error, Result};

	/// GPIO access on a Raspberry Pi, through `/dev/gpiomem`.
	///
	/// Pins are reset to their original state when released, either by [`GpioControl::cleanup`] or
	/// when this is dropped.
	#[derive(Debug)]
	pub struct RppalGpio {
		gpio: Gpio,
		pins: HashMap<u8, IoPin>,
	}

	impl RppalGpio {
		#[instrument(level = "debug")]
		pub fn new() -> Result<Self> {
			Ok(Self {
				gpio: Gpio::new()?,
				pins: HashMap::new(),
			})
		}
	}

	impl GpioControl for RppalGpio {
		#[instrument(level = "trace", skip(self))]
		fn setup(&mut self, pin: u8, mode: PinMode) -> Result<()> {
			if !self.pins.contains_key(&pin) {
				debug!(pin, "claiming pin");
				let io = self.gpio.get(pin)?.into_io(Mode::Input);
				self.pins.insert(pin, io);
			}

			let Some(io) = self.pins.get_mut(&pin) else {
				return Err(Error::PinNotSetUp(pin));
			};

			let (direction, bias) = pin_config(mode);
			io.set_mode(direction);
			io.set_bias(bias);

			Ok(())
		}

		#[instrument(level = "trace", skip(self))]
		fn write(&mut self, pin: u8, level: Level) -> Result<()> {
			let io = self.pins.get_mut(&pin).ok_or(Error::PinNotSetUp(pin))?;
			io.write(match level {
				Level::Low => gpio::Level::Low,
				Level::High => gpio::Level::High,
			});
			Ok(())
		}

		fn read(&mut self, pin: u8) -> Result<Level> {
			let io = self.pins.get(&pin).ok_or(Error::PinNotSetUp(pin))?;
			let level = match io.read() {
				gpio::Level::Low => Level::Low,
				gpio::Level::High => Level::High,
			};
			trace!(pin, ?level, "read pin");
			Ok(level)
		}

		#[instrument(level = "debug", skip(self))]
		fn cleanup(&mut self) {
			if !self.pins.is_empty() {
				debug!(pins = ?self.pins.keys().collect::<Vec<_>>(), "releasing pins");
				self.pins.clear();
			}
		}
	}

	/// Direction and bias for a pin mode.
	pub(super) fn pin_config(mode: PinMode) -> (Mode, Bias) {
		match mode {
			PinMode::Output => (Mode::Output, Bias::Off),
			PinMode::Input => (Mode::Input, Bias::Off),
			PinMode::InputPullUp => (Mode::Input, Bias::PullUp),
		}
	}

	impl Drop for RppalGpio {
		fn drop(&mut self) {
			self.cleanup();
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn level_from_bool() {
		assert_eq!(Level::from(true), Level::High);
		assert_eq!(Level::from(false), Level::Low);
	}

	#[cfg(target_os = "linux")]
	#[test]
	fn only_button_mode_pulls_up() {
		use rppal::gpio::{Bias, Mode};

		use super::rpi::pin_config;

		assert_eq!(pin_config(PinMode::Output), (Mode::Output, Bias::Off));
		assert_eq!(pin_config(PinMode::Input), (Mode::Input, Bias::Off));
		assert_eq!(pin_config(PinMode::InputPullUp), (Mode::Input, Bias::PullUp));
	}
}
