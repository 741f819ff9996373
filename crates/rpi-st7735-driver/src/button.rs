use std::time::Duration;

use tracing::{debug, instrument};

use crate::{
	error::Result,
	gpio::{GpioControl, Level, PinMode},
};

/// How often to sample the button.
pub const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// How long to ignore the button after a press.
pub const DEBOUNCE: Duration = Duration::from_millis(200);

/// Detects presses of an active-low button from successive samples.
///
/// A press is a transition from high to low. Holding the button down is one press.
#[derive(Debug, Clone, Copy)]
pub struct EdgeDetector {
	last: Level,
}

impl Default for EdgeDetector {
	/// Starts released, as the button is pulled up.
	fn default() -> Self {
		Self::new(Level::High)
	}
}

impl EdgeDetector {
	pub fn new(initial: Level) -> Self {
		Self { last: initial }
	}

	/// Feed a sample, returns whether it completes a press.
	pub fn sample(&mut self, level: Level) -> bool {
		let pressed = self.last == Level::High && level == Level::Low;
		self.last = level;
		pressed
	}

	/// Count the presses in a sequence of samples, starting from the first sample.
	pub fn count_presses(samples: impl IntoIterator<Item = Level>) -> usize {
		let mut samples = samples.into_iter();
		let Some(first) = samples.next() else {
			return 0;
		};

		let mut detector = Self::new(first);
		samples.filter(|&level| detector.sample(level)).count()
	}
}

/// A push button on a pulled-up GPIO input.
#[derive(Debug, Clone, Copy)]
pub struct Button {
	pin: u8,
	edges: EdgeDetector,
}

impl Button {
	pub fn new(pin: u8) -> Self {
		Self {
			pin,
			edges: EdgeDetector::default(),
		}
	}

	/// Configure the pin as an input with pull-up, and take the initial state.
	#[instrument(level = "debug", skip(gpio))]
	pub fn setup(&mut self, gpio: &mut impl GpioControl) -> Result<()> {
		gpio.setup(self.pin, PinMode::InputPullUp)?;
		self.edges = EdgeDetector::new(gpio.read(self.pin)?);
		Ok(())
	}

	/// Sample the button once, returns whether it was just pressed.
	pub fn poll(&mut self, gpio: &mut impl GpioControl) -> Result<bool> {
		let pressed = self.edges.sample(gpio.read(self.pin)?);
		if pressed {
			debug!(pin = self.pin, "button pressed");
		}
		Ok(pressed)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn levels(bits: &[u8]) -> Vec<Level> {
		bits.iter().map(|&b| Level::from(b == 1)).collect()
	}

	#[test]
	fn counts_falling_edges_only() {
		assert_eq!(
			EdgeDetector::count_presses(levels(&[1, 1, 0, 0, 1, 1, 0])),
			2
		);
	}

	#[test]
	fn held_button_is_one_press() {
		assert_eq!(EdgeDetector::count_presses(levels(&[1, 0, 0, 0, 0])), 1);
	}

	#[test]
	fn starting_low_is_not_a_press() {
		assert_eq!(EdgeDetector::count_presses(levels(&[0, 0, 1])), 0);
		assert_eq!(EdgeDetector::count_presses(Vec::new()), 0);
	}

	#[test]
	fn default_starts_released() {
		let mut detector = EdgeDetector::default();
		assert!(detector.sample(Level::Low));
		assert!(!detector.sample(Level::Low));
		assert!(!detector.sample(Level::High));
	}
}
