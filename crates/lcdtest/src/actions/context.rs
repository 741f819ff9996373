use std::time::Duration;

use crate::{
	args::DisplayArgs,
	interrupt::{Interrupt, Prompt},
};

/// What every test gets: the display settings and the console.
#[derive(Debug)]
pub struct Context {
	pub display: DisplayArgs,
	pub interrupt: Interrupt,
	pub prompt: Prompt,
}

impl Context {
	pub fn new(display: DisplayArgs, interrupt: Interrupt, prompt: Prompt) -> Self {
		Self {
			display,
			interrupt,
			prompt,
		}
	}

	pub fn interrupted(&self) -> bool {
		self.interrupt.is_set()
	}

	/// Wait so the user can look at the screen. Returns `false` if interrupted.
	pub fn pause(&self, duration: Duration) -> bool {
		self.interrupt.sleep(duration)
	}

	/// Wait for Enter. Returns `false` if interrupted.
	pub fn confirm(&self, message: &str) -> bool {
		self.prompt.confirm(message)
	}
}

#[cfg(target_os = "linux")]
pub use rpi::Lcd;

#[cfg(target_os = "linux")]
mod rpi {
	use miette::{Result, WrapErr};
	use rpi_st7735_driver::{DisplayGeometry, RppalGpio, Screen, SpiPanel};
	use tracing::instrument;

	use super::Context;

	/// The display as wired to the Raspberry Pi.
	pub type Lcd = Screen<RppalGpio, SpiPanel>;

	impl Context {
		/// Open the display with the settings from the command line.
		pub fn open(&self) -> Result<Lcd> {
			self.connect(self.display.geometry()?, self.display.ce)
		}

		/// Open the display with a particular geometry and chip select.
		///
		/// Errors here are fatal: the hardware is missing or misconfigured.
		#[instrument(level = "debug", skip(self))]
		pub fn connect(&self, geometry: DisplayGeometry, ce: u8) -> Result<Lcd> {
			let gpio = RppalGpio::new().wrap_err("opening GPIO")?;
			let panel = SpiPanel::new(&self.display.spi_args(ce))
				.wrap_err_with(|| format!("opening SPI{} CE{ce}", self.display.spi))?;

			Screen::new(gpio, panel, self.display.screen_options(geometry))
				.wrap_err("initialising the display")
		}
	}
}
