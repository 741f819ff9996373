use miette::Result;
use tracing::{debug, info, warn};

use crate::{
	args::Args,
	interrupt::{Interrupt, Prompt},
	preflight,
};

pub use context::Context;
pub mod context;

#[cfg(target_os = "linux")]
pub mod button;
#[cfg(target_os = "linux")]
pub mod configurations;
#[cfg(target_os = "linux")]
pub mod drawing;
#[cfg(target_os = "linux")]
pub mod hardware;
#[cfg(target_os = "linux")]
pub mod spi_devices;
#[cfg(target_os = "linux")]
pub mod standard;

/// The available tests, numbered as in the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
	Standard = 1,
	Configurations = 2,
	Hardware = 3,
	Button = 4,
	Drawing = 5,
	SpiDevices = 6,
}

impl From<u8> for Mode {
	/// Anything that isn't a known test number runs the standard test.
	fn from(choice: u8) -> Self {
		match choice {
			2 => Self::Configurations,
			3 => Self::Hardware,
			4 => Self::Button,
			5 => Self::Drawing,
			6 => Self::SpiDevices,
			_ => Self::Standard,
		}
	}
}

impl Mode {
	pub const ALL: [Self; 6] = [
		Self::Standard,
		Self::Configurations,
		Self::Hardware,
		Self::Button,
		Self::Drawing,
		Self::SpiDevices,
	];

	/// Interpret a menu answer.
	pub fn from_choice(choice: &str) -> Self {
		choice.trim().parse::<u8>().map_or(Self::Standard, Self::from)
	}

	pub fn description(self) -> &'static str {
		match self {
			Self::Standard => "Standard Test - Run basic display test",
			Self::Configurations => {
				"Configuration Test - Test multiple display configurations to find the best settings"
			}
			Self::Hardware => "Hardware Check - Check connections and backlight",
			Self::Button => "Button Color Change Test",
			Self::Drawing => "Drawing Functions Test",
			Self::SpiDevices => "SPI Device Test - Try both chip selects (CE0/CE1)",
		}
	}

	#[cfg(target_os = "linux")]
	fn run(self, ctx: &Context) -> Result<()> {
		match self {
			Self::Standard => standard::run(ctx),
			Self::Configurations => configurations::run(ctx),
			Self::Hardware => hardware::run(ctx),
			Self::Button => button::run(ctx),
			Self::Drawing => drawing::run(ctx),
			Self::SpiDevices => spi_devices::run(ctx),
		}
	}

	#[cfg(not(target_os = "linux"))]
	fn run(self, _ctx: &Context) -> Result<()> {
		Err(miette::miette!(
			help = "run this on the Raspberry Pi the display is connected to",
			"the display can only be driven from Linux"
		))
	}
}

pub fn run(args: Args) -> Result<()> {
	println!("{}", "=".repeat(50));
	println!("ST7735 LCD Screen Test Program");
	println!("{}", "=".repeat(50));
	debug!(version=%env!("CARGO_PKG_VERSION"), "starting up");

	preflight::check()?;

	let interrupt = Interrupt::install()?;
	let prompt = Prompt::stdin(interrupt.clone());

	let mode = match args.mode() {
		Some(mode) => mode,
		None => {
			println!("\nSelect test mode:");
			for mode in Mode::ALL {
				println!("{}: {}", mode as u8, mode.description());
			}

			let Some(choice) = prompt.ask("Enter option (1-6): ") else {
				println!("Program interrupted by user");
				return Ok(());
			};
			Mode::from_choice(&choice)
		}
	};

	info!(?mode, "running test");
	let ctx = Context::new(args.display, interrupt, prompt);
	mode.run(&ctx)?;

	if ctx.interrupted() {
		println!("Program interrupted by user");
	}

	Ok(())
}

/// Log errors from a single drawing step instead of giving up on the whole test.
pub(crate) trait OrWarn {
	fn or_warn(self, what: &str);
}

impl OrWarn for rpi_st7735_driver::Result<()> {
	fn or_warn(self, what: &str) {
		if let Err(err) = self {
			warn!("error {what}: {err}");
		}
	}
}
