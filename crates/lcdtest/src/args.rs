use std::path::PathBuf;

use clap::Parser;
use lloggs::{LoggingArgs, PreArgs, WorkerGuard};
use miette::{Result, miette};
use rpi_st7735_driver::{
	ColourOrder, DEFAULT_FONT_CANDIDATES, DisplayGeometry, PinAssignment, Rotation, ScreenOptions,
};
use tracing::debug;

use crate::actions::Mode;

/// Largest display offset accepted, well beyond the controller's spare memory rows and columns.
const MAX_OFFSET: i64 = 32;

/// ST7735 LCD test program.
///
/// Brings up a 160x128 ST7735 display wired to a Raspberry Pi's SPI bus, and runs interactive
/// test sequences on it. Without `--mode`, a menu asks which test to run.
///
/// SPI must be enabled (`sudo raspi-config` > Interface Options > SPI), and GPIO access usually
/// requires running as root.
#[derive(Debug, Clone, Parser)]
#[command(
	author,
	version,
	after_help = "Want more detail? Try the long '--help' flag!",
	after_long_help = "Didn't expect this much output? Use the short '-h' flag to get short help."
)]
pub struct Args {
	#[command(flatten)]
	pub logging: LoggingArgs,

	/// Test to run, instead of asking.
	///
	/// 1: standard test, 2: configuration sweep, 3: backlight check, 4: button colour change,
	/// 5: drawing functions, 6: SPI chip selects.
	#[arg(long, value_parser = clap::value_parser!(u8).range(1..=6))]
	pub mode: Option<u8>,

	#[command(flatten)]
	pub display: DisplayArgs,
}

impl Args {
	pub fn mode(&self) -> Option<Mode> {
		self.mode.map(Mode::from)
	}
}

/// How the display is wired and set up.
#[derive(Debug, Clone, Parser)]
pub struct DisplayArgs {
	/// Rotation, in quarter turns (0-3).
	#[arg(long, default_value = "1", value_parser = clap::value_parser!(u8).range(0..=3))]
	pub rotation: u8,

	/// Send pixels in RGB order instead of BGR.
	#[arg(long)]
	pub rgb: bool,

	/// Horizontal offset of the visible area, in pixels (0-32).
	#[arg(long, default_value = "0", value_parser = clap::value_parser!(u16).range(0..=MAX_OFFSET))]
	pub h_offset: u16,

	/// Vertical offset of the visible area, in pixels (0-32).
	#[arg(long, default_value = "0", value_parser = clap::value_parser!(u16).range(0..=MAX_OFFSET))]
	pub v_offset: u16,

	/// Contrast byte, in decimal or 0x-prefixed hex.
	#[arg(long, default_value = "0x70", value_parser = parse_byte)]
	pub contrast: u8,

	/// GPIO pin number for the display's backlight control pin.
	#[arg(long, default_value = "4")]
	pub backlight: u8,

	/// GPIO pin number for the display's data/command pin.
	#[arg(long, default_value = "24")]
	pub dc: u8,

	/// GPIO pin number for the display's reset pin.
	#[arg(long, default_value = "25")]
	pub reset: u8,

	/// GPIO pin number for the push button.
	#[arg(long, default_value = "17")]
	pub button: u8,

	/// SPI port to use.
	#[arg(long, default_value = "0")]
	pub spi: u8,

	/// SPI CE number for the display's chip select pin.
	#[arg(long, default_value = "0")]
	pub ce: u8,

	/// SPI frequency in Hz.
	#[arg(long, default_value = "8000000")]
	pub frequency: u32,

	/// Largest single SPI write, in bytes.
	///
	/// This must not exceed the spidev buffer size, which is 4096 unless `spidev.bufsiz` is set
	/// in `/boot/firmware/cmdline.txt`.
	#[arg(long, default_value = "4096")]
	pub chunk_size: usize,

	/// Font file to use for text.
	///
	/// This is tried before the usual system font locations.
	#[arg(long)]
	pub font_file: Option<PathBuf>,
}

impl DisplayArgs {
	pub fn geometry(&self) -> Result<DisplayGeometry> {
		Ok(DisplayGeometry {
			rotation: Rotation::try_from(self.rotation)?,
			colour_order: if self.rgb {
				ColourOrder::Rgb
			} else {
				ColourOrder::Bgr
			},
			h_offset: self.h_offset,
			v_offset: self.v_offset,
			contrast: self.contrast,
			..Default::default()
		})
	}

	pub fn pins(&self) -> PinAssignment {
		PinAssignment {
			backlight: self.backlight,
			dc: self.dc,
			reset: self.reset,
			button: self.button,
		}
	}

	pub fn fonts(&self) -> Vec<PathBuf> {
		self.font_file
			.iter()
			.cloned()
			.chain(DEFAULT_FONT_CANDIDATES.iter().map(PathBuf::from))
			.collect()
	}

	pub fn screen_options(&self, geometry: DisplayGeometry) -> ScreenOptions {
		ScreenOptions {
			geometry,
			pins: self.pins(),
			fonts: self.fonts(),
		}
	}

	#[cfg(target_os = "linux")]
	pub fn spi_args(&self, ce: u8) -> rpi_st7735_driver::SpiArgs {
		rpi_st7735_driver::SpiArgs {
			spi: self.spi,
			ce,
			dc: self.dc,
			frequency: self.frequency,
			chunk_size: self.chunk_size,
		}
	}
}

/// Parse a byte given in decimal or as 0x-prefixed hex.
pub fn parse_byte(input: &str) -> std::result::Result<u8, String> {
	let input = input.trim();
	let parsed = match input
		.strip_prefix("0x")
		.or_else(|| input.strip_prefix("0X"))
	{
		Some(hex) => u8::from_str_radix(hex, 16),
		None => input.parse(),
	};

	parsed.map_err(|err| format!("expected a byte (0-255 or 0x00-0xFF): {err}"))
}

pub fn get_args() -> Result<(Args, WorkerGuard)> {
	let log_guard = PreArgs::parse().setup().map_err(|err| miette!("{err}"))?;

	debug!("parsing arguments");
	let args = Args::parse();

	let log_guard = match log_guard {
		Some(g) => g,
		None => args
			.logging
			.setup(|v| match v {
				0 => "info",
				1 => "info,lcdtest=debug,rpi_st7735_driver=debug",
				2 => "debug",
				3 => "debug,lcdtest=trace,rpi_st7735_driver=trace",
				_ => "trace",
			})
			.map_err(|err| miette!("{err}"))?,
	};

	debug!(?args, "got arguments");
	Ok((args, log_guard))
}

#[test]
fn verify_cli() {
	use clap::CommandFactory;
	Args::command().debug_assert()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn contrast_accepts_hex_and_decimal() {
		assert_eq!(parse_byte("0x70"), Ok(0x70));
		assert_eq!(parse_byte("0XA0"), Ok(0xA0));
		assert_eq!(parse_byte("112"), Ok(112));
		assert!(parse_byte("0x100").is_err());
		assert!(parse_byte("bright").is_err());
	}

	#[test]
	fn defaults_match_the_board() {
		let args = Args::parse_from(["lcdtest"]);
		assert_eq!(args.mode(), None);
		assert_eq!(args.display.geometry().unwrap(), DisplayGeometry::default());
		assert_eq!(args.display.pins(), PinAssignment::default());
		assert_eq!(args.display.fonts().len(), DEFAULT_FONT_CANDIDATES.len());
	}

	#[test]
	fn flags_override_defaults() {
		let args = Args::parse_from([
			"lcdtest",
			"--mode",
			"2",
			"--rotation",
			"3",
			"--rgb",
			"--contrast",
			"0xA0",
			"--font-file",
			"/tmp/font.ttf",
		]);
		assert_eq!(args.mode(), Some(Mode::Configurations));

		let geometry = args.display.geometry().unwrap();
		assert_eq!(geometry.rotation, Rotation::Deg270);
		assert_eq!(geometry.colour_order, ColourOrder::Rgb);
		assert_eq!(geometry.contrast, 0xA0);
		assert_eq!(args.display.fonts()[0], PathBuf::from("/tmp/font.ttf"));
	}

	#[test]
	fn rejects_out_of_range() {
		assert!(Args::try_parse_from(["lcdtest", "--mode", "7"]).is_err());
		assert!(Args::try_parse_from(["lcdtest", "--rotation", "4"]).is_err());
		assert!(Args::try_parse_from(["lcdtest", "--h-offset", "65535"]).is_err());
		assert!(Args::try_parse_from(["lcdtest", "--v-offset", "33"]).is_err());
		assert!(Args::try_parse_from(["lcdtest", "--v-offset", "32"]).is_ok());
	}
}
