use std::time::Duration;

use miette::Result;
use rpi_st7735_driver::{ColourOrder, DisplayGeometry, Rotation};
use tracing::info;

use super::{Context, OrWarn};
use crate::patterns::{Chessboard, ColourBars, Demo};

const LOOK: Duration = Duration::from_secs(3);

/// Rotation, BGR, horizontal offset, vertical offset, contrast.
pub type Configuration = (u8, bool, u16, u16, u8);

/// Settings to try, starting with the defaults.
pub const CONFIGURATIONS: [Configuration; 8] = [
	(1, true, 0, 0, 0x70),
	(0, true, 0, 0, 0x70),
	(2, true, 0, 0, 0x70),
	(3, true, 0, 0, 0x70),
	(1, false, 0, 0, 0x70),
	(1, true, 0, 0, 0xA0),
	(1, true, 1, 1, 0x70),
	(1, true, 2, 3, 0x70),
];

fn geometry((rotation, bgr, h_offset, v_offset, contrast): Configuration) -> Result<DisplayGeometry> {
	Ok(DisplayGeometry {
		rotation: Rotation::try_from(rotation)?,
		colour_order: if bgr {
			ColourOrder::Bgr
		} else {
			ColourOrder::Rgb
		},
		h_offset,
		v_offset,
		contrast,
		..Default::default()
	})
}

/// Show the test patterns with each configuration in turn, to find the one that fits the panel.
pub fn run(ctx: &Context) -> Result<()> {
	for (n, config) in (1..).zip(CONFIGURATIONS) {
		let geometry = geometry(config)?;
		println!("\nTesting configuration #{n}: {geometry}");

		let mut lcd = ctx.connect(geometry, ctx.display.ce)?;
		lcd.init_gpio()?;
		lcd.open_screen()?;

		lcd.draw(&ColourBars).or_warn("drawing colour test");
		println!("Please observe RGB color bars on the screen...");
		if !ctx.pause(LOOK) {
			break;
		}

		lcd.draw(&Chessboard).or_warn("drawing chessboard");
		println!("Please observe black and white chessboard pattern...");
		if !ctx.pause(LOOK) {
			break;
		}

		lcd.draw(&Demo).or_warn("drawing demo");
		println!("Please observe test text on the screen...");
		if !ctx.pause(LOOK) {
			break;
		}

		if !ctx.confirm(&format!(
			"Configuration #{n} test complete. If the screen displayed correctly, press Enter to \
			continue to the next configuration, or press Ctrl+C to exit..."
		)) {
			break;
		}

		lcd.close_gpio();
	}

	if ctx.interrupted() {
		println!("Test interrupted by user");
	} else {
		info!("all configurations tested");
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn first_configuration_is_the_default() {
		assert_eq!(geometry(CONFIGURATIONS[0]).unwrap(), DisplayGeometry::default());
	}

	#[test]
	fn all_configurations_are_valid() {
		for config in CONFIGURATIONS {
			assert!(geometry(config).is_ok());
		}
		assert_eq!(
			geometry(CONFIGURATIONS[4]).unwrap().colour_order,
			ColourOrder::Rgb
		);
		assert_eq!(geometry(CONFIGURATIONS[5]).unwrap().contrast, 0xA0);
	}
}
