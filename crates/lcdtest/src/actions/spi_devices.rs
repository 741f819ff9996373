use std::time::Duration;

use miette::Result;
use tracing::{info, warn};

use super::{Context, OrWarn};
use crate::patterns::ChipSelectCard;

/// Draw on each chip select in turn, to find which one the display is wired to.
///
/// Failing to open one of them is expected, so it's logged and the next one is tried.
pub fn run(ctx: &Context) -> Result<()> {
	println!("\nTesting different SPI device configurations");
	let geometry = ctx.display.geometry()?;

	for ce in [0, 1] {
		println!("\nTesting SPI device={ce} (corresponding to CE{ce})...");

		let mut lcd = match ctx.connect(geometry, ce) {
			Ok(lcd) => lcd,
			Err(err) => {
				warn!("error testing SPI device={ce}: {err:?}");
				continue;
			}
		};
		lcd.init_gpio()?;
		lcd.open_screen()?;

		lcd.draw(&ChipSelectCard { ce }).or_warn("drawing test image");
		info!("SPI device={ce} test image drawn");
		if !ctx.pause(Duration::from_secs(3)) {
			break;
		}

		if !ctx.confirm(&format!(
			"SPI device={ce} test complete. If the screen displayed, press Enter to continue..."
		)) {
			break;
		}

		lcd.close_gpio();
	}

	Ok(())
}
