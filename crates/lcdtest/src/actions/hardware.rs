use std::time::Duration;

use miette::Result;
use tracing::info;

use super::Context;

const BLINKS: usize = 5;
const HALF_PERIOD: Duration = Duration::from_secs(1);

/// Blink the backlight, to check the wiring without relying on the panel.
pub fn run(ctx: &Context) -> Result<()> {
	info!("hardware check mode, testing backlight only");
	let mut lcd = ctx.open()?;
	lcd.init_gpio()?;

	println!("Testing backlight - You should see the screen backlight change");
	for _ in 0..BLINKS {
		info!("backlight on");
		lcd.open_screen()?;
		if !ctx.pause(HALF_PERIOD) {
			return Ok(());
		}

		info!("backlight off");
		lcd.close_screen()?;
		if !ctx.pause(HALF_PERIOD) {
			return Ok(());
		}
	}

	info!("test complete, keeping backlight on");
	lcd.open_screen()?;
	ctx.pause(HALF_PERIOD);

	lcd.close_gpio();
	info!("hardware test complete");
	Ok(())
}
