use miette::Result;
use rpi_st7735_driver::{Button, DEBOUNCE, POLL_INTERVAL, parse_colour};
use tracing::{info, warn};

use super::{Context, OrWarn, context::Lcd};

/// Colours cycled through, in order.
pub const COLOURS: [&str; 8] = [
	"red", "green", "blue", "yellow", "cyan", "magenta", "white", "black",
];

fn show(lcd: &mut Lcd, index: usize) -> Result<()> {
	let name = COLOURS[index];
	lcd.clear_screen(parse_colour(name)?)
		.or_warn("filling screen");
	info!("current colour: {name}");
	Ok(())
}

/// Change the screen colour on each button press, until Ctrl-C.
pub fn run(ctx: &Context) -> Result<()> {
	println!("\nButton color change test");
	println!("Press the button to change screen color");
	println!("Press Ctrl+C to exit the test");

	let mut lcd = ctx.open()?;
	lcd.init_gpio()?;
	lcd.open_screen()?;

	let mut button = Button::new(lcd.pins().button);
	button.setup(lcd.gpio_mut())?;

	let mut index = 0;
	show(&mut lcd, index)?;

	while !ctx.interrupted() {
		match button.poll(lcd.gpio_mut()) {
			Ok(true) => {
				index = (index + 1) % COLOURS.len();
				show(&mut lcd, index)?;
				ctx.pause(DEBOUNCE);
			}
			Ok(false) => {}
			Err(err) => warn!("error reading button: {err}"),
		}

		ctx.pause(POLL_INTERVAL);
	}

	println!("\nButton test interrupted by user");
	lcd.close_gpio();
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn colours_are_known() {
		for name in COLOURS {
			assert!(parse_colour(name).is_ok(), "{name}");
		}
	}
}
