use std::time::Duration;

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};
use miette::Result;
use rpi_st7735_driver::{TextOptions, parse_colour};
use tracing::info;

use super::{Context, OrWarn, context::Lcd};
use crate::patterns::{Chessboard, ColourBars, Demo};

const STEP: Duration = Duration::from_secs(2);

/// Top edge of the capture counter line, high enough for the 18 px text to fit.
const COUNTER_Y: i32 = 106;

/// Colour bars, chessboard, demo, then an info screen with a counter.
pub fn run(ctx: &Context) -> Result<()> {
	info!("initialising screen");
	let mut lcd = ctx.open()?;
	info!("initialising GPIO");
	lcd.init_gpio()?;
	info!("opening screen");
	lcd.open_screen()?;

	info!("displaying colour test");
	lcd.draw(&ColourBars).or_warn("drawing colour test");
	if !ctx.pause(STEP) {
		return Ok(());
	}

	info!("displaying chessboard test");
	lcd.draw(&Chessboard).or_warn("drawing chessboard");
	if !ctx.pause(STEP) {
		return Ok(());
	}

	info!("displaying demo");
	lcd.draw(&Demo).or_warn("drawing demo");
	if !ctx.pause(STEP) {
		return Ok(());
	}

	info!("clearing screen");
	lcd.clear_screen(Rgb565::BLACK).or_warn("clearing screen");
	println!("Screen size: {}x{}", lcd.width(), lcd.height());

	info!("displaying info");
	show_info(&mut lcd)?;

	let green = parse_colour("green")?;
	let red = parse_colour("red")?;
	lcd.draw_text(5, COUNTER_Y, "Total Captures=", green, TextOptions::size(18))
		.or_warn("drawing text");
	for count in 1..=2 {
		lcd.draw_text(85, COUNTER_Y, &count.to_string(), red, TextOptions::size(18))
			.or_warn("drawing counter");
		if count < 2 && !ctx.pause(STEP) {
			return Ok(());
		}
	}

	info!("program execution complete");
	info!("cleaning up GPIO");
	lcd.close_gpio();
	Ok(())
}

fn show_info(lcd: &mut Lcd) -> Result<()> {
	lcd.clear_screen(Rgb565::BLACK).or_warn("clearing screen");
	lcd.draw_text(18, 20, "LCD Test", Rgb565::WHITE, TextOptions::default())
		.or_warn("drawing info");

	let size = format!("{}x{} ST7735", lcd.width(), lcd.height());
	lcd.draw_text(5, 45, &size, Rgb565::WHITE, TextOptions::default())
		.or_warn("drawing info");

	let geometry = lcd.geometry().to_string();
	lcd.draw_text(5, 80, &geometry, parse_colour("red")?, TextOptions::size(12))
		.or_warn("drawing info");

	info!("info displayed");
	Ok(())
}
