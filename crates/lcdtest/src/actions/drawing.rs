use std::time::Duration;

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};
use miette::Result;
use rpi_st7735_driver::{TextOptions, parse_colour};
use tracing::info;

use super::{Context, OrWarn, context::Lcd};

const HOLD: Duration = Duration::from_secs(2);

/// Go through each drawing primitive, a few at a time.
pub fn run(ctx: &Context) -> Result<()> {
	println!("\nDrawing functions test");
	println!("This will demonstrate various drawing capabilities");

	let mut lcd = ctx.open()?;
	lcd.init_gpio()?;
	lcd.open_screen()?;

	lcd.clear_screen(Rgb565::BLACK).or_warn("clearing screen");
	if ctx.pause(Duration::from_secs(1)) {
		sequence(ctx, &mut lcd)?;
	}

	if ctx.interrupted() {
		println!("\nDrawing test interrupted by user");
	} else {
		info!("drawing functions test complete");
	}

	lcd.close_gpio();
	Ok(())
}

fn sequence(ctx: &Context, lcd: &mut Lcd) -> Result<()> {
	info!("drawing points");
	let red = parse_colour("red")?;
	for x in (0..160).step_by(10) {
		lcd.draw_point(x, 10, red).or_warn("drawing point");
		if !ctx.pause(Duration::from_millis(50)) {
			return Ok(());
		}
	}
	if !ctx.pause(HOLD) {
		return Ok(());
	}

	info!("drawing lines");
	lcd.clear_screen(Rgb565::BLACK).or_warn("clearing screen");
	let green = parse_colour("green")?;
	for i in (0..128).step_by(10) {
		lcd.draw_line((0, i), (159, 127 - i), green, 1)
			.or_warn("drawing line");
		if !ctx.pause(Duration::from_millis(100)) {
			return Ok(());
		}
	}
	if !ctx.pause(HOLD) {
		return Ok(());
	}

	info!("drawing rectangles");
	lcd.clear_screen(Rgb565::BLACK).or_warn("clearing screen");
	for i in (10..60).step_by(10) {
		lcd.draw_rect(
			80 - i,
			64 - i,
			(i * 2) as u32,
			(i * 2) as u32,
			Rgb565::BLUE,
			Some(Rgb565::WHITE),
		)
		.or_warn("drawing rectangle");
		if !ctx.pause(Duration::from_millis(200)) {
			return Ok(());
		}
	}
	if !ctx.pause(HOLD) {
		return Ok(());
	}

	info!("drawing circles");
	lcd.clear_screen(Rgb565::BLACK).or_warn("clearing screen");
	for (i, name) in ["red", "green", "blue", "yellow", "cyan", "magenta"]
		.into_iter()
		.enumerate()
	{
		lcd.draw_circle(80, 64, 50 - i as u32 * 8, parse_colour(name)?, None)
			.or_warn("drawing circle");
		if !ctx.pause(Duration::from_millis(300)) {
			return Ok(());
		}
	}
	if !ctx.pause(HOLD) {
		return Ok(());
	}

	info!("drawing text");
	lcd.clear_screen(Rgb565::BLACK).or_warn("clearing screen");
	for (y, text, colour) in [
		(10, "Hello, World!", "white"),
		(30, "LCD Display", "yellow"),
		(50, "Test Pattern", "cyan"),
		(70, "Raspberry Pi", "green"),
		(90, "ST7735 LCD", "red"),
	] {
		lcd.draw_text(10, y, text, parse_colour(colour)?, TextOptions::size(16))
			.or_warn("drawing text");
	}
	ctx.pause(Duration::from_secs(4));

	Ok(())
}
