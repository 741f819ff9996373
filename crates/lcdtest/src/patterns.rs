//! Test patterns, drawn in one go with [`Screen::draw`](rpi_st7735_driver::Screen::draw).

use embedded_graphics::{
	mono_font::{MonoTextStyle, ascii::FONT_6X10},
	pixelcolor::Rgb565,
	prelude::*,
	primitives::{PrimitiveStyle, PrimitiveStyleBuilder, Rectangle},
	text::{Baseline, Text},
};

/// CSS "green", which is darker than full-intensity green.
pub const GREEN: Rgb565 = Rgb565::new(0, 32, 0);

/// Chessboard square size.
pub const BLOCK: u32 = 16;

/// Fill `[x0, x1] × [y0, y1]`, both ends included.
fn span<D>(
	target: &mut D,
	(x0, y0): (i32, i32),
	(x1, y1): (i32, i32),
	colour: Rgb565,
) -> Result<(), D::Error>
where
	D: DrawTarget<Color = Rgb565>,
{
	Rectangle::with_corners(Point::new(x0, y0), Point::new(x1, y1))
		.into_styled(PrimitiveStyle::with_fill(colour))
		.draw(target)
}

fn label<D>(target: &mut D, text: &str, x: i32, y: i32, colour: Rgb565) -> Result<(), D::Error>
where
	D: DrawTarget<Color = Rgb565>,
{
	Text::with_baseline(
		text,
		Point::new(x, y),
		MonoTextStyle::new(&FONT_6X10, colour),
		Baseline::Top,
	)
	.draw(target)?;
	Ok(())
}

/// Red, green and blue bars with their names, on black.
///
/// Shows whether the colour order (RGB/BGR) is right.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColourBars;

impl Drawable for ColourBars {
	type Color = Rgb565;
	type Output = ();

	fn draw<D>(&self, target: &mut D) -> Result<Self::Output, D::Error>
	where
		D: DrawTarget<Color = Self::Color>,
	{
		let right = target.bounding_box().size.width as i32;
		target.clear(Rgb565::BLACK)?;

		for (top, colour, name) in [
			(0, Rgb565::RED, "RED"),
			(40, GREEN, "GREEN"),
			(80, Rgb565::BLUE, "BLUE"),
		] {
			span(target, (0, top), (right, top + 40), colour)?;
			label(target, name, 5, top + 15, Rgb565::WHITE)?;
		}

		Ok(())
	}
}

/// Black and white squares over the whole screen, white in the top-left corner.
///
/// Shows whether the offsets and rotation are right: squares at the edges should be whole.
#[derive(Debug, Clone, Copy, Default)]
pub struct Chessboard;

impl Drawable for Chessboard {
	type Color = Rgb565;
	type Output = ();

	fn draw<D>(&self, target: &mut D) -> Result<Self::Output, D::Error>
	where
		D: DrawTarget<Color = Self::Color>,
	{
		let size = target.bounding_box().size;
		target.clear(Rgb565::BLACK)?;

		for x in (0..size.width).step_by(BLOCK as usize) {
			for y in (0..size.height).step_by(BLOCK as usize) {
				let colour = if ((x / BLOCK) + (y / BLOCK)) % 2 == 0 {
					Rgb565::WHITE
				} else {
					Rgb565::BLACK
				};
				span(
					target,
					(x as i32, y as i32),
					((x + BLOCK) as i32, (y + BLOCK) as i32),
					colour,
				)?;
			}
		}

		Ok(())
	}
}

/// A small outlined square and some text, drawn over whatever is there.
#[derive(Debug, Clone, Copy, Default)]
pub struct Demo;

impl Drawable for Demo {
	type Color = Rgb565;
	type Output = ();

	fn draw<D>(&self, target: &mut D) -> Result<Self::Output, D::Error>
	where
		D: DrawTarget<Color = Self::Color>,
	{
		Rectangle::with_corners(Point::new(10, 10), Point::new(30, 30))
			.into_styled(
				PrimitiveStyleBuilder::new()
					.fill_color(GREEN)
					.stroke_color(Rgb565::WHITE)
					.stroke_width(1)
					.build(),
			)
			.draw(target)?;

		label(target, "Hello World", 30, 40, Rgb565::RED)?;
		label(target, "ST7735 160x128", 10, 70, Rgb565::WHITE)
	}
}

/// Red, green and blue bands labelled with the chip select in use.
#[derive(Debug, Clone, Copy)]
pub struct ChipSelectCard {
	pub ce: u8,
}

impl Drawable for ChipSelectCard {
	type Color = Rgb565;
	type Output = ();

	fn draw<D>(&self, target: &mut D) -> Result<Self::Output, D::Error>
	where
		D: DrawTarget<Color = Self::Color>,
	{
		let size = target.bounding_box().size;
		let (right, bottom) = (size.width as i32, size.height as i32);

		span(target, (0, 0), (right, 40), Rgb565::RED)?;
		span(target, (0, 40), (right, 80), GREEN)?;
		span(target, (0, 80), (right, bottom), Rgb565::BLUE)?;
		label(target, &format!("CE{}", self.ce), 10, 10, Rgb565::WHITE)
	}
}

#[cfg(test)]
mod tests {
	use rpi_st7735_driver::FrameBuffer;

	use super::*;

	fn frame() -> FrameBuffer {
		FrameBuffer::new(160, 128)
	}

	#[test]
	fn bars_in_order() {
		let mut buf = frame();
		let Ok(()) = ColourBars.draw(&mut buf);

		assert_eq!(buf.pixel(159, 0), Some(Rgb565::RED));
		assert_eq!(buf.pixel(159, 41), Some(GREEN));
		assert_eq!(buf.pixel(159, 81), Some(Rgb565::BLUE));
		assert_eq!(buf.pixel(159, 121), Some(Rgb565::BLACK));
		assert!((15..25).any(|y| buf.row(y).contains(&Rgb565::WHITE)));
	}

	#[test]
	fn bars_start_from_black() {
		let mut buf = frame();
		buf.solid(Rgb565::YELLOW);
		let Ok(()) = ColourBars.draw(&mut buf);
		assert!(buf.row(127).iter().all(|&p| p == Rgb565::BLACK));
	}

	#[test]
	fn chessboard_alternates() {
		let mut buf = frame();
		let Ok(()) = Chessboard.draw(&mut buf);

		assert_eq!(buf.pixel(0, 0), Some(Rgb565::WHITE));
		assert_eq!(buf.pixel(17, 0), Some(Rgb565::BLACK));
		assert_eq!(buf.pixel(17, 17), Some(Rgb565::WHITE));
		assert_eq!(buf.pixel(159, 127), Some(Rgb565::WHITE));
		assert_eq!(buf.pixel(150, 120), Some(Rgb565::WHITE));
	}

	#[test]
	fn demo_draws_over_existing() {
		let mut buf = frame();
		buf.solid(Rgb565::BLUE);
		let Ok(()) = Demo.draw(&mut buf);

		assert_eq!(buf.pixel(10, 10), Some(Rgb565::WHITE));
		assert_eq!(buf.pixel(20, 20), Some(GREEN));
		assert_eq!(buf.pixel(100, 120), Some(Rgb565::BLUE));
	}

	#[test]
	fn card_shows_chip_select() {
		let mut buf = frame();
		let Ok(()) = ChipSelectCard { ce: 1 }.draw(&mut buf);

		assert_eq!(buf.pixel(150, 5), Some(Rgb565::RED));
		assert_eq!(buf.pixel(150, 127), Some(Rgb565::BLUE));
		assert!((10..20).any(|y| buf.row(y).contains(&Rgb565::WHITE)));
	}
}
