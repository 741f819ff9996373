use std::convert::Infallible;

use embedded_graphics::{
	Pixel,
	draw_target::DrawTarget,
	geometry::{Dimensions, OriginDimensions, Point, Size},
	pixelcolor::{
		Rgb565, Rgb888, RgbColor,
		raw::{RawData, RawU16},
	},
	primitives::Rectangle,
};

/// In-memory frame buffer.
///
/// This is sized once and never resized: drawing outside of it is clipped. Pixels are stored
/// row-major in RGB565, which is what the controller is configured for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
	width: u16,
	height: u16,
	pixels: Vec<Rgb565>,
}

impl FrameBuffer {
	/// Allocate a black frame buffer.
	pub fn new(width: u16, height: u16) -> Self {
		Self {
			width,
			height,
			pixels: vec![Rgb565::BLACK; width as usize * height as usize],
		}
	}

	pub fn width(&self) -> u16 {
		self.width
	}

	pub fn height(&self) -> u16 {
		self.height
	}

	fn index(&self, x: i32, y: i32) -> Option<usize> {
		let x = u16::try_from(x).ok()?;
		let y = u16::try_from(y).ok()?;
		if x >= self.width || y >= self.height {
			return None;
		}

		Some(y as usize * self.width as usize + x as usize)
	}

	/// Read a pixel, if it is within the buffer.
	pub fn pixel(&self, x: i32, y: i32) -> Option<Rgb565> {
		self.index(x, y).map(|i| self.pixels[i])
	}

	/// Set a pixel. Out of bounds writes are ignored.
	pub fn set_pixel(&mut self, x: i32, y: i32, colour: Rgb565) {
		if let Some(i) = self.index(x, y) {
			self.pixels[i] = colour;
		}
	}

	/// Mix a colour over the existing pixel, with `coverage` as alpha (0 = keep, 255 = replace).
	pub fn blend(&mut self, x: i32, y: i32, colour: Rgb565, coverage: u8) {
		let Some(i) = self.index(x, y) else {
			return;
		};

		self.pixels[i] = match coverage {
			0 => return,
			255 => colour,
			alpha => {
				let fg = Rgb888::from(colour);
				let bg = Rgb888::from(self.pixels[i]);
				let mix = |f: u8, b: u8| {
					let alpha = u16::from(alpha);
					((u16::from(f) * alpha + u16::from(b) * (255 - alpha)) / 255) as u8
				};
				Rgb565::from(Rgb888::new(
					mix(fg.r(), bg.r()),
					mix(fg.g(), bg.g()),
					mix(fg.b(), bg.b()),
				))
			}
		};
	}

	/// One row of pixels.
	pub fn row(&self, y: u16) -> &[Rgb565] {
		let start = y as usize * self.width as usize;
		&self.pixels[start..start + self.width as usize]
	}

	pub fn pixels(&self) -> &[Rgb565] {
		&self.pixels
	}

	/// Fill the whole buffer with one colour.
	pub fn solid(&mut self, colour: Rgb565) {
		self.pixels.fill(colour);
	}

	/// The buffer as the controller wants it: RGB565, big endian.
	pub fn data(&self) -> impl Iterator<Item = u8> + '_ {
		self.pixels
			.iter()
			.flat_map(|&p| RawU16::from(p).into_inner().to_be_bytes())
	}
}

impl OriginDimensions for FrameBuffer {
	fn size(&self) -> Size {
		Size::new(self.width.into(), self.height.into())
	}
}

impl DrawTarget for FrameBuffer {
	type Color = Rgb565;
	type Error = Infallible;

	fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
	where
		I: IntoIterator<Item = Pixel<Self::Color>>,
	{
		for Pixel(Point { x, y }, colour) in pixels {
			self.set_pixel(x, y, colour);
		}

		Ok(())
	}

	fn fill_solid(&mut self, area: &Rectangle, colour: Self::Color) -> Result<(), Self::Error> {
		let area = area.intersection(&self.bounding_box());
		let Some(bottom_right) = area.bottom_right() else {
			return Ok(());
		};

		for y in area.top_left.y..=bottom_right.y {
			let Some(start) = self.index(area.top_left.x, y) else {
				continue;
			};
			let len = area.size.width as usize;
			self.pixels[start..start + len].fill(colour);
		}

		Ok(())
	}

	fn clear(&mut self, colour: Self::Color) -> Result<(), Self::Error> {
		self.solid(colour);
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn out_of_bounds_is_clipped() {
		let mut buf = FrameBuffer::new(4, 3);
		buf.set_pixel(-1, 0, Rgb565::RED);
		buf.set_pixel(4, 0, Rgb565::RED);
		buf.set_pixel(0, 3, Rgb565::RED);
		assert!(buf.pixels().iter().all(|&p| p == Rgb565::BLACK));
		assert_eq!(buf.pixel(4, 0), None);
	}

	#[test]
	fn fill_solid_clips_to_buffer() {
		let mut buf = FrameBuffer::new(4, 3);
		buf.fill_solid(
			&Rectangle::new(Point::new(2, 1), Size::new(10, 10)),
			Rgb565::GREEN,
		)
		.unwrap();

		assert_eq!(buf.row(0), &[Rgb565::BLACK; 4]);
		assert_eq!(
			buf.row(1),
			&[Rgb565::BLACK, Rgb565::BLACK, Rgb565::GREEN, Rgb565::GREEN]
		);
		assert_eq!(buf.bounding_box().size, Size::new(4, 3));
	}

	#[test]
	fn data_is_big_endian() {
		let mut buf = FrameBuffer::new(2, 1);
		buf.set_pixel(0, 0, Rgb565::RED);
		buf.set_pixel(1, 0, Rgb565::BLUE);
		assert_eq!(buf.data().collect::<Vec<_>>(), vec![0xF8, 0x00, 0x00, 0x1F]);
	}

	#[test]
	fn blend_extremes() {
		let mut buf = FrameBuffer::new(1, 1);
		buf.blend(0, 0, Rgb565::WHITE, 0);
		assert_eq!(buf.pixel(0, 0), Some(Rgb565::BLACK));
		buf.blend(0, 0, Rgb565::WHITE, 255);
		assert_eq!(buf.pixel(0, 0), Some(Rgb565::WHITE));
	}

	#[test]
	fn blend_half_is_mid_grey() {
		let mut buf = FrameBuffer::new(1, 1);
		buf.blend(0, 0, Rgb565::WHITE, 128);
		let mixed = buf.pixel(0, 0).unwrap();
		assert!((15..=16).contains(&mixed.r()), "{mixed:?}");
		assert!((31..=32).contains(&mixed.g()), "{mixed:?}");
		assert!((15..=16).contains(&mixed.b()), "{mixed:?}");
	}
}
