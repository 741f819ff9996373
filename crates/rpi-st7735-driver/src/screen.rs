use std::{
	path::{Path, PathBuf},
	time::Duration,
};

use embedded_graphics::{
	Drawable, Pixel,
	geometry::{Point, Size},
	pixelcolor::{Rgb565, Rgb888, RgbColor},
	primitives::{
		Circle, Line, Primitive, PrimitiveStyle, PrimitiveStyleBuilder, Rectangle, StrokeAlignment,
	},
};
use image::imageops::FilterType;
use tracing::{debug, info, instrument, warn};

use crate::{
	buffer::FrameBuffer,
	error::Result,
	font::{DEFAULT_FONT_CANDIDATES, FontFace, FontResource},
	geometry::{DisplayGeometry, PinAssignment},
	gpio::{GpioControl, Level, PinMode},
	transport::PanelTransport,
};

/// Wait after each step of the hardware reset pulse.
pub const RESET_DELAY: Duration = Duration::from_millis(100);

/// Everything needed to build a [`Screen`], besides the hardware handles.
#[derive(Debug, Clone)]
pub struct ScreenOptions {
	pub geometry: DisplayGeometry,
	pub pins: PinAssignment,

	/// Font files to try in order for text, see [`FontResource::resolve`].
	pub fonts: Vec<PathBuf>,
}

impl Default for ScreenOptions {
	fn default() -> Self {
		Self {
			geometry: DisplayGeometry::default(),
			pins: PinAssignment::default(),
			fonts: DEFAULT_FONT_CANDIDATES.iter().map(PathBuf::from).collect(),
		}
	}
}

/// How [`Screen::draw_image_fit`] shrinks images larger than the panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ImageFit {
	/// Clamp each dimension to the panel separately. This distorts the image.
	#[default]
	Stretch,

	/// Scale down keeping the aspect ratio.
	Contain,
}

/// Per-call text settings for [`Screen::draw_text`].
#[derive(Debug, Clone, Default)]
pub struct TextOptions {
	/// Font size in pixels, instead of the default font's size.
	pub size: Option<u32>,

	/// Font file to use instead of the default font, if it exists.
	pub font: Option<PathBuf>,
}

impl TextOptions {
	pub fn size(size: u32) -> Self {
		Self {
			size: Some(size),
			..Default::default()
		}
	}
}

/// Estimated width of a line of text: half the font size per character, clamped to the panel.
pub fn estimate_text_width(chars: usize, size: u32, x: i32, panel_width: u16) -> u32 {
	let available = (i64::from(panel_width) - i64::from(x)).max(0) as u64;
	let estimate = chars as u64 * u64::from(size) / 2;
	estimate.min(available) as u32
}

/// A display with its frame buffer.
///
/// Drawing methods modify the frame buffer, then send the whole frame to the panel.
#[derive(Debug)]
pub struct Screen<G: GpioControl, T: PanelTransport> {
	gpio: G,
	transport: T,
	pins: PinAssignment,
	geometry: DisplayGeometry,
	buffer: FrameBuffer,
	font: FontResource,
}

impl<G: GpioControl, T: PanelTransport> Screen<G, T> {
	/// Reset the display and set it up.
	///
	/// This performs the hardware reset, configures the panel, allocates the frame buffer, applies
	/// the contrast, and picks the default font. Errors here mean the hardware isn't usable.
	#[instrument(level = "debug", skip(gpio, transport))]
	pub fn new(mut gpio: G, mut transport: T, options: ScreenOptions) -> Result<Self> {
		let ScreenOptions {
			geometry,
			pins,
			fonts,
		} = options;

		gpio.setup(pins.reset, PinMode::Output)?;
		hardware_reset(&mut gpio, pins.reset)?;
		debug!("hardware reset complete");

		transport.configure(&geometry)?;
		info!(%geometry, "display initialised");

		let buffer = FrameBuffer::new(geometry.width, geometry.height);
		transport.set_contrast(geometry.contrast)?;

		let font = FontResource::resolve(&fonts);
		match font.path() {
			Some(path) => info!(?path, size = font.size(), "using font"),
			None => info!("using built-in font"),
		}

		Ok(Self {
			gpio,
			transport,
			pins,
			geometry,
			buffer,
			font,
		})
	}

	pub fn geometry(&self) -> &DisplayGeometry {
		&self.geometry
	}

	pub fn width(&self) -> u16 {
		self.buffer.width()
	}

	pub fn height(&self) -> u16 {
		self.buffer.height()
	}

	pub fn buffer(&self) -> &FrameBuffer {
		&self.buffer
	}

	/// The default font, as resolved at construction.
	pub fn font(&self) -> &FontResource {
		&self.font
	}

	pub fn pins(&self) -> &PinAssignment {
		&self.pins
	}

	/// Direct access to the GPIO handle, e.g. to read the button.
	pub fn gpio_mut(&mut self) -> &mut G {
		&mut self.gpio
	}

	pub fn transport(&self) -> &T {
		&self.transport
	}

	/// Set up the backlight pin.
	#[instrument(level = "debug", skip(self))]
	pub fn init_gpio(&mut self) -> Result<()> {
		self.gpio.setup(self.pins.backlight, PinMode::Output)
	}

	/// Release the pins claimed through the GPIO handle: reset, backlight, and any input set up
	/// with it (like the button).
	///
	/// This also happens when the GPIO handle is dropped. The data/command pin belongs to the
	/// transport and stays claimed until the `Screen` is dropped.
	#[instrument(level = "debug", skip(self))]
	pub fn close_gpio(&mut self) {
		self.gpio.cleanup();
	}

	/// Turn the backlight on.
	#[instrument(level = "debug", skip(self))]
	pub fn open_screen(&mut self) -> Result<()> {
		self.gpio.write(self.pins.backlight, Level::High)
	}

	/// Turn the backlight off.
	#[instrument(level = "debug", skip(self))]
	pub fn close_screen(&mut self) -> Result<()> {
		self.gpio.write(self.pins.backlight, Level::Low)
	}

	#[instrument(level = "debug", skip(self))]
	pub fn set_contrast(&mut self, contrast: u8) -> Result<()> {
		self.transport.set_contrast(contrast)?;
		self.geometry.contrast = contrast;
		debug!(contrast=%format!("0x{contrast:02X}"), "contrast set");
		Ok(())
	}

	/// Send the frame buffer to the panel.
	#[instrument(level = "trace", skip(self))]
	pub fn flush(&mut self) -> Result<()> {
		self.transport.push(&self.buffer)
	}

	/// Draw anything from `embedded_graphics`, then flush once.
	pub fn draw<D>(&mut self, drawable: &D) -> Result<()>
	where
		D: Drawable<Color = Rgb565>,
	{
		let Ok(_) = drawable.draw(&mut self.buffer);
		self.flush()
	}

	#[instrument(level = "debug", skip(self))]
	pub fn draw_point(&mut self, x: i32, y: i32, colour: Rgb565) -> Result<()> {
		self.draw(&Pixel(Point::new(x, y), colour))
	}

	#[instrument(level = "debug", skip(self))]
	pub fn draw_line(
		&mut self,
		start: (i32, i32),
		end: (i32, i32),
		colour: Rgb565,
		width: u32,
	) -> Result<()> {
		self.draw(
			&Line::new(Point::new(start.0, start.1), Point::new(end.0, end.1))
				.into_styled(PrimitiveStyle::with_stroke(colour, width)),
		)
	}

	/// Fill the rectangle from `(x, y)` to `(x + w, y + h)` inclusive.
	#[instrument(level = "debug", skip(self))]
	pub fn draw_rect(
		&mut self,
		x: i32,
		y: i32,
		w: u32,
		h: u32,
		fill: Rgb565,
		outline: Option<Rgb565>,
	) -> Result<()> {
		fill_rect(&mut self.buffer, x, y, w, h, fill, outline);
		self.flush()
	}

	/// Fill the circle inscribed in `(x - radius, y - radius)` to `(x + radius, y + radius)`.
	#[instrument(level = "debug", skip(self))]
	pub fn draw_circle(
		&mut self,
		x: i32,
		y: i32,
		radius: u32,
		fill: Rgb565,
		outline: Option<Rgb565>,
	) -> Result<()> {
		self.draw(
			&Circle::with_center(Point::new(x, y), radius * 2 + 1)
				.into_styled(shape_style(fill, outline)),
		)
	}

	/// Paste an image file at `(x, y)`, stretched to fit the panel if it's too large.
	///
	/// A missing file is not an error: it's logged and nothing is drawn.
	pub fn draw_image(&mut self, path: impl AsRef<Path>, x: i32, y: i32) -> Result<()> {
		self.draw_image_fit(path, x, y, ImageFit::Stretch)
	}

	/// Paste an image file at `(x, y)`, shrinking it to fit the panel if it's too large.
	#[instrument(level = "debug", skip(self, path), fields(path = ?path.as_ref()))]
	pub fn draw_image_fit(
		&mut self,
		path: impl AsRef<Path>,
		x: i32,
		y: i32,
		fit: ImageFit,
	) -> Result<()> {
		let path = path.as_ref();
		if !path.exists() {
			warn!(?path, "image file not found");
			return Ok(());
		}

		let mut img = image::open(path)?;
		let (width, height) = (u32::from(self.width()), u32::from(self.height()));
		if img.width() > width || img.height() > height {
			img = match fit {
				ImageFit::Stretch => img.resize_exact(
					img.width().min(width),
					img.height().min(height),
					FilterType::CatmullRom,
				),
				ImageFit::Contain => img.resize(width, height, FilterType::CatmullRom),
			};
			debug!(width = img.width(), height = img.height(), "resized image");
		}

		let rgb = img.to_rgb8();
		for (px, py, pixel) in rgb.enumerate_pixels() {
			let [r, g, b] = pixel.0;
			self.buffer.set_pixel(
				x + px as i32,
				y + py as i32,
				Rgb565::from(Rgb888::new(r, g, b)),
			);
		}

		info!(?path, "image displayed");
		self.flush()
	}

	/// Write text with its top-left corner at `(x, y)`.
	///
	/// The area behind the text is first cleared to black, using a rough estimate of its width
	/// (see [`estimate_text_width`]) and the font size as height.
	///
	/// If `options.font` is set and exists, that font is used; otherwise the default font. Either
	/// way the size defaults to the default font's size. The built-in font has a fixed size, so
	/// the size option only affects the cleared area then.
	#[instrument(level = "debug", skip(self, options))]
	pub fn draw_text(
		&mut self,
		x: i32,
		y: i32,
		msg: &str,
		colour: Rgb565,
		options: TextOptions,
	) -> Result<()> {
		let custom = match options.font.as_deref() {
			Some(path) if path.exists() => Some(FontFace::load(path)?),
			Some(path) => {
				debug!(?path, "font file not found, using default font");
				None
			}
			None => None,
		};

		let face = custom.as_ref().unwrap_or(self.font.face());
		let size = options.size.unwrap_or(self.font.size());

		let width = estimate_text_width(msg.chars().count(), size, x, self.width());
		fill_rect(&mut self.buffer, x, y, width, size, Rgb565::BLACK, None);
		face.render(&mut self.buffer, Point::new(x, y), msg, size, colour);

		self.flush()
	}

	/// Fill the whole screen with a colour.
	#[instrument(level = "debug", skip(self))]
	pub fn clear_screen(&mut self, colour: Rgb565) -> Result<()> {
		self.buffer.solid(colour);
		debug!("screen cleared");
		self.flush()
	}
}

/// Pulse the reset pin: high, low, high, waiting after each step.
#[instrument(level = "debug", skip(gpio))]
pub fn hardware_reset(gpio: &mut impl GpioControl, pin: u8) -> Result<()> {
	for level in [Level::High, Level::Low, Level::High] {
		gpio.write(pin, level)?;
		gpio.delay(RESET_DELAY);
	}

	Ok(())
}

fn shape_style(fill: Rgb565, outline: Option<Rgb565>) -> PrimitiveStyle<Rgb565> {
	let style = PrimitiveStyleBuilder::new().fill_color(fill);
	match outline {
		Some(colour) => style
			.stroke_color(colour)
			.stroke_width(1)
			.stroke_alignment(StrokeAlignment::Inside)
			.build(),
		None => style.build(),
	}
}

fn fill_rect(
	buffer: &mut FrameBuffer,
	x: i32,
	y: i32,
	w: u32,
	h: u32,
	fill: Rgb565,
	outline: Option<Rgb565>,
) {
	let Ok(_) = Rectangle::new(Point::new(x, y), Size::new(w.saturating_add(1), h.saturating_add(1)))
		.into_styled(shape_style(fill, outline))
		.draw(buffer);
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn text_width_is_clamped() {
		assert_eq!(estimate_text_width(4, 16, 0, 160), 32);
		assert_eq!(estimate_text_width(1000, 24, 10, 160), 150);
		assert_eq!(estimate_text_width(5, 16, 200, 160), 0);
		assert_eq!(estimate_text_width(5, 16, -10, 160), 40);
	}

	#[test]
	fn default_options_use_standard_fonts() {
		let options = ScreenOptions::default();
		assert_eq!(options.fonts.len(), DEFAULT_FONT_CANDIDATES.len());
		assert_eq!(options.pins.reset, 25);
	}
}
