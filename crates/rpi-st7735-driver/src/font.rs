use std::{
	fmt,
	path::{Path, PathBuf},
};

use embedded_graphics::{
	Drawable,
	geometry::Point,
	mono_font::{MonoTextStyle, ascii::FONT_6X10},
	pixelcolor::Rgb565,
	text::{Baseline, Text},
};
use fontdue::{
	Font, FontSettings,
	layout::{CoordinateSystem, Layout, LayoutSettings, TextStyle},
};
use tracing::{debug, instrument, warn};

use crate::{
	buffer::FrameBuffer,
	error::{Error, Result},
};

/// Font files tried, in order, when nothing else is configured.
pub const DEFAULT_FONT_CANDIDATES: [&str; 4] = [
	"/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
	"/usr/share/fonts/truetype/freefont/FreeSans.ttf",
	"/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
	"/usr/share/fonts/truetype/ttf-dejavu/DejaVuSans.ttf",
];

/// Default size for TrueType fonts, in pixels.
pub const TRUETYPE_SIZE: u32 = 24;

/// Nominal size of the built-in font, in pixels.
///
/// The built-in font cannot be scaled, this is only used for layout estimates.
pub const BUILTIN_SIZE: u32 = 16;

/// A font face ready to render.
#[derive(Clone)]
pub enum FontFace {
	/// A TrueType/OpenType font loaded from a file.
	TrueType { path: PathBuf, font: Box<Font> },

	/// The built-in fixed-size bitmap font.
	BuiltIn,
}

impl fmt::Debug for FontFace {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::TrueType { path, .. } => f.debug_tuple("TrueType").field(path).finish(),
			Self::BuiltIn => f.write_str("BuiltIn"),
		}
	}
}

impl FontFace {
	/// Load a font file.
	#[instrument(level = "debug")]
	pub fn load(path: &Path) -> Result<Self> {
		let bytes = std::fs::read(path)?;
		let font = Font::from_bytes(bytes, FontSettings::default()).map_err(|reason| {
			Error::Font {
				path: path.into(),
				reason,
			}
		})?;

		Ok(Self::TrueType {
			path: path.into(),
			font: Box::new(font),
		})
	}

	/// Render text with its top-left corner at `origin`.
	///
	/// `size` is ignored for the built-in font.
	pub fn render(
		&self,
		target: &mut FrameBuffer,
		origin: Point,
		text: &str,
		size: u32,
		colour: Rgb565,
	) {
		match self {
			Self::TrueType { font, .. } => {
				let mut layout = Layout::new(CoordinateSystem::PositiveYDown);
				layout.reset(&LayoutSettings {
					x: origin.x as f32,
					y: origin.y as f32,
					..LayoutSettings::default()
				});
				layout.append(&[&**font], &TextStyle::new(text, size as f32, 0));

				for glyph in layout.glyphs() {
					if glyph.width == 0 || glyph.height == 0 {
						continue;
					}

					let (metrics, bitmap) = font.rasterize_config(glyph.key);
					let left = glyph.x.round() as i32;
					let top = glyph.y.round() as i32;
					for (i, &coverage) in bitmap.iter().enumerate() {
						let x = left + (i % metrics.width) as i32;
						let y = top + (i / metrics.width) as i32;
						target.blend(x, y, colour, coverage);
					}
				}
			}
			Self::BuiltIn => {
				let style = MonoTextStyle::new(&FONT_6X10, colour);
				let Ok(_) = Text::with_baseline(text, origin, style, Baseline::Top).draw(target);
			}
		}
	}
}

/// The default font of a [`Screen`](crate::Screen), with its size.
#[derive(Debug, Clone)]
pub struct FontResource {
	face: FontFace,
	size: u32,
}

impl FontResource {
	/// The built-in font.
	pub fn builtin() -> Self {
		Self {
			face: FontFace::BuiltIn,
			size: BUILTIN_SIZE,
		}
	}

	/// Pick the first candidate file that exists and loads.
	///
	/// If none do, this falls back to a system font (with the `fontconfig` feature), and
	/// finally to the built-in font.
	#[instrument(level = "debug", skip(candidates))]
	pub fn resolve<P: AsRef<Path>>(candidates: &[P]) -> Self {
		for candidate in candidates {
			let path = candidate.as_ref();
			if !path.exists() {
				debug!(?path, "font file not found, trying next");
				continue;
			}

			match FontFace::load(path) {
				Ok(face) => {
					debug!(?path, "using font");
					return Self {
						face,
						size: TRUETYPE_SIZE,
					};
				}
				Err(err) => warn!(?path, "error loading font, trying next: {err}"),
			}
		}

		#[cfg(feature = "fontconfig")]
		if let Some(found) = system::find_sans() {
			return found;
		}

		warn!("no font file found, using the built-in font");
		Self::builtin()
	}

	pub fn face(&self) -> &FontFace {
		&self.face
	}

	/// Default size in pixels.
	pub fn size(&self) -> u32 {
		self.size
	}

	pub fn is_builtin(&self) -> bool {
		matches!(self.face, FontFace::BuiltIn)
	}

	/// Path of the font file, if this isn't the built-in font.
	pub fn path(&self) -> Option<&Path> {
		match &self.face {
			FontFace::TrueType { path, .. } => Some(path),
			FontFace::BuiltIn => None,
		}
	}
}

#[cfg(feature = "fontconfig")]
mod system {
	use std::path::Path;

	use rust_fontconfig::{FcFontCache, FcPattern};
	use tracing::{debug, warn};

	use super::{FontFace, FontResource, TRUETYPE_SIZE};

	const WELL_KNOWN_SANS: [&str; 4] = ["DejaVu Sans", "Noto Sans", "Liberation Sans", "FreeSans"];

	pub(super) fn find_sans() -> Option<FontResource> {
		debug!("building font cache");
		let cache = FcFontCache::build();

		for well_known in WELL_KNOWN_SANS {
			debug!(?well_known, "querying for well-known font by family");
			let Some(found) = cache.query(&FcPattern {
				family: Some(well_known.to_string()),
				..Default::default()
			}) else {
				continue;
			};

			match FontFace::load(Path::new(&found.path)) {
				Ok(face) => {
					debug!(?found, "found a system font");
					return Some(FontResource {
						face,
						size: TRUETYPE_SIZE,
					});
				}
				Err(err) => warn!(?found, "error loading system font: {err}"),
			}
		}

		None
	}
}

#[cfg(test)]
mod tests {
	use embedded_graphics::pixelcolor::RgbColor;

	use super::*;

	#[cfg(not(feature = "fontconfig"))]
	#[test]
	fn no_candidates_is_builtin() {
		let font = FontResource::resolve(&["/nonexistent/font.ttf"]);
		assert!(font.is_builtin());
		assert_eq!(font.size(), BUILTIN_SIZE);
		assert_eq!(font.path(), None);
	}

	#[test]
	fn unparseable_candidate_is_skipped() {
		let dir = tempfile::tempdir().unwrap();
		let bad = dir.path().join("bad.ttf");
		std::fs::write(&bad, b"not a font").unwrap();

		assert!(matches!(FontFace::load(&bad), Err(Error::Font { .. })));

		#[cfg(not(feature = "fontconfig"))]
		assert!(FontResource::resolve(&[&bad]).is_builtin());
	}

	#[test]
	fn builtin_renders_pixels() {
		let mut buf = FrameBuffer::new(40, 12);
		FontFace::BuiltIn.render(&mut buf, Point::new(0, 0), "Hi", 99, Rgb565::WHITE);
		assert!(buf.pixels().iter().any(|&p| p == Rgb565::WHITE));
		assert!((0..40).all(|x| buf.pixel(x, 11) == Some(Rgb565::BLACK)));
	}
}
