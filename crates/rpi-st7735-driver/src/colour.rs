use embedded_graphics::pixelcolor::{Rgb565, Rgb888};

use crate::error::{Error, Result};

/// Named colours, with CSS values.
const NAMED: &[(&str, [u8; 3])] = &[
	("black", [0, 0, 0]),
	("white", [255, 255, 255]),
	("red", [255, 0, 0]),
	("lime", [0, 255, 0]),
	("green", [0, 128, 0]),
	("blue", [0, 0, 255]),
	("yellow", [255, 255, 0]),
	("cyan", [0, 255, 255]),
	("aqua", [0, 255, 255]),
	("magenta", [255, 0, 255]),
	("fuchsia", [255, 0, 255]),
	("gray", [128, 128, 128]),
	("grey", [128, 128, 128]),
	("silver", [192, 192, 192]),
	("maroon", [128, 0, 0]),
	("olive", [128, 128, 0]),
	("navy", [0, 0, 128]),
	("purple", [128, 0, 128]),
	("teal", [0, 128, 128]),
	("orange", [255, 165, 0]),
	("pink", [255, 192, 203]),
	("brown", [165, 42, 42]),
];

/// Parse a colour name (`red`, `green`...) or hex code (`#f00`, `#ff0000`).
///
/// Names follow CSS, so `green` is half-intensity; use `lime` for full green.
pub fn parse_colour(input: &str) -> Result<Rgb565> {
	let name = input.trim().to_ascii_lowercase();

	if let Some(hex) = name.strip_prefix('#') {
		return parse_hex(hex)
			.map(|[r, g, b]| Rgb565::from(Rgb888::new(r, g, b)))
			.ok_or_else(|| Error::UnknownColour(input.into()));
	}

	NAMED
		.iter()
		.find(|(known, _)| *known == name)
		.map(|(_, [r, g, b])| Rgb565::from(Rgb888::new(*r, *g, *b)))
		.ok_or_else(|| Error::UnknownColour(input.into()))
}

fn parse_hex(hex: &str) -> Option<[u8; 3]> {
	if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
		return None;
	}

	match hex.len() {
		3 => {
			let mut rgb = [0; 3];
			for (channel, c) in rgb.iter_mut().zip(hex.chars()) {
				let digit = c.to_digit(16)? as u8;
				*channel = digit << 4 | digit;
			}
			Some(rgb)
		}
		6 => Some([
			u8::from_str_radix(&hex[0..2], 16).ok()?,
			u8::from_str_radix(&hex[2..4], 16).ok()?,
			u8::from_str_radix(&hex[4..6], 16).ok()?,
		]),
		_ => None,
	}
}

#[cfg(test)]
mod tests {
	use embedded_graphics::pixelcolor::RgbColor;

	use super::*;

	#[test]
	fn names() {
		assert_eq!(parse_colour("red").unwrap(), Rgb565::RED);
		assert_eq!(parse_colour("Black").unwrap(), Rgb565::BLACK);
		assert_eq!(parse_colour(" white ").unwrap(), Rgb565::WHITE);
		assert_eq!(parse_colour("lime").unwrap(), Rgb565::GREEN);
		assert_ne!(parse_colour("green").unwrap(), Rgb565::GREEN);
	}

	#[test]
	fn hex() {
		assert_eq!(parse_colour("#00f").unwrap(), Rgb565::BLUE);
		assert_eq!(parse_colour("#FFFF00").unwrap(), Rgb565::YELLOW);
		assert!(parse_colour("#12345").is_err());
		assert!(parse_colour("#gggggg").is_err());
	}

	#[test]
	fn unknown() {
		assert!(matches!(
			parse_colour("octarine"),
			Err(Error::UnknownColour(name)) if name == "octarine"
		));
	}
}
