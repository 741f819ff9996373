use std::fmt;

use crate::error::{Error, Result};

/// Panel width in pixels.
pub const WIDTH: u16 = 160;

/// Panel height in pixels.
pub const HEIGHT: u16 = 128;

/// Default contrast byte.
pub const DEFAULT_CONTRAST: u8 = 0x70;

/// Display rotation, in quarter turns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rotation {
	Deg0,
	#[default]
	Deg90,
	Deg180,
	Deg270,
}

impl Rotation {
	/// Number of quarter turns (0-3).
	pub fn quarter_turns(self) -> u8 {
		match self {
			Self::Deg0 => 0,
			Self::Deg90 => 1,
			Self::Deg180 => 2,
			Self::Deg270 => 3,
		}
	}
}

impl TryFrom<u8> for Rotation {
	type Error = Error;

	fn try_from(turns: u8) -> Result<Self> {
		match turns {
			0 => Ok(Self::Deg0),
			1 => Ok(Self::Deg90),
			2 => Ok(Self::Deg180),
			3 => Ok(Self::Deg270),
			other => Err(Error::InvalidRotation(other)),
		}
	}
}

impl fmt::Display for Rotation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.quarter_turns())
	}
}

/// Order of the colour channels in the panel's memory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ColourOrder {
	Rgb,
	#[default]
	Bgr,
}

/// Physical configuration of the panel.
///
/// Everything here is fixed once the [`Screen`](crate::Screen) is built, except for the contrast,
/// which can be changed with [`Screen::set_contrast`](crate::Screen::set_contrast).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DisplayGeometry {
	/// Width in pixels.
	pub width: u16,

	/// Height in pixels.
	pub height: u16,

	/// Rotation applied by the controller.
	pub rotation: Rotation,

	/// Colour channel order.
	pub colour_order: ColourOrder,

	/// Horizontal offset of the visible area within the controller's memory.
	pub h_offset: u16,

	/// Vertical offset of the visible area within the controller's memory.
	pub v_offset: u16,

	/// Contrast (gamma) byte.
	pub contrast: u8,
}

impl Default for DisplayGeometry {
	fn default() -> Self {
		Self {
			width: WIDTH,
			height: HEIGHT,
			rotation: Rotation::default(),
			colour_order: ColourOrder::default(),
			h_offset: 0,
			v_offset: 0,
			contrast: DEFAULT_CONTRAST,
		}
	}
}

impl fmt::Display for DisplayGeometry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"rotation={}, BGR={}, h_offset={}, v_offset={}, contrast=0x{:02X}",
			self.rotation,
			matches!(self.colour_order, ColourOrder::Bgr),
			self.h_offset,
			self.v_offset,
			self.contrast
		)
	}
}

/// GPIO pin numbers (BCM numbering) the display and button are wired to.
///
/// It implements [`Default`] with the wiring used by the bring-up board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PinAssignment {
	/// Backlight control pin.
	///
	/// Defaults to 4.
	pub backlight: u8,

	/// Data/command select pin.
	///
	/// Defaults to 24.
	pub dc: u8,

	/// Reset pin.
	///
	/// Defaults to 25.
	pub reset: u8,

	/// Push button pin, active low.
	///
	/// Defaults to 17.
	pub button: u8,
}

impl Default for PinAssignment {
	fn default() -> Self {
		Self {
			backlight: 4,
			dc: 24,
			reset: 25,
			button: 17,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn rotation_from_quarter_turns() {
		for turns in 0..4 {
			let rotation = Rotation::try_from(turns).unwrap();
			assert_eq!(rotation.quarter_turns(), turns);
		}
		assert!(matches!(
			Rotation::try_from(4),
			Err(Error::InvalidRotation(4))
		));
	}

	#[test]
	fn default_geometry_matches_wiring() {
		let geometry = DisplayGeometry::default();
		assert_eq!((geometry.width, geometry.height), (160, 128));
		assert_eq!(geometry.rotation, Rotation::Deg90);
		assert_eq!(geometry.colour_order, ColourOrder::Bgr);
		assert_eq!(
			geometry.to_string(),
			"rotation=1, BGR=true, h_offset=0, v_offset=0, contrast=0x70"
		);
	}
}
