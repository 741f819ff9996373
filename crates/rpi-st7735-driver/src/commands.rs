use crate::geometry::{ColourOrder, Rotation};

/// ST7735 display commands
///
/// This is the subset of the ST7735R command set needed to bring up and drive the panel.
/// Descriptions are derived from usage and the ST7735R datasheet.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[repr(u8)]
pub enum Command {
	/// Noop.
	///
	/// Used to signal the end of a write.
	Nop = 0x00,

	/// Software reset.
	///
	/// Needs 120ms before the next command.
	SoftwareReset = 0x01,

	/// Leave sleep mode.
	///
	/// Needs 120ms before the next command.
	SleepOut = 0x11,

	/// Normal display mode (not partial).
	NormalDisplayOn = 0x13,

	/// Turn colour inversion off.
	InversionOff = 0x20,

	/// Select one of the four predefined gamma curves.
	///
	/// This must be followed by a one-hot byte (0x01, 0x02, 0x04, 0x08).
	GammaSet = 0x26,

	/// Turn the display on.
	DisplayOn = 0x29,

	/// Set the column address window.
	///
	/// This must be followed by four bytes: start and end columns as big endian u16s.
	ColumnAddressSet = 0x2A,

	/// Set the row address window.
	///
	/// This must be followed by four bytes: start and end rows as big endian u16s.
	RowAddressSet = 0x2B,

	/// Write pixel data to the current window.
	MemoryWrite = 0x2C,

	/// Set the memory access order, see [`MemoryAccessControl`].
	MemoryAccessControl = 0x36,

	/// Set the interface pixel format.
	InterfacePixelFormat = 0x3A,

	/// Frame rate control in normal mode.
	FrameRateNormal = 0xB1,

	/// Frame rate control in idle mode.
	FrameRateIdle = 0xB2,

	/// Frame rate control in partial mode.
	FrameRatePartial = 0xB3,

	/// Display inversion control.
	InversionControl = 0xB4,

	PowerControl1 = 0xC0,
	PowerControl2 = 0xC1,
	PowerControl3 = 0xC2,
	PowerControl4 = 0xC3,
	PowerControl5 = 0xC4,

	/// VCOM voltage.
	VcomControl = 0xC5,

	PositiveGammaCorrection = 0xE0,
	NegativeGammaCorrection = 0xE1,
}

bitflags::bitflags! {
	/// Memory data access control (MADCTL) bits.
	///
	/// The first three bits select how the panel maps the frame onto its memory, which is how
	/// rotation is done in hardware.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
	pub struct MemoryAccessControl: u8 {
		/// Row address order (MY).
		const ROW_ORDER      = 0b1000_0000;
		/// Column address order (MX).
		const COL_ORDER      = 0b0100_0000;
		/// Row/column exchange (MV).
		const EXCHANGE       = 0b0010_0000;
		/// Vertical refresh order (ML).
		const V_REFRESH      = 0b0001_0000;
		/// Colour order: BGR when set.
		const BGR            = 0b0000_1000;
		/// Horizontal refresh order (MH).
		const H_REFRESH      = 0b0000_0100;
	}
}

impl MemoryAccessControl {
	/// Access control for a rotation and colour order.
	pub fn for_orientation(rotation: Rotation, order: ColourOrder) -> Self {
		let rotation = match rotation {
			Rotation::Deg0 => Self::COL_ORDER | Self::ROW_ORDER,
			Rotation::Deg90 => Self::ROW_ORDER | Self::EXCHANGE,
			Rotation::Deg180 => Self::empty(),
			Rotation::Deg270 => Self::COL_ORDER | Self::EXCHANGE,
		};

		match order {
			ColourOrder::Rgb => rotation,
			ColourOrder::Bgr => rotation | Self::BGR,
		}
	}
}

pub const COLMOD_16BPP: u8 = 0b0101;

/// Gamma curve byte for [`Command::GammaSet`] from a contrast byte.
///
/// The ST7735 has no contrast register, so the contrast range is split in four, one per curve.
pub fn gamma_curve(contrast: u8) -> u8 {
	1 << (contrast >> 6)
}

/// Bytes to send with [`Command::ColumnAddressSet`] or [`Command::RowAddressSet`].
///
/// Returns `None` if the offset pushes the window past the 16-bit address space.
pub fn address_window(offset: u16, start: u16, end: u16) -> Option<[u8; 4]> {
	let [s0, s1] = offset.checked_add(start)?.to_be_bytes();
	let [e0, e1] = offset.checked_add(end)?.to_be_bytes();
	Some([s0, s1, e0, e1])
}

/// Init sequence after the software reset and sleep out.
///
/// Values are the usual ST7735R "red tab" ones.
pub(crate) const INIT_SEQUENCE: &[(Command, &[u8])] = &[
	(Command::FrameRateNormal, &[0x01, 0x2C, 0x2D]),
	(Command::FrameRateIdle, &[0x01, 0x2C, 0x2D]),
	(Command::FrameRatePartial, &[0x01, 0x2C, 0x2D, 0x01, 0x2C, 0x2D]),
	(Command::InversionControl, &[0x07]),
	(Command::PowerControl1, &[0xA2, 0x02, 0x84]),
	(Command::PowerControl2, &[0xC5]),
	(Command::PowerControl3, &[0x0A, 0x00]),
	(Command::PowerControl4, &[0x8A, 0x2A]),
	(Command::PowerControl5, &[0x8A, 0xEE]),
	(Command::VcomControl, &[0x0E]),
	(Command::InversionOff, &[]),
	(Command::InterfacePixelFormat, &[COLMOD_16BPP]),
	(
		Command::PositiveGammaCorrection,
		&[
			0x02, 0x1C, 0x07, 0x12, 0x37, 0x32, 0x29, 0x2D, 0x29, 0x25, 0x2B, 0x39, 0x00, 0x01,
			0x03, 0x10,
		],
	),
	(
		Command::NegativeGammaCorrection,
		&[
			0x03, 0x1D, 0x07, 0x06, 0x2E, 0x2C, 0x29, 0x2D, 0x2E, 0x2E, 0x37, 0x3F, 0x00, 0x00,
			0x02, 0x10,
		],
	),
];

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn madctl_per_rotation() {
		use ColourOrder::*;
		use Rotation::*;

		let bits = |r, o| MemoryAccessControl::for_orientation(r, o).bits();
		assert_eq!(bits(Deg0, Rgb), 0xC0);
		assert_eq!(bits(Deg90, Rgb), 0xA0);
		assert_eq!(bits(Deg180, Rgb), 0x00);
		assert_eq!(bits(Deg270, Rgb), 0x60);
		assert_eq!(bits(Deg90, Bgr), 0xA8);
	}

	#[test]
	fn gamma_curve_is_one_hot() {
		assert_eq!(gamma_curve(0x00), 0x01);
		assert_eq!(gamma_curve(0x70), 0x02);
		assert_eq!(gamma_curve(0xA0), 0x04);
		assert_eq!(gamma_curve(0xFF), 0x08);
	}

	#[test]
	fn window_includes_offset() {
		assert_eq!(address_window(2, 0, 159), Some([0x00, 0x02, 0x00, 0xA1]));
	}

	#[test]
	fn window_overflow_is_refused() {
		assert_eq!(address_window(u16::MAX, 0, 159), None);
		assert_eq!(address_window(u16::MAX - 100, 0, 159), None);
		assert_eq!(
			address_window(u16::MAX - 159, 0, 159),
			Some([0xFF, 0x60, 0xFF, 0xFF])
		);
	}
}
