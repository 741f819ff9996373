use crate::{buffer::FrameBuffer, error::Result, geometry::DisplayGeometry};

/// Link to the panel controller.
///
/// This is what turns a [`FrameBuffer`] into pixels on glass. The transport is configured once,
/// right after the hardware reset, then receives whole frames.
pub trait PanelTransport {
	/// Run the controller init sequence for this geometry.
	fn configure(&mut self, geometry: &DisplayGeometry) -> Result<()>;

	/// Send a full frame.
	fn push(&mut self, frame: &FrameBuffer) -> Result<()>;

	/// Apply a contrast byte.
	fn set_contrast(&mut self, contrast: u8) -> Result<()>;
}

#[cfg(target_os = "linux")]
pub use rpi::{SpiArgs, SpiPanel};

#[cfg(target_os = "linux")]
mod rpi {
	use std::{thread::sleep, time::Duration};

	use itertools::Itertools;
	use rppal::{
		gpio::{Gpio, Level, OutputPin},
		spi::{Bus, Mode, SlaveSelect, Spi},
	};
	use tracing::{debug, instrument, trace};

	use super::PanelTransport;
	use crate::{
		buffer::FrameBuffer,
		commands::*,
		error::{Error, Result},
		geometry::DisplayGeometry,
	};

	/// Arguments to open the SPI link to the display.
	///
	/// It implements [`Default`] with the bring-up board's wiring.
	#[derive(Debug, Clone)]
	pub struct SpiArgs {
		/// SPI port to use.
		///
		/// Defaults to 0.
		pub spi: u8,

		/// SPI CE number for the display's chip select pin.
		///
		/// Defaults to 0.
		pub ce: u8,

		/// GPIO pin number for the display's data/command pin.
		///
		/// Defaults to 24.
		pub dc: u8,

		/// SPI frequency in Hz.
		///
		/// Defaults to 8 MHz.
		pub frequency: u32,

		/// Largest single SPI write, in bytes.
		///
		/// Defaults to 4096, which is the default `spidev.bufsiz`.
		pub chunk_size: usize,
	}

	impl Default for SpiArgs {
		fn default() -> Self {
			Self {
				spi: 0,
				ce: 0,
				dc: 24,
				frequency: 8_000_000,
				chunk_size: 4096,
			}
		}
	}

	/// ST7735 controller over SPI.
	#[derive(Debug)]
	pub struct SpiPanel {
		spi: Spi,
		dc: OutputPin,
		chunk_size: usize,
		geometry: Option<DisplayGeometry>,
	}

	impl SpiPanel {
		/// Open the SPI link and claim the data/command pin.
		///
		/// This doesn't talk to the display yet: that's done by [`PanelTransport::configure`].
		#[instrument(level = "debug")]
		pub fn new(args: &SpiArgs) -> Result<Self> {
			let dc = Gpio::new()?.get(args.dc)?.into_output();

			let spi = Spi::new(
				match args.spi {
					0 => Bus::Spi0,
					1 => Bus::Spi1,
					2 => Bus::Spi2,
					3 => Bus::Spi3,
					4 => Bus::Spi4,
					5 => Bus::Spi5,
					6 => Bus::Spi6,
					n => {
						return Err(Error::Io(std::io::Error::new(
							std::io::ErrorKind::InvalidInput,
							format!("SPI bus number out of range: {n}"),
						)));
					}
				},
				match args.ce {
					0 => SlaveSelect::Ss0,
					1 => SlaveSelect::Ss1,
					2 => SlaveSelect::Ss2,
					n => {
						return Err(Error::Io(std::io::Error::new(
							std::io::ErrorKind::InvalidInput,
							format!("SPI CE number out of range: {n}"),
						)));
					}
				},
				args.frequency,
				Mode::Mode0,
			)?;

			Ok(Self {
				spi,
				dc,
				chunk_size: args.chunk_size.max(64),
				geometry: None,
			})
		}

		/// Send a command.
		#[instrument(level = "trace", skip(self))]
		fn command(&mut self, command: Command) -> Result<()> {
			self.dc.write(Level::Low);
			trace!(byte=%format!("{:02X?}", command as u8), "writing command byte to SPI");
			self.spi.write(&[command as u8])?;
			Ok(())
		}

		/// Write some data, in chunks no larger than the SPI buffer.
		#[instrument(level = "trace", skip(self, bytes))]
		fn write_data(&mut self, bytes: &[u8]) -> Result<()> {
			self.dc.write(Level::High);
			trace!(length = bytes.len(), "writing some bytes to SPI");
			for chunk in bytes.chunks(self.chunk_size) {
				self.spi.write(chunk)?;
			}
			Ok(())
		}

		fn command_with_data(&mut self, command: Command, data: &[u8]) -> Result<()> {
			self.command(command)?;
			if !data.is_empty() {
				self.write_data(data)?;
			}
			Ok(())
		}
	}

	impl PanelTransport for SpiPanel {
		#[instrument(level = "debug", skip(self))]
		fn configure(&mut self, geometry: &DisplayGeometry) -> Result<()> {
			self.command(Command::SoftwareReset)?;
			sleep(Duration::from_millis(150));
			self.command(Command::SleepOut)?;
			sleep(Duration::from_millis(255));

			for (command, data) in INIT_SEQUENCE {
				self.command_with_data(*command, data)?;
			}

			let madctl =
				MemoryAccessControl::for_orientation(geometry.rotation, geometry.colour_order);
			debug!(madctl=%format!("{:08b}", madctl.bits()), "memory access control");
			self.command_with_data(Command::MemoryAccessControl, &[madctl.bits()])?;

			self.command(Command::NormalDisplayOn)?;
			sleep(Duration::from_millis(10));
			self.command(Command::DisplayOn)?;
			sleep(Duration::from_millis(100));

			self.geometry = Some(*geometry);
			Ok(())
		}

		#[instrument(level = "trace", skip(self, frame))]
		fn push(&mut self, frame: &FrameBuffer) -> Result<()> {
			let (h_offset, v_offset) = self
				.geometry
				.map_or((0, 0), |geometry| (geometry.h_offset, geometry.v_offset));

			let columns = address_window(h_offset, 0, frame.width().saturating_sub(1))
				.ok_or(Error::OffsetOutOfRange(h_offset))?;
			let rows = address_window(v_offset, 0, frame.height().saturating_sub(1))
				.ok_or(Error::OffsetOutOfRange(v_offset))?;
			self.command_with_data(Command::ColumnAddressSet, &columns)?;
			self.command_with_data(Command::RowAddressSet, &rows)?;

			self.command(Command::MemoryWrite)?;
			self.dc.write(Level::High);
			for chunk in &frame.data().chunks(self.chunk_size) {
				self.spi.write(&chunk.collect::<Vec<u8>>())?;
			}
			self.command(Command::Nop)?;
			Ok(())
		}

		#[instrument(level = "debug", skip(self))]
		fn set_contrast(&mut self, contrast: u8) -> Result<()> {
			self.command_with_data(Command::GammaSet, &[gamma_curve(contrast)])
		}
	}
}
