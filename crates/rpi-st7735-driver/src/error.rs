use std::path::PathBuf;

type BoxedError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error type for driver operations.
#[derive(Debug, thiserror::Error)]
#[cfg_attr(feature = "miette", derive(miette::Diagnostic))]
pub enum Error {
	#[error("GPIO error")]
	#[cfg_attr(
		feature = "miette",
		diagnostic(help(
			"GPIO error, check the pin numbers; root privileges may be required, try running with sudo"
		))
	)]
	Gpio(#[source] BoxedError),

	#[error("SPI error")]
	#[cfg_attr(
		feature = "miette",
		diagnostic(help(
			"SPI error, check that SPI is enabled ('sudo raspi-config' > Interface Options > SPI), \
			that 'ls -l /dev/spidev*' lists devices, or lower --chunk-size / increase spidev.bufsiz"
		))
	)]
	Spi(#[source] BoxedError),

	#[error("pin {0} was used before being set up")]
	#[cfg_attr(feature = "miette", diagnostic(help("call setup() on the pin first")))]
	PinNotSetUp(u8),

	#[error("image error")]
	#[cfg_attr(feature = "miette", diagnostic(help("the image could not be decoded")))]
	Image(#[from] image::ImageError),

	#[error("font {path:?} could not be loaded: {reason}")]
	Font { path: PathBuf, reason: &'static str },

	#[error("unknown colour {0:?}")]
	#[cfg_attr(
		feature = "miette",
		diagnostic(help("use a colour name like 'red' or a hex code like '#ff0000'"))
	)]
	UnknownColour(String),

	#[error("display offset {0} is out of range")]
	#[cfg_attr(
		feature = "miette",
		diagnostic(help("offsets only shift the visible area by a few pixels, try 0 to 4"))
	)]
	OffsetOutOfRange(u16),

	#[error("rotation must be between 0 and 3, got {0}")]
	InvalidRotation(u8),

	#[error("I/O error")]
	#[cfg_attr(feature = "miette", diagnostic(help("local (non-SPI/GPIO) I/O error")))]
	Io(#[from] std::io::Error),
}

#[cfg(target_os = "linux")]
impl From<rppal::gpio::Error> for Error {
	fn from(err: rppal::gpio::Error) -> Self {
		Self::Gpio(Box::new(err))
	}
}

#[cfg(target_os = "linux")]
impl From<rppal::spi::Error> for Error {
	fn from(err: rppal::spi::Error) -> Self {
		Self::Spi(Box::new(err))
	}
}

/// Convenience type for Results in this crate.
pub type Result<T> = std::result::Result<T, Error>;
