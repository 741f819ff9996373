use std::path::Path;

use miette::{Result, miette};
use tracing::{debug, warn};

/// Device files for the two chip selects of SPI bus 0.
pub const SPI_DEVICES: [&str; 2] = ["/dev/spidev0.0", "/dev/spidev0.1"];

/// Check that the system looks ready before touching any hardware.
///
/// Not running as root is only a warning, as GPIO access can also be granted through groups. No
/// SPI device at all is an error.
pub fn check() -> Result<()> {
	if !is_root::is_root() {
		warn!("this program may require root privileges to access GPIO and SPI");
		println!("It's recommended to run with 'sudo lcdtest'");
	}

	let found = present(SPI_DEVICES.iter().map(|device| Path::new(*device)));
	debug!(?found, "SPI devices");
	if found.is_empty() {
		return Err(miette!(
			help = "enable SPI by running 'sudo raspi-config' then select 'Interface Options' > 'SPI' > 'Yes', \
				and restart the Raspberry Pi. If it's already enabled, check the hardware connections.",
			"SPI device files not detected ({})",
			SPI_DEVICES.join(", ")
		));
	}

	Ok(())
}

fn present<'p>(paths: impl Iterator<Item = &'p Path>) -> Vec<&'p Path> {
	paths.filter(|path| path.exists()).collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn only_existing_devices_count() {
		let dir = std::env::temp_dir();
		let missing = Path::new("/dev/spidev-does-not-exist");
		assert_eq!(
			present([dir.as_path(), missing].into_iter()),
			vec![dir.as_path()]
		);
		assert!(present([missing].into_iter()).is_empty());
	}
}
