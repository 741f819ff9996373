//! A Raspberry Pi driver and drawing layer for ST7735-based 160x128 LCD displays.
//!
//! The [`Screen`] owns an in-memory frame buffer and the display's reset and backlight pins. Every
//! drawing call updates the frame buffer then sends the whole frame to the panel, which at this
//! resolution is quick enough to not bother with partial updates.
//!
//! Hardware access goes through two traits, [`GpioControl`] and [`PanelTransport`], implemented
//! for the Raspberry Pi by [`RppalGpio`] and [`SpiPanel`] (Linux only).
//!
//! # Example
//!
//! ```no_run
//! # use embedded_graphics::pixelcolor::{Rgb565, RgbColor};
//! # use rpi_st7735_driver::{RppalGpio, Result, Screen, SpiArgs, SpiPanel};
//! # fn main() -> Result<()> {
//! let gpio = RppalGpio::new()?;
//! let panel = SpiPanel::new(&SpiArgs::default())?;
//! let mut screen = Screen::new(gpio, panel, Default::default())?;
//! screen.init_gpio()?;
//! screen.open_screen()?;
//!
//! screen.clear_screen(Rgb565::BLACK)?;
//! screen.draw_rect(0, 0, 160, 40, Rgb565::RED, None)?;
//! # Ok(()) }
//! ```

#[doc(inline)]
pub use buffer::FrameBuffer;

#[doc(inline)]
pub use button::*;

#[doc(inline)]
pub use colour::parse_colour;

#[doc(inline)]
pub use commands::{Command, MemoryAccessControl};

#[doc(inline)]
pub use error::{Error, Result};

#[doc(inline)]
pub use font::*;

#[doc(inline)]
pub use geometry::*;

#[doc(inline)]
pub use gpio::*;

#[doc(inline)]
pub use screen::*;

#[doc(inline)]
pub use transport::*;

mod buffer;
mod button;
mod colour;
mod commands;
mod error;
mod font;
mod geometry;
mod gpio;
mod screen;
mod transport;
