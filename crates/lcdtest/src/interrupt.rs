//! Ctrl-C handling for the interactive tests.
//!
//! Tests run on the main thread and check the [`Interrupt`] flag between steps, so that they can
//! return normally and release the display's pins. Waits are sliced so a Ctrl-C is noticed
//! quickly, and console prompts read stdin from a separate thread for the same reason.

use std::{
	io::{BufRead, Write},
	sync::{
		Arc,
		atomic::{AtomicBool, Ordering},
		mpsc::{self, Receiver, RecvTimeoutError},
	},
	thread,
	time::{Duration, Instant},
};

use miette::{IntoDiagnostic, Result, WrapErr};
use tracing::{debug, trace};

const SLICE: Duration = Duration::from_millis(50);

/// Set once Ctrl-C has been pressed.
#[derive(Debug, Clone, Default)]
pub struct Interrupt(Arc<AtomicBool>);

impl Interrupt {
	/// Install the Ctrl-C handler.
	///
	/// This can only be done once per process.
	pub fn install() -> Result<Self> {
		let interrupt = Self::default();
		let flag = interrupt.0.clone();
		ctrlc::set_handler(move || {
			flag.store(true, Ordering::SeqCst);
		})
		.into_diagnostic()
		.wrap_err("ctrlc: set_handler")?;
		Ok(interrupt)
	}

	pub fn trigger(&self) {
		self.0.store(true, Ordering::SeqCst);
	}

	pub fn is_set(&self) -> bool {
		self.0.load(Ordering::SeqCst)
	}

	/// Sleep for the duration, unless interrupted.
	///
	/// Returns `true` if the whole duration elapsed.
	pub fn sleep(&self, duration: Duration) -> bool {
		let deadline = Instant::now() + duration;
		loop {
			if self.is_set() {
				return false;
			}

			let now = Instant::now();
			if now >= deadline {
				return true;
			}

			thread::sleep(SLICE.min(deadline - now));
		}
	}
}

/// Reads console answers without blocking Ctrl-C handling.
#[derive(Debug)]
pub struct Prompt {
	interrupt: Interrupt,
	lines: Receiver<String>,
}

impl Prompt {
	/// Start reading lines from stdin.
	pub fn stdin(interrupt: Interrupt) -> Self {
		let (tx, lines) = mpsc::channel();
		thread::spawn(move || {
			for line in std::io::stdin().lock().lines() {
				let Ok(line) = line else { break };
				if tx.send(line).is_err() {
					break;
				}
			}
			debug!("stdin closed");
		});

		Self { interrupt, lines }
	}

	/// Read from any line source, for testing.
	pub fn from_receiver(interrupt: Interrupt, lines: Receiver<String>) -> Self {
		Self { interrupt, lines }
	}

	/// Print a question and wait for a line of input.
	///
	/// Returns `None` if interrupted, or if there's no more input.
	pub fn ask(&self, question: &str) -> Option<String> {
		print!("{question}");
		let _ = std::io::stdout().flush();

		loop {
			if self.interrupt.is_set() {
				println!();
				return None;
			}

			match self.lines.recv_timeout(SLICE) {
				Ok(line) => {
					trace!(?line, "got answer");
					return Some(line.trim().to_string());
				}
				Err(RecvTimeoutError::Timeout) => continue,
				Err(RecvTimeoutError::Disconnected) => return None,
			}
		}
	}

	/// Wait for the user to press Enter.
	///
	/// Returns `false` if interrupted.
	pub fn confirm(&self, message: &str) -> bool {
		self.ask(message).is_some()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn sleep_runs_to_completion() {
		let interrupt = Interrupt::default();
		assert!(interrupt.sleep(Duration::from_millis(10)));
	}

	#[test]
	fn sleep_stops_when_interrupted() {
		let interrupt = Interrupt::default();
		interrupt.trigger();
		let start = Instant::now();
		assert!(!interrupt.sleep(Duration::from_secs(10)));
		assert!(start.elapsed() < Duration::from_secs(1));
	}

	#[test]
	fn prompt_returns_trimmed_line() {
		let (tx, rx) = mpsc::channel();
		let prompt = Prompt::from_receiver(Interrupt::default(), rx);
		tx.send("  2 \n".into()).unwrap();
		assert_eq!(prompt.ask("> ").as_deref(), Some("2"));
	}

	#[test]
	fn prompt_gives_up_on_interrupt_or_eof() {
		let (tx, rx) = mpsc::channel::<String>();
		let interrupt = Interrupt::default();
		let prompt = Prompt::from_receiver(interrupt.clone(), rx);
		interrupt.trigger();
		assert!(!prompt.confirm("press Enter"));

		drop(tx);
		let (_, rx) = mpsc::channel::<String>();
		let prompt = Prompt::from_receiver(Interrupt::default(), rx);
		assert_eq!(prompt.ask("> "), None);
	}
}
