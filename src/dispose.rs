//! Unsubscribe handles for external notification streams.

// self
use crate::_prelude::*;

type ReleaseFn = Box<dyn FnOnce() + Send>;

/// Handle returned when a listener is attached to an external notification source.
///
/// The listener stays attached until [`Registration::release`] is called or the handle is
/// dropped. Releasing twice is a no-op.
pub struct Registration(Mutex<Option<ReleaseFn>>);
impl Registration {
	/// Wraps the closure that detaches the listener.
	pub fn new(release: impl 'static + FnOnce() + Send) -> Self {
		Self(Mutex::new(Some(Box::new(release))))
	}

	/// Creates a handle with nothing to release.
	pub fn noop() -> Self {
		Self(Mutex::new(None))
	}

	/// Detaches the listener now.
	pub fn release(&self) {
		let release = self.0.lock().take();

		if let Some(release) = release {
			release();
		}
	}

	/// Returns `true` once the listener has been detached.
	pub fn is_released(&self) -> bool {
		self.0.lock().is_none()
	}
}
impl Drop for Registration {
	fn drop(&mut self) {
		self.release();
	}
}
impl Debug for Registration {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Registration").field("released", &self.is_released()).finish()
	}
}

/// Ordered collection of registrations released together on teardown.
#[derive(Debug, Default)]
pub struct Disposables {
	registrations: Mutex<Vec<Registration>>,
	disposed: AtomicBool,
}
impl Disposables {
	/// Adds a registration. Registrations pushed after disposal are released immediately.
	pub fn push(&self, registration: Registration) {
		let mut registrations = self.registrations.lock();

		// The flag only flips under this lock, so a concurrent dispose cannot miss the push.
		if self.is_disposed() {
			drop(registrations);
			registration.release();

			return;
		}

		registrations.push(registration);
	}

	/// Releases every collected registration, most recent first.
	pub fn dispose(&self) {
		let drained = {
			let mut registrations = self.registrations.lock();

			self.disposed.store(true, Ordering::Release);

			mem::take(&mut *registrations)
		};

		for registration in drained.into_iter().rev() {
			registration.release();
		}
	}

	/// Returns `true` after [`Disposables::dispose`] has run.
	pub fn is_disposed(&self) -> bool {
		self.disposed.load(Ordering::Acquire)
	}

	/// Number of registrations still held.
	pub fn len(&self) -> usize {
		self.registrations.lock().len()
	}

	/// Returns `true` when no registrations are held.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}
impl Drop for Disposables {
	fn drop(&mut self) {
		self.dispose();
	}
}
