//! Headless window layer for tests
//!
//! Native messages are scripted through a channel; each one is handled by a
//! single `pump` call, so tests control exactly what the driver sees.

use crossbeam_channel::{Receiver, Sender};
use raw_window_handle::{RawDisplayHandle, RawWindowHandle, WebDisplayHandle, WebWindowHandle};
use std::ffi::CStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use thiserror::Error;

use super::{NativeHandle, NativeWindowSystem, PumpStatus};
use crate::config::Geometry;
use crate::events::{Event, EventPublisher, WindowId};

pub(crate) const MOCK_WINDOW: WindowId = WindowId::from_raw(0x5eed);

/// Scripted native message
#[derive(Debug)]
pub(crate) enum MockMessage {
    /// Forwarded unchanged
    Input(Event),
    /// User clicked the close button
    Close,
    /// The native layer fails
    Fail,
}

#[derive(Error, Debug)]
#[error("mock native failure")]
pub(crate) struct MockError;

pub(crate) struct MockPlatform {
    script: Receiver<MockMessage>,
    created: Mutex<Option<(String, Geometry)>>,
    destroyed: AtomicUsize,
}

pub(crate) struct MockWindow;

impl MockPlatform {
    pub(crate) fn new() -> (Self, Sender<MockMessage>) {
        let (sender, script) = crossbeam_channel::unbounded();
        let platform = Self {
            script,
            created: Mutex::new(None),
            destroyed: AtomicUsize::new(0),
        };
        (platform, sender)
    }

    pub(crate) fn created(&self) -> Option<(String, Geometry)> {
        self.created.lock().unwrap().clone()
    }

    pub(crate) fn destroyed(&self) -> usize {
        self.destroyed.load(Ordering::SeqCst)
    }
}

impl NativeWindowSystem for MockPlatform {
    type Window = MockWindow;
    type Error = MockError;

    fn create_window(&self, title: &str, geometry: &Geometry) -> Result<(MockWindow, NativeHandle), MockError> {
        let mut created = self.created.lock().unwrap();
        assert!(created.is_none(), "create_window called twice");
        *created = Some((title.to_string(), *geometry));

        // SAFETY: web handles with id 0 point at nothing and are never dereferenced
        #[allow(unsafe_code)]
        let handle = unsafe {
            NativeHandle::new(
                MOCK_WINDOW,
                RawWindowHandle::Web(WebWindowHandle::empty()),
                RawDisplayHandle::Web(WebDisplayHandle::empty()),
            )
        };
        Ok((MockWindow, handle))
    }

    fn pump(&self, _window: &mut MockWindow, events: &EventPublisher) -> Result<PumpStatus, MockError> {
        match self.script.recv() {
            Ok(MockMessage::Input(event)) => {
                events.publish(event);
                Ok(PumpStatus::Continue)
            }
            Ok(MockMessage::Fail) => Err(MockError),
            Ok(MockMessage::Close) | Err(_) => Ok(PumpStatus::CloseRequested),
        }
    }

    fn destroy_window(&self, _window: MockWindow) {
        self.destroyed.fetch_add(1, Ordering::SeqCst);
    }

    fn required_surface_extensions(&self) -> Vec<&'static CStr> {
        crate::platform::host::required_extensions()
    }
}
