// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(dead_code)]
#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::io;
use std::sync::{Arc, Mutex};

use mrcam_session::{PropertyMode, PropertyType, PropertyValue};
use mrcam_sim::{PropertySpec, SimRuntime};

#[derive(Clone, Default)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl io::Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `f` with a subscriber capturing formatted log output; returns it.
pub fn capture_logs<R>(f: impl FnOnce() -> R) -> (R, String) {
    let buf = SharedBuf::default();
    let writer = buf.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();
    let out = tracing::subscriber::with_default(subscriber, f);
    let text = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
    (out, text)
}

/// ISO with modes [Off, Auto, Manual] and values [100, 200].
pub fn three_mode_iso() -> SimRuntime {
    SimRuntime::builder()
        .with_property(
            PropertyType::IsoValue,
            PropertySpec::list(
                vec![PropertyMode::Off, PropertyMode::Auto, PropertyMode::Manual],
                vec![PropertyValue::Int(100), PropertyValue::Int(200)],
            ),
        )
        .with_chroma_slots(2)
        .build()
}
