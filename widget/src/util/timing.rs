//! Browser clock and timer sources for the consent core.

#[cfg(test)]
#[path = "timing_test.rs"]
mod timing_test;

use std::future::Future;
use std::time::Duration;

use consent::{Clock, Delay};
use time::OffsetDateTime;

/// Clock backed by `Date.now()`.
///
/// `OffsetDateTime::now_utc` has no time source on `wasm32-unknown-unknown`,
/// so browser builds read the JS clock instead.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserClock;

impl Clock for BrowserClock {
    fn now(&self) -> OffsetDateTime {
        #[cfg(feature = "csr")]
        {
            #[allow(clippy::cast_possible_truncation)]
            let millis = js_sys::Date::now() as i128;
            OffsetDateTime::from_unix_timestamp_nanos(millis * 1_000_000).unwrap_or(OffsetDateTime::UNIX_EPOCH)
        }
        #[cfg(not(feature = "csr"))]
        {
            OffsetDateTime::now_utc()
        }
    }
}

/// Delay backed by `setTimeout`. Completes immediately outside the browser.
#[derive(Clone, Copy, Debug, Default)]
pub struct TimerDelay;

impl Delay for TimerDelay {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> {
        sleep(duration)
    }
}

/// Non-blocking pause on the UI thread.
pub async fn sleep(duration: Duration) {
    #[cfg(feature = "csr")]
    {
        gloo_timers::future::sleep(duration).await;
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = duration;
    }
}
