//! Task watchdog wrapper.
//!
//! The main loop subscribes itself to the TWDT at boot and feeds it once
//! per control tick.  A wedged loop therefore reboots the board within
//! the watchdog window with the relay de-energised by the hardware
//! power-on defaults.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

use log::info;

/// Watchdog subscription errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchdogError {
    SubscribeFailed(i32),
}

impl core::fmt::Display for WatchdogError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::SubscribeFailed(rc) => write!(f, "TWDT subscribe failed (rc={})", rc),
        }
    }
}

#[cfg(target_os = "espidf")]
pub fn subscribe_current_task() -> Result<(), WatchdogError> {
    // SAFETY: NULL means the calling task; the TWDT itself is configured
    // via sdkconfig and already running.
    let ret = unsafe { esp_task_wdt_add(core::ptr::null_mut()) };
    if ret != ESP_OK as i32 {
        return Err(WatchdogError::SubscribeFailed(ret));
    }
    info!("watchdog: main loop subscribed to TWDT");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn subscribe_current_task() -> Result<(), WatchdogError> {
    info!("watchdog(sim): TWDT not active");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn feed() {
    // SAFETY: only valid after subscribe_current_task() succeeded, which
    // main() guarantees before the loop starts.
    unsafe {
        esp_task_wdt_reset();
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn feed() {}
