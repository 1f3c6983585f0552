//! Monotonic time and blocking delays.
//!
//! ESP-IDF targets use `esp_timer` for uptime and the FreeRTOS delay for
//! sleeping; host targets fall back to `std` so the same call sites work
//! in tests.

#[cfg(not(target_os = "espidf"))]
use std::sync::OnceLock;
#[cfg(not(target_os = "espidf"))]
use std::time::Instant;

/// Microseconds since boot.
#[cfg(target_os = "espidf")]
pub fn uptime_us() -> u64 {
    // SAFETY: esp_timer_get_time is always safe after app_main starts.
    (unsafe { esp_idf_svc::sys::esp_timer_get_time() }) as u64
}

#[cfg(not(target_os = "espidf"))]
pub fn uptime_us() -> u64 {
    static EPOCH: OnceLock<Instant> = OnceLock::new();
    let epoch = EPOCH.get_or_init(Instant::now);
    epoch.elapsed().as_micros() as u64
}

pub fn uptime_ms() -> u64 {
    uptime_us() / 1_000
}

pub fn uptime_secs() -> u64 {
    uptime_us() / 1_000_000
}

/// Block the calling task.  Used for display timing and the short
/// transition-banner settle windows; never called from timer context.
#[cfg(target_os = "espidf")]
pub fn delay_ms(ms: u32) {
    esp_idf_svc::hal::delay::FreeRtos::delay_ms(ms);
}

#[cfg(not(target_os = "espidf"))]
pub fn delay_ms(ms: u32) {
    // Tests call through LCD init; keep the stall negligible.
    std::thread::sleep(std::time::Duration::from_millis(u64::from(ms.min(2))));
}
