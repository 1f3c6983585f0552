//! Periodic tick sources.
//!
//! On ESP-IDF, three `esp_timer` periodic timers push tick events into
//! the lock-free queue; the main loop drains them and does all real work
//! in task context, so the callbacks stay trivially short.
//!
//! On host targets nothing is armed — tests feed ticks into the queue
//! themselves.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
use crate::events::Event;

/// Errors arming the periodic timers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerError {
    CreateFailed(i32),
    StartFailed(i32),
}

impl core::fmt::Display for TimerError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::CreateFailed(rc) => write!(f, "timer create failed (rc={})", rc),
            Self::StartFailed(rc) => write!(f, "timer start failed (rc={})", rc),
        }
    }
}

/// Arm the button-poll, control, and telemetry timers.
#[cfg(target_os = "espidf")]
pub fn start_tick_timers(
    button_poll_interval_ms: u32,
    control_interval_ms: u32,
    telemetry_interval_secs: u32,
) -> Result<(), TimerError> {
    unsafe {
        arm(
            c"btn-poll",
            button_poll_callback,
            u64::from(button_poll_interval_ms) * 1000,
        )?;
        arm(
            c"control",
            control_callback,
            u64::from(control_interval_ms) * 1000,
        )?;
        arm(
            c"telemetry",
            telemetry_callback,
            u64::from(telemetry_interval_secs) * 1_000_000,
        )?;
    }
    info!(
        "hw_timer: ticks armed (poll={}ms control={}ms telemetry={}s)",
        button_poll_interval_ms, control_interval_ms, telemetry_interval_secs
    );
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn start_tick_timers(
    _button_poll_interval_ms: u32,
    _control_interval_ms: u32,
    _telemetry_interval_secs: u32,
) -> Result<(), TimerError> {
    log::info!("hw_timer(sim): tick timers not armed");
    Ok(())
}

#[cfg(target_os = "espidf")]
unsafe fn arm(
    name: &'static core::ffi::CStr,
    callback: unsafe extern "C" fn(*mut core::ffi::c_void),
    period_us: u64,
) -> Result<(), TimerError> {
    let args = esp_timer_create_args_t {
        callback: Some(callback),
        arg: core::ptr::null_mut(),
        dispatch_method: esp_timer_dispatch_t_ESP_TIMER_TASK,
        name: name.as_ptr(),
        skip_unhandled_events: true,
    };
    let mut handle: esp_timer_handle_t = core::ptr::null_mut();
    // SAFETY: args outlives the call; handle is leaked intentionally since
    // the timers run for the lifetime of the firmware.
    let ret = unsafe { esp_timer_create(&args, &mut handle) };
    if ret != ESP_OK as i32 {
        return Err(TimerError::CreateFailed(ret));
    }
    let ret = unsafe { esp_timer_start_periodic(handle, period_us) };
    if ret != ESP_OK as i32 {
        return Err(TimerError::StartFailed(ret));
    }
    Ok(())
}

// Timer-task context: push and return, nothing else.

#[cfg(target_os = "espidf")]
unsafe extern "C" fn button_poll_callback(_arg: *mut core::ffi::c_void) {
    let _ = crate::events::push_event(Event::ButtonPollTick);
}

#[cfg(target_os = "espidf")]
unsafe extern "C" fn control_callback(_arg: *mut core::ffi::c_void) {
    let _ = crate::events::push_event(Event::ControlTick);
}

#[cfg(target_os = "espidf")]
unsafe extern "C" fn telemetry_callback(_arg: *mut core::ffi::c_void) {
    let _ = crate::events::push_event(Event::TelemetryTick);
}
