//! Firmware entry point.
//!
//! Boot sequence: peripherals → adapter → service → tick timers →
//! watchdog → event loop.  All real work happens in this task; timer
//! callbacks only push events.

use anyhow::{anyhow, Context};
use log::info;

use sumpguard::adapters::{time, HardwareAdapter, LogEventSink};
use sumpguard::app::events::AppEvent;
use sumpguard::app::{ActuatorPort, DisplayPort, EventSink};
use sumpguard::drivers::button::{ButtonBank, ButtonEvent};
use sumpguard::drivers::patterns::PatternEngine;
use sumpguard::drivers::{hw_init, hw_timer, watchdog};
use sumpguard::events::{self, Event};
use sumpguard::presenter;
use sumpguard::{AppService, SystemConfig};

fn main() -> anyhow::Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("SumpGuard v{} booting", env!("CARGO_PKG_VERSION"));

    let config = SystemConfig::default();

    // ── 2. Peripherals and adapters ───────────────────────────
    hw_init::init_peripherals().map_err(|e| anyhow!("peripheral init failed: {e}"))?;

    let mut hw = HardwareAdapter::new(&config)
        .map_err(|e| anyhow!("{e}"))
        .context("hardware adapter init")?;
    let mut sink = LogEventSink;
    let mut service = AppService::new(config.clone());
    let mut buttons = ButtonBank::new();
    let mut patterns = PatternEngine::new(
        config.blink_period_ms,
        config.beep_period_ms,
        config.banner_period_ms,
    );

    service.start(&mut sink);

    // ── 3. Tick sources and watchdog ──────────────────────────
    hw_timer::start_tick_timers(
        config.button_poll_interval_ms,
        config.control_loop_interval_ms,
        config.telemetry_interval_secs,
    )
    .map_err(|e| anyhow!("tick timers: {e}"))?;
    watchdog::subscribe_current_task().map_err(|e| anyhow!("watchdog: {e}"))?;

    info!("SumpGuard ready, entering event loop");

    // ── 4. Event loop ─────────────────────────────────────────
    let mut edge_buf: heapless::Vec<ButtonEvent, 3> = heapless::Vec::new();
    loop {
        events::drain_events(|event| match event {
            Event::ButtonPollTick => {
                edge_buf.clear();
                buttons.poll(&mut edge_buf);
                for edge in &edge_buf {
                    let _ = events::push_event(match edge {
                        ButtonEvent::Start => Event::ButtonStart,
                        ButtonEvent::Stop => Event::ButtonStop,
                        ButtonEvent::Reset => Event::ButtonReset,
                    });
                }
                // Blink/beep phases advance at the poll cadence.
                patterns.tick(config.button_poll_interval_ms);
                hw.set_indicators(&patterns.frame(service.commands()));
            }
            Event::ButtonStart => service.handle_button(ButtonEvent::Start),
            Event::ButtonStop => service.handle_button(ButtonEvent::Stop),
            Event::ButtonReset => service.handle_button(ButtonEvent::Reset),
            Event::ControlTick => {
                let before = service.mode();
                let frame = service.tick(&mut hw, &mut sink, patterns.banner_phase());
                let after = service.mode();

                // Operator-driven transitions get an acknowledgement
                // banner for the settle window; cycle completion has no
                // banner and renders its terminal frame instead.
                let banner = presenter::transition_banner(before, after);
                if before != after && !banner.line1.is_empty() {
                    if let Err(e) = hw.show(&banner) {
                        log::warn!("display: {e}");
                    }
                    time::delay_ms(config.settle_delay_ms);
                } else if let Err(e) = hw.show(&frame) {
                    log::warn!("display: {e}");
                }
            }
            Event::TelemetryTick => {
                sink.emit(&AppEvent::Telemetry(service.telemetry(time::uptime_secs())));
            }
        });

        watchdog::feed();
        time::delay_ms(10);
    }
}
