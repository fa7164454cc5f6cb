//! Main controller coordinating the event channel, renderer and diagnostics
//!
//! The controller is the single owner of all runtime state. It:
//! - Drains the event channel and runs the protocol handler's effects
//! - Advances the animations and re-renders on every tick
//! - Serves snapshots and manual overrides to the HTTP and serial front-ends
//!
//! Nothing here blocks except the buzzer implementation.

use alloc::string::String;
use alloc::vec::Vec;

use chargeglow_core::config::DeviceConfig;
use chargeglow_core::diag::LogRing;
use chargeglow_core::sensor::{SensorSlots, SlotId};
use chargeglow_core::session::{Effect, EventChannel, SessionState};
use chargeglow_core::traits::{Buzzer, EventTransport, TransportEvent};
use chargeglow_display::{
    BorderAnimator, ChargeSweep, Color, Frame, LedStrip, RenderEngine, Scene,
};

use crate::status::StatusSnapshot;

/// Upper bound on transport events handled per poll
pub const MAX_EVENTS_PER_POLL: usize = 8;

/// Controller state for the whole device
pub struct Controller<S: LedStrip, B: Buzzer> {
    /// Pixel output
    strip: S,
    /// Alert output
    buzzer: B,
    /// Loaded configuration
    config: DeviceConfig,
    /// Protocol handler
    channel: EventChannel,
    /// Latest sensor states
    slots: SensorSlots,
    /// Diagnostic log
    log: LogRing,
    /// Grid and frame builder
    engine: RenderEngine,
    /// Border highlight
    border: BorderAnimator,
    /// Charging bar row
    sweep: ChargeSweep,
    /// Network link reported by the platform
    network_up: bool,
    /// Automatic rendering enabled
    should_render: bool,
    /// Global strip brightness
    brightness: u8,
    /// Last tick timestamp (ms)
    last_tick_ms: Option<u64>,
    /// Latest timestamp seen (ms)
    now_ms: u64,
}

impl<S: LedStrip, B: Buzzer> Controller<S, B> {
    /// Create a controller and push the initial brightness to the strip
    pub fn new(config: DeviceConfig, strip: S, buzzer: B) -> Self {
        let mut controller = Self {
            strip,
            buzzer,
            channel: EventChannel::new(&config),
            slots: SensorSlots::new(),
            log: LogRing::new(),
            engine: RenderEngine::new(config.display.highlight_step),
            border: BorderAnimator::new(),
            sweep: ChargeSweep::new(),
            network_up: false,
            should_render: true,
            brightness: config.display.brightness,
            last_tick_ms: None,
            now_ms: 0,
            config,
        };

        controller.log.info(format_args!(
            "Watching {} and {}",
            controller.config.slots.slot_1,
            controller.config.slots.slot_2
        ));
        if let Err(e) = controller.strip.set_brightness(controller.brightness) {
            controller
                .log
                .error(format_args!("Cannot set strip brightness: {:?}", e));
        }
        controller
    }

    fn stamp(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
        self.log.set_clock(self.now_ms);
    }

    /// Advance the clock without running the loop
    pub fn set_clock(&mut self, now_ms: u64) {
        self.stamp(now_ms);
    }

    /// One iteration of the control loop
    ///
    /// Drains pending channel events, checks the handshake deadline and
    /// ticks when the tick interval has elapsed.
    pub fn poll<T: EventTransport>(&mut self, transport: &mut T, now_ms: u64) {
        self.stamp(now_ms);

        for _ in 0..MAX_EVENTS_PER_POLL {
            let Some(event) = transport.poll() else {
                break;
            };
            self.handle_transport_event(transport, event);
        }

        self.channel.check_handshake(self.now_ms, &mut self.log);

        let due = match self.last_tick_ms {
            Some(last) => {
                self.now_ms.saturating_sub(last) >= self.config.display.tick_interval_ms as u64
            }
            None => true,
        };
        if due {
            self.last_tick_ms = Some(self.now_ms);
            self.tick();
        }
    }

    fn handle_transport_event<T: EventTransport>(&mut self, transport: &mut T, event: TransportEvent) {
        match event {
            TransportEvent::Opened => self.channel.on_opened(self.now_ms, &mut self.log),
            TransportEvent::Closed => self.channel.on_closed(&mut self.log),
            TransportEvent::Text(text) => {
                let effects = self
                    .channel
                    .handle_text(&text, &mut self.slots, &mut self.log);
                for effect in effects {
                    match effect {
                        Effect::Send(frame) => {
                            if let Err(e) = transport.send(&frame) {
                                self.log.error(format_args!("Send failed: {}", e));
                            }
                        }
                        Effect::Alert(_) => self.play_alert(),
                    }
                }
            }
        }
    }

    /// Advance both animations and re-render if enabled
    pub fn tick(&mut self) {
        self.border.tick();
        self.sweep.tick();
        if self.should_render {
            self.render();
        }
    }

    /// Rebuild the grid from the current state and show it
    pub fn render(&mut self) {
        let scene = Scene::new(
            self.is_connected(),
            Some(self.slots.get(SlotId::One)),
            Some(self.slots.get(SlotId::Two)),
            self.border.cursor(),
            self.sweep.row(),
        );
        let frame = self.engine.render(&scene);
        self.show(&frame);
    }

    /// Show the grid as it stands, including manual edits
    pub fn redraw(&mut self) {
        let frame = self.engine.compose();
        self.show(&frame);
    }

    fn show(&mut self, frame: &Frame) {
        if let Err(e) = self.strip.show(frame) {
            self.log.error(format_args!("Strip update failed: {:?}", e));
        }
    }

    /// Paint one cell; shown on the next redraw, replaced on the next render
    pub fn set_cell(&mut self, row: i32, col: i32, color: Color) {
        self.engine.set_cell(row, col, color);
    }

    /// Paint the cell at column `x`, row `y` and show it
    pub fn draw(&mut self, x: i32, y: i32, color: Color) {
        self.set_cell(y, x, color);
        self.redraw();
    }

    /// Blank the grid and the strip
    pub fn clean(&mut self) {
        self.engine.clear();
        if let Err(e) = self.strip.clear() {
            self.log.error(format_args!("Strip clear failed: {:?}", e));
        }
        self.log.info(format_args!("Display cleared"));
    }

    /// Enable or disable automatic rendering
    pub fn set_render_enabled(&mut self, enabled: bool) {
        self.should_render = enabled;
        if enabled {
            self.log.info(format_args!("Rendering enabled"));
        } else {
            self.log.info(format_args!("Rendering disabled"));
        }
    }

    pub fn render_enabled(&self) -> bool {
        self.should_render
    }

    /// Change the global strip brightness
    pub fn set_brightness(&mut self, level: u8) {
        self.log.info(format_args!(
            "Updating brightness from {} to {}",
            self.brightness, level
        ));
        self.brightness = level;
        if let Err(e) = self.strip.set_brightness(level) {
            self.log
                .error(format_args!("Cannot set strip brightness: {:?}", e));
        }
    }

    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    /// Force a slot to a state token
    pub fn override_slot(&mut self, slot: SlotId, state: &str) {
        self.slots.set(slot, state);
        self.log.info(format_args!(
            "Manually updated sensor {} state to: {}",
            slot.number(),
            self.slots.get(slot)
        ));
    }

    /// Record the platform's network link state
    pub fn set_network_connected(&mut self, up: bool) {
        if up == self.network_up {
            return;
        }
        self.network_up = up;
        if up {
            self.log.info(format_args!("Network connected"));
        } else {
            self.log.warn(format_args!("Network lost"));
        }
    }

    /// Play the configured alert pattern
    pub fn play_alert(&mut self) {
        self.buzzer.play(&self.config.alert);
    }

    /// An HTTP client connected but sent nothing in time
    pub fn note_idle_client(&mut self) {
        self.log
            .warn(format_args!("HTTP client connected but sent no data"));
    }

    /// Network and event channel both up
    pub fn is_connected(&self) -> bool {
        self.network_up && self.channel.is_connected()
    }

    pub fn network_connected(&self) -> bool {
        self.network_up
    }

    pub fn session_state(&self) -> SessionState {
        self.channel.state()
    }

    pub fn slots(&self) -> &SensorSlots {
        &self.slots
    }

    pub fn config(&self) -> &DeviceConfig {
        &self.config
    }

    pub fn log(&self) -> &LogRing {
        &self.log
    }

    pub fn log_mut(&mut self) -> &mut LogRing {
        &mut self.log
    }

    pub fn strip(&self) -> &S {
        &self.strip
    }

    pub fn buzzer(&self) -> &B {
        &self.buzzer
    }

    /// Milliseconds since start, as of the last poll
    pub fn uptime_ms(&self) -> u64 {
        self.now_ms
    }

    /// Current grid with the highlight applied
    pub fn frame(&self) -> Frame {
        self.engine.compose()
    }

    /// Point-in-time view for the status endpoint
    pub fn snapshot(&self) -> StatusSnapshot {
        StatusSnapshot {
            uptime: self.now_ms / 1000,
            wifi_connected: self.network_up,
            ws_connected: self.channel.is_connected(),
            sensor_1_state: String::from(self.slots.get(SlotId::One)),
            sensor_2_state: String::from(self.slots.get(SlotId::Two)),
            display_brightness: self.brightness,
            should_render: self.should_render,
            log_buffer: self
                .log
                .iter()
                .map(|e| String::from(e.as_str()))
                .collect::<Vec<_>>(),
            display_array: self.engine.compose().rows(),
        }
    }
}
