//! Test doubles for the strip, buzzer and event transport

#![allow(dead_code)]

use std::collections::VecDeque;

use chargeglow_app::Controller;
use chargeglow_core::config::DeviceConfig;
use chargeglow_core::text::truncated;
use chargeglow_core::traits::{BeepPattern, Buzzer, EventTransport, TransportError, TransportEvent};
use chargeglow_display::{Frame, LedStrip, StripError};
use serde_json::{json, Value};

#[derive(Default)]
pub struct MockStrip {
    pub frames: Vec<Frame>,
    pub brightness: Vec<u8>,
    pub fail: bool,
}

impl LedStrip for MockStrip {
    fn show(&mut self, frame: &Frame) -> Result<(), StripError> {
        if self.fail {
            return Err(StripError::Communication);
        }
        self.frames.push(frame.clone());
        Ok(())
    }

    fn set_brightness(&mut self, level: u8) -> Result<(), StripError> {
        self.brightness.push(level);
        Ok(())
    }
}

#[derive(Default)]
pub struct MockBuzzer {
    pub played: Vec<BeepPattern>,
}

impl Buzzer for MockBuzzer {
    fn play(&mut self, pattern: &BeepPattern) {
        self.played.push(*pattern);
    }
}

#[derive(Default)]
pub struct MockTransport {
    pub inbox: VecDeque<TransportEvent>,
    pub sent: Vec<String>,
}

impl MockTransport {
    pub fn open(&mut self) {
        self.inbox.push_back(TransportEvent::Opened);
    }

    pub fn close(&mut self) {
        self.inbox.push_back(TransportEvent::Closed);
    }

    pub fn text(&mut self, text: impl Into<String>) {
        self.inbox.push_back(TransportEvent::Text(text.into()));
    }

    pub fn json(&mut self, value: Value) {
        self.text(value.to_string());
    }

    pub fn event(&mut self, entity: &str, state: &str) {
        self.json(json!({
            "type": "event",
            "event": {"variables": {"trigger": {
                "entity_id": entity,
                "to_state": {"state": state}
            }}}
        }));
    }

    pub fn sent_json(&self) -> Vec<Value> {
        self.sent
            .iter()
            .map(|s| serde_json::from_str(s).expect("device sent invalid JSON"))
            .collect()
    }
}

impl EventTransport for MockTransport {
    fn poll(&mut self) -> Option<TransportEvent> {
        self.inbox.pop_front()
    }

    fn send(&mut self, text: &str) -> Result<(), TransportError> {
        self.sent.push(text.to_string());
        Ok(())
    }
}

pub const SLOT_1: &str = "sensor.garage_charger";
pub const SLOT_2: &str = "sensor.driveway_charger";

pub fn config() -> DeviceConfig {
    let mut config = DeviceConfig::default();
    config.channel.access_token = truncated("test-token");
    config.slots.slot_1 = truncated(SLOT_1);
    config.slots.slot_2 = truncated(SLOT_2);
    config
}

pub type TestController = Controller<MockStrip, MockBuzzer>;

pub fn controller() -> TestController {
    Controller::new(config(), MockStrip::default(), MockBuzzer::default())
}

/// Controller with network up and a fully subscribed session
pub fn subscribed() -> (TestController, MockTransport) {
    let mut controller = controller();
    let mut transport = MockTransport::default();
    controller.set_network_connected(true);
    transport.open();
    transport.json(json!({"type": "auth_required"}));
    transport.json(json!({"type": "auth_ok"}));
    transport.json(json!({"id": 1, "type": "result", "success": true}));
    transport.json(json!({"id": 2, "type": "result", "success": true}));
    controller.poll(&mut transport, 0);
    (controller, transport)
}
