//! Local HTTP status interface
//!
//! Routing only: the platform's socket server reads the request line,
//! hands it to [`route`] and writes back [`Response::to_http`]. Every
//! response closes the connection.

use alloc::format;
use alloc::string::{String, ToString};

use chargeglow_core::sensor::SlotId;
use chargeglow_core::traits::Buzzer;
use chargeglow_display::LedStrip;
use serde_json::{json, Value};

use crate::controller::Controller;

const CONTENT_JSON: &str = "application/json";
const CONTENT_HTML: &str = "text/html";

const NOT_FOUND_PAGE: &str = "<!DOCTYPE html><html><head><title>Not Found</title></head>\
<body><h1>404 Not Found</h1></body></html>";

/// A complete HTTP response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

impl Response {
    fn json(status: u16, body: &Value) -> Self {
        Self {
            status,
            content_type: CONTENT_JSON,
            body: body.to_string(),
        }
    }

    fn error(status: u16, message: &str) -> Self {
        Self::json(status, &json!({"status": "error", "message": message}))
    }

    fn not_found() -> Self {
        Self {
            status: 404,
            content_type: CONTENT_HTML,
            body: String::from(NOT_FOUND_PAGE),
        }
    }

    /// Reason phrase for the status code
    pub fn reason(&self) -> &'static str {
        match self.status {
            200 => "OK",
            400 => "Bad Request",
            404 => "Not Found",
            _ => "Internal Server Error",
        }
    }

    /// Status line, headers and body
    pub fn to_http(&self) -> String {
        format!(
            "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nAccess-Control-Allow-Origin: *\r\nConnection: close\r\n\r\n{}",
            self.status,
            self.reason(),
            self.content_type,
            self.body
        )
    }
}

/// Handle one request line such as `GET /status HTTP/1.1`
pub fn route<S: LedStrip, B: Buzzer>(
    request_line: &str,
    controller: &mut Controller<S, B>,
    now_ms: u64,
) -> Response {
    controller.set_clock(now_ms);

    let mut parts = request_line.split_whitespace();
    let (Some("GET"), Some(target)) = (parts.next(), parts.next()) else {
        return not_found(controller, request_line);
    };
    let path = target.split('?').next().unwrap_or(target);

    if path == "/status" {
        return status(controller);
    }
    if path == "/beep" {
        controller.log_mut().info(format_args!("HTTP GET /beep request received"));
        controller.play_alert();
        return Response::json(200, &json!({"status": "ok", "action": "beep"}));
    }
    if let Some(value) = path.strip_prefix("/config/display_brightness/") {
        return set_brightness(controller, value);
    }
    if let Some(rest) = path.strip_prefix("/config/update_state/") {
        return update_state(controller, rest);
    }

    not_found(controller, request_line)
}

fn status<S: LedStrip, B: Buzzer>(controller: &mut Controller<S, B>) -> Response {
    match controller.snapshot().to_json() {
        Ok(body) => Response {
            status: 200,
            content_type: CONTENT_JSON,
            body,
        },
        Err(e) => {
            controller
                .log_mut()
                .error(format_args!("Cannot serialize status: {}", e));
            Response::error(500, "status unavailable")
        }
    }
}

fn set_brightness<S: LedStrip, B: Buzzer>(
    controller: &mut Controller<S, B>,
    value: &str,
) -> Response {
    controller.log_mut().info(format_args!(
        "HTTP GET /config/display_brightness/{} request received",
        value
    ));
    match value.parse::<u8>() {
        Ok(level) => {
            controller.set_brightness(level);
            Response::json(
                200,
                &json!({
                    "status": "ok",
                    "variable": "displayBrightness",
                    "new_value": level.to_string(),
                }),
            )
        }
        Err(_) => Response::error(400, "Brightness value must be between 0 and 255."),
    }
}

fn update_state<S: LedStrip, B: Buzzer>(
    controller: &mut Controller<S, B>,
    rest: &str,
) -> Response {
    let Some((id, state)) = rest.split_once('/').filter(|(_, state)| !state.is_empty()) else {
        controller
            .log_mut()
            .warn(format_args!("Malformed update_state request: {}", rest));
        return Response::error(
            400,
            "Malformed URL. Use /config/update_state/<id>/<value>",
        );
    };

    let Some(slot) = id.parse::<u32>().ok().and_then(SlotId::from_number) else {
        return Response::error(400, "Invalid sensor_id. Must be 1 or 2.");
    };

    controller.override_slot(slot, state);
    Response::json(
        200,
        &json!({
            "status": "ok",
            "sensor_id": slot.number(),
            "new_state": controller.slots().get(slot),
        }),
    )
}

fn not_found<S: LedStrip, B: Buzzer>(
    controller: &mut Controller<S, B>,
    request_line: &str,
) -> Response {
    controller
        .log_mut()
        .warn(format_args!("HTTP 404 for {}", request_line.trim()));
    Response::not_found()
}
