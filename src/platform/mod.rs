//! Platform abstraction layer
//!
//! Browser/native differences for:
//! - Time (`performance.now()` on web)
//! - Pointer coordinates (screen space -> field space)

use crate::consts::FIELD_WIDTH;

/// Map a pointer's client x into the logical field.
///
/// `rect_left`/`rect_width` come from the canvas bounding rectangle. When the
/// canvas is displayed at a CSS width other than the logical field width the
/// offset is scaled; the result is clamped to the field.
pub fn client_to_field_x(client_x: f64, rect_left: f64, rect_width: f64) -> f32 {
    let local = client_x - rect_left;
    let scale = if rect_width > 0.0 {
        FIELD_WIDTH as f64 / rect_width
    } else {
        1.0
    };
    ((local * scale) as f32).clamp(0.0, FIELD_WIDTH)
}

/// Milliseconds on the same clock as `requestAnimationFrame` timestamps
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

/// Milliseconds since the first call
#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    use std::sync::OnceLock;
    use std::time::Instant;

    static START: OnceLock<Instant> = OnceLock::new();
    START.get_or_init(Instant::now).elapsed().as_secs_f64() * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unscaled_canvas() {
        assert_eq!(client_to_field_x(150.0, 50.0, 400.0), 100.0);
    }

    #[test]
    fn test_scaled_canvas() {
        // Canvas shown at half size
        assert_eq!(client_to_field_x(100.0, 0.0, 200.0), 200.0);
    }

    #[test]
    fn test_clamped_to_field() {
        assert_eq!(client_to_field_x(10.0, 50.0, 400.0), 0.0);
        assert_eq!(client_to_field_x(900.0, 0.0, 400.0), FIELD_WIDTH);
    }

    #[test]
    fn test_zero_width_rect() {
        assert_eq!(client_to_field_x(30.0, 10.0, 0.0), 20.0);
    }
}
