//! Rendering module
//!
//! `scene` turns the game state into draw commands; `canvas` replays them on
//! a Canvas 2D context in the browser.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod scene;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use scene::{DrawCmd, TextAlign, build_scene};
