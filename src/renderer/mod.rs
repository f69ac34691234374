//! Rendering backends
//!
//! The browser build draws with the Canvas 2D API. Native builds run
//! headless with [`crate::platform::NullRenderer`].

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
