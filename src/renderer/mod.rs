//! WebGPU rendering module
//!
//! Flat vertex-colored triangles. `scene` turns a game state into vertices in
//! playfield coordinates; `pipeline` maps them to the canvas and draws them.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;
pub mod viewport;

pub use pipeline::{MAX_SURFACE_DIM, RenderInitError, RenderState, clamp_surface_size};
pub use scene::{SceneOptions, background, build};
pub use vertex::Vertex;
pub use viewport::Viewport;
