//! Prism Core - scene description and loading.
//!
//! This crate provides:
//!
//! - **Scene description types**: `SceneDescription`, `CameraDesc`, `ObjectDesc`, `LightDesc`
//! - **JSON loading**: parsing plus validation, failing the whole document on any error
//!
//! The types are renderer-agnostic; `prism_renderer` builds its scene from them.
//!
//! # Example
//!
//! ```ignore
//! use prism_core::load_scene;
//!
//! let scene = load_scene("scene.json")?;
//! println!("Loaded {} objects, {} lights",
//!     scene.object_count(),
//!     scene.light_count());
//! ```

pub mod loader;
pub mod mesh;
pub mod scene;

// Re-export commonly used types
pub use loader::{load_scene, load_scene_from_str, validate, LoadError, LoadResult};
pub use mesh::Mesh;
pub use scene::{
    BackgroundDesc, CameraDesc, LightDesc, MaterialKind, ObjectDesc, RenderDesc,
    SceneDescription, ShapeDesc, SurfaceDesc, TextureDesc,
};
