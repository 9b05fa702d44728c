pub mod camera;
pub mod core;
pub mod mesh;
pub mod shaders;
pub mod texture;
pub mod uniforms;

pub use camera::{Camera, CameraMovement};
pub use mesh::{Mesh, VertexLayout};
pub use shaders::{ShaderProgram, ShaderStage};
pub use texture::{Texture, TextureParameters};
pub use uniforms::Uniform;
