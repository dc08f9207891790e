/*!
# Object Scene

Render-side registry for the objects placed in a game world.

The registry gives every placed object a scene node grouped under its cell,
folds rigid static meshes into per-cell static geometry batches, keeps the
remaining objects as individually animated handles and tracks per-cell bounds.
Cells are torn down as a unit when they unload.

## Architecture

- **SceneGraph**: Node hierarchy and static geometry factory trait
- **StaticGeometry**: Batched, region-partitioned mesh group trait
- **AnimationFactory**: Creates per-object animation handles
- **ObjectAnimation**: Animation handle trait (bounds, batching, lights, time)
- **SettingsProvider**: Source of named tuning values
- **ObjectSceneRegistry**: Ties the above together per cell

`SceneTree` and `MeshLibrary` are in-memory implementations of the scene and
animation seams.
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod scene;
pub mod world;
pub mod animation;
pub mod settings;
pub mod objects;

// Main objscene namespace module
pub mod objscene {
    // Error types
    pub use crate::error::{Error, Result};

    // Engine singleton
    pub use crate::engine::Engine;

    // Registry
    pub use crate::objects::{ObjectSceneRegistry, SizeClass, STATIC_GEOMETRY_REGION_SIZE};

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Scene sub-module
    pub mod scene {
        pub use crate::scene::*;
    }

    // World sub-module
    pub mod world {
        pub use crate::world::*;
    }

    // Animation sub-module
    pub mod animation {
        pub use crate::animation::{AnimationFactory, ObjectAnimation, MeshAnimation, MeshInfo, MeshLibrary};
    }

    // Settings sub-module
    pub mod settings {
        pub use crate::settings::*;
    }
}

// Re-export math library at crate root
pub use glam;
