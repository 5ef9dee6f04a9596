//! Stub resource types for the demo binary
//!
//! The loaders ignore the file name and return fixed data; they stand in
//! for real texture and mesh decoding.

use glam::Vec3;

use crate::resources::{LoadError, Loadable};

/// Texture description
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Texture {
    pub id: usize,
    pub width: usize,
    pub height: usize,
}

impl Loadable for Texture {
    fn load(name: &str) -> Result<Self, LoadError> {
        log::debug!("Loading texture '{name}'");
        Ok(Self {
            id: 0,
            width: 4096,
            height: 4096,
        })
    }
}

/// Indexed mesh data
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Vec3>,
    pub indices: Vec<u32>,
}

impl Loadable for Mesh {
    fn load(name: &str) -> Result<Self, LoadError> {
        log::debug!("Loading mesh '{name}'");
        Ok(Self {
            vertices: vec![Vec3::splat(5.0)],
            indices: vec![10],
        })
    }
}
