//! Triangle sources consumed by the pipeline.
//!
//! The renderer only needs a parse step and a re-enumerable list of
//! triangles; [`MeshSource`] is that seam. [`ObjMesh`] reads Wavefront OBJ
//! through `tobj`, [`Mesh`] holds triangles built in code.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{Error, Result};
use crate::math::{Vec3, Vec4};

/// A triangle in object space. Vertex order defines the winding.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Face {
    pub vertices: [Vec4; 3],
}

impl Face {
    pub fn new(a: Vec3, b: Vec3, c: Vec3) -> Self {
        Self {
            vertices: [a.into(), b.into(), c.into()],
        }
    }
}

/// Provider of triangles for one frame.
///
/// `faces` may be called any number of times after a successful `parse`;
/// iteration order is the draw order, which never changes the final image.
pub trait MeshSource {
    /// Load the geometry. Failures are fatal for the frame.
    fn parse(&mut self) -> Result<()>;

    fn faces(&self) -> &[Face];
}

/// Triangles held in memory.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    faces: Vec<Face>,
}

impl Mesh {
    pub fn new(faces: Vec<Face>) -> Self {
        Self { faces }
    }

    /// Axis-aligned cube spanning [-0.5, 0.5] on every axis.
    ///
    /// Faces wind counter-clockwise when seen from outside.
    pub fn cube() -> Self {
        const CORNERS: [Vec3; 8] = [
            Vec3::new(-0.5, -0.5, -0.5),
            Vec3::new(0.5, -0.5, -0.5),
            Vec3::new(0.5, 0.5, -0.5),
            Vec3::new(-0.5, 0.5, -0.5),
            Vec3::new(-0.5, -0.5, 0.5),
            Vec3::new(0.5, -0.5, 0.5),
            Vec3::new(0.5, 0.5, 0.5),
            Vec3::new(-0.5, 0.5, 0.5),
        ];
        const QUADS: [[usize; 4]; 6] = [
            [0, 3, 2, 1], // -z
            [4, 5, 6, 7], // +z
            [0, 4, 7, 3], // -x
            [1, 2, 6, 5], // +x
            [0, 1, 5, 4], // -y
            [3, 7, 6, 2], // +y
        ];

        let faces = QUADS
            .iter()
            .flat_map(|&[a, b, c, d]| {
                [
                    Face::new(CORNERS[a], CORNERS[b], CORNERS[c]),
                    Face::new(CORNERS[a], CORNERS[c], CORNERS[d]),
                ]
            })
            .collect();
        Self { faces }
    }

    pub fn push(&mut self, face: Face) {
        self.faces.push(face);
    }

    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }
}

impl MeshSource for Mesh {
    fn parse(&mut self) -> Result<()> {
        Ok(())
    }

    fn faces(&self) -> &[Face] {
        &self.faces
    }
}

impl FromIterator<Face> for Mesh {
    fn from_iter<I: IntoIterator<Item = Face>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[derive(Clone, Debug)]
enum ObjInput {
    File(PathBuf),
    Text(String),
}

/// A Wavefront OBJ model, loaded on [`MeshSource::parse`].
///
/// Only positions are read. Polygons are triangulated as a fan, groups and
/// objects are merged into one triangle list, materials are ignored.
#[derive(Clone, Debug)]
pub struct ObjMesh {
    input: ObjInput,
    faces: Vec<Face>,
}

impl ObjMesh {
    /// Model backed by a file on disk.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            input: ObjInput::File(path.into()),
            faces: Vec::new(),
        }
    }

    /// Model backed by OBJ source text.
    pub fn from_source(text: impl Into<String>) -> Self {
        Self {
            input: ObjInput::Text(text.into()),
            faces: Vec::new(),
        }
    }

    fn display_path(&self) -> PathBuf {
        match &self.input {
            ObjInput::File(path) => path.clone(),
            ObjInput::Text(_) => PathBuf::from("<memory>"),
        }
    }

    fn load_models(&self) -> std::result::Result<Vec<tobj::Model>, tobj::LoadError> {
        let options = tobj::LoadOptions {
            triangulate: true,
            ignore_points: true,
            ignore_lines: true,
            ..Default::default()
        };
        let (models, _materials) = match &self.input {
            ObjInput::File(path) => tobj::load_obj(path, &options)?,
            ObjInput::Text(text) => {
                let mut reader = text.as_bytes();
                tobj::load_obj_buf(&mut reader, &options, |_: &Path| {
                    Err(tobj::LoadError::OpenFileFailed)
                })?
            }
        };
        Ok(models)
    }
}

fn faces_from_model(model: &tobj::Model) -> std::result::Result<Vec<Face>, tobj::LoadError> {
    let positions = &model.mesh.positions;
    let vertex = |index: u32| {
        let base = index as usize * 3;
        positions
            .get(base..base + 3)
            .map(|p| Vec3::new(p[0], p[1], p[2]))
            .ok_or(tobj::LoadError::FaceVertexOutOfBounds)
    };

    model
        .mesh
        .indices
        .chunks_exact(3)
        .map(|tri| Ok(Face::new(vertex(tri[0])?, vertex(tri[1])?, vertex(tri[2])?)))
        .collect()
}

impl MeshSource for ObjMesh {
    fn parse(&mut self) -> Result<()> {
        let path = self.display_path();
        let load = |source| Error::Load {
            path: path.clone(),
            source,
        };

        let models = self.load_models().map_err(load)?;
        let mut faces = Vec::new();
        for model in &models {
            faces.extend(faces_from_model(model).map_err(load)?);
        }

        info!(
            path = %path.display(),
            models = models.len(),
            faces = faces.len(),
            "loaded OBJ model"
        );
        self.faces = faces;
        Ok(())
    }

    fn faces(&self) -> &[Face] {
        &self.faces
    }
}
