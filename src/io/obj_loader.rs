use crate::core::geometry::{PrimitiveTopology, Vertex};
use crate::scene::mesh::Mesh;
use crate::scene::utils::{compute_smooth_normals, compute_tangents};
use anyhow::{Context, Result};
use log::{info, warn};
use nalgebra::{Point3, Vector2, Vector3};
use std::path::Path;

/// Loads an OBJ file into a single mesh.
///
/// All models in the file are merged. V is flipped so texture rows run top to
/// bottom, missing normals are generated from the faces and tangents are always
/// generated from UV deltas. With `flip_handedness` the right-handed,
/// counter-clockwise OBJ data is converted to the left-handed convention the
/// rasterizer expects: z is negated and every triangle's winding is reversed.
pub fn load_obj<P: AsRef<Path>>(
    path: P,
    topology: PrimitiveTopology,
    flip_handedness: bool,
) -> Result<Mesh> {
    let path = path.as_ref();
    info!("Loading OBJ file: {}", path.display());

    let load_options = tobj::LoadOptions {
        triangulate: true,
        single_index: true, // Unifies indices for Position/Normal/UV
        ..Default::default()
    };

    let (models, _materials) = tobj::load_obj(path, &load_options)
        .with_context(|| format!("failed to load OBJ {}", path.display()))?;

    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    for model in &models {
        let mesh = &model.mesh;
        let index_offset = vertices.len() as u32;
        let num_vertices = mesh.positions.len() / 3;
        let model_has_normals = mesh.normals.len() >= num_vertices * 3;
        let has_texcoords = mesh.texcoords.len() >= num_vertices * 2;

        if !model_has_normals {
            warn!("Mesh '{}' has no normals, generating smooth normals", model.name);
        }

        for i in 0..num_vertices {
            let position = Point3::new(
                mesh.positions[i * 3],
                mesh.positions[i * 3 + 1],
                mesh.positions[i * 3 + 2],
            );
            let normal = if model_has_normals {
                Vector3::new(mesh.normals[i * 3], mesh.normals[i * 3 + 1], mesh.normals[i * 3 + 2])
            } else {
                Vector3::zeros()
            };
            let texcoord = if has_texcoords {
                Vector2::new(mesh.texcoords[i * 2], 1.0 - mesh.texcoords[i * 2 + 1])
            } else {
                Vector2::zeros()
            };

            vertices.push(Vertex::new(position, texcoord, normal, Vector3::zeros()));
        }

        // Only this model's vertices; normals authored by other models stay.
        if !model_has_normals {
            compute_smooth_normals(
                &mut vertices[index_offset as usize..],
                &mesh.indices,
                topology,
            );
        }

        indices.extend(mesh.indices.iter().map(|i| i + index_offset));
    }

    if vertices.is_empty() {
        anyhow::bail!("OBJ {} contains no vertices", path.display());
    }

    compute_tangents(&mut vertices, &indices, topology);

    if flip_handedness {
        flip_z(&mut vertices);
        indices = reverse_winding(indices, topology);
    }

    info!(
        "OBJ loaded: {} vertices, {} indices ({})",
        vertices.len(),
        indices.len(),
        topology
    );

    Ok(Mesh::new(vertices, indices, topology))
}

/// Mirrors positions, normals and tangents through the XY plane.
pub fn flip_z(vertices: &mut [Vertex]) {
    for v in vertices {
        v.position.z = -v.position.z;
        v.normal.z = -v.normal.z;
        v.tangent.z = -v.tangent.z;
    }
}

/// Reverses the winding of every triangle.
///
/// Lists swap the second and third index of each triangle. Strips get their
/// first index repeated: the extra triangle is degenerate and skipped, and
/// every following triangle changes parity, so its two last indices swap.
pub fn reverse_winding(mut indices: Vec<u32>, topology: PrimitiveTopology) -> Vec<u32> {
    match topology {
        PrimitiveTopology::TriangleList => {
            for tri in indices.chunks_exact_mut(3) {
                tri.swap(1, 2);
            }
            indices
        }
        PrimitiveTopology::TriangleStrip => {
            if let Some(&first) = indices.first() {
                indices.insert(0, first);
            }
            indices
        }
    }
}
