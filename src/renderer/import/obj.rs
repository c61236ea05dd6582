use std::path::{Path, PathBuf};
use glam::{Vec2, Vec3};
use crate::renderer::error::RenderError;
use crate::renderer::import::{ImportedMaterial, ImportedScene, ImportedSubmesh, ModelImporter};
use crate::renderer::shader_data::PerVertexData;
use crate::renderer::util::{compute_normals, compute_tangent_frames};

/// Wavefront OBJ/MTL importer. Every OBJ object becomes one submesh.
#[derive(Debug, Default, Clone, Copy)]
pub struct ObjImporter;

impl ModelImporter for ObjImporter {
    fn import(&self, path: &Path) -> Result<ImportedScene, RenderError> {
        let (models, materials) = tobj::load_obj(path, &tobj::GPU_LOAD_OPTIONS)
            .map_err(|e| RenderError::Import {
                path: path.to_path_buf(),
                details: e.to_string(),
            })?;

        let mut scene = ImportedScene {
            materials: match materials {
                Ok(materials) => materials.iter().map(convert_material).collect(),
                Err(e) => {
                    log::warn!("Failed to load materials for {:?}: {}", path, e);
                    Vec::new()
                }
            },
            ..Default::default()
        };

        let mut default_material = None;
        for model in &models {
            let mesh = &model.mesh;
            if mesh.indices.is_empty() {
                log::debug!("Skipping empty object `{}` in {:?}", model.name, path);
                continue;
            }

            let material_index = match mesh.material_id {
                Some(id) if id < scene.materials.len() => id,
                _ => *default_material.get_or_insert_with(|| {
                    scene.materials.push(ImportedMaterial::default());
                    scene.materials.len() - 1
                }),
            };

            scene.submeshes.push(ImportedSubmesh {
                vertices: build_vertices(mesh),
                indices: mesh.indices.clone(),
                material_index,
            });
        }

        if scene.submeshes.is_empty() {
            return Err(RenderError::Import {
                path: path.to_path_buf(),
                details: "file contains no triangles".to_owned(),
            });
        }

        log::info!(
            "Imported {:?}: {} submeshes, {} materials",
            path, scene.submeshes.len(), scene.materials.len(),
        );
        Ok(scene)
    }
}

fn build_vertices(mesh: &tobj::Mesh) -> Vec<PerVertexData> {
    let positions: Vec<Vec3> = mesh
        .positions
        .chunks_exact(3)
        .map(|p| Vec3::new(p[0], p[1], p[2]))
        .collect();

    let normals: Vec<Vec3> = if mesh.normals.len() == mesh.positions.len() {
        mesh.normals
            .chunks_exact(3)
            .map(|n| Vec3::new(n[0], n[1], n[2]))
            .collect()
    } else {
        compute_normals(&positions, &mesh.indices)
    };

    let texcoords: Vec<Vec2> = if mesh.texcoords.len() / 2 == positions.len() {
        mesh.texcoords
            .chunks_exact(2)
            .map(|t| Vec2::new(t[0], t[1]))
            .collect()
    } else {
        vec![Vec2::ZERO; positions.len()]
    };

    let frames = compute_tangent_frames(&positions, &normals, &texcoords, &mesh.indices);

    positions
        .iter()
        .zip(normals.iter())
        .zip(texcoords.iter())
        .zip(frames.iter())
        .map(|(((&position, &normal), &texcoord), &(tangent, bitangent))| PerVertexData {
            position,
            normal,
            texcoord,
            tangent,
            bitangent,
        })
        .collect()
}

fn convert_material(material: &tobj::Material) -> ImportedMaterial {
    let param = |key: &str| material.unknown_param.get(key).map(String::as_str);

    ImportedMaterial {
        name: material.name.clone(),
        albedo: material.diffuse.map(Vec3::from).unwrap_or(Vec3::ONE),
        emissive: param("Ke").and_then(parse_vec3).unwrap_or(Vec3::ZERO),
        smoothness: material
            .shininess
            .map(|ns| (ns / 1000.0).clamp(0.0, 1.0))
            .unwrap_or(0.0),
        albedo_texture: material.diffuse_texture.as_deref().and_then(texture_path),
        emissive_texture: param("map_Ke").and_then(texture_path),
        specular_texture: material.specular_texture.as_deref().and_then(texture_path),
        normals_texture: material
            .normal_texture
            .as_deref()
            .or_else(|| param("norm"))
            .and_then(texture_path),
        bump_texture: param("bump")
            .or_else(|| param("map_bump"))
            .and_then(texture_path),
    }
}

/// MTL texture statements may carry options before the file name, which always comes last
fn texture_path(statement: &str) -> Option<PathBuf> {
    statement.split_whitespace().last().map(PathBuf::from)
}

fn parse_vec3(value: &str) -> Option<Vec3> {
    let components: Vec<f32> = value
        .split_whitespace()
        .map(str::parse)
        .collect::<Result<_, _>>()
        .ok()?;
    match components.as_slice() {
        [r, g, b] => Some(Vec3::new(*r, *g, *b)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn texture_path_skips_options() {
        assert_eq!(texture_path("-bm 0.5 bump.png"), Some(PathBuf::from("bump.png")));
        assert_eq!(texture_path("albedo.png"), Some(PathBuf::from("albedo.png")));
        assert_eq!(texture_path("   "), None);
    }

    #[test]
    fn parse_vec3_requires_three_numbers() {
        assert_eq!(parse_vec3("1 0.5 0"), Some(Vec3::new(1.0, 0.5, 0.0)));
        assert_eq!(parse_vec3("1 0.5"), None);
        assert_eq!(parse_vec3("a b c"), None);
    }
}
