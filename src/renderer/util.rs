use glam::{Vec2, Vec3};

/// Accumulates area-weighted face normals into each vertex of an indexed triangle list
pub fn compute_normals(positions: &[Vec3], indices: &[u32]) -> Vec<Vec3> {
    let mut normals = vec![Vec3::ZERO; positions.len()];

    for tri in indices.chunks_exact(3) {
        let [i0, i1, i2] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        if i0 >= positions.len() || i1 >= positions.len() || i2 >= positions.len() {
            continue;
        }
        // Left unnormalized so larger triangles weigh more
        let face_normal = (positions[i1] - positions[i0]).cross(positions[i2] - positions[i0]);
        normals[i0] += face_normal;
        normals[i1] += face_normal;
        normals[i2] += face_normal;
    }

    for normal in &mut normals {
        *normal = normal.try_normalize().unwrap_or(Vec3::Z);
    }
    normals
}

/// Per-vertex tangent and bitangent from the texture coordinate derivatives of each triangle.
/// Vertices without usable texture coordinates get an arbitrary frame orthogonal to their normal.
pub fn compute_tangent_frames(
    positions: &[Vec3],
    normals: &[Vec3],
    texcoords: &[Vec2],
    indices: &[u32],
) -> Vec<(Vec3, Vec3)> {
    let mut tangents = vec![Vec3::ZERO; positions.len()];
    let mut bitangents = vec![Vec3::ZERO; positions.len()];

    for tri in indices.chunks_exact(3) {
        let [i0, i1, i2] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        if i0 >= positions.len() || i1 >= positions.len() || i2 >= positions.len() {
            continue;
        }

        let edge1 = positions[i1] - positions[i0];
        let edge2 = positions[i2] - positions[i0];
        let duv1 = texcoords[i1] - texcoords[i0];
        let duv2 = texcoords[i2] - texcoords[i0];

        let det = duv1.x * duv2.y - duv2.x * duv1.y;
        if det.abs() < f32::EPSILON {
            continue;
        }
        let r = 1.0 / det;
        let tangent = (edge1 * duv2.y - edge2 * duv1.y) * r;
        let bitangent = (edge2 * duv1.x - edge1 * duv2.x) * r;

        for i in [i0, i1, i2] {
            tangents[i] += tangent;
            bitangents[i] += bitangent;
        }
    }

    normals
        .iter()
        .zip(tangents.iter().zip(bitangents.iter()))
        .map(|(&n, (&t, &b))| {
            // Gram-Schmidt against the normal
            let t = (t - n * n.dot(t))
                .try_normalize()
                .unwrap_or_else(|| n.any_orthonormal_vector());
            let b = if b.length_squared() > f32::EPSILON && n.cross(t).dot(b) < 0.0 {
                -n.cross(t)
            } else {
                n.cross(t)
            };
            (t, b)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUAD: [Vec3; 4] = [
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(1.0, 1.0, 0.0),
        Vec3::new(0.0, 1.0, 0.0),
    ];
    const QUAD_INDICES: [u32; 6] = [0, 1, 2, 0, 2, 3];

    #[test]
    fn flat_quad_normals_face_z() {
        let normals = compute_normals(&QUAD, &QUAD_INDICES);
        assert!(normals.iter().all(|n| n.abs_diff_eq(Vec3::Z, 1e-6)));
    }

    #[test]
    fn unreferenced_vertex_gets_fallback_normal() {
        let mut positions = QUAD.to_vec();
        positions.push(Vec3::new(5.0, 5.0, 5.0));
        let normals = compute_normals(&positions, &QUAD_INDICES);
        assert_eq!(normals[4], Vec3::Z);
    }

    #[test]
    fn tangents_follow_uv_directions() {
        let texcoords: Vec<Vec2> = QUAD.iter().map(|p| p.truncate()).collect();
        let normals = vec![Vec3::Z; 4];

        let frames = compute_tangent_frames(&QUAD, &normals, &texcoords, &QUAD_INDICES);
        for (t, b) in frames {
            assert!(t.abs_diff_eq(Vec3::X, 1e-5));
            assert!(b.abs_diff_eq(Vec3::Y, 1e-5));
        }
    }

    #[test]
    fn degenerate_uvs_still_give_orthonormal_frame() {
        let texcoords = vec![Vec2::ZERO; 4];
        let normals = vec![Vec3::Z; 4];

        let frames = compute_tangent_frames(&QUAD, &normals, &texcoords, &QUAD_INDICES);
        for (t, b) in frames {
            assert!(t.dot(Vec3::Z).abs() < 1e-5);
            assert!((t.length() - 1.0).abs() < 1e-5);
            assert!(b.dot(t).abs() < 1e-5);
        }
    }
}
