//! Mesh file loading (OFF and OBJ).
//!
//! The loader is picked from the file extension, case-insensitively.
//! [`Mesh::load`] reports every failure to the caller, while
//! [`Mesh::load_or_empty`] logs it and degrades to an empty mesh so a render
//! can still go ahead.

use std::path::Path;
use std::str::FromStr;

use glint_math::{Vec2, Vec3};

use crate::mesh::{Face, Mesh, MeshError, MeshResult, Vertex};

impl Mesh {
    /// Load a mesh from an `.off` or `.obj` file.
    pub fn load<P: AsRef<Path>>(path: P) -> MeshResult<Mesh> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .unwrap_or_default();

        let mesh = match extension.as_str() {
            "off" => parse_off(&std::fs::read_to_string(path)?)?,
            "obj" => load_obj(path)?,
            _ => return Err(MeshError::UnsupportedExtension(extension)),
        };

        log::info!(
            "Loaded mesh {}: {} vertices, {} faces",
            path.display(),
            mesh.vertex_count(),
            mesh.face_count()
        );

        Ok(mesh)
    }

    /// Like [`Mesh::load`], but a failure is logged and yields an empty mesh.
    pub fn load_or_empty<P: AsRef<Path>>(path: P) -> Mesh {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(mesh) => mesh,
            Err(e) => {
                log::warn!("Could not load mesh {}: {}", path.display(), e);
                Mesh::empty()
            }
        }
    }
}

/// Parse the contents of an OFF file.
///
/// Layout: the `OFF` keyword, then vertex, face and edge counts, then one
/// `x y z` line per vertex and one `3 i j k` line per face. Text after `#` is
/// ignored. Only triangular faces are accepted.
pub fn parse_off(source: &str) -> MeshResult<Mesh> {
    let mut tokens = source
        .lines()
        .map(|line| line.split('#').next().unwrap_or(""))
        .flat_map(str::split_whitespace);

    match tokens.next() {
        Some("OFF") => {}
        Some(other) => {
            return Err(MeshError::MalformedOff(format!(
                "wrong header '{}'",
                other
            )))
        }
        None => return Err(MeshError::MalformedOff("empty file".to_string())),
    }

    let vertex_count: usize = next_number(&mut tokens, "vertex count")?;
    let face_count: usize = next_number(&mut tokens, "face count")?;
    let _edge_count: usize = next_number(&mut tokens, "edge count")?;

    // Header counts are untrusted: every vertex takes at least six bytes
    // and every face at least eight
    let mut positions = Vec::with_capacity(vertex_count.min(source.len() / 6));
    for _ in 0..vertex_count {
        let x = next_number(&mut tokens, "vertex coordinate")?;
        let y = next_number(&mut tokens, "vertex coordinate")?;
        let z = next_number(&mut tokens, "vertex coordinate")?;
        positions.push(Vec3::new(x, y, z));
    }

    let mut faces: Vec<Face> = Vec::with_capacity(face_count.min(source.len() / 8));
    for face_id in 0..face_count {
        let corners: usize = next_number(&mut tokens, "face size")?;
        if corners != 3 {
            return Err(MeshError::MalformedOff(format!(
                "face {} has {} corners, only triangles are supported",
                face_id, corners
            )));
        }
        faces.push([
            next_number(&mut tokens, "face index")?,
            next_number(&mut tokens, "face index")?,
            next_number(&mut tokens, "face index")?,
        ]);
    }

    Mesh::from_positions(&positions, faces)
}

fn next_number<'a, T, I>(tokens: &mut I, what: &str) -> MeshResult<T>
where
    T: FromStr,
    I: Iterator<Item = &'a str>,
{
    let token = tokens
        .next()
        .ok_or_else(|| MeshError::MalformedOff(format!("unexpected end of file reading {}", what)))?;

    token
        .parse()
        .map_err(|_| MeshError::MalformedOff(format!("invalid {} '{}'", what, token)))
}

/// Load every model of an OBJ file into a single mesh.
fn load_obj(path: &Path) -> MeshResult<Mesh> {
    let (models, _materials) = tobj::load_obj(
        path,
        &tobj::LoadOptions {
            single_index: true,
            triangulate: true,
            ..Default::default()
        },
    )?;

    let mut vertices = Vec::new();
    let mut faces = Vec::new();
    let mut has_normals = true;

    for model in &models {
        let mesh = &model.mesh;
        let offset = vertices.len() as u32;
        let count = mesh.positions.len() / 3;

        let model_has_normals = mesh.normals.len() == mesh.positions.len();
        let model_has_texcoords = mesh.texcoords.len() / 2 == count;
        has_normals &= model_has_normals;

        for i in 0..count {
            let mut vertex = Vertex::new(Vec3::from_slice(&mesh.positions[i * 3..i * 3 + 3]));
            if model_has_normals {
                vertex.normal = Vec3::from_slice(&mesh.normals[i * 3..i * 3 + 3]);
            }
            if model_has_texcoords {
                vertex.texcoord = Vec2::from_slice(&mesh.texcoords[i * 2..i * 2 + 2]);
            }
            vertices.push(vertex);
        }

        faces.extend(
            mesh.indices
                .chunks_exact(3)
                .map(|tri| [tri[0] + offset, tri[1] + offset, tri[2] + offset]),
        );
    }

    let mut mesh = Mesh::new(vertices, faces)?;
    if !has_normals {
        log::debug!("OBJ {} has no normals, computing smooth normals", path.display());
        mesh.compute_normals();
    }

    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const TETRAHEDRON_OFF: &str = "OFF
# a small tetrahedron
4 4 6
0 0 0
1 0 0
0 1 0
0 0 1
3 0 2 1
3 0 1 3
3 0 3 2
3 1 2 3
";

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("glint_{}_{}", std::process::id(), name));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_parse_off() {
        let mesh = parse_off(TETRAHEDRON_OFF).unwrap();

        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.face_count(), 4);
        assert_eq!(mesh.faces()[1], [0, 1, 3]);

        // Normals are computed and unit length
        for vertex in mesh.vertices() {
            assert!((vertex.normal.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_parse_off_wrong_header() {
        let result = parse_off("PLY\n3 1 0\n");
        assert!(matches!(result, Err(MeshError::MalformedOff(_))));
    }

    #[test]
    fn test_parse_off_truncated() {
        let result = parse_off("OFF\n3 1 0\n0 0 0\n1 0 0\n");
        assert!(matches!(result, Err(MeshError::MalformedOff(_))));
    }

    #[test]
    fn test_parse_off_rejects_quads() {
        let result = parse_off("OFF\n4 1 0\n0 0 0\n1 0 0\n1 1 0\n0 1 0\n4 0 1 2 3\n");
        assert!(matches!(result, Err(MeshError::MalformedOff(_))));
    }

    #[test]
    fn test_parse_off_index_out_of_range() {
        let result = parse_off("OFF\n3 1 0\n0 0 0\n1 0 0\n0 1 0\n3 0 1 7\n");
        assert!(matches!(
            result,
            Err(MeshError::FaceIndexOutOfRange { index: 7, .. })
        ));
    }

    #[test]
    fn test_load_off_file_uppercase_extension() {
        let path = temp_file("tetra.OFF", TETRAHEDRON_OFF);
        let mesh = Mesh::load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(mesh.face_count(), 4);
    }

    #[test]
    fn test_load_obj_file() {
        let obj = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n";
        let path = temp_file("quad.obj", obj);
        let mesh = Mesh::load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        // The quad is triangulated
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.face_count(), 2);
        for vertex in mesh.vertices() {
            assert!((vertex.normal - Vec3::Z).length() < 1e-5);
        }
    }

    #[test]
    fn test_unsupported_extension() {
        let result = Mesh::load("model.3ds");
        match result {
            Err(MeshError::UnsupportedExtension(ext)) => assert_eq!(ext, "3ds"),
            other => panic!("expected UnsupportedExtension, got {:?}", other),
        }
    }

    #[test]
    fn test_load_or_empty_degrades() {
        let missing = std::env::temp_dir().join("glint_definitely_missing.off");
        let mesh = Mesh::load_or_empty(&missing);
        assert!(mesh.is_empty());
        assert!(mesh.bounds().is_empty());

        let unsupported = Mesh::load_or_empty("scene.xyz");
        assert!(unsupported.is_empty());
    }

    #[test]
    fn test_off_huge_header_counts_degrade() {
        let huge_vertices = "OFF\n18446744073709551615 1 0\n";
        let huge_faces = "OFF\n3 18446744073709551615 0\n0 0 0\n1 0 0\n0 1 0\n";
        let large_vertices = "OFF\n10000000000 1 0\n0 0 0\n";

        for (name, contents) in [
            ("huge_vertices.off", huge_vertices),
            ("huge_faces.off", huge_faces),
            ("large_vertices.off", large_vertices),
        ] {
            assert!(matches!(parse_off(contents), Err(MeshError::MalformedOff(_))));

            let path = temp_file(name, contents);
            let mesh = Mesh::load_or_empty(&path);
            assert!(mesh.is_empty());
            std::fs::remove_file(&path).ok();
        }
    }
}
