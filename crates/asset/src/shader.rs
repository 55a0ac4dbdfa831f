//! GLSL source pairs, loaded from disk or provided inline.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Vertex + fragment stage sources for one program.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ShaderSource {
    pub vertex: String,
    pub fragment: String,
}

impl ShaderSource {
    pub fn new(vertex: impl Into<String>, fragment: impl Into<String>) -> Self {
        Self {
            vertex: vertex.into(),
            fragment: fragment.into(),
        }
    }

    /// Read both stages from disk.
    pub fn load(vertex_path: impl AsRef<Path>, fragment_path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            vertex: read_source(vertex_path.as_ref())?,
            fragment: read_source(fragment_path.as_ref())?,
        })
    }
}

fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .with_context(|| format!("Failed to read shader source: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_reads_both_stages() {
        let dir = std::env::temp_dir().join(format!("shader-src-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let vert = dir.join("demo.vert");
        let frag = dir.join("demo.frag");
        std::fs::write(&vert, "void main() {}").unwrap();
        std::fs::write(&frag, "void main() {}").unwrap();

        let source = ShaderSource::load(&vert, &frag).expect("load sources");
        assert_eq!(source.vertex, "void main() {}");
        assert_eq!(source.fragment, "void main() {}");

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn new_wraps_the_pair() {
        let source = ShaderSource::new("v", "f");
        assert_eq!(source.vertex, "v");
        assert_eq!(source.fragment, "f");
    }

    #[test]
    fn missing_file_is_an_error() {
        let missing = std::env::temp_dir().join("does-not-exist.vert");
        assert!(ShaderSource::load(&missing, &missing).is_err());
    }
}
