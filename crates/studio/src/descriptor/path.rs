use std::{
    fmt::Display,
    path::{Path, PathBuf},
};

use crate::error::PathError;

/// An owned path with a validated maximum length.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BoundedPath(pub(super) String);

impl BoundedPath {
    pub const MAX_LEN: usize = 1023;

    pub fn new(path: impl Into<String>) -> Result<Self, PathError> {
        let path = path.into();
        if path.len() > Self::MAX_LEN {
            return Err(PathError::TooLong {
                len: path.len(),
                max: Self::MAX_LEN,
            });
        }
        Ok(Self(path))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_path(&self) -> &Path {
        Path::new(&self.0)
    }

    /// Path of the geometry for `frame`: `dir/stem.ext` becomes `dir/stem_000012.ext`
    pub fn with_key_frame(&self, frame: u32) -> PathBuf {
        let path = self.as_path();
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let file_name = match path.extension() {
            Some(ext) => format!("{stem}_{frame:06}.{}", ext.to_string_lossy()),
            None => format!("{stem}_{frame:06}"),
        };
        path.with_file_name(file_name)
    }
}

impl TryFrom<&str> for BoundedPath {
    type Error = PathError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl Display for BoundedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::BoundedPath;
    use crate::error::PathError;

    #[test]
    fn rejects_overlong_paths() {
        assert!(BoundedPath::new("a".repeat(BoundedPath::MAX_LEN)).is_ok());
        assert_eq!(
            BoundedPath::new("a".repeat(BoundedPath::MAX_LEN + 1)),
            Err(PathError::TooLong {
                len: BoundedPath::MAX_LEN + 1,
                max: BoundedPath::MAX_LEN
            })
        );
    }

    #[test]
    fn key_frame_suffix() {
        let path = BoundedPath::new("./data/models/test.obj").unwrap();
        assert_eq!(
            path.with_key_frame(12),
            PathBuf::from("./data/models/test_000012.obj")
        );
        assert_eq!(
            path.with_key_frame(123456),
            PathBuf::from("./data/models/test_123456.obj")
        );

        let bare = BoundedPath::new("mesh").unwrap();
        assert_eq!(bare.with_key_frame(0), PathBuf::from("mesh_000000"));
    }
}
