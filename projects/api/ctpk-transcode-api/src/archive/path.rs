use crate::error::StructuralError;
use std::path::{Path, PathBuf};

/// Extension appended to every exported image.
pub const IMAGE_EXTENSION: &str = "png";

/// Splits an embedded texture path into relative path components.
///
/// Both `/` and `\` separate components. Empty and `.` components are dropped.
///
/// # Errors
///
/// [`StructuralError::InvalidTexturePath`] if a component is `..` or nothing remains.
pub fn texture_path_components(index: usize, path: &str) -> Result<Vec<&str>, StructuralError> {
    let invalid = || StructuralError::InvalidTexturePath {
        index,
        path: path.to_string(),
    };

    let mut components = Vec::new();
    for component in path.split(['/', '\\']) {
        match component {
            "" | "." => {}
            ".." => return Err(invalid()),
            _ => components.push(component),
        }
    }

    if components.is_empty() {
        return Err(invalid());
    }

    Ok(components)
}

/// Location of the exported image for an entry: `dir`, then the texture path, then `.png`.
///
/// The extension is appended to the full file name, so `a/b.tga` becomes `a/b.tga.png`.
pub fn image_path(dir: &Path, index: usize, texture_path: &str) -> Result<PathBuf, StructuralError> {
    let mut result = dir.to_path_buf();
    for component in texture_path_components(index, texture_path)? {
        result.push(component);
    }

    let mut file_name = result.file_name().unwrap_or_default().to_os_string();
    file_name.push(".");
    file_name.push(IMAGE_EXTENSION);
    result.set_file_name(file_name);
    Ok(result)
}
