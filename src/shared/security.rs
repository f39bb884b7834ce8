use crate::shared::Result;
use std::fs::Metadata;
use std::path::Path;

/// Maximum object size accepted from local storage (100 MB)
/// This prevents DoS via excessively large report files
pub const MAX_OBJECT_SIZE: u64 = 100 * 1024 * 1024;

/// Validates a bucket name or object key before it is joined onto a path
/// or a URL.
///
/// # Security
/// Rejects path separators and `..` so a key can never escape its bucket,
/// and URL-unsafe characters that would change the meaning of a request URL.
///
/// # Errors
/// Returns an error naming `component_type` if the component is empty or
/// contains a disallowed sequence
pub fn validate_object_component(component: &str, component_type: &str) -> Result<()> {
    if component.is_empty() {
        anyhow::bail!("{} must not be empty", component_type);
    }

    if component.contains('/') || component.contains('\\') {
        anyhow::bail!(
            "Security: {} contains path separators which are not allowed",
            component_type
        );
    }

    if component.contains("..") {
        anyhow::bail!(
            "Security: {} contains '..' which is not allowed",
            component_type
        );
    }

    if component.contains('#') || component.contains('?') {
        anyhow::bail!(
            "Security: {} contains URL-unsafe characters",
            component_type
        );
    }

    Ok(())
}

/// Validates metadata obtained with `symlink_metadata()` for an object file:
/// it must not be a symbolic link, must be a regular file and must not
/// exceed [`MAX_OBJECT_SIZE`].
pub fn validate_object_metadata(metadata: &Metadata, path: &Path) -> Result<()> {
    if metadata.is_symlink() {
        anyhow::bail!(
            "Security: {} is a symbolic link. For security reasons, symbolic links are not allowed.",
            path.display()
        );
    }

    if !metadata.is_file() {
        anyhow::bail!("{} is not a regular file", path.display());
    }

    validate_object_size(metadata.len(), path, MAX_OBJECT_SIZE)
}

pub fn validate_object_size(size: u64, path: &Path, max_size: u64) -> Result<()> {
    if size > max_size {
        anyhow::bail!(
            "Security: {} is too large ({} bytes). Maximum allowed size is {} bytes.",
            path.display(),
            size,
            max_size
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_validate_object_component_accepts_plain_names() {
        assert!(validate_object_component("k8s_bom.json", "Object key").is_ok());
        assert!(validate_object_component("test-kbom-reports-bucket-7feb2025", "Bucket").is_ok());
    }

    #[test]
    fn test_validate_object_component_rejects_traversal() {
        let err = validate_object_component("../secrets", "Object key").unwrap_err();
        assert!(err.to_string().contains("path separators"));

        let err = validate_object_component("..", "Object key").unwrap_err();
        assert!(err.to_string().contains("'..'"));
    }

    #[test]
    fn test_validate_object_component_rejects_empty_and_unsafe() {
        assert!(validate_object_component("", "Bucket").is_err());
        let err = validate_object_component("a?b", "Bucket").unwrap_err();
        assert!(err.to_string().contains("URL-unsafe"));
    }

    #[test]
    fn test_validate_object_metadata_regular_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("k8s_bom.json");
        fs::write(&file_path, "{}").unwrap();

        let metadata = fs::symlink_metadata(&file_path).unwrap();
        assert!(validate_object_metadata(&metadata, &file_path).is_ok());
    }

    #[test]
    fn test_validate_object_metadata_directory() {
        let temp_dir = TempDir::new().unwrap();
        let metadata = fs::symlink_metadata(temp_dir.path()).unwrap();
        let err = validate_object_metadata(&metadata, temp_dir.path()).unwrap_err();
        assert!(err.to_string().contains("not a regular file"));
    }

    #[cfg(unix)]
    #[test]
    fn test_validate_object_metadata_symlink() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("target.json");
        fs::write(&target, "{}").unwrap();
        let link = temp_dir.path().join("k8s_bom.json");
        std::os::unix::fs::symlink(&target, &link).unwrap();

        let metadata = fs::symlink_metadata(&link).unwrap();
        let err = validate_object_metadata(&metadata, &link).unwrap_err();
        assert!(err.to_string().contains("symbolic link"));
    }

    #[test]
    fn test_validate_object_size_exceeds_limit() {
        let path = PathBuf::from("/test/k8s_bom.json");
        assert!(validate_object_size(1000, &path, MAX_OBJECT_SIZE).is_ok());
        let err = validate_object_size(MAX_OBJECT_SIZE + 1, &path, MAX_OBJECT_SIZE).unwrap_err();
        assert!(err.to_string().contains("too large"));
    }
}
