//! Common Utilities Module
//!
//! 两个工具共用的小函数：扩展名判断、目录创建、文件名显示。

use anyhow::{Context, Result};
use std::path::Path;

/// 小写扩展名，没有扩展名时返回空字符串
///
/// # Examples
/// ```
/// use std::path::Path;
/// use shared_utils::common_utils::get_extension_lowercase;
///
/// assert_eq!(get_extension_lowercase(Path::new("test.JPG")), "jpg");
/// assert_eq!(get_extension_lowercase(Path::new("test.mp4")), "mp4");
/// assert_eq!(get_extension_lowercase(Path::new("noext")), "");
/// ```
pub fn get_extension_lowercase(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default()
}

/// 扩展名是否在列表中（不区分大小写，列表不带点号）
///
/// # Examples
/// ```
/// use std::path::Path;
/// use shared_utils::common_utils::has_extension;
///
/// let extensions = &["jpg", "png"];
/// assert!(has_extension(Path::new("photo.JPG"), extensions));
/// assert!(!has_extension(Path::new("video.mp4"), extensions));
/// ```
pub fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    let ext = get_extension_lowercase(path);
    !ext.is_empty() && extensions.contains(&ext.as_str())
}

/// 创建目录（包括父目录），已存在时不报错
pub fn ensure_dir_exists(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))
}

/// 用于进度行显示的文件名
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_has_extension_case_insensitive() {
        let exts = &["heic", "tiff"];
        assert!(has_extension(Path::new("IMG_0001.HEIC"), exts));
        assert!(has_extension(Path::new("scan.Tiff"), exts));
        assert!(!has_extension(Path::new("scan.tif"), exts));
        assert!(!has_extension(Path::new("heic"), exts));
    }

    #[test]
    fn test_ensure_dir_exists_creates_parents() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("a").join("b").join("c");
        ensure_dir_exists(&nested).unwrap();
        assert!(nested.is_dir());
        ensure_dir_exists(&nested).unwrap();
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name(Path::new("/tmp/in/clip.mkv")), "clip.mkv");
        assert_eq!(display_name(Path::new("photo.jpg")), "photo.jpg");
    }
}
