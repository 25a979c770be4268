//! Photo collection for the complaint
//!
//! Photos come either as single files or from a folder (top level only).

use crate::error::{ComplaintError, Result};
use complaint_form_common::PhotoAttachment;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const PHOTO_EXTENSIONS: &[(&str, &str)] = &[
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("heic", "image/heic"),
];

/// MIME type for a photo path, `None` when the extension is not an image
pub fn photo_mime_type(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_string_lossy().to_lowercase();
    PHOTO_EXTENSIONS
        .iter()
        .find(|(e, _)| *e == ext)
        .map(|(_, mime)| *mime)
}

/// Image files directly inside `folder`, sorted by file name
pub fn scan_photo_folder(folder: &Path) -> Result<Vec<PathBuf>> {
    if !folder.is_dir() {
        return Err(ComplaintError::FolderNotFound(folder.display().to_string()));
    }

    let mut paths: Vec<PathBuf> = WalkDir::new(folder)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|p| p.is_file() && photo_mime_type(p).is_some())
        .collect();

    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(paths)
}

/// Reads one photo into memory
pub fn load_photo(path: &Path) -> Result<PhotoAttachment> {
    if !path.is_file() {
        return Err(ComplaintError::FileNotFound(path.display().to_string()));
    }
    let mime_type = photo_mime_type(path)
        .ok_or_else(|| ComplaintError::UnsupportedPhoto(path.display().to_string()))?;

    let data = std::fs::read(path)?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    Ok(PhotoAttachment {
        file_name,
        path: path.display().to_string(),
        mime_type: mime_type.to_string(),
        data,
    })
}

/// Loads single files and folder contents, files first, in the given order
pub fn collect_photos(files: &[PathBuf], folder: Option<&Path>) -> Result<Vec<PhotoAttachment>> {
    let mut paths = files.to_vec();
    if let Some(folder) = folder {
        paths.extend(scan_photo_folder(folder)?);
    }
    paths.iter().map(|p| load_photo(p)).collect()
}

/// Reloads the bytes of photos from a saved form
pub fn reload_photos(photos: &[PhotoAttachment]) -> Result<Vec<PhotoAttachment>> {
    photos
        .iter()
        .map(|photo| {
            if !photo.data.is_empty() || photo.path.is_empty() {
                Ok(photo.clone())
            } else {
                load_photo(Path::new(&photo.path))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_photo_mime_type() {
        assert_eq!(photo_mime_type(Path::new("a.jpg")), Some("image/jpeg"));
        assert_eq!(photo_mime_type(Path::new("a.JPEG")), Some("image/jpeg"));
        assert_eq!(photo_mime_type(Path::new("a.png")), Some("image/png"));
        assert_eq!(photo_mime_type(Path::new("a.pdf")), None);
        assert_eq!(photo_mime_type(Path::new("noext")), None);
    }

    #[test]
    fn test_scan_folder_not_found() {
        let result = scan_photo_folder(Path::new("/nonexistent/folder"));
        assert!(matches!(result, Err(ComplaintError::FolderNotFound(_))));
    }

    #[test]
    fn test_scan_folder_sorted_images_only() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("c.jpg"), b"c").unwrap();
        fs::write(dir.path().join("a.PNG"), b"a").unwrap();
        fs::write(dir.path().join("b.jpeg"), b"b").unwrap();
        fs::write(dir.path().join("notes.txt"), b"x").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("d.jpg"), b"d").unwrap();

        let paths = scan_photo_folder(dir.path()).unwrap();
        let names: Vec<String> = paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.PNG", "b.jpeg", "c.jpg"]);
    }

    #[test]
    fn test_load_photo() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rozbite.jpg");
        fs::write(&path, b"jpegdata").unwrap();

        let photo = load_photo(&path).unwrap();
        assert_eq!(photo.file_name, "rozbite.jpg");
        assert_eq!(photo.mime_type, "image/jpeg");
        assert_eq!(photo.data, b"jpegdata");
    }

    #[test]
    fn test_load_photo_missing() {
        let result = load_photo(Path::new("/nonexistent/photo.jpg"));
        assert!(matches!(result, Err(ComplaintError::FileNotFound(_))));
    }

    #[test]
    fn test_reload_photos() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a.png");
        fs::write(&path, b"png").unwrap();

        let saved = PhotoAttachment {
            file_name: "a.png".into(),
            path: path.display().to_string(),
            mime_type: "image/png".into(),
            data: Vec::new(),
        };
        let reloaded = reload_photos(&[saved]).unwrap();
        assert_eq!(reloaded[0].data, b"png");
    }
}
