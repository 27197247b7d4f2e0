//! Tray icon image loading.

use std::path::Path;

use tracing::warn;

use crate::error::IconError;

/// Edge length of the tray icon in pixels.
pub const ICON_SIZE: u32 = 32;

/// Decoded RGBA pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconImage {
    pub rgba: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl IconImage {
    #[cfg(not(target_os = "linux"))]
    pub fn into_icon(self) -> Result<tray_icon::Icon, IconError> {
        Ok(tray_icon::Icon::from_rgba(self.rgba, self.width, self.height)?)
    }

    /// StatusNotifierItem pixmap: ARGB32 in network byte order.
    #[cfg(target_os = "linux")]
    pub fn to_pixmap(&self) -> ksni::Icon {
        let data = self
            .rgba
            .chunks_exact(4)
            .flat_map(|px| [px[3], px[0], px[1], px[2]])
            .collect();

        ksni::Icon {
            width: self.width as i32,
            height: self.height as i32,
            data,
        }
    }
}

/// Decode an image and scale it to the tray icon size.
pub fn decode(bytes: &[u8]) -> Result<IconImage, IconError> {
    let img = image::load_from_memory(bytes)?;
    let img = img.resize_exact(ICON_SIZE, ICON_SIZE, image::imageops::FilterType::Lanczos3);

    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();

    Ok(IconImage {
        rgba: rgba.into_raw(),
        width,
        height,
    })
}

/// Read and decode the icon file.
pub fn read(path: &Path) -> Result<IconImage, IconError> {
    let bytes = std::fs::read(path).map_err(|source| IconError::Read {
        path: path.display().to_string(),
        source,
    })?;
    decode(&bytes)
}

/// Read the icon file, or fall back to [`placeholder`] when it is unusable.
pub fn read_or_placeholder(path: &Path) -> IconImage {
    match read(path) {
        Ok(image) => image,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Using placeholder tray icon");
            placeholder()
        }
    }
}

/// A filled circle in Syncrop blue.
pub fn placeholder() -> IconImage {
    let mut rgba = Vec::with_capacity((ICON_SIZE * ICON_SIZE * 4) as usize);
    let center = (ICON_SIZE as f32 - 1.0) / 2.0;
    let radius = ICON_SIZE as f32 / 2.0 - 2.0;

    for y in 0..ICON_SIZE {
        for x in 0..ICON_SIZE {
            let dx = x as f32 - center;
            let dy = y as f32 - center;
            let dist = (dx * dx + dy * dy).sqrt();

            if dist <= radius - 1.5 {
                rgba.extend_from_slice(&[0x2E, 0x7D, 0xD2, 0xFF]);
            } else if dist <= radius {
                // Border
                rgba.extend_from_slice(&[0x1A, 0x4F, 0x8B, 0xFF]);
            } else {
                rgba.extend_from_slice(&[0, 0, 0, 0]);
            }
        }
    }

    IconImage {
        rgba,
        width: ICON_SIZE,
        height: ICON_SIZE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba([10, 20, 30, 255]));
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();
        buf
    }

    #[test]
    fn test_decode_scales_to_icon_size() {
        let icon = decode(&png_bytes(128, 64)).unwrap();
        assert_eq!((icon.width, icon.height), (ICON_SIZE, ICON_SIZE));
        assert_eq!(icon.rgba.len(), (ICON_SIZE * ICON_SIZE * 4) as usize);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let err = decode(b"not an image").unwrap_err();
        assert!(matches!(err, IconError::Decode(_)));
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read(&dir.path().join("syncrop.png")).unwrap_err();
        assert!(matches!(err, IconError::Read { .. }));
    }

    #[test]
    fn test_read_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("syncrop.png");
        std::fs::write(&path, png_bytes(16, 16)).unwrap();

        let icon = read(&path).unwrap();
        assert_eq!(icon.width, ICON_SIZE);
    }

    #[test]
    fn test_missing_file_falls_back_to_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        let icon = read_or_placeholder(&dir.path().join("missing.png"));
        assert_eq!(icon, placeholder());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_pixmap_is_argb() {
        let image = IconImage {
            rgba: vec![1, 2, 3, 4, 5, 6, 7, 8],
            width: 2,
            height: 1,
        };
        let pixmap = image.to_pixmap();
        assert_eq!((pixmap.width, pixmap.height), (2, 1));
        assert_eq!(pixmap.data, vec![4, 1, 2, 3, 8, 5, 6, 7]);
    }

    #[test]
    fn test_placeholder_shape() {
        let icon = placeholder();
        assert_eq!(icon.rgba.len(), (ICON_SIZE * ICON_SIZE * 4) as usize);

        // Corner transparent, center opaque
        assert_eq!(icon.rgba[3], 0);
        let mid = ((ICON_SIZE / 2) * ICON_SIZE + ICON_SIZE / 2) as usize * 4;
        assert_eq!(icon.rgba[mid + 3], 0xFF);
    }
}
