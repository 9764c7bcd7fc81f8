use std::path::{Component, Path, PathBuf};

use ml_master_data_entities::domain::cascade::distinct_images;
use tracing::{debug, warn};

use crate::config::Config;

pub const PLACEHOLDER_IMAGE: &str = "default.png";

pub fn default_image_url(config: &Config) -> String {
    format!("{}/uploads/{}", config.base_url, PLACEHOLDER_IMAGE)
}

/// Fills in the placeholder for records created without an image.
pub fn image_or_default(config: &Config, image: Option<String>) -> String {
    image.filter(|i| !i.trim().is_empty()).unwrap_or_else(|| default_image_url(config))
}

/// Maps an image URL to its file in the upload directory.
///
/// Only URLs served by this instance under `/uploads/` qualify. The
/// placeholder and anything that would escape the directory are skipped.
pub fn local_upload_path(config: &Config, url: &str) -> Option<PathBuf> {
    let prefix = format!("{}/uploads/", config.base_url);
    let relative = Path::new(url.strip_prefix(&prefix)?);

    if relative.file_name()? == PLACEHOLDER_IMAGE {
        return None;
    }
    if !relative.components().all(|c| matches!(c, Component::Normal(_))) {
        return None;
    }

    Some(Path::new(&config.upload_dir).join(relative))
}

/// Unlinks the files behind the given URLs after their records are gone.
///
/// Never fails: the rows are already committed, so problems are only logged.
pub async fn remove_images(config: &Config, urls: Vec<String>) {
    for url in distinct_images(urls) {
        let Some(path) = local_upload_path(config, &url) else {
            debug!("Not removing external or placeholder image {}", url);
            continue;
        };
        match tokio::fs::remove_file(&path).await {
            Ok(()) => debug!("Removed image {}", path.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!("Image file {} was already missing", path.display())
            }
            Err(e) => warn!("Failed to remove image {}: {}", path.display(), e),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn config() -> Config {
        Config {
            base_url: "http://localhost:3000".into(),
            upload_dir: "/srv/uploads".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_local_urls_map_into_upload_dir() {
        assert_eq!(
            local_upload_path(&config(), "http://localhost:3000/uploads/teams/alpha.png"),
            Some(PathBuf::from("/srv/uploads/teams/alpha.png"))
        );
    }

    #[test]
    fn test_placeholder_and_foreign_urls_are_skipped() {
        let config = config();
        assert_eq!(local_upload_path(&config, &default_image_url(&config)), None);
        assert_eq!(local_upload_path(&config, "https://cdn.example.com/uploads/alpha.png"), None);
        assert_eq!(local_upload_path(&config, "http://localhost:3000/static/alpha.png"), None);
        assert_eq!(local_upload_path(&config, ""), None);
    }

    #[test]
    fn test_traversal_is_rejected() {
        assert_eq!(local_upload_path(&config(), "http://localhost:3000/uploads/../secrets.txt"), None);
        assert_eq!(local_upload_path(&config(), "http://localhost:3000/uploads//etc/passwd"), None);
    }

    #[test]
    fn test_missing_image_gets_placeholder() {
        let config = config();
        assert_eq!(image_or_default(&config, None), "http://localhost:3000/uploads/default.png");
        assert_eq!(image_or_default(&config, Some(" ".into())), "http://localhost:3000/uploads/default.png");
        assert_eq!(image_or_default(&config, Some("http://x/a.png".into())), "http://x/a.png");
    }

    #[tokio::test]
    async fn test_remove_images_unlinks_files() {
        let dir = std::env::temp_dir().join(format!("ml_master_data_images_{}", std::process::id()));
        tokio::fs::create_dir_all(&dir).await.unwrap();
        let file = dir.join("alpha.png");
        tokio::fs::write(&file, b"png").await.unwrap();

        let config = Config {
            base_url: "http://localhost:3000".into(),
            upload_dir: dir.to_string_lossy().into_owned(),
            ..Default::default()
        };
        remove_images(&config, vec![
            "http://localhost:3000/uploads/alpha.png".into(),
            "http://localhost:3000/uploads/alpha.png".into(),
            "http://localhost:3000/uploads/missing.png".into(),
        ]).await;

        assert!(!file.exists());
        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }
}
