use std::ffi::OsStr;
use std::path::Path;

use scramble_desk::{Person, Result};
use tracing::{info, warn};
use wca_wcif::Registry;

use crate::process::run;

/// Downloads every avatar into `dir`, named by WCA id, then converts them to JPEG.
/// Individual failures are reported and skipped. Returns how many were saved.
pub async fn load_avatars(registry: &Registry, persons: &[Person], dir: &Path) -> Result<usize> {
    let mut saved = 0;
    for person in persons {
        let (Some(avatar), Some(stem)) = (&person.avatar, person.avatar_stem()) else { continue };
        match registry.get_avatar(avatar).await {
            Ok(bytes) => {
                tokio::fs::write(dir.join(stem), bytes).await?;
                saved += 1;
            }
            Err(err) => warn!(person = %person.name, %err, "could not download avatar"),
        }
    }
    convert_to_jpg(dir).await?;
    info!(saved, "avatars downloaded");
    Ok(saved)
}

fn is_jpg(path: &Path) -> bool {
    path.extension().map_or(false, |ext| ext.eq_ignore_ascii_case("jpg"))
}

/// Removes earlier conversions so every download is converted afresh.
pub async fn remove_jpg_files(dir: &Path) -> Result<()> {
    let mut entries = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.is_file() && is_jpg(&path) {
            if let Err(err) = tokio::fs::remove_file(&path).await {
                warn!(path = %path.display(), %err, "could not remove old avatar");
            }
        }
    }
    Ok(())
}

async fn convert_to_jpg(dir: &Path) -> Result<()> {
    remove_jpg_files(dir).await?;
    let mut inputs = vec![];
    let mut entries = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.is_file() && !is_jpg(&path) {
            inputs.push(path);
        }
    }
    for input in inputs {
        let mut output = input.clone().into_os_string();
        output.push(".jpg");
        if let Err(err) = run("ffmpeg", [
            OsStr::new("-loglevel"), OsStr::new("quiet"),
            OsStr::new("-i"), input.as_os_str(),
            OsStr::new("-q:v"), OsStr::new("2"),
            output.as_os_str(),
        ]).await {
            warn!(path = %input.display(), %err, "could not convert avatar");
        }
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[tokio::test]
    async fn removes_only_jpg() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("2019ANDE01"), b"raw").unwrap();
        std::fs::write(dir.path().join("2019ANDE01.jpg"), b"old").unwrap();
        std::fs::write(dir.path().join("2020BERG02.JPG"), b"old").unwrap();
        remove_jpg_files(dir.path()).await.unwrap();
        assert!(dir.path().join("2019ANDE01").exists());
        assert!(!dir.path().join("2019ANDE01.jpg").exists());
        assert!(!dir.path().join("2020BERG02.JPG").exists());
    }

    #[tokio::test]
    async fn persons_without_avatars_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let person = Person { id: 1, name: "Carla Cruz".into(), wca_id: None, roles: vec![], avatar: None, assignments: vec![] };
        let saved = load_avatars(&Registry::new("http://127.0.0.1:9"), &[person], dir.path()).await.unwrap();
        assert_eq!(saved, 0);
    }
}
