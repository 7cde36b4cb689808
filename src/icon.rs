use std::{
    env,
    path::{Component, Path, PathBuf},
};

use log::debug;

use crate::{config::Config, Error, Result};

/// Directory, relative to the executable, that bundled assets ship in.
pub const DEFAULT_ASSETS_DIR: &str = "data/assets";
/// Extension the shell requires for toolbar and overlay icons.
pub const ICON_EXTENSION: &str = "ico";

/// A bundled icon whose file was present when it was resolved.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct IconAsset {
    id: String,
    path: PathBuf,
}

impl IconAsset {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Maps asset identifiers such as `"icons/play.ico"` to files shipped next
/// to the running executable.
#[derive(Clone, Debug)]
pub struct IconResolver {
    root: PathBuf,
}

impl IconResolver {
    /// Resolver rooted at `<exe dir>/data/assets`.
    pub fn new() -> Result<Self> {
        Self::with_assets_dir(DEFAULT_ASSETS_DIR)
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::with_assets_dir(config.assets_dir())
    }

    pub fn with_assets_dir(assets_dir: impl AsRef<Path>) -> Result<Self> {
        let exe = env::current_exe()?;
        let exe_dir = exe
            .parent()
            .ok_or_else(|| Error::Platform(format!("{exe:?} has no parent directory")))?;
        Ok(Self::with_root(exe_dir.join(assets_dir)))
    }

    /// Resolver rooted at an arbitrary directory.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        IconResolver { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Validates `asset_id` and returns the absolute path of the icon.
    ///
    /// Only the filesystem is consulted; nothing is sent to the shell.
    pub fn resolve(&self, asset_id: &str) -> Result<IconAsset> {
        let invalid = |reason: String| Error::InvalidIconAsset {
            asset: asset_id.to_owned(),
            reason,
        };
        let has_icon_extension = Path::new(asset_id)
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(ICON_EXTENSION));
        if !has_icon_extension {
            return Err(invalid(format!("expected a .{ICON_EXTENSION} file")));
        }
        let stays_in_root = Path::new(asset_id)
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
        if !stays_in_root {
            return Err(invalid(format!("must be relative to {}", self.root.display())));
        }
        let path = self.root.join(asset_id);
        if !path.is_file() {
            return Err(invalid(format!("no file at {}", path.display())));
        }
        debug!("Resolved icon {asset_id} to {path:?}");
        Ok(IconAsset {
            id: asset_id.to_owned(),
            path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{create_dir, File};

    fn assets() -> (tempfile::TempDir, IconResolver) {
        let dir = tempfile::tempdir().unwrap();
        File::create(dir.path().join("play.ico")).unwrap();
        create_dir(dir.path().join("icons")).unwrap();
        File::create(dir.path().join("icons").join("stop.ICO")).unwrap();
        File::create(dir.path().join("logo.png")).unwrap();
        let resolver = IconResolver::with_root(dir.path());
        (dir, resolver)
    }

    #[test]
    fn resolves_existing_icon() {
        let (dir, resolver) = assets();
        let icon = resolver.resolve("play.ico").unwrap();
        assert_eq!(icon.id(), "play.ico");
        assert_eq!(icon.path(), dir.path().join("play.ico"));
        assert!(icon.path().is_absolute());
    }

    #[test]
    fn resolves_nested_icon_with_uppercase_extension() {
        let (dir, resolver) = assets();
        let icon = resolver.resolve("icons/stop.ICO").unwrap();
        assert_eq!(icon.path(), dir.path().join("icons/stop.ICO"));
    }

    #[test]
    fn rejects_wrong_extension_even_if_file_exists() {
        let (_dir, resolver) = assets();
        let err = resolver.resolve("logo.png").unwrap_err();
        assert!(matches!(err, Error::InvalidIconAsset { ref asset, .. } if asset == "logo.png"));
    }

    #[test]
    fn rejects_missing_extension() {
        let (_dir, resolver) = assets();
        assert!(matches!(
            resolver.resolve("play"),
            Err(Error::InvalidIconAsset { .. })
        ));
    }

    #[test]
    fn rejects_missing_file() {
        let (_dir, resolver) = assets();
        assert!(matches!(
            resolver.resolve("pause.ico"),
            Err(Error::InvalidIconAsset { .. })
        ));
    }

    #[test]
    fn rejects_directory_named_like_an_icon() {
        let (dir, resolver) = assets();
        create_dir(dir.path().join("folder.ico")).unwrap();
        assert!(resolver.resolve("folder.ico").is_err());
    }

    #[test]
    fn rejects_paths_leaving_assets_dir() {
        let outside = tempfile::tempdir().unwrap();
        let stray = outside.path().join("stray.ico");
        File::create(&stray).unwrap();
        let assets = outside.path().join("assets");
        create_dir(&assets).unwrap();
        let resolver = IconResolver::with_root(&assets);

        for asset_id in [stray.to_str().unwrap(), "../stray.ico", "./../stray.ico"] {
            assert!(
                matches!(
                    resolver.resolve(asset_id),
                    Err(Error::InvalidIconAsset { .. })
                ),
                "{asset_id} resolved"
            );
        }
    }

    #[test]
    fn default_root_is_next_to_executable() {
        let resolver = IconResolver::new().unwrap();
        let exe_dir = env::current_exe().unwrap().parent().unwrap().to_path_buf();
        assert_eq!(resolver.root(), exe_dir.join(DEFAULT_ASSETS_DIR));
    }
}
