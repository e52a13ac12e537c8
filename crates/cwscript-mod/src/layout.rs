use std::path::{Component, Path, PathBuf};

use crate::error::ModError;

/// Descriptor file name inside the mod root.
pub const DESCRIPTOR_FILE: &str = "descriptor.mod";
/// Species traits added through the workspace.
pub const TRAITS_FILE: &str = "common/traits/mod_traits.txt";
/// Events added through the workspace.
pub const EVENTS_FILE: &str = "events/mod_events.txt";
/// Directory the game reads static modifiers from.
pub const STATIC_MODIFIERS_DIR: &str = "common/static_modifiers";

/// Civics file for an author prefix, e.g. `common/governments/civics/acme_civics.txt`.
pub fn civics_file(author_prefix: &str) -> String {
    format!("common/governments/civics/{author_prefix}_civics.txt")
}

/// Localisation file for a language, e.g. `localisation/english/acme_l_english.yml`.
pub fn localisation_file(language: &str, author_prefix: &str) -> String {
    format!("localisation/{language}/{author_prefix}_l_{language}.yml")
}

/// Where a mod lives on disk.
///
/// The mods directory is always supplied by the caller; nothing here reads
/// global state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModLayout {
    mods_dir: PathBuf,
    mod_name: String,
}

impl ModLayout {
    pub fn new(mods_dir: impl Into<PathBuf>, mod_name: impl Into<String>) -> Self {
        Self {
            mods_dir: mods_dir.into(),
            mod_name: mod_name.into(),
        }
    }

    /// The game's default mods directory below a user's home directory.
    pub fn default_mods_dir(home: &Path) -> PathBuf {
        home.join("Documents")
            .join("Paradox Interactive")
            .join("Stellaris")
            .join("mod")
    }

    pub fn mods_dir(&self) -> &Path {
        &self.mods_dir
    }

    pub fn mod_name(&self) -> &str {
        &self.mod_name
    }

    /// `mods_dir/mod_name`.
    pub fn root(&self) -> PathBuf {
        self.mods_dir.join(&self.mod_name)
    }

    /// The launcher descriptor next to the mod root: `mods_dir/<mod_name>.mod`.
    pub fn descriptor_path(&self) -> PathBuf {
        self.mods_dir.join(format!("{}.mod", self.mod_name))
    }

    /// Resolves a path relative to the mod root.
    ///
    /// # Errors
    ///
    /// Returns `ModError::InvalidPath` for absolute paths or paths that
    /// climb out of the root.
    pub fn path_for(&self, relative: &str) -> Result<PathBuf, ModError> {
        let path = Path::new(relative);
        let inside = !relative.is_empty()
            && path
                .components()
                .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
        if !inside {
            return Err(ModError::InvalidPath {
                path: relative.to_string(),
            });
        }
        Ok(self.root().join(path))
    }

    /// Mod root as written into the descriptor's `path`, with forward slashes.
    pub fn root_for_descriptor(&self) -> String {
        self.root().to_string_lossy().replace('\\', "/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> ModLayout {
        ModLayout::new("/games/mod", "My Mod")
    }

    #[test]
    fn root_and_descriptor_paths() {
        let l = layout();
        assert_eq!(l.root(), PathBuf::from("/games/mod/My Mod"));
        assert_eq!(l.descriptor_path(), PathBuf::from("/games/mod/My Mod.mod"));
        assert_eq!(l.root_for_descriptor(), "/games/mod/My Mod");
    }

    #[test]
    fn descriptor_root_uses_forward_slashes() {
        let l = ModLayout::new("C:\\Games\\mods", "Acme");
        let root = l.root_for_descriptor();
        assert_eq!(root, "C:/Games/mods/Acme");
        let rendered = cwscript_core::types::Scalar::string(root).render().into_owned();
        assert_eq!(rendered, "\"C:/Games/mods/Acme\"");
    }

    #[test]
    fn path_for_joins_relative_paths() {
        assert_eq!(
            layout().path_for(TRAITS_FILE).unwrap(),
            PathBuf::from("/games/mod/My Mod/common/traits/mod_traits.txt")
        );
    }

    #[test]
    fn path_for_rejects_escapes() {
        for bad in ["", "/etc/passwd", "../other/x.txt", "common/../../x.txt"] {
            assert!(
                matches!(layout().path_for(bad), Err(ModError::InvalidPath { .. })),
                "expected rejection: {bad}"
            );
        }
    }

    #[test]
    fn well_known_files() {
        assert_eq!(civics_file("acme"), "common/governments/civics/acme_civics.txt");
        assert_eq!(
            localisation_file("english", "acme"),
            "localisation/english/acme_l_english.yml"
        );
    }

    #[test]
    fn default_mods_dir_under_home() {
        assert_eq!(
            ModLayout::default_mods_dir(Path::new("/home/u")),
            PathBuf::from("/home/u/Documents/Paradox Interactive/Stellaris/mod")
        );
    }
}
