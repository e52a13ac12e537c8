use std::fs;
use std::path::{Path, PathBuf};

use cwscript_core::types::{Block, Document, Node, Property, Scalar};
use cwscript_dsl::{parse_preserving_named, print};
use indexmap::IndexMap;
use tracing::{debug, info};

use crate::category::{decode, FileCategory};
use crate::civic::Civic;
use crate::entity::{read_all, ScriptEntity};
use crate::error::ModError;
use crate::layout::{
    civics_file, localisation_file, ModLayout, DESCRIPTOR_FILE, EVENTS_FILE, TRAITS_FILE,
};
use crate::localisation::Localisation;
use crate::species_trait::SpeciesTrait;

/// The launcher rejects descriptors with more tags than this.
pub const MAX_TAGS: usize = 10;

/// Script key the descriptor uses for the mod root.
const DESCRIPTOR_PATH_KEY: &str = "path";

/// In-memory view of one mod: documents keyed by their path relative to
/// the mod root.
///
/// Nothing touches the disk until [`load`](Self::load), [`save`](Self::save)
/// or [`init`](Self::init) is called. Loaded script files keep their layout,
/// so saving an unedited file writes the same bytes back.
#[derive(Debug, Clone)]
pub struct ModWorkspace {
    layout: ModLayout,
    author_prefix: String,
    documents: IndexMap<String, Document>,
    localisations: IndexMap<String, Localisation>,
}

impl ModWorkspace {
    pub fn new(layout: ModLayout, author_prefix: impl Into<String>) -> Self {
        Self {
            layout,
            author_prefix: author_prefix.into(),
            documents: IndexMap::new(),
            localisations: IndexMap::new(),
        }
    }

    pub fn layout(&self) -> &ModLayout {
        &self.layout
    }

    pub fn author_prefix(&self) -> &str {
        &self.author_prefix
    }

    /// Creates the mod root and its `common/` directory.
    pub fn init(&self) -> Result<PathBuf, ModError> {
        let root = self.layout.root();
        let common = root.join("common");
        fs::create_dir_all(&common).map_err(|e| ModError::io(&common, e))?;
        info!(root = %root.display(), "initialized mod directory");
        Ok(root)
    }

    /// Reads a file below the mod root, replacing any in-memory copy.
    ///
    /// Script files go through the formatting-preserving parser and never
    /// fail to parse; `.yml` files are read as localisation tables.
    pub fn load(&mut self, relative: &str) -> Result<(), ModError> {
        let path = self.layout.path_for(relative)?;
        let bytes = fs::read(&path).map_err(|e| ModError::io(&path, e))?;
        let text = decode(bytes).map_err(|_| ModError::Encoding { path: path.clone() })?;

        match FileCategory::from_path(relative) {
            FileCategory::Script => {
                let document = parse_preserving_named(&text, relative);
                debug!(path = relative, nodes = document.len(), "loaded script");
                self.documents.insert(relative.to_string(), document);
            }
            FileCategory::Localisation => {
                let localisation =
                    Localisation::parse(&text).ok_or_else(|| ModError::InvalidEntity {
                        kind: "localisation",
                        id: relative.to_string(),
                        reason: "missing l_<language>: header".to_string(),
                    })?;
                debug!(path = relative, entries = localisation.entries.len(), "loaded localisation");
                self.localisations.insert(relative.to_string(), localisation);
            }
        }
        Ok(())
    }

    /// Loads every script, localisation and descriptor file under the mod
    /// root. Returns the number of files read.
    pub fn load_all(&mut self) -> Result<usize, ModError> {
        let root = self.layout.root();
        let base = glob::Pattern::escape(&root.to_string_lossy());
        let mut relatives = Vec::new();
        for pattern in ["**/*.txt", "**/*.yml", DESCRIPTOR_FILE] {
            for path in glob::glob(&format!("{base}/{pattern}"))?.flatten() {
                if let Some(relative) = relative_to(&root, &path) {
                    relatives.push(relative);
                }
            }
        }
        relatives.sort();
        relatives.dedup();
        for relative in &relatives {
            self.load(relative)?;
        }
        Ok(relatives.len())
    }

    pub fn document(&self, relative: &str) -> Option<&Document> {
        self.documents.get(relative)
    }

    /// The document at `relative`, created empty if absent.
    pub fn document_mut(&mut self, relative: &str) -> &mut Document {
        self.documents
            .entry(relative.to_string())
            .or_insert_with(|| Document::named(relative))
    }

    /// Replaces whatever is held at `relative` with an empty document.
    pub fn create(&mut self, relative: &str) -> &mut Document {
        self.documents
            .insert(relative.to_string(), Document::named(relative));
        self.document_mut(relative)
    }

    pub fn documents(&self) -> impl Iterator<Item = (&str, &Document)> {
        self.documents.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn localisations(&self) -> impl Iterator<Item = (&str, &Localisation)> {
        self.localisations.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// The table this workspace writes for `language`.
    pub fn localisation(&self, language: &str) -> Option<&Localisation> {
        self.localisations
            .get(&localisation_file(language, &self.author_prefix))
    }

    /// Appends a node to the document at `relative`, creating it if needed.
    pub fn add_object(&mut self, relative: &str, node: impl Into<Node>) {
        self.document_mut(relative).push(node);
    }

    /// Writes one file.
    ///
    /// Returns every path written: the descriptor is written twice, once
    /// next to the mod root with a `path` entry and once inside it without.
    pub fn save(&self, relative: &str) -> Result<Vec<PathBuf>, ModError> {
        if let Some(localisation) = self.localisations.get(relative) {
            let path = self.layout.path_for(relative)?;
            write(&path, FileCategory::Localisation.encode(&localisation.render()))?;
            return Ok(vec![path]);
        }
        let document = self
            .documents
            .get(relative)
            .ok_or_else(|| ModError::UnknownDocument {
                path: relative.to_string(),
            })?;
        if relative == DESCRIPTOR_FILE {
            return self.save_descriptor(document);
        }

        let path = self.layout.path_for(relative)?;
        let category = FileCategory::from_path(relative);
        write(&path, category.encode(&print(document)))?;
        Ok(vec![path])
    }

    /// Writes every held file, in the order they were first added.
    pub fn save_all(&self) -> Result<Vec<PathBuf>, ModError> {
        let mut written = Vec::new();
        for relative in self.documents.keys().chain(self.localisations.keys()) {
            written.extend(self.save(relative)?);
        }
        info!(files = written.len(), "saved mod");
        Ok(written)
    }

    fn save_descriptor(&self, document: &Document) -> Result<Vec<PathBuf>, ModError> {
        let mut outer = document.clone();
        outer.set_property(
            DESCRIPTOR_PATH_KEY,
            Scalar::string(self.layout.root_for_descriptor()),
        );
        let outer_path = self.layout.descriptor_path();
        write(&outer_path, print(&outer).into_bytes())?;

        let mut inner = document.clone();
        inner.remove_property(DESCRIPTOR_PATH_KEY);
        let inner_path = self.layout.path_for(DESCRIPTOR_FILE)?;
        write(&inner_path, print(&inner).into_bytes())?;

        Ok(vec![outer_path, inner_path])
    }

    /// Appends a civic to this author's civics file.
    pub fn add_civic(&mut self, civic: &Civic) {
        let relative = civics_file(&self.author_prefix);
        self.add_object(&relative, civic.to_node());
    }

    /// Civics defined in every held file whose path mentions `civics`.
    pub fn civics(&self) -> Result<Vec<Civic>, ModError> {
        self.entities(|path| path.contains("civics"))
    }

    pub fn add_trait(&mut self, species_trait: &SpeciesTrait) {
        self.add_object(TRAITS_FILE, species_trait.to_node());
    }

    /// Traits defined in every held file under `common/traits/`.
    pub fn traits(&self) -> Result<Vec<SpeciesTrait>, ModError> {
        self.entities(|path| path.starts_with("common/traits/"))
    }

    fn entities<E: ScriptEntity>(&self, matches: impl Fn(&str) -> bool) -> Result<Vec<E>, ModError> {
        let mut all = Vec::new();
        for (path, document) in self.documents() {
            if matches(path) {
                all.extend(read_all::<E>(document)?);
            }
        }
        Ok(all)
    }

    /// Adds entries to this author's table for `language`.
    pub fn add_localisation<K, V>(&mut self, language: &str, entries: impl IntoIterator<Item = (K, V)>)
    where
        K: Into<String>,
        V: Into<String>,
    {
        let relative = localisation_file(language, &self.author_prefix);
        let table = self
            .localisations
            .entry(relative)
            .or_insert_with(|| Localisation::new(language));
        for (key, value) in entries {
            table.insert(key, value);
        }
    }

    /// Appends a `country_event` with the given options to the events file.
    pub fn add_event(
        &mut self,
        id: &str,
        title: &str,
        description: &str,
        options: impl IntoIterator<Item = Node>,
    ) {
        let mut event = Block::anonymous()
            .with(Property::new("id", Scalar::string(id)))
            .with(Property::new("title", Scalar::string(title)))
            .with(Property::new("desc", Scalar::string(description)));
        for option in options {
            event.push(option);
        }
        self.add_object(EVENTS_FILE, Property::new("country_event", event));
    }

    /// Sets the descriptor's version, tags, name and supported game version.
    ///
    /// Other descriptor entries, and the layout of a loaded descriptor, are
    /// kept.
    ///
    /// # Errors
    ///
    /// Returns `ModError::TooManyTags` for more than [`MAX_TAGS`] tags.
    pub fn update_descriptor<S: AsRef<str>>(
        &mut self,
        version: &str,
        supported_version: &str,
        tags: &[S],
    ) -> Result<(), ModError> {
        if tags.len() > MAX_TAGS {
            return Err(ModError::TooManyTags {
                count: tags.len(),
                max: MAX_TAGS,
            });
        }
        let name = self.layout.mod_name().to_string();
        let tag_list = tags.iter().fold(Block::anonymous(), |block, tag| {
            block.with(Scalar::string(tag.as_ref()))
        });

        let descriptor = self.document_mut(DESCRIPTOR_FILE);
        descriptor.set_property("version", Scalar::string(version));
        descriptor.set_property("tags", tag_list);
        descriptor.set_property("name", Scalar::string(name));
        descriptor.set_property("supported_version", Scalar::string(supported_version));
        Ok(())
    }
}

fn write(path: &Path, bytes: Vec<u8>) -> Result<(), ModError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| ModError::io(parent, e))?;
    }
    fs::write(path, bytes).map_err(|e| ModError::io(path, e))?;
    debug!(path = %path.display(), "wrote file");
    Ok(())
}

/// `path` relative to `root` with `/` separators.
fn relative_to(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Some(parts.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workspace() -> ModWorkspace {
        ModWorkspace::new(ModLayout::new("/nowhere", "Test Mod"), "acme")
    }

    #[test]
    fn add_civic_targets_prefixed_file() {
        let mut ws = workspace();
        ws.add_civic(&Civic::new("civic_acme_a"));
        assert!(ws
            .document("common/governments/civics/acme_civics.txt")
            .is_some());
        assert_eq!(ws.civics().unwrap().len(), 1);
    }

    #[test]
    fn add_trait_appends() {
        let mut ws = workspace();
        ws.add_trait(&SpeciesTrait::new("trait_a", 1));
        ws.add_trait(&SpeciesTrait::new("trait_b", -1));
        let ids: Vec<String> = ws.traits().unwrap().into_iter().map(|t| t.id).collect();
        assert_eq!(ids, vec!["trait_a", "trait_b"]);
    }

    #[test]
    fn too_many_tags_rejected() {
        let mut ws = workspace();
        let tags: Vec<String> = (0..11).map(|i| format!("tag{i}")).collect();
        let err = ws.update_descriptor("1.0", "3.*", &tags).unwrap_err();
        assert!(matches!(err, ModError::TooManyTags { count: 11, max: 10 }));
        assert!(ws.document(DESCRIPTOR_FILE).is_none());
    }

    #[test]
    fn descriptor_content() {
        let mut ws = workspace();
        ws.update_descriptor("1.0", "3.*", &["Gameplay", "Balance"])
            .unwrap();
        let text = print(ws.document(DESCRIPTOR_FILE).unwrap());
        assert_eq!(
            text,
            "version = \"1.0\"\ntags = {\n\t\"Gameplay\"\n\t\"Balance\"\n}\nname = \"Test Mod\"\nsupported_version = \"3.*\"\n"
        );
    }

    #[test]
    fn descriptor_update_replaces_in_place() {
        let mut ws = workspace();
        ws.update_descriptor("1.0", "3.*", &["A"]).unwrap();
        ws.update_descriptor("1.1", "3.*", &["B"]).unwrap();
        let doc = ws.document(DESCRIPTOR_FILE).unwrap();
        assert_eq!(doc.len(), 4);
        assert_eq!(doc.property("version").and_then(|p| p.scalar()), Some(&Scalar::string("1.1")));
    }

    #[test]
    fn add_event_builds_country_event() {
        let mut ws = workspace();
        let option = Property::new(
            "option",
            Block::anonymous().with(Property::new("name", Scalar::string("OK"))),
        );
        ws.add_event("acme.1", "acme.1.t", "acme.1.d", [option.into()]);
        let text = print(ws.document(EVENTS_FILE).unwrap());
        assert_eq!(
            text,
            "country_event = {\n\tid = \"acme.1\"\n\ttitle = \"acme.1.t\"\n\tdesc = \"acme.1.d\"\n\toption = {\n\t\tname = \"OK\"\n\t}\n}\n"
        );
    }

    #[test]
    fn add_localisation_merges_entries() {
        let mut ws = workspace();
        ws.add_localisation("english", [("a", "A")]);
        ws.add_localisation("english", [("b", "B")]);
        let table = ws.localisation("english").unwrap();
        assert_eq!(table.entries.len(), 2);
        assert!(ws.localisation("french").is_none());
    }

    #[test]
    fn save_unknown_document_fails() {
        let err = workspace().save("common/none.txt").unwrap_err();
        assert!(matches!(err, ModError::UnknownDocument { .. }));
    }

    #[test]
    fn relative_paths_use_forward_slashes() {
        let root = Path::new("/m/root");
        assert_eq!(
            relative_to(root, &root.join("common").join("x.txt")).as_deref(),
            Some("common/x.txt")
        );
        assert_eq!(relative_to(root, Path::new("/other/x.txt")), None);
    }
}
