//! Splits an exported tree into files.

use std::{
    fs,
    io::{Cursor, Write},
    path::{Path, PathBuf},
};

use clap::ValueEnum;
use log::debug;
use serde::Deserialize;
use slug::slugify;
use zip::{write::SimpleFileOptions, CompressionMethod, ZipWriter};

use figma_design_tokens_core::OutputTree;

use crate::Error;

const SINGLE_FILE_STEM: &str = "tokens";
const ARCHIVE_NAME: &str = "tokens.zip";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Packaging {
    /// Everything in one `tokens.json`
    Single,
    /// One JSON file per collection
    #[default]
    Multiple,
    /// The per-collection files inside `tokens.zip`
    Zip,
}

/// A file ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    pub file_name: String,
    pub contents: Vec<u8>,
}

/// File stem for a collection: non-ASCII letters folded to ASCII,
/// lower-cased, every run of other characters replaced by a single `-`.
pub fn file_stem(collection_name: &str) -> String {
    slugify(collection_name)
}

/// Splits `tree` into files. `selected` marks a tree narrowed to one
/// collection, whose single file is then named after it.
pub fn package(tree: &OutputTree, packaging: Packaging, selected: bool) -> Result<Vec<Artifact>, Error> {
    match packaging {
        Packaging::Single => {
            let stem = match tree.iter().next() {
                Some((key, collection)) if selected => stem_for(key, &collection.name),
                _ => SINGLE_FILE_STEM.to_string(),
            };
            Ok(vec![json_artifact(stem, tree)?])
        }
        Packaging::Multiple => per_collection(tree),
        Packaging::Zip => {
            let files = per_collection(tree)?;
            Ok(vec![Artifact {
                file_name: ARCHIVE_NAME.to_string(),
                contents: archive(&files)?,
            }])
        }
    }
}

/// Writes `artifacts` into `directory`, creating it when needed.
pub fn write_artifacts(directory: &Path, artifacts: &[Artifact]) -> Result<Vec<PathBuf>, Error> {
    fs::create_dir_all(directory)?;
    artifacts
        .iter()
        .map(|artifact| {
            let path = directory.join(&artifact.file_name);
            fs::write(&path, &artifact.contents)?;
            debug!(path = path.display().to_string(), bytes = artifact.contents.len(); "Wrote file");
            Ok(path)
        })
        .collect()
}

/// Pretty JSON with a trailing newline.
pub fn to_json(tree: &OutputTree) -> Result<Vec<u8>, Error> {
    let mut contents = serde_json::to_vec_pretty(tree)?;
    contents.push(b'\n');
    Ok(contents)
}

fn per_collection(tree: &OutputTree) -> Result<Vec<Artifact>, Error> {
    tree.iter()
        .filter_map(|(key, collection)| {
            let stem = stem_for(key, &collection.name);
            tree.select(key).map(|subtree| json_artifact(stem, &subtree))
        })
        .collect()
}

fn stem_for(key: &str, name: &str) -> String {
    [file_stem(name), file_stem(key)]
        .into_iter()
        .find(|stem| !stem.is_empty())
        .unwrap_or_else(|| SINGLE_FILE_STEM.to_string())
}

fn json_artifact(stem: String, tree: &OutputTree) -> Result<Artifact, Error> {
    Ok(Artifact {
        file_name: format!("{stem}.json"),
        contents: to_json(tree)?,
    })
}

fn archive(files: &[Artifact]) -> Result<Vec<u8>, Error> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for file in files {
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        writer.start_file(file.file_name.as_str(), options)?;
        writer.write_all(&file.contents)?;
    }
    Ok(writer.finish()?.into_inner())
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use figma_design_tokens_core::{build, Collection, ExportOptions, Mode, RawValue, ValueType, Variable};
    use serde_json::{json, Value};

    use super::*;

    fn tree() -> OutputTree {
        let collections = vec![
            Collection::new("c:1", "Reference Colors", vec![Mode::new("1:0", "Base")]),
            Collection::new("c:2", "Spacing & Sizing", vec![Mode::new("2:0", "Base")]),
        ];
        let variables = vec![
            Variable::new("v:1", "neutral/50", "c:1", ValueType::Color).with_value("1:0", RawValue::color(1.0, 1.0, 1.0)),
            Variable::new("v:2", "small", "c:2", ValueType::Number).with_value("2:0", RawValue::from(json!(4))),
        ];
        build(&collections, &variables, &ExportOptions::default())
    }

    fn parse(artifact: &Artifact) -> Value {
        serde_json::from_slice(&artifact.contents).unwrap()
    }

    #[test]
    fn file_stems() {
        assert_eq!(file_stem("Reference Colors"), "reference-colors");
        assert_eq!(file_stem("Spacing & Sizing"), "spacing-sizing");
        assert_eq!(file_stem("  Brand // Tokens!! "), "brand-tokens");
        assert_eq!(stem_for("", "???"), "tokens");
    }

    #[test]
    fn file_stems_fold_non_ascii_letters() {
        assert_eq!(file_stem("Café Tokens"), "cafe-tokens");
        assert_eq!(file_stem("Größe"), "grosse");
    }

    #[test]
    fn single_file_holds_everything() {
        let files = package(&tree(), Packaging::Single, false).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].file_name, "tokens.json");
        let value = parse(&files[0]);
        assert!(value.get("referenceColors").is_some());
        assert!(value.get("spacingSizing").is_some());
        let text = String::from_utf8(files[0].contents.clone()).unwrap();
        assert!(text.starts_with("{\n  \"referenceColors\": {\n    \"neutral\""));
        assert!(text.ends_with("}\n"));
    }

    #[test]
    fn single_file_of_a_selected_collection_is_named_after_it() {
        let selected = tree().select("Reference Colors").unwrap();
        let files = package(&selected, Packaging::Single, true).unwrap();
        assert_eq!(files[0].file_name, "reference-colors.json");
    }

    #[test]
    fn single_file_of_an_unselected_one_collection_tree_is_tokens_json() {
        let only = tree().select("Reference Colors").unwrap();
        let files = package(&only, Packaging::Single, false).unwrap();
        assert_eq!(files[0].file_name, "tokens.json");
    }

    #[test]
    fn multiple_files_wrap_each_collection() {
        let files = package(&tree(), Packaging::Multiple, false).unwrap();
        let names: Vec<_> = files.iter().map(|f| f.file_name.as_str()).collect();
        assert_eq!(names, ["reference-colors.json", "spacing-sizing.json"]);
        assert_eq!(
            parse(&files[1]),
            json!({"spacingSizing": {"small": {"id": "v:2", "type": "Number", "valuesByMode": {"base": 4}}}})
        );
    }

    #[test]
    fn zip_holds_the_per_collection_files() {
        let files = package(&tree(), Packaging::Zip, false).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].file_name, "tokens.zip");

        let mut archive = zip::ZipArchive::new(Cursor::new(files[0].contents.clone())).unwrap();
        assert_eq!(archive.len(), 2);
        let mut contents = String::new();
        archive
            .by_name("reference-colors.json")
            .unwrap()
            .read_to_string(&mut contents)
            .unwrap();
        let value: Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(value["referenceColors"]["neutral"]["50"]["valuesByMode"]["base"], json!("#ffffff"));
    }

    #[test]
    fn writes_into_new_directories() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested/out");
        let written = write_artifacts(&target, &package(&tree(), Packaging::Multiple, false).unwrap()).unwrap();
        assert_eq!(written.len(), 2);
        assert!(target.join("spacing-sizing.json").is_file());
    }
}
