//! Reading and writing schemas and instances on disk.
//!
//! The engine itself only transforms in-memory documents; these helpers
//! are the file-system edge used by the command-line tool.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::info;

use crate::codec::{self, CodecConfig};
use crate::error::AcsetResult;
use crate::interchange::{self, JsonSchemaOptions};
use crate::schema::Schema;
use crate::store::ACSet;

/// File stem of a path, used to name schemas and acsets read from disk.
fn stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Read a schema descriptor, naming the schema after the file.
pub fn read_schema(path: impl AsRef<Path>) -> AcsetResult<Schema> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    interchange::read_descriptor(stem(path), &text)
}

/// Write a schema descriptor.
pub fn write_schema(path: impl AsRef<Path>, schema: &Schema, config: &CodecConfig) -> AcsetResult<()> {
    fs::write(path, interchange::to_descriptor_string(schema, config)?)?;
    Ok(())
}

/// Write the JSON-Schema derived from a schema.
pub fn write_json_schema(
    path: impl AsRef<Path>,
    schema: &Schema,
    options: &JsonSchemaOptions,
    config: &CodecConfig,
) -> AcsetResult<()> {
    let doc = interchange::derive_json_schema(schema, options);
    fs::write(path, config.render(&doc)?)?;
    Ok(())
}

/// Read an instance document, naming the acset after the file.
pub fn read_acset(path: impl AsRef<Path>, schema: impl Into<Arc<Schema>>) -> AcsetResult<ACSet> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    codec::read_json(stem(path), schema, &text)
}

/// Write an instance document.
pub fn write_acset(path: impl AsRef<Path>, acs: &ACSet, config: &CodecConfig) -> AcsetResult<()> {
    fs::write(path, codec::to_json_string(acs, config)?)?;
    Ok(())
}

/// Write a JSON-Schema into `out_dir` for every `*.json` descriptor in
/// `descriptor_dir`, skipping outputs that already exist.
///
/// With a base URI, each JSON-Schema gets `$id = {base_uri}/{file name}`.
/// Returns the paths written, sorted.
pub fn convert_directory(
    descriptor_dir: impl AsRef<Path>,
    out_dir: impl AsRef<Path>,
    base_uri: Option<&str>,
    config: &CodecConfig,
) -> AcsetResult<Vec<PathBuf>> {
    let out_dir = out_dir.as_ref();
    fs::create_dir_all(out_dir)?;

    let mut descriptors = Vec::new();
    for entry in fs::read_dir(descriptor_dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            descriptors.push(path);
        }
    }
    descriptors.sort();

    let mut written = Vec::new();
    for path in descriptors {
        let Some(file_name) = path.file_name() else {
            continue;
        };
        let target = out_dir.join(file_name);
        if target.is_file() {
            continue;
        }

        info!(descriptor = %path.display(), "converting schema descriptor");
        let schema = read_schema(&path)?;
        let mut options = JsonSchemaOptions::new();
        if let Some(base) = base_uri {
            options = options.uri(format!(
                "{}/{}",
                base.trim_end_matches('/'),
                file_name.to_string_lossy()
            ));
        }
        write_json_schema(&target, &schema, &options, config)?;
        written.push(target);
    }
    Ok(written)
}
