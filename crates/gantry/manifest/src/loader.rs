//! Loads manifest documents from a multi-document YAML stream.

use std::path::Path;
use std::{fs, io};

use serde::Deserialize;
use tracing::trace;

use crate::error::ManifestError;
use crate::types::{Manifest, ManifestKind};

/// Reads `path` and returns every manifest document whose `type` matches
/// `kind`, in file order.
///
/// Callers may concatenate manifests of different types in one file;
/// non-matching documents are dropped without error. A malformed document is
/// fatal for the whole load.
pub fn load_manifests<P: AsRef<Path>>(
    path: P,
    kind: ManifestKind,
) -> Result<Vec<Manifest>, ManifestError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => ManifestError::NotFound { path: path.to_path_buf() },
        _ => ManifestError::Io(err),
    })?;

    let mut manifests = Vec::new();
    for document in serde_yaml::Deserializer::from_str(&content) {
        let value = serde_yaml::Value::deserialize(document)
            .map_err(|source| ManifestError::Parse { path: path.to_path_buf(), source })?;
        // An empty document, as left by an empty file or a trailing `---`
        // separator, is a clean end of stream rather than a malformed
        // manifest.
        if value.is_null() {
            continue;
        }
        let manifest: Manifest = serde_yaml::from_value(value)
            .map_err(|source| ManifestError::Parse { path: path.to_path_buf(), source })?;
        if manifest.kind == kind {
            manifests.push(manifest);
        }
    }

    trace!(path = %path.display(), %kind, count = manifests.len(), "Manifests loaded.");
    Ok(manifests)
}
