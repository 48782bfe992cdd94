//! Content digests for the generated bundles.
//!
//! `digest.json` records the package version and the MD5 of every `.js` and
//! `.map` file in the output folder. It is a fingerprint, not a security
//! measure.

use md5::{Digest, Md5};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::error::{BuildError, Result};

/// File name of the digest, written to the project root.
pub const DIGEST_FILENAME: &str = "digest.json";

const DIGEST_EXTENSIONS: [&str; 2] = ["js", "map"];

/// Sorted label -> value map persisted as `digest.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DigestPayload(BTreeMap<String, String>);

impl DigestPayload {
    /// Start a payload with the `name -> version` entry.
    pub fn new(name: &str, version: &str) -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(name.to_string(), version.to_string());
        Self(entries)
    }

    /// Record the digest of one output file.
    pub fn add_file(&mut self, filename: &str, hexdigest: String) {
        self.0.insert(format!("MD5 ({})", filename), hexdigest);
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Render with sorted keys, 4-space indent and compact `:` separators.
    pub fn render(&self) -> Result<String> {
        let mut buf = Vec::new();
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, DigestFormatter::default());
        self.serialize(&mut ser)
            .map_err(|e| BuildError::io(DIGEST_FILENAME, e.into()))?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

/// MD5 hex digest of a file's content.
pub fn compute_md5(path: &Path) -> Result<String> {
    let content = fs::read(path).map_err(|e| BuildError::io(path, e))?;
    Ok(format!("{:x}", Md5::digest(&content)))
}

/// Files in `dir` (non-recursive) that get a digest entry, sorted by name.
///
/// Symlinks count when they point at a regular file.
pub fn bundle_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).follow_links(true) {
        let entry = entry.map_err(|e| BuildError::io(dir, e.into()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let matches = entry
            .path()
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| DIGEST_EXTENSIONS.contains(&ext));
        if matches {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

/// Build the payload for every bundle file in `output_dir`.
pub fn compute_digest(name: &str, version: &str, output_dir: &Path) -> Result<DigestPayload> {
    let files = bundle_files(output_dir)?;
    info!("bundles in {}: {}", output_dir.display(), files.len());

    let mut payload = DigestPayload::new(name, version);
    for file in &files {
        let filename = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let hexdigest = compute_md5(file)?;
        debug!("{} => {}", filename, hexdigest);
        payload.add_file(&filename, hexdigest);
    }
    Ok(payload)
}

/// Compute the digest and write it to `root_dir/digest.json`, replacing any
/// previous file.
pub fn write_digest(
    name: &str,
    version: &str,
    output_dir: &Path,
    root_dir: &Path,
) -> Result<DigestPayload> {
    let payload = compute_digest(name, version, output_dir)?;
    let rendered = payload.render()?;

    let path = root_dir.join(DIGEST_FILENAME);
    fs::write(&path, &rendered).map_err(|e| BuildError::io(&path, e))?;
    info!("bundle digest in {}:\n{}", DIGEST_FILENAME, rendered);

    Ok(payload)
}

/// Pretty printer for flat objects with `","` / `":"` separators.
///
/// Non-ASCII characters in strings are written as `\uXXXX` escapes.
#[derive(Default)]
struct DigestFormatter {
    indent: usize,
    has_value: bool,
}

impl DigestFormatter {
    fn write_indent<W: ?Sized + io::Write>(&self, writer: &mut W) -> io::Result<()> {
        for _ in 0..self.indent {
            writer.write_all(b"    ")?;
        }
        Ok(())
    }
}

impl serde_json::ser::Formatter for DigestFormatter {
    fn begin_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.indent += 1;
        self.has_value = false;
        writer.write_all(b"{")
    }

    fn end_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.indent -= 1;
        if self.has_value {
            writer.write_all(b"\n")?;
            self.write_indent(writer)?;
        }
        writer.write_all(b"}")
    }

    fn begin_object_key<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        let separator: &[u8] = if first { b"\n" } else { b",\n" };
        writer.write_all(separator)?;
        self.write_indent(writer)
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b":")
    }

    fn end_object_value<W: ?Sized + io::Write>(&mut self, _writer: &mut W) -> io::Result<()> {
        self.has_value = true;
        Ok(())
    }

    fn write_string_fragment<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        fragment: &str,
    ) -> io::Result<()> {
        let mut start = 0;
        for (index, ch) in fragment.char_indices() {
            if ch.is_ascii() {
                continue;
            }
            writer.write_all(fragment[start..index].as_bytes())?;
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{:04x}", unit)?;
            }
            start = index + ch.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }
}
