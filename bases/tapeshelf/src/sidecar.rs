// bases/tapeshelf/src/sidecar.rs
//! Checksum manifests, playlists, fingerprints and verify reports written
//! next to audio files.

use crate::error::{Result, ShelfError};
use dir_catalog::TrackList;
use sha2::{Digest, Sha256};
use std::fmt::{self, Write};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

pub const CHECKSUM_EXTENSION: &str = "sha256";
pub const PLAYLIST_EXTENSION: &str = "m3u";
pub const FINGERPRINT_EXTENSION: &str = "ffp";
pub const REPORT_EXTENSION: &str = "verify.log";

/// `<dir>/<dir name>.<extension>`
pub fn sidecar_path(dir: &Path, extension: &str) -> PathBuf {
    let name = file_name(dir);
    dir.join(format!("{}.{}", name, extension))
}

pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// SHA-256 of a file's contents as lowercase hex
pub fn sha256_file(path: &Path) -> Result<String> {
    let file = File::open(path).map_err(|e| ShelfError::io("open", path, e))?;
    let mut reader = BufReader::new(file);
    let mut hasher = Sha256::new();

    let mut buffer = [0u8; 8192];
    loop {
        let bytes_read = reader
            .read(&mut buffer)
            .map_err(|e| ShelfError::io("read", path, e))?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(hex::encode(hasher.finalize()))
}

/// One line of a `sha256sum`-style manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    pub digest: String,
    pub file_name: String,
}

/// Manifest over `files`, readable by `sha256sum -c`
pub fn checksum_manifest(files: &[PathBuf]) -> Result<String> {
    let mut out = String::new();
    for file in files {
        let _ = writeln!(out, "{}  {}", sha256_file(file)?, file_name(file));
    }
    Ok(out)
}

/// Entries of a manifest; lines that are not `<hex> <name>` are ignored
pub fn parse_manifest(text: &str) -> Vec<ManifestEntry> {
    text.lines()
        .filter_map(|line| {
            let (digest, rest) = line.trim_end().split_once(' ')?;
            let name = rest.trim_start_matches([' ', '*']);
            let is_hex = !digest.is_empty() && digest.chars().all(|c| c.is_ascii_hexdigit());
            (is_hex && !name.is_empty()).then(|| ManifestEntry {
                digest: digest.to_ascii_lowercase(),
                file_name: name.to_string(),
            })
        })
        .collect()
}

/// Extended M3U over `files`, labelled from the index-aligned `tracks`
pub fn playlist(files: &[PathBuf], tracks: &TrackList) -> String {
    let mut out = String::from("#EXTM3U\n");
    for (i, file) in files.iter().enumerate() {
        let seconds = tracks
            .durations_ms
            .get(i)
            .and_then(|ms| ms.trim().parse::<u64>().ok())
            .map_or(-1, |ms| (ms / 1000) as i64);
        let artist = tracks.artists.get(i).map(String::as_str).unwrap_or_default();
        let title = tracks.titles.get(i).map(String::as_str).unwrap_or_default();
        let _ = writeln!(out, "#EXTINF:{},{} - {}", seconds, artist, title);
        let _ = writeln!(out, "{}", file_name(file));
    }
    out
}

/// `name:md5` lines as printed by `metaflac --show-md5sum`
pub fn fingerprints(entries: &[(String, String)]) -> String {
    entries
        .iter()
        .map(|(name, md5)| format!("{}:{}\n", name, md5))
        .collect()
}

/// Fingerprint lines back into (name, md5)
pub fn parse_fingerprints(text: &str) -> Vec<(String, String)> {
    text.lines()
        .filter_map(|line| {
            let (name, md5) = line.trim().rsplit_once(':')?;
            Some((name.to_string(), md5.trim().to_ascii_lowercase()))
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    Ok,
    Mismatch,
    /// Listed in a manifest but not on disk
    Missing,
    /// On disk but not listed
    Unlisted,
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CheckStatus::Ok => "OK",
            CheckStatus::Mismatch => "MISMATCH",
            CheckStatus::Missing => "MISSING",
            CheckStatus::Unlisted => "UNLISTED",
        };
        f.write_str(label)
    }
}

/// Outcome of verifying one compressed directory
#[derive(Debug, Clone, Default)]
pub struct VerifyReport {
    pub title: String,
    pub tested: Vec<String>,
    pub checks: Vec<(String, String, CheckStatus)>,
}

impl VerifyReport {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn tested(&mut self, file: &Path) {
        self.tested.push(file_name(file));
    }

    pub fn check(&mut self, kind: &str, file_name: impl Into<String>, status: CheckStatus) {
        self.checks.push((kind.to_string(), file_name.into(), status));
    }

    pub fn failures(&self) -> usize {
        self.checks
            .iter()
            .filter(|(_, _, status)| *status != CheckStatus::Ok)
            .count()
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.title);
        let _ = writeln!(out, "{} files passed the integrity test", self.tested.len());
        for name in &self.tested {
            let _ = writeln!(out, "TESTED {}", name);
        }
        for (kind, name, status) in &self.checks {
            let _ = writeln!(out, "{} {} {}", kind, status, name);
        }
        let _ = writeln!(out, "{} problems", self.failures());
        out
    }
}
