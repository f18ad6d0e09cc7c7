//! Turns the SVG piece images into data URI entries for the game's image map.

use std::{
    fmt,
    fs,
    io::Write,
    path::Path,
};

use anyhow::{bail, Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine};

use crate::constants::*;

pub fn is_svg_asset(name: &str) -> bool {
    name.contains(SVG_MARKER)
}

/// everything before the first `.`, so `king.svg` is `king`
pub fn asset_label(name: &str) -> Result<&str> {
    match name.split_once('.') {
        Some((label, _)) => Ok(label),
        None => bail!("{:?} has no extension to strip", name),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetEntry {
    pub label: String,
    /// base64 of the file, no line breaks
    pub payload: String,
}

impl AssetEntry {
    pub fn from_bytes(label: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            label: label.into(),
            payload: STANDARD.encode(bytes),
        }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .with_context(|| format!("{} is not a UTF-8 file name", path.display()))?;
        let label = asset_label(name)?;
        let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
        Ok(Self::from_bytes(label, &bytes))
    }

    pub fn data_uri(&self) -> String {
        format!("{}{}", SVG_DATA_URI_PREFIX, self.payload)
    }
}

/// `"label": "data:image/svg+xml;base64,<payload>",`
impl fmt::Display for AssetEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\": \"{}\",", self.label, self.data_uri())
    }
}

/// Writes one entry per SVG file in `dir` to `out`, in whatever order the
/// directory lists them. The first bad entry aborts the run; lines written
/// before it stay written. Returns how many entries were written.
pub fn encode_dir<P: AsRef<Path>, W: Write>(dir: P, out: &mut W) -> Result<usize> {
    let dir = dir.as_ref();
    let mut written = 0;

    for entry in fs::read_dir(dir).with_context(|| format!("failed to list {}", dir.display()))? {
        let entry = entry.with_context(|| format!("failed to list {}", dir.display()))?;
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if !is_svg_asset(&name) {
            debug!("skipping {}", name);
            continue;
        }

        let asset = AssetEntry::from_path(entry.path())?;
        debug!("{} -> {} ({} base64 chars)", name, asset.label, asset.payload.len());
        writeln!(out, "{}", asset)?;
        written += 1;
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::tempdir;

    const KING: &[u8] = b"<svg xmlns=\"http://www.w3.org/2000/svg\"><circle r=\"4\"/></svg>\n";

    fn king_line() -> String {
        format!("\"king\": \"data:image/svg+xml;base64,{}\",", STANDARD.encode(KING))
    }

    #[test]
    fn labels_stop_at_the_first_dot() {
        assert_eq!(asset_label("king.svg").unwrap(), "king");
        assert_eq!(asset_label("white.pawn.svg").unwrap(), "white");
        assert_eq!(asset_label(".svg").unwrap(), "");
        assert!(asset_label("svgfile").is_err());
    }

    #[test]
    fn matches_svg_anywhere_in_the_name() {
        assert!(is_svg_asset("king.svg"));
        assert!(is_svg_asset("svg_notes.txt"));
        assert!(!is_svg_asset("king.png"));
        assert!(!is_svg_asset("king.SVG"));
    }

    #[test]
    fn entry_line_format() {
        let entry = AssetEntry::from_bytes("pawn", b"hello");
        assert_eq!(entry.payload, "aGVsbG8=");
        assert_eq!(entry.to_string(), "\"pawn\": \"data:image/svg+xml;base64,aGVsbG8=\",");
    }

    #[test]
    fn long_payloads_have_no_line_breaks() {
        let entry = AssetEntry::from_bytes("big", &[0xAB; 4096]);
        assert!(!entry.payload.contains('\n'));
        assert!(!entry.payload.contains('\r'));
        assert_eq!(entry.payload.len(), 4096usize.div_ceil(3) * 4);
    }

    #[test]
    fn encodes_king_svg() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("king.svg"), KING).unwrap();
        File::create(dir.path().join("notes.txt")).unwrap();

        let mut out = Vec::new();
        assert_eq!(encode_dir(dir.path(), &mut out).unwrap(), 1);
        assert_eq!(String::from_utf8(out).unwrap(), format!("{}\n", king_line()));
    }

    #[test]
    fn every_svg_gets_a_line() {
        let dir = tempdir().unwrap();
        for name in ["king.svg", "queen.svg", "rook.svg"] {
            fs::write(dir.path().join(name), name).unwrap();
        }

        let mut out = Vec::new();
        assert_eq!(encode_dir(dir.path(), &mut out).unwrap(), 3);
        let out = String::from_utf8(out).unwrap();
        // listing order is up to the filesystem
        let mut labels: Vec<&str> = out
            .lines()
            .map(|l| l.split('"').nth(1).unwrap())
            .collect();
        labels.sort();
        assert_eq!(labels, ["king", "queen", "rook"]);
    }

    #[test]
    fn directory_named_like_an_svg_aborts() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("old.svg")).unwrap();

        let mut out = Vec::new();
        assert!(encode_dir(dir.path(), &mut out).is_err());
    }

    #[test]
    fn name_without_dot_aborts() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("kingsvg"), KING).unwrap();

        let mut out = Vec::new();
        let err = encode_dir(dir.path(), &mut out).unwrap_err();
        assert!(err.to_string().contains("kingsvg"));
        assert!(out.is_empty());
    }

    #[test]
    fn lines_before_a_failure_stay_complete() {
        let dir = tempdir().unwrap();
        for name in ["bishop.svg", "king.svg", "knight.svg", "pawn.svg"] {
            fs::write(dir.path().join(name), KING).unwrap();
        }
        fs::create_dir(dir.path().join("z.svg")).unwrap();

        let mut out = Vec::new();
        let err = encode_dir(dir.path(), &mut out).unwrap_err();
        assert!(format!("{:#}", err).contains("z.svg"));

        // how many got out first depends on listing order
        let out = String::from_utf8(out).unwrap();
        assert!(out.is_empty() || out.ends_with('\n'));
        let payload = STANDARD.encode(KING);
        for line in out.lines() {
            let label = line.split('"').nth(1).unwrap();
            assert!(["bishop", "king", "knight", "pawn"].contains(&label), "{}", line);
            assert_eq!(
                line,
                format!("\"{}\": \"data:image/svg+xml;base64,{}\",", label, payload)
            );
        }
        assert!(out.lines().count() <= 4);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn non_utf8_svg_name_is_reported() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempdir().unwrap();
        fs::write(dir.path().join(OsStr::from_bytes(b"k\xffing.svg")), KING).unwrap();

        let mut out = Vec::new();
        let err = encode_dir(dir.path(), &mut out).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("k\u{fffd}ing.svg"), "{}", msg);
        assert!(msg.contains("not a UTF-8 file name"), "{}", msg);
        assert!(out.is_empty());
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempdir().unwrap();
        let mut out = Vec::new();
        assert!(encode_dir(dir.path().join("nope"), &mut out).is_err());
    }
}
