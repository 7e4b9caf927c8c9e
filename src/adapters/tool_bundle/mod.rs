//! Bundled tool provisioning
//!
//! The program carries ffmpeg as a gzip payload (see `build.rs`). For each
//! run it is inflated into a fresh temp file, executed from there, and
//! deleted again when the [`ProvisionedTool`] guard is released or dropped.

use std::borrow::Cow;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use tempfile::TempPath;
use tracing::{debug, info, warn};

use crate::error::{TrimmerError, TrimmerResult};

mod generated {
    include!(concat!(env!("OUT_DIR"), "/embedded_assets.rs"));
}

/// Substring identifying the tool payload among the embedded assets
pub const TOOL_MARKER: &str = "ffmpeg";

/// A named, gzip-compressed payload
#[derive(Debug, Clone)]
pub struct EmbeddedAsset {
    pub name: Cow<'static, str>,
    pub bytes: Cow<'static, [u8]>,
}

impl EmbeddedAsset {
    pub fn new(name: impl Into<Cow<'static, str>>, bytes: impl Into<Cow<'static, [u8]>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }
}

/// The set of payloads compiled into the binary
#[derive(Debug, Clone)]
pub struct ToolBundle {
    assets: Vec<EmbeddedAsset>,
    marker: Cow<'static, str>,
}

impl ToolBundle {
    /// Bundle over an explicit asset list, matching on [`TOOL_MARKER`]
    pub fn new(assets: Vec<EmbeddedAsset>) -> Self {
        Self {
            assets,
            marker: Cow::Borrowed(TOOL_MARKER),
        }
    }

    /// Bundle over the payloads embedded at build time
    pub fn embedded() -> Self {
        Self::new(
            generated::EMBEDDED_ASSETS
                .iter()
                .map(|&(name, bytes)| EmbeddedAsset::new(name, bytes))
                .collect(),
        )
    }

    pub fn with_marker(mut self, marker: impl Into<Cow<'static, str>>) -> Self {
        self.marker = marker.into();
        self
    }

    /// The single asset whose name contains the marker
    pub fn locate(&self) -> TrimmerResult<&EmbeddedAsset> {
        let mut matches = self
            .assets
            .iter()
            .filter(|asset| asset.name.contains(self.marker.as_ref()));

        match (matches.next(), matches.next()) {
            (Some(asset), None) => Ok(asset),
            (None, _) => Err(TrimmerError::ToolNotFound {
                message: format!(
                    "no bundled payload matches '{}' (configure tool_path to use an installed ffmpeg)",
                    self.marker
                ),
            }),
            (Some(_), Some(_)) => Err(TrimmerError::AmbiguousTool {
                marker: self.marker.to_string(),
                candidates: self
                    .assets
                    .iter()
                    .filter(|asset| asset.name.contains(self.marker.as_ref()))
                    .map(|asset| asset.name.to_string())
                    .collect(),
            }),
        }
    }

    /// Inflate the tool into `destination`, replacing whatever is there
    pub fn extract(&self, destination: &Path) -> TrimmerResult<()> {
        let asset = self.locate()?;
        debug!(asset = %asset.name, destination = %destination.display(), "extracting tool");

        write_inflated(&asset.bytes, destination).map_err(|source| {
            TrimmerError::ToolExtraction {
                path: destination.to_path_buf(),
                source,
            }
        })
    }

    /// Extract into a new temp file owned by the returned guard
    pub fn provision(&self) -> TrimmerResult<ProvisionedTool> {
        let temp = tempfile::Builder::new()
            .prefix("trimmer-ffmpeg-")
            .suffix(std::env::consts::EXE_SUFFIX)
            .tempfile()?
            .into_temp_path();

        self.extract(&temp)?;
        info!(path = %temp.display(), "tool provisioned");

        Ok(ProvisionedTool {
            path: temp.to_path_buf(),
            temp: Some(temp),
        })
    }
}

fn write_inflated(compressed: &[u8], destination: &Path) -> io::Result<()> {
    let mut decoder = GzDecoder::new(compressed);
    let mut writer = BufWriter::new(File::create(destination)?);
    io::copy(&mut decoder, &mut writer)?;

    let file = writer.into_inner().map_err(|e| e.into_error())?;
    file.sync_all()?;
    drop(file);

    mark_executable(destination)
}

#[cfg(unix)]
fn mark_executable(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
}

#[cfg(not(unix))]
fn mark_executable(_path: &Path) -> io::Result<()> {
    Ok(())
}

/// The tool binary used for one run
///
/// An extracted tool is deleted on [`ProvisionedTool::release`] or, failing
/// that, on drop. A tool supplied through configuration is never touched.
#[derive(Debug)]
pub struct ProvisionedTool {
    path: PathBuf,
    temp: Option<TempPath>,
}

impl ProvisionedTool {
    /// Use an already installed binary
    pub fn external(path: impl Into<PathBuf>) -> TrimmerResult<Self> {
        let path = path.into();
        if !path.is_file() {
            return Err(TrimmerError::ToolNotFound {
                message: format!("configured tool {} does not exist", path.display()),
            });
        }
        Ok(Self { path, temp: None })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the binary is removed when this guard goes away
    pub fn is_temporary(&self) -> bool {
        self.temp.is_some()
    }

    /// Delete an extracted tool, reporting failures instead of ignoring them
    pub fn release(mut self) -> io::Result<()> {
        match self.temp.take() {
            Some(temp) => {
                temp.close()?;
                debug!(path = %self.path.display(), "tool removed");
                Ok(())
            }
            None => Ok(()),
        }
    }
}

impl Drop for ProvisionedTool {
    fn drop(&mut self) {
        if let Some(temp) = self.temp.take() {
            if let Err(e) = temp.close() {
                warn!(path = %self.path.display(), error = %e, "failed to remove tool");
            }
        }
    }
}
