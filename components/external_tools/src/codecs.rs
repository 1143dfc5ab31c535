// components/external_tools/src/codecs.rs
use crate::ToolCommand;
use audio_primitives::{Bitrate, Format};
use std::collections::HashMap;
use std::path::Path;

/// Tags written into encoded files
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackTags {
    pub artist: String,
    pub album: String,
    pub title: String,
    pub track_number: usize,
    /// `yyyy-mm-dd`
    pub date: Option<String>,
}

/// Builds the command line for every external job.
///
/// Programs are addressed by their usual names; an override maps such a name
/// to another executable (e.g. `flac` to `/opt/flac-1.4/bin/flac`).
#[derive(Debug, Clone, Default)]
pub struct ToolSet {
    overrides: HashMap<String, String>,
}

impl ToolSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_override(mut self, program: impl Into<String>, replacement: impl Into<String>) -> Self {
        self.overrides.insert(program.into(), replacement.into());
        self
    }

    /// Executable to run for the conventional program `name`
    pub fn program(&self, name: &str) -> String {
        self.overrides
            .get(name)
            .cloned()
            .unwrap_or_else(|| name.to_string())
    }

    fn command(&self, name: &str) -> ToolCommand {
        ToolCommand::new(self.program(name))
    }

    /// Programs a format needs for encode, decode and test
    pub fn programs_for(&self, format: Format) -> Vec<String> {
        let names: &[&str] = match format {
            Format::Flac => &["flac", "metaflac"],
            Format::Shn => &["shorten", "shntool"],
            Format::WavPack => &["wavpack", "wvunpack"],
            Format::Mp3 => &["lame", "mpg123"],
            Format::Wav => &["sox"],
        };
        names.iter().map(|name| self.program(name)).collect()
    }

    pub fn encode(&self, format: Format, input: &Path, output: &Path, tags: &TrackTags) -> ToolCommand {
        match format {
            Format::Flac => {
                let mut command = self
                    .command("flac")
                    .args(["--silent", "--best", "-f"])
                    .arg("-T")
                    .arg(format!("ARTIST={}", tags.artist))
                    .arg("-T")
                    .arg(format!("ALBUM={}", tags.album))
                    .arg("-T")
                    .arg(format!("TITLE={}", tags.title))
                    .arg("-T")
                    .arg(format!("TRACKNUMBER={}", tags.track_number));
                if let Some(date) = &tags.date {
                    command = command.arg("-T").arg(format!("DATE={}", date));
                }
                command.arg("-o").arg(output).arg(input)
            }
            Format::Shn => self.command("shorten").arg(input).arg(output),
            Format::WavPack => self
                .command("wavpack")
                .args(["-q", "-hh", "-y"])
                .arg(input)
                .arg("-o")
                .arg(output),
            Format::Mp3 => {
                let mut command = self
                    .command("lame")
                    .args(["--quiet", "-V0"])
                    .arg("--tt")
                    .arg(&tags.title)
                    .arg("--ta")
                    .arg(&tags.artist)
                    .arg("--tl")
                    .arg(&tags.album)
                    .arg("--tn")
                    .arg(tags.track_number.to_string());
                if let Some(year) = tags.date.as_deref().and_then(|d| d.get(..4)) {
                    command = command.args(["--ty", year]);
                }
                command.arg(input).arg(output)
            }
            Format::Wav => self.command("sox").arg(input).arg(output),
        }
    }

    pub fn decode(&self, format: Format, input: &Path, output: &Path) -> ToolCommand {
        match format {
            Format::Flac => self
                .command("flac")
                .args(["--silent", "-d", "-f", "-o"])
                .arg(output)
                .arg(input),
            Format::Shn => self.command("shorten").arg("-x").arg(input).arg(output),
            Format::WavPack => self
                .command("wvunpack")
                .args(["-q", "-y"])
                .arg(input)
                .arg("-o")
                .arg(output),
            Format::Mp3 => self
                .command("lame")
                .args(["--quiet", "--decode"])
                .arg(input)
                .arg(output),
            Format::Wav => self.command("sox").arg(input).arg(output),
        }
    }

    /// Integrity check of one file; a failing check exits non-zero
    pub fn test(&self, format: Format, input: &Path) -> ToolCommand {
        match format {
            Format::Flac => self.command("flac").args(["--silent", "-t"]).arg(input),
            Format::Shn => self.command("shntool").arg("len").arg(input),
            Format::WavPack => self.command("wvunpack").args(["-q", "-v"]).arg(input),
            Format::Mp3 => self.command("mpg123").args(["-q", "-t"]).arg(input),
            Format::Wav => self.command("sox").arg("--i").arg(input),
        }
    }

    /// Embedded audio checksum, only FLAC carries one
    pub fn fingerprint(&self, format: Format, input: &Path) -> Option<ToolCommand> {
        match format {
            Format::Flac => Some(self.command("metaflac").arg("--show-md5sum").arg(input)),
            _ => None,
        }
    }

    /// Track length in milliseconds on stdout
    pub fn duration(&self, input: &Path) -> ToolCommand {
        self.command("mediainfo")
            .arg("--Inform=Audio;%Duration%")
            .arg(input)
    }

    /// Concatenate WAV tracks, in order, into `output`
    pub fn join(&self, inputs: &[impl AsRef<Path>], output: &Path) -> ToolCommand {
        self.command("sox")
            .args(inputs.iter().map(|p| p.as_ref().as_os_str()))
            .arg(output)
    }

    /// Resample a WAV to `target`; `Raw` has no depth or rate to convert to
    pub fn resample(&self, input: &Path, output: &Path, target: Bitrate) -> Option<ToolCommand> {
        let depth = target.bit_depth()?;
        let rate = target.sample_rate()?;
        Some(
            self.command("sox")
                .arg(input)
                .arg("-b")
                .arg(depth.to_string())
                .arg(output)
                .args(["rate", "-v"])
                .arg(rate.to_string()),
        )
    }
}
