// bases/tapeshelf/src/config.rs
use album_metadata::ResolverOptions;
use audio_primitives::{Bitrate, BitrateSelector, Format, FormatBitrateMatrix, FormatSelector};
use clap::{ArgGroup, Parser};
use dir_catalog::DirType;
use external_tools::ToolSet;
use std::path::PathBuf;
use thiserror::Error;

/// The one operation a run performs on every matching directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Compress,
    Verify,
    Decompress,
    Join,
    ConvertToWav,
    ConvertBitrate,
    Delete,
    CreateCuesheet,
}

impl Mode {
    pub fn name(&self) -> &'static str {
        match self {
            Mode::Compress => "compress",
            Mode::Verify => "verify",
            Mode::Decompress => "decompress",
            Mode::Join => "join",
            Mode::ConvertToWav => "convert-to-wav",
            Mode::ConvertBitrate => "convert-bitrate",
            Mode::Delete => "delete",
            Mode::CreateCuesheet => "create-cuesheet",
        }
    }

    /// Directory types this mode works on; everything else is passed over
    pub fn accepts(&self, dir_type: DirType) -> bool {
        match self {
            Mode::Compress | Mode::Delete => {
                matches!(dir_type, DirType::RawAudio | DirType::TrackedAudio)
            }
            Mode::Verify | Mode::Decompress => dir_type == DirType::CompressedAudio,
            Mode::Join | Mode::ConvertBitrate | Mode::CreateCuesheet => {
                dir_type == DirType::TrackedAudio
            }
            Mode::ConvertToWav => dir_type == DirType::RawAudio,
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("no mode selected, pick one of --compress, --verify, --decompress, --join, --convert-to-wav, --convert-bitrate, --delete, --create-cuesheet")]
    NoMode,

    #[error("no format selected, use --format or --all-formats")]
    NoFormat,

    #[error("no bitrate selected, use --bitrate, --all-bitrates or --raw")]
    NoBitrate,

    #[error("--convert-bitrate needs --target-bitrate")]
    MissingTargetBitrate,

    #[error("--target-bitrate cannot be Raw")]
    RawTargetBitrate,

    #[error("root directory {0} does not exist")]
    MissingRoot(PathBuf),

    #[error("tool override {0:?} is not of the form PROGRAM=PATH")]
    BadToolOverride(String),
}

/// Catalog and process a tree of live and studio recordings
#[derive(Parser, Debug, Clone, Default)]
#[command(author, version, about, long_about = None)]
#[command(group(
    ArgGroup::new("mode")
        .args(["compress", "verify", "decompress", "join", "convert_to_wav", "convert_bitrate", "delete", "create_cuesheet"])
))]
pub struct CliArgs {
    /// Directory to start the walk from
    pub root: PathBuf,

    /// Encode WAV directories into the selected compressed formats
    #[arg(long)]
    pub compress: bool,

    /// Test compressed directories and compare their checksums
    #[arg(long)]
    pub verify: bool,

    /// Decode compressed directories back to WAV
    #[arg(long)]
    pub decompress: bool,

    /// Join tracked WAVs into one file with a cuesheet
    #[arg(long)]
    pub join: bool,

    /// Decode compressed captures in Raw directories to WAV
    #[arg(long)]
    pub convert_to_wav: bool,

    /// Resample tracked WAVs to --target-bitrate
    #[arg(long)]
    pub convert_bitrate: bool,

    /// Delete WAV directories that have a complete compressed backup
    #[arg(long)]
    pub delete: bool,

    /// Write a cuesheet for tracked WAV directories
    #[arg(long)]
    pub create_cuesheet: bool,

    /// Format to operate on (flac, shn, wv, mp3, wav); may be repeated
    #[arg(short, long = "format")]
    pub formats: Vec<Format>,

    /// Operate on every format
    #[arg(long)]
    pub all_formats: bool,

    /// Bitrate to operate on (e.g. 16-44); may be repeated
    #[arg(short, long = "bitrate")]
    pub bitrates: Vec<Bitrate>,

    /// Operate on every bitrate except Raw
    #[arg(long)]
    pub all_bitrates: bool,

    /// Operate on Raw capture directories
    #[arg(long)]
    pub raw: bool,

    /// Bitrate written by --convert-bitrate
    #[arg(long)]
    pub target_bitrate: Option<Bitrate>,

    /// Replace existing output files instead of skipping them
    #[arg(long)]
    pub overwrite: bool,

    /// Ignore info sheets (*.txt)
    #[arg(long)]
    pub no_info_sheet: bool,

    /// Ignore cuesheets (*.cue)
    #[arg(long)]
    pub no_cuesheet: bool,

    /// Log directories that would be deleted without deleting them
    #[arg(long)]
    pub dry_run: bool,

    /// Replace an external program, e.g. --tool flac=/opt/flac/bin/flac
    #[arg(long = "tool", value_name = "PROGRAM=PATH")]
    pub tools: Vec<String>,

    /// Debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Everything a run needs, fixed before the walk starts
#[derive(Debug, Clone)]
pub struct Config {
    pub root: PathBuf,
    pub mode: Mode,
    pub matrix: FormatBitrateMatrix,
    pub target_bitrate: Option<Bitrate>,
    pub overwrite: bool,
    pub dry_run: bool,
    pub resolver: ResolverOptions,
    pub tools: ToolSet,
}

impl CliArgs {
    fn mode(&self) -> Option<Mode> {
        [
            (self.compress, Mode::Compress),
            (self.verify, Mode::Verify),
            (self.decompress, Mode::Decompress),
            (self.join, Mode::Join),
            (self.convert_to_wav, Mode::ConvertToWav),
            (self.convert_bitrate, Mode::ConvertBitrate),
            (self.delete, Mode::Delete),
            (self.create_cuesheet, Mode::CreateCuesheet),
        ]
        .into_iter()
        .find_map(|(chosen, mode)| chosen.then_some(mode))
    }
}

impl Config {
    /// Validate CLI arguments into a run configuration
    pub fn from_args(args: CliArgs) -> Result<Self, ConfigError> {
        let mode = args.mode().ok_or(ConfigError::NoMode)?;

        let formats: Vec<FormatSelector> = if args.all_formats {
            vec![FormatSelector::All]
        } else {
            args.formats.iter().copied().map(Into::into).collect()
        };
        if formats.is_empty() {
            return Err(ConfigError::NoFormat);
        }

        let mut bitrates: Vec<BitrateSelector> = if args.all_bitrates {
            vec![BitrateSelector::All]
        } else {
            args.bitrates.iter().copied().map(Into::into).collect()
        };
        if args.raw {
            bitrates.push(Bitrate::Raw.into());
        }
        if bitrates.is_empty() {
            return Err(ConfigError::NoBitrate);
        }

        let mut matrix = FormatBitrateMatrix::new();
        for format in &formats {
            for bitrate in &bitrates {
                matrix.set(*format, *bitrate);
            }
        }

        if mode == Mode::ConvertBitrate {
            match args.target_bitrate {
                None => return Err(ConfigError::MissingTargetBitrate),
                Some(Bitrate::Raw) => return Err(ConfigError::RawTargetBitrate),
                Some(_) => {}
            }
        }

        let mut tools = ToolSet::new();
        for spec in &args.tools {
            let (program, path) = spec
                .split_once('=')
                .filter(|(program, path)| !program.is_empty() && !path.is_empty())
                .ok_or_else(|| ConfigError::BadToolOverride(spec.clone()))?;
            tools = tools.with_override(program, path);
        }

        if !args.root.is_dir() {
            return Err(ConfigError::MissingRoot(args.root));
        }

        Ok(Self {
            root: args.root,
            mode,
            matrix,
            target_bitrate: args.target_bitrate,
            overwrite: args.overwrite,
            dry_run: args.dry_run,
            resolver: ResolverOptions {
                use_info_sheet: !args.no_info_sheet,
                use_cuesheet: !args.no_cuesheet,
            },
            tools,
        })
    }

    /// Programs this run may start, for checking before the walk
    pub fn required_programs(&self) -> Vec<String> {
        let selected = |format: Format| self.matrix.is_set(format, BitrateSelector::Any)
            || self.matrix.is_set(format, Bitrate::Raw);

        let mut programs = vec![self.tools.program("mediainfo")];
        match self.mode {
            Mode::Compress | Mode::Verify | Mode::Decompress => {
                for format in Format::COMPRESSED.into_iter().filter(|f| selected(*f)) {
                    programs.extend(self.tools.programs_for(format));
                }
            }
            Mode::ConvertToWav => {
                for format in Format::COMPRESSED
                    .into_iter()
                    .filter(|f| self.matrix.is_set(*f, Bitrate::Raw))
                {
                    programs.extend(self.tools.programs_for(format));
                }
            }
            Mode::Join | Mode::ConvertBitrate => programs.push(self.tools.program("sox")),
            Mode::Delete | Mode::CreateCuesheet => {}
        }
        programs.dedup();
        programs
    }
}
