#![forbid(unsafe_code)]

//! Cast file codec: recorded frame logs as JSONL, gzip or plain.
//!
//! A cast file is newline-delimited JSON. The first line is a `cast_header`
//! object carrying the schema version and the recorded terminal size; every
//! following line is one `frame` record with a millisecond timestamp and its
//! cell draws. Gzip compression is detected by magic bytes, so `.fvcr` and
//! `.fvcr.gz` both load through the same path.
//!
//! Serialization lives entirely here: the records below mirror the
//! `fvcr-core` types and convert on read, keeping the core crates free of
//! serde. Only reading is public; producing cast files is the recorder's
//! job, not the player's.

use std::io::{self, BufRead, BufReader};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use fvcr_core::cell::{CellContent, Color};
use fvcr_core::frame::{CellDraw, Frame, FrameLog};

/// Current schema version for cast files.
pub const SCHEMA_VERSION: &str = "fvcr-cast-v1";

/// A single record in a cast file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "record")]
enum CastRecord {
    /// Header record (first line).
    #[serde(rename = "cast_header")]
    Header {
        schema_version: String,
        width: u16,
        height: u16,
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },

    /// One recorded frame.
    #[serde(rename = "frame")]
    Frame { at_ms: u64, draws: Vec<SerCellDraw> },
}

/// Serialized form of one cell draw. Field names are kept short because a
/// cast line carries one of these per touched cell.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
struct SerCellDraw {
    i: usize,
    g: char,
    fg: SerColor,
    bg: SerColor,
    #[serde(default, skip_serializing_if = "is_false")]
    m: bool,
}

fn is_false(flag: &bool) -> bool {
    !*flag
}

/// Serialized color.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
enum SerColor {
    #[serde(rename = "d")]
    Default,
    #[serde(rename = "n")]
    Named(u8),
    #[serde(rename = "i")]
    Indexed(u8),
    #[serde(rename = "r")]
    Rgb(u8, u8, u8),
}

impl SerColor {
    fn from_color(color: Color) -> Self {
        match color {
            Color::Default => Self::Default,
            Color::Named(n) => Self::Named(n),
            Color::Indexed(n) => Self::Indexed(n),
            Color::Rgb(r, g, b) => Self::Rgb(r, g, b),
        }
    }

    fn to_color(self) -> Color {
        match self {
            Self::Default => Color::Default,
            Self::Named(n) => Color::Named(n),
            Self::Indexed(n) => Color::Indexed(n),
            Self::Rgb(r, g, b) => Color::Rgb(r, g, b),
        }
    }
}

impl SerCellDraw {
    fn from_draw(draw: &CellDraw) -> Self {
        Self {
            i: draw.index,
            g: draw.content.glyph,
            fg: SerColor::from_color(draw.content.fg),
            bg: SerColor::from_color(draw.content.bg),
            m: draw.content.in_map,
        }
    }

    fn to_draw(self) -> CellDraw {
        CellDraw::new(
            self.i,
            CellContent {
                glyph: self.g,
                fg: self.fg.to_color(),
                bg: self.bg.to_color(),
                in_map: self.m,
            },
        )
    }
}

/// A parsed cast file: recorded terminal size plus the frame log.
#[derive(Debug, Clone)]
pub struct CastFile {
    /// Recorded terminal width in columns.
    pub width: u16,
    /// Recorded terminal height in rows.
    pub height: u16,
    /// Optional recording name from the header.
    pub name: Option<String>,
    /// The frames, in recorded order.
    pub log: FrameLog,
}

/// Reads cast files (gzip or plain JSONL).
pub struct CastReader;

impl CastReader {
    /// Open and parse a cast file.
    ///
    /// Detects gzip compression automatically by the magic bytes
    /// (0x1f, 0x8b).
    pub fn open(path: impl AsRef<Path>) -> io::Result<CastFile> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        let cast = Self::from_bytes(&data)?;
        info!(
            path = %path.display(),
            frames = cast.log.len(),
            width = cast.width,
            height = cast.height,
            "cast loaded"
        );
        Ok(cast)
    }

    /// Parse a cast from raw bytes.
    pub fn from_bytes(data: &[u8]) -> io::Result<CastFile> {
        let decompressed;
        let text = if data.len() >= 2 && data[0] == 0x1f && data[1] == 0x8b {
            use flate2::read::GzDecoder;
            let mut decoder = GzDecoder::new(data);
            let mut buf = Vec::new();
            io::Read::read_to_end(&mut decoder, &mut buf)?;
            decompressed = buf;
            decompressed.as_slice()
        } else {
            data
        };

        let mut lines = BufReader::new(text).lines();
        let header_line = lines
            .next()
            .transpose()?
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidData, "empty cast file"))?;
        let header: CastRecord =
            serde_json::from_str(&header_line).map_err(io::Error::other)?;
        let CastRecord::Header {
            schema_version,
            width,
            height,
            name,
        } = header
        else {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "cast file does not start with a cast_header record",
            ));
        };
        if schema_version != SCHEMA_VERSION {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("unsupported cast schema version: {schema_version}"),
            ));
        }

        let mut frames = Vec::new();
        for line in lines {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let record: CastRecord = serde_json::from_str(&line).map_err(io::Error::other)?;
            match record {
                CastRecord::Frame { at_ms, draws } => frames.push(Frame::with_draws(
                    std::time::Duration::from_millis(at_ms),
                    draws.into_iter().map(SerCellDraw::to_draw).collect(),
                )),
                CastRecord::Header { .. } => {
                    return Err(io::Error::new(
                        io::ErrorKind::InvalidData,
                        "duplicate cast_header record",
                    ));
                }
            }
        }

        Ok(CastFile {
            width,
            height,
            name,
            log: FrameLog::new(frames),
        })
    }
}
