//! Line-oriented parser for Maya ASCII `.anim` files.
//!
//! Model:
//! - A header of `key value;` lines (`animVersion`, `timeUnit`, `endTime`...).
//! - Channel blocks: `anim <attrPath> <attrName> <bone> ...;` followed by a
//!   fixed `animData {` metadata block and one keyframe per line
//!   (`<frame> <value> <inTangent> <outTangent> ...;`).
//!
//! Frames are 1-based at a fixed 60 fps; keyframe times are
//! `(frame - 1) / 60` seconds.

use crate::channel::{ChannelTable, RawChannel};
use crate::curve::ChannelCurve;
use crate::data::AnimationDocument;
use crate::error::ImportError;

/// Source frame rate. Not configurable per file.
pub const FRAME_RATE: f32 = 60.0;

/// Offset from a channel header to its first keyframe line. The seven lines
/// in between are Maya's `animData {`, `input`, `output`, `weighted`,
/// `preInfinity`, `postInfinity` and `keys {` lines.
pub const KEY_LINE_OFFSET: usize = 8;

const END_TIME_TOKEN: &str = "endTime";
const CHANNEL_TOKEN: &str = "anim";
const VERSION_TOKEN: &str = "animVersion";
const DATA_TOKEN: &str = "animData";
const KEYS_TOKEN: &str = "keys";

/// Convert a 1-based source frame number to seconds.
#[inline]
pub fn frame_to_time(frame: f32) -> f32 {
    (frame - 1.0) / FRAME_RATE
}

#[derive(Clone, Copy)]
struct Line<'t> {
    /// 1-based line number.
    number: usize,
    text: &'t str,
}

fn is_channel_header(line: &str) -> bool {
    line.starts_with(CHANNEL_TOKEN)
        && !line.starts_with(VERSION_TOKEN)
        && !line.starts_with(DATA_TOKEN)
}

fn is_key_line(trimmed: &str) -> bool {
    trimmed.chars().next().is_some_and(|c| c.is_ascii_digit())
}

/// Parses `.anim` text into an [`AnimationDocument`] with raw, unpadded curves.
#[derive(Clone, Copy, Debug)]
pub struct AnimParser<'a> {
    table: &'a ChannelTable,
}

impl<'a> AnimParser<'a> {
    pub fn new(table: &'a ChannelTable) -> Self {
        Self { table }
    }

    /// Parse one file's content. `name` becomes the document name and is used
    /// as the file label in errors.
    pub fn parse(&self, name: &str, text: &str) -> Result<AnimationDocument, ImportError> {
        let lines: Vec<Line<'_>> = text
            .lines()
            .enumerate()
            .map(|(i, text)| Line {
                number: i + 1,
                text,
            })
            .collect();

        let mut doc = AnimationDocument::new(name);
        let mut seen_channel = false;
        let mut idx = 0;
        while idx < lines.len() {
            let line = lines[idx];
            if line.text.starts_with(END_TIME_TOKEN) {
                doc.end_time = parse_end_time(name, line)?;
                if !seen_channel {
                    record_header(&mut doc, line.text);
                }
                idx += 1;
            } else if is_channel_header(line.text) {
                seen_channel = true;
                idx = self.parse_channel(name, &lines, idx, &mut doc)?;
            } else {
                if !seen_channel {
                    record_header(&mut doc, line.text);
                }
                idx += 1;
            }
        }

        log::debug!(
            "parsed '{}': {} bone track(s), end time {}s",
            name,
            doc.tracks.len(),
            doc.end_time
        );
        Ok(doc)
    }

    /// Parse the channel block whose header sits at `lines[start]` and return
    /// the index of the first line after its keyframes.
    fn parse_channel(
        &self,
        file: &str,
        lines: &[Line<'_>],
        start: usize,
        doc: &mut AnimationDocument,
    ) -> Result<usize, ImportError> {
        let header = lines[start];
        let (channel, bone) = self.parse_header(file, header)?;

        let available = lines.len() - start - 1;
        if available < KEY_LINE_OFFSET {
            return Err(ImportError::TruncatedMetadata {
                file: file.to_string(),
                line: header.number,
                bone: bone.to_string(),
                found: available,
                expected: KEY_LINE_OFFSET,
            });
        }
        check_metadata_block(file, &lines[start + 1..start + KEY_LINE_OFFSET])?;

        let mut curve = ChannelCurve::new();
        let mut idx = start + KEY_LINE_OFFSET;
        while let Some(line) = lines.get(idx) {
            let trimmed = line.text.trim();
            if !is_key_line(trimmed) {
                break;
            }
            let (time, mut value) = parse_key(file, Line { text: trimmed, ..*line })?;
            // Sign flip on the X translation axis only; the rotation
            // handedness change happens in `convert`.
            if channel == RawChannel::PosX {
                value = -value;
            }
            curve.add_keyframe(time, value);
            idx += 1;
        }

        log::debug!(
            "'{}' line {}: bone '{}' {:?} with {} key(s)",
            file,
            header.number,
            bone,
            channel,
            curve.len()
        );
        doc.track_mut(bone).set_channel(channel, curve);
        Ok(idx)
    }

    fn parse_header<'t>(
        &self,
        file: &str,
        header: Line<'t>,
    ) -> Result<(RawChannel, &'t str), ImportError> {
        let fields: Vec<&str> = header.text.split_whitespace().collect();
        if fields.len() < 4 {
            return Err(ImportError::format(
                file,
                header.number,
                format!(
                    "channel header needs 'anim <attribute> <attribute> <bone>', got '{}'",
                    header.text.trim()
                ),
            ));
        }
        let attr_name = fields[2].trim_end_matches(';');
        let attr_leaf = fields[1].rsplit('.').next().unwrap_or(fields[1]);
        let channel = self
            .table
            .resolve(attr_name)
            .or_else(|| self.table.resolve(attr_leaf))
            .ok_or_else(|| ImportError::UnknownChannel {
                file: file.to_string(),
                line: header.number,
                channel: attr_name.to_string(),
            })?;
        let bone = fields[3].trim_end_matches(';');
        if bone.is_empty() {
            return Err(ImportError::format(
                file,
                header.number,
                "channel header has an empty bone name",
            ));
        }
        Ok((channel, bone))
    }
}

fn parse_end_time(file: &str, line: Line<'_>) -> Result<f32, ImportError> {
    let trimmed = line.text.trim().trim_end_matches(';');
    let frame = trimmed
        .split_whitespace()
        .nth(1)
        .ok_or_else(|| ImportError::format(file, line.number, "endTime line has no frame value"))?;
    let frame = parse_number(file, line.number, frame, "endTime")?;
    Ok(frame_to_time(frame))
}

fn parse_key(file: &str, line: Line<'_>) -> Result<(f32, f32), ImportError> {
    let mut fields = line.text.split_whitespace();
    let frame = fields
        .next()
        .ok_or_else(|| ImportError::format(file, line.number, "empty keyframe line"))?;
    let value = fields.next().ok_or_else(|| {
        ImportError::format(
            file,
            line.number,
            format!("keyframe '{}' has no value", line.text),
        )
    })?;
    let frame = parse_number(file, line.number, frame, "keyframe frame")?;
    let value = parse_number(file, line.number, value, "keyframe value")?;
    Ok((frame_to_time(frame), value))
}

fn parse_number(file: &str, line: usize, field: &str, what: &str) -> Result<f32, ImportError> {
    let field = field.trim_end_matches(';');
    field
        .parse::<f32>()
        .map_err(|e| ImportError::format(file, line, format!("{what} '{field}' is not a number: {e}")))
}

fn check_metadata_block(file: &str, block: &[Line<'_>]) -> Result<(), ImportError> {
    let (first, last) = match (block.first(), block.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Ok(()),
    };
    if !first.text.trim_start().starts_with(DATA_TOKEN) {
        return Err(ImportError::format(
            file,
            first.number,
            format!("expected '{DATA_TOKEN} {{' after channel header, got '{}'", first.text.trim()),
        ));
    }
    if !last.text.trim_start().starts_with(KEYS_TOKEN) {
        return Err(ImportError::format(
            file,
            last.number,
            format!("expected '{KEYS_TOKEN} {{' before keyframes, got '{}'", last.text.trim()),
        ));
    }
    Ok(())
}

fn record_header(doc: &mut AnimationDocument, line: &str) {
    let trimmed = line.trim().trim_end_matches(';');
    if let Some((key, value)) = trimmed.split_once(char::is_whitespace) {
        doc.header
            .insert(key.to_string(), value.trim().to_string());
    }
}
