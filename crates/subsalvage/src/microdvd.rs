//! MicroDVD (`{start}{end}text`) to SRT conversion.

use once_cell::sync::Lazy;
use regex::Regex;
use subsalvage_archive::extension_of;
use subsalvage_text::is_blank;
use tracing::{debug, warn};

use crate::error::{ExtractError, Result};

static CUE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\{(\d+)\}\{(\d+)\}(.*)$").unwrap());
static CUE_START: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\{\d+\}\{\d+\}").unwrap());

/// Whether the first non-blank line is a MicroDVD cue.
pub fn is_microdvd(text: &str) -> bool {
    text.lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .is_some_and(|line| CUE_START.is_match(line))
}

/// `HH:MM:SS,mmm` for `frame` at `fps`, milliseconds truncated.
///
/// `fps` must be positive; [`convert`] rejects anything else before calling this.
pub fn frame_to_time(frame: u64, fps: f64) -> String {
    // Float-to-int casts saturate, so out-of-range values cannot wrap.
    let millis = (frame as f64 * 1000.0 / fps).floor() as u64;
    format!(
        "{:02}:{:02}:{:02},{:03}",
        millis / 3_600_000,
        millis / 60_000 % 60,
        millis / 1000 % 60,
        millis % 1000
    )
}

/// Convert every cue line in `text` into a numbered SRT block.
///
/// Lines that are not cues are skipped. A leading `{1}{1}<fps>` (or `{0}{0}`)
/// block declares the frame rate and is not emitted. `|` separates lines.
pub fn convert(text: &str, fps: f64) -> Result<String> {
    let mut fps = checked_rate(fps).ok_or_else(|| {
        ExtractError::MalformedConversionInput(format!("invalid frame rate {fps}"))
    })?;
    let mut out = String::new();
    let mut index = 0usize;

    for (line_no, line) in text.lines().enumerate() {
        let Some(caps) = CUE.captures(line.trim()) else {
            continue;
        };
        let start = parse_frame(&caps[1], line_no)?;
        let end = parse_frame(&caps[2], line_no)?;
        let body = caps[3].trim();

        if index == 0 && start == end && start <= 1 {
            if let Some(declared) = body.parse().ok().and_then(checked_rate) {
                debug!(fps = declared, "MicroDVD frame rate header");
                fps = declared;
                continue;
            }
        }

        index += 1;
        out.push_str(&format!(
            "{index}\n{} --> {}\n{}\n\n",
            frame_to_time(start, fps),
            frame_to_time(end, fps),
            body.replace('|', "\n")
        ));
    }

    Ok(out)
}

/// [`convert`], falling back to the untouched input.
///
/// The flag reports whether conversion produced any blocks.
pub fn convert_or_original(text: &str, fps: f64) -> (String, bool) {
    match convert(text, fps) {
        Ok(srt) if !is_blank(&srt) => (srt, true),
        Ok(_) => (text.to_string(), false),
        Err(e) => {
            warn!(error = %e, "MicroDVD conversion failed, keeping original text");
            (text.to_string(), false)
        }
    }
}

/// `movie.sub` becomes `movie.srt`; other names are returned unchanged.
pub fn srt_filename(name: &str) -> String {
    if extension_of(name).as_deref() == Some("sub") {
        format!("{}.srt", &name[..name.len() - ".sub".len()])
    } else {
        name.to_string()
    }
}

fn checked_rate(fps: f64) -> Option<f64> {
    (fps.is_finite() && fps > 0.0).then_some(fps)
}

fn parse_frame(digits: &str, line_no: usize) -> Result<u64> {
    digits.parse().map_err(|_| {
        ExtractError::MalformedConversionInput(format!(
            "frame number {digits} out of range on line {}",
            line_no + 1
        ))
    })
}
