// src/score.rs
//! Derived display values for percentage-bearing match fields.
//!
//! The backend encodes percentages inside free text ("78% Match", "N/A"),
//! so every render site goes through the same extraction and banding here.

/// Four-tier color band used everywhere a percentage is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorBand {
    Success,
    Amber,
    Orange,
    Error,
}

impl ColorBand {
    /// ANSI-friendly label for CLI output.
    pub fn label(&self) -> &'static str {
        match self {
            ColorBand::Success => "success",
            ColorBand::Amber => "amber",
            ColorBand::Orange => "orange",
            ColorBand::Error => "error",
        }
    }
}

/// Extract the first maximal run of decimal digits from `s` as an integer.
/// Fails open to 0 when no digit is present ("N/A", empty string); a run
/// too long for u32 saturates instead of collapsing to 0.
pub fn extract_percentage(s: &str) -> u32 {
    let digits: String = s
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();

    match digits.parse() {
        Ok(value) => value,
        Err(_) if digits.is_empty() => 0,
        Err(_) => u32::MAX,
    }
}

/// Map a percentage to its color band: [80,100] success, [60,79] amber,
/// [40,59] orange, [0,39] error.
pub fn color_band(percentage: u32) -> ColorBand {
    match percentage {
        80.. => ColorBand::Success,
        60..=79 => ColorBand::Amber,
        40..=59 => ColorBand::Orange,
        _ => ColorBand::Error,
    }
}

/// Convenience for fields straight off the wire.
pub fn band_for_field(field: &str) -> ColorBand {
    color_band(extract_percentage(field))
}
