use hashbrown::HashMap;
use plotters::style::RGBColor;

use crate::data_structs::dataset::GroupLabel;
use crate::error::SigboxError;

/// Colours used when no palette is given, cycled by group position.
pub const DEFAULT_CYCLE: [RGBColor; 10] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
    RGBColor(127, 127, 127),
    RGBColor(188, 189, 34),
    RGBColor(23, 190, 207),
];

fn named_color(name: &str) -> Option<RGBColor> {
    let color = match name {
        "black" => RGBColor(0, 0, 0),
        "white" => RGBColor(255, 255, 255),
        "red" => RGBColor(255, 0, 0),
        "green" => RGBColor(0, 128, 0),
        "blue" => RGBColor(0, 0, 255),
        "orange" => RGBColor(255, 165, 0),
        "purple" => RGBColor(128, 0, 128),
        "brown" => RGBColor(165, 42, 42),
        "pink" => RGBColor(255, 192, 203),
        "gray" | "grey" => RGBColor(128, 128, 128),
        "olive" => RGBColor(128, 128, 0),
        "cyan" => RGBColor(0, 255, 255),
        "magenta" => RGBColor(255, 0, 255),
        "yellow" => RGBColor(255, 255, 0),
        "navy" => RGBColor(0, 0, 128),
        "teal" => RGBColor(0, 128, 128),
        "maroon" => RGBColor(128, 0, 0),
        "lime" => RGBColor(0, 255, 0),
        "gold" => RGBColor(255, 215, 0),
        "skyblue" => RGBColor(135, 206, 235),
        "darkblue" => RGBColor(0, 0, 139),
        "darkred" => RGBColor(139, 0, 0),
        "darkgreen" => RGBColor(0, 100, 0),
        "lightblue" => RGBColor(173, 216, 230),
        "lightgreen" => RGBColor(144, 238, 144),
        "salmon" => RGBColor(250, 128, 114),
        "coral" => RGBColor(255, 127, 80),
        "violet" => RGBColor(238, 130, 238),
        _ => {
            let tab = name.strip_prefix("tab:")?;
            let idx = [
                "blue", "orange", "green", "red", "purple", "brown", "pink", "gray",
                "olive", "cyan",
            ]
            .iter()
            .position(|c| *c == tab)?;
            DEFAULT_CYCLE[idx]
        },
    };
    Some(color)
}

/// Parses a colour name (`"blue"`, `"tab:orange"`) or a `#rrggbb` / `#rgb`
/// hex string.
pub fn parse_color(color: &str) -> Result<RGBColor, SigboxError> {
    let invalid = || SigboxError::InvalidColor(color.to_string());
    let trimmed = color.trim().to_lowercase();

    if let Some(hex) = trimmed.strip_prefix('#') {
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let digits = match hex.len() {
            6 => hex.to_string(),
            3 => hex.chars().flat_map(|c| [c, c]).collect(),
            _ => return Err(invalid()),
        };
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());
        return Ok(RGBColor(channel(0)?, channel(2)?, channel(4)?));
    }
    named_color(&trimmed).ok_or_else(invalid)
}

/// Colour of every group, in the order of `labels`.
///
/// An empty palette falls back to [DEFAULT_CYCLE]. Otherwise every label
/// must have an entry.
pub fn resolve_palette(
    palette: &HashMap<String, String>,
    labels: &[GroupLabel],
) -> Result<Vec<RGBColor>, SigboxError> {
    if palette.is_empty() {
        return Ok(labels
            .iter()
            .enumerate()
            .map(|(i, _)| DEFAULT_CYCLE[i % DEFAULT_CYCLE.len()])
            .collect());
    }
    labels
        .iter()
        .map(|label| {
            palette
                .get(label.as_str())
                .ok_or_else(|| SigboxError::MissingPaletteColor(label.to_string()))
                .and_then(|c| parse_color(c))
        })
        .collect()
}
