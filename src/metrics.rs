use std::collections::HashMap;
use std::path::Path;

use memmap2::Mmap;
use ttf_parser::Face;

use crate::error::Error;

/// Advance widths of the substitute font, in 1000-units per em.
#[derive(Clone, Debug)]
pub struct FontMetrics {
    name: String,
    char_widths_1000: HashMap<char, f32>,
    default_width_1000: f32,
}

/// Latin, Latin-1 and Latin Extended-A/B: enough for the text layers we re-measure.
const MEASURED_RANGE: std::ops::RangeInclusive<u32> = 0x20..=0x24F;

impl FontMetrics {
    /// Read advance widths from a TrueType/OpenType file (first face of a collection).
    pub fn load(path: &Path) -> Result<Self, Error> {
        let file = std::fs::File::open(path).map_err(|e| {
            Error::Io(std::io::Error::new(
                e.kind(),
                format!("{}: {}", e, path.display()),
            ))
        })?;
        let data = unsafe { Mmap::map(&file) }.map_err(Error::Io)?;
        let face = Face::parse(&data[..], 0)
            .map_err(|e| Error::InvalidFont(format!("{}: {e}", path.display())))?;

        let units = face.units_per_em() as f32;
        let mut char_widths_1000 = HashMap::new();
        for ch in MEASURED_RANGE.filter_map(char::from_u32) {
            let w = face
                .glyph_index(ch)
                .and_then(|gid| face.glyph_hor_advance(gid))
                .map(|adv| adv as f32 / units * 1000.0);
            if let Some(w) = w {
                char_widths_1000.insert(ch, w);
            }
        }
        let default_width_1000 = char_widths_1000.get(&'n').copied().unwrap_or(600.0);

        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("font")
            .to_string();
        log::info!(
            "Loaded metrics for {name}: {} glyph widths, {} units/em",
            char_widths_1000.len(),
            face.units_per_em(),
        );

        Ok(FontMetrics {
            name,
            char_widths_1000,
            default_width_1000,
        })
    }

    /// Built-in approximation of OpenDyslexic, noticeably wider than Helvetica.
    pub fn approximate() -> Self {
        let char_widths_1000 = (32u8..=126u8)
            .map(|b| {
                let w = match b {
                    32 => 360.0,                          // space
                    33..=47 => 420.0,                     // punctuation
                    48..=57 => 700.0,                     // digits
                    58..=64 => 420.0,                     // more punctuation
                    73 | 74 => 380.0,                     // I J
                    77 | 87 => 1000.0,                    // M W
                    65..=90 => 800.0,                     // uppercase
                    91..=96 => 420.0,                     // brackets etc.
                    102 | 105 | 106 | 108 | 116 => 380.0, // f i j l t
                    109 | 119 => 1000.0,                  // m w
                    97..=122 => 700.0,                    // lowercase
                    _ => 700.0,
                };
                (b as char, w)
            })
            .collect();
        FontMetrics {
            name: "approximate".to_string(),
            char_widths_1000,
            default_width_1000: 700.0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn char_width_1000(&self, ch: char) -> f32 {
        if ch.is_control() {
            return 0.0;
        }
        self.char_widths_1000
            .get(&ch)
            .copied()
            .unwrap_or(self.default_width_1000)
    }

    pub fn text_width(&self, text: &str, font_size: f32) -> f32 {
        text.chars()
            .map(|ch| self.char_width_1000(ch) * font_size / 1000.0)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approximate_widths_scale_with_font_size() {
        let m = FontMetrics::approximate();
        assert_eq!(m.text_width("", 12.0), 0.0);
        assert!((m.text_width("n", 10.0) - 7.0).abs() < 1e-4);
        assert!((m.text_width("nn", 20.0) - 28.0).abs() < 1e-4);
        assert!(m.text_width("mmm", 12.0) > m.text_width("iii", 12.0));
    }

    #[test]
    fn unknown_chars_use_default_width() {
        let m = FontMetrics::approximate();
        assert_eq!(m.char_width_1000('\u{4e2d}'), 700.0);
        assert_eq!(m.char_width_1000('\n'), 0.0);
    }

    #[test]
    fn load_reports_missing_file() {
        let err = FontMetrics::load(Path::new("/nonexistent/OpenDyslexic.otf")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().contains("OpenDyslexic.otf"));
    }

    #[test]
    fn load_rejects_non_font_data() {
        let path = std::env::temp_dir().join(format!("not-a-font-{}.otf", std::process::id()));
        std::fs::write(&path, b"definitely not a font").unwrap();
        let err = FontMetrics::load(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(matches!(err, Error::InvalidFont(_)));
    }
}
