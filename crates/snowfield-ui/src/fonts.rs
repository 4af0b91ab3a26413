use std::path::Path;
use std::sync::Arc;

use snowfield_core::FontFamily;
use tracing::{debug, warn};

const COMIC_SANS: &str = "comic-sans";

/// Where the system usually keeps Comic Sans MS. It is never bundled.
const COMIC_SANS_PATHS: &[&str] = &[
    "C:\\Windows\\Fonts\\comic.ttf",
    "/System/Library/Fonts/Supplemental/Comic Sans MS.ttf",
    "/Library/Fonts/Comic Sans MS.ttf",
    "/usr/share/fonts/truetype/msttcorefonts/Comic_Sans_MS.ttf",
    "/usr/share/fonts/truetype/msttcorefonts/comic.ttf",
    "/usr/share/fonts/TTF/comic.ttf",
];

/// Installs the page font. Returns the family actually in use: a missing
/// Comic Sans falls back to the default font.
pub fn apply_font(context: &egui::Context, family: FontFamily) -> FontFamily {
    let mut fonts = egui::FontDefinitions::default();
    let family = match family {
        FontFamily::Inter => FontFamily::Inter,
        FontFamily::ComicSans => match load_first(COMIC_SANS_PATHS) {
            Some(bytes) => {
                fonts.font_data.insert(
                    COMIC_SANS.to_owned(),
                    Arc::new(egui::FontData::from_owned(bytes)),
                );
                fonts
                    .families
                    .entry(egui::FontFamily::Proportional)
                    .or_default()
                    .insert(0, COMIC_SANS.to_owned());
                FontFamily::ComicSans
            }
            None => {
                warn!("Comic Sans MS not found on this system; using the default font");
                FontFamily::Inter
            }
        },
    };
    context.set_fonts(fonts);
    family
}

fn load_first(paths: &[&str]) -> Option<Vec<u8>> {
    paths.iter().map(Path::new).find_map(|path| {
        let bytes = std::fs::read(path).ok()?;
        debug!("loaded font {}", path.display());
        Some(bytes)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_font_needs_no_files() {
        let context = egui::Context::default();
        assert_eq!(apply_font(&context, FontFamily::Inter), FontFamily::Inter);
    }

    #[test]
    fn missing_font_files_are_skipped() {
        assert_eq!(load_first(&["/nonexistent/snowfield/font.ttf"]), None);
    }
}
