//! What the CLI prints about one image.

use std::fmt::Write;

use debris_flow::{GeoLocation, ImageStats, PredictionResult, SelectedImage, format_probability};
use serde::Serialize;

/// Everything derived locally plus the remote outcome, if requested.
#[derive(Debug, Serialize)]
pub struct Report {
    /// File name as given on the command line.
    pub file: String,
    /// Detected MIME type.
    pub mime: String,
    /// Decoded stats; `None` when the image does not decode.
    pub stats: Option<ImageStats>,
    /// EXIF GPS position.
    pub location: Option<GeoLocation>,
    /// Successful classification.
    pub prediction: Option<PredictionResult>,
    /// User-facing error message of a failed classification.
    pub error: Option<String>,
}

impl Report {
    /// A report with only the file identity filled in.
    #[must_use]
    pub fn new(image: &SelectedImage) -> Self {
        Self {
            file: image.file_name.clone(),
            mime: image.mime.to_string(),
            stats: None,
            location: None,
            prediction: None,
            error: None,
        }
    }

    /// Human-readable rendering, one `Key: value` per line.
    #[must_use]
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{:<15}{} ({})", "File:", self.file, self.mime);
        match &self.stats {
            Some(stats) => {
                let _ = writeln!(out, "{:<15}{}", "Size:", stats.size);
                let _ = writeln!(out, "{:<15}{} px", "Dimensions:", stats.dimensions);
                let _ = writeln!(out, "{:<15}{}", "Pixel count:", stats.pixel_count);
                let _ = writeln!(out, "{:<15}Resized to {}", "Model input:", stats.resized_to);
                let _ = writeln!(out, "{:<15}{}", "Normalization:", stats.normalization);
            }
            None => {
                let _ = writeln!(out, "{:<15}unavailable (image did not decode)", "Details:");
            }
        }
        match &self.location {
            Some(loc) => {
                let _ = writeln!(out, "{:<15}{loc}", "Location:");
            }
            None => {
                let _ = writeln!(out, "{:<15}No location data available", "Location:");
            }
        }
        if let Some(p) = &self.prediction {
            out.push('\n');
            let _ = writeln!(out, "{:<15}{}", "Label:", p.label);
            let _ = writeln!(out, "{:<15}{}", "Probability:", format_probability(p.probability));
            let _ = writeln!(out, "{:<15}{}", "Class:", p.class);
        }
        if let Some(e) = &self.error {
            out.push('\n');
            let _ = writeln!(out, "{:<15}{e}", "Error:");
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use debris_flow::{Dimensions, FileSize, PredictedClass};

    use super::*;

    fn report() -> Report {
        let image = SelectedImage::new(b"\x89PNG\r\n\x1a\n".to_vec(), "orbit.png");
        Report::new(&image)
    }

    #[test]
    fn text_without_stats_or_location() {
        let text = report().render_text();
        assert!(text.starts_with("File:          orbit.png (image/png)\n"), "{text}");
        assert!(text.contains("unavailable (image did not decode)"));
        assert!(text.contains("No location data available"));
        assert!(!text.contains("Label:"));
    }

    #[test]
    fn text_with_everything() {
        let mut r = report();
        r.stats = Some(ImageStats::new(
            FileSize(512_000),
            Dimensions {
                width: 640,
                height: 480,
            },
        ));
        r.location = Some(GeoLocation {
            latitude: -40.446_111,
            longitude: 79.982_222,
        });
        r.prediction = Some(PredictionResult {
            label: "Satellite".into(),
            probability: 0.87,
            class: PredictedClass::Text("debris".into()),
        });
        let text = r.render_text();
        assert!(text.contains("Size:          500.00 KB\n"), "{text}");
        assert!(text.contains("Dimensions:    640 × 480 px\n"), "{text}");
        assert!(text.contains("Pixel count:   307200\n"), "{text}");
        assert!(text.contains("Model input:   Resized to 128 × 128\n"), "{text}");
        assert!(text.contains("Location:      -40.446111, 79.982222\n"), "{text}");
        assert!(text.contains("Probability:   87.00%\n"), "{text}");
        assert!(text.contains("Class:         debris\n"), "{text}");
    }

    #[test]
    fn text_with_error() {
        let mut r = report();
        r.error = Some("file too large".into());
        assert!(r.render_text().contains("Error:         file too large\n"));
    }
}
