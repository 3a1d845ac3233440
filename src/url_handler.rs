// src/url_handler.rs
use once_cell::sync::Lazy;
use regex::Regex;

static SPREADSHEET_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/spreadsheets/d/([A-Za-z0-9_-]+)").unwrap());
static SHEET_GID: Lazy<Regex> = Lazy::new(|| Regex::new(r"gid=([0-9]+)").unwrap());

/// Derives the CSV export endpoint from a Google Sheets share URL.
///
/// Share links look like
/// `https://docs.google.com/spreadsheets/d/{ID}/edit#gid={GID}`. URLs that
/// are already export endpoints pass through unchanged. Anything without a
/// spreadsheet id yields an empty string so the caller leaves the CSV field
/// alone for manual editing.
pub fn normalize(raw_url: &str) -> String {
    if raw_url.contains("export?format=csv") {
        return raw_url.to_string();
    }

    let id = match SPREADSHEET_ID
        .captures(raw_url)
        .and_then(|caps| caps.get(1))
    {
        Some(id) => id.as_str(),
        None => return String::new(),
    };

    // The gid names the sheet tab; the first tab is 0.
    let gid = SHEET_GID
        .captures(raw_url)
        .and_then(|caps| caps.get(1))
        .map(|gid| gid.as_str())
        .unwrap_or("0");

    format!(
        "https://docs.google.com/spreadsheets/d/{}/export?format=csv&gid={}",
        id, gid
    )
}

/// The pair of user-facing URL fields: the share URL as typed, and the CSV
/// export URL derived from it. The CSV field stays independently editable;
/// a manual value sticks until a recognizable share URL is entered again.
#[derive(Debug, Clone, Default)]
pub struct SheetSource {
    pub sheet_url: String,
    pub csv_url: String,
}

impl SheetSource {
    pub fn new() -> Self {
        SheetSource::default()
    }

    /// Re-derives the CSV URL on every edit of the share URL.
    pub fn set_sheet_url(&mut self, url: String) {
        self.sheet_url = url;
        let derived = normalize(&self.sheet_url);
        if !derived.is_empty() {
            self.csv_url = derived;
        }
    }

    pub fn set_csv_url(&mut self, url: String) {
        self.csv_url = url;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_export_url_from_share_link() {
        let url = "https://docs.google.com/spreadsheets/d/ABC123/edit#gid=456";
        assert_eq!(
            normalize(url),
            "https://docs.google.com/spreadsheets/d/ABC123/export?format=csv&gid=456"
        );
    }

    #[test]
    fn missing_gid_defaults_to_first_tab() {
        let url = "https://docs.google.com/spreadsheets/d/ABC123/edit";
        assert_eq!(
            normalize(url),
            "https://docs.google.com/spreadsheets/d/ABC123/export?format=csv&gid=0"
        );
    }

    #[test]
    fn unrecognized_input_yields_empty_string() {
        assert_eq!(normalize("not a url"), "");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("https://example.com/spreadsheets/x/ABC"), "");
    }

    #[test]
    fn export_urls_pass_through_unchanged() {
        let url = "https://docs.google.com/spreadsheets/d/ABC123/export?format=csv&gid=7";
        assert_eq!(normalize(url), url);
    }

    #[test]
    fn gid_is_found_in_query_position_too() {
        let url = "https://docs.google.com/spreadsheets/d/ABC123/edit?gid=99";
        assert_eq!(
            normalize(url),
            "https://docs.google.com/spreadsheets/d/ABC123/export?format=csv&gid=99"
        );
    }

    #[test]
    fn editing_the_share_url_rederives_the_csv_url() {
        let mut source = SheetSource::new();
        source.set_sheet_url(
            "https://docs.google.com/spreadsheets/d/ABC123/edit#gid=456".to_string(),
        );
        assert_eq!(
            source.csv_url,
            "https://docs.google.com/spreadsheets/d/ABC123/export?format=csv&gid=456"
        );
    }

    #[test]
    fn manual_csv_override_survives_unrecognized_share_edits() {
        let mut source = SheetSource::new();
        source.set_csv_url("https://example.com/custom.csv".to_string());
        source.set_sheet_url("still typing".to_string());
        assert_eq!(source.csv_url, "https://example.com/custom.csv");

        // A recognizable share link takes the field back over.
        source.set_sheet_url(
            "https://docs.google.com/spreadsheets/d/XYZ/edit".to_string(),
        );
        assert_eq!(
            source.csv_url,
            "https://docs.google.com/spreadsheets/d/XYZ/export?format=csv&gid=0"
        );
    }
}
