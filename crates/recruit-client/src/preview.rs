//! Links for previewing stored documents.
//!
//! PDFs render directly from their storage URL. Word documents need a
//! viewer, so they are wrapped in the Office web viewer's embed URL.

use recruit_core::upload::MediaType;
use reqwest::Url;

const OFFICE_EMBED: &str = "https://view.officeapps.live.com/op/embed.aspx";

/// The URL that embeds `document_url` in a viewer, or `None` when the record
/// has no stored document.
pub fn embed_url(document_url: &str) -> Option<String> {
  let document_url = document_url.trim();
  if document_url.is_empty() {
    return None;
  }

  match MediaType::from_url(document_url) {
    Some(media) if media.is_word() => {
      Url::parse_with_params(OFFICE_EMBED, &[("src", document_url)])
        .map(String::from)
        .ok()
        .or_else(|| Some(document_url.to_string()))
    }
    _ => Some(document_url.to_string()),
  }
}
