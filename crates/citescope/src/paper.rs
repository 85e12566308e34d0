//! Paper and reference data model matching the Semantic Scholar graph schema.
//!
//! The wire types in this module keep every field the API may omit as an
//! `Option`, mirroring the JSON payload one-to-one. The one place nulls are
//! allowed to disappear is [`Reference::flatten`]: it is the single
//! validation step that produces a fully populated [`FlatReference`] with
//! explicit defaults, so the table builder never has to guard a nested
//! field again.
//!
//! # Examples
//!
//! ```
//! use citescope::paper::Reference;
//!
//! let json = r#"{"paperId": "abc", "title": "Some Paper", "citationCount": null}"#;
//! let reference: Reference = serde_json::from_str(json)?;
//!
//! let flat = reference.flatten();
//! assert_eq!(flat.citation_count, 0);
//! # Ok::<(), serde_json::Error>(())
//! ```

use chrono::NaiveDate;

use super::*;

/// A paper record from the graph API: metadata plus its reference list.
///
/// Reference order is the API's order; no ranking is implied.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paper {
  /// Canonical Semantic Scholar identifier
  pub paper_id:        String,
  /// Paper title
  #[serde(default)]
  pub title:           Option<String>,
  /// Publication year
  #[serde(default)]
  pub year:            Option<i32>,
  /// Full abstract text
  #[serde(rename = "abstract", default)]
  pub abstract_text:   Option<String>,
  /// Machine-generated one-sentence summary
  #[serde(default)]
  pub tldr:            Option<Tldr>,
  /// The paper's authors, with per-author statistics
  #[serde(default)]
  pub authors:         Vec<Author>,
  /// Citations this paper has received
  #[serde(default)]
  pub citation_count:  Option<u64>,
  /// Number of papers this paper cites
  #[serde(default)]
  pub reference_count: Option<u64>,
  /// Fields of study (e.g., "Computer Science")
  #[serde(default)]
  pub fields_of_study: Option<Vec<String>>,
  /// Cited papers, in API order
  #[serde(default)]
  pub references:      Vec<Reference>,
}

impl Paper {
  /// The title, or a placeholder when the record has none.
  pub fn title_or_default(&self) -> &str { self.title.as_deref().unwrap_or("Untitled") }

  /// The tl;dr summary text, if the API produced one.
  pub fn tldr_text(&self) -> Option<&str> { self.tldr.as_ref()?.text.as_deref() }

  /// Fields of study joined for display, `None` when the list is absent
  /// or empty.
  pub fn fields_of_study_display(&self) -> Option<String> {
    let fields = self.fields_of_study.as_ref()?;
    if fields.is_empty() {
      return None;
    }
    Some(fields.join(", "))
  }
}

/// An author entry with the statistics the dashboard displays.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
  /// Author's full name
  #[serde(default)]
  pub name:           Option<String>,
  /// Author profile URL
  #[serde(default)]
  pub url:            Option<String>,
  /// Number of papers the author has published
  #[serde(default)]
  pub paper_count:    Option<u64>,
  /// Citations across the author's papers
  #[serde(default)]
  pub citation_count: Option<u64>,
  /// The author's h-index
  #[serde(default)]
  pub h_index:        Option<u64>,
}

/// Machine-generated summary attached to a paper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tldr {
  /// Summary text
  pub text: Option<String>,
}

/// The nested venue object a reference may carry.
///
/// The API omits the whole object for unmatched venues and sometimes
/// omits individual keys inside it, so everything is optional.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicationVenue {
  /// Venue name as registered in the graph
  #[serde(default)]
  pub name:       Option<String>,
  /// Venue category (journal, conference, ...)
  #[serde(rename = "type", default)]
  pub venue_type: Option<String>,
}

/// Open-access PDF pointer attached to a reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAccessPdf {
  /// Direct URL to the PDF
  #[serde(default)]
  pub url: Option<String>,
}

/// One cited-paper entry within a paper's reference list, as on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reference {
  /// Canonical identifier of the cited paper, when the graph matched it
  #[serde(default)]
  pub paper_id:                   Option<String>,
  /// Cited paper's title
  #[serde(default)]
  pub title:                      Option<String>,
  /// Landing-page URL
  #[serde(default)]
  pub url:                        Option<String>,
  /// Publication year
  #[serde(default)]
  pub year:                       Option<i32>,
  /// Full publication date
  #[serde(default)]
  pub publication_date:           Option<NaiveDate>,
  /// Venue name
  #[serde(default)]
  pub venue:                      Option<String>,
  /// Nested venue object carrying the venue category
  #[serde(default)]
  pub publication_venue:          Option<PublicationVenue>,
  /// Number of papers the cited paper itself cites
  #[serde(default)]
  pub reference_count:            Option<u64>,
  /// Citations the cited paper has received
  #[serde(default)]
  pub citation_count:             Option<u64>,
  /// Influential-citation count of the cited paper
  #[serde(default)]
  pub influential_citation_count: Option<u64>,
  /// The cited paper's authors
  #[serde(default)]
  pub authors:                    Vec<Author>,
  /// Open-access PDF pointer, when one is known
  #[serde(default)]
  pub open_access_pdf:            Option<OpenAccessPdf>,
}

impl Reference {
  /// Flattens the wire record into a fully populated row.
  ///
  /// This is the only place nulls are normalized:
  /// - citation and influential-citation counts default to 0
  /// - a missing venue becomes the empty string (so all venue-less rows
  ///   aggregate into one group)
  /// - the venue category is copied out of the nested `publicationVenue`
  ///   object when that object and its `type` key are both present
  ///
  /// Fields that are informational rather than arithmetic operands
  /// (identifier, URLs, dates) stay optional.
  pub fn flatten(&self) -> FlatReference {
    FlatReference {
      paper_id:                   self.paper_id.clone(),
      title:                      self.title.clone().unwrap_or_else(|| "Untitled".to_owned()),
      url:                        self.url.clone(),
      year:                       self.year,
      publication_date:           self.publication_date,
      venue:                      self.venue.clone().unwrap_or_default(),
      venue_type:                 self
        .publication_venue
        .as_ref()
        .and_then(|venue| venue.venue_type.clone()),
      reference_count:            self.reference_count.unwrap_or(0),
      citation_count:             self.citation_count.unwrap_or(0),
      influential_citation_count: self.influential_citation_count.unwrap_or(0),
      authors:                    self.authors.iter().filter_map(|a| a.name.clone()).collect(),
      open_access_pdf:            self.open_access_pdf.as_ref().and_then(|pdf| pdf.url.clone()),
    }
  }
}

/// A reference row after the single null-normalization step.
///
/// Counts are plain integers and the venue is always a string, so derived
/// columns can be computed without further guards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatReference {
  /// Canonical identifier of the cited paper, when known
  pub paper_id:                   Option<String>,
  /// Title, `"Untitled"` when absent
  pub title:                      String,
  /// Landing-page URL
  pub url:                        Option<String>,
  /// Publication year
  pub year:                       Option<i32>,
  /// Full publication date
  pub publication_date:           Option<NaiveDate>,
  /// Venue name, empty string when absent
  pub venue:                      String,
  /// Venue category from the nested venue object, when present
  pub venue_type:                 Option<String>,
  /// Reference count, 0 when absent
  pub reference_count:            u64,
  /// Citation count, 0 when absent
  pub citation_count:             u64,
  /// Influential-citation count, 0 when absent
  pub influential_citation_count: u64,
  /// Author names
  pub authors:                    Vec<String>,
  /// Open-access PDF URL, when known
  pub open_access_pdf:            Option<String>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_flatten_defaults() {
    let reference: Reference = serde_json::from_str(r#"{"paperId": null}"#).unwrap();
    let flat = reference.flatten();
    assert_eq!(flat.title, "Untitled");
    assert_eq!(flat.venue, "");
    assert_eq!(flat.citation_count, 0);
    assert_eq!(flat.influential_citation_count, 0);
    assert!(flat.venue_type.is_none());
    assert!(flat.authors.is_empty());
  }

  #[test]
  fn test_flatten_copies_nested_venue_type() {
    let json = r#"{
      "paperId": "ref1",
      "venue": "NeurIPS",
      "publicationVenue": {"name": "Neural Information Processing Systems", "type": "conference"}
    }"#;
    let reference: Reference = serde_json::from_str(json).unwrap();
    assert_eq!(reference.flatten().venue_type.as_deref(), Some("conference"));

    // The nested object may be present without its `type` key.
    let json = r#"{"paperId": "ref2", "publicationVenue": {"name": "Somewhere"}}"#;
    let reference: Reference = serde_json::from_str(json).unwrap();
    assert!(reference.flatten().venue_type.is_none());
  }

  #[test]
  fn test_paper_payload_parse() {
    let json = r#"{
      "paperId": "649def34f8be52c8b66281af98ae884c09aef38b",
      "title": "Attention Is All You Need",
      "year": 2017,
      "abstract": "The dominant sequence transduction models...",
      "tldr": {"text": "A new simple network architecture is proposed."},
      "citationCount": 100000,
      "referenceCount": 2,
      "fieldsOfStudy": ["Computer Science"],
      "authors": [
        {"name": "Ashish Vaswani", "url": "https://www.semanticscholar.org/author/1",
         "paperCount": 40, "citationCount": 120000, "hIndex": 25}
      ],
      "references": [
        {"paperId": "r1", "title": "Neural Machine Translation", "citationCount": 500,
         "venue": "ICLR", "publicationDate": "2015-05-01"},
        {"paperId": null, "title": null, "citationCount": null}
      ]
    }"#;

    let paper: Paper = serde_json::from_str(json).unwrap();
    assert_eq!(paper.title_or_default(), "Attention Is All You Need");
    assert_eq!(paper.year, Some(2017));
    assert_eq!(paper.tldr_text(), Some("A new simple network architecture is proposed."));
    assert_eq!(paper.fields_of_study_display().as_deref(), Some("Computer Science"));
    assert_eq!(paper.references.len(), 2);
    assert_eq!(paper.authors[0].h_index, Some(25));

    let flat = paper.references[0].flatten();
    assert_eq!(flat.publication_date, NaiveDate::from_ymd_opt(2015, 5, 1));
    assert_eq!(flat.citation_count, 500);
  }
}
