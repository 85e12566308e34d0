//! The reference table builder.
//!
//! Turns a paper's reference list into the flat, enriched table the
//! timeline chart consumes. Every row of the input survives into the
//! output; the builder only adds a derived column and, in scaling mode,
//! reorders rows so venues with more total citation weight cluster
//! together on the chart's y-axis.
//!
//! Two mutually exclusive presentation modes exist, selected explicitly
//! through [`TableMode`]:
//! - [`TableMode::MarkerScaling`]: min-max scaling of a citation metric
//!   into a fixed marker-size range, plus the venue-total sort
//! - [`TableMode::QuantileBins`]: eight equal-frequency citation bins,
//!   input order preserved
//!
//! # Examples
//!
//! ```
//! use citescope::{paper::Reference, table::{ReferenceTable, TableMode}};
//!
//! let references: Vec<Reference> = serde_json::from_str(
//!   r#"[{"paperId": "a", "venue": "ICML", "citationCount": 12},
//!       {"paperId": "b", "venue": "ICML", "citationCount": 3}]"#,
//! )?;
//!
//! let table = ReferenceTable::build(&references, TableMode::default());
//! assert_eq!(table.rows.len(), 2);
//! # Ok::<(), serde_json::Error>(())
//! ```

use std::collections::HashMap;

use super::*;
use crate::paper::FlatReference;

/// Smallest marker size emitted by the scaler.
pub const MIN_MARKER_SIZE: f64 = 12.0;
/// Largest marker size emitted by the scaler.
pub const MAX_MARKER_SIZE: f64 = 1000.0;
/// Number of equal-frequency bins in [`TableMode::QuantileBins`].
pub const BIN_COUNT: u8 = 8;

/// The citation metric driving marker-size scaling.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default, Serialize, Deserialize)]
pub enum Metric {
  /// Scale markers by citation count
  #[default]
  Citations,
  /// Scale markers by influential-citation count
  InfluentialCitations,
}

impl Metric {
  /// Reads the metric value off a flattened row.
  fn value(&self, row: &FlatReference) -> u64 {
    match self {
      Metric::Citations => row.citation_count,
      Metric::InfluentialCitations => row.influential_citation_count,
    }
  }
}

/// Which derived column the table carries.
///
/// The original front-end picked the derivation implicitly by which code
/// path ran; here it is an explicit parameter of
/// [`ReferenceTable::build`].
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum TableMode {
  /// Marker sizes scaled from `metric` into
  /// `[MIN_MARKER_SIZE, MAX_MARKER_SIZE]`, rows sorted by ascending
  /// per-venue total citation count
  MarkerScaling(Metric),
  /// Rows labeled with an equal-frequency citation bin in `1..=BIN_COUNT`,
  /// original order kept
  QuantileBins,
}

impl Default for TableMode {
  fn default() -> Self { TableMode::MarkerScaling(Metric::Citations) }
}

/// One row of the built table: the flattened reference plus the derived
/// column of the active mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceRow {
  /// The flattened, null-normalized reference
  pub reference:   FlatReference,
  /// Marker size, set in [`TableMode::MarkerScaling`]
  pub marker_size: Option<f64>,
  /// Bin label in `1..=BIN_COUNT`, set in [`TableMode::QuantileBins`]
  pub bin:         Option<u8>,
}

/// The derived, immutable view of a paper's reference list.
///
/// Built once per fetched paper and discarded when the next paper loads;
/// there is no persistence. Row count always equals the input length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceTable {
  /// The mode the table was built with
  pub mode: TableMode,
  /// Enriched rows, ordered per the mode's contract
  pub rows: Vec<ReferenceRow>,
}

impl ReferenceTable {
  /// Builds the table from a reference list.
  ///
  /// Flattening and null normalization happen first, then the derived
  /// column for `mode`. No rows are dropped and no error is possible:
  /// the degenerate metric range (all values equal, including the
  /// single-row and empty cases) falls back to the mid-range marker size
  /// instead of dividing by zero.
  pub fn build(references: &[Reference], mode: TableMode) -> Self {
    let flat: Vec<FlatReference> = references.iter().map(Reference::flatten).collect();

    let rows = match mode {
      TableMode::MarkerScaling(metric) => {
        let sizes = scale_markers(&flat, metric);
        let mut rows: Vec<ReferenceRow> = flat
          .into_iter()
          .zip(sizes)
          .map(|(reference, size)| ReferenceRow {
            reference,
            marker_size: Some(size),
            bin: None,
          })
          .collect();
        sort_by_venue_totals(&mut rows);
        rows
      },
      TableMode::QuantileBins => {
        let bins = assign_bins(&flat);
        flat
          .into_iter()
          .zip(bins)
          .map(|(reference, bin)| ReferenceRow { reference, marker_size: None, bin: Some(bin) })
          .collect()
      },
    };

    Self { mode, rows }
  }

  /// Number of distinct venues among the rows.
  pub fn venue_count(&self) -> usize {
    let mut venues: Vec<&str> = self.rows.iter().map(|row| row.reference.venue.as_str()).collect();
    venues.sort_unstable();
    venues.dedup();
    venues.len()
  }

  /// Suggested chart height in pixels: one 25px band per venue on the
  /// y-axis plus fixed margins, never below the 450px default.
  pub fn suggested_height(&self) -> u32 {
    let suggested = 25 * self.venue_count() as u32 + 300;
    suggested.max(450)
  }
}

/// Linear min-max scaling of `metric` into
/// `[MIN_MARKER_SIZE, MAX_MARKER_SIZE]`, one size per row.
///
/// A degenerate range (`max == min`) yields the mid-range size for every
/// row, so a table of identical counts still renders with uniform
/// markers.
fn scale_markers(rows: &[FlatReference], metric: Metric) -> Vec<f64> {
  let min = rows.iter().map(|row| metric.value(row)).min().unwrap_or(0);
  let max = rows.iter().map(|row| metric.value(row)).max().unwrap_or(0);

  if max == min {
    let midpoint = (MIN_MARKER_SIZE + MAX_MARKER_SIZE) / 2.0;
    return vec![midpoint; rows.len()];
  }

  let span = (max - min) as f64;
  rows
    .iter()
    .map(|row| {
      (metric.value(row) - min) as f64 / span * (MAX_MARKER_SIZE - MIN_MARKER_SIZE)
        + MIN_MARKER_SIZE
    })
    .collect()
}

/// Reorders rows by ascending total citation count of their venue.
///
/// The total is a sort key only; it is summed here and dropped, never
/// attached to the output. The sort is stable, so rows of one venue keep
/// their input order, and rows whose venues tie on total stay in input
/// order (possibly interleaved across the tied venues).
fn sort_by_venue_totals(rows: &mut [ReferenceRow]) {
  let mut totals: HashMap<&str, u64> = HashMap::new();
  for row in rows.iter() {
    *totals.entry(row.reference.venue.as_str()).or_default() += row.reference.citation_count;
  }

  let totals: HashMap<String, u64> =
    totals.into_iter().map(|(venue, total)| (venue.to_owned(), total)).collect();

  rows.sort_by_key(|row| totals[&row.reference.venue]);
}

/// Assigns each row an equal-frequency citation bin labeled
/// `1..=BIN_COUNT`.
///
/// Rows are ranked by citation count with input position as the tie
/// breaker, then the ranking is cut into `BIN_COUNT` runs whose lengths
/// differ by at most one. Labels come back in input order.
fn assign_bins(rows: &[FlatReference]) -> Vec<u8> {
  let n = rows.len();
  if n == 0 {
    return Vec::new();
  }

  let mut order: Vec<usize> = (0..n).collect();
  order.sort_by_key(|&i| (rows[i].citation_count, i));

  let mut bins = vec![0u8; n];
  for (rank, &i) in order.iter().enumerate() {
    bins[i] = (rank * BIN_COUNT as usize / n) as u8 + 1;
  }
  bins
}

#[cfg(test)]
mod tests {
  use super::*;

  fn references(json: &str) -> Vec<Reference> { serde_json::from_str(json).unwrap() }

  #[test]
  fn test_row_count_preserved() {
    let refs = references(
      r#"[{"citationCount": 10, "venue": "X"},
          {"citationCount": null, "venue": "Y"},
          {"citationCount": 5, "venue": "X"}]"#,
    );
    for mode in [TableMode::default(), TableMode::QuantileBins] {
      assert_eq!(ReferenceTable::build(&refs, mode).rows.len(), refs.len());
    }
    assert!(ReferenceTable::build(&[], TableMode::default()).rows.is_empty());
  }

  #[test]
  fn test_venue_sort_order() {
    // Normalized counts [10, 0, 5]; venue totals X = 15, Y = 0, so Y's
    // row precedes both X rows, which keep their relative order.
    let refs = references(
      r#"[{"paperId": "x1", "citationCount": 10, "venue": "X"},
          {"paperId": "y1", "citationCount": null, "venue": "Y"},
          {"paperId": "x2", "citationCount": 5, "venue": "X"}]"#,
    );
    let table = ReferenceTable::build(&refs, TableMode::default());

    let order: Vec<&str> =
      table.rows.iter().map(|row| row.reference.paper_id.as_deref().unwrap()).collect();
    assert_eq!(order, ["y1", "x1", "x2"]);
  }

  #[test]
  fn test_venue_blocks_are_contiguous() {
    let refs = references(
      r#"[{"citationCount": 1, "venue": "A"},
          {"citationCount": 9, "venue": "B"},
          {"citationCount": 2, "venue": "A"},
          {"citationCount": 4, "venue": "C"},
          {"citationCount": 1, "venue": "B"}]"#,
    );
    let table = ReferenceTable::build(&refs, TableMode::default());

    let venues: Vec<&str> = table.rows.iter().map(|row| row.reference.venue.as_str()).collect();
    // Totals: A = 3, C = 4, B = 10.
    assert_eq!(venues, ["A", "A", "C", "B", "B"]);
  }

  #[test]
  fn test_tied_venue_totals_keep_input_order() {
    // A and B both total 5; the stable sort leaves their rows interleaved
    // exactly as they arrived.
    let refs = references(
      r#"[{"paperId": "a1", "citationCount": 2, "venue": "A"},
          {"paperId": "b1", "citationCount": 5, "venue": "B"},
          {"paperId": "a2", "citationCount": 3, "venue": "A"}]"#,
    );
    let table = ReferenceTable::build(&refs, TableMode::default());

    let order: Vec<&str> =
      table.rows.iter().map(|row| row.reference.paper_id.as_deref().unwrap()).collect();
    assert_eq!(order, ["a1", "b1", "a2"]);
  }

  #[test]
  fn test_marker_sizes_within_range() {
    let refs = references(
      r#"[{"citationCount": 0}, {"citationCount": 7}, {"citationCount": 250},
          {"citationCount": 12000}, {"citationCount": null}]"#,
    );
    let table = ReferenceTable::build(&refs, TableMode::MarkerScaling(Metric::Citations));

    for row in &table.rows {
      let size = row.marker_size.unwrap();
      assert!((MIN_MARKER_SIZE..=MAX_MARKER_SIZE).contains(&size));
      assert!(row.bin.is_none());
    }

    let sizes: Vec<f64> = table.rows.iter().map(|row| row.marker_size.unwrap()).collect();
    assert!(sizes.contains(&MIN_MARKER_SIZE));
    assert!(sizes.contains(&MAX_MARKER_SIZE));
  }

  #[test]
  fn test_degenerate_metric_range() {
    // All values equal, including the single-row case: the scaler must
    // not fault and emits the mid-range size.
    let midpoint = (MIN_MARKER_SIZE + MAX_MARKER_SIZE) / 2.0;

    let refs = references(r#"[{"citationCount": 7}, {"citationCount": 7}, {"citationCount": 7}]"#);
    let table = ReferenceTable::build(&refs, TableMode::default());
    assert!(table.rows.iter().all(|row| row.marker_size == Some(midpoint)));

    let refs = references(r#"[{"citationCount": 42}]"#);
    let table = ReferenceTable::build(&refs, TableMode::default());
    assert_eq!(table.rows[0].marker_size, Some(midpoint));
  }

  #[test]
  fn test_influential_metric_scaling() {
    let refs = references(
      r#"[{"citationCount": 999, "influentialCitationCount": 0, "venue": "X"},
          {"citationCount": 1, "influentialCitationCount": 10, "venue": "Y"}]"#,
    );
    let table = ReferenceTable::build(&refs, TableMode::MarkerScaling(Metric::InfluentialCitations));

    // Sorting still keys on plain citation totals, so the heavily cited
    // row lands last even though it scales to the smallest marker.
    let last = &table.rows[1];
    assert_eq!(last.reference.citation_count, 999);
    assert_eq!(last.marker_size, Some(MIN_MARKER_SIZE));
    assert_eq!(table.rows[0].marker_size, Some(MAX_MARKER_SIZE));
  }

  #[test]
  fn test_bin_labels_and_balance() {
    let refs: Vec<Reference> = (0..27)
      .map(|i| serde_json::from_str(&format!(r#"{{"citationCount": {}}}"#, i * 3)).unwrap())
      .collect();
    let table = ReferenceTable::build(&refs, TableMode::QuantileBins);

    let mut per_bin = vec![0usize; BIN_COUNT as usize];
    for row in &table.rows {
      let bin = row.bin.unwrap();
      assert!((1..=BIN_COUNT).contains(&bin));
      assert!(row.marker_size.is_none());
      per_bin[bin as usize - 1] += 1;
    }

    let min = per_bin.iter().min().unwrap();
    let max = per_bin.iter().max().unwrap();
    assert!(max - min <= 1, "bin sizes {per_bin:?} not balanced");
  }

  #[test]
  fn test_bins_preserve_input_order() {
    let refs = references(
      r#"[{"paperId": "a", "citationCount": 50},
          {"paperId": "b", "citationCount": 1},
          {"paperId": "c", "citationCount": 20}]"#,
    );
    let table = ReferenceTable::build(&refs, TableMode::QuantileBins);

    let order: Vec<&str> =
      table.rows.iter().map(|row| row.reference.paper_id.as_deref().unwrap()).collect();
    assert_eq!(order, ["a", "b", "c"]);

    // Ranking is by count, so "b" gets the lowest label.
    let bin = |id: &str| {
      table.rows.iter().find(|row| row.reference.paper_id.as_deref() == Some(id)).unwrap().bin
    };
    assert!(bin("b") < bin("c"));
    assert!(bin("c") < bin("a"));
  }

  #[test]
  fn test_suggested_height() {
    let refs = references(r#"[{"venue": "A"}, {"venue": "B"}, {"venue": "A"}]"#);
    let table = ReferenceTable::build(&refs, TableMode::default());
    assert_eq!(table.venue_count(), 2);
    // 25 * 2 + 300 < 450, so the default height wins.
    assert_eq!(table.suggested_height(), 450);

    let many: Vec<Reference> = (0..10)
      .map(|i| serde_json::from_str(&format!(r#"{{"venue": "venue-{i}"}}"#)).unwrap())
      .collect();
    let table = ReferenceTable::build(&many, TableMode::default());
    assert_eq!(table.suggested_height(), 25 * 10 + 300);
  }
}
