use citescope::{
  paper::Paper,
  table::{Metric, ReferenceRow, ReferenceTable, TableMode},
  IdKind, PaperQuery, SemanticScholarClient,
};
use clap::{builder::ArgAction, Parser, Subcommand, ValueEnum};
use console::{style, Emoji};
use errors::CitescopeCliError;
use tracing::debug;
use tracing_subscriber::EnvFilter;

pub mod errors;

static LOOKING_GLASS: Emoji<'_, '_> = Emoji("🔍 ", "");
static BOOKS: Emoji<'_, '_> = Emoji("📚 ", "");
static PAPER: Emoji<'_, '_> = Emoji("📄 ", "");
static CHART: Emoji<'_, '_> = Emoji("📊 ", "");
static SUCCESS: Emoji<'_, '_> = Emoji("✨ ", "");

#[derive(Parser)]
#[command(author, version, about = "Terminal dashboard for exploring a paper's cited references")]
struct Cli {
  /// Verbose mode (-v, -vv, -vvv)
  #[arg(
        short,
        long,
        action = ArgAction::Count,
        global = true,
        help = "Increase logging verbosity"
    )]
  verbose: u8,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Resolve an identifier to its canonical Semantic Scholar paper id
  Resolve {
    /// Identifier or URL to resolve
    input: String,
    /// How to interpret the input (url, doi, arxiv, mag, acl, pmid, pmcid)
    #[arg(long, short, default_value = "url")]
    kind:  IdKind,
  },
  /// Fetch a paper and render its reference dashboard
  Show {
    /// Identifier or URL of the paper
    input:  String,
    /// How to interpret the input (url, doi, arxiv, mag, acl, pmid, pmcid)
    #[arg(long, short, default_value = "url")]
    kind:   IdKind,
    /// Derived column for the reference table
    #[arg(long, short, value_enum, default_value = "scaled")]
    mode:   Mode,
    /// Citation metric used for marker scaling; ignored with --mode binned
    #[arg(long, value_enum, default_value = "citations")]
    metric: MetricArg,
  },
}

/// Presentation mode for the reference table.
#[derive(Clone, Copy, ValueEnum)]
enum Mode {
  /// Marker sizes scaled from a citation metric, rows sorted by venue weight
  Scaled,
  /// Eight equal-frequency citation bins, input order kept
  Binned,
}

/// Citation metric selector for the scaled mode.
#[derive(Clone, Copy, ValueEnum)]
enum MetricArg {
  /// Plain citation counts
  Citations,
  /// Influential-citation counts
  Influential,
}

/// Maps the CLI flags onto the library's table configuration.
fn table_mode(mode: Mode, metric: MetricArg) -> TableMode {
  match mode {
    Mode::Scaled => TableMode::MarkerScaling(match metric {
      MetricArg::Citations => Metric::Citations,
      MetricArg::Influential => Metric::InfluentialCitations,
    }),
    Mode::Binned => TableMode::QuantileBins,
  }
}

/// Setup logging with the specified verbosity level
fn setup_logging(verbosity: u8) {
  let filter = match verbosity {
    0 => "warn",
    1 => "info",
    2 => "debug",
    _ => "trace",
  };

  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_file(true)
    .with_line_number(true)
    .with_thread_ids(true)
    .with_target(true)
    .init();
}

/// Clips text to `max` characters, marking the cut with an ellipsis.
fn clip(text: &str, max: usize) -> String {
  if text.chars().count() <= max {
    return text.to_owned();
  }
  let clipped = text.chars().take(max.saturating_sub(3)).collect::<String>();
  format!("{}...", clipped)
}

/// Formats one table row into its fixed-width line: derived column,
/// year, citations, venue, venue type, title.
fn format_row(row: &ReferenceRow) -> String {
  let reference = &row.reference;
  let derived = match (row.marker_size, row.bin) {
    (Some(size), _) => format!("{size:>8.1}"),
    (_, Some(bin)) => format!("{bin:>8}"),
    _ => format!("{:>8}", "-"),
  };
  let year = reference.year.map(|y| y.to_string()).unwrap_or_else(|| "-".to_owned());

  format!(
    "{}  {:>4}  {:>9}  {:<28}  {:<12}  {}",
    derived,
    year,
    reference.citation_count,
    clip(&reference.venue, 28),
    clip(reference.venue_type.as_deref().unwrap_or("-"), 12),
    clip(&reference.title, 60)
  )
}

/// Prints the paper summary and the reference table.
fn render_dashboard(paper: &Paper, mode: TableMode) {
  let year = paper.year.map(|y| format!(" ({y})")).unwrap_or_default();
  println!(
    "\n{} {}{}",
    style(PAPER).green(),
    style(paper.title_or_default()).white().bold(),
    style(year).yellow()
  );

  if !paper.authors.is_empty() {
    println!("\n{} Authors:", style(BOOKS).cyan());
    for author in &paper.authors {
      let name = author.name.as_deref().unwrap_or("Unknown");
      let mut stats = Vec::new();
      if let Some(papers) = author.paper_count {
        stats.push(format!("papers: {papers}"));
      }
      if let Some(citations) = author.citation_count {
        stats.push(format!("citations: {citations}"));
      }
      if let Some(h_index) = author.h_index {
        stats.push(format!("hIndex: {h_index}"));
      }
      let stats =
        if stats.is_empty() { String::new() } else { format!(" ({})", stats.join(", ")) };

      match &author.url {
        Some(url) =>
          println!("   {}{} {}", style(name).white(), stats, style(url).blue().underlined()),
        None => println!("   {}{}", style(name).white(), stats),
      }
    }
  }

  if let Some(tldr) = paper.tldr_text() {
    println!("\n{} {}", style("tl;dr:").green().bold(), style(tldr).white().italic());
  }

  if let Some(abstract_text) = &paper.abstract_text {
    println!("\n{} {}", style("Abstract:").green().bold(), style(abstract_text).white());
  }

  if let Some(fields) = paper.fields_of_study_display() {
    println!("\n{} {}", style("Fields of study:").green().bold(), style(fields).white());
  }

  if let Some(citations) = paper.citation_count {
    println!("{} {}", style("Citations:").green().bold(), style(citations).yellow());
  }

  let table = ReferenceTable::build(&paper.references, mode);

  let heading = match paper.reference_count {
    Some(count) => format!("This paper has {count} references"),
    None => paper.title_or_default().to_owned(),
  };
  println!("\n{} {}", style(CHART).cyan(), style(heading).white().bold());
  println!(
    "   {}",
    style(format!(
      "{} venues on the timeline, suggested chart height {}px",
      table.venue_count(),
      table.suggested_height()
    ))
    .dim()
  );

  if table.rows.is_empty() {
    println!("   {}", style("No references returned").yellow());
    return;
  }

  let derived_label = match mode {
    TableMode::MarkerScaling(_) => "size",
    TableMode::QuantileBins => "bin",
  };
  println!(
    "\n   {}",
    style(format!(
      "{:>8}  {:>4}  {:>9}  {:<28}  {:<12}  {}",
      derived_label, "year", "citations", "venue", "type", "title"
    ))
    .green()
  );

  for row in &table.rows {
    let reference = &row.reference;
    println!("   {}", style(format_row(row)).white());

    // Feed any of these back into `show` to drill down the citation graph.
    if let Some(url) = &reference.url {
      println!("   {}", style(format!("{:>8}  visualize: {url}", "")).dim());
    }
    if let Some(pdf) = &reference.open_access_pdf {
      println!("   {}", style(format!("{:>8}  pdf: {pdf}", "")).dim());
    }
  }
}

#[tokio::main]
async fn main() -> Result<(), CitescopeCliError> {
  let cli = Cli::parse();
  setup_logging(cli.verbose);

  let client = SemanticScholarClient::new();

  match cli.command {
    Commands::Resolve { input, kind } => {
      println!(
        "{} Resolving {} as {}",
        style(LOOKING_GLASS).cyan(),
        style(&input).yellow(),
        style(kind).cyan()
      );

      let query = PaperQuery::new(&input, kind)?;
      let id = client.resolve(&query).await?;

      println!("{} Canonical paper id: {}", style(SUCCESS).green(), style(id).yellow());
      Ok(())
    },

    Commands::Show { input, kind, mode, metric } => {
      println!("{} Fetching paper: {}", style(LOOKING_GLASS).cyan(), style(&input).yellow());

      let query = PaperQuery::new(&input, kind)?;
      let id = client.resolve(&query).await?;
      debug!("Resolved paper id: {id}");

      let paper = client.fetch_paper(&id).await?;
      debug!("Paper details: {:?}", paper);

      render_dashboard(&paper, table_mode(mode, metric));
      Ok(())
    },
  }
}
