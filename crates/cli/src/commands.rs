// FILE: crates/cli/src/commands.rs

use anyhow::{bail, Context as _, Result};
use chrono::NaiveDate;
use console::style;
use readtrack_catalog::MetadataEnricher;
use readtrack_config::Config;
use readtrack_core::{today, Book, BookDraft, ReadingTotals, DATE_FORMAT};
use readtrack_library::{
    write_export, ExportFormat, FileStore, ReadingList, ReadingTracker, SaveStatus, Submission,
};
use std::io::Write;
use std::path::{Path, PathBuf};


const RULE_WIDTH: usize = 80;
const BAR_WIDTH: usize = 30;

/// What every command needs: where the list lives and the loaded config
pub struct Context {
    pub data_dir: PathBuf,
    pub config: Config,
}

impl Context {
    pub fn new(data_dir: PathBuf, config: Config) -> Self {
        Self { data_dir, config }
    }

    fn open_list(&self) -> ReadingList {
        let list = ReadingList::open(Box::new(FileStore::new(&self.data_dir)));
        if let Some(reason) = list.read_only_reason() {
            eprintln!("{} {}", style("warning:").yellow().bold(), reason);
        }
        list
    }

    fn enricher(&self, offline: bool) -> MetadataEnricher {
        if offline {
            MetadataEnricher::offline()
        } else {
            MetadataEnricher::from_config(&self.config.catalog)
        }
    }
}

/// Raw `add` arguments, validated by [`BookDraft::from_form`]
pub struct AddArgs<'a> {
    pub title: &'a str,
    pub author: &'a str,
    pub page: &'a str,
    pub target_page: Option<&'a str>,
    pub target_date: Option<&'a str>,
    pub offline: bool,
}

/// Add a book, looking it up in the catalog first
pub fn add_book(ctx: &Context, args: AddArgs<'_>) -> Result<Submission> {
    let draft = BookDraft::from_form(
        args.title,
        args.author,
        args.page,
        args.target_page,
        args.target_date,
    )
    .context("Please fill in all fields with valid values")?;

    let mut tracker = ReadingTracker::new(ctx.open_list(), ctx.enricher(args.offline));
    let submission = tracker.submit(draft).context("Book was not added")?;

    let book = &submission.book;
    println!("{} Book added: {}", style("✓").green().bold(), style(&book.title).bold());
    println!("  ID: {}", truncate(&book.id.to_string(), 8));
    println!("  Progress: {}", format_progress(book));
    if let Some(pace) = format_pace(book, today()) {
        println!("  {}", pace);
    }
    if !book.has_known_length() {
        println!(
            "  {}",
            style("No catalog data found; page count unknown").yellow()
        );
    }
    report_save(&submission.save);

    Ok(submission)
}

/// List every book with progress, pace and totals
pub fn list_books(ctx: &Context) -> Result<()> {
    let list = ctx.open_list();

    if list.is_empty() {
        println!("No books in your reading list. Use 'add' to start tracking one.");
        return Ok(());
    }

    println!("\n{} Books in Reading List", style(list.len()).bold().cyan());
    println!("{}", format_totals(&list.totals()));
    println!("{}", "=".repeat(RULE_WIDTH));

    let as_of = today();
    for book in &list {
        print_book_summary(book, as_of);
    }

    Ok(())
}

/// Full details for one book
pub fn show_book(ctx: &Context, id: &str) -> Result<()> {
    let list = ctx.open_list();
    let book_id = list.resolve_id(id)?;
    let book = list
        .get(&book_id)
        .with_context(|| format!("Book {} disappeared", book_id))?;

    println!("\n{}", style("Book Information").bold().cyan());
    println!("{}", "=".repeat(RULE_WIDTH));
    println!("ID: {}", book.id);
    println!("Title: {}", style(&book.title).bold());
    println!("Author: {}", book.author);
    println!("Progress: {}", format_progress(book));
    println!("          {}", progress_bar(book.progress_percent(), BAR_WIDTH));

    if let Some(target) = format_target(book) {
        println!("Target: {}", target);
    }
    if let Some(pace) = format_pace(book, today()) {
        println!("{}", pace);
    }

    println!(
        "Cover: {}",
        cover_display(book, &ctx.config.catalog.placeholder_cover_url)
    );
    if let Some(year) = book.publish_year {
        println!("Published: {}", year);
    }
    if let Some(publisher) = &book.publisher {
        println!("Publisher: {}", publisher);
    }
    if let Some(isbn) = &book.isbn {
        println!("ISBN: {}", isbn);
    }
    if !book.categories.is_empty() {
        println!("Categories: {}", book.categories.join(", "));
    }
    if let Some(description) = &book.description {
        println!("\nDescription:\n{}", description);
    }

    Ok(())
}

/// Move a book's current page
pub fn update_progress(ctx: &Context, id: &str, page: u32) -> Result<()> {
    let mut list = ctx.open_list();
    let book_id = list.resolve_id(id)?;

    let status = list
        .update_progress(&book_id, page)
        .context("Progress not updated")?;

    if let Some(book) = list.get(&book_id) {
        println!(
            "{} {}: {}",
            style("✓").green().bold(),
            book.title,
            format_progress(book)
        );
        if book.is_finished() {
            println!("  {}", style("Finished!").green());
        }
    }
    report_save(&status);

    Ok(())
}

/// Remove one book
pub fn remove_book(ctx: &Context, id: &str, force: bool) -> Result<()> {
    let mut list = ctx.open_list();
    let book_id = list.resolve_id(id)?;

    if !force {
        let title = list
            .get(&book_id)
            .map(|b| b.title.clone())
            .unwrap_or_default();
        if !confirm(&format!("Are you sure you want to remove '{}'?", title))? {
            println!("Removal cancelled.");
            return Ok(());
        }
    }

    let (book, status) = list.remove(&book_id)?;
    println!("{} Book removed: {}", style("✓").green().bold(), book.title);
    report_save(&status);

    Ok(())
}

/// Empty the reading list
pub fn clear_books(ctx: &Context, yes: bool) -> Result<()> {
    let mut list = ctx.open_list();

    if list.is_empty() {
        println!("Reading list is already empty.");
        return Ok(());
    }

    if !yes
        && ctx.config.app.confirm_clear
        && !confirm(&format!(
            "Are you sure you want to clear all {} books?",
            list.len()
        ))?
    {
        println!("Clear cancelled.");
        return Ok(());
    }

    let count = list.len();
    let status = list.clear();
    println!("{} Cleared {} books", style("✓").green().bold(), count);
    report_save(&status);

    Ok(())
}

/// Aggregate statistics
pub fn show_stats(ctx: &Context) -> Result<()> {
    let stats = ctx.open_list().stats();

    println!("\n{}", style("Reading Statistics").bold().cyan());
    println!("{}", "=".repeat(RULE_WIDTH));
    println!("Total Books: {}", style(stats.total_books).bold());
    println!(
        "Finished: {} ({:.1}%)",
        style(stats.finished_count).bold(),
        stats.finished_percentage()
    );
    println!("In Progress: {}", stats.in_progress_count());
    println!("Unknown Length: {}", stats.unknown_length_count);
    println!("With Targets: {}", stats.with_target_count);
    println!("{}", format_totals(&stats.totals));
    if let Some(percent) = stats.totals.percent() {
        println!("Overall Progress: {:.1}%", percent);
    }
    if let Some(average) = stats.average_progress {
        println!("Average Progress: {:.1}%", average);
    }

    Ok(())
}

/// Export to CSV or JSON
pub fn export_books(ctx: &Context, format: &str, output: Option<&Path>) -> Result<PathBuf> {
    let format: ExportFormat = format.parse()?;
    let path = match output {
        Some(path) => path.to_path_buf(),
        None => match format {
            ExportFormat::Csv => ctx.config.export.csv_path.clone(),
            ExportFormat::Json => ctx.config.export.json_path.clone(),
        },
    };

    check_output_path(&path)?;

    let list = ctx.open_list();
    write_export(list.books(), format, &path)
        .with_context(|| format!("Failed to write export file {}", path.display()))?;

    println!(
        "{} Exported {} books to {}",
        style("✓").green().bold(),
        list.len(),
        path.display()
    );

    Ok(path)
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{} (y/N) ", prompt);
    std::io::stdout().flush().context("Failed to write prompt")?;

    let mut input = String::new();
    std::io::stdin()
        .read_line(&mut input)
        .context("Failed to read input")?;

    Ok(is_yes(&input))
}

fn is_yes(input: &str) -> bool {
    matches!(input.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

fn report_save(status: &SaveStatus) {
    if let Some(reason) = status.warning() {
        eprintln!(
            "{} Changes are kept for this session only: {}",
            style("warning:").yellow().bold(),
            reason
        );
    }
}

fn print_book_summary(book: &Book, as_of: NaiveDate) {
    println!("\n{}", style(&book.title).bold());
    println!("  by {}", book.author);
    println!(
        "  ID: {} | {}",
        truncate(&book.id.to_string(), 8),
        format_progress(book)
    );
    println!("  {}", progress_bar(book.progress_percent(), BAR_WIDTH));
    if let Some(target) = format_target(book) {
        println!("  Target: {}", target);
    }
    if let Some(pace) = format_pace(book, as_of) {
        println!("  {}", pace);
    }
}

/// `"50 of 200 pages (25.0%)"`, or `"5 of ? pages"` when the length is unknown
fn format_progress(book: &Book) -> String {
    match book.progress_percent() {
        Some(percent) => format!(
            "{} of {} pages ({:.1}%)",
            book.current_page, book.total_pages, percent
        ),
        None => format!("{} of ? pages", book.current_page),
    }
}

fn format_target(book: &Book) -> Option<String> {
    match (book.target_page, book.target_date) {
        (Some(page), Some(date)) => Some(format!(
            "{} pages by {}",
            page,
            date.format(DATE_FORMAT)
        )),
        (Some(page), None) => Some(format!("{} pages", page)),
        (None, Some(date)) => Some(format!("finish by {}", date.format(DATE_FORMAT))),
        (None, None) => None,
    }
}

fn format_pace(book: &Book, as_of: NaiveDate) -> Option<String> {
    book.daily_pages_needed(as_of)
        .map(|pages| format!("Daily Goal: {} pages", pages))
}

fn format_totals(totals: &ReadingTotals) -> String {
    format!("Total Pages Read: {} of {}", totals.read, totals.total)
}

/// Unknown progress renders as an empty bar
fn progress_bar(percent: Option<f64>, width: usize) -> String {
    let percent = percent.unwrap_or(0.0).clamp(0.0, 100.0);
    let filled = ((percent / 100.0) * width as f64).round() as usize;
    format!(
        "[{}{}]",
        "#".repeat(filled),
        "-".repeat(width.saturating_sub(filled))
    )
}

fn cover_display<'a>(book: &'a Book, placeholder: &'a str) -> &'a str {
    book.cover_url.as_deref().unwrap_or(placeholder)
}

/// Shortens to `max_len` characters, marking the cut with `...`
fn truncate(s: &str, max_len: usize) -> String {
    match s.char_indices().nth(max_len) {
        Some((cut, _)) => format!("{}...", &s[..cut]),
        None => s.to_string(),
    }
}

fn check_output_path(path: &Path) -> Result<()> {
    if path.is_dir() {
        bail!("{} is a directory", path.display());
    }
    Ok(())
}
