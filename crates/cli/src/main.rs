use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use stacks_core::{
    CatalogItem, Endpoints, Fetch, FetchConfig, Page, SearchKind, SearchResult, Session, Shelf, pages,
};

mod echo;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Parse a shelf name from the command line
fn parse_shelf(s: &str) -> Result<Shelf, String> {
    match s.to_lowercase().as_str() {
        "for-later" | "for_later" | "later" => Ok(Shelf::ForLater),
        "in-progress" | "in_progress" => Ok(Shelf::InProgress),
        "completed" | "done" => Ok(Shelf::Completed),
        _ => Err(format!(
            "Invalid shelf: {}. Valid options: for-later, in-progress, completed",
            s
        )),
    }
}

/// Browse a library catalog as typed records
#[derive(Parser, Debug)]
#[command(name = "stacks")]
#[command(author = "Stacks Contributors")]
#[command(version = "1.0.0")]
#[command(about = "Browse a library catalog as typed records", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Catalog base URL
    #[arg(long, value_name = "URL", global = true)]
    base_url: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE", global = true)]
    output: Option<PathBuf>,

    /// Emit JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "30", value_name = "SECS", global = true)]
    timeout: u64,

    /// Custom User-Agent for HTTP requests
    #[arg(long, value_name = "UA", global = true)]
    user_agent: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search the catalog for books or curated lists
    Search {
        /// Query string
        query: String,

        /// Search kind (keyword, title, author, subject, tag, list)
        #[arg(short, long, default_value = "keyword", value_name = "KIND")]
        kind: SearchKind,

        /// Number of result pages to fetch
        #[arg(short, long, default_value = "1", value_name = "NUM")]
        pages: u32,
    },

    /// Show an item's detail page
    Item {
        /// Numeric catalog identifier
        id: u64,
    },

    /// Show a user's profile, followers, following and lists
    User {
        /// Profile name
        name: String,
    },

    /// Show a branch and its weekly hours
    Branch {
        /// Branch name, matched case-insensitively
        name: String,
    },

    /// List the signed-in account's holds
    Holds(AccountArgs),

    /// List the signed-in account's checkouts
    Checkouts(AccountArgs),

    /// List one of the signed-in account's shelves
    Shelf {
        /// Shelf to list (for-later, in-progress, completed)
        #[arg(long, default_value = "for-later", value_parser = parse_shelf, value_name = "SHELF")]
        shelf: Shelf,

        #[command(flatten)]
        account: AccountArgs,
    },
}

#[derive(Args, Debug)]
struct AccountArgs {
    /// Library card barcode (falls back to STACKS_BARCODE)
    #[arg(long, value_name = "BARCODE")]
    barcode: Option<String>,

    /// Account PIN (falls back to STACKS_PIN)
    #[arg(long, value_name = "PIN")]
    pin: Option<String>,
}

impl AccountArgs {
    fn credentials(&self) -> anyhow::Result<(String, String)> {
        let barcode = self
            .barcode
            .clone()
            .or_else(|| env::var("STACKS_BARCODE").ok())
            .context("Missing barcode: pass --barcode or set STACKS_BARCODE")?;
        let pin = self
            .pin
            .clone()
            .or_else(|| env::var("STACKS_PIN").ok())
            .context("Missing PIN: pass --pin or set STACKS_PIN")?;

        Ok((barcode, pin))
    }
}

/// Render one catalog item as a numbered line
fn render_item(index: usize, item: &CatalogItem) -> String {
    let mut line = format!("{}. {}", index, item.title);
    if !item.subtitle.is_empty() {
        line.push_str(&format!(": {}", item.subtitle));
    }
    if !item.author.is_empty() {
        line.push_str(&format!(" by {}", item.author));
    }
    if !item.status.is_empty() {
        line.push_str(&format!(" [{}]", item.status));
    }
    line
}

fn render_items(items: &[CatalogItem]) -> String {
    let mut out = String::new();
    for (i, item) in items.iter().enumerate() {
        out.push_str(&render_item(i + 1, item));
        out.push('\n');
    }
    out
}

async fn run_search(cli: &Cli, session: &Session, query: &str, kind: SearchKind, pages: u32) -> anyhow::Result<String> {
    if cli.verbose {
        echo::print_info(&format!("Searching for {} ({}, {} page(s))", query, kind, pages));
    }

    let results = session.search(query, kind, pages).await?;

    if results.is_empty() {
        echo::print_warning("no records recognized (empty results, or the catalog markup changed)");
    } else if cli.verbose {
        echo::print_count(results.len(), "result");
    }

    if cli.json {
        return Ok(serde_json::to_string_pretty(&results)?);
    }

    let mut out = String::new();
    for (i, result) in results.iter().enumerate() {
        match result {
            SearchResult::Book(item) => {
                out.push_str(&render_item(i + 1, item));
                out.push('\n');
            }
            SearchResult::List(list) => {
                out.push_str(&format!(
                    "{}. [{}] {} by {} ({} items, created {})\n",
                    i + 1,
                    list.kind,
                    list.title,
                    list.user.name,
                    list.item_count,
                    list.created_on
                ));
            }
        }
    }
    Ok(out)
}

async fn run_item(cli: &Cli, session: &Session, id: u64) -> anyhow::Result<String> {
    if cli.verbose {
        echo::print_info(&format!("Fetching details for item {}", id));
    }

    let html = session.get(Page::ItemDetails { id }).await?;
    let details = pages::item_details(&stacks_core::Document::parse(&html));

    if cli.json {
        return Ok(serde_json::to_string_pretty(&details)?);
    }

    let mut out = String::new();
    for (label, value) in &details.attributes {
        match value {
            stacks_core::DetailValue::Text(text) => out.push_str(&format!("{}: {}\n", label, text)),
            stacks_core::DetailValue::List(entries) => out.push_str(&format!("{}: {}\n", label, entries.join(", "))),
        }
    }
    if !details.description.is_empty() {
        out.push('\n');
        out.push_str(&details.description);
        out.push('\n');
    }
    if !details.keywords.is_empty() {
        out.push('\n');
        out.push_str(&format!("Keywords: {}\n", details.keywords.join("; ")));
    }
    Ok(out)
}

async fn run_user(cli: &Cli, session: &Session, name: &str) -> anyhow::Result<String> {
    if cli.verbose {
        echo::print_step(1, 4, &format!("Looking up user {}", name));
    }
    let user = session.user(name).await?;

    if cli.verbose {
        echo::print_step(2, 4, "Fetching followers");
    }
    let followers = user.followers(session).await?;

    if cli.verbose {
        echo::print_step(3, 4, "Fetching following");
    }
    let following = user.following(session).await?;

    if cli.verbose {
        echo::print_step(4, 4, "Fetching lists");
    }
    let lists = user.lists(session).await?;

    if cli.json {
        return Ok(serde_json::to_string_pretty(&serde_json::json!({
            "name": user.name,
            "id": user.id,
            "followers": followers,
            "following": following,
            "lists": lists,
        }))?);
    }

    let mut out = format!("{} (#{})\n", user.name, user.id);
    out.push_str(&format!("\nFollowers ({}):\n", followers.len()));
    for follower in &followers {
        out.push_str(&format!("  {}\n", follower.name));
    }
    out.push_str(&format!("\nFollowing ({}):\n", following.len()));
    for followed in &following {
        out.push_str(&format!("  {}\n", followed.name));
    }
    out.push_str(&format!("\nLists ({}):\n", lists.len()));
    for list in &lists {
        out.push_str(&format!("  {} ({} items)\n", list.title, list.item_count));
    }
    Ok(out)
}

async fn run_branch(cli: &Cli, session: &Session, name: &str) -> anyhow::Result<String> {
    if cli.verbose {
        echo::print_info(&format!("Looking up branch {}", name));
    }

    let branch = session.branch(name).await?;
    let hours = branch.hours(session).await?;

    if cli.json {
        return Ok(serde_json::to_string_pretty(&serde_json::json!({
            "name": branch.name,
            "id": branch.id,
            "hours": hours,
        }))?);
    }

    let mut out = format!("{} (#{})\n", branch.name, branch.id);
    for (day, value) in &hours {
        out.push_str(&format!("  {}: {}\n", day, value));
    }
    Ok(out)
}

enum AccountPage {
    Holds,
    Checkouts,
    Shelf(Shelf),
}

async fn run_account(
    cli: &Cli,
    session: &Session,
    account: &AccountArgs,
    page: AccountPage,
) -> anyhow::Result<String> {
    let (barcode, pin) = account.credentials()?;

    if cli.verbose {
        echo::print_step(1, 2, "Signing in");
    }
    session.login(&barcode, &pin).await.context("Login failed")?;

    if cli.verbose {
        echo::print_step(2, 2, "Fetching listing");
    }
    let items = match page {
        AccountPage::Holds => session.holds().await?,
        AccountPage::Checkouts => session.checkouts().await?,
        AccountPage::Shelf(shelf) => session.shelf(shelf).await?,
    };

    if items.is_empty() {
        echo::print_warning("no records recognized (empty listing, or the catalog markup changed)");
    } else if cli.verbose {
        echo::print_count(items.len(), "item");
    }

    if cli.json {
        return Ok(serde_json::to_string_pretty(&items)?);
    }
    Ok(render_items(&items))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        echo::print_banner();
    }

    let endpoints = match &cli.base_url {
        Some(base) => Endpoints::new(base).context("Invalid base URL")?,
        None => Endpoints::default(),
    };

    let mut config = FetchConfig { timeout: cli.timeout, ..Default::default() };
    if let Some(user_agent) = &cli.user_agent {
        config.user_agent = user_agent.clone();
    }

    let session = Session::new(endpoints, config).context("Failed to build HTTP session")?;

    let output = match &cli.command {
        Command::Search { query, kind, pages } => run_search(&cli, &session, query, *kind, *pages).await?,
        Command::Item { id } => run_item(&cli, &session, *id).await?,
        Command::User { name } => run_user(&cli, &session, name).await?,
        Command::Branch { name } => run_branch(&cli, &session, name).await?,
        Command::Holds(account) => run_account(&cli, &session, account, AccountPage::Holds).await?,
        Command::Checkouts(account) => run_account(&cli, &session, account, AccountPage::Checkouts).await?,
        Command::Shelf { shelf, account } => run_account(&cli, &session, account, AccountPage::Shelf(*shelf)).await?,
    };

    match &cli.output {
        Some(path) => {
            fs::write(path, &output).with_context(|| format!("Failed to write {}", path.display()))?;
            if cli.verbose {
                echo::print_success(&format!("Wrote {}", path.display()));
            }
        }
        None => print!("{}", output),
    }

    Ok(())
}
