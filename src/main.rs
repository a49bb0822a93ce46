//! linkshelf demo: seeds an in-memory collection and walks through ingestion,
//! grouping, duplicate detection, queries and backup.
//!
//! The RPC server lives in the `linkshelf-rpc` binary.

use std::collections::HashSet;
use std::error::Error;
use std::sync::Arc;

use chrono::Utc;
use linkshelf::app::App;
use linkshelf::database::{Database, MemoryStore, SqliteStore};
use linkshelf::logging;
use linkshelf::managers::collection_store::{CollectionStoreTrait, Confirmation};
use linkshelf::services::input_normalizer;
use linkshelf::services::link_query::{self, GroupFilter, LinkQuery, SortOrder};
use linkshelf::services::settings_engine::SettingsEngineTrait;

const SAMPLE_INPUT: &str = "\
https://www.youtube.com/watch?v=HHEQVXNCrW8 | Rust in 100 seconds
https://www.hotstar.com/in/shows/the-office/1260023113 | The Office
https://youtu.be/Jzo1inARMd4
https://www.geeksforgeeks.org/bayesian-information-criterion-bic/ | Bayesian Information Criterion
github.com/rust-lang/rust
https://github.com/rust-lang/rust/
not a link";

fn main() -> Result<(), Box<dyn Error>> {
    logging::init_tracing();

    println!();
    println!("linkshelf v{}: demo mode", env!("CARGO_PKG_VERSION"));
    println!();

    let mut app = App::with_storage(Arc::new(MemoryStore::new()));

    demo_ingestion(&mut app)?;
    demo_groups(&mut app)?;
    demo_duplicates(&mut app)?;
    demo_queries(&app);
    demo_backup(&mut app)?;
    demo_database()?;

    println!("═══════════════════════════════════════════════════════════════");
    println!("  ✅ All components demonstrated successfully!");
    println!("═══════════════════════════════════════════════════════════════");
    Ok(())
}

fn section(name: &str) {
    println!("───────────────────────────────────────────────────────────────");
    println!("  📦 {}", name);
    println!("───────────────────────────────────────────────────────────────");
}

fn group_name(app: &App, id: &str) -> String {
    app.store
        .group(id)
        .map(|g| g.name.clone())
        .unwrap_or_else(|| id.to_string())
}

fn demo_ingestion(app: &mut App) -> Result<(), Box<dyn Error>> {
    section("Ingestion");

    let formatted = input_normalizer::auto_format_block("https://en.wikipedia.org/wiki/Rust_(programming_language)");
    println!("  Auto-format: {}", formatted);

    let current = app.current_group.clone();
    let ids = app.store.add_links(SAMPLE_INPUT, &current)?;
    println!("  Added {} link(s) from {} input lines", ids.len(), SAMPLE_INPUT.lines().count());

    for link in app.store.links() {
        println!(
            "    [{:<8}] {:<40} {:<15} {}",
            link.kind.as_str(),
            link.title,
            group_name(app, &link.group),
            link.tags.join(",")
        );
    }
    println!("  ✓ Ingestion OK");
    println!();
    Ok(())
}

fn demo_groups(app: &mut App) -> Result<(), Box<dyn Error>> {
    section("Groups");

    let work = app.store.create_group("Work", Some("#0ea5e9"))?;
    println!("  Created group: Work ({})", &work[..8]);

    match app.store.create_group("work", None) {
        Ok(_) => println!("  Unexpectedly created a second 'work' group"),
        Err(e) => println!("  Rejected duplicate: {}", e),
    }

    let first: HashSet<String> = app.store.links().iter().take(2).map(|l| l.id.clone()).collect();
    let moved = app.store.move_links(&first, &work)?;
    println!("  Moved {} link(s) to Work", moved);

    for group in app.store.groups() {
        println!("    {:<15} {:>2} link(s)  {}", group.name, group.count, group.color);
    }
    println!("  ✓ Groups OK");
    println!();
    Ok(())
}

fn demo_duplicates(app: &mut App) -> Result<(), Box<dyn Error>> {
    section("Duplicate Detection");

    let report = app.store.duplicate_report();
    println!("  Found {} duplicate pair(s)", report.pairs.len());
    for (original, duplicate) in &report.preview {
        println!("    {} ~ {}", original, duplicate);
    }

    let pairs = app.store.find_duplicates();
    let confirm = app.confirmation(false);
    if let Err(e) = app.store.remove_duplicates(&pairs, confirm) {
        println!("  Without confirmation: {}", e);
    }
    let removed = app.store.remove_duplicates(&pairs, Confirmation::Confirmed)?;
    println!("  Removed {} duplicate(s), {} link(s) left", removed, app.store.links().len());
    println!("  ✓ Duplicate Detection OK");
    println!();
    Ok(())
}

fn demo_queries(app: &App) {
    section("Queries");

    let query = LinkQuery {
        search: "rust".to_string(),
        group: GroupFilter::All,
        sort: SortOrder::Title,
    };
    let hits = link_query::snapshot(app.store.links(), &query);
    println!("  Search 'rust': {} result(s)", hits.len());

    let stats = link_query::statistics(app.store.links(), app.store.groups().len(), Utc::now());
    println!(
        "  Stats: {} link(s), {} group(s), {} added today",
        stats.total_links, stats.total_groups, stats.today_links
    );

    let size = app.settings_engine.get_settings().favicon_size;
    println!("  Favicon: {}", link_query::favicon_url("github.com", size));
    println!("  ✓ Queries OK");
    println!();
}

fn demo_backup(app: &mut App) -> Result<(), Box<dyn Error>> {
    section("Backup");

    let exported = app.store.export_json()?;
    println!("  Exported {} bytes", exported.len());

    let mut restored = App::with_storage(Arc::new(MemoryStore::new()));
    let summary = restored.store.import_json(&exported)?;
    println!(
        "  Imported into empty collection: {} link(s), {} group(s) added",
        summary.links_added, summary.groups_added
    );

    let again = app.store.import_json(&exported)?;
    println!("  Re-import into source: {} link(s) added", again.links_added);
    println!("  ✓ Backup OK");
    println!();
    Ok(())
}

fn demo_database() -> Result<(), Box<dyn Error>> {
    section("Database Layer");

    let db = Database::open_in_memory()?;
    let tables: Vec<String> = {
        let conn = db.connection();
        let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")?;
        let rows = stmt.query_map([], |row| row.get(0))?;
        rows.filter_map(|r| r.ok()).collect()
    };
    println!("  Created {} tables: {}", tables.len(), tables.join(", "));

    let mut app = App::with_storage(Arc::new(SqliteStore::new(db)));
    let current = app.current_group.clone();
    app.store.add_links("https://stackoverflow.com/questions/tagged/rust", &current)?;
    println!("  Persisted {} link(s) through SQLite", app.store.links().len());
    println!("  ✓ Database + migrations OK");
    println!();
    Ok(())
}
