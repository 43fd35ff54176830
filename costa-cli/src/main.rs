use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use costa_core::{
    CatalogItem, CatalogStore, CategoryFilter, Lang, MemoryStore, MoveDirection, PriceBand,
    QueryCriteria, SortDirection, SortKey, StatusFilter, query, reorder,
};
use costa_schedule::ScheduleExtractor;
use std::path::PathBuf;

mod snapshot;

#[derive(Parser, Debug)]
#[command(name = "costa", version, about = "Costa Tours catalog CLI")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List catalog items with search/filter/sort applied
    List {
        /// Path to the catalog snapshot (JSON array of items)
        #[arg(long, default_value = "catalog.json")]
        catalog: PathBuf,

        /// Case-insensitive substring searched across localized fields
        #[arg(long, default_value = "")]
        search: String,

        /// all | active | inactive | featured (unknown values mean all)
        #[arg(long, default_value = "all")]
        status: String,

        /// all | exact category tag (case-sensitive)
        #[arg(long, default_value = "all")]
        category: String,

        /// all | low | medium | high
        #[arg(long, default_value = "all")]
        price_band: String,

        /// featured | name | price | created_at | order | count
        #[arg(long, default_value = "featured")]
        sort: String,

        /// asc | desc
        #[arg(long, default_value = "asc")]
        dir: String,

        /// Language for name sorting and display: es | en | de
        #[arg(long, default_value = "es")]
        lang: String,

        /// Limit number of rows printed (default: 50)
        #[arg(long, default_value_t = 50)]
        limit: usize,
    },

    /// Show one item with its derived schedule entries
    Show {
        #[arg(long, default_value = "catalog.json")]
        catalog: PathBuf,

        /// Item id
        id: u32,
    },

    /// Move an item one position up or down in the hand-ordered sequence
    Move {
        #[arg(long, default_value = "catalog.json")]
        catalog: PathBuf,

        /// Item id
        id: u32,

        /// up | down
        direction: String,

        /// Write the reordered snapshot back to the catalog file
        #[arg(long)]
        write: bool,
    },
}

fn parse_lang(s: &str) -> Lang {
    match s {
        "en" => Lang::En,
        "de" => Lang::De,
        _ => Lang::Es,
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::List {
            catalog,
            search,
            status,
            category,
            price_band,
            sort,
            dir,
            lang,
            limit,
        } => {
            let items = snapshot::load_catalog(&catalog)?;
            let lang = parse_lang(&lang);
            let criteria = QueryCriteria::default()
                .with_search(search)
                .with_status(StatusFilter::parse(&status))
                .with_category(CategoryFilter::parse(&category))
                .with_price_band(PriceBand::parse(&price_band))
                .with_sort(SortKey::parse(&sort, lang), SortDirection::parse(&dir));

            let view = query(&items, &criteria);
            println!("{} of {} items match\n", view.len(), items.len());
            for item in view.iter().take(limit) {
                print_row(item, lang);
            }
        }

        Command::Show { catalog, id } => {
            let items = snapshot::load_catalog(&catalog)?;
            let store = MemoryStore::from_items(items)?;
            let Some(item) = store.fetch_one(id) else {
                bail!("no item with id {id} in {}", catalog.display());
            };

            println!("#{} {}", item.id, item.name.es);
            println!("  en: {} | de: {}", item.name.en, item.name.de);
            println!("  category: {} | price: {:.2}", item.category_tag, item.price);
            println!(
                "  featured: {} | active: {} | order: {}",
                item.featured, item.active, item.sort_order
            );

            let extractor = ScheduleExtractor::new().context("building schedule extractor")?;
            let schedules = extractor.schedule_view(&item);
            if schedules.is_empty() {
                println!("  no schedules");
            } else {
                println!("  schedules:");
                for entry in &schedules {
                    let marker = if entry.is_primary { "*" } else { " " };
                    println!(
                        "  {marker} {} ({} - {})",
                        entry.label, entry.start_time, entry.end_time
                    );
                }
            }
        }

        Command::Move {
            catalog,
            id,
            direction,
            write,
        } => {
            let Some(direction) = MoveDirection::parse(&direction) else {
                bail!("direction must be 'up' or 'down'");
            };

            let items = snapshot::load_catalog(&catalog)?;
            let batch = reorder(&items, id, direction);

            let mut store = MemoryStore::from_items(items)?;
            store.batch_reorder(&batch).context("applying reorder batch")?;

            let view = query(
                &store.fetch_all(),
                &QueryCriteria::default().with_sort(SortKey::SortOrder, SortDirection::Asc),
            );
            for item in &view {
                println!("{:>3}  #{} {}", item.sort_order, item.id, item.name.es);
            }

            if write {
                snapshot::save_catalog(&catalog, &store.fetch_all())?;
                println!("\nwrote {}", catalog.display());
            }
        }
    }

    Ok(())
}

fn print_row(item: &CatalogItem, lang: Lang) {
    let flags = format!(
        "{}{}",
        if item.featured { "F" } else { "-" },
        if item.active { "A" } else { "-" }
    );
    println!(
        "#{:<4} {:<30} {:>8.2}  {}  {}",
        item.id,
        item.name.get(lang),
        item.price,
        flags,
        item.category_tag
    );
}
