// Console front end of the dashboard.
//
// It stands in for the web dispatcher: the dataset is loaded once, the user
// changes the country and institution selectors, and every change recomputes
// the views from the loaded table and renders Markdown previews. Option [4]
// also exports CSV tables and a JSON snapshot for the chart renderer.
use clap::Parser;
use gfgp_dashboard::aggregation::compare_institutions;
use gfgp_dashboard::config::Config;
use gfgp_dashboard::dashboard::{self, CountryView, InstitutionView, Overview};
use gfgp_dashboard::filter::{country_options, institution_options, CountrySelector};
use gfgp_dashboard::loader;
use gfgp_dashboard::output;
use gfgp_dashboard::store::{self, DatasetStore};
use gfgp_dashboard::types::{InstitutionKey, Lookup};
use gfgp_dashboard::util::{format_int, format_number};
use std::io::{self, Write};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Current selector values. Lives on the stack of `main`; derived views are
/// never stored here.
#[derive(Debug, Default)]
struct Session {
    country: CountrySelector,
    institution: Option<InstitutionKey>,
}

fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Print a prompt and read one trimmed line.
fn read_line(prompt: &str) -> String {
    print!("{}", prompt);
    let _ = io::stdout().flush();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf.trim().to_string()
}

fn read_choice() -> String {
    read_line("Enter choice: ")
}

/// Ask whether to go back to the selection menu. `true` for `Y`, `false` for `N`.
fn prompt_back_to_menu() -> bool {
    loop {
        match read_line("Back to Selection Menu (Y/N): ").to_uppercase().as_str() {
            "Y" => return true,
            "N" => return false,
            _ => println!("Invalid choice. Please enter Y or N."),
        }
    }
}

/// Pick an entry from a numbered list, by number or by exact text.
fn pick<'a>(options: &'a [String], prompt: &str) -> Option<&'a str> {
    for (idx, option) in options.iter().enumerate() {
        println!("[{}] {}", idx + 1, option);
    }
    let answer = read_line(prompt);
    if answer.is_empty() {
        return None;
    }
    match answer.parse::<usize>() {
        Ok(n) if (1..=options.len()).contains(&n) => Some(options[n - 1].as_str()),
        _ => options.iter().find(|o| **o == answer).map(String::as_str),
    }
}

fn load(config: &Config) -> Option<&'static DatasetStore> {
    if let Some(existing) = store::global() {
        println!(
            "Dataset already loaded ({} institutions).\n",
            format_int(existing.len())
        );
        return Some(existing);
    }
    let (records, report) = match loader::load_dataset(&config.data, config.encoding) {
        Ok(loaded) => loaded,
        Err(e) => {
            error!(path = %config.data.display(), "load failed: {}", e);
            eprintln!("Failed to load file: {}\n", e);
            return None;
        }
    };
    println!(
        "Processing dataset... ({} rows read, {} institutions loaded)",
        format_int(report.total_rows),
        format_int(report.loaded_rows)
    );
    if report.skipped_rows > 0 {
        println!("Note: {} rows skipped.", format_int(report.skipped_rows));
    }
    if report.numeric_warnings > 0 {
        println!(
            "Note: {} non-numeric scores treated as missing.",
            format_int(report.numeric_warnings)
        );
    }
    if report.unclassified_rows > 0 {
        println!(
            "Info: {} institutions have no recognised country.",
            format_int(report.unclassified_rows)
        );
    }
    if !report.ambiguous_names.is_empty() {
        println!(
            "Info: names shared across countries: {}",
            report.ambiguous_names.join(", ")
        );
    }
    println!();
    match store::install(DatasetStore::new(records)) {
        Ok(installed) => Some(installed),
        Err(e) => {
            error!("{}", e);
            store::global()
        }
    }
}

fn print_overview(overview: &Overview, max_rows: usize) {
    output::preview_table(
        "Number of Institutions per Country",
        None,
        &overview.institutions_per_country,
        max_rows,
    );
    output::preview_table(
        "GFGP Assessment Levels Distribution",
        None,
        &overview.assessment_levels,
        max_rows,
    );
    output::preview_table("Risk Rating Distribution", None, &overview.risk_ratings, max_rows);
}

fn print_country_view(view: &CountryView, max_rows: usize) {
    println!("Country: {}", view.country);
    println!(
        "Total number of institutions: {}",
        format_int(view.total_institutions)
    );
    println!("TOP INSTITUTION: {}", view.ranking.leader_name());
    let leader_country = view.ranking.leader_country_label();
    if !leader_country.is_empty() {
        println!("{}", leader_country);
    }
    println!();
    output::preview_table(
        "Institutions Ranking",
        Some("by assessment level, then due diligence score"),
        &view.ranking.rows,
        max_rows,
    );
    output::preview_table("Overall Score Top Institutions", None, &view.top.overall, max_rows);

    println!("Departments ({})", view.country_caption);
    for (label, split) in [
        ("Medical", &view.departments.medical),
        ("Agriculture", &view.departments.agriculture),
        ("Sociology", &view.departments.sociology),
        ("Business/Commerce/Economics", &view.departments.business),
    ] {
        if split.is_no_data() {
            println!("  {}: no data", label);
        } else {
            println!("  {}: {}", label, split.labels().join(", "));
        }
    }
    println!();
}

fn print_institution_view(view: &Lookup<InstitutionView>, max_rows: usize) {
    let view = match view {
        Lookup::Found(view) => view,
        Lookup::NoSelection => {
            println!("No institution selected.\n");
            return;
        }
        Lookup::NotFound(key) => {
            println!("Institution not found: {}\n", key);
            return;
        }
    };
    println!("{}", view.gauges.institution_label);
    println!("{}", view.gauges.country_label);
    println!(
        "GFGP Assessment Level: {} | Self-Assessment Score: {} | Due Diligence Score: {}",
        view.gauges.assessment_level,
        format_number(view.gauges.self_assessment.value, 2),
        format_number(view.gauges.due_diligence.value, 2)
    );
    let rank = |r: Option<usize>| r.map_or_else(|| "N/A".to_string(), |r| r.to_string());
    println!(
        "Overall ranking: {} | Country ranking: {}",
        rank(view.ranks.global_rank),
        rank(view.ranks.country_rank)
    );
    for section in view.summary.sections() {
        println!("{}: {}", section.section, section.value);
    }
    println!();
    for table in &view.categories {
        output::preview_table(table.title, None, &table.rows, max_rows);
    }
}

fn handle_compare(store: &DatasetStore, session: &Session, config: &Config) {
    let options: Vec<InstitutionKey> = institution_options(store.records(), &session.country);
    let labels: Vec<String> = options.iter().map(ToString::to_string).collect();
    let first = pick(&labels, "First institution: ").and_then(|l| labels.iter().position(|o| o == l));
    let second = pick(&labels, "Second institution: ").and_then(|l| labels.iter().position(|o| o == l));
    let comparison = compare_institutions(
        store.records(),
        first.map(|i| &options[i]),
        second.map(|i| &options[i]),
    );
    match comparison {
        Lookup::Found(c) => {
            output::preview_table("Institution Comparison", None, &c.bars, config.preview_rows.max(8))
        }
        Lookup::NoSelection => println!("Select two institutions to compare.\n"),
        Lookup::NotFound(key) => println!("Institution not found: {}\n", key),
    }
}

fn handle_dashboard(store: &DatasetStore, session: &Session, config: &Config) {
    let snapshot = dashboard::snapshot(
        store,
        &session.country,
        session.institution.as_ref(),
        config.top,
    );
    print_overview(&snapshot.overview, config.preview_rows);
    print_country_view(&snapshot.country, config.preview_rows);
    print_institution_view(&snapshot.institution, config.preview_rows);
    match output::export_snapshot(&config.out_dir, &snapshot) {
        Ok(files) => {
            info!(files = files.len(), dir = %config.out_dir.display(), "exported dashboard");
            println!(
                "(Tables and dashboard.json exported to {})\n",
                config.out_dir.display()
            );
        }
        Err(e) => eprintln!("Write error: {}", e),
    }
}

fn run_batch(config: &Config) {
    let Some(store) = load(config) else {
        return;
    };
    let country = CountrySelector::from_input(config.country.as_deref());
    let session = Session {
        institution: config
            .institution
            .as_deref()
            .map(|name| country.institution_key(name)),
        country,
    };
    handle_dashboard(store, &session, config);
}

fn run_interactive(config: &Config) {
    let mut session = Session::default();
    loop {
        println!("GFGP Assessment Dashboard");
        println!("Country: {}", session.country.label());
        if let Some(key) = &session.institution {
            println!("Institution: {}", key);
        }
        println!("[1] Load the file");
        println!("[2] Select country");
        println!("[3] Select institution");
        println!("[4] Show dashboard");
        println!("[5] Compare institutions");
        println!("[0] Exit\n");
        let choice = read_choice();
        if choice == "0" {
            println!("Exiting the program.");
            break;
        }
        if choice == "1" {
            load(config);
            continue;
        }
        if !["2", "3", "4", "5"].contains(&choice.as_str()) {
            println!("Invalid choice. Please enter 0-5.\n");
            continue;
        }
        let Some(store) = store::global() else {
            println!("Error: No data loaded. Please load the CSV file first (option 1).\n");
            continue;
        };
        match choice.as_str() {
            "2" => {
                let options = country_options(store.records());
                session.country = CountrySelector::from_input(pick(&options, "Country: "));
                session.institution = None;
                println!();
            }
            "3" => {
                let options = institution_options(store.records(), &session.country);
                let labels: Vec<String> = options.iter().map(ToString::to_string).collect();
                session.institution = pick(&labels, "Institution: ")
                    .and_then(|l| labels.iter().position(|o| o == l))
                    .map(|i| options[i].clone());
                println!();
            }
            "4" => {
                println!();
                handle_dashboard(store, &session, config);
                if !prompt_back_to_menu() {
                    println!("Exiting the program.");
                    break;
                }
            }
            _ => handle_compare(store, &session, config),
        }
    }
}

fn main() {
    let config = Config::parse();
    init_tracing(&config.log_level);
    if config.batch {
        run_batch(&config);
    } else {
        run_interactive(&config);
    }
}
