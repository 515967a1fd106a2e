//! Tetra Warehouse CLI
//!
//! Load tetrahedra from coordinate files, query them, and inspect the
//! parameter cache.
//!
//! Usage:
//!     tetra show shapes.txt
//!     tetra search shapes.txt --volume 0 1.5
//!     tetra sort shapes.txt --by area --json
//!     tetra shell --file ~/shapes.txt

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use tetra_warehouse::adapters::reader::TetrahedronFactory;
use tetra_warehouse::adapters::{
    range_for, IdSpecification, LoadReport, SharedWarehouse, SortKey, TetrahedronCalculator,
    TetrahedronLoader, TetrahedronRepository, Warehouse,
};
use tetra_warehouse::core::{
    LoadError, Metric, Point, PointLabel, ShapeId, ShapeParameters, ShapesConfig, Tetrahedron,
    UpdateOutcome,
};
use tetra_warehouse::ports::{parse_numbers, ShapeCalculator, ShapeFactory, Specification};

/// Tetra Warehouse - tetrahedra with an always-fresh parameter cache
#[derive(Parser)]
#[command(name = "tetra")]
#[command(version)]
#[command(about = "Tetrahedron geometry, queries and parameter cache", long_about = None)]
struct Cli {
    /// Print records as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Treat volumes at or below this value as degenerate
    #[arg(long, global = true, default_value = "0.0")]
    tolerance: f64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every loaded tetrahedron with its cached parameters
    Show {
        /// Coordinate file, 12 numbers per line
        file: String,
    },

    /// Compute parameters in checked mode
    Report {
        /// Coordinate file, 12 numbers per line
        file: String,

        /// Only report this tetrahedron
        #[arg(long)]
        id: Option<String>,
    },

    /// Filter tetrahedra by id or metric range
    Search {
        /// Coordinate file, 12 numbers per line
        file: String,

        #[command(flatten)]
        criteria: SearchArgs,
    },

    /// Sort tetrahedra by id or metric
    Sort {
        /// Coordinate file, 12 numbers per line
        file: String,

        /// id, area, perimeter or volume
        #[arg(long, default_value = "id")]
        by: SortKey,
    },

    /// Interactive menu
    Shell {
        /// Coordinate file to load on start
        #[arg(long)]
        file: Option<String>,
    },
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct SearchArgs {
    /// Exact id
    #[arg(long)]
    id: Option<String>,

    /// Inclusive surface area range
    #[arg(long, num_args = 2, value_names = ["MIN", "MAX"], allow_negative_numbers = true)]
    area: Option<Vec<f64>>,

    /// Inclusive perimeter range
    #[arg(long, num_args = 2, value_names = ["MIN", "MAX"], allow_negative_numbers = true)]
    perimeter: Option<Vec<f64>>,

    /// Inclusive volume range
    #[arg(long, num_args = 2, value_names = ["MIN", "MAX"], allow_negative_numbers = true)]
    volume: Option<Vec<f64>>,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("No tetrahedron found with ID: {0}")]
    NotFound(String),

    #[error("Invalid search criteria")]
    InvalidCriteria,

    #[error("JSON output failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] io::Error),
}

type CliResult<T> = Result<T, CliError>;

/// One printed tetrahedron
#[derive(Serialize)]
struct ShapeRecord<'a> {
    id: &'a ShapeId,
    points: &'a [Point; 4],
    #[serde(skip_serializing_if = "Option::is_none")]
    parameters: Option<ShapeParameters>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Repository, cache and collaborators for one run
struct Session {
    calculator: Arc<dyn ShapeCalculator>,
    warehouse: SharedWarehouse,
    repository: TetrahedronRepository,
    loader: TetrahedronLoader,
    factory: TetrahedronFactory,
}

impl Session {
    fn new(config: &ShapesConfig) -> Self {
        let warehouse = Warehouse::with_default_calculators(config).into_shared();
        let repository = TetrahedronRepository::with_config(config).observed_by(&warehouse);

        Self {
            calculator: Arc::new(TetrahedronCalculator::from_config(config)),
            warehouse,
            repository,
            loader: TetrahedronLoader::from_config(config),
            factory: TetrahedronFactory::from_config(config),
        }
    }

    fn load(&mut self, file: &str) -> CliResult<LoadReport> {
        let path = expand_path(file);
        Ok(self.loader.load_file(&path, &mut self.repository)?)
    }

    fn cached_record<'a>(&self, t: &'a Tetrahedron) -> ShapeRecord<'a> {
        ShapeRecord {
            id: t.id(),
            points: t.points(),
            parameters: self.warehouse.read().get(t.id()),
            error: None,
        }
    }

    fn checked_record<'a>(&self, t: &'a Tetrahedron) -> ShapeRecord<'a> {
        let (parameters, error) = match self.calculator.parameters_checked(t) {
            Ok(parameters) => (Some(parameters), None),
            Err(e) => (None, Some(e.to_string())),
        };
        ShapeRecord {
            id: t.id(),
            points: t.points(),
            parameters,
            error,
        }
    }
}

fn expand_path(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

fn print_records(out: &mut impl Write, records: &[ShapeRecord<'_>], json: bool) -> CliResult<()> {
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(records)?)?;
        return Ok(());
    }

    for record in records {
        let [a, b, c, d] = record.points;
        writeln!(out, "{}", record.id)?;
        writeln!(out, "  A: {}  B: {}", a, b)?;
        writeln!(out, "  C: {}  D: {}", c, d)?;
        match (&record.parameters, &record.error) {
            (Some(p), _) => writeln!(
                out,
                "  Area: {}  Perimeter: {}  Volume: {}",
                p.area, p.perimeter, p.volume
            )?,
            (None, Some(e)) => writeln!(out, "  Error: {}", e)?,
            (None, None) => writeln!(out, "  (no cached parameters)")?,
        }
    }
    writeln!(out, "Total: {} tetrahedrons", records.len())?;
    Ok(())
}

fn criteria_spec(criteria: SearchArgs, calculator: Arc<dyn ShapeCalculator>) -> CliResult<Box<dyn Specification>> {
    if let Some(id) = criteria.id {
        return Ok(Box::new(IdSpecification::new(id)));
    }

    let (metric, bounds) = match (criteria.area, criteria.perimeter, criteria.volume) {
        (Some(b), _, _) => (Metric::Area, b),
        (_, Some(b), _) => (Metric::Perimeter, b),
        (_, _, Some(b)) => (Metric::Volume, b),
        _ => return Err(CliError::InvalidCriteria),
    };
    match bounds.as_slice() {
        [min, max] => Ok(range_for(metric, calculator, *min, *max)),
        _ => Err(CliError::InvalidCriteria),
    }
}

fn cmd_show(session: &mut Session, file: &str, json: bool) -> CliResult<()> {
    let report = session.load(file)?;
    if !json && report.skipped > 0 {
        eprintln!("Skipped {} invalid lines", report.skipped);
    }

    let records: Vec<_> = session
        .repository
        .iter()
        .map(|t| session.cached_record(t))
        .collect();
    print_records(&mut io::stdout(), &records, json)
}

fn cmd_report(session: &mut Session, file: &str, id: Option<&str>, json: bool) -> CliResult<()> {
    session.load(file)?;

    let shapes: Vec<&Tetrahedron> = match id {
        Some(id) => {
            let found = session.repository.query(&IdSpecification::new(id));
            if found.is_empty() {
                return Err(CliError::NotFound(id.to_string()));
            }
            found
        }
        None => session.repository.iter().collect(),
    };

    let records: Vec<_> = shapes.into_iter().map(|t| session.checked_record(t)).collect();
    print_records(&mut io::stdout(), &records, json)
}

fn cmd_search(session: &mut Session, file: &str, criteria: SearchArgs, json: bool) -> CliResult<()> {
    session.load(file)?;
    let spec = criteria_spec(criteria, session.calculator.clone())?;

    let records: Vec<_> = session
        .repository
        .query(&spec)
        .into_iter()
        .map(|t| session.cached_record(t))
        .collect();
    if records.is_empty() && !json {
        println!("No tetrahedrons match the criteria.");
        return Ok(());
    }
    print_records(&mut io::stdout(), &records, json)
}

fn cmd_sort(session: &mut Session, file: &str, by: SortKey, json: bool) -> CliResult<()> {
    session.load(file)?;
    let compare = by.comparator(session.calculator.clone());
    session.repository.sort_by(|a, b| compare(a, b));

    let records: Vec<_> = session
        .repository
        .iter()
        .map(|t| session.cached_record(t))
        .collect();
    print_records(&mut io::stdout(), &records, json)
}

fn cmd_shell(session: &mut Session, file: Option<&str>, json: bool) -> CliResult<()> {
    if let Some(file) = file {
        let report = session.load(file)?;
        println!("Successfully loaded {} tetrahedrons", report.loaded_count());
    }

    let stdin = io::stdin();
    let mut shell = Shell {
        session,
        input: stdin.lock(),
        out: io::stdout(),
        json,
    };
    shell.run()
}

/// Line-oriented interactive menu
struct Shell<'s, R, W> {
    session: &'s mut Session,
    input: R,
    out: W,
    json: bool,
}

impl<R: BufRead, W: Write> Shell<'_, R, W> {
    fn run(&mut self) -> CliResult<()> {
        loop {
            writeln!(self.out, "\n--- Tetrahedron Management System ---")?;
            writeln!(self.out, "1. Load tetrahedrons from file")?;
            writeln!(self.out, "2. Add a tetrahedron manually")?;
            writeln!(self.out, "3. Display all tetrahedrons")?;
            writeln!(self.out, "4. Calculate area, perimeter and volume")?;
            writeln!(self.out, "5. Search tetrahedrons")?;
            writeln!(self.out, "6. Sort tetrahedrons")?;
            writeln!(self.out, "7. Display warehouse information")?;
            writeln!(self.out, "8. Edit a tetrahedron")?;
            writeln!(self.out, "0. Exit")?;

            let Some(choice) = self.prompt("Enter your choice: ")? else {
                break;
            };
            match choice.as_str() {
                "1" => self.load()?,
                "2" => self.add()?,
                "3" => self.display_all()?,
                "4" => self.calculate()?,
                "5" => self.search()?,
                "6" => self.sort()?,
                "7" => self.warehouse_info()?,
                "8" => self.edit()?,
                "0" | "q" | "quit" | "exit" => break,
                _ => writeln!(self.out, "Invalid choice. Please try again.")?,
            }
        }
        tracing::info!("shell terminated");
        Ok(())
    }

    /// Print `message`, read one trimmed line; `None` on end of input
    fn prompt(&mut self, message: &str) -> CliResult<Option<String>> {
        write!(self.out, "{}", message)?;
        self.out.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn prompt_number(&mut self, message: &str) -> CliResult<Option<f64>> {
        let Some(text) = self.prompt(message)? else {
            return Ok(None);
        };
        match text.parse::<f64>() {
            Ok(value) => Ok(Some(value)),
            Err(_) => {
                writeln!(self.out, "Invalid number: {:?}", text)?;
                Ok(None)
            }
        }
    }

    fn load(&mut self) -> CliResult<()> {
        let Some(file) = self.prompt("Enter file path: ")? else {
            return Ok(());
        };
        match self.session.load(&file) {
            Ok(report) => writeln!(
                self.out,
                "Successfully loaded {} tetrahedrons ({} lines skipped)",
                report.loaded_count(),
                report.skipped
            )?,
            Err(e) => writeln!(self.out, "Error reading file: {}", e)?,
        }
        Ok(())
    }

    fn add(&mut self) -> CliResult<()> {
        let Some(id) = self.prompt("Enter ID (blank to generate): ")? else {
            return Ok(());
        };
        let Some(line) = self.prompt("Enter 12 coordinates (A B C D, x y z each): ")? else {
            return Ok(());
        };

        let tokens: Vec<&str> = line.split_whitespace().collect();
        let factory = &self.session.factory;
        let created = if id.is_empty() {
            factory.create_from_tokens(&tokens)
        } else {
            parse_numbers(&tokens, factory.parameter_count())
                .and_then(|coordinates| factory.create_with_id(id.as_str(), &coordinates))
        };

        let tetrahedron = match created {
            Ok(t) => t,
            Err(e) => {
                writeln!(self.out, "{}", e)?;
                return Ok(());
            }
        };

        if let Err(e) = self.session.calculator.validate(&tetrahedron) {
            writeln!(self.out, "Tetrahedron rejected: {}", e)?;
            return Ok(());
        }

        let id = tetrahedron.id().clone();
        match self.session.repository.add(tetrahedron) {
            Ok(()) => writeln!(self.out, "Added {}", id)?,
            Err(e) => writeln!(self.out, "{}", e)?,
        }
        Ok(())
    }

    fn display_all(&mut self) -> CliResult<()> {
        if self.session.repository.is_empty() {
            writeln!(self.out, "No tetrahedrons in the repository.")?;
            return Ok(());
        }
        if !self.json {
            writeln!(self.out, "\n--- All Tetrahedrons ---")?;
        }
        let records: Vec<_> = self
            .session
            .repository
            .iter()
            .map(|t| self.session.cached_record(t))
            .collect();
        print_records(&mut self.out, &records, self.json)
    }

    fn calculate(&mut self) -> CliResult<()> {
        let Some(id) = self.prompt("Enter tetrahedron ID: ")? else {
            return Ok(());
        };
        let Some(t) = self.session.repository.get(&id) else {
            writeln!(self.out, "No tetrahedron found with ID: {}", id)?;
            return Ok(());
        };
        let record = self.session.checked_record(t);
        print_records(&mut self.out, &[record], self.json)
    }

    fn search(&mut self) -> CliResult<()> {
        writeln!(self.out, "\n--- Search Tetrahedrons ---")?;
        writeln!(self.out, "1. Search by ID")?;
        writeln!(self.out, "2. Search by area range")?;
        writeln!(self.out, "3. Search by perimeter range")?;
        writeln!(self.out, "4. Search by volume range")?;
        let Some(choice) = self.prompt("Enter your choice: ")? else {
            return Ok(());
        };

        let spec: Box<dyn Specification> = match choice.as_str() {
            "1" => {
                let Some(id) = self.prompt("Enter ID: ")? else {
                    return Ok(());
                };
                Box::new(IdSpecification::new(id))
            }
            "2" | "3" | "4" => {
                let metric = match choice.as_str() {
                    "2" => Metric::Area,
                    "3" => Metric::Perimeter,
                    _ => Metric::Volume,
                };
                let Some(min) = self.prompt_number(&format!("Enter minimum {}: ", metric))? else {
                    return Ok(());
                };
                let Some(max) = self.prompt_number(&format!("Enter maximum {}: ", metric))? else {
                    return Ok(());
                };
                range_for(metric, self.session.calculator.clone(), min, max)
            }
            _ => {
                writeln!(self.out, "Invalid choice.")?;
                return Ok(());
            }
        };

        let records: Vec<_> = self
            .session
            .repository
            .query(&spec)
            .into_iter()
            .map(|t| self.session.cached_record(t))
            .collect();
        if records.is_empty() {
            writeln!(self.out, "No tetrahedrons match the criteria.")?;
            return Ok(());
        }
        print_records(&mut self.out, &records, self.json)
    }

    fn sort(&mut self) -> CliResult<()> {
        let Some(key) = self.prompt("Sort by (id, area, perimeter, volume): ")? else {
            return Ok(());
        };
        let key = match key.parse::<SortKey>() {
            Ok(key) => key,
            Err(e) => {
                writeln!(self.out, "{}", e)?;
                return Ok(());
            }
        };

        let compare = key.comparator(self.session.calculator.clone());
        self.session.repository.sort_by(|a, b| compare(a, b));
        writeln!(self.out, "Tetrahedrons sorted successfully.")?;
        self.display_all()
    }

    fn warehouse_info(&mut self) -> CliResult<()> {
        let Some(id) = self.prompt("Enter tetrahedron ID: ")? else {
            return Ok(());
        };
        let cached = self.session.warehouse.read().get(id.as_str());
        match cached {
            Some(p) if self.json => {
                writeln!(self.out, "{}", serde_json::to_string_pretty(&p)?)?;
            }
            Some(p) => {
                writeln!(self.out, "\n--- Warehouse Information ---")?;
                writeln!(self.out, "ID: {}", id)?;
                writeln!(self.out, "Area: {}", p.area)?;
                writeln!(self.out, "Perimeter: {}", p.perimeter)?;
                writeln!(self.out, "Volume: {}", p.volume)?;
            }
            None => writeln!(self.out, "No warehouse entry for ID: {}", id)?,
        }
        Ok(())
    }

    fn edit(&mut self) -> CliResult<()> {
        let Some(id) = self.prompt("Enter Tetrahedron ID to update: ")? else {
            return Ok(());
        };
        if self.session.repository.get(&id).is_none() {
            writeln!(self.out, "Tetrahedron not found.")?;
            return Ok(());
        }

        let Some(label) = self.prompt("Which point do you want to update? (A, B, C, D): ")? else {
            return Ok(());
        };
        let label = match label.parse::<PointLabel>() {
            Ok(label) => label,
            Err(e) => {
                writeln!(self.out, "{}", e)?;
                return Ok(());
            }
        };

        let prompt = format!("Enter new coordinates for point {} (x y z): ", label);
        let Some(line) = self.prompt(&prompt)? else {
            return Ok(());
        };
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let point = match parse_numbers(&tokens, 3) {
            Ok(xyz) => Point::new(xyz[0], xyz[1], xyz[2]),
            Err(e) => {
                writeln!(self.out, "Invalid coordinates format: {}", e)?;
                return Ok(());
            }
        };

        match self.session.repository.update_point(&id, label, point) {
            UpdateOutcome::Updated => writeln!(self.out, "Point {} updated.", label)?,
            UpdateOutcome::Rejected => {
                writeln!(self.out, "Update failed: resulting tetrahedron is invalid.")?
            }
            UpdateOutcome::NotFound => writeln!(self.out, "Tetrahedron not found.")?,
        }
        Ok(())
    }
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = ShapesConfig::new().with_degeneracy_tolerance(cli.tolerance);
    let mut session = Session::new(&config);

    let result = match cli.command {
        Commands::Show { file } => cmd_show(&mut session, &file, cli.json),
        Commands::Report { file, id } => cmd_report(&mut session, &file, id.as_deref(), cli.json),
        Commands::Search { file, criteria } => cmd_search(&mut session, &file, criteria, cli.json),
        Commands::Sort { file, by } => cmd_sort(&mut session, &file, by, cli.json),
        Commands::Shell { file } => cmd_shell(&mut session, file.as_deref(), cli.json),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
