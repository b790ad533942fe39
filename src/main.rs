use clap::{Parser, ValueEnum};
use place_resolver::config::{IndexConfig, ResolverConfig, DEFAULT_PORT, DEFAULT_TIMEOUT_SECS};
use place_resolver::output::{CsvSink, JsonLinesSink, ResultSink};
use place_resolver::place::ElasticsearchIndex;
use place_resolver::reader::{ReaderOptions, ReaderRegistry};
use place_resolver::batch::run_batch;
use place_resolver::{logging, PlaceResolver};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

/// Resolve place and institution names to encyclopedia entries and coordinates.
///
/// Reads one name per line (.txt) or a table (.csv), looks each name up in an
/// Elasticsearch index of encyclopedia articles, and writes one record per name.
///
/// Examples:
///   resolve-places institutions.txt enwiki localhost
///   resolve-places places.csv enwiki es.example.org -p 443 -f /search --id-column key
///   resolve-places places.txt enwiki --format csv -o resolved.csv --verbose
#[derive(Parser)]
#[command(name = "resolve-places", version, about, long_about = None)]
struct Cli {
    /// Input file (.txt or .csv).
    input: PathBuf,

    /// Name of the search index.
    index_name: String,

    /// Elasticsearch host.
    #[arg(default_value = "localhost", env = "PLACE_RESOLVER_HOST")]
    host: String,

    #[arg(short, long, default_value_t = DEFAULT_PORT, env = "PLACE_RESOLVER_PORT")]
    port: u16,

    /// Path prefix in front of the index (e.g. behind a reverse proxy).
    #[arg(short = 'f', long, default_value = "", env = "PLACE_RESOLVER_URL_PREFIX")]
    url_prefix: String,

    #[arg(short = 'u', long, env = "PLACE_RESOLVER_USER")]
    es_user: Option<String>,

    #[arg(short = 's', long, env = "PLACE_RESOLVER_PASSWORD", hide_env_values = true)]
    es_password: Option<String>,

    /// Request timeout in seconds.
    #[arg(short, long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    /// Extra attempts after a transport failure.
    #[arg(long, default_value_t = 0)]
    retries: u32,

    /// CSV only: column holding the record id.
    #[arg(long)]
    id_column: Option<String>,

    /// CSV only: column holding the place name.
    #[arg(long)]
    place_column: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Write results here instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log search progress to stderr.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Csv,
}

impl Cli {
    fn index_config(&self) -> IndexConfig {
        IndexConfig {
            port: self.port,
            url_prefix: self.url_prefix.clone(),
            username: self.es_user.clone(),
            password: self.es_password.clone(),
            timeout: Duration::from_secs(self.timeout),
            retries: self.retries,
            ..IndexConfig::new(&self.host, &self.index_name)
        }
    }

    fn reader_options(&self) -> ReaderOptions {
        ReaderOptions {
            id_column: self.id_column.clone(),
            place_column: self.place_column.clone(),
        }
    }
}

fn open_sink(cli: &Cli) -> io::Result<Box<dyn ResultSink>> {
    let out: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout())),
    };
    Ok(match cli.format {
        OutputFormat::Json => Box::new(JsonLinesSink::new(out)),
        OutputFormat::Csv => Box::new(CsvSink::new(out)),
    })
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_logger(cli.verbose);

    let index = match ElasticsearchIndex::new(&cli.index_config()) {
        Ok(index) => index,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(2);
        }
    };
    let resolver = PlaceResolver::with_config(index, ResolverConfig::default());

    let places = match ReaderRegistry::default()
        .open(&cli.input, &cli.reader_options())
        .and_then(|source| source.read_places())
    {
        Ok(places) => places,
        Err(e) => {
            eprintln!("Error: {}: {}", cli.input.display(), e);
            return ExitCode::from(2);
        }
    };

    let mut sink = match open_sink(&cli) {
        Ok(sink) => sink,
        Err(e) => {
            eprintln!("Error: cannot open output: {}", e);
            return ExitCode::from(2);
        }
    };

    match run_batch(&resolver, places, sink.as_mut()) {
        Ok(report) if report.failed > 0 => {
            eprintln!("{} of {} record(s) failed", report.failed, report.written);
            ExitCode::FAILURE
        }
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(2)
        }
    }
}
