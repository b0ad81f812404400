//! CLI binary for the book-info service.
//!
//! Usage: book-info lookup http://dbpedia.org/resource/Good_Omens

#[cfg(feature = "cli")]
mod cli {
    use clap::{Parser, Subcommand};
    use dbpedia_books::{server, BookQuery, Config, Record};
    use url::Url;

    #[derive(Parser)]
    #[command(name = "book-info", about = "Book records from DBpedia", version)]
    struct Cli {
        /// SPARQL endpoint (overrides BOOK_INFO_ENDPOINT)
        #[arg(long, global = true)]
        endpoint: Option<String>,

        /// Language tag for literals (overrides BOOK_INFO_LANG)
        #[arg(long, global = true)]
        lang: Option<String>,

        /// Output format
        #[arg(long, global = true, default_value = "table")]
        output: OutputFormat,

        #[command(subcommand)]
        command: Commands,
    }

    #[derive(Clone, Copy, clap::ValueEnum)]
    enum OutputFormat {
        Table,
        Json,
    }

    #[derive(Subcommand)]
    enum Commands {
        /// Start the HTTP service
        Serve {
            /// Port to listen on (overrides PORT)
            #[arg(short, long)]
            port: Option<u16>,
        },
        /// Look up book records
        Lookup {
            /// Resource URIs (defaults to the URIs file)
            uris: Vec<String>,
        },
        /// Print the SPARQL query for a set of URIs
        Query {
            /// Resource URIs
            uris: Vec<String>,
        },
    }

    fn load_config(cli: &Cli) -> dbpedia_books::error::Result<Config> {
        let mut config = Config::from_env()?;
        if let Some(endpoint) = &cli.endpoint {
            config.endpoint = Url::parse(endpoint).map_err(|e| {
                dbpedia_books::Error::Config(format!("--endpoint '{}': {}", endpoint, e))
            })?;
        }
        if let Some(lang) = &cli.lang {
            config.language = lang.clone();
        }
        Ok(config)
    }

    fn truncate(text: &str, max: usize) -> String {
        if text.chars().count() > max {
            let head: String = text.chars().take(max.saturating_sub(3)).collect();
            format!("{}...", head)
        } else {
            text.to_string()
        }
    }

    fn print_records_table(records: &[Record]) {
        use comfy_table::{ContentArrangement, Table};

        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["Book", "Title", "Authors", "Abstract"]);

        for record in records {
            let book = record
                .book
                .as_deref()
                .map(|b| b.rsplit('/').next().unwrap_or(b))
                .unwrap_or("-");
            let title = record.title.as_deref().unwrap_or("-");
            let abstract_text = record.abstract_text.as_deref().unwrap_or("");

            table.add_row(vec![
                book.to_string(),
                truncate(title, 50),
                record.authors.clone(),
                truncate(abstract_text, 60),
            ]);
        }

        println!("{table}");
    }

    pub async fn run() -> dbpedia_books::error::Result<()> {
        let cli = Cli::parse();
        let config = load_config(&cli)?;

        match cli.command {
            Commands::Serve { port } => {
                let config = match port {
                    Some(p) => config.with_port(p),
                    None => config,
                };
                server::serve(config).await?;
            }

            Commands::Lookup { uris } => {
                let lookup = server::lookup_from_config(&config)?;
                let records = lookup.handle(Some(uris)).await?;

                match cli.output {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&records)?);
                    }
                    OutputFormat::Table => {
                        println!("Found {} records:", records.len());
                        print_records_table(&records);
                    }
                }
            }

            Commands::Query { uris } => {
                let query = BookQuery::new(uris).language(&config.language);
                println!("{}", query);
            }
        }

        Ok(())
    }
}

#[cfg(feature = "cli")]
#[tokio::main]
async fn main() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "book_info=info,dbpedia_books=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = cli::run().await {
        tracing::error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("This binary requires the 'cli' feature. Build with: cargo build --features cli");
    std::process::exit(1);
}
