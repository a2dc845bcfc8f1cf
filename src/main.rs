mod cli;

use std::process::ExitCode;

use clap::Parser;
use cli::Cli;
use comic_store::{Error, HttpRecordFetcher, Record, RecordService, RecordStoreService};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn init_tracing() {
  let filter = EnvFilter::try_from_default_env()
    .unwrap_or_else(|_| EnvFilter::new("comic_store=info,warn"));

  tracing_subscriber::registry()
    .with(filter)
    .with(fmt::layer().compact().with_writer(std::io::stderr))
    .init();
}

async fn build(service: &RecordStoreService<HttpRecordFetcher>) -> Result<(), Error> {
  let progress = service.progress_bar()?;
  let records = service.build(&progress).await?;
  println!("Stored {} records", records.len());
  Ok(())
}

fn search(service: &RecordStoreService<HttpRecordFetcher>, id: u32) -> Result<Record, Error> {
  Ok(service.lookup(id)?)
}

#[tokio::main]
async fn main() -> ExitCode {
  let cli = Cli::parse();
  init_tracing();

  if !cli.build && cli.search.is_none() {
    println!("Please specify some options, -h for help");
    return ExitCode::SUCCESS;
  }

  let service = match RecordStoreService::from_config(cli.config()) {
    Ok(service) => service,
    Err(e) => {
      eprintln!("Could not set up the http client: {e}");
      return ExitCode::FAILURE;
    }
  };

  if cli.build {
    if let Err(e) = build(&service).await {
      eprintln!("Some error while building: {e}");
      return ExitCode::FAILURE;
    }
  } else if let Some(id) = cli.search {
    match search(&service, id) {
      Ok(record) => println!("{}", record.payload),
      Err(e) => {
        eprintln!("Error while searching in store: {e}");
        return ExitCode::FAILURE;
      }
    }
  }

  ExitCode::SUCCESS
}
