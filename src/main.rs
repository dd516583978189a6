use clap::Parser;
use livetagger::application::{ListTagsService, TagFilesService, TagOperation};
use livetagger::cli::{format_tag_listing, format_tag_report, Cli, Commands, SelectArgs};
use livetagger::error::LiveTaggerError;
use livetagger::infrastructure::{
    Config, FileSystemRepository, MetadataStore, SampleFolders, SampleScanner,
};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = run(cli);

    match result {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(e.exit_code());
        }
    }
}

fn run(cli: Cli) -> Result<(), LiveTaggerError> {
    let config = Config::discover(cli.config.as_deref())?;

    match cli.command {
        Commands::Add { tags, args } => {
            // Validate before scanning so bad input never touches a folder
            let operation = TagOperation::add(tags)?;
            tag_files(&config, &args.select, &operation, args.commit)
        }
        Commands::Remove { tags, args } => {
            let operation = TagOperation::remove(tags)?;
            tag_files(&config, &args.select, &operation, args.commit)
        }
        Commands::RemoveAll { args } => {
            tag_files(&config, &args.select, &TagOperation::RemoveAll, args.commit)
        }
        Commands::List { select } => {
            let folders = scan(&config, &select)?;
            let service = ListTagsService::new(MetadataStore::new(FileSystemRepository));
            let listing = service.execute(&folders);
            print!("{}", format_tag_listing(&listing));
            if listing.is_empty() {
                println!();
            }

            match listing.iter().filter(|folder| folder.files.is_err()).count() {
                0 => Ok(()),
                failed => Err(LiveTaggerError::FoldersFailed(failed)),
            }
        }
    }
}

fn scan(config: &Config, select: &SelectArgs) -> Result<SampleFolders, LiveTaggerError> {
    let scanner = SampleScanner::new(&select.root, &select.include, config.extensions.clone())?;
    scanner.scan()
}

fn tag_files(
    config: &Config,
    select: &SelectArgs,
    operation: &TagOperation,
    commit: bool,
) -> Result<(), LiveTaggerError> {
    let folders = scan(config, select)?;

    let service = TagFilesService::new(MetadataStore::new(FileSystemRepository), config.clone());
    let report = service.execute(&folders, operation, commit);

    print!("{}", format_tag_report(&report));
    if report.folders.is_empty() {
        println!();
    }

    match report.failed_count() {
        0 => Ok(()),
        failed => Err(LiveTaggerError::FoldersFailed(failed)),
    }
}
