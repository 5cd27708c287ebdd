use qisas::{
    cli::Cli,
    config::Config,
    content::ContentSource,
    logging,
    models::ContentRecord,
    ui::reader::Reader,
};

use clap::Parser;
use eyre::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_from_verbosity(cli.verbose);

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Warning: Could not load configuration: {}", err);
            eprintln!("Starting with default settings");
            Config::default()
        }
    };

    let source = content_source(&cli, &config);

    if cli.dump {
        let records = source
            .map(|s| s.load())
            .unwrap_or_default();
        dump_content(&records);
        return Ok(());
    }

    let mut reader = Reader::new(config)?;
    if let Some(source) = source {
        reader.load_content(&source);
    }
    reader.run()
}

fn load_config(cli: &Cli) -> Result<Config> {
    match &cli.config {
        Some(path) => Config::from_file(path.clone()),
        None => Config::new(),
    }
}

/// Content comes from the first positional argument, else from the
/// configured default directory.
fn content_source(cli: &Cli, config: &Config) -> Option<ContentSource> {
    if let Some(arg) = cli.content.first() {
        return Some(ContentSource::from_arg(arg));
    }
    config
        .settings
        .content_dir
        .as_ref()
        .map(|dir| ContentSource::Dir(dir.into()))
}

/// Print every story as plain text: title, then each line's diacritized
/// words in reading order with the gloss line underneath.
fn dump_content(records: &[ContentRecord]) {
    for record in records {
        for story in &record.document.stories {
            println!("# {}", story.title);
            println!();
            for line in &story.lines {
                let words: Vec<&str> = line.iter().map(|w| w.harakat.as_str()).collect();
                let glosses: Vec<&str> = line.iter().map(|w| w.english.as_str()).collect();
                println!("{}", words.join(" "));
                println!("  {}", glosses.join(" / "));
            }
            println!();
        }
    }
}
