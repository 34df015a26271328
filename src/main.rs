use anyhow::{Context, Result, bail};
use auto_value_realm::codegen::Generator;
use auto_value_realm::config::GeneratorConfig;
use auto_value_realm::schema::SchemaBatch;
use auto_value_realm::sink::DirectorySink;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "avrealm")]
#[command(about = "Generate Realm storage records for AutoValue models")]
struct Cli {
    /// Generator configuration (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Source root the generated files are written below
    #[arg(long)]
    out: PathBuf,

    /// Schema files, merged into one generation pass
    #[arg(required = true)]
    schemas: Vec<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => GeneratorConfig::from_toml_file(path)
            .with_context(|| format!("Failed to load config '{}'", path.display()))?,
        None => GeneratorConfig::default(),
    };

    let batch = SchemaBatch::load(&cli.schemas, &config).context("Failed to load schemas")?;
    let mut sink = DirectorySink::new(&cli.out);
    let report = Generator::new(config).run(&batch, &mut sink);

    for failure in &report.failures {
        eprintln!("error: {failure}");
    }
    if !report.is_success() {
        bail!(
            "{} of {} classes failed",
            report.failures.len(),
            report.failures.len() + report.generated.len()
        );
    }

    println!(
        "Generated {} classes into {}",
        report.generated.len(),
        sink.root().display()
    );
    Ok(())
}
