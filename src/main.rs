//! Resume parser: heuristic field extraction for a folder of resumes

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info, warn};
use resume_parser::cli::{Cli, Commands, ConfigAction};
use resume_parser::extraction::{ResumeExtractor, SkillVocabulary};
use resume_parser::output::chart::{render_skill_chart, CHART_FILE};
use resume_parser::output::exporter::{
    copy_matching, write_summary_csv, write_summary_json, MATCHED_DIR, SUMMARY_CSV, SUMMARY_JSON,
};
use resume_parser::output::formatter::StatsFormatter;
use resume_parser::processing::batch::BatchProcessor;
use resume_parser::processing::query::{CandidateFilter, SkillMatchMode};
use resume_parser::processing::stats::SkillStatistics;
use resume_parser::Config;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

struct ParseOptions {
    input: PathBuf,
    output: PathBuf,
    filter: Vec<String>,
    any: bool,
    search: Option<String>,
    stats: bool,
    copy_matching: bool,
    export_csv: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let resetting = matches!(cli.command, Commands::Config { action: Some(ConfigAction::Reset) });
    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) if resetting => {
            warn!("Ignoring unreadable configuration: {:#}", e);
            Config::default()
        }
        Err(e) => {
            error!("Failed to load configuration: {:#}", e);
            process::exit(1);
        }
    };

    let config_path = Config::resolve_path(cli.config.as_deref());
    if let Err(e) = run_command(cli.command, config, config_path).await {
        error!("Command failed: {:#}", e);
        process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path).with_context(|| format!("reading {}", path.display())),
        None => Config::load().context("loading default configuration"),
    }
}

async fn run_command(command: Commands, config: Config, config_path: PathBuf) -> Result<()> {
    match command {
        Commands::Parse {
            input,
            output,
            filter,
            any,
            search,
            stats,
            copy_matching,
            export_csv,
        } => {
            let options = ParseOptions {
                input,
                output,
                filter,
                any,
                search,
                stats,
                copy_matching,
                export_csv,
            };
            run_parse(options, &config).await?;
        }

        Commands::Extract { file } => {
            let extractor = build_extractor(&config)?;
            let processor = BatchProcessor::new(Arc::new(extractor), config.processing.clone());
            let document = processor
                .process_file(&file)
                .await
                .with_context(|| format!("extracting {}", file.display()))?;

            println!("{}", serde_json::to_string_pretty(&document.record)?);
        }

        Commands::Skills => {
            let vocabulary = load_vocabulary(&config)?;
            println!("🧰 Словарь навыков ({} терминов)\n", vocabulary.len());
            for term in vocabulary.terms() {
                println!("  {}", term);
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("⚙️  Текущая конфигурация ({})\n", config_path.display());
                print!("{}", toml::to_string_pretty(&config).context("serializing configuration")?);
            }

            Some(ConfigAction::Reset) => {
                println!("🔄 Сброс конфигурации к значениям по умолчанию...");
                Config::default()
                    .save_to(&config_path)
                    .with_context(|| format!("writing {}", config_path.display()))?;
                println!("✅ Конфигурация сброшена: {}", config_path.display());
            }

            Some(ConfigAction::Path) => {
                println!("{}", config_path.display());
            }
        },
    }

    Ok(())
}

async fn run_parse(options: ParseOptions, config: &Config) -> Result<()> {
    tokio::fs::create_dir_all(&options.output)
        .await
        .with_context(|| format!("creating output directory {}", options.output.display()))?;

    let formatter = StatsFormatter::new(config.output.color_output);
    print!("{}", formatter.format_run_header(&options.input, &options.output));

    let extractor = Arc::new(build_extractor(config)?);
    let processor = BatchProcessor::new(extractor, config.processing.clone());
    let outcome = processor
        .run(&options.input, Some(&options.output))
        .await
        .with_context(|| format!("processing {}", options.input.display()))?;

    print!("{}", formatter.format_batch_summary(&outcome));

    let mut records = outcome.records;

    if !options.filter.is_empty() {
        let mode = if options.any { SkillMatchMode::Any } else { SkillMatchMode::All };
        records = CandidateFilter::new()
            .with_skills(options.filter.clone(), mode)
            .apply(&records);
        info!("Filter {:?} ({:?}): {} candidates", options.filter, mode, records.len());
        println!("🔎 Найдено по навыкам: {}", records.len());
    }

    if let Some(query) = options.search.as_deref() {
        records = CandidateFilter::new().with_search(query).apply(&records);
        info!("Search '{}': {} candidates", query, records.len());
        println!("🔎 Найдено по запросу «{}»: {}", query, records.len());
    }

    if options.stats {
        let statistics = SkillStatistics::compute(&records, config.output.top_skills);
        print!("{}", formatter.format_statistics(&statistics));

        if statistics.has_skills() {
            let chart_path = options.output.join(CHART_FILE);
            let html = render_skill_chart(&statistics)?;
            tokio::fs::write(&chart_path, html)
                .await
                .with_context(|| format!("writing {}", chart_path.display()))?;
            println!("📈 График сохранён: {}", chart_path.display());
        } else {
            warn!("No skills found, chart skipped");
        }
    }

    if options.copy_matching {
        let matched_dir = options.output.join(MATCHED_DIR);
        let report = copy_matching(&records, &options.input, &matched_dir)
            .await
            .with_context(|| format!("copying into {}", matched_dir.display()))?;
        println!("📁 Скопировано файлов: {} → {}", report.copied, matched_dir.display());
        if report.failed > 0 {
            warn!("{} files could not be copied", report.failed);
        }
    }

    let summary_path = options.output.join(SUMMARY_JSON);
    write_summary_json(&records, &summary_path, config.output.pretty_json)
        .with_context(|| format!("writing {}", summary_path.display()))?;
    println!("✅ Результаты сохранены: {}", summary_path.display());

    if options.export_csv {
        let csv_path = options.output.join(SUMMARY_CSV);
        write_summary_csv(&records, &csv_path).with_context(|| format!("writing {}", csv_path.display()))?;
        println!("📊 Таблица сохранена: {}", csv_path.display());
    }

    Ok(())
}

fn load_vocabulary(config: &Config) -> Result<SkillVocabulary> {
    match &config.extraction.skills_file {
        Some(path) => SkillVocabulary::from_file(path)
            .with_context(|| format!("loading skill vocabulary from {}", path.display())),
        None => Ok(SkillVocabulary::builtin().clone()),
    }
}

fn build_extractor(config: &Config) -> Result<ResumeExtractor> {
    let vocabulary = Arc::new(load_vocabulary(config)?);
    ResumeExtractor::new(vocabulary, &config.extraction).context("building extractor")
}
