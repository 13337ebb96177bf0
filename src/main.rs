use clap::Parser;
use detail_matcher::{batch, cli, config, engine, error};
use cli::{Cli, Commands};
use config::Config;
use detail_matcher_common::MatchQuery;
use engine::MatchEngine;
use error::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose, cli.quiet);

    let config = Config::load_or_default();
    let load_engine = || {
        MatchEngine::load(
            config.resolve_catalog_path(cli.catalog.as_deref()).as_deref(),
            config.resolve_synonyms_path(cli.synonyms.as_deref()).as_deref(),
        )
    };

    match cli.command {
        Commands::Match { host, adjacent, exposure, json } => {
            let engine = load_engine()?;

            let result = engine.match_query(&MatchQuery::new(host, adjacent, exposure));

            if json {
                println!("{}", serde_json::to_string_pretty(&result.to_response())?);
            } else {
                match &result.detail {
                    Some(detail) => println!("提案ディテール: {} ({})", detail.title, detail.id),
                    None => println!("提案ディテール: なし"),
                }
                println!("信頼度: {:.2}", result.confidence);
                println!("理由: {}", result.reason);
            }
        }

        Commands::Batch { input, output, no_progress } => {
            let engine = load_engine()?;

            let requests = batch::read_requests(&input)?;
            log::info!("{}件のリクエストを照合", requests.len());

            let responses = batch::match_batch(&engine, &requests, !no_progress && !cli.quiet);
            batch::write_responses(output.as_deref(), &responses)?;

            if let Some(path) = output {
                log::info!("結果を保存: {}", path.display());
            }
        }

        Commands::Details { json } => {
            let engine = load_engine()?;

            if json {
                println!("{}", serde_json::to_string_pretty(engine.details())?);
            } else {
                for detail in engine.details() {
                    println!("{}  {}", detail.id, detail.title);
                    println!(
                        "    host: {} / adjacent: {} / exposure: {}",
                        detail.host, detail.adjacent, detail.exposure
                    );
                }
                println!("\n{}件", engine.catalog().len());
            }
        }

        Commands::Config { set_catalog, set_synonyms, reset, show } => {
            let mut config = if reset { Config::default() } else { config };
            let changed = reset || set_catalog.is_some() || set_synonyms.is_some();

            if let Some(path) = set_catalog {
                config.catalog_path = Some(path);
            }
            if let Some(path) = set_synonyms {
                config.synonyms_path = Some(path);
            }

            if changed {
                config.save()?;
                println!("✔ 設定を保存しました: {}", Config::config_path()?.display());
            }

            if show || !changed {
                let describe = |path: &Option<std::path::PathBuf>| {
                    path.as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "組み込み".to_string())
                };
                println!("設定:");
                println!("  カタログ: {}", describe(&config.catalog_path));
                println!("  同義語: {}", describe(&config.synonyms_path));
            }
        }
    }

    Ok(())
}

fn init_logger(verbose: bool, quiet: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();
}
