use chrono::{Duration, Local, SubsecRound};
use clap::Args;
use method_eval::error::AppError;
use method_eval::evaluation::{
    format_score, render_summary, CriteriaGrid, Criterion, EvaluationService, ScoringEngine,
};
use method_eval::export::ExportFormat;
use method_eval::history::InMemoryHistoryStore;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// Fifteen comma separated values, row by row: duration, cases, bugs, coverage, stability
    #[arg(long)]
    pub(crate) values: String,
    /// Scoring engine (weighted or rule-table)
    #[arg(long, default_value = "weighted", value_parser = crate::infra::parse_engine)]
    pub(crate) engine: ScoringEngine,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Restrict the demo to a single engine. Defaults to running both.
    #[arg(long, value_parser = crate::infra::parse_engine)]
    pub(crate) engine: Option<ScoringEngine>,
    /// Print the CSV export after the evaluations.
    #[arg(long)]
    pub(crate) show_export: bool,
}

pub(crate) fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let grid = CriteriaGrid::parse_list(&args.values)?;
    let ranked = args.engine.evaluate(&grid);

    println!("Engine: {}", args.engine.label());
    render_grid(&grid);
    println!();
    print!("{}", render_summary(args.engine, &ranked));
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let engines = match args.engine {
        Some(engine) => vec![engine],
        None => vec![ScoringEngine::WeightedAverage, ScoringEngine::RuleTable],
    };

    println!("Testing method evaluation demo");
    for engine in engines {
        println!("\n== {} engine ==", engine.label());
        let service = EvaluationService::new(Arc::new(InMemoryHistoryStore::default()), engine);
        let start = Local::now().naive_local().trunc_subsecs(0);

        for (offset, (title, grid)) in demo_grids().into_iter().enumerate() {
            let entry = service.evaluate_at(grid, start + Duration::minutes(offset as i64))?;
            println!("\n{} ({})", title, entry.recorded_at_label());
            for result in &entry.results {
                println!(
                    "  {:<8} {:>8}",
                    result.method.label(),
                    format_score(engine, result.score)
                );
            }
        }

        println!("\nHistory entries: {}", service.history_count()?);

        if args.show_export {
            match service.export(ExportFormat::Csv)? {
                Some(export) => {
                    println!("\n{} ({} rows)", export.file_name, export.row_count);
                    println!("{}", String::from_utf8_lossy(&export.bytes));
                }
                None => println!("\nExport: history is empty"),
            }
        }
    }

    Ok(())
}

fn render_grid(grid: &CriteriaGrid) {
    for criterion in Criterion::ordered() {
        let row = grid.row(criterion);
        println!(
            "  {:<24} {:>8} {:>8} {:>8}",
            criterion.label(),
            row[0],
            row[1],
            row[2]
        );
    }
}

fn demo_grids() -> Vec<(&'static str, CriteriaGrid)> {
    vec![
        (
            "Regression sprint",
            CriteriaGrid::new([
                [2.5, 1.0, 0.4],
                [18.0, 35.0, 8.0],
                [3.0, 6.0, 1.0],
                [62.0, 81.0, 35.0],
                [90.0, 78.0, 96.0],
            ]),
        ),
        (
            "Release candidate",
            CriteriaGrid::new([
                [3.5, 2.0, 0.75],
                [12.0, 22.0, 5.0],
                [4.0, 5.0, 2.0],
                [45.0, 70.0, 20.0],
                [82.0, 88.0, 99.0],
            ]),
        ),
        ("Empty form", CriteriaGrid::zeroed()),
    ]
}
