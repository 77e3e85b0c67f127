use std::path::Path;
use std::process::Command as ProcessCommand;
use std::time::Instant;

use anyhow::{Context, Result, anyhow};
use comfy_table::Table;
use tracing::{info, info_span, warn};

use cohort_ingest::setup_directories;
use cohort_model::{VarKind, VarSet, VariableCatalogue};
use cohort_plot::{scatter_plot, summary_figures, violin_plot};
use cohort_report::{export_analysis_csv, write_report_file};

use crate::cli::{InitArgs, RunArgs};
use crate::pipeline::{assemble, build_wave1, build_wave6, clean_analysis, load_tables};
use crate::summary::apply_table_style;
use crate::types::{RunManifest, RunResult, StageSummary};

pub fn run_init(args: &InitArgs) -> Result<()> {
    let dirs = setup_directories(&args.project_folder).context("create directories")?;
    println!("Initialized {}", args.project_folder.display());
    println!("Place the survey extracts under {}", dirs.raw.display());
    Ok(())
}

pub fn run_variables() -> Result<()> {
    let vars = VariableCatalogue::new(VarSet::All);
    let mut table = Table::new();
    table.set_header(vec!["Code", "Type", "Name"]);
    apply_table_style(&mut table);
    for var in vars.iter() {
        let kind = match var.kind {
            VarKind::Scale => "Scale",
            VarKind::Nominal => "Nominal",
            VarKind::Id => "Id",
        };
        table.add_row(vec![var.code, kind, var.name]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_pipeline(args: &RunArgs) -> Result<RunResult> {
    let root = args
        .output_dir
        .clone()
        .unwrap_or_else(|| args.project_folder.clone());
    let run_span = info_span!("run", root = %root.display());
    let _run_guard = run_span.enter();

    let mut stages: Vec<StageSummary> = Vec::new();
    let mut outputs = Vec::new();
    let mut errors: Vec<String> = Vec::new();

    let dirs = setup_directories(&root).context("create directories")?;
    let raw_dir = args.project_folder.join("data").join("raw");

    let tables = stage("load", &mut stages, || {
        let tables = load_tables(&raw_dir)?;
        let rows = tables.row_total();
        Ok((tables, rows))
    })?;

    let wave1 = stage("wave1", &mut stages, || {
        let wave1 = build_wave1(&tables.parent, &tables.parent_cm)?;
        let rows = wave1.height();
        Ok((wave1, rows))
    })?;

    let wave6 = stage("wave6", &mut stages, || {
        let wave6 = build_wave6(&tables.cm_interview, &tables.cm_derived)?;
        let rows = wave6.height();
        Ok((wave6, rows))
    })?;

    let analysis = stage("assemble", &mut stages, || {
        let analysis = assemble(&wave1, &wave6, &tables.family)?;
        let rows = analysis.height();
        Ok((analysis, rows))
    })?;

    let cleaned = stage("clean", &mut stages, || {
        let cleaned = clean_analysis(&analysis)?;
        let rows = cleaned.height();
        Ok((cleaned, rows))
    })?;

    if args.dry_run {
        info!("dry run, no outputs written");
        return Ok(RunResult {
            root,
            stages,
            outputs,
            errors,
            has_errors: false,
        });
    }

    let vars = VariableCatalogue::new(VarSet::All);

    if !args.no_report {
        let report_path = dirs.reports.join("descriptives.txt");
        let _guard = info_span!("report").entered();
        match write_report_file(&analysis, &vars, &report_path) {
            Ok(()) => outputs.push(report_path),
            Err(error) => errors.push(format!("report: {error:#}")),
        }
    }

    if !args.no_figures {
        let _guard = info_span!("figures").entered();
        match summary_figures(&analysis, &vars, &dirs.figures) {
            Ok(written) => outputs.extend(written),
            Err(error) => errors.push(format!("figures: {error:#}")),
        }
        match pair_figures(args, &analysis, &vars, &dirs.figures) {
            Ok(written) => outputs.extend(written),
            Err(error) => errors.push(format!("figures: {error:#}")),
        }
    }

    let export_path = dirs.processed.join("analysis.csv");
    {
        let _guard = info_span!("export").entered();
        export_analysis_csv(&cleaned, &export_path).context("export analysis table")?;
        outputs.push(export_path.clone());
    }

    if let Some(script) = &args.model_script {
        if let Err(error) = run_model_script(script, &export_path) {
            errors.push(format!("model script: {error:#}"));
        }
    }

    let manifest_path = dirs.reports.join("run_manifest.json");
    let has_errors = !errors.is_empty();
    let result = RunResult {
        root,
        stages,
        outputs,
        errors,
        has_errors,
    };
    let manifest = RunManifest::from_result(&result);
    let file = std::fs::File::create(&manifest_path)
        .with_context(|| format!("create manifest {}", manifest_path.display()))?;
    serde_json::to_writer_pretty(file, &manifest).context("write manifest")?;
    info!(path = %manifest_path.display(), "run manifest written");
    Ok(result)
}

fn stage<T>(
    name: &'static str,
    stages: &mut Vec<StageSummary>,
    body: impl FnOnce() -> Result<(T, usize)>,
) -> Result<T> {
    let span = info_span!("stage", stage = name);
    let _guard = span.enter();
    let start = Instant::now();
    let (value, rows) = body().with_context(|| format!("stage {name}"))?;
    let duration_ms = start.elapsed().as_millis();
    info!(stage = name, rows, duration_ms, "stage complete");
    stages.push(StageSummary {
        stage: name,
        rows,
        duration_ms,
    });
    Ok(value)
}

/// Scatter and violin figures for the variable pairs named on the command
/// line. Unknown codes are reported as run errors, not fatal.
fn pair_figures(
    args: &RunArgs,
    df: &polars::prelude::DataFrame,
    vars: &VariableCatalogue,
    figures_dir: &Path,
) -> Result<Vec<std::path::PathBuf>> {
    let mut written = Vec::new();
    let lookup = |code: &str| {
        vars.get(code)
            .ok_or_else(|| anyhow!("unknown variable '{code}'"))
    };
    if let [x, y] = args.scatter.as_slice() {
        written.push(scatter_plot(df, lookup(x)?, lookup(y)?, figures_dir)?);
    }
    if let [group, value] = args.violin.as_slice() {
        written.push(violin_plot(
            df,
            lookup(group)?,
            lookup(value)?,
            args.log_scale,
            figures_dir,
        )?);
    }
    Ok(written)
}

/// Spawn the external modelling script with the exported CSV as its single
/// argument. Its stdout/stderr pass straight through; only the exit status
/// is checked.
fn run_model_script(script: &Path, csv_path: &Path) -> Result<()> {
    info!(script = %script.display(), csv = %csv_path.display(), "running model script");
    let status = ProcessCommand::new(script)
        .arg(csv_path)
        .status()
        .with_context(|| format!("spawn {}", script.display()))?;
    if !status.success() {
        warn!(script = %script.display(), ?status, "model script failed");
        return Err(anyhow!("{} exited with {status}", script.display()));
    }
    Ok(())
}
