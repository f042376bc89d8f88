//! lab-runner: headless front end for the Risk Governance Lab.
//!
//! Usage:
//!   RISKLAB_CONFIG=session.json lab-runner
//!   RISKLAB_MODE=ipc lab-runner          # JSON lines on stdin/stdout
//!
//! Every page computation runs here the way a dashboard would call it:
//! errors are caught and rendered as messages, never propagated as a crash.

use anyhow::Result;
use risklab_core::{
    aggregation,
    benchmark::{self, QualityScores},
    config::{CostSource, LabConfig},
    dispersion::{self, CostVariability},
    error::LabError,
    governance::{PerformanceSummary, VsmWeights},
    risk_profile::{self, RiskProfile},
    session::Session,
};
use std::env;
use std::io::{self, BufRead, Write};

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcRequest {
    LoadDataset {
        #[serde(default)]
        csv: Option<String>,
    },
    CostVariability {
        #[serde(default)]
        manual: Option<String>,
    },
    Simulate {
        weights: VsmWeights,
        style: String,
    },
    RiskProfile {
        name: String,
        likelihood: i64,
        severity: i64,
    },
    Benchmark {
        firm: QualityScores,
        benchmark: QualityScores,
    },
    Quit,
}

fn main() -> Result<()> {
    env_logger::init();

    let config = match env::var("RISKLAB_CONFIG") {
        Ok(path) => LabConfig::load(&path)?,
        Err(_) => LabConfig::default(),
    };
    let ipc_mode = env::var("RISKLAB_MODE").map(|m| m == "ipc").unwrap_or(false);

    let mut session = Session::new(config);

    if ipc_mode {
        run_ipc_loop(&mut session)
    } else {
        print_report(&mut session);
        Ok(())
    }
}

fn run_ipc_loop(session: &mut Session) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        let request: IpcRequest = match serde_json::from_str(&buffer) {
            Ok(r) => r,
            Err(e) => {
                writeln!(stdout, "{}", serde_json::json!({ "error": e.to_string() }))?;
                stdout.flush()?;
                continue;
            }
        };

        if matches!(request, IpcRequest::Quit) {
            break;
        }

        let reply = match handle_request(session, request) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("request rejected: {e}");
                serde_json::json!({ "error": e.to_string() })
            }
        };
        writeln!(stdout, "{reply}")?;
        stdout.flush()?;
    }
    Ok(())
}

fn handle_request(session: &mut Session, request: IpcRequest) -> Result<serde_json::Value, LabError> {
    let value = match request {
        IpcRequest::LoadDataset { csv } => {
            let table = match csv.as_deref() {
                Some(text) => session.load_csv(text)?,
                None => session.load_dataset(None)?,
            };
            serde_json::json!({
                "source": table.source,
                "rows": table.len(),
                "warnings": table.warnings.iter().map(|w| w.to_string()).collect::<Vec<_>>(),
                "dtypes": table.dtypes().iter().map(|(c, t)| (c.clone(), t.as_str())).collect::<Vec<_>>(),
                "summary": table.describe(),
            })
        }
        IpcRequest::CostVariability { manual } => {
            let source = manual.map_or(CostSource::Dataset, CostSource::Manual);
            let values = session.cost_values(&source)?;
            serde_json::to_value(CostVariability::compute(&values)?)?
        }
        IpcRequest::Simulate { weights, style } => {
            let weights = weights.checked()?;
            let scored = session.simulate(&weights, &style)?;
            serde_json::json!({
                "summary": PerformanceSummary::from_scored(scored.as_slice()),
                "by_severity": aggregation::mean_by_risk_severity(scored.as_slice()),
                "trend": aggregation::performance_trend(scored.as_slice()),
            })
        }
        IpcRequest::RiskProfile { name, likelihood, severity } => {
            let profile = RiskProfile::new(name, likelihood, severity)?;
            serde_json::json!({
                "name": profile.name,
                "likelihood": profile.likelihood,
                "severity": profile.severity,
                "quadrant": profile.quadrant().label(),
            })
        }
        IpcRequest::Benchmark { firm, benchmark: peer } => {
            let rows = benchmark::compare(&firm.checked()?, &peer.checked()?);
            serde_json::to_value(rows)?
        }
        IpcRequest::Quit => serde_json::Value::Null,
    };
    Ok(value)
}

/// Render every page once, in navigation order.
fn print_report(session: &mut Session) {
    println!("Risk Governance Lab — lab-runner");
    println!("  seed:      {:#x}", session.seed());
    println!();

    println!("=== DATA VALIDATION ===");
    match session.load_configured_dataset() {
        Ok(table) => {
            println!("  source:    {}", table.source);
            println!("  rows:      {}", table.len());
            for warning in &table.warnings {
                println!("  WARNING:   {warning}");
            }
            for (column, dtype) in table.dtypes() {
                println!("  {column:<16} {dtype}");
            }
            for s in table.describe() {
                println!(
                    "  {:<16} count={} mean={} std={} min={} max={}",
                    s.column,
                    s.count,
                    fmt_opt(s.mean),
                    fmt_opt(s.std),
                    fmt_opt(s.min),
                    fmt_opt(s.max)
                );
            }
        }
        Err(e) => println!("  ERROR:     {e}"),
    }

    println!();
    println!("=== COST VARIABILITY ===");
    let source = session.config.cost_source.clone();
    match session
        .cost_values(&source)
        .and_then(|values| CostVariability::compute(&values))
    {
        Ok(cv) => {
            println!("  points:             {}", cv.count);
            println!("  normalized std dev: {:.4}", cv.normalized_std_dev);
            println!("  std dev:            {:.2}", cv.std_dev);
            println!("  mean cost:          {:.2}", cv.mean);
        }
        Err(LabError::EmptyInput) => println!("  No cost data available for calculation."),
        Err(e) => println!("  ERROR: {e}"),
    }
    if let Some(table) = session.dataset() {
        let costs = table.costs();
        println!("  mean-normalized sd: {}", dispersion::normalized_sd(&costs));
        for c in aggregation::mean_severity_by_category(table) {
            println!("  {:<16} avg severity {:.2} ({} rows)", c.category, c.mean, c.count);
        }
    }

    println!();
    println!("=== RISK PROFILE ===");
    let rp = &session.config.risk_profile;
    match RiskProfile::new(rp.name.clone(), rp.likelihood, rp.severity) {
        Ok(profile) => println!(
            "  {} (likelihood {}, severity {}) → {}",
            profile.name,
            profile.likelihood,
            profile.severity,
            profile.quadrant()
        ),
        Err(e) => println!("  ERROR: {e}"),
    }
    if let Some(table) = session.dataset() {
        for (quadrant, count) in risk_profile::quadrant_counts(table) {
            println!("  {:<16} {count}", quadrant.label());
        }
    }

    println!();
    println!("=== COMPARATIVE ANALYSIS ===");
    let bench = &session.config.benchmark;
    match bench.firm.checked().and_then(|f| Ok((f, bench.benchmark.checked()?))) {
        Ok((firm, other)) => {
            for row in benchmark::compare(&firm, &other) {
                println!(
                    "  {:<10} firm {:>3}  benchmark {:>3}  gap {:+}",
                    row.area.as_str(),
                    row.firm,
                    row.benchmark,
                    row.gap
                );
            }
        }
        Err(e) => println!("  ERROR: {e}"),
    }

    println!();
    println!("=== VSM SIMULATION ===");
    let governance = session.config.governance.clone();
    match governance
        .weights
        .checked()
        .and_then(|w| session.simulate(&w, &governance.style))
    {
        Ok(scored) => {
            if let Some(summary) = PerformanceSummary::from_scored(scored.as_slice()) {
                println!("  style:                      {}", governance.style);
                println!(
                    "  avg risk mitigation:        {:.2}",
                    summary.avg_risk_mitigation_effectiveness
                );
                println!(
                    "  avg operational efficiency: {:.2}",
                    summary.avg_operational_efficiency
                );
            }
            for m in aggregation::mean_by_risk_severity(scored.as_slice()) {
                println!(
                    "  {:<8} rows={:<3} efficiency={:.3} mitigation={:.3}",
                    m.risk_severity.as_str(),
                    m.rows,
                    m.mean_operational_efficiency,
                    m.mean_risk_mitigation_effectiveness
                );
            }
        }
        Err(e) => println!("  ERROR: {e}"),
    }
}

fn fmt_opt(v: Option<f64>) -> String {
    v.map(|x| format!("{x:.3}")).unwrap_or_else(|| "-".into())
}
