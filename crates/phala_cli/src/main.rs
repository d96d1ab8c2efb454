use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use phala_base::{house_from_degrees, house_of, parse_rashi, rashi_from_longitude};
use phala_facts::{
    AnalysisConfig, DetectionKind, RawChartInput, analyze, build_derived, build_fact_sheet,
    evaluate_rules, expand_dashas, expand_yogini, merge_detections, parse_chart_json,
    parse_outline_json, provider_detections,
};
use serde::Serialize;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser)]
#[command(name = "phala", about = "Birth-chart facts, yogas, dashas and outline validation")]
struct Cli {
    /// TOML file overriding analysis constants
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Whole-sign house of a planet sign from an ascendant sign
    House {
        /// Ascendant sign (name or 1-12), or longitude with --degrees
        asc: String,
        /// Planet sign (name or 1-12), or longitude with --degrees
        planet: String,
        /// Treat both arguments as longitudes and count 30 deg houses
        #[arg(long)]
        degrees: bool,
    },
    /// Rashi from sidereal longitude
    Sign {
        /// Sidereal ecliptic longitude in degrees
        lon: f64,
    },
    /// Normalized fact sheet and diagnostics for a chart payload
    Facts {
        /// Chart payload (JSON)
        chart: PathBuf,
    },
    /// House table, natural relations and strengths
    Derive {
        /// Chart payload (JSON)
        chart: PathBuf,
    },
    /// Evaluated yogas and doshas merged with provider labels
    Yogas {
        /// Chart payload (JSON)
        chart: PathBuf,
    },
    /// Running periods and the major-period timeline
    Dasha {
        /// Chart payload (JSON)
        chart: PathBuf,
    },
    /// Full pipeline output
    Analyze {
        /// Chart payload (JSON)
        chart: PathBuf,
    },
    /// Check an outline against a chart; exits 2 when inconsistent
    Validate {
        /// Chart payload (JSON)
        chart: PathBuf,
        /// Outline (JSON)
        #[arg(long)]
        outline: PathBuf,
    },
}

/// Exit status for an outline that disagrees with the chart.
const EXIT_INVALID_OUTLINE: u8 = 2;

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt().with_writer(io::stderr).with_env_filter(filter).init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::House {
            asc,
            planet,
            degrees,
        } => {
            let house = if degrees {
                let a: f64 = asc.parse().with_context(|| format!("invalid longitude: {asc}"))?;
                let p: f64 = planet
                    .parse()
                    .with_context(|| format!("invalid longitude: {planet}"))?;
                house_from_degrees(a, p)
            } else {
                house_of(sign_arg(&planet)?, sign_arg(&asc)?)
            };
            println!("{house}");
        }

        Commands::Sign { lon } => {
            let info = rashi_from_longitude(lon);
            let dms = info.dms;
            println!(
                "{} ({}, {}) - {} deg {} min {:.1} sec in rashi",
                info.rashi.name(),
                info.rashi.western_name(),
                info.rashi.number(),
                dms.degrees,
                dms.minutes,
                dms.seconds,
            );
        }

        Commands::Facts { chart } => {
            let build = build_fact_sheet(&read_chart(&chart)?)?;
            print_json(&FactsOutput {
                facts: &build.facts,
                diagnostics: &build.diagnostics,
            })?;
        }

        Commands::Derive { chart } => {
            let facts = build_fact_sheet(&read_chart(&chart)?)?.facts;
            print_json(&build_derived(&facts, &config))?;
        }

        Commands::Yogas { chart } => {
            let input = read_chart(&chart)?;
            let facts = build_fact_sheet(&input)?.facts;
            let mut provider = provider_detections(&input.yogas, DetectionKind::Yoga);
            provider.extend(provider_detections(&input.doshas, DetectionKind::Dosha));
            print_json(&merge_detections(evaluate_rules(&facts), provider))?;
        }

        Commands::Dasha { chart } => {
            let facts = build_fact_sheet(&read_chart(&chart)?)?.facts;
            let derived = build_derived(&facts, &config);
            print_json(&DashaOutput {
                vimshottari: expand_dashas(&facts, &derived, &config),
                yogini: expand_yogini(&facts, &derived, &config),
            })?;
        }

        Commands::Analyze { chart } => {
            print_json(&analyze(&read_chart(&chart)?, &config)?)?;
        }

        Commands::Validate { chart, outline } => {
            let analysis = analyze(&read_chart(&chart)?, &config)?;
            let text = fs::read_to_string(&outline)
                .with_context(|| format!("reading outline {}", outline.display()))?;
            let outline = parse_outline_json(&text)?;
            let result = analysis.validate(&outline)?;
            print_json(&result)?;
            if !result.valid {
                return Ok(ExitCode::from(EXIT_INVALID_OUTLINE));
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

#[derive(Serialize)]
struct FactsOutput<'a> {
    facts: &'a phala_facts::FactSheet,
    diagnostics: &'a phala_facts::Diagnostics,
}

#[derive(Serialize)]
struct DashaOutput {
    vimshottari: phala_facts::ExpandedDasha,
    #[serde(skip_serializing_if = "Option::is_none")]
    yogini: Option<phala_facts::ExpandedDasha>,
}

fn load_config(path: Option<&Path>) -> Result<AnalysisConfig> {
    let Some(path) = path else {
        return Ok(AnalysisConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config: AnalysisConfig =
        toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))?;
    tracing::debug!(path = %path.display(), "loaded analysis config");
    Ok(config)
}

fn read_chart(path: &Path) -> Result<RawChartInput> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading chart {}", path.display()))?;
    parse_chart_json(&text).with_context(|| format!("parsing chart {}", path.display()))
}

fn sign_arg(raw: &str) -> Result<phala_base::Rashi> {
    if let Ok(n) = raw.trim().parse::<i64>() {
        if !(1..=12).contains(&n) {
            bail!("sign number out of range: {n} (1-12)");
        }
    }
    parse_rashi(raw).with_context(|| format!("unknown sign: {raw}"))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn validate_requires_outline() {
        assert!(Cli::try_parse_from(["phala", "validate", "chart.json"]).is_err());
        assert!(
            Cli::try_parse_from(["phala", "validate", "chart.json", "--outline", "o.json"]).is_ok()
        );
    }

    #[test]
    fn sign_args() {
        assert_eq!(sign_arg("Taurus").unwrap(), phala_base::Rashi::Vrishabha);
        assert_eq!(sign_arg("11").unwrap(), phala_base::Rashi::Kumbha);
        assert!(sign_arg("13").is_err());
        assert!(sign_arg("Ophiuchus").is_err());
    }

    #[test]
    fn config_from_toml() {
        let cfg: AnalysisConfig = toml::from_str(
            "[dasha]\nstrong_at = 75.0\n\n[aspects]\nspecial = 2.0\n",
        )
        .unwrap();
        assert_eq!(cfg.dasha.strong_at, 75.0);
        assert_eq!(cfg.aspects.special, 2.0);
        assert_eq!(cfg.aspects.opposition, 1.0);
    }
}
