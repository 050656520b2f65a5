use anyhow::Context;
use api_shared::validation::{
    validate_analyze_req, validate_emergency_symptoms, validate_search_query,
};
use api_shared::{AnalysisRes, AnalyzeReq, EmergencyCheckRes, ValidationError};
use clap::{Parser, Subcommand};
use symcheck_core::{CoreConfig, SymptomService};

#[derive(Parser)]
#[command(name = "symcheck")]
#[command(about = "Symptom checker CLI")]
struct Cli {
    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyse a symptom description
    Analyze {
        /// Free-text symptom description (at least 10 characters)
        symptoms: String,
        /// Age in years (1-120)
        #[arg(long)]
        age: u32,
        /// male, female or other
        #[arg(long)]
        gender: String,
        /// less_than_24h, 1_3_days, 4_7_days, 1_2_weeks or more_than_2_weeks
        #[arg(long)]
        duration: String,
        /// mild, moderate or severe
        #[arg(long)]
        severity: String,
    },
    /// Check text for emergency warning signs only
    Emergency {
        /// Free-text symptom description
        symptoms: String,
    },
    /// Search conditions by name or keyword
    Search {
        /// Name or keyword fragment (at least 2 characters)
        query: String,
    },
    /// List every symptom keyword the catalog knows
    Symptoms,
    /// Show self-care tips, optionally for one condition
    Tips {
        /// Exact condition name
        #[arg(long)]
        condition: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("Use 'symcheck --help' for commands");
        return Ok(());
    };

    let cfg = CoreConfig::from_env()?;
    let service = SymptomService::from_config(&cfg).context("loading condition catalog")?;

    match command {
        Commands::Analyze {
            symptoms,
            age,
            gender,
            duration,
            severity,
        } => {
            let req = AnalyzeReq {
                age: Some(age.into()),
                gender: Some(gender.into()),
                symptoms: Some(symptoms.into()),
                duration: Some(duration.into()),
                severity: Some(severity.into()),
            };
            let request = validate_analyze_req(&req).map_err(describe)?;
            let res = AnalysisRes::from(service.analyze(&request));

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&res)?);
            } else {
                print_analysis(&res);
            }
        }
        Commands::Emergency { symptoms } => {
            let text = validate_emergency_symptoms(Some(&symptoms)).map_err(describe)?;
            let res = EmergencyCheckRes::from(service.check_emergency(text));

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&res)?);
            } else {
                println!("Urgency: {}", res.urgency_level);
                for sign in &res.warning_signs {
                    println!(
                        "  [{}] {} (matched: {})",
                        sign.tier,
                        sign.message,
                        sign.matched_phrases.join(", ")
                    );
                }
                println!("{}", res.recommendation);
            }
        }
        Commands::Search { query } => {
            let query = validate_search_query(Some(&query)).map_err(describe)?;
            let results = service.search_conditions(query);

            if results.is_empty() {
                println!("No conditions match '{}'.", query);
            }
            for condition in results {
                println!(
                    "{} ({}): {}",
                    condition.name,
                    condition.category.as_str(),
                    condition.keywords.join(", ")
                );
            }
        }
        Commands::Symptoms => {
            for symptom in service.common_symptoms() {
                println!("{symptom}");
            }
        }
        Commands::Tips { condition } => {
            for tip in service.health_tips(condition.as_deref()) {
                println!("- {tip}");
            }
        }
    }

    Ok(())
}

fn describe(err: ValidationError) -> anyhow::Error {
    match err {
        ValidationError::MissingFields(fields) => {
            anyhow::anyhow!("missing required input: {}", fields.join(", "))
        }
        ValidationError::Invalid(errors) => anyhow::anyhow!(errors.join("\n")),
    }
}

fn print_analysis(res: &AnalysisRes) {
    println!("{}", res.summary);
    println!(
        "Risk: {}  Confidence: {}",
        res.risk_assessment, res.confidence_level
    );

    if !res.emergency_warnings.is_empty() {
        println!("\nEmergency warnings:");
        for warning in &res.emergency_warnings {
            println!("  ! {warning}");
        }
    }
    if !res.possible_conditions.is_empty() {
        println!("\nPossible conditions:");
        for name in &res.possible_conditions {
            println!("  - {name}");
        }
    }
    println!("\nRecommended actions:");
    for action in &res.recommended_actions {
        println!("  - {action}");
    }
    println!("\nFollow up:");
    for item in &res.follow_up_recommendations {
        println!("  - {item}");
    }
    println!("\nAnalysis {} at {}", res.analysis_id, res.timestamp);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_analyze_arguments() {
        let cli = Cli::try_parse_from([
            "symcheck",
            "analyze",
            "headache and nausea for two days",
            "--age",
            "30",
            "--gender",
            "female",
            "--duration",
            "1_3_days",
            "--severity",
            "moderate",
            "--json",
        ])
        .unwrap();

        assert!(cli.json);
        match cli.command {
            Some(Commands::Analyze { age, severity, .. }) => {
                assert_eq!(age, 30);
                assert_eq!(severity, "moderate");
            }
            _ => panic!("expected analyze"),
        }
    }

    #[test]
    fn analyze_requires_age() {
        assert!(Cli::try_parse_from(["symcheck", "analyze", "cough", "--gender", "male"]).is_err());
    }

    #[test]
    fn validation_errors_become_one_message() {
        let err = describe(ValidationError::Invalid(vec!["a".into(), "b".into()]));
        assert_eq!(err.to_string(), "a\nb");
    }
}
