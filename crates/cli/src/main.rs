use api_shared::{CreateProjectReq, HealthService};
use brandgen_core::{
    core_config_from_env, AiClients, ComplianceService, ProjectService, RecordId,
    SqliteProjectStore,
};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "brandgen")]
#[command(about = "Pharmaceutical brand generator CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the CLI is wired up
    Health,
    /// List projects
    List {
        /// Only projects owned by this user
        #[arg(long)]
        user: Option<String>,
    },
    /// Show a project with its insights and brand package
    Show {
        /// Project id
        id: String,
    },
    /// Generate and store a new project
    Create {
        /// Molecule name(s)
        #[arg(long)]
        molecule: Option<String>,
        /// Therapeutic area
        #[arg(long)]
        area: Option<String>,
        /// Project name
        #[arg(long)]
        name: Option<String>,
        /// Key differentiating benefits
        #[arg(long)]
        benefits: Option<String>,
        /// Free-text prompt, usable in place of molecule and area
        #[arg(long)]
        prompt: Option<String>,
        /// Owning user (defaults to BRANDGEN_DEFAULT_USER_ID)
        #[arg(long)]
        user: Option<String>,
    },
    /// Run the compliance review for a project
    Compliance {
        /// Project id
        id: String,
    },
    /// Get the leaflet PDF download location
    Export {
        /// Project id
        id: String,
    },
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("brandgen=info".parse()?)
                .add_directive("brandgen_core=warn".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("Use 'brandgen --help' for commands");
        return Ok(());
    };

    if let Commands::Health = command {
        return print_json(&HealthService::check_health());
    }

    let cfg = Arc::new(core_config_from_env()?);
    let store = Arc::new(SqliteProjectStore::open(cfg.database_path())?);
    let ai = AiClients::openai(cfg.ai())?;
    let projects = ProjectService::new(cfg.clone(), store.clone(), &ai);

    match command {
        Commands::Health => {}
        Commands::List { user } => {
            let res = projects.list(user.as_deref())?;
            if res.projects.is_empty() {
                println!("No projects found.");
            } else {
                for project in res.projects {
                    println!(
                        "ID: {}, Name: {}, Molecule: {}, Owner: {}, Created: {}",
                        project.id,
                        project.project_name.as_deref().unwrap_or("-"),
                        project.molecule_names.as_deref().unwrap_or("-"),
                        project.user_id,
                        project.created_at
                    );
                }
            }
        }
        Commands::Show { id } => {
            let id = RecordId::parse(&id)?;
            print_json(&projects.get(&id)?)?;
        }
        Commands::Create {
            molecule,
            area,
            name,
            benefits,
            prompt,
            user,
        } => {
            if cfg.ai().api_key().is_none() {
                tracing::warn!("OPENAI_API_KEY is not set; generated content will use fallbacks");
            }
            let caller = projects.caller(user.as_deref())?;
            let req = CreateProjectReq {
                project_name: name,
                molecule_names: molecule,
                therapeutic_area: area,
                key_differentiating_benefits: benefits,
                natural_language_prompt: prompt,
            };
            let res = projects.create(&caller, &req).await?;
            tracing::info!("created project {} for {}", res.project.id, caller.user_id());
            print_json(&res)?;
        }
        Commands::Compliance { id } => {
            let id = RecordId::parse(&id)?;
            let compliance = ComplianceService::new(store, ai.text.clone());
            print_json(&compliance.check(&id).await?)?;
        }
        Commands::Export { id } => {
            let id = RecordId::parse(&id)?;
            print_json(&projects.export_pdf(&id)?)?;
        }
    }

    Ok(())
}
