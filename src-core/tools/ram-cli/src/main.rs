use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

use commands::Context;
use ram_ateliers::{user_error, user_info, utils::context, AppConfig};

#[derive(Parser)]
#[command(name = "ram-cli")]
#[command(about = "Gestion des ateliers du RAM en ligne de commande", long_about = None)]
#[command(version)]
struct Cli {
    /// Travaille directement sur l'API REST au lieu des fichiers locaux
    #[arg(long, global = true, env = "RAM_REMOTE")]
    remote: bool,

    #[command(subcommand)]
    // Optionnel pour permettre le mode Shell Interactif
    command: Option<Commands>,
}

#[derive(Subcommand, Clone)]
enum Commands {
    /// Ateliers : consultation, création, modification
    Atelier(commands::atelier::AtelierArgs),

    /// Parents et assistantes maternelles
    Participant(commands::participant::ParticipantArgs),

    /// Inscriptions, présences et liste d'émargement
    Inscription(commands::inscription::InscriptionArgs),

    /// Cache hors ligne des ateliers et synchronisation avec l'API
    Sync(commands::sync::SyncArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Configuration (CRITIQUE)
    if let Err(e) = AppConfig::init() {
        eprintln!("❌ CRITICAL ERROR: Impossible d'initialiser la configuration.");
        eprintln!("   Détails : {}", e);
        std::process::exit(1);
    }
    let config = AppConfig::get().clone();

    // 2. Logger
    context::init_logging(&config);

    let cli = Cli::parse();
    let ctx = Context::open(config, cli.remote).await?;
    user_info!(
        "RAM Ateliers v{} ({})",
        env!("CARGO_PKG_VERSION"),
        ctx.source_label()
    );

    match cli.command {
        Some(cmd) => {
            // Mode "One-Shot"
            if let Err(e) = execute_command(cmd, &ctx).await {
                user_error!("{:#}", e);
                std::process::exit(1);
            }
        }
        None => run_global_shell(&ctx).await?,
    }

    tracing::debug!("Fin de l'exécution du CLI");
    Ok(())
}

/// Boucle principale du Shell Global (REPL)
async fn run_global_shell(ctx: &Context) -> Result<()> {
    use rustyline::error::ReadlineError;
    use rustyline::DefaultEditor;

    println!("--------------------------------------------------");
    println!("🧸 RAM ATELIERS - v{}", env!("CARGO_PKG_VERSION"));
    println!("   Tapez 'help' pour la liste des commandes.");
    println!("   Tapez 'exit' ou 'quit' pour quitter.");
    println!("--------------------------------------------------");

    let mut rl = DefaultEditor::new()?;
    let history_path = ctx.config.data_dir.join("history.txt");
    // Pas d'historique au premier lancement
    let _ = rl.load_history(&history_path);

    loop {
        match rl.readline("RAM> ") {
            Ok(line) => {
                let input = line.trim();
                if input.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(input);

                if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
                    println!("👋 Au revoir !");
                    break;
                }
                if input.eq_ignore_ascii_case("clear") {
                    print!("\x1B[2J\x1B[1;1H");
                    continue;
                }

                match shell_words::split(input) {
                    Ok(args) => {
                        let mut full_args = vec!["repl".to_string()];
                        full_args.extend(args);

                        match Cli::try_parse_from(full_args) {
                            Ok(Cli {
                                command: Some(cmd), ..
                            }) => {
                                if let Err(e) = execute_command(cmd, ctx).await {
                                    user_error!("{:#}", e);
                                }
                            }
                            Ok(_) => {}
                            Err(e) => {
                                e.print().ok();
                            }
                        }
                    }
                    Err(e) => eprintln!("❌ Erreur de syntaxe : {}", e),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("(CTRL-C)");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("(CTRL-D)");
                break;
            }
            Err(err) => {
                user_error!("Erreur du shell : {}", err);
                break;
            }
        }
    }

    if let Err(e) = rl.save_history(&history_path) {
        tracing::warn!("Impossible de sauvegarder l'historique : {}", e);
    }
    Ok(())
}

async fn execute_command(cmd: Commands, ctx: &Context) -> Result<()> {
    match cmd {
        Commands::Atelier(args) => commands::atelier::handle(args, ctx).await,
        Commands::Participant(args) => commands::participant::handle(args, ctx).await,
        Commands::Inscription(args) => commands::inscription::handle(args, ctx).await,
        Commands::Sync(args) => commands::sync::handle(args, ctx).await,
    }
}
