use clap::Parser;
use colored::*;
use ideabox::client::{
    ApiClient, CmdMessage, FileLocalStorage, MessageLevel, Mode, Outcome, Reconciler,
};
use ideabox::config::IdeaboxConfig;
use ideabox::error::{IdeaError, Result};
use ideabox::filter::{CategoryFilter, IdeaFilter};
use ideabox::logging::init_tracing;
use ideabox::model::{Category, Idea, IdeaDraft};
use ideabox::server;
use ideabox::store::fs_backend::JsonFileBackend;
use ideabox::store::IdeaStore;

mod args;
use args::{Cli, ClientArgs, Commands};

type CliReconciler = Reconciler<ApiClient, FileLocalStorage>;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = IdeaboxConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve {
            host,
            port,
            data_file,
        } => {
            if cli.verbose {
                config.log.filter = "debug".to_string();
            }
            init_tracing(&config.log)?;
            let server_config = &mut config.server;
            if let Some(host) = host {
                server_config.host = host;
            }
            if let Some(port) = port {
                server_config.port = port;
            }
            if let Some(data_file) = data_file {
                server_config.data_file = data_file;
            }
            let store = IdeaStore::with_backend(JsonFileBackend::new(&server_config.data_file));
            server::serve(store, &server_config.host, server_config.port).await
        }
        command => {
            // Client commands stay quiet unless asked; RUST_LOG still wins.
            config.log.filter = if cli.verbose { "debug" } else { "off" }.to_string();
            init_tracing(&config.log)?;
            run_client(command, config).await
        }
    }
}

async fn run_client(command: Commands, config: IdeaboxConfig) -> Result<()> {
    match command {
        Commands::List {
            search,
            category,
            tags,
            client,
        } => {
            let filter = IdeaFilter::new()
                .with_search(search.unwrap_or_default())
                .with_category(category.parse::<CategoryFilter>()?)
                .with_tags(tags);
            let reconciler = connect(&config, &client).await?;
            handle_list(&reconciler, &filter);
            Ok(())
        }
        Commands::Add {
            title,
            description,
            category,
            tags,
            client,
        } => {
            let draft = build_draft(title, description, &category, &tags)?;
            let mut reconciler = connect(&config, &client).await?;
            let outcome = report(reconciler.create(draft).await, "Failed to create idea.")?;
            print_outcome(&outcome);
            Ok(())
        }
        Commands::Edit {
            id,
            title,
            description,
            category,
            tags,
            client,
        } => {
            let draft = build_draft(title, description, &category, &tags)?;
            let mut reconciler = connect(&config, &client).await?;
            let outcome = report(reconciler.update(&id, draft).await, "Failed to update idea.")?;
            print_outcome(&outcome);
            Ok(())
        }
        Commands::Delete { id, client } => {
            let mut reconciler = connect(&config, &client).await?;
            let outcome = report(reconciler.delete(&id).await, "Failed to delete idea.")?;
            print_messages(&outcome.messages);
            Ok(())
        }
        Commands::Tags { client } => {
            let reconciler = connect(&config, &client).await?;
            let tags = reconciler.available_tags();
            if tags.is_empty() {
                println!("{}", "No tags yet.".dimmed());
            }
            for tag in tags {
                println!("#{}", tag);
            }
            Ok(())
        }
        Commands::Stats { client } => {
            let reconciler = connect(&config, &client).await?;
            handle_stats(&reconciler);
            Ok(())
        }
        Commands::Health { client } => {
            let api = api_client(&config, &client)?;
            let health = api.health_check().await?;
            println!("{} {} ({})", "●".green(), health.status, health.timestamp);
            Ok(())
        }
        Commands::Serve { .. } => Err(IdeaError::Config(
            "serve is not a client command".to_string(),
        )),
    }
}

fn api_client(config: &IdeaboxConfig, args: &ClientArgs) -> Result<ApiClient> {
    let base_url = args
        .api_url
        .clone()
        .unwrap_or_else(|| config.client.api_url.clone());
    ApiClient::with_timeout(base_url, config.client.timeout())
}

/// Build a reconciler and run its initial load, announcing the mode.
async fn connect(config: &IdeaboxConfig, args: &ClientArgs) -> Result<CliReconciler> {
    let api = api_client(config, args)?;
    let local_dir = args
        .local_dir
        .clone()
        .unwrap_or_else(|| config.client.local_dir());
    let base_url = api.base_url().to_string();

    let mut reconciler = Reconciler::new(api, FileLocalStorage::new(local_dir));
    let outcome = reconciler.load().await;
    match reconciler.mode() {
        Mode::Online => println!("{} {}", "● online".green(), base_url.dimmed()),
        Mode::Offline => println!("{}", "○ offline".red()),
    }
    print_messages(&outcome.messages);
    Ok(reconciler)
}

fn build_draft(
    title: String,
    description: String,
    category: &str,
    tags: &[String],
) -> Result<IdeaDraft> {
    let category: Category = category.parse()?;
    IdeaDraft::new(title, description, category)
        .with_tags(tags)
        .validate()
}

fn handle_list(reconciler: &CliReconciler, filter: &IdeaFilter) {
    let all = reconciler.ideas();
    let visible = reconciler.visible(filter);

    if all.is_empty() {
        println!("{}", "Your first idea is waiting! Try `ideabox add`.".dimmed());
        return;
    }
    if visible.is_empty() {
        println!("{}", "No ideas found. Try adjusting the filters.".dimmed());
        return;
    }
    for idea in visible {
        print_idea(idea);
    }
}

fn handle_stats(reconciler: &CliReconciler) {
    println!("Total: {} ideas", reconciler.ideas().len().to_string().bold());
    for (category, count) in reconciler.category_counts() {
        println!("  {:<9} {}", category.to_string(), count);
    }
}

fn category_color(category: Category) -> Color {
    match category {
        Category::Personal => Color::Green,
        Category::Work => Color::Blue,
        Category::Creative => Color::Magenta,
        Category::Tech => Color::Cyan,
        Category::Business => Color::Yellow,
    }
}

fn print_idea(idea: &Idea) {
    let tags = if idea.tags.is_empty() {
        String::new()
    } else {
        let joined: Vec<String> = idea.tags.iter().map(|t| format!("#{}", t)).collect();
        format!("  {}", joined.join(" ").dimmed())
    };
    println!(
        "{}  {} {}{}",
        idea.id.dimmed(),
        format!("{:<9}", idea.category).color(category_color(idea.category)),
        idea.title.bold(),
        tags
    );
    println!(
        "    {} {}",
        idea.created_at.format("%Y-%m-%d").to_string().dimmed(),
        idea.description
    );
}

/// Announce a mutation the service rejected before the error itself is printed.
fn report(result: Result<Outcome>, failure: &str) -> Result<Outcome> {
    if let Err(err) = &result {
        let detail = match err.status() {
            Some(404) => "Idea not found on the server.",
            Some(_) => "Please try again.",
            None => return result,
        };
        print_messages(&[CmdMessage::error(format!("{} {}", failure, detail))]);
    }
    result
}

fn print_outcome(outcome: &Outcome) {
    if let Some(idea) = &outcome.affected {
        print_idea(idea);
    }
    print_messages(&outcome.messages);
}

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        let text = match message.level {
            MessageLevel::Success => message.content.green(),
            MessageLevel::Warning => message.content.yellow(),
            MessageLevel::Error => message.content.red(),
        };
        println!("{}", text);
    }
}
