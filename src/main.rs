use std::sync::Arc;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use debate_graph_engine::{
    config::Config,
    engine::{DebateEngine, InstructionOutcome, SubmitOutcome},
    graph::{Rating, Speaker},
    reasoner::ReasonerClient,
};

/// Interactive debate mapper: statements in, argument graph out.
#[derive(Debug, Parser)]
#[command(name = "debate-graph-engine", version, about)]
struct Args {
    /// Print the flattened tree after every committed mutation
    #[arg(long)]
    echo_tree: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Load configuration
    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize logging
    init_logging(&config);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Debate graph engine starting..."
    );

    // Initialize reasoner client
    let reasoner = match ReasonerClient::new(
        &config.reasoner,
        config.request.clone(),
        config.pipes.clone(),
    ) {
        Ok(c) => {
            info!(base_url = %config.reasoner.base_url, "Reasoner client initialized");
            c
        }
        Err(e) => {
            error!(error = %e, "Failed to initialize reasoner client");
            return Err(e.into());
        }
    };

    let engine = DebateEngine::new(Arc::new(reasoner), config.engine.clone());

    println!("Debate mapper ready. Commands:");
    println!("  a: <statement>      submit for side A");
    println!("  b: <statement>      submit for side B");
    println!("  /mod <instruction>  moderator instruction");
    println!("  /rate <id> up|down  toggle a rating");
    println!("  /undo /redo /tree /leaning /reset /quit");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "/quit" {
            break;
        }
        if let Err(e) = handle_line(&engine, line, args.echo_tree).await {
            eprintln!("error: {}", e);
        }
    }

    info!("Debate mapper shutting down");
    Ok(())
}

async fn handle_line(engine: &DebateEngine, line: &str, echo_tree: bool) -> anyhow::Result<()> {
    if let Some(statement) = line.strip_prefix("a:") {
        submit(engine, Speaker::SideA, statement.trim(), echo_tree).await?;
    } else if let Some(statement) = line.strip_prefix("b:") {
        submit(engine, Speaker::SideB, statement.trim(), echo_tree).await?;
    } else if let Some(instruction) = line.strip_prefix("/mod ") {
        match engine.send_instruction(instruction.trim()).await? {
            InstructionOutcome::Replied { reply, map_updated } => {
                println!("moderator: {}", reply);
                if map_updated && echo_tree {
                    print_tree(engine);
                }
            }
            InstructionOutcome::Superseded => println!("(response discarded)"),
        }
    } else if let Some(rest) = line.strip_prefix("/rate ") {
        let mut parts = rest.split_whitespace();
        let (Some(id), Some(dir)) = (parts.next(), parts.next()) else {
            println!("usage: /rate <node-id> up|down");
            return Ok(());
        };
        let rating = match dir {
            "up" => Rating::Up,
            "down" => Rating::Down,
            _ => {
                println!("usage: /rate <node-id> up|down");
                return Ok(());
            }
        };
        if engine.rate_node(id, rating) {
            println!("rated {} {}", id, dir);
        } else {
            println!("no such node: {}", id);
        }
    } else if line == "/undo" {
        println!("{}", if engine.undo() { "undone" } else { "nothing to undo" });
    } else if line == "/redo" {
        println!("{}", if engine.redo() { "redone" } else { "nothing to redo" });
    } else if line == "/tree" {
        print_tree(engine);
    } else if line == "/leaning" {
        println!("leaning: {:+.2}", engine.current_leaning());
    } else if line == "/reset" {
        engine.reset();
        println!("debate reset");
    } else {
        println!("unrecognized input; statements start with 'a:' or 'b:'");
    }
    Ok(())
}

async fn submit(
    engine: &DebateEngine,
    speaker: Speaker,
    statement: &str,
    echo_tree: bool,
) -> anyhow::Result<()> {
    match engine.submit_statement(speaker, statement).await? {
        SubmitOutcome::Committed { leaning, node_count } => {
            println!("committed: {} nodes, leaning {:+.2}", node_count, leaning);
            if echo_tree {
                print_tree(engine);
            }
        }
        SubmitOutcome::Superseded => println!("(response discarded)"),
    }
    Ok(())
}

fn print_tree(engine: &DebateEngine) {
    let view = engine.view();
    for row in engine.rows() {
        let node = view.nodes.iter().find(|n| n.id == row.node_id);
        let content = node.map(|n| n.content.as_str()).unwrap_or("");
        let marker = if view.derived.is_dimmed(&row.node_id) {
            "~"
        } else if view.derived.contradiction_border_ids.contains(&row.node_id) {
            "!"
        } else if view.derived.walkback_border_ids.contains(&row.node_id) {
            "?"
        } else {
            " "
        };
        let collapsed = if row.collapsed {
            format!(" [+{}]", row.descendant_count)
        } else {
            String::new()
        };
        println!(
            "{}{:indent$}{} {}{}",
            marker,
            "",
            row.node_id,
            content,
            collapsed,
            indent = row.depth * 2
        );
    }
}

/// Initialize tracing/logging
fn init_logging(config: &Config) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format {
        debate_graph_engine::config::LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        debate_graph_engine::config::LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}
