use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use digraph_app::{DiagramController, EditorSettings};
use digraph_core::{DiagramItem, NodeIndex, Point};
use digraph_storage::{OutputStyle, has_diagram_extension, load_file, save_file, to_json_string};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Settings file (defaults to the user config directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write an empty diagram
    New { file: PathBuf },
    /// Print the nodes and links of a diagram
    Show { file: PathBuf },
    /// Load a diagram and list every skipped entry; fails if any were skipped
    Check { file: PathBuf },
    /// Add a node, auto-placed unless both --x and --y are given
    AddNode {
        file: PathBuf,
        #[arg(short, long)]
        text: Option<String>,
        #[arg(long, requires = "y")]
        x: Option<f64>,
        #[arg(long, requires = "x")]
        y: Option<f64>,
    },
    /// Link two nodes by index
    AddLink { file: PathBuf, from: i64, to: i64 },
    /// Move a node
    Move {
        file: PathBuf,
        index: i64,
        x: f64,
        y: f64,
    },
    /// Remove a node together with its links
    RemoveNode { file: PathBuf, index: i64 },
    /// Remove the link between two nodes
    RemoveLink { file: PathBuf, from: i64, to: i64 },
    /// Re-encode a diagram, to stdout unless --output is given
    Export {
        file: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        pretty: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();
    let settings = EditorSettings::load_or_default(args.config.as_deref())?;

    match args.command {
        Command::New { file } => {
            warn_on_extension(&file);
            let mut app = DiagramController::new(settings);
            app.save_as(&file)?;
            println!("Created {}", file.display());
        }
        Command::Show { file } => {
            let loaded = load_file(&file)?;
            let store = &loaded.store;
            println!(
                "{}: {} node(s), {} link(s)",
                file.display(),
                store.node_count(),
                store.link_count()
            );
            for node in store.nodes() {
                println!(
                    "  node {} {} z={} {:?}",
                    node.index(),
                    node.position(),
                    node.z(),
                    node.text()
                );
            }
            for link in store.links() {
                println!("  link {} -> {}", link.from(), link.to());
            }
        }
        Command::Check { file } => {
            let loaded = load_file(&file)?;
            let report = &loaded.report;
            println!(
                "Loaded {} node(s) and {} link(s)",
                report.nodes_loaded, report.links_loaded
            );
            for entry in &report.skipped {
                println!("  skipped {}", entry);
            }
            if !report.is_clean() {
                bail!(
                    "{} entries of {} were skipped",
                    report.skipped.len(),
                    file.display()
                );
            }
        }
        Command::AddNode { file, text, x, y } => {
            let mut app = open(settings, &file)?;
            let position = x.zip(y).map(|(x, y)| Point::new(x, y));
            let index = match text {
                Some(text) => app.add_node_with(text, position)?,
                None if position.is_some() => {
                    let index = app.store().next_index();
                    app.add_node_with(format!("Node {index}"), position)?
                }
                None => app.add_node()?,
            };
            app.save()?;
            println!("Added node {}", index);
        }
        Command::AddLink { file, from, to } => {
            let mut app = open(settings, &file)?;
            app.link_nodes(NodeIndex(from), NodeIndex(to))?;
            app.save()?;
            println!("Linked {} -> {}", from, to);
        }
        Command::Move { file, index, x, y } => {
            let mut app = open(settings, &file)?;
            app.move_node(NodeIndex(index), Point::new(x, y))?;
            app.save()?;
        }
        Command::RemoveNode { file, index } => {
            let mut app = open(settings, &file)?;
            let summary = app.delete_items(&[DiagramItem::Node(NodeIndex(index))]);
            if summary.nodes.is_empty() {
                bail!("No node with index {} in {}", index, file.display());
            }
            app.save()?;
            println!(
                "Removed node {} and {} link(s)",
                index,
                summary.links.len()
            );
        }
        Command::RemoveLink { file, from, to } => {
            let mut app = open(settings, &file)?;
            let endpoints = (NodeIndex(from), NodeIndex(to));
            let ids: Vec<DiagramItem> = app
                .store()
                .links()
                .filter(|link| link.endpoints() == endpoints)
                .map(|link| DiagramItem::Link(link.id()))
                .collect();
            if ids.is_empty() {
                bail!("No link {} -> {} in {}", from, to, file.display());
            }
            app.delete_items(&ids);
            app.save()?;
            println!("Removed {} link(s)", ids.len());
        }
        Command::Export {
            file,
            output,
            pretty,
        } => {
            let loaded = load_file(&file)?;
            let style = if pretty {
                OutputStyle::Pretty
            } else {
                settings.output_style
            };
            match output {
                Some(output) => save_file(&output, &loaded.store, style)?,
                None => println!("{}", to_json_string(&loaded.store, style)?),
            }
        }
    }

    Ok(())
}

fn open(settings: EditorSettings, file: &Path) -> Result<DiagramController> {
    let mut app = DiagramController::new(settings);
    let report = app
        .open(file)
        .with_context(|| format!("Failed to open {}", file.display()))?;
    if !report.is_clean() {
        eprintln!(
            "Warning: {} entries skipped while loading; they will be dropped on save",
            report.skipped.len()
        );
    }
    Ok(app)
}

fn warn_on_extension(file: &Path) {
    if !has_diagram_extension(file) {
        tracing::warn!("{} does not have a .diag extension", file.display());
    }
}
