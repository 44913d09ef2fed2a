use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use kiwa::bootstrap::{init_state, reload_annex};
use kiwa::classify::{classify_app, classify_art};
use kiwa::config::KiwaConfig;
use kiwa::state::{AppState, ReloadOutcome};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(version, about = "Casas Kiwa proposal: annex and apps search")]
struct Cli {
    #[command(flatten)]
    source: SourceArgs,
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Args)]
struct SourceArgs {
    /// JSON settings file (env vars fill in what it leaves out)
    #[arg(long, global = true)]
    config: Option<String>,
    /// Proposal document, path or URL
    #[arg(long, global = true)]
    data: Option<String>,
    /// Annex TSV, path or URL; defaults to the document's anexos.tsv_horario_url
    #[arg(long, global = true)]
    tsv: Option<String>,
    /// Collation locale for section ordering
    #[arg(long, global = true)]
    locale: Option<String>,
}

#[derive(Subcommand)]
enum Cmd {
    /// Load the schedule annex and print the rows matching a query
    Annex {
        #[arg(long, short, default_value = "")]
        query: String,
    },
    /// Print the apps directory grouped by section
    Apps {
        #[arg(long, short, default_value = "")]
        query: String,
        /// Section chip to select ("Todos" for all)
        #[arg(long, short, default_value = "Todos")]
        section: String,
        /// Only list the section chips
        #[arg(long)]
        sections: bool,
    },
    /// List the art disciplines
    Arts,
    /// Print the loaded (year-patched) document as JSON
    Export,
    /// Interactive search over apps and annex
    Repl,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = build_config(&cli.source)?;
    let mut state = init_state(config).await?;

    match cli.cmd {
        Cmd::Annex { query } => {
            load_annex(&mut state).await?;
            state.set_annex_query(query);
            print_annex(&state);
        }
        Cmd::Apps {
            query,
            section,
            sections,
        } => {
            if sections {
                for chip in state.apps_chips() {
                    println!("{chip}");
                }
            } else {
                state.set_apps_query(query);
                state.select_section(&section);
                print_apps(&state);
            }
        }
        Cmd::Arts => print_arts(&state),
        Cmd::Export => {
            let json = state.proposal.to_pretty_json().context("serialize proposal")?;
            println!("{json}");
        }
        Cmd::Repl => run_repl(&mut state).await?,
    }
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn build_config(args: &SourceArgs) -> Result<KiwaConfig> {
    let mut cfg = match &args.config {
        Some(path) => {
            let raw = std::fs::read_to_string(path).with_context(|| format!("read {path}"))?;
            KiwaConfig::from_json(&raw)?
        }
        None => KiwaConfig::from_env(),
    };
    if let Some(d) = &args.data {
        cfg.data_url = d.clone();
    }
    if let Some(t) = &args.tsv {
        cfg.tsv_url = Some(t.clone());
    }
    if let Some(l) = &args.locale {
        cfg.locale = l.clone();
    }
    Ok(cfg)
}

async fn load_annex(state: &mut AppState) -> Result<()> {
    match reload_annex(state).await? {
        ReloadOutcome::Failed { reason } => anyhow::bail!("annex unavailable: {reason}"),
        _ => Ok(()),
    }
}

fn print_annex(state: &AppState) {
    let table = &state.annex.table;
    println!("{}", table.headers.join("\t"));
    for row in state.visible_rows() {
        println!("{}", row.cells().join("\t"));
    }
    eprintln!("{}", state.annex_status());
}

fn print_apps(state: &AppState) {
    let grouped = state.apps_view();
    if grouped.is_empty() {
        println!("No hay resultados con ese filtro.");
        return;
    }
    for group in grouped.iter() {
        println!("{} · {}", group.key, group.items.len());
        for e in &group.items {
            println!(
                "  {} {}\t{}\t{}\t{}",
                classify_app(e).icon(),
                e.name,
                e.kind_or_default(),
                if e.link.is_empty() { "#" } else { e.link.as_str() },
                e.description_or_default()
            );
        }
    }
}

fn print_arts(state: &AppState) {
    let artes = &state.proposal.artes;
    if artes.is_empty() {
        println!("No hay artes configuradas en el JSON todavía.");
        return;
    }
    for a in artes {
        println!("{} {}\t{}", classify_art(&a.nombre).icon(), a.nombre, a.proposito);
        for eje in &a.ejes {
            println!("    - {eje}");
        }
    }
}

async fn run_repl(state: &mut AppState) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut out = tokio::io::stdout();
    loop {
        out.write_all(format!("{}> ", state.view).as_bytes()).await?;
        out.flush().await?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let s = line.trim();
        if s == ":q" || s == ":quit" {
            break;
        }
        let (cmd, arg) = s.split_once(' ').unwrap_or((s, ""));
        let arg = arg.trim();
        match cmd {
            "" => continue,
            "apps" => {
                state.navigate("aplicativos");
                state.set_apps_query(arg);
                print_apps(state);
            }
            "sec" => {
                state.navigate("aplicativos");
                state.select_section(arg);
                print_apps(state);
            }
            "chips" => println!("{}", state.apps_chips().join(" | ")),
            "tsv" => {
                state.navigate("anexos");
                if !state.annex.loaded {
                    if let Err(err) = load_annex(state).await {
                        println!("{err:#}");
                        continue;
                    }
                }
                state.set_annex_query(arg);
                print_annex(state);
            }
            "reload" => match reload_annex(state).await {
                Ok(_) => println!("{}", state.annex_status()),
                Err(err) => println!("{err:#}"),
            },
            "close" => {
                state.close_annex();
                println!("{}", state.annex_status());
            }
            "view" => {
                let v = state.navigate(arg);
                println!("{v}");
            }
            _ => println!("commands: apps <q> | sec <name|Todos> | chips | tsv <q> | reload | close | view <name> | :q"),
        }
    }
    Ok(())
}
