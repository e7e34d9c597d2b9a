use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use transport_map::domain::{PathCriteria, StopCode, TransportMode};
use transport_map::network::{NetworkData, TransportMap};
use transport_map::overlay::{CommandCategory, OverlayError};
use transport_map::planner::{PathRequest, PathResult, PathStrategy, RoutingConfig};
use transport_map::session::{RoutingSession, SharedSession};

#[derive(Parser)]
#[command(name = "transport-map")]
#[command(about = "Least-cost routing over a multi-modal transport network", long_about = None)]
struct Cli {
    /// Network JSON file
    #[arg(short, long)]
    network: PathBuf,

    /// Overlay file, loaded at start and saved after every change
    #[arg(short, long)]
    overlay: Option<PathBuf>,

    /// Bicycle duration scale when no overlay file is given
    #[arg(long, default_value_t = 1.0)]
    bicycle_scale: f64,

    /// Algorithm override, as criteria=strategy (e.g. duration=depth-first)
    #[arg(long = "strategy", value_parser = parse_strategy_override)]
    strategies: Vec<(PathCriteria, PathStrategy)>,

    #[command(subcommand)]
    command: Command,
}

/// One line of `shell` input.
#[derive(Parser)]
#[command(name = "transport-map", no_binary_name = true)]
struct ShellLine {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Find the least-cost path between two stops
    Path {
        from: String,
        to: String,
        /// What to minimise
        #[arg(short, long, default_value = "duration")]
        criteria: PathCriteria,
        /// Allowed modes, comma separated (default: all)
        #[arg(short, long, value_delimiter = ',')]
        modes: Vec<TransportMode>,
        /// Waypoint to pass through; repeat for several, in order
        #[arg(long)]
        via: Vec<String>,
        /// Also print the way back
        #[arg(long)]
        round_trip: bool,
    },
    /// Network statistics
    Stats {
        /// How many of the busiest stops to list
        #[arg(long, default_value_t = 10)]
        top: usize,
    },
    /// List the stops at most N routes away from a stop
    Within {
        from: String,
        /// Largest number of routes to travel
        #[arg(short, long, default_value_t = 1)]
        routes: usize,
    },
    /// Switch off the route between two stops
    DisableRoute { a: String, b: String },
    /// Switch the route between two stops back on
    EnableRoute { a: String, b: String },
    /// Switch off one mode on the route between two stops
    DisableMode { a: String, b: String, mode: TransportMode },
    /// Switch one mode back on
    EnableMode { a: String, b: String, mode: TransportMode },
    /// Set the bicycle duration scale (0.25 to 2.0)
    BicycleScale { scale: f64 },
    /// Undo the newest change of one kind
    Undo { kind: UndoKind },
    /// Switch every route and mode back on; cannot be undone
    Reset,
    /// Show the overlay and this session's change history
    ShowOverlay,
    /// Read commands from standard input, one per line, until EOF or `quit`
    Shell,
}

#[derive(Clone, Copy, ValueEnum)]
enum UndoKind {
    Route,
    Mode,
    BicycleScale,
}

impl From<UndoKind> for CommandCategory {
    fn from(kind: UndoKind) -> Self {
        match kind {
            UndoKind::Route => CommandCategory::Route,
            UndoKind::Mode => CommandCategory::RouteMode,
            UndoKind::BicycleScale => CommandCategory::BicycleScale,
        }
    }
}

fn parse_strategy_override(s: &str) -> Result<(PathCriteria, PathStrategy), String> {
    let (criteria, strategy) = s
        .split_once('=')
        .ok_or_else(|| format!("expected criteria=strategy, got {s}"))?;
    let criteria = criteria.parse().map_err(|e| format!("{e}"))?;
    let strategy = strategy.parse().map_err(|e| format!("{e}"))?;
    Ok((criteria, strategy))
}

fn code(s: &str) -> Result<StopCode> {
    StopCode::parse(s).with_context(|| format!("bad stop code {s:?}"))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let data = NetworkData::from_path(&cli.network)
        .with_context(|| format!("loading network {}", cli.network.display()))?;
    let mut config = RoutingConfig {
        default_bicycle_scale: cli.bicycle_scale,
        overlay_path: cli.overlay.clone(),
        ..RoutingConfig::default()
    };
    for &(criteria, strategy) in &cli.strategies {
        config.set_strategy(criteria, strategy);
    }
    let session = SharedSession::new(RoutingSession::from_network(&data, config)?);

    match cli.command {
        Command::Shell => run_shell(&session).await,
        command => run(&session, command).await,
    }
}

async fn run(session: &SharedSession, command: Command) -> Result<()> {
    match command {
        Command::Path {
            from,
            to,
            criteria,
            modes,
            via,
            round_trip,
        } => {
            let waypoints = via.iter().map(|s| code(s)).collect::<Result<Vec<_>>>()?;
            let mut request = PathRequest::new(code(&from)?, code(&to)?).with_waypoints(waypoints);
            if !modes.is_empty() {
                request = request.with_modes(modes);
            }
            let path = session.least_cost_path(criteria, request).await?;
            let text = session
                .read(|s| describe_path(s.map(), &path, criteria, round_trip))
                .await;
            println!("{text}");
        }
        Command::Stats { top } => {
            let text = session.read(|s| describe_stats(s.map(), top)).await;
            println!("{text}");
        }
        Command::Within { from, routes } => {
            let from = code(&from)?;
            let text = session
                .read(|s| {
                    let map = s.map();
                    let names: Vec<String> = map
                        .stops_within(&from, routes)?
                        .into_iter()
                        .filter_map(|id| map.stop(id))
                        .map(|stop| format!("{} ({})", stop.name(), stop.code()))
                        .collect();
                    anyhow::Ok(names.join("\n"))
                })
                .await?;
            println!("{text}");
        }
        Command::DisableRoute { a, b } => {
            let (a, b) = (code(&a)?, code(&b)?);
            change(session, move |s| s.disable_route(&a, &b)).await?;
        }
        Command::EnableRoute { a, b } => {
            let (a, b) = (code(&a)?, code(&b)?);
            change(session, move |s| s.enable_route(&a, &b)).await?;
        }
        Command::DisableMode { a, b, mode } => {
            let (a, b) = (code(&a)?, code(&b)?);
            change(session, move |s| s.disable_mode(&a, &b, mode)).await?;
        }
        Command::EnableMode { a, b, mode } => {
            let (a, b) = (code(&a)?, code(&b)?);
            change(session, move |s| s.enable_mode(&a, &b, mode)).await?;
        }
        Command::BicycleScale { scale } => {
            change(session, move |s| s.set_bicycle_scale(scale)).await?;
        }
        Command::Undo { kind } => {
            let undone = session
                .write(|s| {
                    let command = s.undo(kind.into())?;
                    s.persist()?;
                    anyhow::Ok(command.describe(s.map()))
                })
                .await?;
            println!("undid: {undone}");
        }
        Command::Reset => {
            session
                .write(|s| {
                    s.reset();
                    s.persist()
                })
                .await?;
            println!("all routes and modes enabled");
        }
        Command::ShowOverlay => {
            let text = session.read(describe_overlay).await;
            println!("{text}");
        }
        Command::Shell => bail!("already in a shell"),
    }
    Ok(())
}

/// Apply an overlay change and save the overlay if a path is configured.
async fn change(
    session: &SharedSession,
    f: impl FnOnce(&mut RoutingSession) -> Result<bool, OverlayError>,
) -> Result<()> {
    let changed = session
        .write(|s| {
            let changed = f(s)?;
            s.persist()?;
            anyhow::Ok(changed)
        })
        .await?;
    println!("{}", if changed { "changed" } else { "no change" });
    Ok(())
}

async fn run_shell(session: &SharedSession) -> Result<()> {
    let (tx, mut rx) = tokio::sync::mpsc::channel::<String>(16);
    // A plain thread so a pending stdin read never holds up shutdown.
    std::thread::spawn(move || {
        for line in std::io::stdin().lines().map_while(Result::ok) {
            if tx.blocking_send(line).is_err() {
                break;
            }
        }
    });

    while let Some(line) = rx.recv().await {
        let words: Vec<&str> = line.split_whitespace().collect();
        match words.first() {
            None => continue,
            Some(&"quit") | Some(&"exit") => break,
            Some(_) => {}
        }
        match ShellLine::try_parse_from(words) {
            Ok(ShellLine {
                command: Command::Shell,
            }) => eprintln!("already in a shell"),
            Ok(ShellLine { command }) => {
                if let Err(err) = run(session, command).await {
                    eprintln!("error: {err:#}");
                }
            }
            Err(err) => eprintln!("{err}"),
        }
    }
    Ok(())
}

fn describe_path(
    map: &TransportMap,
    path: &PathResult,
    criteria: PathCriteria,
    round_trip: bool,
) -> String {
    let mut lines = vec![format!("{} (minimising {criteria})", path.itinerary(map))];
    if round_trip {
        lines.push(format!("return: {}", path.reversed().itinerary(map)));
    }
    for total in PathCriteria::ALL {
        lines.push(format!(
            "  {:<15} {:.2} {}",
            total.label(),
            path.total(total),
            total.unit()
        ));
    }
    lines.join("\n")
}

fn describe_stats(map: &TransportMap, top: usize) -> String {
    let summary = map.summary();
    let mut lines = vec![
        format!("stops:           {}", summary.stops),
        format!("  connected:     {}", summary.connected_stops),
        format!("  isolated:      {}", summary.isolated_stops),
        format!("routes:          {}", summary.routes),
    ];
    for (mode, count) in &summary.routes_by_mode {
        lines.push(format!("  {mode:<13} {count}"));
    }
    lines.push("busiest stops:".to_string());
    for entry in map.centrality().into_iter().take(top) {
        lines.push(format!("  {:<30} {}", entry.stop.name(), entry.routes));
    }
    lines.join("\n")
}

fn describe_overlay(session: &RoutingSession) -> String {
    let map = session.map();
    let overlay = session.overlay();
    let label = |route| map.route_label(route).unwrap_or_else(|| "?".to_string());

    let mut lines = vec![format!(
        "bicycle duration scale: {:.2}",
        overlay.bicycle_duration_scale()
    )];
    for route in overlay.disabled_routes() {
        lines.push(format!("disabled: {}", label(route)));
    }
    for (route, modes) in overlay.routes_with_disabled_modes() {
        let modes: Vec<_> = modes.iter().map(|m| m.as_str()).collect();
        lines.push(format!("disabled {} on {}", modes.join(", "), label(route)));
    }
    for category in CommandCategory::ALL {
        for entry in session.log().history(category) {
            lines.push(format!(
                "{} {}{}",
                entry.executed_at.format("%H:%M:%S"),
                entry.command.describe(map),
                if entry.changed { "" } else { " (no change)" }
            ));
        }
    }
    lines.join("\n")
}
