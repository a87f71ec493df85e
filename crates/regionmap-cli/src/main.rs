use regionmap::render::{
    ComposeOptions, LandPaths, LandPolygons, NoLand, SvgRenderOptions, render_session_svg,
    sanitize_svg_id,
};
use regionmap::{
    InitiallyVisible, Layout, MapConfig, MapProps, MapSession, Region, RegionCatalog, ThemeSpec,
    normalize_value, parse_groups,
};
use serde::Serialize;
use serde_json::Value;
use std::io::Read;
use std::path::Path;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Input(regionmap::Error),
    Render(regionmap::render::HeadlessError),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Input(err) => write!(f, "{err}"),
            CliError::Render(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<regionmap::Error> for CliError {
    fn from(value: regionmap::Error) -> Self {
        Self::Input(value)
    }
}

impl From<regionmap::render::HeadlessError> for CliError {
    fn from(value: regionmap::render::HeadlessError) -> Self {
        Self::Render(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Normalize,
    Render,
    Regions,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    config: Option<String>,
    pretty: bool,
    theme: Option<String>,
    layout: Option<Layout>,
    visible: InitiallyVisible,
    no_regions: bool,
    no_land: bool,
    diagram_id: Option<String>,
    out: Option<String>,
}

#[derive(Serialize)]
struct RegionOut<'a> {
    code: &'a str,
    name: &'a str,
    lat: f64,
    lon: f64,
}

fn usage() -> &'static str {
    "regionmap-cli\n\
\n\
USAGE:\n\
  regionmap-cli [normalize] [--config <path>] [--pretty] [<path>|-]\n\
  regionmap-cli render [--config <path>] [--theme <name>] [--layout stacked|side_by_side] [--visible all|none|[only:]<a,b,..>] [--no-regions] [--no-land] [--id <map-id>] [--out <path>] [<path>|-]\n\
  regionmap-cli regions [--config <path>] [--pretty]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', marker groups are read from stdin as JSON.\n\
  - Input is an array of groups or an object with a `marker_groups` array.\n\
  - --config accepts JSON, or YAML when the file ends in .yaml/.yml.\n\
  - render prints SVG to stdout by default; use --out to write a file.\n\
  - --visible keywords are case-insensitive; prefix the list with only: to select groups named all or none.\n\
  - Set REGIONMAP_LOG (e.g. REGIONMAP_LOG=debug) to see resolution logs on stderr.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "normalize" => args.command = Command::Normalize,
            "render" => args.command = Command::Render,
            "regions" => args.command = Command::Regions,
            "--pretty" => args.pretty = true,
            "--no-regions" => args.no_regions = true,
            "--no-land" => args.no_land = true,
            "--config" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.config = Some(path.clone());
            }
            "--theme" => {
                let Some(name) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                if !name.trim().is_empty() {
                    args.theme = Some(name.trim().to_string());
                }
            }
            "--layout" => {
                let Some(layout) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.layout = Some(
                    layout
                        .parse::<Layout>()
                        .map_err(|_| CliError::Usage(usage()))?,
                );
            }
            "--visible" => {
                let Some(visible) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.visible = match visible.parse::<InitiallyVisible>() {
                    Ok(v) => v,
                    Err(never) => match never {},
                };
            }
            "--id" => {
                let Some(id) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.diagram_id = Some(id.clone());
            }
            "--out" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
            }
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            other if other.starts_with('-') && other != "-" => {
                return Err(CliError::Usage(usage()));
            }
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    Ok(args)
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("REGIONMAP_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn load_config(path: Option<&str>) -> Result<MapConfig, CliError> {
    let Some(path) = path else {
        return Ok(MapConfig::default());
    };
    let text = std::fs::read_to_string(path)?;
    let is_yaml = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"));
    let config = if is_yaml {
        MapConfig::from_yaml_str(&text)?
    } else {
        MapConfig::from_json_str(&text)?
    };
    tracing::debug!(path, custom_regions = config.custom_regions.len(), "loaded config");
    Ok(config)
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    println!();
    Ok(())
}

fn write_text(text: &str, out: Option<&str>) -> Result<(), CliError> {
    match out {
        None => {
            print!("{text}");
            Ok(())
        }
        Some(path) => {
            std::fs::write(path, text)?;
            Ok(())
        }
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let config = load_config(args.config.as_deref())?;

    match args.command {
        Command::Regions => {
            let catalog = RegionCatalog::new(&config);
            let regions: Vec<Region> = catalog
                .all()
                .keys()
                .map(|code| catalog.region(code))
                .collect::<Result<_, _>>()
                .map_err(|err| {
                    CliError::Input(regionmap::Error::InvalidInput {
                        message: err.to_string(),
                    })
                })?;
            let out: Vec<RegionOut<'_>> = regions
                .iter()
                .map(|r| RegionOut {
                    code: &r.code,
                    name: &r.name,
                    lat: r.coordinates.lat,
                    lon: r.coordinates.lon,
                })
                .collect();
            write_json(&out, args.pretty)
        }
        Command::Normalize => {
            let text = read_input(args.input.as_deref())?;
            let value: Value = serde_json::from_str(&text)?;
            let normalized = normalize_value(&value, &config)?;
            write_json(&normalized, args.pretty)
        }
        Command::Render => {
            let text = read_input(args.input.as_deref())?;
            let value: Value = serde_json::from_str(&text)?;
            let parsed = parse_groups(&value)?;

            let props = MapProps {
                marker_groups: parsed.groups,
                theme: args.theme.as_deref().map(ThemeSpec::from),
                show_regions: args.no_regions.then_some(false),
                layout: args.layout,
                initially_visible: args.visible,
                id: args.diagram_id.as_deref().map(sanitize_svg_id),
                ..Default::default()
            };
            let session = MapSession::mount(&config, props);
            tracing::info!(
                groups = session.groups().len(),
                failures = parsed.failures.len() + session.normalized().failures.len(),
                "rendering map"
            );

            let land: Box<dyn LandPaths> = if args.no_land {
                Box::new(NoLand)
            } else {
                Box::new(LandPolygons::coarse_world())
            };
            let svg = render_session_svg(
                &session,
                land.as_ref(),
                &ComposeOptions::default(),
                &SvgRenderOptions::default(),
            )?;
            write_text(&svg, args.out.as_deref())
        }
    }
}

fn main() {
    init_tracing();

    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
