//! Terminal driver for the firemap controller.
//!
//! Runs one page against the real geocoder and prediction backend, with a
//! headless map and page. Commands are read from stdin, one per line:
//!
//! ```text
//! search <text>       type <text> into the search box, one key at a time
//! find <text>         search button: jump to the first match
//! pick <n>            click suggestion <n>
//! drag <lng> <lat>    drag the marker and release it
//! predict             satellite/weather prediction for the map center
//! alert <email>       subscribe <email> to alerts for the selected location
//!                     (the map center when nothing was picked)
//! camera <path>       classify the image at <path>
//! show                print the page
//! quit
//! ```

use anyhow::{bail, Context, Result};
use clap::{crate_authors, crate_description, crate_version, Parser};
use firemap::prelude::*;
use futures::future::join_all;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};

type Controller = MapController<HeadlessMap, HeadlessUi>;

#[derive(Parser, Debug)]
#[command(author = crate_authors!(), version = crate_version!(), about = crate_description!())]
struct Opts {
    /// Page to emulate: alert, satellite, camera or full
    #[clap(short, long, default_value = "full")]
    profile: PageProfile,
    /// JSON options file, overrides --profile
    #[clap(short, long)]
    config: Option<PathBuf>,
    /// Base URL of the prediction and alert backend
    #[clap(short, long)]
    backend_url: Option<String>,
    /// Base URL of the geocoding API
    #[clap(long)]
    geocoding_url: Option<String>,
    /// Mapbox access token, MAPBOX_TOKEN is used when absent
    #[clap(short, long)]
    token: Option<String>,
}

impl Opts {
    fn options(&self) -> Result<ControllerOptions> {
        let mut options = match &self.config {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                ControllerOptions::from_json(&json)?
            }
            None => self.profile.resolve(),
        };
        if let Some(url) = &self.backend_url {
            options = options.with_backend_url(url.clone());
        }
        if let Some(url) = &self.geocoding_url {
            options = options.with_geocoding_url(url.clone());
        }
        if let Some(token) = &self.token {
            options = options.with_token(token.clone());
        }
        Ok(options)
    }
}

#[derive(Debug, PartialEq)]
enum Command {
    Search(String),
    Find(String),
    Pick(usize),
    Drag(Coordinate),
    Predict,
    Alert(String),
    Camera(PathBuf),
    Show,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Result<Command> {
    let line = line.trim();
    let (verb, rest) = line.split_once(' ').unwrap_or((line, ""));
    let rest = rest.trim();

    let cmd = match verb {
        "search" => Command::Search(rest.to_string()),
        "find" => Command::Find(rest.to_string()),
        "pick" => Command::Pick(rest.parse().context("pick expects an index")?),
        "drag" => {
            let mut parts = rest.split_whitespace().map(str::parse::<f64>);
            match (parts.next(), parts.next()) {
                (Some(Ok(lng)), Some(Ok(lat))) => Command::Drag(Coordinate::new(lng, lat)),
                _ => bail!("drag expects <lng> <lat>"),
            }
        }
        "predict" => Command::Predict,
        "alert" => Command::Alert(rest.to_string()),
        "camera" if !rest.is_empty() => Command::Camera(PathBuf::from(rest)),
        "camera" => bail!("camera expects a file path"),
        "show" | "" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => bail!("unknown command '{}', try help", other),
    };
    Ok(cmd)
}

/// Feeds every prefix of `text` to the search box without waiting, the way
/// a fast typist does; only the last answer may reach the page.
async fn type_query(ctrl: &Controller, text: &str) -> Vec<Result<EventHandled, MapError>> {
    let prefixes = text
        .char_indices()
        .map(|(i, c)| text[..i + c.len_utf8()].to_string())
        .collect::<Vec<_>>();
    join_all(prefixes.into_iter().map(|query| {
        ctrl.dispatch(UiEvent::SearchInput { query })
    }))
    .await
}

async fn run(ctrl: &Controller, cmd: Command) -> Result<()> {
    let handled = match cmd {
        Command::Search(text) => {
            for outcome in type_query(ctrl, &text).await {
                outcome?;
            }
            EventHandled::Handled
        }
        Command::Find(query) => ctrl.dispatch(UiEvent::SearchSubmit { query }).await?,
        Command::Pick(index) => ctrl.dispatch(UiEvent::SuggestionClicked { index }).await?,
        Command::Drag(position) => {
            ctrl.with_map(|map| map.drag_marker_to(position))?;
            ctrl.dispatch(UiEvent::MarkerDragEnd).await?
        }
        Command::Predict => ctrl.dispatch(UiEvent::PredictClicked).await?,
        Command::Alert(email) => ctrl.dispatch(UiEvent::AlertSubmitted { email }).await?,
        Command::Camera(path) => {
            let image = ImageUpload::from_path(&path)?;
            ctrl.dispatch(UiEvent::ImageSubmitted { image }).await?
        }
        Command::Show | Command::Help | Command::Quit => EventHandled::Handled,
    };
    if handled == EventHandled::NotHandled {
        println!("(not available on this page)");
    }
    Ok(())
}

fn show(ctrl: &Controller) {
    ctrl.with_map(|map| {
        println!(
            "map #{} center {} zoom {} marker {}",
            map.container(),
            map.center(),
            map.zoom(),
            map.marker_position()
        );
    });
    ctrl.with_ui(|ui| print!("{}", ui));
}

fn help() {
    println!("search <text> | find <text> | pick <n> | drag <lng> <lat>");
    println!("predict | alert <email> | camera <path> | show | quit");
}

#[tokio::main]
async fn main() -> Result<()> {
    firemap::init_logging();

    let opts = Opts::parse();
    let options = opts.options()?;
    let map = HeadlessMap::new(&options.map);
    let ctrl = Controller::with_http(map, HeadlessUi::new(), options)
        .context("setting up the page, is MAPBOX_TOKEN set?")?;

    ctrl.on(ControllerEventKind::LocationChanged, |event| {
        if let ControllerEvent::LocationChanged { location, zoom } = event {
            log::info!("moved to {} at zoom {}", location, zoom);
        }
    });
    ctrl.on(ControllerEventKind::Failed, |event| {
        if let ControllerEvent::Failed { operation, message } = event {
            log::warn!("{}: {}", operation, message);
        }
    });

    help();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let cmd = match parse_command(&line) {
            Ok(cmd) => cmd,
            Err(e) => {
                eprintln!("{:#}", e);
                continue;
            }
        };
        match cmd {
            Command::Quit => break,
            Command::Help => help(),
            cmd => {
                // Failures are already rendered on the page
                if let Err(e) = run(&ctrl, cmd).await {
                    log::debug!("command failed: {:#}", e);
                }
                show(&ctrl);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            parse_command("search  paradise ca").unwrap(),
            Command::Search("paradise ca".to_string())
        );
        assert_eq!(parse_command("pick 2").unwrap(), Command::Pick(2));
        assert_eq!(
            parse_command("drag 10 20").unwrap(),
            Command::Drag(Coordinate::new(10.0, 20.0))
        );
        assert_eq!(parse_command("").unwrap(), Command::Show);
        assert_eq!(parse_command("quit").unwrap(), Command::Quit);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(parse_command("pick one").is_err());
        assert!(parse_command("drag 10").is_err());
        assert!(parse_command("camera").is_err());
        assert!(parse_command("teleport").is_err());
    }

    #[test]
    fn test_profile_and_overrides() {
        let opts = Opts::parse_from([
            "firemap-app",
            "--profile",
            "camera",
            "--backend-url",
            "http://localhost:9000",
        ]);
        let options = opts.options().unwrap();
        assert!(options.features.camera);
        assert!(!options.features.search);
        assert_eq!(options.endpoints.backend_url, "http://localhost:9000");
    }
}
