//! Interactive console frontend
//!
//! Wires stdin commands to the session and renders session events to
//! stdout. Holds no slideshow state of its own.

use crate::CliOptions;
use anyhow::Result;
use deck_core::{
    event_channel, DeckConfig, Direction, FileSource, ImageEntry, ImageId, PathSource,
    SessionEvent, SlideshowSession,
};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};

const PROMPT_HELP: &str = "\
Commands:
  list               show loaded images and selection marks
  toggle <id>        flip the selection of image <id>
  finalize           snapshot the selection into the playlist
  order              show the playlist
  move <pos> up|down swap a playlist slide with its neighbour
  next / prev        step through the playlist (wraps around)
  start [ms]         start the slideshow (default delay from config)
  stop               stop the slideshow
  theme              toggle light/dark theme preference
  load <paths>...    load a new batch of images
  help               show this help
  quit               exit
";

/// One parsed line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
enum UiCommand {
    List,
    Toggle(ImageId),
    Finalize,
    Order,
    Move { index: usize, direction: Direction },
    Navigate(Direction),
    Start(Option<u64>),
    Stop,
    Theme,
    Load(Vec<PathBuf>),
    Help,
    Quit,
}

fn parse_command(line: &str) -> Result<UiCommand, String> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Err("empty command".to_string());
    };

    let command = match verb {
        "list" | "ls" => UiCommand::List,
        "toggle" | "t" => {
            let id = words
                .next()
                .and_then(|w| w.trim_start_matches('#').parse().ok())
                .ok_or("usage: toggle <id>")?;
            UiCommand::Toggle(ImageId(id))
        }
        "finalize" | "f" => UiCommand::Finalize,
        "order" | "o" => UiCommand::Order,
        "move" | "m" => {
            let index = words
                .next()
                .and_then(|w| w.parse().ok())
                .ok_or("usage: move <pos> up|down")?;
            let direction = match words.next() {
                Some("up") => Direction::Back,
                Some("down") => Direction::Forward,
                _ => return Err("usage: move <pos> up|down".to_string()),
            };
            UiCommand::Move { index, direction }
        }
        "next" | "n" => UiCommand::Navigate(Direction::Forward),
        "prev" | "p" => UiCommand::Navigate(Direction::Back),
        "start" => {
            let delay = match words.next() {
                Some(word) => Some(word.parse().map_err(|_| "delay must be a number in ms")?),
                None => None,
            };
            UiCommand::Start(delay)
        }
        "stop" => UiCommand::Stop,
        "theme" => UiCommand::Theme,
        "load" => {
            let paths: Vec<PathBuf> = words.by_ref().map(PathBuf::from).collect();
            if paths.is_empty() {
                return Err("usage: load <paths>...".to_string());
            }
            UiCommand::Load(paths)
        }
        "help" | "?" => UiCommand::Help,
        "quit" | "q" | "exit" => UiCommand::Quit,
        other => return Err(format!("unknown command: {}", other)),
    };

    if let Some(extra) = words.next() {
        return Err(format!("unexpected argument: {}", extra));
    }
    Ok(command)
}

fn render_event(event: SessionEvent) {
    match event {
        SessionEvent::ImageLoaded { id, name } => println!("  loaded {} {}", id, name),
        SessionEvent::ImageRejected { name, reason } => {
            println!("  rejected {}: {}", name, reason)
        }
        SessionEvent::BatchComplete { loaded, rejected } => {
            println!("  batch complete: {} loaded, {} rejected", loaded, rejected)
        }
        SessionEvent::SelectionChanged { selected } => println!(
            "({} image{} selected)",
            selected,
            if selected == 1 { "" } else { "s" }
        ),
        SessionEvent::OrderChanged { slides } => render_order(&slides),
        SessionEvent::SlideChanged { index, total } => {
            println!("Slide {} of {}", index + 1, total)
        }
        SessionEvent::Status { text, is_error } => {
            if is_error {
                println!("! {}", text);
            } else {
                println!("{}", text);
            }
        }
    }
}

fn render_order(slides: &[ImageEntry]) {
    for (position, entry) in slides.iter().enumerate() {
        println!("  {}. {} {}", position + 1, entry.id, entry.name);
    }
}

fn render_catalog(entries: &[ImageEntry]) {
    if entries.is_empty() {
        println!("  (no images loaded)");
        return;
    }
    for entry in entries {
        let mark = if entry.selected { "x" } else { " " };
        println!("  {} [{}] {}", entry.id, mark, entry.name);
    }
}

fn sources_for(paths: Vec<PathBuf>) -> Vec<Box<dyn FileSource>> {
    paths
        .into_iter()
        .map(|path| Box::new(PathSource::new(path)) as Box<dyn FileSource>)
        .collect()
}

/// Run the console frontend until the user quits.
pub async fn run(options: CliOptions, mut config: DeckConfig) -> Result<()> {
    let (events, mut rx) = event_channel();
    let session = SlideshowSession::new(events);

    // Session events render as they arrive, independent of the prompt.
    tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            render_event(event);
        }
    });

    let default_interval = options
        .interval_ms
        .unwrap_or(config.slideshow.default_interval_ms);

    println!(
        "slidedeck ({} theme) - type `help` for commands",
        config.general.theme.label()
    );

    if !options.paths.is_empty() {
        // Failures are already rendered through the event channel.
        let _ = session.load_files(sources_for(options.paths)).await;
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(message) => {
                println!("! {} (try `help`)", message);
                continue;
            }
        };

        match command {
            UiCommand::List => render_catalog(&session.catalog_entries()),
            UiCommand::Toggle(id) => {
                let _ = session.toggle_selection(id);
            }
            UiCommand::Finalize => {
                let _ = session.finalize();
            }
            UiCommand::Order => render_order(&session.playlist_slides()),
            UiCommand::Move { index, direction } => {
                // Positions are shown 1-based.
                match index.checked_sub(1) {
                    Some(index) => {
                        let _ = session.move_slide(index, direction);
                    }
                    None => println!("! positions start at 1"),
                }
            }
            UiCommand::Navigate(direction) => {
                let _ = session.navigate(direction);
            }
            UiCommand::Start(delay) => {
                let _ = session.start(delay.unwrap_or(default_interval));
            }
            UiCommand::Stop => session.stop(),
            UiCommand::Theme => {
                config.general.theme = config.general.theme.toggled();
                println!("theme: {}", config.general.theme.label());
                if let Err(e) = config.save() {
                    tracing::warn!("Failed to save config: {}", e);
                }
            }
            UiCommand::Load(paths) => {
                let _ = session.load_files(sources_for(paths)).await;
            }
            UiCommand::Help => print!("{}", PROMPT_HELP),
            UiCommand::Quit => break,
        }
    }

    session.stop();
    tracing::info!("SlideDeck exiting");
    Ok(())
}
