use discord_markup::{MarkupOptions, MarkupRenderer, Theme};
use discord_markup_tui::{LinkDestinationStyle, PreviewOptions, preview_text};
use ratatui::text::Line;
use std::env;
use std::fs;
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = env::args().skip(1).collect::<Vec<_>>();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        print_help();
        return Ok(());
    }

    let mut theme = Theme::Dark;
    let mut options = PreviewOptions::default();
    let mut extended = false;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--theme" => {
                let v = parse_string(&args, &mut i, "--theme")?;
                theme = v
                    .parse()
                    .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
            }
            "--extended" => {
                extended = true;
                i += 1;
            }
            "--reveal-spoilers" => {
                options.reveal_spoilers = true;
                i += 1;
            }
            "--show-link-destinations" => {
                options.show_link_destinations = true;
                i += 1;
            }
            "--link-style" => {
                let v = parse_string(&args, &mut i, "--link-style")?;
                options.link_destination_style = match v.as_str() {
                    "paren" => LinkDestinationStyle::Paren,
                    "space" => LinkDestinationStyle::Space,
                    other => {
                        return Err(io::Error::new(
                            io::ErrorKind::InvalidInput,
                            format!("unknown link style: {other}"),
                        ));
                    }
                };
            }
            _ => break,
        }
    }

    let input = if i < args.len() {
        fs::read_to_string(&args[i])?
    } else {
        let mut s = String::new();
        io::stdin().read_to_string(&mut s)?;
        s
    };

    let renderer = MarkupRenderer::with_options(MarkupOptions {
        extended,
        ..MarkupOptions::default()
    });
    for line in preview_text(&renderer, &input, theme, &options).lines {
        println!("{}", line_to_plain(&line));
    }

    Ok(())
}

fn print_help() {
    eprintln!(
        "Usage: dump [options] [path]\n\
\n\
Options:\n\
  --theme <dark|light>        Palette (default: dark)\n\
  --extended                  Render mentions, custom emoji and timestamps\n\
  --reveal-spoilers           Show spoiler contents instead of masking them\n\
  --show-link-destinations    Show the url after link text\n\
  --link-style <paren|space>  How link destinations are shown (default: paren)\n\
  -h, --help                  Show this help\n\
\n\
If [path] is omitted, reads the message from stdin."
    );
}

fn parse_string(args: &[String], i: &mut usize, flag: &str) -> io::Result<String> {
    let Some(v) = args.get(*i + 1) else {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{flag} expects a value"),
        ));
    };
    *i += 2;
    Ok(v.to_string())
}

fn line_to_plain(line: &Line<'_>) -> String {
    line.spans.iter().map(|s| s.content.as_ref()).collect()
}
