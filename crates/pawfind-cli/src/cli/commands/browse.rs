//! Interactive browse command.
//!
//! Reads one command per line from stdin, feeds it to the runtime as an
//! event, waits for the resulting requests to settle, and prints the view.

use std::io::Write;

use anyhow::{Context, Result};
use pawfind_core::config::Config;
use pawfind_core::{AppEvent, Route, Runtime};
use pawfind_types::SortField;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::cli::connect;
use crate::render;

const HELP: &str = "\
Commands:
  login <name> <email>   log in (the name may contain spaces)
  logout                 end the session
  breeds                 list breeds
  breed [name]           filter by breed, or clear the filter
  page <n>               jump to page n
  next | prev            move one page
  size <n>               results per page (10, 25, 50, 100)
  sort [field]           toggle direction, or sort by name, breed, zip_code, age
  show                   print the current page
  photo <n>              show the photo of the n-th dog on the page
  close                  close the photo
  help                   show this help
  :q | quit              exit";

#[derive(Debug)]
enum Command {
    Empty,
    Help,
    Quit,
    Show,
    Breeds,
    Event(AppEvent),
}

pub async fn run(config: &Config) -> Result<()> {
    let mut runtime = connect::runtime(config)?;

    println!("pawfind: find a dog to adopt. Type `help` for commands.");
    runtime.dispatch(AppEvent::Init);
    runtime.settle().await;
    print_view(&mut runtime);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("pawfind> ");
        std::io::stdout().flush().context("flush stdout")?;

        let Some(line) = lines.next_line().await.context("read stdin")? else {
            break;
        };
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(message) => {
                eprintln!("error: {message}");
                continue;
            }
        };

        match command {
            Command::Empty => {}
            Command::Help => println!("{HELP}"),
            Command::Quit => break,
            Command::Show => print_view(&mut runtime),
            Command::Breeds => {
                if runtime.state.search.breeds.is_empty() {
                    runtime.dispatch(AppEvent::RefreshBreeds);
                    runtime.settle().await;
                }
                render::print_notices(&mut runtime.state.notices);
                println!("{}", render::breeds(&runtime.state.search.breeds));
            }
            Command::Event(event) => {
                let photo = matches!(event, AppEvent::ShowPhoto(_));
                runtime.dispatch(event);
                runtime.settle().await;
                if photo {
                    render::print_notices(&mut runtime.state.notices);
                    if let Some(view) = &runtime.state.search.photo {
                        println!("{}", render::photo(view));
                    }
                } else {
                    print_view(&mut runtime);
                }
            }
        }
    }

    println!("Goodbye!");
    Ok(())
}

fn print_view(runtime: &mut Runtime) {
    render::print_notices(&mut runtime.state.notices);
    match runtime.state.view() {
        Route::Login => {
            if let Some(error) = &runtime.state.login.error {
                eprintln!("error: {error}");
            }
            println!("Log in with: login <name> <email>");
        }
        Route::Search => println!("{}", render::results(&runtime.state.search)),
    }
}

fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "" => Command::Empty,
        "help" | "?" => Command::Help,
        ":q" | "quit" | "exit" => Command::Quit,
        "show" => Command::Show,
        "breeds" => Command::Breeds,
        "login" => {
            let Some((name, email)) = rest.rsplit_once(char::is_whitespace) else {
                return Err("usage: login <name> <email>".to_string());
            };
            Command::Event(AppEvent::SubmitLogin {
                name: name.trim().to_string(),
                email: email.to_string(),
            })
        }
        "logout" => Command::Event(AppEvent::Logout),
        "breed" => {
            let breed = (!rest.is_empty()).then(|| rest.to_string());
            Command::Event(AppEvent::SelectBreed(breed))
        }
        "page" => Command::Event(AppEvent::SetPage(parse_number(rest, "page <n>")?)),
        "next" => Command::Event(AppEvent::NextPage),
        "prev" => Command::Event(AppEvent::PrevPage),
        "size" => Command::Event(AppEvent::SetPageSize(parse_number(rest, "size <n>")?)),
        "sort" if rest.is_empty() => Command::Event(AppEvent::ToggleSort),
        "sort" => Command::Event(AppEvent::SetSortField(rest.parse::<SortField>()?)),
        "photo" => Command::Event(AppEvent::ShowPhoto(parse_number(rest, "photo <n>")?)),
        "close" => Command::Event(AppEvent::ClosePhoto),
        other => return Err(format!("unknown command '{other}' (try `help`)")),
    };
    Ok(command)
}

fn parse_number<T: std::str::FromStr>(raw: &str, usage: &str) -> Result<T, String> {
    raw.parse().ok().ok_or_else(|| format!("usage: {usage}"))
}
