//! Interactive browsing, one command per input line.
//!
//! Fetches run on spawned tasks and report back over a channel, so typing
//! never waits on the network; a fetch superseded by a later command is
//! cancelled and its outcome ignored.

use std::io;
use std::io::Write;

use fintera_lib::controller::FetchOutcome;
use fintera_lib::controller::PendingFetch;
use fintera_lib::debounce::FilterDebouncer;
use tokio::io::AsyncBufRead;
use tokio::io::AsyncBufReadExt;
use tokio::sync::mpsc;

use crate::error::CliError;
use crate::session::Session;
use crate::session::parse_filter;

const HELP: &str = "\
commands:
  n            next page
  p            previous page
  g N          go to page N
  s FIELD      sort by column (again to flip)
  z N          page size
  /TEXT        search (empty to clear)
  f KEY=VALUE  filter (empty value to remove)
  r            reload
  h            help
  q            quit";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Next,
    Prev,
    Go(u32),
    Sort(String),
    PageSize(u32),
    Search(String),
    Filter(String, String),
    Reload,
    Help,
    Quit,
}

impl Command {
    fn parse(line: &str) -> Result<Self, String> {
        if let Some(text) = line.strip_prefix('/') {
            return Ok(Self::Search(text.to_string()));
        }
        let line = line.trim();
        let (verb, arg) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(verb, arg)| (verb, arg.trim()));

        let number = |what: &str| {
            arg.parse::<u32>()
                .map_err(|_| format!("{} expects a number, got `{}`", what, arg))
        };

        match verb {
            "n" => Ok(Self::Next),
            "p" => Ok(Self::Prev),
            "g" => number("g").map(Self::Go),
            "z" => number("z").map(Self::PageSize),
            "s" if !arg.is_empty() => Ok(Self::Sort(arg.to_string())),
            "f" => parse_filter(arg)
                .map(|(key, value)| Self::Filter(key, value))
                .map_err(|e| e.to_string()),
            "r" => Ok(Self::Reload),
            "h" | "?" => Ok(Self::Help),
            "q" => Ok(Self::Quit),
            _ => Err(format!("unknown command `{}`, h for help", line)),
        }
    }
}

/// Runs the browse loop over `input` until `q` or end of input, drawing to
/// `out` after every applied fetch.
pub async fn run<R, W>(mut session: Session, input: R, out: &mut W) -> Result<(), CliError>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let (tx, mut outcomes) = mpsc::unbounded_channel::<FetchOutcome>();
    let (mut debouncer, mut terms) = FilterDebouncer::from_config(&session.config);
    let mut lines = input.lines();

    writeln!(out, "{}", HELP)?;
    spawn_fetch(&tx, session.list.load());

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let command = match Command::parse(&line) {
                    Ok(command) => command,
                    Err(message) => {
                        writeln!(out, "{}", message)?;
                        continue;
                    }
                };
                log::debug!("browse command: {:?}", command);

                let pending = match command {
                    Command::Quit => break,
                    Command::Help => {
                        writeln!(out, "{}", HELP)?;
                        None
                    }
                    Command::Search(text) => {
                        debouncer.input(&text);
                        None
                    }
                    Command::Next => session.list.go_to_next(),
                    Command::Prev => session.list.go_to_prev(),
                    Command::Go(page) => session.list.go_to_page(page),
                    Command::PageSize(size) => session.list.set_page_size(size),
                    Command::Filter(key, value) => session.list.set_filter(key, value),
                    Command::Reload => Some(session.list.reload()),
                    Command::Sort(name) => match session.sort_request(&name) {
                        Some((key, direction)) => Some(session.list.sort_by(&key, direction)),
                        None => {
                            writeln!(out, "`{}` is not a sortable column", name)?;
                            None
                        }
                    },
                };
                if let Some(pending) = pending {
                    spawn_fetch(&tx, pending);
                }
            }
            Some(term) = terms.recv() => {
                if let Some(pending) = session.list.apply_search(&term) {
                    spawn_fetch(&tx, pending);
                }
            }
            Some(outcome) = outcomes.recv() => {
                if session.list.apply(outcome) {
                    draw(out, &session)?;
                }
            }
        }
    }

    debouncer.cancel();
    Ok(())
}

fn spawn_fetch(tx: &mpsc::UnboundedSender<FetchOutcome>, pending: PendingFetch) {
    let tx = tx.clone();
    tokio::spawn(async move {
        let _ = tx.send(pending.run().await);
    });
}

fn draw<W: Write>(out: &mut W, session: &Session) -> io::Result<()> {
    writeln!(out)?;
    for line in session.draw() {
        writeln!(out, "{}", line)?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use fintera_lib::collection::Collection;
    use fintera_lib::config::ListConfig;
    use tokio::io::AsyncWriteExt;
    use tokio::io::BufReader;

    use super::*;
    use crate::session::ListArgs;
    use crate::settings::Settings;
    use crate::stub::StubServer;

    #[test]
    fn test_parse_navigation() {
        assert_eq!(Command::parse("n"), Ok(Command::Next));
        assert_eq!(Command::parse(" p "), Ok(Command::Prev));
        assert_eq!(Command::parse("g 4"), Ok(Command::Go(4)));
        assert_eq!(Command::parse("z  50"), Ok(Command::PageSize(50)));
        assert!(Command::parse("g four").is_err());
        assert!(Command::parse("x").is_err());
    }

    #[test]
    fn test_parse_search_keeps_raw_text() {
        assert_eq!(Command::parse("/ lot "), Ok(Command::Search(" lot ".to_string())));
        assert_eq!(Command::parse("/"), Ok(Command::Search(String::new())));
    }

    #[test]
    fn test_parse_sort_and_filter() {
        assert_eq!(Command::parse("s due_date"), Ok(Command::Sort("due_date".to_string())));
        assert!(Command::parse("s").is_err());
        assert_eq!(
            Command::parse("f status=paid"),
            Ok(Command::Filter("status".to_string(), "paid".to_string()))
        );
        assert!(Command::parse("f status").is_err());
        assert!(Command::parse("f page=2").is_err());
    }

    /// Runs the browse loop against `server`, typing one line per step. After
    /// each line it waits until the server has seen the step's request count.
    async fn browse(server: &StubServer, session: Session, steps: &[(&str, usize)]) -> String {
        let (mut keys, input) = tokio::io::duplex(256);
        let mut out = Vec::new();

        let typing = async {
            server.wait_for(1).await;
            for (line, expected) in steps {
                keys.write_all(format!("{}\n", line).as_bytes()).await.unwrap();
                server.wait_for(*expected).await;
            }
            keys.write_all(b"q\n").await.unwrap();
        };
        let (result, ()) = tokio::join!(run(session, BufReader::new(input), &mut out), typing);
        result.unwrap();
        String::from_utf8(out).unwrap()
    }

    fn session(server: &StubServer, config: ListConfig, search: Option<&str>) -> Session {
        let args = ListArgs {
            collection: Collection::Contracts,
            filters: Vec::new(),
            sort: None,
            page: None,
            per_page: None,
            search: search.map(str::to_string),
            width: Some(120),
            url: Some(server.base_url()),
            token: Some("stub-token".to_string()),
        };
        let settings = Settings {
            list: config,
            ..Settings::default()
        };
        Session::open(&args, &settings).unwrap()
    }

    #[tokio::test]
    async fn test_each_navigation_fetches_once() {
        let server = StubServer::start().await;
        let session = session(&server, ListConfig::default(), None);

        // `p` on the first page and `n` on the last change nothing.
        let output = browse(&server, session, &[("p", 1), ("n", 2), ("n", 3), ("n", 3)]).await;

        assert_eq!(server.pages(), vec![1, 2, 3]);
        assert!(output.starts_with("commands:"));
    }

    #[tokio::test]
    async fn test_short_search_clears_term() {
        let server = StubServer::start().await;
        let config = ListConfig::default()
            .with_debounce(Duration::from_millis(20))
            .with_min_search_len(3);
        let session = session(&server, config, Some("lote"));

        browse(&server, session, &[("/ab", 2)]).await;

        let queries = server.queries();
        assert_eq!(queries.len(), 2);
        assert!(queries[0].contains("search=lote"), "{}", queries[0]);
        assert!(!queries[1].contains("search="), "{}", queries[1]);
    }
}
