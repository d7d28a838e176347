//! One list opened against the backend, plus what it takes to draw it.

use clap::Args;
use fintera_lib::FinteraClient;
use fintera_lib::auth::StaticTokenProvider;
use fintera_lib::collection::Collection;
use fintera_lib::config::ListConfig;
use fintera_lib::controller::ListController;
use fintera_lib::debounce::FilterDebouncer;
use fintera_lib::i18n::Catalog;
use fintera_lib::query::Direction;
use fintera_lib::query::QueryState;
use fintera_lib::render::ListRenderer;
use fintera_lib::source::ListDataSource;

use crate::error::CliError;
use crate::output;
use crate::output::TextRenderer;
use crate::settings::Settings;

/// Fallback width when the terminal size is unknown.
const DEFAULT_WIDTH: u16 = 120;

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Collection to list (see `fintera collections`)
    pub collection: Collection,

    /// Filter as KEY=VALUE; repeatable
    #[arg(long = "filter", short = 'f', value_name = "KEY=VALUE")]
    pub filters: Vec<String>,

    /// Sort as FIELD-DIRECTION, e.g. due_date-desc
    #[arg(long, short = 's')]
    pub sort: Option<String>,

    /// Page to fetch
    #[arg(long, short = 'p')]
    pub page: Option<u32>,

    /// Items per page
    #[arg(long)]
    pub per_page: Option<u32>,

    /// Free-text search
    #[arg(long)]
    pub search: Option<String>,

    /// Viewport width in columns; defaults to the terminal width
    #[arg(long)]
    pub width: Option<u16>,

    /// Backend base URL
    #[arg(long, env = "FINTERA_URL")]
    pub url: Option<String>,

    /// Bearer token
    #[arg(long, env = "FINTERA_TOKEN", hide_env_values = true)]
    pub token: Option<String>,
}

pub struct Session {
    pub list: ListController,
    pub renderer: ListRenderer<TextRenderer>,
    pub catalog: Catalog,
    pub config: ListConfig,
    pub width: u16,
}

impl Session {
    /// Builds the client, data source and controller for `args`.
    ///
    /// Nothing is fetched yet.
    pub fn open(args: &ListArgs, settings: &Settings) -> Result<Self, CliError> {
        let client = FinteraClient::builder()
            .url(settings.base_url(args.url.clone())?)
            .token_provider(StaticTokenProvider::new(settings.token(args.token.clone())?))
            .build()?;

        let mut config = settings.list.clone();
        if let Some(per_page) = args.per_page {
            config = config.with_page_size(per_page);
        }

        let collection = args.collection;
        let source = ListDataSource::for_collection(client, collection)?;
        let sort = args.sort.as_deref().unwrap_or(collection.default_sort());
        let mut list = ListController::new(source, config.clone(), sort);

        for raw in &args.filters {
            let (key, value) = parse_filter(raw)?;
            list = list.with_filter(key, value);
        }
        if let Some(search) = &args.search {
            let term = FilterDebouncer::effective_term(search, config.min_search_len);
            if term.is_empty() {
                log::info!(
                    "ignoring search `{}`: shorter than {} characters",
                    search,
                    config.min_search_len
                );
            } else {
                list = list.with_filter(config.search_param.clone(), term);
            }
        }
        if let Some(page) = args.page {
            list = list.with_page(page);
        }

        let width = args.width.unwrap_or_else(terminal_width);
        let renderer = ListRenderer::new(TextRenderer::new(collection.columns(), width), collection.columns())
            .with_card_breakpoint(config.card_breakpoint);

        Ok(Self {
            list,
            renderer,
            catalog: settings.catalog(),
            config,
            width,
        })
    }

    /// Renders the list as it stands.
    pub fn draw(&self) -> Vec<String> {
        let view = self.renderer.render(&self.list.state(), self.width);
        let header = self
            .renderer
            .renderer()
            .header(&self.renderer.header(self.list.sort()));

        let mut lines = output::view_lines(&view, &header, &self.catalog);
        if self.list.page().is_some() {
            lines.push(String::new());
            lines.extend(output::footer_lines(
                &self.list.pagination(),
                self.config.page_window,
                &self.catalog,
            ));
        }
        lines
    }

    /// Finds the sort request for a column given by sort key or label.
    pub fn sort_request(&self, name: &str) -> Option<(String, Option<Direction>)> {
        let index = self.renderer.columns().iter().position(|c| {
            c.sort_key.as_deref() == Some(name) || c.label.eq_ignore_ascii_case(name)
        })?;
        self.renderer
            .sort_request(index)
            .map(|(key, direction)| (key.to_string(), direction))
    }
}

/// Splits a `KEY=VALUE` filter argument.
///
/// The key may not be one of the parameters the query sets itself.
pub fn parse_filter(raw: &str) -> Result<(String, String), CliError> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() && !QueryState::is_reserved(key.trim()) => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(CliError::InvalidFilter(raw.to_string())),
    }
}

fn terminal_width() -> u16 {
    crossterm::terminal::size()
        .map(|(columns, _)| columns)
        .unwrap_or(DEFAULT_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_filter() {
        assert_eq!(
            parse_filter("status=paid").unwrap(),
            ("status".to_string(), "paid".to_string())
        );
        assert_eq!(
            parse_filter("note=a=b").unwrap(),
            ("note".to_string(), "a=b".to_string())
        );
        assert_eq!(
            parse_filter("status=").unwrap(),
            ("status".to_string(), String::new())
        );
        assert!(matches!(parse_filter("=paid"), Err(CliError::InvalidFilter(_))));
        assert!(matches!(parse_filter("status"), Err(CliError::InvalidFilter(_))));
        for raw in ["page=3", " sort =x", "per_page=100"] {
            assert!(matches!(parse_filter(raw), Err(CliError::InvalidFilter(_))), "{}", raw);
        }
    }
}
