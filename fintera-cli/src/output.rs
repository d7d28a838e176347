//! Plain-text rendering of list views.

use fintera_lib::i18n::Translator;
use fintera_lib::pagination::PageLink;
use fintera_lib::pagination::PaginationView;
use fintera_lib::render::Column;
use fintera_lib::render::DisplayMode;
use fintera_lib::render::HeaderCell;
use fintera_lib::render::ItemRenderer;
use fintera_lib::render::ListView;
use fintera_lib::query::Direction;
use serde_json::Value;

const MIN_CELL: usize = 6;

/// Renders JSON items as text: a `label: value` block per card, or a line of
/// fixed-width cells per row.
pub struct TextRenderer {
    columns: Vec<Column>,
    cell_width: usize,
}

impl TextRenderer {
    pub fn new(columns: Vec<Column>, width: u16) -> Self {
        let cell_width = (width as usize / columns.len().max(1)).max(MIN_CELL);
        Self { columns, cell_width }
    }

    fn cell(&self, text: &str) -> String {
        let limit = self.cell_width - 1;
        let mut cell: String = if text.chars().count() > limit {
            let mut cut: String = text.chars().take(limit - 1).collect();
            cut.push('…');
            cut
        } else {
            text.to_string()
        };
        let pad = self.cell_width - cell.chars().count();
        cell.extend(std::iter::repeat_n(' ', pad));
        cell
    }

    /// Renders the table header of row mode.
    pub fn header(&self, cells: &[HeaderCell]) -> String {
        let line: String = cells
            .iter()
            .map(|cell| {
                let marker = match cell.active {
                    Some(Direction::Asc) => " ▲",
                    Some(Direction::Desc) => " ▼",
                    None if cell.sortable => " ·",
                    None => "",
                };
                self.cell(&format!("{}{}", cell.label, marker))
            })
            .collect();
        line.trim_end().to_string()
    }
}

impl ItemRenderer<Value> for TextRenderer {
    type Output = String;

    fn render(&self, item: &Value, index: usize, mode: DisplayMode) -> String {
        match mode {
            DisplayMode::Card => {
                let mut lines = vec![format!("#{}", index + 1)];
                lines.extend(
                    self.columns
                        .iter()
                        .map(|c| format!("  {}: {}", c.label, field_text(item, &c.field))),
                );
                lines.join("\n")
            }
            DisplayMode::Row => {
                let line: String = self
                    .columns
                    .iter()
                    .map(|c| self.cell(&field_text(item, &c.field)))
                    .collect();
                line.trim_end().to_string()
            }
        }
    }
}

fn field_text(item: &Value, field: &str) -> String {
    match item.get(field) {
        None | Some(Value::Null) => "-".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Returns the body lines for `view`.
pub fn view_lines(view: &ListView<String>, header: &str, translator: &dyn Translator) -> Vec<String> {
    match view {
        ListView::Loading => vec![translator.t("list.loading", &[])],
        ListView::Failed { message } => vec![
            translator.t("list.error", &[("message", message.as_str())]),
            translator.t("list.retry", &[]),
        ],
        ListView::Empty => vec![translator.t("list.empty", &[])],
        ListView::Populated { visible, .. } => {
            let mut lines = Vec::new();
            if *visible == DisplayMode::Row {
                lines.push(header.to_string());
                lines.push("-".repeat(header.chars().count()));
            }
            lines.extend(view.visible_items().iter().cloned());
            lines
        }
    }
}

/// Returns the pagination footer: the page links, then the summary line.
pub fn footer_lines(view: &PaginationView, window: u32, translator: &dyn Translator) -> Vec<String> {
    let links: Vec<String> = view
        .page_links(window)
        .into_iter()
        .filter_map(|link| match link {
            PageLink::Prev { enabled } => {
                enabled.then(|| format!("« {}", translator.t("pagination.prev", &[])))
            }
            PageLink::Next { enabled } => {
                enabled.then(|| format!("{} »", translator.t("pagination.next", &[])))
            }
            PageLink::Page { number, current: true } => Some(format!("[{}]", number)),
            PageLink::Page { number, .. } => Some(number.to_string()),
            PageLink::Gap => Some("…".to_string()),
        })
        .collect();

    let size = view.page_size().to_string();
    let mut summary = format!(
        "{} · {}",
        view.summary(translator),
        translator.t("pagination.per_page", &[("size", size.as_str())])
    );
    if !view.page_size_options().is_empty() {
        let options: Vec<String> = view.page_size_options().iter().map(u32::to_string).collect();
        summary.push_str(&format!(" ({})", options.join("/")));
    }

    vec![links.join(" "), summary]
}

#[cfg(test)]
mod tests {
    use fintera_lib::i18n::Catalog;
    use serde_json::json;

    use super::*;

    fn renderer() -> TextRenderer {
        TextRenderer::new(
            vec![
                Column::new("ID", "id"),
                Column::new("Customer", "customer_name").sortable("customer_name"),
                Column::new("Amount", "amount").sortable("amount"),
            ],
            30,
        )
    }

    #[test]
    fn test_row_cells() {
        let item = json!({ "id": 7, "customer_name": "Ana María Fernández", "amount": null });
        assert_eq!(
            renderer().render(&item, 0, DisplayMode::Row),
            "7         Ana Marí… -"
        );
    }

    #[test]
    fn test_card_block() {
        let item = json!({ "id": 7, "customer_name": "Ana", "amount": 1250.5 });
        assert_eq!(
            renderer().render(&item, 1, DisplayMode::Card),
            "#2\n  ID: 7\n  Customer: Ana\n  Amount: 1250.5"
        );
    }

    #[test]
    fn test_header_markers() {
        let cells = vec![
            HeaderCell {
                label: "ID".to_string(),
                sortable: false,
                active: None,
            },
            HeaderCell {
                label: "Amount".to_string(),
                sortable: true,
                active: Some(Direction::Desc),
            },
        ];
        assert_eq!(renderer().header(&cells), "ID        Amount ▼");
    }

    #[test]
    fn test_failed_view() {
        let view = ListView::Failed {
            message: "HTTP 500: boom".to_string(),
        };
        assert_eq!(
            view_lines(&view, "", &Catalog::english()),
            vec!["Could not load the list: HTTP 500: boom", "Press r to retry."]
        );
    }

    #[test]
    fn test_footer() {
        let view = PaginationView::new(1, 3, 20).with_page_size_options(vec![10, 20, 50]);
        assert_eq!(
            footer_lines(&view, 2, &Catalog::english()),
            vec!["[1] 2 3 Next »", "Page 1 of 3 · 20 per page (10/20/50)"]
        );
    }
}
