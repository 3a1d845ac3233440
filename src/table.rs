// src/table.rs
use iced::alignment::Horizontal;
use iced::widget::{button, column, container, row, scrollable, text, text_input, tooltip, Row, Space};
use iced::{theme, Element, Length};

use crate::data_types::{RowRecord, TableData};
use crate::ui::{ButtonStyle, ContainerStyle, Styles};

pub const PAGE_SIZE: usize = 10;
const CELL_WIDTH: f32 = 150.0;
const CELL_TEXT_LIMIT: usize = 24;

#[derive(Debug, Clone)]
pub enum TableMessage {
    SearchChanged(String),
    NextPage,
    PrevPage,
}

/// Generic table widget over whatever schema the last load produced.
///
/// The widget only reads the data it is handed; its own state is the search
/// text and the page index.
#[derive(Debug, Clone, Default)]
pub struct DataTable {
    search: String,
    page: usize,
}

impl DataTable {
    pub fn new() -> Self {
        DataTable::default()
    }

    /// Back to the first page, e.g. after a reload replaced the data.
    pub fn reset(&mut self) {
        self.page = 0;
    }

    pub fn update(&mut self, message: TableMessage, data: &TableData) {
        match message {
            TableMessage::SearchChanged(search) => {
                self.search = search;
                self.page = 0;
            }
            TableMessage::NextPage => {
                let pages = Self::page_count(self.filtered(data).len());
                if self.page + 1 < pages {
                    self.page += 1;
                }
            }
            TableMessage::PrevPage => {
                self.page = self.page.saturating_sub(1);
            }
        }
    }

    /// Case-insensitive substring match across every column.
    fn filtered<'a>(&self, data: &'a TableData) -> Vec<&'a RowRecord> {
        let needle = self.search.trim().to_lowercase();
        if needle.is_empty() {
            return data.rows.iter().collect();
        }
        data.rows
            .iter()
            .filter(|record| {
                data.headers
                    .iter()
                    .any(|header| record.get(header).to_lowercase().contains(&needle))
            })
            .collect()
    }

    fn page_count(filtered_len: usize) -> usize {
        ((filtered_len + PAGE_SIZE - 1) / PAGE_SIZE).max(1)
    }

    pub fn view(&self, data: &TableData, styles: &Styles) -> Element<'static, TableMessage> {
        let filtered = self.filtered(data);
        let pages = Self::page_count(filtered.len());
        // Clamp so a shrinking filter result never strands the view.
        let page = self.page.min(pages - 1);
        let start = page * PAGE_SIZE;
        let end = (start + PAGE_SIZE).min(filtered.len());

        let search = text_input("Search rows...", &self.search)
            .on_input(TableMessage::SearchChanged)
            .padding(8)
            .width(Length::Fixed(300.0));

        let header_row = Row::with_children(
            data.headers
                .iter()
                .map(|header| {
                    container(
                        text(header)
                            .size(16)
                            .style(theme::Text::Color(styles.header_fg)),
                    )
                    .width(Length::Fixed(CELL_WIDTH))
                    .padding(5)
                    .style(theme::Container::Custom(Box::new(ContainerStyle {
                        bg: styles.header_bg,
                    })))
                    .into()
                })
                .collect(),
        )
        .spacing(1);

        let body: Element<'static, TableMessage> = if filtered.is_empty() {
            text("No matching rows.")
                .size(16)
                .style(theme::Text::Color(styles.muted_fg))
                .into()
        } else {
            let rows = filtered[start..end].iter().map(|record| {
                Row::with_children(
                    data.headers
                        .iter()
                        .map(|header| self.cell(record.get(header), styles))
                        .collect(),
                )
                .spacing(1)
                .into()
            });
            scrollable(
                iced::widget::Column::with_children(rows.collect()).spacing(1),
            )
            .height(Length::Fill)
            .into()
        };

        let pager = row![
            text(format!("{} rows", filtered.len()))
                .size(14)
                .style(theme::Text::Color(styles.muted_fg)),
            Space::with_width(Length::Fill),
            self.pager_button("< Prev", (page > 0).then_some(TableMessage::PrevPage), styles),
            text(format!("Page {} of {}", page + 1, pages))
                .size(14)
                .style(theme::Text::Color(styles.fg)),
            self.pager_button(
                "Next >",
                (page + 1 < pages).then_some(TableMessage::NextPage),
                styles,
            ),
        ]
        .spacing(10)
        .width(Length::Fill);

        column![search, header_row, body, pager]
            .spacing(10)
            .height(Length::Fill)
            .into()
    }

    fn cell(&self, value: &str, styles: &Styles) -> Element<'static, TableMessage> {
        let shown = truncate(value, CELL_TEXT_LIMIT);
        let cell_text = text(&shown).size(16).style(theme::Text::Color(styles.fg));

        // Clipped cells expose the full value on hover.
        let content: Element<'static, TableMessage> = if shown == value {
            cell_text.into()
        } else {
            tooltip(cell_text, value.to_string(), tooltip::Position::FollowCursor)
                .gap(5)
                .style(theme::Container::Box)
                .into()
        };

        container(content)
            .width(Length::Fixed(CELL_WIDTH))
            .padding(5)
            .into()
    }

    fn pager_button(
        &self,
        label: &str,
        on_press: Option<TableMessage>,
        styles: &Styles,
    ) -> Element<'static, TableMessage> {
        let mut control = button(
            text(label)
                .size(14)
                .horizontal_alignment(Horizontal::Center)
                .style(theme::Text::Color(styles.footer_fg)),
        )
        .padding([4, 10])
        .style(theme::Button::Custom(Box::new(ButtonStyle {
            bg: styles.footer_bg,
            fg: styles.footer_fg,
            hover_bg: styles.button_hover_bg,
        })));
        if let Some(message) = on_press {
            control = control.on_press(message);
        }
        control.into()
    }
}

fn truncate(value: &str, limit: usize) -> String {
    if value.chars().count() <= limit {
        value.to_string()
    } else {
        let clipped: String = value.chars().take(limit).collect();
        format!("{}…", clipped)
    }
}
