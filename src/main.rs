// src/main.rs
use std::time::{Duration, Instant};

use iced::widget::{button, column, container, row, text, text_input, Space};
use iced::{
    executor, theme, time, window, Application, Command, Element, Length, Settings,
    Subscription, Theme,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod csv_handler;
mod data_types;
mod sheet_handler;
mod table;
mod ui;
mod url_handler;

use data_types::{LoadError, Notice, NoticeKind, SheetState, TableData};
use sheet_handler::SheetHandler;
use table::{DataTable, TableMessage};
use ui::{ButtonStyle, ContainerStyle, Styles, DARK_THEME, LIGHT_THEME};
use url_handler::SheetSource;

const VERSION: &str = "0.1.0";
const NOTICE_TIMEOUT: Duration = Duration::from_secs(5);

pub fn main() -> iced::Result {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    SheetViewer::run(Settings {
        window: window::Settings {
            size: (1024, 768),
            resizable: true,
            ..Default::default()
        },
        ..Settings::default()
    })
}

struct SheetViewer {
    is_dark_mode: bool,
    source: SheetSource,
    sheet: SheetState,
    handler: SheetHandler,
    data_table: DataTable,
    notice: Option<(Notice, Instant)>,
}

#[derive(Debug, Clone)]
enum Message {
    ToggleTheme,
    SheetUrlChanged(String),
    CsvUrlChanged(String),
    LoadData,
    DataLoaded(Result<TableData, LoadError>),
    Table(TableMessage),
    DismissNotice,
    Tick,
}

impl Application for SheetViewer {
    type Executor = executor::Default;
    type Message = Message;
    type Theme = Theme;
    type Flags = ();

    fn new(_flags: ()) -> (Self, Command<Message>) {
        (
            SheetViewer {
                is_dark_mode: true,
                source: SheetSource::new(),
                sheet: SheetState::new(),
                handler: SheetHandler::new(),
                data_table: DataTable::new(),
                notice: None,
            },
            Command::none(),
        )
    }

    fn title(&self) -> String {
        format!("Sheet Viewer v{}", VERSION)
    }

    fn theme(&self) -> Theme {
        if self.is_dark_mode {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    fn update(&mut self, message: Message) -> Command<Message> {
        match message {
            Message::ToggleTheme => {
                self.is_dark_mode = !self.is_dark_mode;
                Command::none()
            }

            Message::SheetUrlChanged(url) => {
                self.source.set_sheet_url(url);
                Command::none()
            }

            Message::CsvUrlChanged(url) => {
                self.source.set_csv_url(url);
                Command::none()
            }

            Message::LoadData => {
                // One fetch in flight per viewer; a second request is a no-op.
                if !self.sheet.begin_load() {
                    return Command::none();
                }
                let handler = self.handler.clone();
                let csv_url = self.source.csv_url.clone();
                Command::perform(
                    async move { handler.fetch_data(&csv_url).await },
                    Message::DataLoaded,
                )
            }

            Message::DataLoaded(result) => {
                let loaded = result.is_ok();
                if let Some(notice) = self.sheet.finish_load(result) {
                    if let Ok(payload) = serde_json::to_string(&notice) {
                        debug!(%payload, "notice raised");
                    }
                    self.notice = Some((notice, Instant::now()));
                }
                if loaded {
                    self.data_table.reset();
                }
                Command::none()
            }

            Message::Table(message) => {
                if let Some(data) = self.sheet.data.as_ref() {
                    self.data_table.update(message, data);
                }
                Command::none()
            }

            Message::DismissNotice => {
                self.notice = None;
                Command::none()
            }

            Message::Tick => {
                if let Some((_, shown_at)) = &self.notice {
                    if shown_at.elapsed() >= NOTICE_TIMEOUT {
                        self.notice = None;
                    }
                }
                Command::none()
            }
        }
    }

    fn subscription(&self) -> Subscription<Message> {
        // The tick only runs while a notice is waiting to expire.
        if self.notice.is_some() {
            time::every(Duration::from_secs(1)).map(|_| Message::Tick)
        } else {
            Subscription::none()
        }
    }

    fn view(&self) -> Element<Message> {
        let styles = self.styles();

        let content: Element<Message> = match self.sheet.data.as_ref() {
            Some(data) if !data.headers.is_empty() => {
                self.data_table.view(data, styles).map(Message::Table)
            }
            _ => self.guide_panel(styles),
        };

        let mut page = column![self.connect_panel(styles)].spacing(15).padding(15);
        if let Some(banner) = self.notice_banner(styles) {
            page = page.push(banner);
        }
        let page = page.push(content).height(Length::Fill);

        container(column![page, self.footer(styles)])
            .width(Length::Fill)
            .height(Length::Fill)
            .style(theme::Container::Custom(Box::new(ContainerStyle {
                bg: styles.bg,
            })))
            .into()
    }
}

impl SheetViewer {
    fn styles(&self) -> &'static Styles {
        if self.is_dark_mode {
            &DARK_THEME
        } else {
            &LIGHT_THEME
        }
    }

    fn connect_panel(&self, styles: &Styles) -> Element<'static, Message> {
        let mut panel = column![
            text("Google Sheets connection")
                .size(22)
                .style(theme::Text::Color(styles.fg)),
            text("Paste a share link; the sheet must be shared with anyone who has the link.")
                .size(14)
                .style(theme::Text::Color(styles.muted_fg)),
            text("Sheet URL")
                .size(14)
                .style(theme::Text::Color(styles.fg)),
            text_input(
                "https://docs.google.com/spreadsheets/d/...",
                &self.source.sheet_url,
            )
            .on_input(Message::SheetUrlChanged)
            .padding(10),
        ]
        .spacing(8);

        // The derived export URL appears once there is one, and stays
        // editable for manual overrides.
        if !self.source.csv_url.is_empty() {
            panel = panel
                .push(
                    text("CSV export URL")
                        .size(14)
                        .style(theme::Text::Color(styles.fg)),
                )
                .push(
                    text_input("", &self.source.csv_url)
                        .on_input(Message::CsvUrlChanged)
                        .padding(10),
                );
        }

        let loading = self.sheet.is_loading();

        let mut load = button(
            text(if loading { "Loading..." } else { "Load data" })
                .size(16)
                .style(theme::Text::Color(styles.footer_fg)),
        )
        .padding(10)
        .style(theme::Button::Custom(Box::new(ButtonStyle {
            bg: styles.footer_bg,
            fg: styles.footer_fg,
            hover_bg: styles.button_hover_bg,
        })));
        if !loading && !self.source.csv_url.is_empty() {
            load = load.on_press(Message::LoadData);
        }

        let mut controls = row![load].spacing(10);
        if self.sheet.data.is_some() {
            let mut refresh = button(
                text("Refresh")
                    .size(16)
                    .style(theme::Text::Color(styles.footer_fg)),
            )
            .padding(10)
            .style(theme::Button::Custom(Box::new(ButtonStyle {
                bg: styles.footer_bg,
                fg: styles.footer_fg,
                hover_bg: styles.button_hover_bg,
            })));
            if !loading {
                refresh = refresh.on_press(Message::LoadData);
            }
            controls = controls.push(refresh);
        }
        panel = panel.push(controls);

        if let Some(at) = self.sheet.last_updated() {
            panel = panel.push(
                text(format!("Last updated: {}", at.format("%Y-%m-%d %H:%M:%S")))
                    .size(14)
                    .style(theme::Text::Color(styles.muted_fg)),
            );
        }

        container(panel)
            .padding(15)
            .width(Length::Fill)
            .style(theme::Container::Custom(Box::new(ContainerStyle {
                bg: styles.panel_bg,
            })))
            .into()
    }

    fn notice_banner(&self, styles: &Styles) -> Option<Element<'static, Message>> {
        let (notice, _) = self.notice.as_ref()?;
        let (bg, fg) = match notice.kind {
            NoticeKind::Success => (styles.success_bg, styles.success_fg),
            NoticeKind::Error => (styles.error_bg, styles.error_fg),
        };

        let banner = row![
            text(&notice.title).size(16).style(theme::Text::Color(fg)),
            text(&notice.description)
                .size(14)
                .style(theme::Text::Color(fg)),
            Space::with_width(Length::Fill),
            button(text("✕").size(14).style(theme::Text::Color(fg)))
                .padding([2, 8])
                .on_press(Message::DismissNotice)
                .style(theme::Button::Custom(Box::new(ButtonStyle {
                    bg,
                    fg,
                    hover_bg: styles.button_hover_bg,
                }))),
        ]
        .spacing(10);

        Some(
            container(banner)
                .padding(10)
                .width(Length::Fill)
                .style(theme::Container::Custom(Box::new(ContainerStyle { bg })))
                .into(),
        )
    }

    fn guide_panel(&self, styles: &Styles) -> Element<'static, Message> {
        let steps = [
            "1. Create a sheet at sheets.google.com and put column headers in the first row.",
            "2. Share it: General access > Anyone with the link > Viewer.",
            "3. Copy the browser URL into the Sheet URL field above.",
            "4. Press Load data. The table appears here.",
        ];

        let mut guide = column![text("Connect a sheet")
            .size(20)
            .style(theme::Text::Color(styles.fg))]
        .spacing(8);
        for step in steps {
            guide = guide.push(
                text(step)
                    .size(14)
                    .style(theme::Text::Color(styles.muted_fg)),
            );
        }

        container(guide)
            .padding(15)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(theme::Container::Custom(Box::new(ContainerStyle {
                bg: styles.panel_bg,
            })))
            .into()
    }

    fn footer(&self, styles: &Styles) -> Element<'static, Message> {
        let bar = row![
            text(format!("Sheet Viewer v{}", VERSION))
                .size(14)
                .style(theme::Text::Color(styles.footer_fg)),
            Space::with_width(Length::Fill),
            button(
                text("💡")
                    .size(16)
                    .style(theme::Text::Color(styles.footer_fg))
            )
            .on_press(Message::ToggleTheme)
            .style(theme::Button::Custom(Box::new(ButtonStyle {
                bg: styles.footer_bg,
                fg: styles.footer_fg,
                hover_bg: styles.button_hover_bg,
            }))),
        ]
        .spacing(5)
        .padding(10)
        .width(Length::Fill);

        container(bar)
            .width(Length::Fill)
            .style(theme::Container::Custom(Box::new(ContainerStyle {
                bg: styles.footer_bg,
            })))
            .into()
    }
}
