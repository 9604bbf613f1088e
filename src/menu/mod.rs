mod widgets;
use self::widgets::{Instructions, Logo};
use crate::app::{Globals, Screen};
use crate::command::Command;
use crate::consts;
use crate::game::Mode;
use crate::play::PlayScreen;
use crate::util::{get_display_area, EnumExt};
use crossterm::event::{read, Event};
use ratatui::{
    buffer::Buffer,
    layout::{Flex, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Widget,
    Frame,
};

#[derive(Clone, Debug)]
pub(crate) struct MainMenu {
    selection: Selection,
    mode: Mode,
    globals: Globals,
}

impl MainMenu {
    pub(crate) fn new(globals: Globals, mode: Mode) -> Self {
        MainMenu {
            selection: Selection::default(),
            mode,
            globals,
        }
    }

    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self, frame.area());
    }

    pub(crate) fn process_input(&mut self) -> std::io::Result<Option<Screen>> {
        Ok(self.handle_event(read()?))
    }

    fn handle_event(&mut self, event: Event) -> Option<Screen> {
        match (
            self.selection,
            Command::from_key_event(event.as_key_press_event()?)?,
        ) {
            (_, Command::Quit) => return Some(Screen::Quit),
            (_, Command::Home) => self.selection = Selection::PlayButton,
            (_, Command::End) => self.selection = Selection::QuitButton,
            (Selection::PlayButton, Command::Enter) | (_, Command::P) => {
                return Some(Screen::Play(self.play()))
            }
            (_, Command::Digit(i)) => {
                if let Some(mode) = Mode::nth(i) {
                    self.mode = mode;
                }
            }
            (Selection::PlayButton, Command::Prev | Command::Up) => {
                self.selection = Selection::QuitButton;
            }
            (Selection::PlayButton, Command::Down | Command::Next) => {
                self.selection = Selection::ModeSelector;
            }
            (Selection::ModeSelector, Command::Up | Command::Prev) => {
                self.selection = Selection::PlayButton;
            }
            (Selection::ModeSelector, Command::Down | Command::Next) => {
                self.selection = Selection::QuitButton;
            }
            (Selection::ModeSelector, Command::Left) => {
                if let Some(mode) = self.mode.prev() {
                    self.mode = mode;
                }
            }
            (Selection::ModeSelector, Command::Right) => {
                if let Some(mode) = self.mode.next() {
                    self.mode = mode;
                }
            }
            (Selection::ModeSelector, Command::Enter) => {
                self.mode = self.mode.next().unwrap_or_else(Mode::min);
            }
            (Selection::QuitButton, Command::Enter) | (_, Command::Q) => {
                return Some(Screen::Quit);
            }
            (Selection::QuitButton, Command::Next | Command::Down) => {
                self.selection = Selection::PlayButton;
            }
            (Selection::QuitButton, Command::Up | Command::Prev) => {
                self.selection = Selection::ModeSelector;
            }
            _ => (),
        }
        None
    }

    fn play(&self) -> PlayScreen {
        log::info!("Starting a new game in {} mode", self.mode);
        PlayScreen::new(self.globals.clone(), self.mode)
    }
}

impl Widget for &MainMenu {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area);
        let [logo_area, instructions_area, play_area, mode_area, high_score_area, quit_area] =
            Layout::vertical([Logo::HEIGHT, Instructions::HEIGHT, 1, 1, 1, 1])
                .flex(Flex::Start)
                .spacing(1)
                .areas(display);

        let [logo_area] = Layout::horizontal([Logo::WIDTH])
            .flex(Flex::Center)
            .areas(logo_area);
        Logo.render(logo_area, buf);

        let [instructions_area] = Layout::horizontal([Instructions::WIDTH])
            .flex(Flex::Center)
            .areas(instructions_area);
        Instructions.render(instructions_area, buf);

        let play_style = self.selection.style_for(Selection::PlayButton);
        Line::from_iter([
            Span::styled("[Play (", play_style),
            Span::styled("p", consts::KEY_STYLE.patch(play_style)),
            Span::styled(")]", play_style),
        ])
        .centered()
        .render(play_area, buf);

        let mode_style = self.selection.style_for(Selection::ModeSelector);
        let left = if self.mode.prev().is_some() { '◀' } else { '◁' };
        let right = if self.mode.next().is_some() { '▶' } else { '▷' };
        let pointer = if self.selection == Selection::ModeSelector {
            "» "
        } else {
            "  "
        };
        Line::from(Span::styled(
            format!(
                "{pointer}Mode: {left} {mode:^width$} {right}",
                mode = self.mode,
                width = usize::from(Mode::DISPLAY_WIDTH)
            ),
            mode_style,
        ))
        .centered()
        .render(mode_area, buf);

        Line::from(format!("High score: {}", self.globals.high_score.get()))
            .centered()
            .render(high_score_area, buf);

        let qstyle = self.selection.style_for(Selection::QuitButton);
        Line::from_iter([
            Span::styled("[Quit (", qstyle),
            Span::styled("q", consts::KEY_STYLE.patch(qstyle)),
            Span::styled(")]", qstyle),
        ])
        .centered()
        .render(quit_area, buf);
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
enum Selection {
    #[default]
    PlayButton,
    ModeSelector,
    QuitButton,
}

impl Selection {
    fn style_for(self, item: Selection) -> Style {
        if self == item {
            consts::MENU_SELECTION_STYLE
        } else {
            Style::new()
        }
    }
}
