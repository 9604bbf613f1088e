use crate::config::Config;
use crate::highscore::HighScore;
use crate::menu::MainMenu;
use crate::play::PlayScreen;
use ratatui::{backend::Backend, Terminal};
use std::io;

/// State that lives for the whole session and is handed from screen to
/// screen
#[derive(Clone, Debug)]
pub(crate) struct Globals {
    pub(crate) config: Config,
    pub(crate) high_score: HighScore,
}

#[derive(Debug)]
pub(crate) struct App {
    screen: Screen,
}

impl App {
    pub(crate) fn new(globals: Globals) -> App {
        let mode = globals.config.mode;
        App {
            screen: Screen::Main(MainMenu::new(globals, mode)),
        }
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()> {
        while !self.quitting() {
            self.draw(&mut terminal)?;
            self.process_input()?;
        }
        Ok(())
    }

    fn draw<B: Backend>(&self, terminal: &mut Terminal<B>) -> io::Result<()> {
        match self.screen {
            Screen::Main(ref menu) => {
                terminal.draw(|frame| menu.draw(frame))?;
            }
            Screen::Play(ref play) => {
                terminal.draw(|frame| play.draw(frame))?;
            }
            Screen::Quit => (),
        }
        Ok(())
    }

    fn process_input(&mut self) -> io::Result<()> {
        let next = match self.screen {
            Screen::Main(ref mut menu) => menu.process_input()?,
            Screen::Play(ref mut play) => play.process_input()?,
            Screen::Quit => None,
        };
        if let Some(screen) = next {
            self.screen = screen;
        }
        Ok(())
    }

    fn quitting(&self) -> bool {
        matches!(self.screen, Screen::Quit)
    }
}

#[derive(Debug)]
pub(crate) enum Screen {
    Main(MainMenu),
    Play(PlayScreen),
    Quit,
}
