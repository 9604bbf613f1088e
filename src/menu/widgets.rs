use crate::consts;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    text::{Line, Span, Text},
    widgets::Widget,
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Logo;

impl Logo {
    const SNAKE_WIDTH: u16 = 28;
    const BITE_WIDTH: u16 = 17;
    const SNAKE_BODY_CELLS: u16 = 6;
    const SNAKE_FOOD_GUTTER: u16 = 2;
    const TEXT_HEIGHT: u16 = 5;
    pub(super) const HEIGHT: u16 = Self::TEXT_HEIGHT + 2;
    pub(super) const WIDTH: u16 = Self::SNAKE_WIDTH + Self::BITE_WIDTH;

    #[rustfmt::skip]
    const SNAKE: [&'static str; Self::TEXT_HEIGHT as usize] = [
         " ____              _        ",
         "/ ___| _ __   __ _| | _____ ",
        r"\___ \| '_ \ / _` | |/ / _ \",
         " ___) | | | | (_| |   <  __/",
        r"|____/|_| |_|\__,_|_|\_\___|",
    ];

    #[rustfmt::skip]
    const BITE: [&'static str; Self::TEXT_HEIGHT as usize] = [
         " _     _ _       ",
         "| |__ (_) |_ ___ ",
        r"| '_ \| | __/ _ \",
         "| |_) | | ||  __/",
        r"|_.__/|_|\__\___|",
    ];
}

impl Widget for Logo {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [area] = Layout::horizontal([Self::WIDTH])
            .flex(Flex::Start)
            .areas(area);
        let [words_area, diagram_area] = Layout::vertical([Self::TEXT_HEIGHT, 1])
            .flex(Flex::Start)
            .spacing(1)
            .areas(area);
        let [snake_area, bite_area] = Layout::horizontal([Self::SNAKE_WIDTH, Self::BITE_WIDTH])
            .flex(Flex::Start)
            .areas(words_area);
        Text::from_iter(Self::SNAKE)
            .style(consts::SNAKE_STYLE)
            .render(snake_area, buf);
        Text::from_iter(Self::BITE)
            .style(consts::FOOD_STYLE)
            .render(bite_area, buf);
        let cell = consts::CELL_COLUMNS;
        let [body_area, head_area, _, food_area] = Layout::horizontal([
            Constraint::Length(Self::SNAKE_BODY_CELLS * cell),
            Constraint::Length(cell),
            Constraint::Length(Self::SNAKE_FOOD_GUTTER),
            Constraint::Length(cell),
        ])
        .flex(Flex::Center)
        .areas(diagram_area);
        let body = consts::SNAKE_BODY_SYMBOL.repeat(usize::from(Self::SNAKE_BODY_CELLS));
        Span::styled(body, consts::SNAKE_STYLE).render(body_area, buf);
        Span::styled(consts::SNAKE_HEAD_RIGHT_SYMBOL, consts::SNAKE_STYLE).render(head_area, buf);
        Span::styled(consts::FOOD_SYMBOL, consts::FOOD_STYLE).render(food_area, buf);
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Instructions;

impl Instructions {
    pub(super) const HEIGHT: u16 = 7;
    pub(super) const WIDTH: u16 = 20;
}

impl Widget for Instructions {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let keys = |sep: &'static str, ks: [&'static str; 4]| {
            let mut line = Line::from(sep);
            for (i, k) in ks.into_iter().enumerate() {
                if i > 0 {
                    line.push_span(" ");
                }
                line.push_span(Span::styled(k, consts::KEY_STYLE));
            }
            line
        };
        let text = Text::from_iter([
            Line::from("Move the snake with:"),
            keys("       ", ["←", "↓", "↑", "→"]),
            keys("   or: ", ["h", "j", "k", "l"]),
            keys("   or: ", ["a", "s", "w", "d"]),
            Line::from_iter([
                Span::raw("Pause: "),
                Span::styled("p", consts::KEY_STYLE),
                Span::raw(" or "),
                Span::styled("Space", consts::KEY_STYLE),
            ]),
            Line::from("Eat the food, but"),
            Line::from("don't hit anything!"),
        ]);
        text.render(area, buf);
    }
}
