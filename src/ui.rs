use crate::controller::Controller;
use crate::events::{dispatch, UiEvent};
use crate::filter::TransactionFilter;
use crate::view::{TableRow, ViewState};
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame, Terminal,
};
use std::collections::BTreeSet;
use std::io;

/// Background for rows matched by the active filter
const HIGHLIGHT: Color = Color::Rgb(173, 255, 168);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    AddAmount,
    AddCategory,
    AmountFilter,
    CategoryFilter,
}

impl InputMode {
    pub fn prompt(&self) -> &str {
        match self {
            InputMode::Normal => "",
            InputMode::AddAmount | InputMode::AddCategory => "Add transaction",
            InputMode::AmountFilter => "Filter by amount",
            InputMode::CategoryFilter => "Filter by category",
        }
    }
}

pub struct App {
    pub controller: Controller<ViewState>,
    pub state: TableState,
    pub selected: BTreeSet<usize>,
    pub input_mode: InputMode,
    pub amount_input: String,
    pub category_input: String,
    pub filter_input: String,
    pub message: Option<String>,
}

impl App {
    pub fn new(mut controller: Controller<ViewState>) -> Self {
        controller.refresh();
        controller.refresh_undo_btn();

        Self {
            controller,
            state: TableState::default(),
            selected: BTreeSet::new(),
            input_mode: InputMode::Normal,
            amount_input: String::new(),
            category_input: String::new(),
            filter_input: String::new(),
            message: None,
        }
    }

    /// Number of transaction rows the cursor can visit (the total row is excluded)
    fn entry_count(&self) -> usize {
        self.controller.model().len()
    }

    fn send(&mut self, event: UiEvent) {
        dispatch(&mut self.controller, event);
        if let Some(last) = self.controller.view_mut().take_notifications().pop() {
            self.message = Some(last);
        }
    }

    /// Handle one key press. Returns true when the user asked to quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match self.input_mode {
            InputMode::Normal => return self.handle_normal_key(key),
            _ => self.handle_input_key(key),
        }
        false
    }

    fn handle_normal_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Down | KeyCode::Char('j') => self.next(),
            KeyCode::Up | KeyCode::Char('k') => self.previous(),
            KeyCode::PageDown => self.page_down(),
            KeyCode::PageUp => self.page_up(),
            KeyCode::Char(' ') => self.toggle_selection(),
            KeyCode::Char('a') => {
                self.amount_input.clear();
                self.category_input.clear();
                self.input_mode = InputMode::AddAmount;
            }
            KeyCode::Char('f') => {
                self.filter_input.clear();
                self.input_mode = InputMode::AmountFilter;
            }
            KeyCode::Char('g') => {
                self.filter_input.clear();
                self.input_mode = InputMode::CategoryFilter;
            }
            KeyCode::Char('u') => self.undo(),
            _ => {}
        }
        false
    }

    fn handle_input_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.input_mode = InputMode::Normal,
            KeyCode::Tab => {
                self.input_mode = match self.input_mode {
                    InputMode::AddAmount => InputMode::AddCategory,
                    InputMode::AddCategory => InputMode::AddAmount,
                    other => other,
                };
            }
            KeyCode::Enter => self.submit(),
            KeyCode::Backspace => {
                self.active_input().pop();
            }
            KeyCode::Char(c) => self.active_input().push(c),
            _ => {}
        }
    }

    fn active_input(&mut self) -> &mut String {
        match self.input_mode {
            InputMode::AddAmount => &mut self.amount_input,
            InputMode::AddCategory => &mut self.category_input,
            _ => &mut self.filter_input,
        }
    }

    fn submit(&mut self) {
        let event = match self.input_mode {
            InputMode::Normal => return,
            InputMode::AddAmount | InputMode::AddCategory => UiEvent::AddTransaction {
                amount: self.amount_input.clone(),
                category: self.category_input.clone(),
            },
            InputMode::AmountFilter => UiEvent::ApplyAmountFilter(self.filter_input.clone()),
            InputMode::CategoryFilter => UiEvent::ApplyCategoryFilter(self.filter_input.clone()),
        };
        self.input_mode = InputMode::Normal;
        self.message = None;
        self.send(event);
    }

    pub fn toggle_selection(&mut self) {
        let Some(row) = self.state.selected() else {
            return;
        };
        if !self.selected.remove(&row) {
            self.selected.insert(row);
        }
        let rows = self.selected.iter().copied().collect();
        self.send(UiEvent::SelectRows(rows));
    }

    pub fn undo(&mut self) {
        self.message = None;
        self.send(UiEvent::Undo);
        // Row numbers shift after removal, so the old selection means nothing
        self.selected.clear();

        let len = self.entry_count();
        match self.state.selected() {
            Some(_) if len == 0 => self.state.select(None),
            Some(i) if i >= len => self.state.select(Some(len - 1)),
            _ => {}
        }
    }

    pub fn next(&mut self) {
        let len = self.entry_count();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => {
                if i >= len - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.entry_count();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => {
                if i == 0 {
                    len - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn page_down(&mut self) {
        let len = self.entry_count();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => (i + 20).min(len - 1),
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn page_up(&mut self) {
        if self.entry_count() == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => i.saturating_sub(20),
            None => 0,
        };
        self.state.select(Some(i));
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res.map_err(Into::into)
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if app.handle_key(key) {
                return Ok(());
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Transactions
            Constraint::Length(3), // Input line
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);
    render_table(f, chunks[1], app);
    render_input(f, chunks[2], app);
    render_status_bar(f, chunks[3], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let model = app.controller.model();
    let filter = app
        .controller
        .active_filter()
        .map(|filter| filter.describe())
        .unwrap_or_else(|| "none".to_string());

    let spans = vec![
        Span::styled(
            "Expense Tracker",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  |  "),
        Span::styled(
            format!("Transactions: {}", model.len()),
            Style::default().fg(Color::White),
        ),
        Span::raw("  |  "),
        Span::styled(
            format!("Total: {:.2}", model.total()),
            Style::default().fg(Color::Green),
        ),
        Span::raw("  |  "),
        Span::styled(format!("Filter: {}", filter), Style::default().fg(Color::Cyan)),
    ];

    let header = Paragraph::new(vec![Line::from(spans)])
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Cyan)));

    f.render_widget(header, area);
}

fn render_table(f: &mut Frame, area: Rect, app: &mut App) {
    let header_cells = ["", "#", "Amount", "Category", "Date"].iter().map(|h| {
        Cell::from(*h).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    });

    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let view = app.controller.view();
    let rows = view.rows().iter().enumerate().map(|(i, row)| {
        let marker = if app.selected.contains(&i) { "*" } else { "" };
        let [number, amount, category, date] = row.cells();

        let style = match row {
            TableRow::Total { .. } => Style::default().add_modifier(Modifier::BOLD),
            TableRow::Entry { .. } if view.is_highlighted(i) => {
                Style::default().bg(HIGHLIGHT).fg(Color::Black)
            }
            TableRow::Entry { .. } => Style::default(),
        };

        Row::new(vec![
            Cell::from(marker),
            Cell::from(number),
            Cell::from(amount),
            Cell::from(category),
            Cell::from(date),
        ])
        .style(style)
        .height(1)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(2),
            Constraint::Length(6),
            Constraint::Length(12),
            Constraint::Length(16),
            Constraint::Length(20),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Transactions "),
    )
    .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.state);
}

fn render_input(f: &mut Frame, area: Rect, app: &App) {
    let active = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    let idle = Style::default().fg(Color::DarkGray);

    let line = match app.input_mode {
        InputMode::Normal => Line::from(Span::styled(
            " Press a to add, f/g to filter",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )),
        InputMode::AddAmount | InputMode::AddCategory => {
            let on_amount = app.input_mode == InputMode::AddAmount;
            Line::from(vec![
                Span::styled(" Amount: ", if on_amount { active } else { idle }),
                Span::raw(app.amount_input.as_str()),
                Span::raw("   "),
                Span::styled("Category: ", if on_amount { idle } else { active }),
                Span::raw(app.category_input.as_str()),
            ])
        }
        InputMode::AmountFilter => Line::from(vec![
            Span::styled(" Amount: ", active),
            Span::raw(app.filter_input.as_str()),
        ]),
        InputMode::CategoryFilter => Line::from(vec![
            Span::styled(" Category: ", active),
            Span::raw(app.filter_input.as_str()),
        ]),
    };

    let input = Paragraph::new(vec![line]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(format!(" {} ", app.input_mode.prompt())),
    );

    f.render_widget(input, area);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let mut status_spans = vec![];

    if let Some(message) = &app.message {
        status_spans.push(Span::styled(
            format!(" {} ", message),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
        status_spans.push(Span::raw(" | "));
    }

    let undo_style = if app.controller.view().is_undo_enabled() {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    status_spans.push(Span::styled("Space", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Select | "));
    status_spans.push(Span::styled("u", undo_style));
    status_spans.push(Span::raw(" Undo | "));
    status_spans.push(Span::styled("a", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Add | "));
    status_spans.push(Span::styled("f/g", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Filter | "));
    status_spans.push(Span::styled("q", Style::default().fg(Color::Red)));
    status_spans.push(Span::raw(" Quit"));

    let status_bar = Paragraph::new(vec![Line::from(status_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}
