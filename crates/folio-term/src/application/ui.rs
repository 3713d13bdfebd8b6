#[cfg(test)]
#[path = "ui_test.rs"]
mod tests;

use std::io;
use std::thread;
use std::thread::ThreadId;

use anyhow::Result;
use crossterm::cursor;
use crossterm::event::DisableBracketedPaste;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableBracketedPaste;
use crossterm::event::EnableMouseCapture;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use ratatui::backend::Backend;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Constraint;
use ratatui::layout::Layout;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::text::Text;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Scrollbar;
use ratatui::widgets::ScrollbarOrientation;
use ratatui::widgets::Wrap;
use ratatui::Frame;
use ratatui::Terminal;
use strum::IntoEnumIterator;
use tokio::sync::mpsc;
use tokio::task;

use crate::domain::models::Action;
use crate::domain::models::BackendBox;
use crate::domain::models::Event;
use crate::domain::models::QuickPrompt;
use crate::domain::services::actions::ActionsService;
use crate::domain::services::events::EventsService;
use crate::domain::services::AppState;
use crate::domain::services::AppStateProps;
use crate::domain::services::Focus;

pub const EMPTY_TRANSCRIPT_HINT: &str = "Try: \"What technologies do you know?\"";

fn focus_style(focused: bool) -> Style {
    if focused {
        return Style::default().fg(Color::Yellow);
    }
    return Style::default().fg(Color::DarkGray);
}

fn render_header(frame: &mut Frame, app_state: &AppState, area: Rect) {
    let mut lines = vec![Line::from(vec![
        Span::styled(
            " folio ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::LightGreen)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Full Stack • AI  "),
        Span::styled(
            format!("API {}", app_state.api_base_url),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("  v{}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::DarkGray),
        ),
    ])];

    if let Some(notice) = &app_state.notice {
        lines.push(Line::from(Span::styled(
            notice.to_string(),
            Style::default().fg(Color::Yellow),
        )));
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
}

fn render_resume_panel(frame: &mut Frame, app_state: &mut AppState, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" Resume ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [download_area, input_area, status_area] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(3),
        Constraint::Min(0),
    ])
    .areas(inner);

    let download = if app_state.resume_download.is_empty() {
        Line::from(Span::styled(
            "Upload Resume (PDF)",
            Style::default().add_modifier(Modifier::BOLD),
        ))
    } else {
        Line::from(vec![
            Span::styled("Download: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(app_state.resume_download.to_string()),
        ])
    };
    frame.render_widget(Paragraph::new(download), download_area);

    let focused = app_state.focus == Focus::ResumePicker;
    app_state.file_input.set_block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(focus_style(focused))
            .title(" PDF path "),
    );
    frame.render_widget(&app_state.file_input, input_area);

    let state = app_state.upload.state();
    let mut lines = vec![Line::from(match &state.selected_file_name {
        Some(name) => format!("Selected: {name}"),
        None => "No file selected".to_string(),
    })];
    if state.is_uploading() {
        lines.push(Line::from(Span::styled(
            "Uploading...",
            Style::default().fg(Color::DarkGray),
        )));
    }
    if let Some(text) = state.status_text() {
        lines.push(Line::from(Span::styled(
            text,
            Style::default().add_modifier(Modifier::BOLD),
        )));
    }
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), status_area);
}

fn render_chat_panel(frame: &mut Frame, app_state: &mut AppState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" AI Resume Assistant ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [prompts_area, transcript_area, input_area] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(1),
        Constraint::Length(3),
    ])
    .areas(inner);

    let prompts = QuickPrompt::iter()
        .enumerate()
        .flat_map(|(idx, prompt)| {
            vec![
                Span::styled(
                    format!(" F{} ", idx + 1),
                    Style::default().bg(Color::DarkGray).fg(Color::White),
                ),
                Span::raw(format!(" {prompt}  ")),
            ]
        })
        .collect::<Vec<Span>>();
    frame.render_widget(
        Paragraph::new(Line::from(prompts)).wrap(Wrap { trim: true }),
        prompts_area,
    );

    let [text_area, scrollbar_area] =
        Layout::horizontal([Constraint::Min(1), Constraint::Length(1)]).areas(transcript_area);
    app_state.set_rect(text_area);

    if app_state.transcript_view.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                EMPTY_TRANSCRIPT_HINT,
                Style::default().fg(Color::DarkGray),
            )),
            text_area,
        );
    } else {
        let lines = app_state.transcript_view.lines().to_vec();
        let position = u16::try_from(app_state.scroll.position).unwrap_or(u16::MAX);
        frame.render_widget(
            Paragraph::new(Text::from(lines)).scroll((position, 0)),
            text_area,
        );
        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight),
            scrollbar_area,
            &mut app_state.scroll.scrollbar_state,
        );
    }

    let focused = app_state.focus == Focus::Chat;
    let title = if app_state.conversation.is_pending() {
        " Thinking... "
    } else {
        " Ask "
    };
    app_state.chat_input.set_block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(focus_style(focused))
            .title(title),
    );
    frame.render_widget(&app_state.chat_input, input_area);
}

fn render_footer(frame: &mut Frame, area: Rect) {
    let key_style = Style::default().bg(Color::DarkGray).fg(Color::White);
    let hints = vec![
        Span::styled(" Enter ", key_style),
        Span::raw(" send "),
        Span::styled(" Tab ", key_style),
        Span::raw(" chat/resume "),
        Span::styled(" F1-F4 ", key_style),
        Span::raw(" quick prompt "),
        Span::styled(" Up/Down ", key_style),
        Span::raw(" scroll "),
        Span::styled(" Ctrl+C ", key_style),
        Span::raw(" quit "),
    ];
    frame.render_widget(Paragraph::new(Line::from(hints)), area);
}

pub fn render(frame: &mut Frame, app_state: &mut AppState) {
    let header_height = if app_state.notice.is_some() { 2 } else { 1 };
    let [header_area, body_area, footer_area] = Layout::vertical([
        Constraint::Length(header_height),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    let [resume_area, chat_area] =
        Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)])
            .areas(body_area);

    render_header(frame, app_state, header_area);
    render_resume_panel(frame, app_state, resume_area);
    render_chat_panel(frame, app_state, chat_area);
    render_footer(frame, footer_area);
}

pub async fn start_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app_state_props: AppStateProps,
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let mut app_state = AppState::new(app_state_props)?;
    let mut events = EventsService::new(rx);

    terminal.draw(|frame| render(frame, &mut app_state))?;
    app_state.check_backend().await;

    loop {
        terminal.draw(|frame| render(frame, &mut app_state))?;

        let event = events.next().await?;
        if app_state.handle_event(event, &tx)? {
            break;
        }
    }

    return Ok(());
}

pub fn destruct_terminal_for_panic() {
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(
        io::stdout(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste,
        cursor::Show
    );
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanicScope {
    /// The thread drawing the terminal. Its panic ends the program.
    Ui,
    /// A request worker. Its completion guard reports the failure and the
    /// UI keeps running.
    Background,
}

pub fn panic_scope(ui_thread: ThreadId) -> PanicScope {
    if thread::current().id() == ui_thread {
        return PanicScope::Ui;
    }
    return PanicScope::Background;
}

/// `ui_thread` must be the thread that polls `start_ui`. `run` is awaited
/// directly by the binary's `block_on`, so that is the main thread while
/// workers live on the runtime's pool.
fn install_panic_hook(ui_thread: ThreadId) {
    let report = better_panic::Settings::auto().create_panic_handler();
    std::panic::set_hook(Box::new(move |panic_info| {
        match panic_scope(ui_thread) {
            PanicScope::Ui => {
                destruct_terminal_for_panic();
                report(panic_info);
            }
            PanicScope::Background => {
                tracing::error!(panic = %panic_info, "background task panicked");
            }
        }
    }));
}

async fn start_ui(
    backend: BackendBox,
    resume_download: String,
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let mut stdout = io::stdout();

    enable_raw_mode()?;
    crossterm::execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;

    let term_backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(term_backend)?;

    let app_state_props = AppStateProps {
        backend,
        resume_download,
    };
    let result = start_loop(&mut terminal, app_state_props, tx, rx).await;

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;
    let _ = crossterm::execute!(io::stdout(), cursor::Show);

    return result;
}

/// Runs the terminal UI until the user quits. `actions_backend` serves the
/// request workers, `ui_backend` the start-up health check.
pub async fn run(
    actions_backend: BackendBox,
    ui_backend: BackendBox,
    resume_download: String,
) -> Result<()> {
    install_panic_hook(thread::current().id());

    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();
    let (event_tx, event_rx) = mpsc::unbounded_channel::<Event>();

    let mut background_futures = task::JoinSet::new();
    background_futures.spawn(async move {
        ActionsService::start(actions_backend, event_tx, &mut action_rx).await
    });

    let ui_future = start_ui(ui_backend, resume_download, action_tx, event_rx);

    let result = tokio::select!(
        res = background_futures.join_next() => match res {
            Some(Ok(res)) => res,
            Some(Err(err)) => Err(err.into()),
            None => Ok(()),
        },
        res = ui_future => res,
    );

    if result.is_err() {
        destruct_terminal_for_panic();
    }

    return result;
}
