use anyhow::Result;
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use tokio::sync::mpsc;

use super::panic_scope;
use super::render;
use super::PanicScope;
use super::EMPTY_TRANSCRIPT_HINT;
use crate::domain::models::Action;
use crate::domain::models::Event;
use crate::domain::models::UPLOAD_FAILURE_TEXT;
use crate::domain::services::mock_backend::MockBackend;
use crate::domain::services::AppState;
use crate::domain::services::AppStateProps;

async fn create_app_state<'a>(backend: MockBackend) -> Result<AppState<'a>> {
    let mut app_state = AppState::new(AppStateProps {
        backend: Box::new(backend),
        resume_download: "".to_string(),
    })?;
    app_state.check_backend().await;
    return Ok(app_state);
}

fn draw(app_state: &mut AppState) -> Result<Vec<String>> {
    let mut terminal = Terminal::new(TestBackend::new(120, 30))?;
    terminal.draw(|frame| render(frame, app_state))?;

    let buffer = terminal.backend().buffer();
    let area = buffer.area;
    let rows = (0..area.height)
        .map(|y| {
            (0..area.width)
                .map(|x| buffer[(x, y)].symbol().to_string())
                .collect::<String>()
        })
        .collect::<Vec<String>>();

    return Ok(rows);
}

fn screen_contains(rows: &[String], needle: &str) -> bool {
    return rows.iter().any(|row| row.contains(needle));
}

#[tokio::test]
async fn it_renders_the_empty_layout() -> Result<()> {
    let mut app_state = create_app_state(MockBackend::answering("hi")).await?;
    let rows = draw(&mut app_state)?;

    assert!(screen_contains(&rows, EMPTY_TRANSCRIPT_HINT));
    assert!(screen_contains(&rows, "No file selected"));
    assert!(screen_contains(&rows, "F1"));
    assert!(screen_contains(&rows, "AI Resume Assistant"));
    assert!(!screen_contains(&rows, "isn't responding"));

    return Ok(());
}

#[tokio::test]
async fn it_renders_the_transcript() -> Result<()> {
    let (tx, _rx) = mpsc::unbounded_channel::<Action>();
    let mut app_state = create_app_state(MockBackend::answering("hi")).await?;

    app_state.submit_question("What tech stack do you use?", &tx)?;
    let rows = draw(&mut app_state)?;
    assert!(screen_contains(&rows, "What tech stack do you use?"));
    assert!(screen_contains(&rows, "Thinking..."));
    assert!(!screen_contains(&rows, EMPTY_TRANSCRIPT_HINT));

    app_state.handle_event(Event::ChatAnswered(Ok("Rust and React".to_string())), &tx)?;
    let rows = draw(&mut app_state)?;
    assert!(screen_contains(&rows, "Rust and React"));
    assert!(screen_contains(&rows, "Assistant"));

    return Ok(());
}

#[tokio::test]
async fn it_renders_upload_progress_and_outcome() -> Result<()> {
    let (tx, _rx) = mpsc::unbounded_channel::<Action>();
    let mut app_state = create_app_state(MockBackend::answering("hi")).await?;

    app_state.select_resume("/tmp/resume.pdf", &tx)?;
    let rows = draw(&mut app_state)?;
    assert!(screen_contains(&rows, "Selected: resume.pdf"));
    assert!(screen_contains(&rows, "Uploading..."));

    app_state.handle_event(
        Event::ResumeUploaded(Err(crate::domain::models::ClientError::Interrupted)),
        &tx,
    )?;
    let rows = draw(&mut app_state)?;
    assert!(!screen_contains(&rows, "Uploading..."));
    assert!(screen_contains(&rows, UPLOAD_FAILURE_TEXT));

    return Ok(());
}

#[tokio::test]
async fn it_shows_the_health_notice() -> Result<()> {
    let mut app_state = create_app_state(MockBackend::unreachable()).await?;
    let rows = draw(&mut app_state)?;

    assert!(screen_contains(&rows, "isn't responding yet"));

    return Ok(());
}

#[tokio::test]
async fn it_shows_every_character_of_a_wide_answer() -> Result<()> {
    let (tx, _rx) = mpsc::unbounded_channel::<Action>();
    let mut app_state = create_app_state(MockBackend::answering("hi")).await?;
    let answer = "我会写代码".repeat(20);

    app_state.submit_question("Which languages do you write?", &tx)?;
    app_state.handle_event(Event::ChatAnswered(Ok(answer)), &tx)?;
    let rows = draw(&mut app_state)?;

    for c in "我会写代码".chars() {
        let shown = rows
            .iter()
            .map(|row| row.matches(c).count())
            .sum::<usize>();
        assert_eq!(shown, 20, "{c} was clipped");
    }

    return Ok(());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn it_keeps_the_terminal_for_worker_panics() -> Result<()> {
    let ui_thread = std::thread::current().id();
    assert_eq!(panic_scope(ui_thread), PanicScope::Ui);

    let from_worker = tokio::spawn(async move { panic_scope(ui_thread) }).await?;
    assert_eq!(from_worker, PanicScope::Background);

    let from_thread = std::thread::spawn(move || panic_scope(ui_thread))
        .join()
        .map_err(|_| anyhow::anyhow!("thread panicked"))?;
    assert_eq!(from_thread, PanicScope::Background);

    return Ok(());
}
