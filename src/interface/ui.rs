use super::{
    actions::Actions,
    backend_provider::BackendProvider,
    component::{Backend, Component},
    error_handler::ErrorHandler,
    status_label::StatusLabel,
};
use crate::config::args::CommandLine;

use crossterm::event::{Event, EventStream, KeyCode, KeyModifiers};
use std::io;
use tokio::select;
use tokio_stream::StreamExt;
use tui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::Paragraph,
    Terminal,
};

pub enum UiMessage {
    Redraw,
    Quit,
}

pub async fn run(terminal: &mut Terminal<Backend>, command_line: CommandLine) -> io::Result<()> {
    let (ui_sender, ui_receiver) = flume::unbounded();
    let (error_sender, error_receiver) = flume::unbounded();
    let (status_label_sender, status_label_receiver) = flume::unbounded();
    let actions = Actions::new(ui_sender, error_sender, status_label_sender);

    let mut status_label = StatusLabel::new(actions.clone(), status_label_receiver);
    let mut root = ErrorHandler::new(
        actions.clone(),
        error_receiver,
        BackendProvider::new(actions.clone(), command_line),
    );
    let mut event_reader = EventStream::new();

    run_draw_cycle(terminal, &mut root, &mut status_label)?;

    loop {
        select! {
            message = ui_receiver.recv_async() => match message {
                Ok(UiMessage::Redraw) => run_draw_cycle(terminal, &mut root, &mut status_label)?,
                Ok(UiMessage::Quit) | Err(_) => break,
            },
            event = event_reader.next() => match event {
                Some(Ok(event)) => handle_event(&actions, &mut root, event),
                Some(Err(error)) => return Err(error),
                None => break,
            },
        };
    }

    Ok(())
}

fn handle_event(actions: &Actions, root: &mut impl Component, event: Event) {
    match event {
        Event::Key(key)
            if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            actions.quit()
        }
        Event::Resize(..) => actions.redraw(),
        event => root.handle_event(event),
    }
}

fn run_draw_cycle(
    terminal: &mut Terminal<Backend>,
    root: &mut impl Component,
    status_label: &mut StatusLabel,
) -> io::Result<()> {
    let help = help_line(root.registered_events());

    terminal.draw(|f| {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(
                [
                    Constraint::Length(1),
                    Constraint::Min(0),
                    Constraint::Length(1),
                ]
                .as_ref(),
            )
            .split(f.size());

        let title = Paragraph::new(Span::styled(
            " vidman",
            Style::default().add_modifier(Modifier::BOLD),
        ));
        f.render_widget(title, chunks[0]);
        status_label.draw(f, chunks[0]);
        root.draw(f, chunks[1]);
        f.render_widget(Paragraph::new(help), chunks[2]);
    })?;

    Ok(())
}

fn help_line(events: Vec<(String, String)>) -> Spans<'static> {
    let key_style = Style::default().fg(Color::Black).bg(Color::Gray);
    let spans: Vec<Span> = events
        .into_iter()
        .flat_map(|(key, description)| {
            [
                Span::raw(" "),
                Span::styled(format!(" {key} "), key_style),
                Span::raw(format!(" {description}")),
            ]
        })
        .collect();
    Spans::from(spans)
}
