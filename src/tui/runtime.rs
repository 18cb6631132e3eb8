//! Host screen and terminal event loop.

use std::collections::VecDeque;
use std::io::stdout;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, mpsc};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use anyhow::{Result, anyhow};
use log::info;
use ratatui::{DefaultTerminal, Frame};
use ratatui::crossterm::event::{
	self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
	KeyModifiers,
};
use ratatui::crossterm::execute;
use ratatui::layout::{Constraint, Layout, Margin};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::picker::{PickerBuilder, Selection};
use crate::tui::style::{PickerStyles, StyleElement};
use crate::tui::view::PickerView;

const HELP_CLOSED: &str = "enter: open  q: quit";
const HELP_OPEN: &str = "type: filter  tab: focus  enter: pick  esc: dismiss";

/// Build the picker from `builder`, run it on the terminal and return the
/// last selection made before the user quit.
pub fn run(builder: PickerBuilder<'_>, styles: PickerStyles) -> Result<Option<Selection>> {
	let (selection_tx, selection_rx) = mpsc::channel();
	let picker = builder
		.on_change(move |selection| {
			let _ = selection_tx.send(selection.clone());
		})
		.on_close(|| info!("picker closed from its close control"))
		.build()?;
	let mut app = App::new(PickerView::new(picker, styles), selection_rx);
	app.run()
}

/// Demo host: shows the trigger and the most recent selection.
pub struct App<'a> {
	view: PickerView<'a>,
	selections: mpsc::Receiver<Selection>,
	last: Option<Selection>,
}

impl<'a> App<'a> {
	pub fn new(view: PickerView<'a>, selections: mpsc::Receiver<Selection>) -> Self {
		Self {
			view,
			selections,
			last: None,
		}
	}

	#[must_use]
	pub fn last_selection(&self) -> Option<&Selection> {
		self.last.as_ref()
	}

	/// Pump the terminal event loop until the user quits. The terminal is
	/// restored on every exit path.
	pub fn run(&mut self) -> Result<Option<Selection>> {
		let mut terminal = ratatui::init();
		let session = execute!(stdout(), EnableMouseCapture)
			.map_err(anyhow::Error::from)
			.and_then(|()| self.event_loop(&mut terminal));
		let mouse = execute!(stdout(), DisableMouseCapture);
		ratatui::restore();

		session?;
		mouse?;
		Ok(self.last.take())
	}

	fn event_loop(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
		terminal.clear()?;

		let (event_tx, event_rx) = mpsc::channel();
		let event_loop_running = Arc::new(AtomicBool::new(true));
		let event_loop_flag = Arc::clone(&event_loop_running);

		let event_thread = thread::spawn(move || -> Result<()> {
			while event_loop_flag.load(Ordering::Relaxed) {
				if event::poll(Duration::from_millis(50))? {
					let event = event::read()?;
					if event_tx.send(event).is_err() {
						break;
					}
				}
			}
			Ok(())
		});

		let mut pending_events = VecDeque::new();

		let result: Result<()> = 'event_loop: loop {
			loop {
				match event_rx.try_recv() {
					Ok(event) => pending_events.push_back(event),
					Err(mpsc::TryRecvError::Empty) => break,
					Err(mpsc::TryRecvError::Disconnected) => {
						break 'event_loop Err(anyhow!("input event channel disconnected"));
					}
				}
			}

			let mut quit = false;
			while let Some(event) = pending_events.pop_front() {
				match event {
					Event::Key(key) if key.kind == KeyEventKind::Press => {
						if self.handle_key(key) {
							quit = true;
							break;
						}
					}
					Event::Mouse(mouse) => {
						self.view.handle_mouse(mouse);
					}
					_ => {}
				}
			}
			self.pump_selections();

			if quit {
				break Ok(());
			}

			self.view.tick();
			if let Err(error) = terminal.draw(|frame| self.draw(frame)) {
				break Err(error.into());
			}

			thread::sleep(Duration::from_millis(16));
		};

		let joined = stop_input_thread(&event_loop_running, event_thread);
		result.and(joined)
	}

	/// Process a key press. Returns `true` when the user asked to quit.
	pub(crate) fn handle_key(&mut self, key: KeyEvent) -> bool {
		if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
			return true;
		}
		if self.view.handle_key(key) {
			return false;
		}
		!self.view.is_open() && matches!(key.code, KeyCode::Char('q') | KeyCode::Esc)
	}

	pub(crate) fn pump_selections(&mut self) {
		while let Ok(selection) = self.selections.try_recv() {
			info!("host received selection {}", selection.code);
			self.view.picker_mut().set_current(Some(selection.code.clone()));
			self.last = Some(selection);
		}
	}

	pub(crate) fn draw(&mut self, frame: &mut Frame) {
		let area = frame.area();
		let styles = *self.view.styles();
		let block = Block::default()
			.borders(Borders::ALL)
			.border_set(ratatui::symbols::border::ROUNDED)
			.border_style(styles.get(StyleElement::Header))
			.title(" flagpick ");
		frame.render_widget(block, area);

		let inner = area.inner(Margin {
			horizontal: 2,
			vertical: 1,
		});
		let [trigger, _, status, help] = Layout::vertical([
			Constraint::Length(1),
			Constraint::Length(1),
			Constraint::Length(1),
			Constraint::Fill(1),
		])
		.areas(inner);

		self.view.draw_trigger(frame, trigger);

		let status_line = match &self.last {
			Some(selection) => {
				let mut text = format!("Selected {} ({})", selection.name, selection.code);
				if let Some(calling_code) = selection.calling_code.first() {
					text.push_str(&format!(" +{calling_code}"));
				}
				Line::from(text)
			}
			None => Line::from(Span::styled("No selection yet", styles.get(StyleElement::Empty))),
		};
		frame.render_widget(Paragraph::new(status_line), status);

		let help_text = if self.view.is_open() { HELP_OPEN } else { HELP_CLOSED };
		frame.render_widget(
			Paragraph::new(Span::styled(help_text, styles.get(StyleElement::Empty))),
			Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas::<2>(help)[1],
		);

		self.view.draw_modal(frame, area);
	}
}

/// Signal the input thread to stop and wait for it, surfacing its error.
fn stop_input_thread(running: &AtomicBool, handle: JoinHandle<Result<()>>) -> Result<()> {
	running.store(false, Ordering::Relaxed);
	match handle.join() {
		Ok(join_result) => join_result,
		Err(err) => std::panic::resume_unwind(err),
	}
}
