//! One interactive session: a `TodoApp` plus the transport that feeds it.
//!
//! Every command follows the same path: ask the app for a request, execute
//! it, hand the response back. Failures are logged and the local list stays
//! as it was.

use std::fmt::Write as _;

use todo_core::{HttpRequest, HttpResponse, Mode, TodoApp};
use tracing::{debug, error, warn};

use crate::commands::{Command, HELP};
use crate::transport::{Transport, TransportError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Session<T> {
    app: TodoApp,
    transport: T,
}

impl<T: Transport> Session<T> {
    pub fn new(app: TodoApp, transport: T) -> Self {
        Self { app, transport }
    }

    pub fn app(&self) -> &TodoApp {
        &self.app
    }

    fn send(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        debug!(method = %req.method, path = %req.path, "sending");
        self.transport.execute(req)
    }

    /// Fetch the server's list, replacing the local one.
    pub fn load(&mut self) {
        let req = self.app.load_request();
        match self.send(req) {
            Ok(resp) => {
                if let Err(e) = self.app.apply_load(resp) {
                    error!(error = %e, "failed to load todos");
                }
            }
            Err(e) => error!(error = %e, "failed to load todos"),
        }
    }

    pub fn run(&mut self, command: Command) -> Flow {
        match command {
            Command::Add(text) => self.add(text),
            Command::Edit(id) => {
                if !self.app.begin_edit(id) {
                    warn!(id, editing = self.app.is_editing(), "cannot edit");
                }
            }
            Command::Desc(text) => self.with_draft(|draft| draft.description = text),
            Command::Done => self.with_draft(|draft| draft.completed = true),
            Command::Undone => self.with_draft(|draft| draft.completed = false),
            Command::Save => self.save(),
            Command::Cancel => {
                if self.app.finish_edit().is_none() {
                    warn!("not editing");
                }
            }
            Command::Remove(id) => self.remove(id),
            Command::Clear => self.clear(),
            Command::List => {}
            Command::Help => {
                println!("{HELP}");
                return Flow::Continue;
            }
            Command::Quit => return Flow::Quit,
        }
        print!("{}", self.render());
        Flow::Continue
    }

    fn add(&mut self, text: String) {
        self.app.set_input(text);
        let req = match self.app.add_request() {
            Ok(Some(req)) => req,
            Ok(None) => {
                self.app.clear_input();
                return;
            }
            Err(e) => {
                self.app.clear_input();
                error!(error = %e, "failed to build add request");
                return;
            }
        };
        match self.send(req) {
            Ok(resp) => match self.app.apply_add(resp) {
                Ok(todo) => debug!(id = todo.id, "todo added"),
                Err(e) => error!(error = %e, "failed to add todo"),
            },
            Err(e) => {
                self.app.clear_input();
                error!(error = %e, "failed to add todo");
            }
        }
    }

    fn with_draft(&mut self, edit: impl FnOnce(&mut todo_core::Draft)) {
        match self.app.draft_mut() {
            Some(draft) => edit(draft),
            None => warn!("not editing; use `edit <id>` first"),
        }
    }

    fn save(&mut self) {
        let req = match self.app.save_request() {
            Ok(Some(req)) => req,
            Ok(None) => {
                warn!("not editing");
                return;
            }
            Err(e) => {
                self.app.finish_edit();
                error!(error = %e, "failed to build save request");
                return;
            }
        };
        match self.send(req) {
            Ok(resp) => {
                if let Err(e) = self.app.apply_save(resp) {
                    error!(error = %e, "failed to save todo");
                }
            }
            Err(e) => {
                self.app.finish_edit();
                error!(error = %e, "failed to save todo");
            }
        }
    }

    fn remove(&mut self, id: i64) {
        let req = self.app.delete_request(id);
        let result = self
            .send(req)
            .map_err(|e| e.to_string())
            .and_then(|resp| self.app.apply_delete(id, resp).map_err(|e| e.to_string()));
        if let Err(e) = result {
            error!(id, error = %e, "failed to delete todo");
        }
    }

    fn clear(&mut self) {
        let req = self.app.clear_request();
        let result = self
            .send(req)
            .map_err(|e| e.to_string())
            .and_then(|resp| self.app.apply_clear(resp).map_err(|e| e.to_string()));
        if let Err(e) = result {
            error!(error = %e, "failed to clear todos");
        }
    }

    /// The list as shown after each command, with the draft marked.
    pub fn render(&self) -> String {
        let mut out = String::new();
        if self.app.todos().is_empty() {
            out.push_str("(no todos)\n");
        }
        let editing = match self.app.mode() {
            Mode::Edit(draft) => Some(draft),
            Mode::List => None,
        };
        for todo in self.app.todos() {
            let mark = if todo.completed { 'x' } else { ' ' };
            let _ = writeln!(out, "[{mark}] {:>4}  {}", todo.id, todo.description);
            if let Some(draft) = editing.filter(|d| d.id == todo.id) {
                let mark = if draft.completed { 'x' } else { ' ' };
                let _ = writeln!(out, "    editing: [{mark}] {}", draft.description);
            }
        }
        out
    }
}
