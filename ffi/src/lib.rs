//! C-ABI wrapper around `todo-core`'s `TodoApp`.
//!
//! # Overview
//! Exposes the todo list UI state machine through `extern "C"` functions so
//! any language with a C FFI can drive it without linking to Rust's async
//! runtime or serde directly. The host still performs the HTTP round-trip:
//! `todo_app_build_*` hands out a request, `todo_app_apply_*` takes the
//! response back.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - A single `FfiTodoResult` envelope with `FfiDataTag` + `void* data`
//!   conveys success payloads and errors uniformly.
//! - The C caller owns all returned pointers and must call the matching
//!   `todo_free_*` function to release them.

pub mod types;

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::panic::{catch_unwind, UnwindSafe};

use todo_core::{HttpRequest, HttpResponse, TodoApp, TodoClient};

use types::*;

/// Read a caller-owned C string. Invalid UTF-8 is replaced, not rejected.
fn read_str(ptr: *const c_char) -> String {
    unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned()
}

/// Convert an `FfiHttpResponse` to a core `HttpResponse`.
fn ffi_response_to_core(resp: &FfiHttpResponse) -> HttpResponse {
    let body = if resp.body.is_null() {
        String::new()
    } else {
        read_str(resp.body)
    };
    HttpResponse::new(resp.status, body)
}

/// Run `f` against the app behind `app`, producing a request or null.
fn build_with<F>(app: *const FfiTodoApp, f: F) -> *mut FfiHttpRequest
where
    F: FnOnce(&TodoApp) -> Option<HttpRequest> + UnwindSafe,
{
    catch_unwind(|| {
        if app.is_null() {
            return std::ptr::null_mut();
        }
        let app = unsafe { &(*app).inner };
        match f(app) {
            Some(req) => FfiHttpRequest::from_core(req),
            None => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Run `f` against the app behind `app`, reporting through `FfiTodoResult`.
fn result_with<F>(app: *mut FfiTodoApp, name: &str, f: F) -> *mut FfiTodoResult
where
    F: FnOnce(&mut TodoApp) -> *mut FfiTodoResult + UnwindSafe,
{
    catch_unwind(|| {
        if app.is_null() {
            return FfiTodoResult::null_arg("app");
        }
        let app = unsafe { &mut (*app).inner };
        f(app)
    })
    .unwrap_or_else(|_| FfiTodoResult::panic(&format!("panic in {name}")))
}

/// Like `result_with`, but also converts a caller-provided response.
fn apply_with<F>(
    app: *mut FfiTodoApp,
    response: *const FfiHttpResponse,
    name: &str,
    f: F,
) -> *mut FfiTodoResult
where
    F: FnOnce(&mut TodoApp, HttpResponse) -> *mut FfiTodoResult + UnwindSafe,
{
    if response.is_null() {
        return FfiTodoResult::null_arg("response");
    }
    result_with(app, name, move |app| {
        let resp = ffi_response_to_core(unsafe { &*response });
        f(app, resp)
    })
}

// ---------------------------------------------------------------------------
// App lifecycle
// ---------------------------------------------------------------------------

/// Create a new `TodoApp` talking to `base_url`, with an empty list in list mode.
///
/// Returns null if `base_url` is null or if an internal panic occurs.
/// The caller must free the returned pointer with `todo_app_free`.
#[unsafe(no_mangle)]
pub extern "C" fn todo_app_new(base_url: *const c_char) -> *mut FfiTodoApp {
    catch_unwind(|| {
        if base_url.is_null() {
            return std::ptr::null_mut();
        }
        let client = TodoClient::new(&read_str(base_url));
        Box::into_raw(Box::new(FfiTodoApp {
            inner: TodoApp::new(client),
        }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free an app created by `todo_app_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn todo_app_free(app: *mut FfiTodoApp) {
    if !app.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(app) });
        });
    }
}

/// Snapshot of the local list. `data_tag = TodoList`.
#[unsafe(no_mangle)]
pub extern "C" fn todo_app_todos(app: *mut FfiTodoApp) -> *mut FfiTodoResult {
    result_with(app, "todo_app_todos", |app| {
        FfiTodoResult::ok_todo_list(app.todos())
    })
}

// ---------------------------------------------------------------------------
// Load
// ---------------------------------------------------------------------------

#[unsafe(no_mangle)]
pub extern "C" fn todo_app_build_load(app: *const FfiTodoApp) -> *mut FfiHttpRequest {
    build_with(app, |app| Some(app.load_request()))
}

/// Replace the local list with the server's. Returns the new list.
#[unsafe(no_mangle)]
pub extern "C" fn todo_app_apply_load(
    app: *mut FfiTodoApp,
    response: *const FfiHttpResponse,
) -> *mut FfiTodoResult {
    apply_with(app, response, "todo_app_apply_load", |app, resp| {
        match app.apply_load(resp) {
            Ok(()) => FfiTodoResult::ok_todo_list(app.todos()),
            Err(e) => FfiTodoResult::from_error(e),
        }
    })
}

// ---------------------------------------------------------------------------
// Input buffer and add
// ---------------------------------------------------------------------------

/// Replace the input buffer. Returns false if either argument is null.
#[unsafe(no_mangle)]
pub extern "C" fn todo_app_set_input(app: *mut FfiTodoApp, text: *const c_char) -> bool {
    catch_unwind(|| {
        if app.is_null() || text.is_null() {
            return false;
        }
        let app = unsafe { &mut (*app).inner };
        app.set_input(read_str(text));
        true
    })
    .unwrap_or(false)
}

/// Copy of the input buffer. Free with `todo_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn todo_app_input(app: *const FfiTodoApp) -> *mut c_char {
    catch_unwind(|| {
        if app.is_null() {
            return std::ptr::null_mut();
        }
        let app = unsafe { &(*app).inner };
        to_c_string(app.input())
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Empty the input buffer. Call this when an add request failed in transport.
#[unsafe(no_mangle)]
pub extern "C" fn todo_app_clear_input(app: *mut FfiTodoApp) {
    if !app.is_null() {
        let _ = catch_unwind(|| {
            unsafe { &mut (*app).inner }.clear_input();
        });
    }
}

/// Build the create request for the input buffer.
///
/// Returns null when the buffer is blank: nothing should be sent.
#[unsafe(no_mangle)]
pub extern "C" fn todo_app_build_add(app: *const FfiTodoApp) -> *mut FfiHttpRequest {
    build_with(app, |app| app.add_request().ok().flatten())
}

/// Append the created record. `data_tag = Todo`. The input buffer is
/// cleared whether or not the server accepted it.
#[unsafe(no_mangle)]
pub extern "C" fn todo_app_apply_add(
    app: *mut FfiTodoApp,
    response: *const FfiHttpResponse,
) -> *mut FfiTodoResult {
    apply_with(app, response, "todo_app_apply_add", |app, resp| {
        match app.apply_add(resp) {
            Ok(todo) => FfiTodoResult::ok_todo(todo.clone()),
            Err(e) => FfiTodoResult::from_error(e),
        }
    })
}

// ---------------------------------------------------------------------------
// Edit
// ---------------------------------------------------------------------------

/// Enter edit mode for `id`. Returns false if already editing, if `id` is not
/// in the local list, or if `app` is null.
#[unsafe(no_mangle)]
pub extern "C" fn todo_app_begin_edit(app: *mut FfiTodoApp, id: i64) -> bool {
    catch_unwind(|| {
        if app.is_null() {
            return false;
        }
        unsafe { &mut (*app).inner }.begin_edit(id)
    })
    .unwrap_or(false)
}

#[unsafe(no_mangle)]
pub extern "C" fn todo_app_is_editing(app: *const FfiTodoApp) -> bool {
    catch_unwind(|| !app.is_null() && unsafe { &(*app).inner }.is_editing()).unwrap_or(false)
}

/// Current draft as a `Todo`. `InvalidState` when not editing.
#[unsafe(no_mangle)]
pub extern "C" fn todo_app_draft(app: *mut FfiTodoApp) -> *mut FfiTodoResult {
    result_with(app, "todo_app_draft", |app| match app.draft() {
        Some(draft) => FfiTodoResult::ok_todo(draft.clone()),
        None => FfiTodoResult::invalid_state("not editing"),
    })
}

/// Change the draft. `desc` may be null (keep). `completed` uses tri-state:
/// -1 = keep, 0 = false, 1 = true. Returns the updated draft.
#[unsafe(no_mangle)]
pub extern "C" fn todo_app_set_draft(
    app: *mut FfiTodoApp,
    desc: *const c_char,
    completed: i32,
) -> *mut FfiTodoResult {
    result_with(app, "todo_app_set_draft", |app| {
        let Some(draft) = app.draft_mut() else {
            return FfiTodoResult::invalid_state("not editing");
        };
        if !desc.is_null() {
            draft.description = read_str(desc);
        }
        match completed {
            0 => draft.completed = false,
            1 => draft.completed = true,
            _ => {}
        }
        FfiTodoResult::ok_todo(draft.clone())
    })
}

/// Build the update request for the draft. Returns null when not editing.
#[unsafe(no_mangle)]
pub extern "C" fn todo_app_build_save(app: *const FfiTodoApp) -> *mut FfiHttpRequest {
    build_with(app, |app| app.save_request().ok().flatten())
}

/// Leave edit mode and patch the local record on success.
///
/// `InvalidState` when not editing. Edit mode is left even when the
/// response reports an error.
#[unsafe(no_mangle)]
pub extern "C" fn todo_app_apply_save(
    app: *mut FfiTodoApp,
    response: *const FfiHttpResponse,
) -> *mut FfiTodoResult {
    apply_with(app, response, "todo_app_apply_save", |app, resp| {
        if !app.is_editing() {
            return FfiTodoResult::invalid_state("not editing");
        }
        match app.apply_save(resp) {
            Ok(()) => FfiTodoResult::ok_empty(),
            Err(e) => FfiTodoResult::from_error(e),
        }
    })
}

/// Drop back to list mode without saving. Call this when a save request
/// failed in transport. Returns true if a draft was abandoned.
#[unsafe(no_mangle)]
pub extern "C" fn todo_app_finish_edit(app: *mut FfiTodoApp) -> bool {
    catch_unwind(|| {
        if app.is_null() {
            return false;
        }
        unsafe { &mut (*app).inner }.finish_edit().is_some()
    })
    .unwrap_or(false)
}

// ---------------------------------------------------------------------------
// Delete and clear
// ---------------------------------------------------------------------------

#[unsafe(no_mangle)]
pub extern "C" fn todo_app_build_delete(app: *const FfiTodoApp, id: i64) -> *mut FfiHttpRequest {
    build_with(app, move |app| Some(app.delete_request(id)))
}

/// Remove `id` from the local list once the server confirms.
#[unsafe(no_mangle)]
pub extern "C" fn todo_app_apply_delete(
    app: *mut FfiTodoApp,
    id: i64,
    response: *const FfiHttpResponse,
) -> *mut FfiTodoResult {
    apply_with(app, response, "todo_app_apply_delete", move |app, resp| {
        match app.apply_delete(id, resp) {
            Ok(()) => FfiTodoResult::ok_empty(),
            Err(e) => FfiTodoResult::from_error(e),
        }
    })
}

#[unsafe(no_mangle)]
pub extern "C" fn todo_app_build_clear(app: *const FfiTodoApp) -> *mut FfiHttpRequest {
    build_with(app, |app| Some(app.clear_request()))
}

/// Empty the local list once the server confirms.
#[unsafe(no_mangle)]
pub extern "C" fn todo_app_apply_clear(
    app: *mut FfiTodoApp,
    response: *const FfiHttpResponse,
) -> *mut FfiTodoResult {
    apply_with(app, response, "todo_app_apply_clear", |app, resp| {
        match app.apply_clear(resp) {
            Ok(()) => FfiTodoResult::ok_empty(),
            Err(e) => FfiTodoResult::from_error(e),
        }
    })
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free an `FfiHttpRequest` returned by any `todo_app_build_*` function.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn todo_free_request(req: *mut FfiHttpRequest) {
    if req.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let req = unsafe { Box::from_raw(req) };
        free_c_string(req.path);
        free_c_string(req.body);
        if !req.headers.is_null() && req.headers_len > 0 {
            let headers = unsafe {
                Box::from_raw(std::ptr::slice_from_raw_parts_mut(
                    req.headers,
                    req.headers_len as usize,
                ))
            };
            for h in headers.iter() {
                free_c_string(h.key);
                free_c_string(h.value);
            }
        }
    });
}

/// Free an `FfiTodoResult` returned by any `todo_app_*` function.
/// Safe to call with null. Uses `data_tag` to determine what `data` points to.
#[unsafe(no_mangle)]
pub extern "C" fn todo_free_result(result: *mut FfiTodoResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let result = unsafe { Box::from_raw(result) };
        free_c_string(result.error_message);
        if result.data.is_null() {
            return;
        }
        match result.data_tag {
            FfiDataTag::Todo => {
                let todo = unsafe { Box::from_raw(result.data as *mut FfiTodo) };
                free_c_string(todo.desc);
            }
            FfiDataTag::TodoList => {
                let list = unsafe { Box::from_raw(result.data as *mut FfiTodoList) };
                if !list.items.is_null() && list.len > 0 {
                    let items = unsafe {
                        Box::from_raw(std::ptr::slice_from_raw_parts_mut(
                            list.items,
                            list.len as usize,
                        ))
                    };
                    for item in items.iter() {
                        free_c_string(item.desc);
                    }
                }
            }
            FfiDataTag::None => {}
        }
    });
}

fn free_c_string(s: *mut c_char) {
    if !s.is_null() {
        drop(unsafe { CString::from_raw(s) });
    }
}

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn todo_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = catch_unwind(|| free_c_string(s));
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
