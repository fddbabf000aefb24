//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type but uses C-compatible representations:
//! `*mut c_char` instead of `String`, raw pointers instead of `Vec`, and
//! tagged enums with explicit discriminants. Conversion functions live here
//! to keep `lib.rs` focused on the `extern "C"` surface.

use std::ffi::{c_void, CString};
use std::os::raw::c_char;

use todo_core::{ApiError, HttpMethod, TodoApp};

/// Opaque handle to a `TodoApp`. C callers receive a pointer to this and
/// pass it back into every `todo_app_*` function.
pub struct FfiTodoApp {
    pub(crate) inner: TodoApp,
}

/// Convert to a C string, dropping interior NUL bytes rather than failing.
pub(crate) fn to_c_string(s: impl Into<String>) -> *mut c_char {
    let mut bytes: Vec<u8> = s.into().into_bytes();
    bytes.retain(|b| *b != 0);
    CString::new(bytes).unwrap_or_default().into_raw()
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// HTTP method as a C enum.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiHttpMethod {
    Get = 0,
    Post = 1,
    Put = 2,
    Delete = 3,
}

impl From<HttpMethod> for FfiHttpMethod {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Get => FfiHttpMethod::Get,
            HttpMethod::Post => FfiHttpMethod::Post,
            HttpMethod::Put => FfiHttpMethod::Put,
            HttpMethod::Delete => FfiHttpMethod::Delete,
        }
    }
}

/// A single HTTP header as a key-value pair of C strings.
#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// An HTTP request described as C-compatible plain data.
///
/// Built by `todo_app_build_*` functions. The C caller executes the request
/// and passes the response back through the matching `todo_app_apply_*`.
#[repr(C)]
pub struct FfiHttpRequest {
    pub method: FfiHttpMethod,
    pub path: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
    pub body: *mut c_char,
}

impl FfiHttpRequest {
    /// Convert a core `HttpRequest` into a heap-allocated `FfiHttpRequest`.
    pub(crate) fn from_core(req: todo_core::HttpRequest) -> *mut Self {
        let path = to_c_string(req.path);
        let body = match req.body {
            Some(b) => to_c_string(b),
            None => std::ptr::null_mut(),
        };

        let headers_len = req.headers.len() as u32;
        let headers = if req.headers.is_empty() {
            std::ptr::null_mut()
        } else {
            let ffi_headers: Box<[FfiHeader]> = req
                .headers
                .into_iter()
                .map(|(k, v)| FfiHeader {
                    key: to_c_string(k),
                    value: to_c_string(v),
                })
                .collect();
            Box::into_raw(ffi_headers) as *mut FfiHeader
        };

        Box::into_raw(Box::new(FfiHttpRequest {
            method: req.method.into(),
            path,
            headers,
            headers_len,
            body,
        }))
    }
}

// ---------------------------------------------------------------------------
// Response input (caller-provided, not heap-allocated by us)
// ---------------------------------------------------------------------------

/// An HTTP response described as C-compatible plain data.
///
/// The C caller constructs this on the stack after executing an HTTP request,
/// then passes a pointer to a `todo_app_apply_*` function. The FFI layer
/// reads but does not free these fields. A null `body` is read as empty.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub body: *const c_char,
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Error codes returned in `FfiTodoResult`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiErrorCode {
    Ok = 0,
    /// The server answered `{success: false, error}`.
    Rejected = 1,
    /// Non-200 status without an error envelope.
    Http = 2,
    Unsuccessful = 3,
    Deserialization = 4,
    Serialization = 5,
    Panic = 6,
    NullArg = 7,
    /// The call does not apply in the current mode (e.g. no draft to save).
    InvalidState = 8,
}

/// Tag that tells `todo_free_result` what `FfiTodoResult::data` points to.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiDataTag {
    None = 0,
    Todo = 1,
    TodoList = 2,
}

/// A single todo item exposed to C.
#[repr(C)]
pub struct FfiTodo {
    pub id: i64,
    pub desc: *mut c_char,
    pub completed: bool,
}

impl FfiTodo {
    fn new(id: i64, desc: String, completed: bool) -> Self {
        FfiTodo {
            id,
            desc: to_c_string(desc),
            completed,
        }
    }
}

impl From<todo_core::Todo> for FfiTodo {
    fn from(todo: todo_core::Todo) -> Self {
        FfiTodo::new(todo.id, todo.description, todo.completed)
    }
}

impl From<todo_core::Draft> for FfiTodo {
    fn from(draft: todo_core::Draft) -> Self {
        FfiTodo::new(draft.id, draft.description, draft.completed)
    }
}

/// A list of todo items exposed to C.
#[repr(C)]
pub struct FfiTodoList {
    pub items: *mut FfiTodo,
    pub len: u32,
}

/// Result envelope for every `todo_app_*` call that can fail.
///
/// On success `error_code` is `Ok`, `error_message` is null, and `data`
/// points to the payload (tagged by `data_tag`, possibly `None`).
/// On failure `error_code` describes the category, `error_message` is a
/// human-readable C string, and `data` is null.
#[repr(C)]
pub struct FfiTodoResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub http_status: u16,
    pub data_tag: FfiDataTag,
    pub data: *mut c_void,
}

impl FfiTodoResult {
    fn boxed(
        error_code: FfiErrorCode,
        error_message: *mut c_char,
        http_status: u16,
        data_tag: FfiDataTag,
        data: *mut c_void,
    ) -> *mut Self {
        Box::into_raw(Box::new(FfiTodoResult {
            error_code,
            error_message,
            http_status,
            data_tag,
            data,
        }))
    }

    fn failure(error_code: FfiErrorCode, http_status: u16, msg: String) -> *mut Self {
        Self::boxed(
            error_code,
            to_c_string(msg),
            http_status,
            FfiDataTag::None,
            std::ptr::null_mut(),
        )
    }

    /// Build a success result carrying a single `FfiTodo`.
    pub(crate) fn ok_todo(todo: impl Into<FfiTodo>) -> *mut Self {
        let ffi_todo = Box::new(todo.into());
        Self::boxed(
            FfiErrorCode::Ok,
            std::ptr::null_mut(),
            0,
            FfiDataTag::Todo,
            Box::into_raw(ffi_todo) as *mut c_void,
        )
    }

    /// Build a success result carrying a `FfiTodoList`.
    pub(crate) fn ok_todo_list(todos: &[todo_core::Todo]) -> *mut Self {
        let len = todos.len() as u32;
        let items = if todos.is_empty() {
            std::ptr::null_mut()
        } else {
            let ffi_todos: Box<[FfiTodo]> =
                todos.iter().cloned().map(FfiTodo::from).collect();
            Box::into_raw(ffi_todos) as *mut FfiTodo
        };

        let ffi_list = Box::new(FfiTodoList { items, len });
        Self::boxed(
            FfiErrorCode::Ok,
            std::ptr::null_mut(),
            0,
            FfiDataTag::TodoList,
            Box::into_raw(ffi_list) as *mut c_void,
        )
    }

    /// Build a success result with no data payload (e.g. delete).
    pub(crate) fn ok_empty() -> *mut Self {
        Self::boxed(
            FfiErrorCode::Ok,
            std::ptr::null_mut(),
            0,
            FfiDataTag::None,
            std::ptr::null_mut(),
        )
    }

    /// Build an error result from an `ApiError`.
    pub(crate) fn from_error(err: ApiError) -> *mut Self {
        let code = match &err {
            ApiError::Rejected { .. } => FfiErrorCode::Rejected,
            ApiError::HttpError { .. } => FfiErrorCode::Http,
            ApiError::Unsuccessful(_) => FfiErrorCode::Unsuccessful,
            ApiError::DeserializationError(_) => FfiErrorCode::Deserialization,
            ApiError::SerializationError(_) => FfiErrorCode::Serialization,
        };
        let message = match &err {
            // C callers show the server's own message.
            ApiError::Rejected { message, .. } => message.clone(),
            _ => err.to_string(),
        };
        Self::failure(code, err.status().unwrap_or(0), message)
    }

    /// Build an error result for a null argument.
    pub(crate) fn null_arg(name: &str) -> *mut Self {
        Self::failure(FfiErrorCode::NullArg, 0, format!("null argument: {name}"))
    }

    /// Build an error result for a call made in the wrong mode.
    pub(crate) fn invalid_state(msg: &str) -> *mut Self {
        Self::failure(FfiErrorCode::InvalidState, 0, msg.to_string())
    }

    /// Build an error result for a caught panic.
    pub(crate) fn panic(msg: &str) -> *mut Self {
        Self::failure(FfiErrorCode::Panic, 0, msg.to_string())
    }
}
