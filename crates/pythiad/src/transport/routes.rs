//! Request handlers.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{ConnectInfo, Form, Query, State};
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use tracing::{debug, error, info};

use pythia_oracle::QueryMode;

use crate::dispatch::command_line;
use crate::format::{OutputFormat, TEXT_PLAIN, format_result};
use crate::resolve::SelectionRange;

use super::{AppState, TRANSPORT_TARGET};

const FORBIDDEN_BODY: &str = "Forbidden\n";
const NOT_FOUND_BODY: &str = "404 page not found\n";

type Pairs = Vec<(String, String)>;

/// Request parameters from a urlencoded body and the query string.
///
/// Body values come before query-string values, and the first value of a
/// repeated key wins. A missing key reads as empty.
#[derive(Debug, Default)]
pub(super) struct FormValues(Pairs);

impl FormValues {
    fn new(form: Option<Form<Pairs>>, Query(query): Query<Pairs>) -> Self {
        let mut pairs = form.map(|Form(body)| body).unwrap_or_default();
        pairs.extend(query);
        Self(pairs)
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    fn value(&self, key: &str) -> &str {
        self.get(key).unwrap_or_default()
    }
}

fn plain(status: StatusCode, body: impl Into<String>) -> Response {
    (status, [(header::CONTENT_TYPE, TEXT_PLAIN)], body.into()).into_response()
}

fn forbidden() -> Response {
    plain(StatusCode::FORBIDDEN, FORBIDDEN_BODY)
}

fn remote(connect: Option<&ConnectInfo<SocketAddr>>) -> String {
    connect.map_or_else(|| "-".to_owned(), |ConnectInfo(addr)| addr.to_string())
}

pub(super) async fn not_found() -> Response {
    plain(StatusCode::NOT_FOUND, NOT_FOUND_BODY)
}

pub(super) async fn index(State(state): State<AppState>) -> Html<String> {
    Html(state.pages.index(&state.scope_args, state.scope().files()))
}

pub(super) async fn source(
    State(state): State<AppState>,
    query: Query<Pairs>,
    form: Option<Form<Pairs>>,
) -> Response {
    let params = FormValues::new(form, query);
    let file = params.value("file");
    if state.scope().is_forbidden(file) {
        return forbidden();
    }
    Html(state.pages.source(file)).into_response()
}

pub(super) async fn file(
    State(state): State<AppState>,
    connect: Option<ConnectInfo<SocketAddr>>,
    query: Query<Pairs>,
    form: Option<Form<Pairs>>,
) -> Response {
    let params = FormValues::new(form, query);
    let path = params.value("path");
    if state.scope().is_forbidden(path) {
        return forbidden();
    }
    let content = match tokio::fs::read(path).await {
        Ok(content) => content,
        Err(error) => {
            info!(
                target: TRANSPORT_TARGET,
                remote = %remote(connect.as_ref()),
                path = %path,
                error = %error,
                "cannot read in-scope file"
            );
            return plain(StatusCode::NOT_FOUND, NOT_FOUND_BODY);
        }
    };

    // An unusable selection is dropped and the whole file is shown.
    let selection = params.get("s").and_then(|raw| {
        SelectionRange::parse(raw)
            .and_then(|range| range.byte_offsets_in(&content))
            .inspect_err(|error| {
                debug!(target: TRANSPORT_TARGET, selection = raw, error = %error, "ignoring selection");
            })
            .ok()
    });
    Html(state.source.render(&content, selection)).into_response()
}

pub(super) async fn query(
    State(state): State<AppState>,
    connect: Option<ConnectInfo<SocketAddr>>,
    query: Query<Pairs>,
    form: Option<Form<Pairs>>,
) -> Response {
    let params = FormValues::new(form, query);
    let mode = QueryMode::new(params.value("mode"));
    let pos = params.value("pos").to_owned();
    let format = OutputFormat::from_param(params.get("format"));
    if state.verbose {
        info!(
            target: TRANSPORT_TARGET,
            remote = %remote(connect.as_ref()),
            command = %command_line(&mode, &pos, format, &state.scope_args),
            "query"
        );
    }

    let dispatcher = Arc::clone(&state.dispatcher);
    let outcome = tokio::task::spawn_blocking(move || {
        dispatcher
            .dispatch(&mode, &pos)
            .map(|result| format_result(result.as_ref(), format))
    })
    .await;

    match outcome {
        Ok(Ok(formatted)) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, formatted.content_type)],
            formatted.body,
        )
            .into_response(),
        Ok(Err(error)) if error.is_forbidden() => forbidden(),
        Ok(Err(error)) => plain(StatusCode::OK, error.to_string()),
        Err(join_error) => {
            error!(target: TRANSPORT_TARGET, error = %join_error, "query task failed");
            plain(StatusCode::INTERNAL_SERVER_ERROR, "internal error\n")
        }
    }
}
