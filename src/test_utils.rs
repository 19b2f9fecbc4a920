#![allow(missing_docs)]
//! Assertion helpers shared by the view and endpoint tests.

use axum::{body::Body, response::Response};
use scraper::{ElementRef, Html, Selector};

pub(crate) async fn parse_html_document(response: Response<Body>) -> Html {
    Html::parse_document(&response_text(response).await)
}

pub(crate) async fn parse_html_fragment(response: Response<Body>) -> Html {
    Html::parse_fragment(&response_text(response).await)
}

async fn response_text(response: Response<Body>) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("could not read response body");

    String::from_utf8_lossy(&body).into_owned()
}

#[track_caller]
pub(crate) fn assert_valid_html(html: &Html) {
    assert!(html.errors.is_empty(), "HTML errors: {:?}", html.errors);
}

#[track_caller]
pub(crate) fn must_get_form(html: &Html) -> ElementRef<'_> {
    let form = Selector::parse("form").unwrap();

    html.select(&form).next().expect("no form in document")
}

/// Assert that the form submits to `endpoint` via the htmx attribute
/// `attribute` (e.g. "hx-post").
#[track_caller]
pub(crate) fn assert_hx_endpoint(form: &ElementRef<'_>, endpoint: &str, attribute: &str) {
    match form.value().attr(attribute) {
        Some(got) => assert_eq!(got, endpoint, "form submits to the wrong endpoint"),
        None => panic!("form has no {attribute} attribute"),
    }
}

/// Assert that the form contains a required input named `name` of `input_type`.
#[track_caller]
pub(crate) fn assert_form_input(form: &ElementRef<'_>, name: &str, input_type: &str) {
    let input = must_get_input(form, name);

    assert_eq!(
        input.value().attr("type"),
        Some(input_type),
        "wrong type for input {name:?}"
    );
    assert!(
        input.value().attr("required").is_some(),
        "input {name:?} should be required"
    );
}

/// Like [assert_form_input], but also checks the input's pre-filled value.
#[track_caller]
pub(crate) fn assert_form_input_with_value(
    form: &ElementRef<'_>,
    name: &str,
    input_type: &str,
    value: &str,
) {
    assert_form_input(form, name, input_type);

    let input = must_get_input(form, name);

    assert_eq!(
        input.value().attr("value"),
        Some(value),
        "wrong value for input {name:?}"
    );
}

#[track_caller]
fn must_get_input<'a>(form: &ElementRef<'a>, name: &str) -> ElementRef<'a> {
    let input = Selector::parse("input").unwrap();

    form.select(&input)
        .find(|element| element.value().attr("name") == Some(name))
        .unwrap_or_else(|| panic!("form has no input named {name:?}"))
}

#[track_caller]
pub(crate) fn assert_form_submit_button(form: &ElementRef<'_>) {
    let button = Selector::parse("button").unwrap();
    let submit_button = form.select(&button).next().expect("form has no button");

    assert_eq!(
        submit_button.value().attr("type"),
        Some("submit"),
        "form button should have type=\"submit\""
    );
}

#[track_caller]
pub(crate) fn assert_form_error_message(form: &ElementRef<'_>, want_error_message: &str) {
    let paragraph = Selector::parse("p").unwrap();
    let error_message: String = form
        .select(&paragraph)
        .next()
        .expect("form has no error message paragraph")
        .text()
        .collect();

    assert_eq!(error_message.trim(), want_error_message);
}

#[track_caller]
pub(crate) fn get_header(response: &Response<Body>, header_name: &str) -> String {
    response
        .headers()
        .get(header_name)
        .unwrap_or_else(|| panic!("response has no {header_name} header"))
        .to_str()
        .expect("header value is not valid UTF-8")
        .to_owned()
}

#[track_caller]
pub(crate) fn assert_hx_redirect(response: &Response<Body>, endpoint: &str) {
    assert_eq!(get_header(response, "hx-redirect"), endpoint);
}
