//! The shared page shell, style constants and small HTML helpers.

use maud::{DOCTYPE, Markup, PreEscaped, html};

pub const LINK_STYLE: &str = "text-emerald-700 hover:text-emerald-600 \
    dark:text-emerald-400 dark:hover:text-emerald-300 underline";

pub const BUTTON_PRIMARY_STYLE: &str = "w-full px-4 py-2 bg-emerald-600 \
    dark:bg-emerald-700 disabled:bg-emerald-800 hover:enabled:bg-emerald-700 \
    hover:enabled:dark:bg-emerald-800 text-white rounded";

pub const BUTTON_DELETE_STYLE: &str = "text-red-600 hover:text-red-500 \
    dark:text-red-500 dark:hover:text-red-400 underline bg-transparent \
    border-none cursor-pointer";

pub const FORM_CONTAINER_STYLE: &str = "flex flex-col items-center px-6 py-8 \
    mx-auto lg:py-0 max-w-md text-gray-900 dark:text-white";

pub const FORM_LABEL_STYLE: &str = "block mb-2 text-sm font-medium text-gray-900 dark:text-white";

pub const FORM_TEXT_INPUT_STYLE: &str = "block w-full p-2.5 rounded text-sm \
    text-gray-900 dark:text-white disabled:text-gray-500 bg-gray-50 \
    dark:bg-gray-700 border border-gray-300 dark:border-gray-600 \
    dark:placeholder-gray-400 focus:ring-emerald-600 focus:border-emerald-600 \
    focus:dark:border-emerald-500 focus:dark:ring-emerald-500";

pub const FORM_RADIO_GROUP_STYLE: &str = "flex flex-col gap-2";

pub const FORM_RADIO_INPUT_STYLE: &str = "peer h-4 w-4 shrink-0 cursor-pointer \
    text-emerald-600 border-gray-300 dark:border-gray-600 focus-visible:ring-2 \
    focus-visible:ring-emerald-500 focus-visible:ring-offset-2 \
    focus-visible:ring-offset-white focus-visible:dark:ring-offset-gray-900";

pub const FORM_RADIO_LABEL_STYLE: &str = "flex-1 rounded border border-gray-300 \
    dark:border-gray-600 bg-white dark:bg-gray-700 px-3 py-2 text-sm font-medium \
    text-gray-700 dark:text-white cursor-pointer transition \
    hover:border-gray-400 hover:bg-gray-50 hover:text-gray-900 \
    hover:dark:border-gray-500 hover:dark:bg-gray-600 active:scale-[0.99] \
    peer-checked:border-emerald-600 peer-checked:bg-emerald-50 \
    peer-checked:text-emerald-700 peer-checked:shadow-sm \
    peer-checked:dark:border-emerald-500 peer-checked:dark:bg-emerald-600/20 \
    peer-checked:dark:text-emerald-200";

pub const TABLE_HEADER_STYLE: &str = "text-xs text-gray-700 uppercase \
    bg-gray-50 dark:bg-gray-700 dark:text-gray-400";

pub const TABLE_ROW_STYLE: &str = "bg-white border-b dark:bg-gray-800 dark:border-gray-700";

pub const TABLE_CELL_STYLE: &str = "px-6 py-4";

pub const CATEGORY_BADGE_STYLE: &str = "inline-flex items-center px-2.5 py-0.5 \
    text-xs font-semibold text-emerald-800 bg-emerald-100 rounded-full \
    dark:bg-emerald-900 dark:text-emerald-300";

pub const PAGE_CONTAINER_STYLE: &str =
    "flex flex-col items-center px-6 py-8 mx-auto lg:py-5 text-gray-900 dark:text-white";

/// Something to render inside the page `<head>`.
pub enum HeadElement {
    /// The file path or URL to a JavaScript script.
    ScriptLink(String),
    /// JavaScript source code.
    #[allow(dead_code)]
    ScriptSource(PreEscaped<String>),
    /// CSS source.
    Style(PreEscaped<String>),
}

/// Wrap `content` in the shared page shell.
///
/// The shell loads htmx and the response-targets extension and renders the
/// fixed alert container that error alerts are swapped into.
pub fn base(title: &str, head_elements: &[HeadElement], content: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " - Caixa" }
                link rel="icon" type="image/png" href="/static/favicon-32x32.png" sizes="32x32";
                link href="/static/main.css" rel="stylesheet";

                script src="/static/htmx-2.0.8-min.js" {}
                script src="/static/htmx-ext-response-targets-2.0.4.js" {}

                style {
                    r#"
                    /* Keep chart tooltips above page content. */
                    .echarts-tooltip {
                        z-index: 30 !important;
                    }
                    "#
                }

                @for element in head_elements {
                    @match element {
                        HeadElement::ScriptLink(path) => script src=(path) {}
                        HeadElement::ScriptSource(text) => script { (text) }
                        HeadElement::Style(text) => style { (text) }
                    }
                }
            }

            body
                hx-ext="response-targets"
                class="container max-w-full min-h-screen bg-gray-50 dark:bg-gray-900"
            {
                (content)

                // Error alerts land here via hx-target-error.
                div
                    id="alert-container"
                    class="w-full max-w-md px-4"
                    style="position: fixed; bottom: 1rem; left: 50%; transform: translateX(-50%); z-index: 9999;"
                {}
            }
        }
    }
}

/// A full-page error view with a header (e.g. "404"), a description and a
/// suggested fix.
pub fn error_view(title: &str, header: &str, description: &str, fix: &str) -> Markup {
    let content = html!(
        section class="bg-white dark:bg-gray-900" {
            div class="py-8 px-4 mx-auto max-w-screen-xl lg:py-16 lg:px-6" {
                div class="mx-auto max-w-screen-sm text-center" {
                    h1 class="mb-4 text-7xl tracking-tight font-extrabold
                        lg:text-9xl text-emerald-700 dark:text-emerald-500"
                    {
                        (header)
                    }

                    p class="mb-4 text-3xl md:text-4xl tracking-tight
                        font-bold text-gray-900 dark:text-white"
                    {
                        (description)
                    }

                    p class="mb-4 text-1xl md:text-2xl tracking-tight
                        text-gray-900 dark:text-white"
                    {
                        (fix)
                    }

                    a href="/"
                        class="inline-flex text-white bg-emerald-700
                            hover:bg-emerald-800 focus:ring-4 focus:outline-hidden
                            focus:ring-emerald-300 font-medium rounded text-sm px-5
                            py-2.5 text-center dark:focus:ring-emerald-900 my-4"
                    {
                        "Back to Homepage"
                    }
                }
            }
        }
    );

    base(title, &[], &content)
}

/// Returns the CSS styles for adding an "R$" prefix to amount inputs.
pub fn currency_input_styles() -> HeadElement {
    HeadElement::Style(PreEscaped(
        r#"
        .input-wrapper {
            position: relative;
            display: inline-block;
        }
        .input-wrapper input[type="text"] {
            padding-left: 2.1rem;
        }
        .input-wrapper::before {
            content: 'R$';
            position: absolute;
            left: 0.6rem;
            top: 50%;
            transform: translateY(-50%);
            pointer-events: none;
        }
        "#
        .to_owned(),
    ))
}
