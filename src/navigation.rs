//! The navigation bar shared by all pages.

use maud::{Markup, html};

use crate::endpoints;

const NAV_LINK_STYLE: &str = "block py-2 px-3 text-gray-900 rounded-sm hover:bg-gray-100 \
    lg:hover:bg-transparent lg:border-0 lg:hover:text-emerald-700 lg:p-0 \
    dark:text-white lg:dark:hover:text-emerald-400 dark:hover:bg-gray-700 \
    dark:hover:text-white lg:dark:hover:bg-transparent";

const NAV_LINK_ACTIVE_STYLE: &str = "block py-2 px-3 text-white bg-emerald-700 rounded-sm \
    lg:bg-transparent lg:text-emerald-700 lg:p-0 dark:text-white lg:dark:text-emerald-400";

/// A link in the navigation bar.
///
/// At most one link should be marked as current at any one time.
#[derive(Clone)]
struct NavLink<'a> {
    url: &'a str,
    title: &'a str,
    is_current: bool,
}

impl NavLink<'_> {
    fn into_html(self) -> Markup {
        let style = if self.is_current {
            NAV_LINK_ACTIVE_STYLE
        } else {
            NAV_LINK_STYLE
        };

        html!(
            a
                href=(self.url)
                class=(style)
                aria-current=[self.is_current.then_some("page")]
            {
                (self.title)
            }
        )
    }
}

/// The navigation bar with links to each page.
pub struct NavBar<'a> {
    links: Vec<NavLink<'a>>,
}

impl NavBar<'_> {
    /// Build the navigation bar, marking the link matching `active_endpoint`
    /// as the current page.
    pub fn new(active_endpoint: &str) -> NavBar<'_> {
        let pages = [
            (endpoints::ROOT, "Entries"),
            (endpoints::NEW_ENTRY_VIEW, "New Entry"),
            (endpoints::CATEGORIES_VIEW, "Categories"),
            (endpoints::REPORTS_VIEW, "Reports"),
        ];

        let links = pages
            .into_iter()
            .map(|(url, title)| NavLink {
                url,
                title,
                is_current: url == active_endpoint,
            })
            .collect();

        NavBar { links }
    }

    /// Render the navigation bar as HTML.
    // Template adapted from https://flowbite.com/docs/components/navbar/#default-navbar
    pub fn into_html(self) -> Markup {
        html!(
            nav class="bg-white border-gray-200 dark:bg-gray-900" {
                div class="max-w-screen-xl flex flex-wrap items-center justify-between mx-auto p-4" {
                    a href="/" class="flex items-center space-x-3 rtl:space-x-reverse" {
                        img
                            src="/static/favicon-128x128.png"
                            alt="Caixa Logo"
                            class="h-8";

                        span class="self-center text-2xl font-semibold whitespace-nowrap dark:text-white" {
                            "Caixa"
                        }
                    }

                    div class="w-full lg:block lg:w-auto" {
                        ul class="font-medium flex flex-col p-4 lg:p-0 mt-4
                            border border-gray-100 rounded bg-gray-50
                            lg:flex-row lg:space-x-8 rtl:space-x-reverse lg:mt-0
                            lg:border-0 lg:bg-white dark:bg-gray-800
                            lg:dark:bg-gray-900 dark:border-gray-700"
                        {
                            @for link in self.links.into_iter() {
                                li { (link.into_html()) }
                            }
                        }
                    }
                }
            }
        )
    }
}
