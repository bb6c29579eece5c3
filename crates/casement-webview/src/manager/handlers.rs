use std::sync::Arc;

use tracing::debug;
use wry::{PageLoadEvent, WebViewBuilder};

use casement_common::WebViewId;

use crate::forwarder::NavigationForwarder;

use super::WebViewManager;

/// The platform seam: wry wants `true` to allow a navigation, the observer
/// contract returns `true` when it has handled one. The inversion happens
/// here and nowhere else.
pub(crate) fn navigation_verdict(
    forwarder: &NavigationForwarder,
    view: WebViewId,
    url: &str,
) -> bool {
    let handled = forwarder.should_load_url(view, url);
    debug!(view = %view, url = %url, handled, "navigation decision");
    !handled
}

impl WebViewManager {
    pub(super) fn attach_page_load_handler<'a>(
        builder: WebViewBuilder<'a>,
        forwarder: Arc<NavigationForwarder>,
        view: WebViewId,
    ) -> WebViewBuilder<'a> {
        builder.with_on_page_load_handler(move |event, url| match event {
            PageLoadEvent::Started => forwarder.page_load_started(view, &url),
            PageLoadEvent::Finished => forwarder.page_load_complete(view, &url),
        })
    }

    pub(super) fn attach_navigation_handler<'a>(
        builder: WebViewBuilder<'a>,
        forwarder: Arc<NavigationForwarder>,
        view: WebViewId,
    ) -> WebViewBuilder<'a> {
        builder.with_navigation_handler(move |url| navigation_verdict(&forwarder, view, &url))
    }

    pub(super) fn attach_title_handler<'a>(
        builder: WebViewBuilder<'a>,
        forwarder: Arc<NavigationForwarder>,
        view: WebViewId,
    ) -> WebViewBuilder<'a> {
        builder.with_document_title_changed_handler(move |title| {
            forwarder.title_changed(view, &title);
        })
    }
}
