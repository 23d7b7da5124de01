//! # Message Service Router
//!
//! Explicit dispatch table from type URL to handler.

use super::bank::{send_handler, MsgSend};
use crate::domain::TypedMsg;
use crate::ports::outbound::{MsgHandler, MsgRouter, TypedHandler};
use std::collections::BTreeMap;

/// Type URL to handler table.
#[derive(Default)]
pub struct MsgServiceRouter {
    routes: BTreeMap<String, Box<dyn MsgHandler>>,
}

impl MsgServiceRouter {
    /// Create an empty router.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the handler for `type_url`.
    pub fn register(
        &mut self,
        type_url: impl Into<String>,
        handler: impl MsgHandler + 'static,
    ) -> &mut Self {
        self.routes.insert(type_url.into(), Box::new(handler));
        self
    }

    /// Register the bank transfer handler.
    pub fn with_bank(mut self) -> Self {
        self.register(MsgSend::TYPE_URL, TypedHandler::<MsgSend, _>::new(send_handler));
        self
    }

    /// Returns true if a handler is registered for `type_url`.
    pub fn has_route(&self, type_url: &str) -> bool {
        self.routes.contains_key(type_url)
    }

    /// Registered type URLs in sorted order.
    pub fn routes(&self) -> impl Iterator<Item = &str> {
        self.routes.keys().map(String::as_str)
    }
}

impl MsgRouter for MsgServiceRouter {
    fn handler(&self, type_url: &str) -> Option<&dyn MsgHandler> {
        self.routes.get(type_url).map(|handler| handler.as_ref())
    }
}

impl std::fmt::Debug for MsgServiceRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.routes.keys()).finish()
    }
}
