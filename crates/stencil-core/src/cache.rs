/*
 * cache.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Memoization of parsed templates.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::error::ParseError;
use crate::parser::Template;

/// A thread-safe cache of parsed templates keyed by their source text.
///
/// Parsing is deterministic, so a template string only needs to be scanned
/// once. Sources that fail to parse are not cached.
#[derive(Debug, Default)]
pub struct TemplateCache {
    entries: RwLock<HashMap<String, Arc<Template>>>,
}

impl TemplateCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached template for `source`, parsing it on first use.
    pub fn get_or_parse(&self, source: &str) -> Result<Arc<Template>, ParseError> {
        {
            let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(template) = entries.get(source) {
                tracing::trace!("template cache hit");
                return Ok(Arc::clone(template));
            }
        }

        tracing::trace!("template cache miss");
        let template = Arc::new(Template::parse(source)?);
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        // Another thread may have parsed the same source meanwhile
        let entry = entries
            .entry(source.to_string())
            .or_insert_with(|| Arc::clone(&template));
        Ok(Arc::clone(entry))
    }

    /// Number of cached templates.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop all cached templates.
    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}
