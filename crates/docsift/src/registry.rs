//! Decoder registration and lookup.
//!
//! The registry maps each [`MediaType`] to at most one decoder. It is built
//! during initialization, then frozen inside a [`crate::Pipeline`] and only
//! read from there; there is no global registry and no locking. Callers that
//! need to re-apply configuration can re-register: registration is
//! last-write-wins and idempotent.

use crate::decoder::Decoder;
use crate::error::{ExtractError, Result};
use crate::media::MediaType;
use std::collections::HashMap;
use std::sync::Arc;

/// Validate a decoder name before registration.
///
/// Names must be non-empty and free of whitespace; kebab-case by convention.
fn validate_decoder_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(ExtractError::validation("decoder name cannot be empty"));
    }

    if name.contains(char::is_whitespace) {
        return Err(ExtractError::validation(format!(
            "decoder name '{}' cannot contain whitespace",
            name
        )));
    }

    Ok(())
}

/// Mapping from media type to extraction capability.
///
/// # Thread safety
///
/// Mutation requires `&mut self`, so the borrow checker enforces the
/// registration-before-concurrent-reads rule: once the registry is shared
/// (moved into a pipeline, wrapped in an `Arc`), only `lookup`/`list` are
/// reachable.
#[derive(Default)]
pub struct DecoderRegistry {
    bindings: HashMap<MediaType, Arc<dyn Decoder>>,
}

impl DecoderRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Register a decoder under every media type it reports.
    ///
    /// Re-registering a type overwrites the previous binding
    /// (last-write-wins); registering the same decoder twice is a no-op in
    /// effect.
    ///
    /// # Errors
    ///
    /// Returns `ExtractError::Validation` if the decoder's name is invalid
    /// or its media-type list is empty or contains `Unknown`.
    pub fn register(&mut self, decoder: Arc<dyn Decoder>) -> Result<()> {
        validate_decoder_name(decoder.name())?;

        let media_types = decoder.media_types();
        if media_types.is_empty() {
            return Err(ExtractError::validation(format!(
                "decoder '{}' reports no media types",
                decoder.name()
            )));
        }
        if media_types.contains(&MediaType::Unknown) {
            return Err(ExtractError::validation(format!(
                "decoder '{}' cannot bind the unknown media type",
                decoder.name()
            )));
        }

        for media_type in media_types {
            tracing::debug!(decoder = decoder.name(), media_type = %media_type, "binding decoder");
            self.bindings.insert(*media_type, Arc::clone(&decoder));
        }

        Ok(())
    }

    /// Look up the decoder bound to a media type.
    ///
    /// A pure read; never invokes the capability. `None` signals an unbound
    /// type, which the pipeline reports as `UnsupportedFormat`.
    pub fn lookup(&self, media_type: MediaType) -> Option<Arc<dyn Decoder>> {
        self.bindings.get(&media_type).cloned()
    }

    /// Media types with a binding, in no particular order.
    pub fn bound_types(&self) -> Vec<MediaType> {
        self.bindings.keys().copied().collect()
    }

    /// Names of all distinct registered decoders.
    pub fn list(&self) -> Vec<String> {
        let mut names: Vec<String> = self.bindings.values().map(|d| d.name().to_string()).collect();
        names.sort();
        names.dedup();
        names
    }

    /// Remove the binding for a media type, if any.
    pub fn remove(&mut self, media_type: MediaType) -> Option<Arc<dyn Decoder>> {
        self.bindings.remove(&media_type)
    }

    /// True when no decoder is registered.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
