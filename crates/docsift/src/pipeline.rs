//! Extraction orchestration.
//!
//! [`Pipeline`] ties the pieces together: sniff the prefix, resolve a
//! decoder from the registry, invoke it (under the configured deadline, if
//! any), normalize the output. Each call is independent and stateless; the
//! only shared state is the frozen registry, so one pipeline can serve any
//! number of concurrent callers.

use crate::config::ExtractionConfig;
use crate::decoder::Decoder;
use crate::error::{ExtractError, Result};
use crate::media::MediaType;
use crate::normalize::normalize_text;
use crate::registry::DecoderRegistry;
use crate::sniff::Sniffer;
use crate::{decoders, io};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

/// Global Tokio runtime backing the `*_sync` wrappers.
///
/// Lazily initialized on first use and shared by every pipeline; creating a
/// runtime per call would dwarf the cost of small extractions. Runtime
/// construction only fails on resource exhaustion, at which point nothing
/// else would work either, so the failure is terminal here.
static GLOBAL_RUNTIME: Lazy<tokio::runtime::Runtime> = Lazy::new(|| {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("failed to create global Tokio runtime")
});

/// A successful extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Extraction {
    /// Extracted text, UTF-8, normalized unless the config disabled it.
    pub text: String,
    /// The media type that was sniffed (or asserted) and decoded.
    pub media_type: MediaType,
}

/// The format-dispatching extraction pipeline.
///
/// Built once from a registry and a config, then shared (`&self` API
/// throughout). There is no ambient global pipeline; construct and inject.
///
/// # Example
///
/// ```rust,no_run
/// use docsift::{ExtractionConfig, Pipeline};
///
/// # fn main() -> docsift::Result<()> {
/// let pipeline = Pipeline::with_default_decoders(ExtractionConfig::default())?;
/// let extraction = pipeline.extract_bytes_sync(b"plain text", None)?;
/// println!("{}", extraction.text);
/// # Ok(())
/// # }
/// ```
pub struct Pipeline {
    sniffer: Sniffer,
    registry: Arc<DecoderRegistry>,
    config: ExtractionConfig,
}

impl Pipeline {
    /// Build a pipeline from an explicitly populated registry.
    ///
    /// The registry is frozen at this point: the pipeline never mutates it,
    /// and the type system prevents anyone else from doing so once it is
    /// shared.
    pub fn new(registry: DecoderRegistry, config: ExtractionConfig) -> Self {
        Self {
            sniffer: Sniffer::new(),
            registry: Arc::new(registry),
            config,
        }
    }

    /// Build a pipeline with the built-in decoders for all enabled format
    /// features.
    pub fn with_default_decoders(config: ExtractionConfig) -> Result<Self> {
        let mut registry = DecoderRegistry::new();
        decoders::register_default_decoders(&mut registry)?;
        Ok(Self::new(registry, config))
    }

    /// The frozen registry this pipeline consults.
    pub fn registry(&self) -> &DecoderRegistry {
        &self.registry
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Classify a prefix without extracting. Exposed for callers that want
    /// detection only (e.g. the CLI's `sniff` subcommand).
    pub fn sniff(&self, prefix: &[u8], filename_hint: Option<&str>) -> MediaType {
        let window = self.config.effective_sniff_window();
        self.sniffer.sniff(&prefix[..prefix.len().min(window)], filename_hint)
    }

    /// Extract text from an in-memory buffer.
    ///
    /// # Errors
    ///
    /// - `UnsupportedFormat` when sniffing yields `Unknown`, or the sniffed
    ///   type has no registered decoder.
    /// - `DecodeFailed` when the decoder rejects recognized-but-malformed
    ///   content.
    /// - `Timeout` when a configured deadline elapses before the decoder
    ///   completes.
    pub async fn extract_bytes(&self, content: &[u8], filename_hint: Option<&str>) -> Result<Extraction> {
        let media_type = self.sniff(content, filename_hint);
        self.decode_as(content, media_type, filename_hint).await
    }

    /// Extract text from a buffer whose media type the caller already knows,
    /// skipping detection.
    pub async fn extract_bytes_as(
        &self,
        content: &[u8],
        media_type: MediaType,
        filename_hint: Option<&str>,
    ) -> Result<Extraction> {
        self.decode_as(content, media_type, filename_hint).await
    }

    /// Extract text from a file. The file name doubles as the sniffer hint.
    pub async fn extract_file(&self, path: impl AsRef<Path>) -> Result<Extraction> {
        let path = path.as_ref();
        let filename_hint = path.file_name().and_then(|n| n.to_str()).map(str::to_owned);

        let content = io::read_file_async(path).await?;
        self.extract_bytes(&content, filename_hint.as_deref()).await
    }

    /// Extract text from a blocking `Read` source.
    ///
    /// Only the sniff window is read up front; when the prefix classifies as
    /// unsupported the rest of the source is never consumed. Otherwise the
    /// prefix is replayed so the decoder sees the full stream.
    pub async fn extract_reader<R: Read>(&self, mut reader: R, filename_hint: Option<&str>) -> Result<Extraction> {
        let prefix = io::read_prefix(&mut reader, self.config.effective_sniff_window())?;

        let media_type = self.sniffer.sniff(&prefix, filename_hint);
        if media_type == MediaType::Unknown || self.registry.lookup(media_type).is_none() {
            return Err(ExtractError::unsupported(media_type, filename_hint));
        }

        let content = io::read_remaining(&mut reader, prefix)?;
        self.decode_as(&content, media_type, filename_hint).await
    }

    /// Blocking wrapper over [`Pipeline::extract_bytes`].
    pub fn extract_bytes_sync(&self, content: &[u8], filename_hint: Option<&str>) -> Result<Extraction> {
        GLOBAL_RUNTIME.block_on(self.extract_bytes(content, filename_hint))
    }

    /// Blocking wrapper over [`Pipeline::extract_file`].
    pub fn extract_file_sync(&self, path: impl AsRef<Path>) -> Result<Extraction> {
        GLOBAL_RUNTIME.block_on(self.extract_file(path))
    }

    async fn decode_as(
        &self,
        content: &[u8],
        media_type: MediaType,
        filename_hint: Option<&str>,
    ) -> Result<Extraction> {
        if media_type == MediaType::Unknown {
            return Err(ExtractError::unsupported(media_type, filename_hint));
        }

        let decoder = self
            .registry
            .lookup(media_type)
            .ok_or_else(|| ExtractError::unsupported(media_type, filename_hint))?;

        tracing::debug!(
            media_type = %media_type,
            decoder = decoder.name(),
            size_bytes = content.len(),
            "dispatching decode"
        );

        let text = self.run_decoder(decoder.as_ref(), content, media_type).await?;
        let text = if self.config.normalize { normalize_text(&text) } else { text };

        Ok(Extraction { text, media_type })
    }

    /// Invoke the decoder, racing it against the configured deadline.
    ///
    /// Cancellation is cooperative: the timeout can only fire at the decode
    /// future's await points. A decoder that blocks without yielding is
    /// reported as timed out when it finally returns.
    async fn run_decoder(&self, decoder: &dyn Decoder, content: &[u8], media_type: MediaType) -> Result<String> {
        match self.config.timeout() {
            None => decoder.decode(content, media_type).await,
            Some(limit) => {
                let started = Instant::now();
                match tokio::time::timeout(limit, decoder.decode(content, media_type)).await {
                    Ok(result) => {
                        let elapsed = started.elapsed();
                        if result.is_ok() && elapsed > limit {
                            return Err(ExtractError::Timeout { media_type, elapsed });
                        }
                        result
                    }
                    Err(_) => Err(ExtractError::Timeout {
                        media_type,
                        elapsed: started.elapsed(),
                    }),
                }
            }
        }
    }
}
