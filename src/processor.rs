//! Transform processor
//!
//! This module provides the `TransformProcessor` that drives one transform
//! through decode, RGBA normalization, the per-pixel rule and PNG encoding.
//! The CLI and the path-based helpers in the crate root both go through it.

use crate::{
    config::TransformConfig,
    error::{PixelOpsError, Result},
    services::{ImageIOService, ProcessingStage, ProgressTracker},
    transforms::{PixelTransform, TransformStats},
    types::{ProcessingMetadata, TransformResult},
};
use image::DynamicImage;
use instant::Instant;
use log::info;
use std::path::Path;
use tracing::{debug as trace_debug, instrument};

/// Runs a configured pixel transform over images
pub struct TransformProcessor {
    config: TransformConfig,
    transform: Box<dyn PixelTransform>,
    progress_tracker: ProgressTracker,
}

impl TransformProcessor {
    /// Create a processor for the given configuration
    #[must_use]
    pub fn new(config: TransformConfig) -> Self {
        let transform = config.kind.build();
        let progress_tracker = if config.verbose {
            ProgressTracker::console(true)
        } else {
            ProgressTracker::no_op()
        };

        Self {
            config,
            transform,
            progress_tracker,
        }
    }

    /// Replace the progress tracker
    #[must_use]
    pub fn with_progress_tracker(mut self, tracker: ProgressTracker) -> Self {
        self.progress_tracker = tracker;
        self
    }

    /// The configuration this processor was built from
    #[must_use]
    pub fn config(&self) -> &TransformConfig {
        &self.config
    }

    /// The transform this processor applies
    #[must_use]
    pub fn transform(&self) -> &dyn PixelTransform {
        self.transform.as_ref()
    }

    /// Transform `input_path` and write the PNG result to `output_path`
    ///
    /// Nothing is written unless decoding and the transform succeed, and the
    /// output is replaced atomically.
    ///
    /// # Errors
    ///
    /// - `NotFound` when the input does not exist
    /// - `Io` / `Decode` when it cannot be read or decoded
    /// - `Encode` when the PNG cannot be written
    #[instrument(
        skip(self, input_path, output_path),
        fields(
            transform = %self.config.kind,
            input = %input_path.as_ref().display(),
            output = %output_path.as_ref().display()
        )
    )]
    pub fn process_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &mut self,
        input_path: P,
        output_path: Q,
    ) -> Result<TransformResult> {
        let input_path = input_path.as_ref();
        let output_path = output_path.as_ref();

        self.progress_tracker.reset();
        info!("Processing: {}", input_path.display());

        let result = self.process_file_inner(input_path, output_path);
        match &result {
            Ok(result) => {
                self.progress_tracker.report_stage(ProcessingStage::Completed);
                self.progress_tracker.report_completion(result.metadata.timings);
                info!("Saved to {}", output_path.display());
            },
            Err(e) => self.progress_tracker.report_error(e.stage(), &e.to_string()),
        }
        result
    }

    fn process_file_inner(&mut self, input_path: &Path, output_path: &Path) -> Result<TransformResult> {
        let total_start = Instant::now();

        self.progress_tracker.report_stage(ProcessingStage::ImageLoading);
        let decode_start = Instant::now();
        let image = ImageIOService::load_image(input_path)?;
        let decode_ms = decode_start.elapsed().as_millis() as u64;

        let mut result = self.run_transform(image, decode_ms)?;
        result.input_path = Some(input_path.display().to_string());

        self.progress_tracker.report_stage_with_description(
            ProcessingStage::FileSaving,
            format!("Saving PNG to {}", output_path.display()),
        );
        let encode_start = Instant::now();
        ImageIOService::save_png(&result.image, output_path)?;
        result.metadata.timings.image_encode_ms = encode_start.elapsed().as_millis() as u64;
        result.metadata.timings.total_ms = total_start.elapsed().as_millis() as u64;

        Ok(result)
    }

    /// Transform an already decoded image in memory
    ///
    /// # Errors
    ///
    /// - `Processing` when the transform breaks the size invariant
    #[instrument(
        skip(self, image),
        fields(
            transform = %self.config.kind,
            dimensions = %format!("{}x{}", image.width(), image.height())
        )
    )]
    pub fn process_image(&mut self, image: &DynamicImage) -> Result<TransformResult> {
        self.progress_tracker.reset();
        let total_start = Instant::now();
        let result = self.run_transform(image.clone(), 0);
        self.finish_in_memory(result, total_start)
    }

    /// Decode `bytes` and transform the image in memory
    ///
    /// # Errors
    ///
    /// - `Decode` when the bytes are not a decodable image
    pub fn process_bytes(&mut self, bytes: &[u8]) -> Result<TransformResult> {
        self.progress_tracker.reset();
        let total_start = Instant::now();

        self.progress_tracker.report_stage(ProcessingStage::ImageLoading);
        let result = ImageIOService::load_from_bytes(bytes).and_then(|image| {
            let decode_ms = total_start.elapsed().as_millis() as u64;
            self.run_transform(image, decode_ms)
        });
        self.finish_in_memory(result, total_start)
    }

    fn finish_in_memory(
        &mut self,
        result: Result<TransformResult>,
        total_start: Instant,
    ) -> Result<TransformResult> {
        match result {
            Ok(mut result) => {
                result.metadata.timings.total_ms = total_start.elapsed().as_millis() as u64;
                self.progress_tracker.report_stage(ProcessingStage::Completed);
                self.progress_tracker.report_completion(result.metadata.timings);
                Ok(result)
            },
            Err(e) => {
                self.progress_tracker.report_error(e.stage(), &e.to_string());
                Err(e)
            },
        }
    }

    fn run_transform(&mut self, image: DynamicImage, decode_ms: u64) -> Result<TransformResult> {
        let original_dimensions = (image.width(), image.height());
        let mut metadata = ProcessingMetadata::new(self.transform.name(), self.transform.threshold());
        metadata.input_color_type = ImageIOService::color_type_name(&image);

        self.progress_tracker.report_stage(ProcessingStage::Normalization);
        let normalize_start = Instant::now();
        let rgba = ImageIOService::normalize_to_rgba(image);
        metadata.timings.image_decode_ms =
            decode_ms + normalize_start.elapsed().as_millis() as u64;

        self.progress_tracker.report_stage(ProcessingStage::Transform);
        let transform_start = Instant::now();
        let output = self.transform.apply(&rgba);
        metadata.timings.transform_ms = transform_start.elapsed().as_millis() as u64;

        if output.dimensions() != rgba.dimensions() {
            let (out_w, out_h) = output.dimensions();
            let err = PixelOpsError::processing(
                ProcessingStage::Transform,
                format!(
                    "'{}' produced a {}x{} buffer from a {}x{} input",
                    self.transform.name(),
                    out_w,
                    out_h,
                    original_dimensions.0,
                    original_dimensions.1
                ),
            );
            return Err(err);
        }

        let stats = TransformStats::between(&rgba, &output);
        metadata.pixels_changed = stats.changed;
        metadata.pixels_transparent = stats.transparent;

        trace_debug!(
            transform = self.transform.name(),
            width = original_dimensions.0,
            height = original_dimensions.1,
            source_color = %metadata.input_color_type,
            pixels_changed = stats.changed,
            pixels_transparent = stats.transparent,
            transform_ms = metadata.timings.transform_ms,
            "Pixel transform applied"
        );

        Ok(TransformResult::new(output, original_dimensions, metadata))
    }
}

impl std::fmt::Debug for TransformProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransformProcessor")
            .field("config", &self.config)
            .field("transform", &self.transform.name())
            .finish_non_exhaustive()
    }
}

impl From<TransformConfig> for TransformProcessor {
    fn from(config: TransformConfig) -> Self {
        Self::new(config)
    }
}
